//! Error types for the `rag-engine` crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building or querying the engine.
#[derive(Debug, Error)]
pub enum RagError {
    /// Missing credential or inconsistent configuration. Fatal at startup.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A configured document source directory does not exist.
    #[error("document directory not found: {}", path.display())]
    DirectoryNotFound {
        /// The directory that could not be read.
        path: PathBuf,
        /// The underlying filesystem error.
        #[source]
        source: std::io::Error,
    },

    /// A single document could not be parsed into plain text.
    #[error("failed to extract text from '{}'", path.display())]
    Extraction {
        /// The file that failed to parse.
        path: PathBuf,
        /// The underlying parse or I/O error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The configured source directories produced no chunks to index.
    #[error("no documents found in configured source directories")]
    NoDocuments,

    /// An index build was attempted with zero chunks.
    #[error("cannot build a vector index from an empty corpus")]
    EmptyCorpus,

    /// A query string was empty or whitespace-only.
    #[error("query must not be empty")]
    EmptyQuery,

    /// A search or answer was requested before the index was built.
    #[error("vector index has not been built")]
    NotInitialized,

    /// An embedding request failed.
    #[error("embedding request failed: {message}")]
    Embedding {
        /// A description of the failure.
        message: String,
        /// The underlying transport or decoding error, when one exists.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A generation request failed. Never retried.
    #[error("generation request failed: {message}")]
    Generation {
        /// A description of the failure.
        message: String,
        /// The underlying transport or decoding error, when one exists.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// A convenience result type for engine operations.
pub type Result<T> = std::result::Result<T, RagError>;

//! Data types for documents, chunks, and search results.

use serde::{Deserialize, Serialize};

/// A source document with its extracted plain text.
///
/// Documents exist only during the build phase; once chunked and indexed
/// they are discarded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Identifier for the document (the source filename).
    pub id: String,
    /// The extracted text content of the document.
    pub text: String,
}

impl Document {
    /// Create a document from an identifier and its extracted text.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self { id: id.into(), text: text.into() }
    }
}

/// A bounded-length passage of a [`Document`], the unit of indexing.
///
/// Each chunk is a contiguous substring of its source document and records
/// where it came from, so retrieval hits can be traced back to a file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    /// The text content of the chunk.
    pub text: String,
    /// The ID of the source [`Document`].
    pub source_id: String,
    /// Byte offset of this chunk within the source document's text.
    pub offset: usize,
}

/// A retrieved [`Chunk`] paired with a relevance score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// The retrieved chunk.
    pub chunk: Chunk,
    /// Cosine similarity to the query (higher is more relevant).
    pub score: f32,
}

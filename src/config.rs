//! Configuration for the RAG engine.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{RagError, Result};

/// Environment variable holding the Generative Language API key.
pub const API_KEY_ENV: &str = "GENAI_API_KEY";

/// How the loader reacts when a single document fails to parse.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum ExtractionPolicy {
    /// Abort the whole load on the first unparseable document.
    #[default]
    Strict,
    /// Skip unparseable documents, logging a warning for each.
    SkipWithWarning,
}

/// Configuration parameters for the RAG engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    /// Directory scanned (non-recursively) for `.pdf` documents.
    pub pdf_dir: PathBuf,
    /// Directory scanned (non-recursively) for `.txt` documents.
    pub text_dir: PathBuf,
    /// Embedding model identifier.
    pub embedding_model: String,
    /// Generative model identifier.
    pub generation_model: String,
    /// Maximum chunk size in characters.
    pub chunk_size: usize,
    /// Number of overlapping characters between consecutive chunks.
    pub chunk_overlap: usize,
    /// Number of top results to retrieve from vector search.
    pub top_k: usize,
    /// Minimum similarity score for retrieved results (results below this
    /// are filtered out before prompt assembly).
    pub similarity_threshold: f32,
    /// How to react when a single document fails to parse.
    pub extraction_policy: ExtractionPolicy,
    /// Timeout applied to each outbound HTTP request.
    pub request_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pdf_dir: PathBuf::from("static/pdf_files"),
            text_dir: PathBuf::from("static/txt_files"),
            embedding_model: "text-embedding-004".to_string(),
            generation_model: "gemini-2.5-flash".to_string(),
            chunk_size: 1000,
            chunk_overlap: 100,
            top_k: 5,
            similarity_threshold: 0.0,
            extraction_policy: ExtractionPolicy::Strict,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl EngineConfig {
    /// Create a new builder for constructing an [`EngineConfig`].
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }
}

/// Read the API credential from the `GENAI_API_KEY` environment variable.
///
/// # Errors
///
/// Returns [`RagError::Configuration`] if the variable is unset or empty.
pub fn api_key_from_env() -> Result<String> {
    match std::env::var(API_KEY_ENV) {
        Ok(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(RagError::Configuration(format!(
            "{API_KEY_ENV} not found in environment variables"
        ))),
    }
}

/// Builder for constructing a validated [`EngineConfig`].
#[derive(Debug, Clone, Default)]
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfigBuilder {
    /// Set the directory scanned for `.pdf` documents.
    pub fn pdf_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.pdf_dir = dir.into();
        self
    }

    /// Set the directory scanned for `.txt` documents.
    pub fn text_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.text_dir = dir.into();
        self
    }

    /// Set the embedding model identifier.
    pub fn embedding_model(mut self, model: impl Into<String>) -> Self {
        self.config.embedding_model = model.into();
        self
    }

    /// Set the generative model identifier.
    pub fn generation_model(mut self, model: impl Into<String>) -> Self {
        self.config.generation_model = model.into();
        self
    }

    /// Set the maximum chunk size in characters.
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.config.chunk_size = size;
        self
    }

    /// Set the overlap between consecutive chunks in characters.
    pub fn chunk_overlap(mut self, overlap: usize) -> Self {
        self.config.chunk_overlap = overlap;
        self
    }

    /// Set the number of top results to retrieve from vector search.
    pub fn top_k(mut self, k: usize) -> Self {
        self.config.top_k = k;
        self
    }

    /// Set the minimum similarity threshold for retrieved results.
    pub fn similarity_threshold(mut self, threshold: f32) -> Self {
        self.config.similarity_threshold = threshold;
        self
    }

    /// Set the reaction to documents that fail to parse.
    pub fn extraction_policy(mut self, policy: ExtractionPolicy) -> Self {
        self.config.extraction_policy = policy;
        self
    }

    /// Set the timeout applied to each outbound HTTP request.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    /// Build the [`EngineConfig`], validating that parameters are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Configuration`] if:
    /// - `chunk_overlap >= chunk_size`
    /// - `chunk_size == 0`
    /// - `top_k == 0`
    pub fn build(self) -> Result<EngineConfig> {
        if self.config.chunk_size == 0 {
            return Err(RagError::Configuration("chunk_size must be greater than zero".to_string()));
        }
        if self.config.chunk_overlap >= self.config.chunk_size {
            return Err(RagError::Configuration(format!(
                "chunk_overlap ({}) must be less than chunk_size ({})",
                self.config.chunk_overlap, self.config.chunk_size
            )));
        }
        if self.config.top_k == 0 {
            return Err(RagError::Configuration("top_k must be greater than zero".to_string()));
        }
        Ok(self.config)
    }
}

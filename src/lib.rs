//! Retrieval-augmented generation query engine.
//!
//! `rag-engine` ingests a corpus of documents (PDF and plain text), splits
//! them into overlapping chunks, indexes the chunks as dense embedding
//! vectors, and answers natural-language queries by retrieving the most
//! similar chunks and forwarding them with the query to a generative model.
//!
//! The engine is built once at startup and then serves queries over the
//! read-only index:
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use rag_engine::{
//!     api_key_from_env, EngineConfig, GeminiEmbeddingProvider,
//!     GeminiGenerationClient, RagEngine,
//! };
//!
//! let config = EngineConfig::builder()
//!     .pdf_dir("static/pdf_files")
//!     .text_dir("static/txt_files")
//!     .build()?;
//!
//! let api_key = api_key_from_env()?;
//! let embedder = GeminiEmbeddingProvider::new(
//!     &api_key, &config.embedding_model, config.request_timeout)?;
//! let generator = GeminiGenerationClient::new(
//!     &api_key, &config.generation_model, config.request_timeout)?;
//!
//! let engine = RagEngine::builder()
//!     .config(config)
//!     .embedding_provider(Arc::new(embedder))
//!     .generation_client(Arc::new(generator))
//!     .build()?;
//!
//! engine.init().await?;
//! let answer = engine.answer("What is the capital of France?").await?;
//! ```

pub mod chunking;
pub mod config;
pub mod document;
pub mod embedding;
pub mod engine;
pub mod error;
pub mod gemini;
pub mod generation;
pub mod index;
pub mod loader;

pub use chunking::{Chunker, RecursiveChunker};
pub use config::{
    api_key_from_env, EngineConfig, EngineConfigBuilder, ExtractionPolicy, API_KEY_ENV,
};
pub use document::{Chunk, Document, SearchResult};
pub use embedding::EmbeddingProvider;
pub use engine::{RagEngine, RagEngineBuilder, NO_CONTEXT_ANSWER};
pub use error::{RagError, Result};
pub use gemini::{GeminiEmbeddingProvider, GeminiGenerationClient};
pub use generation::GenerationClient;
pub use index::VectorIndex;
pub use loader::DirectoryLoader;

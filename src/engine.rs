//! RAG engine orchestrator.
//!
//! [`RagEngine`] composes the loader, chunker, vector index, and generation
//! client into a single `answer(query) -> text` operation: a one-time
//! initialization builds the index from the configured source directories,
//! then each query retrieves the top-K chunks, assembles a prompt, and
//! forwards it to the generation client.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use rag_engine::{EngineConfig, RagEngine};
//!
//! let engine = RagEngine::builder()
//!     .config(EngineConfig::default())
//!     .embedding_provider(Arc::new(embedder))
//!     .generation_client(Arc::new(generator))
//!     .build()?;
//!
//! engine.init().await?;
//! let answer = engine.answer("What is the capital of France?").await?;
//! ```

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{error, info};

use crate::chunking::{Chunker, RecursiveChunker};
use crate::config::EngineConfig;
use crate::document::Chunk;
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::generation::GenerationClient;
use crate::index::VectorIndex;
use crate::loader::DirectoryLoader;

/// Answer returned when retrieval produces no usable context. The
/// generation client is not called in that case.
pub const NO_CONTEXT_ANSWER: &str = "No relevant information found in the knowledge base.";

/// The RAG orchestrator.
///
/// Holds the built vector index for the lifetime of the process. The index
/// is built exactly once: concurrent [`init()`](RagEngine::init) calls are
/// serialized so at most one build executes, and every caller observes the
/// same completed index. [`answer()`](RagEngine::answer) before a successful
/// `init()` fails fast with [`RagError::NotInitialized`] rather than
/// blocking.
pub struct RagEngine {
    config: EngineConfig,
    loader: DirectoryLoader,
    chunker: Arc<dyn Chunker>,
    index: VectorIndex,
    generation_client: Arc<dyn GenerationClient>,
    ready: OnceCell<()>,
}

impl std::fmt::Debug for RagEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RagEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl RagEngine {
    /// Create a new [`RagEngineBuilder`].
    pub fn builder() -> RagEngineBuilder {
        RagEngineBuilder::default()
    }

    /// Return a reference to the engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Whether the index has been built and queries can be answered.
    pub fn is_ready(&self) -> bool {
        self.ready.initialized()
    }

    /// Load all documents, chunk them, and build the vector index.
    ///
    /// Runs at most once per engine; concurrent callers wait for the single
    /// in-flight build. A failed build leaves the engine uninitialized and
    /// is not retried automatically.
    ///
    /// # Errors
    ///
    /// Propagates [`RagError::DirectoryNotFound`] and [`RagError::Extraction`]
    /// from loading, [`RagError::NoDocuments`] if the combined chunk set is
    /// empty, and [`RagError::Embedding`] / [`RagError::EmptyCorpus`] from
    /// the index build.
    pub async fn init(&self) -> Result<()> {
        self.ready
            .get_or_try_init(|| async {
                self.build_index().await.inspect_err(|e| {
                    error!(error = %e, "engine initialization failed");
                })
            })
            .await?;
        Ok(())
    }

    async fn build_index(&self) -> Result<()> {
        let documents = self.loader.load()?;

        let mut chunks: Vec<Chunk> = Vec::new();
        for document in &documents {
            chunks.extend(self.chunker.chunk(document));
        }

        if chunks.is_empty() {
            return Err(RagError::NoDocuments);
        }

        info!(document_count = documents.len(), chunk_count = chunks.len(), "building index");
        self.index.build(chunks).await
    }

    /// Answer a query: retrieve top-K chunks, assemble the prompt, and call
    /// the generation client.
    ///
    /// If retrieval produces zero chunks (after the similarity-threshold
    /// filter), returns [`NO_CONTEXT_ANSWER`] without calling the generation
    /// client. This short-circuit is by contract, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::EmptyQuery`] for an empty or whitespace-only
    /// query, [`RagError::NotInitialized`] before a successful
    /// [`init()`](RagEngine::init), and propagates [`RagError::Embedding`]
    /// and [`RagError::Generation`] from the per-query calls.
    pub async fn answer(&self, query: &str) -> Result<String> {
        if query.trim().is_empty() {
            return Err(RagError::EmptyQuery);
        }
        if !self.is_ready() {
            return Err(RagError::NotInitialized);
        }

        let results = self.index.search(query, self.config.top_k).await?;

        let threshold = self.config.similarity_threshold;
        let retrieved: Vec<&str> = results
            .iter()
            .filter(|r| r.score >= threshold)
            .map(|r| r.chunk.text.as_str())
            .collect();

        if retrieved.is_empty() {
            info!(query_len = query.len(), "no relevant chunks retrieved");
            return Ok(NO_CONTEXT_ANSWER.to_string());
        }

        let context = retrieved.join("\n");
        let prompt = format!("Query: {query}\n\nContext:\n{context}\n\nAnswer:");

        let answer = self.generation_client.generate(&prompt).await?;
        info!(retrieved_count = retrieved.len(), "query answered");
        Ok(answer)
    }
}

/// Builder for constructing a [`RagEngine`].
///
/// `config`, `embedding_provider`, and `generation_client` are required;
/// the loader and chunker are derived from the config unless overridden.
#[derive(Default)]
pub struct RagEngineBuilder {
    config: Option<EngineConfig>,
    embedding_provider: Option<Arc<dyn EmbeddingProvider>>,
    generation_client: Option<Arc<dyn GenerationClient>>,
    chunker: Option<Arc<dyn Chunker>>,
}

impl RagEngineBuilder {
    /// Set the engine configuration.
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the embedding provider.
    pub fn embedding_provider(mut self, provider: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedding_provider = Some(provider);
        self
    }

    /// Set the generation client.
    pub fn generation_client(mut self, client: Arc<dyn GenerationClient>) -> Self {
        self.generation_client = Some(client);
        self
    }

    /// Override the chunker derived from the config.
    pub fn chunker(mut self, chunker: Arc<dyn Chunker>) -> Self {
        self.chunker = Some(chunker);
        self
    }

    /// Build the [`RagEngine`], validating that all required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Configuration`] if any required field is missing.
    pub fn build(self) -> Result<RagEngine> {
        let config = self
            .config
            .ok_or_else(|| RagError::Configuration("config is required".to_string()))?;
        let embedding_provider = self.embedding_provider.ok_or_else(|| {
            RagError::Configuration("embedding_provider is required".to_string())
        })?;
        let generation_client = self.generation_client.ok_or_else(|| {
            RagError::Configuration("generation_client is required".to_string())
        })?;

        let loader = DirectoryLoader::new(
            &config.pdf_dir,
            &config.text_dir,
            config.extraction_policy,
        );
        let chunker = self.chunker.unwrap_or_else(|| {
            Arc::new(RecursiveChunker::new(config.chunk_size, config.chunk_overlap))
        });
        let index = VectorIndex::new(embedding_provider);

        Ok(RagEngine {
            config,
            loader,
            chunker,
            index,
            generation_client,
            ready: OnceCell::new(),
        })
    }
}

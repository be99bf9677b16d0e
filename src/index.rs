//! In-memory vector index using cosine similarity.
//!
//! [`VectorIndex`] embeds every chunk once at build time and answers
//! nearest-neighbor queries by exact scan. The similarity metric is cosine
//! similarity, fixed. Exact search is intentional: the corpus sizes in
//! scope are hundreds to low thousands of chunks.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::document::{Chunk, SearchResult};
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};

/// A chunk paired with its embedding vector.
#[derive(Debug, Clone)]
struct IndexedChunk {
    chunk: Chunk,
    embedding: Vec<f32>,
}

/// An immutable-after-build vector index over document chunks.
///
/// Built exactly once per process lifetime; the build populates the index
/// under a write lock, and queries only ever take read locks, so concurrent
/// searches never contend once the index is ready. There are no add or
/// remove operations.
///
/// # Example
///
/// ```rust,ignore
/// use rag_engine::VectorIndex;
///
/// let index = VectorIndex::new(provider);
/// index.build(chunks).await?;
/// let results = index.search("how to bake a pie", 5).await?;
/// ```
pub struct VectorIndex {
    provider: Arc<dyn EmbeddingProvider>,
    entries: RwLock<Option<Vec<IndexedChunk>>>,
}

/// Compute cosine similarity between two vectors.
///
/// Returns 0.0 if either vector has zero magnitude.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

impl VectorIndex {
    /// Create a new, unbuilt index over the given embedding provider.
    pub fn new(provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self { provider, entries: RwLock::new(None) }
    }

    /// Embed every chunk and populate the index.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::EmptyCorpus`] if `chunks` is empty — the index
    /// refuses to operate with zero content rather than silently answering
    /// with no context. Embedding failures propagate as
    /// [`RagError::Embedding`].
    pub async fn build(&self, chunks: Vec<Chunk>) -> Result<()> {
        if chunks.is_empty() {
            return Err(RagError::EmptyCorpus);
        }

        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        let embeddings = self.provider.embed_documents(&texts).await?;

        let indexed: Vec<IndexedChunk> = chunks
            .into_iter()
            .zip(embeddings)
            .map(|(chunk, embedding)| IndexedChunk { chunk, embedding })
            .collect();

        let chunk_count = indexed.len();
        *self.entries.write().await = Some(indexed);
        info!(chunk_count, "vector index built");

        Ok(())
    }

    /// Search for the `top_k` chunks most similar to the query.
    ///
    /// Returns at most `top_k` results ordered by descending cosine
    /// similarity.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::EmptyQuery`] if the query is empty or
    /// whitespace-only, and [`RagError::NotInitialized`] if the index has
    /// not been built.
    pub async fn search(&self, query: &str, top_k: usize) -> Result<Vec<SearchResult>> {
        if query.trim().is_empty() {
            return Err(RagError::EmptyQuery);
        }

        // Fail before spending an embedding call on an unbuilt index.
        if self.entries.read().await.is_none() {
            return Err(RagError::NotInitialized);
        }

        let query_embedding = self.provider.embed_query(query).await?;

        let entries = self.entries.read().await;
        let entries = entries.as_ref().ok_or(RagError::NotInitialized)?;

        let mut scored: Vec<SearchResult> = entries
            .iter()
            .map(|entry| SearchResult {
                chunk: entry.chunk.clone(),
                score: cosine_similarity(&entry.embedding, &query_embedding),
            })
            .collect();

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(top_k);
        Ok(scored)
    }

    /// Number of chunks currently indexed, or `None` before the build.
    pub async fn chunk_count(&self) -> Option<usize> {
        self.entries.read().await.as_ref().map(Vec::len)
    }
}

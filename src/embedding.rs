//! Embedding provider trait for generating vector embeddings from text.

use async_trait::async_trait;

use crate::error::Result;

/// A provider that maps text to fixed-dimension dense vectors.
///
/// Implementations wrap a specific embedding backend behind a unified async
/// interface. Corpus and query embedding are separate operations because
/// some models apply different instructions to documents than to queries.
///
/// # Example
///
/// ```rust,ignore
/// use rag_engine::EmbeddingProvider;
///
/// let vectors = provider.embed_documents(&["first chunk", "second chunk"]).await?;
/// assert_eq!(vectors.len(), 2);
/// assert_eq!(vectors[0].len(), provider.dimensions());
/// ```
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate one embedding vector per input text, preserving order.
    ///
    /// Returns an empty `Vec` for empty input.
    async fn embed_documents(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>>;

    /// Generate an embedding vector for a single query.
    ///
    /// May apply different normalization than corpus embedding, depending
    /// on the backing model.
    async fn embed_query(&self, text: &str) -> Result<Vec<f32>>;

    /// Return the dimensionality of embeddings produced by this provider.
    fn dimensions(&self) -> usize;
}

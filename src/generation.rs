//! Generation client trait for producing answer text from a prompt.

use async_trait::async_trait;

use crate::error::Result;

/// A client for an external generative-text service.
///
/// Implementations make exactly one remote request per call: no retries and
/// no response caching. A timeout on the underlying transport is treated as
/// a [`Generation`](crate::RagError::Generation) error.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Send the assembled prompt to the model and return the generated text
    /// verbatim.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

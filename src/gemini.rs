//! Gemini-backed embedding and generation clients.
//!
//! Both clients call the Generative Language REST API directly with
//! `reqwest`, authenticating via the `x-goog-api-key` header. Embedding
//! requests use asymmetric task types: `RETRIEVAL_DOCUMENT` for corpus
//! chunks and `RETRIEVAL_QUERY` for queries.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::generation::GenerationClient;

/// The default Generative Language API base URL.
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default dimensionality for `text-embedding-004`.
const DEFAULT_DIMENSIONS: usize = 768;

/// Build a `reqwest` client with the given request timeout.
fn http_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| RagError::Configuration(format!("failed to build HTTP client: {e}")))
}

/// Reject empty API keys at construction time.
fn check_api_key(api_key: &str) -> Result<()> {
    if api_key.trim().is_empty() {
        return Err(RagError::Configuration("API key must not be empty".to_string()));
    }
    Ok(())
}

/// Extract a readable message from an API error body.
fn error_detail(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorResponse {
        error: ErrorDetail,
    }
    #[derive(Deserialize)]
    struct ErrorDetail {
        message: String,
    }

    serde_json::from_str::<ErrorResponse>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string())
}

// ── Wire types ─────────────────────────────────────────────────────

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EmbedContentRequest<'a> {
    model: String,
    content: RequestContent<'a>,
    task_type: &'a str,
}

#[derive(Serialize)]
struct BatchEmbedRequest<'a> {
    requests: Vec<EmbedContentRequest<'a>>,
}

#[derive(Deserialize)]
struct EmbedContentResponse {
    embedding: EmbeddingValues,
}

#[derive(Deserialize)]
struct BatchEmbedResponse {
    embeddings: Vec<EmbeddingValues>,
}

#[derive(Deserialize)]
struct EmbeddingValues {
    values: Vec<f32>,
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: ResponseContent,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

// ── Embedding provider ─────────────────────────────────────────────

/// An [`EmbeddingProvider`] backed by the Gemini embedding API.
///
/// Corpus texts are embedded with the `RETRIEVAL_DOCUMENT` task type
/// (batched via `batchEmbedContents`), queries with `RETRIEVAL_QUERY`.
///
/// # Example
///
/// ```rust,ignore
/// use rag_engine::GeminiEmbeddingProvider;
///
/// let provider = GeminiEmbeddingProvider::new(api_key, "text-embedding-004", timeout)?;
/// let vector = provider.embed_query("how to bake a pie").await?;
/// ```
#[derive(Debug)]
pub struct GeminiEmbeddingProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    dimensions: usize,
}

impl GeminiEmbeddingProvider {
    /// Create a new provider with the given API key and model.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Configuration`] if the API key is empty.
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let api_key = api_key.into();
        check_api_key(&api_key)?;

        Ok(Self {
            client: http_client(timeout)?,
            api_key,
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            dimensions: DEFAULT_DIMENSIONS,
        })
    }

    /// Override the API base URL. Intended for tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the dimensionality reported by [`dimensions()`](EmbeddingProvider::dimensions).
    pub fn with_dimensions(mut self, dims: usize) -> Self {
        self.dimensions = dims;
        self
    }

    fn embed_request<'a>(&self, text: &'a str, task_type: &'a str) -> EmbedContentRequest<'a> {
        EmbedContentRequest {
            model: format!("models/{}", self.model),
            content: RequestContent { parts: vec![RequestPart { text }] },
            task_type,
        }
    }

    async fn post_embed<Req: Serialize, Res: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &Req,
    ) -> Result<Res> {
        let url = format!("{}/models/{}:{endpoint}", self.base_url, self.model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                error!(model = %self.model, error = %e, "embedding request failed");
                RagError::Embedding {
                    message: format!("request to '{url}' failed: {e}"),
                    source: Some(Box::new(e)),
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(model = %self.model, %status, "embedding API error");
            return Err(RagError::Embedding {
                message: format!("API returned {status}: {}", error_detail(&body)),
                source: None,
            });
        }

        response.json().await.map_err(|e| {
            error!(model = %self.model, error = %e, "failed to parse embedding response");
            RagError::Embedding {
                message: format!("failed to parse response: {e}"),
                source: Some(Box::new(e)),
            }
        })
    }
}

#[async_trait]
impl EmbeddingProvider for GeminiEmbeddingProvider {
    async fn embed_documents(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        debug!(model = %self.model, batch_size = texts.len(), "embedding document batch");

        let request = BatchEmbedRequest {
            requests: texts.iter().map(|t| self.embed_request(t, "RETRIEVAL_DOCUMENT")).collect(),
        };
        let response: BatchEmbedResponse = self.post_embed("batchEmbedContents", &request).await?;

        if response.embeddings.len() != texts.len() {
            return Err(RagError::Embedding {
                message: format!(
                    "API returned {} embeddings for {} inputs",
                    response.embeddings.len(),
                    texts.len()
                ),
                source: None,
            });
        }

        Ok(response.embeddings.into_iter().map(|e| e.values).collect())
    }

    async fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
        debug!(model = %self.model, text_len = text.len(), "embedding query");

        let request = self.embed_request(text, "RETRIEVAL_QUERY");
        let response: EmbedContentResponse = self.post_embed("embedContent", &request).await?;
        Ok(response.embedding.values)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

// ── Generation client ──────────────────────────────────────────────

/// A [`GenerationClient`] backed by the Gemini `generateContent` API.
///
/// Makes one remote request per call; a transport timeout surfaces as a
/// [`RagError::Generation`].
#[derive(Debug)]
pub struct GeminiGenerationClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiGenerationClient {
    /// Create a new client with the given API key and model.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Configuration`] if the API key is empty.
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let api_key = api_key.into();
        check_api_key(&api_key)?;

        Ok(Self {
            client: http_client(timeout)?,
            api_key,
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Override the API base URL. Intended for tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl GenerationClient for GeminiGenerationClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        debug!(model = %self.model, prompt_len = prompt.len(), "sending generation request");

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let request = GenerateContentRequest {
            contents: vec![RequestContent { parts: vec![RequestPart { text: prompt }] }],
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(model = %self.model, error = %e, "generation request failed");
                RagError::Generation {
                    message: format!("request to '{url}' failed: {e}"),
                    source: Some(Box::new(e)),
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(model = %self.model, %status, "generation API error");
            return Err(RagError::Generation {
                message: format!("API returned {status}: {}", error_detail(&body)),
                source: None,
            });
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
            error!(model = %self.model, error = %e, "failed to parse generation response");
            RagError::Generation {
                message: format!("failed to parse response: {e}"),
                source: Some(Box::new(e)),
            }
        })?;

        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .map(|c| c.content.parts.into_iter().map(|p| p.text).collect())
            .ok_or_else(|| RagError::Generation {
                message: "API returned no candidates".to_string(),
                source: None,
            })?;

        Ok(text)
    }
}

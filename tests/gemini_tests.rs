//! Wire-level tests for the Gemini embedding and generation clients,
//! using a mock HTTP server.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use rag_engine::{
    EmbeddingProvider, GeminiEmbeddingProvider, GeminiGenerationClient, GenerationClient, RagError,
};

const TIMEOUT: Duration = Duration::from_secs(5);

fn embedding_provider(server: &MockServer) -> GeminiEmbeddingProvider {
    GeminiEmbeddingProvider::new("test-key", "test-embed", TIMEOUT)
        .unwrap()
        .with_base_url(server.uri())
}

fn generation_client(server: &MockServer) -> GeminiGenerationClient {
    GeminiGenerationClient::new("test-key", "test-gen", TIMEOUT)
        .unwrap()
        .with_base_url(server.uri())
}

#[test]
fn empty_api_key_is_a_configuration_error() {
    assert!(matches!(
        GeminiEmbeddingProvider::new("", "test-embed", TIMEOUT).unwrap_err(),
        RagError::Configuration(_)
    ));
    assert!(matches!(
        GeminiGenerationClient::new("  ", "test-gen", TIMEOUT).unwrap_err(),
        RagError::Configuration(_)
    ));
}

#[tokio::test]
async fn embed_query_uses_retrieval_query_task_type() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/test-embed:embedContent"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({
                "embedding": { "values": [0.1, 0.2, 0.3] }
            })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let provider = embedding_provider(&server);
    let vector = provider.embed_query("how to bake a pie").await.unwrap();
    assert_eq!(vector, vec![0.1, 0.2, 0.3]);

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = requests[0].body_json().unwrap();
    assert_eq!(body["taskType"], "RETRIEVAL_QUERY");
    assert_eq!(body["content"]["parts"][0]["text"], "how to bake a pie");
    assert_eq!(requests[0].headers.get("x-goog-api-key").unwrap().to_str().unwrap(), "test-key");
}

#[tokio::test]
async fn embed_documents_batches_with_document_task_type() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/test-embed:batchEmbedContents"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({
                "embeddings": [
                    { "values": [1.0, 0.0] },
                    { "values": [0.0, 1.0] }
                ]
            })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let provider = embedding_provider(&server);
    let vectors = provider.embed_documents(&["first chunk", "second chunk"]).await.unwrap();
    assert_eq!(vectors, vec![vec![1.0, 0.0], vec![0.0, 1.0]]);

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = requests[0].body_json().unwrap();
    assert_eq!(body["requests"].as_array().unwrap().len(), 2);
    assert_eq!(body["requests"][0]["taskType"], "RETRIEVAL_DOCUMENT");
    assert_eq!(body["requests"][0]["model"], "models/test-embed");
    assert_eq!(body["requests"][1]["content"]["parts"][0]["text"], "second chunk");
}

#[tokio::test]
async fn embed_documents_with_empty_input_makes_no_request() {
    let server = MockServer::start().await;

    let provider = embedding_provider(&server);
    let vectors = provider.embed_documents(&[]).await.unwrap();
    assert!(vectors.is_empty());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn embedding_count_mismatch_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/test-embed:batchEmbedContents"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "embeddings": [{ "values": [1.0] }] })),
        )
        .mount(&server)
        .await;

    let provider = embedding_provider(&server);
    let err = provider.embed_documents(&["one", "two"]).await.unwrap_err();
    assert!(matches!(err, RagError::Embedding { .. }));
}

#[tokio::test]
async fn embedding_api_error_surfaces_the_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/test-embed:embedContent"))
        .respond_with(
            ResponseTemplate::new(429)
                .set_body_json(json!({ "error": { "message": "quota exceeded" } })),
        )
        .mount(&server)
        .await;

    let provider = embedding_provider(&server);
    let err = provider.embed_query("anything").await.unwrap_err();
    match err {
        RagError::Embedding { message, .. } => {
            assert!(message.contains("quota exceeded"));
            assert!(message.contains("429"));
        }
        other => panic!("expected Embedding, got {other:?}"),
    }
}

#[tokio::test]
async fn generate_returns_candidate_text_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/test-gen:generateContent"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": {
                        "role": "model",
                        "parts": [{ "text": "Paris" }]
                    }
                }]
            })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = generation_client(&server);
    let answer = client.generate("Query: capital?\n\nContext:\n...\n\nAnswer:").await.unwrap();
    assert_eq!(answer, "Paris");

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = requests[0].body_json().unwrap();
    assert_eq!(
        body["contents"][0]["parts"][0]["text"],
        "Query: capital?\n\nContext:\n...\n\nAnswer:"
    );
}

#[tokio::test]
async fn generation_api_error_is_a_generation_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/test-gen:generateContent"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({ "error": { "message": "internal failure" } })),
        )
        .mount(&server)
        .await;

    let client = generation_client(&server);
    let err = client.generate("prompt").await.unwrap_err();
    match err {
        RagError::Generation { message, .. } => assert!(message.contains("internal failure")),
        other => panic!("expected Generation, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_candidates_is_a_generation_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/test-gen:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let client = generation_client(&server);
    let err = client.generate("prompt").await.unwrap_err();
    assert!(matches!(err, RagError::Generation { .. }));
}

#[tokio::test]
async fn request_timeout_is_a_generation_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/test-gen:generateContent"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "candidates": [] }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = GeminiGenerationClient::new("test-key", "test-gen", Duration::from_millis(100))
        .unwrap()
        .with_base_url(server.uri());

    let err = client.generate("prompt").await.unwrap_err();
    assert!(matches!(err, RagError::Generation { .. }));
}

//! Validation tests for the engine configuration builder.

use std::time::Duration;

use rag_engine::{EngineConfig, ExtractionPolicy, RagError};

#[test]
fn defaults_match_the_documented_values() {
    let config = EngineConfig::default();
    assert_eq!(config.chunk_size, 1000);
    assert_eq!(config.chunk_overlap, 100);
    assert_eq!(config.top_k, 5);
    assert_eq!(config.similarity_threshold, 0.0);
    assert_eq!(config.extraction_policy, ExtractionPolicy::Strict);
    assert_eq!(config.request_timeout, Duration::from_secs(30));
    assert_eq!(config.embedding_model, "text-embedding-004");
    assert_eq!(config.generation_model, "gemini-2.5-flash");
}

#[test]
fn builder_accepts_consistent_parameters() {
    let config = EngineConfig::builder()
        .pdf_dir("docs/pdf")
        .text_dir("docs/txt")
        .chunk_size(500)
        .chunk_overlap(50)
        .top_k(3)
        .extraction_policy(ExtractionPolicy::SkipWithWarning)
        .build()
        .unwrap();

    assert_eq!(config.chunk_size, 500);
    assert_eq!(config.chunk_overlap, 50);
    assert_eq!(config.top_k, 3);
    assert_eq!(config.extraction_policy, ExtractionPolicy::SkipWithWarning);
}

#[test]
fn overlap_must_be_less_than_chunk_size() {
    for (size, overlap) in [(100, 100), (100, 150)] {
        let err = EngineConfig::builder()
            .chunk_size(size)
            .chunk_overlap(overlap)
            .build()
            .unwrap_err();
        assert!(matches!(err, RagError::Configuration(_)));
    }
}

#[test]
fn zero_chunk_size_is_rejected() {
    let err = EngineConfig::builder().chunk_size(0).chunk_overlap(0).build().unwrap_err();
    assert!(matches!(err, RagError::Configuration(_)));
}

#[test]
fn zero_top_k_is_rejected() {
    let err = EngineConfig::builder().top_k(0).build().unwrap_err();
    assert!(matches!(err, RagError::Configuration(_)));
}

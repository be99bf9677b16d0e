//! Shared test doubles for the embedding provider and generation client.
#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use rag_engine::{EmbeddingProvider, GenerationClient, Result};

/// Deterministic embedding provider over a fixed vocabulary.
///
/// Each dimension counts occurrences of one vocabulary word in the
/// lowercased input, so texts sharing words are cosine-similar and
/// unrelated texts score zero.
pub struct VocabEmbedder {
    vocab: Vec<&'static str>,
    pub batch_calls: AtomicUsize,
}

impl VocabEmbedder {
    pub fn new(vocab: &[&'static str]) -> Self {
        Self { vocab: vocab.to_vec(), batch_calls: AtomicUsize::new(0) }
    }

    fn embed_text(&self, text: &str) -> Vec<f32> {
        let lowered = text.to_lowercase();
        self.vocab.iter().map(|word| lowered.matches(word).count() as f32).collect()
    }
}

#[async_trait]
impl EmbeddingProvider for VocabEmbedder {
    async fn embed_documents(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        self.batch_calls.fetch_add(1, Ordering::SeqCst);
        Ok(texts.iter().map(|t| self.embed_text(t)).collect())
    }

    async fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.embed_text(text))
    }

    fn dimensions(&self) -> usize {
        self.vocab.len()
    }
}

/// Generation client double that records every prompt it receives and
/// returns a fixed reply.
pub struct RecordingGenerator {
    reply: String,
    pub calls: AtomicUsize,
    pub prompts: Mutex<Vec<String>>,
}

impl RecordingGenerator {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerationClient for RecordingGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.reply.clone())
    }
}

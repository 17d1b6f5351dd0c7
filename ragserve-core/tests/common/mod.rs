//! Shared test fixtures: a deterministic fake embedding provider.
#![allow(dead_code)]

use async_trait::async_trait;
use ragserve_core::{Chunk, EmbeddingProvider, Result};

/// A fake [`EmbeddingProvider`] that embeds text as normalized counts of a
/// fixed vocabulary. Texts sharing vocabulary words land close together
/// under squared-L2 distance; texts with disjoint vocabulary are distance
/// 2.0 apart (beyond the default 1.35 cutoff).
pub struct VocabEmbedder {
    vocab: Vec<&'static str>,
}

impl VocabEmbedder {
    pub fn new(vocab: &[&'static str]) -> Self {
        Self { vocab: vocab.to_vec() }
    }
}

#[async_trait]
impl EmbeddingProvider for VocabEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let lower = text.to_lowercase();
        let mut v: Vec<f32> =
            self.vocab.iter().map(|word| lower.matches(word).count() as f32).collect();
        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut v {
                *x /= norm;
            }
        }
        Ok(v)
    }

    fn dimensions(&self) -> usize {
        self.vocab.len()
    }
}

/// Build a chunk with its embedding computed by the given embedder.
pub async fn embedded_chunk(embedder: &VocabEmbedder, id: &str, text: &str) -> Chunk {
    Chunk {
        id: id.to_string(),
        text: text.to_string(),
        embedding: embedder.embed(text).await.unwrap(),
    }
}

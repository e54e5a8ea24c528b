use std::sync::Arc;

use tracing::{debug, info};

use crate::engine::llm_client::Embedder;
use crate::error::GenerationError;

/// Lore chunks with their embeddings, computed once at startup.
pub struct LoreIndex {
    chunks: Vec<String>,
    embeddings: Vec<Vec<f32>>,
}

impl LoreIndex {
    pub fn build(chunks: Vec<String>, embedder: &dyn Embedder) -> Result<Self, GenerationError> {
        let embeddings = embedder.embed(&chunks)?;
        if embeddings.len() != chunks.len() {
            return Err(GenerationError::MalformedResponse(format!(
                "{} chunks but {} embeddings",
                chunks.len(),
                embeddings.len()
            )));
        }

        info!(chunks = chunks.len(), "Lore index built");
        Ok(Self { chunks, embeddings })
    }

    /// Up to `k` chunks, most similar first. Ties keep document order.
    pub fn search(&self, query: &[f32], k: usize) -> Vec<&str> {
        let mut scored: Vec<(f32, usize)> = self
            .embeddings
            .iter()
            .enumerate()
            .map(|(i, e)| (cosine_similarity(e, query), i))
            .collect();

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored
            .into_iter()
            .take(k)
            .map(|(_, i)| self.chunks[i].as_str())
            .collect()
    }
}

/// Returns a value in [-1, 1]; 0.0 for empty, mismatched or zero vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;

    for (x, y) in a.iter().zip(b.iter()) {
        let x = *x as f64;
        let y = *y as f64;
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom < 1e-10 {
        return 0.0;
    }

    (dot / denom) as f32
}

/// A top-k view over the shared index. Recreated whenever k changes.
pub struct Retriever {
    index: Arc<LoreIndex>,
    embedder: Arc<dyn Embedder>,
    k: usize,
}

impl Retriever {
    pub fn new(index: Arc<LoreIndex>, embedder: Arc<dyn Embedder>, k: usize) -> Self {
        Self { index, embedder, k }
    }

    pub fn retrieve(&self, query: &str) -> Result<Vec<String>, GenerationError> {
        let query_embedding = self
            .embedder
            .embed(&[query.to_string()])?
            .into_iter()
            .next()
            .ok_or_else(|| GenerationError::MalformedResponse("no query embedding".into()))?;

        let hits: Vec<String> = self
            .index
            .search(&query_embedding, self.k)
            .into_iter()
            .map(String::from)
            .collect();

        debug!(k = self.k, hits = hits.len(), "Retrieved lore");
        Ok(hits)
    }
}

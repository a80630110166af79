//! Embedding generation and vector similarity.

mod hash;

pub use hash::HashEmbedder;

use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Trait for embedding generation.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Generate an embedding for a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embeddings for multiple texts.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Get the embedding dimensions.
    fn dimensions(&self) -> usize;
}

/// Compute cosine similarity between two vectors.
///
/// Returns 0.0 when either vector has zero magnitude, or when the lengths
/// differ.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}

/// Embeddings stored per document, keyed by document ID.
///
/// Insertion does not validate dimensions against any embedder; callers are
/// expected to store vectors of a consistent length.
#[derive(Debug, Default)]
pub struct EmbeddingCache {
    embeddings: RwLock<HashMap<String, Vec<f32>>>,
}

impl EmbeddingCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the embedding for a document, replacing any previous one.
    pub async fn insert(&self, doc_id: &str, embedding: Vec<f32>) {
        let mut embeddings = self.embeddings.write().await;
        embeddings.insert(doc_id.to_string(), embedding);
    }

    /// Look up the stored embedding for a document.
    pub async fn get(&self, doc_id: &str) -> Option<Vec<f32>> {
        let embeddings = self.embeddings.read().await;
        embeddings.get(doc_id).cloned()
    }

    /// Number of stored embeddings.
    pub async fn len(&self) -> usize {
        let embeddings = self.embeddings.read().await;
        embeddings.len()
    }

    /// Whether the cache holds no embeddings.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

//! Deterministic hash-based embeddings.
//!
//! Vectors are derived from an MD5 digest of the input bytes, so the same
//! text always maps to the identical vector with no model or external state.
//! This is a low-fidelity placeholder for a learned embedding model:
//! similarity between vectors reflects hash locality, not meaning. The
//! digest serves purely as a pseudo-random expansion source, not as a
//! security measure.

use super::Embedder;
use crate::error::{Result, SvarError};
use async_trait::async_trait;

/// Default number of vector components.
pub const DEFAULT_DIMENSIONS: usize = 384;

/// Hash-based embedder.
///
/// `embed` is a pure function of the text's bytes.
pub struct HashEmbedder {
    dimensions: usize,
}

impl HashEmbedder {
    /// Create a hash embedder with the default dimensions.
    pub fn new() -> Self {
        Self {
            dimensions: DEFAULT_DIMENSIONS,
        }
    }

    /// Create a hash embedder with custom dimensions.
    ///
    /// Fails with [`SvarError::InvalidInput`] when `dimensions` is zero.
    pub fn with_dimensions(dimensions: usize) -> Result<Self> {
        if dimensions == 0 {
            return Err(SvarError::InvalidInput(
                "embedding dimensions must be greater than zero".to_string(),
            ));
        }
        Ok(Self { dimensions })
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Embedder for HashEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let digest = md5::compute(text.as_bytes());
        let hash = u128::from_be_bytes(digest.0);

        // Component i is a bit window of the digest scaled into [0, 1).
        // Shifts past the 128-bit digest leave nothing, so components
        // beyond index 127 are 0.0.
        let embedding = (0..self.dimensions)
            .map(|i| {
                let window = hash.checked_shr(i as u32).unwrap_or(0);
                (window % 100) as f32 / 100.0
            })
            .collect();

        Ok(embedding)
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut embeddings = Vec::with_capacity(texts.len());
        for text in texts {
            embeddings.push(self.embed(text).await?);
        }
        Ok(embeddings)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_embedding_is_deterministic() {
        let embedder = HashEmbedder::new();
        let a = embedder.embed("Python is a programming language").await.unwrap();
        let b = embedder.embed("Python is a programming language").await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_different_texts_yield_different_vectors() {
        let embedder = HashEmbedder::new();
        let a = embedder.embed("hello").await.unwrap();
        let b = embedder.embed("world").await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_embedding_shape_and_range() {
        let embedder = HashEmbedder::with_dimensions(64).unwrap();
        let embedding = embedder.embed("some text").await.unwrap();
        assert_eq!(embedding.len(), 64);
        assert!(embedding.iter().all(|v| (0.0..1.0).contains(v)));
    }

    #[tokio::test]
    async fn test_embed_batch_matches_embed() {
        let embedder = HashEmbedder::new();
        let texts = vec!["first".to_string(), "second".to_string()];
        let batch = embedder.embed_batch(&texts).await.unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0], embedder.embed("first").await.unwrap());
        assert_eq!(batch[1], embedder.embed("second").await.unwrap());
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(HashEmbedder::with_dimensions(0).is_err());
    }

    #[test]
    fn test_default_dimensions() {
        assert_eq!(HashEmbedder::new().dimensions(), 384);
        assert_eq!(HashEmbedder::with_dimensions(128).unwrap().dimensions(), 128);
    }
}

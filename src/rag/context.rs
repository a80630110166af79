//! Context retrieval for RAG responses.

use super::ContextCandidate;
use crate::document_store::DocumentStore;
use crate::embedding::{cosine_similarity, Embedder};
use crate::error::Result;
use std::sync::Arc;
use tracing::debug;

/// Retrieves and ranks context for a query.
///
/// Keyword search selects the candidate pool; candidates are then re-ranked
/// by embedding similarity between the query and each excerpt. Embeddings
/// are computed fresh over the exact texts compared, never read from a
/// cache, so ranking is deterministic for a given corpus and query.
pub struct ContextRetriever {
    doc_store: Arc<dyn DocumentStore>,
    embedder: Arc<dyn Embedder>,
}

impl ContextRetriever {
    /// Create a new context retriever.
    pub fn new(doc_store: Arc<dyn DocumentStore>, embedder: Arc<dyn Embedder>) -> Self {
        Self {
            doc_store,
            embedder,
        }
    }

    /// Retrieve up to `top_k` context candidates for a query, most similar
    /// first.
    pub async fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<ContextCandidate>> {
        let query_embedding = self.embedder.embed(query).await?;

        let matches = self.doc_store.search_documents(query, top_k).await?;
        debug!("Keyword search produced {} candidates", matches.len());

        let mut candidates = Vec::with_capacity(matches.len());
        for keyword_match in matches {
            let excerpt_embedding = self.embedder.embed(&keyword_match.excerpt).await?;
            let similarity = cosine_similarity(&query_embedding, &excerpt_embedding);

            candidates.push(ContextCandidate {
                doc_id: keyword_match.doc_id,
                excerpt: keyword_match.excerpt,
                keyword_score: keyword_match.score,
                similarity,
                metadata: keyword_match.metadata,
            });
        }

        // Stable sort keeps keyword rank order on similarity ties.
        candidates.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        Ok(candidates)
    }
}

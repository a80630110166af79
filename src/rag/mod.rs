//! RAG (Retrieval-Augmented Generation) for question answering with sources.
//!
//! Context retrieval selects and ranks relevant excerpts; response assembly
//! turns them into an answer with citations.

pub mod context;
mod response;

pub use context::ContextRetriever;
pub use response::{QueryResponse, ResponseGenerator, SourceRef};

use serde_json::Value;
use std::collections::HashMap;

/// A document excerpt proposed as context for a query.
#[derive(Debug, Clone)]
pub struct ContextCandidate {
    /// Source document ID.
    pub doc_id: String,
    /// Leading excerpt of the document content.
    pub excerpt: String,
    /// Number of distinct query words matched. A recall signal only; final
    /// ordering is by similarity.
    pub keyword_score: usize,
    /// Cosine similarity between the query and excerpt embeddings.
    pub similarity: f32,
    /// Metadata of the source document.
    pub metadata: HashMap<String, Value>,
}

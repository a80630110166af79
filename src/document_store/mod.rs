//! Document storage and keyword search.
//!
//! Provides a trait-based interface over a document table paired with an
//! inverted word index.

mod memory;

pub use memory::MemoryDocumentStore;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Maximum excerpt length returned by keyword search, in characters.
pub const EXCERPT_CHARS: usize = 200;

/// A document held by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique document ID.
    pub doc_id: String,
    /// Full text content.
    pub content: String,
    /// Caller-supplied metadata.
    pub metadata: HashMap<String, Value>,
    /// When the document was added (ISO-8601).
    pub added_at: String,
}

/// A keyword search hit.
#[derive(Debug, Clone)]
pub struct KeywordMatch {
    /// Matched document ID.
    pub doc_id: String,
    /// Leading excerpt of the document content.
    pub excerpt: String,
    /// Number of distinct query words found in the document.
    pub score: usize,
    /// Metadata of the matched document.
    pub metadata: HashMap<String, Value>,
}

/// Trait for document store implementations.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Add a document, replacing any previous document under the same ID.
    ///
    /// Replacement is last-write-wins for content and metadata, and the
    /// index reflects only the latest content.
    async fn add_document(
        &self,
        doc_id: &str,
        content: &str,
        metadata: Option<HashMap<String, Value>>,
    ) -> Result<String>;

    /// Retrieve a document by ID. Unknown IDs yield `None`.
    async fn retrieve_document(&self, doc_id: &str) -> Result<Option<Document>>;

    /// Search documents by query words.
    ///
    /// Results are ranked by the number of distinct query words each
    /// document contains; documents matching no query word are omitted.
    /// `top_k` of zero yields an empty result set.
    async fn search_documents(&self, query: &str, top_k: usize) -> Result<Vec<KeywordMatch>>;

    /// Total number of stored documents.
    async fn document_count(&self) -> Result<usize>;
}

/// Split text into lowercase whitespace-delimited tokens.
///
/// No punctuation stripping or stemming: "loops" and "loop" are distinct
/// tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(|word| word.to_string())
        .collect()
}

/// Take the leading `max_chars` characters of `text`.
pub(crate) fn excerpt(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

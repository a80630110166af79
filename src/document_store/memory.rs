//! In-memory document store implementation.

use super::{excerpt, tokenize, Document, DocumentStore, KeywordMatch, EXCERPT_CHARS};
use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// In-memory document store with an inverted word index.
pub struct MemoryDocumentStore {
    inner: RwLock<StoreInner>,
    clock: Arc<dyn Clock>,
}

/// Document table and index, guarded as a single unit: a reader can never
/// observe a document in the index but missing from the table.
#[derive(Default)]
struct StoreInner {
    documents: HashMap<String, Document>,
    /// Word -> IDs of documents containing it, deduplicated, in insertion
    /// order.
    index: HashMap<String, Vec<String>>,
    /// Document ID -> words currently indexed for it, so replacement can
    /// drop the old postings.
    doc_words: HashMap<String, Vec<String>>,
    /// Document ID -> first-insertion sequence; ranking tie-break.
    insertion_order: HashMap<String, u64>,
    next_seq: u64,
}

impl MemoryDocumentStore {
    /// Create a store that timestamps documents with the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create a store that timestamps documents with the given clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: RwLock::new(StoreInner::default()),
            clock,
        }
    }
}

impl Default for MemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn add_document(
        &self,
        doc_id: &str,
        content: &str,
        metadata: Option<HashMap<String, Value>>,
    ) -> Result<String> {
        let added_at = self.clock.now();
        let mut inner = self.inner.write().await;

        // Drop the previous postings before re-indexing so a replaced
        // document leaves no stale index entries behind.
        if let Some(old_words) = inner.doc_words.remove(doc_id) {
            for word in old_words {
                let now_empty = match inner.index.get_mut(&word) {
                    Some(postings) => {
                        postings.retain(|id| id != doc_id);
                        postings.is_empty()
                    }
                    None => false,
                };
                if now_empty {
                    inner.index.remove(&word);
                }
            }
        }

        let mut words = tokenize(content);
        words.sort();
        words.dedup();

        for word in &words {
            let postings = inner.index.entry(word.clone()).or_default();
            if !postings.iter().any(|id| id == doc_id) {
                postings.push(doc_id.to_string());
            }
        }

        if !inner.insertion_order.contains_key(doc_id) {
            let seq = inner.next_seq;
            inner.insertion_order.insert(doc_id.to_string(), seq);
            inner.next_seq += 1;
        }

        let word_count = words.len();
        inner.doc_words.insert(doc_id.to_string(), words);
        inner.documents.insert(
            doc_id.to_string(),
            Document {
                doc_id: doc_id.to_string(),
                content: content.to_string(),
                metadata: metadata.unwrap_or_default(),
                added_at,
            },
        );

        debug!("Indexed document {} ({} distinct words)", doc_id, word_count);
        Ok(doc_id.to_string())
    }

    async fn retrieve_document(&self, doc_id: &str) -> Result<Option<Document>> {
        let inner = self.inner.read().await;
        Ok(inner.documents.get(doc_id).cloned())
    }

    async fn search_documents(&self, query: &str, top_k: usize) -> Result<Vec<KeywordMatch>> {
        let inner = self.inner.read().await;

        let mut query_words = tokenize(query);
        query_words.sort();
        query_words.dedup();

        let mut scores: HashMap<&String, usize> = HashMap::new();
        for word in &query_words {
            if let Some(postings) = inner.index.get(word) {
                for doc_id in postings {
                    *scores.entry(doc_id).or_insert(0) += 1;
                }
            }
        }

        let mut ranked: Vec<(&String, usize)> = scores.into_iter().collect();
        ranked.sort_by(|a, b| {
            b.1.cmp(&a.1)
                .then_with(|| inner.insertion_order[a.0].cmp(&inner.insertion_order[b.0]))
        });
        ranked.truncate(top_k);

        let results = ranked
            .into_iter()
            .map(|(doc_id, score)| {
                let doc = &inner.documents[doc_id];
                KeywordMatch {
                    doc_id: doc_id.clone(),
                    excerpt: excerpt(&doc.content, EXCERPT_CHARS),
                    score,
                    metadata: doc.metadata.clone(),
                }
            })
            .collect();

        Ok(results)
    }

    async fn document_count(&self) -> Result<usize> {
        let inner = self.inner.read().await;
        Ok(inner.documents.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use serde_json::json;

    #[tokio::test]
    async fn test_add_and_retrieve_document() {
        let store = MemoryDocumentStore::with_clock(Arc::new(FixedClock(
            "2024-06-01T12:00:00+00:00".to_string(),
        )));

        let mut metadata = HashMap::new();
        metadata.insert("topic".to_string(), json!("Programming"));

        let id = store
            .add_document("intro_python", "Python is simple", Some(metadata))
            .await
            .unwrap();
        assert_eq!(id, "intro_python");

        let doc = store.retrieve_document("intro_python").await.unwrap().unwrap();
        assert_eq!(doc.content, "Python is simple");
        assert_eq!(doc.metadata["topic"], json!("Programming"));
        assert_eq!(doc.added_at, "2024-06-01T12:00:00+00:00");

        assert!(store.retrieve_document("missing").await.unwrap().is_none());
        assert_eq!(store.document_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_search_counts_distinct_matching_words() {
        let store = MemoryDocumentStore::new();
        store
            .add_document("d1", "the python loop construct", None)
            .await
            .unwrap();

        // "python" matches, "loops" does not ("loops" != "loop").
        let results = store.search_documents("python loops", 5).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].doc_id, "d1");
        assert_eq!(results[0].score, 1);

        // Duplicate query words count once.
        let results = store.search_documents("python python", 5).await.unwrap();
        assert_eq!(results[0].score, 1);
    }

    #[tokio::test]
    async fn test_search_ranks_by_score_then_insertion_order() {
        let store = MemoryDocumentStore::new();
        store.add_document("a", "alpha beta", None).await.unwrap();
        store.add_document("b", "alpha beta gamma", None).await.unwrap();
        store.add_document("c", "alpha", None).await.unwrap();

        let results = store.search_documents("alpha beta gamma", 5).await.unwrap();
        let ids: Vec<&str> = results.iter().map(|r| r.doc_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
        assert_eq!(results[0].score, 3);
        assert_eq!(results[1].score, 2);
        assert_eq!(results[2].score, 1);

        // Equal scores fall back to first-insertion order.
        let results = store.search_documents("alpha", 5).await.unwrap();
        let ids: Vec<&str> = results.iter().map(|r| r.doc_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_search_excludes_non_matching_documents() {
        let store = MemoryDocumentStore::new();
        store.add_document("d1", "rust ownership", None).await.unwrap();
        store.add_document("d2", "python loops", None).await.unwrap();

        let results = store.search_documents("rust", 5).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].doc_id, "d1");
    }

    #[tokio::test]
    async fn test_search_boundaries() {
        let store = MemoryDocumentStore::new();
        assert!(store.search_documents("anything", 5).await.unwrap().is_empty());

        store.add_document("d1", "some words", None).await.unwrap();
        assert!(store.search_documents("words", 0).await.unwrap().is_empty());

        store.add_document("d2", "more words", None).await.unwrap();
        assert_eq!(store.search_documents("words", 1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_replacement_purges_old_postings() {
        let store = MemoryDocumentStore::new();
        store.add_document("d1", "alpha beta", None).await.unwrap();
        store.add_document("d1", "gamma delta", None).await.unwrap();

        assert!(store.search_documents("alpha", 5).await.unwrap().is_empty());
        assert!(store.search_documents("beta", 5).await.unwrap().is_empty());
        assert_eq!(store.search_documents("gamma", 5).await.unwrap().len(), 1);

        let doc = store.retrieve_document("d1").await.unwrap().unwrap();
        assert_eq!(doc.content, "gamma delta");
        assert_eq!(store.document_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_replacement_keeps_first_insertion_order() {
        let store = MemoryDocumentStore::new();
        store.add_document("a", "shared word", None).await.unwrap();
        store.add_document("b", "shared word", None).await.unwrap();
        // Re-adding "a" must not demote it behind "b" on ties.
        store.add_document("a", "shared word again", None).await.unwrap();

        let results = store.search_documents("shared", 5).await.unwrap();
        let ids: Vec<&str> = results.iter().map(|r| r.doc_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_excerpt_is_capped_at_200_chars() {
        let store = MemoryDocumentStore::new();
        let long = format!("keyword {}", "x".repeat(400));
        store.add_document("d1", &long, None).await.unwrap();

        let results = store.search_documents("keyword", 5).await.unwrap();
        assert_eq!(results[0].excerpt.chars().count(), 200);
    }
}

//! Pipeline façade for Svar.
//!
//! Wires the document store, embedder, and response generator together and
//! tracks per-student conversation history.

use crate::clock::{Clock, SystemClock};
use crate::config::Settings;
use crate::document_store::{DocumentStore, KeywordMatch, MemoryDocumentStore};
use crate::embedding::{Embedder, EmbeddingCache, HashEmbedder};
use crate::error::Result;
use crate::rag::{ContextRetriever, QueryResponse, ResponseGenerator};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, instrument};

/// One question-and-answer exchange in a student's history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationEntry {
    /// The student's query.
    pub query: String,
    /// The full response that was returned.
    pub response: QueryResponse,
    /// When the exchange was recorded (ISO-8601).
    pub timestamp: String,
}

/// The main façade over the retrieval pipeline.
pub struct Orchestrator {
    settings: Settings,
    doc_store: Arc<dyn DocumentStore>,
    embedder: Arc<dyn Embedder>,
    embedding_cache: EmbeddingCache,
    response_generator: ResponseGenerator,
    conversation_history: RwLock<HashMap<String, Vec<ConversationEntry>>>,
    clock: Arc<dyn Clock>,
}

impl Orchestrator {
    /// Create an orchestrator with default components.
    pub fn new(settings: Settings) -> Result<Self> {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let doc_store: Arc<dyn DocumentStore> =
            Arc::new(MemoryDocumentStore::with_clock(clock.clone()));
        let embedder: Arc<dyn Embedder> = Arc::new(HashEmbedder::with_dimensions(
            settings.embedding.dimensions as usize,
        )?);

        Self::with_components(settings, doc_store, embedder, clock)
    }

    /// Create an orchestrator with custom components.
    pub fn with_components(
        settings: Settings,
        doc_store: Arc<dyn DocumentStore>,
        embedder: Arc<dyn Embedder>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let retriever = ContextRetriever::new(doc_store.clone(), embedder.clone());
        let response_generator = ResponseGenerator::new(retriever, clock.clone())
            .with_max_context(settings.rag.max_context_chunks);

        Ok(Self {
            settings,
            doc_store,
            embedder,
            embedding_cache: EmbeddingCache::new(),
            response_generator,
            conversation_history: RwLock::new(HashMap::new()),
            clock,
        })
    }

    /// Index an educational resource and cache its full-content embedding.
    ///
    /// Re-adding an existing ID replaces the resource.
    #[instrument(skip(self, content, metadata), fields(doc_id = %doc_id))]
    pub async fn add_educational_resource(
        &self,
        doc_id: &str,
        content: &str,
        metadata: Option<HashMap<String, Value>>,
    ) -> Result<String> {
        let doc_id = self.doc_store.add_document(doc_id, content, metadata).await?;

        let embedding = self.embedder.embed(content).await?;
        self.embedding_cache.insert(&doc_id, embedding).await;

        info!("Indexed educational resource {}", doc_id);
        Ok(doc_id)
    }

    /// Answer a student query.
    ///
    /// When a `student_id` is given the exchange is appended to that
    /// student's history, bounded by the configured capacity.
    #[instrument(skip(self), fields(query = %query))]
    pub async fn answer_student_query(
        &self,
        query: &str,
        student_id: Option<&str>,
    ) -> Result<QueryResponse> {
        let response = self.response_generator.generate(query, student_id).await?;

        if let Some(student_id) = student_id {
            let mut history = self.conversation_history.write().await;
            let entries = history.entry(student_id.to_string()).or_default();
            entries.push(ConversationEntry {
                query: query.to_string(),
                response: response.clone(),
                timestamp: self.clock.now(),
            });

            // Keep only the newest entries once the cap is reached.
            let cap = self.settings.history.max_entries_per_student;
            if entries.len() > cap {
                let excess = entries.len() - cap;
                entries.drain(..excess);
            }
        }

        Ok(response)
    }

    /// Keyword-search indexed resources with the configured result limit.
    pub async fn search_resources(&self, query: &str) -> Result<Vec<KeywordMatch>> {
        self.doc_store
            .search_documents(query, self.settings.search.default_top_k)
            .await
    }

    /// Conversation history for a student, oldest first.
    ///
    /// Unknown students yield an empty history.
    pub async fn get_conversation_history(&self, student_id: &str) -> Vec<ConversationEntry> {
        let history = self.conversation_history.read().await;
        history.get(student_id).cloned().unwrap_or_default()
    }

    /// Cached full-content embedding of a resource, if it has been indexed.
    pub async fn document_embedding(&self, doc_id: &str) -> Option<Vec<f32>> {
        self.embedding_cache.get(doc_id).await
    }

    /// Number of indexed resources.
    pub async fn document_count(&self) -> Result<usize> {
        self.doc_store.document_count().await
    }
}

//! Response assembly from retrieved context.

use super::{ContextCandidate, ContextRetriever};
use crate::clock::Clock;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Maximum characters of each excerpt quoted in a response.
const SNIPPET_CHARS: usize = 150;

/// Default number of context excerpts per response.
const DEFAULT_MAX_CONTEXT: usize = 3;

/// A source citation for a response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceRef {
    /// Cited document ID.
    pub doc_id: String,
    /// Similarity score of the cited excerpt.
    pub relevance: f32,
}

/// An assembled answer with citations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    /// The original query.
    pub query: String,
    /// The rendered answer text.
    pub response: String,
    /// Number of context excerpts used.
    pub context_used: usize,
    /// Citations, in the order excerpts appear in the answer.
    pub sources: Vec<SourceRef>,
    /// Student the answer was generated for, if any.
    pub student_id: Option<String>,
    /// When the answer was generated (ISO-8601).
    pub generated_at: String,
}

/// Assembles user-facing answers from retrieved context.
///
/// Answers are templated from excerpt text. This is a deliberate stand-in
/// for a language-model generation step: no synthesis happens here.
pub struct ResponseGenerator {
    retriever: ContextRetriever,
    clock: Arc<dyn Clock>,
    max_context: usize,
}

impl ResponseGenerator {
    /// Create a new response generator.
    pub fn new(retriever: ContextRetriever, clock: Arc<dyn Clock>) -> Self {
        Self {
            retriever,
            clock,
            max_context: DEFAULT_MAX_CONTEXT,
        }
    }

    /// Set the maximum number of context excerpts per response.
    pub fn with_max_context(mut self, max_context: usize) -> Self {
        self.max_context = max_context;
        self
    }

    /// Generate a response for a query.
    ///
    /// When no context is found the answer is a fixed fallback that echoes
    /// the query, with zero sources.
    #[instrument(skip(self), fields(query = %query))]
    pub async fn generate(&self, query: &str, student_id: Option<&str>) -> Result<QueryResponse> {
        let context = self.retriever.retrieve(query, self.max_context).await?;
        debug!("Assembling answer from {} context excerpts", context.len());

        let response = build_response(query, &context);
        let sources = context
            .iter()
            .map(|candidate| SourceRef {
                doc_id: candidate.doc_id.clone(),
                relevance: candidate.similarity,
            })
            .collect();

        Ok(QueryResponse {
            query: query.to_string(),
            response,
            context_used: context.len(),
            sources,
            student_id: student_id.map(|s| s.to_string()),
            generated_at: self.clock.now(),
        })
    }
}

/// Render the answer text from ranked context.
fn build_response(query: &str, context: &[ContextCandidate]) -> String {
    if context.is_empty() {
        return format!("I couldn't find relevant information about: {}", query);
    }

    let mut response = String::from("Based on available educational materials:\n");
    for (i, candidate) in context.iter().enumerate() {
        let snippet: String = candidate.excerpt.chars().take(SNIPPET_CHARS).collect();
        response.push_str(&format!("\n{}. {}...", i + 1, snippet));
    }
    response.push_str("\n\nWould you like me to explain any part of this further?");

    response
}

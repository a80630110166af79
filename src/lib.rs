//! Svar - Retrieval-Augmented Question Answering
//!
//! An in-memory retrieval-augmented generation (RAG) library for answering
//! questions over a corpus of educational resources.
//!
//! The name "Svar" comes from the Norwegian word for "answer."
//!
//! # Overview
//!
//! Svar allows you to:
//! - Index text resources into a searchable in-memory store
//! - Retrieve and rank relevant excerpts for a question
//! - Assemble grounded answers with source citations
//! - Track per-student conversation history
//!
//! Two deliberate simplifications keep the pipeline self-contained:
//! embeddings are derived from a hash of the text (similarity reflects hash
//! locality, not meaning), and answers are templated from retrieved
//! excerpts rather than generated by a language model.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management
//! - `clock` - Timestamp sources
//! - `embedding` - Embedding generation and similarity
//! - `document_store` - Document storage and keyword search
//! - `rag` - Context retrieval and response assembly
//! - `orchestrator` - Pipeline coordination
//!
//! # Example
//!
//! ```rust,no_run
//! use svar::config::Settings;
//! use svar::orchestrator::Orchestrator;
//!
//! #[tokio::main]
//! async fn main() -> svar::Result<()> {
//!     let orchestrator = Orchestrator::new(Settings::default())?;
//!
//!     orchestrator
//!         .add_educational_resource(
//!             "intro_python",
//!             "Python is a high-level programming language.",
//!             None,
//!         )
//!         .await?;
//!
//!     let response = orchestrator
//!         .answer_student_query("What is Python?", Some("STU001"))
//!         .await?;
//!     println!("{}", response.response);
//!
//!     Ok(())
//! }
//! ```

pub mod clock;
pub mod config;
pub mod document_store;
pub mod embedding;
pub mod error;
pub mod orchestrator;
pub mod rag;

pub use error::{Result, SvarError};

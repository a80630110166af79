//! Configuration module for Svar.
//!
//! Handles loading and managing library settings.

mod settings;

pub use settings::{
    EmbeddingSettings, HistorySettings, RagSettings, SearchSettings, Settings,
};

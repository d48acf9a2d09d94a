//! Retrieval and escalation settings for a support turn.

use serde::{Deserialize, Serialize};

use crate::error::{HelpdeskError, Result};

/// Default reply when retrieval finds nothing relevant.
pub const DEFAULT_NOT_FOUND_REPLY: &str = "Unfortunately, I could not find matching information \
     in the knowledge base for your question. Let me pass it to a support operator who can \
     help in more detail.";

/// Default reply when the answer generator fails.
pub const DEFAULT_GENERATION_ERROR_REPLY: &str = "A technical error occurred. Please try again \
     or contact a support operator.";

/// Configuration for retrieval, answer generation and escalation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Number of candidates requested from the retriever.
    pub top_k: usize,

    /// Candidates scoring below this are discarded before classification.
    pub relevance_threshold: f64,

    /// Generated answers below this confidence are flagged for escalation.
    pub confidence_threshold: f64,

    /// Number of trailing history messages forwarded to the generator.
    pub history_window: usize,

    pub not_found_reply: String,

    pub generation_error_reply: String,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        RetrievalConfig {
            top_k: 5,
            relevance_threshold: 0.3,
            confidence_threshold: 0.3,
            history_window: 6,
            not_found_reply: DEFAULT_NOT_FOUND_REPLY.to_string(),
            generation_error_reply: DEFAULT_GENERATION_ERROR_REPLY.to_string(),
        }
    }
}

impl RetrievalConfig {
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_relevance_threshold(mut self, threshold: f64) -> Self {
        self.relevance_threshold = threshold;
        self
    }

    pub fn with_confidence_threshold(mut self, threshold: f64) -> Self {
        self.confidence_threshold = threshold;
        self
    }

    pub fn with_history_window(mut self, window: usize) -> Self {
        self.history_window = window;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            return Err(HelpdeskError::config("retrieval.top_k must be positive"));
        }
        if !self.relevance_threshold.is_finite() {
            return Err(HelpdeskError::config(
                "retrieval.relevance_threshold must be finite",
            ));
        }
        if !self.confidence_threshold.is_finite() {
            return Err(HelpdeskError::config(
                "retrieval.confidence_threshold must be finite",
            ));
        }
        Ok(())
    }
}

//! Configuration for the query classifier.

use serde::{Deserialize, Serialize};

use crate::classifier::lexicon::Lexicon;
use crate::error::{HelpdeskError, Result};

/// Thresholds and phrase lists used by [`QueryClassifier`](super::QueryClassifier).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Vague phrases, broad objects and the clarification wording.
    #[serde(flatten)]
    pub lexicon: Lexicon,

    /// Queries with fewer whitespace-separated words than this count as short.
    pub min_query_words: usize,

    /// A score gap between the first two candidates larger than this means
    /// the leader is clear enough to answer without asking.
    pub ambiguity_score_gap: f64,

    /// Maximum number of topics offered to the user.
    pub max_suggested_topics: usize,

    /// Number of leading candidates scanned for distinct topics.
    pub top_results_window: usize,

    /// Number of characters of candidate text kept as a topic snippet.
    pub snippet_length: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            lexicon: Lexicon::default(),
            min_query_words: 4,
            ambiguity_score_gap: 0.08,
            max_suggested_topics: 5,
            top_results_window: 8,
            snippet_length: 120,
        }
    }
}

impl ClassifierConfig {
    /// Replace the phrase lists and prompt wording.
    pub fn with_lexicon(mut self, lexicon: Lexicon) -> Self {
        self.lexicon = lexicon;
        self
    }

    /// Set the short-query word threshold.
    pub fn with_min_query_words(mut self, words: usize) -> Self {
        self.min_query_words = words;
        self
    }

    /// Set the clear-leader score gap.
    pub fn with_ambiguity_score_gap(mut self, gap: f64) -> Self {
        self.ambiguity_score_gap = gap;
        self
    }

    /// Set the maximum number of suggested topics.
    pub fn with_max_suggested_topics(mut self, max: usize) -> Self {
        self.max_suggested_topics = max;
        self
    }

    /// Set the candidate window scanned for topics.
    pub fn with_top_results_window(mut self, window: usize) -> Self {
        self.top_results_window = window;
        self
    }

    /// Set the snippet length in characters.
    pub fn with_snippet_length(mut self, length: usize) -> Self {
        self.snippet_length = length;
        self
    }

    /// Check that the thresholds can produce a meaningful classification.
    pub fn validate(&self) -> Result<()> {
        if self.max_suggested_topics == 0 {
            return Err(HelpdeskError::config(
                "classifier.max_suggested_topics must be at least 1",
            ));
        }
        if self.top_results_window == 0 {
            return Err(HelpdeskError::config(
                "classifier.top_results_window must be at least 1",
            ));
        }
        if !self.ambiguity_score_gap.is_finite() || self.ambiguity_score_gap < 0.0 {
            return Err(HelpdeskError::config(format!(
                "classifier.ambiguity_score_gap must be a non-negative number, got {}",
                self.ambiguity_score_gap
            )));
        }
        Ok(())
    }
}

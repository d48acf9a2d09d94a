//! Common types for query classification.

use serde::{Deserialize, Serialize};

/// Topic key used when a retrieval hit carries no topic identifier.
pub const UNKNOWN_TOPIC_KEY: &str = "unknown";

/// One retrieval hit: a chunk of a knowledge-base article or support ticket
/// together with its relevance score.
///
/// Scores are only comparable within one retrieval call; higher is more
/// relevant. Metadata may be missing, in which case classification falls back
/// to [`UNKNOWN_TOPIC_KEY`] and a synthesized title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    /// Stable identifier of the source article or ticket.
    #[serde(default)]
    pub topic_key: Option<String>,

    /// Title of the source article or ticket.
    #[serde(default)]
    pub title: Option<String>,

    /// Relevance score assigned by retrieval.
    pub score: f64,

    /// Chunk text.
    #[serde(default)]
    pub text: String,

    /// Video walkthroughs referenced by the source article.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub youtube_links: Vec<String>,

    /// Screenshots embedded in the source article.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<ArticleImage>,
}

/// A screenshot attached to a knowledge-base article.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArticleImage {
    pub filename: String,
    /// Alt text from the source page.
    #[serde(default)]
    pub alt: String,
}

impl ScoredCandidate {
    /// Create a candidate with full metadata.
    pub fn new<K, T, X>(topic_key: K, title: T, score: f64, text: X) -> Self
    where
        K: Into<String>,
        T: Into<String>,
        X: Into<String>,
    {
        Self {
            topic_key: Some(topic_key.into()),
            title: Some(title.into()),
            score,
            text: text.into(),
            youtube_links: Vec::new(),
            images: Vec::new(),
        }
    }

    /// Attach video links.
    pub fn with_youtube_links(mut self, links: Vec<String>) -> Self {
        self.youtube_links = links;
        self
    }

    /// Attach screenshots.
    pub fn with_images(mut self, images: Vec<ArticleImage>) -> Self {
        self.images = images;
        self
    }

    /// Topic key, or [`UNKNOWN_TOPIC_KEY`] when retrieval did not supply one.
    pub fn topic_key_or_unknown(&self) -> &str {
        self.topic_key.as_deref().unwrap_or(UNKNOWN_TOPIC_KEY)
    }
}

/// A topic offered to the user when clarification is needed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedTopic {
    /// Display title.
    pub title: String,

    /// Stable identifier of the source article or ticket.
    pub topic_key: String,

    /// Score of the first candidate seen for this topic.
    pub score: f64,

    /// Leading characters of the candidate text.
    #[serde(default)]
    pub snippet: String,
}

/// Outcome of one classification call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Whether the evidence is sufficient to answer directly.
    pub is_complete: bool,

    /// Topics to choose from; empty when complete.
    pub suggested_topics: Vec<SuggestedTopic>,

    /// Prompt shown to the user; present only when not complete.
    pub clarification_message: Option<String>,
}

impl ClassificationResult {
    /// Answer directly.
    pub fn complete() -> Self {
        Self {
            is_complete: true,
            suggested_topics: Vec::new(),
            clarification_message: None,
        }
    }

    /// Ask the user to pick one of `topics`.
    pub fn needs_clarification(topics: Vec<SuggestedTopic>, message: String) -> Self {
        Self {
            is_complete: false,
            suggested_topics: topics,
            clarification_message: Some(message),
        }
    }
}

/// Lexical signals computed from the query text alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaguenessSignals {
    /// Number of whitespace-separated words.
    pub word_count: usize,

    /// The query contains a vague phrase.
    pub has_vague_phrase: bool,

    /// The query names a broad object.
    pub has_broad_object: bool,

    /// The query is below the minimum word count.
    pub is_short: bool,
}

impl VaguenessSignals {
    /// A query is vague when it complains without specifics and is either
    /// about a broad object or too short to carry detail.
    pub fn is_vague(&self) -> bool {
        self.has_vague_phrase && (self.has_broad_object || self.is_short)
    }
}

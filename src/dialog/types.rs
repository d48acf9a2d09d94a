//! Data exchanged between the dialog, its collaborators and transports.

use serde::{Deserialize, Serialize};

use crate::classifier::{ArticleImage, ScoredCandidate, SuggestedTopic};

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// One prior message of the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user<S: Into<String>>(content: S) -> Self {
        ChatMessage {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant<S: Into<String>>(content: S) -> Self {
        ChatMessage {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Input to an [`AnswerGenerator`](super::AnswerGenerator).
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub question: String,
    /// Evidence, best first.
    pub documents: Vec<ScoredCandidate>,
    /// Trailing chat history, oldest first.
    pub history: Vec<ChatMessage>,
}

/// A generated answer with the generator's self-assessed confidence.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedAnswer {
    pub text: String,
    /// In `[0, 1]`.
    pub confidence: f64,
    pub confidence_reason: String,
}

/// Kind of reply produced for a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    Answer,
    Clarification,
}

/// The outcome of one support turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnReply {
    pub response_type: ResponseType,
    pub answer: String,
    pub confidence: f64,
    pub needs_escalation: bool,
    pub source_articles: Vec<String>,
    pub youtube_links: Vec<String>,
    /// True when `images` is non-empty.
    pub has_images: bool,
    /// Distinct screenshots of the source articles, first seen first.
    pub images: Vec<ArticleImage>,
    pub suggested_topics: Vec<SuggestedTopic>,
}

impl TurnReply {
    /// A reply that hands the conversation to a human operator.
    pub fn escalation<S: Into<String>>(answer: S) -> Self {
        TurnReply {
            response_type: ResponseType::Answer,
            answer: answer.into(),
            confidence: 0.0,
            needs_escalation: true,
            source_articles: Vec::new(),
            youtube_links: Vec::new(),
            has_images: false,
            images: Vec::new(),
            suggested_topics: Vec::new(),
        }
    }

    /// A numbered topic list awaiting the user's choice.
    pub fn clarification(message: String, topics: Vec<SuggestedTopic>) -> Self {
        TurnReply {
            response_type: ResponseType::Clarification,
            answer: message,
            confidence: 0.0,
            needs_escalation: false,
            source_articles: Vec::new(),
            youtube_links: Vec::new(),
            has_images: false,
            images: Vec::new(),
            suggested_topics: topics,
        }
    }

    pub fn is_clarification(&self) -> bool {
        self.response_type == ResponseType::Clarification
    }
}

//! Per-conversation clarification state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::classifier::SuggestedTopic;

/// Dialogue state of a stored context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClarificationState {
    /// A numbered topic list was shown and the next message may pick one.
    AwaitingClarification,
}

/// The most recent clarification offer made in one conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClarificationContext {
    /// Dialogue state; always awaiting a choice while stored.
    pub state: ClarificationState,
    /// The query that triggered the offer.
    pub original_query: String,
    /// Topics in the order they were numbered for the user.
    pub topics: Vec<SuggestedTopic>,
    /// When the offer was saved; expiry is measured from here.
    pub created_at: DateTime<Utc>,
}

impl ClarificationContext {
    pub fn new(original_query: String, topics: Vec<SuggestedTopic>, created_at: DateTime<Utc>) -> Self {
        Self {
            state: ClarificationState::AwaitingClarification,
            original_query,
            topics,
            created_at,
        }
    }

    /// Look up a topic by the 1-based number shown to the user.
    pub fn topic_by_number(&self, number: i64) -> Option<&SuggestedTopic> {
        let index = usize::try_from(number.checked_sub(1)?).ok()?;
        self.topics.get(index)
    }
}

/// How the user's reply to a clarification offer was interpreted.
#[derive(Debug, Clone, PartialEq)]
pub enum TopicChoice {
    /// The reply picked one of the offered topics by number.
    Selected {
        topic: SuggestedTopic,
        /// The query the offer was made for.
        original_query: String,
    },
    /// No usable selection; the reply is a fresh free-text query.
    FreeText,
}

impl TopicChoice {
    /// The selected topic, if any.
    pub fn topic(&self) -> Option<&SuggestedTopic> {
        match self {
            TopicChoice::Selected { topic, .. } => Some(topic),
            TopicChoice::FreeText => None,
        }
    }

    pub fn is_selected(&self) -> bool {
        matches!(self, TopicChoice::Selected { .. })
    }
}

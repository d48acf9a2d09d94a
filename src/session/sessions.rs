//! Clarification dialogue over a pluggable context store.

use std::sync::Arc;

use log::{debug, info};

use crate::classifier::SuggestedTopic;
use crate::session::clock::{Clock, SystemClock};
use crate::session::config::SessionConfig;
use crate::session::context::{ClarificationContext, TopicChoice};
use crate::session::expiry::{ExpiryPolicy, FixedTtl};
use crate::session::memory::MemoryContextStore;
use crate::session::store::ContextStore;

/// Holds, per conversation, the most recent clarification offer and interprets
/// the user's next message against it.
///
/// Each conversation is either *absent* (no offer, or an expired one) or
/// *awaiting clarification*. Expired offers are evicted lazily by readers;
/// [`sweep`](Self::sweep) reclaims abandoned ones in bulk.
///
/// # Examples
///
/// ```
/// use helpdesk::classifier::SuggestedTopic;
/// use helpdesk::session::{ClarificationSessions, SessionConfig, TopicChoice};
///
/// let sessions = ClarificationSessions::new(&SessionConfig::default());
/// let topics = vec![
///     SuggestedTopic { title: "A".into(), topic_key: "1".into(), score: 0.8, snippet: String::new() },
///     SuggestedTopic { title: "B".into(), topic_key: "2".into(), score: 0.7, snippet: String::new() },
/// ];
/// sessions.save("chat-42", "problem with invoice", topics);
///
/// let choice = sessions.resolve("chat-42", " 2 ");
/// assert_eq!(choice.topic().unwrap().topic_key, "2");
/// assert!(sessions.read("chat-42").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct ClarificationSessions {
    store: Arc<dyn ContextStore>,
    expiry: Arc<dyn ExpiryPolicy>,
    clock: Arc<dyn Clock>,
}

impl ClarificationSessions {
    /// In-memory sessions on the wall clock with the configured time-to-live
    /// (at least one second, see [`SessionConfig::ttl`]).
    pub fn new(config: &SessionConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// In-memory sessions on a caller-supplied clock.
    pub fn with_clock(config: &SessionConfig, clock: Arc<dyn Clock>) -> Self {
        Self::from_parts(
            Arc::new(MemoryContextStore::new(config.shard_count)),
            Arc::new(FixedTtl::new(config.ttl())),
            clock,
        )
    }

    /// Sessions over any store, expiry policy and clock.
    pub fn from_parts(
        store: Arc<dyn ContextStore>,
        expiry: Arc<dyn ExpiryPolicy>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            expiry,
            clock,
        }
    }

    /// Store a new offer, replacing any previous one for the conversation.
    pub fn save(&self, conversation_id: &str, original_query: &str, topics: Vec<SuggestedTopic>) {
        let topic_count = topics.len();
        let context = ClarificationContext::new(original_query.to_string(), topics, self.clock.now());
        self.store.put(conversation_id, context);
        debug!("saved clarification context for {conversation_id}: {topic_count} topics");
    }

    /// The pending offer, if present and not expired. Expired offers are evicted.
    pub fn read(&self, conversation_id: &str) -> Option<ClarificationContext> {
        let context = self.store.get(conversation_id)?;
        let now = self.clock.now();

        if self.expiry.is_expired(&context, now) {
            // A fresh offer may have been saved since the get; only evict stale ones.
            self.store
                .take_if(conversation_id, &|ctx| self.expiry.is_expired(ctx, now));
            debug!("clarification context for {conversation_id} expired");
            return None;
        }

        Some(context)
    }

    /// Drop any pending offer. Idempotent.
    pub fn clear(&self, conversation_id: &str) {
        if self.store.delete(conversation_id) {
            debug!("cleared clarification context for {conversation_id}");
        }
    }

    /// Interpret `user_input` against the pending offer.
    ///
    /// A number within `1..=topics.len()` selects that topic. Anything else
    /// (free text, out-of-range numbers) means the user moved on. The offer is
    /// consumed in both cases; with no live offer nothing changes.
    pub fn resolve(&self, conversation_id: &str, user_input: &str) -> TopicChoice {
        let Some(context) = self.store.take(conversation_id) else {
            return TopicChoice::FreeText;
        };

        if self.expiry.is_expired(&context, self.clock.now()) {
            debug!("clarification context for {conversation_id} expired");
            return TopicChoice::FreeText;
        }

        let selected = user_input
            .trim()
            .parse::<i64>()
            .ok()
            .and_then(|number| context.topic_by_number(number).map(|topic| (number, topic)));

        match selected {
            Some((number, topic)) => {
                info!(
                    "conversation {conversation_id} selected topic #{number}: {}",
                    topic.title
                );
                let topic = topic.clone();
                TopicChoice::Selected {
                    topic,
                    original_query: context.original_query,
                }
            }
            None => {
                debug!("conversation {conversation_id} replied with free text");
                TopicChoice::FreeText
            }
        }
    }

    /// Evict every expired offer. Returns the number evicted.
    pub fn sweep(&self) -> usize {
        let now = self.clock.now();
        let evicted = self
            .store
            .evict_where(&|ctx| self.expiry.is_expired(ctx, now));
        if evicted > 0 {
            debug!("swept {evicted} expired clarification contexts");
        }
        evicted
    }

    /// Number of stored offers, including expired ones not yet evicted.
    pub fn stored_count(&self) -> usize {
        self.store.len()
    }
}

impl Default for ClarificationSessions {
    fn default() -> Self {
        Self::new(&SessionConfig::default())
    }
}

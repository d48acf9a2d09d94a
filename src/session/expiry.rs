//! Expiry policies for stored clarification contexts.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

use crate::session::context::ClarificationContext;

/// Decides whether a stored context is too old to act on.
pub trait ExpiryPolicy: Send + Sync + std::fmt::Debug {
    fn is_expired(&self, context: &ClarificationContext, now: DateTime<Utc>) -> bool;
}

/// Contexts expire once they are older than a fixed time-to-live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedTtl {
    ttl: TimeDelta,
}

impl FixedTtl {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX),
        }
    }

    pub fn ttl(&self) -> TimeDelta {
        self.ttl
    }
}

impl ExpiryPolicy for FixedTtl {
    fn is_expired(&self, context: &ClarificationContext, now: DateTime<Utc>) -> bool {
        now - context.created_at > self.ttl
    }
}

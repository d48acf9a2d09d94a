//! Configuration for the clarification session store.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{HelpdeskError, Result};

/// Lifetime and maintenance settings for pending clarification offers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Seconds after which a pending offer is treated as absent.
    pub ttl_secs: u64,

    /// Seconds between background sweeps of expired offers.
    pub sweep_interval_secs: u64,

    /// Number of independently locked shards in the in-memory store.
    pub shard_count: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 15 * 60,
            sweep_interval_secs: 5 * 60,
            shard_count: 16,
        }
    }
}

impl SessionConfig {
    /// Set the time-to-live, rounded up to whole seconds.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl_secs = whole_secs_ceil(ttl);
        self
    }

    /// Set the sweep interval, rounded up to whole seconds.
    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval_secs = whole_secs_ceil(interval);
        self
    }

    /// Set the number of store shards.
    pub fn with_shard_count(mut self, shards: usize) -> Self {
        self.shard_count = shards;
        self
    }

    /// Time-to-live of a pending offer. Never shorter than one second.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs.max(1))
    }

    /// Interval between background sweeps. Never shorter than one second.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs.max(1))
    }

    /// Reject settings that would expire offers immediately or never sweep.
    pub fn validate(&self) -> Result<()> {
        if self.ttl_secs == 0 {
            return Err(HelpdeskError::config("session.ttl_secs must be positive"));
        }
        if self.sweep_interval_secs == 0 {
            return Err(HelpdeskError::config(
                "session.sweep_interval_secs must be positive",
            ));
        }
        if self.shard_count == 0 {
            return Err(HelpdeskError::config("session.shard_count must be positive"));
        }
        Ok(())
    }
}

fn whole_secs_ceil(duration: Duration) -> u64 {
    let secs = duration.as_secs();
    if duration.subsec_nanos() > 0 {
        secs.saturating_add(1)
    } else {
        secs
    }
}

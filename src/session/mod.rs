//! Clarification session store.
//!
//! After the classifier asks a user to pick a topic, the offer is remembered
//! per conversation so the next message can be read as a selection. Offers
//! expire after a time-to-live and are reclaimed lazily on access and in bulk
//! by a background [`SessionSweeper`].
//!
//! # Architecture
//!
//! - `ClarificationSessions`: save / read / clear / resolve / sweep
//! - `ContextStore`: storage seam, with the sharded `MemoryContextStore`
//! - `ExpiryPolicy` and `Clock`: expiry seams, with `FixedTtl` and `SystemClock`
//! - `SessionSweeper`: periodic eviction thread

mod clock;
mod config;
mod context;
mod expiry;
mod memory;
mod sessions;
mod store;
mod sweeper;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::SessionConfig;
pub use context::{ClarificationContext, ClarificationState, TopicChoice};
pub use expiry::{ExpiryPolicy, FixedTtl};
pub use memory::MemoryContextStore;
pub use sessions::ClarificationSessions;
pub use store::ContextStore;
pub use sweeper::SessionSweeper;

//! # helpdesk
//!
//! The decision layer of a retrieval-augmented support desk bot: before
//! answering, check whether the user's question is specific enough, and if
//! not, offer a numbered list of candidate topics and remember the offer so
//! the next message can pick one.
//!
//! ## Modules
//!
//! - [`classifier`]: query completeness classification
//! - [`session`]: per-conversation clarification state with expiry
//! - [`dialog`]: turn orchestration over pluggable retrieval and generation
//! - [`knowledge`]: an offline knowledge base for the CLI and tests
//! - [`config`]: file-backed configuration
//! - [`cli`]: the `helpdesk` command line

pub mod classifier;
pub mod cli;
pub mod config;
pub mod dialog;
pub mod error;
pub mod knowledge;
pub mod session;

pub mod prelude {
    pub use crate::classifier::{ClassificationResult, QueryClassifier, ScoredCandidate, SuggestedTopic};
    pub use crate::config::HelpdeskConfig;
    pub use crate::dialog::{AnswerGenerator, Retriever, SupportDialog, TurnReply};
    pub use crate::error::{HelpdeskError, Result};
    pub use crate::session::{ClarificationSessions, SessionSweeper, TopicChoice};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

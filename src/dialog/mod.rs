//! Support-turn orchestration.
//!
//! [`SupportDialog`] ties the query classifier and the clarification sessions
//! to a [`Retriever`] and an [`AnswerGenerator`] supplied by the caller. Both
//! collaborators are async traits so network-backed stores and language models
//! plug in without blocking the runtime.

mod config;
mod confidence;
mod support_dialog;
mod traits;
mod types;

pub use config::{DEFAULT_GENERATION_ERROR_REPLY, DEFAULT_NOT_FOUND_REPLY, RetrievalConfig};
pub use confidence::{DEFAULT_CONFIDENCE, MISSING_ASSESSMENT_REASON, parse_confidence};
pub use support_dialog::SupportDialog;
pub use traits::{AnswerGenerator, Retriever};
pub use types::{
    ChatMessage, GeneratedAnswer, GenerationRequest, ResponseType, Role, TurnReply,
};

//! Query completeness classification.
//!
//! Given a user query and the scored hits returned by retrieval, the classifier
//! decides whether to answer directly or to ask the user which of several
//! candidate topics they mean. Three signals gate a clarification request:
//!
//! - the query is lexically vague (a complaint phrase about a broad object, or
//!   a complaint phrase in a very short query),
//! - retrieval surfaced more than one distinct topic,
//! - no candidate leads the runner-up by more than the ambiguity gap.
//!
//! # Architecture
//!
//! - `QueryClassifier`: the pure decision function
//! - `ClassifierConfig`: thresholds and phrase lists
//! - `Lexicon`: English and Russian phrase presets
//! - `ScoredCandidate` / `SuggestedTopic` / `ClassificationResult`: data model

mod config;
mod lexicon;
mod query_classifier;
mod types;

pub use config::ClassifierConfig;
pub use lexicon::{
    DEFAULT_ENGLISH_BROAD_OBJECTS, DEFAULT_ENGLISH_VAGUE_PHRASES, DEFAULT_RUSSIAN_BROAD_OBJECTS,
    DEFAULT_RUSSIAN_VAGUE_PHRASES, Lexicon,
};
pub use query_classifier::QueryClassifier;
pub use types::{
    ArticleImage, ClassificationResult, ScoredCandidate, SuggestedTopic, UNKNOWN_TOPIC_KEY, VaguenessSignals,
};

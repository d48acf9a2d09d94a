//! Offline knowledge base.
//!
//! A JSON file of support articles searched by keyword overlap, plus an
//! extractive answerer. Together they stand in for a vector store and a
//! language model when running the CLI or exercising the dialog end to end.

use std::collections::HashSet;

use unicode_segmentation::UnicodeSegmentation;

mod answerer;
mod base;

pub use answerer::ExtractiveAnswerer;
pub use base::{Article, KnowledgeBase};

/// Distinct lower-cased Unicode words (UAX #29) of `text`.
pub(crate) fn tokenize(text: &str) -> HashSet<String> {
    text.unicode_words().map(str::to_lowercase).collect()
}

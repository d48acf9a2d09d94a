//! Answer generation without a language model.

use async_trait::async_trait;

use crate::dialog::{AnswerGenerator, GeneratedAnswer, GenerationRequest};
use crate::error::{HelpdeskError, Result};
use crate::knowledge::tokenize;

/// Answers with the best document verbatim.
///
/// Confidence is the share of question tokens that appear in that document.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractiveAnswerer;

impl ExtractiveAnswerer {
    pub fn new() -> Self {
        ExtractiveAnswerer
    }
}

#[async_trait]
impl AnswerGenerator for ExtractiveAnswerer {
    async fn generate(&self, request: GenerationRequest) -> Result<GeneratedAnswer> {
        let document = request
            .documents
            .first()
            .ok_or_else(|| HelpdeskError::generation("no documents to answer from"))?;

        let question = tokenize(&request.question);
        let covered = tokenize(&document.text);
        let confidence = if question.is_empty() {
            0.0
        } else {
            question.intersection(&covered).count() as f64 / question.len() as f64
        };

        Ok(GeneratedAnswer {
            text: document.text.clone(),
            confidence,
            confidence_reason: format!(
                "{:.0}% of question terms found in the source",
                confidence * 100.0
            ),
        })
    }
}

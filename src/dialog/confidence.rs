//! Extraction of the self-assessment block appended to generated answers.
//!
//! Generators backed by a language model are prompted to end their answer with
//!
//! ````text
//! ```confidence
//! {"confidence": 0.85, "reason": "the article covers this exactly"}
//! ```
//! ````
//!
//! [`parse_confidence`] splits such output into the user-facing answer and the
//! assessment.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::dialog::types::GeneratedAnswer;

/// Confidence assumed when the generator gave no assessment.
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

/// Reason recorded when the generator gave no assessment.
pub const MISSING_ASSESSMENT_REASON: &str = "confidence assessment missing";

static FENCED_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?s)```confidence\s*\n?\{.*?"confidence"\s*:\s*([\d.]+).*?"reason"\s*:\s*"([^"]*)".*?\}\s*\n?```"#,
    )
    .expect("fenced confidence regex is valid")
});

static BARE_OBJECT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\{[^{}]*"confidence"\s*:\s*([\d.]+)[^{}]*"reason"\s*:\s*"([^"]*)"[^{}]*\}"#)
        .expect("bare confidence regex is valid")
});

/// Split raw generator output into answer text and confidence.
///
/// A fenced `confidence` block wins over a bare JSON object; the answer is the
/// text before whichever matched. Without either, the whole text is the answer
/// with [`DEFAULT_CONFIDENCE`]. Confidence is clamped to `[0, 1]`.
pub fn parse_confidence(raw: &str) -> GeneratedAnswer {
    [&*FENCED_BLOCK_RE, &*BARE_OBJECT_RE]
        .into_iter()
        .find_map(|re| re.captures(raw).and_then(|caps| assessment(raw, &caps)))
        .unwrap_or_else(|| GeneratedAnswer {
            text: raw.to_string(),
            confidence: DEFAULT_CONFIDENCE,
            confidence_reason: MISSING_ASSESSMENT_REASON.to_string(),
        })
}

fn assessment(raw: &str, caps: &Captures<'_>) -> Option<GeneratedAnswer> {
    let block = caps.get(0)?;
    // "[\d.]+" also admits strings such as "1.2.3".
    let confidence = caps.get(1)?.as_str().parse::<f64>().ok()?;
    let reason = caps.get(2)?.as_str();

    Some(GeneratedAnswer {
        text: raw[..block.start()].trim().to_string(),
        confidence: confidence.clamp(0.0, 1.0),
        confidence_reason: reason.to_string(),
    })
}

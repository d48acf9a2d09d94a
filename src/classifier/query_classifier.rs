//! Completeness classifier: answer directly or ask the user to pick a topic.

use std::collections::HashSet;

use log::{debug, info};

use crate::classifier::config::ClassifierConfig;
use crate::classifier::types::{
    ClassificationResult, ScoredCandidate, SuggestedTopic, VaguenessSignals,
};

/// Decides per turn whether retrieval evidence is enough to answer the query
/// or whether the user should disambiguate between candidate topics.
///
/// The classifier is stateless once constructed and can be shared freely
/// between concurrent turns.
///
/// # Examples
///
/// ```
/// use helpdesk::classifier::{QueryClassifier, ScoredCandidate};
///
/// let classifier = QueryClassifier::default();
/// let candidates = vec![
///     ScoredCandidate::new("1001", "Invoice won't post", 0.82, "To post an invoice..."),
///     ScoredCandidate::new("1002", "Invoice won't print", 0.80, "Check the printer..."),
/// ];
///
/// let result = classifier.classify("problem with invoice", &candidates);
/// assert!(!result.is_complete);
/// assert_eq!(result.suggested_topics.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct QueryClassifier {
    config: ClassifierConfig,
}

impl QueryClassifier {
    /// Create a classifier. Phrase lists are lower-cased once here.
    pub fn new(config: ClassifierConfig) -> Self {
        let lexicon = config.lexicon.clone().normalized();
        Self {
            config: config.with_lexicon(lexicon),
        }
    }

    /// Get the effective configuration.
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Compute the lexical vagueness signals of a query.
    pub fn analyze(&self, query: &str) -> VaguenessSignals {
        let query_lower = query.trim().to_lowercase();
        let word_count = query_lower.split_whitespace().count();
        let lexicon = &self.config.lexicon;

        VaguenessSignals {
            word_count,
            has_vague_phrase: lexicon
                .vague_phrases
                .iter()
                .any(|phrase| query_lower.contains(phrase.as_str())),
            has_broad_object: lexicon
                .broad_objects
                .iter()
                .any(|object| query_lower.contains(object.as_str())),
            is_short: word_count < self.config.min_query_words,
        }
    }

    /// Classify a query against retrieval candidates ordered by descending score.
    ///
    /// The incoming order is trusted as-is for the leader-gap check.
    pub fn classify(&self, query: &str, candidates: &[ScoredCandidate]) -> ClassificationResult {
        let signals = self.analyze(query);
        debug!(
            "classify query='{}' words={} vague={} broad_object={} short={} is_vague={}",
            query,
            signals.word_count,
            signals.has_vague_phrase,
            signals.has_broad_object,
            signals.is_short,
            signals.is_vague()
        );

        // Let answer generation report "not found" itself.
        if candidates.is_empty() {
            return ClassificationResult::complete();
        }

        let mut topics = self.extract_topics(candidates);
        debug!("classify unique_topics={}", topics.len());

        if topics.len() <= 1 {
            return ClassificationResult::complete();
        }

        if !signals.is_vague() {
            return ClassificationResult::complete();
        }

        if let [first, second, ..] = candidates {
            let gap = first.score - second.score;
            if gap > self.config.ambiguity_score_gap {
                info!(
                    "clear leader: gap={:.3} > {}",
                    gap, self.config.ambiguity_score_gap
                );
                return ClassificationResult::complete();
            }
        }

        topics.truncate(self.config.max_suggested_topics);
        let message = self.build_clarification_message(&topics);
        info!("clarification needed: {} topics proposed", topics.len());

        ClassificationResult::needs_clarification(topics, message)
    }

    /// Collect distinct topics, in first-seen order, from the leading window of
    /// candidates.
    pub fn extract_topics(&self, candidates: &[ScoredCandidate]) -> Vec<SuggestedTopic> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut topics = Vec::with_capacity(self.config.max_suggested_topics);

        for candidate in candidates.iter().take(self.config.top_results_window) {
            if topics.len() >= self.config.max_suggested_topics {
                break;
            }

            let topic_key = candidate.topic_key_or_unknown();
            if !seen.insert(topic_key) {
                continue;
            }

            topics.push(SuggestedTopic {
                title: self.display_title(candidate, topic_key),
                topic_key: topic_key.to_string(),
                score: candidate.score,
                snippet: self.snippet(&candidate.text),
            });
        }

        topics
    }

    /// Render the numbered list of topics shown to the user.
    pub fn build_clarification_message(&self, topics: &[SuggestedTopic]) -> String {
        let lexicon = &self.config.lexicon;
        let mut lines = Vec::with_capacity(topics.len() + 2);
        lines.push(lexicon.clarification_prompt.clone());

        for (i, topic) in topics.iter().enumerate() {
            lines.push(format!("{}. {}", i + 1, topic.title));
        }

        lines.push(format!("\n{}", lexicon.selection_hint));
        lines.join("\n")
    }

    fn display_title(&self, candidate: &ScoredCandidate, topic_key: &str) -> String {
        match candidate.title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => format!("{} {}", self.config.lexicon.untitled_label, topic_key),
        }
    }

    fn snippet(&self, text: &str) -> String {
        text.chars()
            .take(self.config.snippet_length)
            .collect::<String>()
            .replace('\n', " ")
            .trim()
            .to_string()
    }
}

impl Default for QueryClassifier {
    fn default() -> Self {
        Self::new(ClassifierConfig::default())
    }
}

//! One support turn: resolve a pending clarification, retrieve, classify, answer.

use std::collections::HashSet;
use std::sync::Arc;

use log::{debug, info, warn};

use crate::classifier::{
    ArticleImage, ClassificationResult, QueryClassifier, ScoredCandidate, SuggestedTopic,
};
use crate::dialog::config::RetrievalConfig;
use crate::dialog::traits::{AnswerGenerator, Retriever};
use crate::dialog::types::{ChatMessage, GenerationRequest, ResponseType, TurnReply};
use crate::error::Result;
use crate::session::{ClarificationSessions, TopicChoice};

/// Drives a support conversation turn by turn.
///
/// Holds no per-conversation state of its own; pending clarification offers
/// live in the shared [`ClarificationSessions`], so one dialog serves any
/// number of concurrent conversations.
pub struct SupportDialog {
    classifier: QueryClassifier,
    sessions: Arc<ClarificationSessions>,
    retriever: Arc<dyn Retriever>,
    generator: Arc<dyn AnswerGenerator>,
    config: RetrievalConfig,
}

impl std::fmt::Debug for SupportDialog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupportDialog")
            .field("classifier", &self.classifier)
            .field("sessions", &self.sessions)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SupportDialog {
    pub fn new(
        classifier: QueryClassifier,
        sessions: Arc<ClarificationSessions>,
        retriever: Arc<dyn Retriever>,
        generator: Arc<dyn AnswerGenerator>,
        config: RetrievalConfig,
    ) -> Self {
        SupportDialog {
            classifier,
            sessions,
            retriever,
            generator,
            config,
        }
    }

    pub fn sessions(&self) -> &Arc<ClarificationSessions> {
        &self.sessions
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    /// Answer `message` or ask which topic it is about.
    ///
    /// `history` holds the conversation's earlier messages, oldest first, and
    /// excludes `message` itself. Retrieval failures propagate; generation
    /// failures become an escalation reply.
    pub async fn handle_turn(
        &self,
        conversation_id: &str,
        message: &str,
        history: &[ChatMessage],
    ) -> Result<TurnReply> {
        if let TopicChoice::Selected {
            topic,
            original_query,
        } = self.sessions.resolve(conversation_id, message)
        {
            return self
                .answer_selected_topic(&topic, &original_query, history)
                .await;
        }

        let candidates = self.retrieve_relevant(message).await?;
        if candidates.is_empty() {
            info!("no relevant documents for conversation {conversation_id}");
            return Ok(TurnReply::escalation(self.config.not_found_reply.as_str()));
        }

        let classification = self.classifier.classify(message, &candidates);
        if let ClassificationResult {
            is_complete: false,
            suggested_topics,
            clarification_message,
        } = classification
        {
            info!(
                "asking conversation {conversation_id} to choose among {} topics",
                suggested_topics.len()
            );
            let prompt = clarification_message
                .unwrap_or_else(|| self.classifier.build_clarification_message(&suggested_topics));
            self.sessions
                .save(conversation_id, message, suggested_topics.clone());
            return Ok(TurnReply::clarification(prompt, suggested_topics));
        }

        Ok(self.answer(message, candidates, history).await)
    }

    /// Forget any pending clarification for the conversation.
    pub fn reset(&self, conversation_id: &str) {
        self.sessions.clear(conversation_id);
    }

    async fn retrieve_relevant(&self, query: &str) -> Result<Vec<ScoredCandidate>> {
        let hits = self.retriever.retrieve(query, self.config.top_k).await?;
        let total = hits.len();
        let relevant: Vec<_> = hits
            .into_iter()
            .filter(|hit| hit.score >= self.config.relevance_threshold)
            .collect();
        debug!(
            "retrieved {total} candidates, {} above relevance threshold {}",
            relevant.len(),
            self.config.relevance_threshold
        );
        Ok(relevant)
    }

    async fn answer_selected_topic(
        &self,
        topic: &SuggestedTopic,
        original_query: &str,
        history: &[ChatMessage],
    ) -> Result<TurnReply> {
        let mut documents = self
            .retriever
            .retrieve_topic(&topic.topic_key, original_query, self.config.top_k)
            .await?;

        if documents.is_empty() {
            debug!(
                "no passages for topic {}, answering from its snippet",
                topic.topic_key
            );
            documents.push(ScoredCandidate::new(
                topic.topic_key.as_str(),
                topic.title.as_str(),
                topic.score,
                topic.snippet.as_str(),
            ));
        }

        Ok(self.answer(original_query, documents, history).await)
    }

    async fn answer(
        &self,
        question: &str,
        documents: Vec<ScoredCandidate>,
        history: &[ChatMessage],
    ) -> TurnReply {
        let source_articles = distinct(documents.iter().map(ScoredCandidate::topic_key_or_unknown));
        let youtube_links = distinct(
            documents
                .iter()
                .flat_map(|doc| doc.youtube_links.iter().map(String::as_str)),
        );
        let mut seen_images = HashSet::new();
        let images: Vec<ArticleImage> = documents
            .iter()
            .flat_map(|doc| doc.images.iter())
            .filter(|image| seen_images.insert(image.filename.as_str()))
            .cloned()
            .collect();

        let window_start = history.len().saturating_sub(self.config.history_window);
        let request = GenerationRequest {
            question: question.to_string(),
            documents,
            history: history[window_start..].to_vec(),
        };

        match self.generator.generate(request).await {
            Ok(generated) => {
                let needs_escalation = generated.confidence < self.config.confidence_threshold;
                if needs_escalation {
                    info!(
                        "low confidence answer ({:.2}): {}",
                        generated.confidence, generated.confidence_reason
                    );
                }
                TurnReply {
                    response_type: ResponseType::Answer,
                    answer: generated.text,
                    confidence: generated.confidence,
                    needs_escalation,
                    source_articles,
                    youtube_links,
                    has_images: !images.is_empty(),
                    images,
                    suggested_topics: Vec::new(),
                }
            }
            Err(e) => {
                warn!("answer generation failed: {e}");
                TurnReply::escalation(self.config.generation_error_reply.as_str())
            }
        }
    }
}

/// Distinct values in first-seen order.
fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|value| seen.insert(*value))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use parking_lot::Mutex;

    use super::*;
    use crate::classifier::ClassifierConfig;
    use crate::dialog::types::GeneratedAnswer;
    use crate::error::HelpdeskError;
    use crate::session::SessionConfig;

    struct FixedRetriever {
        hits: Vec<ScoredCandidate>,
    }

    #[async_trait]
    impl Retriever for FixedRetriever {
        async fn retrieve(&self, _query: &str, top_k: usize) -> Result<Vec<ScoredCandidate>> {
            Ok(self.hits.iter().take(top_k).cloned().collect())
        }
    }

    #[derive(Default)]
    struct RecordingGenerator {
        confidence: f64,
        fail: bool,
        requests: Mutex<Vec<GenerationRequest>>,
    }

    #[async_trait]
    impl AnswerGenerator for RecordingGenerator {
        async fn generate(&self, request: GenerationRequest) -> Result<GeneratedAnswer> {
            let question = request.question.clone();
            self.requests.lock().push(request);
            if self.fail {
                return Err(HelpdeskError::generation("upstream timeout"));
            }
            Ok(GeneratedAnswer {
                text: format!("answer to {question}"),
                confidence: self.confidence,
                confidence_reason: "test".to_string(),
            })
        }
    }

    fn dialog(
        hits: Vec<ScoredCandidate>,
        generator: Arc<RecordingGenerator>,
    ) -> SupportDialog {
        SupportDialog::new(
            QueryClassifier::new(ClassifierConfig::default()),
            Arc::new(ClarificationSessions::new(&SessionConfig::default())),
            Arc::new(FixedRetriever { hits }),
            generator,
            RetrievalConfig::default(),
        )
    }

    fn ambiguous_hits() -> Vec<ScoredCandidate> {
        vec![
            ScoredCandidate::new("A", "Invoices", 0.80, "How to create an invoice")
                .with_youtube_links(vec!["https://youtu.be/a".to_string()]),
            ScoredCandidate::new("B", "Invoice printing", 0.78, "Printing invoices"),
            ScoredCandidate::new("C", "Invoice export", 0.75, "Exporting invoices"),
        ]
    }

    #[tokio::test]
    async fn test_vague_query_gets_clarification() {
        let generator = Arc::new(RecordingGenerator::default());
        let dialog = dialog(ambiguous_hits(), generator.clone());

        let reply = dialog
            .handle_turn("c1", "problem with invoice", &[])
            .await
            .unwrap();

        assert!(reply.is_clarification());
        assert!(!reply.needs_escalation);
        assert_eq!(reply.suggested_topics.len(), 3);
        assert!(reply.answer.contains("1. Invoices"));
        assert!(dialog.sessions().read("c1").is_some());
        assert!(generator.requests.lock().is_empty());
    }

    #[tokio::test]
    async fn test_selection_answers_original_query() {
        let generator = Arc::new(RecordingGenerator {
            confidence: 0.9,
            ..Default::default()
        });
        let dialog = dialog(ambiguous_hits(), generator.clone());

        dialog
            .handle_turn("c1", "problem with invoice", &[])
            .await
            .unwrap();
        let reply = dialog.handle_turn("c1", "2", &[]).await.unwrap();

        assert_eq!(reply.response_type, ResponseType::Answer);
        assert_eq!(reply.source_articles, vec!["B".to_string()]);
        assert!(!reply.needs_escalation);
        assert!(dialog.sessions().read("c1").is_none());

        let requests = generator.requests.lock();
        assert_eq!(requests[0].question, "problem with invoice");
    }

    #[tokio::test]
    async fn test_specific_query_answered_directly() {
        let generator = Arc::new(RecordingGenerator {
            confidence: 0.9,
            ..Default::default()
        });
        let dialog = dialog(ambiguous_hits(), generator);

        let reply = dialog
            .handle_turn("c1", "how do I export invoices to a spreadsheet file", &[])
            .await
            .unwrap();

        assert_eq!(reply.response_type, ResponseType::Answer);
        assert_eq!(reply.source_articles, vec!["A", "B", "C"]);
        assert_eq!(reply.youtube_links, vec!["https://youtu.be/a"]);
    }

    #[tokio::test]
    async fn test_answer_collects_distinct_images() {
        let generator = Arc::new(RecordingGenerator {
            confidence: 0.9,
            ..Default::default()
        });
        let screenshot = ArticleImage {
            filename: "export.png".to_string(),
            alt: "Export dialog".to_string(),
        };
        let hits = vec![
            ScoredCandidate::new("C", "Invoice export", 0.80, "Open the export dialog")
                .with_images(vec![screenshot.clone()]),
            ScoredCandidate::new("C", "Invoice export", 0.78, "Choose the spreadsheet format")
                .with_images(vec![screenshot.clone()]),
            ScoredCandidate::new("B", "Invoice printing", 0.75, "Printing invoices"),
        ];
        let dialog = dialog(hits, generator);

        let reply = dialog
            .handle_turn("c1", "how do I export invoices to a spreadsheet file", &[])
            .await
            .unwrap();

        assert!(reply.has_images);
        assert_eq!(reply.images, vec![screenshot]);

        let reply = dialog
            .handle_turn("c2", "problem with invoice", &[])
            .await
            .unwrap();
        assert!(reply.is_clarification());
        assert!(!reply.has_images);
    }

    #[tokio::test]
    async fn test_no_relevant_documents_escalates() {
        let generator = Arc::new(RecordingGenerator::default());
        let hits = vec![ScoredCandidate::new("A", "Invoices", 0.1, "text")];
        let dialog = dialog(hits, generator.clone());

        let reply = dialog.handle_turn("c1", "problem", &[]).await.unwrap();

        assert!(reply.needs_escalation);
        assert_eq!(reply.confidence, 0.0);
        assert_eq!(reply.answer, dialog.config().not_found_reply);
        assert!(generator.requests.lock().is_empty());
    }

    #[tokio::test]
    async fn test_generation_error_escalates() {
        let generator = Arc::new(RecordingGenerator {
            fail: true,
            ..Default::default()
        });
        let dialog = dialog(ambiguous_hits(), generator);

        let reply = dialog
            .handle_turn("c1", "how do I export invoices to a spreadsheet file", &[])
            .await
            .unwrap();

        assert!(reply.needs_escalation);
        assert_eq!(reply.answer, dialog.config().generation_error_reply);
    }

    #[tokio::test]
    async fn test_low_confidence_escalates() {
        let generator = Arc::new(RecordingGenerator {
            confidence: 0.2,
            ..Default::default()
        });
        let dialog = dialog(ambiguous_hits(), generator);

        let reply = dialog
            .handle_turn("c1", "how do I export invoices to a spreadsheet file", &[])
            .await
            .unwrap();

        assert!(reply.needs_escalation);
        assert_eq!(reply.confidence, 0.2);
    }

    #[tokio::test]
    async fn test_history_window_applied() {
        let generator = Arc::new(RecordingGenerator {
            confidence: 0.9,
            ..Default::default()
        });
        let dialog = dialog(ambiguous_hits(), generator.clone());
        let history: Vec<_> = (0..10).map(|i| ChatMessage::user(format!("m{i}"))).collect();

        dialog
            .handle_turn("c1", "how do I export invoices to a spreadsheet file", &history)
            .await
            .unwrap();

        let requests = generator.requests.lock();
        assert_eq!(requests[0].history.len(), 6);
        assert_eq!(requests[0].history[0].content, "m4");
    }

    #[tokio::test]
    async fn test_selection_without_passages_uses_snippet() {
        let generator = Arc::new(RecordingGenerator {
            confidence: 0.9,
            ..Default::default()
        });
        let dialog = dialog(Vec::new(), generator.clone());
        dialog.sessions().save(
            "c1",
            "problem with invoice",
            vec![SuggestedTopic {
                title: "Invoices".to_string(),
                topic_key: "A".to_string(),
                score: 0.8,
                snippet: "How to create an invoice".to_string(),
            }],
        );

        let reply = dialog.handle_turn("c1", "1", &[]).await.unwrap();

        assert_eq!(reply.source_articles, vec!["A"]);
        let requests = generator.requests.lock();
        assert_eq!(requests[0].documents[0].text, "How to create an invoice");
    }

    #[tokio::test]
    async fn test_reset_clears_pending_offer() {
        let dialog = dialog(ambiguous_hits(), Arc::new(RecordingGenerator::default()));

        dialog
            .handle_turn("c1", "problem with invoice", &[])
            .await
            .unwrap();
        dialog.reset("c1");

        assert!(dialog.sessions().read("c1").is_none());
    }
}

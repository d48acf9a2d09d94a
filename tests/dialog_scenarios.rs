use std::sync::Arc;

use async_trait::async_trait;

use helpdesk::classifier::{ArticleImage, QueryClassifier, ScoredCandidate};
use helpdesk::dialog::{
    AnswerGenerator, ChatMessage, GeneratedAnswer, GenerationRequest, ResponseType,
    RetrievalConfig, Retriever, SupportDialog, parse_confidence,
};
use helpdesk::error::{HelpdeskError, Result};
use helpdesk::knowledge::{Article, ExtractiveAnswerer, KnowledgeBase};
use helpdesk::session::{ClarificationSessions, SessionConfig};

fn knowledge_base() -> KnowledgeBase {
    KnowledgeBase::from_articles(vec![
        Article {
            topic_key: "101".to_string(),
            title: "Invoice posting".to_string(),
            content: "An invoice problem when posting usually means the period is closed.\n\n\
                      Open the period in settings and post the invoice again."
                .to_string(),
            youtube_links: vec!["https://youtu.be/posting".to_string()],
            images: vec![ArticleImage {
                filename: "period-settings.png".to_string(),
                alt: "Period settings".to_string(),
            }],
        },
        Article {
            topic_key: "102".to_string(),
            title: "Invoice printing".to_string(),
            content: "An invoice problem when printing is usually the printer driver.".to_string(),
            youtube_links: Vec::new(),
            images: Vec::new(),
        },
        Article {
            topic_key: "103".to_string(),
            title: "Stock write-off".to_string(),
            content: "Write-off documents reduce stock for expired goods.".to_string(),
            youtube_links: Vec::new(),
            images: Vec::new(),
        },
    ])
}

fn offline_dialog() -> SupportDialog {
    SupportDialog::new(
        QueryClassifier::default(),
        Arc::new(ClarificationSessions::new(&SessionConfig::default())),
        Arc::new(knowledge_base()),
        Arc::new(ExtractiveAnswerer::new()),
        RetrievalConfig::default(),
    )
}

#[tokio::test]
async fn vague_question_then_selection_answers_from_chosen_article() -> Result<()> {
    let dialog = offline_dialog();

    let reply = dialog.handle_turn("user-1", "invoice problem", &[]).await?;
    assert_eq!(reply.response_type, ResponseType::Clarification);
    let keys: Vec<_> = reply
        .suggested_topics
        .iter()
        .map(|t| t.topic_key.as_str())
        .collect();
    assert_eq!(keys, vec!["101", "102"]);

    let history = vec![
        ChatMessage::user("invoice problem"),
        ChatMessage::assistant(reply.answer.clone()),
    ];
    let reply = dialog.handle_turn("user-1", "2", &history).await?;

    assert_eq!(reply.response_type, ResponseType::Answer);
    assert_eq!(reply.source_articles, vec!["102"]);
    assert!(reply.answer.contains("printer driver"));
    assert!(!reply.has_images);
    assert!(!reply.needs_escalation);
    Ok(())
}

#[tokio::test]
async fn unrelated_question_is_escalated() -> Result<()> {
    let dialog = offline_dialog();

    let reply = dialog.handle_turn("user-2", "quantum entanglement", &[]).await?;

    assert_eq!(reply.response_type, ResponseType::Answer);
    assert!(reply.needs_escalation);
    assert!(reply.source_articles.is_empty());
    Ok(())
}

#[tokio::test]
async fn specific_question_is_answered_with_links() -> Result<()> {
    let dialog = offline_dialog();

    let reply = dialog
        .handle_turn("user-3", "open the closed period to post invoice", &[])
        .await?;

    assert_eq!(reply.response_type, ResponseType::Answer);
    assert_eq!(reply.source_articles.first().map(String::as_str), Some("101"));
    assert_eq!(reply.youtube_links, vec!["https://youtu.be/posting"]);
    assert!(reply.has_images);
    assert_eq!(reply.images[0].filename, "period-settings.png");
    Ok(())
}

#[tokio::test]
async fn conversations_are_isolated() -> Result<()> {
    let dialog = offline_dialog();

    let reply = dialog.handle_turn("user-4", "invoice problem", &[]).await?;
    assert_eq!(reply.response_type, ResponseType::Clarification);

    // "1" from another conversation is just an unmatched query.
    let other = dialog.handle_turn("user-5", "1", &[]).await?;
    assert!(other.needs_escalation);
    assert!(dialog.sessions().read("user-4").is_some());
    Ok(())
}

struct FailingRetriever;

#[async_trait]
impl Retriever for FailingRetriever {
    async fn retrieve(&self, _query: &str, _top_k: usize) -> Result<Vec<ScoredCandidate>> {
        Err(HelpdeskError::retrieval("vector store unavailable"))
    }
}

struct ModelGenerator;

#[async_trait]
impl AnswerGenerator for ModelGenerator {
    async fn generate(&self, _request: GenerationRequest) -> Result<GeneratedAnswer> {
        Ok(parse_confidence(
            "Reinstall the printer driver.\n```confidence\n{\"confidence\": 0.2, \"reason\": \"guess\"}\n```",
        ))
    }
}

#[tokio::test]
async fn retrieval_failure_propagates() {
    let dialog = SupportDialog::new(
        QueryClassifier::default(),
        Arc::new(ClarificationSessions::default()),
        Arc::new(FailingRetriever),
        Arc::new(ModelGenerator),
        RetrievalConfig::default(),
    );

    let result = dialog.handle_turn("user-6", "printer problem", &[]).await;
    assert!(matches!(result, Err(HelpdeskError::Retrieval(_))));
}

#[tokio::test]
async fn low_model_confidence_is_escalated() -> Result<()> {
    let dialog = SupportDialog::new(
        QueryClassifier::default(),
        Arc::new(ClarificationSessions::default()),
        Arc::new(knowledge_base()),
        Arc::new(ModelGenerator),
        RetrievalConfig::default(),
    );

    let reply = dialog
        .handle_turn("user-7", "invoice printing with the printer driver", &[])
        .await?;

    assert_eq!(reply.answer, "Reinstall the printer driver.");
    assert_eq!(reply.confidence, 0.2);
    assert!(reply.needs_escalation);
    Ok(())
}

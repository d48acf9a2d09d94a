//! Collaborator seams of a support turn.

use async_trait::async_trait;

use crate::classifier::ScoredCandidate;
use crate::dialog::types::{GeneratedAnswer, GenerationRequest};
use crate::error::Result;

/// Finds knowledge-base passages for a query.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use helpdesk::classifier::ScoredCandidate;
/// use helpdesk::dialog::Retriever;
/// use helpdesk::error::Result;
///
/// struct Canned(Vec<ScoredCandidate>);
///
/// #[async_trait]
/// impl Retriever for Canned {
///     async fn retrieve(&self, _query: &str, top_k: usize) -> Result<Vec<ScoredCandidate>> {
///         Ok(self.0.iter().take(top_k).cloned().collect())
///     }
/// }
/// ```
#[async_trait]
pub trait Retriever: Send + Sync {
    /// Up to `top_k` passages, highest score first.
    async fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<ScoredCandidate>>;

    /// Up to `top_k` passages belonging to one topic.
    ///
    /// The default over-fetches and filters, which suits stores without
    /// metadata filtering.
    async fn retrieve_topic(
        &self,
        topic_key: &str,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<ScoredCandidate>> {
        let hits = self.retrieve(query, top_k.saturating_mul(4)).await?;
        Ok(hits
            .into_iter()
            .filter(|hit| hit.topic_key_or_unknown() == topic_key)
            .take(top_k)
            .collect())
    }
}

/// Produces an answer from retrieved evidence.
#[async_trait]
pub trait AnswerGenerator: Send + Sync {
    async fn generate(&self, request: GenerationRequest) -> Result<GeneratedAnswer>;
}

//! In-process knowledge base with keyword-overlap retrieval.

use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use async_trait::async_trait;
use log::info;
use serde::{Deserialize, Serialize};

use crate::classifier::{ArticleImage, ScoredCandidate};
use crate::dialog::Retriever;
use crate::error::{HelpdeskError, Result};
use crate::knowledge::tokenize;

/// A support article as stored in the knowledge-base JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub topic_key: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub youtube_links: Vec<String>,
    #[serde(default)]
    pub images: Vec<ArticleImage>,
}

/// One paragraph of an article.
#[derive(Debug, Clone)]
struct Chunk {
    article: usize,
    text: String,
    tokens: HashSet<String>,
}

/// Articles split into paragraph chunks and searched by token overlap.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    articles: Vec<Article>,
    chunks: Vec<Chunk>,
}

impl KnowledgeBase {
    pub fn from_articles(articles: Vec<Article>) -> Self {
        let chunks = articles
            .iter()
            .enumerate()
            .flat_map(|(article, a)| {
                paragraphs(&a.content).map(move |text| Chunk {
                    article,
                    tokens: tokenize(text),
                    text: text.to_string(),
                })
            })
            .collect();

        KnowledgeBase { articles, chunks }
    }

    /// Load a JSON array of [`Article`]s.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        let articles: Vec<Article> = serde_json::from_reader(reader)?;
        if articles.is_empty() {
            return Err(HelpdeskError::invalid_argument(format!(
                "knowledge base {} contains no articles",
                path.display()
            )));
        }

        let kb = Self::from_articles(articles);
        info!(
            "loaded {} articles ({} chunks) from {}",
            kb.article_count(),
            kb.chunk_count(),
            path.display()
        );
        Ok(kb)
    }

    pub fn article_count(&self) -> usize {
        self.articles.len()
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Score every chunk against `query`, best first, dropping non-matches.
    pub fn search(&self, query: &str, top_k: usize) -> Vec<ScoredCandidate> {
        let query_tokens = tokenize(query);
        if query_tokens.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(f64, &Chunk)> = self
            .chunks
            .iter()
            .filter_map(|chunk| {
                let overlap = query_tokens.intersection(&chunk.tokens).count();
                (overlap > 0).then(|| (overlap as f64 / query_tokens.len() as f64, chunk))
            })
            .collect();
        // Stable sort keeps article order among equal scores.
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        scored.truncate(top_k);

        scored
            .into_iter()
            .map(|(score, chunk)| {
                let article = &self.articles[chunk.article];
                ScoredCandidate::new(
                    article.topic_key.as_str(),
                    article.title.as_str(),
                    score,
                    chunk.text.as_str(),
                )
                .with_youtube_links(article.youtube_links.clone())
                .with_images(article.images.clone())
            })
            .collect()
    }
}

#[async_trait]
impl Retriever for KnowledgeBase {
    async fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<ScoredCandidate>> {
        Ok(self.search(query, top_k))
    }
}

fn paragraphs(content: &str) -> impl Iterator<Item = &str> {
    content
        .split("\n\n")
        .map(str::trim)
        .filter(|paragraph| !paragraph.is_empty())
}

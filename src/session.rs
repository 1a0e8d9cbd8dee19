//! Session controller
//!
//! One `Session` owns the state of the original single-page flow: a
//! nullable handle to the active index, set by a successful process run,
//! cleared by the clear flow. The process, question, and clear flows all
//! run sequentially on the calling task; errors are returned to the
//! command layer, which renders them without ending the session.

use crate::answer::{build_prompt, collect_sources, AnswerModel, AnthropicModel};
use crate::chunk::{chunk_article, Chunk};
use crate::config::Config;
use crate::embed::{create_embedder, embed_in_batches};
use crate::error::{Error, Result};
use crate::fetch::{is_valid_url, ArticleFetcher};
use crate::store::{ChunkPoint, QdrantStore};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{info, warn};

/// Handle to the active index. Present only after a successful process
/// run (or an explicit attach), absent after clear.
#[derive(Debug, Clone)]
pub struct IndexHandle {
    pub collection: String,
}

/// Result of a process run
#[derive(Debug, Clone, Serialize)]
pub struct ProcessReport {
    pub articles: usize,
    pub chunks: usize,
    pub sources: Vec<String>,
}

/// An answer with its deduplicated source URLs
#[derive(Debug, Clone, Serialize)]
pub struct Answer {
    pub text: String,
    pub sources: BTreeSet<String>,
}

/// Result of a clear run
#[derive(Debug, Clone, Serialize)]
pub struct ClearReport {
    pub existed: bool,
}

/// A user session over one Qdrant collection
pub struct Session {
    config: Config,
    store: QdrantStore,
    index: Option<IndexHandle>,
}

impl Session {
    pub fn new(config: Config, store: QdrantStore) -> Self {
        Self {
            config,
            store,
            index: None,
        }
    }

    /// Whether this session currently holds an index handle
    pub fn has_index(&self) -> bool {
        self.index.is_some()
    }

    /// Adopt the configured collection as this session's index if it
    /// already exists in Qdrant. Used by one-shot commands, which cannot
    /// carry the handle of an earlier process run across invocations.
    pub async fn attach(&mut self) -> Result<bool> {
        if self.store.collection_exists().await? {
            // Fails if the stored vector size doesn't match the
            // configured embedding model
            self.store.ensure_collection().await?;
            self.index = Some(IndexHandle {
                collection: self.store.collection().to_string(),
            });
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Process flow: validate URLs, fetch articles, chunk, embed, and
    /// replace the index with the result.
    ///
    /// The replace drops the old collection before the new points are
    /// written. If embedding already succeeded but the upsert fails, the
    /// previous index is gone while a handle from an earlier run may
    /// still be set; the error is surfaced and the next successful
    /// process or clear resolves the inconsistency.
    pub async fn process(&mut self, urls: &[String]) -> Result<ProcessReport> {
        let mut valid_urls: Vec<String> = urls
            .iter()
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty() && is_valid_url(u))
            .collect();

        if valid_urls.is_empty() {
            return Err(Error::NoValidUrls);
        }

        let max_urls = self.config.fetch.max_urls;
        if valid_urls.len() > max_urls {
            warn!(
                "{} URLs given, only the first {} are processed",
                valid_urls.len(),
                max_urls
            );
            valid_urls.truncate(max_urls);
        }

        let fetcher = ArticleFetcher::new(&self.config.fetch)?;
        let articles = fetcher.fetch_all(&valid_urls).await?;

        let mut chunks: Vec<Chunk> = Vec::new();
        for article in &articles {
            chunks.extend(chunk_article(article, &self.config.chunk));
        }
        info!(
            "Chunked {} articles into {} chunks",
            articles.len(),
            chunks.len()
        );

        let embedder = create_embedder(&self.config.embedding)?;
        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let vectors =
            embed_in_batches(embedder.as_ref(), texts, self.config.embedding.batch_size).await?;

        if vectors.len() != chunks.len() {
            return Err(Error::Embedding(format!(
                "Embedded {} of {} chunks",
                vectors.len(),
                chunks.len()
            )));
        }

        let indexed_at = chrono::Utc::now().to_rfc3339();
        let points: Vec<ChunkPoint> = chunks
            .iter()
            .zip(vectors)
            .map(|(chunk, vector)| ChunkPoint::from_chunk(chunk, vector, indexed_at.clone()))
            .collect();

        self.store.reset_collection().await?;
        self.store.upsert_points(points).await?;

        self.index = Some(IndexHandle {
            collection: self.store.collection().to_string(),
        });

        Ok(ProcessReport {
            articles: articles.len(),
            chunks: chunks.len(),
            sources: valid_urls,
        })
    }

    /// Question flow with the configured Anthropic model. The API key is
    /// read here, not at startup, so processing works without one.
    pub async fn ask(&self, question: &str) -> Result<Answer> {
        if self.index.is_none() {
            return Err(Error::NoIndex);
        }

        let api_key = self.config.answer.api_key()?;
        let model = AnthropicModel::new(&self.config.answer, api_key)?;
        self.ask_with_model(question, &model).await
    }

    /// Question flow with a caller-supplied model: embed the question,
    /// retrieve the top-k chunks, and generate an answer over them.
    pub async fn ask_with_model(&self, question: &str, model: &dyn AnswerModel) -> Result<Answer> {
        if self.index.is_none() {
            return Err(Error::NoIndex);
        }

        let embedder = create_embedder(&self.config.embedding)?;
        let query_vector = embedder
            .embed(vec![question.to_string()])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::Embedding("No embedding returned".to_string()))?;

        let excerpts = self
            .store
            .search(query_vector, self.config.answer.top_k)
            .await?;
        info!("Retrieved {} excerpts", excerpts.len());

        let prompt = build_prompt(question, &excerpts);
        let text = model.complete(&prompt).await?;
        let sources = collect_sources(&excerpts);

        Ok(Answer { text, sources })
    }

    /// Clear flow: drop the collection if it exists and null the handle.
    /// Idempotent; clearing an empty store still succeeds.
    pub async fn clear(&mut self) -> Result<ClearReport> {
        let existed = self.store.delete_collection().await?;
        self.index = None;

        if existed {
            info!("Collection {} deleted", self.store.collection());
        }

        Ok(ClearReport { existed })
    }
}

//! Embedding generation
//!
//! This module provides an abstraction over embedding models with:
//! - A trait for different embedding backends
//! - HTTP embedding backend
//! - Batch processing for efficiency

mod http_backend;

pub use http_backend::*;

use crate::config::EmbeddingConfig;
use crate::error::Result;
use async_trait::async_trait;

/// Trait for embedding providers
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a batch of texts
    async fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>>;

    /// Get the embedding dimension
    fn dimension(&self) -> usize;

    /// Get the model name
    fn model_name(&self) -> &str;
}

/// Create an embedder based on configuration
pub fn create_embedder(config: &EmbeddingConfig) -> Result<Box<dyn Embedder>> {
    let embedder = HttpEmbedder::new(config)?;
    Ok(Box::new(embedder))
}

/// Helper to embed in batches
pub async fn embed_in_batches(
    embedder: &dyn Embedder,
    texts: Vec<String>,
    batch_size: usize,
) -> Result<Vec<Vec<f32>>> {
    let mut all_embeddings = Vec::with_capacity(texts.len());

    for batch in texts.chunks(batch_size.max(1)) {
        let embeddings = embedder.embed(batch.to_vec()).await?;
        all_embeddings.extend(embeddings);
    }

    Ok(all_embeddings)
}

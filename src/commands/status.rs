//! Status command implementation

use crate::config::Config;
use crate::error::Result;
use crate::store::QdrantStore;
use serde::Serialize;

/// System status for CLI display
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub qdrant_url: String,
    pub collection: String,
    pub collection_exists: bool,
    pub points_count: u64,
    pub indexed_vectors_count: u64,
    pub collection_status: Option<String>,
    pub embedding_model: String,
    pub embedding_dimension: usize,
    pub answer_model: String,
}

/// Gather system status
pub async fn cmd_status(config: &Config) -> Result<StatusReport> {
    let store = QdrantStore::connect(config).await?;
    let info = store.get_collection_info().await?;

    Ok(StatusReport {
        qdrant_url: config.qdrant_url.clone(),
        collection: config.collection_name.clone(),
        collection_exists: info.is_some(),
        points_count: info.as_ref().map(|i| i.points_count).unwrap_or(0),
        indexed_vectors_count: info.as_ref().map(|i| i.indexed_vectors_count).unwrap_or(0),
        collection_status: info.map(|i| i.status),
        embedding_model: config.embedding.model.clone(),
        embedding_dimension: config.embedding.resolved_dimension(),
        answer_model: config.answer.model.clone(),
    })
}

/// Print status to console
pub fn print_status(status: &StatusReport) {
    println!("newsdesk status");
    println!("  Qdrant: {}", status.qdrant_url);
    println!("  Collection: {}", status.collection);

    if status.collection_exists {
        println!("  Indexed chunks: {}", status.points_count);
        println!("  Indexed vectors: {}", status.indexed_vectors_count);
        if let Some(ref s) = status.collection_status {
            println!("  Collection status: {}", s);
        }
    } else {
        println!("  Indexed chunks: none (run 'newsdesk process <URL>...')");
    }

    println!(
        "  Embedding model: {} ({} dims)",
        status.embedding_model, status.embedding_dimension
    );
    println!("  Answer model: {}", status.answer_model);
}

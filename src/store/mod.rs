//! Qdrant vector database integration
//!
//! This module wraps the Qdrant client and provides:
//! - Collection management (create, drop, full replace)
//! - Point upsert operations
//! - Vector search

mod payload;

pub use payload::*;

use crate::config::Config;
use crate::error::{Error, Result};
use qdrant_client::qdrant::{
    CreateCollectionBuilder, Distance, PointId, PointStruct, SearchPointsBuilder,
    UpsertPointsBuilder, VectorParamsBuilder,
};
use qdrant_client::Qdrant;
use serde_json::Value;
use tracing::{debug, info};

/// Information about a Qdrant collection
#[derive(Debug, Clone)]
pub struct CollectionInfo {
    pub points_count: u64,
    pub indexed_vectors_count: u64,
    pub status: String,
}

/// Search result
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub id: String,
    pub score: f32,
    pub payload: ChunkPayload,
}

/// Qdrant store handle
pub struct QdrantStore {
    client: Qdrant,
    collection: String,
    dimension: usize,
}

impl QdrantStore {
    /// Connect to Qdrant using config
    pub async fn connect(config: &Config) -> Result<Self> {
        Self::new(
            &config.qdrant_url,
            &config.collection_name,
            config.embedding.resolved_dimension(),
        )
        .await
    }

    /// Create a new store connection directly with URL and collection name
    pub async fn new(url: &str, collection: &str, dimension: usize) -> Result<Self> {
        debug!("Connecting to Qdrant at {}", url);

        let client = Qdrant::from_url(url)
            .skip_compatibility_check()
            .build()
            .map_err(|e| Error::Qdrant(e.to_string()))?;

        Ok(Self {
            client,
            collection: collection.to_string(),
            dimension,
        })
    }

    /// The collection name this store addresses
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// The expected vector dimension for this store
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Check if the collection exists
    pub async fn collection_exists(&self) -> Result<bool> {
        let exists = self.client.collection_exists(&self.collection).await?;
        Ok(exists)
    }

    /// Create the collection
    async fn create_collection(&self) -> Result<()> {
        info!(
            "Creating collection {} with dimension {}",
            self.collection, self.dimension
        );

        let vectors_config = VectorParamsBuilder::new(self.dimension as u64, Distance::Cosine);

        self.client
            .create_collection(
                CreateCollectionBuilder::new(&self.collection).vectors_config(vectors_config),
            )
            .await?;

        Ok(())
    }

    /// Ensure the collection exists with the expected vector size
    pub async fn ensure_collection(&self) -> Result<()> {
        if !self.client.collection_exists(&self.collection).await? {
            return self.create_collection().await;
        }

        debug!("Collection {} already exists", self.collection);

        if let Some(size) = self.collection_vector_size().await? {
            if size != self.dimension {
                return Err(Error::Qdrant(format!(
                    "Collection '{}' has vector size {}, but the configured embedding model expects {}. \
                     Set a new collection name or clear and re-process.",
                    self.collection, size, self.dimension
                )));
            }
        }

        Ok(())
    }

    /// Delete the collection if it exists. Returns whether it existed.
    pub async fn delete_collection(&self) -> Result<bool> {
        let exists = self.client.collection_exists(&self.collection).await?;

        if !exists {
            return Ok(false);
        }

        info!("Deleting collection {}", self.collection);
        self.client.delete_collection(&self.collection).await?;
        Ok(true)
    }

    /// Reset the collection: drop any existing data and recreate it empty.
    /// This is the full-replace primitive; there is no incremental path.
    pub async fn reset_collection(&self) -> Result<()> {
        if self.client.collection_exists(&self.collection).await? {
            info!("Dropping existing collection {}", self.collection);
            self.client.delete_collection(&self.collection).await?;
        }

        self.create_collection().await
    }

    /// Get collection info (point count, etc)
    pub async fn get_collection_info(&self) -> Result<Option<CollectionInfo>> {
        if !self.client.collection_exists(&self.collection).await? {
            return Ok(None);
        }

        let info = self.client.collection_info(&self.collection).await?;
        if let Some(result) = info.result {
            Ok(Some(CollectionInfo {
                points_count: result.points_count.unwrap_or(0),
                indexed_vectors_count: result.indexed_vectors_count.unwrap_or(0),
                status: format!("{:?}", result.status()),
            }))
        } else {
            Ok(None)
        }
    }

    /// Upsert ChunkPoint objects (converts to PointStruct internally)
    pub async fn upsert_points(&self, points: Vec<ChunkPoint>) -> Result<()> {
        if points.is_empty() {
            return Ok(());
        }

        if let Some(mismatch) = points.iter().find(|p| p.vector.len() != self.dimension) {
            return Err(Error::Qdrant(format!(
                "Vector dimension mismatch for collection '{}': expected {}, got {}",
                self.collection,
                self.dimension,
                mismatch.vector.len()
            )));
        }

        debug!(
            "Upserting {} points to collection {}",
            points.len(),
            self.collection
        );

        let point_structs: Vec<PointStruct> =
            points.into_iter().map(|p| p.to_point_struct()).collect();

        self.client
            .upsert_points(UpsertPointsBuilder::new(&self.collection, point_structs))
            .await?;

        Ok(())
    }

    /// Search for similar vectors
    pub async fn search(&self, query_vector: Vec<f32>, limit: usize) -> Result<Vec<SearchResult>> {
        debug!(
            "Searching collection {} with limit {}",
            self.collection, limit
        );

        let search_builder =
            SearchPointsBuilder::new(&self.collection, query_vector, limit as u64)
                .with_payload(true);

        let response = self.client.search_points(search_builder).await?;

        let results: Vec<SearchResult> = response
            .result
            .into_iter()
            .map(|p| {
                let payload: ChunkPayload = p
                    .payload
                    .into_iter()
                    .map(|(k, v)| (k, json_from_qdrant_value(v)))
                    .collect::<serde_json::Map<String, Value>>()
                    .into();

                SearchResult {
                    id: point_id_to_string(p.id),
                    score: p.score,
                    payload,
                }
            })
            .collect();

        Ok(results)
    }

    async fn collection_vector_size(&self) -> Result<Option<usize>> {
        let info = self.client.collection_info(&self.collection).await?;

        let params = info
            .result
            .and_then(|r| r.config)
            .and_then(|c| c.params)
            .and_then(|p| p.vectors_config)
            .and_then(|v| v.config);

        match params {
            Some(qdrant_client::qdrant::vectors_config::Config::Params(params)) => {
                Ok(Some(params.size as usize))
            }
            Some(qdrant_client::qdrant::vectors_config::Config::ParamsMap(_)) => {
                Err(Error::Qdrant(format!(
                    "Collection '{}' uses named vectors which are not supported by this store",
                    self.collection
                )))
            }
            None => Ok(None),
        }
    }
}

/// Convert PointId to string
fn point_id_to_string(id: Option<PointId>) -> String {
    match id {
        Some(PointId {
            point_id_options: Some(qdrant_client::qdrant::point_id::PointIdOptions::Uuid(uuid)),
        }) => uuid,
        Some(PointId {
            point_id_options: Some(qdrant_client::qdrant::point_id::PointIdOptions::Num(num)),
        }) => num.to_string(),
        _ => String::new(),
    }
}

/// Convert Qdrant value to serde_json Value
fn json_from_qdrant_value(v: qdrant_client::qdrant::Value) -> Value {
    use qdrant_client::qdrant::value::Kind;

    match v.kind {
        Some(Kind::NullValue(_)) => Value::Null,
        Some(Kind::BoolValue(b)) => Value::Bool(b),
        Some(Kind::IntegerValue(i)) => Value::Number(i.into()),
        Some(Kind::DoubleValue(d)) => serde_json::Number::from_f64(d)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        Some(Kind::StringValue(s)) => Value::String(s),
        Some(Kind::ListValue(list)) => Value::Array(
            list.values
                .into_iter()
                .map(json_from_qdrant_value)
                .collect(),
        ),
        Some(Kind::StructValue(s)) => Value::Object(
            s.fields
                .into_iter()
                .map(|(k, v)| (k, json_from_qdrant_value(v)))
                .collect(),
        ),
        None => Value::Null,
    }
}

//! Payload schema for Qdrant points

use crate::chunk::Chunk;
use qdrant_client::qdrant::{PointStruct, Value as QdrantValue};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use uuid::Uuid;

/// A point ready to be upserted to Qdrant
#[derive(Debug, Clone)]
pub struct ChunkPoint {
    pub id: Uuid,
    pub vector: Vec<f32>,
    pub payload: ChunkPayload,
}

impl ChunkPoint {
    /// Build a point from a chunk and its embedding. The id is a UUIDv5
    /// of the chunk hash, so the same chunk always maps to the same point.
    pub fn from_chunk(chunk: &Chunk, vector: Vec<f32>, indexed_at: String) -> Self {
        Self {
            id: Uuid::new_v5(&Uuid::NAMESPACE_URL, chunk.hash.as_bytes()),
            vector,
            payload: ChunkPayload {
                source: chunk.source.clone(),
                title: chunk.title.clone(),
                chunk_index: chunk.index as i32,
                text: chunk.text.clone(),
                chunk_hash: chunk.hash.clone(),
                indexed_at,
            },
        }
    }

    /// Convert to qdrant-client PointStruct
    pub fn to_point_struct(self) -> PointStruct {
        let payload_map = self.payload.to_qdrant_payload();
        PointStruct::new(self.id.to_string(), self.vector, payload_map)
    }
}

/// Payload stored with each chunk in Qdrant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkPayload {
    /// Source article URL
    pub source: String,

    /// Article title (if known)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Chunk index within the article
    pub chunk_index: i32,

    /// The chunk text
    pub text: String,

    /// Hash of the chunk content
    pub chunk_hash: String,

    /// When this chunk was indexed (RFC 3339)
    pub indexed_at: String,
}

impl ChunkPayload {
    /// Convert to Qdrant payload format
    pub fn to_qdrant_payload(self) -> HashMap<String, QdrantValue> {
        let mut map = HashMap::new();

        map.insert("source".to_string(), string_to_qdrant(&self.source));
        map.insert(
            "chunk_index".to_string(),
            int_to_qdrant(self.chunk_index as i64),
        );
        map.insert("text".to_string(), string_to_qdrant(&self.text));
        map.insert("chunk_hash".to_string(), string_to_qdrant(&self.chunk_hash));
        map.insert("indexed_at".to_string(), string_to_qdrant(&self.indexed_at));

        if let Some(ref title) = self.title {
            map.insert("title".to_string(), string_to_qdrant(title));
        }

        map
    }
}

fn string_to_qdrant(s: &str) -> QdrantValue {
    QdrantValue {
        kind: Some(qdrant_client::qdrant::value::Kind::StringValue(
            s.to_string(),
        )),
    }
}

fn int_to_qdrant(i: i64) -> QdrantValue {
    QdrantValue {
        kind: Some(qdrant_client::qdrant::value::Kind::IntegerValue(i)),
    }
}

impl From<Map<String, Value>> for ChunkPayload {
    fn from(map: Map<String, Value>) -> Self {
        serde_json::from_value(Value::Object(map)).unwrap_or_else(|_| ChunkPayload {
            source: String::new(),
            title: None,
            chunk_index: 0,
            text: String::new(),
            chunk_hash: String::new(),
            indexed_at: String::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_chunk() -> Chunk {
        let hash = Chunk::compute_hash("https://example.com/a", 0, "Chunk text.");
        Chunk {
            text: "Chunk text.".to_string(),
            source: "https://example.com/a".to_string(),
            title: Some("Example".to_string()),
            index: 0,
            hash,
        }
    }

    #[test]
    fn test_payload_serialization_roundtrip() {
        let point = ChunkPoint::from_chunk(
            &test_chunk(),
            vec![0.1, 0.2],
            "2024-01-01T00:00:00Z".to_string(),
        );

        let json = serde_json::to_string(&point.payload).unwrap();
        assert!(json.contains("https://example.com/a"));

        let parsed: ChunkPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.source, "https://example.com/a");
        assert_eq!(parsed.text, "Chunk text.");
        assert_eq!(parsed.chunk_index, 0);
    }

    #[test]
    fn test_point_id_is_stable() {
        let chunk = test_chunk();
        let a = ChunkPoint::from_chunk(&chunk, vec![0.1], "t1".to_string());
        let b = ChunkPoint::from_chunk(&chunk, vec![0.2], "t2".to_string());
        assert_eq!(a.id, b.id);
    }

    #[test]
    fn test_payload_from_map_tolerates_missing_fields() {
        let map = Map::new();
        let payload = ChunkPayload::from(map);
        assert!(payload.source.is_empty());
        assert!(payload.text.is_empty());
    }

    #[test]
    fn test_qdrant_payload_contains_required_keys() {
        let point = ChunkPoint::from_chunk(
            &test_chunk(),
            vec![0.1],
            "2024-01-01T00:00:00Z".to_string(),
        );
        let map = point.payload.to_qdrant_payload();

        for key in ["source", "chunk_index", "text", "chunk_hash", "indexed_at", "title"] {
            assert!(map.contains_key(key), "missing {key}");
        }
    }
}

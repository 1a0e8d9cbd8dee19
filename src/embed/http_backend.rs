//! HTTP embedding backend
//!
//! Talks to a local sidecar that serves the sentence-transformers model
//! over a small JSON API: POST /embed with `{model, inputs}`, answered
//! with `{embeddings: [[f32, ...], ...]}`.

use super::Embedder;
use crate::config::EmbeddingConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone, Serialize)]
struct EmbedRequest {
    model: String,
    inputs: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

/// Embedder backed by an HTTP sidecar
pub struct HttpEmbedder {
    client: Client,
    endpoint: Url,
    model: String,
    dimension: usize,
}

impl HttpEmbedder {
    pub fn new(config: &EmbeddingConfig) -> Result<Self> {
        let base = Url::parse(&config.backend_url).map_err(|e| {
            Error::Config(format!(
                "Invalid embedding backend URL '{}': {}",
                config.backend_url, e
            ))
        })?;
        let endpoint = base
            .join("embed")
            .map_err(|e| Error::Config(format!("Invalid embedding backend URL: {}", e)))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| Error::Embedding(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint,
            model: config.model.clone(),
            dimension: config.resolved_dimension(),
        })
    }

    fn validate_dimensions(&self, embeddings: &[Vec<f32>]) -> Result<()> {
        if let Some(mismatch) = embeddings.iter().find(|vec| vec.len() != self.dimension) {
            return Err(Error::Embedding(format!(
                "Embedding dimension mismatch for model '{}': expected {}, got {}",
                self.model,
                self.dimension,
                mismatch.len()
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl Embedder for HttpEmbedder {
    async fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let expected = texts.len();
        let request = EmbedRequest {
            model: self.model.clone(),
            inputs: texts,
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Embedding(format!("Embedding backend request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Embedding(format!(
                "Embedding backend returned {}: {}",
                status, body
            )));
        }

        let parsed: EmbedResponse = response
            .json()
            .await
            .map_err(|e| Error::Embedding(format!("Invalid embedding response: {}", e)))?;

        if parsed.embeddings.len() != expected {
            return Err(Error::Embedding(format!(
                "Embedding backend returned {} vectors for {} inputs",
                parsed.embeddings.len(),
                expected
            )));
        }

        self.validate_dimensions(&parsed.embeddings)?;
        Ok(parsed.embeddings)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_embedding_config(backend_url: &str, dimension: usize) -> EmbeddingConfig {
        EmbeddingConfig {
            model: "test/model".to_string(),
            dimension,
            backend_url: backend_url.to_string(),
            batch_size: 32,
        }
    }

    #[tokio::test]
    async fn test_embed_roundtrip() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/embed"))
            .and(body_partial_json(json!({"model": "test/model"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "embeddings": [[0.1, 0.2, 0.3], [0.4, 0.5, 0.6]]
            })))
            .mount(&server)
            .await;

        let embedder = HttpEmbedder::new(&test_embedding_config(&server.uri(), 3)).unwrap();
        let embeddings = embedder
            .embed(vec!["first".to_string(), "second".to_string()])
            .await
            .unwrap();

        assert_eq!(embeddings.len(), 2);
        assert_eq!(embeddings[0], vec![0.1, 0.2, 0.3]);
    }

    #[tokio::test]
    async fn test_embed_rejects_dimension_mismatch() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/embed"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "embeddings": [[0.1, 0.2]]
            })))
            .mount(&server)
            .await;

        let embedder = HttpEmbedder::new(&test_embedding_config(&server.uri(), 3)).unwrap();
        let err = embedder
            .embed(vec!["text".to_string()])
            .await
            .expect_err("short vector should fail");

        match err {
            Error::Embedding(message) => assert!(message.contains("dimension mismatch")),
            other => panic!("expected embedding error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_embed_rejects_count_mismatch() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/embed"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "embeddings": [[0.1, 0.2, 0.3]]
            })))
            .mount(&server)
            .await;

        let embedder = HttpEmbedder::new(&test_embedding_config(&server.uri(), 3)).unwrap();
        let err = embedder
            .embed(vec!["one".to_string(), "two".to_string()])
            .await
            .expect_err("missing vector should fail");

        assert!(matches!(err, Error::Embedding(_)));
    }

    #[tokio::test]
    async fn test_embed_surfaces_backend_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/embed"))
            .respond_with(ResponseTemplate::new(500).set_body_string("model not loaded"))
            .mount(&server)
            .await;

        let embedder = HttpEmbedder::new(&test_embedding_config(&server.uri(), 3)).unwrap();
        let err = embedder
            .embed(vec!["text".to_string()])
            .await
            .expect_err("backend failure should surface");

        match err {
            Error::Embedding(message) => assert!(message.contains("model not loaded")),
            other => panic!("expected embedding error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_embed_empty_input_skips_request() {
        // No mock mounted: a request would fail
        let embedder =
            HttpEmbedder::new(&test_embedding_config("http://127.0.0.1:1", 3)).unwrap();
        let embeddings = embedder.embed(Vec::new()).await.unwrap();
        assert!(embeddings.is_empty());
    }
}

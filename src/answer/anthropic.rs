//! Anthropic messages API backend

use super::AnswerModel;
use crate::config::AnswerConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Clone, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<Message>,
}

#[derive(Debug, Clone, Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Clone, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Clone, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

/// Answer model backed by the Anthropic messages API
pub struct AnthropicModel {
    client: Client,
    endpoint: Url,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl AnthropicModel {
    /// Create a model from config and an already-resolved API key
    pub fn new(config: &AnswerConfig, api_key: String) -> Result<Self> {
        let base = Url::parse(&config.base_url).map_err(|e| {
            Error::Config(format!("Invalid answer base URL '{}': {}", config.base_url, e))
        })?;
        let endpoint = base
            .join("v1/messages")
            .map_err(|e| Error::Config(format!("Invalid answer base URL: {}", e)))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| Error::Answer(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint,
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }
}

#[async_trait]
impl AnswerModel for AnthropicModel {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = MessagesRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Answer(format!("Anthropic request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Answer(format!(
                "Anthropic API returned {}: {}",
                status, body
            )));
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| Error::Answer(format!("Invalid Anthropic response: {}", e)))?;

        let answer: String = parsed
            .content
            .into_iter()
            .filter(|block| block.kind == "text")
            .map(|block| block.text)
            .collect::<Vec<_>>()
            .join("");

        if answer.trim().is_empty() {
            return Err(Error::Answer(
                "Anthropic API returned an empty answer".to_string(),
            ));
        }

        Ok(answer)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_answer_config(base_url: &str) -> AnswerConfig {
        AnswerConfig {
            base_url: base_url.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_complete_returns_text() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("x-api-key", "test-key"))
            .and(header("anthropic-version", ANTHROPIC_VERSION))
            .and(body_partial_json(json!({
                "model": "claude-3-sonnet-20240229",
                "max_tokens": 1000
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [{"type": "text", "text": "The answer."}]
            })))
            .mount(&server)
            .await;

        let model =
            AnthropicModel::new(&test_answer_config(&server.uri()), "test-key".to_string())
                .unwrap();

        let answer = model.complete("What?").await.unwrap();
        assert_eq!(answer, "The answer.");
    }

    #[tokio::test]
    async fn test_complete_joins_text_blocks() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [
                    {"type": "text", "text": "Part one. "},
                    {"type": "tool_use", "id": "x", "name": "y", "input": {}},
                    {"type": "text", "text": "Part two."}
                ]
            })))
            .mount(&server)
            .await;

        let model =
            AnthropicModel::new(&test_answer_config(&server.uri()), "test-key".to_string())
                .unwrap();

        let answer = model.complete("What?").await.unwrap();
        assert_eq!(answer, "Part one. Part two.");
    }

    #[tokio::test]
    async fn test_complete_surfaces_api_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(
                ResponseTemplate::new(401).set_body_string(r#"{"error": "invalid x-api-key"}"#),
            )
            .mount(&server)
            .await;

        let model =
            AnthropicModel::new(&test_answer_config(&server.uri()), "bad-key".to_string())
                .unwrap();

        let err = model.complete("What?").await.expect_err("401 should fail");
        match err {
            Error::Answer(message) => assert!(message.contains("401")),
            other => panic!("expected answer error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_complete_rejects_empty_content() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"content": []})))
            .mount(&server)
            .await;

        let model =
            AnthropicModel::new(&test_answer_config(&server.uri()), "test-key".to_string())
                .unwrap();

        assert!(model.complete("What?").await.is_err());
    }
}

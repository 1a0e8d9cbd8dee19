//! Article fetching
//!
//! This module provides:
//! - URL validation
//! - Article retrieval with configurable timeouts
//! - Plain-text extraction handoff for fetched pages
//!
//! Only the URLs the user supplies are fetched; there is no link
//! following.

use crate::config::FetchConfig;
use crate::error::{Error, Result};
use crate::parse::{parse_html, parse_plain_text, ContentType};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// A fetched article with extracted text
#[derive(Debug, Clone)]
pub struct Article {
    /// The article URL as supplied by the user
    pub url: String,

    /// Extracted title (if found)
    pub title: Option<String>,

    /// Extracted plain text
    pub text: String,
}

/// Returns true iff the string parses as an absolute URL with both a
/// scheme and a host. Returns false for anything else, including the
/// empty string; never errors.
pub fn is_valid_url(candidate: &str) -> bool {
    match Url::parse(candidate) {
        Ok(url) => !url.scheme().is_empty() && url.has_host(),
        Err(_) => false,
    }
}

/// Article fetcher
pub struct ArticleFetcher {
    client: Client,
}

impl ArticleFetcher {
    /// Create a new fetcher
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .brotli(true)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| Error::Fetch(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Fetch a single article and extract its text
    pub async fn fetch(&self, url: &str) -> Result<Article> {
        debug!("Fetching: {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Fetch(format!("HTTP {}: {}", status, url)));
        }

        let content_type_header = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let body = response.text().await?;

        // Pages that omit a content type are treated as HTML
        let ct = content_type_header
            .as_deref()
            .map(ContentType::from_mime)
            .unwrap_or(ContentType::Html);

        let doc = match ct {
            ContentType::Html => parse_html(&body)?,
            ContentType::PlainText => parse_plain_text(&body),
            ContentType::Unknown => {
                return Err(Error::UnsupportedContentType(
                    content_type_header.unwrap_or_else(|| "unknown".to_string()),
                ))
            }
        };

        if doc.text.is_empty() {
            return Err(Error::Fetch(format!("No text content extracted: {}", url)));
        }

        Ok(Article {
            url: url.to_string(),
            title: doc.title,
            text: doc.text,
        })
    }

    /// Fetch articles one at a time, stopping at the first failure
    pub async fn fetch_all(&self, urls: &[String]) -> Result<Vec<Article>> {
        let mut articles = Vec::with_capacity(urls.len());

        for url in urls {
            let article = self.fetch(url).await?;
            info!("Loaded {} ({} chars)", article.url, article.text.len());
            articles.push(article);
        }

        Ok(articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_is_valid_url_accepts_absolute_urls() {
        assert!(is_valid_url("https://example.com"));
        assert!(is_valid_url("http://example.com/path?q=1"));
        assert!(is_valid_url("https://sub.example.co.uk/article/2024"));
    }

    #[test]
    fn test_is_valid_url_rejects_malformed_input() {
        assert!(!is_valid_url(""));
        assert!(!is_valid_url("   "));
        assert!(!is_valid_url("example.com"));
        assert!(!is_valid_url("/relative/path"));
        assert!(!is_valid_url("www.example.com/page"));
        assert!(!is_valid_url("not a url at all"));
        assert!(!is_valid_url("mailto:user@example.com"));
        assert!(!is_valid_url("file:///etc/hosts"));
    }

    fn test_fetch_config() -> FetchConfig {
        FetchConfig {
            timeout_secs: 5,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_fetch_html_article() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/article"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(
                    "<html><head><title>Breaking News</title></head>\
                     <body><p>Something happened today.</p></body></html>",
                    "text/html; charset=utf-8",
                ),
            )
            .mount(&server)
            .await;

        let fetcher = ArticleFetcher::new(&test_fetch_config()).unwrap();
        let url = format!("{}/article", server.uri());
        let article = fetcher.fetch(&url).await.unwrap();

        assert_eq!(article.url, url);
        assert_eq!(article.title, Some("Breaking News".to_string()));
        assert!(article.text.contains("Something happened today"));
    }

    #[tokio::test]
    async fn test_fetch_plain_text() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/notes.txt"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("Notes\n\nPlain text body.")
                    .insert_header("content-type", "text/plain"),
            )
            .mount(&server)
            .await;

        let fetcher = ArticleFetcher::new(&test_fetch_config()).unwrap();
        let article = fetcher
            .fetch(&format!("{}/notes.txt", server.uri()))
            .await
            .unwrap();

        assert_eq!(article.title, Some("Notes".to_string()));
        assert!(article.text.contains("Plain text body"));
    }

    #[tokio::test]
    async fn test_fetch_http_error_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let fetcher = ArticleFetcher::new(&test_fetch_config()).unwrap();
        let err = fetcher
            .fetch(&format!("{}/missing", server.uri()))
            .await
            .expect_err("404 should fail");

        match err {
            Error::Fetch(message) => assert!(message.contains("404")),
            other => panic!("expected fetch error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_rejects_unsupported_content_type() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/image.png"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw("not really a png", "image/png"),
            )
            .mount(&server)
            .await;

        let fetcher = ArticleFetcher::new(&test_fetch_config()).unwrap();
        let err = fetcher
            .fetch(&format!("{}/image.png", server.uri()))
            .await
            .expect_err("binary content should fail");

        assert!(matches!(err, Error::UnsupportedContentType(_)));
    }

    #[tokio::test]
    async fn test_fetch_all_stops_at_first_failure() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/ok"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<html><body><p>Fine.</p></body></html>")
                    .insert_header("content-type", "text/html"),
            )
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/broken"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let fetcher = ArticleFetcher::new(&test_fetch_config()).unwrap();
        let urls = vec![
            format!("{}/ok", server.uri()),
            format!("{}/broken", server.uri()),
        ];

        assert!(fetcher.fetch_all(&urls).await.is_err());
    }
}

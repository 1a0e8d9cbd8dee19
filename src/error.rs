//! Custom error types for newsdesk

use thiserror::Error;

/// Main error type for newsdesk operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Qdrant error: {0}")]
    Qdrant(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Answer error: {0}")]
    Answer(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Please provide at least one valid URL")]
    NoValidUrls,

    #[error("No articles indexed yet: run 'newsdesk process <URL>...' first")]
    NoIndex,

    #[error("Missing Anthropic API key: set the {0} environment variable")]
    MissingApiKey(String),

    #[error("Unsupported content type: {0}")]
    UnsupportedContentType(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Not initialized: run 'newsdesk init' first")]
    NotInitialized,

    #[error("Already initialized at {0}")]
    AlreadyInitialized(String),
}

/// Result type alias for newsdesk
pub type Result<T> = std::result::Result<T, Error>;

/// Convert qdrant errors
impl From<qdrant_client::QdrantError> for Error {
    fn from(err: qdrant_client::QdrantError) -> Self {
        Error::Qdrant(err.to_string())
    }
}

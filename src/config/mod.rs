//! Configuration management for newsdesk
//!
//! Handles loading, saving, and validating configuration from TOML files.

mod defaults;

pub use defaults::*;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Qdrant connection URL
    #[serde(default = "default_qdrant_url")]
    pub qdrant_url: String,

    /// Qdrant collection name.
    ///
    /// This is one namespace per Qdrant instance: every session configured
    /// with the same collection name shares it, and concurrent process/clear
    /// runs race on it. There is no locking.
    #[serde(default = "default_collection_name")]
    pub collection_name: String,

    /// Embedding model configuration
    #[serde(default)]
    pub embedding: EmbeddingConfig,

    /// Chunking configuration
    #[serde(default)]
    pub chunk: ChunkConfig,

    /// Article fetching configuration
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Answer generation configuration
    #[serde(default)]
    pub answer: AnswerConfig,

    /// Paths configuration (internal, not user-editable)
    #[serde(skip)]
    pub paths: PathsConfig,
}

/// Embedding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Model name/identifier
    #[serde(default = "default_embedding_model")]
    pub model: String,

    /// Embedding dimension (must match model)
    #[serde(default = "default_embedding_dimension")]
    pub dimension: usize,

    /// Embedding backend URL
    #[serde(default = "default_embedding_backend_url")]
    pub backend_url: String,

    /// Batch size for embedding
    #[serde(default = "default_embedding_batch_size")]
    pub batch_size: usize,
}

/// Lookup the expected embedding dimension for a known model
pub fn embedding_dimension_for_model(model: &str) -> Option<usize> {
    match model {
        "sentence-transformers/all-MiniLM-L6-v2" => Some(384),
        "BAAI/bge-small-en-v1.5" => Some(384),
        "BAAI/bge-base-en-v1.5" => Some(768),
        "BAAI/bge-large-en-v1.5" => Some(1024),
        _ => None,
    }
}

impl EmbeddingConfig {
    /// Resolve the effective embedding dimension based on the configured model
    pub fn resolved_dimension(&self) -> usize {
        if let Some(expected) = embedding_dimension_for_model(&self.model) {
            if expected != self.dimension {
                warn!(
                    "Embedding dimension {} does not match model '{}' ({}); using {}",
                    self.dimension, self.model, expected, expected
                );
            }
            expected
        } else {
            self.dimension
        }
    }
}

/// Chunking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkConfig {
    /// Maximum characters per chunk
    #[serde(default = "default_chunk_max_chars")]
    pub max_chars: usize,

    /// Overlap characters between chunks
    #[serde(default = "default_chunk_overlap")]
    pub overlap_chars: usize,
}

/// Article fetching configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Maximum number of URLs accepted per process run
    #[serde(default = "default_fetch_max_urls")]
    pub max_urls: usize,

    /// User agent string
    #[serde(default = "default_fetch_user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "default_fetch_timeout")]
    pub timeout_secs: u64,
}

/// Answer generation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerConfig {
    /// Model name/identifier
    #[serde(default = "default_answer_model")]
    pub model: String,

    /// API base URL
    #[serde(default = "default_answer_base_url")]
    pub base_url: String,

    /// Environment variable name for the API key.
    /// The key is read lazily, only when a question is asked.
    #[serde(default = "default_answer_api_key_env")]
    pub api_key_env: String,

    /// Sampling temperature
    #[serde(default = "default_answer_temperature")]
    pub temperature: f32,

    /// Maximum tokens in the generated answer
    #[serde(default = "default_answer_max_tokens")]
    pub max_tokens: u32,

    /// Number of chunks retrieved per question
    #[serde(default = "default_answer_top_k")]
    pub top_k: usize,
}

impl AnswerConfig {
    /// Read the API key from the configured environment variable
    pub fn api_key(&self) -> Result<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| Error::MissingApiKey(self.api_key_env.clone()))
    }
}

/// Internal paths configuration
#[derive(Debug, Clone, Default)]
pub struct PathsConfig {
    /// Base directory for newsdesk data
    pub base_dir: PathBuf,

    /// Path to config file
    pub config_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            qdrant_url: default_qdrant_url(),
            collection_name: default_collection_name(),
            embedding: EmbeddingConfig::default(),
            chunk: ChunkConfig::default(),
            fetch: FetchConfig::default(),
            answer: AnswerConfig::default(),
            paths: PathsConfig::default(),
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model: default_embedding_model(),
            dimension: default_embedding_dimension(),
            backend_url: default_embedding_backend_url(),
            batch_size: default_embedding_batch_size(),
        }
    }
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            max_chars: default_chunk_max_chars(),
            overlap_chars: default_chunk_overlap(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_urls: default_fetch_max_urls(),
            user_agent: default_fetch_user_agent(),
            timeout_secs: default_fetch_timeout(),
        }
    }
}

impl Default for AnswerConfig {
    fn default() -> Self {
        Self {
            model: default_answer_model(),
            base_url: default_answer_base_url(),
            api_key_env: default_answer_api_key_env(),
            temperature: default_answer_temperature(),
            max_tokens: default_answer_max_tokens(),
            top_k: default_answer_top_k(),
        }
    }
}

impl Config {
    /// Get the default base directory for newsdesk (~/.newsdesk)
    pub fn default_base_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".newsdesk")
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        Self::default_base_dir().join("config.toml")
    }

    /// Initialize paths configuration
    fn init_paths(&mut self, base_dir: Option<PathBuf>) {
        let base = base_dir.unwrap_or_else(Self::default_base_dir);
        self.paths = PathsConfig {
            config_file: base.join("config.toml"),
            base_dir: base,
        };
    }

    /// Load configuration from a specific file path
    pub fn load(config_path: &Path) -> Result<Self> {
        debug!("Loading config from {:?}", config_path);

        if !config_path.exists() {
            return Err(Error::Config(format!(
                "Config file not found: {}",
                config_path.display()
            )));
        }

        let content = std::fs::read_to_string(config_path)?;
        let mut config: Config = toml::from_str(&content)?;

        let base = config_path.parent().unwrap_or(Path::new(".")).to_path_buf();
        config.paths = PathsConfig {
            config_file: config_path.to_path_buf(),
            base_dir: base,
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default location
    pub fn load_default() -> Result<Self> {
        Self::load(&Self::default_config_path())
    }

    /// Load configuration from a specific base directory, falling back to defaults
    pub fn load_from(base_dir: Option<PathBuf>) -> Result<Self> {
        let mut config = Config::default();
        config.init_paths(base_dir);

        if config.paths.config_file.exists() {
            debug!("Loading config from {:?}", config.paths.config_file);
            let content = std::fs::read_to_string(&config.paths.config_file)?;
            let mut loaded: Config = toml::from_str(&content)?;
            loaded.paths = config.paths;
            config = loaded;
        } else {
            debug!("No config file found, using defaults");
        }

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.paths.config_file.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&self.paths.config_file, content)?;
        info!("Saved config to {:?}", self.paths.config_file);
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.chunk.max_chars == 0 {
            return Err(Error::Config("chunk.max_chars must be > 0".to_string()));
        }

        if self.chunk.overlap_chars >= self.chunk.max_chars {
            return Err(Error::Config(
                "chunk.overlap_chars must be < chunk.max_chars".to_string(),
            ));
        }

        if self.fetch.max_urls == 0 {
            return Err(Error::Config("fetch.max_urls must be > 0".to_string()));
        }

        if self.answer.top_k == 0 {
            return Err(Error::Config("answer.top_k must be > 0".to_string()));
        }

        if self.answer.temperature < 0.0 || self.answer.temperature > 1.0 {
            return Err(Error::Config(
                "answer.temperature must be between 0.0 and 1.0".to_string(),
            ));
        }

        if self.collection_name.trim().is_empty() {
            return Err(Error::Config(
                "collection_name must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

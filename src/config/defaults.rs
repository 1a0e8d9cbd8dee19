//! Default values for configuration

/// Default Qdrant gRPC URL for local development (port 6334, not 6333 REST)
pub fn default_qdrant_url() -> String {
    std::env::var("QDRANT_URL").unwrap_or_else(|_| "http://127.0.0.1:6334".to_string())
}

/// Default collection name
pub fn default_collection_name() -> String {
    "news_articles".to_string()
}

/// Default embedding model (sentence-transformers/all-MiniLM-L6-v2)
pub fn default_embedding_model() -> String {
    "sentence-transformers/all-MiniLM-L6-v2".to_string()
}

/// Default embedding dimension (matches all-MiniLM-L6-v2)
pub fn default_embedding_dimension() -> usize {
    384
}

/// Default embedding backend URL
pub fn default_embedding_backend_url() -> String {
    std::env::var("NEWSDESK_EMBEDDING_BACKEND_URL")
        .unwrap_or_else(|_| "http://127.0.0.1:7997".to_string())
}

/// Default batch size for embedding
pub fn default_embedding_batch_size() -> usize {
    32
}

/// Default maximum characters per chunk
pub fn default_chunk_max_chars() -> usize {
    1000
}

/// Default overlap characters between chunks
pub fn default_chunk_overlap() -> usize {
    200
}

/// Default answer model
pub fn default_answer_model() -> String {
    "claude-3-sonnet-20240229".to_string()
}

/// Default Anthropic API base URL
pub fn default_answer_base_url() -> String {
    std::env::var("NEWSDESK_ANTHROPIC_BASE_URL")
        .unwrap_or_else(|_| "https://api.anthropic.com".to_string())
}

/// Default environment variable holding the Anthropic API key
pub fn default_answer_api_key_env() -> String {
    "ANTHROPIC_API_KEY".to_string()
}

/// Default sampling temperature for answer generation
pub fn default_answer_temperature() -> f32 {
    0.7
}

/// Default maximum tokens in a generated answer
pub fn default_answer_max_tokens() -> u32 {
    1000
}

/// Default number of chunks retrieved per question
pub fn default_answer_top_k() -> usize {
    5
}

/// Default maximum number of article URLs per process run
pub fn default_fetch_max_urls() -> usize {
    3
}

/// Default user agent
pub fn default_fetch_user_agent() -> String {
    format!("newsdesk/{} (Article Indexer)", env!("CARGO_PKG_VERSION"))
}

/// Default request timeout in seconds
pub fn default_fetch_timeout() -> u64 {
    30
}

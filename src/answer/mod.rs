//! Answer generation
//!
//! This module provides:
//! - A trait for answer models
//! - The Anthropic messages API backend
//! - Prompt construction from retrieved chunks

mod anthropic;

pub use anthropic::*;

use crate::error::Result;
use crate::store::SearchResult;
use async_trait::async_trait;
use std::collections::BTreeSet;

/// Trait for answer generation backends
#[async_trait]
pub trait AnswerModel: Send + Sync {
    /// Generate a completion for the given prompt
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Get the model name
    fn model_name(&self) -> &str;
}

/// Build the retrieval-augmented prompt: the retrieved excerpts, each
/// labeled with its source URL, followed by the question.
pub fn build_prompt(question: &str, excerpts: &[SearchResult]) -> String {
    let mut prompt = String::from(
        "You are a research assistant. Answer the question using only the \
         article excerpts below. If the excerpts do not contain enough \
         information, say so instead of guessing.\n",
    );

    for (i, excerpt) in excerpts.iter().enumerate() {
        prompt.push_str(&format!(
            "\nExcerpt {} (source: {}):\n{}\n",
            i + 1,
            excerpt.payload.source,
            excerpt.payload.text.trim()
        ));
    }

    prompt.push_str(&format!("\nQuestion: {}", question));
    prompt
}

/// Collect the deduplicated set of source URLs from retrieved excerpts
pub fn collect_sources(excerpts: &[SearchResult]) -> BTreeSet<String> {
    excerpts
        .iter()
        .map(|e| e.payload.source.clone())
        .filter(|s| !s.is_empty())
        .collect()
}

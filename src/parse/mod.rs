//! Document parsing and text extraction
//!
//! This module handles:
//! - HTML parsing and text extraction
//! - Plain text normalization
//! - Content type detection

mod html;

pub use html::*;

/// Content types we can parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Html,
    PlainText,
    Unknown,
}

impl ContentType {
    /// Detect content type from a MIME type
    pub fn from_mime(mime: &str) -> Self {
        let mime_lower = mime.to_lowercase();
        if mime_lower.contains("text/html") || mime_lower.contains("application/xhtml") {
            ContentType::Html
        } else if mime_lower.starts_with("text/") {
            ContentType::PlainText
        } else {
            ContentType::Unknown
        }
    }
}

/// Parsed document with extracted content
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    /// Extracted title (if found)
    pub title: Option<String>,

    /// Main text content
    pub text: String,

    /// Detected content type
    pub content_type: ContentType,
}

/// Parse plain text content
pub fn parse_plain_text(content: &str) -> ParsedDocument {
    let text = normalize_whitespace(content);

    // Use a short first line as the title
    let title = text.lines().next().and_then(|line| {
        let trimmed = line.trim();
        if !trimmed.is_empty() && trimmed.len() < 100 {
            Some(trimmed.to_string())
        } else {
            None
        }
    });

    ParsedDocument {
        title,
        text,
        content_type: ContentType::PlainText,
    }
}

/// Normalize whitespace: unify line endings, trim trailing spaces, and
/// collapse runs of blank lines so paragraph breaks stay meaningful.
pub fn normalize_whitespace(text: &str) -> String {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");

    let mut result = String::with_capacity(unified.len());
    let mut blank_run = 0usize;

    for line in unified.lines() {
        let trimmed = line.trim_end();
        if trimmed.is_empty() {
            blank_run += 1;
            continue;
        }
        if !result.is_empty() {
            if blank_run > 0 {
                result.push_str("\n\n");
            } else {
                result.push('\n');
            }
        }
        result.push_str(trimmed);
        blank_run = 0;
    }

    result.trim().to_string()
}

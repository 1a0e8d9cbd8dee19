//! HTML parsing and text extraction

use super::{normalize_whitespace, ContentType, ParsedDocument};
use crate::error::Result;
use scraper::{Html, Selector};

/// Parse HTML content and extract readable text
pub fn parse_html(content: &str) -> Result<ParsedDocument> {
    let document = Html::parse_document(content);

    let title = Selector::parse("title").ok().and_then(|selector| {
        document.select(&selector).next().and_then(|elem| {
            let text = elem.text().collect::<String>().trim().to_string();
            if text.is_empty() {
                None
            } else {
                Some(text)
            }
        })
    });

    // Prefer the body subtree so head metadata doesn't leak into the text
    let body = Selector::parse("body")
        .ok()
        .and_then(|s| document.select(&s).next())
        .map(|e| e.html())
        .unwrap_or_else(|| content.to_string());

    let text = html2text::from_read(body.as_bytes(), 80).unwrap_or_else(|_| body.clone());

    Ok(ParsedDocument {
        title,
        text: normalize_whitespace(&text),
        content_type: ContentType::Html,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_html_basic() {
        let html = r#"
        <!DOCTYPE html>
        <html>
        <head><title>Test Article</title></head>
        <body>
            <h1>Main Heading</h1>
            <p>Some paragraph text here.</p>
            <p>More text.</p>
        </body>
        </html>
        "#;

        let doc = parse_html(html).unwrap();

        assert_eq!(doc.title, Some("Test Article".to_string()));
        assert!(doc.text.contains("Main Heading"));
        assert!(doc.text.contains("paragraph text"));
        assert_eq!(doc.content_type, ContentType::Html);
    }

    #[test]
    fn test_parse_html_without_title() {
        let html = "<html><body><p>Hello <strong>world</strong>!</p></body></html>";
        let doc = parse_html(html).unwrap();
        assert_eq!(doc.title, None);
        assert!(doc.text.contains("Hello"));
        assert!(doc.text.contains("world"));
    }

    #[test]
    fn test_parse_html_skips_head_metadata() {
        let html = r#"
        <html>
        <head>
            <title>Page</title>
            <style>body { color: red; }</style>
        </head>
        <body><p>Visible content.</p></body>
        </html>
        "#;

        let doc = parse_html(html).unwrap();
        assert!(doc.text.contains("Visible content"));
        assert!(!doc.text.contains("color: red"));
    }
}

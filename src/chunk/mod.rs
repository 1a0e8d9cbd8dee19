//! Text chunking
//!
//! Splits article text into bounded, overlapping segments for embedding.
//! Break points are chosen in preference order: paragraph break, line
//! break, sentence-ending punctuation, word boundary, and only as a last
//! resort a raw character boundary. Chunking is deterministic: the same
//! text and configuration always produce the same chunks.

mod boundaries;

pub use boundaries::*;

use crate::config::ChunkConfig;
use crate::fetch::Article;
use blake3::Hasher;

/// A text chunk with source attribution
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    /// The chunk text
    pub text: String,

    /// URL of the article this chunk came from
    pub source: String,

    /// Title of the source article (if known)
    pub title: Option<String>,

    /// Chunk index within the article (0-based)
    pub index: usize,

    /// Blake3 hash identifying this chunk
    pub hash: String,
}

impl Chunk {
    /// Compute the hash for a chunk. The source URL and index participate
    /// so identical text in different positions still hashes uniquely.
    pub fn compute_hash(source: &str, index: usize, text: &str) -> String {
        let mut hasher = Hasher::new();
        hasher.update(source.as_bytes());
        hasher.update(&(index as u64).to_le_bytes());
        hasher.update(text.as_bytes());
        hasher.finalize().to_hex().to_string()
    }
}

/// Chunk a fetched article
pub fn chunk_article(article: &Article, config: &ChunkConfig) -> Vec<Chunk> {
    split_text(&article.text, config)
        .into_iter()
        .enumerate()
        .map(|(index, text)| {
            let hash = Chunk::compute_hash(&article.url, index, &text);
            Chunk {
                text,
                source: article.url.clone(),
                title: article.title.clone(),
                index,
                hash,
            }
        })
        .collect()
}

/// Split text into pieces of at most `max_chars` bytes with
/// `overlap_chars` of overlap between consecutive pieces.
pub fn split_text(text: &str, config: &ChunkConfig) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let break_points = find_break_points(text);

    let mut pieces = Vec::new();
    let mut current_start = 0usize;

    while current_start < text.len() {
        current_start = ensure_char_boundary(text, current_start);
        if current_start >= text.len() {
            break;
        }

        let target_end = current_start.saturating_add(config.max_chars);

        let chunk_end = if target_end >= text.len() {
            text.len()
        } else {
            find_best_break(text, current_start, target_end, &break_points)
        };
        let chunk_end = ensure_char_boundary(text, chunk_end);

        if chunk_end <= current_start {
            // Degenerate break; step one char forward to guarantee progress
            let mut next = current_start + 1;
            while next < text.len() && !text.is_char_boundary(next) {
                next += 1;
            }
            current_start = next;
            continue;
        }

        let piece = text[current_start..chunk_end].trim();
        if !piece.is_empty() {
            pieces.push(piece.to_string());
        }

        if chunk_end >= text.len() {
            break;
        }

        let overlap_start =
            ensure_char_boundary(text, chunk_end.saturating_sub(config.overlap_chars));
        current_start = if overlap_start > current_start {
            overlap_start
        } else {
            chunk_end
        };
    }

    pieces
}

/// Find the best break position in `(start, target_end]`. The search
/// window's lower bound is half a chunk so splits don't produce slivers.
fn find_best_break(
    text: &str,
    start: usize,
    target_end: usize,
    break_points: &[BreakPoint],
) -> usize {
    let max_chars = target_end - start;
    let min_pos = ensure_char_boundary(text, start + max_chars / 2);

    let best = break_points
        .iter()
        .filter(|p| p.position > min_pos && p.position <= target_end)
        .max_by_key(|p| (p.priority, p.position));

    if let Some(point) = best {
        return point.position;
    }

    // No separator in the window; fall back to the last word boundary
    let window_start = ensure_char_boundary(text, min_pos);
    let window_end = ensure_char_boundary(text, target_end);
    if window_start < window_end {
        if let Some((i, _)) = text[window_start..window_end].rmatch_indices(' ').next() {
            let pos = window_start + i + 1;
            if pos > start {
                return pos;
            }
        }
    }

    // Last resort: cut at the character boundary nearest the target
    ensure_char_boundary(text, target_end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> ChunkConfig {
        ChunkConfig {
            max_chars: 1000,
            overlap_chars: 200,
        }
    }

    fn make_article(text: &str) -> Article {
        Article {
            url: "https://example.com/a".to_string(),
            title: Some("Example".to_string()),
            text: text.to_string(),
        }
    }

    /// Length of the longest suffix of `a` that is a prefix of `b`
    fn shared_overlap(a: &str, b: &str) -> usize {
        let max = a.len().min(b.len());
        (1..=max)
            .rev()
            .find(|&n| a.is_char_boundary(a.len() - n) && b.is_char_boundary(n) && a[a.len() - n..] == b[..n])
            .unwrap_or(0)
    }

    #[test]
    fn test_empty_text_yields_no_chunks() {
        assert!(split_text("", &test_config()).is_empty());
    }

    #[test]
    fn test_short_text_single_chunk() {
        let pieces = split_text("Just one short paragraph.", &test_config());
        assert_eq!(pieces, vec!["Just one short paragraph.".to_string()]);
    }

    #[test]
    fn test_chunks_never_exceed_max_chars() {
        let text = "The quick brown fox jumps over the lazy dog. ".repeat(200);
        let config = test_config();
        let pieces = split_text(&text, &config);

        assert!(pieces.len() > 1);
        for piece in &pieces {
            assert!(piece.len() <= config.max_chars, "piece of {}", piece.len());
        }
    }

    #[test]
    fn test_consecutive_chunks_overlap_at_most_configured() {
        let text = "alpha beta gamma delta epsilon zeta eta theta ".repeat(100);
        let config = test_config();
        let pieces = split_text(&text, &config);

        assert!(pieces.len() > 1);
        for pair in pieces.windows(2) {
            let overlap = shared_overlap(&pair[0], &pair[1]);
            assert!(overlap <= config.overlap_chars, "overlap of {}", overlap);
        }
    }

    #[test]
    fn test_prefers_paragraph_break() {
        let text = format!("{}\n\n{}", "a".repeat(900), "b".repeat(500));
        let pieces = split_text(&text, &test_config());

        assert_eq!(pieces[0], "a".repeat(900));
        assert!(pieces[1].ends_with(&"b".repeat(500)));
    }

    #[test]
    fn test_prefers_sentence_over_word_break() {
        let words = "lorem ipsum dolor sit amet ".repeat(30);
        let text = format!("{}End of sentence. {}", words, "x".repeat(500));
        let pieces = split_text(&text, &test_config());

        assert!(pieces[0].ends_with("End of sentence."));
    }

    #[test]
    fn test_multibyte_text_no_panic() {
        let text = "día tras día, el régimen añade artículos. ".repeat(100);
        let config = test_config();
        let pieces = split_text(&text, &config);

        assert!(!pieces.is_empty());
        for piece in &pieces {
            assert!(piece.len() <= config.max_chars);
        }
    }

    #[test]
    fn test_unbroken_text_falls_back_to_char_boundary() {
        let text = "x".repeat(2500);
        let config = test_config();
        let pieces = split_text(&text, &config);

        assert!(pieces.len() >= 2);
        for piece in &pieces {
            assert!(piece.len() <= config.max_chars);
        }
    }

    #[test]
    fn test_chunk_article_retains_source() {
        let text = "Paragraph one.\n\nParagraph two. ".repeat(60);
        let article = make_article(&text);
        let chunks = chunk_article(&article, &test_config());

        assert!(chunks.len() > 1);
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.source, "https://example.com/a");
            assert_eq!(chunk.title.as_deref(), Some("Example"));
            assert_eq!(chunk.index, i);
        }
    }

    #[test]
    fn test_chunking_is_deterministic() {
        let text = "Sentence one. Sentence two.\n\nSentence three. ".repeat(50);
        let article = make_article(&text);
        let config = test_config();

        let a = chunk_article(&article, &config);
        let b = chunk_article(&article, &config);
        assert_eq!(a, b);
    }

    #[test]
    fn test_hash_distinguishes_position() {
        let h1 = Chunk::compute_hash("https://example.com/a", 0, "same text");
        let h2 = Chunk::compute_hash("https://example.com/a", 1, "same text");
        let h3 = Chunk::compute_hash("https://example.com/b", 0, "same text");

        assert_ne!(h1, h2);
        assert_ne!(h1, h3);
        assert_eq!(h1, Chunk::compute_hash("https://example.com/a", 0, "same text"));
    }
}

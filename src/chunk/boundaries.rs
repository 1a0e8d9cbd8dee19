//! Break point detection for chunking

/// Priority levels for break points
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BreakPriority {
    /// Word boundary (lowest)
    Word = 1,
    /// Sentence boundary (". ", "? ", "! ")
    Sentence = 2,
    /// Line break
    Line = 3,
    /// Paragraph break (highest)
    Paragraph = 4,
}

/// A potential break point in text
#[derive(Debug, Clone)]
pub struct BreakPoint {
    /// Byte position (always a char boundary)
    pub position: usize,
    /// Priority of this break point
    pub priority: BreakPriority,
}

/// Ensure a position is on a valid UTF-8 character boundary
pub fn ensure_char_boundary(text: &str, pos: usize) -> usize {
    if pos >= text.len() {
        return text.len();
    }
    if text.is_char_boundary(pos) {
        return pos;
    }
    let mut adjusted = pos;
    while adjusted > 0 && !text.is_char_boundary(adjusted) {
        adjusted -= 1;
    }
    adjusted
}

/// Find all candidate break points in the text, sorted by position.
/// When several separators end at the same position, the highest
/// priority wins.
pub fn find_break_points(text: &str) -> Vec<BreakPoint> {
    let mut points = Vec::new();

    // Paragraph breaks (blank lines)
    for (i, _) in text.match_indices("\n\n") {
        points.push(BreakPoint {
            position: i + 2,
            priority: BreakPriority::Paragraph,
        });
    }

    // Line breaks
    for (i, _) in text.match_indices('\n') {
        points.push(BreakPoint {
            position: i + 1,
            priority: BreakPriority::Line,
        });
    }

    // Sentence boundaries
    for sep in [". ", "? ", "! "] {
        for (i, _) in text.match_indices(sep) {
            points.push(BreakPoint {
                position: i + 2,
                priority: BreakPriority::Sentence,
            });
        }
    }

    points.sort_by(|a, b| {
        a.position
            .cmp(&b.position)
            .then(b.priority.cmp(&a.priority))
    });
    points.dedup_by_key(|p| p.position);

    points
}

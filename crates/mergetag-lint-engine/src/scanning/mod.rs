//! Directive scanning.
//!
//! Finds the delimiter pairs in one paragraph and reports the two
//! paragraph-level syntax errors: unmatched and nested delimiters. When a
//! paragraph has either error none of its directives are parsed.

pub mod cursor;
pub mod span;

pub use cursor::find_all;
pub use span::Span;

use crate::grammar::Delimiters;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ParagraphErrorKind {
    UnmatchedDelimiter,
    NestedDelimiters,
}

/// A syntax error that prevents a paragraph's directives from being parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParagraphError {
    pub kind: ParagraphErrorKind,
    pub message: String,
}

impl ParagraphError {
    fn unmatched(delimiters: &Delimiters) -> Self {
        Self {
            kind: ParagraphErrorKind::UnmatchedDelimiter,
            message: format!(
                "Unmatched {} or {} directive",
                delimiters.close, delimiters.open
            ),
        }
    }

    fn nested(delimiters: &Delimiters) -> Self {
        Self {
            kind: ParagraphErrorKind::NestedDelimiters,
            message: format!(
                "Nested {} or {} directives not allowed",
                delimiters.close, delimiters.open
            ),
        }
    }
}

/// The directives found in one paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Scan {
    /// One span per delimiter pair, left to right, delimiters included.
    pub spans: Vec<Span>,
    /// The paragraph's trimmed text is exactly one directive.
    pub solo: bool,
}

/// Scan one paragraph's text for directive spans.
///
/// The i-th open delimiter pairs with the i-th close delimiter. Unequal
/// counts, or a close that comes before its open, are unmatched; an open
/// that comes before the previous pair's close is nested.
pub fn scan_paragraph(text: &str, delimiters: &Delimiters) -> Result<Scan, ParagraphError> {
    let opens = find_all(text, &delimiters.open);
    let closes = find_all(text, &delimiters.close);

    if opens.len() != closes.len() {
        return Err(ParagraphError::unmatched(delimiters));
    }

    let mut spans = Vec::with_capacity(opens.len());
    for (i, (&open, &close)) in opens.iter().zip(&closes).enumerate() {
        if opens.get(i + 1).is_some_and(|&next| next < close) {
            return Err(ParagraphError::nested(delimiters));
        }
        if close < open {
            return Err(ParagraphError::unmatched(delimiters));
        }
        spans.push(Span::new(open, close + delimiters.close.len()));
    }

    let trimmed = text.trim();
    let lead = text.len() - text.trim_start().len();
    let solo = match spans.as_slice() {
        [only] => only.start == lead && only.end == lead + trimmed.len(),
        _ => false,
    };

    Ok(Scan { spans, solo })
}

//! Plain-text documents: one paragraph per line.
//!
//! A line starting with a bullet (`-`, `*`, `+`, `•`) or a number (`1.`,
//! `1)`) followed by whitespace is a list paragraph. The marker is removed
//! from its text, the way a word processor keeps list numbering out of the
//! paragraph itself.

use crate::linting::SourceParagraph;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn list_marker() -> &'static Regex {
    static LIST_MARKER: OnceLock<Regex> = OnceLock::new();
    LIST_MARKER.get_or_init(|| {
        Regex::new(r"^\s*(?:[-*+•]|[0-9]+[.)])\s+").expect("Invalid list marker regex")
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainParagraph {
    pub text: String,
    pub list_item: bool,
}

impl PlainParagraph {
    pub fn from_line(line: &str) -> Self {
        match list_marker().find(line) {
            Some(marker) => Self {
                text: line[marker.end()..].to_string(),
                list_item: true,
            },
            None => Self {
                text: line.to_string(),
                list_item: false,
            },
        }
    }
}

impl SourceParagraph for PlainParagraph {
    fn text(&self) -> &str {
        &self.text
    }

    fn is_list_item(&self) -> bool {
        self.list_item
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlainDocument {
    paragraphs: Vec<PlainParagraph>,
}

impl PlainDocument {
    /// Split text into paragraphs. Accepts `\n` and `\r\n` line endings and
    /// skips a leading byte order mark.
    pub fn parse(text: &str) -> Self {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        Self {
            paragraphs: text.lines().map(PlainParagraph::from_line).collect(),
        }
    }

    pub fn paragraphs(&self) -> &[PlainParagraph] {
        &self.paragraphs
    }

    pub fn len(&self) -> usize {
        self.paragraphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }
}

impl<'a> IntoIterator for &'a PlainDocument {
    type Item = &'a PlainParagraph;
    type IntoIter = std::slice::Iter<'a, PlainParagraph>;

    fn into_iter(self) -> Self::IntoIter {
        self.paragraphs.iter()
    }
}

/// Read a UTF-8 text file as a document.
pub fn read_document(path: &Path) -> Result<PlainDocument, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    Ok(PlainDocument::parse(&content))
}

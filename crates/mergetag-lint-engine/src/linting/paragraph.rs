use crate::scanning::ParagraphError;
use crate::tags::MergeTag;

/// How far a paragraph got through linting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphState {
    Unprocessed,
    Scanned,
    /// Unmatched or nested delimiters; no tags were parsed.
    ParagraphError,
    TagsParsed,
    /// At least one tag failed validation; link matching was skipped.
    TagErrors,
    InlineLinked,
    /// A solo link tag waiting for the paragraph-level pass.
    Deferred,
}

/// One linted paragraph and the tags it owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    /// Zero-based position in the document.
    pub index: usize,
    /// Tags left to right. Empty when `error` is set.
    pub tags: Vec<MergeTag>,
    pub error: Option<ParagraphError>,
    pub solo_tag: bool,
    pub needs_link: bool,
    pub state: ParagraphState,
}

impl Paragraph {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            tags: Vec::new(),
            error: None,
            solo_tag: false,
            needs_link: false,
            state: ParagraphState::Unprocessed,
        }
    }

    /// Tags that carry an error, in order.
    pub fn failed_tags(&self) -> impl Iterator<Item = &MergeTag> {
        self.tags.iter().filter(|t| t.has_error())
    }

    pub fn is_clean(&self) -> bool {
        self.error.is_none() && self.failed_tags().next().is_none()
    }
}

//! Merge tags: one parsed and validated directive each.

pub mod element;
mod validate;

pub use element::{Element, XmlError, parse_element};
pub use validate::parse_directive;

use crate::scanning::Span;
use serde::Serialize;
use std::collections::BTreeMap;

/// Identifies a tag by paragraph ordinal and position within the paragraph.
///
/// Matched tags refer to each other through ids, so a document's tags form
/// no ownership cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TagId {
    pub paragraph: usize,
    pub index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TagErrorKind {
    MissingSelfClosingTag,
    MalformedXml,
    UnrecognizedTagType,
    InvalidAttributes,
    InvalidXPath,
    RequiresListMembership,
    UnmatchedOpenTag,
    UnmatchedCloseTag,
}

/// The single error attached to a tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagError {
    pub kind: TagErrorKind,
    pub message: String,
    /// Low-level diagnostic from the XML, grammar or XPath check.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl TagError {
    fn new(kind: TagErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            raw: None,
        }
    }

    fn with_raw(mut self, raw: impl Into<String>) -> Self {
        self.raw = Some(raw.into());
        self
    }

    pub(crate) fn missing_self_closing() -> Self {
        Self::new(
            TagErrorKind::MissingSelfClosingTag,
            "Missing self-closing tag />",
        )
    }

    pub(crate) fn malformed(error: &XmlError) -> Self {
        Self::new(TagErrorKind::MalformedXml, "Malformed XML").with_raw(error.to_string())
    }

    pub(crate) fn unrecognized<'a>(
        tag_type: &str,
        known: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let known: Vec<&str> = known.into_iter().collect();
        Self::new(
            TagErrorKind::UnrecognizedTagType,
            format!("Unrecognized tag type: '{tag_type}'"),
        )
        .with_raw(format!(
            "Expecting element {}, got {tag_type}",
            known.join(" or ")
        ))
    }

    pub(crate) fn invalid_attributes(diagnostic: String) -> Self {
        Self::new(TagErrorKind::InvalidAttributes, "Invalid attributes").with_raw(diagnostic)
    }

    pub(crate) fn invalid_xpath(attribute: &str, error: &mergetag_lint_xpath::SyntaxError) -> Self {
        let message = match attribute {
            "Test" => "Test attribute must be valid XPath that returns true or false".to_string(),
            _ => format!("{attribute} attribute has invalid XPath"),
        };
        Self::new(TagErrorKind::InvalidXPath, message).with_raw(error.to_string())
    }

    pub(crate) fn requires_list(tag_type: &str) -> Self {
        Self::new(
            TagErrorKind::RequiresListMembership,
            format!("{tag_type} must appear in a bullet or ordered list item"),
        )
    }

    pub(crate) fn unmatched(kind: TagErrorKind, tag_type: &str, scope: &str) -> Self {
        Self::new(kind, format!("Unmatched {scope} {tag_type} tag"))
    }
}

/// One directive, parsed and checked against the grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeTag {
    pub id: TagId,
    /// Byte span in the paragraph, delimiters included.
    pub span: Span,
    /// The directive exactly as written.
    pub directive: String,
    /// Element name, absent when the directive is not a parseable element.
    pub tag_type: Option<String>,
    pub attributes: BTreeMap<String, String>,
    pub error: Option<TagError>,
    linked: Option<TagId>,
}

impl MergeTag {
    pub(crate) fn new(id: TagId, span: Span, directive: &str) -> Self {
        Self {
            id,
            span,
            directive: directive.to_string(),
            tag_type: None,
            attributes: BTreeMap::new(),
            error: None,
            linked: None,
        }
    }

    /// The matched counterpart of a link tag.
    pub fn linked(&self) -> Option<TagId> {
        self.linked
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Set once on match and never reassigned.
    pub(crate) fn link_to(&mut self, other: TagId) {
        debug_assert!(self.linked.is_none(), "tag {:?} linked twice", self.id);
        self.linked = Some(other);
    }
}

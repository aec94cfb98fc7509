//! Document linting: drives scanning, tag validation and link matching over
//! every paragraph and collects the findings.
//!
//! Each paragraph moves through
//!
//! ```text
//! Unprocessed -> Scanned -> ParagraphError
//!                        -> TagsParsed -> TagErrors
//!                                      -> InlineLinked
//!                                      -> Deferred
//! ```
//!
//! Deferred paragraphs hold one solo link tag. They are matched against each
//! other in document order once every paragraph has been processed.

mod paragraph;

pub use paragraph::{Paragraph, ParagraphState};

use crate::grammar::TagGrammar;
use crate::linking::{LinkScope, match_links};
use crate::report::LintReport;
use crate::scanning::scan_paragraph;
use crate::tags::{TagId, parse_directive};

/// A paragraph of the document being linted.
pub trait SourceParagraph {
    /// The paragraph's plain text.
    fn text(&self) -> &str;

    /// Whether the paragraph belongs to a bullet or numbered list.
    ///
    /// Only asked for tags that must appear in a list.
    fn is_list_item(&self) -> bool;
}

impl<T: SourceParagraph + ?Sized> SourceParagraph for &T {
    fn text(&self) -> &str {
        (**self).text()
    }

    fn is_list_item(&self) -> bool {
        (**self).is_list_item()
    }
}

/// Lints documents against one grammar.
#[derive(Debug, Clone, Copy)]
pub struct Linter<'g> {
    grammar: &'g TagGrammar,
}

impl<'g> Linter<'g> {
    pub fn new(grammar: &'g TagGrammar) -> Self {
        Self { grammar }
    }

    /// Lint a whole document and report every finding.
    pub fn lint<P: SourceParagraph>(&self, document: impl IntoIterator<Item = P>) -> LintReport {
        let paragraphs = self.process(document);
        LintReport::from_paragraphs(&paragraphs)
    }

    /// Run both passes and return the processed paragraphs.
    pub fn process<P: SourceParagraph>(
        &self,
        document: impl IntoIterator<Item = P>,
    ) -> Vec<Paragraph> {
        let mut paragraphs: Vec<Paragraph> = document
            .into_iter()
            .enumerate()
            .map(|(index, source)| self.process_paragraph(index, &source))
            .collect();

        let deferred = paragraphs
            .iter_mut()
            .filter(|p| p.state == ParagraphState::Deferred)
            .filter_map(|p| p.tags.first_mut());
        match_links(self.grammar, deferred, LinkScope::Paragraph);

        log::debug!("processed {} paragraphs", paragraphs.len());
        paragraphs
    }

    fn process_paragraph<P: SourceParagraph>(&self, index: usize, source: &P) -> Paragraph {
        let mut paragraph = Paragraph::new(index);
        let text = source.text();

        let scan = match scan_paragraph(text, self.grammar.delimiters()) {
            Ok(scan) => scan,
            Err(error) => {
                log::debug!("paragraph {index}: {}", error.message);
                paragraph.error = Some(error);
                paragraph.state = ParagraphState::ParagraphError;
                return paragraph;
            }
        };
        paragraph.solo_tag = scan.solo;
        paragraph.state = ParagraphState::Scanned;

        paragraph.tags = scan
            .spans
            .iter()
            .enumerate()
            .map(|(i, &span)| {
                let id = TagId {
                    paragraph: index,
                    index: i,
                };
                parse_directive(self.grammar, id, span, span.slice(text), || {
                    source.is_list_item()
                })
            })
            .collect();
        paragraph.state = ParagraphState::TagsParsed;

        // Link errors would only repeat what the tag errors already say
        if paragraph.tags.iter().any(|t| t.has_error()) {
            paragraph.state = ParagraphState::TagErrors;
            return paragraph;
        }

        let solo_link_tag = paragraph.solo_tag
            && paragraph
                .tags
                .first()
                .and_then(|t| t.tag_type.as_deref())
                .and_then(|t| self.grammar.link_member(t))
                .is_some();

        if solo_link_tag {
            paragraph.needs_link = true;
            paragraph.state = ParagraphState::Deferred;
        } else {
            match_links(self.grammar, paragraph.tags.iter_mut(), LinkScope::Inline);
            paragraph.state = ParagraphState::InlineLinked;
        }

        log::trace!(
            "paragraph {index}: {} tags, {:?}",
            paragraph.tags.len(),
            paragraph.state
        );
        paragraph
    }
}

/// Lint `document` against `grammar`.
pub fn lint<P: SourceParagraph>(
    grammar: &TagGrammar,
    document: impl IntoIterator<Item = P>,
) -> LintReport {
    Linter::new(grammar).lint(document)
}

//! The flat, ordered list of findings for one document.

use crate::linting::Paragraph;
use crate::scanning::ParagraphErrorKind;
use crate::tags::TagErrorKind;
use serde::Serialize;
use std::fmt;

/// Paragraph-level or tag-level error kind. Serializes as the bare variant
/// name, e.g. `"UnmatchedDelimiter"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum ErrorKind {
    Paragraph(ParagraphErrorKind),
    Tag(TagErrorKind),
}

impl From<ParagraphErrorKind> for ErrorKind {
    fn from(kind: ParagraphErrorKind) -> Self {
        ErrorKind::Paragraph(kind)
    }
}

impl From<TagErrorKind> for ErrorKind {
    fn from(kind: TagErrorKind) -> Self {
        ErrorKind::Tag(kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    /// Zero-based paragraph index.
    pub paragraph: usize,
    pub kind: ErrorKind,
    pub message: String,
    /// The offending directive; absent for paragraph-level errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directive: Option<String>,
    /// Low-level diagnostic, for debugging templates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl fmt::Display for ReportEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "paragraph {}: {}", self.paragraph, self.message)
    }
}

/// Findings in paragraph order, then left to right within a paragraph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LintReport {
    entries: Vec<ReportEntry>,
}

impl LintReport {
    /// Collect the findings of processed paragraphs.
    ///
    /// A paragraph-level error is the paragraph's only entry.
    pub fn from_paragraphs(paragraphs: &[Paragraph]) -> Self {
        let mut entries = Vec::new();
        for paragraph in paragraphs {
            if let Some(error) = &paragraph.error {
                entries.push(ReportEntry {
                    paragraph: paragraph.index,
                    kind: error.kind.into(),
                    message: error.message.clone(),
                    directive: None,
                    raw: None,
                });
                continue;
            }

            for tag in &paragraph.tags {
                if let Some(error) = &tag.error {
                    entries.push(ReportEntry {
                        paragraph: paragraph.index,
                        kind: error.kind.into(),
                        message: error.message.clone(),
                        directive: Some(tag.directive.clone()),
                        raw: error.raw.clone(),
                    });
                }
            }
        }
        Self { entries }
    }

    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ReportEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the document passed every check.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a LintReport {
    type Item = &'a ReportEntry;
    type IntoIter = std::slice::Iter<'a, ReportEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl fmt::Display for LintReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{entry}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::TagGrammar;
    use crate::linting::lint;
    use crate::tags::TagErrorKind;
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;

    struct Line(&'static str);

    impl crate::linting::SourceParagraph for Line {
        fn text(&self) -> &str {
            self.0
        }

        fn is_list_item(&self) -> bool {
            false
        }
    }

    fn report(lines: &[&'static str]) -> LintReport {
        let grammar = TagGrammar::builtin().unwrap();
        lint(&grammar, lines.iter().map(|&l| Line(l)))
    }

    #[test]
    fn renders_one_line_per_entry() {
        let report = report(&[
            "Dear <# <Content Select=\"//Name\" Optional=\"false\"/> #>,",
            "<# <Content Select=\"//Foo\" Match=\"\" /> #><# <Content Select=\"//Foo\" Bar=\"\" /> #>",
            "<# <# nested #> #>",
            "<# <Conditional Select=\"//Flag\" /> #>",
        ]);
        assert_snapshot!(report.to_string().trim_end(), @r"
        paragraph 1: Invalid attributes
        paragraph 1: Invalid attributes
        paragraph 2: Nested #> or <# directives not allowed
        paragraph 3: Unmatched paragraph-level Conditional tag
        ");
    }

    #[test]
    fn paragraph_error_is_the_only_entry() {
        let report = report(&["<# <Bad/> #> <# <Bad/>"]);
        assert_eq!(report.len(), 1);
        let entry = &report.entries()[0];
        assert_eq!(
            entry.kind,
            ErrorKind::Paragraph(ParagraphErrorKind::UnmatchedDelimiter)
        );
        assert_eq!(entry.directive, None);
    }

    #[test]
    fn tag_entries_carry_directive_and_raw_diagnostic() {
        let report = report(&["x <# <TableRow Select=\"//Foo\" /> #>"]);
        let entry = &report.entries()[0];
        assert_eq!(entry.kind, ErrorKind::from(TagErrorKind::InvalidAttributes));
        assert_eq!(
            entry.directive.as_deref(),
            Some("<# <TableRow Select=\"//Foo\" /> #>")
        );
        assert_eq!(
            entry.raw.as_deref(),
            Some("Element TableRow: missing required attribute 'Optional'")
        );
    }

    #[test]
    fn serializes_as_a_list() {
        let report = report(&["<# <Content/>"]);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{
                "paragraph": 0,
                "kind": "UnmatchedDelimiter",
                "message": "Unmatched #> or <# directive"
            }])
        );
    }

    #[test]
    fn clean_document_has_empty_report() {
        let report = report(&["Nothing to see here", ""]);
        assert!(report.is_empty());
        assert_eq!(report.to_string(), "");
    }
}

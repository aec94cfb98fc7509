//! Lints merge tag directives (`<# <Content Select="//Name" Optional="true"/> #>`)
//! in document paragraphs.
//!
//! ```
//! use mergetag_lint_engine::{PlainDocument, TagGrammar, lint};
//!
//! let grammar = TagGrammar::builtin().unwrap();
//! let document = PlainDocument::parse(concat!(
//!     "<# <Conditional Select=\"//IsMember\" /> #>\n",
//!     "Welcome back, <# <Content Select=\"//Name\" Optional=\"false\" /> #>!\n",
//! ));
//!
//! let report = lint(&grammar, &document);
//! assert_eq!(report.len(), 1);
//! assert_eq!(
//!     report.entries()[0].message,
//!     "Unmatched paragraph-level Conditional tag"
//! );
//! ```

pub mod grammar;
pub mod io;
pub mod linking;
pub mod linting;
pub mod report;
pub mod scanning;
pub mod tags;

// Re-export key types for easier usage
pub use grammar::{BUILTIN_GRAMMAR, GrammarError, TagGrammar};
pub use io::{IoError, PlainDocument, PlainParagraph, read_document};
pub use linting::{Linter, Paragraph, ParagraphState, SourceParagraph, lint};
pub use report::{ErrorKind, LintReport, ReportEntry};
pub use scanning::{ParagraphError, ParagraphErrorKind, Span};
pub use tags::{MergeTag, TagError, TagErrorKind, TagId};

//! # mergetag-lint-xpath
//!
//! A lossless XPath 1.0 syntax tree and syntax checker using [Rowan] +
//! [Logos], following the [rust-analyzer] architecture model.
//!
//! [Rowan]: https://docs.rs/rowan
//! [Logos]: https://docs.rs/logos
//! [rust-analyzer]: https://rust-analyzer.github.io/book/contributing/syntax.html
//!
//! Merge tags carry XPath expressions in their `Select` and `Test`
//! attributes. This crate answers one question about them: is the
//! expression syntactically valid XPath 1.0? It does not evaluate anything.
//!
//! ## Architecture Overview
//!
//! ```text
//! Source Text → Lexer → Tokens → Parser → Events → Sink → Rowan Tree
//!               (Logos)          (Grammar)        (GreenNodeBuilder)
//!                                   ↓
//!                             Vec<SyntaxError>
//! ```
//!
//! The parser never gives up: malformed input still produces a tree that
//! preserves every byte, and each problem is recorded as a [`SyntaxError`]
//! with a byte offset. An expression is valid exactly when that list is
//! empty.
//!
//! ## Module Structure
//!
//! ```text
//! mergetag-lint-xpath/
//! ├── lib.rs           # This file - public API
//! ├── syntax_kind.rs   # SyntaxKind enum (tokens + nodes) and Rowan integration
//! ├── lexer.rs         # Logos-based tokenizer
//! └── parser/
//!     ├── mod.rs       # Parser struct, Marker system, public parse() function
//!     ├── event.rs     # Event enum (Start, Token, Finish, Placeholder)
//!     ├── sink.rs      # Converts events to Rowan GreenNode
//!     └── grammar/
//!         ├── mod.rs   # Root expression
//!         ├── expr.rs  # Operators, primary expressions, function calls
//!         └── path.rs  # Location paths, steps, predicates
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use mergetag_lint_xpath::{check, parse, SyntaxKind};
//!
//! assert!(check("//Order[@status = 'open']").is_ok());
//! assert!(check(r"\badxpath").is_err());
//!
//! let parse = parse("count(//Line) > 0");
//! assert_eq!(parse.syntax().kind(), SyntaxKind::ROOT);
//! assert_eq!(parse.syntax().text().to_string(), "count(//Line) > 0");
//! ```

pub mod lexer;
pub mod parser;
pub mod syntax_kind;

pub use parser::{Parse, parse};
pub use syntax_kind::{SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken, XPathLang};

/// A syntax problem at a byte offset in the expression.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at offset {offset}")]
pub struct SyntaxError {
    pub message: String,
    pub offset: usize,
}

/// Check that `source` is a syntactically valid XPath 1.0 expression.
///
/// Returns the first syntax error otherwise.
pub fn check(source: &str) -> Result<(), SyntaxError> {
    parse(source).into_result().map(|_| ())
}

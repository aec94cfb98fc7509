//! Flat parse events, replayed by the [`Sink`](super::sink::Sink).
//!
//! The grammar never touches rowan directly. It appends events, and a
//! completed node can later gain a parent through `forward_parent`: in
//! `a or b` the path `a` is finished before `or` shows it is the left operand
//! of a BINARY_EXPR.
//!
//! ```text
//! Start(PREDICATE)
//!   Token(LBRACKET)
//!   Start(NUMBER_EXPR)
//!     Token(NUMBER)
//!   Finish
//!   Token(RBRACKET)
//! Finish
//! ```

use crate::syntax_kind::SyntaxKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Opens a node. `forward_parent` indexes the `Start` of the node that
    /// must enclose this one.
    Start {
        kind: SyntaxKind,
        forward_parent: Option<usize>,
    },

    /// One lexer token, trivia included.
    Token { kind: SyntaxKind },

    /// Closes the most recently opened node.
    Finish,

    /// Reserved by `Parser::start`; becomes a `Start` on completion and is
    /// skipped if the marker was abandoned.
    Placeholder,
}

impl Event {
    pub fn start(kind: SyntaxKind) -> Self {
        Event::Start {
            kind,
            forward_parent: None,
        }
    }

    pub fn token(kind: SyntaxKind) -> Self {
        Event::Token { kind }
    }
}

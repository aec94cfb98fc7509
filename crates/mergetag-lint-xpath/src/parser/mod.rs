//! # Parser - Event-Based Tree Construction
//!
//! This module implements the core parsing logic, transforming a token stream
//! into a syntax tree using the **event-based** architecture from rust-analyzer.
//!
//! The parser emits a flat list of **events** ([`Event`]) that describe the
//! tree structure. The [`Sink`] then builds the actual Rowan tree from events.
//!
//! ## Trivia
//!
//! Whitespace is insignificant in XPath. Lookahead (`current()`, `nth()`)
//! skips it, and `bump()` emits any pending whitespace before the token it
//! consumes, so the tree stays lossless without grammar rules ever seeing
//! trivia.
//!
//! ## Errors
//!
//! Grammar rules never fail. When input does not fit, they record a
//! [`SyntaxError`] with the byte offset of the offending token and keep
//! going, wrapping stray tokens in ERROR nodes. An expression is valid
//! exactly when no error was recorded.
//!
//! ## The Marker System
//!
//! When you call `parser.start()`, you get a [`Marker`]. This marker **must**
//! be either completed with `marker.complete(parser, KIND)` or abandoned with
//! `marker.abandon(parser)`. Dropping it otherwise panics.
//!
//! ```ignore
//! let m = parser.start();
//! parser.bump();
//! m.complete(parser, SyntaxKind::STEP);
//! ```
//!
//! `CompletedMarker::precede()` wraps an already-parsed node in a new parent,
//! which is how left-associative binary operators are built.
//!
//! ## Public API
//!
//! ```
//! use mergetag_lint_xpath::parse;
//!
//! let parse = parse("//Foo[@bar = 'baz']");
//! assert!(parse.errors().is_empty());
//! ```

pub mod event;
pub mod sink;

mod grammar;

use crate::SyntaxError;
use crate::lexer::{Token, lex};
use crate::syntax_kind::{SyntaxKind, SyntaxNode};
use event::Event;
use sink::Sink;

/// Deepest expression nesting accepted before parsing stops descending.
pub const MAX_DEPTH: usize = 128;

/// The parser state machine.
///
/// Holds the token stream, current position, accumulated events and errors.
/// Grammar functions receive `&mut Parser` and use its methods to:
///
/// - Inspect tokens: `current()`, `nth()`, `at()`, `at_name()`, `at_end()`
/// - Consume tokens: `bump()`, `eat()`, `expect()`
/// - Build structure: `start()` → `Marker` → `complete()`/`abandon()`
pub struct Parser<'t, 'input> {
    tokens: &'t [Token<'input>],
    /// Byte offset of each token, parallel to `tokens`.
    offsets: Vec<usize>,
    pos: usize,
    events: Vec<Event>,
    errors: Vec<SyntaxError>,
    depth: usize,
}

impl<'t, 'input> Parser<'t, 'input> {
    /// Create a new parser from a slice of tokens.
    pub fn new(tokens: &'t [Token<'input>]) -> Self {
        let offsets = tokens
            .iter()
            .scan(0, |offset, token| {
                let start = *offset;
                *offset += token.text.len();
                Some(start)
            })
            .collect();

        Self {
            tokens,
            offsets,
            pos: 0,
            events: Vec::new(),
            errors: Vec::new(),
            depth: 0,
        }
    }

    /// Parse the tokens and return the syntax tree with any errors.
    pub fn parse(mut self) -> (SyntaxNode, Vec<SyntaxError>) {
        grammar::root(&mut self);
        let sink = Sink::new(self.tokens, self.events);
        (sink.finish(), self.errors)
    }

    /// Start a new node and return a marker.
    ///
    /// Pending whitespace is emitted first so it belongs to the enclosing
    /// node. The root is started before any event exists and keeps its
    /// leading whitespace.
    pub fn start(&mut self) -> Marker {
        if !self.events.is_empty() {
            self.eat_trivia();
        }
        let pos = self.events.len();
        self.events.push(Event::Placeholder);
        Marker {
            pos,
            completed: false,
        }
    }

    /// Current significant token kind, or EOF if past end.
    pub fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    /// Look ahead n significant tokens.
    pub fn nth(&self, n: usize) -> SyntaxKind {
        self.nth_index(n)
            .map(|i| self.tokens[i].kind)
            .unwrap_or(SyntaxKind::EOF)
    }

    /// Text of the current significant token, or `""` at end.
    pub fn current_text(&self) -> &'input str {
        self.nth_index(0)
            .map(|i| self.tokens[i].text)
            .unwrap_or("")
    }

    /// Check if no significant tokens remain.
    pub fn at_end(&self) -> bool {
        self.nth_index(0).is_none()
    }

    /// Check if current token is of given kind.
    pub fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    /// Check if the current token is a NAME spelled `name`.
    ///
    /// Used for the operator names `and`, `or`, `div` and `mod`, which are
    /// ordinary names everywhere except operator position.
    pub fn at_name(&self, name: &str) -> bool {
        self.at(SyntaxKind::NAME) && self.current_text() == name
    }

    /// Consume the current token if it matches.
    pub fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume the current token if it matches, otherwise record an error.
    pub fn expect(&mut self, kind: SyntaxKind, what: &str) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(format!("expected {what}"));
            false
        }
    }

    /// Consume pending trivia and the current token.
    pub fn bump(&mut self) {
        self.eat_trivia();
        if self.pos < self.tokens.len() {
            let kind = self.tokens[self.pos].kind;
            self.events.push(Event::token(kind));
            self.pos += 1;
        }
    }

    /// Consume any whitespace at the current position.
    pub fn eat_trivia(&mut self) {
        while self.pos < self.tokens.len() && self.tokens[self.pos].kind.is_trivia() {
            self.events.push(Event::token(SyntaxKind::WHITESPACE));
            self.pos += 1;
        }
    }

    /// Record an error at the current significant token.
    pub fn error(&mut self, message: impl Into<String>) {
        let offset = match self.nth_index(0) {
            Some(i) => self.offsets[i],
            None => self
                .tokens
                .last()
                .zip(self.offsets.last())
                .map(|(token, start)| start + token.text.len())
                .unwrap_or(0),
        };
        self.errors.push(SyntaxError {
            message: message.into(),
            offset,
        });
    }

    /// Record an error and wrap the current token in an ERROR node.
    pub fn err_and_bump(&mut self, message: &str) {
        self.error(format!("{message} `{}`", self.current_text()));
        let m = self.start();
        self.bump();
        m.complete(self, SyntaxKind::ERROR);
    }

    /// Enter a nested expression.
    ///
    /// Returns false and records an error once nesting exceeds
    /// [`MAX_DEPTH`]; the caller must not descend and must not call
    /// [`Parser::leave`].
    pub fn enter(&mut self) -> bool {
        if self.depth >= MAX_DEPTH {
            self.error("expression nested too deeply");
            return false;
        }
        self.depth += 1;
        true
    }

    /// Leave a nested expression entered with [`Parser::enter`].
    pub fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn nth_index(&self, n: usize) -> Option<usize> {
        self.tokens
            .iter()
            .enumerate()
            .skip(self.pos)
            .filter(|(_, token)| !token.kind.is_trivia())
            .nth(n)
            .map(|(i, _)| i)
    }
}

/// A marker for a node being constructed.
///
/// When you call `parser.start()`, a `Placeholder` event is pushed and you
/// get a `Marker` pointing to it. Every marker must be either completed via
/// `marker.complete(parser, KIND)` or abandoned via `marker.abandon(parser)`;
/// dropping it otherwise panics.
#[must_use = "Markers must be completed or abandoned, dropping them is a bug"]
pub struct Marker {
    /// Position in the events vector where our Placeholder lives
    pos: usize,
    /// Tracks whether complete() or abandon() was called
    completed: bool,
}

impl Marker {
    /// Complete this marker, creating a node of the given kind.
    pub fn complete(mut self, p: &mut Parser<'_, '_>, kind: SyntaxKind) -> CompletedMarker {
        self.completed = true;
        let event_at_pos = &mut p.events[self.pos];
        assert!(matches!(event_at_pos, Event::Placeholder));
        *event_at_pos = Event::Start {
            kind,
            forward_parent: None,
        };
        p.events.push(Event::Finish);
        CompletedMarker { pos: self.pos }
    }

    /// Abandon this marker without creating a node.
    ///
    /// Only removes the placeholder if it's the last event; otherwise the
    /// placeholder becomes inert and is ignored by the Sink.
    pub fn abandon(mut self, p: &mut Parser<'_, '_>) {
        self.completed = true;
        if self.pos == p.events.len() - 1 {
            match p.events.pop() {
                Some(Event::Placeholder) => {}
                _ => unreachable!(),
            }
        }
    }
}

impl Drop for Marker {
    fn drop(&mut self) {
        if !self.completed && !std::thread::panicking() {
            panic!("Marker must be either completed or abandoned");
        }
    }
}

/// A marker for a node that has been completed.
///
/// `precede()` wraps the completed node in a new parent:
///
/// ```ignore
/// let lhs = path_expr(p);           // `a`
/// let m = lhs.precede(p);           // start BINARY_EXPR before `a`
/// p.bump();                         // `or`
/// path_expr(p);                     // `b`
/// m.complete(p, SyntaxKind::BINARY_EXPR);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CompletedMarker {
    /// Position of the Start event for this completed node
    pos: usize,
}

impl CompletedMarker {
    /// Create a new parent node that will contain this node.
    pub fn precede(self, p: &mut Parser<'_, '_>) -> Marker {
        let new_pos = p.events.len();
        p.events.push(Event::Placeholder);

        if let Event::Start { forward_parent, .. } = &mut p.events[self.pos] {
            *forward_parent = Some(new_pos);
        }

        Marker {
            pos: new_pos,
            completed: false,
        }
    }
}

/// Result of parsing one XPath expression.
#[derive(Debug, Clone)]
pub struct Parse {
    tree: SyntaxNode,
    errors: Vec<SyntaxError>,
}

impl Parse {
    /// The lossless syntax tree, built even for invalid input.
    pub fn syntax(&self) -> &SyntaxNode {
        &self.tree
    }

    /// Syntax errors in source order of discovery.
    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    /// Convert into a `Result`, keeping the first error.
    pub fn into_result(self) -> Result<SyntaxNode, SyntaxError> {
        match self.errors.into_iter().next() {
            Some(error) => Err(error),
            None => Ok(self.tree),
        }
    }
}

/// Parse an XPath expression into a syntax tree.
pub fn parse(source: &str) -> Parse {
    let tokens = lex(source);
    let parser = Parser::new(&tokens);
    let (tree, errors) = parser.parse();
    Parse { tree, errors }
}

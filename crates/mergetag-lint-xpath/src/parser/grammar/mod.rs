//! # Grammar Rules
//!
//! This module contains the grammar rules that drive parsing. Each function
//! takes a `&mut Parser` and uses its methods to:
//!
//! 1. Inspect the current token (`p.current()`, `p.at()`, `p.nth()`)
//! 2. Consume tokens (`p.bump()`, `p.eat()`, `p.expect()`)
//! 3. Build tree structure (`p.start()` → marker → `complete()`/`abandon()`)
//!
//! ## Module Structure
//!
//! - [`expr`] - Operator precedence, primary expressions, function calls
//! - [`path`] - Location paths, steps, axes, node tests, predicates
//!
//! ## Error Recovery
//!
//! Rules record an error and carry on rather than returning early, so every
//! input produces a complete tree. Tokens that no rule can place are wrapped
//! in ERROR nodes by [`root`].

mod expr;
mod path;

use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;

/// Parse the root expression.
///
/// An XPath attribute holds exactly one `Expr`; anything after it is an
/// error.
pub fn root(p: &mut Parser<'_, '_>) {
    let m = p.start();

    if p.at_end() {
        p.error("expected an expression");
    } else {
        expr::expr(p);
    }

    while !p.at_end() {
        p.err_and_bump("unexpected token");
    }
    p.eat_trivia();

    m.complete(p, SyntaxKind::ROOT);
}

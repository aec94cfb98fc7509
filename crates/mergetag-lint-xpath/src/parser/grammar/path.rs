//! # Location Paths
//!
//! ```text
//! LocationPath ::= '/' RelativeLocationPath?
//!                | '//' RelativeLocationPath
//!                | RelativeLocationPath
//! RelativeLocationPath ::= Step (('/' | '//') Step)*
//! Step ::= (AxisName '::' | '@')? NodeTest Predicate* | '.' | '..'
//! ```
//!
//! Abbreviated steps (`.` and `..`) take no predicates in XPath 1.0.

use super::expr;
use crate::parser::{CompletedMarker, Parser};
use crate::syntax_kind::SyntaxKind;

const NODE_TYPES: [&str; 4] = ["comment", "text", "processing-instruction", "node"];

const AXES: [&str; 13] = [
    "ancestor",
    "ancestor-or-self",
    "attribute",
    "child",
    "descendant",
    "descendant-or-self",
    "following",
    "following-sibling",
    "namespace",
    "parent",
    "preceding",
    "preceding-sibling",
    "self",
];

pub(super) fn is_node_type(name: &str) -> bool {
    NODE_TYPES.contains(&name)
}

pub(super) fn starts_location_path(kind: SyntaxKind) -> bool {
    kind == SyntaxKind::SLASH || kind == SyntaxKind::DOUBLE_SLASH || starts_step(kind)
}

fn starts_step(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::DOT | SyntaxKind::DOT2 | SyntaxKind::AT | SyntaxKind::STAR | SyntaxKind::NAME
    )
}

pub(super) fn location_path(p: &mut Parser<'_, '_>) -> CompletedMarker {
    let m = p.start();

    if p.eat(SyntaxKind::SLASH) {
        // A lone `/` selects the root node
        if starts_step(p.current()) {
            relative_location_path(p);
        }
    } else {
        p.eat(SyntaxKind::DOUBLE_SLASH);
        relative_location_path(p);
    }

    m.complete(p, SyntaxKind::LOCATION_PATH)
}

pub(super) fn relative_location_path(p: &mut Parser<'_, '_>) {
    step(p);
    while p.at(SyntaxKind::SLASH) || p.at(SyntaxKind::DOUBLE_SLASH) {
        p.bump();
        step(p);
    }
}

fn step(p: &mut Parser<'_, '_>) {
    let m = p.start();

    if p.at(SyntaxKind::DOT) || p.at(SyntaxKind::DOT2) {
        p.bump();
    } else {
        axis(p);
        node_test(p);
        while p.at(SyntaxKind::LBRACKET) {
            predicate(p);
        }
    }

    m.complete(p, SyntaxKind::STEP);
}

fn axis(p: &mut Parser<'_, '_>) {
    if p.at(SyntaxKind::AT) {
        let m = p.start();
        p.bump();
        m.complete(p, SyntaxKind::AXIS);
    } else if p.at(SyntaxKind::NAME) && p.nth(1) == SyntaxKind::COLON2 {
        let name = p.current_text();
        if !AXES.contains(&name) {
            p.error(format!("unknown axis `{name}`"));
        }
        let m = p.start();
        p.bump();
        p.bump();
        m.complete(p, SyntaxKind::AXIS);
    }
}

fn node_test(p: &mut Parser<'_, '_>) {
    let m = p.start();

    match p.current() {
        SyntaxKind::STAR => p.bump(),
        SyntaxKind::NAME if p.nth(1) == SyntaxKind::COLON && p.nth(2) == SyntaxKind::STAR => {
            p.bump();
            p.bump();
            p.bump();
        }
        SyntaxKind::NAME if p.nth(1) == SyntaxKind::LPAREN => {
            let name = p.current_text();
            if is_node_type(name) {
                p.bump();
                p.bump();
                if name == "processing-instruction" {
                    p.eat(SyntaxKind::LITERAL);
                }
                p.expect(SyntaxKind::RPAREN, "`)`");
            } else {
                p.error(format!("function `{name}` cannot be used as a location step"));
                p.bump();
                expr::arg_list(p);
            }
        }
        SyntaxKind::NAME => p.bump(),
        _ => {
            p.error("expected a node test");
            m.abandon(p);
            return;
        }
    }

    m.complete(p, SyntaxKind::NODE_TEST);
}

pub(super) fn predicate(p: &mut Parser<'_, '_>) {
    let m = p.start();
    p.bump();
    expr::expr(p);
    p.expect(SyntaxKind::RBRACKET, "`]`");
    m.complete(p, SyntaxKind::PREDICATE);
}

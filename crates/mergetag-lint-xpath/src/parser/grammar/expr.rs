//! # Expressions
//!
//! XPath 1.0 operators, loosest first:
//!
//! | binding power | operators |
//! |---|---|
//! | 1 | `or` |
//! | 2 | `and` |
//! | 3 | `=` `!=` |
//! | 4 | `<` `<=` `>` `>=` |
//! | 5 | `+` `-` |
//! | 6 | `*` `div` `mod` |
//! | 7 | unary `-` |
//! | 8 | `\|` |
//!
//! All binary operators are left-associative. Union binds tighter than unary
//! minus, so `-a|b` is `-(a|b)`, and a union operand may not itself start
//! with `-`.
//!
//! `*`, `and`, `or`, `div` and `mod` are only operators when they appear
//! where an operator is expected, i.e. straight after a complete operand.

use super::path;
use crate::parser::{CompletedMarker, Parser};
use crate::syntax_kind::SyntaxKind;

const UNARY_BP: u8 = 7;

/// Parse a full expression.
pub(super) fn expr(p: &mut Parser<'_, '_>) {
    expr_bp(p, 1);
}

// Every nested construct (parentheses, unary minus, predicates, arguments)
// comes back through here, so this is where depth is bounded.
fn expr_bp(p: &mut Parser<'_, '_>, min_bp: u8) -> Option<CompletedMarker> {
    if !p.enter() {
        return None;
    }
    let lhs = operand_chain(p, min_bp);
    p.leave();
    lhs
}

fn operand_chain(p: &mut Parser<'_, '_>, min_bp: u8) -> Option<CompletedMarker> {
    let mut lhs = unary_or_path(p, min_bp)?;

    while let Some(bp) = infix_binding_power(p) {
        if bp < min_bp {
            break;
        }
        let m = lhs.precede(p);
        p.bump();
        expr_bp(p, bp + 1);
        lhs = m.complete(p, SyntaxKind::BINARY_EXPR);
    }

    Some(lhs)
}

fn infix_binding_power(p: &Parser<'_, '_>) -> Option<u8> {
    let bp = match p.current() {
        SyntaxKind::NAME if p.at_name("or") => 1,
        SyntaxKind::NAME if p.at_name("and") => 2,
        SyntaxKind::EQ | SyntaxKind::NEQ => 3,
        SyntaxKind::LT | SyntaxKind::LTEQ | SyntaxKind::GT | SyntaxKind::GTEQ => 4,
        SyntaxKind::PLUS | SyntaxKind::MINUS => 5,
        SyntaxKind::STAR => 6,
        SyntaxKind::NAME if p.at_name("div") || p.at_name("mod") => 6,
        SyntaxKind::PIPE => 8,
        _ => return None,
    };
    Some(bp)
}

fn unary_or_path(p: &mut Parser<'_, '_>, min_bp: u8) -> Option<CompletedMarker> {
    if p.at(SyntaxKind::MINUS) {
        if min_bp > UNARY_BP {
            p.error("unary minus is not allowed in a union operand");
        }
        let m = p.start();
        p.bump();
        expr_bp(p, UNARY_BP);
        return Some(m.complete(p, SyntaxKind::UNARY_EXPR));
    }
    path_expr(p)
}

/// `PathExpr ::= LocationPath | FilterExpr (('/' | '//') RelativeLocationPath)?`
fn path_expr(p: &mut Parser<'_, '_>) -> Option<CompletedMarker> {
    match p.current() {
        SyntaxKind::DOLLAR | SyntaxKind::LPAREN | SyntaxKind::LITERAL | SyntaxKind::NUMBER => {
            Some(filter_path(p))
        }
        // `name(` is a function call unless the name is a node type
        SyntaxKind::NAME
            if p.nth(1) == SyntaxKind::LPAREN && !path::is_node_type(p.current_text()) =>
        {
            Some(filter_path(p))
        }
        kind if path::starts_location_path(kind) => Some(path::location_path(p)),
        _ => {
            p.error("expected an expression");
            None
        }
    }
}

fn filter_path(p: &mut Parser<'_, '_>) -> CompletedMarker {
    let mut lhs = primary(p);

    if p.at(SyntaxKind::LBRACKET) {
        let m = lhs.precede(p);
        while p.at(SyntaxKind::LBRACKET) {
            path::predicate(p);
        }
        lhs = m.complete(p, SyntaxKind::FILTER_EXPR);
    }

    if p.at(SyntaxKind::SLASH) || p.at(SyntaxKind::DOUBLE_SLASH) {
        let m = lhs.precede(p);
        p.bump();
        path::relative_location_path(p);
        lhs = m.complete(p, SyntaxKind::PATH_EXPR);
    }

    lhs
}

fn primary(p: &mut Parser<'_, '_>) -> CompletedMarker {
    let m = p.start();
    match p.current() {
        SyntaxKind::DOLLAR => {
            p.bump();
            p.expect(SyntaxKind::NAME, "a variable name after `$`");
            m.complete(p, SyntaxKind::VARIABLE_REF)
        }
        SyntaxKind::LPAREN => {
            p.bump();
            expr(p);
            p.expect(SyntaxKind::RPAREN, "`)`");
            m.complete(p, SyntaxKind::PAREN_EXPR)
        }
        SyntaxKind::LITERAL => {
            p.bump();
            m.complete(p, SyntaxKind::LITERAL_EXPR)
        }
        SyntaxKind::NUMBER => {
            p.bump();
            m.complete(p, SyntaxKind::NUMBER_EXPR)
        }
        _ => {
            // Function names are not resolved here; unknown functions only
            // fail when the expression is evaluated.
            p.bump();
            arg_list(p);
            m.complete(p, SyntaxKind::FUNCTION_CALL)
        }
    }
}

pub(super) fn arg_list(p: &mut Parser<'_, '_>) {
    let m = p.start();
    p.expect(SyntaxKind::LPAREN, "`(`");
    if !p.at(SyntaxKind::RPAREN) && !p.at_end() {
        expr(p);
        while p.eat(SyntaxKind::COMMA) {
            expr(p);
        }
    }
    p.expect(SyntaxKind::RPAREN, "`)`");
    m.complete(p, SyntaxKind::ARG_LIST);
}

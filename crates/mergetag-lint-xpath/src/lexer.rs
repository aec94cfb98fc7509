//! # Lexer - Tokenizing XPath Source
//!
//! This module provides the first stage of parsing: breaking an XPath
//! expression into tokens using the [Logos] lexer generator.
//!
//! [Logos]: https://docs.rs/logos
//!
//! ## The Lossless Guarantee
//!
//! Every byte in the input appears in exactly one token. Characters that
//! cannot start an XPath token become [`SyntaxKind::UNKNOWN`] tokens rather
//! than being dropped, so the parser can report them with a position:
//!
//! ```
//! use mergetag_lint_xpath::lexer::lex;
//!
//! let input = "//Foo[@id = 'a']";
//! let tokens = lex(input);
//!
//! let reconstructed: String = tokens.iter().map(|t| t.text).collect();
//! assert_eq!(input, reconstructed);
//! ```
//!
//! ## Context-Free Tokens
//!
//! XPath 1.0 resolves two ambiguities by looking at the *preceding* token:
//! whether `*` is a wildcard or the multiply operator, and whether `and`,
//! `or`, `div`, `mod` are names or operators. The lexer does not attempt
//! this. It emits `STAR` and `NAME`, and the grammar decides from its
//! position (operand vs. operator slot), which is equivalent.
//!
//! Qualified names such as `xs:string` are lexed as a single `NAME`. The
//! `prefix:*` wildcard lexes as `NAME COLON STAR`, and axis separators as
//! `NAME COLON2`.

use logos::Logos;

use crate::syntax_kind::SyntaxKind;

/// Token kinds produced by the Logos lexer.
///
/// This enum exists separately from [`SyntaxKind`] because Logos needs to
/// derive on it. Each variant maps to a corresponding `SyntaxKind` token.
///
/// [`SyntaxKind`]: crate::syntax_kind::SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[token("/")]
    Slash,

    #[token("//")]
    DoubleSlash,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("@")]
    At,

    #[token(",")]
    Comma,

    #[token(":")]
    Colon,

    #[token("::")]
    Colon2,

    #[token(".")]
    Dot,

    #[token("..")]
    Dot2,

    #[token("|")]
    Pipe,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("=")]
    Eq,

    #[token("!=")]
    Neq,

    #[token("<")]
    Lt,

    #[token("<=")]
    LtEq,

    #[token(">")]
    Gt,

    #[token(">=")]
    GtEq,

    #[token("$")]
    Dollar,

    /// `"..."` or `'...'`; XPath 1.0 has no escape sequences inside literals.
    #[regex(r#""[^"]*""#)]
    #[regex(r"'[^']*'")]
    Literal,

    /// `Digits ('.' Digits?)?` or `'.' Digits`
    #[regex(r"[0-9]+(\.[0-9]*)?")]
    #[regex(r"\.[0-9]+")]
    Number,

    /// NCName, optionally prefixed (`prefix:local`).
    #[regex(
        r"([A-Za-z_]|[^\x00-\x7F])([A-Za-z0-9_.\-]|[^\x00-\x7F])*(:([A-Za-z_]|[^\x00-\x7F])([A-Za-z0-9_.\-]|[^\x00-\x7F])*)?"
    )]
    Name,
}

impl TokenKind {
    /// Convert to SyntaxKind.
    pub fn to_syntax_kind(self) -> SyntaxKind {
        match self {
            TokenKind::Whitespace => SyntaxKind::WHITESPACE,
            TokenKind::Slash => SyntaxKind::SLASH,
            TokenKind::DoubleSlash => SyntaxKind::DOUBLE_SLASH,
            TokenKind::LBracket => SyntaxKind::LBRACKET,
            TokenKind::RBracket => SyntaxKind::RBRACKET,
            TokenKind::LParen => SyntaxKind::LPAREN,
            TokenKind::RParen => SyntaxKind::RPAREN,
            TokenKind::At => SyntaxKind::AT,
            TokenKind::Comma => SyntaxKind::COMMA,
            TokenKind::Colon => SyntaxKind::COLON,
            TokenKind::Colon2 => SyntaxKind::COLON2,
            TokenKind::Dot => SyntaxKind::DOT,
            TokenKind::Dot2 => SyntaxKind::DOT2,
            TokenKind::Pipe => SyntaxKind::PIPE,
            TokenKind::Plus => SyntaxKind::PLUS,
            TokenKind::Minus => SyntaxKind::MINUS,
            TokenKind::Star => SyntaxKind::STAR,
            TokenKind::Eq => SyntaxKind::EQ,
            TokenKind::Neq => SyntaxKind::NEQ,
            TokenKind::Lt => SyntaxKind::LT,
            TokenKind::LtEq => SyntaxKind::LTEQ,
            TokenKind::Gt => SyntaxKind::GT,
            TokenKind::GtEq => SyntaxKind::GTEQ,
            TokenKind::Dollar => SyntaxKind::DOLLAR,
            TokenKind::Literal => SyntaxKind::LITERAL,
            TokenKind::Number => SyntaxKind::NUMBER,
            TokenKind::Name => SyntaxKind::NAME,
        }
    }
}

/// A lexed token with its kind and text slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
}

/// Lex the input into a sequence of tokens.
///
/// Guarantees that all bytes from the input appear in the output tokens.
pub fn lex(input: &str) -> Vec<Token<'_>> {
    lex_with_spans(input)
        .into_iter()
        .map(|(token, _)| token)
        .collect()
}

/// Lex and return tokens along with their byte spans.
pub fn lex_with_spans(input: &str) -> Vec<(Token<'_>, std::ops::Range<usize>)> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(input);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let text = lexer.slice();
        let kind = match result {
            Ok(token_kind) => token_kind.to_syntax_kind(),
            // Unrecognized character; the parser reports it
            Err(()) => SyntaxKind::UNKNOWN,
        };
        tokens.push((Token { kind, text }, span));
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn token(kind: SyntaxKind, text: &str) -> Token<'_> {
        Token { kind, text }
    }

    #[test]
    fn lex_empty_input() {
        assert_eq!(lex(""), vec![]);
    }

    #[test]
    fn lex_absolute_descendant_path() {
        assert_eq!(
            lex("//Foo"),
            vec![
                token(SyntaxKind::DOUBLE_SLASH, "//"),
                token(SyntaxKind::NAME, "Foo"),
            ]
        );
    }

    #[test]
    fn lex_qualified_name_is_one_token() {
        assert_eq!(lex("xs:string"), vec![token(SyntaxKind::NAME, "xs:string")]);
    }

    #[test]
    fn lex_axis_separator() {
        assert_eq!(
            lex("child::node"),
            vec![
                token(SyntaxKind::NAME, "child"),
                token(SyntaxKind::COLON2, "::"),
                token(SyntaxKind::NAME, "node"),
            ]
        );
    }

    #[test]
    fn lex_prefix_wildcard() {
        assert_eq!(
            lex("ns:*"),
            vec![
                token(SyntaxKind::NAME, "ns"),
                token(SyntaxKind::COLON, ":"),
                token(SyntaxKind::STAR, "*"),
            ]
        );
    }

    #[test]
    fn lex_hyphenated_names() {
        assert_eq!(
            lex("following-sibling"),
            vec![token(SyntaxKind::NAME, "following-sibling")]
        );
    }

    #[test]
    fn lex_numbers_and_dots() {
        assert_eq!(
            lex(". .. .5 3.14"),
            vec![
                token(SyntaxKind::DOT, "."),
                token(SyntaxKind::WHITESPACE, " "),
                token(SyntaxKind::DOT2, ".."),
                token(SyntaxKind::WHITESPACE, " "),
                token(SyntaxKind::NUMBER, ".5"),
                token(SyntaxKind::WHITESPACE, " "),
                token(SyntaxKind::NUMBER, "3.14"),
            ]
        );
    }

    #[test]
    fn lex_comparison_operators() {
        assert_eq!(
            lex("<=>=!="),
            vec![
                token(SyntaxKind::LTEQ, "<="),
                token(SyntaxKind::GTEQ, ">="),
                token(SyntaxKind::NEQ, "!="),
            ]
        );
    }

    #[test]
    fn lex_literals_with_either_quote() {
        assert_eq!(
            lex(r#"'it"s' "it's""#),
            vec![
                token(SyntaxKind::LITERAL, r#"'it"s'"#),
                token(SyntaxKind::WHITESPACE, " "),
                token(SyntaxKind::LITERAL, r#""it's""#),
            ]
        );
    }

    #[test]
    fn lex_backslash_is_unknown() {
        let tokens = lex(r"\badxpath");
        assert_eq!(tokens[0], token(SyntaxKind::UNKNOWN, r"\"));
        assert_eq!(tokens[1], token(SyntaxKind::NAME, "badxpath"));
    }

    #[test]
    fn all_bytes_preserved() {
        let input = "count(//Order[@status != 'open']) > 2 and $limit";
        let tokens = lex(input);
        let reconstructed: String = tokens.iter().map(|t| t.text).collect();
        assert_eq!(input, reconstructed);
    }

    #[test]
    fn spans_are_correct() {
        let input = "/a/b[1]";
        let tokens = lex_with_spans(input);
        for (token, span) in &tokens {
            assert_eq!(token.text, &input[span.clone()]);
        }
    }
}

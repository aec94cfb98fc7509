//! SyntaxKind enum for all tokens and nodes in the XPath CST.
//!
//! Following the rust-analyzer model, all tokens and nodes share a single enum.
//! Every byte in the source must appear as a token in the tree.

/// All syntax kinds for the XPath CST.
///
/// This enum represents both tokens (lexer output) and composite nodes (parser output).
/// The `repr(u16)` ensures efficient storage in rowan's green tree.
///
/// We use SCREAMING_CASE following the rust-analyzer convention for SyntaxKind.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // === Tokens (lexer output) ===
    /// Spaces, tabs and line breaks
    WHITESPACE,
    /// `/`
    SLASH,
    /// `//`
    DOUBLE_SLASH,
    /// `[`
    LBRACKET,
    /// `]`
    RBRACKET,
    /// `(`
    LPAREN,
    /// `)`
    RPAREN,
    /// `@` abbreviated attribute axis
    AT,
    /// `,` between function arguments
    COMMA,
    /// `:` in `prefix:*` name tests
    COLON,
    /// `::` after an axis name
    COLON2,
    /// `.` abbreviated self step
    DOT,
    /// `..` abbreviated parent step
    DOT2,
    /// `|` union operator
    PIPE,
    /// `+`
    PLUS,
    /// `-`
    MINUS,
    /// `*` as multiply operator or wildcard name test
    STAR,
    /// `=`
    EQ,
    /// `!=`
    NEQ,
    /// `<`
    LT,
    /// `<=`
    LTEQ,
    /// `>`
    GT,
    /// `>=`
    GTEQ,
    /// `$` introducing a variable reference
    DOLLAR,
    /// Quoted string literal
    LITERAL,
    /// Numeric literal
    NUMBER,
    /// NCName or QName (also operator names such as `and`, `div`)
    NAME,
    /// A character that cannot start any XPath token
    UNKNOWN,
    /// End of file marker
    EOF,

    // === Composite Nodes (parser output) ===
    /// Root expression node
    ROOT,
    /// Binary operator expression (`or`, `and`, comparisons, arithmetic, union)
    BINARY_EXPR,
    /// Unary minus
    UNARY_EXPR,
    /// Parenthesized expression
    PAREN_EXPR,
    /// String literal expression
    LITERAL_EXPR,
    /// Number literal expression
    NUMBER_EXPR,
    /// `$name`
    VARIABLE_REF,
    /// `name(args)`
    FUNCTION_CALL,
    /// Parenthesized, comma separated function arguments
    ARG_LIST,
    /// Primary expression followed by predicates
    FILTER_EXPR,
    /// Filter expression followed by a relative location path
    PATH_EXPR,
    /// Absolute or relative location path
    LOCATION_PATH,
    /// One location step
    STEP,
    /// `axis::` or `@`
    AXIS,
    /// Name test or node-type test
    NODE_TEST,
    /// `[expr]`
    PREDICATE,

    /// Error recovery node
    ERROR,
}

impl SyntaxKind {
    /// Returns true if this kind represents a token (lexer output).
    pub fn is_token(self) -> bool {
        (self as u16) <= (Self::EOF as u16)
    }

    /// Returns true if this kind represents a composite node.
    pub fn is_node(self) -> bool {
        !self.is_token()
    }

    /// Returns true if this kind is trivia (whitespace).
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// Language definition for rowan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum XPathLang {}

impl rowan::Language for XPathLang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 <= SyntaxKind::ERROR as u16);
        // SAFETY: We check bounds above and SyntaxKind is repr(u16)
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type alias for our syntax nodes.
pub type SyntaxNode = rowan::SyntaxNode<XPathLang>;
/// Type alias for our syntax tokens.
pub type SyntaxToken = rowan::SyntaxToken<XPathLang>;
/// Type alias for syntax elements (node or token).
pub type SyntaxElement = rowan::SyntaxElement<XPathLang>;

#[cfg(test)]
mod tests {
    use super::*;
    use rowan::Language;

    #[test]
    fn token_kinds_are_tokens() {
        assert!(SyntaxKind::WHITESPACE.is_token());
        assert!(SyntaxKind::NAME.is_token());
        assert!(SyntaxKind::EOF.is_token());
    }

    #[test]
    fn node_kinds_are_nodes() {
        assert!(SyntaxKind::ROOT.is_node());
        assert!(SyntaxKind::STEP.is_node());
        assert!(SyntaxKind::ERROR.is_node());
    }

    #[test]
    fn trivia_detection() {
        assert!(SyntaxKind::WHITESPACE.is_trivia());
        assert!(!SyntaxKind::NAME.is_trivia());
    }

    #[test]
    fn rowan_conversion_roundtrip() {
        let kind = SyntaxKind::LOCATION_PATH;
        let raw: rowan::SyntaxKind = kind.into();
        let back = XPathLang::kind_from_raw(raw);
        assert_eq!(kind, back);
    }
}

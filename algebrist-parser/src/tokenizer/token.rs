use logos::Logos;
use std::ops::Range;

/// Kinds of token in a query.
///
/// Comparison operators, pipes and separators are tokenized even though the expression parser
/// never accepts them, so that a stray `>=` or `|` is reported at its exact position.
#[derive(Logos, Clone, Copy, Debug, PartialEq)]
pub enum TokenKind {
    #[regex(r"[\n\r]+")]
    NewLine,
    #[regex(r"[ \t]+")]
    Whitespace,

    // arithmetic
    #[token("+")]
    Add,
    #[token("-")]
    Sub,
    #[token("*")]
    Mul,
    #[token("/")]
    Div,
    #[token("^")]
    Exp,

    // relations
    #[token(">")]
    Greater,
    #[token(">=")]
    GreaterEq,
    #[token("<")]
    Less,
    #[token("<=")]
    LessEq,
    #[token("=")]
    Eq,
    #[token("|")]
    Pipe,

    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,

    /// A run of ASCII letters. `xy` is one name here; the symbolic engine reads it as `x·y`.
    #[regex(r"[a-zA-Z]+")]
    Name,
    #[regex(r"[0-9]+")]
    Int,
    /// A decimal, with or without a leading zero: `0.5` or `.5`.
    #[regex(r"[0-9]*\.[0-9]+")]
    Float,

    /// Anything else, one character at a time.
    #[regex(r".", priority = 0)]
    Symbol,
}

impl TokenKind {
    pub fn is_whitespace(self) -> bool {
        matches!(self, Self::Whitespace | Self::NewLine)
    }
}

/// A token, with its position in the query and the text it covers.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'source> {
    pub span: Range<usize>,
    pub kind: TokenKind,
    pub lexeme: &'source str,
}

impl Token<'_> {
    pub fn is_whitespace(&self) -> bool {
        self.kind.is_whitespace()
    }
}

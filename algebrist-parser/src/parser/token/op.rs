//! Operator tokens, with the precedence and associativity used to build the expression tree.

use crate::{
    parser::{error::{kind, Error}, Associativity, Parse, Parser, Precedence},
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A prefix operator. Negation is the only one.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnaryOpKind {
    Neg,
}

/// A prefix operator and where it was found.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UnaryOp {
    pub kind: UnaryOpKind,
    pub span: Range<usize>,
}

impl UnaryOp {
    /// Negation binds tighter than `*` and `/`, but looser than `^`, so `-x^2` is `-(x^2)`.
    pub fn precedence(&self) -> Precedence {
        Precedence::Neg
    }
}

impl Parse for UnaryOp {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.next_token()?;
        if token.kind != TokenKind::Sub {
            return Err(Error::new(vec![token.span], kind::UnexpectedToken {
                expected: &[TokenKind::Sub],
                found: token.kind,
            }));
        }

        Ok(Self { kind: UnaryOpKind::Neg, span: token.span })
    }
}

/// An infix arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BinOpKind {
    Exp,
    Mul,
    Div,
    Add,
    Sub,
}

impl BinOpKind {
    /// The tokens that spell an infix operator.
    const TOKENS: &'static [TokenKind] = &[
        TokenKind::Exp,
        TokenKind::Mul,
        TokenKind::Div,
        TokenKind::Add,
        TokenKind::Sub,
    ];

    fn from_token(kind: TokenKind) -> Option<Self> {
        Some(match kind {
            TokenKind::Exp => Self::Exp,
            TokenKind::Mul => Self::Mul,
            TokenKind::Div => Self::Div,
            TokenKind::Add => Self::Add,
            TokenKind::Sub => Self::Sub,
            _ => return None,
        })
    }

    pub fn precedence(&self) -> Precedence {
        match self {
            Self::Exp => Precedence::Exp,
            Self::Mul | Self::Div => Precedence::Factor,
            Self::Add | Self::Sub => Precedence::Term,
        }
    }

    /// `^` groups to the right, so `2^3^2` is `2^(3^2)`. Everything else groups to the left.
    pub fn associativity(&self) -> Associativity {
        if *self == Self::Exp {
            Associativity::Right
        } else {
            Associativity::Left
        }
    }
}

impl fmt::Display for BinOpKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let symbol = match self {
            Self::Exp => "^",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Add => "+",
            Self::Sub => "-",
        };
        write!(f, "{}", symbol)
    }
}

/// An infix operator and where it was found.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BinOp {
    pub kind: BinOpKind,

    /// True for the multiplication the parser inserts between juxtaposed factors, as in `3x`. The
    /// span of an implicit operator is empty.
    pub implicit: bool,

    pub span: Range<usize>,
}

impl BinOp {
    pub fn precedence(&self) -> Precedence {
        self.kind.precedence()
    }

    pub fn associativity(&self) -> Associativity {
        self.kind.associativity()
    }
}

impl Parse for BinOp {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.next_token()?;
        let kind = BinOpKind::from_token(token.kind).ok_or_else(|| {
            Error::new(vec![token.span.clone()], kind::UnexpectedToken {
                expected: BinOpKind::TOKENS,
                found: token.kind,
            })
        })?;

        Ok(Self { kind, implicit: false, span: token.span })
    }
}

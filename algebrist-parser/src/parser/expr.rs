use crate::parser::{
    binary::Binary,
    error::{kind, Error},
    literal::Literal,
    paren::Paren,
    token::CloseParen,
    unary::Unary,
    Parse,
    Parser,
    Precedence,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An arithmetic expression over numbers and variables.
///
/// Comparison operators and absolute value bars are never part of an expression. Queries that
/// contain them are split into expressions before they reach the parser.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    Literal(Literal),
    Paren(Paren),
    Unary(Unary),
    Binary(Binary),
}

impl Expr {
    pub fn span(&self) -> Range<usize> {
        match self {
            Self::Literal(literal) => literal.span(),
            Self::Paren(paren) => paren.span.clone(),
            Self::Unary(unary) => unary.span(),
            Self::Binary(binary) => binary.span(),
        }
    }
}

impl Parse for Expr {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        // a `)` where an operand should start can only be a stray one
        if let Ok(close) = input.try_parse::<CloseParen>() {
            return Err(Error::new_fatal(vec![close.span], kind::UnclosedParenthesis {
                opening: false,
            }));
        }

        let lhs = Unary::parse_or_lower(input)?;
        Binary::parse_expr(input, lhs, Precedence::Any).map(|(expr, _)| expr)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Literal(literal) => literal.fmt(f),
            Self::Paren(paren) => paren.fmt(f),
            Self::Unary(unary) => unary.fmt(f),
            Self::Binary(binary) => binary.fmt(f),
        }
    }
}

/// The operand of a unary or binary operator: a literal or a parenthesized expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Primary {
    Literal(Literal),
    Paren(Paren),
}

impl Parse for Primary {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        // a parenthesis error is fatal and must not be masked by the literal error
        match input.try_parse::<Paren>() {
            Ok(paren) => Ok(Self::Paren(paren)),
            Err(err) if err.fatal => Err(err),
            Err(_) => input.try_parse::<Literal>().map(Self::Literal),
        }
    }
}

impl From<Primary> for Expr {
    fn from(primary: Primary) -> Self {
        match primary {
            Primary::Literal(literal) => Self::Literal(literal),
            Primary::Paren(paren) => Self::Paren(paren),
        }
    }
}

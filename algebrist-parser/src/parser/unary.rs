use crate::parser::{
    binary::Binary,
    error::Error,
    expr::{Expr, Primary},
    token::op::UnaryOp,
    Parser,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A negated expression, such as `-x`.
///
/// There is no [`Parse`](crate::parser::Parse) implementation; [`Unary::parse_or_lower`] parses a
/// negation or, failing that, a bare operand.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Unary {
    pub operand: Box<Expr>,
    pub op: UnaryOp,
    pub span: Range<usize>,
}

impl Unary {
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// The operand extends only as far as operators that bind tighter than negation, so `-x^2` is
    /// `-(x^2)` while `-2x` is `(-2)x`.
    fn parse_negation(input: &mut Parser) -> Result<Self, Error> {
        let op = input.try_parse::<UnaryOp>()?;
        let lhs = Unary::parse_or_lower(input)?;
        let (operand, _) = Binary::parse_expr(input, lhs, op.precedence())?;

        let span = op.span.start..operand.span().end;
        Ok(Self { operand: Box::new(operand), op, span })
    }

    /// Parses a negation, or the operand of one.
    pub fn parse_or_lower(input: &mut Parser) -> Result<Expr, Error> {
        match input.try_parse_with_fn(Self::parse_negation) {
            Ok(unary) => Ok(Expr::Unary(unary)),
            Err(err) if err.fatal => Err(err),
            Err(_) => input.try_parse::<Primary>().map(Into::into),
        }
    }
}

impl fmt::Display for Unary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "-{}", self.operand)
    }
}

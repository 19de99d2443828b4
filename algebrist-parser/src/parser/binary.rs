use crate::parser::{
    error::{kind::NonFatal, Error},
    expr::{Expr, Primary},
    literal::Literal,
    token::op::{BinOp, BinOpKind},
    unary::Unary,
    Associativity,
    Parser,
    Precedence,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Two operands joined by an infix operator, such as `1 + 2` or the implicit product `2x`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Binary {
    pub lhs: Box<Expr>,
    pub op: BinOp,
    pub rhs: Box<Expr>,
    pub span: Range<usize>,
}

impl Binary {
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// The operator inserted between juxtaposed factors. Its span is filled in once both operands
    /// are known.
    fn implicit_mul() -> BinOp {
        BinOp { kind: BinOpKind::Mul, implicit: true, span: 0..0 }
    }

    /// Given `lhs op rhs`, keeps extending `rhs` while the operators after it bind tighter than
    /// `op`, then joins the three.
    ///
    /// In `1 + 2 * 3`, `*` binds tighter than `+`, so `2 * 3` becomes the right operand. In
    /// `1 + 2x`, the missing operator after `2` is an implicit `*`, so `2x` does. Since the implicit
    /// operator consumes no token, the loop stops as soon as [`Self::parse_expr`] leaves `rhs`
    /// unchanged.
    fn complete_rhs(input: &mut Parser, lhs: Expr, mut op: BinOp, mut rhs: Expr) -> Result<Expr, Error> {
        let precedence = op.precedence();

        loop {
            // parse on a copy to peek at the next operator
            let mut input_ahead = input.clone();
            match input_ahead.try_parse::<BinOp>() {
                Ok(next) if next.precedence() > precedence || next.associativity() == Associativity::Right => {
                    rhs = Self::parse_expr(input, rhs, next.precedence())?.0;
                },
                // equal or looser binding: the caller picks the operator up
                Ok(_) => break,
                Err(_) if precedence >= Precedence::Factor => break,
                Err(_) => {
                    let (expr, changed) = Self::parse_expr(input, rhs, Precedence::Factor)?;
                    rhs = expr;
                    if !changed {
                        break;
                    }
                },
            }
        }

        if op.implicit {
            op.span = lhs.span().end..rhs.span().start;
        }
        let span = lhs.span().start..rhs.span().end;
        Ok(Expr::Binary(Binary { lhs: Box::new(lhs), op, rhs: Box::new(rhs), span }))
    }

    /// Given an already parsed `lhs`, appends every operator and operand that binds at least as
    /// tightly as `precedence`.
    ///
    /// The returned boolean is `true` if anything was appended to `lhs`.
    pub fn parse_expr(input: &mut Parser, mut lhs: Expr, precedence: Precedence) -> Result<(Expr, bool), Error> {
        let mut changed = false;
        loop {
            let mut input_ahead = input.clone();
            let explicit = input_ahead.try_parse_then::<BinOp, _>(|op, input| {
                if op.precedence() >= precedence {
                    Ok(())
                } else {
                    Err(input.error(NonFatal))
                }
            });

            if let Ok(op) = explicit {
                input.set_cursor(&input_ahead);
                let rhs = Unary::parse_or_lower(input)?;
                lhs = Self::complete_rhs(input, lhs, op, rhs)?;
            } else if precedence <= Precedence::Factor {
                // an operator that binds too loosely ends the expression; only a missing operator
                // means implicit multiplication
                if input_ahead.try_parse::<BinOp>().is_ok() {
                    break;
                }

                let rhs = match input_ahead.try_parse::<Primary>() {
                    Ok(rhs) => rhs,
                    Err(err) if err.fatal => return Err(err),
                    Err(_) => break,
                };

                input.set_cursor(&input_ahead);
                lhs = Self::complete_rhs(input, lhs, Self::implicit_mul(), rhs.into())?;
            } else {
                break;
            }

            changed = true;
        }

        Ok((lhs, changed))
    }
}

impl fmt::Display for Binary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.lhs.fmt(f)?;
        if !self.op.implicit {
            write!(f, " {} ", self.op.kind)?;
        } else if matches!(*self.rhs, Expr::Literal(Literal::Number(_))) {
            // `2 3` would read as one number
            write!(f, "*")?;
        }
        self.rhs.fmt(f)
    }
}

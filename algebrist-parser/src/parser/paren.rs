use crate::parser::{
    error::{kind, Error},
    expr::Expr,
    token::{CloseParen, OpenParen},
    Parse,
    Parser,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An expression in parentheses, such as the `(x - 2)` of `(x - 2)(x - 3)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Paren {
    pub expr: Box<Expr>,

    /// Covers both parentheses.
    pub span: Range<usize>,
}

impl Parse for Paren {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let open = input.try_parse::<OpenParen>()?;
        let unclosed = || Error::new_fatal(
            vec![open.span.clone()],
            kind::UnclosedParenthesis { opening: true },
        );

        if let Ok(close) = input.try_parse::<CloseParen>() {
            return Err(Error::new_fatal(vec![open.span.start..close.span.end], kind::EmptyParenthesis));
        }

        // a fatal error inside says more than "unclosed" would
        let expr = input.try_parse::<Expr>()
            .map_err(|err| if err.fatal { err } else { unclosed() })?;
        let close = input.try_parse::<CloseParen>().map_err(|_| unclosed())?;

        Ok(Self {
            expr: Box::new(expr),
            span: open.span.start..close.span.end,
        })
    }
}

impl fmt::Display for Paren {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({})", self.expr)
    }
}

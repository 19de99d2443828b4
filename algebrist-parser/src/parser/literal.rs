use crate::{
    parser::{
        error::{kind, Error},
        token::{Float, Int, Name},
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A number, such as `16` or `0.25`. The digits are kept as written, so the symbolic engine can
/// read them as an exact fraction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitNum {
    pub value: String,
    pub span: Range<usize>,
}

impl Parse for LitNum {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let (value, span) = match input.try_parse::<Float>() {
            Ok(float) => (float.lexeme, float.span),
            Err(_) => input.try_parse::<Int>().map(|int| (int.lexeme, int.span))?,
        };
        Ok(Self { value, span })
    }
}

/// A name, such as `x`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitSym {
    pub name: String,
    pub span: Range<usize>,
}

impl Parse for LitSym {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let name = input.try_parse::<Name>()?;
        Ok(Self { name: name.lexeme, span: name.span })
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Literal {
    Number(LitNum),
    Symbol(LitSym),
}

impl Literal {
    pub fn span(&self) -> Range<usize> {
        match self {
            Self::Number(num) => num.span.clone(),
            Self::Symbol(sym) => sym.span.clone(),
        }
    }
}

impl Parse for Literal {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        if let Ok(num) = input.try_parse::<LitNum>() {
            return Ok(Self::Number(num));
        }
        if let Ok(sym) = input.try_parse::<LitSym>() {
            return Ok(Self::Symbol(sym));
        }

        // report the offending token instead of the failure of the last alternative
        let token = input.next_token()?;
        Err(Error::new(vec![token.span], kind::UnexpectedToken {
            expected: &[TokenKind::Int, TokenKind::Float, TokenKind::Name],
            found: token.kind,
        }))
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Number(num) => write!(f, "{}", num.value),
            Self::Symbol(sym) => write!(f, "{}", sym.name),
        }
    }
}

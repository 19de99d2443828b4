pub mod binary;
pub mod error;
pub mod expr;
pub mod literal;
pub mod paren;
pub mod token;
pub mod unary;

use algebrist_error::ErrorKind;
use error::{Error, kind};
use super::tokenizer::{tokenize_complete, Token};
use std::ops::Range;

/// A backtracking parser over the tokens of one expression.
///
/// Every `try_parse*` method either consumes the tokens of what it parsed, or leaves the cursor
/// where it was. Cloning the parser is how it peeks ahead: parse on the clone, then
/// [`Parser::set_cursor`] to commit.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    tokens: Box<[Token<'source>]>,

    /// Index of the next token to be parsed.
    cursor: usize,
}

impl<'source> Parser<'source> {
    pub fn new(source: &'source str) -> Self {
        Self { tokens: tokenize_complete(source), cursor: 0 }
    }

    /// Commits the tokens consumed by a clone of this parser.
    pub fn set_cursor(&mut self, other: &Parser) {
        self.cursor = other.cursor;
    }

    /// Creates a non-fatal error at the current token.
    pub fn error(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// An empty span just past the last token.
    pub fn eof_span(&self) -> Range<usize> {
        let end = self.tokens.last().map_or(0, |token| token.span.end);
        end..end
    }

    /// The span of the current token, or [`Parser::eof_span`] past the end.
    pub fn span(&self) -> Range<usize> {
        self.tokens.get(self.cursor).map_or_else(|| self.eof_span(), |token| token.span.clone())
    }

    fn skip_whitespace(&mut self) {
        while self.tokens.get(self.cursor).is_some_and(Token::is_whitespace) {
            self.cursor += 1;
        }
    }

    /// Consumes the next token that is not whitespace.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        self.skip_whitespace();
        let token = self.tokens.get(self.cursor).cloned()
            .ok_or_else(|| self.error(kind::UnexpectedEof))?;
        self.cursor += 1;
        Ok(token)
    }

    /// Parses a `T`, restoring the cursor on failure.
    pub fn try_parse<T: Parse>(&mut self) -> Result<T, Error> {
        self.try_parse_with_fn(T::parse)
    }

    /// Runs `f`, restoring the cursor if it fails.
    pub fn try_parse_with_fn<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Parser<'source>) -> Result<T, Error>,
    {
        let start = self.cursor;
        let result = f(self);
        if result.is_err() {
            self.cursor = start;
        }
        result
    }

    /// Parses a `T` that must also satisfy `predicate`, restoring the cursor if either fails.
    pub fn try_parse_then<T: Parse, F>(&mut self, predicate: F) -> Result<T, Error>
    where
        F: FnOnce(&T, &Parser) -> Result<(), Error>,
    {
        self.try_parse_with_fn(|input| {
            let value = T::parse(input)?;
            predicate(&value, input)?;
            Ok(value)
        })
    }

    /// Parses a `T` that covers the whole input, trailing whitespace aside.
    pub fn try_parse_full<T: Parse>(&mut self) -> Result<T, Error> {
        let value = T::parse(self)?;
        self.skip_whitespace();
        if self.cursor == self.tokens.len() {
            Ok(value)
        } else {
            Err(Error::new(vec![self.span().start..self.eof_span().end], kind::ExpectedEof))
        }
    }
}

/// A syntax node that can be parsed from tokens.
pub trait Parse: Sized {
    /// Parses the node, consuming its tokens. Use [`Parser::try_parse`] to backtrack on failure.
    fn parse(input: &mut Parser) -> Result<Self, Error>;
}

/// How a chain of operators of equal precedence groups.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Associativity {
    /// `a op b op c` is `(a op b) op c`.
    Left,

    /// `a op b op c` is `a op (b op c)`.
    Right,
}

/// The precedence of an operation, in order from lowest precedence (evaluated last) to highest
/// precedence (evaluated first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// Any precedence.
    Any,

    /// Precedence of addition (`+`) and subtraction (`-`), which separate terms.
    Term,

    /// Precedence of multiplication (`*`) and division (`/`), which separate factors. Implicit
    /// multiplication shares this precedence.
    Factor,

    /// Precedence of unary subtraction (`-`).
    Neg,

    /// Precedence of exponentiation (`^`).
    Exp,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    use binary::Binary;
    use expr::Expr;
    use literal::{Literal, LitNum, LitSym};
    use paren::Paren;
    use token::op::{BinOp, BinOpKind, UnaryOp, UnaryOpKind};
    use unary::Unary;

    fn num(value: &str, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Number(LitNum { value: value.to_string(), span }))
    }

    fn sym(name: &str, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Symbol(LitSym { name: name.to_string(), span }))
    }

    fn bin(lhs: Expr, kind: BinOpKind, implicit: bool, op_span: Range<usize>, rhs: Expr) -> Expr {
        let span = lhs.span().start..rhs.span().end;
        Expr::Binary(Binary {
            lhs: Box::new(lhs),
            op: BinOp { kind, implicit, span: op_span },
            rhs: Box::new(rhs),
            span,
        })
    }

    #[test]
    fn literal_int() {
        let mut parser = Parser::new("16");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, num("16", 0..2));
    }

    #[test]
    fn literal_float() {
        let mut parser = Parser::new("3.14");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, num("3.14", 0..4));
    }

    #[test]
    fn trailing_whitespace() {
        let mut parser = Parser::new("  x  ");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, sym("x", 2..3));
    }

    #[test]
    fn binary_precedence() {
        let mut parser = Parser::new("1 + 2 * 3");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, bin(
            num("1", 0..1),
            BinOpKind::Add,
            false,
            2..3,
            bin(num("2", 4..5), BinOpKind::Mul, false, 6..7, num("3", 8..9)),
        ));
    }

    #[test]
    fn binary_left_associativity() {
        let mut parser = Parser::new("1 - 2 - 3");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, bin(
            bin(num("1", 0..1), BinOpKind::Sub, false, 2..3, num("2", 4..5)),
            BinOpKind::Sub,
            false,
            6..7,
            num("3", 8..9),
        ));
    }

    #[test]
    fn exponent_right_associativity() {
        let mut parser = Parser::new("2^3^2");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, bin(
            num("2", 0..1),
            BinOpKind::Exp,
            false,
            1..2,
            bin(num("3", 2..3), BinOpKind::Exp, false, 3..4, num("2", 4..5)),
        ));
    }

    #[test]
    fn implicit_multiplication_binds_below_exponent() {
        let mut parser = Parser::new("3x^2");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, bin(
            num("3", 0..1),
            BinOpKind::Mul,
            true,
            1..1,
            bin(sym("x", 1..2), BinOpKind::Exp, false, 2..3, num("2", 3..4)),
        ));
    }

    #[test]
    fn implicit_multiplication_with_parenthesis() {
        let mut parser = Parser::new("3(x+2)");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, bin(
            num("3", 0..1),
            BinOpKind::Mul,
            true,
            1..1,
            Expr::Paren(Paren {
                expr: Box::new(bin(sym("x", 2..3), BinOpKind::Add, false, 3..4, num("2", 4..5))),
                span: 1..6,
            }),
        ));
    }

    #[test]
    fn implicit_multiplication_then_sum() {
        let mut parser = Parser::new("2x+3y");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, bin(
            bin(num("2", 0..1), BinOpKind::Mul, true, 1..1, sym("x", 1..2)),
            BinOpKind::Add,
            false,
            2..3,
            bin(num("3", 3..4), BinOpKind::Mul, true, 4..4, sym("y", 4..5)),
        ));
    }

    #[test]
    fn unary_negation_binds_below_exponent() {
        let mut parser = Parser::new("-x^2");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Unary(Unary {
            operand: Box::new(bin(sym("x", 1..2), BinOpKind::Exp, false, 2..3, num("2", 3..4))),
            op: UnaryOp { kind: UnaryOpKind::Neg, span: 0..1 },
            span: 0..4,
        }));
    }

    #[test]
    fn unclosed_parenthesis() {
        let mut parser = Parser::new("(x + 1");
        let err = parser.try_parse_full::<Expr>().unwrap_err();
        assert!(err.is::<kind::UnclosedParenthesis>());
        assert_eq!(err.spans, vec![0..1]);
    }

    #[test]
    fn stray_closing_parenthesis() {
        let mut parser = Parser::new("x + 1)");
        let err = parser.try_parse_full::<Expr>().unwrap_err();
        assert!(err.is::<kind::ExpectedEof>());
        assert_eq!(err.spans, vec![5..6]);
    }

    #[test]
    fn empty_parenthesis() {
        let mut parser = Parser::new("2()");
        let err = parser.try_parse_full::<Expr>().unwrap_err();
        assert!(err.is::<kind::EmptyParenthesis>());
    }

    #[test]
    fn comparison_is_not_an_expression() {
        let mut parser = Parser::new("x >= 2");
        let err = parser.try_parse_full::<Expr>().unwrap_err();
        assert!(err.is::<kind::ExpectedEof>());
        assert_eq!(err.spans, vec![2..6]);
    }

    #[test]
    fn dangling_operator() {
        let mut parser = Parser::new("x +");
        assert!(parser.try_parse_full::<Expr>().is_err());
    }

    #[test]
    fn display_spells_out_operators() {
        let mut parser = Parser::new("2x+3(x-1)^2 - -y");
        let expr = parser.try_parse_full::<Expr>().unwrap();
        assert_eq!(expr.to_string(), "2x + 3(x - 1) ^ 2 - -y");

        let mut parser = Parser::new("(2)3");
        let expr = parser.try_parse_full::<Expr>().unwrap();
        assert_eq!(expr.to_string(), "(2)*3");
    }
}

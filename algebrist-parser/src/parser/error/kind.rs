use algebrist_attrs::ErrorKind;
use algebrist_error::EXPR;
use ariadne::Fmt;
use crate::tokenizer::TokenKind;

/// Placeholder for a failed speculative parse. Callers try the next alternative on this error, so
/// it should never reach a user.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "internal parser error",
    labels = ["here"],
    help = "this is a bug in the parser",
)]
pub struct NonFatal;

#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "the expression ends too early",
    labels = [format!("a {} is missing here", "term".fg(EXPR))],
)]
pub struct UnexpectedEof;

/// The expression parsed, but text was left after it.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected text after the expression",
    labels = [format!("this is not part of the {}", "expression".fg(EXPR))],
    help = "only numbers, variables, `+ - * / ^` and parentheses are understood",
)]
pub struct ExpectedEof;

#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unexpected {:?}", found),
    labels = [format!(
        "expected {}",
        expected.iter().map(|t| format!("{:?}", t)).collect::<Vec<_>>().join(" or "),
    )],
)]
pub struct UnexpectedToken {
    pub expected: &'static [TokenKind],
    pub found: TokenKind,
}

/// A parenthesis without its partner. `opening` is true for a lone `(`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unbalanced parentheses",
    labels = ["this parenthesis has no partner"],
    help = if *opening {
        "add a `)` after it"
    } else {
        "add a `(` before it"
    },
)]
pub struct UnclosedParenthesis {
    pub opening: bool,
}

#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "empty parentheses",
    labels = ["put an expression here"],
)]
pub struct EmptyParenthesis;

//! Errors produced by the symbolic engine.

use algebrist_attrs::ErrorKind;
use algebrist_error::EXPR;
use ariadne::Fmt;

/// A number literal could not be converted to an exact value.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("invalid number literal `{}`", literal),
    labels = ["this number"],
)]
pub struct InvalidNumber {
    /// The literal as it appears in the source.
    pub literal: String,
}

/// The derivative of the expression cannot be computed symbolically.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot differentiate `{}` with respect to `{}`", expr, var),
    labels = ["this expression"],
    help = format!("only powers with an exponent free of {} are supported", var.fg(EXPR)),
)]
pub struct UnsupportedDerivative {
    /// The sub-expression that could not be differentiated.
    pub expr: String,

    /// The variable of differentiation.
    pub var: String,
}

/// A symbol in the expression was not given a value.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("no value was given for `{}`", name),
    labels = ["this expression"],
)]
pub struct UnboundSymbol {
    /// The name of the symbol.
    pub name: String,
}

/// Evaluation produced an infinite or undefined value, such as a division by zero.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` does not evaluate to a finite number", expr),
    labels = ["this expression"],
)]
pub struct NonFinite {
    /// The expression that was evaluated.
    pub expr: String,
}

/// The coefficient matrix of a linear system is singular.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "the system has no unique solution",
    help = "the coefficient matrix is singular",
)]
pub struct SingularMatrix;

/// The shapes of the matrix and right-hand side of a linear system do not agree.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("expected a square system of {} equations, found {}", expected, found),
)]
pub struct DimensionMismatch {
    /// The number of unknowns.
    pub expected: usize,

    /// The number of rows / values actually given.
    pub found: usize,
}

//! Errors produced while classifying and solving a query.
//!
//! Only [`EmptyQuery`] is ever returned from [`Solver::solve`](crate::Solver::solve). The other
//! kinds are failures local to one solving path; the dispatcher turns them into a
//! [`Kind::NotSupported`](crate::solution::Kind::NotSupported) solution or moves on to the next
//! path.

use algebrist_attrs::ErrorKind;
use algebrist_error::EXPR;
use ariadne::Fmt;

/// The query is empty or only contains whitespace.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "the query is empty",
    help = format!("try something like {}", "x^2 + 3x = 4".fg(EXPR)),
)]
pub struct EmptyQuery;

/// The symbolic engine failed while probing the degree of an expression, usually because the
/// expression is malformed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = format!("cannot determine the degree of `{}`: {}", expr, reason))]
pub struct UnknownDegree {
    /// The expression that was probed.
    pub expr: String,

    /// The message of the underlying failure.
    pub reason: String,
}

/// The expression is a polynomial of degree higher than 2, or not a polynomial at all.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is not of degree 2 or less in {}", expr, var),
    help = "only linear and quadratic expressions are supported",
)]
pub struct DegreeTooHigh {
    /// The expression that was probed.
    pub expr: String,

    /// The variable of the expression.
    pub var: String,
}

/// An equation of a linear system is not linear in `x`, `y` and `z`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is not linear in x, y and z", expr),
    help = "remove powers and products of variables",
)]
pub struct NonLinear {
    /// The equation in zero form.
    pub expr: String,
}

/// A system of two equations uses the variable `z`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "a system of two equations can only use x and y",
    help = "add a third equation to solve for z",
)]
pub struct UnexpectedThirdVariable;

//! The string-level interface to the symbolic engine.
//!
//! Solvers never touch [`SymExpr`] directly. They talk to a [`SymbolicService`], passing
//! expressions around as source text, which keeps them independent of the engine behind it.

use algebrist_error::Error;
use algebrist_parser::parser::{expr::Expr as AstExpr, Parser};
use crate::{derivative::derivative, eval::evaluate, expr::SymExpr, linear, simplify::simplify};

/// The operations the solvers need from a symbolic engine.
pub trait SymbolicService {
    /// Simplifies the expression, returning it in canonical form.
    fn simplify(&self, expr: &str) -> Result<String, Error>;

    /// Returns the derivative of the expression with respect to the given variable, in canonical
    /// form.
    fn derivative(&self, expr: &str, var: &str) -> Result<String, Error>;

    /// Evaluates the expression with the given variable values.
    fn evaluate(&self, expr: &str, bindings: &[(&str, f64)]) -> Result<f64, Error>;

    /// Solves the square linear system `matrix * v = rhs`, where each entry of `matrix` is a row.
    fn solve_linear(&self, matrix: &[Vec<f64>], rhs: &[f64]) -> Result<Vec<f64>, Error>;
}

/// The symbolic engine of this crate.
///
/// Expressions are parsed with `algebrist_parser` and manipulated as [`SymExpr`]s with exact
/// rational coefficients. Linear systems are solved numerically with LU decomposition.
#[derive(Debug, Default, Clone, Copy)]
pub struct Engine;

impl Engine {
    /// Parses the source text into a [`SymExpr`].
    pub fn parse(&self, expr: &str) -> Result<SymExpr, Error> {
        let ast = Parser::new(expr).try_parse_full::<AstExpr>()?;
        SymExpr::try_from(ast)
    }
}

impl SymbolicService for Engine {
    fn simplify(&self, expr: &str) -> Result<String, Error> {
        let simplified = simplify(&self.parse(expr)?).to_string();
        tracing::trace!(input = expr, output = %simplified, "simplify");
        Ok(simplified)
    }

    fn derivative(&self, expr: &str, var: &str) -> Result<String, Error> {
        let d = simplify(&derivative(&self.parse(expr)?, var)?).to_string();
        tracing::trace!(input = expr, var, output = %d, "derivative");
        Ok(d)
    }

    fn evaluate(&self, expr: &str, bindings: &[(&str, f64)]) -> Result<f64, Error> {
        evaluate(&self.parse(expr)?, bindings)
    }

    fn solve_linear(&self, matrix: &[Vec<f64>], rhs: &[f64]) -> Result<Vec<f64>, Error> {
        linear::solve_linear(matrix, rhs)
    }
}

#[cfg(test)]
mod tests {
    use algebrist_parser::parser::error::kind::UnclosedParenthesis;
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn simplify_to_canonical_form() {
        assert_eq!(Engine.simplify("(x^2 + 3x) - (4)").unwrap(), "x^2 + 3x - 4");
        assert_eq!(Engine.simplify("3(x + 2) - (5x - 1)").unwrap(), "-2x + 7");
    }

    #[test]
    fn canonical_form_is_stable() {
        let once = Engine.simplify("(2x - 1)(x + 4) - x").unwrap();
        assert_eq!(Engine.simplify(&once).unwrap(), once);
    }

    #[test]
    fn second_derivative() {
        let d = Engine.derivative("x^2 - 5x + 6", "x").unwrap();
        assert_eq!(d, "2x - 5");
        assert_eq!(Engine.derivative(&d, "x").unwrap(), "2");
    }

    #[test]
    fn mixed_partial_derivative() {
        let dx = Engine.derivative("2x*y + 3z - 1", "x").unwrap();
        assert_eq!(Engine.derivative(&dx, "y").unwrap(), "2");
        assert_eq!(Engine.derivative(&dx, "z").unwrap(), "0");
    }

    #[test]
    fn evaluate_with_bindings() {
        let value = Engine.evaluate("x^2 - 5x + 6", &[("x", 3.0)]).unwrap();
        assert_relative_eq!(value, 0.0);
    }

    #[test]
    fn malformed_input() {
        let err = Engine.simplify("(x + 1").unwrap_err();
        assert!(err.is::<UnclosedParenthesis>());
    }
}

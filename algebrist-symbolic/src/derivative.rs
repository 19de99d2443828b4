//! Symbolic differentiation.
//!
//! The derivative is built structurally with the sum, product and power rules, skipping terms
//! that are trivially zero and factors that are trivially one. The result is not simplified; pass
//! it through [`simplify`](crate::simplify()) to get the canonical form.

use algebrist_error::Error;
use crate::{error::UnsupportedDerivative, expr::{Primary, SymExpr}};

/// Returns true if the expression is trivially zero. This is intended to clean up the built
/// expression and is not mathematically rigorous.
fn is_trivially_zero(expr: &SymExpr) -> bool {
    match expr {
        SymExpr::Primary(Primary::Number(num)) => *num == 0,
        SymExpr::Primary(Primary::Symbol(_)) | SymExpr::Exp(..) => false,
        SymExpr::Add(terms) => terms.iter().all(is_trivially_zero),
        SymExpr::Mul(factors) => factors.iter().any(is_trivially_zero),
    }
}

/// Returns true if the expression is trivially one. This is intended to clean up the built
/// expression and is not mathematically rigorous.
fn is_trivially_one(expr: &SymExpr) -> bool {
    match expr {
        SymExpr::Primary(Primary::Number(num)) => *num == 1,
        SymExpr::Primary(Primary::Symbol(_)) | SymExpr::Add(_) => false,
        SymExpr::Mul(factors) => factors.iter().all(is_trivially_one),
        SymExpr::Exp(base, exp) => is_trivially_zero(exp) || is_trivially_one(base),
    }
}

#[derive(Default)]
struct MulBuilder(Vec<SymExpr>);

impl From<MulBuilder> for SymExpr {
    fn from(value: MulBuilder) -> Self {
        SymExpr::Mul(value.0).downgrade()
    }
}

impl MulBuilder {
    fn mul(&mut self, expr: SymExpr) {
        if self.0.first().is_some_and(is_trivially_zero) {
            return;
        }

        if is_trivially_zero(&expr) {
            self.0 = vec![SymExpr::integer(0)];
        } else if !is_trivially_one(&expr) {
            self.0.push(expr);
        }
    }
}

#[derive(Default)]
struct SumBuilder(Vec<SymExpr>);

impl From<SumBuilder> for SymExpr {
    fn from(value: SumBuilder) -> Self {
        SymExpr::Add(value.0).downgrade()
    }
}

impl SumBuilder {
    fn add(&mut self, expr: SymExpr) {
        if !is_trivially_zero(&expr) {
            self.0.push(expr);
        }
    }
}

/// `(f + g + h)' = f' + g' + h'`
fn sum_rule(terms: &[SymExpr], var: &str) -> Result<SymExpr, Error> {
    let mut sum = SumBuilder::default();
    for term in terms {
        sum.add(derivative(term, var)?);
    }
    Ok(sum.into())
}

/// `(f*g*h)' = f'*g*h + f*g'*h + f*g*h'`
fn product_rule(factors: &[SymExpr], var: &str) -> Result<SymExpr, Error> {
    let mut outer_sum = SumBuilder::default();
    for derivative_idx in 0..factors.len() {
        // factors without the variable contribute nothing when differentiated
        if !factors[derivative_idx].contains_symbol(var) {
            continue;
        }

        let mut inner_mul = MulBuilder::default();
        for (idx, factor) in factors.iter().enumerate() {
            if idx == derivative_idx {
                inner_mul.mul(derivative(factor, var)?);
            } else {
                inner_mul.mul(factor.clone());
            }
        }
        outer_sum.add(inner_mul.into());
    }
    Ok(outer_sum.into())
}

/// Computes the derivative of the expression with respect to the given variable.
///
/// Powers are differentiated with the power rule, which requires the exponent to be free of the
/// variable. `x^x` and `2^x` return an [`UnsupportedDerivative`] error.
pub fn derivative(expr: &SymExpr, var: &str) -> Result<SymExpr, Error> {
    if !expr.contains_symbol(var) {
        return Ok(SymExpr::integer(0));
    }

    match expr {
        SymExpr::Primary(Primary::Number(_)) => Ok(SymExpr::integer(0)),
        SymExpr::Primary(Primary::Symbol(sym)) => Ok(SymExpr::integer((sym == var) as i64)),
        SymExpr::Add(terms) => sum_rule(terms, var),
        SymExpr::Mul(factors) => product_rule(factors, var),
        SymExpr::Exp(base, exp) => {
            if exp.contains_symbol(var) {
                return Err(Error::new(Vec::new(), UnsupportedDerivative {
                    expr: expr.to_string(),
                    var: var.to_string(),
                }));
            }

            // n * f^(n-1) * f'
            let mut mul = MulBuilder::default();
            mul.mul(*exp.clone());
            mul.mul(SymExpr::Exp(base.clone(), Box::new(*exp.clone() + SymExpr::integer(-1))));
            mul.mul(derivative(base, var)?);
            Ok(mul.into())
        },
    }
}

#[cfg(test)]
mod tests {
    use algebrist_parser::parser::{expr::Expr as AstExpr, Parser};
    use crate::{eval::evaluate, simplify};
    use pretty_assertions::assert_eq;
    use super::*;

    fn parse(input: &str) -> SymExpr {
        let ast = Parser::new(input).try_parse_full::<AstExpr>().unwrap();
        SymExpr::try_from(ast).unwrap()
    }

    /// Approximates the derivative with a central finite difference.
    fn finite_difference(expr: &SymExpr, x: f64) -> f64 {
        const DX: f64 = 1e-6;
        let ahead = evaluate(expr, &[("x", x + DX)]).unwrap();
        let behind = evaluate(expr, &[("x", x - DX)]).unwrap();
        (ahead - behind) / (2.0 * DX)
    }

    fn test_for_function(function: &str, points: impl IntoIterator<Item = f64>) {
        const TOL: f64 = 1e-4;

        let expr = parse(function);
        let symbolic = derivative(&expr, "x").unwrap();
        for point in points {
            let symbolically_computed = evaluate(&symbolic, &[("x", point)]).unwrap();
            let numerically_computed = finite_difference(&expr, point);
            assert!(
                (symbolically_computed - numerically_computed).abs() < TOL * numerically_computed.abs().max(1.0),
                "for `{}` at x={}, symbolic derivative was {} but numeric derivative was {}",
                function, point, symbolically_computed, numerically_computed,
            );
        }
    }

    #[test]
    fn power_rule() {
        test_for_function("x^2 + x + 1", [0.0, 1.0, 2.0, 5.0, 8.0]);
        test_for_function("3x^5 - x^3/2", [-2.0, -0.5, 0.5, 3.0]);
    }

    #[test]
    fn product_rule_with_sums() {
        test_for_function("(x - 2)(x + 3)(2x + 1)", [-3.0, 0.0, 1.5, 4.0]);
    }

    #[test]
    fn negative_and_fractional_exponents() {
        test_for_function("1/x + x^(1/2)", [0.5, 1.0, 4.0, 9.0]);
        test_for_function("(x^2 + 1)^(-1)", [-1.0, 0.0, 2.0]);
    }

    #[test]
    fn simplified_derivative() {
        let expr = parse("x^3 - 3x^2 + 2x - 7");
        let d = simplify(&derivative(&expr, "x").unwrap());
        assert_eq!(d.to_string(), "3x^2 - 6x + 2");

        let dd = simplify(&derivative(&d, "x").unwrap());
        assert_eq!(dd.to_string(), "6x - 6");
    }

    #[test]
    fn partial_derivative() {
        let expr = parse("x^2*y + 3y - x");
        assert_eq!(simplify(&derivative(&expr, "y").unwrap()).to_string(), "x^2 + 3");
        assert_eq!(simplify(&derivative(&expr, "x").unwrap()).to_string(), "2x*y - 1");
    }

    #[test]
    fn constant_is_zero() {
        assert_eq!(derivative(&parse("y^2 + 4"), "x").unwrap(), SymExpr::integer(0));
    }

    #[test]
    fn variable_exponent_is_unsupported() {
        let err = derivative(&parse("2^x"), "x").unwrap_err();
        assert!(err.is::<UnsupportedDerivative>());
    }
}

//! Numeric evaluation of expressions.

use algebrist_error::Error;
use crate::{
    error::{NonFinite, UnboundSymbol},
    expr::{Primary, SymExpr},
};

/// Evaluates the expression to a floating-point number, substituting the given values for its
/// variables.
///
/// Returns an [`UnboundSymbol`] error if a variable has no value, and a [`NonFinite`] error if the
/// result is infinite or `NaN`, such as when dividing by zero.
pub fn evaluate(expr: &SymExpr, bindings: &[(&str, f64)]) -> Result<f64, Error> {
    let value = eval_inner(expr, bindings)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::new(Vec::new(), NonFinite { expr: expr.to_string() }))
    }
}

fn eval_inner(expr: &SymExpr, bindings: &[(&str, f64)]) -> Result<f64, Error> {
    Ok(match expr {
        SymExpr::Primary(Primary::Number(num)) => num.to_f64(),
        SymExpr::Primary(Primary::Symbol(sym)) => bindings.iter()
            .find(|(name, _)| name == sym)
            .map(|(_, value)| *value)
            .ok_or_else(|| Error::new(Vec::new(), UnboundSymbol { name: sym.clone() }))?,
        SymExpr::Add(terms) => terms.iter()
            .map(|term| eval_inner(term, bindings))
            .sum::<Result<f64, _>>()?,
        SymExpr::Mul(factors) => factors.iter()
            .map(|factor| eval_inner(factor, bindings))
            .product::<Result<f64, _>>()?,
        SymExpr::Exp(base, exp) => {
            let base_value = eval_inner(base, bindings)?;
            match exp.as_integer().and_then(|n| i32::try_from(n).ok()) {
                Some(n) => base_value.powi(n),
                None => base_value.powf(eval_inner(exp, bindings)?),
            }
        },
    })
}

//! Simplification of expressions to a canonical expanded form.
//!
//! Simplification applies the rules in [`rules`] to every node of the expression, children first,
//! until no rule applies anywhere. Polynomials end up fully expanded, with like terms and factors
//! combined and every numeric coefficient reduced to a single exact rational:
//!
//! ```
//! use algebrist_parser::parser::{expr::Expr, Parser};
//! use algebrist_symbolic::{simplify, SymExpr};
//!
//! let ast = Parser::new("(x - 2)(x - 3)").try_parse_full::<Expr>().unwrap();
//! let expr = SymExpr::try_from(ast).unwrap();
//! assert_eq!(simplify(&expr).to_string(), "x^2 - 5x + 6");
//! ```

pub mod rules;
pub mod step;

use crate::{expr::SymExpr, step_collector::StepCollector};
use step::Step;

/// Simplifies the children of the expression, flattening any sum nested in a sum and any product
/// nested in a product.
fn simplify_children(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> SymExpr {
    match expr {
        SymExpr::Primary(_) => expr.clone(),
        SymExpr::Add(terms) => {
            let mut new_terms = Vec::with_capacity(terms.len());
            for term in terms {
                match inner_simplify(term, step_collector) {
                    SymExpr::Add(inner) => new_terms.extend(inner),
                    term => new_terms.push(term),
                }
            }
            SymExpr::Add(new_terms).downgrade()
        },
        SymExpr::Mul(factors) => {
            let mut new_factors = Vec::with_capacity(factors.len());
            for factor in factors {
                match inner_simplify(factor, step_collector) {
                    SymExpr::Mul(inner) => new_factors.extend(inner),
                    factor => new_factors.push(factor),
                }
            }
            SymExpr::Mul(new_factors).downgrade()
        },
        SymExpr::Exp(base, exp) => SymExpr::Exp(
            Box::new(inner_simplify(base, step_collector)),
            Box::new(inner_simplify(exp, step_collector)),
        ),
    }
}

/// Simplifies the expression until no rule applies, without sorting it.
fn inner_simplify(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> SymExpr {
    let mut current = simplify_children(expr, step_collector);
    while let Some(next) = rules::all(&current, step_collector) {
        current = simplify_children(&next, step_collector);
    }
    current
}

/// Simplifies the given expression and returns the result in canonical order.
pub fn simplify(expr: &SymExpr) -> SymExpr {
    simplify_with(expr, &mut ())
}

/// Simplifies the given expression, reporting every rewrite to the given step collector.
pub fn simplify_with(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> SymExpr {
    inner_simplify(expr, step_collector).sorted()
}

//! Rewrite rules, grouped by the node they apply to.
//!
//! A rule looks only at the top node of the expression it is given. It returns the rewritten
//! expression, or `None` if it does not apply. Returning `Some` for an unchanged expression would
//! keep the simplifier from ever reaching a fixed point.

pub mod add;
pub mod distribute;
pub mod multiply;
pub mod power;

use crate::step_collector::StepCollector;
use super::{step::Step, SymExpr};

/// Runs `f` on the terms of a sum. Other expressions are left alone.
pub(crate) fn do_add(expr: &SymExpr, f: impl Copy + Fn(&[SymExpr]) -> Option<SymExpr>) -> Option<SymExpr> {
    match expr {
        SymExpr::Add(terms) => f(terms),
        _ => None,
    }
}

/// Runs `f` on the factors of a product. Other expressions are left alone.
pub(crate) fn do_multiply(expr: &SymExpr, f: impl Copy + Fn(&[SymExpr]) -> Option<SymExpr>) -> Option<SymExpr> {
    match expr {
        SymExpr::Mul(factors) => f(factors),
        _ => None,
    }
}

/// Runs `f` on the base and exponent of a power. Other expressions are left alone.
pub(crate) fn do_power(expr: &SymExpr, f: impl Copy + Fn(&SymExpr, &SymExpr) -> Option<SymExpr>) -> Option<SymExpr> {
    match expr {
        SymExpr::Exp(base, exp) => f(base, exp),
        _ => None,
    }
}

/// Applies the first rule that matches. Cheaper rules come first.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    add::all(expr, step_collector)
        .or_else(|| multiply::all(expr, step_collector))
        .or_else(|| power::all(expr, step_collector))
        .or_else(|| distribute::all(expr, step_collector))
}

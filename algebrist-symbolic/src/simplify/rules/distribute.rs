//! Simplification rules related to the distributive property.

use crate::{
    expr::SymExpr,
    simplify::{rules::{do_multiply, do_power}, step::Step},
    step_collector::StepCollector,
};

/// `a*(b+c) = a*b + a*c`
pub fn distributive_property(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        // find the first `SymExpr::Add`, and distribute every other factor over it
        let idx = factors.iter().position(|factor| matches!(factor, SymExpr::Add(_)))?;
        let mut factors_to_distribute = factors.to_vec();
        let SymExpr::Add(add_factor_terms) = factors_to_distribute.swap_remove(idx) else {
            return None;
        };

        let new_terms = add_factor_terms.into_iter()
            .map(|term| SymExpr::Mul(factors_to_distribute.clone()) * term)
            .collect::<Vec<_>>();
        Some(SymExpr::Add(new_terms))
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::DistributiveProperty);
    Some(opt)
}

/// `(a*b)^c = a^c * b^c` for integer `c`
pub fn distribute_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        if let SymExpr::Mul(factors) = lhs {
            rhs.as_integer()?;
            let new_factors = factors.iter()
                .map(|factor| SymExpr::Exp(
                    Box::new(factor.clone()),
                    Box::new(rhs.clone()),
                ))
                .collect::<Vec<_>>();

            return Some(SymExpr::Mul(new_factors));
        }

        None
    })?;

    step_collector.push(Step::DistributePower);
    Some(opt)
}

/// Applies all distribution rules.
///
/// The distributive property may or may not reduce the complexity of the expression, since it can
/// introduce additional operations. However, it brings polynomials into the expanded form the
/// coefficient extraction relies on.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    distributive_property(expr, step_collector)
        .or_else(|| distribute_power(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> SymExpr {
        SymExpr::symbol("x")
    }

    #[test]
    fn distribute_over_sum() {
        // 2(x + 3)
        let expr = SymExpr::Mul(vec![
            SymExpr::integer(2),
            SymExpr::Add(vec![x(), SymExpr::integer(3)]),
        ]);
        assert_eq!(distributive_property(&expr, &mut ()), Some(SymExpr::Add(vec![
            SymExpr::Mul(vec![SymExpr::integer(2), x()]),
            SymExpr::Mul(vec![SymExpr::integer(2), SymExpr::integer(3)]),
        ])));
    }

    #[test]
    fn distribute_exponent() {
        // (2x)^2
        let expr = SymExpr::Exp(
            Box::new(SymExpr::Mul(vec![SymExpr::integer(2), x()])),
            Box::new(SymExpr::integer(2)),
        );
        assert_eq!(distribute_power(&expr, &mut ()), Some(SymExpr::Mul(vec![
            SymExpr::Exp(Box::new(SymExpr::integer(2)), Box::new(SymExpr::integer(2))),
            SymExpr::Exp(Box::new(x()), Box::new(SymExpr::integer(2))),
        ])));
    }
}

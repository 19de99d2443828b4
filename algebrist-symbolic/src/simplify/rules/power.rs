//! Simplification rules for powers.

use crate::{
    expr::SymExpr,
    simplify::{rules::do_power, step::Step},
    step_collector::StepCollector,
};
use rug::ops::Pow;

/// The largest power of a sum that is expanded by [`expand_power`]. Larger powers are left as
/// they are.
pub const MAX_EXPAND_POWER: i64 = 8;

/// The largest exponent magnitude for which a numeric power is evaluated exactly.
const MAX_EVALUATE_EXPONENT: i64 = 1024;

/// `a^0 = 1`
pub fn power_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |_, rhs| {
        if rhs.is_zero() {
            Some(SymExpr::integer(1))
        } else {
            None
        }
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::PowerZero);
    Some(opt)
}

/// `a^1 = a`
pub fn power_one(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        if rhs.is_one() {
            Some(lhs.clone())
        } else {
            None
        }
    })?;

    step_collector.push(Step::PowerOne);
    Some(opt)
}

/// `0^n = 0` for positive numeric `n`
pub fn zero_left(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        if lhs.is_zero() && rhs.as_number().is_some_and(|n| *n > 0) {
            Some(SymExpr::integer(0))
        } else {
            None
        }
    })?;

    step_collector.push(Step::PowerZeroLeft);
    Some(opt)
}

/// `1^a = 1`
pub fn one_left(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, _| {
        if lhs.is_one() {
            Some(SymExpr::integer(1))
        } else {
            None
        }
    })?;

    step_collector.push(Step::PowerOneLeft);
    Some(opt)
}

/// Evaluates a number raised to an integer power exactly.
///
/// `2^3 = 8`
/// `4^(-1) = 1/4`
///
/// `0` raised to a negative power is undefined and left as is.
pub fn evaluate_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        let base = lhs.as_number()?;
        let exp = rhs.as_integer().filter(|n| n.abs() <= MAX_EVALUATE_EXPONENT)?;
        if *base == 0 && exp < 0 {
            return None;
        }

        // the magnitude check above keeps the exponent well within `i32`
        let exp = i32::try_from(exp).ok()?;
        Some(SymExpr::number(base.clone().pow(exp)))
    })?;

    step_collector.push(Step::EvaluatePower);
    Some(opt)
}

/// `(a^b)^c = a^(b*c)` for integer `c`
pub fn power_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        if let SymExpr::Exp(base, exp) = lhs {
            if rhs.as_integer().is_some() {
                return Some(SymExpr::Exp(
                    base.clone(),
                    Box::new(*exp.clone() * rhs.clone()),
                ));
            }
        }

        None
    })?;

    step_collector.push(Step::PowerPower);
    Some(opt)
}

/// Expands a sum raised to a small positive integer power into a product, which the distributive
/// property then multiplies out.
///
/// `(a+b)^2 = (a+b)(a+b)`
pub fn expand_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        if !matches!(lhs, SymExpr::Add(_)) {
            return None;
        }

        let n = rhs.as_integer().filter(|n| (2..=MAX_EXPAND_POWER).contains(n))?;
        let factors = (0..n).map(|_| lhs.clone()).collect::<Vec<_>>();
        Some(SymExpr::Mul(factors))
    })?;

    step_collector.push(Step::ExpandPower);
    Some(opt)
}

/// Applies all power rules.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    power_zero(expr, step_collector)
        .or_else(|| power_one(expr, step_collector))
        .or_else(|| zero_left(expr, step_collector))
        .or_else(|| one_left(expr, step_collector))
        .or_else(|| evaluate_power(expr, step_collector))
        .or_else(|| power_power(expr, step_collector))
        .or_else(|| expand_power(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rug::Rational;
    use super::*;

    fn x() -> SymExpr {
        SymExpr::symbol("x")
    }

    fn pow(base: SymExpr, exp: SymExpr) -> SymExpr {
        SymExpr::Exp(Box::new(base), Box::new(exp))
    }

    #[test]
    fn numeric_power() {
        let expr = pow(SymExpr::integer(4), SymExpr::integer(-2));
        assert_eq!(evaluate_power(&expr, &mut ()), Some(SymExpr::number(Rational::from((1, 16)))));
    }

    #[test]
    fn zero_to_negative_power_is_kept() {
        let expr = pow(SymExpr::integer(0), SymExpr::integer(-1));
        assert_eq!(all(&expr, &mut ()), None);
    }

    #[test]
    fn fractional_power_is_kept() {
        let expr = pow(SymExpr::integer(2), SymExpr::number(Rational::from((1, 2))));
        assert_eq!(all(&expr, &mut ()), None);
    }

    #[test]
    fn nested_power() {
        let expr = pow(pow(x(), SymExpr::integer(2)), SymExpr::integer(3));
        assert_eq!(power_power(&expr, &mut ()), Some(pow(x(), SymExpr::integer(6))));
    }

    #[test]
    fn square_of_sum() {
        let sum = SymExpr::Add(vec![x(), SymExpr::integer(1)]);
        let expr = pow(sum.clone(), SymExpr::integer(2));
        assert_eq!(expand_power(&expr, &mut ()), Some(SymExpr::Mul(vec![sum.clone(), sum])));
    }

    #[test]
    fn large_power_of_sum_is_kept() {
        let sum = SymExpr::Add(vec![x(), SymExpr::integer(1)]);
        let expr = pow(sum, SymExpr::integer(MAX_EXPAND_POWER + 1));
        assert_eq!(expand_power(&expr, &mut ()), None);
    }
}

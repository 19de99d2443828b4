//! Simplification rules for expressions involving multiplication, including combining like
//! factors.

use crate::{
    expr::SymExpr,
    primitive::rat,
    simplify::{rules::do_multiply, step::Step},
    step_collector::StepCollector,
};

/// `0*a = 0`
/// `a*0 = 0`
pub fn multiply_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        if factors.iter().any(SymExpr::is_zero) {
            Some(SymExpr::integer(0))
        } else {
            None
        }
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::MultiplyZero);
    Some(opt)
}

/// `1*a = a`
/// `a*1 = a`
pub fn multiply_one(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let new_factors = factors.iter()
            .filter(|factor| !factor.is_one())
            .cloned()
            .collect::<Vec<_>>();

        if new_factors.len() == factors.len() {
            None
        } else {
            Some(SymExpr::Mul(new_factors).downgrade())
        }
    })?;

    step_collector.push(Step::MultiplyOne);
    Some(opt)
}

/// Multiplies all numeric factors into a single coefficient.
///
/// `2*a*3 = 6a`
/// `4*(1/2) = 2`
pub fn multiply_numbers(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        if factors.iter().filter(|factor| factor.is_number()).count() < 2 {
            return None;
        }

        let mut coefficient = rat(1);
        let mut new_factors = Vec::with_capacity(factors.len());
        for factor in factors {
            match factor.as_number() {
                Some(num) => coefficient *= num,
                None => new_factors.push(factor.clone()),
            }
        }

        new_factors.push(SymExpr::number(coefficient));
        Some(SymExpr::Mul(new_factors).downgrade())
    })?;

    step_collector.push(Step::MultiplyNumbers);
    Some(opt)
}

/// Combines like factors.
///
/// `a*a = a^2`
/// `a^b*a^c = a^(b+c)`
/// etc.
///
/// Plain numbers are left to [`multiply_numbers`], and sums are never combined, so that the
/// expanded product of a power of a sum is not folded back into the power.
pub fn combine_like_factors(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let mut new_factors = factors.to_vec();
        let mut current_factor_idx = 0;

        /// Utility function to extract the base and exponent of an expression. If the expression
        /// is not [`SymExpr::Exp`], the exponent is `1`.
        ///
        /// - `a^b` -> `(a, b)`
        /// - `a` -> `(a, 1)`
        fn get_exp(expr: &SymExpr) -> (SymExpr, SymExpr) {
            match expr {
                SymExpr::Exp(lhs, rhs) => (*lhs.clone(), *rhs.clone()),
                expr => (expr.clone(), SymExpr::integer(1)),
            }
        }

        /// Returns true if the factor may be combined with other factors of the same base.
        fn combinable(expr: &SymExpr) -> bool {
            match expr {
                SymExpr::Primary(_) => !expr.is_number(),
                SymExpr::Exp(base, _) => !matches!(**base, SymExpr::Add(_)),
                SymExpr::Add(_) | SymExpr::Mul(_) => false,
            }
        }

        // this is O(n^2) worst case, due to scanning the whole vec for each factor
        while current_factor_idx < new_factors.len() {
            if !combinable(&new_factors[current_factor_idx]) {
                current_factor_idx += 1;
                continue;
            }

            let (current_factor, mut current_factor_exp) = get_exp(&new_factors[current_factor_idx]);
            let mut combined = false;

            // look at every factor after `current_factor`
            let mut next_factor_idx = current_factor_idx + 1;
            while next_factor_idx < new_factors.len() {
                let (next_factor, next_factor_exp) = get_exp(&new_factors[next_factor_idx]);

                // bases must be strictly equal
                // if they are, apply a^b*a^c = a^(b+c)
                if combinable(&new_factors[next_factor_idx]) && current_factor == next_factor {
                    current_factor_exp = current_factor_exp + next_factor_exp;
                    new_factors.swap_remove(next_factor_idx);
                    combined = true;
                } else {
                    next_factor_idx += 1;
                }
            }

            if combined {
                new_factors[current_factor_idx] = SymExpr::Exp(
                    Box::new(current_factor),
                    Box::new(current_factor_exp),
                );
            }

            current_factor_idx += 1;
        }

        if new_factors.len() == factors.len() {
            None
        } else {
            Some(SymExpr::Mul(new_factors).downgrade())
        }
    })?;

    step_collector.push(Step::CombineLikeFactors);
    Some(opt)
}

/// Applies all multiplication rules.
///
/// All multiplication rules will reduce the complexity of the expression.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    multiply_zero(expr, step_collector)
        .or_else(|| multiply_one(expr, step_collector))
        .or_else(|| multiply_numbers(expr, step_collector))
        .or_else(|| combine_like_factors(expr, step_collector))
}

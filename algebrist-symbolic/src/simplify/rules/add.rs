//! Simplification rules for expressions involving addition, including combining like terms.

use crate::{
    expr::SymExpr,
    simplify::{rules::do_add, step::Step},
    step_collector::StepCollector,
};
use rug::Rational;

/// `0+a = a`
/// `a+0 = a`
pub fn add_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        let new_terms = terms.iter()
            .filter(|term| !term.is_zero())
            .cloned()
            .collect::<Vec<_>>();

        if new_terms.len() == terms.len() {
            None
        } else {
            Some(SymExpr::Add(new_terms).downgrade())
        }
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::AddZero);
    Some(opt)
}

/// Combines terms that differ only in their numeric coefficient. Constants are like terms of each
/// other.
///
/// `a+a = 2a`
/// `2a+3a = 5a`
/// `1/2 + 3 = 7/2`
///
/// The combined term takes the place of the first of its group; terms without a partner are left
/// untouched.
pub fn combine_like_terms(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        // (rest of the term, summed coefficient, first term of the group, group size)
        let mut groups: Vec<(SymExpr, Rational, &SymExpr, usize)> = Vec::with_capacity(terms.len());
        for term in terms {
            let (coeff, rest) = term.split_coefficient();
            match groups.iter_mut().find(|(other, ..)| *other == rest) {
                Some((_, sum, _, count)) => {
                    *sum += coeff;
                    *count += 1;
                },
                None => groups.push((rest, coeff, term, 1)),
            }
        }

        if groups.len() == terms.len() {
            return None;
        }

        let new_terms = groups.into_iter()
            .map(|(rest, coeff, first, count)| {
                if count == 1 {
                    first.clone()
                } else if coeff == 0 {
                    SymExpr::integer(0)
                } else if rest.is_one() {
                    SymExpr::number(coeff)
                } else if coeff == 1 {
                    rest
                } else {
                    SymExpr::number(coeff) * rest
                }
            })
            .collect::<Vec<_>>();
        Some(SymExpr::Add(new_terms).downgrade())
    })?;

    step_collector.push(Step::CombineLikeTerms);
    Some(opt)
}

/// Applies all addition rules.
///
/// All addition rules will reduce the complexity of the expression.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    add_zero(expr, step_collector)
        .or_else(|| combine_like_terms(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> SymExpr {
        SymExpr::symbol("x")
    }

    #[test]
    fn zero_terms_are_removed() {
        let expr = SymExpr::Add(vec![SymExpr::integer(0), x(), SymExpr::integer(0)]);
        let mut steps = Vec::new();
        assert_eq!(add_zero(&expr, &mut steps), Some(x()));
        assert_eq!(steps, vec![Step::AddZero]);
    }

    #[test]
    fn like_terms_are_combined() {
        // 2x + 3 + 3x - 3
        let expr = SymExpr::Add(vec![
            SymExpr::Mul(vec![SymExpr::integer(2), x()]),
            SymExpr::integer(3),
            SymExpr::Mul(vec![x(), SymExpr::integer(3)]),
            SymExpr::integer(-3),
        ]);
        assert_eq!(combine_like_terms(&expr, &mut ()), Some(SymExpr::Add(vec![
            SymExpr::Mul(vec![SymExpr::integer(5), x()]),
            SymExpr::integer(0),
        ])));
    }

    #[test]
    fn cancelling_terms() {
        // x - x
        let expr = SymExpr::Add(vec![x(), SymExpr::Mul(vec![SymExpr::integer(-1), x()])]);
        assert_eq!(combine_like_terms(&expr, &mut ()), Some(SymExpr::integer(0)));
    }

    #[test]
    fn unlike_terms_are_kept() {
        let expr = SymExpr::Add(vec![x(), SymExpr::symbol("y")]);
        assert_eq!(all(&expr, &mut ()), None);
    }
}

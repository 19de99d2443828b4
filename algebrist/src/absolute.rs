//! Equations and inequalities of the form `|g(x)| op k`.
//!
//! Both are rewritten into two sub-problems without absolute values. Equations take the union of
//! the roots of `g - k = 0` and `g + k = 0`. Inequalities solve `g - k op 0` and `-g - k op 0` and
//! intersect the two solution sets, for every operator.
//!
//! For `>` and `>=` this is not the textbook union of `g op k` and `g op' -k`: `|x - 3| >= 2`
//! solves to the empty set.

use algebrist_error::Error;
use algebrist_symbolic::{StepCollector, SymbolicService};
use crate::{
    config::SolverConfig,
    equation::{solve_linear, solve_quadratic, verify_roots},
    extract::{degree, linear_coeffs, quadratic_coeffs, Degree},
    inequality::{solve_inequality, Comparison},
    solution::IntervalSet,
};
use std::fmt;

/// The operator of an absolute value query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbsOp {
    Eq,
    Cmp(Comparison),
}

impl AbsOp {
    /// The operators in the order they must be searched for.
    const SEARCH_ORDER: [AbsOp; 5] = [
        Self::Cmp(Comparison::GreaterEq),
        Self::Cmp(Comparison::LessEq),
        Self::Cmp(Comparison::Greater),
        Self::Cmp(Comparison::Less),
        Self::Eq,
    ];

    fn symbol(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Cmp(op) => op.symbol(),
        }
    }

    fn flip(&self) -> Self {
        match self {
            Self::Eq => Self::Eq,
            Self::Cmp(op) => Self::Cmp(op.flip()),
        }
    }
}

impl fmt::Display for AbsOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A query `|inner| op bound`, split into its parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbsQuery<'a> {
    /// The expression inside the bars.
    pub inner: &'a str,

    /// The operator, oriented so that the absolute value is on the left.
    pub op: AbsOp,

    /// The expression on the other side of the operator.
    pub bound: &'a str,
}

/// Splits a compacted query of the form `|g| op k` or `k op |g|`.
///
/// The query must contain exactly two bars, with the operator directly after the closing bar or
/// directly before the opening bar. In the second form the operator is flipped.
///
/// ```
/// use algebrist::absolute::{split_abs_compare, AbsOp};
/// use algebrist::inequality::Comparison;
///
/// let query = split_abs_compare("2>|x-3|").unwrap();
/// assert_eq!(query.inner, "x-3");
/// assert_eq!(query.op, AbsOp::Cmp(Comparison::Less));
/// assert_eq!(query.bound, "2");
/// ```
pub fn split_abs_compare(s: &str) -> Option<AbsQuery<'_>> {
    let mut parts = s.split('|');
    let (left, inner, right) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    if left.is_empty() {
        AbsOp::SEARCH_ORDER.iter().find_map(|op| {
            let bound = right.strip_prefix(op.symbol())?;
            Some(AbsQuery { inner, op: *op, bound })
        })
    } else if right.is_empty() {
        AbsOp::SEARCH_ORDER.iter().find_map(|op| {
            let bound = left.strip_suffix(op.symbol())?;
            Some(AbsQuery { inner, op: op.flip(), bound })
        })
    } else {
        None
    }
}

/// The roots of a single equation `f = 0`, or [`None`] if every `x` is a root.
fn branch_roots<S>(
    service: &S,
    f: &str,
    config: &SolverConfig,
    steps: &mut dyn StepCollector<String>,
) -> Result<Option<Vec<f64>>, Error>
where
    S: SymbolicService + ?Sized,
{
    let roots = match degree(service, f)? {
        Degree::Constant => {
            if service.evaluate(f, &[])?.abs() < config.zero_tolerance {
                steps.push(format!("{} = 0 holds for every x", f));
                return Ok(None);
            }
            steps.push(format!("{} = 0 has no solution", f));
            Vec::new()
        },
        Degree::Linear => vec![solve_linear(linear_coeffs(service, f)?, steps)],
        Degree::Quadratic => solve_quadratic(quadratic_coeffs(service, f)?, config, steps),
    };

    verify_roots(service, f, &roots, config, steps)?;
    Ok(Some(roots))
}

/// Solves `|inner| = bound`, returning the roots in ascending order, or [`None`] if either branch
/// is an identity and every `x` is a solution.
///
/// Returns an error if a branch is not of degree 2 or less.
pub fn solve_abs_equation<S>(
    service: &S,
    inner: &str,
    bound: &str,
    config: &SolverConfig,
    steps: &mut dyn StepCollector<String>,
) -> Result<Option<Vec<f64>>, Error>
where
    S: SymbolicService + ?Sized,
{
    let mut roots = Vec::new();
    for branch in [format!("({}) - ({})", inner, bound), format!("({}) + ({})", inner, bound)] {
        let f = service.simplify(&branch)?;
        steps.push(format!("branch: {} = 0", f));
        match branch_roots(service, &f, config, steps)? {
            Some(branch_roots) => roots.extend(branch_roots),
            None => return Ok(None),
        }
    }

    roots.sort_by(f64::total_cmp);
    roots.dedup_by(|a, b| (*a - *b).abs() <= config.root_tolerance);
    Ok(Some(roots))
}

/// Solves `|inner| op bound` by intersecting the solutions of `inner - bound op 0` and
/// `-inner - bound op 0`.
///
/// Returns an error if a branch is not of degree 2 or less.
pub fn solve_abs_inequality<S>(
    service: &S,
    inner: &str,
    op: Comparison,
    bound: &str,
    config: &SolverConfig,
    steps: &mut dyn StepCollector<String>,
) -> Result<IntervalSet, Error>
where
    S: SymbolicService + ?Sized,
{
    let mut sets = Vec::with_capacity(2);
    for branch in [format!("({}) - ({})", inner, bound), format!("-({}) - ({})", inner, bound)] {
        let f = service.simplify(&branch)?;
        steps.push(format!("branch: {} {} 0", f, op));
        let deg = degree(service, &f)?;
        sets.push(solve_inequality(service, &f, deg, op, config, steps)?);
    }

    let set = sets[0].intersect(&sets[1]);
    steps.push(format!("both branches must hold: {} ∩ {} = {}", sets[0], sets[1], set));
    Ok(set)
}

#[cfg(test)]
mod tests {
    use algebrist_symbolic::Engine;
    use crate::error::DegreeTooHigh;
    use pretty_assertions::assert_eq;
    use super::*;

    fn equation(inner: &str, bound: &str) -> Option<Vec<f64>> {
        solve_abs_equation(&Engine, inner, bound, &SolverConfig::default(), &mut ()).unwrap()
    }

    fn inequality(inner: &str, op: Comparison, bound: &str) -> String {
        solve_abs_inequality(&Engine, inner, op, bound, &SolverConfig::default(), &mut ())
            .unwrap()
            .to_string()
    }

    #[test]
    fn split_forms() {
        assert_eq!(split_abs_compare("|x-3|<=2"), Some(AbsQuery {
            inner: "x-3",
            op: AbsOp::Cmp(Comparison::LessEq),
            bound: "2",
        }));
        assert_eq!(split_abs_compare("5=|2x+1|"), Some(AbsQuery {
            inner: "2x+1",
            op: AbsOp::Eq,
            bound: "5",
        }));
        assert_eq!(split_abs_compare("4<=|x|"), Some(AbsQuery {
            inner: "x",
            op: AbsOp::Cmp(Comparison::GreaterEq),
            bound: "4",
        }));
    }

    #[test]
    fn split_rejects_other_shapes() {
        assert_eq!(split_abs_compare("|x|+1=3"), None);
        assert_eq!(split_abs_compare("|x|=|y|"), None);
        assert_eq!(split_abs_compare("|x-3|"), None);
        assert_eq!(split_abs_compare("x-3=2"), None);
    }

    #[test]
    fn equation_two_roots() {
        assert_eq!(equation("x-3", "2"), Some(vec![1.0, 5.0]));
    }

    #[test]
    fn equation_zero_bound() {
        assert_eq!(equation("x-3", "0"), Some(vec![3.0]));
    }

    #[test]
    fn equation_root_at_zero_is_positive() {
        let roots = equation("x", "0").unwrap();
        assert_eq!(roots, vec![0.0]);
        assert!(roots[0].is_sign_positive());
    }

    #[test]
    fn equation_quadratic_inner() {
        assert_eq!(equation("x^2-5", "4"), Some(vec![-3.0, -1.0, 1.0, 3.0]));
    }

    #[test]
    fn equation_identity() {
        assert_eq!(equation("0x", "0"), None);
    }

    #[test]
    fn equation_degree_too_high() {
        let err = solve_abs_equation(&Engine, "x^3", "1", &SolverConfig::default(), &mut ())
            .unwrap_err();
        assert!(err.is::<DegreeTooHigh>());
    }

    #[test]
    fn inequality_within() {
        assert_eq!(inequality("x-3", Comparison::LessEq, "2"), "[1, 5]");
        assert_eq!(inequality("x-3", Comparison::Less, "2"), "(1, 5)");
    }

    #[test]
    fn inequality_outside_intersects() {
        assert_eq!(inequality("x-3", Comparison::GreaterEq, "2"), "Ø");
        assert_eq!(inequality("x-3", Comparison::Greater, "2"), "Ø");
    }

    #[test]
    fn inequality_steps() {
        let mut steps = Vec::new();
        solve_abs_inequality(&Engine, "x-3", Comparison::LessEq, "2", &SolverConfig::default(), &mut steps)
            .unwrap();
        assert_eq!(steps.first().unwrap(), "branch: x - 5 <= 0");
        assert_eq!(steps.last().unwrap(), "both branches must hold: (−∞, 5] ∩ [1, +∞) = [1, 5]");
    }
}

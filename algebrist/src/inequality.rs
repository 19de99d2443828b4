//! Sign-chart solver for polynomial inequalities of degree 2 or less.

use algebrist_error::Error;
use algebrist_symbolic::{StepCollector, SymbolicService};
use crate::{
    config::SolverConfig,
    equation::solve_quadratic,
    extract::{linear_coeffs, quadratic_coeffs, Degree, VAR},
    fmt::num,
    solution::{Interval, IntervalSet},
};
use std::fmt;

/// A comparison between an expression and zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Greater,
    GreaterEq,
    Less,
    LessEq,
}

impl Comparison {
    /// All comparisons, in the order they must be searched for in a string: the two-character
    /// operators come before their one-character prefixes.
    pub const SEARCH_ORDER: [Comparison; 4] = [Self::GreaterEq, Self::LessEq, Self::Greater, Self::Less];

    /// Returns the operator symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Greater => ">",
            Self::GreaterEq => ">=",
            Self::Less => "<",
            Self::LessEq => "<=",
        }
    }

    /// Returns true if the comparison excludes equality.
    pub fn is_strict(&self) -> bool {
        matches!(self, Self::Greater | Self::Less)
    }

    /// Returns true if `value op 0` holds.
    pub fn holds(&self, value: f64) -> bool {
        match self {
            Self::Greater => value > 0.0,
            Self::GreaterEq => value >= 0.0,
            Self::Less => value < 0.0,
            Self::LessEq => value <= 0.0,
        }
    }

    /// Returns the comparison with its sides swapped, so that `k op g` becomes `g op.flip() k`.
    pub fn flip(&self) -> Self {
        match self {
            Self::Greater => Self::Less,
            Self::GreaterEq => Self::LessEq,
            Self::Less => Self::Greater,
            Self::LessEq => Self::GreaterEq,
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Splits `L op R` on the first comparison operator found, trying `>=`, `<=`, `>` and `<` in that
/// order.
pub fn split_comparison(s: &str) -> Option<(&str, Comparison, &str)> {
    Comparison::SEARCH_ORDER.iter().find_map(|op| {
        let symbol = op.symbol();
        s.find(symbol).map(|i| (&s[..i], *op, &s[i + symbol.len()..]))
    })
}

/// The real roots of `f`, in ascending order.
fn ascending_roots<S>(
    service: &S,
    f: &str,
    degree: Degree,
    config: &SolverConfig,
    steps: &mut dyn StepCollector<String>,
) -> Result<Vec<f64>, Error>
where
    S: SymbolicService + ?Sized,
{
    let mut roots = match degree {
        Degree::Constant => Vec::new(),
        Degree::Linear => {
            let coeffs = linear_coeffs(service, f)?;
            let root = -coeffs.c / coeffs.a + 0.0;
            steps.push(format!("linear root: x = {}", num(root)));
            vec![root]
        },
        Degree::Quadratic => {
            let coeffs = quadratic_coeffs(service, f)?;
            let discriminant = coeffs.b * coeffs.b - 4.0 * coeffs.a * coeffs.c;
            steps.push(format!("Δ = {}", num(discriminant)));
            solve_quadratic(coeffs, config, &mut ())
        },
    };
    roots.sort_by(f64::total_cmp);

    if degree != Degree::Constant {
        let listed = roots.iter().map(|r| num(*r)).collect::<Vec<_>>();
        steps.push(match listed.is_empty() {
            true => "roots: none".to_string(),
            false => format!("roots: {}", listed.join(", ")),
        });
    }
    Ok(roots)
}

/// Solves `f op 0` for a polynomial `f` in `x` of the given degree.
///
/// The roots of `f` split the real line into regions where the sign of `f` is constant. Each region
/// is kept if the comparison holds at a representative point: the midpoint between two roots,
/// `root ± 1` next to an infinite end, or `0` when there are no roots. For non-strict comparisons,
/// a root is part of the solution if `|f(root)|` is within [`SolverConfig::zero_tolerance`]; kept
/// regions on both sides of such a root are joined, and a root with both neighbours dropped is
/// kept as the single point `[r, r]`.
pub fn solve_inequality<S>(
    service: &S,
    f: &str,
    degree: Degree,
    op: Comparison,
    config: &SolverConfig,
    steps: &mut dyn StepCollector<String>,
) -> Result<IntervalSet, Error>
where
    S: SymbolicService + ?Sized,
{
    steps.push(format!("let f(x) = {} and check its sign in each region", f));
    let roots = ascending_roots(service, f, degree, config, steps)?;
    let eval = |x: f64| service.evaluate(f, &[(VAR, x)]);

    // keep[i] is the region between roots[i - 1] and roots[i]
    let mut keep = Vec::with_capacity(roots.len() + 1);
    for i in 0..=roots.len() {
        let low = i.checked_sub(1).map(|j| roots[j]);
        let high = roots.get(i).copied();
        let representative = match (low, high) {
            (None, None) => 0.0,
            (None, Some(high)) => high - 1.0,
            (Some(low), None) => low + 1.0,
            (Some(low), Some(high)) => (low + high) / 2.0,
        };
        let value = eval(representative)?;
        let holds = op.holds(value);
        steps.push(format!(
            "on {}: f({}) = {}, {}",
            Interval::new(low, high, false, false).unwrap_or_else(Interval::all),
            num(representative),
            num(value),
            if holds { "kept" } else { "dropped" },
        ));
        keep.push(holds);
    }

    let mut included = Vec::with_capacity(roots.len());
    for &root in &roots {
        included.push(!op.is_strict() && eval(root)?.abs() < config.zero_tolerance);
    }

    let mut intervals = Vec::new();
    let mut start = keep[0].then_some((None, false));
    for (i, &root) in roots.iter().enumerate() {
        let next_kept = keep[i + 1];
        match start {
            Some(_) if next_kept && included[i] => continue,
            Some((low, include_low)) => {
                intervals.extend(Interval::new(low, Some(root), include_low, included[i]));
                start = None;
            },
            None if included[i] && !next_kept => intervals.push(Interval::point(root)),
            None => (),
        }

        if next_kept {
            start = Some((Some(root), included[i]));
        }
    }
    if let Some((low, include_low)) = start {
        intervals.extend(Interval::new(low, None, include_low, false));
    }

    let set = IntervalSet::from_disjoint(intervals);
    tracing::debug!(f, %op, %set, "solved inequality");
    Ok(set)
}

#[cfg(test)]
mod tests {
    use algebrist_symbolic::Engine;
    use pretty_assertions::assert_eq;
    use rand::Rng;
    use super::*;

    fn solve(f: &str, degree: Degree, op: Comparison) -> String {
        solve_inequality(&Engine, f, degree, op, &SolverConfig::default(), &mut ())
            .unwrap()
            .to_string()
    }

    #[test]
    fn split_operators() {
        assert_eq!(split_comparison("x^2-5x+6>=0"), Some(("x^2-5x+6", Comparison::GreaterEq, "0")));
        assert_eq!(split_comparison("2x<4"), Some(("2x", Comparison::Less, "4")));
        assert_eq!(split_comparison("x=4"), None);
    }

    #[test]
    fn linear() {
        assert_eq!(solve("2x - 4", Degree::Linear, Comparison::Greater), "(2, +∞)");
        assert_eq!(solve("2x - 4", Degree::Linear, Comparison::LessEq), "(−∞, 2]");
        assert_eq!(solve("-x + 1", Degree::Linear, Comparison::GreaterEq), "(−∞, 1]");
    }

    #[test]
    fn quadratic_outside_roots() {
        assert_eq!(
            solve("x^2 - 5x + 6", Degree::Quadratic, Comparison::GreaterEq),
            "(−∞, 2] ∪ [3, +∞)",
        );
    }

    #[test]
    fn quadratic_between_roots() {
        assert_eq!(solve("x^2 - 5x + 6", Degree::Quadratic, Comparison::Less), "(2, 3)");
    }

    #[test]
    fn double_root_strict() {
        assert_eq!(solve("x^2", Degree::Quadratic, Comparison::Greater), "(−∞, 0) ∪ (0, +∞)");
        assert_eq!(solve("x^2", Degree::Quadratic, Comparison::Less), "Ø");
    }

    #[test]
    fn double_root_non_strict() {
        assert_eq!(solve("x^2", Degree::Quadratic, Comparison::GreaterEq), "(−∞, +∞)");
        assert_eq!(solve("x^2", Degree::Quadratic, Comparison::LessEq), "[0, 0]");
    }

    #[test]
    fn wide_quadratic_closed_endpoints() {
        let set = solve_inequality(
            &Engine,
            "x^2 - 1000000x + 1",
            Degree::Quadratic,
            Comparison::GreaterEq,
            &SolverConfig::default(),
            &mut (),
        ).unwrap();
        let intervals = set.intervals();
        assert_eq!(intervals.len(), 2);

        let small = intervals[0].high().unwrap();
        assert!((small - 1.000000000001e-6).abs() < 1e-15, "small root {}", small);
        assert!(intervals[0].include_high());
        assert!(intervals[1].include_low());
        assert!(!set.contains(1.000001e-6));
    }

    #[test]
    fn zero_endpoint_is_positive_zero() {
        let set = solve_inequality(&Engine, "x^2", Degree::Quadratic, Comparison::LessEq, &SolverConfig::default(), &mut ())
            .unwrap();
        let low = set.intervals()[0].low().unwrap();
        assert!(low == 0.0 && low.is_sign_positive());
    }

    #[test]
    fn no_roots() {
        assert_eq!(solve("x^2 + 1", Degree::Quadratic, Comparison::Greater), "(−∞, +∞)");
        assert_eq!(solve("x^2 + 1", Degree::Quadratic, Comparison::LessEq), "Ø");
    }

    #[test]
    fn constant() {
        assert_eq!(solve("0", Degree::Constant, Comparison::GreaterEq), "(−∞, +∞)");
        assert_eq!(solve("-3", Degree::Constant, Comparison::Greater), "Ø");
    }

    #[test]
    fn steps_describe_regions() {
        let mut steps = Vec::new();
        solve_inequality(
            &Engine,
            "x^2 - 5x + 6",
            Degree::Quadratic,
            Comparison::Less,
            &SolverConfig::default(),
            &mut steps,
        ).unwrap();
        assert_eq!(steps, vec![
            "let f(x) = x^2 - 5x + 6 and check its sign in each region".to_string(),
            "Δ = 1".to_string(),
            "roots: 2, 3".to_string(),
            "on (−∞, 2): f(1) = 2, dropped".to_string(),
            "on (2, 3): f(2.5) = -0.25, kept".to_string(),
            "on (3, +∞): f(4) = 2, dropped".to_string(),
        ]);
    }

    #[test]
    fn random_interval_coverage() {
        let ops = Comparison::SEARCH_ORDER;
        let mut rng = rand::thread_rng();
        for _ in 0..40 {
            let a = rng.gen_range(-5..=5);
            let b = rng.gen_range(-20..=20);
            let c = rng.gen_range(-50..=50);
            let op = ops[rng.gen_range(0..ops.len())];
            let degree = match (a, b) {
                (0, 0) => Degree::Constant,
                (0, _) => Degree::Linear,
                _ => Degree::Quadratic,
            };
            let f = Engine.simplify(&format!("({})x^2 + ({})x + ({})", a, b, c)).unwrap();
            let set = solve_inequality(&Engine, &f, degree, op, &SolverConfig::default(), &mut ())
                .unwrap();

            let (a, b, c) = (a as f64, b as f64, c as f64);
            let boundaries = set.intervals()
                .iter()
                .flat_map(|i| [i.low(), i.high()])
                .flatten()
                .collect::<Vec<_>>();
            let mut x = -1000.0;
            while x <= 1000.0 {
                if boundaries.iter().all(|bound| (x - bound).abs() > 1e-6) {
                    let value = a * x * x + b * x + c;
                    assert_eq!(set.contains(x), op.holds(value), "x = {} in `{} {} 0`: {}", x, f, op, set);
                }
                x += 0.173;
            }
        }
    }
}

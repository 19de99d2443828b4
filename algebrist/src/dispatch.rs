//! Routing a query to the solver that understands it.
//!
//! Routes are tried in a fixed order and the first one to produce a [`Solution`] wins. A route
//! that recognizes the shape of the query but cannot solve it answers with a
//! [`Kind::NotSupported`] solution explaining why, instead of passing the query on.

use algebrist_error::Error;
use algebrist_symbolic::{error::SingularMatrix, Engine, SymbolicService};
use crate::{
    absolute::{solve_abs_equation, solve_abs_inequality, split_abs_compare, AbsOp, AbsQuery},
    config::SolverConfig,
    equation::{
        assignment,
        roots_summary,
        solve_linear,
        solve_linear_system,
        solve_quadratic,
        verify_roots,
        SYSTEM_VARS,
    },
    error::{DegreeTooHigh, EmptyQuery, NonLinear},
    extract::{degree, linear_coeffs, linear_coeffs_xyz, quadratic_coeffs, Degree},
    fmt::num,
    inequality::{solve_inequality, split_comparison},
    normalize::{compact, normalize_whitespace, only_variables_in, to_zero_form},
    sequence::{progression, triangular},
    solution::{Kind, Outcome, Solution},
};

/// The answer given to queries that no route understands.
pub const SUPPORTED: &str = "supported: linear and quadratic equations and inequalities in x \
    (including |g(x)| compared to a constant), 2×2 and 3×3 linear systems, and sequences: \
    triangular numbers, arithmetic and geometric progressions";

/// A query, split into the forms the routes look at.
#[derive(Debug, Clone)]
struct Query<'a> {
    /// The query as given.
    raw: &'a str,

    /// The query with whitespace runs collapsed.
    text: String,

    /// The non-empty lines of the query, split on newlines and `;`.
    lines: Vec<&'a str>,
}

impl<'a> Query<'a> {
    fn new(raw: &'a str) -> Self {
        let lines = raw.split(['\n', ';'])
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        Self {
            raw,
            text: normalize_whitespace(raw),
            lines,
        }
    }

    /// Returns the compacted line if the query is a single line.
    fn single_line(&self) -> Option<String> {
        match self.lines[..] {
            [line] => Some(compact(line)),
            _ => None,
        }
    }
}

/// The result of trying one route.
#[derive(Debug)]
enum Attempt {
    /// The route answered the query.
    Solved(Solution),

    /// The route does not apply; try the next one.
    Pass,
}

impl From<Option<Solution>> for Attempt {
    fn from(solution: Option<Solution>) -> Self {
        solution.map_or(Self::Pass, Self::Solved)
    }
}

type Route<S> = fn(&Solver<S>, &Query) -> Attempt;

/// Classifies and solves free-text math queries.
///
/// ```
/// use algebrist::{Solver, solution::Outcome};
///
/// let solver = Solver::new();
/// let solution = solver.solve("x^2 + 3x = 4").unwrap();
/// assert_eq!(solution.outcome, Outcome::Roots(vec![1.0, -4.0]));
/// assert_eq!(solution.pretty, "x₁ = 1, x₂ = -4");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Solver<S = Engine> {
    config: SolverConfig,
    service: S,
}

impl Solver<Engine> {
    /// Creates a solver with the default tolerances.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a solver with the given tolerances.
    pub fn with_config(config: SolverConfig) -> Self {
        Self { config, service: Engine }
    }
}

impl<S: SymbolicService> Solver<S> {
    /// The routes, in the order they are tried.
    const ROUTES: [(&'static str, Route<S>); 7] = [
        ("triangular", Self::triangular),
        ("progression", Self::progression),
        ("linear system", Self::linear_system),
        ("absolute value", Self::absolute_value),
        ("inequality", Self::inequality),
        ("equation", Self::equation),
        ("fallback", Self::fallback),
    ];

    /// Creates a solver backed by the given symbolic engine.
    pub fn with_service(service: S, config: SolverConfig) -> Self {
        Self { config, service }
    }

    /// The tolerances of the solver.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Classifies and solves the query.
    ///
    /// Returns an error only if the query is blank. A query that cannot be solved is answered with
    /// a [`Kind::NotSupported`] solution.
    pub fn solve(&self, query: &str) -> Result<Solution, Error> {
        if query.trim().is_empty() {
            return Err(Error::new(Vec::new(), EmptyQuery));
        }

        let query = Query::new(query);
        for (name, route) in Self::ROUTES {
            tracing::debug!(route = name, "trying route");
            if let Attempt::Solved(solution) = route(self, &query) {
                tracing::debug!(route = name, kind = %solution.kind, "solved");
                return Ok(solution);
            }
        }

        // the fallback route always answers
        Ok(Solution::not_supported(SUPPORTED))
    }

    fn triangular(&self, query: &Query) -> Attempt {
        triangular::recognize(&query.text).into()
    }

    fn progression(&self, query: &Query) -> Attempt {
        progression::recognize(&query.text).into()
    }

    fn linear_system(&self, query: &Query) -> Attempt {
        let n = query.lines.len();
        if !(2..=3).contains(&n) {
            return Attempt::Pass;
        }

        let lines = query.lines.iter().map(|line| compact(line)).collect::<Vec<_>>();
        if lines.iter().any(|line| !line.contains('=')) {
            return Attempt::Pass;
        }

        let mut forms = Vec::with_capacity(n);
        for line in &lines {
            let f = match to_zero_form(&self.service, line) {
                Ok(f) => f,
                Err(err) => return not_supported(format!("could not read the equation `{}`: {}", line, err)),
            };
            if !only_variables_in(&f, &['x', 'y', 'z']) {
                return not_supported("systems support only the variables x, y and z");
            }
            forms.push(f);
        }

        let rows = forms.iter()
            .map(|f| linear_coeffs_xyz(&self.service, f))
            .collect::<Result<Vec<_>, _>>();
        let rows = match rows {
            Ok(rows) => rows,
            Err(err) if err.is::<NonLinear>() => {
                return not_supported("only linear systems are supported, without powers or products of variables");
            },
            Err(err) => return not_supported(err.to_string()),
        };

        let mut steps = Vec::new();
        let values = match solve_linear_system(&self.service, &rows, &mut steps) {
            Ok(values) => values,
            Err(err) if err.is::<SingularMatrix>() => {
                return not_supported("the system does not have a unique solution");
            },
            Err(err) => return not_supported(err.to_string()),
        };

        let kind = if n == 2 { Kind::Linear2x2 } else { Kind::Linear3x3 };
        let pretty = assignment(&values);
        let outcome = Outcome::Assignment(
            SYSTEM_VARS.iter().map(|var| var.to_string()).zip(values).collect(),
        );
        let normalized = forms.iter()
            .map(|f| format!("{} = 0", f))
            .collect::<Vec<_>>()
            .join("; ");
        Attempt::Solved(Solution::new(kind, outcome, pretty).with_steps(steps).with_normalized(normalized))
    }

    fn absolute_value(&self, query: &Query) -> Attempt {
        let Some(line) = query.single_line() else {
            return Attempt::Pass;
        };
        let Some(AbsQuery { inner, op, bound }) = split_abs_compare(&line) else {
            return Attempt::Pass;
        };

        if bound.chars().any(|c| c.is_ascii_alphabetic()) {
            return not_supported("absolute values are supported only when the other side is a constant");
        }
        let k = match self.service.evaluate(bound, &[]) {
            Ok(k) if k >= 0.0 => k,
            _ => return not_supported("the constant must be a finite, non-negative number"),
        };
        if !only_variables_in(inner, &['x']) {
            return not_supported("absolute values are supported only in x");
        }

        let mut steps = vec![format!("given: |{}| {} {}", inner, op, num(k))];
        match op {
            AbsOp::Eq => match solve_abs_equation(&self.service, inner, bound, &self.config, &mut steps) {
                Ok(None) => {
                    steps.push("the equation holds for every x".to_string());
                    let solution = Solution::new(Kind::AbsEq, Outcome::AllReals, "every x is a solution");
                    Attempt::Solved(solution.with_steps(steps))
                },
                Ok(Some(roots)) => {
                    let pretty = match roots.is_empty() {
                        true => "no solution".to_string(),
                        false => format!(
                            "x ∈ {{ {} }}",
                            roots.iter().map(|x| num(*x)).collect::<Vec<_>>().join(", "),
                        ),
                    };
                    Attempt::Solved(Solution::new(Kind::AbsEq, Outcome::Roots(roots), pretty).with_steps(steps))
                },
                Err(err) => not_supported_abs(err),
            },
            AbsOp::Cmp(op) => match solve_abs_inequality(&self.service, inner, op, bound, &self.config, &mut steps) {
                Ok(set) => {
                    let pretty = format!("solution set: {}", set);
                    Attempt::Solved(Solution::new(Kind::AbsIneq, Outcome::Intervals(set), pretty).with_steps(steps))
                },
                Err(err) => not_supported_abs(err),
            },
        }
    }

    fn inequality(&self, query: &Query) -> Attempt {
        let Some(line) = query.single_line() else {
            return Attempt::Pass;
        };
        let Some((left, op, right)) = split_comparison(&line) else {
            return Attempt::Pass;
        };
        if !only_variables_in(left, &['x']) || !only_variables_in(right, &['x']) {
            return Attempt::Pass;
        }
        let Ok(f) = self.service.simplify(&format!("({}) - ({})", left, right)) else {
            return Attempt::Pass;
        };

        let deg = match degree(&self.service, &f) {
            Ok(deg @ (Degree::Linear | Degree::Quadratic)) => deg,
            Ok(Degree::Constant) | Err(_) => {
                return not_supported("inequalities are supported for degree 1 or 2 in x");
            },
        };

        let mut steps = Vec::new();
        match solve_inequality(&self.service, &f, deg, op, &self.config, &mut steps) {
            Ok(set) => {
                let pretty = format!("solution set: {}", set);
                Attempt::Solved(
                    Solution::new(Kind::Inequality, Outcome::Intervals(set), pretty)
                        .with_steps(steps)
                        .with_normalized(format!("{} {} 0", f, op)),
                )
            },
            Err(err) => not_supported(err.to_string()),
        }
    }

    fn equation(&self, query: &Query) -> Attempt {
        let Some(line) = query.single_line() else {
            return Attempt::Pass;
        };
        let Ok(f) = to_zero_form(&self.service, &line) else {
            return Attempt::Pass;
        };
        if !only_variables_in(&f, &['x']) {
            return Attempt::Pass;
        }

        let deg = match degree(&self.service, &f) {
            Ok(deg) => deg,
            Err(err) if err.is::<DegreeTooHigh>() => {
                return not_supported("only equations of degree 2 or less in x are supported");
            },
            Err(err) => {
                tracing::debug!(%err, "not an equation");
                return Attempt::Pass;
            },
        };

        match self.solve_equation(&f, deg) {
            Ok(solution) => Attempt::Solved(solution.with_normalized(format!("{} = 0", f))),
            Err(err) => not_supported(err.to_string()),
        }
    }

    /// Solves `f = 0` for an expression of known degree.
    fn solve_equation(&self, f: &str, deg: Degree) -> Result<Solution, Error> {
        let mut steps = Vec::new();
        let (kind, roots) = match deg {
            Degree::Constant => {
                let value = self.service.evaluate(f, &[])?;
                let pretty = if value.abs() < self.config.zero_tolerance {
                    "identity: true for every x (infinitely many solutions)"
                } else {
                    "contradiction: no solution"
                };
                steps.push(format!("the equation reduces to {} = 0", num(value)));
                return Ok(Solution::new(Kind::Constant, Outcome::Value(value), pretty).with_steps(steps));
            },
            Degree::Linear => {
                let x = solve_linear(linear_coeffs(&self.service, f)?, &mut steps);
                (Kind::Linear1Var, vec![x])
            },
            Degree::Quadratic => {
                let roots = solve_quadratic(quadratic_coeffs(&self.service, f)?, &self.config, &mut steps);
                (Kind::Quadratic, roots)
            },
        };

        let failed = verify_roots(&self.service, f, &roots, &self.config, &mut steps)?;
        let mut pretty = roots_summary(&roots);
        if failed > 0 {
            pretty.push_str(" (not verified)");
        }
        Ok(Solution::new(kind, Outcome::Roots(roots), pretty).with_steps(steps))
    }

    fn fallback(&self, query: &Query) -> Attempt {
        tracing::debug!(query = query.raw, "no route understood the query");
        not_supported(SUPPORTED)
    }
}

fn not_supported(reason: impl Into<String>) -> Attempt {
    Attempt::Solved(Solution::not_supported(reason))
}

fn not_supported_abs(err: Error) -> Attempt {
    tracing::debug!(%err, "absolute value branch failed");
    if err.is::<DegreeTooHigh>() {
        not_supported("absolute values are supported only up to degree 2")
    } else {
        not_supported(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use crate::solution::IntervalSet;
    use pretty_assertions::assert_eq;
    use super::*;

    fn solve(query: &str) -> Solution {
        Solver::new().solve(query).unwrap()
    }

    fn intervals(solution: &Solution) -> &IntervalSet {
        match &solution.outcome {
            Outcome::Intervals(set) => set,
            outcome => panic!("expected intervals, got {:?}", outcome),
        }
    }

    #[test]
    fn empty_query() {
        let err = Solver::new().solve(" \n\t ").unwrap_err();
        assert!(err.is::<EmptyQuery>());
    }

    #[test]
    fn quadratic_equation() {
        let solution = solve("x^2 + 3x = 4");
        assert_eq!(solution.kind, Kind::Quadratic);
        assert_eq!(solution.outcome, Outcome::Roots(vec![1.0, -4.0]));
        assert_eq!(solution.normalized.as_deref(), Some("x^2 + 3x - 4 = 0"));
    }

    #[test]
    fn linear_equation() {
        let solution = solve("3(x+2) = 5x - 1");
        assert_eq!(solution.kind, Kind::Linear1Var);
        assert_eq!(solution.outcome, Outcome::Roots(vec![3.5]));
        assert_eq!(solution.pretty, "x = 3.5");
    }

    #[test]
    fn constant_equations() {
        let identity = solve("2(x+1) = 2x + 2");
        assert_eq!(identity.kind, Kind::Constant);
        assert_eq!(identity.outcome, Outcome::Value(0.0));

        let contradiction = solve("x + 1 = x");
        assert_eq!(contradiction.kind, Kind::Constant);
        assert_eq!(contradiction.pretty, "contradiction: no solution");
    }

    #[test]
    fn cubic_is_not_supported() {
        let solution = solve("x^3 - x = 0");
        assert_eq!(solution.kind, Kind::NotSupported);
        assert!(matches!(solution.outcome, Outcome::Unsupported(_)));
    }

    #[test]
    fn unicode_glyphs() {
        let solution = solve("x² − 4 = 0");
        assert_eq!(solution.outcome, Outcome::Roots(vec![2.0, -2.0]));
    }

    #[test]
    fn inequality() {
        let solution = solve("x^2 - 5x + 6 >= 0");
        assert_eq!(solution.kind, Kind::Inequality);
        assert_eq!(intervals(&solution).to_string(), "(−∞, 2] ∪ [3, +∞)");
        assert_eq!(solution.normalized.as_deref(), Some("x^2 - 5x + 6 >= 0"));
    }

    #[test]
    fn constant_inequality_is_not_supported() {
        assert_eq!(solve("x + 1 > x").kind, Kind::NotSupported);
    }

    #[test]
    fn absolute_value_equation() {
        let solution = solve("|x-3| = 2");
        assert_eq!(solution.kind, Kind::AbsEq);
        assert_eq!(solution.outcome, Outcome::Roots(vec![1.0, 5.0]));
        assert_eq!(solution.pretty, "x ∈ { 1, 5 }");
    }

    #[test]
    fn absolute_value_inequality() {
        let solution = solve("|x-3| <= 2");
        assert_eq!(solution.kind, Kind::AbsIneq);
        assert_eq!(intervals(&solution).to_string(), "[1, 5]");
    }

    #[test]
    fn absolute_value_greater_intersects() {
        let solution = solve("|x-3| >= 2");
        assert_eq!(solution.kind, Kind::AbsIneq);
        assert!(intervals(&solution).is_empty());
    }

    #[test]
    fn absolute_value_bounds() {
        assert_eq!(solve("|x-3| = y").kind, Kind::NotSupported);
        assert_eq!(solve("|x-3| = -1").kind, Kind::NotSupported);
        assert_eq!(solve("|y-3| = 1").kind, Kind::NotSupported);
        assert_eq!(solve("|x^3| = 1").kind, Kind::NotSupported);
    }

    #[test]
    fn two_by_two_system() {
        let solution = solve("2x + 3y = 7; 4x - y = 5");
        assert_eq!(solution.kind, Kind::Linear2x2);
        let Outcome::Assignment(values) = &solution.outcome else {
            panic!("expected an assignment, got {:?}", solution.outcome);
        };
        assert_eq!(values[0].0, "x");
        assert_relative_eq!(values[0].1, 2.0, epsilon = 1e-9);
        assert_eq!(values[1].0, "y");
        assert_relative_eq!(values[1].1, 1.0, epsilon = 1e-9);
        assert_eq!(solution.pretty, "x = 2, y = 1");
    }

    #[test]
    fn three_by_three_system() {
        let solution = solve("x + y + z = 6\n2x - y + z = 3\n3x + 2y - z = 10");
        assert_eq!(solution.kind, Kind::Linear3x3);
        let Outcome::Assignment(values) = &solution.outcome else {
            panic!("expected an assignment, got {:?}", solution.outcome);
        };
        let names = values.iter().map(|(name, _)| name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["x", "y", "z"]);
    }

    #[test]
    fn singular_system() {
        let solution = solve("x + 2y = 3\n2x + 4y = 6");
        assert_eq!(solution.kind, Kind::NotSupported);
        assert_eq!(solution.pretty, "the system does not have a unique solution");
    }

    #[test]
    fn nonlinear_system() {
        let solution = solve("x*y = 3\nx + y = 4");
        assert_eq!(solution.kind, Kind::NotSupported);
    }

    #[test]
    fn system_with_foreign_variable() {
        let solution = solve("x + w = 3\nx - y = 1");
        assert_eq!(solution.kind, Kind::NotSupported);
        assert_eq!(solution.pretty, "systems support only the variables x, y and z");
    }

    #[test]
    fn two_equations_with_z() {
        assert_eq!(solve("x + y + z = 1\nx - y = 0").kind, Kind::NotSupported);
    }

    #[test]
    fn four_lines_fall_through() {
        let solution = solve("x = 1\ny = 2\nz = 3\nx + y = 4");
        assert_eq!(solution.kind, Kind::NotSupported);
        assert_eq!(solution.pretty, SUPPORTED);
    }

    #[test]
    fn two_lines_without_equations_fall_through() {
        let solution = solve("x^2 - 1 > 0\nx < 5");
        assert_eq!(solution.kind, Kind::NotSupported);
        assert_eq!(solution.pretty, SUPPORTED);
    }

    #[test]
    fn sequence_wins_over_equation() {
        let solution = solve("סדרה חשבונית a1=3 d=2 מצא a_10, x^2 = 4");
        assert_eq!(solution.kind, Kind::ApValue);

        let solution = solve("triangular numbers: is 28 a triangular number? x = 3");
        assert_eq!(solution.kind, Kind::TriangularMembership);
    }

    #[test]
    fn free_text_is_not_supported() {
        let solution = solve("what is the capital of France?");
        assert_eq!(solution.kind, Kind::NotSupported);
        assert_eq!(solution.pretty, SUPPORTED);
    }

    #[test]
    fn unverified_roots_are_flagged() {
        let solver = Solver::with_config(SolverConfig::default().into_builder().root_tolerance(1e-20).build());
        let solution = solver.solve("x^2 = 2").unwrap();
        assert_eq!(solution.kind, Kind::Quadratic);
        assert!(solution.pretty.ends_with(" (not verified)"), "{}", solution.pretty);
        assert_eq!(
            solution.steps.last().map(String::as_str),
            Some("2 of 2 roots did not pass the check and may be inaccurate"),
        );

        let exact = solver.solve("x^2 + 3x = 4").unwrap();
        assert_eq!(exact.pretty, "x₁ = 1, x₂ = -4");
    }

    #[test]
    fn custom_tolerance() {
        let solver = Solver::with_config(SolverConfig::default().into_builder().root_tolerance(1e-3).build());
        assert_eq!(solver.config().root_tolerance, 1e-3);
        assert_eq!(solver.solve("2x = 1").unwrap().outcome, Outcome::Roots(vec![0.5]));
    }
}

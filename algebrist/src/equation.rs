//! Closed-form solvers for equations of degree 2 or less, and for linear systems.

use algebrist_error::Error;
use algebrist_symbolic::{StepCollector, SymbolicService};
use crate::{
    config::SolverConfig,
    error::UnexpectedThirdVariable,
    extract::{Linear, LinearForm, Quadratic, VAR},
    fmt::{num, terms},
};

/// Solves `ax + c = 0`. The caller must ensure that `a != 0`.
pub fn solve_linear(Linear { a, c }: Linear, steps: &mut dyn StepCollector<String>) -> f64 {
    let x = -c / a + 0.0;
    steps.push(format!("collect the terms: {} = 0", terms(&[(a, "x"), (c, "")])));
    steps.push(format!("{}x = {}", num(a), num(-c)));
    steps.push(format!("x = {} / {} = {}", num(-c), num(a), num(x)));
    x
}

/// Solves `ax^2 + bx + c = 0`, returning the real roots with the larger root first. The caller
/// must ensure that `a != 0`.
///
/// A discriminant smaller in magnitude than [`SolverConfig::zero_tolerance`] is treated as zero,
/// giving a single root. Otherwise the root away from zero comes from `q = -(b + sign(b)·√Δ) / 2`
/// and the other from `c / q`, so neither is computed by subtracting nearly equal values.
pub fn solve_quadratic(
    Quadratic { a, b, c }: Quadratic,
    config: &SolverConfig,
    steps: &mut dyn StepCollector<String>,
) -> Vec<f64> {
    steps.push(format!(
        "bring everything to one side: {} = 0",
        terms(&[(a, "x^2"), (b, "x"), (c, "")]),
    ));
    steps.push("quadratic formula: x = (-b ± √(b² - 4ac)) / (2a)".to_string());

    let discriminant = b * b - 4.0 * a * c;
    steps.push(format!(
        "Δ = b² - 4ac = ({})² - 4·({})·({}) = {}",
        num(b), num(a), num(c), num(discriminant),
    ));

    if discriminant.abs() < config.zero_tolerance {
        let x = -b / (2.0 * a) + 0.0;
        steps.push(format!("Δ = 0, so there is a single root: x = -({}) / (2·({})) = {}", num(b), num(a), num(x)));
        return vec![x];
    }

    if discriminant < 0.0 {
        steps.push("Δ < 0, so there are no real solutions".to_string());
        return Vec::new();
    }

    // signum(0.0) is 1.0, and q != 0 because Δ > 0
    let sqrt = discriminant.sqrt();
    let q = -(b + b.signum() * sqrt) / 2.0;
    let x1 = q / a + 0.0;
    let x2 = c / q + 0.0;
    steps.push(format!("√Δ = {}", num(sqrt)));
    steps.push(format!("q = -(b + sign(b)·√Δ) / 2 = -(({}) + {}·{}) / 2 = {}", num(b), num(b.signum()), num(sqrt), num(q)));
    steps.push(format!("x₁ = q / a = {} / ({}) = {}", num(q), num(a), num(x1)));
    steps.push(format!("x₂ = c / q = {} / ({}) = {}", num(c), num(q), num(x2)));

    if x1 >= x2 {
        vec![x1, x2]
    } else {
        vec![x2, x1]
    }
}

/// The variables of a linear system, in column order.
pub const SYSTEM_VARS: [&str; 3] = ["x", "y", "z"];

/// Solves a system of 2 or 3 linear equations `ax + by + cz + d = 0`, returning the values of `x`,
/// `y` and, for 3 equations, `z`.
///
/// A system of 2 equations must not use `z`. Returns the service's error if the system is
/// singular.
pub fn solve_linear_system<S>(
    service: &S,
    rows: &[LinearForm],
    steps: &mut dyn StepCollector<String>,
) -> Result<Vec<f64>, Error>
where
    S: SymbolicService + ?Sized,
{
    let n = rows.len();
    if n == 2 && rows.iter().any(|row| row.c != 0.0) {
        return Err(Error::new(Vec::new(), UnexpectedThirdVariable));
    }

    let matrix = rows.iter()
        .map(|row| [row.a, row.b, row.c][..n].to_vec())
        .collect::<Vec<_>>();
    let rhs = rows.iter().map(|row| -row.d).collect::<Vec<_>>();

    steps.push("write the system as a matrix and solve it with LU decomposition:".to_string());
    for row in rows {
        let units = [(row.a, "x"), (row.b, "y"), (row.c, "z"), (row.d, "")];
        steps.push(format!("{} = 0", terms(&units[..])));
    }

    let solution = service.solve_linear(&matrix, &rhs)?;
    steps.push(format!("result: {}", assignment(&solution)));
    Ok(solution)
}

/// Formats the solution of a linear system as `x = 2, y = 1`.
pub fn assignment(values: &[f64]) -> String {
    SYSTEM_VARS.iter()
        .zip(values)
        .map(|(var, value)| format!("{} = {}", var, num(*value)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Formats a set of roots for the summary of a solution.
pub fn roots_summary(roots: &[f64]) -> String {
    match roots {
        [] => "no real solutions".to_string(),
        [x] => format!("x = {}", num(*x)),
        roots => roots.iter()
            .enumerate()
            .map(|(i, x)| format!("x{} = {}", subscript(i + 1), num(*x)))
            .collect::<Vec<_>>()
            .join(", "),
    }
}

/// Returns the subscript form of a small index.
fn subscript(n: usize) -> String {
    n.to_string()
        .chars()
        .map(|c| match c {
            '0' => '₀',
            '1' => '₁',
            '2' => '₂',
            '3' => '₃',
            '4' => '₄',
            '5' => '₅',
            '6' => '₆',
            '7' => '₇',
            '8' => '₈',
            '9' => '₉',
            c => c,
        })
        .collect()
}

/// Checks a root by substituting it into `f`, recording the check as a step. Returns true if the
/// residual is within [`SolverConfig::root_tolerance`].
pub fn verify_root<S>(
    service: &S,
    f: &str,
    root: f64,
    config: &SolverConfig,
    steps: &mut dyn StepCollector<String>,
) -> Result<bool, Error>
where
    S: SymbolicService + ?Sized,
{
    let residual = service.evaluate(f, &[(VAR, root)])?;
    let ok = residual.abs() <= config.root_tolerance;
    if ok {
        steps.push(format!("check: f({}) = {} ✓", num(root), num(residual)));
    } else {
        tracing::warn!(f, root, residual, "root failed verification");
        steps.push(format!("check: f({}) = {}, which is not zero", num(root), num(residual)));
    }
    Ok(ok)
}

/// Checks every root with [`verify_root`], returning how many failed. A step notes the failures.
pub fn verify_roots<S>(
    service: &S,
    f: &str,
    roots: &[f64],
    config: &SolverConfig,
    steps: &mut dyn StepCollector<String>,
) -> Result<usize, Error>
where
    S: SymbolicService + ?Sized,
{
    let mut failed = 0;
    for &root in roots {
        if !verify_root(service, f, root, config, steps)? {
            failed += 1;
        }
    }
    if failed > 0 {
        steps.push(format!("{} of {} roots did not pass the check and may be inaccurate", failed, roots.len()));
    }
    Ok(failed)
}

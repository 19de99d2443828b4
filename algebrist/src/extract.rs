//! Degree detection and coefficient extraction.
//!
//! The degree of an expression in `x` is found by probing its derivatives at the origin instead of
//! inspecting its terms: if `f''(0) != 0` the expression is quadratic, else if `f'(0) != 0` it is
//! linear, else it is constant. The coefficients come out of the same probes.
//!
//! Probing is only correct for polynomials of degree 2 or less, so the third derivative is checked
//! to be identically zero first. `x^3 - x` would otherwise be mistaken for the linear `-x`.

use algebrist_error::Error;
use algebrist_symbolic::SymbolicService;
use crate::error::{DegreeTooHigh, NonLinear, UnknownDegree};
use std::fmt;

/// The variable of single-variable expressions.
pub const VAR: &str = "x";

/// The degree of a polynomial in `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Degree {
    Constant,
    Linear,
    Quadratic,
}

impl fmt::Display for Degree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = match self {
            Self::Constant => 0,
            Self::Linear => 1,
            Self::Quadratic => 2,
        };
        write!(f, "{}", n)
    }
}

/// The coefficients of `ax + c`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Linear {
    pub a: f64,
    pub c: f64,
}

/// The coefficients of `ax^2 + bx + c`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quadratic {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

/// The coefficients of `ax + by + cz + d`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearForm {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

/// Wraps a failure of the symbolic engine into an [`UnknownDegree`] error.
fn unknown(expr: &str) -> impl FnOnce(Error) -> Error + '_ {
    move |err| Error::new(Vec::new(), UnknownDegree {
        expr: expr.to_string(),
        reason: err.to_string(),
    })
}

/// The derivatives of an expression in `x`, up to the second.
struct Probe {
    first: String,
    second: String,
}

impl Probe {
    /// Differentiates the expression, checking that it has degree 2 or less.
    fn new<S>(service: &S, f: &str) -> Result<Self, Error>
    where
        S: SymbolicService + ?Sized,
    {
        let first = service.derivative(f, VAR).map_err(unknown(f))?;
        let second = service.derivative(&first, VAR).map_err(unknown(f))?;
        let third = service.derivative(&second, VAR).map_err(unknown(f))?;
        if third != "0" {
            tracing::debug!(f, %third, "third derivative is not zero");
            return Err(Error::new(Vec::new(), DegreeTooHigh {
                expr: f.to_string(),
                var: VAR.to_string(),
            }));
        }

        Ok(Self { first, second })
    }
}

/// Evaluates the expression at `x = 0`.
fn at_origin<S>(service: &S, expr: &str, f: &str) -> Result<f64, Error>
where
    S: SymbolicService + ?Sized,
{
    service.evaluate(expr, &[(VAR, 0.0)]).map_err(unknown(f))
}

/// Returns the degree of the expression in `x`.
///
/// Returns [`DegreeTooHigh`] if the degree is greater than 2, and [`UnknownDegree`] if the
/// expression cannot be differentiated or evaluated, such as when it is malformed or contains
/// other variables.
pub fn degree<S>(service: &S, f: &str) -> Result<Degree, Error>
where
    S: SymbolicService + ?Sized,
{
    let probe = Probe::new(service, f)?;
    let f2 = at_origin(service, &probe.second, f)?;
    let f1 = at_origin(service, &probe.first, f)?;
    // constant expressions must still evaluate
    at_origin(service, f, f)?;

    let degree = if f2 != 0.0 {
        Degree::Quadratic
    } else if f1 != 0.0 {
        Degree::Linear
    } else {
        Degree::Constant
    };
    tracing::trace!(f, %degree, "probed degree");
    Ok(degree)
}

/// Extracts the coefficients of a quadratic expression in `x`.
pub fn quadratic_coeffs<S>(service: &S, f: &str) -> Result<Quadratic, Error>
where
    S: SymbolicService + ?Sized,
{
    let probe = Probe::new(service, f)?;
    Ok(Quadratic {
        a: at_origin(service, &probe.second, f)? / 2.0,
        b: at_origin(service, &probe.first, f)?,
        c: at_origin(service, f, f)?,
    })
}

/// Extracts the coefficients of a linear expression in `x`.
pub fn linear_coeffs<S>(service: &S, f: &str) -> Result<Linear, Error>
where
    S: SymbolicService + ?Sized,
{
    let probe = Probe::new(service, f)?;
    Ok(Linear {
        a: at_origin(service, &probe.first, f)?,
        c: at_origin(service, f, f)?,
    })
}

const XYZ: [&str; 3] = ["x", "y", "z"];

/// Returns true if the expression is linear in `x`, `y` and `z`: all six second partial
/// derivatives are identically zero.
pub fn is_linear_xyz<S>(service: &S, f: &str) -> bool
where
    S: SymbolicService + ?Sized,
{
    let check = || -> Result<bool, Error> {
        for (i, first_var) in XYZ.iter().enumerate() {
            let first = service.derivative(f, first_var)?;
            for second_var in &XYZ[i..] {
                if service.derivative(&first, second_var)? != "0" {
                    return Ok(false);
                }
            }
        }
        Ok(true)
    };

    check().unwrap_or_else(|err| {
        tracing::debug!(f, %err, "linearity check failed");
        false
    })
}

/// Extracts the coefficients of an expression linear in `x`, `y` and `z`.
///
/// Returns [`NonLinear`] if the expression is not linear.
pub fn linear_coeffs_xyz<S>(service: &S, f: &str) -> Result<LinearForm, Error>
where
    S: SymbolicService + ?Sized,
{
    if !is_linear_xyz(service, f) {
        return Err(Error::new(Vec::new(), NonLinear { expr: f.to_string() }));
    }

    let origin = [("x", 0.0), ("y", 0.0), ("z", 0.0)];
    let partial = |var: &str| -> Result<f64, Error> {
        service.evaluate(&service.derivative(f, var)?, &origin)
    };
    Ok(LinearForm {
        a: partial("x")?,
        b: partial("y")?,
        c: partial("z")?,
        d: service.evaluate(f, &origin)?,
    })
}

#[cfg(test)]
mod tests {
    use algebrist_symbolic::Engine;
    use pretty_assertions::assert_eq;
    use rand::Rng;
    use super::*;

    #[test]
    fn degree_of_simple_expressions() {
        assert_eq!(degree(&Engine, "x^2 + 3x - 4").unwrap(), Degree::Quadratic);
        assert_eq!(degree(&Engine, "-2x + 7").unwrap(), Degree::Linear);
        assert_eq!(degree(&Engine, "5").unwrap(), Degree::Constant);
        assert_eq!(degree(&Engine, "0").unwrap(), Degree::Constant);
    }

    #[test]
    fn cubic_is_too_high() {
        let err = degree(&Engine, "x^3 - x").unwrap_err();
        assert!(err.is::<DegreeTooHigh>());
    }

    #[test]
    fn malformed_is_unknown() {
        let err = degree(&Engine, "x^2 +").unwrap_err();
        assert!(err.is::<UnknownDegree>());
    }

    #[test]
    fn other_variable_is_unknown() {
        let err = degree(&Engine, "x + y").unwrap_err();
        assert!(err.is::<UnknownDegree>());
    }

    #[test]
    fn degree_round_trip() {
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let a = rng.gen_range(-20..=20);
            let b = rng.gen_range(-20..=20);
            let c = rng.gen_range(-20..=20);
            let f = format!("({})x^2 + ({})x + ({})", a, b, c);
            let expected = if a != 0 {
                Degree::Quadratic
            } else if b != 0 {
                Degree::Linear
            } else {
                Degree::Constant
            };
            assert_eq!(degree(&Engine, &f).unwrap(), expected, "degree of `{}`", f);
        }
    }

    #[test]
    fn quadratic_coefficients() {
        assert_eq!(quadratic_coeffs(&Engine, "2x^2 - 3x + 1/2").unwrap(), Quadratic {
            a: 2.0,
            b: -3.0,
            c: 0.5,
        });
    }

    #[test]
    fn linear_coefficients() {
        assert_eq!(linear_coeffs(&Engine, "-2x + 7").unwrap(), Linear { a: -2.0, c: 7.0 });
    }

    #[test]
    fn linear_form() {
        assert!(is_linear_xyz(&Engine, "2x + 3y - 7"));
        assert_eq!(linear_coeffs_xyz(&Engine, "2x + 3y - z - 7").unwrap(), LinearForm {
            a: 2.0,
            b: 3.0,
            c: -1.0,
            d: -7.0,
        });
    }

    #[test]
    fn nonlinear_forms() {
        assert!(!is_linear_xyz(&Engine, "x*y + 1"));
        assert!(!is_linear_xyz(&Engine, "z^2 - x"));
        let err = linear_coeffs_xyz(&Engine, "x^2 + y").unwrap_err();
        assert!(err.is::<NonLinear>());
    }
}

//! Normalization of query text.
//!
//! Queries usually come from people typing on a phone or from OCR, so the same expression shows up
//! with many different spacings and glyphs. Everything here runs before any parsing.

use algebrist_error::Error;
use algebrist_symbolic::SymbolicService;

/// Collapses every run of whitespace into a single space, and trims both ends.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Removes all whitespace and replaces glyphs the parser does not understand with their ASCII
/// equivalents.
///
/// ```
/// use algebrist::normalize::compact;
///
/// assert_eq!(compact("x² − 4 ≥ 3·x"), "x^2-4>=3*x");
/// ```
pub fn compact(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars().filter(|c| !c.is_whitespace()) {
        match c {
            '−' | '–' | '—' | '‐' => out.push('-'),
            '×' | '·' => out.push('*'),
            '÷' => out.push('/'),
            '≤' => out.push_str("<="),
            '≥' => out.push_str(">="),
            '²' => out.push_str("^2"),
            '³' => out.push_str("^3"),
            c => out.push(c),
        }
    }
    out
}

/// Rewrites an equation `L = R` into the expression `L - R` in canonical form, which is implicitly
/// compared to zero. Expressions without `=` are returned unchanged.
///
/// Only the first `=` is split on. Anything after a second `=` ends up in the right side, which
/// then fails to parse.
pub fn to_zero_form<S>(service: &S, expr: &str) -> Result<String, Error>
where
    S: SymbolicService + ?Sized,
{
    match expr.split_once('=') {
        Some((lhs, rhs)) => service.simplify(&format!("({}) - ({})", lhs, rhs)),
        None => Ok(expr.to_string()),
    }
}

/// Returns true if every ASCII letter in the expression is one of the allowed variables, ignoring
/// case.
pub fn only_variables_in(expr: &str, allowed: &[char]) -> bool {
    expr.chars()
        .filter(char::is_ascii_alphabetic)
        .all(|c| allowed.contains(&c.to_ascii_lowercase()))
}

#[cfg(test)]
mod tests {
    use algebrist_symbolic::Engine;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn whitespace_runs() {
        assert_eq!(normalize_whitespace("  2x +\t3 =\n\n 7 "), "2x + 3 = 7");
    }

    #[test]
    fn minus_glyphs() {
        assert_eq!(compact("x − 1 – 2 — 3"), "x-1-2-3");
    }

    #[test]
    fn zero_form() {
        assert_eq!(to_zero_form(&Engine, "x^2+3x=4").unwrap(), "x^2 + 3x - 4");
        assert_eq!(to_zero_form(&Engine, "3(x+2)=5x-1").unwrap(), "-2x + 7");
    }

    #[test]
    fn zero_form_without_equals() {
        assert_eq!(to_zero_form(&Engine, "x^2-1").unwrap(), "x^2-1");
    }

    #[test]
    fn zero_form_is_idempotent() {
        for query in ["x^2+3x=4", "(2x-1)(x+3)=x", "0.5x=1/3", "x=x"] {
            let once = to_zero_form(&Engine, query).unwrap();
            let twice = to_zero_form(&Engine, &format!("{}=0", once)).unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn second_equals_fails() {
        assert!(to_zero_form(&Engine, "x=1=2").is_err());
    }

    #[test]
    fn allowed_variables() {
        assert!(only_variables_in("2X+3y-z", &['x', 'y', 'z']));
        assert!(!only_variables_in("2x+3w", &['x', 'y', 'z']));
        assert!(only_variables_in("12+3", &['x']));
    }
}

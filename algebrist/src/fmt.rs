//! Formatting of numbers in results and steps.

/// The number of significant digits to print.
const SIGNIFICANT_DIGITS: i32 = 12;

/// The largest number of decimal places to print.
const MAX_DECIMALS: i32 = 12;

/// Formats a number for display.
///
/// Integral values are printed without a fractional part. Other values are rounded to 12
/// significant digits, but no more than 12 decimal places, and trailing zeros are removed.
///
/// ```
/// use algebrist::fmt::num;
///
/// assert_eq!(num(2.0), "2");
/// assert_eq!(num(-0.5), "-0.5");
/// assert_eq!(num(1.0 / 3.0), "0.333333333333");
/// assert_eq!(num(0.1 + 0.2), "0.3");
/// ```
pub fn num(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    // adding 0.0 turns -0.0 into 0.0
    let value = value + 0.0;
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{:.0}", value);
    }

    let magnitude = value.abs().log10().floor() as i32 + 1;
    let decimals = (SIGNIFICANT_DIGITS - magnitude).clamp(0, MAX_DECIMALS) as usize;
    let out = format!("{:.*}", decimals, value);
    let out = if out.contains('.') {
        out.trim_end_matches('0').trim_end_matches('.')
    } else {
        &out
    };

    match out {
        "-0" => "0".to_string(),
        out => out.to_string(),
    }
}

/// Formats a sum of terms `coefficient * unit`, such as `2x^2 - 3x + 1`. Terms with a zero
/// coefficient are skipped, and a coefficient of one is only printed for the constant term.
pub fn terms(terms: &[(f64, &str)]) -> String {
    let mut out = String::new();
    for &(coeff, unit) in terms.iter().filter(|(coeff, _)| *coeff != 0.0) {
        let magnitude = match (coeff.abs() == 1.0, unit.is_empty()) {
            (true, false) => String::new(),
            _ => num(coeff.abs()),
        };
        if out.is_empty() {
            if coeff < 0.0 {
                out.push('-');
            }
        } else {
            out.push_str(if coeff < 0.0 { " - " } else { " + " });
        }
        out.push_str(&magnitude);
        out.push_str(unit);
    }

    if out.is_empty() {
        out.push('0');
    }
    out
}

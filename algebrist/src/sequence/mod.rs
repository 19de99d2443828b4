//! Recognition of sequence word problems: triangular numbers, arithmetic progressions and
//! geometric progressions.
//!
//! Recognition is keyword based. A query that mentions a sequence is always answered as a sequence
//! question, even if it also contains an equation. Numbers are pulled out of the text with a list
//! of phrasings per value, tried in order until one matches. Both Hebrew and English phrasings
//! are understood.

pub mod progression;
pub mod triangular;

use regex::Regex;

/// An unsigned decimal or integer, with an optional minus sign.
pub(crate) const NUMBER: &str = r"-?\d+(?:\.\d+)?";

/// Returns the first capture group of the first pattern that matches, parsed as a number.
pub(crate) fn first_number(text: &str, patterns: &[&Regex]) -> Option<f64> {
    patterns.iter().find_map(|re| {
        re.captures(text)?
            .iter()
            .skip(1)
            .flatten()
            .next()?
            .as_str()
            .parse()
            .ok()
    })
}

/// Returns the first capture group of the first pattern that matches, parsed as a positive
/// integer.
pub(crate) fn first_index(text: &str, patterns: &[&Regex]) -> Option<u64> {
    patterns.iter().find_map(|re| {
        re.captures_iter(text).find_map(|caps| {
            let n = caps.iter().skip(1).flatten().next()?.as_str().parse::<u64>().ok()?;
            (n > 0).then_some(n)
        })
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn fallback_order() {
        let equals = Regex::new(&format!(r"\bd\s*=\s*({})", NUMBER)).unwrap();
        let words = Regex::new(&format!(r"difference\s+(?:is\s+)?({})", NUMBER)).unwrap();

        assert_eq!(first_number("d = -2.5", &[&equals, &words]), Some(-2.5));
        assert_eq!(first_number("the difference is 4", &[&equals, &words]), Some(4.0));
        assert_eq!(first_number("d = 1, difference is 4", &[&words, &equals]), Some(4.0));
        assert_eq!(first_number("nothing here", &[&equals, &words]), None);
    }

    #[test]
    fn index_skips_zero() {
        let term = Regex::new(r"term\s+(\d+)").unwrap();
        assert_eq!(first_index("term 0 and term 7", &[&term]), Some(7));
        assert_eq!(first_index("term 99999999999999999999999", &[&term]), None);
    }
}

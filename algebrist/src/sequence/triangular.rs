//! Triangular numbers, `T_n = n(n+1)/2`: the number of dots in a triangle with `n` rows.

use once_cell::sync::Lazy;
use regex::Regex;
use crate::solution::{Kind, Outcome, Solution};
use super::first_index;

/// The general term, as printed in answers.
pub const FORMULA: &str = "T_n = n(n+1)/2";

static DETECT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)משולש|triangular|triangle").unwrap());

static INDEX_HE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"איבר\s*(?:ה\s*-?|-|מס(?:פר|')?)?\s*(\d+)").unwrap()
});
static INDEX_SUBSCRIPT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bT_?\{?(\d+)\}?").unwrap());
static INDEX_ORDINAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d+)(?:st|nd|rd|th)\s+(?:term|figure|element|triangle)").unwrap()
});
static INDEX_TERM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:term|figure|element)\s+(?:number\s+|no\.?\s*|#\s*)?(\d+)").unwrap()
});

static GENERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)נוסחת\s*האיבר\s*הכללי|איבר\s*כללי|חוקיות",
        r"|general\s+(?:term|formula|rule)",
        r"|formula\s+(?:of|for)\s+the\s+(?:nth|n-th)\s+term",
    )).unwrap()
});

static MEMBER_HE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:יכיל|יש|מכיל)\s*(\d+)\s*נקודות|האם\s*(\d+)\s*(?:הוא\s*)?(?:איבר|מספר)").unwrap()
});
static MEMBER_EN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)\bis\s+(\d+)\s+(?:an?\s+)?(?:triangular|term|member|element)",
        r"|\b(?:contains?|has|have)\s+(?:exactly\s+)?(\d+)\s+(?:dots|points)",
    )).unwrap()
});

static SYMBOLIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)איבר\s*n\b|\bterm\s+n\b|\bn-?th\s+term|\bT_?n\b").unwrap()
});

/// Returns the `n`th triangular number.
pub fn triangular_number(n: u64) -> u128 {
    let n = u128::from(n);
    n * (n + 1) / 2
}

/// Returns the largest integer whose square is at most `n`.
fn isqrt(n: u128) -> u128 {
    // the float estimate is off by at most a few units for large n
    let mut root = (n as f64).sqrt() as u128;
    while root * root > n {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= n {
        root += 1;
    }
    root
}

/// Returns `n` such that `T_n = m`, if `m` is a triangular number.
///
/// `n(n+1)/2 = m` means `n² + n - 2m = 0`, which has a natural solution only if the discriminant
/// `1 + 8m` is a perfect square.
pub fn triangular_index(m: u64) -> Option<u64> {
    let discriminant = 1 + 8 * u128::from(m);
    let root = isqrt(discriminant);
    if root * root != discriminant {
        return None;
    }

    // the discriminant is odd, so its root is too
    let n = (root - 1) / 2;
    (n > 0).then(|| u64::try_from(n).ok()).flatten()
}

fn value(n: u64) -> Solution {
    let t = triangular_number(n);
    let steps = vec![
        "recognize the sequence: triangular numbers".to_string(),
        format!("general term: {}", FORMULA),
        format!("substitute n = {}:", n),
        format!("T_{0} = {0}·({0}+1)/2 = {0}·{1}/2 = {2}", n, u128::from(n) + 1, t),
    ];
    Solution::new(Kind::TriangularValue, Outcome::Value(t as f64), format!("term {} has {} dots", n, t))
        .with_steps(steps)
}

fn general() -> Solution {
    let steps = vec![
        "each term is a triangle built from rows of dots".to_string(),
        "term n has 1 + 2 + ... + n dots".to_string(),
        "so T_n = 1 + 2 + ... + n = n(n+1)/2".to_string(),
    ];
    Solution::new(Kind::TriangularGeneral, Outcome::Formula(FORMULA.to_string()), format!("general term: {}", FORMULA))
        .with_steps(steps)
}

fn membership(m: u64) -> Solution {
    let index = triangular_index(m);
    let discriminant = 1 + 8 * u128::from(m);
    let mut steps = vec![
        format!("check whether {} is a triangular number", m),
        format!("solve n(n+1)/2 = {}, so n² + n - {} = 0", m, 2 * u128::from(m)),
        format!("Δ = 1 + 8·{} = {}", m, discriminant),
    ];
    let pretty = match index {
        Some(n) => {
            steps.push(format!("Δ is a perfect square, so n = (-1 + √Δ)/2 = {}", n));
            format!("{} is a triangular number (term {})", m, n)
        },
        None => {
            steps.push("Δ is not a perfect square, so no natural n satisfies the equation".to_string());
            format!("{} is not a triangular number", m)
        },
    };
    let outcome = Outcome::Membership { member: index.is_some(), index };
    Solution::new(Kind::TriangularMembership, outcome, pretty).with_steps(steps)
}

fn symbolic() -> Solution {
    let steps = vec![
        "the sequence is triangular, so the number of dots in term n is".to_string(),
        FORMULA.to_string(),
    ];
    Solution::new(Kind::TriangularSymbolic, Outcome::Formula(FORMULA.to_string()), FORMULA)
        .with_steps(steps)
}

fn info() -> Solution {
    let steps = vec![
        "the figures show triangular numbers".to_string(),
        format!("general term: {}", FORMULA),
        "substitute a given n, such as 50, to get the number of dots in that term".to_string(),
    ];
    Solution::new(Kind::TriangularInfo, Outcome::Formula(FORMULA.to_string()), format!("dots in term n: {}", FORMULA))
        .with_steps(steps)
}

/// Answers the query if it is about triangular numbers.
///
/// The query is checked for, in order: the value of a given term, the general formula, whether a
/// number is a term, and the symbolic term `n`. A query that mentions triangles but asks none of
/// these is answered with the general formula.
pub fn recognize(query: &str) -> Option<Solution> {
    if !DETECT.is_match(query) {
        return None;
    }

    let index_patterns = [&*INDEX_HE, &*INDEX_SUBSCRIPT, &*INDEX_ORDINAL, &*INDEX_TERM];
    if let Some(n) = first_index(query, &index_patterns) {
        tracing::debug!(n, "triangular value");
        return Some(value(n));
    }

    if GENERAL.is_match(query) {
        return Some(general());
    }

    if let Some(m) = first_index(query, &[&*MEMBER_HE, &*MEMBER_EN]) {
        tracing::debug!(m, "triangular membership");
        return Some(membership(m));
    }

    if SYMBOLIC.is_match(query) {
        return Some(symbolic());
    }

    Some(info())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn numbers() {
        assert_eq!(triangular_number(1), 1);
        assert_eq!(triangular_number(7), 28);
        assert_eq!(triangular_number(50), 1275);
    }

    #[test]
    fn index_of_triangular_numbers() {
        for n in 1..200 {
            let m = triangular_number(n) as u64;
            assert_eq!(triangular_index(m), Some(n));
            assert_eq!(triangular_index(m + 1), None);
        }
        assert_eq!(triangular_index(28), Some(7));
        assert_eq!(triangular_index(29), None);
        assert_eq!(triangular_index(0), None);
    }

    #[test]
    fn index_of_huge_numbers() {
        let n = u64::from(u32::MAX);
        let m = u64::try_from(triangular_number(n)).unwrap();
        assert_eq!(triangular_index(m), Some(n));
        assert_eq!(triangular_index(m - 1), None);
    }

    #[test]
    fn value_in_hebrew() {
        let solution = recognize("סדרת נקודות שיוצרות משולשים. כמה נקודות יהיו באיבר ה-50?").unwrap();
        assert_eq!(solution.kind, Kind::TriangularValue);
        assert_eq!(solution.outcome, Outcome::Value(1275.0));
        assert_eq!(solution.steps.last().unwrap(), "T_50 = 50·(50+1)/2 = 50·51/2 = 1275");
    }

    #[test]
    fn value_in_english() {
        let solution = recognize("How many dots are in the 10th triangle?").unwrap();
        assert_eq!(solution.outcome, Outcome::Value(55.0));
        assert_eq!(solution.pretty, "term 10 has 55 dots");
    }

    #[test]
    fn value_by_subscript() {
        let solution = recognize("triangular numbers: find T_12").unwrap();
        assert_eq!(solution.outcome, Outcome::Value(78.0));
    }

    #[test]
    fn general_formula() {
        let solution = recognize("נוסחת האיבר הכללי בסדרה של משולשים הבנויים מנקודות").unwrap();
        assert_eq!(solution.kind, Kind::TriangularGeneral);
        assert_eq!(solution.outcome, Outcome::Formula(FORMULA.to_string()));
    }

    #[test]
    fn member() {
        let solution = recognize("Is 28 a triangular number?").unwrap();
        assert_eq!(solution.kind, Kind::TriangularMembership);
        assert_eq!(solution.outcome, Outcome::Membership { member: true, index: Some(7) });
        assert_eq!(solution.pretty, "28 is a triangular number (term 7)");
    }

    #[test]
    fn not_a_member() {
        let solution = recognize("האם 29 הוא איבר בסדרה של מספרים משולשיים?").unwrap();
        assert_eq!(solution.kind, Kind::TriangularMembership);
        assert_eq!(solution.outcome, Outcome::Membership { member: false, index: None });
        assert_eq!(solution.steps[2], "Δ = 1 + 8·29 = 233");
    }

    #[test]
    fn member_by_dots() {
        let solution = recognize("האם ייתכן שאיבר בסדרת המשולשים יכיל 29 נקודות?").unwrap();
        assert_eq!(solution.kind, Kind::TriangularMembership);
    }

    #[test]
    fn symbolic_term() {
        let solution = recognize("triangle pattern: how many dots are in term n?").unwrap();
        assert_eq!(solution.kind, Kind::TriangularSymbolic);
    }

    #[test]
    fn info_fallback() {
        let solution = recognize("tell me about triangular numbers").unwrap();
        assert_eq!(solution.kind, Kind::TriangularInfo);
    }

    #[test]
    fn unrelated() {
        assert!(recognize("x^2 + 3x = 4").is_none());
    }
}

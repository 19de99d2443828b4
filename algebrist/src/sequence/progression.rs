//! Arithmetic and geometric progressions.
//!
//! A query names the first term `a1`, the difference `d` or ratio `r`, and either the index of the
//! term to find or the number of terms to add up. When any of these is missing, the general
//! formulas are given instead.

use once_cell::sync::Lazy;
use regex::Regex;
use crate::{fmt::num, solution::{Kind, Outcome, Solution}};
use super::{first_index, first_number, NUMBER};

static ARITHMETIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)סדרה\s*חשבונית|הפרש\s*קבוע|arithmetic\s+(?:progression|sequence|series)|common\s+difference")
        .unwrap()
});
static GEOMETRIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)סדרה\s*הנדסית|מנה\s*קבועה|geometric\s+(?:progression|sequence|series)|common\s+ratio")
        .unwrap()
});

/// Compiles a pattern with a single number capture, written as `{}` in `template`.
fn with_number(template: &str) -> Regex {
    Regex::new(&template.replace("{}", &format!("({})", NUMBER))).unwrap()
}

static FIRST_SYMBOL: Lazy<Regex> = Lazy::new(|| with_number(r"\ba_?\{?1\}?\b\s*=?\s*{}"));
static FIRST_EN: Lazy<Regex> = Lazy::new(|| with_number(r"(?i)\bfirst\s+term\s*(?:is|=|of)?\s*{}"));
static FIRST_HE: Lazy<Regex> = Lazy::new(|| with_number(r"ה?איבר\s*ה?ראשון\s*(?:הוא|=)?\s*{}"));

static DIFFERENCE_SYMBOL: Lazy<Regex> = Lazy::new(|| with_number(r"\bd\s*=?\s*{}"));
static DIFFERENCE_EN: Lazy<Regex> = Lazy::new(|| {
    with_number(r"(?i)\b(?:common\s+)?difference\s*(?:is|=|of)?\s*{}")
});
static DIFFERENCE_HE: Lazy<Regex> = Lazy::new(|| {
    with_number(r"הפרש\s*(?:ה?סדרה|קבוע)?\s*(?:הוא|=|של)?\s*{}")
});

static RATIO_SYMBOL: Lazy<Regex> = Lazy::new(|| with_number(r"\b[rq]\s*=?\s*{}"));
static RATIO_EN: Lazy<Regex> = Lazy::new(|| {
    with_number(r"(?i)\b(?:common\s+)?ratio\s*(?:is|=|of)?\s*{}")
});
static RATIO_HE: Lazy<Regex> = Lazy::new(|| {
    with_number(r"מנה\s*(?:ה?סדרה|קבועה)?\s*(?:היא|=|של)?\s*{}")
});

/// `a_10`, `a10` or `a_{10}`. The second capture is set for a declaration such as `a1 = 3`, which
/// is not a request for a term.
static INDEX_SYMBOL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\ba_?\{?(\d+)\}?\b\s*(=)?").unwrap());
static INDEX_HE: Lazy<Regex> = Lazy::new(|| Regex::new(r"איבר\s*ה\s*-?\s*(\d+)").unwrap());
static INDEX_EN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d+)(?:st|nd|rd|th)\s+term|\bterm\s+(?:number\s+)?(\d+)").unwrap()
});

static SUM_HE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"סכום\s*(?:של\s*)?(?:ה\s*)?(\d+)\s*(?:ה\s*)?איבר").unwrap()
});
static SUM_EN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bsum\s+of\s+(?:the\s+)?first\s+(\d+)|\bfirst\s+(\d+)\s+terms").unwrap()
});

/// Finds the index of the requested term, skipping declarations like `a1 = 3`.
fn term_index(query: &str) -> Option<u64> {
    let symbolic = INDEX_SYMBOL.captures_iter(query).find_map(|caps| {
        if caps.get(2).is_some() {
            return None;
        }
        caps.get(1)?.as_str().parse::<u64>().ok().filter(|n| *n > 0)
    });
    symbolic.or_else(|| first_index(query, &[&*INDEX_HE, &*INDEX_EN]))
}

/// Finds the number of terms to add up.
fn sum_count(query: &str) -> Option<u64> {
    first_index(query, &[&*SUM_HE, &*SUM_EN])
}

/// Raises `base` to an integer power, exactly when the power is small.
fn pow(base: f64, exp: u64) -> f64 {
    match i32::try_from(exp) {
        Ok(exp) => base.powi(exp),
        Err(_) => base.powf(exp as f64),
    }
}

/// Wraps a computed term or sum. A value that overflowed is not supported.
fn value_solution(kind: Kind, value: f64, pretty: String, steps: Vec<String>) -> Solution {
    if value.is_finite() {
        Solution::new(kind, Outcome::Value(value), pretty).with_steps(steps)
    } else {
        tracing::debug!(?kind, value, "progression value is not finite");
        Solution::not_supported("the result is too large to represent")
    }
}

fn first_term(query: &str) -> Option<f64> {
    first_number(query, &[&*FIRST_SYMBOL, &*FIRST_EN, &*FIRST_HE])
}

/// Answers the query if it is about an arithmetic progression.
fn arithmetic(query: &str) -> Option<Solution> {
    if !ARITHMETIC.is_match(query) {
        return None;
    }

    let a1 = first_term(query);
    let d = first_number(query, &[&*DIFFERENCE_SYMBOL, &*DIFFERENCE_EN, &*DIFFERENCE_HE]);
    tracing::debug!(?a1, ?d, "arithmetic progression");

    if let (Some(a1), Some(d)) = (a1, d) {
        if let Some(n) = term_index(query) {
            let an = a1 + (n as f64 - 1.0) * d;
            let steps = vec![
                "arithmetic progression: a_n = a1 + (n-1)d".to_string(),
                format!(
                    "a1 = {}, d = {}, n = {}: a_{} = {} + ({}-1)·{} = {}",
                    num(a1), num(d), n, n, num(a1), n, num(d), num(an),
                ),
            ];
            return Some(value_solution(Kind::ApValue, an, format!("a_{} = {}", n, num(an)), steps));
        }

        if let Some(n) = sum_count(query) {
            let count = n as f64;
            let sum = count / 2.0 * (2.0 * a1 + (count - 1.0) * d);
            let steps = vec![
                "arithmetic progression: S_n = n/2 · [2a1 + (n-1)d]".to_string(),
                format!(
                    "a1 = {}, d = {}, n = {}: S_{} = {}/2 · [2·{} + ({}-1)·{}] = {}",
                    num(a1), num(d), n, n, n, num(a1), n, num(d), num(sum),
                ),
            ];
            return Some(value_solution(Kind::ApSum, sum, format!("S_{} = {}", n, num(sum)), steps));
        }
    }

    let formulas = "a_n = a1 + (n-1)d, S_n = n/2 · [2a1 + (n-1)d]";
    let steps = vec![
        "arithmetic progression:".to_string(),
        "general term: a_n = a1 + (n-1)d".to_string(),
        "sum of n terms: S_n = n/2 · [2a1 + (n-1)d]".to_string(),
    ];
    Some(Solution::new(Kind::ApInfo, Outcome::Formula(formulas.to_string()), formulas).with_steps(steps))
}

/// Answers the query if it is about a geometric progression.
fn geometric(query: &str) -> Option<Solution> {
    if !GEOMETRIC.is_match(query) {
        return None;
    }

    let a1 = first_term(query);
    let r = first_number(query, &[&*RATIO_SYMBOL, &*RATIO_EN, &*RATIO_HE]);
    tracing::debug!(?a1, ?r, "geometric progression");

    if let (Some(a1), Some(r)) = (a1, r) {
        if let Some(n) = term_index(query) {
            let an = a1 * pow(r, n - 1);
            let steps = vec![
                "geometric progression: a_n = a1 · r^(n-1)".to_string(),
                format!(
                    "a1 = {}, r = {}, n = {}: a_{} = {} · {}^({}-1) = {}",
                    num(a1), num(r), n, n, num(a1), num(r), n, num(an),
                ),
            ];
            return Some(value_solution(Kind::GpValue, an, format!("a_{} = {}", n, num(an)), steps));
        }

        // the closed form divides by r - 1
        if let Some(n) = sum_count(query).filter(|_| r != 1.0) {
            let sum = a1 * (pow(r, n) - 1.0) / (r - 1.0);
            let steps = vec![
                "geometric progression: S_n = a1 · (r^n - 1)/(r - 1)".to_string(),
                format!(
                    "a1 = {}, r = {}, n = {}: S_{} = {} · ({}^{} - 1)/({} - 1) = {}",
                    num(a1), num(r), n, n, num(a1), num(r), n, num(r), num(sum),
                ),
            ];
            return Some(value_solution(Kind::GpSum, sum, format!("S_{} = {}", n, num(sum)), steps));
        }
    }

    let formulas = "a_n = a1·r^(n-1), S_n = a1·(r^n - 1)/(r - 1)";
    let steps = vec![
        "geometric progression:".to_string(),
        "general term: a_n = a1 · r^(n-1)".to_string(),
        "sum of n terms (r ≠ 1): S_n = a1 · (r^n - 1)/(r - 1)".to_string(),
    ];
    Some(Solution::new(Kind::GpInfo, Outcome::Formula(formulas.to_string()), formulas).with_steps(steps))
}

/// Answers the query if it is about an arithmetic or geometric progression. Arithmetic
/// progressions are checked first.
pub fn recognize(query: &str) -> Option<Solution> {
    arithmetic(query).or_else(|| geometric(query))
}

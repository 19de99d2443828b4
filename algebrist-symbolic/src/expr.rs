//! A representation of polynomial-like expressions that is easier to manipulate than an AST.
//!
//! The [`Expr`](algebrist_parser::parser::expr::Expr) type from `algebrist_parser` is a recursive
//! `enum` that mirrors the source text. It's convenient for parsing, but not so much for algebraic
//! manipulation.
//!
//! [`SymExpr`] flattens the AST into lists of terms and factors, and stores every number as an
//! exact [`Rational`], so that `0.1 + 0.2` is exactly `3/10`.
//!
//! # Strict equality
//!
//! The [`PartialEq`] and [`Eq`] implementations for [`SymExpr`] implement **strict equality**:
//!
//! - Both expressions must be the same type of expression (both [`SymExpr::Primary`], both
//! [`SymExpr::Add`], etc.).
//! - [`SymExpr::Add`] and [`SymExpr::Mul`] must have strictly equal terms / factors, in any order.
//! - [`SymExpr::Exp`] must have strictly equal base and exponent.
//!
//! Strict equality never reports false positives, but `x^2 + 2x + 1` and `(x + 1)^2` are not
//! strictly equal. It is used together with simplification to decide which terms and factors can
//! be combined.
//!
//! # Display
//!
//! The [`Display`](std::fmt::Display) output can be parsed back by `algebrist_parser`, and
//! simplifying the parsed output yields the same string again. Sums print with explicit signs
//! (`x^2 - 5x + 6`), numeric coefficients are juxtaposed (`3x`, `(5/2)x`), and other factors are
//! joined with `*`.

use algebrist_error::Error;
use algebrist_parser::parser::{
    expr::Expr as AstExpr,
    literal::Literal,
    token::op::{BinOpKind, UnaryOpKind},
};
use crate::{error::InvalidNumber, primitive::{rat, rat_from_str}};
use rug::Rational;
use std::{
    cmp::Reverse,
    collections::{BTreeMap, BTreeSet},
    fmt,
    ops::{Add, Mul, Neg},
};

/// A single term / factor: a number or a variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Primary {
    /// An exact rational number, such as `2`, `-3` or `5/2`.
    Number(Rational),

    /// A variable, such as `x` or `y`.
    Symbol(String),
}

impl fmt::Display for Primary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(num) => write!(f, "{}", num),
            Self::Symbol(sym) => write!(f, "{}", sym),
        }
    }
}

/// Adds two [`Primary`]s together. Numbers are added exactly; anything else is wrapped in a
/// [`SymExpr::Add`].
impl Add<Primary> for Primary {
    type Output = SymExpr;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Primary::Number(lhs), Primary::Number(rhs)) => SymExpr::Primary(Primary::Number(lhs + rhs)),
            (lhs, rhs) => SymExpr::Add(vec![SymExpr::Primary(lhs), SymExpr::Primary(rhs)]),
        }
    }
}

/// Multiplies two [`Primary`]s together. Numbers are multiplied exactly; anything else is wrapped
/// in a [`SymExpr::Mul`].
impl Mul<Primary> for Primary {
    type Output = SymExpr;

    fn mul(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Primary::Number(lhs), Primary::Number(rhs)) => SymExpr::Primary(Primary::Number(lhs * rhs)),
            (lhs, rhs) => SymExpr::Mul(vec![SymExpr::Primary(lhs), SymExpr::Primary(rhs)]),
        }
    }
}

/// A mathematical expression with information about its terms and factors.
///
/// For more information about this type, see the [module-level documentation](self).
#[derive(Debug, Clone, Eq)]
pub enum SymExpr {
    /// A single term or factor.
    Primary(Primary),

    /// Multiple terms added together.
    Add(Vec<SymExpr>),

    /// Multiple factors multiplied together.
    Mul(Vec<SymExpr>),

    /// An expression raised to a power.
    Exp(Box<SymExpr>, Box<SymExpr>),
}

impl SymExpr {
    /// Creates a number expression.
    pub fn number(value: Rational) -> Self {
        Self::Primary(Primary::Number(value))
    }

    /// Creates an integer expression.
    pub fn integer(value: i64) -> Self {
        Self::number(rat(value))
    }

    /// Creates a variable expression.
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Primary(Primary::Symbol(name.into()))
    }

    /// If the expression is a [`Primary::Number`], returns a reference to the contained number.
    pub fn as_number(&self) -> Option<&Rational> {
        match self {
            Self::Primary(Primary::Number(num)) => Some(num),
            _ => None,
        }
    }

    /// Returns true if the expression is a [`Primary::Number`].
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Primary(Primary::Number(_)))
    }

    /// If the expression is an integer [`Primary::Number`], returns the integer.
    pub fn as_integer(&self) -> Option<i64> {
        self.as_number()
            .filter(|num| *num.denom() == 1)
            .and_then(|num| num.numer().to_i64())
    }

    /// Returns true if the expression is the number `0`.
    pub fn is_zero(&self) -> bool {
        self.as_number().is_some_and(|num| *num == 0)
    }

    /// Returns true if the expression is the number `1`.
    pub fn is_one(&self) -> bool {
        self.as_number().is_some_and(|num| *num == 1)
    }

    /// If the expression is a [`Primary::Symbol`], returns a reference to the contained symbol.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Primary(Primary::Symbol(sym)) => Some(sym),
            _ => None,
        }
    }

    /// Returns true if the given variable appears anywhere in the expression.
    pub fn contains_symbol(&self, var: &str) -> bool {
        match self {
            Self::Primary(Primary::Symbol(sym)) => sym == var,
            Self::Primary(Primary::Number(_)) => false,
            Self::Add(exprs) | Self::Mul(exprs) => exprs.iter().any(|expr| expr.contains_symbol(var)),
            Self::Exp(base, exp) => base.contains_symbol(var) || exp.contains_symbol(var),
        }
    }

    /// Returns the names of all variables in the expression, in alphabetical order.
    pub fn free_symbols(&self) -> BTreeSet<String> {
        fn visit(expr: &SymExpr, out: &mut BTreeSet<String>) {
            match expr {
                SymExpr::Primary(Primary::Symbol(sym)) => {
                    out.insert(sym.clone());
                },
                SymExpr::Primary(Primary::Number(_)) => {},
                SymExpr::Add(exprs) | SymExpr::Mul(exprs) => exprs.iter().for_each(|expr| visit(expr, out)),
                SymExpr::Exp(base, exp) => {
                    visit(base, out);
                    visit(exp, out);
                },
            }
        }

        let mut out = BTreeSet::new();
        visit(self, &mut out);
        out
    }

    /// Trivially downgrades the expression into a simpler form.
    ///
    /// Some operations may result in an [`SymExpr::Add`] with zero / one term, or an
    /// [`SymExpr::Mul`] with zero / one factor. This function checks for these cases and
    /// simplifies the expression into the single term / factor, or the number 0 or 1.
    pub(crate) fn downgrade(self) -> Self {
        match self {
            Self::Add(mut terms) => {
                if terms.is_empty() {
                    Self::integer(0)
                } else if terms.len() == 1 {
                    terms.remove(0)
                } else {
                    Self::Add(terms)
                }
            },
            Self::Mul(mut factors) => {
                if factors.is_empty() {
                    Self::integer(1)
                } else if factors.len() == 1 {
                    factors.remove(0)
                } else {
                    Self::Mul(factors)
                }
            },
            _ => self,
        }
    }

    /// Splits the expression into its numeric coefficient and the remaining factors.
    ///
    /// - `5` -> `(5, 1)`
    /// - `3*a` -> `(3, a)`
    /// - `-1/4*a*b` -> `(-1/4, a*b)`
    /// - `a` -> `(1, a)`
    pub(crate) fn split_coefficient(&self) -> (Rational, SymExpr) {
        match self {
            Self::Primary(Primary::Number(num)) => (num.clone(), Self::integer(1)),
            Self::Mul(factors) => {
                let mut coefficient = rat(1);
                let mut rest = Vec::with_capacity(factors.len());
                for factor in factors {
                    match factor.as_number() {
                        Some(num) => coefficient *= num,
                        None => rest.push(factor.clone()),
                    }
                }
                (coefficient, Self::Mul(rest).downgrade())
            },
            _ => (rat(1), self.clone()),
        }
    }

    /// Splits a term into its sign and magnitude, for printing it inside a sum.
    fn split_sign(&self) -> (bool, SymExpr) {
        let (coefficient, rest) = self.split_coefficient();
        if coefficient >= 0 {
            return (false, self.clone());
        }

        let magnitude = -coefficient;
        if rest.is_one() {
            (true, Self::number(magnitude))
        } else if magnitude == 1 {
            (true, rest)
        } else {
            (true, Self::number(magnitude) * rest)
        }
    }

    /// Returns the total degree of the expression in all of its variables, counting only integer
    /// exponents. Used to order terms when printing.
    fn degree(&self) -> i64 {
        match self {
            Self::Primary(Primary::Number(_)) => 0,
            Self::Primary(Primary::Symbol(_)) => 1,
            Self::Add(terms) => terms.iter().map(SymExpr::degree).max().unwrap_or(0),
            Self::Mul(factors) => factors.iter().map(SymExpr::degree).sum(),
            Self::Exp(base, exp) => exp.as_integer()
                .map(|n| base.degree().saturating_mul(n))
                .unwrap_or(0),
        }
    }

    /// Returns the integer exponent of every variable that appears as a plain factor of the term.
    ///
    /// - `3x^2*y` -> `{x: 2, y: 1}`
    /// - `(x + 1)^2` -> `{}`
    fn exponents(&self) -> BTreeMap<String, i64> {
        let mut out = BTreeMap::new();
        match self {
            Self::Primary(Primary::Symbol(sym)) => {
                out.insert(sym.clone(), 1);
            },
            Self::Exp(base, exp) => {
                if let (Some(sym), Some(n)) = (base.as_symbol(), exp.as_integer()) {
                    out.insert(sym.to_string(), n);
                }
            },
            Self::Mul(factors) => {
                for factor in factors {
                    for (sym, n) in factor.exponents() {
                        *out.entry(sym).or_insert(0) += n;
                    }
                }
            },
            Self::Primary(Primary::Number(_)) | Self::Add(_) => {},
        }
        out
    }

    /// Sorts the terms and factors of the expression, recursively, into the order used for
    /// printing. Strict equality does not depend on order, so this never changes the value.
    ///
    /// Terms are ordered by descending degree, then by descending exponent of each variable in
    /// alphabetical order (`x^2 + 2x*y + y^2`). Factors put the numeric coefficient first.
    pub(crate) fn sorted(self) -> Self {
        fn factor_rank(factor: &SymExpr) -> u8 {
            match factor {
                SymExpr::Primary(Primary::Number(_)) => 0,
                SymExpr::Primary(Primary::Symbol(_)) => 1,
                SymExpr::Exp(base, _) if base.as_symbol().is_some() => 1,
                SymExpr::Exp(..) | SymExpr::Mul(_) => 2,
                SymExpr::Add(_) => 3,
            }
        }

        match self {
            Self::Primary(_) => self,
            Self::Add(terms) => {
                let mut terms = terms.into_iter().map(SymExpr::sorted).collect::<Vec<_>>();
                let vars = terms.iter()
                    .flat_map(|term| term.exponents().into_keys())
                    .collect::<BTreeSet<_>>();
                terms.sort_by_cached_key(|term| {
                    let exponents = term.exponents();
                    let powers = vars.iter()
                        .map(|var| Reverse(exponents.get(var).copied().unwrap_or(0)))
                        .collect::<Vec<_>>();
                    let (_, rest) = term.split_coefficient();
                    let rest = if rest.is_one() { String::new() } else { rest.to_string() };
                    (Reverse(term.degree()), powers, rest)
                });
                Self::Add(terms)
            },
            Self::Mul(factors) => {
                let mut factors = factors.into_iter().map(SymExpr::sorted).collect::<Vec<_>>();
                factors.sort_by_cached_key(|factor| (factor_rank(factor), factor.to_string()));
                Self::Mul(factors)
            },
            Self::Exp(base, exp) => Self::Exp(Box::new(base.sorted()), Box::new(exp.sorted())),
        }
    }

    /// Formats a factor of a product, adding parentheses where the parser would otherwise bind it
    /// differently.
    fn fmt_factor(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary(Primary::Number(num)) if *num >= 0 && *num.denom() == 1 => write!(f, "{}", num),
            Self::Primary(Primary::Number(_)) | Self::Add(_) | Self::Mul(_) => write!(f, "({})", self),
            _ => write!(f, "{}", self),
        }
    }

    /// Formats the base or exponent of a power.
    fn fmt_power_operand(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary(Primary::Symbol(_)) => write!(f, "{}", self),
            Self::Primary(Primary::Number(num)) if *num >= 0 && *num.denom() == 1 => write!(f, "{}", num),
            _ => write!(f, "({})", self),
        }
    }

    /// Formats a product, juxtaposing a leading numeric coefficient with the next factor.
    fn fmt_product(factors: &[SymExpr], f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (coefficient, rest) = match factors.split_first() {
            Some((SymExpr::Primary(Primary::Number(num)), rest)) if !rest.is_empty() => (Some(num), rest),
            _ => (None, factors),
        };

        // whether the next factor can be written directly after what was printed so far
        let mut juxtapose = false;
        if let Some(num) = coefficient {
            if *num == -1 {
                write!(f, "-")?;
            } else if *num.denom() == 1 {
                write!(f, "{}", num)?;
            } else if *num < 0 {
                write!(f, "-({})", Rational::from(-num))?;
            } else {
                write!(f, "({})", num)?;
            }
            juxtapose = true;
        }

        for (i, factor) in rest.iter().enumerate() {
            let starts_with_digit = match factor {
                SymExpr::Primary(Primary::Number(num)) => *num >= 0 && *num.denom() == 1,
                SymExpr::Exp(base, _) => base.as_number().is_some_and(|num| *num >= 0 && *num.denom() == 1),
                _ => false,
            };
            let needs_star = if i == 0 && juxtapose {
                starts_with_digit && coefficient.is_some_and(|num| *num != -1)
            } else {
                i > 0
            };

            if needs_star {
                write!(f, "*")?;
            }
            factor.fmt_factor(f)?;
        }

        Ok(())
    }
}

impl fmt::Display for SymExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary(primary) => write!(f, "{}", primary),
            Self::Add(terms) => {
                for (i, term) in terms.iter().enumerate() {
                    let (negative, magnitude) = term.split_sign();
                    match (i, negative) {
                        (0, true) => write!(f, "-")?,
                        (0, false) => {},
                        (_, true) => write!(f, " - ")?,
                        (_, false) => write!(f, " + ")?,
                    }

                    if matches!(magnitude, SymExpr::Add(_)) {
                        write!(f, "({})", magnitude)?;
                    } else {
                        write!(f, "{}", magnitude)?;
                    }
                }
                Ok(())
            },
            Self::Mul(factors) => Self::fmt_product(factors, f),
            Self::Exp(base, exp) => {
                base.fmt_power_operand(f)?;
                write!(f, "^")?;
                exp.fmt_power_operand(f)
            },
        }
    }
}

/// Checks if two expressions are **strictly** equal.
///
/// For more information about strict equality, see the [module-level documentation](self).
impl PartialEq for SymExpr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs == rhs,
            (Self::Add(lhs), Self::Add(rhs)) | (Self::Mul(lhs), Self::Mul(rhs)) => {
                if lhs.len() != rhs.len() {
                    return false;
                }

                // match every element at most once, so `x + x + y` is not equal to `x + y + y`
                let mut used = vec![false; rhs.len()];
                lhs.iter().all(|lhs| {
                    let found = rhs.iter()
                        .enumerate()
                        .position(|(i, rhs)| !used[i] && lhs == rhs);
                    match found {
                        Some(i) => {
                            used[i] = true;
                            true
                        },
                        None => false,
                    }
                })
            },
            (Self::Exp(lhs_base, lhs_exp), Self::Exp(rhs_base, rhs_exp)) => {
                lhs_base == rhs_base && lhs_exp == rhs_exp
            },
            _ => false,
        }
    }
}

impl TryFrom<AstExpr> for SymExpr {
    type Error = Error;

    fn try_from(expr: AstExpr) -> Result<Self, Self::Error> {
        Ok(match expr {
            AstExpr::Literal(Literal::Number(num)) => {
                let value = rat_from_str(&num.value).ok_or_else(|| Error::new(
                    vec![num.span.clone()],
                    InvalidNumber { literal: num.value.clone() },
                ))?;
                Self::number(value)
            },
            AstExpr::Literal(Literal::Symbol(sym)) => {
                // a run of letters is a product of single-letter variables: `xy` is `x*y`
                let factors = sym.name.chars()
                    .map(|c| Self::symbol(c.to_string()))
                    .collect::<Vec<_>>();
                Self::Mul(factors).downgrade()
            },
            AstExpr::Paren(paren) => Self::try_from(*paren.expr)?,
            AstExpr::Unary(unary) => match unary.op.kind {
                // treat this as -1 * operand
                UnaryOpKind::Neg => -Self::try_from(*unary.operand)?,
            },
            AstExpr::Binary(bin) => {
                let lhs = Self::try_from(*bin.lhs)?;
                let rhs = Self::try_from(*bin.rhs)?;
                match bin.op.kind {
                    BinOpKind::Exp => Self::Exp(Box::new(lhs), Box::new(rhs)),
                    BinOpKind::Mul => lhs * rhs,
                    // treat this as lhs * rhs^-1
                    BinOpKind::Div => lhs * Self::Exp(Box::new(rhs), Box::new(Self::integer(-1))),
                    BinOpKind::Add => lhs + rhs,
                    // treat this as lhs + -1 * rhs
                    BinOpKind::Sub => lhs + -rhs,
                }
            },
        })
    }
}

/// Adds two [`SymExpr`]s together. No simplification is done, except for the case where the
/// operands are a mix of [`Primary`] and / or [`SymExpr::Add`], in which case both are combined in
/// one list of terms (flattening).
impl Add for SymExpr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs + rhs,
            (Self::Add(mut terms), Self::Add(rhs_terms)) => {
                terms.extend(rhs_terms);
                Self::Add(terms)
            },
            (Self::Add(mut terms), other) | (other, Self::Add(mut terms)) => {
                terms.push(other);
                Self::Add(terms)
            },
            (lhs, rhs) => Self::Add(vec![lhs, rhs]),
        }
    }
}

/// Multiplies two [`SymExpr`]s together. No simplification is done, except for the case where the
/// operands are a mix of [`Primary`] and / or [`SymExpr::Mul`], in which case both are combined
/// in one list of factors (flattening).
impl Mul for SymExpr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs * rhs,
            (Self::Mul(mut factors), Self::Mul(other)) => {
                factors.extend(other);
                Self::Mul(factors)
            },
            (Self::Mul(mut factors), other) | (other, Self::Mul(mut factors)) => {
                factors.push(other);
                Self::Mul(factors)
            },
            (lhs, rhs) => Self::Mul(vec![lhs, rhs]),
        }
    }
}

/// Multiplies this expression by -1. No simplification is done, except for the case where the
/// expression is a number, in which case the number is negated.
impl Neg for SymExpr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Self::Primary(Primary::Number(num)) => Self::number(-num),
            expr => Self::integer(-1) * expr,
        }
    }
}

/// NOTE: strict equality ignores the order of terms and factors, but `pretty_assertions` does not,
/// so the diff of a failing test may show spurious reorderings.
#[cfg(test)]
mod tests {
    use algebrist_parser::parser::Parser;
    use pretty_assertions::assert_eq;
    use super::*;

    /// Parse the given expression and return the [`SymExpr`] representation.
    fn parse_expr(input: &str) -> SymExpr {
        let expr = Parser::new(input).try_parse_full::<AstExpr>().unwrap();
        SymExpr::try_from(expr).unwrap()
    }

    fn x() -> SymExpr {
        SymExpr::symbol("x")
    }

    #[test]
    fn strict_equality() {
        let a = parse_expr("2(x + (y - 5))");
        let b = parse_expr("(y - 5 + x) * 2");
        assert_eq!(a, b);
    }

    #[test]
    fn strict_equality_is_not_semantic() {
        let a = parse_expr("2(x + (y - 5))");
        let b = parse_expr("2x + 2y - 10");
        assert_ne!(a, b);
    }

    #[test]
    fn strict_equality_counts_duplicates() {
        assert_ne!(parse_expr("x + x + y"), parse_expr("x + y + y"));
    }

    #[test]
    fn simple_expr() {
        let expr = parse_expr("x^2 + 5x + 6");
        assert_eq!(expr, SymExpr::Add(vec![
            SymExpr::integer(6),
            SymExpr::Mul(vec![x(), SymExpr::integer(5)]),
            SymExpr::Exp(Box::new(x()), Box::new(SymExpr::integer(2))),
        ]));
    }

    #[test]
    fn subtraction_and_division() {
        let expr = parse_expr("x - 3/4");
        assert_eq!(expr, SymExpr::Add(vec![
            x(),
            SymExpr::Mul(vec![
                SymExpr::integer(3),
                SymExpr::Exp(Box::new(SymExpr::integer(4)), Box::new(SymExpr::integer(-1))),
                SymExpr::integer(-1),
            ]),
        ]));
    }

    #[test]
    fn decimal_literal() {
        let expr = parse_expr("0.5x");
        assert_eq!(expr, SymExpr::Mul(vec![
            SymExpr::number(Rational::from((1, 2))),
            x(),
        ]));
    }

    #[test]
    fn letters_split_into_variables() {
        let expr = parse_expr("3xy");
        assert_eq!(expr, SymExpr::Mul(vec![
            SymExpr::integer(3),
            x(),
            SymExpr::symbol("y"),
        ]));
        assert_eq!(
            expr.free_symbols().into_iter().collect::<Vec<_>>(),
            vec!["x".to_string(), "y".to_string()],
        );
    }

    #[test]
    fn fmt_sum_with_signs() {
        let expr = SymExpr::Add(vec![
            SymExpr::Exp(Box::new(x()), Box::new(SymExpr::integer(2))),
            SymExpr::Mul(vec![SymExpr::integer(-5), x()]),
            SymExpr::integer(6),
        ]);
        assert_eq!(expr.to_string(), "x^2 - 5x + 6");
    }

    #[test]
    fn fmt_fraction_coefficient() {
        let expr = SymExpr::Add(vec![
            SymExpr::Mul(vec![SymExpr::number(Rational::from((-5, 2))), x()]),
            SymExpr::number(Rational::from((1, 3))),
        ]);
        assert_eq!(expr.to_string(), "-(5/2)x + 1/3");
    }

    #[test]
    fn fmt_negative_exponent() {
        let expr = SymExpr::Mul(vec![
            SymExpr::integer(2),
            SymExpr::Exp(Box::new(x()), Box::new(SymExpr::integer(-1))),
        ]);
        assert_eq!(expr.to_string(), "2x^(-1)");
    }

    #[test]
    fn fmt_numeric_base_after_coefficient() {
        let expr = SymExpr::Mul(vec![
            SymExpr::integer(3),
            SymExpr::Exp(Box::new(SymExpr::integer(2)), Box::new(SymExpr::number(Rational::from((1, 2))))),
        ]);
        assert_eq!(expr.to_string(), "3*2^(1/2)");
    }

    #[test]
    fn fmt_product_of_sums() {
        let expr = parse_expr("-(x + 1)(x - 2)");
        assert_eq!(expr.sorted().to_string(), "-(x + 1)*(x - 2)");
    }
}

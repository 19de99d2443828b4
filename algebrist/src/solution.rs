//! The result of solving a query.

use crate::fmt::num;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{ser::SerializeMap, Serialize, Serializer};

/// What kind of query was recognized, and how it was answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Kind {
    /// The number of dots in a given term of the triangular numbers.
    TriangularValue,

    /// The general term of the triangular numbers.
    TriangularGeneral,

    /// Whether a number is triangular.
    TriangularMembership,

    /// The number of dots in term `n`, symbolically.
    TriangularSymbolic,

    /// A question about triangular numbers that matched no specific phrasing.
    TriangularInfo,

    /// A term of an arithmetic progression.
    #[cfg_attr(feature = "serde", serde(rename = "AP_value"))]
    ApValue,

    /// A partial sum of an arithmetic progression.
    #[cfg_attr(feature = "serde", serde(rename = "AP_sum"))]
    ApSum,

    /// The formulas of an arithmetic progression, when values were missing.
    #[cfg_attr(feature = "serde", serde(rename = "AP_info"))]
    ApInfo,

    /// A term of a geometric progression.
    #[cfg_attr(feature = "serde", serde(rename = "GP_value"))]
    GpValue,

    /// A partial sum of a geometric progression.
    #[cfg_attr(feature = "serde", serde(rename = "GP_sum"))]
    GpSum,

    /// The formulas of a geometric progression, when values were missing.
    #[cfg_attr(feature = "serde", serde(rename = "GP_info"))]
    GpInfo,

    /// A system of two linear equations in `x` and `y`.
    #[cfg_attr(feature = "serde", serde(rename = "linear_2x2"))]
    Linear2x2,

    /// A system of three linear equations in `x`, `y` and `z`.
    #[cfg_attr(feature = "serde", serde(rename = "linear_3x3"))]
    Linear3x3,

    /// `|g(x)| = k`
    AbsEq,

    /// `|g(x)| op k` for a comparison `op`.
    AbsIneq,

    /// A polynomial inequality in `x`.
    Inequality,

    /// A quadratic equation in `x`.
    Quadratic,

    /// A linear equation in `x`.
    #[cfg_attr(feature = "serde", serde(rename = "linear_1var"))]
    Linear1Var,

    /// An equation without `x`, which is either always or never true.
    Constant,

    /// The query is not supported.
    NotSupported,
}

impl Kind {
    /// Returns the name of the kind, as used in the wire format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TriangularValue => "triangular_value",
            Self::TriangularGeneral => "triangular_general",
            Self::TriangularMembership => "triangular_membership",
            Self::TriangularSymbolic => "triangular_symbolic",
            Self::TriangularInfo => "triangular_info",
            Self::ApValue => "AP_value",
            Self::ApSum => "AP_sum",
            Self::ApInfo => "AP_info",
            Self::GpValue => "GP_value",
            Self::GpSum => "GP_sum",
            Self::GpInfo => "GP_info",
            Self::Linear2x2 => "linear_2x2",
            Self::Linear3x3 => "linear_3x3",
            Self::AbsEq => "abs_eq",
            Self::AbsIneq => "abs_ineq",
            Self::Inequality => "inequality",
            Self::Quadratic => "quadratic",
            Self::Linear1Var => "linear_1var",
            Self::Constant => "constant",
            Self::NotSupported => "not_supported",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An interval of the real line. A bound of [`None`] is infinite.
///
/// Intervals are never empty: `low < high`, or `low == high` with both bounds included.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    low: Option<f64>,
    high: Option<f64>,
    include_low: bool,
    include_high: bool,
}

impl Interval {
    /// Creates a new interval, or returns [`None`] if it would be empty. Infinite bounds are never
    /// included.
    pub fn new(low: Option<f64>, high: Option<f64>, include_low: bool, include_high: bool) -> Option<Self> {
        let include_low = include_low && low.is_some();
        let include_high = include_high && high.is_some();
        match (low, high) {
            (Some(l), Some(h)) if l > h || (l == h && !(include_low && include_high)) => None,
            _ => Some(Self { low, high, include_low, include_high }),
        }
    }

    /// The interval `[value, value]`, containing a single point.
    pub fn point(value: f64) -> Self {
        Self { low: Some(value), high: Some(value), include_low: true, include_high: true }
    }

    /// The whole real line.
    pub fn all() -> Self {
        Self { low: None, high: None, include_low: false, include_high: false }
    }

    /// The lower bound, or [`None`] for `−∞`.
    pub fn low(&self) -> Option<f64> {
        self.low
    }

    /// The upper bound, or [`None`] for `+∞`.
    pub fn high(&self) -> Option<f64> {
        self.high
    }

    /// Whether the lower bound is part of the interval.
    pub fn include_low(&self) -> bool {
        self.include_low
    }

    /// Whether the upper bound is part of the interval.
    pub fn include_high(&self) -> bool {
        self.include_high
    }

    /// Returns true if the value lies in the interval.
    pub fn contains(&self, value: f64) -> bool {
        let above_low = match self.low {
            Some(low) if self.include_low => value >= low,
            Some(low) => value > low,
            None => true,
        };
        let below_high = match self.high {
            Some(high) if self.include_high => value <= high,
            Some(high) => value < high,
            None => true,
        };
        above_low && below_high
    }

    /// Returns the intersection of two intervals, or [`None`] if they do not overlap.
    ///
    /// The intersection takes the larger lower bound and the smaller upper bound. When both
    /// bounds are equal, the bound is included only if both intervals include it.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let (low, include_low) = match (self.low, other.low) {
            (None, None) => (None, false),
            (Some(l), None) => (Some(l), self.include_low),
            (None, Some(l)) => (Some(l), other.include_low),
            (Some(a), Some(b)) if a > b => (Some(a), self.include_low),
            (Some(a), Some(b)) if a < b => (Some(b), other.include_low),
            (Some(a), Some(_)) => (Some(a), self.include_low && other.include_low),
        };
        let (high, include_high) = match (self.high, other.high) {
            (None, None) => (None, false),
            (Some(h), None) => (Some(h), self.include_high),
            (None, Some(h)) => (Some(h), other.include_high),
            (Some(a), Some(b)) if a < b => (Some(a), self.include_high),
            (Some(a), Some(b)) if a > b => (Some(b), other.include_high),
            (Some(a), Some(_)) => (Some(a), self.include_high && other.include_high),
        };
        Self::new(low, high, include_low, include_high)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let open = if self.include_low { '[' } else { '(' };
        let close = if self.include_high { ']' } else { ')' };
        let low = self.low.map(num).unwrap_or_else(|| "−∞".to_string());
        let high = self.high.map(num).unwrap_or_else(|| "+∞".to_string());
        write!(f, "{}{}, {}{}", open, low, high, close)
    }
}

#[cfg(feature = "serde")]
impl Serialize for Interval {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.low, self.high, self.include_low, self.include_high).serialize(serializer)
    }
}

/// A union of pairwise disjoint intervals, ordered from left to right.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct IntervalSet(Vec<Interval>);

impl IntervalSet {
    /// Creates a set from intervals that are already disjoint, sorting them from left to right.
    pub fn from_disjoint(mut intervals: Vec<Interval>) -> Self {
        intervals.sort_by(|a, b| {
            let a = a.low.unwrap_or(f64::NEG_INFINITY);
            let b = b.low.unwrap_or(f64::NEG_INFINITY);
            a.total_cmp(&b)
        });
        Self(intervals)
    }

    /// The intervals of the set, from left to right.
    pub fn intervals(&self) -> &[Interval] {
        &self.0
    }

    /// Returns true if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if the value lies in any interval of the set.
    pub fn contains(&self, value: f64) -> bool {
        self.0.iter().any(|interval| interval.contains(value))
    }

    /// Returns the intersection of two sets, by intersecting every pair of intervals.
    pub fn intersect(&self, other: &Self) -> Self {
        let intervals = self.0.iter()
            .flat_map(|a| other.0.iter().filter_map(move |b| a.intersect(b)))
            .collect();
        Self::from_disjoint(intervals)
    }
}

impl fmt::Display for IntervalSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "Ø");
        }

        for (i, interval) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ∪ ")?;
            }
            write!(f, "{}", interval)?;
        }
        Ok(())
    }
}

/// The machine-readable answer to a query.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The real roots of an equation. May be empty.
    Roots(Vec<f64>),

    /// The value of each variable of a linear system, in order.
    Assignment(Vec<(String, f64)>),

    /// The solution set of an inequality.
    Intervals(IntervalSet),

    /// A single number: a term or partial sum of a sequence, or the value of a constant equation.
    Value(f64),

    /// Whether a number is a term of a sequence, and its index if so.
    Membership {
        member: bool,
        index: Option<u64>,
    },

    /// A formula, for questions that have no numeric answer.
    Formula(String),

    /// Every real number is a solution.
    AllReals,

    /// The reason the query is not supported.
    Unsupported(String),
}

/// The solution of a query: what was recognized, the answer, and how it was found.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// What kind of query was recognized.
    pub kind: Kind,

    /// The answer.
    pub outcome: Outcome,

    /// The query in canonical form, compared to zero, if it is an equation or inequality.
    pub normalized: Option<String>,

    /// The human-readable steps taken to find the answer, in order.
    pub steps: Vec<String>,

    /// A one-line summary of the answer.
    pub pretty: String,
}

impl Solution {
    /// Creates a new solution without steps.
    pub fn new(kind: Kind, outcome: Outcome, pretty: impl Into<String>) -> Self {
        Self {
            kind,
            outcome,
            normalized: None,
            steps: Vec::new(),
            pretty: pretty.into(),
        }
    }

    /// Creates a [`Kind::NotSupported`] solution with the given reason.
    pub fn not_supported(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        Self::new(Kind::NotSupported, Outcome::Unsupported(reason.clone()), reason)
    }

    /// Sets the steps of the solution.
    pub fn with_steps(mut self, steps: Vec<String>) -> Self {
        self.steps = steps;
        self
    }

    /// Sets the normalized form of the query.
    pub fn with_normalized(mut self, normalized: impl Into<String>) -> Self {
        self.normalized = Some(normalized.into());
        self
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.pretty)?;
        for (i, step) in self.steps.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, step)?;
        }
        Ok(())
    }
}

/// Serializes the solution as the wire object
/// `{ ok, kind, solutions | intervals | value | formula | message, pretty, steps, normalized }`.
#[cfg(feature = "serde")]
impl Serialize for Solution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        /// Serializes the assignment of a linear system as `{ "x": 2, "y": 1 }`.
        struct AssignmentMap<'a>(&'a [(String, f64)]);

        impl Serialize for AssignmentMap<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_map(self.0.iter().map(|(var, value)| (var, value)))
            }
        }

        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("ok", &true)?;
        map.serialize_entry("kind", &self.kind)?;
        match &self.outcome {
            Outcome::Roots(roots) => map.serialize_entry("solutions", roots)?,
            Outcome::Assignment(values) => map.serialize_entry("solutions", &AssignmentMap(values))?,
            Outcome::Intervals(intervals) => map.serialize_entry("intervals", intervals)?,
            Outcome::Value(value) => map.serialize_entry("value", value)?,
            Outcome::Membership { member, index } => {
                map.serialize_entry("member", member)?;
                map.serialize_entry("index", index)?;
            },
            Outcome::Formula(formula) => map.serialize_entry("formula", formula)?,
            Outcome::AllReals => map.serialize_entry("all_reals", &true)?,
            Outcome::Unsupported(reason) => map.serialize_entry("message", reason)?,
        }
        map.serialize_entry("pretty", &self.pretty)?;
        map.serialize_entry("steps", &self.steps)?;
        if let Some(normalized) = &self.normalized {
            map.serialize_entry("normalized", normalized)?;
        }
        map.end()
    }
}

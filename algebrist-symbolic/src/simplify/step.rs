use std::fmt;

/// A rewrite applied while simplifying an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// `0+a = a`
    AddZero,

    /// `2a+3a = 5a`
    CombineLikeTerms,

    /// `0*a = 0`
    MultiplyZero,

    /// `1*a = a`
    MultiplyOne,

    /// `2*3*a = 6a`
    MultiplyNumbers,

    /// `a^b*a^c = a^(b+c)`
    CombineLikeFactors,

    /// `a^0 = 1`
    PowerZero,

    /// `a^1 = a`
    PowerOne,

    /// `0^n = 0` for positive `n`
    PowerZeroLeft,

    /// `1^a = 1`
    PowerOneLeft,

    /// `2^3 = 8`
    EvaluatePower,

    /// `(a^b)^c = a^(bc)` for integer `c`
    PowerPower,

    /// `(a*b)^c = a^c * b^c` for integer `c`
    DistributePower,

    /// `(a+b)^2 = (a+b)(a+b)`
    ExpandPower,

    /// `a*(b+c) = a*b + a*c`
    DistributiveProperty,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let description = match self {
            Self::AddZero => "remove zero terms",
            Self::CombineLikeTerms => "combine like terms",
            Self::MultiplyZero => "a product with a zero factor is zero",
            Self::MultiplyOne => "remove factors of one",
            Self::MultiplyNumbers => "multiply numeric factors",
            Self::CombineLikeFactors => "combine like factors",
            Self::PowerZero => "anything to the power of zero is one",
            Self::PowerOne => "anything to the power of one is itself",
            Self::PowerZeroLeft => "zero to a positive power is zero",
            Self::PowerOneLeft => "one to any power is one",
            Self::EvaluatePower => "evaluate numeric power",
            Self::PowerPower => "multiply nested exponents",
            Self::DistributePower => "distribute the exponent over a product",
            Self::ExpandPower => "expand the power of a sum",
            Self::DistributiveProperty => "apply the distributive property",
        };
        write!(f, "{}", description)
    }
}

// We need to refer to these types in the documentation
#[allow(unused_imports)]
use crate::{Complex, ContinuedFraction, Rational, Real};
use crate::numeric::Rung;
use thiserror::Error;

/// Problems when parsing, constructing, coercing or doing arithmetic with
/// values of the tower, for example [`Real`] or [`Complex`] numbers
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Problem {
    /// The value cannot be represented on the requested rung,
    /// e.g. a non-integral [`Real`] asked to become an Integer
    #[error("cannot coerce {from:?} value to {to:?}")]
    Coercion { from: Rung, to: Rung },
    /// Neither operand could be coerced to the other's rung
    #[error("no coercion path between {0:?} and {1:?}")]
    NoCoercionPath(Rung, Rung),
    /// Tried to divide by an exact zero or invert one
    #[error("division by zero")]
    DivideByZero,
    /// The result has no defined value, e.g. 0·∞ or ∞−∞
    #[error("undefined result: {0}")]
    Undefined(&'static str),
    /// Tried to take the square root of a negative in a real-only setting
    #[error("square root of a negative value")]
    SqrtNegative,
    /// The point at infinity was used while extended complex mode is off
    #[error("extended complex mode is disabled")]
    ExtendedComplexDisabled,
    /// A root or degree argument was negative
    #[error("negative degree")]
    NegativeDegree,
    /// A root of degree zero was requested
    #[error("degree must be at least one")]
    ZeroDegree,
    /// Rounding mode Unnecessary was used but digits would be discarded
    #[error("rounding necessary")]
    RoundingNecessary,
    /// A continued fraction term does not fit in a signed 64-bit integer
    #[error("continued fraction term overflow")]
    TermOverflow,
    /// Operation was rejected because it was likely to consume all available resources
    #[error("operation would exhaust resources")]
    Exhausted,
    /// Unspecified problem while parsing
    #[error("parse error")]
    ParseError,
    /// When parsing a fraction either the numerator or denominator weren't decimal digits
    #[error("malformed fraction")]
    BadFraction,
    /// When parsing a decimal there was non-digits on one or both sides of the decimal point
    #[error("malformed decimal")]
    BadDecimal,
    /// When parsing an integer there were non-digits in the text
    #[error("malformed integer")]
    BadInteger,
    /// Complex text matched neither the rectangular nor the polar form
    #[error("malformed complex number")]
    BadComplex,
    /// Continued fraction text was not of the form `[a0; a1, a2]`
    #[error("malformed continued fraction")]
    BadContinuedFraction,
    /// Polar modulus must be non-negative
    #[error("negative modulus")]
    NegativeModulus,
    /// Term cache size for an iterator-backed continued fraction must be positive
    #[error("cache size must be positive")]
    BadCacheSize,
    /// Tried to convert a floating point NaN, which has no equivalent
    #[error("not a number")]
    NotANumber,
    /// Tried to convert a floating point Infinity which has no finite equivalent
    #[error("infinite value")]
    Infinity,
}

/// The broad family of a [`Problem`]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ProblemKind {
    /// Recoverable: pick another rung or propagate
    Coercion,
    /// Fatal to the current operation
    Arithmetic,
    /// Malformed input to a constructor or parser
    Construction,
}

impl Problem {
    /// Which family this problem belongs to
    ///
    /// # Example
    ///
    /// ```
    /// use rungs::{Problem, ProblemKind};
    /// assert_eq!(Problem::DivideByZero.kind(), ProblemKind::Arithmetic);
    /// assert_eq!(Problem::BadFraction.kind(), ProblemKind::Construction);
    /// ```
    pub fn kind(&self) -> ProblemKind {
        use Problem::*;
        match self {
            Coercion { .. } => ProblemKind::Coercion,
            NoCoercionPath(..) | DivideByZero | Undefined(_) | SqrtNegative
            | ExtendedComplexDisabled | NegativeDegree | ZeroDegree | RoundingNecessary
            | TermOverflow | Exhausted => ProblemKind::Arithmetic,
            ParseError | BadFraction | BadDecimal | BadInteger | BadComplex
            | BadContinuedFraction | NegativeModulus | BadCacheSize | NotANumber | Infinity => {
                ProblemKind::Construction
            }
        }
    }

    /// Is this a recoverable coercion failure?
    pub fn is_coercion(&self) -> bool {
        self.kind() == ProblemKind::Coercion
    }
}

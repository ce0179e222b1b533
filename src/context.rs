/// How to discard digits when a value is rounded to a [`MathContext`]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum RoundingMode {
    /// Away from zero
    Up,
    /// Towards zero (truncation)
    Down,
    /// Towards positive infinity
    Ceiling,
    /// Towards negative infinity
    Floor,
    /// Nearest, ties away from zero
    HalfUp,
    /// Nearest, ties towards zero
    HalfDown,
    /// Nearest, ties to the even neighbour
    #[default]
    HalfEven,
    /// Rounding is an error
    Unnecessary,
}

/// Precision context: how many significant decimal digits to keep,
/// and how to round away the rest
///
/// A precision of zero means unlimited, i.e. do not round
///
/// # Example
///
/// ```
/// use rungs::{MathContext, RoundingMode};
/// let ctx = MathContext::new(10, RoundingMode::HalfUp);
/// assert_eq!(ctx.precision(), 10);
/// assert!(MathContext::UNLIMITED.is_unlimited());
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct MathContext {
    precision: u32,
    rounding: RoundingMode,
}

impl MathContext {
    /// Compute with full precision, never rounding
    pub const UNLIMITED: MathContext = MathContext {
        precision: 0,
        rounding: RoundingMode::HalfUp,
    };

    /// 34 digits, the IEEE 754 decimal128 precision
    pub const DECIMAL128: MathContext = MathContext {
        precision: 34,
        rounding: RoundingMode::HalfEven,
    };

    /// 16 digits, the IEEE 754 decimal64 precision
    pub const DECIMAL64: MathContext = MathContext {
        precision: 16,
        rounding: RoundingMode::HalfEven,
    };

    pub const fn new(precision: u32, rounding: RoundingMode) -> Self {
        Self {
            precision,
            rounding,
        }
    }

    /// Precision with the default (half even) rounding
    pub const fn with_precision(precision: u32) -> Self {
        Self::new(precision, RoundingMode::HalfEven)
    }

    pub const fn precision(&self) -> u32 {
        self.precision
    }

    pub const fn rounding(&self) -> RoundingMode {
        self.rounding
    }

    pub const fn is_unlimited(&self) -> bool {
        self.precision == 0
    }

    /// A context usable for operations that can't terminate without rounding
    pub(crate) const fn bounded(self) -> Self {
        if self.is_unlimited() {
            Self::DECIMAL128
        } else {
            self
        }
    }

    /// The same rounding with `extra` more digits
    pub(crate) const fn widen(self, extra: u32) -> Self {
        let bounded = self.bounded();
        Self {
            precision: bounded.precision + extra,
            rounding: bounded.rounding,
        }
    }

    /// The wider of two contexts, unlimited being the widest
    pub(crate) fn max(self, other: Self) -> Self {
        if self.is_unlimited() {
            self
        } else if other.is_unlimited() || other.precision > self.precision {
            other
        } else {
            self
        }
    }
}

impl Default for MathContext {
    fn default() -> Self {
        Self::DECIMAL128
    }
}

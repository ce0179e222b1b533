use crate::config::{Config, RationalEquality};
use crate::decimal::math;
use crate::integer::perfect_root;
use crate::{ComplexRect, Decimal, Integer, MathContext, Numeric, Problem, Real};
use num::bigint::Sign::{self, *};
use num::{BigInt, BigUint, Integer as _};
use num::{One, Zero};
use regex::Regex;
use std::sync::LazyLock;

pub(crate) mod convert;

/// Ratio of two integers
///
/// This type is functionally a [`Sign`] with a ratio between two [`BigUint`]
/// (the numerator and denominator) plus an exactness flag and the
/// [`MathContext`] used whenever decimal digits are needed.
///
/// Neither construction nor arithmetic reduce the fraction, call
/// [`reduce`](Rational::reduce) for the canonical form. Equality compares
/// values, use [`eq_terms`](Rational::eq_terms) to compare the stored terms.
///
/// # Examples
///
/// Parsing a rational from a simple fraction
/// ```
/// use rungs::Rational;
/// let half: Rational = "9/18".parse().unwrap();
/// assert_eq!(half.to_string(), "9/18");
/// assert_eq!(half.reduce().to_string(), "1/2");
/// ```
///
/// Parsing a decimal fraction
/// ```
/// use rungs::Rational;
/// let point_two_five: Rational = "0.25".parse().unwrap();
/// assert_eq!(point_two_five, Rational::fraction(1, 4).unwrap());
/// ```
///
/// Converting a 64-bit floating point number
/// ```
/// use rungs::Rational;
/// let r: Rational = 0.3_f64.try_into().unwrap();
/// assert!(r != Rational::fraction(3, 10).unwrap());
/// ```
///
/// Simple arithmetic
/// ```
/// use rungs::Rational;
/// let quarter = Rational::fraction(1, 4).unwrap();
/// let eighteen = Rational::new(18);
/// let two = Rational::one() + Rational::one();
/// let sixteen = eighteen - two;
/// let four = quarter * sixteen;
/// assert_eq!(four, Rational::new(4));
/// ```
#[derive(Clone, Debug)]
pub struct Rational {
    sign: Sign,
    numerator: BigUint,
    denominator: BigUint,
    exact: bool,
    context: MathContext,
}

static TWO: LazyLock<BigUint> = LazyLock::new(|| BigUint::from(2u8));
static FIVE: LazyLock<BigUint> = LazyLock::new(|| BigUint::from(5u8));
static TEN: LazyLock<BigUint> = LazyLock::new(|| BigUint::from(10u8));

static FRACTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([+-]?\d+)\s*[/⁄]\s*([+-]?\d+)\s*$").expect("fraction pattern is valid")
});

impl Rational {
    fn build(sign: Sign, numerator: BigUint, denominator: BigUint) -> Self {
        let sign = if numerator.is_zero() { NoSign } else { sign };
        Self {
            sign,
            numerator,
            denominator,
            exact: true,
            context: MathContext::UNLIMITED,
        }
    }

    /// Zero, the additive identity
    pub fn zero() -> Self {
        Self::build(NoSign, BigUint::ZERO, BigUint::one())
    }

    /// One, the multiplicative identity
    pub fn one() -> Self {
        Self::build(Plus, BigUint::one(), BigUint::one())
    }

    /// The Rational corresponding to the provided [`i64`]
    pub fn new(n: i64) -> Self {
        Self::from_bigint(BigInt::from(n))
    }

    /// The Rational corresponding to the provided [`BigInt`]
    pub fn from_bigint(n: BigInt) -> Self {
        let (sign, numerator) = n.into_parts();
        Self::build(sign, numerator, BigUint::one())
    }

    /// The Rational corresponding to the provided [`i64`]
    /// numerator and [`u64`] denominator as a fraction
    pub fn fraction(n: i64, d: u64) -> Result<Self, Problem> {
        Self::from_bigint_fraction(BigInt::from(n), BigUint::from(d))
    }

    /// The Rational corresponding to the provided [`BigInt`]
    /// numerator and [`BigUint`] denominator as a fraction
    pub fn from_bigint_fraction(n: BigInt, denominator: BigUint) -> Result<Self, Problem> {
        if denominator.is_zero() {
            return Err(Problem::DivideByZero);
        }
        let (sign, numerator) = n.into_parts();
        Ok(Self::build(sign, numerator, denominator))
    }

    /// The fraction n / d, with the sign of the denominator moved onto the numerator
    pub fn from_bigints(n: BigInt, d: BigInt) -> Result<Self, Problem> {
        let (dsign, denominator) = d.into_parts();
        let (nsign, numerator) = n.into_parts();
        if denominator.is_zero() {
            return Err(Problem::DivideByZero);
        }
        Ok(Self::build(nsign * dsign, numerator, denominator))
    }

    /// The same value flagged with the given exactness
    pub fn with_exact(self, exact: bool) -> Self {
        Self { exact, ..self }
    }

    /// The same value using `context` when digits are needed
    pub fn with_context(self, context: MathContext) -> Self {
        Self { context, ..self }
    }

    pub fn is_exact(&self) -> bool {
        self.exact
    }

    pub fn context(&self) -> MathContext {
        self.context
    }

    /// Divide both terms by their greatest common divisor
    ///
    /// # Example
    ///
    /// ```
    /// use rungs::Rational;
    /// let r = Rational::fraction(-12, 20).unwrap();
    /// assert_eq!(r.to_string(), "-12/20");
    /// assert_eq!(r.reduce().to_string(), "-3/5");
    /// ```
    pub fn reduce(self) -> Self {
        if self.denominator.is_one() {
            return self;
        }
        if self.numerator.is_zero() {
            return Self {
                denominator: BigUint::one(),
                ..self
            };
        }
        let divisor = self.numerator.gcd(&self.denominator);
        if divisor.is_one() {
            self
        } else {
            Self {
                numerator: &self.numerator / &divisor,
                denominator: &self.denominator / &divisor,
                ..self
            }
        }
    }

    /// Compare the stored terms without reducing either side
    ///
    /// # Example
    ///
    /// ```
    /// use rungs::Rational;
    /// let half = Rational::fraction(1, 2).unwrap();
    /// let two_quarters = Rational::fraction(2, 4).unwrap();
    /// assert_eq!(half, two_quarters);
    /// assert!(!half.eq_terms(&two_quarters));
    /// ```
    pub fn eq_terms(&self, other: &Self) -> bool {
        self.sign == other.sign
            && self.denominator == other.denominator
            && self.numerator == other.numerator
    }

    /// Equality under the chosen [`RationalEquality`]
    pub fn equals(&self, other: &Self, mode: RationalEquality) -> bool {
        match mode {
            RationalEquality::Reduced => self == other,
            RationalEquality::Terms => self.eq_terms(other),
        }
    }

    /// Equality under the mode set in the current [`Config`]
    pub fn equals_configured(&self, other: &Self) -> bool {
        self.equals(other, Config::current().rational_equality)
    }

    /// The inverse of this Rational
    ///
    /// # Example
    ///
    /// ```
    /// use rungs::Rational;
    /// let five = Rational::new(5);
    /// let a_fifth = Rational::fraction(1, 5).unwrap();
    /// assert_eq!(five.clone().inverse().unwrap(), a_fifth);
    /// assert_eq!(a_fifth.clone().inverse().unwrap(), five);
    /// assert!(Rational::zero().inverse().is_err());
    /// ```
    pub fn inverse(self) -> Result<Self, Problem> {
        if self.numerator.is_zero() {
            return Err(Problem::DivideByZero);
        }
        Ok(Self {
            numerator: self.denominator,
            denominator: self.numerator,
            ..self
        })
    }

    pub fn abs(self) -> Self {
        let sign = if self.sign == Minus { Plus } else { self.sign };
        Self { sign, ..self }
    }

    /// Checks if the value is an integer
    ///
    /// # Example
    ///
    /// ```
    /// use rungs::Rational;
    /// assert!(Rational::new(5).is_integer());
    /// assert!(Rational::fraction(16, 4).unwrap().is_integer());
    /// assert!(!Rational::fraction(5, 4).unwrap().is_integer());
    /// ```
    pub fn is_integer(&self) -> bool {
        self.denominator.is_one() || (&self.numerator % &self.denominator).is_zero()
    }

    /// The integer part of this Rational
    ///
    /// Non integer rationals will thus be truncated towards zero
    ///
    /// # Examples
    ///
    /// ```
    /// use rungs::Rational;
    /// let approx_pi = Rational::fraction(22, 7).unwrap();
    /// let three = Rational::new(3);
    /// assert_eq!(approx_pi.trunc(), three);
    /// ```
    pub fn trunc(&self) -> Self {
        let n = &self.numerator / &self.denominator;
        Self {
            exact: self.exact,
            context: self.context,
            ..Self::build(self.sign, n, BigUint::one())
        }
    }

    /// The fractional part of this Rational
    ///
    /// If the rational was negative, this fraction will also be negative
    ///
    /// # Examples
    ///
    /// ```
    /// use rungs::Rational;
    /// let approx_pi = Rational::fraction(22, 7).unwrap();
    /// let a_seventh = Rational::fraction(1, 7).unwrap();
    /// assert_eq!(approx_pi.fract(), a_seventh);
    /// ```
    ///
    /// ```
    /// use rungs::Rational;
    /// let backward = Rational::fraction(-53, 9).unwrap();
    /// let fract = Rational::fraction(-8, 9).unwrap();
    /// assert_eq!(backward.fract(), fract);
    /// ```
    pub fn fract(&self) -> Self {
        let n = &self.numerator % &self.denominator;
        Self {
            exact: self.exact,
            context: self.context,
            ..Self::build(self.sign, n, self.denominator.clone())
        }
    }

    /// The largest integer not greater than this value
    pub fn floor(&self) -> Self {
        let floor = self.numerator_bigint().div_floor(&BigInt::from(self.denominator.clone()));
        Self {
            exact: self.exact,
            context: self.context,
            ..Self::from_bigint(floor)
        }
    }

    pub(crate) fn numerator(&self) -> &BigUint {
        &self.numerator
    }

    pub(crate) fn denominator(&self) -> &BigUint {
        &self.denominator
    }

    /// The signed numerator
    pub fn numerator_bigint(&self) -> BigInt {
        BigInt::from_biguint(self.sign, self.numerator.clone())
    }

    /// Signed numerator and (positive) denominator
    pub fn to_bigint_fraction(&self) -> (BigInt, BigInt) {
        (self.numerator_bigint(), BigInt::from(self.denominator.clone()))
    }

    /// Does the decimal expansion of this value end?
    ///
    /// # Example
    ///
    /// ```
    /// use rungs::Rational;
    /// assert!(!Rational::fraction(1, 3).unwrap().is_terminating());
    /// assert!(Rational::fraction(3, 6).unwrap().is_terminating());
    /// ```
    pub fn is_terminating(&self) -> bool {
        let mut rem = self.clone().reduce().denominator;
        while (&rem % &*TEN).is_zero() {
            rem /= &*TEN;
        }
        while (&rem % &*FIVE).is_zero() {
            rem /= &*FIVE;
        }
        while (&rem % &*TWO).is_zero() {
            rem /= &*TWO;
        }
        rem.is_one()
    }

    /// Either the corresponding [`BigInt`] or None if this value is not an integer
    pub fn to_big_integer(&self) -> Option<BigInt> {
        let (whole, rest) = self.numerator.div_rem(&self.denominator);
        if rest.is_zero() {
            Some(BigInt::from_biguint(self.sign, whole))
        } else {
            None
        }
    }

    /// The [`Sign`] of this value
    pub fn sign(&self) -> Sign {
        self.sign
    }

    pub fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }

    /// The value as a [`Decimal`] rounded to `ctx`
    ///
    /// # Example
    ///
    /// ```
    /// use rungs::{MathContext, Rational};
    /// let third: Rational = "1/3".parse().unwrap();
    /// let d = third.as_decimal(MathContext::with_precision(10)).unwrap();
    /// assert_eq!(d.to_string(), "0.3333333333");
    /// ```
    pub fn as_decimal(&self, ctx: MathContext) -> Result<Decimal, Problem> {
        Ok(self.to_decimal_lossy(ctx)?.0)
    }

    pub(crate) fn to_decimal_lossy(&self, ctx: MathContext) -> Result<(Decimal, bool), Problem> {
        let (n, d) = self.to_bigint_fraction();
        Decimal::from_ratio(&n, &d, ctx)
    }

    /// The [`Real`] for this value, exact when the expansion terminates
    pub fn to_real(&self, ctx: MathContext) -> Result<Real, Problem> {
        let (value, lost) = self.to_decimal_lossy(ctx)?;
        let context = if lost { ctx.bounded() } else { ctx };
        Ok(Real::new(value, self.exact && !lost, context))
    }

    /// The [`Integer`] for this value, if it is whole
    pub fn to_integer(&self) -> Option<Integer> {
        self.to_big_integer()
            .map(|n| Integer::from_bigint(n).with_exact(self.exact))
    }

    /// Square root
    ///
    /// Exact when both reduced terms are perfect squares, otherwise an
    /// irrational [`Real`]. Negative values give a [`ComplexRect`]
    ///
    /// # Example
    ///
    /// ```
    /// use rungs::{MathContext, Rational};
    /// let r = Rational::fraction(9, 16).unwrap();
    /// let root = r.sqrt(MathContext::UNLIMITED).unwrap();
    /// assert_eq!(root.to_string(), "3/4");
    /// ```
    pub fn sqrt(&self, ctx: MathContext) -> Result<Numeric, Problem> {
        let reduced = self.clone().reduce();
        if reduced.sign == NoSign {
            return Ok(reduced.into());
        }
        let exact_root = match (
            perfect_root(&reduced.numerator),
            perfect_root(&reduced.denominator),
        ) {
            (Some(n), Some(d)) => Some(Self {
                exact: self.exact,
                context: self.context,
                ..Self::build(Plus, n, d)
            }),
            _ => None,
        };
        let root = match exact_root {
            Some(root) if reduced.sign == Plus => return Ok(root.into()),
            Some(root) => root.to_real(ctx)?,
            None => {
                let ctx = ctx.max(self.context).bounded();
                let magnitude = reduced.abs().as_decimal(ctx.widen(2))?;
                let (root, _) = math::sqrt(&magnitude, ctx)?;
                Real::irrational(root, ctx)
            }
        };
        if self.sign == Minus {
            Ok(ComplexRect::new(Real::zero(), root).into())
        } else {
            Ok(root.into())
        }
    }

    // This could grow unreasonably in terms of object size
    // so only call this for modest exp values
    fn pow_up(&self, exp: &BigUint) -> Self {
        let mut result = Self {
            exact: self.exact,
            context: self.context,
            ..Self::one()
        };
        for b in (0..(exp.bits())).rev() {
            result *= result.clone();
            if exp.bit(b) {
                result *= self;
            }
        }
        result
    }

    /// Integer exponentiation
    pub fn powi(self, exp: BigInt) -> Result<Self, Problem> {
        const TOO_MANY_BITS: u64 = 1000;
        if exp.is_zero() {
            return Ok(Self {
                exact: self.exact,
                context: self.context,
                ..Self::one()
            });
        }
        if self.sign == NoSign {
            if exp.sign() == Minus {
                return Err(Problem::DivideByZero);
            }
            return Ok(self);
        }
        // Plus or minus one exactly
        if self.numerator == self.denominator {
            let sign = if self.sign == Minus && exp.bit(0) { Minus } else { Plus };
            return Ok(Self {
                sign,
                exact: self.exact,
                context: self.context,
                ..Self::one()
            });
        }
        if exp.bits() >= TOO_MANY_BITS {
            return Err(Problem::Exhausted);
        }
        match exp.sign() {
            Minus => Ok(self.inverse()?.pow_up(exp.magnitude())),
            _ => Ok(self.pow_up(exp.magnitude())),
        }
    }
}

use core::fmt;

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denominator.is_one() {
            let int = self.numerator.to_string();
            return f.pad_integral(self.sign != Minus, "", &int);
        }

        if self.sign == Minus {
            f.write_str("-")?;
        } else if f.sign_plus() {
            f.write_str("+")?;
        }
        if f.alternate() {
            let whole = &self.numerator / &self.denominator;
            write!(f, "{whole}.")?;
            let round = &whole * &self.denominator;
            let mut left = &self.numerator - &round;
            let mut digits = f.precision().unwrap_or(1000);
            loop {
                left *= &*TEN;
                let digit = &left / &self.denominator;
                write!(f, "{digit}")?;
                left -= digit * &self.denominator;
                if left.is_zero() {
                    break;
                }
                digits -= 1;
                if digits == 0 {
                    break;
                }
            }
            Ok(())
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

impl std::str::FromStr for Rational {
    type Err = Problem;

    fn from_str(s: &str) -> Result<Self, Problem> {
        if let Some(caps) = FRACTION.captures(s) {
            let n: BigInt = caps[1].parse().map_err(|_| Problem::BadFraction)?;
            let d: BigInt = caps[2].parse().map_err(|_| Problem::BadFraction)?;
            return Self::from_bigints(n, d);
        }
        if s.contains(['/', '⁄']) {
            return Err(Problem::BadFraction);
        }
        let decimal: Decimal = if s.contains('.') {
            s.parse()?
        } else {
            match s.parse::<Integer>() {
                Ok(n) => return Ok(Self::from_bigint(n.value().clone())),
                // exponent forms such as 5e-3
                Err(problem) => s.parse().map_err(|_| problem)?,
            }
        };
        let (n, d) = decimal.to_fraction();
        Self::from_bigint_fraction(n, d)
    }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Self::new(n)
    }
}

impl From<BigInt> for Rational {
    fn from(n: BigInt) -> Self {
        Self::from_bigint(n)
    }
}

use core::ops::*;

impl Add for Rational {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        use std::cmp::Ordering::*;

        let exact = self.exact && other.exact;
        let context = self.context.max(other.context);
        let (a, b, denominator) = if self.denominator == other.denominator {
            (self.numerator, other.numerator, self.denominator)
        } else {
            (
                &self.numerator * &other.denominator,
                &other.numerator * &self.denominator,
                &self.denominator * &other.denominator,
            )
        };
        let (sign, numerator) = match (self.sign, other.sign) {
            (any, NoSign) => (any, a),
            (NoSign, any) => (any, b),
            (Plus, Plus) => (Plus, a + b),
            (Minus, Minus) => (Minus, a + b),
            (x, y) => match a.cmp(&b) {
                Greater => (x, a - b),
                Equal => (NoSign, BigUint::ZERO),
                Less => (y, b - a),
            },
        };
        Self {
            exact,
            context,
            ..Self::build(sign, numerator, denominator)
        }
    }
}

impl Neg for Rational {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            sign: -self.sign,
            ..self
        }
    }
}

impl Sub for Rational {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self + -other
    }
}

// Zero times anything is exactly zero
fn product_exact(a: &Rational, b: &Rational) -> bool {
    (a.exact && b.exact) || (a.exact && a.is_zero()) || (b.exact && b.is_zero())
}

impl Mul for Rational {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        let exact = product_exact(&self, &other);
        let context = self.context.max(other.context);
        let sign = self.sign * other.sign;
        let numerator = self.numerator * other.numerator;
        let denominator = self.denominator * other.denominator;
        Self {
            exact,
            context,
            ..Self::build(sign, numerator, denominator)
        }
    }
}

impl MulAssign for Rational {
    fn mul_assign(&mut self, other: Self) {
        *self *= &other;
    }
}

impl MulAssign<&Rational> for Rational {
    fn mul_assign(&mut self, other: &Rational) {
        self.exact = product_exact(self, other);
        self.context = self.context.max(other.context);
        self.sign = self.sign * other.sign;
        self.numerator = &self.numerator * &other.numerator;
        self.denominator = &self.denominator * &other.denominator;
    }
}

impl Div for Rational {
    type Output = Result<Self, Problem>;

    fn div(self, other: Self) -> Result<Self, Problem> {
        Ok(self * other.inverse()?)
    }
}

impl PartialEq for Rational {
    fn eq(&self, other: &Self) -> bool {
        if self.sign != other.sign {
            return false;
        }
        if self.denominator == other.denominator {
            self.numerator == other.numerator
        } else {
            self.clone().reduce().eq_terms(&other.clone().reduce())
        }
    }
}

impl Eq for Rational {}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use std::cmp::Ordering::*;
        match self.sign.cmp(&other.sign) {
            Less => return Less,
            Greater => return Greater,
            _ => (),
        }
        let (left, right) = if self.denominator == other.denominator {
            (self.numerator.clone(), other.numerator.clone())
        } else {
            (
                &self.numerator * &other.denominator,
                &other.numerator * &self.denominator,
            )
        };
        match self.sign {
            Plus => left.cmp(&right),
            Minus => right.cmp(&left),
            NoSign => Equal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let many: Rational = "12345".parse().unwrap();
        let s = format!("{many}");
        assert_eq!(s, "12345");
        let five: Rational = "5".parse().unwrap();
        let third: Rational = "1/3".parse().unwrap();
        let s = format!("{}", five * third);
        assert_eq!(s, "5/3");
        let s = format!("{:#.5}", Rational::fraction(-2, 3).unwrap());
        assert_eq!(s, "-0.66666");
    }

    #[test]
    fn decimals() {
        let first: Rational = "0.0".parse().unwrap();
        assert_eq!(first, Rational::zero());
        let a: Rational = "0.4".parse().unwrap();
        let b: Rational = "2.5".parse().unwrap();
        let answer = a * b;
        assert_eq!(answer, Rational::one());
        assert!(!answer.eq_terms(&Rational::one()));
    }

    #[test]
    /// See e.g. https://discussions.apple.com/thread/252474975
    /// Apple calculator is not trustworthy if you are a programmer
    fn parse() {
        let big: Rational = "288230376151711743".parse().unwrap();
        let small: Rational = "45".parse().unwrap();
        let expected: Rational = "12970366926827028435".parse().unwrap();
        assert_eq!(big * small, expected);
    }

    #[test]
    fn parse_fractions() {
        let third: Rational = "1/3".parse().unwrap();
        let minus_four: Rational = "-4".parse().unwrap();
        let twelve: Rational = "12 / 20".parse().unwrap();
        let answer = third + minus_four * twelve;
        let expected: Rational = "-31/15".parse().unwrap();
        assert_eq!(answer, expected);
        let slash: Rational = "3⁄4".parse().unwrap();
        assert_eq!(slash, Rational::fraction(3, 4).unwrap());
        let flipped: Rational = "1/-2".parse().unwrap();
        assert_eq!(flipped.to_string(), "-1/2");
    }

    #[test]
    fn parse_errors() {
        assert_eq!("1/x".parse::<Rational>().unwrap_err(), Problem::BadFraction);
        assert_eq!("1/0".parse::<Rational>().unwrap_err(), Problem::DivideByZero);
        assert_eq!("1.x".parse::<Rational>().unwrap_err(), Problem::BadDecimal);
        assert_eq!("one".parse::<Rational>().unwrap_err(), Problem::BadInteger);
    }

    #[test]
    fn unreduced() {
        let a = Rational::fraction(2, 4).unwrap();
        let b = Rational::fraction(3, 4).unwrap();
        let sum = a + b;
        assert_eq!(sum.to_string(), "5/4");
        let product = Rational::fraction(2, 3).unwrap() * Rational::fraction(3, 4).unwrap();
        assert_eq!(product.to_string(), "6/12");
        assert_eq!(product.reduce().to_string(), "1/2");
    }

    #[test]
    fn equality_modes() {
        let half = Rational::fraction(1, 2).unwrap();
        let same = Rational::fraction(3, 6).unwrap();
        assert!(half.equals(&same, RationalEquality::Reduced));
        assert!(!half.equals(&same, RationalEquality::Terms));
        assert!(half.equals_configured(&same));
        let _guard = Config::default()
            .rational_equality(RationalEquality::Terms)
            .install();
        assert!(!half.equals_configured(&same));
    }

    #[test]
    fn signs() {
        let half: Rational = "4/8".parse().unwrap();
        let one = Rational::one();
        let minus_half = half - one;
        let two = Rational::new(2);
        let zero = Rational::zero();
        let minus_two = zero - two;
        let i2 = minus_two.inverse().unwrap();
        assert_eq!(i2, minus_half);
    }

    #[test]
    fn half_plus_one_times_two() {
        let two = Rational::new(2);
        let half = two.inverse().unwrap();
        let one = Rational::one();
        let two = Rational::new(2);
        let three = Rational::new(3);
        let sum = half + one;
        assert_eq!(sum * two, three);
    }

    #[test]
    fn three_divided_by_six() {
        let three = Rational::new(3);
        let six = Rational::new(6);
        let half: Rational = "1/2".parse().unwrap();
        assert_eq!((three / six).unwrap(), half);
        assert_eq!((half / Rational::zero()).unwrap_err(), Problem::DivideByZero);
    }

    #[test]
    fn exactness() {
        let vague = Rational::fraction(1, 3).unwrap().with_exact(false);
        let third = Rational::fraction(1, 3).unwrap();
        assert!(!(vague.clone() + third.clone()).is_exact());
        assert!((third.clone() + third).is_exact());
        assert!((Rational::zero() * vague).is_exact());
    }

    #[test]
    fn fract() {
        let seventy_ninths = Rational::fraction(70, 9).unwrap();
        assert_eq!(seventy_ninths.fract(), Rational::fraction(7, 9).unwrap());
        assert_eq!(
            seventy_ninths.clone().neg().fract(),
            Rational::fraction(-7, 9).unwrap()
        );
        let six = Rational::new(6);
        assert_eq!(six.fract(), Rational::zero());
    }

    #[test]
    fn trunc() {
        let seventy_ninths = Rational::fraction(70, 9).unwrap();
        let whole = seventy_ninths.trunc();
        let frac = seventy_ninths.fract();
        assert_eq!(whole + frac, seventy_ninths);
        let shrink = Rational::fraction(-405, 11).unwrap();
        let whole = shrink.trunc();
        let frac = shrink.fract();
        assert_eq!(whole + frac, shrink);
        let zero = Rational::zero();
        let whole = zero.trunc();
        let frac = zero.fract();
        assert_eq!(whole, frac);
        assert_eq!(whole + frac, zero);
    }

    #[test]
    fn floor() {
        assert_eq!(Rational::fraction(-7, 2).unwrap().floor(), Rational::new(-4));
        assert_eq!(Rational::fraction(7, 2).unwrap().floor(), Rational::new(3));
    }

    #[test]
    fn power() {
        let one_two_five = Rational::new(5).powi(BigInt::from(-3));
        assert_eq!(one_two_five, Rational::fraction(1, 125));
        let more = Rational::new(7).powi(11i32.into()).unwrap();
        assert_eq!(more, Rational::new(1_977_326_743));
        let minus_one = Rational::fraction(-3, 3).unwrap();
        assert_eq!(minus_one.powi(BigInt::from(3)).unwrap(), Rational::new(-1));
    }

    #[test]
    fn roots() {
        let ctx = MathContext::with_precision(12);
        let root = Rational::fraction(8, 18).unwrap().sqrt(ctx).unwrap();
        assert_eq!(root.to_string(), "2/3");
        let root = Rational::fraction(1, 2).unwrap().sqrt(ctx).unwrap();
        assert_eq!(root.to_string(), "0.707106781187");
        assert!(!root.is_exact());
        let root = Rational::fraction(-1, 4).unwrap().sqrt(ctx).unwrap();
        assert_eq!(root.to_string(), "0 + 0.5i");
    }

    #[test]
    fn decimal() {
        let decimal: Rational = "7.125".parse().unwrap();
        assert!(decimal.is_terminating());
        let half: Rational = "4/8".parse().unwrap();
        assert!(half.is_terminating());
        let third: Rational = "2/6".parse().unwrap();
        assert!(!third.is_terminating());
        let d = Rational::fraction(1, 8).unwrap().as_decimal(MathContext::UNLIMITED).unwrap();
        assert_eq!(d.to_string(), "0.125");
    }

    #[test]
    fn compare() {
        assert!(Rational::one() > Rational::zero());
        assert!(Rational::new(5) > Rational::new(4));
        assert!(Rational::new(-10) < Rational::new(5));
        assert!(Rational::fraction(1, 4).unwrap() < Rational::fraction(1, 3).unwrap());
        assert!(Rational::fraction(-1, 4).unwrap() > Rational::fraction(-1, 3).unwrap());
    }

    #[test]
    fn divide_by_zero() {
        let err = Rational::fraction(1, 0).unwrap_err();
        assert_eq!(err, Problem::DivideByZero);
    }
}

use crate::decimal::math;
use crate::{ComplexRect, Decimal, MathContext, Numeric, Problem, Rational, Real};
use num::bigint::Sign::{self, *};
use num::{BigInt, BigUint, Integer as _, One, Signed, ToPrimitive, Zero};

// Largest power worth attempting
const TOO_MANY_BITS: u64 = 1 << 32;

/// Arbitrary precision integer
///
/// The bottom rung of the tower. Addition, subtraction and multiplication are
/// closed, division yields a [`Rational`] when the divisor doesn't divide
/// evenly.
///
/// # Examples
///
/// ```
/// use rungs::{Integer, Numeric};
/// let six = Integer::new(6);
/// let four = Integer::new(4);
/// assert_eq!((&six * &four).to_string(), "24");
/// let ratio = six.divide(&four).unwrap();
/// assert_eq!(ratio.to_string(), "6/4");
/// ```
#[derive(Clone, Debug)]
pub struct Integer {
    value: BigInt,
    exact: bool,
}

impl Integer {
    pub fn new(n: i64) -> Self {
        Self::from_bigint(BigInt::from(n))
    }

    pub fn from_bigint(value: BigInt) -> Self {
        Self { value, exact: true }
    }

    pub fn zero() -> Self {
        Self::from_bigint(BigInt::zero())
    }

    pub fn one() -> Self {
        Self::from_bigint(BigInt::one())
    }

    /// The same value flagged with the given exactness
    pub fn with_exact(self, exact: bool) -> Self {
        Self { exact, ..self }
    }

    pub fn value(&self) -> &BigInt {
        &self.value
    }

    pub fn is_exact(&self) -> bool {
        self.exact
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    pub fn sign(&self) -> Sign {
        self.value.sign()
    }

    /// A context just wide enough to hold every digit
    pub fn context(&self) -> MathContext {
        let digits = crate::decimal::digit_count(self.value.magnitude());
        MathContext::with_precision(digits.try_into().unwrap_or(u32::MAX))
    }

    pub fn negate(&self) -> Self {
        Self {
            value: -&self.value,
            exact: self.exact,
        }
    }

    pub fn abs(&self) -> Self {
        Self {
            value: self.value.abs(),
            exact: self.exact,
        }
    }

    pub fn signum(&self) -> Self {
        Self {
            value: self.value.signum(),
            exact: self.exact,
        }
    }

    pub fn gcd(&self, other: &Self) -> Self {
        Self {
            value: self.value.gcd(&other.value),
            exact: self.exact && other.exact,
        }
    }

    /// Division, which is only closed over the integers when `other` divides
    /// this value, otherwise the answer is an unreduced [`Rational`]
    pub fn divide(&self, other: &Self) -> Result<Numeric, Problem> {
        if other.is_zero() {
            return Err(Problem::DivideByZero);
        }
        let exact = self.exact && other.exact;
        let (q, r) = self.value.div_rem(&other.value);
        if r.is_zero() {
            Ok(Self { value: q, exact }.into())
        } else {
            let ratio = Rational::from_bigints(self.value.clone(), other.value.clone())?;
            Ok(ratio.with_exact(exact).into())
        }
    }

    /// Raise to an arbitrary integer power
    ///
    /// Negative powers are [`Rational`]
    ///
    /// # Example
    ///
    /// ```
    /// use rungs::Integer;
    /// use num::BigInt;
    /// let two = Integer::new(2);
    /// assert_eq!(two.pow(&BigInt::from(10)).unwrap().to_string(), "1024");
    /// assert_eq!(two.pow(&BigInt::from(-2)).unwrap().to_string(), "1/4");
    /// ```
    pub fn pow(&self, exponent: &BigInt) -> Result<Numeric, Problem> {
        if exponent.sign() == Minus && self.is_zero() {
            return Err(Problem::DivideByZero);
        }
        let magnitude = exponent.magnitude();
        let value = if exponent.is_zero() {
            // 0^0 is taken to be one
            BigInt::one()
        } else if self.is_zero() || self.value.magnitude().is_one() {
            if self.value.sign() == Minus && magnitude.is_even() {
                BigInt::one()
            } else {
                self.value.clone()
            }
        } else {
            // the power has about bits(base)·exponent bits
            if BigUint::from(self.value.bits()) * magnitude > BigUint::from(TOO_MANY_BITS) {
                return Err(Problem::Exhausted);
            }
            split_pow(&self.value, magnitude, u32::MAX)
        };
        let raised = Self {
            value,
            exact: self.exact,
        };
        if exponent.sign() == Minus {
            let inverse = Rational::from_bigints(BigInt::one(), raised.value)?;
            Ok(inverse.with_exact(self.exact).into())
        } else {
            Ok(raised.into())
        }
    }

    pub fn powi(&self, exponent: i64) -> Result<Numeric, Problem> {
        self.pow(&BigInt::from(exponent))
    }

    /// Is this an exact square of some integer?
    ///
    /// # Example
    ///
    /// ```
    /// use rungs::Integer;
    /// assert!(Integer::new(144).is_perfect_square());
    /// assert!(!Integer::new(145).is_perfect_square());
    /// assert!(!Integer::new(-4).is_perfect_square());
    /// ```
    pub fn is_perfect_square(&self) -> bool {
        self.exact_root().is_some()
    }

    // Some(root) squared is this non-negative value
    fn exact_root(&self) -> Option<BigUint> {
        if self.value.sign() == Minus {
            return None;
        }
        perfect_root(self.value.magnitude())
    }

    /// Square root
    ///
    /// Perfect squares give an exact [`Integer`], other positive values an
    /// irrational [`Real`], and negative values a [`ComplexRect`] on the
    /// imaginary axis
    pub fn sqrt(&self, ctx: MathContext) -> Result<Numeric, Problem> {
        match self.value.sign() {
            NoSign => Ok(self.clone().into()),
            Plus => match self.exact_root() {
                Some(root) => Ok(Self {
                    value: root.into(),
                    exact: self.exact,
                }
                .into()),
                None => Ok(self.irrational_root(ctx)?.into()),
            },
            Minus => {
                let positive = self.abs();
                let im = match positive.exact_root() {
                    Some(root) => Real::from_bigint(root.into()).with_exact(self.exact),
                    None => positive.irrational_root(ctx)?,
                };
                Ok(ComplexRect::new(Real::zero(), im).into())
            }
        }
    }

    fn irrational_root(&self, ctx: MathContext) -> Result<Real, Problem> {
        let (root, _) = math::sqrt(&Decimal::from_bigint(self.value.clone()), ctx)?;
        Ok(Real::irrational(root, ctx.bounded()))
    }

    pub fn to_rational(&self) -> Rational {
        Rational::from_bigint(self.value.clone()).with_exact(self.exact)
    }

    pub fn to_real(&self) -> Real {
        Real::from_bigint(self.value.clone()).with_exact(self.exact)
    }
}

/// The square root of `n` when it is a perfect square
///
/// Digital roots outside {0, 1, 4, 7} and last digits 2, 3, 7 or 8 are
/// rejected before any root is taken
pub(crate) fn perfect_root(n: &BigUint) -> Option<BigUint> {
    if n.is_zero() {
        return Some(BigUint::zero());
    }
    let digital_root = (n % 9u32).to_u32()?;
    if !matches!(digital_root, 0 | 1 | 4 | 7) {
        return None;
    }
    let last = (n % 10u32).to_u32()?;
    if matches!(last, 2 | 3 | 7 | 8) {
        return None;
    }
    let root = n.sqrt();
    if &(&root * &root) == n {
        Some(root)
    } else {
        None
    }
}

/// base^exponent, splitting exponents beyond `limit` into two half powers
fn split_pow(base: &BigInt, exponent: &BigUint, limit: u32) -> BigInt {
    match exponent.to_u32() {
        Some(small) if small <= limit => base.pow(small),
        _ => {
            let half = exponent >> 1;
            let rest = exponent - &half;
            let first = split_pow(base, &half, limit);
            if rest == half {
                &first * &first
            } else {
                &first * split_pow(base, &rest, limit)
            }
        }
    }
}

impl PartialEq for Integer {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Integer {}

impl PartialOrd for Integer {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Integer {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.value.cmp(&other.value)
    }
}

impl From<i64> for Integer {
    fn from(n: i64) -> Self {
        Self::new(n)
    }
}

impl From<BigInt> for Integer {
    fn from(n: BigInt) -> Self {
        Self::from_bigint(n)
    }
}

use core::ops::*;

impl Add for &Integer {
    type Output = Integer;

    fn add(self, other: &Integer) -> Integer {
        Integer {
            value: &self.value + &other.value,
            exact: self.exact && other.exact,
        }
    }
}

impl Sub for &Integer {
    type Output = Integer;

    fn sub(self, other: &Integer) -> Integer {
        Integer {
            value: &self.value - &other.value,
            exact: self.exact && other.exact,
        }
    }
}

impl Mul for &Integer {
    type Output = Integer;

    fn mul(self, other: &Integer) -> Integer {
        // Zero times anything is exactly zero
        let exact = (self.exact && other.exact)
            || (self.exact && self.is_zero())
            || (other.exact && other.is_zero());
        Integer {
            value: &self.value * &other.value,
            exact,
        }
    }
}

impl Neg for Integer {
    type Output = Integer;

    fn neg(self) -> Integer {
        self.negate()
    }
}

use core::fmt;

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.value.magnitude().to_string();
        f.pad_integral(self.value.sign() != Minus, "", &digits)
    }
}

impl std::str::FromStr for Integer {
    type Err = Problem;

    fn from_str(s: &str) -> Result<Self, Problem> {
        let s = s.trim();
        let (sign, digits) = match s.strip_prefix('-') {
            Some(rest) => (Minus, rest),
            None => (Plus, s.strip_prefix('+').unwrap_or(s)),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Problem::BadInteger);
        }
        let magnitude = BigUint::parse_bytes(digits.as_bytes(), 10).ok_or(Problem::BadInteger)?;
        Ok(Self::from_bigint(BigInt::from_biguint(sign, magnitude)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse() {
        let big: Integer = "-288230376151711743".parse().unwrap();
        assert_eq!(big.to_string(), "-288230376151711743");
        assert_eq!("+12".parse::<Integer>().unwrap(), Integer::new(12));
        assert_eq!("1.5".parse::<Integer>().unwrap_err(), Problem::BadInteger);
        assert_eq!("".parse::<Integer>().unwrap_err(), Problem::BadInteger);
    }

    #[test]
    fn arithmetic() {
        let a = Integer::new(12);
        let b = Integer::new(-5);
        assert_eq!(&a + &b, Integer::new(7));
        assert_eq!(&a - &b, Integer::new(17));
        assert_eq!(&a * &b, Integer::new(-60));
        assert!((&a * &b).is_exact());
    }

    #[test]
    fn zero_times_inexact() {
        let zero = Integer::zero();
        let vague = Integer::new(3).with_exact(false);
        assert!((&zero * &vague).is_exact());
        assert!(!(&Integer::one() * &vague).is_exact());
        assert!(!(&zero + &vague).is_exact());
    }

    #[test]
    fn divide() {
        let twelve = Integer::new(12);
        let four = Integer::new(4);
        let five = Integer::new(5);
        assert!(matches!(twelve.divide(&four).unwrap(), Numeric::Integer(ref i) if *i == Integer::new(3)));
        let ratio = twelve.divide(&five).unwrap();
        assert!(matches!(ratio, Numeric::Rational(_)));
        assert_eq!(ratio.to_string(), "12/5");
        assert_eq!(twelve.divide(&Integer::zero()).unwrap_err(), Problem::DivideByZero);
    }

    #[test]
    fn powers() {
        let three = Integer::new(3);
        assert_eq!(three.powi(4).unwrap().to_string(), "81");
        assert_eq!(three.powi(-2).unwrap().to_string(), "1/9");
        assert_eq!(three.powi(0).unwrap().to_string(), "1");
        assert_eq!(Integer::new(-1).powi(7).unwrap().to_string(), "-1");
        assert_eq!(Integer::new(-1).powi(8).unwrap().to_string(), "1");
        assert_eq!(Integer::zero().powi(5).unwrap().to_string(), "0");
        assert_eq!(Integer::zero().powi(0).unwrap().to_string(), "1");
        assert_eq!(Integer::zero().powi(-1).unwrap_err(), Problem::DivideByZero);
    }

    #[test]
    fn huge_powers() {
        let exponent = BigInt::from(2).pow(40u32);
        assert_eq!(Integer::new(3).pow(&exponent).unwrap_err(), Problem::Exhausted);
        assert_eq!(Integer::new(3).pow(&-exponent.clone()).unwrap_err(), Problem::Exhausted);
        assert_eq!(Integer::new(-1).pow(&exponent).unwrap().to_string(), "1");
        assert_eq!(Integer::zero().pow(&exponent).unwrap().to_string(), "0");
        assert_eq!(Integer::new(2).powi(4096).unwrap().to_string().len(), 1234);
    }

    #[test]
    fn split_powers() {
        let seven = BigInt::from(7);
        let exponent = BigUint::from(45u32);
        assert_eq!(split_pow(&seven, &exponent, 4), seven.pow(45));
        assert_eq!(split_pow(&seven, &BigUint::from(64u32), 3), seven.pow(64));
    }

    #[test]
    fn perfect_squares() {
        for n in [0, 1, 4, 9, 16, 25, 1_000_000, 4_294_967_296] {
            assert!(Integer::new(n).is_perfect_square(), "{n}");
        }
        // 2, 3, 7, 8 endings and digital roots outside 0 1 4 7
        for n in [2, 3, 5, 6, 7, 8, 12, 99, 1_000_001] {
            assert!(!Integer::new(n).is_perfect_square(), "{n}");
        }
        let big = BigInt::from(10).pow(40) + 1u8;
        let square = Integer::from_bigint(&big * &big);
        assert!(square.is_perfect_square());
    }

    #[test]
    fn square_roots() {
        let ctx = MathContext::with_precision(10);
        let root = Integer::new(49).sqrt(ctx).unwrap();
        assert!(matches!(root, Numeric::Integer(ref i) if *i == Integer::new(7)));
        let root = Integer::new(2).sqrt(ctx).unwrap();
        assert_eq!(root.to_string(), "1.414213562");
        assert!(!root.is_exact());
        let root = Integer::new(-9).sqrt(ctx).unwrap();
        assert_eq!(root.to_string(), "0 + 3i");
        assert!(root.is_exact());
    }

    #[test]
    fn context() {
        assert_eq!(Integer::new(12345).context().precision(), 5);
    }
}

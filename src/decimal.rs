use crate::{MathContext, Problem, RoundingMode};
use core::cmp::Ordering;
use num::bigint::Sign::{self, *};
use num::{BigInt, BigUint, Integer, One, Signed, ToPrimitive, Zero};

pub mod math;

/// Arbitrary precision decimal number
///
/// The value is `unscaled × 10^-scale`. Arithmetic which can be done exactly
/// (addition, subtraction, multiplication) is exact, everything else takes a
/// [`MathContext`] and reports whether digits were lost.
///
/// # Examples
///
/// ```
/// use rungs::Decimal;
/// let a: Decimal = "1.25".parse().unwrap();
/// let b: Decimal = "-0.5".parse().unwrap();
/// assert_eq!((&a + &b).to_string(), "0.75");
/// assert_eq!((&a * &b).to_string(), "-0.625");
/// ```
#[derive(Clone, Debug)]
pub struct Decimal {
    unscaled: BigInt,
    scale: i64,
}

/// 10 to the power n
pub(crate) fn ten_pow(n: u64) -> BigUint {
    let n: u32 = n.try_into().unwrap_or(u32::MAX);
    BigUint::from(10u8).pow(n)
}

/// Decimal digits in the magnitude, at least one
pub(crate) fn digit_count(n: &BigUint) -> u64 {
    if n.is_zero() {
        return 1;
    }
    let bits = n.bits();
    let estimate = ((bits - 1) as f64 * std::f64::consts::LOG10_2) as u64 + 1;
    if *n >= ten_pow(estimate) {
        estimate + 1
    } else {
        estimate
    }
}

// Decide whether the truncated quotient moves away from zero
fn increment(q: &BigUint, half: Ordering, nonzero: bool, negative: bool, mode: RoundingMode) -> Result<bool, Problem> {
    use RoundingMode::*;
    if !nonzero {
        return Ok(false);
    }
    Ok(match mode {
        Up => true,
        Down => false,
        Ceiling => !negative,
        Floor => negative,
        HalfUp => half != Ordering::Less,
        HalfDown => half == Ordering::Greater,
        HalfEven => half == Ordering::Greater || (half == Ordering::Equal && q.bit(0)),
        Unnecessary => return Err(Problem::RoundingNecessary),
    })
}

/// Drop `drop` low digits from `mag`, `sticky` meaning non-zero digits were
/// already discarded below those. Returns the rounded magnitude and whether
/// anything was lost.
fn round_digits(
    mag: &BigUint,
    drop: u64,
    sticky: bool,
    negative: bool,
    mode: RoundingMode,
) -> Result<(BigUint, bool), Problem> {
    let divisor = ten_pow(drop);
    let (q, r) = mag.div_rem(&divisor);
    let nonzero = sticky || !r.is_zero();
    let twice: BigUint = &r << 1;
    let half = match twice.cmp(&divisor) {
        Ordering::Equal if sticky => Ordering::Greater,
        Ordering::Less if r.is_zero() => Ordering::Less,
        other => other,
    };
    let up = increment(&q, half, nonzero, negative, mode)?;
    if up {
        Ok((q + 1u8, true))
    } else {
        Ok((q, nonzero))
    }
}

impl Decimal {
    pub fn new(unscaled: BigInt, scale: i64) -> Self {
        Self { unscaled, scale }
    }

    pub fn zero() -> Self {
        Self::new(BigInt::zero(), 0)
    }

    pub fn one() -> Self {
        Self::new(BigInt::one(), 0)
    }

    pub fn from_bigint(n: BigInt) -> Self {
        Self::new(n, 0)
    }

    pub fn from_i64(n: i64) -> Self {
        Self::new(BigInt::from(n), 0)
    }

    pub fn unscaled(&self) -> &BigInt {
        &self.unscaled
    }

    pub fn scale(&self) -> i64 {
        self.scale
    }

    pub fn sign(&self) -> Sign {
        self.unscaled.sign()
    }

    pub fn is_zero(&self) -> bool {
        self.unscaled.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.unscaled.sign() == Minus
    }

    /// Number of significant digits held
    pub fn digits(&self) -> u64 {
        digit_count(self.unscaled.magnitude())
    }

    /// Power of ten of the most significant digit, e.g. 2 for 123.4
    pub fn magnitude_exponent(&self) -> i64 {
        self.digits() as i64 - 1 - self.scale
    }

    pub fn negate(&self) -> Self {
        Self::new(-&self.unscaled, self.scale)
    }

    pub fn abs(&self) -> Self {
        Self::new(self.unscaled.abs(), self.scale)
    }

    fn rescaled(&self, scale: i64) -> BigInt {
        debug_assert!(scale >= self.scale);
        let up = (scale - self.scale) as u64;
        if up == 0 {
            self.unscaled.clone()
        } else {
            &self.unscaled * BigInt::from(ten_pow(up))
        }
    }

    fn align(&self, other: &Self) -> (BigInt, BigInt, i64) {
        let scale = self.scale.max(other.scale);
        (self.rescaled(scale), other.rescaled(scale), scale)
    }

    /// Exact product by a power of ten
    pub fn shift(&self, n: i64) -> Self {
        Self::new(self.unscaled.clone(), self.scale - n)
    }

    /// Remove trailing zeros from the unscaled value
    pub fn strip_trailing_zeros(&self) -> Self {
        if self.unscaled.is_zero() {
            return Self::zero();
        }
        let ten = BigInt::from(10u8);
        let mut unscaled = self.unscaled.clone();
        let mut scale = self.scale;
        loop {
            let (q, r) = unscaled.div_rem(&ten);
            if !r.is_zero() {
                break;
            }
            unscaled = q;
            scale -= 1;
        }
        Self::new(unscaled, scale)
    }

    /// Whether this decimal is a whole number
    pub fn is_integer(&self) -> bool {
        self.scale <= 0 || (&self.unscaled % BigInt::from(ten_pow(self.scale as u64))).is_zero()
    }

    /// The value truncated towards zero
    pub fn trunc_bigint(&self) -> BigInt {
        if self.scale <= 0 {
            self.rescaled(0)
        } else {
            &self.unscaled / BigInt::from(ten_pow(self.scale as u64))
        }
    }

    /// The largest integer not greater than this value
    pub fn floor_bigint(&self) -> BigInt {
        if self.scale <= 0 {
            self.rescaled(0)
        } else {
            self.unscaled.div_floor(&BigInt::from(ten_pow(self.scale as u64)))
        }
    }

    /// The exact fraction numerator / denominator this decimal represents
    pub fn to_fraction(&self) -> (BigInt, BigUint) {
        if self.scale <= 0 {
            (self.rescaled(0), BigUint::one())
        } else {
            (self.unscaled.clone(), ten_pow(self.scale as u64))
        }
    }

    /// Round to the precision of `ctx`, also reporting whether digits were lost
    ///
    /// # Example
    ///
    /// ```
    /// use rungs::{Decimal, MathContext, RoundingMode};
    /// let d: Decimal = "2.71828".parse().unwrap();
    /// let (r, lost) = d.round(MathContext::new(3, RoundingMode::HalfUp)).unwrap();
    /// assert_eq!(r.to_string(), "2.72");
    /// assert!(lost);
    /// ```
    pub fn round(&self, ctx: MathContext) -> Result<(Self, bool), Problem> {
        Self::round_parts(self.unscaled.magnitude(), self.sign(), self.scale, false, ctx)
    }

    /// Round a sign-magnitude value with `sticky` already discarded digits
    fn round_parts(
        mag: &BigUint,
        sign: Sign,
        scale: i64,
        sticky: bool,
        ctx: MathContext,
    ) -> Result<(Self, bool), Problem> {
        let negative = sign == Minus;
        let digits = digit_count(mag);
        let precision = ctx.precision() as u64;
        if ctx.is_unlimited() || (digits <= precision && !sticky) {
            let unscaled = BigInt::from_biguint(if negative { Minus } else { Plus }, mag.clone());
            return Ok((Self::new(unscaled, scale), false));
        }
        let drop = digits.saturating_sub(precision);
        let (mut q, lost) = round_digits(mag, drop, sticky, negative, ctx.rounding())?;
        let mut scale = scale - drop as i64;
        if digit_count(&q) > precision {
            q /= 10u8;
            scale -= 1;
        }
        let unscaled = BigInt::from_biguint(if negative { Minus } else { Plus }, q);
        Ok((Self::new(unscaled, scale), lost))
    }

    /// Change the scale, rounding with `mode` if digits must be discarded
    pub fn with_scale(&self, scale: i64, mode: RoundingMode) -> Result<(Self, bool), Problem> {
        if scale >= self.scale {
            return Ok((Self::new(self.rescaled(scale), scale), false));
        }
        let drop = (self.scale - scale) as u64;
        let negative = self.is_negative();
        let (q, lost) = round_digits(self.unscaled.magnitude(), drop, false, negative, mode)?;
        let sign = if negative { Minus } else { Plus };
        Ok((Self::new(BigInt::from_biguint(sign, q), scale), lost))
    }

    /// The ratio n / d rounded to `ctx`, and whether that lost anything
    ///
    /// Under an unlimited context a terminating expansion is exact, otherwise
    /// the result is rounded to [`MathContext::DECIMAL128`]
    pub fn from_ratio(n: &BigInt, d: &BigInt, ctx: MathContext) -> Result<(Self, bool), Problem> {
        if d.is_zero() {
            return Err(Problem::DivideByZero);
        }
        if n.is_zero() {
            return Ok((Self::zero(), false));
        }
        let negative = (n.sign() == Minus) != (d.sign() == Minus);
        let sign = if negative { Minus } else { Plus };
        let n = n.magnitude();
        let d = d.magnitude();
        if ctx.is_unlimited() {
            if let Some(exact) = Self::terminating(n, d) {
                let (mag, scale) = exact;
                return Ok((Self::new(BigInt::from_biguint(sign, mag), scale), false));
            }
        }
        let ctx = ctx.bounded();
        let precision = ctx.precision() as i64;
        let shift = precision + 2 - (digit_count(n) as i64 - digit_count(d) as i64);
        let (numerator, denominator) = if shift >= 0 {
            (n * ten_pow(shift as u64), d.clone())
        } else {
            (n.clone(), d * ten_pow((-shift) as u64))
        };
        let (q, r) = numerator.div_rem(&denominator);
        Self::round_parts(&q, sign, shift, !r.is_zero(), ctx)
    }

    // n / d as an exact decimal, if d has no prime factors besides 2 and 5
    fn terminating(n: &BigUint, d: &BigUint) -> Option<(BigUint, i64)> {
        let g = n.gcd(d);
        let mut rest = d / &g;
        let mut twos = 0u64;
        let mut fives = 0u64;
        while rest.is_even() {
            rest >>= 1;
            twos += 1;
        }
        let five = BigUint::from(5u8);
        while (&rest % &five).is_zero() {
            rest /= &five;
            fives += 1;
        }
        if !rest.is_one() {
            return None;
        }
        let scale = twos.max(fives);
        let multiplier = ten_pow(scale) / (d / &g);
        Some(((n / &g) * multiplier, scale as i64))
    }

    /// Division rounded to `ctx`
    ///
    /// # Example
    ///
    /// ```
    /// use rungs::{Decimal, MathContext};
    /// let one = Decimal::one();
    /// let three = Decimal::from_i64(3);
    /// let (third, lost) = one.div(&three, MathContext::with_precision(5)).unwrap();
    /// assert_eq!(third.to_string(), "0.33333");
    /// assert!(lost);
    /// ```
    pub fn div(&self, other: &Self, ctx: MathContext) -> Result<(Self, bool), Problem> {
        let (q, lost) = Self::from_ratio(&self.unscaled, &other.unscaled, ctx)?;
        Ok((Self::new(q.unscaled, q.scale + self.scale - other.scale), lost))
    }

    pub fn to_f64(&self) -> f64 {
        self.to_string().parse().unwrap_or(f64::NAN)
    }

    /// The decimal expansion of a finite `f64`, exactly
    pub fn from_f64(f: f64) -> Result<Self, Problem> {
        let rational: crate::Rational = f.try_into()?;
        let (n, d) = rational.to_bigint_fraction();
        // binary fractions always terminate
        Ok(Self::from_ratio(&n, &d, MathContext::UNLIMITED)?.0)
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Decimal {}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.sign().cmp(&other.sign()) {
            Ordering::Equal => (),
            unequal => return unequal,
        }
        let (a, b, _) = self.align(other);
        a.cmp(&b)
    }
}

use core::ops::{Add, Mul, Neg, Sub};

impl Add for &Decimal {
    type Output = Decimal;

    fn add(self, other: &Decimal) -> Decimal {
        let (a, b, scale) = self.align(other);
        Decimal::new(a + b, scale)
    }
}

impl Sub for &Decimal {
    type Output = Decimal;

    fn sub(self, other: &Decimal) -> Decimal {
        let (a, b, scale) = self.align(other);
        Decimal::new(a - b, scale)
    }
}

impl Mul for &Decimal {
    type Output = Decimal;

    fn mul(self, other: &Decimal) -> Decimal {
        Decimal::new(&self.unscaled * &other.unscaled, self.scale + other.scale)
    }
}

impl Neg for Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        Decimal::new(-self.unscaled, self.scale)
    }
}

impl From<i64> for Decimal {
    fn from(n: i64) -> Self {
        Self::from_i64(n)
    }
}

impl From<BigInt> for Decimal {
    fn from(n: BigInt) -> Self {
        Self::from_bigint(n)
    }
}

use core::fmt;

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.unscaled.magnitude().to_string();
        let mut text = String::with_capacity(digits.len() + 4);
        if self.scale <= 0 {
            text.push_str(&digits);
            if !self.unscaled.is_zero() {
                for _ in 0..(-self.scale) {
                    text.push('0');
                }
            }
        } else {
            let scale = self.scale as usize;
            if digits.len() > scale {
                let (whole, fraction) = digits.split_at(digits.len() - scale);
                text.push_str(whole);
                text.push('.');
                text.push_str(fraction);
            } else {
                text.push_str("0.");
                for _ in 0..(scale - digits.len()) {
                    text.push('0');
                }
                text.push_str(&digits);
            }
        }
        f.pad_integral(self.sign() != Minus, "", &text)
    }
}

impl std::str::FromStr for Decimal {
    type Err = Problem;

    fn from_str(s: &str) -> Result<Self, Problem> {
        let s = s.trim();
        let (negative, s) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };
        let (mantissa, exponent) = match s.find(['e', 'E']) {
            Some(at) => {
                let exp: i64 = s[at + 1..].parse().map_err(|_| Problem::BadDecimal)?;
                (&s[..at], exp)
            }
            None => (s, 0),
        };
        let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        if whole.is_empty() && fraction.is_empty() {
            return Err(Problem::BadDecimal);
        }
        let all = [whole, fraction].concat();
        if !all.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Problem::BadDecimal);
        }
        let magnitude = BigUint::parse_bytes(all.as_bytes(), 10).ok_or(Problem::BadDecimal)?;
        let sign = if negative { Minus } else { Plus };
        let scale = fraction.len() as i64 - exponent;
        Ok(Self::new(BigInt::from_biguint(sign, magnitude), scale))
    }
}

impl ToPrimitive for Decimal {
    fn to_i64(&self) -> Option<i64> {
        if self.is_integer() {
            self.trunc_bigint().to_i64()
        } else {
            None
        }
    }

    fn to_u64(&self) -> Option<u64> {
        if self.is_integer() {
            self.trunc_bigint().to_u64()
        } else {
            None
        }
    }

    fn to_f64(&self) -> Option<f64> {
        Some(Decimal::to_f64(self))
    }
}

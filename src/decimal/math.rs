//! Elementary functions over [`Decimal`]
//!
//! Every function works at a few guard digits beyond the requested context
//! and rounds once at the end. Transcendental results are never exact.

use super::{digit_count, ten_pow, Decimal};
use crate::consts::pi_decimal;
use crate::{MathContext, Problem};
use num::bigint::Sign::*;
use num::BigInt;

const GUARD: u32 = 10;
const MAX_TERMS: usize = 100_000;

// Is `term` too small to change `sum` at the working precision?
fn negligible(term: &Decimal, sum: &Decimal, work: MathContext) -> bool {
    if term.is_zero() {
        return true;
    }
    let reference = if sum.is_zero() { 0 } else { sum.magnitude_exponent() };
    term.magnitude_exponent() < reference - work.precision() as i64 - 2
}

fn rounded(d: Decimal, ctx: MathContext) -> Result<Decimal, Problem> {
    Ok(d.round(ctx)?.0)
}

fn half() -> Decimal {
    Decimal::new(BigInt::from(5), 1)
}

fn two() -> Decimal {
    Decimal::from_i64(2)
}

/// x · 2^k, exact
fn scale_pow2(x: &Decimal, k: i64) -> Decimal {
    if k >= 0 {
        x * &Decimal::from_bigint(BigInt::from(2).pow(k as u32))
    } else {
        let fives = Decimal::from_bigint(BigInt::from(5).pow((-k) as u32));
        (x * &fives).shift(k)
    }
}

/// The principal n-th root of x, and whether it is exact
///
/// Even roots of negative values are [`Problem::SqrtNegative`]
pub fn nth_root(x: &Decimal, n: u32, ctx: MathContext) -> Result<(Decimal, bool), Problem> {
    if n == 0 {
        return Err(Problem::ZeroDegree);
    }
    if x.is_zero() {
        return Ok((Decimal::zero(), true));
    }
    if n == 1 {
        let (r, lost) = x.round(ctx)?;
        return Ok((r, !lost));
    }
    let negative = x.is_negative();
    if negative && n % 2 == 0 {
        return Err(Problem::SqrtNegative);
    }
    let bounded = ctx.bounded();
    let degree = n as i64;
    let mag = x.unscaled().magnitude();
    let wanted = degree * (bounded.precision() as i64 + 2);
    let mut m = (wanted - digit_count(mag) as i64).max(0);
    m += (degree - (x.scale() + m).rem_euclid(degree)) % degree;
    let radicand = mag * ten_pow(m as u64);
    let root = radicand.nth_root(n);
    let exact = root.pow(n) == radicand;
    let scale = (x.scale() + m) / degree;
    let sign = if negative { Minus } else { Plus };
    if exact && ctx.is_unlimited() {
        let value = Decimal::new(BigInt::from_biguint(sign, root), scale);
        return Ok((value.strip_trailing_zeros(), true));
    }
    let (value, lost) = Decimal::round_parts(&root, sign, scale, !exact, bounded)?;
    if exact && !lost {
        Ok((value.strip_trailing_zeros(), true))
    } else {
        Ok((value, false))
    }
}

/// Square root, and whether it is exact
///
/// # Example
///
/// ```
/// use rungs::{Decimal, MathContext};
/// let two = Decimal::from_i64(2);
/// let (root, exact) = rungs::decimal_math::sqrt(&two, MathContext::with_precision(10)).unwrap();
/// assert_eq!(root.to_string(), "1.414213562");
/// assert!(!exact);
/// ```
pub fn sqrt(x: &Decimal, ctx: MathContext) -> Result<(Decimal, bool), Problem> {
    nth_root(x, 2, ctx)
}

/// x raised to an integer power, and whether it is exact
pub fn powi(x: &Decimal, n: i64, ctx: MathContext) -> Result<(Decimal, bool), Problem> {
    if n == 0 {
        return Ok((Decimal::one(), true));
    }
    if n < 0 {
        if x.is_zero() {
            return Err(Problem::DivideByZero);
        }
        let (p, exact) = powi(x, n.checked_neg().ok_or(Problem::Exhausted)?, ctx.widen(GUARD))?;
        let (q, lost) = Decimal::one().div(&p, ctx)?;
        return Ok((q, exact && !lost));
    }
    if ctx.is_unlimited() {
        let n: u32 = n.try_into().map_err(|_| Problem::Exhausted)?;
        let scale = x.scale().checked_mul(n as i64).ok_or(Problem::Exhausted)?;
        return Ok((Decimal::new(x.unscaled().pow(n), scale), true));
    }
    let work = ctx.widen(GUARD);
    let mut result = Decimal::one();
    let mut base = x.clone();
    let mut exact = true;
    let mut n = n as u64;
    while n > 0 {
        if n & 1 == 1 {
            let (r, lost) = (&result * &base).round(work)?;
            exact &= !lost;
            result = r;
        }
        n >>= 1;
        if n > 0 {
            let (b, lost) = (&base * &base).round(work)?;
            exact &= !lost;
            base = b;
        }
    }
    let (r, lost) = result.round(ctx)?;
    Ok((r, exact && !lost))
}

/// e raised to the power x
pub fn exp(x: &Decimal, ctx: MathContext) -> Result<Decimal, Problem> {
    if x.is_zero() {
        return Ok(Decimal::one());
    }
    let bounded = ctx.bounded();
    let half = half();
    let mut y = x.clone();
    let mut halvings = 0u32;
    while y.abs() >= half {
        y = &y * &half;
        halvings += 1;
    }
    let work = bounded.widen(GUARD + halvings / 3 + 1);
    let y = rounded(y, work)?;
    let mut sum = Decimal::one();
    let mut term = Decimal::one();
    let mut converged = false;
    for i in 1..MAX_TERMS {
        term = (&term * &y).div(&Decimal::from_i64(i as i64), work)?.0;
        sum = &sum + &term;
        if negligible(&term, &sum, work) {
            converged = true;
            break;
        }
    }
    if !converged {
        log::warn!("exp series stopped after {MAX_TERMS} terms");
    }
    for _ in 0..halvings {
        sum = rounded(&sum * &sum, work)?;
    }
    rounded(sum, bounded)
}

/// atanh(z) for small |z| by its power series
fn atanh(z: &Decimal, work: MathContext) -> Result<Decimal, Problem> {
    let z2 = rounded(z * z, work)?;
    let mut power = z.clone();
    let mut sum = z.clone();
    for i in 1..MAX_TERMS {
        power = rounded(&power * &z2, work)?;
        let term = power.div(&Decimal::from_i64(2 * i as i64 + 1), work)?.0;
        sum = &sum + &term;
        if negligible(&term, &sum, work) {
            return Ok(sum);
        }
    }
    log::warn!("atanh series stopped after {MAX_TERMS} terms");
    Ok(sum)
}

/// Natural logarithm of a positive x
pub fn ln(x: &Decimal, ctx: MathContext) -> Result<Decimal, Problem> {
    if x.sign() != Plus {
        return Err(Problem::Undefined("logarithm of a non-positive value"));
    }
    if *x == Decimal::one() {
        return Ok(Decimal::zero());
    }
    let bounded = ctx.bounded();
    let work = bounded.widen(GUARD);
    // x = y · 2^k with y in [0.75, 1.5)
    let mut k = (x.magnitude_exponent() as f64 * std::f64::consts::LOG2_10) as i64;
    let mut y = rounded(scale_pow2(x, -k), work.widen(GUARD))?;
    let low = Decimal::new(BigInt::from(75), 2);
    let high = Decimal::new(BigInt::from(15), 1);
    while y >= high {
        y = &y * &half();
        k += 1;
    }
    while y < low {
        y = &y * &two();
        k -= 1;
    }
    let one = Decimal::one();
    let z = (&y - &one).div(&(&y + &one), work)?.0;
    let mut result = &atanh(&z, work)? * &two();
    if k != 0 {
        let extra = digit_count(&num::BigUint::from(k.unsigned_abs())) as u32;
        let wide = work.widen(extra);
        let third = one.div(&Decimal::from_i64(3), wide)?.0;
        let ln2 = &atanh(&third, wide)? * &two();
        result = &result + &(&ln2 * &Decimal::from_i64(k));
    }
    rounded(result, bounded)
}

/// Reduce an angle into [−π, π)
fn reduce_angle(x: &Decimal, work: MathContext) -> Result<Decimal, Problem> {
    if x.abs() <= Decimal::from_i64(3) {
        return Ok(x.clone());
    }
    let extra = x.magnitude_exponent().max(0) as u32 + 2;
    let wide = work.widen(extra);
    let pi = pi_decimal(wide)?;
    let two_pi = &pi * &two();
    let turns = (x + &pi).div(&two_pi, wide)?.0.floor_bigint();
    let reduced = x - &(&two_pi * &Decimal::from_bigint(turns));
    rounded(reduced, work)
}

/// Shared Taylor loop for sin (start = x, offset 1) and cos (start = 1, offset 0)
fn trig_series(x: &Decimal, start: Decimal, offset: i64, work: MathContext) -> Result<Decimal, Problem> {
    let x2 = rounded(x * x, work)?;
    let mut term = start.clone();
    let mut sum = start;
    for i in 1..MAX_TERMS as i64 {
        let divisor = Decimal::from_i64((2 * i + offset - 1) * (2 * i + offset));
        term = (&term * &x2).div(&divisor, work)?.0.negate();
        sum = &sum + &term;
        if negligible(&term, &sum, work) {
            return Ok(sum);
        }
    }
    log::warn!("trigonometric series stopped after {MAX_TERMS} terms");
    Ok(sum)
}

pub fn sin(x: &Decimal, ctx: MathContext) -> Result<Decimal, Problem> {
    if x.is_zero() {
        return Ok(Decimal::zero());
    }
    let bounded = ctx.bounded();
    let work = bounded.widen(GUARD);
    let x = reduce_angle(x, work)?;
    rounded(trig_series(&x, x.clone(), 1, work)?, bounded)
}

pub fn cos(x: &Decimal, ctx: MathContext) -> Result<Decimal, Problem> {
    if x.is_zero() {
        return Ok(Decimal::one());
    }
    let bounded = ctx.bounded();
    let work = bounded.widen(GUARD);
    let x = reduce_angle(x, work)?;
    rounded(trig_series(&x, Decimal::one(), 0, work)?, bounded)
}

/// Arctangent, in (−π/2, π/2)
pub fn atan(x: &Decimal, ctx: MathContext) -> Result<Decimal, Problem> {
    if x.is_zero() {
        return Ok(Decimal::zero());
    }
    let bounded = ctx.bounded();
    let work = bounded.widen(GUARD);
    let one = Decimal::one();
    if x.abs() > one {
        let inner = atan(&one.div(&x.abs(), work)?.0, work)?;
        let half_pi = &pi_decimal(work)? * &half();
        let r = rounded(&half_pi - &inner, bounded)?;
        return Ok(if x.is_negative() { r.negate() } else { r });
    }
    // atan(y) = 2·atan(y / (1 + √(1 + y²)))
    let tenth = Decimal::new(BigInt::from(1), 1);
    let mut y = x.clone();
    let mut halvings = 0u32;
    while y.abs() > tenth && halvings < 8 {
        let root = sqrt(&(&one + &(&y * &y)), work)?.0;
        y = y.div(&(&one + &root), work)?.0;
        halvings += 1;
    }
    let y2 = rounded(&y * &y, work)?;
    let mut power = y.clone();
    let mut sum = y;
    let mut converged = false;
    for i in 1..MAX_TERMS {
        power = rounded(&power * &y2, work)?.negate();
        let term = power.div(&Decimal::from_i64(2 * i as i64 + 1), work)?.0;
        sum = &sum + &term;
        if negligible(&term, &sum, work) {
            converged = true;
            break;
        }
    }
    if !converged {
        log::warn!("atan series stopped after {MAX_TERMS} terms");
    }
    rounded(scale_pow2(&sum, halvings as i64), bounded)
}

/// The angle of the point (x, y), in (−π, π]
///
/// The angle of the origin is taken to be zero
pub fn atan2(y: &Decimal, x: &Decimal, ctx: MathContext) -> Result<Decimal, Problem> {
    let bounded = ctx.bounded();
    let work = bounded.widen(GUARD);
    if x.is_zero() {
        if y.is_zero() {
            return Ok(Decimal::zero());
        }
        let half_pi = rounded(&pi_decimal(work)? * &half(), bounded)?;
        return Ok(if y.is_negative() { half_pi.negate() } else { half_pi });
    }
    let base = atan(&y.div(x, work)?.0, work)?;
    if !x.is_negative() {
        return rounded(base, bounded);
    }
    let pi = pi_decimal(work)?;
    let angle = if y.is_negative() { &base - &pi } else { &base + &pi };
    rounded(angle, bounded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn ctx(p: u32) -> MathContext {
        MathContext::with_precision(p)
    }

    #[test]
    fn roots() {
        let (r, exact) = sqrt(&dec("2.25"), MathContext::UNLIMITED).unwrap();
        assert_eq!(r, dec("1.5"));
        assert!(exact);
        let (r, exact) = sqrt(&dec("16"), ctx(5)).unwrap();
        assert_eq!(r.to_string(), "4");
        assert!(exact);
        let (r, exact) = nth_root(&dec("-27"), 3, MathContext::UNLIMITED).unwrap();
        assert_eq!(r, dec("-3"));
        assert!(exact);
        let (r, exact) = sqrt(&dec("2"), ctx(20)).unwrap();
        assert_eq!(r.to_string(), "1.4142135623730950488");
        assert!(!exact);
        assert_eq!(sqrt(&dec("-4"), ctx(5)).unwrap_err(), Problem::SqrtNegative);
        assert_eq!(nth_root(&dec("8"), 0, ctx(5)).unwrap_err(), Problem::ZeroDegree);
    }

    #[test]
    fn exponential() {
        assert_eq!(exp(&dec("1"), ctx(20)).unwrap().to_string(), "2.7182818284590452354");
        assert_eq!(exp(&dec("-1"), ctx(10)).unwrap().to_string(), "0.3678794412");
        assert_eq!(exp(&Decimal::zero(), ctx(10)).unwrap(), Decimal::one());
    }

    #[test]
    fn logarithm() {
        assert_eq!(ln(&dec("2"), ctx(20)).unwrap().to_string(), "0.69314718055994530942");
        assert_eq!(ln(&dec("10"), ctx(15)).unwrap().to_string(), "2.30258509299405");
        assert_eq!(ln(&dec("0.5"), ctx(10)).unwrap().to_string(), "-0.6931471806");
        assert!(ln(&Decimal::zero(), ctx(10)).is_err());
    }

    #[test]
    fn trigonometry() {
        assert_eq!(sin(&dec("1"), ctx(15)).unwrap().to_string(), "0.841470984807897");
        assert_eq!(cos(&dec("1"), ctx(15)).unwrap().to_string(), "0.540302305868140");
        assert_eq!(sin(&dec("10"), ctx(10)).unwrap().to_string(), "-0.5440211109");
    }

    #[test]
    fn arctangent() {
        assert_eq!(atan(&dec("1"), ctx(15)).unwrap().to_string(), "0.785398163397448");
        assert_eq!(atan(&dec("-2"), ctx(10)).unwrap().to_string(), "-1.107148718");
        let angle = atan2(&dec("1"), &dec("-1"), ctx(15)).unwrap();
        assert_eq!(angle.to_string(), "2.35619449019234");
        assert_eq!(atan2(&Decimal::zero(), &Decimal::zero(), ctx(5)).unwrap(), Decimal::zero());
    }

    #[test]
    fn powers() {
        let (r, exact) = powi(&dec("1.5"), 3, MathContext::UNLIMITED).unwrap();
        assert_eq!(r, dec("3.375"));
        assert!(exact);
        let (r, exact) = powi(&dec("2"), -2, MathContext::UNLIMITED).unwrap();
        assert_eq!(r, dec("0.25"));
        assert!(exact);
        assert_eq!(powi(&Decimal::zero(), -1, ctx(5)).unwrap_err(), Problem::DivideByZero);
    }
}

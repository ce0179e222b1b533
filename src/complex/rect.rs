use super::real_root;
use crate::{ComplexPolar, MathContext, Problem, Real};
use num::bigint::Sign::*;
use parking_lot::Mutex;

/// Complex number as real and imaginary parts
///
/// Exact only when both parts are exact. The argument is computed at most
/// once and cached.
#[derive(Debug)]
pub struct ComplexRect {
    re: Real,
    im: Real,
    argument: Mutex<Option<Real>>,
}

impl Clone for ComplexRect {
    fn clone(&self) -> Self {
        Self {
            re: self.re.clone(),
            im: self.im.clone(),
            argument: Mutex::new(self.argument.lock().clone()),
        }
    }
}

impl ComplexRect {
    pub fn new(re: Real, im: Real) -> Self {
        Self {
            re,
            im,
            argument: Mutex::new(None),
        }
    }

    pub fn from_real(re: Real) -> Self {
        Self::new(re, Real::zero())
    }

    pub fn zero() -> Self {
        Self::from_real(Real::zero())
    }

    /// The imaginary unit
    pub fn i() -> Self {
        Self::new(Real::zero(), Real::one())
    }

    pub fn real(&self) -> &Real {
        &self.re
    }

    pub fn imaginary(&self) -> &Real {
        &self.im
    }

    pub fn is_exact(&self) -> bool {
        self.re.is_exact() && self.im.is_exact()
    }

    pub fn is_zero(&self) -> bool {
        self.re.is_zero() && self.im.is_zero()
    }

    pub fn is_real(&self) -> bool {
        self.im.is_zero() && self.im.is_exact()
    }

    pub(crate) fn context(&self) -> MathContext {
        self.re.context().max(self.im.context())
    }

    pub fn conjugate(&self) -> Self {
        Self::new(self.re.clone(), -self.im.clone())
    }

    // re² + im²
    fn norm(&self) -> Real {
        self.re.clone() * self.re.clone() + self.im.clone() * self.im.clone()
    }

    /// The distance from the origin
    ///
    /// # Example
    ///
    /// ```
    /// use rungs::{ComplexRect, Real};
    /// let z = ComplexRect::new(Real::from(3), Real::from(4));
    /// assert_eq!(z.magnitude().unwrap().to_string(), "5");
    /// ```
    pub fn magnitude(&self) -> Result<Real, Problem> {
        if self.im.is_zero() {
            return Ok(self.re.clone().abs());
        }
        if self.re.is_zero() {
            return Ok(self.im.clone().abs());
        }
        real_root(self.norm())
    }

    /// The angle from the positive real axis, in (−π, π]
    pub fn argument(&self) -> Result<Real, Problem> {
        let mut cell = self.argument.lock();
        if let Some(argument) = cell.as_ref() {
            return Ok(argument.clone());
        }
        let argument = Real::atan2(&self.im, &self.re)?;
        *cell = Some(argument.clone());
        Ok(argument)
    }

    pub fn to_polar(&self) -> Result<ComplexPolar, Problem> {
        ComplexPolar::new(self.magnitude()?, self.argument()?)
    }

    pub fn inverse(&self) -> Result<Self, Problem> {
        let norm = self.norm();
        if norm.is_zero() {
            return Err(Problem::DivideByZero);
        }
        let re = (self.re.clone() / norm.clone())?;
        let im = (-self.im.clone() / norm)?;
        Ok(Self::new(re, im))
    }

    /// Integer power by repeated squaring
    pub fn powi(&self, n: i64) -> Result<Self, Problem> {
        if n < 0 {
            let n = n.checked_neg().ok_or(Problem::Exhausted)?;
            return self.inverse()?.powi(n);
        }
        let mut result = Self::from_real(Real::one());
        let mut base = self.clone();
        let mut n = n as u64;
        while n > 0 {
            if n & 1 == 1 {
                result = result * base.clone();
            }
            n >>= 1;
            if n > 0 {
                base = base.clone() * base;
            }
        }
        Ok(result)
    }

    /// The principal square root, by the half-angle formula
    ///
    /// √(a + bi) = √((|z| + a)/2) ± i·√((|z| − a)/2), taking the sign of b
    pub fn sqrt(&self) -> Result<Self, Problem> {
        if self.is_real() && self.re.sign() != Minus {
            return Ok(Self::from_real(real_root(self.re.clone())?));
        }
        let m = self.magnitude()?;
        let two = Real::from(2);
        let re = real_root(((m.clone() + self.re.clone()) / two.clone())?)?;
        let im = real_root(((m - self.re.clone()) / two)?)?;
        let im = if self.im.sign() == Minus { -im } else { im };
        Ok(Self::new(re, im))
    }
}

use core::ops::*;

impl Add for ComplexRect {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.re + other.re, self.im + other.im)
    }
}

impl Sub for ComplexRect {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.re - other.re, self.im - other.im)
    }
}

impl Neg for ComplexRect {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.re, -self.im)
    }
}

impl Mul for ComplexRect {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        let (a, b) = (self.re, self.im);
        let (c, d) = (other.re, other.im);
        let re = a.clone() * c.clone() - b.clone() * d.clone();
        let im = a * d + b * c;
        Self::new(re, im)
    }
}

impl Div for ComplexRect {
    type Output = Result<Self, Problem>;

    fn div(self, other: Self) -> Result<Self, Problem> {
        let norm = other.norm();
        if norm.is_zero() {
            return Err(Problem::DivideByZero);
        }
        let Self { re: c, im: d, .. } = other;
        let (a, b) = (self.re, self.im);
        let re = a.clone() * c.clone() + b.clone() * d.clone();
        let im = b * c - a * d;
        Ok(Self::new((re / norm.clone())?, (im / norm)?))
    }
}

use core::fmt;

impl fmt::Display for ComplexRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.re, f)?;
        if self.im.sign() == Minus {
            f.write_str(" - ")?;
            fmt::Display::fmt(&-self.im.clone(), f)?;
        } else {
            f.write_str(" + ")?;
            fmt::Display::fmt(&self.im, f)?;
        }
        f.write_str("i")
    }
}

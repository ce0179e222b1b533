use crate::consts::Constant;
use crate::real::Origin;
use crate::{Coercible, ComplexRect, Numeric, Problem, Real, Rung};
use num::bigint::Sign::*;

/// Complex number as a modulus and an argument in radians
///
/// Multiplication and division only add or subtract arguments, which is the
/// point of this form. The modulus can't be negative, the argument is kept
/// in (−π, π].
///
/// # Example
///
/// ```
/// use rungs::{ComplexPolar, Real};
/// let z = ComplexPolar::new(Real::from(2), Real::zero()).unwrap();
/// let w = (z.clone() * z).unwrap();
/// assert_eq!(w.modulus().to_string(), "4");
/// assert!(ComplexPolar::new(Real::from(-1), Real::zero()).is_err());
/// ```
#[derive(Clone, Debug)]
pub struct ComplexPolar {
    modulus: Real,
    argument: Real,
}

// Is this exactly the constant π?
fn half_turn(theta: &Real) -> bool {
    matches!(
        theta.origin(),
        Origin::Constant {
            constant: Constant::Pi,
            inverse: false,
            negated: false,
        }
    )
}

/// Reduce an angle into (−π, π] by whole turns
///
/// # Example
///
/// ```
/// use rungs::{normalize_argument, MathContext, Real};
/// let ctx = MathContext::with_precision(20);
/// let turn: Real = "7".parse::<Real>().unwrap().with_context(ctx);
/// let reduced = normalize_argument(turn).unwrap();
/// assert_eq!(format!("{reduced:.6}"), "0.716815");
/// ```
pub fn normalize_argument(theta: Real) -> Result<Real, Problem> {
    if theta.is_zero() && theta.is_exact() {
        return Ok(theta);
    }
    let ctx = theta.context().bounded();
    let pi = Real::pi(ctx)?;
    let minus_pi = -pi.clone();
    if theta > minus_pi && theta <= pi {
        return Ok(theta);
    }
    // π needs a digit for each digit of the turn count
    let whole = theta.value().magnitude_exponent().max(0);
    let extra = u32::try_from(whole).map_err(|_| Problem::Exhausted)?;
    let wide = Real::pi(ctx.widen(extra.saturating_add(2)))?;
    let two_pi = wide.clone() * Real::from(2);
    let turns = ((theta.clone() + wide) / two_pi.clone())?.floor();
    let mut theta = theta - turns * two_pi.clone();
    // the turn count may be one off at the boundary
    while theta > pi {
        theta = theta - two_pi.clone();
    }
    while theta <= minus_pi {
        theta = theta + two_pi.clone();
    }
    Ok(theta.with_context(ctx))
}

impl ComplexPolar {
    pub fn new(modulus: Real, argument: Real) -> Result<Self, Problem> {
        if modulus.sign() == Minus {
            return Err(Problem::NegativeModulus);
        }
        Ok(Self {
            modulus,
            argument: normalize_argument(argument)?,
        })
    }

    pub fn modulus(&self) -> &Real {
        &self.modulus
    }

    pub fn argument(&self) -> &Real {
        &self.argument
    }

    pub fn is_exact(&self) -> bool {
        self.modulus.is_exact() && self.argument.is_exact()
    }

    pub fn is_zero(&self) -> bool {
        self.modulus.is_zero()
    }

    pub fn is_real(&self) -> bool {
        self.is_zero() || (self.argument.is_zero() && self.argument.is_exact())
    }

    pub fn real(&self) -> Result<Real, Problem> {
        if self.argument.is_zero() {
            return Ok(self.modulus.clone());
        }
        if half_turn(&self.argument) {
            return Ok(-self.modulus.clone());
        }
        Ok(self.modulus.clone() * self.argument.cos()?)
    }

    pub fn imaginary(&self) -> Result<Real, Problem> {
        if self.argument.is_zero() || half_turn(&self.argument) {
            return Ok(Real::zero());
        }
        Ok(self.modulus.clone() * self.argument.sin()?)
    }

    pub fn to_rect(&self) -> Result<ComplexRect, Problem> {
        Ok(ComplexRect::new(self.real()?, self.imaginary()?))
    }

    pub fn conjugate(&self) -> Result<Self, Problem> {
        Self::new(self.modulus.clone(), -self.argument.clone())
    }

    /// Rotation by half a turn
    pub fn negate(&self) -> Result<Self, Problem> {
        let pi = Real::pi(self.argument.context().bounded())?;
        Self::new(self.modulus.clone(), self.argument.clone() + pi)
    }

    pub fn inverse(&self) -> Result<Self, Problem> {
        Self::new(self.modulus.clone().inverse()?, -self.argument.clone())
    }

    pub fn powi(&self, n: i64) -> Result<Self, Problem> {
        let argument = self.argument.clone() * Real::from(n);
        Self::new(self.modulus.clone().powi(n)?, argument)
    }

    /// The root with the smallest argument in magnitude, (modulus^(1/n), argument/n)
    pub fn principal_root(&self, n: i64) -> Result<Self, Problem> {
        let modulus = match self.modulus.clone().nth_root(n)? {
            Numeric::Real(r) => r,
            other => match other.coerce_to(Rung::Real)? {
                Numeric::Real(r) => r,
                _ => return Err(Problem::NoCoercionPath(Rung::Complex, Rung::Real)),
            },
        };
        let argument = (self.argument.clone() / Real::from(n))?;
        Self::new(modulus, argument)
    }
}

use core::ops::*;

impl Mul for ComplexPolar {
    type Output = Result<Self, Problem>;

    fn mul(self, other: Self) -> Result<Self, Problem> {
        Self::new(self.modulus * other.modulus, self.argument + other.argument)
    }
}

impl Div for ComplexPolar {
    type Output = Result<Self, Problem>;

    fn div(self, other: Self) -> Result<Self, Problem> {
        if other.is_zero() {
            return Err(Problem::DivideByZero);
        }
        Self::new((self.modulus / other.modulus)?, self.argument - other.argument)
    }
}

use core::fmt;

impl fmt::Display for ComplexPolar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.modulus, f)?;
        f.write_str(" @ ")?;
        fmt::Display::fmt(&self.argument, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MathContext;

    #[test]
    fn negative_modulus() {
        let bad = ComplexPolar::new(Real::from(-2), Real::one());
        assert_eq!(bad.unwrap_err(), Problem::NegativeModulus);
    }

    #[test]
    fn normalized() {
        let ctx = MathContext::with_precision(30);
        let pi = Real::pi(ctx).unwrap();
        let same = normalize_argument(pi.clone()).unwrap();
        assert_eq!(same, pi);
        let three_pi = pi.clone() * Real::from(3);
        let back = normalize_argument(three_pi).unwrap();
        let epsilon = "1e-25".parse().unwrap();
        assert!(back.abs().approx_eq(&pi, &epsilon));
        let minus_pi = normalize_argument(-pi.clone()).unwrap();
        assert!(minus_pi.approx_eq(&pi, &epsilon));
        assert!(minus_pi > Real::zero());
    }

    #[test]
    fn many_turns() {
        let ctx = MathContext::with_precision(30);
        let epsilon = "1e-20".parse().unwrap();
        let pi = Real::pi(ctx).unwrap();
        let quarter = (pi.clone() / Real::from(4)).unwrap();
        // a quarter turn after a million and one half turns
        let far = quarter.clone() + pi.clone() * Real::from(2_000_001);
        let back = normalize_argument(far).unwrap();
        assert!(back.approx_eq(&(quarter.clone() - pi.clone()), &epsilon));
        let far = -(quarter.clone() + pi.clone() * Real::from(2_000_000));
        let back = normalize_argument(far).unwrap();
        assert!(back.approx_eq(&-quarter, &epsilon));
        let huge: Real = "1e12".parse::<Real>().unwrap().with_context(ctx);
        let back = normalize_argument(huge).unwrap();
        assert!(back > -pi.clone() && back <= pi);
        let z = ComplexPolar::new(Real::one(), Real::one()).unwrap();
        assert!(z.powi(1_000_000_000).unwrap().argument().clone().abs() <= Real::pi(ctx).unwrap());
    }

    #[test]
    fn half_turns() {
        let ctx = MathContext::with_precision(30);
        let z = ComplexPolar::new(Real::from(4), Real::pi(ctx).unwrap()).unwrap();
        let rect = z.to_rect().unwrap();
        assert_eq!(rect.to_string(), "-4 + 0i");
        assert!(rect.imaginary().is_zero());
    }

    #[test]
    fn multiply_divide() {
        let ctx = MathContext::with_precision(30);
        let quarter = (Real::pi(ctx).unwrap() / Real::from(4)).unwrap();
        let a = ComplexPolar::new(Real::from(2), quarter.clone()).unwrap();
        let b = ComplexPolar::new(Real::from(3), quarter.clone()).unwrap();
        let product = (a.clone() * b.clone()).unwrap();
        assert_eq!(*product.modulus(), Real::from(6));
        let epsilon = "1e-25".parse().unwrap();
        let half = (quarter.clone() * Real::from(2)).value().clone();
        assert!(product.argument().approx_eq(&Real::from(half), &epsilon));
        let ratio = (a / b).unwrap();
        assert!(ratio.argument().is_zero());
        assert_eq!(format!("{:.5}", ratio.modulus()), "0.66667");
    }

    #[test]
    fn powers() {
        let ctx = MathContext::with_precision(30);
        let quarter = (Real::pi(ctx).unwrap() / Real::from(2)).unwrap();
        let i = ComplexPolar::new(Real::one(), quarter).unwrap();
        let minus_one = i.powi(2).unwrap().to_rect().unwrap();
        let epsilon = "1e-25".parse().unwrap();
        assert!(minus_one.real().approx_eq(&Real::from(-1), &epsilon));
        assert!(minus_one.imaginary().approx_eq(&Real::zero(), &epsilon));
    }
}

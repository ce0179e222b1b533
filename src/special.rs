use crate::{Config, Integer, Numeric, Problem, Rung};
use num::bigint::Sign::{self, *};

/// Values at the edges of the tower
///
/// An exact zero, zeros approached from either side, the signed infinities
/// of the real line and the single point at infinity which compactifies the
/// complex plane. The point at infinity only participates in arithmetic when
/// [`Config::extended_complex`] is set.
///
/// # Example
///
/// ```
/// use rungs::{Config, Numeric, Special};
/// let _guard = Config::default().extended(true).install();
/// let one = Numeric::from(1);
/// let answer = one.divide(&Special::PointAtInfinity.into()).unwrap();
/// assert!(matches!(answer, Numeric::Special(Special::ExactZero)));
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Special {
    /// Zero, known exactly
    ExactZero,
    /// A value tending to zero from above
    PositiveZero,
    /// A value tending to zero from below
    NegativeZero,
    PositiveInfinity,
    NegativeInfinity,
    /// The unsigned infinity of the extended complex plane
    PointAtInfinity,
}

use Special::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Op {
    Add,
    Subtract,
    Multiply,
    Divide,
}

// A value reduced to what matters at the edges: zero, finite or infinite,
// with a sign when it lies on the real line
#[derive(Copy, Clone, Debug)]
enum Shape {
    Zero(Option<Sign>),
    Finite(Option<Sign>),
    Infinite(Option<Sign>),
}

use Shape::*;

fn shape(n: &Numeric) -> Shape {
    match n {
        Numeric::Special(s) => match s {
            ExactZero => Zero(None),
            PositiveZero => Zero(Some(Plus)),
            NegativeZero => Zero(Some(Minus)),
            PositiveInfinity => Infinite(Some(Plus)),
            NegativeInfinity => Infinite(Some(Minus)),
            PointAtInfinity => Infinite(None),
        },
        other if other.is_zero() => Zero(None),
        other => Finite(other.real_sign()),
    }
}

fn product(a: Option<Sign>, b: Option<Sign>) -> Option<Sign> {
    Some(a? * b?)
}

fn zero(sign: Option<Sign>) -> Numeric {
    match sign {
        Some(Plus) => PositiveZero,
        Some(Minus) => NegativeZero,
        _ => ExactZero,
    }
    .into()
}

// Without extended mode an unsigned infinity is a division by zero
fn infinity(sign: Option<Sign>) -> Result<Numeric, Problem> {
    match sign {
        Some(Plus) => Ok(PositiveInfinity.into()),
        Some(Minus) => Ok(NegativeInfinity.into()),
        _ if Config::current().extended_complex => Ok(PointAtInfinity.into()),
        _ => Err(Problem::DivideByZero),
    }
}

fn is_point(n: &Numeric) -> bool {
    matches!(n, Numeric::Special(PointAtInfinity))
}

fn on_real_line(s: Shape) -> bool {
    match s {
        Zero(_) => true,
        Finite(sign) | Infinite(sign) => sign.is_some(),
    }
}

/// Arithmetic where either operand is special, or a division by zero
///
/// None means ordinary arithmetic applies
pub(crate) fn binary(op: Op, a: &Numeric, b: &Numeric) -> Option<Result<Numeric, Problem>> {
    let special = matches!(a, Numeric::Special(_)) || matches!(b, Numeric::Special(_));
    let by_zero = op == Op::Divide && b.is_zero();
    if !special && !by_zero {
        return None;
    }
    Some(combine(op, a, b))
}

fn combine(op: Op, a: &Numeric, b: &Numeric) -> Result<Numeric, Problem> {
    let extended = Config::current().extended_complex;
    if !extended && (is_point(a) || is_point(b)) {
        return Err(Problem::ExtendedComplexDisabled);
    }
    match op {
        Op::Add => add(a, b),
        Op::Subtract => add(a, &b.negate()?),
        Op::Multiply => multiply(a, b),
        Op::Divide => divide(a, b, extended),
    }
}

fn add(a: &Numeric, b: &Numeric) -> Result<Numeric, Problem> {
    match (shape(a), shape(b)) {
        (Infinite(Some(x)), Infinite(Some(y))) if x == y => infinity(Some(x)),
        (Infinite(_), Infinite(_)) => Err(Problem::Undefined("∞ + ∞")),
        (Infinite(x), other) | (other, Infinite(x)) => {
            infinity(if on_real_line(other) { x } else { None })
        }
        (Zero(None), _) => Ok(b.clone()),
        (_, Zero(None)) => Ok(a.clone()),
        (Zero(Some(x)), Zero(Some(y))) => Ok(zero(if x == y { Some(x) } else { None })),
        (Zero(Some(_)), Finite(_)) => Ok(b.clone()),
        (Finite(_), Zero(Some(_))) => Ok(a.clone()),
        (Finite(_), Finite(_)) => Err(Problem::NoCoercionPath(a.rung(), b.rung())),
    }
}

fn multiply(a: &Numeric, b: &Numeric) -> Result<Numeric, Problem> {
    match (shape(a), shape(b)) {
        (Zero(_), Infinite(_)) | (Infinite(_), Zero(_)) => Err(Problem::Undefined("0 · ∞")),
        (Infinite(x), Infinite(y)) => infinity(product(x, y)),
        (Infinite(x), Finite(s)) | (Finite(s), Infinite(x)) => infinity(product(x, s)),
        (Zero(x), Zero(y)) => Ok(zero(product(x, y))),
        (Zero(x), Finite(s)) | (Finite(s), Zero(x)) => Ok(zero(product(x, s))),
        (Finite(_), Finite(_)) => Err(Problem::NoCoercionPath(a.rung(), b.rung())),
    }
}

fn divide(a: &Numeric, b: &Numeric, extended: bool) -> Result<Numeric, Problem> {
    match (shape(a), shape(b)) {
        (Zero(_), Zero(_)) if extended => Err(Problem::Undefined("0 / 0")),
        (Zero(_), Zero(_)) => Err(Problem::DivideByZero),
        (Infinite(_), Infinite(_)) => Err(Problem::Undefined("∞ / ∞")),
        (Zero(x), Infinite(y)) => Ok(zero(product(x, y))),
        (Finite(s), Infinite(y)) => Ok(zero(product(s, y))),
        (Infinite(x), Zero(y)) => infinity(product(x, y)),
        (Infinite(x), Finite(s)) => infinity(product(x, s)),
        (Finite(s), Zero(y)) => infinity(product(s, y)),
        (Zero(x), Finite(s)) => Ok(zero(product(x, s))),
        (Finite(_), Finite(_)) => Err(Problem::NoCoercionPath(a.rung(), b.rung())),
    }
}

impl Special {
    fn check(self) -> Result<Self, Problem> {
        if self == PointAtInfinity && !Config::current().extended_complex {
            Err(Problem::ExtendedComplexDisabled)
        } else {
            Ok(self)
        }
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, ExactZero | PositiveZero | NegativeZero)
    }

    pub fn is_infinite(&self) -> bool {
        !self.is_zero()
    }

    /// Only the exact zero is exact
    pub fn is_exact(&self) -> bool {
        *self == ExactZero
    }

    /// The sign on the real line, None for the point at infinity
    pub fn sign(&self) -> Option<Sign> {
        match self {
            ExactZero => Some(NoSign),
            PositiveZero | PositiveInfinity => Some(Plus),
            NegativeZero | NegativeInfinity => Some(Minus),
            PointAtInfinity => None,
        }
    }

    pub fn rung(&self) -> Rung {
        match self {
            ExactZero => Rung::Integer,
            PointAtInfinity => Rung::Complex,
            _ => Rung::Real,
        }
    }

    pub fn negate(self) -> Result<Special, Problem> {
        Ok(match self.check()? {
            ExactZero => ExactZero,
            PositiveZero => NegativeZero,
            NegativeZero => PositiveZero,
            PositiveInfinity => NegativeInfinity,
            NegativeInfinity => PositiveInfinity,
            PointAtInfinity => PointAtInfinity,
        })
    }

    /// The reciprocal, 1/0 being the point at infinity
    pub fn inverse(self) -> Result<Numeric, Problem> {
        match self.check()? {
            ExactZero => infinity(None),
            PositiveZero => Ok(PositiveInfinity.into()),
            NegativeZero => Ok(NegativeInfinity.into()),
            PositiveInfinity => Ok(PositiveZero.into()),
            NegativeInfinity => Ok(NegativeZero.into()),
            PointAtInfinity => Ok(ExactZero.into()),
        }
    }

    pub fn sqrt(self) -> Result<Numeric, Problem> {
        match self.check()? {
            ExactZero | NegativeZero => Ok(ExactZero.into()),
            PositiveZero => Ok(PositiveZero.into()),
            PositiveInfinity => Ok(PositiveInfinity.into()),
            NegativeInfinity => infinity(None),
            PointAtInfinity => Ok(PointAtInfinity.into()),
        }
    }

    pub fn powi(self, n: i64) -> Result<Numeric, Problem> {
        let special = self.check()?;
        if n == 0 {
            return match special {
                ExactZero | PositiveZero | NegativeZero => Ok(Integer::one().into()),
                _ => Err(Problem::Undefined("∞⁰")),
            };
        }
        if n < 0 {
            let n = n.checked_neg().ok_or(Problem::Exhausted)?;
            return match special.inverse()? {
                Numeric::Special(inverse) => inverse.powi(n),
                zero => Ok(zero),
            };
        }
        let odd = n % 2 != 0;
        Ok(match special {
            NegativeZero if !odd => PositiveZero,
            NegativeInfinity if !odd => PositiveInfinity,
            other => other,
        }
        .into())
    }
}

use core::fmt;

impl fmt::Display for Special {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExactZero => "0",
            PositiveZero => "+0",
            NegativeZero => "-0",
            PositiveInfinity => "+∞",
            NegativeInfinity => "-∞",
            PointAtInfinity => "∞",
        };
        f.pad(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extended() -> crate::ConfigGuard {
        Config::default().extended(true).install()
    }

    #[test]
    fn inverse_of_infinity() {
        let _guard = extended();
        let one = Numeric::from(1);
        let answer = binary(Op::Divide, &one, &PointAtInfinity.into()).unwrap().unwrap();
        assert!(matches!(answer, Numeric::Special(ExactZero)));
        assert!(matches!(ExactZero.inverse().unwrap(), Numeric::Special(PointAtInfinity)));
    }

    #[test]
    fn divide_by_zero() {
        let one = Numeric::from(1);
        let zero = Numeric::from(0);
        let off = binary(Op::Divide, &one, &zero).unwrap();
        assert_eq!(off.unwrap_err(), Problem::DivideByZero);
        let _guard = extended();
        let on = binary(Op::Divide, &one, &zero).unwrap().unwrap();
        assert!(matches!(on, Numeric::Special(PointAtInfinity)));
        let nothing = binary(Op::Divide, &zero, &zero).unwrap();
        assert!(matches!(nothing, Err(Problem::Undefined(_))));
    }

    #[test]
    fn undefined() {
        let _guard = extended();
        let inf: Numeric = PointAtInfinity.into();
        let zero: Numeric = ExactZero.into();
        for (op, a, b) in [
            (Op::Multiply, &zero, &inf),
            (Op::Subtract, &inf, &inf),
            (Op::Add, &inf, &inf),
            (Op::Divide, &inf, &inf),
        ] {
            assert!(matches!(binary(op, a, b), Some(Err(Problem::Undefined(_)))));
        }
    }

    #[test]
    fn disabled() {
        let one = Numeric::from(1);
        let inf: Numeric = PointAtInfinity.into();
        let answer = binary(Op::Add, &one, &inf).unwrap();
        assert_eq!(answer.unwrap_err(), Problem::ExtendedComplexDisabled);
        assert_eq!(PointAtInfinity.negate().unwrap_err(), Problem::ExtendedComplexDisabled);
    }

    #[test]
    fn signed() {
        let two = Numeric::from(2);
        let minus: Numeric = NegativeInfinity.into();
        let product = binary(Op::Multiply, &two, &minus).unwrap().unwrap();
        assert!(matches!(product, Numeric::Special(NegativeInfinity)));
        let small = binary(Op::Divide, &Numeric::from(-3), &PositiveInfinity.into());
        assert!(matches!(small, Some(Ok(Numeric::Special(NegativeZero)))));
        let big = binary(Op::Divide, &two, &NegativeZero.into());
        assert!(matches!(big, Some(Ok(Numeric::Special(NegativeInfinity)))));
        let same = binary(Op::Add, &PositiveInfinity.into(), &two);
        assert!(matches!(same, Some(Ok(Numeric::Special(PositiveInfinity)))));
        let opposite = binary(Op::Add, &PositiveInfinity.into(), &minus);
        assert!(matches!(opposite, Some(Err(Problem::Undefined(_)))));
    }

    #[test]
    fn zeros() {
        let two = Numeric::from(2);
        let sum = binary(Op::Add, &ExactZero.into(), &two).unwrap().unwrap();
        assert_eq!(sum.to_string(), "2");
        let tiny = binary(Op::Multiply, &NegativeZero.into(), &Numeric::from(-5));
        assert!(matches!(tiny, Some(Ok(Numeric::Special(PositiveZero)))));
        assert!(binary(Op::Add, &two, &Numeric::from(3)).is_none());
    }

    #[test]
    fn powers() {
        assert!(matches!(NegativeInfinity.powi(2).unwrap(), Numeric::Special(PositiveInfinity)));
        assert!(matches!(NegativeZero.powi(3).unwrap(), Numeric::Special(NegativeZero)));
        assert!(matches!(PositiveInfinity.powi(-1).unwrap(), Numeric::Special(PositiveZero)));
        assert_eq!(ExactZero.powi(0).unwrap().to_string(), "1");
        assert_eq!(ExactZero.powi(-1).unwrap_err(), Problem::DivideByZero);
    }

    #[test]
    fn display() {
        assert_eq!(NegativeInfinity.to_string(), "-∞");
        assert_eq!(format!("{:>3}", PointAtInfinity), "  ∞");
    }
}

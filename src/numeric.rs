use crate::special::{self, Op};
use crate::{Complex, ComplexPolar, ComplexRect, ContinuedFraction, Integer, MathContext};
use crate::{Problem, Rational, Real, Special};
use num::bigint::Sign::{self, *};
use num::BigInt;

mod coerce;

pub use coerce::Coercible;

/// The rungs of the tower, lowest first
///
/// A value on a lower rung can always be raised to a higher one, going down
/// only works when the value happens to be representable there.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rung {
    Integer,
    Rational,
    Real,
    Complex,
}

/// Any value of the tower
///
/// Arithmetic between two values of the same representation uses that
/// representation's own formulas. Mixed arithmetic raises the operand on the
/// lower rung to the higher one and tries again, except that a
/// [`ContinuedFraction`] combined with an [`Integer`] or [`Rational`] stays a
/// continued fraction.
///
/// # Examples
///
/// ```
/// use rungs::Numeric;
/// let half: Numeric = "1/2".parse().unwrap();
/// let quarter: Numeric = "0.25".parse().unwrap();
/// let sum = half.add(&quarter).unwrap();
/// assert_eq!(sum.to_string(), "0.75");
/// assert!(sum.is_exact());
/// ```
///
/// ```
/// use rungs::Numeric;
/// let two = Numeric::from(2);
/// let root = two.sqrt().unwrap();
/// assert!(!root.is_exact());
/// assert!(root.to_string().starts_with("1.414213562373095048"));
/// ```
#[derive(Clone, Debug)]
pub enum Numeric {
    Integer(Integer),
    Rational(Rational),
    Real(Real),
    Complex(Complex),
    ContinuedFraction(ContinuedFraction),
    Special(Special),
}

// Same representation arithmetic, None when the representations differ
fn direct(op: Op, a: &Numeric, b: &Numeric) -> Option<Result<Numeric, Problem>> {
    Some(match (a, b) {
        (Numeric::Integer(x), Numeric::Integer(y)) => match op {
            Op::Add => Ok((x + y).into()),
            Op::Subtract => Ok((x - y).into()),
            Op::Multiply => Ok((x * y).into()),
            Op::Divide => x.divide(y),
        },
        (Numeric::Rational(x), Numeric::Rational(y)) => {
            let (x, y) = (x.clone(), y.clone());
            match op {
                Op::Add => Ok((x + y).into()),
                Op::Subtract => Ok((x - y).into()),
                Op::Multiply => Ok((x * y).into()),
                Op::Divide => (x / y).map(Numeric::from),
            }
        }
        (Numeric::Real(x), Numeric::Real(y)) => {
            let (x, y) = (x.clone(), y.clone());
            match op {
                Op::Add => Ok((x + y).into()),
                Op::Subtract => Ok((x - y).into()),
                Op::Multiply => Ok((x * y).into()),
                Op::Divide => (x / y).map(Numeric::from),
            }
        }
        (Numeric::Complex(x), Numeric::Complex(y)) => match op {
            Op::Add => x.add(y),
            Op::Subtract => x.subtract(y),
            Op::Multiply => x.multiply(y),
            Op::Divide => x.divide(y),
        }
        .map(Numeric::from),
        (Numeric::ContinuedFraction(x), Numeric::ContinuedFraction(y)) => x.combine(op, y),
        // exact operands join the continued fraction instead of going through decimals
        (Numeric::ContinuedFraction(x), Numeric::Integer(y)) => {
            ContinuedFraction::from_integer(y).and_then(|y| x.combine(op, &y))
        }
        (Numeric::Integer(x), Numeric::ContinuedFraction(y)) => {
            ContinuedFraction::from_integer(x).and_then(|x| x.combine(op, y))
        }
        (Numeric::ContinuedFraction(x), Numeric::Rational(y)) => {
            ContinuedFraction::from_rational(y).and_then(|y| x.combine(op, &y))
        }
        (Numeric::Rational(x), Numeric::ContinuedFraction(y)) => {
            ContinuedFraction::from_rational(x).and_then(|x| x.combine(op, y))
        }
        _ => return None,
    })
}

// Both operands raised (or lowered) to one rung, then combined
fn on_rung(op: Op, a: &Numeric, b: &Numeric, rung: Rung) -> Result<Numeric, Problem> {
    let (x, y) = (a.coerce_to(rung)?, b.coerce_to(rung)?);
    direct(op, &x, &y).unwrap_or(Err(Problem::NoCoercionPath(a.rung(), b.rung())))
}

impl Numeric {
    pub fn rung(&self) -> Rung {
        match self {
            Numeric::Integer(_) => Rung::Integer,
            Numeric::Rational(_) => Rung::Rational,
            Numeric::Real(_) | Numeric::ContinuedFraction(_) => Rung::Real,
            Numeric::Complex(_) => Rung::Complex,
            Numeric::Special(s) => s.rung(),
        }
    }

    pub fn is_exact(&self) -> bool {
        match self {
            Numeric::Integer(n) => n.is_exact(),
            Numeric::Rational(r) => r.is_exact(),
            Numeric::Real(r) => r.is_exact(),
            Numeric::Complex(z) => z.is_exact(),
            Numeric::ContinuedFraction(cf) => cf.is_exact(),
            Numeric::Special(s) => s.is_exact(),
        }
    }

    /// Is this some kind of zero, including the asymptotic zeros?
    pub fn is_zero(&self) -> bool {
        match self {
            Numeric::Integer(n) => n.is_zero(),
            Numeric::Rational(r) => r.is_zero(),
            Numeric::Real(r) => r.is_zero(),
            Numeric::Complex(z) => z.is_zero(),
            Numeric::ContinuedFraction(cf) => cf.is_zero(),
            Numeric::Special(s) => s.is_zero(),
        }
    }

    /// The sign of a value on the real line, None off it
    pub(crate) fn real_sign(&self) -> Option<Sign> {
        match self {
            Numeric::Integer(n) => Some(n.sign()),
            Numeric::Rational(r) => Some(r.sign()),
            Numeric::Real(r) => Some(r.sign()),
            Numeric::Complex(z) if z.is_real() => z.real().ok().map(|re| re.sign()),
            Numeric::Complex(_) => None,
            Numeric::ContinuedFraction(cf) => Some(cf.sign()),
            Numeric::Special(s) => s.sign(),
        }
    }

    fn arithmetic(&self, op: Op, other: &Numeric) -> Result<Numeric, Problem> {
        if let Some(result) = special::binary(op, self, other) {
            return result;
        }
        if let Some(result) = direct(op, self, other) {
            return result;
        }
        let (a, b) = (self.rung(), other.rung());
        match on_rung(op, self, other, a.max(b)) {
            Err(problem) if problem.is_coercion() => {
                log::debug!("{a:?} {op:?} {b:?} failed upwards ({problem}), trying downwards");
                match on_rung(op, self, other, a.min(b)) {
                    Err(problem) if problem.is_coercion() => Err(Problem::NoCoercionPath(a, b)),
                    result => result,
                }
            }
            result => result,
        }
    }

    pub fn add(&self, other: &Numeric) -> Result<Numeric, Problem> {
        self.arithmetic(Op::Add, other)
    }

    pub fn subtract(&self, other: &Numeric) -> Result<Numeric, Problem> {
        self.arithmetic(Op::Subtract, other)
    }

    pub fn multiply(&self, other: &Numeric) -> Result<Numeric, Problem> {
        self.arithmetic(Op::Multiply, other)
    }

    /// Division
    ///
    /// # Example
    ///
    /// ```
    /// use rungs::{Numeric, Problem};
    /// let one = Numeric::from(1);
    /// let zero = Numeric::from(0);
    /// assert_eq!(one.divide(&zero).unwrap_err(), Problem::DivideByZero);
    /// ```
    pub fn divide(&self, other: &Numeric) -> Result<Numeric, Problem> {
        self.arithmetic(Op::Divide, other)
    }

    pub fn negate(&self) -> Result<Numeric, Problem> {
        Ok(match self {
            Numeric::Integer(n) => (-n.clone()).into(),
            Numeric::Rational(r) => (-r.clone()).into(),
            Numeric::Real(r) => (-r.clone()).into(),
            Numeric::Complex(z) => z.negate()?.into(),
            Numeric::ContinuedFraction(cf) => cf.negate()?.into(),
            Numeric::Special(s) => s.negate()?.into(),
        })
    }

    /// The reciprocal, with zero treated as a division by zero
    pub fn inverse(&self) -> Result<Numeric, Problem> {
        if let Numeric::Special(s) = self {
            return s.inverse();
        }
        if self.is_zero() {
            return Numeric::from(1).divide(self);
        }
        Ok(match self {
            Numeric::Integer(n) => return Integer::one().divide(n),
            Numeric::Rational(r) => r.clone().inverse()?.into(),
            Numeric::Real(r) => r.clone().inverse()?.into(),
            Numeric::Complex(z) => z.inverse()?.into(),
            Numeric::ContinuedFraction(cf) => cf.inverse()?.into(),
            Numeric::Special(s) => return s.inverse(),
        })
    }

    /// The principal square root
    ///
    /// Negative values on the real line have imaginary roots
    pub fn sqrt(&self) -> Result<Numeric, Problem> {
        match self {
            Numeric::Integer(n) => n.sqrt(MathContext::UNLIMITED),
            Numeric::Rational(r) => r.sqrt(MathContext::UNLIMITED),
            Numeric::Real(r) => r.clone().sqrt(),
            Numeric::Complex(z) => Ok(z.sqrt()?.into()),
            Numeric::ContinuedFraction(cf) if cf.is_negative() => {
                self.coerce_to(Rung::Real)?.sqrt()
            }
            Numeric::ContinuedFraction(cf) => Ok(cf.sqrt()?.into()),
            Numeric::Special(s) => s.sqrt(),
        }
    }

    /// The n-th root, real whenever a real root exists
    pub fn nth_root(&self, n: i64) -> Result<Numeric, Problem> {
        match n {
            ..=-1 => return Err(Problem::NegativeDegree),
            0 => return Err(Problem::ZeroDegree),
            1 => return Ok(self.clone()),
            2 => return self.sqrt(),
            _ => (),
        }
        match self {
            Numeric::Integer(_) | Numeric::Rational(_) => self.coerce_to(Rung::Real)?.nth_root(n),
            Numeric::Real(r) => r.clone().nth_root(n),
            Numeric::Complex(z) => {
                let roots = z.nth_roots(n)?;
                roots.into_iter().next().map(Numeric::from).ok_or(Problem::ZeroDegree)
            }
            Numeric::ContinuedFraction(cf) if cf.is_negative() && n % 2 == 0 => {
                self.coerce_to(Rung::Real)?.nth_root(n)
            }
            Numeric::ContinuedFraction(cf) => Ok(cf.nth_root(n)?.into()),
            Numeric::Special(s) if s.is_zero() => Ok(Special::ExactZero.into()),
            Numeric::Special(Special::PositiveInfinity) => Ok(self.clone()),
            Numeric::Special(_) => Err(Problem::Undefined("root of an unsigned infinity")),
        }
    }

    /// All `n` of the n-th roots, principal root first
    ///
    /// # Example
    ///
    /// ```
    /// use rungs::Numeric;
    /// let roots = Numeric::from(-4).nth_roots(2).unwrap();
    /// assert_eq!(roots[0].to_string(), "0 + 2i");
    /// assert_eq!(roots[1].to_string(), "0 - 2i");
    /// ```
    pub fn nth_roots(&self, n: i64) -> Result<Vec<Numeric>, Problem> {
        if let Numeric::Complex(z) = self {
            return Ok(z.nth_roots(n)?.into_iter().map(Numeric::from).collect());
        }
        let principal = self.nth_root(n)?;
        if n == 1 || self.is_zero() || matches!(self, Numeric::Special(_)) {
            return Ok(vec![principal]);
        }
        if n == 2 {
            let other = principal.negate()?;
            return Ok(vec![principal, other]);
        }
        let Numeric::Complex(z) = self.coerce_to(Rung::Complex)? else {
            return Err(Problem::NoCoercionPath(self.rung(), Rung::Complex));
        };
        let roots = z.nth_roots(n)?.into_iter().map(Numeric::from);
        if self.real_sign() == Some(Plus) {
            // keep the exactness of the real root
            Ok(std::iter::once(principal).chain(roots.skip(1)).collect())
        } else {
            Ok(roots.collect())
        }
    }

    /// Integer power
    ///
    /// # Example
    ///
    /// ```
    /// use rungs::Numeric;
    /// let z: Numeric = "1 + 1i".parse().unwrap();
    /// assert_eq!(z.powi(2).unwrap().to_string(), "0 + 2i");
    /// assert_eq!(Numeric::from(2).powi(-2).unwrap().to_string(), "1/4");
    /// ```
    pub fn powi(&self, n: i64) -> Result<Numeric, Problem> {
        match self {
            Numeric::Integer(i) => i.powi(n),
            Numeric::Rational(r) => Ok(r.clone().powi(BigInt::from(n))?.into()),
            Numeric::Real(r) => Ok(r.clone().powi(n)?.into()),
            Numeric::Complex(z) => Ok(z.powi(n)?.into()),
            Numeric::ContinuedFraction(cf) if cf.is_finite() => {
                let r = cf.to_rational()?.powi(BigInt::from(n))?;
                Ok(ContinuedFraction::from_rational(&r)?.into())
            }
            Numeric::ContinuedFraction(_) => self.repeated(n),
            Numeric::Special(s) => s.powi(n),
        }
    }

    // Square and multiply, through the general arithmetic
    fn repeated(&self, n: i64) -> Result<Numeric, Problem> {
        if n < 0 {
            let n = n.checked_neg().ok_or(Problem::Exhausted)?;
            return self.inverse()?.repeated(n);
        }
        let mut result = Numeric::from(1);
        let mut base = self.clone();
        let mut n = n.unsigned_abs();
        while n > 0 {
            if n & 1 == 1 {
                result = result.multiply(&base)?;
            }
            n >>= 1;
            if n > 0 {
                base = base.multiply(&base)?;
            }
        }
        Ok(result)
    }
}

fn complex_eq(a: &Complex, b: &Complex) -> bool {
    match (a.to_rect(), b.to_rect()) {
        (Ok(a), Ok(b)) => a.real() == b.real() && a.imaginary() == b.imaginary(),
        _ => false,
    }
}

impl PartialEq for Numeric {
    /// Value equality across representations
    ///
    /// # Example
    ///
    /// ```
    /// use rungs::Numeric;
    /// let half: Numeric = "1/2".parse().unwrap();
    /// let cf: Numeric = "[0; 2]".parse().unwrap();
    /// assert_eq!(half, cf);
    /// assert_eq!(Numeric::from(3), "3.0".parse::<Numeric>().unwrap());
    /// ```
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Numeric::Special(a), Numeric::Special(b)) => a == b,
            (Numeric::Special(s), n) | (n, Numeric::Special(s)) => {
                *s == Special::ExactZero && n.is_zero()
            }
            (Numeric::Integer(a), Numeric::Integer(b)) => a == b,
            (Numeric::Rational(a), Numeric::Rational(b)) => a == b,
            (Numeric::Real(a), Numeric::Real(b)) => a == b,
            (Numeric::Complex(a), Numeric::Complex(b)) => complex_eq(a, b),
            (Numeric::ContinuedFraction(a), Numeric::ContinuedFraction(b)) => a == b,
            (Numeric::ContinuedFraction(cf), Numeric::Rational(r))
            | (Numeric::Rational(r), Numeric::ContinuedFraction(cf)) => {
                ContinuedFraction::from_rational(r).is_ok_and(|r| *cf == r)
            }
            (Numeric::ContinuedFraction(cf), Numeric::Integer(n))
            | (Numeric::Integer(n), Numeric::ContinuedFraction(cf)) => {
                ContinuedFraction::from_integer(n).is_ok_and(|n| *cf == n)
            }
            (a, b) => {
                let rung = a.rung().max(b.rung());
                match (a.coerce_to(rung), b.coerce_to(rung)) {
                    (Ok(x), Ok(y)) => x.rung() == y.rung() && x == y,
                    _ => false,
                }
            }
        }
    }
}

impl From<Integer> for Numeric {
    fn from(n: Integer) -> Numeric {
        Numeric::Integer(n)
    }
}

impl From<Rational> for Numeric {
    fn from(r: Rational) -> Numeric {
        Numeric::Rational(r)
    }
}

impl From<Real> for Numeric {
    fn from(r: Real) -> Numeric {
        Numeric::Real(r)
    }
}

impl From<Complex> for Numeric {
    fn from(z: Complex) -> Numeric {
        Numeric::Complex(z)
    }
}

impl From<ComplexRect> for Numeric {
    fn from(z: ComplexRect) -> Numeric {
        Numeric::Complex(Complex::Rect(z))
    }
}

impl From<ComplexPolar> for Numeric {
    fn from(z: ComplexPolar) -> Numeric {
        Numeric::Complex(Complex::Polar(z))
    }
}

impl From<Special> for Numeric {
    fn from(s: Special) -> Numeric {
        Numeric::Special(s)
    }
}

impl From<BigInt> for Numeric {
    fn from(n: BigInt) -> Numeric {
        Numeric::Integer(Integer::from_bigint(n))
    }
}

impl From<i64> for Numeric {
    fn from(n: i64) -> Numeric {
        Numeric::Integer(Integer::new(n))
    }
}

impl From<i32> for Numeric {
    fn from(n: i32) -> Numeric {
        Numeric::Integer(Integer::new(n.into()))
    }
}

use core::fmt;

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Numeric::Integer(n) => fmt::Display::fmt(n, f),
            Numeric::Rational(r) => fmt::Display::fmt(r, f),
            Numeric::Real(r) => fmt::Display::fmt(r, f),
            Numeric::Complex(z) => fmt::Display::fmt(z, f),
            Numeric::ContinuedFraction(cf) => fmt::Display::fmt(cf, f),
            Numeric::Special(s) => fmt::Display::fmt(s, f),
        }
    }
}

impl std::str::FromStr for Numeric {
    type Err = Problem;

    /// Tried in turn as a continued fraction, a complex number, a fraction,
    /// a decimal and finally an integer
    fn from_str(s: &str) -> Result<Self, Problem> {
        let s = s.trim();
        match s {
            "∞" => return Ok(Special::PointAtInfinity.into()),
            "+∞" => return Ok(Special::PositiveInfinity.into()),
            "-∞" | "−∞" => return Ok(Special::NegativeInfinity.into()),
            _ => (),
        }
        if s.starts_with('[') {
            return Ok(s.parse::<ContinuedFraction>()?.into());
        }
        if s.contains(['i', '@']) {
            return Ok(s.parse::<Complex>()?.into());
        }
        if s.contains(['/', '⁄']) {
            return Ok(s.parse::<Rational>()?.into());
        }
        let s = s.replace('−', "-");
        if s.contains(['.', 'e', 'E']) {
            return Ok(s.parse::<Real>()?.into());
        }
        Ok(s.parse::<Integer>()?.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Config;

    fn parse(s: &str) -> Numeric {
        s.parse().unwrap()
    }

    #[test]
    fn parsing() {
        assert!(matches!(parse("42"), Numeric::Integer(_)));
        assert!(matches!(parse("−7"), Numeric::Integer(_)));
        assert!(matches!(parse("3/4"), Numeric::Rational(_)));
        assert!(matches!(parse("0.25"), Numeric::Real(_)));
        assert!(matches!(parse("1e-3"), Numeric::Real(_)));
        assert!(matches!(parse("3 + 4i"), Numeric::Complex(Complex::Rect(_))));
        assert!(matches!(parse("2 @ 90°"), Numeric::Complex(Complex::Polar(_))));
        assert!(matches!(parse("[1; 2, 3]"), Numeric::ContinuedFraction(_)));
        assert!(matches!(parse("-∞"), Numeric::Special(Special::NegativeInfinity)));
        assert_eq!("1/x".parse::<Numeric>().unwrap_err(), Problem::BadFraction);
        assert_eq!("12x".parse::<Numeric>().unwrap_err(), Problem::BadInteger);
    }

    #[test]
    fn rungs() {
        assert!(Rung::Integer < Rung::Rational);
        assert!(Rung::Real < Rung::Complex);
        assert_eq!(parse("[1; 2]").rung(), Rung::Real);
        assert_eq!(parse("1/3").rung(), Rung::Rational);
    }

    #[test]
    fn mixed() {
        let sum = parse("1/2").add(&Numeric::from(1)).unwrap();
        assert!(matches!(sum, Numeric::Rational(_)));
        assert_eq!(sum, parse("3/2"));
        let product = parse("0.5").multiply(&parse("3 + 4i")).unwrap();
        assert!(matches!(product, Numeric::Complex(_)));
        assert_eq!(product, parse("1.5 + 2i"));
        let difference = parse("2.5").subtract(&parse("1/2")).unwrap();
        assert!(matches!(difference, Numeric::Real(_)));
        assert_eq!(difference, Numeric::from(2));
    }

    #[test]
    fn fractions_stay_fractions() {
        let e: Numeric = ContinuedFraction::e().into();
        let sum = e.add(&Numeric::from(1)).unwrap();
        let Numeric::ContinuedFraction(sum) = sum else {
            panic!("e + 1 stays a continued fraction");
        };
        assert_eq!(sum.terms(6), vec![3, 1, 2, 1, 1, 4]);
        let half = parse("[0; 2]").multiply(&parse("1/3")).unwrap();
        assert_eq!(half, parse("1/6"));
    }

    #[test]
    fn exactness() {
        let exact = parse("1/3").add(&Numeric::from(2)).unwrap();
        assert!(exact.is_exact());
        let pi: Numeric = Real::pi(MathContext::DECIMAL64).unwrap().into();
        let inexact = pi.add(&Numeric::from(2)).unwrap();
        assert!(!inexact.is_exact());
    }

    #[test]
    fn unary() {
        assert_eq!(Numeric::from(4).inverse().unwrap(), parse("1/4"));
        assert_eq!(parse("[2; 3]").negate().unwrap().to_string(), "[-3; 1, 2]");
        assert_eq!(Numeric::from(9).sqrt().unwrap(), Numeric::from(3));
        assert!(matches!(Numeric::from(-9).sqrt().unwrap(), Numeric::Complex(_)));
        assert_eq!(Numeric::from(0).inverse().unwrap_err(), Problem::DivideByZero);
        let _guard = Config::default().extended(true).install();
        let point = Numeric::from(0).inverse().unwrap();
        assert!(matches!(point, Numeric::Special(Special::PointAtInfinity)));
    }

    #[test]
    fn roots() {
        assert_eq!(Numeric::from(8).nth_root(3).unwrap(), Numeric::from(2));
        let roots = Numeric::from(8).nth_roots(3).unwrap();
        assert_eq!(roots.len(), 3);
        assert_eq!(roots[0], Numeric::from(2));
        assert!(matches!(roots[1], Numeric::Complex(_)));
        assert_eq!(Numeric::from(5).nth_root(0).unwrap_err(), Problem::ZeroDegree);
        let root_two = parse("[2]").sqrt().unwrap();
        assert_eq!(root_two.to_string(), "[1; 2\u{305}]");
        let root_three = parse("[3]").sqrt().unwrap();
        assert_eq!(root_three.negate().unwrap(), parse("[-2; 3, ^1, 2]"));
        assert_eq!(root_three.negate().unwrap().negate().unwrap(), root_three);
    }

    #[test]
    fn powers() {
        assert_eq!(parse("2/3").powi(2).unwrap(), parse("4/9"));
        assert_eq!(parse("[1; 2]").powi(2).unwrap(), parse("9/4"));
        let phi: Numeric = ContinuedFraction::phi().into();
        let square = phi.powi(2).unwrap();
        let plus_one = phi.add(&Numeric::from(1)).unwrap();
        let ctx = MathContext::with_precision(20);
        let as_real = |n: Numeric| match n {
            Numeric::ContinuedFraction(cf) => cf.to_real(ctx).unwrap(),
            Numeric::Real(r) => r,
            other => panic!("unexpected {other:?}"),
        };
        let epsilon = "1e-15".parse().unwrap();
        assert!(as_real(square).approx_eq(&as_real(plus_one), &epsilon));
    }

    #[test]
    fn equality() {
        assert_eq!(Numeric::from(0), Numeric::Special(Special::ExactZero));
        assert_ne!(Numeric::from(1), Numeric::from(2));
        assert_eq!(parse("3 + 0i"), Numeric::from(3));
        assert_ne!(parse("3 + 1i"), Numeric::from(3));
    }
}

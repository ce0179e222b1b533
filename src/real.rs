use crate::consts::{Constant, Consts};
use crate::decimal::math;
use crate::{Complex, ComplexRect, Decimal, Integer, MathContext, Numeric, Problem, Rational};
use crate::{Rung, RoundingMode};
use num::bigint::Sign::{self, *};
use num::BigInt;

mod convert;

/// Where a [`Real`] came from
///
/// Values derived from a named constant remember it so that combining the
/// constant with itself, its negation or its inverse gives an exact answer
/// rather than rounding noise.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Origin {
    /// Any value not known to be a named constant
    Plain,
    /// A named constant, possibly negated and/or inverted
    Constant {
        constant: Constant,
        inverse: bool,
        negated: bool,
    },
}

impl Origin {
    fn negate(self) -> Self {
        match self {
            Origin::Plain => Origin::Plain,
            Origin::Constant {
                constant,
                inverse,
                negated,
            } => Origin::Constant {
                constant,
                inverse,
                negated: !negated,
            },
        }
    }

    fn invert(self) -> Self {
        match self {
            Origin::Plain => Origin::Plain,
            Origin::Constant {
                constant,
                inverse,
                negated,
            } => Origin::Constant {
                constant,
                inverse: !inverse,
                negated,
            },
        }
    }
}

/// Arbitrary precision real number
///
/// A [`Decimal`] value with an exactness flag, an irrationality flag and the
/// [`MathContext`] its digits are rounded to. Irrational values are never
/// exact. A context of [`MathContext::UNLIMITED`] means addition,
/// subtraction and multiplication keep every digit.
///
/// # Examples
///
/// Even a normal fraction can be parsed as a Real
/// ```
/// use rungs::{Real, Rational};
/// let half: Real = "0.5".parse().unwrap();
/// assert_eq!(half, Rational::fraction(1, 2).unwrap());
/// ```
///
/// Constants interact exactly with themselves
/// ```
/// use rungs::{MathContext, Real};
/// let ctx = MathContext::with_precision(30);
/// let pi = Real::pi(ctx).unwrap();
/// let nothing = pi.clone() - pi;
/// assert!(nothing.is_exact());
/// assert!(nothing.is_zero());
/// ```
///
/// Conversion
/// ```
/// use rungs::{Numeric, Real};
/// let nine: Real = 9.into();
/// let answer = nine.sqrt().unwrap();
/// assert_eq!(answer.to_string(), "3");
/// assert!(answer.is_exact());
/// ```
#[derive(Clone, Debug)]
pub struct Real {
    value: Decimal,
    exact: bool,
    irrational: bool,
    context: MathContext,
    origin: Origin,
}

impl Real {
    /// A value with the given exactness, rounded to `context` if necessary
    pub fn new(value: Decimal, exact: bool, context: MathContext) -> Real {
        Self::settle(value, exact, false, context)
    }

    /// An irrational approximation, which is therefore inexact
    pub fn irrational(value: Decimal, context: MathContext) -> Real {
        Self::settle(value, false, true, context)
    }

    /// An exact value with unlimited context
    pub fn from_decimal(value: Decimal) -> Real {
        Self::settle(value, true, false, MathContext::UNLIMITED)
    }

    pub fn from_bigint(n: BigInt) -> Real {
        Self::from_decimal(Decimal::from_bigint(n))
    }

    /// Zero, the additive identity
    pub fn zero() -> Real {
        Self::from_decimal(Decimal::zero())
    }

    /// One, the multiplicative identity
    pub fn one() -> Real {
        Self::from_decimal(Decimal::one())
    }

    // Constants keep the digits they were computed to, even past the context
    pub(crate) fn constant(value: Decimal, constant: Constant, context: MathContext) -> Real {
        Real {
            value,
            exact: false,
            irrational: true,
            context,
            origin: Origin::Constant {
                constant,
                inverse: false,
                negated: false,
            },
        }
    }

    /// π, computed at `ctx` or fetched from the shared [`Consts`] cache
    pub fn pi(ctx: MathContext) -> Result<Real, Problem> {
        Consts::shared().pi(ctx)
    }

    /// e, computed at `ctx` or fetched from the shared [`Consts`] cache
    pub fn e(ctx: MathContext) -> Result<Real, Problem> {
        Consts::shared().e(ctx)
    }

    /// The golden ratio φ
    pub fn phi(ctx: MathContext) -> Result<Real, Problem> {
        Consts::shared().phi(ctx)
    }

    /// The Euler-Mascheroni constant γ
    pub fn gamma(ctx: MathContext) -> Result<Real, Problem> {
        Consts::shared().gamma(ctx)
    }

    // Round to the context, Unnecessary meaning keep every digit
    fn settle(value: Decimal, exact: bool, irrational: bool, context: MathContext) -> Real {
        let (value, lost) =
            if context.is_unlimited() || context.rounding() == RoundingMode::Unnecessary {
                (value, false)
            } else {
                match value.round(context) {
                    Ok(pair) => pair,
                    Err(_) => (value, false),
                }
            };
        Real {
            value,
            exact: exact && !lost && !irrational,
            irrational,
            context,
            origin: Origin::Plain,
        }
    }

    /// The same value flagged with the given exactness, irrational values stay inexact
    pub fn with_exact(self, exact: bool) -> Real {
        Self {
            exact: exact && !self.irrational,
            ..self
        }
    }

    /// The same value, rounded to `context` from now on
    pub fn with_context(self, context: MathContext) -> Real {
        let origin = self.origin;
        Self {
            origin,
            ..Self::settle(self.value, self.exact, self.irrational, context)
        }
    }

    pub fn value(&self) -> &Decimal {
        &self.value
    }

    pub fn is_exact(&self) -> bool {
        self.exact
    }

    pub fn is_irrational(&self) -> bool {
        self.irrational
    }

    pub fn context(&self) -> MathContext {
        self.context
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn sign(&self) -> Sign {
        self.value.sign()
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    fn is_exact_zero(&self) -> bool {
        self.exact && self.value.is_zero()
    }

    /// Is this a whole number (and not a rounded irrational)?
    pub fn is_integer(&self) -> bool {
        !self.irrational && self.value.is_integer()
    }

    /// Minus one, zero or one according to the sign
    pub fn signum(&self) -> Real {
        match self.sign() {
            Minus => Self::from_bigint((-1).into()),
            NoSign => Self::zero(),
            Plus => Self::one(),
        }
    }

    pub fn abs(self) -> Real {
        if self.sign() == Minus {
            -self
        } else {
            self
        }
    }

    /// The largest integer not greater than this value
    pub fn floor(&self) -> Real {
        let floor = Decimal::from_bigint(self.value.floor_bigint());
        Self::settle(floor, self.exact, false, self.context)
    }

    /// The value rounded to `ctx`
    pub fn as_decimal(&self, ctx: MathContext) -> Result<Decimal, Problem> {
        Ok(self.value.round(ctx)?.0)
    }

    /// The exact [`Rational`] this decimal represents
    ///
    /// Irrational values have no such representation
    ///
    /// # Example
    ///
    /// ```
    /// use rungs::{MathContext, Rational, Real};
    /// let r: Real = "-1.25".parse().unwrap();
    /// assert_eq!(r.rationalize().unwrap(), Rational::fraction(-5, 4).unwrap());
    /// assert!(Real::pi(MathContext::DECIMAL64).unwrap().rationalize().is_err());
    /// ```
    pub fn rationalize(&self) -> Result<Rational, Problem> {
        if self.irrational {
            return Err(Problem::Coercion {
                from: Rung::Real,
                to: Rung::Rational,
            });
        }
        let (n, d) = self.value.to_fraction();
        Ok(Rational::from_bigint_fraction(n, d)?
            .with_exact(self.exact)
            .with_context(self.context))
    }

    /// The [`Integer`] equal to this value, if it is whole
    pub fn to_integer(&self) -> Result<Integer, Problem> {
        if !self.is_integer() {
            return Err(Problem::Coercion {
                from: Rung::Real,
                to: Rung::Integer,
            });
        }
        Ok(Integer::from_bigint(self.value.trunc_bigint()).with_exact(self.exact))
    }

    /// The inverse of this Real, or [`Problem::DivideByZero`] for zero
    ///
    /// φ⁻¹ is computed as φ − 1
    pub fn inverse(self) -> Result<Real, Problem> {
        if self.is_zero() {
            return Err(Problem::DivideByZero);
        }
        if let Origin::Constant {
            constant: Constant::Phi,
            inverse,
            negated,
        } = self.origin
        {
            // 1/φ = φ − 1 and 1/(φ − 1) = φ
            let magnitude = self.value.abs();
            let shifted = if inverse {
                &magnitude + &Decimal::one()
            } else {
                &magnitude - &Decimal::one()
            };
            let value = if negated { shifted.negate() } else { shifted };
            return Ok(Self {
                origin: self.origin.invert(),
                ..Self::irrational(value, self.context)
            });
        }
        let context = self.context;
        let (value, lost) = Decimal::one().div(&self.value, context)?;
        let context = if lost { context.bounded() } else { context };
        Ok(Self {
            origin: self.origin.invert(),
            ..Self::settle(value, self.exact && !lost, self.irrational, context)
        })
    }

    /// Square root
    ///
    /// Negative values give a [`ComplexRect`] on the imaginary axis.
    /// Results which use every digit of the context are marked irrational.
    pub fn sqrt(self) -> Result<Numeric, Problem> {
        match self.sign() {
            NoSign => Ok(self.into()),
            Plus => Ok(self.magnitude_root()?.into()),
            Minus => {
                let root = self.magnitude_root()?;
                Ok(ComplexRect::new(Self::zero(), root).into())
            }
        }
    }

    fn magnitude_root(&self) -> Result<Real, Problem> {
        let magnitude = self.value.abs();
        if !self.irrational && magnitude.is_integer() {
            let whole = Integer::from_bigint(magnitude.trunc_bigint());
            if let Numeric::Integer(root) = whole.sqrt(self.context)? {
                return Ok(Self::settle(
                    Decimal::from_bigint(root.value().clone()),
                    self.exact,
                    false,
                    self.context,
                ));
            }
        }
        let (root, exact) = math::sqrt(&magnitude, self.context)?;
        if exact && !self.irrational {
            return Ok(Self::settle(root, self.exact, false, self.context));
        }
        let bounded = self.context.bounded();
        let irrational = self.irrational || root.digits() >= bounded.precision() as u64;
        Ok(Self::settle(root, false, irrational, bounded))
    }

    /// The principal n-th root
    ///
    /// Even roots of negative values are [`Complex`]
    pub fn nth_root(self, n: i64) -> Result<Numeric, Problem> {
        match n {
            ..=-1 => Err(Problem::NegativeDegree),
            0 => Err(Problem::ZeroDegree),
            1 => Ok(self.into()),
            2 => self.sqrt(),
            _ if self.sign() == Minus && n % 2 == 0 => {
                let z = Complex::Rect(ComplexRect::new(self, Self::zero()));
                let roots = z.nth_roots(n)?;
                roots.into_iter().next().map(Numeric::from).ok_or(Problem::ZeroDegree)
            }
            _ => {
                let degree = u32::try_from(n).map_err(|_| Problem::Exhausted)?;
                let (root, exact) = math::nth_root(&self.value, degree, self.context)?;
                if exact && !self.irrational {
                    return Ok(Self::settle(root, self.exact, false, self.context).into());
                }
                let bounded = self.context.bounded();
                let irrational = self.irrational || root.digits() >= bounded.precision() as u64;
                Ok(Self::settle(root, false, irrational, bounded).into())
            }
        }
    }

    /// Integer exponentiation
    pub fn powi(self, n: i64) -> Result<Real, Problem> {
        if n == 0 {
            return Ok(Self::one());
        }
        let (value, exact) = math::powi(&self.value, n, self.context)?;
        let context = if exact { self.context } else { self.context.bounded() };
        Ok(Self::settle(value, self.exact && exact, self.irrational, context))
    }

    /// e raised to this power
    pub fn exp(&self) -> Result<Real, Problem> {
        if self.is_exact_zero() {
            return Ok(Self::one());
        }
        let ctx = self.context.bounded();
        Ok(Self::irrational(math::exp(&self.value, ctx)?, ctx))
    }

    /// Natural logarithm
    pub fn ln(&self) -> Result<Real, Problem> {
        if self.exact && self.value == Decimal::one() {
            return Ok(Self::zero());
        }
        let ctx = self.context.bounded();
        Ok(Self::irrational(math::ln(&self.value, ctx)?, ctx))
    }

    /// Sine, in radians
    pub fn sin(&self) -> Result<Real, Problem> {
        if self.is_exact_zero() {
            return Ok(Self::zero());
        }
        let ctx = self.context.bounded();
        Ok(Self::irrational(math::sin(&self.value, ctx)?, ctx))
    }

    /// Cosine, in radians
    pub fn cos(&self) -> Result<Real, Problem> {
        if self.is_exact_zero() {
            return Ok(Self::one());
        }
        let ctx = self.context.bounded();
        Ok(Self::irrational(math::cos(&self.value, ctx)?, ctx))
    }

    /// The angle of the point (x, y) from the positive x axis, in (−π, π]
    pub fn atan2(y: &Real, x: &Real) -> Result<Real, Problem> {
        if y.is_exact_zero() && x.sign() != Minus {
            return Ok(Self::zero());
        }
        let ctx = y.combined(x).bounded();
        if y.is_exact_zero() {
            return Self::pi(ctx);
        }
        Ok(Self::irrational(math::atan2(&y.value, &x.value, ctx)?, ctx))
    }

    pub fn to_f64(&self) -> f64 {
        self.value.to_f64()
    }

    // The (constant, inverse, negated) triple of both operands if both are constants
    fn constants(&self, other: &Self) -> Option<((Constant, bool, bool), (Constant, bool, bool))> {
        match (self.origin, other.origin) {
            (
                Origin::Constant {
                    constant: a,
                    inverse: ai,
                    negated: an,
                },
                Origin::Constant {
                    constant: b,
                    inverse: bi,
                    negated: bn,
                },
            ) => Some(((a, ai, an), (b, bi, bn))),
            _ => None,
        }
    }

    // An exact unlimited operand adopts the context of the other one
    fn combined(&self, other: &Self) -> MathContext {
        let free = |r: &Self| r.exact && r.context.is_unlimited();
        match (free(self), free(other)) {
            (true, false) => other.context,
            (false, true) => self.context,
            _ => self.context.max(other.context),
        }
    }

    fn exactly(n: i64) -> Real {
        Self::from_bigint(n.into())
    }
}

use core::fmt;

impl fmt::Display for Real {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(places) => match self.value.with_scale(places as i64, RoundingMode::HalfEven) {
                Ok((rounded, _)) => fmt::Display::fmt(&rounded, f),
                Err(_) => Err(fmt::Error),
            },
            None => fmt::Display::fmt(&self.value, f),
        }
    }
}

impl std::str::FromStr for Real {
    type Err = Problem;

    fn from_str(s: &str) -> Result<Self, Problem> {
        if s.contains(['/', '⁄']) {
            let rational: Rational = s.parse()?;
            return rational.to_real(MathContext::UNLIMITED);
        }
        let value: Decimal = s.parse()?;
        Ok(Self::from_decimal(value))
    }
}

use core::ops::*;

impl Add for Real {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        // c + (−c)
        if let Some(((a, ai, an), (b, bi, bn))) = self.constants(&other) {
            if a == b && ai == bi && an != bn {
                return Self::zero();
            }
        }
        if self.is_exact_zero() {
            return other;
        }
        if other.is_exact_zero() {
            return self;
        }
        let context = self.combined(&other);
        Self::settle(
            &self.value + &other.value,
            self.exact && other.exact,
            self.irrational || other.irrational,
            context,
        )
    }
}

impl Neg for Real {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            value: self.value.negate(),
            origin: self.origin.negate(),
            ..self
        }
    }
}

impl Sub for Real {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        // φ − φ⁻¹ = 1
        if let Some(((a, ai, an), (b, bi, bn))) = self.constants(&other) {
            if a == Constant::Phi && b == Constant::Phi && !ai && bi && an == bn {
                return Self::exactly(if an { -1 } else { 1 });
            }
        }
        self + -other
    }
}

impl Mul for Real {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        if self.is_exact_zero() || other.is_exact_zero() {
            return Self::zero();
        }
        if let Some(((a, ai, an), (b, bi, bn))) = self.constants(&other) {
            let negative = an != bn;
            if a == b && ai != bi {
                // c · c⁻¹
                return Self::exactly(if negative { -1 } else { 1 });
            }
            if a == Constant::Phi && b == Constant::Phi && !ai && !bi {
                // φ · φ = φ + 1
                let square = &self.value.abs() + &Decimal::one();
                let value = if negative { square.negate() } else { square };
                return Self::irrational(value, self.combined(&other));
            }
        }
        let context = self.combined(&other);
        Self::settle(
            &self.value * &other.value,
            self.exact && other.exact,
            self.irrational || other.irrational,
            context,
        )
    }
}

impl Div for Real {
    type Output = Result<Self, Problem>;

    fn div(self, other: Self) -> Result<Self, Problem> {
        if other.is_zero() {
            return Err(Problem::DivideByZero);
        }
        if let Some(((a, ai, an), (b, bi, bn))) = self.constants(&other) {
            if a == b && ai == bi {
                // c / c and c / (−c)
                return Ok(Self::exactly(if an != bn { -1 } else { 1 }));
            }
        }
        if self.is_exact_zero() {
            return Ok(Self::zero());
        }
        let context = self.combined(&other);
        let (value, lost) = self.value.div(&other.value, context)?;
        let context = if lost { context.bounded() } else { context };
        Ok(Self::settle(
            value,
            self.exact && other.exact && !lost,
            self.irrational || other.irrational,
            context,
        ))
    }
}

// Value equality of the decimals, whatever their exactness
impl PartialEq for Real {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl PartialOrd for Real {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.value.cmp(&other.value))
    }
}

// For a terminating decimal this definitely works
impl PartialEq<Rational> for Real {
    fn eq(&self, other: &Rational) -> bool {
        match self.rationalize() {
            Ok(r) => r == *other,
            Err(_) => false,
        }
    }
}

// Symmetry
impl PartialEq<Real> for Rational {
    fn eq(&self, other: &Real) -> bool {
        other == self
    }
}

impl Real {
    /// Is this within `epsilon` of `other`?
    pub fn approx_eq(&self, other: &Self, epsilon: &Decimal) -> bool {
        (&self.value - &other.value).abs() <= *epsilon
    }
}

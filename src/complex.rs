use crate::{Coercible, MathContext, Numeric, Problem, Real, Rung};

mod parse;
mod polar;
mod rect;

pub use polar::{normalize_argument, ComplexPolar};
pub use rect::ComplexRect;

/// Complex number, in rectangular or polar form
///
/// Addition and subtraction happen in rectangular form, multiplication and
/// division of two polar values stay polar. Either form converts to the
/// other on demand.
///
/// # Examples
///
/// ```
/// use rungs::{Complex, Real};
/// let z: Complex = "3 + 4i".parse().unwrap();
/// let m = z.magnitude().unwrap();
/// assert_eq!(m, Real::from(5));
/// assert!(m.is_exact());
/// ```
///
/// ```
/// use rungs::Complex;
/// let z: Complex = "-4 + 0i".parse().unwrap();
/// let roots = z.nth_roots(2).unwrap();
/// assert_eq!(roots[0].to_string(), "0 + 2i");
/// assert_eq!(roots[1].to_string(), "0 - 2i");
/// ```
#[derive(Clone, Debug)]
pub enum Complex {
    Rect(ComplexRect),
    Polar(ComplexPolar),
}

// Real square roots of non-negative values are always Real
pub(crate) fn real_root(r: Real) -> Result<Real, Problem> {
    match r.sqrt()? {
        Numeric::Real(root) => Ok(root),
        other => match other.coerce_to(Rung::Real)? {
            Numeric::Real(root) => Ok(root),
            _ => Err(Problem::Coercion {
                from: Rung::Complex,
                to: Rung::Real,
            }),
        },
    }
}

/// The `n` points equally spaced around the unit circle, starting at one
///
/// # Example
///
/// ```
/// use rungs::{roots_of_unity, MathContext};
/// let four = roots_of_unity(4, MathContext::with_precision(20)).unwrap();
/// assert_eq!(four.len(), 4);
/// assert_eq!(four[0].argument().to_string(), "0");
/// ```
pub fn roots_of_unity(n: i64, ctx: MathContext) -> Result<Vec<ComplexPolar>, Problem> {
    match n {
        ..=-1 => return Err(Problem::NegativeDegree),
        0 => return Err(Problem::ZeroDegree),
        _ => (),
    }
    let two_pi = Real::pi(ctx.bounded())? * Real::from(2);
    let count = Real::from(n);
    (0..n)
        .map(|k| {
            let argument = if k == 0 {
                Real::zero()
            } else {
                ((two_pi.clone() * Real::from(k)) / count.clone())?
            };
            ComplexPolar::new(Real::one(), argument)
        })
        .collect()
}

impl Complex {
    pub fn new(re: Real, im: Real) -> Complex {
        Complex::Rect(ComplexRect::new(re, im))
    }

    pub fn to_rect(&self) -> Result<ComplexRect, Problem> {
        match self {
            Complex::Rect(z) => Ok(z.clone()),
            Complex::Polar(z) => z.to_rect(),
        }
    }

    pub fn to_polar(&self) -> Result<ComplexPolar, Problem> {
        match self {
            Complex::Rect(z) => z.to_polar(),
            Complex::Polar(z) => Ok(z.clone()),
        }
    }

    pub fn real(&self) -> Result<Real, Problem> {
        match self {
            Complex::Rect(z) => Ok(z.real().clone()),
            Complex::Polar(z) => z.real(),
        }
    }

    pub fn imaginary(&self) -> Result<Real, Problem> {
        match self {
            Complex::Rect(z) => Ok(z.imaginary().clone()),
            Complex::Polar(z) => z.imaginary(),
        }
    }

    pub fn is_exact(&self) -> bool {
        match self {
            Complex::Rect(z) => z.is_exact(),
            Complex::Polar(z) => z.is_exact(),
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Complex::Rect(z) => z.is_zero(),
            Complex::Polar(z) => z.is_zero(),
        }
    }

    /// Is the imaginary part exactly zero?
    pub fn is_real(&self) -> bool {
        match self {
            Complex::Rect(z) => z.is_real(),
            Complex::Polar(z) => z.is_real(),
        }
    }

    pub fn magnitude(&self) -> Result<Real, Problem> {
        match self {
            Complex::Rect(z) => z.magnitude(),
            Complex::Polar(z) => Ok(z.modulus().clone()),
        }
    }

    pub fn argument(&self) -> Result<Real, Problem> {
        match self {
            Complex::Rect(z) => z.argument(),
            Complex::Polar(z) => Ok(z.argument().clone()),
        }
    }

    pub fn conjugate(&self) -> Result<Complex, Problem> {
        Ok(match self {
            Complex::Rect(z) => Complex::Rect(z.conjugate()),
            Complex::Polar(z) => Complex::Polar(z.conjugate()?),
        })
    }

    pub fn negate(&self) -> Result<Complex, Problem> {
        Ok(match self {
            Complex::Rect(z) => Complex::Rect(-z.clone()),
            Complex::Polar(z) => Complex::Polar(z.negate()?),
        })
    }

    pub fn inverse(&self) -> Result<Complex, Problem> {
        Ok(match self {
            Complex::Rect(z) => Complex::Rect(z.inverse()?),
            Complex::Polar(z) => Complex::Polar(z.inverse()?),
        })
    }

    pub fn add(&self, other: &Complex) -> Result<Complex, Problem> {
        Ok(Complex::Rect(self.to_rect()? + other.to_rect()?))
    }

    pub fn subtract(&self, other: &Complex) -> Result<Complex, Problem> {
        Ok(Complex::Rect(self.to_rect()? - other.to_rect()?))
    }

    pub fn multiply(&self, other: &Complex) -> Result<Complex, Problem> {
        match (self, other) {
            (Complex::Polar(a), Complex::Polar(b)) => Ok(Complex::Polar((a.clone() * b.clone())?)),
            _ => Ok(Complex::Rect(self.to_rect()? * other.to_rect()?)),
        }
    }

    /// Division, multiplying by the conjugate of the divisor
    pub fn divide(&self, other: &Complex) -> Result<Complex, Problem> {
        match (self, other) {
            (Complex::Polar(a), Complex::Polar(b)) => Ok(Complex::Polar((a.clone() / b.clone())?)),
            _ => Ok(Complex::Rect((self.to_rect()? / other.to_rect()?)?)),
        }
    }

    pub fn powi(&self, n: i64) -> Result<Complex, Problem> {
        Ok(match self {
            Complex::Rect(z) => Complex::Rect(z.powi(n)?),
            Complex::Polar(z) => Complex::Polar(z.powi(n)?),
        })
    }

    /// The principal square root
    pub fn sqrt(&self) -> Result<Complex, Problem> {
        Ok(Complex::Rect(self.to_rect()?.sqrt()?))
    }

    /// All `n` of the n-th roots, the principal root first
    ///
    /// Square roots use the rectangular half-angle formula, other degrees
    /// rotate the principal polar root by each of the roots of unity
    pub fn nth_roots(&self, n: i64) -> Result<Vec<Complex>, Problem> {
        match n {
            ..=-1 => Err(Problem::NegativeDegree),
            0 => Err(Problem::ZeroDegree),
            1 => Ok(vec![self.clone()]),
            2 => {
                let root = self.to_rect()?.sqrt()?;
                Ok(vec![Complex::Rect(root.clone()), Complex::Rect(-root)])
            }
            _ => {
                let polar = self.to_polar()?;
                let principal = polar.principal_root(n)?;
                let ctx = principal.argument().context();
                roots_of_unity(n, ctx)?
                    .into_iter()
                    .map(|unit| Ok(Complex::Polar((principal.clone() * unit)?)))
                    .collect()
            }
        }
    }
}

impl From<ComplexRect> for Complex {
    fn from(z: ComplexRect) -> Complex {
        Complex::Rect(z)
    }
}

impl From<ComplexPolar> for Complex {
    fn from(z: ComplexPolar) -> Complex {
        Complex::Polar(z)
    }
}

impl From<Real> for Complex {
    fn from(re: Real) -> Complex {
        Complex::Rect(ComplexRect::from_real(re))
    }
}

use core::fmt;

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Complex::Rect(z) => z.fmt(f),
            Complex::Polar(z) => z.fmt(f),
        }
    }
}

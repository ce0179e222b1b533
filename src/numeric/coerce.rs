use super::{Numeric, Rung};
use crate::{Complex, ContinuedFraction, Integer, MathContext, Problem, Rational, Real, Special};

/// Moving values between rungs of the tower
///
/// Raising a value never loses anything, with one exception: irrational
/// and generated values have no [`Rational`] form. Lowering only works for
/// values which are exactly representable on the lower rung.
///
/// # Example
///
/// ```
/// use rungs::{Coercible, Numeric, Rational, Rung};
/// let four_halves = Rational::fraction(4, 2).unwrap();
/// assert!(four_halves.is_coercible_to(Rung::Integer));
/// let n = four_halves.coerce_to(Rung::Integer).unwrap();
/// assert!(matches!(n, Numeric::Integer(_)));
/// assert!(!Rational::fraction(1, 3).unwrap().is_coercible_to(Rung::Integer));
/// ```
pub trait Coercible {
    fn rung(&self) -> Rung;

    fn coerce_to(&self, rung: Rung) -> Result<Numeric, Problem>;

    /// Whether [`coerce_to`](Coercible::coerce_to) would succeed
    fn is_coercible_to(&self, rung: Rung) -> bool {
        self.coerce_to(rung).is_ok()
    }
}

fn refuse(from: Rung, to: Rung) -> Problem {
    Problem::Coercion { from, to }
}

impl Coercible for Integer {
    fn rung(&self) -> Rung {
        Rung::Integer
    }

    fn coerce_to(&self, rung: Rung) -> Result<Numeric, Problem> {
        Ok(match rung {
            Rung::Integer => self.clone().into(),
            Rung::Rational => self.to_rational().into(),
            Rung::Real => self.to_real().into(),
            Rung::Complex => Complex::from(self.to_real()).into(),
        })
    }

    fn is_coercible_to(&self, _: Rung) -> bool {
        true
    }
}

impl Coercible for Rational {
    fn rung(&self) -> Rung {
        Rung::Rational
    }

    fn coerce_to(&self, rung: Rung) -> Result<Numeric, Problem> {
        Ok(match rung {
            Rung::Integer => self.to_integer().ok_or(refuse(Rung::Rational, rung))?.into(),
            Rung::Rational => self.clone().into(),
            Rung::Real => self.to_real(self.context())?.into(),
            Rung::Complex => Complex::from(self.to_real(self.context())?).into(),
        })
    }

    fn is_coercible_to(&self, rung: Rung) -> bool {
        rung != Rung::Integer || self.is_integer()
    }
}

impl Coercible for Real {
    fn rung(&self) -> Rung {
        Rung::Real
    }

    fn coerce_to(&self, rung: Rung) -> Result<Numeric, Problem> {
        Ok(match rung {
            Rung::Integer => self.to_integer()?.into(),
            Rung::Rational => self.rationalize()?.into(),
            Rung::Real => self.clone().into(),
            Rung::Complex => Complex::from(self.clone()).into(),
        })
    }

    fn is_coercible_to(&self, rung: Rung) -> bool {
        match rung {
            Rung::Integer => self.is_integer(),
            Rung::Rational => !self.is_irrational(),
            Rung::Real | Rung::Complex => true,
        }
    }
}

impl Coercible for Complex {
    fn rung(&self) -> Rung {
        Rung::Complex
    }

    /// Lowering needs an imaginary part which is exactly zero
    fn coerce_to(&self, rung: Rung) -> Result<Numeric, Problem> {
        match rung {
            Rung::Complex => Ok(self.clone().into()),
            _ if self.is_real() => self.real()?.coerce_to(rung),
            _ => Err(refuse(Rung::Complex, rung)),
        }
    }
}

impl Coercible for ContinuedFraction {
    fn rung(&self) -> Rung {
        Rung::Real
    }

    fn coerce_to(&self, rung: Rung) -> Result<Numeric, Problem> {
        match rung {
            Rung::Integer => {
                let whole = self.to_rational().ok().and_then(|r| r.to_integer());
                Ok(whole.ok_or(refuse(Rung::Real, rung))?.into())
            }
            Rung::Rational => Ok(self.to_rational()?.into()),
            Rung::Real => Ok(self.to_real(MathContext::DECIMAL128)?.into()),
            Rung::Complex => Ok(Complex::from(self.to_real(MathContext::DECIMAL128)?).into()),
        }
    }

    fn is_coercible_to(&self, rung: Rung) -> bool {
        match rung {
            Rung::Integer => self.is_finite() && self.to_rational().is_ok_and(|r| r.is_integer()),
            Rung::Rational => self.is_finite(),
            Rung::Real | Rung::Complex => true,
        }
    }
}

impl Coercible for Special {
    fn rung(&self) -> Rung {
        Special::rung(self)
    }

    /// Only the zeros have counterparts elsewhere, and only the exact zero
    /// below [`Rung::Real`]
    fn coerce_to(&self, rung: Rung) -> Result<Numeric, Problem> {
        match self {
            Special::ExactZero => Integer::zero().coerce_to(rung),
            Special::PositiveZero | Special::NegativeZero if rung >= Rung::Real => {
                Real::zero().with_exact(false).coerce_to(rung)
            }
            _ => Err(refuse(Special::rung(self), rung)),
        }
    }
}

impl Coercible for Numeric {
    fn rung(&self) -> Rung {
        Numeric::rung(self)
    }

    fn coerce_to(&self, rung: Rung) -> Result<Numeric, Problem> {
        match self {
            Numeric::Integer(n) => n.coerce_to(rung),
            Numeric::Rational(r) => r.coerce_to(rung),
            Numeric::Real(r) => r.coerce_to(rung),
            Numeric::Complex(z) => z.coerce_to(rung),
            Numeric::ContinuedFraction(cf) => cf.coerce_to(rung),
            Numeric::Special(s) => s.coerce_to(rung),
        }
    }

    fn is_coercible_to(&self, rung: Rung) -> bool {
        match self {
            Numeric::Integer(n) => n.is_coercible_to(rung),
            Numeric::Rational(r) => r.is_coercible_to(rung),
            Numeric::Real(r) => r.is_coercible_to(rung),
            Numeric::Complex(z) => z.is_coercible_to(rung),
            Numeric::ContinuedFraction(cf) => cf.is_coercible_to(rung),
            Numeric::Special(s) => s.is_coercible_to(rung),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upwards() {
        let n = Integer::new(7);
        for rung in [Rung::Integer, Rung::Rational, Rung::Real, Rung::Complex] {
            let raised = n.coerce_to(rung).unwrap();
            assert_eq!(raised.rung(), rung);
            assert!(raised.is_exact());
        }
        let third = Rational::fraction(1, 3).unwrap();
        let Numeric::Real(r) = third.coerce_to(Rung::Real).unwrap() else {
            panic!("a third becomes a Real");
        };
        assert!(!r.is_exact());
    }

    #[test]
    fn downwards() {
        let r: Real = "12.000".parse().unwrap();
        assert!(matches!(r.coerce_to(Rung::Integer).unwrap(), Numeric::Integer(_)));
        let r: Real = "12.5".parse().unwrap();
        assert!(r.is_coercible_to(Rung::Rational));
        assert!(!r.is_coercible_to(Rung::Integer));
        assert_eq!(
            r.coerce_to(Rung::Integer).unwrap_err(),
            Problem::Coercion {
                from: Rung::Real,
                to: Rung::Integer
            }
        );
        let pi = Real::pi(MathContext::DECIMAL64).unwrap();
        assert!(!pi.is_coercible_to(Rung::Rational));
    }

    #[test]
    fn complex() {
        let z: Complex = "4 + 0i".parse().unwrap();
        assert!(matches!(z.coerce_to(Rung::Integer).unwrap(), Numeric::Integer(_)));
        let w: Complex = "4 + 1i".parse().unwrap();
        assert!(!w.is_coercible_to(Rung::Real));
        assert!(w.coerce_to(Rung::Real).unwrap_err().is_coercion());
    }

    #[test]
    fn continued_fractions() {
        let cf = ContinuedFraction::new(vec![1, 1, 1, 1, 1]).unwrap();
        let Numeric::Rational(r) = cf.coerce_to(Rung::Rational).unwrap() else {
            panic!("finite fractions are rational");
        };
        assert_eq!(r, Rational::fraction(8, 5).unwrap());
        assert!(!ContinuedFraction::phi().is_coercible_to(Rung::Rational));
        assert!(ContinuedFraction::e().coerce_to(Rung::Rational).unwrap_err().is_coercion());
        assert!(ContinuedFraction::new(vec![3]).unwrap().is_coercible_to(Rung::Integer));
    }

    #[test]
    fn specials() {
        let zero = Special::ExactZero.coerce_to(Rung::Rational).unwrap();
        assert!(matches!(zero, Numeric::Rational(_)));
        assert!(!Special::PositiveZero.is_coercible_to(Rung::Integer));
        assert!(Special::NegativeZero.is_coercible_to(Rung::Real));
        assert!(!Special::PositiveInfinity.is_coercible_to(Rung::Real));
    }
}

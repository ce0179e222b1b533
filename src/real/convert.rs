use crate::{Decimal, Integer, MathContext, Problem, Rational, Real};
use num::BigInt;

impl From<i64> for Real {
    fn from(n: i64) -> Real {
        Real::from_bigint(n.into())
    }
}

impl From<i32> for Real {
    fn from(n: i32) -> Real {
        Real::from_bigint(n.into())
    }
}

impl From<BigInt> for Real {
    fn from(n: BigInt) -> Real {
        Real::from_bigint(n)
    }
}

impl From<Integer> for Real {
    fn from(n: Integer) -> Real {
        n.to_real()
    }
}

impl From<Decimal> for Real {
    fn from(d: Decimal) -> Real {
        Real::from_decimal(d)
    }
}

// Binary fractions always have a terminating decimal expansion
fn exactly(r: Rational) -> Result<Real, Problem> {
    r.to_real(MathContext::UNLIMITED)
}

impl TryFrom<f32> for Real {
    type Error = Problem;

    fn try_from(n: f32) -> Result<Real, Self::Error> {
        exactly(n.try_into()?)
    }
}

impl TryFrom<f64> for Real {
    type Error = Problem;

    fn try_from(n: f64) -> Result<Real, Self::Error> {
        exactly(n.try_into()?)
    }
}

impl From<&Real> for f64 {
    fn from(r: &Real) -> f64 {
        r.to_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floats() {
        let r: Real = 0.1_f64.try_into().unwrap();
        assert!(r.is_exact());
        assert_eq!(
            r.to_string(),
            "0.1000000000000000055511151231257827021181583404541015625"
        );
        let half: Real = 0.5_f32.try_into().unwrap();
        assert_eq!(f64::from(&half), 0.5);
        let nan: Result<Real, _> = f32::NAN.try_into();
        assert_eq!(nan.unwrap_err(), Problem::NotANumber);
    }

    #[test]
    fn integers() {
        let big: Real = BigInt::from(10).pow(30).into();
        assert_eq!(big.to_string(), "1000000000000000000000000000000");
        let small: Real = Integer::new(-7).into();
        assert_eq!(small, Real::from(-7));
    }
}

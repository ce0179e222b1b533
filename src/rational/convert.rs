use crate::{Problem, Rational};
use num::{BigInt, BigUint, One};

// The exact value of ±significand × 2^exponent, reduced
fn binary(neg: bool, significand: u64, exponent: i32) -> Result<Rational, Problem> {
    let n = BigInt::from(significand);
    let r = if exponent >= 0 {
        Rational::from_bigint(n << exponent as u32)
    } else {
        Rational::from_bigint_fraction(n, BigUint::one() << exponent.unsigned_abs())?
    };
    let r = r.reduce();
    Ok(if neg { -r } else { r })
}

impl TryFrom<f32> for Rational {
    type Error = Problem;

    fn try_from(n: f32) -> Result<Rational, Self::Error> {
        const NEG_BITS: u32 = 0x8000_0000;
        const EXP_BITS: u32 = 0x7f80_0000;
        const SIG_BITS: u32 = 0x007f_ffff;
        debug_assert_eq!(NEG_BITS + EXP_BITS + SIG_BITS, u32::MAX);

        let bits = n.to_bits();
        let neg = (bits & NEG_BITS) == NEG_BITS;
        let exp = ((bits & EXP_BITS) >> EXP_BITS.trailing_zeros()) as i32;
        let sig = (bits & SIG_BITS) as u64;
        match exp {
            0 => binary(neg, sig, -149),
            255 if sig == 0 => Err(Problem::Infinity),
            255 => Err(Problem::NotANumber),
            _ => binary(neg, sig + SIG_BITS as u64 + 1, exp - 150),
        }
    }
}

impl TryFrom<f64> for Rational {
    type Error = Problem;

    fn try_from(n: f64) -> Result<Rational, Self::Error> {
        const NEG_BITS: u64 = 0x8000_0000_0000_0000;
        const EXP_BITS: u64 = 0x7ff0_0000_0000_0000;
        const SIG_BITS: u64 = 0x000f_ffff_ffff_ffff;
        debug_assert_eq!(NEG_BITS + EXP_BITS + SIG_BITS, u64::MAX);

        let bits = n.to_bits();
        let neg = (bits & NEG_BITS) == NEG_BITS;
        let exp = ((bits & EXP_BITS) >> EXP_BITS.trailing_zeros()) as i32;
        let sig = bits & SIG_BITS;
        match exp {
            0 => binary(neg, sig, -1074),
            2047 if sig == 0 => Err(Problem::Infinity),
            2047 => Err(Problem::NotANumber),
            _ => binary(neg, sig + SIG_BITS + 1, exp - 1075),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero() {
        let f: f32 = 0.0;
        let d: f64 = 0.0;
        let a: Rational = f.try_into().unwrap();
        let b: Rational = d.try_into().unwrap();
        let zero = Rational::zero();
        assert_eq!(a, zero);
        assert_eq!(b, zero);
    }

    #[test]
    fn half_from_float() {
        let half = 0.5_f32;
        let correct = Rational::fraction(1, 2).unwrap();
        let answer: Rational = half.try_into().unwrap();
        assert_eq!(answer, correct);
        let half = 0.5_f64;
        let answer: Rational = half.try_into().unwrap();
        assert_eq!(answer, correct);
    }

    #[test]
    fn repr_f32() {
        let f: f32 = 1.23456789;
        let a: Rational = f.try_into().unwrap();
        let correct = Rational::fraction(5178153, 4194304).unwrap();
        assert!(a.eq_terms(&correct));
    }

    #[test]
    fn not_finite() {
        let nan: Result<Rational, _> = f64::NAN.try_into();
        assert_eq!(nan.unwrap_err(), Problem::NotANumber);
        let inf: Result<Rational, _> = f32::NEG_INFINITY.try_into();
        assert_eq!(inf.unwrap_err(), Problem::Infinity);
    }

    #[test]
    fn negative_binary_fraction() {
        let r: Rational = (-0.375_f64).try_into().unwrap();
        assert_eq!(r, Rational::fraction(-3, 8).unwrap());
        assert!(r.is_terminating());
    }

    #[test]
    fn repr_f64() {
        let f: f64 = 1.23456789;
        let a: Rational = f.try_into().unwrap();
        let correct = Rational::fraction(5559999489367579, 4503599627370496).unwrap();
        assert_eq!(a, correct);
    }
}

use super::gosper::exact;
use super::ContinuedFraction;
use crate::special::Op;
use crate::{MathContext, Problem, Rational};
use num::{BigInt, One, Signed, Zero};

// Longest period tried for the square root of an integer before using Newton's method
const MAX_PERIOD: usize = 100_000;
// Digits carried by roots which are not periodic
const DIGITS: u32 = MathContext::DECIMAL128.precision() + 4;

// n-th root of a rational, when both terms are perfect powers
fn perfect(r: &Rational, n: u32) -> Option<Rational> {
    let (p, q) = r.clone().reduce().to_bigint_fraction();
    let (rp, rq) = (p.nth_root(n), q.nth_root(n));
    if rp.pow(n) == p && rq.pow(n) == q {
        Rational::from_bigints(rp, rq).ok()
    } else {
        None
    }
}

// √n = [a₀; a₁, …, 2a₀] with the run between a₀ and 2a₀ a palindrome
fn periodic_root(n: i64) -> Option<Vec<i64>> {
    let n = i128::from(n);
    let a0 = (n as f64).sqrt() as i128;
    // correct the float estimate
    let a0 = (a0 - 1..=a0 + 1).rev().find(|a| a * a <= n)?;
    let (mut m, mut d, mut a) = (0_i128, 1_i128, a0);
    let mut terms = vec![i64::try_from(a0).ok()?];
    while terms.len() <= MAX_PERIOD {
        m = d * a - m;
        d = (n - m * m) / d;
        a = (a0 + m) / d;
        terms.push(i64::try_from(a).ok()?);
        if a == 2 * a0 {
            let run = &terms[1..terms.len() - 1];
            if run.iter().eq(run.iter().rev()) {
                return Some(terms);
            }
        }
    }
    None
}

impl ContinuedFraction {
    /// Square root
    ///
    /// The root of a whole number is exact: either a single term, or periodic
    /// from the second term.
    ///
    /// # Example
    ///
    /// ```
    /// use rungs::ContinuedFraction;
    /// let seven = ContinuedFraction::new(vec![7]).unwrap();
    /// assert_eq!(format!("{:#}", seven.sqrt().unwrap()), "[2; ⟨1, 1, 1, 4⟩]");
    /// ```
    pub fn sqrt(&self) -> Result<Self, Problem> {
        self.nth_root(2)
    }

    /// The real n-th root
    ///
    /// Roots of fractions which are not perfect powers come from Newton's
    /// method, carried out in continued fraction arithmetic, and are inexact.
    pub fn nth_root(&self, n: i64) -> Result<Self, Problem> {
        let degree = match n {
            ..=-1 => return Err(Problem::NegativeDegree),
            0 => return Err(Problem::ZeroDegree),
            1 => return Ok(self.clone()),
            _ => u32::try_from(n).map_err(|_| Problem::Exhausted)?,
        };
        if self.is_zero() {
            return Ok(self.clone());
        }
        if self.is_negative() {
            if degree % 2 == 0 {
                return Err(Problem::SqrtNegative);
            }
            return self.negate()?.nth_root(n)?.negate();
        }
        if self.is_finite() {
            let r = self.to_rational()?;
            if let Some(root) = perfect(&r, degree) {
                return Self::from_rational(&root);
            }
            if degree == 2 && self.terms.len() == 1 {
                if let Some(terms) = periodic_root(self.terms[0]) {
                    return Self::periodic(terms, 1);
                }
                log::warn!("√{} has a very long period, approximating", self.terms[0]);
            }
        }
        self.newton(degree)
    }

    // A finite fraction within 10^-digits of this value
    fn truncated(&self, digits: u32) -> Result<Self, Problem> {
        if self.is_finite() {
            return Ok(self.clone());
        }
        let bound = BigInt::from(10).pow(digits);
        let mut last = Rational::new(self.terms[0]);
        for c in self.convergents().take(10_000) {
            let (_, q) = c.to_bigint_fraction();
            last = c;
            if &q * &q > bound {
                break;
            }
        }
        Self::from_rational(&last)
    }

    // x ← ((n − 1)/n)·x + (A/n)/xⁿ⁻¹
    fn newton(&self, degree: u32) -> Result<Self, Problem> {
        let a = self.truncated(2 * DIGITS)?;
        let n = i64::from(degree);
        let keep = Self::from_rational(&Rational::fraction(n - 1, degree.into())?)?;
        let share = exact(Op::Divide, &a, &Self::new(vec![n])?)?;
        let start = a.to_real(MathContext::DECIMAL64)?.to_f64().powf(1.0 / f64::from(degree));
        let mut x = match Rational::try_from(start) {
            Ok(guess) if start > 0.0 => Self::from_rational(&guess)?,
            _ => Self::new(vec![1])?,
        };
        let epsilon = Rational::from_bigints(BigInt::one(), BigInt::from(10).pow(DIGITS))?;
        // digits double each round, from the float's sixteen
        let rounds = 2 * (32 - (DIGITS / 16).leading_zeros()) + 4;
        for _ in 0..rounds {
            let mut power = x.clone();
            for _ in 2..degree {
                power = exact(Op::Multiply, &power, &x)?;
            }
            let kept = exact(Op::Multiply, &keep, &x)?;
            let next = exact(Op::Add, &kept, &exact(Op::Divide, &share, &power)?)?;
            let change = exact(Op::Subtract, &next, &x)?.to_rational()?;
            x = next.truncated_to(DIGITS + 4)?;
            if change.abs() < epsilon {
                return Self::approximation(x.truncated_to(DIGITS)?.terms);
            }
        }
        log::warn!("root of degree {degree} still converging after {rounds} rounds");
        Self::approximation(x.truncated_to(DIGITS)?.terms)
    }

    // The finite fraction cut at the first convergent accurate to 10^-digits
    fn truncated_to(&self, digits: u32) -> Result<Self, Problem> {
        let bound = BigInt::from(10).pow(digits);
        let mut previous = BigInt::zero();
        for (i, c) in self.convergents().enumerate() {
            let (_, q) = c.to_bigint_fraction();
            if (&q * &previous).abs() > bound {
                return Self::new(self.terms(i + 1));
            }
            previous = q;
        }
        Ok(self.clone())
    }
}

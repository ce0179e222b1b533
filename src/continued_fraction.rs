//! Simple continued fractions
//!
//! A [`ContinuedFraction`] is a Real-rung value stored as its terms
//! `[a₀; a₁, a₂, …]`. It is finite, periodic from some index, or backed by
//! a generator producing the terms after a finite prefix. Arithmetic between
//! fractions uses Gosper's algorithm, see [`ContinuedFraction::add`].

use crate::{Integer, MathContext, Numeric, Problem, Rational, Real};
use num::bigint::Sign::{self, *};
use num::{BigInt, Integer as _, One, ToPrimitive, Zero};
use parking_lot::Mutex;
use std::cmp::Ordering;
use std::sync::Arc;

mod format;
mod gosper;
mod root;

type Generator = dyn Fn(usize) -> Option<i64> + Send + Sync;

// The terms of an iterator seen so far, grown on demand
struct TermCache {
    seen: Vec<i64>,
    source: Box<dyn Iterator<Item = i64> + Send>,
    done: bool,
}

impl TermCache {
    fn get(&mut self, index: usize) -> Option<i64> {
        while self.seen.len() <= index && !self.done {
            match self.source.next() {
                Some(term) => self.seen.push(term),
                None => self.done = true,
            }
        }
        self.seen.get(index).copied()
    }
}

#[derive(Clone)]
enum Source {
    Function(Arc<Generator>),
    Cached(Arc<Mutex<TermCache>>),
}

// The terms after the prefix: term i of the tail is term `offset + i` of the source
#[derive(Clone)]
struct Tail {
    source: Source,
    offset: usize,
}

impl Tail {
    fn get(&self, index: usize) -> Option<i64> {
        let index = self.offset.checked_add(index)?;
        match &self.source {
            Source::Function(f) => f(index),
            Source::Cached(cache) => cache.lock().get(index),
        }
    }

    fn skip(&self, n: usize) -> Self {
        Tail {
            source: self.source.clone(),
            offset: self.offset + n,
        }
    }
}

/// Simple continued fraction `a₀ + 1/(a₁ + 1/(a₂ + …))`
///
/// Every term after the first is positive. Zeros are annealed away when a
/// fraction is built: `[…, a, 0, b, …]` becomes `[…, a+b, …]` and a trailing
/// `[…, a, 0]` becomes `[…]`.
///
/// A fraction is exact unless it is backed by a generator. Periodic fractions
/// such as `√2 = [1; 2̅]` are exact.
///
/// # Examples
///
/// ```
/// use rungs::{ContinuedFraction, Rational};
/// let cf = ContinuedFraction::from_rational(&Rational::fraction(415, 93).unwrap()).unwrap();
/// assert_eq!(cf.to_string(), "[4; 2, 6, 7]");
/// assert_eq!(cf.to_rational().unwrap(), Rational::fraction(415, 93).unwrap());
/// ```
///
/// Negation follows `[a₀; a₁, a₂, …] → [−a₀−1; 1, a₁−1, a₂, …]`
/// ```
/// use rungs::ContinuedFraction;
/// let cf = ContinuedFraction::new(vec![2, 3]).unwrap();
/// assert_eq!(cf.negate().unwrap().to_string(), "[-3; 1, 2]");
/// ```
#[derive(Clone)]
pub struct ContinuedFraction {
    terms: Vec<i64>,
    repeat_from: Option<usize>,
    tail: Option<Tail>,
}

impl std::fmt::Debug for ContinuedFraction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContinuedFraction")
            .field("terms", &self.terms)
            .field("repeat_from", &self.repeat_from)
            .field("generated", &self.tail.is_some())
            .finish()
    }
}

fn checked_add(a: i64, b: i64) -> Result<i64, Problem> {
    a.checked_add(b).ok_or(Problem::TermOverflow)
}

fn term(n: &BigInt) -> Result<i64, Problem> {
    n.to_i64().ok_or(Problem::TermOverflow)
}

impl ContinuedFraction {
    /// A finite fraction from its terms
    pub fn new(terms: Vec<i64>) -> Result<Self, Problem> {
        Self::build(terms, None, None)
    }

    /// A fraction whose terms from `repeat_from` onward repeat forever
    ///
    /// # Example
    ///
    /// ```
    /// use rungs::ContinuedFraction;
    /// let root_two = ContinuedFraction::periodic(vec![1, 2], 1).unwrap();
    /// assert_eq!(root_two.terms(6), vec![1, 2, 2, 2, 2, 2]);
    /// assert!(root_two.is_exact());
    /// ```
    pub fn periodic(terms: Vec<i64>, repeat_from: usize) -> Result<Self, Problem> {
        if repeat_from >= terms.len() {
            return Err(Problem::BadContinuedFraction);
        }
        Self::build(terms, Some(repeat_from), None)
    }

    /// A prefix followed by the terms `f(0)`, `f(1)`, … for as long as `f`
    /// produces them
    pub fn from_generator<F>(prefix: Vec<i64>, f: F) -> Result<Self, Problem>
    where
        F: Fn(usize) -> Option<i64> + Send + Sync + 'static,
    {
        let tail = Tail {
            source: Source::Function(Arc::new(f)),
            offset: 0,
        };
        Self::build(prefix, None, Some(tail))
    }

    /// The terms produced by an iterator, remembered as they are read
    ///
    /// `cache_size` is the number of terms room is made for up front, zero
    /// is [`Problem::BadCacheSize`]. Terms are expected to be read in order.
    ///
    /// # Example
    ///
    /// ```
    /// use rungs::ContinuedFraction;
    /// let ones = ContinuedFraction::from_iterator(std::iter::repeat(1), 16).unwrap();
    /// assert_eq!(ones.terms(4), vec![1, 1, 1, 1]);
    /// assert!(!ones.is_exact());
    /// ```
    pub fn from_iterator<I>(terms: I, cache_size: usize) -> Result<Self, Problem>
    where
        I: IntoIterator<Item = i64>,
        I::IntoIter: Send + 'static,
    {
        if cache_size == 0 {
            return Err(Problem::BadCacheSize);
        }
        let mut source = terms.into_iter();
        let first = source.next().ok_or(Problem::BadContinuedFraction)?;
        let cache = TermCache {
            seen: Vec::with_capacity(cache_size),
            source: Box::new(source),
            done: false,
        };
        let tail = Tail {
            source: Source::Cached(Arc::new(Mutex::new(cache))),
            offset: 0,
        };
        Self::build(vec![first], None, Some(tail))
    }

    // A finite run of terms standing for a value they only approximate
    pub(crate) fn approximation(mut terms: Vec<i64>) -> Result<Self, Problem> {
        if terms.is_empty() {
            return Err(Problem::BadContinuedFraction);
        }
        let rest: Vec<i64> = terms.split_off(1);
        Self::from_generator(terms, move |i| rest.get(i).copied())
    }

    pub fn from_integer(n: &Integer) -> Result<Self, Problem> {
        Self::new(vec![term(n.value())?])
    }

    /// The finite expansion of a fraction, by Euclid's algorithm
    pub fn from_rational(r: &Rational) -> Result<Self, Problem> {
        let (mut n, mut d) = r.to_bigint_fraction();
        let mut terms = Vec::new();
        while !d.is_zero() {
            let (q, rem) = n.div_mod_floor(&d);
            terms.push(term(&q)?);
            n = d;
            d = rem;
        }
        Self::new(terms)
    }

    /// The expansion of a decimal
    ///
    /// An inexact value only approximates its terms, so the result is
    /// generator-backed and inexact too.
    pub fn from_real(r: &Real) -> Result<Self, Problem> {
        let (n, d) = r.value().to_fraction();
        let exact = Self::from_rational(&Rational::from_bigint_fraction(n, d)?)?;
        if r.is_exact() {
            Ok(exact)
        } else {
            Self::approximation(exact.terms)
        }
    }

    /// e = [2; 1, 2, 1, 1, 4, 1, 1, 6, 1, …]
    pub fn e() -> Self {
        let tail = Tail {
            source: Source::Function(Arc::new(|i| {
                let i = i64::try_from(i).ok()?;
                if i % 3 == 1 {
                    (i / 3 + 1).checked_mul(2)
                } else {
                    Some(1)
                }
            })),
            offset: 0,
        };
        Self {
            terms: vec![2],
            repeat_from: None,
            tail: Some(tail),
        }
    }

    /// φ = [1; 1̅]
    pub fn phi() -> Self {
        Self {
            terms: vec![1, 1],
            repeat_from: Some(1),
            tail: None,
        }
    }

    fn build(terms: Vec<i64>, repeat_from: Option<usize>, tail: Option<Tail>) -> Result<Self, Problem> {
        let mut cf = Self {
            terms,
            repeat_from,
            tail,
        };
        cf.anneal()?;
        cf.validate()?;
        Ok(cf)
    }

    fn validate(&self) -> Result<(), Problem> {
        if self.terms.is_empty() || self.terms.iter().skip(1).any(|&t| t < 0) {
            return Err(Problem::BadContinuedFraction);
        }
        Ok(())
    }

    // Remove every zero after the first term
    fn anneal(&mut self) -> Result<(), Problem> {
        while let Some(j) = self.terms.iter().skip(1).position(|&t| t == 0).map(|j| j + 1) {
            if let Some(start) = self.repeat_from {
                if j >= start {
                    return Err(Problem::BadContinuedFraction);
                }
                if j + 1 == start {
                    // [a, 0, ^b, c…] is [a+b; ^c…, b]
                    let merged = checked_add(self.terms[j - 1], self.terms[start])?;
                    let mut period = self.terms.split_off(start);
                    period.rotate_left(1);
                    self.terms.truncate(j - 1);
                    self.terms.push(merged);
                    self.repeat_from = Some(self.terms.len());
                    self.terms.extend(period);
                    continue;
                }
            }
            if j + 1 < self.terms.len() {
                let merged = checked_add(self.terms[j - 1], self.terms[j + 1])?;
                self.terms.splice(j - 1..j + 2, [merged]);
                if let Some(start) = self.repeat_from.as_mut() {
                    *start -= 2;
                }
                continue;
            }
            // The zero is last
            match self.tail.take() {
                Some(tail) => match tail.get(0) {
                    Some(next) => {
                        self.terms.push(next);
                        self.tail = Some(tail.skip(1));
                    }
                    None => self.terms.truncate(j - 1),
                },
                None => self.terms.truncate(j - 1),
            }
            if self.terms.is_empty() {
                return Err(Problem::BadContinuedFraction);
            }
        }
        Ok(())
    }

    /// Exact unless backed by a generator
    pub fn is_exact(&self) -> bool {
        self.tail.is_none()
    }

    pub fn is_periodic(&self) -> bool {
        self.repeat_from.is_some()
    }

    /// The repeating terms, if any
    pub fn period(&self) -> Option<&[i64]> {
        self.repeat_from.map(|start| &self.terms[start..])
    }

    /// Finite and exact, i.e. a rational
    pub fn is_finite(&self) -> bool {
        self.tail.is_none() && self.repeat_from.is_none()
    }

    /// The term at `index`, or `None` past the end of a finite fraction
    pub fn term_at(&self, index: usize) -> Option<i64> {
        if let Some(&t) = self.terms.get(index) {
            return Some(t);
        }
        if let Some(start) = self.repeat_from {
            let period = self.terms.len() - start;
            return Some(self.terms[start + (index - start) % period]);
        }
        self.tail.as_ref()?.get(index - self.terms.len())
    }

    /// Up to `n` leading terms
    pub fn terms(&self, n: usize) -> Vec<i64> {
        (0..n).map_while(|i| self.term_at(i)).collect()
    }

    pub fn is_zero(&self) -> bool {
        self.is_finite() && self.terms == [0]
    }

    /// Whether the value is below zero
    pub fn is_negative(&self) -> bool {
        self.terms[0] < 0
    }

    pub fn sign(&self) -> Sign {
        if self.is_zero() {
            NoSign
        } else if self.is_negative() {
            Minus
        } else {
            Plus
        }
    }

    // Move tail or period terms into the prefix until it holds `n` terms,
    // and the first `n - 1` of them come before any period
    fn unroll(&self, n: usize) -> Self {
        let mut cf = self.clone();
        let short =
            |cf: &Self| cf.terms.len() < n || cf.repeat_from.is_some_and(|start| start + 1 < n);
        while short(&cf) {
            if let Some(start) = cf.repeat_from {
                // rotate the period one place
                cf.terms.push(cf.terms[start]);
                cf.repeat_from = Some(start + 1);
            } else if let Some(tail) = cf.tail.take() {
                match tail.get(0) {
                    Some(t) => {
                        cf.terms.push(t);
                        cf.tail = Some(tail.skip(1));
                    }
                    None => break,
                }
            } else {
                break;
            }
        }
        cf
    }

    /// The additive inverse
    pub fn negate(&self) -> Result<Self, Problem> {
        let cf = self.unroll(3);
        let mut terms = cf.terms;
        let first = terms[0].checked_neg().ok_or(Problem::TermOverflow)?;
        if terms.len() == 1 {
            return Self::build(vec![first], None, cf.tail);
        }
        terms[0] = checked_add(first, -1)?;
        terms[1] -= 1;
        terms.insert(1, 1);
        Self::build(terms, cf.repeat_from.map(|start| start + 1), cf.tail)
    }

    /// The multiplicative inverse, [`Problem::DivideByZero`] for zero
    ///
    /// # Example
    ///
    /// ```
    /// use rungs::ContinuedFraction;
    /// let cf = ContinuedFraction::new(vec![0, 2, 3]).unwrap();
    /// assert_eq!(cf.inverse().unwrap().to_string(), "[2; 3]");
    /// assert_eq!(cf.inverse().unwrap().inverse().unwrap(), cf);
    /// ```
    pub fn inverse(&self) -> Result<Self, Problem> {
        if self.is_zero() {
            return Err(Problem::DivideByZero);
        }
        if self.is_negative() {
            return self.negate()?.inverse()?.negate();
        }
        let cf = self.unroll(2);
        let mut terms = cf.terms;
        if terms[0] == 0 {
            terms.remove(0);
            Self::build(terms, cf.repeat_from.map(|start| start - 1), cf.tail)
        } else {
            terms.insert(0, 0);
            Self::build(terms, cf.repeat_from.map(|start| start + 1), cf.tail)
        }
    }

    /// The `n`th convergent, or the value itself when `n` is past the last term
    ///
    /// # Example
    ///
    /// ```
    /// use rungs::{ContinuedFraction, Rational};
    /// let phi = ContinuedFraction::phi();
    /// assert_eq!(phi.convergent(5), Rational::fraction(13, 8).unwrap());
    /// ```
    pub fn convergent(&self, n: usize) -> Rational {
        let mut last = Rational::new(self.terms[0]);
        for (i, c) in self.convergents().enumerate() {
            last = c;
            if i == n {
                break;
            }
        }
        last
    }

    /// The successive convergents p₀/q₀, p₁/q₁, …
    pub fn convergents(&self) -> Convergents<'_> {
        Convergents {
            cf: self,
            index: 0,
            p: (BigInt::one(), BigInt::zero()),
            q: (BigInt::zero(), BigInt::one()),
        }
    }

    /// The exact value of a finite fraction
    ///
    /// Periodic and generated fractions are irrational or of unknown length,
    /// so they give [`Problem::Coercion`].
    pub fn to_rational(&self) -> Result<Rational, Problem> {
        if !self.is_finite() {
            return Err(Problem::Coercion {
                from: crate::Rung::Real,
                to: crate::Rung::Rational,
            });
        }
        Ok(self.convergent(self.terms.len()).reduce())
    }

    /// The value as a decimal
    ///
    /// Convergents are taken until the error bound 1/(qₖqₖ₋₁) is below the
    /// precision of `ctx`.
    ///
    /// # Example
    ///
    /// ```
    /// use rungs::{ContinuedFraction, MathContext};
    /// let e = ContinuedFraction::e().to_real(MathContext::with_precision(15)).unwrap();
    /// assert_eq!(e.to_string(), "2.71828182845905");
    /// ```
    pub fn to_real(&self, ctx: MathContext) -> Result<Real, Problem> {
        const MAX_TERMS: usize = 100_000;
        if self.is_finite() {
            return self.to_rational()?.to_real(ctx);
        }
        let ctx = ctx.bounded();
        let bound = BigInt::from(10).pow(ctx.precision() + 2);
        let mut previous = BigInt::one();
        let mut value = None;
        let mut ended = true;
        for (i, c) in self.convergents().enumerate() {
            let (_, q) = c.to_bigint_fraction();
            let close = &q * &previous > bound;
            previous = q;
            value = Some(c);
            if close {
                ended = false;
                break;
            }
            if i >= MAX_TERMS {
                log::warn!("continued fraction still converging after {MAX_TERMS} terms");
                ended = false;
                break;
            }
        }
        let value = value.ok_or(Problem::BadContinuedFraction)?;
        let decimal = value.as_decimal(ctx)?;
        if self.is_periodic() || !ended {
            Ok(Real::irrational(decimal, ctx))
        } else {
            Ok(Real::new(decimal, false, ctx))
        }
    }

    /// Compare by terms
    ///
    /// At an even index a larger term means a larger value, at an odd
    /// index a smaller one. A fraction which ends is followed by an infinite
    /// term. Fractions agreeing on their first several thousand terms compare
    /// as equal.
    pub fn compare(&self, other: &Self) -> Ordering {
        const MAX_TERMS: usize = 10_000;
        if self.is_finite() && other.is_finite() {
            if let (Ok(a), Ok(b)) = (self.to_rational(), other.to_rational()) {
                return a.cmp(&b);
            }
        }
        for i in 0..MAX_TERMS {
            let order = match (self.term_at(i), other.term_at(i)) {
                (None, None) => return Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => a.cmp(&b),
            };
            if order != Ordering::Equal {
                return if i % 2 == 0 { order } else { order.reverse() };
            }
        }
        Ordering::Equal
    }
}

/// Iterator over the convergents of a [`ContinuedFraction`]
pub struct Convergents<'a> {
    cf: &'a ContinuedFraction,
    index: usize,
    p: (BigInt, BigInt),
    q: (BigInt, BigInt),
}

impl Iterator for Convergents<'_> {
    type Item = Rational;

    fn next(&mut self) -> Option<Rational> {
        let a = BigInt::from(self.cf.term_at(self.index)?);
        self.index += 1;
        let p = &a * &self.p.0 + &self.p.1;
        let q = &a * &self.q.0 + &self.q.1;
        self.p = (p.clone(), std::mem::take(&mut self.p.0));
        self.q = (q.clone(), std::mem::take(&mut self.q.0));
        Rational::from_bigints(p, q).ok()
    }
}

impl PartialEq for ContinuedFraction {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl PartialOrd for ContinuedFraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.compare(other))
    }
}

impl TryFrom<&Rational> for ContinuedFraction {
    type Error = Problem;

    fn try_from(r: &Rational) -> Result<Self, Problem> {
        Self::from_rational(r)
    }
}

impl From<ContinuedFraction> for Numeric {
    fn from(cf: ContinuedFraction) -> Numeric {
        Numeric::ContinuedFraction(cf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cf(terms: &[i64]) -> ContinuedFraction {
        ContinuedFraction::new(terms.to_vec()).unwrap()
    }

    #[test]
    fn anneal() {
        assert_eq!(cf(&[1, 2, 0, 3, 4]).terms(10), vec![1, 5, 4]);
        assert_eq!(cf(&[1, 2, 0]).terms(10), vec![1]);
        assert_eq!(cf(&[0, 3]).terms(10), vec![0, 3]);
        let rotated = ContinuedFraction::periodic(vec![1, 0, 2, 3], 2).unwrap();
        assert_eq!(rotated.terms(6), vec![3, 3, 2, 3, 2, 3]);
        assert_eq!(rotated.period(), Some(&[3, 2][..]));
        let bad = ContinuedFraction::periodic(vec![1, 2, 0], 1);
        assert_eq!(bad.unwrap_err(), Problem::BadContinuedFraction);
        let overflow = ContinuedFraction::new(vec![1, i64::MAX, 0, 1]);
        assert_eq!(overflow.unwrap_err(), Problem::TermOverflow);
    }

    #[test]
    fn fibonacci() {
        let ones = cf(&[1, 1, 1, 1, 1]);
        assert_eq!(ones.convergent(3), Rational::fraction(5, 3).unwrap());
        assert_eq!(ones.to_rational().unwrap(), Rational::fraction(8, 5).unwrap());
    }

    #[test]
    fn negate() {
        assert_eq!(cf(&[2, 3]).negate().unwrap().terms(5), vec![-3, 1, 2]);
        assert_eq!(cf(&[2, 1]).negate().unwrap().terms(5), vec![-3]);
        assert_eq!(cf(&[5]).negate().unwrap().terms(5), vec![-5]);
        let x = cf(&[1, 4, 2, 7]);
        let minus = x.negate().unwrap();
        assert_eq!(minus.to_rational().unwrap(), -x.to_rational().unwrap());
        assert_eq!(minus.negate().unwrap().terms(10), x.terms(10));
        let root_two = ContinuedFraction::periodic(vec![1, 2], 1).unwrap();
        let minus = root_two.negate().unwrap();
        assert_eq!(minus.terms(6), vec![-2, 1, 1, 2, 2, 2]);
        assert!(minus.is_periodic());
    }

    #[test]
    fn negate_periodic() {
        let root_three = cf(&[3]).sqrt().unwrap();
        let minus = root_three.negate().unwrap();
        assert_eq!(minus.terms(8), vec![-2, 3, 1, 2, 1, 2, 1, 2]);
        assert_eq!(minus.period(), Some(&[1, 2][..]));
        assert_eq!(minus.negate().unwrap().terms(8), root_three.terms(8));

        let root_seven = cf(&[7]).sqrt().unwrap();
        let minus = root_seven.negate().unwrap();
        assert_eq!(minus.terms(10), vec![-3, 2, 1, 4, 1, 1, 1, 4, 1, 1]);
        assert_eq!(minus.negate().unwrap().terms(12), root_seven.terms(12));

        let x = ContinuedFraction::periodic(vec![1, 2, 3], 1).unwrap();
        let minus = x.negate().unwrap();
        assert_eq!(minus.terms(8), vec![-2, 1, 1, 3, 2, 3, 2, 3]);
        assert_eq!(minus.negate().unwrap().terms(12), x.terms(12));

        let pure = ContinuedFraction::periodic(vec![2, 1], 0).unwrap();
        let minus = pure.negate().unwrap();
        assert_eq!(minus.negate().unwrap().terms(12), pure.terms(12));
        let ctx = MathContext::with_precision(20);
        let sum = minus.to_real(ctx).unwrap() + pure.to_real(ctx).unwrap();
        assert!(sum.approx_eq(&Real::from(0), &"1e-18".parse().unwrap()));
    }

    #[test]
    fn inverse_periodic() {
        let minus_root_three = cf(&[3]).sqrt().unwrap().negate().unwrap();
        let inverse = minus_root_three.inverse().unwrap();
        // −1/√3 = −0.57735…
        assert_eq!(inverse.terms(6), vec![-1, 2, 2, 1, 2, 1]);
        assert_eq!(inverse.inverse().unwrap().terms(8), minus_root_three.terms(8));
    }

    #[test]
    fn negate_generated() {
        let e = ContinuedFraction::e().negate().unwrap();
        assert_eq!(e.terms(7), vec![-3, 3, 1, 1, 4, 1, 1]);
        assert!(!e.is_exact());
    }

    #[test]
    fn inverse() {
        assert_eq!(cf(&[2, 3]).inverse().unwrap().terms(5), vec![0, 2, 3]);
        assert_eq!(cf(&[0]).inverse().unwrap_err(), Problem::DivideByZero);
        let half = cf(&[-1, 2]);
        assert_eq!(half.inverse().unwrap().terms(5), vec![-2]);
        let phi = ContinuedFraction::phi();
        let inverse = phi.inverse().unwrap();
        assert_eq!(inverse.terms(4), vec![0, 1, 1, 1]);
        assert_eq!(inverse.inverse().unwrap().terms(4), vec![1, 1, 1, 1]);
    }

    #[test]
    fn periodic_terms() {
        let root_seven = ContinuedFraction::periodic(vec![2, 1, 1, 1, 4], 1).unwrap();
        assert_eq!(root_seven.terms(10), vec![2, 1, 1, 1, 4, 1, 1, 1, 4, 1]);
        assert_eq!(root_seven.period(), Some(&[1, 1, 1, 4][..]));
    }

    #[test]
    fn iterator_backed() {
        let squares = (1..).map(|n: i64| n * n);
        let cf = ContinuedFraction::from_iterator(squares, 4).unwrap();
        assert_eq!(cf.terms(5), vec![1, 4, 9, 16, 25]);
        assert_eq!(cf.term_at(2), Some(9));
        let bad = ContinuedFraction::from_iterator(std::iter::empty(), 4);
        assert_eq!(bad.unwrap_err(), Problem::BadContinuedFraction);
        let zero = ContinuedFraction::from_iterator(vec![1, 2], 0);
        assert_eq!(zero.unwrap_err(), Problem::BadCacheSize);
    }

    #[test]
    fn e_terms() {
        let e = ContinuedFraction::e();
        assert_eq!(e.terms(11), vec![2, 1, 2, 1, 1, 4, 1, 1, 6, 1, 1]);
    }

    #[test]
    fn rational_round_trip() {
        let r = Rational::fraction(-355, 113).unwrap();
        let cf = ContinuedFraction::from_rational(&r).unwrap();
        assert_eq!(cf.terms(10), vec![-4, 1, 6, 16]);
        assert_eq!(cf.to_rational().unwrap(), r);
    }

    #[test]
    fn to_real() {
        let ctx = MathContext::with_precision(20);
        let phi = ContinuedFraction::phi().to_real(ctx).unwrap();
        assert_eq!(phi.to_string(), "1.6180339887498948482");
        assert!(phi.is_irrational());
        let third = cf(&[0, 3]).to_real(ctx).unwrap();
        assert_eq!(third.to_string(), "0.33333333333333333333");
    }

    #[test]
    fn ordering() {
        let third = cf(&[0, 3]);
        let half = cf(&[0, 2]);
        assert!(third < half);
        let root_two = ContinuedFraction::periodic(vec![1, 2], 1).unwrap();
        assert!(root_two > cf(&[1, 2, 2]));
        assert!(root_two < cf(&[1, 2]));
        assert!(ContinuedFraction::e() > root_two);
        assert_eq!(cf(&[1, 1]), cf(&[2]));
    }

    #[test]
    fn from_real() {
        let r: Real = "1.25".parse().unwrap();
        let cf = ContinuedFraction::from_real(&r).unwrap();
        assert_eq!(cf.terms(5), vec![1, 4]);
        assert!(cf.is_exact());
        let pi = Real::pi(MathContext::with_precision(10)).unwrap();
        let cf = ContinuedFraction::from_real(&pi).unwrap();
        assert_eq!(cf.terms(4), vec![3, 7, 15, 1]);
        assert!(!cf.is_exact());
    }
}

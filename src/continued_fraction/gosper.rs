//! Gosper's algorithm for arithmetic on continued fractions
//!
//! Two fractions x and y are combined through the bihomographic form
//!
//! ```text
//!     a·xy + b·x + c·y + d
//! z = --------------------
//!     e·xy + f·x + g·y + h
//! ```
//!
//! where x and y stand for the tails not yet read. Reading a term of x or y
//! updates the eight coefficients, and once every corner of the form (each
//! tail at zero or infinity) agrees on the integer part of z, that integer is
//! the next output term.

use super::{term, ContinuedFraction, Source, TermCache, Tail};
use crate::special::Op;
use crate::{MathContext, Numeric, Problem};
use num::bigint::Sign::*;
use num::{BigInt, Integer as _, Signed, ToPrimitive, Zero};
use parking_lot::Mutex;
use std::sync::Arc;

// Consecutive reads from an infinite input without output before giving up
const MAX_STREAK: usize = 100;
// Output terms computed up front for infinite inputs
const PRIME: usize = 8;

const X: usize = 0;
const Y: usize = 1;

pub(super) struct Gosper {
    inputs: [ContinuedFraction; 2],
    next: [usize; 2],
    live: [bool; 2],
    // a, b, c, d over e, f, g, h
    k: [BigInt; 8],
    streak: usize,
    bounded: bool,
    finished: bool,
}

impl Gosper {
    pub(super) fn new(op: Op, x: ContinuedFraction, y: ContinuedFraction) -> Self {
        let k = match op {
            Op::Add => [0, 1, 1, 0, 0, 0, 0, 1],
            Op::Subtract => [0, 1, -1, 0, 0, 0, 0, 1],
            Op::Multiply => [1, 0, 0, 0, 0, 0, 0, 1],
            Op::Divide => [0, 1, 0, 0, 0, 0, 1, 0],
        };
        let bounded = !(x.is_finite() && y.is_finite());
        Self {
            inputs: [x, y],
            next: [0, 0],
            live: [true, true],
            k: k.map(BigInt::from),
            streak: 0,
            bounded,
            finished: false,
        }
    }

    // Each live input has given up its leading term
    fn primed(&self) -> bool {
        (0..2).all(|i| self.next[i] > 0 || !self.live[i])
    }

    // Numerator and denominator index of each corner still in play
    fn corners(&self) -> &'static [(usize, usize)] {
        match self.live {
            [true, true] => &[(0, 4), (1, 5), (2, 6), (3, 7)],
            [false, true] => &[(2, 6), (3, 7)],
            [true, false] => &[(1, 5), (3, 7)],
            [false, false] => &[(3, 7)],
        }
    }

    fn egestable(&self) -> Option<BigInt> {
        let corners = self.corners();
        let sign = self.k[corners[0].1].sign();
        if sign == NoSign || corners.iter().any(|&(_, d)| self.k[d].sign() != sign) {
            return None;
        }
        let mut floors = corners.iter().map(|&(n, d)| self.k[n].div_floor(&self.k[d]));
        let first = floors.next()?;
        floors.all(|q| q == first).then_some(first)
    }

    // z ← 1 / (z − t)
    fn egest(&mut self, t: &BigInt) {
        let [a, b, c, d, e, f, g, h] = std::mem::take(&mut self.k);
        self.k = [
            e.clone(),
            f.clone(),
            g.clone(),
            h.clone(),
            a - t * e,
            b - t * f,
            c - t * g,
            d - t * h,
        ];
    }

    fn ingest(&mut self, input: usize) {
        let term = self.inputs[input].term_at(self.next[input]);
        let [a, b, c, d, e, f, g, h] = std::mem::take(&mut self.k);
        self.k = match (input, term) {
            // x ← p + 1/x
            (X, Some(p)) => {
                let p = BigInt::from(p);
                [&a * &p + c, &b * &p + d, a, b, &e * &p + g, &f * &p + h, e, f]
            }
            // y ← q + 1/y
            (_, Some(q)) => {
                let q = BigInt::from(q);
                [&a * &q + b, a, &c * &q + d, c, &e * &q + f, e, &g * &q + h, g]
            }
            // x is infinite from here on
            (X, None) => {
                let zero = BigInt::zero;
                [zero(), zero(), a, b, zero(), zero(), e, f]
            }
            (_, None) => {
                let zero = BigInt::zero;
                [zero(), a, zero(), c, zero(), e, zero(), g]
            }
        };
        match term {
            Some(_) => self.next[input] += 1,
            None => self.live[input] = false,
        }
    }

    fn ratio(&self, n: usize, d: usize) -> f64 {
        match (self.k[n].to_f64(), self.k[d].to_f64()) {
            (Some(n), Some(d)) if d != 0.0 => n / d,
            _ => f64::INFINITY,
        }
    }

    // Read from the input which leaves z least certain
    fn choose(&self) -> usize {
        match self.live {
            [true, false] => return X,
            [false, true] => return Y,
            _ => (),
        }
        if !self.primed() {
            return if self.next[X] == 0 { X } else { Y };
        }
        let corner = self.ratio(0, 4);
        let spread_y = (corner - self.ratio(1, 5)).abs();
        let spread_x = (corner - self.ratio(2, 6)).abs();
        let spread_y = if spread_y.is_nan() { f64::INFINITY } else { spread_y };
        let spread_x = if spread_x.is_nan() { f64::INFINITY } else { spread_x };
        if spread_y > spread_x || (spread_y == spread_x && self.next[Y] < self.next[X]) {
            Y
        } else {
            X
        }
    }

    // Every corner rounds to one integer, the value is taken to be exactly that
    fn stalled(&mut self) -> Result<Option<i64>, Problem> {
        let corners = self.corners();
        let mut rounded = corners.iter().map(|&(n, d)| {
            let (n, d) = (&self.k[n], &self.k[d]);
            if d.is_zero() {
                return None;
            }
            let (n, d): (BigInt, BigInt) = if d.is_negative() { (-n, -d) } else { (n.clone(), d.clone()) };
            Some(BigInt::div_floor(&(n * 2 + &d), &(d * 2)))
        });
        let first = rounded.next().flatten();
        match first {
            Some(m) if rounded.all(|r| r.as_ref() == Some(&m)) => {
                log::debug!("continued fraction stream settled on {m}");
                self.finished = true;
                Ok(Some(term(&m)?))
            }
            _ => Err(Problem::Exhausted),
        }
    }

    /// The next output term, or `None` when the value has been written out
    pub(super) fn step(&mut self) -> Result<Option<i64>, Problem> {
        if self.finished {
            return Ok(None);
        }
        loop {
            if self.primed() {
                if self.corners().iter().all(|&(_, d)| self.k[d].is_zero()) {
                    self.finished = true;
                    return Ok(None);
                }
                if let Some(t) = self.egestable() {
                    log::trace!("egest {t} after {} reads", self.streak);
                    self.egest(&t);
                    self.streak = 0;
                    return term(&t).map(Some);
                }
            }
            if self.bounded && self.streak >= MAX_STREAK {
                return self.stalled();
            }
            let input = self.choose();
            self.ingest(input);
            self.streak += 1;
        }
    }
}

impl Iterator for Gosper {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        match self.step() {
            Ok(t) => t,
            Err(problem) => {
                log::warn!("continued fraction stream cut short: {problem}");
                self.finished = true;
                None
            }
        }
    }
}

impl ContinuedFraction {
    /// Sum, by Gosper's algorithm
    ///
    /// Finite fractions give an exact finite result. Otherwise the result is
    /// computed lazily, and if the algorithm can't make progress the values
    /// are added as decimals instead, giving a [`Real`](crate::Real).
    ///
    /// # Example
    ///
    /// ```
    /// use rungs::{ContinuedFraction, Numeric, Rational};
    /// let half = ContinuedFraction::new(vec![0, 2]).unwrap();
    /// let third = ContinuedFraction::new(vec![0, 3]).unwrap();
    /// let Numeric::ContinuedFraction(sum) = half.add(&third).unwrap() else { panic!() };
    /// assert_eq!(sum.to_rational().unwrap(), Rational::fraction(5, 6).unwrap());
    /// ```
    pub fn add(&self, other: &Self) -> Result<Numeric, Problem> {
        self.combine(Op::Add, other)
    }

    pub fn subtract(&self, other: &Self) -> Result<Numeric, Problem> {
        self.combine(Op::Subtract, other)
    }

    pub fn multiply(&self, other: &Self) -> Result<Numeric, Problem> {
        self.combine(Op::Multiply, other)
    }

    pub fn divide(&self, other: &Self) -> Result<Numeric, Problem> {
        self.combine(Op::Divide, other)
    }

    pub(crate) fn combine(&self, op: Op, other: &Self) -> Result<Numeric, Problem> {
        if op == Op::Divide && other.is_zero() {
            return Err(Problem::DivideByZero);
        }
        if self.is_finite() && other.is_finite() {
            return Ok(exact(op, self, other)?.into());
        }
        match self.lazy(op, other) {
            Ok(cf) => Ok(cf.into()),
            Err(Problem::DivideByZero) => Err(Problem::DivideByZero),
            Err(problem) => self.fallback(op, other, problem),
        }
    }

    fn lazy(&self, op: Op, other: &Self) -> Result<Self, Problem> {
        // A product of non-negative values can't be negative
        let impossible =
            |t: i64| op == Op::Multiply && !self.is_negative() && !other.is_negative() && t < 0;
        let mut gosper = Gosper::new(op, self.clone(), other.clone());
        let mut terms = Vec::with_capacity(PRIME);
        while terms.len() < PRIME {
            match gosper.step()? {
                Some(t) if terms.is_empty() && impossible(t) => return Err(Problem::Exhausted),
                Some(t) => terms.push(t),
                None if terms.is_empty() => return Err(Problem::DivideByZero),
                None if self.is_exact() && other.is_exact() => return Self::new(terms),
                None => return Self::approximation(terms),
            }
        }
        let cache = TermCache {
            seen: Vec::new(),
            source: Box::new(gosper),
            done: false,
        };
        let tail = Tail {
            source: Source::Cached(Arc::new(Mutex::new(cache))),
            offset: 0,
        };
        Self::build(terms, None, Some(tail))
    }

    fn fallback(&self, op: Op, other: &Self, problem: Problem) -> Result<Numeric, Problem> {
        log::warn!("continued fraction {op:?} failed ({problem}), using decimals");
        let ctx = MathContext::DECIMAL128;
        let (x, y) = (self.to_real(ctx)?, other.to_real(ctx)?);
        let value = match op {
            Op::Add => x + y,
            Op::Subtract => x - y,
            Op::Multiply => x * y,
            Op::Divide => (x / y)?,
        };
        Ok(Numeric::Real(value))
    }
}

/// Combine two finite fractions, which always runs to completion
pub(super) fn exact(op: Op, x: &ContinuedFraction, y: &ContinuedFraction) -> Result<ContinuedFraction, Problem> {
    if op == Op::Divide && y.is_zero() {
        return Err(Problem::DivideByZero);
    }
    let mut gosper = Gosper::new(op, x.clone(), y.clone());
    let mut terms = Vec::new();
    while let Some(t) = gosper.step()? {
        terms.push(t);
    }
    ContinuedFraction::new(terms)
}

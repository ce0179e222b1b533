use super::Constant;
use crate::{Decimal, MathContext, Problem, Rational, Real};
use num::BigInt;
use std::collections::HashMap;

/// Bailey-Borwein-Plouffe partial sums of π
///
/// π = Σ 16⁻ᵏ (4/(8k+1) − 2/(8k+4) − 1/(8k+5) − 1/(8k+6)), summed exactly.
/// The partial sum is kept so a request for more digits continues from the
/// last term instead of starting again.
#[derive(Debug)]
pub(super) struct Bbp {
    sum: Rational,
    terms: u64,
    values: HashMap<MathContext, Real>,
}

impl Default for Bbp {
    fn default() -> Self {
        Self {
            sum: Rational::zero(),
            terms: 0,
            values: HashMap::new(),
        }
    }
}

fn term(k: u64) -> Result<Rational, Problem> {
    let k = BigInt::from(k);
    let a = &k * 8 + 1;
    let b = &k * 8 + 4;
    let c = &k * 8 + 5;
    let d = &k * 8 + 6;
    let numerator = 4 * &b * &c * &d - 2 * &a * &c * &d - &a * &b * &d - &a * &b * &c;
    let scale = BigInt::from(16).pow(k.try_into().map_err(|_| Problem::Exhausted)?);
    Rational::from_bigints(numerator, a * b * c * d * scale)
}

impl Bbp {
    // Each term contributes a little over 1.2 digits
    fn terms_for(places: u32) -> u64 {
        (places as u64 + 3) * 5 / 6 + 2
    }

    #[cfg(test)]
    pub(super) fn terms(&self) -> u64 {
        self.terms
    }

    fn extend(&mut self, wanted: u64) -> Result<(), Problem> {
        for k in self.terms..wanted {
            let sum = std::mem::replace(&mut self.sum, Rational::zero());
            self.sum = (sum + term(k)?).reduce();
        }
        self.terms = self.terms.max(wanted);
        Ok(())
    }

    /// π rounded to `ctx.precision()` places after the decimal point
    pub(super) fn value(&mut self, ctx: MathContext) -> Result<Real, Problem> {
        if let Some(value) = self.values.get(&ctx) {
            return Ok(value.clone());
        }
        log::debug!("computing π to {} places", ctx.precision());
        self.extend(Self::terms_for(ctx.precision()))?;
        let places = MathContext::new(ctx.precision() + 1, ctx.rounding());
        let (n, d) = self.sum.to_bigint_fraction();
        let (digits, _) = Decimal::from_ratio(&n, &d, places)?;
        let value = Real::constant(digits, Constant::Pi, ctx);
        self.values.insert(ctx, value.clone());
        Ok(value)
    }

    pub(super) fn clear(&mut self) {
        *self = Self::default();
    }
}

use crate::{Decimal, MathContext, Problem};

/// e by Brothers' series, Σ (2k + 2) / (2k + 1)!
///
/// Each term carries two terms of the Taylor series, so roughly half as
/// many terms are needed.
pub(super) fn compute(ctx: MathContext) -> Result<Decimal, Problem> {
    let work = ctx.widen(4);
    let most = 4 * work.precision() as i64 + 20;
    // 1 / (2k + 1)!
    let mut reciprocal = Decimal::one();
    let mut sum = Decimal::from_i64(2);
    for k in 1..=most {
        let step = Decimal::from_i64((2 * k) * (2 * k + 1));
        reciprocal = reciprocal.div(&step, work)?.0;
        let term = &reciprocal * &Decimal::from_i64(2 * k + 2);
        if term.is_zero() || term.magnitude_exponent() < -(work.precision() as i64) {
            return Ok(sum.round(ctx)?.0);
        }
        sum = &sum + &term;
    }
    log::warn!("e series gave up after {most} terms");
    Ok(sum.round(ctx)?.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn few_digits() {
        let e = compute(MathContext::with_precision(8)).unwrap();
        assert_eq!(e.to_string(), "2.7182818");
    }
}

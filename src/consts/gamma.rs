use crate::decimal::math;
use crate::{Decimal, MathContext, Problem};

// Solve α(ln α − 1) = 1, about 3.5911
fn alpha() -> f64 {
    let mut a = 3.6_f64;
    for _ in 0..20 {
        let f = a * (a.ln() - 1.0) - 1.0;
        a -= f / a.ln();
    }
    a
}

/// The Euler-Mascheroni constant by Sweeney's method
///
/// γ = Σₖ₌₁ᵐ (−1)ᵏ⁺¹ nᵏ / (k · k!) − ln n, dropping a remainder below e⁻ⁿ.
/// Choosing n just above `digits · ln 10` makes that remainder invisible,
/// and m = ⌈αn⌉ makes the truncated series tail invisible too. The terms
/// grow to about eⁿ before they shrink, so the sum is carried at twice the
/// digits.
pub(super) fn compute(ctx: MathContext) -> Result<Decimal, Problem> {
    let digits = ctx.precision() + 2;
    let n = (digits as f64 * std::f64::consts::LN_10).ceil() as i64 + 1;
    let m = (alpha() * n as f64).ceil() as i64;
    let work = MathContext::new(2 * digits + 10, ctx.rounding());
    let big_n = Decimal::from_i64(n);
    let mut power = Decimal::one();
    let mut sum = Decimal::zero();
    for k in 1..=m {
        let divisor = Decimal::from_i64(k);
        // power = nᵏ / k!
        power = (&power * &big_n).div(&divisor, work)?.0;
        let term = power.div(&divisor, work)?.0;
        sum = if k % 2 == 1 { &sum + &term } else { &sum - &term };
    }
    let gamma = &sum - &math::ln(&big_n, work)?;
    Ok(gamma.round(ctx)?.0)
}

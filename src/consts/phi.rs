use crate::decimal::math;
use crate::{Decimal, MathContext, Problem};
use num::BigInt;

/// φ = (1 + √5) / 2
pub(super) fn compute(ctx: MathContext) -> Result<Decimal, Problem> {
    let (root, _) = math::sqrt(&Decimal::from_i64(5), ctx.widen(2))?;
    let half = Decimal::new(BigInt::from(5), 1);
    let phi = &(&Decimal::one() + &root) * &half;
    Ok(phi.round(ctx)?.0)
}

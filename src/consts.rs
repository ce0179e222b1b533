//! The irrational constants π, e, φ and γ
//!
//! Each constant is computed by its own series the first time a precision
//! is asked for and memoised per [`MathContext`]. Creation happens under the
//! cache's lock, so concurrent first requests compute the value once.

use crate::{Decimal, MathContext, Problem, Real, RoundingMode};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::LazyLock;

mod e;
mod gamma;
mod phi;
mod pi;

/// A named irrational constant
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Constant {
    /// The ratio of circumference to diameter
    Pi,
    /// The base of the natural logarithm
    E,
    /// The golden ratio
    Phi,
    /// The Euler-Mascheroni constant
    Gamma,
}

impl Constant {
    pub fn symbol(&self) -> &'static str {
        match self {
            Constant::Pi => "π",
            Constant::E => "e",
            Constant::Phi => "φ",
            Constant::Gamma => "γ",
        }
    }
}

use core::fmt;

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.symbol())
    }
}

type Memo = Mutex<HashMap<MathContext, Real>>;

/// Cache of computed constants, keyed by precision context
///
/// Most code wants [`Consts::shared`], the [`Real`] constructors such as
/// [`Real::pi`] use it. A private instance is useful to control memory or
/// to measure the cost of computing a constant.
///
/// # Example
///
/// ```
/// use rungs::{Consts, MathContext};
/// let consts = Consts::new();
/// let pi = consts.pi(MathContext::with_precision(20)).unwrap();
/// assert!(pi.to_string().starts_with("3.1415926535897932384"));
/// consts.clear();
/// ```
#[derive(Debug, Default)]
pub struct Consts {
    pi: Mutex<pi::Bbp>,
    e: Memo,
    phi: Memo,
    gamma: Memo,
}

static SHARED: LazyLock<Consts> = LazyLock::new(Consts::new);

// Constants always need a bound, and can't be computed without rounding
fn working(ctx: MathContext) -> MathContext {
    let ctx = ctx.bounded();
    if ctx.rounding() == RoundingMode::Unnecessary {
        MathContext::with_precision(ctx.precision())
    } else {
        ctx
    }
}

fn memo(
    cache: &Memo,
    constant: Constant,
    ctx: MathContext,
    compute: fn(MathContext) -> Result<Decimal, Problem>,
) -> Result<Real, Problem> {
    let ctx = working(ctx);
    let mut values = cache.lock();
    if let Some(value) = values.get(&ctx) {
        return Ok(value.clone());
    }
    log::debug!("computing {constant} to {} digits", ctx.precision());
    let value = Real::constant(compute(ctx)?, constant, ctx);
    values.insert(ctx, value.clone());
    Ok(value)
}

impl Consts {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache
    pub fn shared() -> &'static Consts {
        &SHARED
    }

    /// Forget every computed value
    pub fn clear(&self) {
        self.pi.lock().clear();
        self.e.lock().clear();
        self.phi.lock().clear();
        self.gamma.lock().clear();
    }

    /// π with `ctx.precision()` digits after the decimal point
    pub fn pi(&self, ctx: MathContext) -> Result<Real, Problem> {
        self.pi.lock().value(working(ctx))
    }

    pub fn e(&self, ctx: MathContext) -> Result<Real, Problem> {
        memo(&self.e, Constant::E, ctx, e::compute)
    }

    pub fn phi(&self, ctx: MathContext) -> Result<Real, Problem> {
        memo(&self.phi, Constant::Phi, ctx, phi::compute)
    }

    pub fn gamma(&self, ctx: MathContext) -> Result<Real, Problem> {
        memo(&self.gamma, Constant::Gamma, ctx, gamma::compute)
    }

    /// The constant named by `constant`
    pub fn get(&self, constant: Constant, ctx: MathContext) -> Result<Real, Problem> {
        match constant {
            Constant::Pi => self.pi(ctx),
            Constant::E => self.e(ctx),
            Constant::Phi => self.phi(ctx),
            Constant::Gamma => self.gamma(ctx),
        }
    }
}

/// π as a plain decimal, for the trigonometric functions
pub(crate) fn pi_decimal(ctx: MathContext) -> Result<Decimal, Problem> {
    Ok(Consts::shared().pi(ctx)?.value().clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn pi_digits() {
        let consts = Consts::new();
        let pi = consts.pi(MathContext::with_precision(20)).unwrap();
        assert_eq!(pi.to_string(), "3.14159265358979323846");
        assert!(pi.is_irrational());
        assert!(!pi.is_exact());
    }

    #[test]
    fn pi_resumes() {
        let consts = Consts::new();
        let short = consts.pi(MathContext::with_precision(10)).unwrap();
        let terms = consts.pi.lock().terms();
        let long = consts.pi(MathContext::with_precision(60)).unwrap();
        assert!(consts.pi.lock().terms() > terms);
        assert_eq!(short.to_string(), "3.1415926536");
        assert_eq!(
            long.to_string(),
            "3.141592653589793238462643383279502884197169399375105820974945"
        );
    }

    #[test]
    fn e_digits() {
        let e = Consts::new().e(MathContext::with_precision(30)).unwrap();
        assert_eq!(e.to_string(), "2.71828182845904523536028747135");
    }

    #[test]
    fn gamma_digits() {
        let gamma = Consts::new().gamma(MathContext::with_precision(30)).unwrap();
        assert_eq!(gamma.to_string(), "0.577215664901532860606512090082");
    }

    #[test]
    fn phi_digits() {
        let phi = Consts::new().phi(MathContext::with_precision(30)).unwrap();
        assert_eq!(phi.to_string(), "1.61803398874989484820458683437");
    }

    #[test]
    fn memoised() {
        let consts = Consts::new();
        let ctx = MathContext::with_precision(25);
        let first = consts.e(ctx).unwrap();
        assert_eq!(consts.e.lock().len(), 1);
        let again = consts.get(Constant::E, ctx).unwrap();
        assert_eq!(first, again);
        consts.clear();
        assert!(consts.e.lock().is_empty());
    }

    #[test]
    fn unlimited_is_bounded() {
        let consts = Consts::new();
        let phi = consts.phi(MathContext::UNLIMITED).unwrap();
        assert_eq!(phi.context(), MathContext::DECIMAL128);
        assert_eq!(phi.value().digits(), 34);
    }

    #[test]
    fn concurrent_first_use() {
        let consts = Consts::new();
        let ctx = MathContext::with_precision(40);
        let values: Vec<Real> = thread::scope(|s| {
            let handles: Vec<_> = (0..4).map(|_| s.spawn(|| consts.gamma(ctx).unwrap())).collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert!(values.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(consts.gamma.lock().len(), 1);
    }
}

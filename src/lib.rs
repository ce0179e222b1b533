mod problem;
pub use crate::problem::{Problem, ProblemKind};

mod context;
pub use crate::context::{MathContext, RoundingMode};

mod config;
pub use crate::config::{Config, ConfigGuard, PeriodStyle, RationalEquality};

mod decimal;
pub use crate::decimal::math as decimal_math;
pub use crate::decimal::Decimal;

mod integer;
pub use crate::integer::Integer;

mod rational;
pub use crate::rational::Rational;

mod real;
pub use crate::real::{Origin, Real};

mod complex;
pub use crate::complex::{normalize_argument, roots_of_unity, Complex, ComplexPolar, ComplexRect};

mod continued_fraction;
pub use crate::continued_fraction::{ContinuedFraction, Convergents};

mod consts;
pub use crate::consts::{Constant, Consts};

mod special;
pub use crate::special::Special;

mod numeric;
pub use crate::numeric::{Coercible, Numeric, Rung};

use crate::{Complex, ComplexPolar, MathContext, Problem, Real};
use regex::Regex;
use std::sync::LazyLock;

static RECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([+\-−]?\d+\.?\d*)\s*([+\-−])\s*(\d+\.?\d*)?\s?i\s*$")
        .expect("rectangular pattern is valid")
});

static IMAGINARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([+\-−]?)(\d+\.?\d*)?\s?i\s*$").expect("imaginary pattern is valid")
});

static POLAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([+\-−]?\d+\.?\d*)\s*@\s*([+\-−]?\d+\.?\d*)\s*(°)?\s*$")
        .expect("polar pattern is valid")
});

// Parse one component, allowing a trailing decimal point and the minus glyph
fn part(text: &str) -> Result<Real, Problem> {
    let text = text.replace('−', "-");
    let text = text.strip_suffix('.').unwrap_or(&text);
    text.parse().map_err(|_| Problem::BadComplex)
}

fn negative(sign: &str) -> bool {
    sign == "-" || sign == "−"
}

fn degrees(angle: Real) -> Result<Real, Problem> {
    if angle.is_zero() {
        return Ok(angle);
    }
    let pi = Real::pi(MathContext::DECIMAL128)?;
    (angle * pi) / Real::from(180)
}

impl std::str::FromStr for Complex {
    type Err = Problem;

    /// Rectangular `a + bi`, `a - bi` or `bi`, or polar `m @ θ` with θ in
    /// radians, or in degrees when followed by `°`
    fn from_str(s: &str) -> Result<Self, Problem> {
        if let Some(caps) = RECT.captures(s) {
            let re = part(&caps[1])?;
            let im = caps.get(3).map_or(Ok(Real::one()), |m| part(m.as_str()))?;
            let im = if negative(&caps[2]) { -im } else { im };
            return Ok(Complex::new(re, im));
        }
        if let Some(caps) = IMAGINARY.captures(s) {
            let im = caps.get(2).map_or(Ok(Real::one()), |m| part(m.as_str()))?;
            let im = if negative(&caps[1]) { -im } else { im };
            return Ok(Complex::new(Real::zero(), im));
        }
        if let Some(caps) = POLAR.captures(s) {
            let modulus = part(&caps[1])?;
            let argument = part(&caps[2])?;
            let argument = match caps.get(3) {
                Some(_) => degrees(argument)?,
                None => argument,
            };
            return Ok(Complex::Polar(ComplexPolar::new(modulus, argument)?));
        }
        Err(Problem::BadComplex)
    }
}

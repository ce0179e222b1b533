use std::cell::Cell;

/// How [`Rational`](crate::Rational) equality is decided by
/// [`Rational::equals`](crate::Rational::equals)
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum RationalEquality {
    /// Reduce both sides then compare, i.e. numeric equality
    #[default]
    Reduced,
    /// Compare the stored terms, so 2/4 is not 1/2
    Terms,
}

/// How the periodic tail of a [`ContinuedFraction`](crate::ContinuedFraction) is rendered
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PeriodStyle {
    /// A combining overline over each repeating term, `[1; 2̅]`
    #[default]
    Overline,
    /// Angle brackets around the repeating terms, `[1; ⟨2⟩]`
    AngleBrackets,
}

/// Behaviour switches for the tower
///
/// The active configuration is per thread, install one with [`Config::install`]
///
/// # Example
///
/// ```
/// use rungs::Config;
/// assert!(!Config::current().extended_complex);
/// {
///     let _guard = Config::default().extended(true).install();
///     assert!(Config::current().extended_complex);
/// }
/// assert!(!Config::current().extended_complex);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Admit the point at infinity as an operand and result
    pub extended_complex: bool,
    /// Default mode for [`Rational::equals`](crate::Rational::equals)
    pub rational_equality: RationalEquality,
    /// Rendering of periodic continued fractions
    pub period_style: PeriodStyle,
    /// How many terms of an infinite continued fraction are displayed
    pub display_terms: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extended_complex: false,
            rational_equality: RationalEquality::Reduced,
            period_style: PeriodStyle::Overline,
            display_terms: 20,
        }
    }
}

thread_local! {
    static CURRENT: Cell<Config> = Cell::new(Config::default());
}

impl Config {
    pub fn extended(self, extended_complex: bool) -> Self {
        Self {
            extended_complex,
            ..self
        }
    }

    pub fn rational_equality(self, rational_equality: RationalEquality) -> Self {
        Self {
            rational_equality,
            ..self
        }
    }

    pub fn period_style(self, period_style: PeriodStyle) -> Self {
        Self {
            period_style,
            ..self
        }
    }

    /// The configuration active on this thread
    pub fn current() -> Config {
        CURRENT.with(Cell::get)
    }

    /// Make this the active configuration until the guard is dropped
    #[must_use = "the configuration is restored when the guard is dropped"]
    pub fn install(self) -> ConfigGuard {
        let previous = CURRENT.with(|c| c.replace(self));
        ConfigGuard { previous }
    }
}

/// Restores the previously active [`Config`] when dropped
#[derive(Debug)]
pub struct ConfigGuard {
    previous: Config,
}

impl Drop for ConfigGuard {
    fn drop(&mut self) {
        CURRENT.with(|c| c.set(self.previous));
    }
}

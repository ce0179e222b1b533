use super::ContinuedFraction;
use crate::config::{Config, PeriodStyle};
use crate::Problem;
use core::fmt;
use regex::Regex;
use std::sync::LazyLock;

static BRACKETS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\[(.*)\]\s*$").expect("bracket pattern is valid"));

const OVERLINE: char = '\u{305}';

// Each digit followed by U+0305 COMBINING OVERLINE
fn overline(term: i64) -> String {
    term.to_string().chars().flat_map(|c| [c, OVERLINE]).collect()
}

fn join(terms: &[i64]) -> String {
    terms.iter().map(i64::to_string).collect::<Vec<_>>().join(", ")
}

impl fmt::Display for ContinuedFraction {
    /// `[a₀; a₁, a₂]`, with a periodic tail overlined or, for `{:#}` or
    /// [`PeriodStyle::AngleBrackets`], in angle brackets. Generated
    /// fractions show [`Config::display_terms`] terms and then `…`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = Config::current();
        // A period starting at the very first term is shown after it
        let cf = match self.repeat_from {
            Some(0) => self.unroll(self.terms.len() + 1),
            _ => self.clone(),
        };
        let (prefix, period) = match cf.repeat_from {
            Some(start) => cf.terms.split_at(start),
            None if cf.tail.is_some() => {
                let shown = cf.terms(config.display_terms.max(1));
                let text = bracketed(&shown, &[], false);
                let open = &text[..text.len() - 1];
                return match cf.term_at(shown.len()) {
                    Some(_) if shown.len() == 1 => f.pad(&format!("{open}; …]")),
                    Some(_) => f.pad(&format!("{open}, …]")),
                    None => f.pad(&text),
                };
            }
            None => (&cf.terms[..], &[][..]),
        };
        let angles = f.alternate() || config.period_style == PeriodStyle::AngleBrackets;
        f.pad(&bracketed(prefix, period, angles))
    }
}

fn bracketed(prefix: &[i64], period: &[i64], angles: bool) -> String {
    let mut rest = Vec::new();
    if prefix.len() > 1 {
        rest.push(join(&prefix[1..]));
    }
    if !period.is_empty() {
        if angles {
            rest.push(format!("⟨{}⟩", join(period)));
        } else {
            let marked: Vec<String> = period.iter().map(|&t| overline(t)).collect();
            rest.push(marked.join(", "));
        }
    }
    match (prefix.first(), rest.is_empty()) {
        (Some(first), true) => format!("[{first}]"),
        (Some(first), false) => format!("[{first}; {}]", rest.join(", ")),
        (None, _) => format!("[{}]", rest.join(", ")),
    }
}

impl std::str::FromStr for ContinuedFraction {
    type Err = Problem;

    /// `[a₀; a₁, a₂, …]` with `^` before the first repeating term, if any
    ///
    /// Periods written the way [`Display`](fmt::Display) writes them, either
    /// overlined or in angle brackets, are read back too.
    ///
    /// # Example
    ///
    /// ```
    /// use rungs::ContinuedFraction;
    /// let root_three: ContinuedFraction = "[1; ^1, 2]".parse().unwrap();
    /// assert_eq!(root_three.terms(7), vec![1, 1, 2, 1, 2, 1, 2]);
    /// let angled: ContinuedFraction = "[1; ⟨1, 2⟩]".parse().unwrap();
    /// assert_eq!(root_three, angled);
    /// ```
    fn from_str(s: &str) -> Result<Self, Problem> {
        let caps = BRACKETS.captures(s).ok_or(Problem::BadContinuedFraction)?;
        let inner = caps[1].replace('−', "-");
        let mut terms = Vec::new();
        let mut repeat_from = None;
        // '^', '⟨' or the overline, whichever marks the period
        let mut marker = None;
        let mut closed = false;
        for (i, item) in inner.split([';', ',']).enumerate() {
            if closed {
                return Err(Problem::BadContinuedFraction);
            }
            let mut item = item.trim();
            if let Some(rest) = item.strip_prefix(['^', '⟨']) {
                if marker.is_some() {
                    return Err(Problem::BadContinuedFraction);
                }
                marker = item.chars().next();
                repeat_from = Some(i);
                item = rest.trim_start();
            }
            if marker == Some('⟨') {
                if let Some(rest) = item.strip_suffix('⟩') {
                    item = rest.trim_end();
                    closed = true;
                }
            }
            let digits: String = item.chars().filter(|&c| c != OVERLINE).collect();
            match (digits.len() != item.len(), marker) {
                (true, None) => {
                    marker = Some(OVERLINE);
                    repeat_from = Some(i);
                }
                (true, Some(OVERLINE)) | (false, None | Some('^' | '⟨')) => (),
                _ => return Err(Problem::BadContinuedFraction),
            }
            terms.push(digits.parse::<i64>().map_err(|_| Problem::BadContinuedFraction)?);
        }
        if marker == Some('⟨') && !closed {
            return Err(Problem::BadContinuedFraction);
        }
        match repeat_from {
            Some(start) => Self::periodic(terms, start),
            None => Self::new(terms),
        }
    }
}

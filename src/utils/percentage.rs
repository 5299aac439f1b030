use std::{fmt::Display, ops::Deref, str::FromStr};

use anyhow::anyhow;

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Percentage(f64);

impl Display for Percentage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}%", self.0)
    }
}

impl Percentage {
    pub const ZERO: Percentage = Percentage(0.);
    pub const FULL: Percentage = Percentage(100.);

    pub fn new_opt(value: f64) -> Option<Percentage> {
        if value.is_nan() || value < 0. {
            None
        } else {
            Some(Percentage(value))
        }
    }

    /// Value rounded to `decimals` places. Used for display and comparisons in reports.
    pub fn rounded(&self, decimals: i32) -> f64 {
        let factor = 10f64.powi(decimals);
        (self.0 * factor).round() / factor
    }

    /// Share of `whole` this percentage represents, e.g. 60% of 45 is 27.
    pub fn of(&self, whole: usize) -> f64 {
        whole as f64 * self.0 / 100.
    }
}

impl FromStr for Percentage {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // This means that 100%% also works, but I think I'm fine with that
        let s = s.trim_end_matches("%");
        let v = s.parse::<f64>()?;
        Percentage::new_opt(v)
            .filter(|v| *v <= Percentage::FULL)
            .ok_or_else(|| anyhow!("Can't parse {s} into percentage"))
    }
}

impl Deref for Percentage {
    type Target = f64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Returns `part` out of `whole` as a percentage. An empty `whole` gives 0 and the result never
/// goes above 100.
pub fn count_percentage(part: usize, whole: usize) -> Percentage {
    if whole == 0 {
        return Percentage::ZERO;
    }
    let value = part as f64 / whole as f64 * 100.;
    Percentage(value.min(100.))
}

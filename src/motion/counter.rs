use std::{str::FromStr, time::Duration};

use thiserror::Error;

/// Gap between neighbouring stat counters.
pub const STAT_STAGGER: Duration = Duration::from_millis(200);
/// Labels follow their number by this much.
pub const LABEL_LAG: Duration = Duration::from_millis(300);

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CountUpError {
    #[error("stat value has no digits: {0}")]
    NoDigits(String),
    #[error("stat value is too large: {0}")]
    Overflow(String),
}

/// A stat such as `"50+"` split so the number can be counted up from zero.
#[derive(Debug, Clone, PartialEq)]
pub struct CountUp {
    raw: String,
    prefix: String,
    target: u64,
    suffix: String,
}

impl FromStr for CountUp {
    type Err = CountUpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let start = s
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(|| CountUpError::NoDigits(s.to_string()))?;
        let end = s[start..]
            .find(|c: char| !c.is_ascii_digit())
            .map_or(s.len(), |i| start + i);
        let target = s[start..end]
            .parse::<u64>()
            .map_err(|_| CountUpError::Overflow(s.to_string()))?;
        Ok(Self {
            raw: s.to_string(),
            prefix: s[..start].to_string(),
            target,
            suffix: s[end..].to_string(),
        })
    }
}

impl CountUp {
    pub fn target(&self) -> u64 {
        self.target
    }

    /// Text at `progress` in `0.0..=1.0`; at 1.0 this is the original value.
    pub fn frame(&self, progress: f64) -> String {
        if progress >= 1.0 {
            return self.raw.clone();
        }
        let n = (self.target as f64 * progress.max(0.0)).round() as u64;
        format!("{}{}{}", self.prefix, n.min(self.target), self.suffix)
    }
}

/// Start delay of the stat at `index`.
pub fn stat_delay(index: usize) -> Duration {
    STAT_STAGGER * index as u32
}

use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, fmt, str::FromStr};

use crate::assets::{FILL_BASE_DIR, LINE_BASE_DIR};

/// Weather condition identifier from the provider vocabulary (e.g. 1000 = "Sunny").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConditionCode(pub u32);

impl ConditionCode {
    /// Canonical "clear/sunny" code used when input can't be read as a code.
    pub const CLEAR: ConditionCode = ConditionCode(1000);

    pub const fn new(code: u32) -> Self {
        Self(code)
    }

    pub const fn get(self) -> u32 {
        self.0
    }

    /// Normalize loosely-typed numeric input into a code.
    ///
    /// Missing, non-finite, negative or out-of-range values become [`ConditionCode::CLEAR`].
    /// Fractional values are truncated. A well-formed code that the icon table doesn't know
    /// is kept as-is, so it resolves to the default asset later on.
    pub fn normalize(raw: Option<f64>) -> Self {
        match raw {
            Some(v) if v.is_finite() && v >= 0.0 && v.trunc() <= f64::from(u32::MAX) => {
                Self(v.trunc() as u32)
            }
            _ => Self::CLEAR,
        }
    }
}

impl Default for ConditionCode {
    fn default() -> Self {
        Self::CLEAR
    }
}

impl From<u32> for ConditionCode {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<i32> for ConditionCode {
    fn from(value: i32) -> Self {
        Self::normalize(Some(f64::from(value)))
    }
}

impl fmt::Display for ConditionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    #[default]
    Day,
    Night,
}

impl TimeOfDay {
    /// Normalize a 0/1 day indicator. Only an exact `0` means night; anything else,
    /// including a missing value, is treated as day.
    pub fn normalize(raw: Option<f64>) -> Self {
        match raw {
            Some(v) if v == 0.0 => TimeOfDay::Night,
            _ => TimeOfDay::Day,
        }
    }

    pub fn is_day(self) -> bool {
        self == TimeOfDay::Day
    }

    pub fn opposite(self) -> Self {
        match self {
            TimeOfDay::Day => TimeOfDay::Night,
            TimeOfDay::Night => TimeOfDay::Day,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::Day => "day",
            TimeOfDay::Night => "night",
        }
    }
}

impl From<bool> for TimeOfDay {
    fn from(is_day: bool) -> Self {
        if is_day { TimeOfDay::Day } else { TimeOfDay::Night }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Icon art style. Each variation lives under its own base directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variation {
    #[default]
    Fill,
    Line,
}

impl Variation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variation::Fill => "fill",
            Variation::Line => "line",
        }
    }

    pub fn base_dir(&self) -> &'static str {
        match self {
            Variation::Fill => FILL_BASE_DIR,
            Variation::Line => LINE_BASE_DIR,
        }
    }

    pub const fn all() -> &'static [Variation] {
        &[Variation::Fill, Variation::Line]
    }
}

impl fmt::Display for Variation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Variation {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.trim().to_lowercase();

        match lower.as_str() {
            "fill" => Ok(Variation::Fill),
            "line" => Ok(Variation::Line),
            _ => Err(anyhow::anyhow!("Unknown variation '{value}'. Supported variations: fill, line.")),
        }
    }
}

impl FromStr for Variation {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variation::try_from(s)
    }
}

//! Unit formatting utilities
//!
//! Real-world lengths are entered and displayed in feet with one decimal.
//! Pixel lengths are converted through a pixels-per-foot scale factor.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Real-world length unit used for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    /// Feet (the only unit the calibration prompt accepts)
    #[default]
    Feet,
}

impl LengthUnit {
    /// Suffix appended to a formatted value
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Feet => "'",
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Feet => write!(f, "ft"),
        }
    }
}

impl FromStr for LengthUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ft" | "feet" | "foot" | "'" => Ok(Self::Feet),
            _ => Err(format!("Unknown length unit: {}", s)),
        }
    }
}

/// Convert a pixel length to feet.
pub fn pixels_to_feet(pixels: f64, px_per_ft: f64) -> f64 {
    pixels / px_per_ft
}

/// Convert feet to a pixel length.
pub fn feet_to_pixels(feet: f64, px_per_ft: f64) -> f64 {
    feet * px_per_ft
}

/// Round a value to one decimal place
pub fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Format a length in feet for display, e.g. `12.5'`
pub fn format_feet(feet: f64) -> String {
    format!("{:.1}{}", feet, LengthUnit::Feet.suffix())
}

/// Parse operator text as a length in feet.
///
/// Accepts surrounding whitespace and an optional trailing `'`, `ft` or
/// `feet`. Returns `None` for empty or non-numeric input; sign and
/// magnitude checks are left to the caller.
pub fn parse_feet(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    let number = trimmed
        .strip_suffix("feet")
        .or_else(|| trimmed.strip_suffix("ft"))
        .or_else(|| trimmed.strip_suffix('\''))
        .unwrap_or(trimmed)
        .trim();

    if number.is_empty() {
        return None;
    }

    number.parse::<f64>().ok().filter(|v| v.is_finite())
}

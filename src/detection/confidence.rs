use serde::{Deserialize, Serialize};
use std::fmt;

/// Lower bound of the `moderate` tier; anything below is unreliable
pub const MODERATE_THRESHOLD: f64 = 0.45;
pub const HIGH_THRESHOLD: f64 = 0.65;
pub const VERY_HIGH_THRESHOLD: f64 = 0.80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    Unreliable,
    Moderate,
    High,
    VeryHigh,
}

impl ConfidenceLevel {
    /// Tiers are closed on the lower bound and open on the upper one
    pub fn classify(score: f64) -> Self {
        if score >= VERY_HIGH_THRESHOLD {
            ConfidenceLevel::VeryHigh
        } else if score >= HIGH_THRESHOLD {
            ConfidenceLevel::High
        } else if score >= MODERATE_THRESHOLD {
            ConfidenceLevel::Moderate
        } else {
            ConfidenceLevel::Unreliable
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceLevel::Unreliable => "unreliable",
            ConfidenceLevel::Moderate => "moderate",
            ConfidenceLevel::High => "high",
            ConfidenceLevel::VeryHigh => "very_high",
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

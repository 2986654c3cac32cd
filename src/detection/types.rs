//! Core data types for platform detection
//!
//! This module defines the evidence model (`Signal`), the per-platform outcome
//! (`PlatformCandidate`) and the per-request outcome (`DetectionResult`). The
//! result types serialize to the JSON contract consumed by downstream
//! build-file generators.

use super::confidence::ConfidenceLevel;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Evidence categories, each worth a fixed share of the confidence score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalCategory {
    PrimaryFile,
    SecondaryFile,
    Structure,
    ConfigFile,
    FrameworkMatch,
    ContentMatch,
}

impl SignalCategory {
    pub const ALL: [SignalCategory; 6] = [
        SignalCategory::PrimaryFile,
        SignalCategory::SecondaryFile,
        SignalCategory::Structure,
        SignalCategory::ConfigFile,
        SignalCategory::FrameworkMatch,
        SignalCategory::ContentMatch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SignalCategory::PrimaryFile => "primary_file",
            SignalCategory::SecondaryFile => "secondary_file",
            SignalCategory::Structure => "structure",
            SignalCategory::ConfigFile => "config_file",
            SignalCategory::FrameworkMatch => "framework_match",
            SignalCategory::ContentMatch => "content_match",
        }
    }
}

impl fmt::Display for SignalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One piece of evidence produced by a detector run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub category: SignalCategory,
    /// Share of the total score this signal's category is worth
    pub weight_fraction: f64,
    /// Tree path that triggered the signal
    pub evidence: String,
}

impl Signal {
    pub fn new(category: SignalCategory, weight_fraction: f64, evidence: impl Into<String>) -> Self {
        Self {
            category,
            weight_fraction,
            evidence: evidence.into(),
        }
    }
}

/// A platform the tree plausibly represents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformCandidate {
    /// Platform display name (e.g., "Java", "Node.js")
    #[serde(rename = "primary_language")]
    pub platform: String,

    pub framework: Option<String>,

    pub build_tool: Option<String>,

    pub build_required: bool,

    pub build_command: Option<String>,

    pub install_command: Option<String>,

    /// Confidence score in [0.0, 1.0]
    pub confidence_score: f64,

    pub confidence_level: ConfidenceLevel,

    /// Tree paths that contributed evidence, sorted and deduplicated
    pub detected_files: Vec<String>,
}

/// Ranked outcome of one detection request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub detections: Vec<PlatformCandidate>,
    pub primary: Option<PlatformCandidate>,
    pub min_confidence_threshold: f64,
}

impl DetectionResult {
    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }

    /// Find a detection by platform name, ignoring case
    pub fn get(&self, platform: &str) -> Option<&PlatformCandidate> {
        self.detections
            .iter()
            .find(|d| d.platform.eq_ignore_ascii_case(platform))
    }
}

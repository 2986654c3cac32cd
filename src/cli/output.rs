//! Output formatting for multiple formats
//!
//! Detection results and the platform list can be rendered as JSON, YAML or
//! human-readable text. JSON and YAML follow the serialized result contract.
//!
//! # Example
//!
//! ```no_run
//! use stackprobe::cli::output::{OutputFormat, OutputFormatter};
//! use stackprobe::detection::DetectionEngine;
//! use stackprobe::fs::DirectoryTree;
//!
//! # fn example() -> anyhow::Result<()> {
//! let result = DetectionEngine::new().detect(&DirectoryTree::new("."), 0.0)?;
//! let formatter = OutputFormatter::new(OutputFormat::Json);
//! println!("{}", formatter.format(&result)?);
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use serde::Serialize;

use crate::detection::{DetectionResult, PlatformCandidate};
use crate::platforms::PlatformRegistry;

const RULE: &str = "\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}";

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format
    Yaml,
    /// Human-readable formatted text
    Human,
}

/// One registered platform, as listed by `stackprobe platforms`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PlatformSummary {
    pub id: String,
    pub name: String,
    pub primary_files: Vec<String>,
    pub frameworks: Vec<String>,
    pub build_required: bool,
}

impl PlatformSummary {
    pub fn from_registry(registry: &PlatformRegistry) -> Vec<Self> {
        registry
            .platforms()
            .iter()
            .map(|rules| PlatformSummary {
                id: rules.id.clone(),
                name: rules.name.clone(),
                primary_files: rules.primary_files.iter().map(|p| p.to_string()).collect(),
                frameworks: rules.frameworks.iter().map(|f| f.name.clone()).collect(),
                build_required: rules.build_required,
            })
            .collect()
    }
}

/// Output formatter for detection results
pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    /// Creates a new output formatter with the specified format
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a detection result according to the configured format
    pub fn format(&self, result: &DetectionResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(result)
                .context("Failed to serialize detection result to JSON"),
            OutputFormat::Yaml => {
                serde_yaml::to_string(result).context("Failed to serialize detection result to YAML")
            }
            OutputFormat::Human => Ok(self.format_human(result)),
        }
    }

    /// Formats the list of registered platforms
    pub fn format_platforms(&self, platforms: &[PlatformSummary]) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(platforms)
                .context("Failed to serialize platforms to JSON"),
            OutputFormat::Yaml => {
                serde_yaml::to_string(platforms).context("Failed to serialize platforms to YAML")
            }
            OutputFormat::Human => Ok(self.format_platforms_human(platforms)),
        }
    }

    fn format_human(&self, result: &DetectionResult) -> String {
        let mut output = String::new();

        match &result.primary {
            Some(primary) => {
                output.push_str(&format!("\u{2713} Detected {}\n", primary.platform));
            }
            None => output.push_str("\u{26A0} No platform detected\n"),
        }
        output.push_str(RULE);
        output.push_str("\n\n");

        if result.detections.is_empty() {
            output.push_str(&format!(
                "No candidate reached the minimum confidence of {:.2}.\n",
                result.min_confidence_threshold
            ));
            return output;
        }

        for (i, candidate) in result.detections.iter().enumerate() {
            if i > 0 {
                output.push('\n');
            }
            push_candidate(&mut output, i + 1, candidate);
        }

        output.push_str(&format!(
            "\n{} detection(s) at or above {:.2}\n",
            result.detections.len(),
            result.min_confidence_threshold
        ));
        output
    }

    fn format_platforms_human(&self, platforms: &[PlatformSummary]) -> String {
        let mut output = String::new();
        output.push_str("Supported Platforms\n");
        output.push_str(RULE);
        output.push_str("\n\n");

        for platform in platforms {
            output.push_str(&format!("{} ({})\n", platform.name, platform.id));
            output.push_str(&format!(
                "\u{251C}\u{2500} Primary files: {}\n",
                platform.primary_files.join(", ")
            ));
            if platform.frameworks.is_empty() {
                output.push_str("\u{2514}\u{2500} Frameworks:    (none)\n");
            } else {
                output.push_str(&format!(
                    "\u{2514}\u{2500} Frameworks:    {}\n",
                    platform.frameworks.join(", ")
                ));
            }
        }
        output
    }
}

fn push_candidate(output: &mut String, rank: usize, candidate: &PlatformCandidate) {
    output.push_str(&format!("{}. {}\n", rank, candidate.platform));
    output.push_str(&format!(
        "\u{251C}\u{2500} Framework:   {}\n",
        candidate.framework.as_deref().unwrap_or("(none)")
    ));
    output.push_str(&format!(
        "\u{251C}\u{2500} Build tool:  {}\n",
        candidate.build_tool.as_deref().unwrap_or("(unknown)")
    ));
    output.push_str(&format!(
        "\u{251C}\u{2500} Build:       {}\n",
        match (&candidate.build_command, candidate.build_required) {
            (Some(command), _) => command.as_str(),
            (None, true) => "(required, no command)",
            (None, false) => "(not required)",
        }
    ));
    output.push_str(&format!(
        "\u{251C}\u{2500} Install:     {}\n",
        candidate.install_command.as_deref().unwrap_or("(none)")
    ));

    let filled_blocks = ((candidate.confidence_score * 10.0).round() as usize).min(10);
    let bar = "\u{2588}".repeat(filled_blocks) + &"\u{2591}".repeat(10 - filled_blocks);
    output.push_str(&format!(
        "\u{251C}\u{2500} Confidence:  {} {:.0}% ({})\n",
        bar,
        candidate.confidence_score * 100.0,
        candidate.confidence_level
    ));
    output.push_str(&format!(
        "\u{2514}\u{2500} Evidence:    {}\n",
        candidate.detected_files.join(", ")
    ));
}

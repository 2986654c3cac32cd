//! Configuration management for stackprobe
//!
//! Settings are loaded from environment variables with sensible defaults.
//! Command-line flags override whatever the environment provides.
//!
//! # Environment Variables
//!
//! - `STACKPROBE_MIN_CONFIDENCE`: Minimum confidence for reported detections - default: "0.0"
//! - `STACKPROBE_MAX_DEPTH`: Maximum directory depth walked - default: "8"
//! - `STACKPROBE_MAX_FILES`: Maximum entries listed per tree - default: "20000"
//! - `STACKPROBE_SAMPLE_BYTES`: Bytes read per sampled file - default: "65536"
//! - `STACKPROBE_SAMPLE_LINES`: Lines kept per sampled file - default: "200"
//! - `STACKPROBE_MAX_SAMPLED_FILES`: Files sampled per content rule - default: "64"
//! - `STACKPROBE_LOG_LEVEL`: Logging level - default: "info"
//!
//! # Example
//!
//! ```no_run
//! use stackprobe::StackprobeConfig;
//!
//! let config = StackprobeConfig::default();
//! config.validate().expect("Invalid configuration");
//! ```

use crate::detection::SampleLimits;
use crate::fs::WalkConfig;
use crate::platforms::PlatformRegistry;
use std::env;
use std::str::FromStr;
use thiserror::Error;

const DEFAULT_MIN_CONFIDENCE: f64 = 0.0;
const DEFAULT_MAX_DEPTH: usize = 8;
const DEFAULT_MAX_FILES: usize = 20_000;
const DEFAULT_SAMPLE_BYTES: usize = 64 * 1024;
const DEFAULT_SAMPLE_LINES: usize = 200;
const DEFAULT_MAX_SAMPLED_FILES: usize = 64;
const DEFAULT_LOG_LEVEL: &str = "info";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct StackprobeConfig {
    /// Minimum confidence score for a detection to be reported
    pub min_confidence: f64,

    /// Maximum directory depth walked below the root
    pub max_depth: usize,

    /// Maximum number of entries listed from a tree
    pub max_files: usize,

    /// Bytes read from the start of each sampled file
    pub sample_bytes: usize,

    /// Lines kept from each sampled file
    pub sample_lines: usize,

    /// Files sampled per content rule
    pub max_sampled_files: usize,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

impl Default for StackprobeConfig {
    /// Loads from `STACKPROBE_*` environment variables, falling back to defaults
    /// for anything missing or unparseable
    fn default() -> Self {
        Self {
            min_confidence: env_or("STACKPROBE_MIN_CONFIDENCE", DEFAULT_MIN_CONFIDENCE),
            max_depth: env_or("STACKPROBE_MAX_DEPTH", DEFAULT_MAX_DEPTH),
            max_files: env_or("STACKPROBE_MAX_FILES", DEFAULT_MAX_FILES),
            sample_bytes: env_or("STACKPROBE_SAMPLE_BYTES", DEFAULT_SAMPLE_BYTES),
            sample_lines: env_or("STACKPROBE_SAMPLE_LINES", DEFAULT_SAMPLE_LINES),
            max_sampled_files: env_or("STACKPROBE_MAX_SAMPLED_FILES", DEFAULT_MAX_SAMPLED_FILES),
            log_level: env::var("STACKPROBE_LOG_LEVEL")
                .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
                .to_lowercase(),
        }
    }
}

impl StackprobeConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any value is out of range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(ConfigError::ValidationFailed(format!(
                "Minimum confidence must be between 0.0 and 1.0, got {}",
                self.min_confidence
            )));
        }

        if self.max_depth == 0 {
            return Err(ConfigError::ValidationFailed(
                "Max depth must be at least 1".to_string(),
            ));
        }

        if self.max_files == 0 {
            return Err(ConfigError::ValidationFailed(
                "Max files must be at least 1".to_string(),
            ));
        }

        // 1KB to 10MB per sampled file
        if self.sample_bytes < 1024 || self.sample_bytes > 10_485_760 {
            return Err(ConfigError::ValidationFailed(format!(
                "Sample bytes must be between 1024 and 10485760, got {}",
                self.sample_bytes
            )));
        }

        if self.sample_lines == 0 {
            return Err(ConfigError::ValidationFailed(
                "Sample lines must be at least 1".to_string(),
            ));
        }

        if self.max_sampled_files == 0 {
            return Err(ConfigError::ValidationFailed(
                "Max sampled files must be at least 1".to_string(),
            ));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }

    /// Walk settings for a directory tree, pruning every registered
    /// platform's excluded directories
    pub fn walk_config(&self, registry: &PlatformRegistry) -> WalkConfig {
        WalkConfig {
            max_depth: self.max_depth,
            max_files: self.max_files,
            excluded_dirs: registry.all_excluded_dirs(),
            ..WalkConfig::default()
        }
    }

    pub fn sample_limits(&self) -> SampleLimits {
        SampleLimits {
            max_bytes: self.sample_bytes,
            max_lines: self.sample_lines,
            max_files: self.max_sampled_files,
        }
    }
}

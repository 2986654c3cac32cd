//! Subcommand handlers
//!
//! Each handler returns the process exit code: 0 on success (including a run
//! with no detections), 1 for tree, configuration, output or timeout failures
//! and 2 for an invalid confidence threshold.

use super::commands::{DetectArgs, PlatformsArgs};
use super::output::{OutputFormat, OutputFormatter, PlatformSummary};
use crate::config::StackprobeConfig;
use crate::detection::{validate_threshold, DetectionEngine, DetectionError, DetectionResult};
use crate::fs::{DirectoryTree, FileTree};
use crate::platforms::PlatformRegistry;
use std::env;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

pub const EXIT_OK: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_INVALID_THRESHOLD: i32 = 2;

fn exit_code(err: &DetectionError) -> i32 {
    match err {
        DetectionError::InvalidThreshold(_) => EXIT_INVALID_THRESHOLD,
        DetectionError::TreeUnavailable { .. } => EXIT_FAILURE,
    }
}

/// Environment configuration with command-line overrides applied
pub fn resolve_config(args: &DetectArgs) -> StackprobeConfig {
    let defaults = StackprobeConfig::default();
    StackprobeConfig {
        min_confidence: args.min_confidence.unwrap_or(defaults.min_confidence),
        max_depth: args.max_depth.unwrap_or(defaults.max_depth),
        max_files: args.max_files.unwrap_or(defaults.max_files),
        ..defaults
    }
}

async fn run_detection(
    engine: DetectionEngine,
    tree: Arc<dyn FileTree>,
    min_confidence: f64,
    sequential: bool,
) -> Result<DetectionResult, DetectionError> {
    if !sequential {
        return engine.detect_concurrent(tree, min_confidence).await;
    }

    let root = tree.root().to_path_buf();
    match tokio::task::spawn_blocking(move || engine.detect(tree.as_ref(), min_confidence)).await {
        Ok(result) => result,
        Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
        Err(e) => Err(DetectionError::TreeUnavailable {
            root,
            reason: e.to_string(),
        }),
    }
}

fn emit(output: &str, destination: Option<&Path>, quiet: bool) -> i32 {
    match destination {
        Some(output_file) => match std::fs::write(output_file, output) {
            Ok(_) => {
                info!("Output written to: {}", output_file.display());
                if !quiet {
                    eprintln!("Output written to: {}", output_file.display());
                }
                EXIT_OK
            }
            Err(e) => {
                error!("Failed to write output to file: {}", e);
                EXIT_FAILURE
            }
        },
        None => {
            println!("{}", output);
            EXIT_OK
        }
    }
}

pub async fn handle_detect(args: &DetectArgs, quiet: bool) -> i32 {
    let repo_path = match &args.repository_path {
        Some(path) => path.clone(),
        None => match env::current_dir() {
            Ok(dir) => dir,
            Err(e) => {
                error!("Failed to get current directory: {}", e);
                return EXIT_FAILURE;
            }
        },
    };
    debug!("Repository path: {}", repo_path.display());

    let config = resolve_config(args);
    if let Err(e) = validate_threshold(config.min_confidence) {
        error!("{}", e);
        return exit_code(&e);
    }
    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        eprintln!("\nPlease check your STACKPROBE_* environment variables and command-line arguments.");
        return EXIT_FAILURE;
    }
    debug!(?config, "Resolved configuration");

    let engine = DetectionEngine::from_config(&config);
    let walk = config.walk_config(engine.registry());
    let tree: Arc<dyn FileTree> = Arc::new(DirectoryTree::with_config(&repo_path, walk));

    let detection = run_detection(engine, tree, config.min_confidence, args.sequential);
    let outcome = match args.timeout {
        Some(secs) => match tokio::time::timeout(Duration::from_secs(secs), detection).await {
            Ok(outcome) => outcome,
            Err(_) => {
                error!("Detection timed out after {} seconds", secs);
                return EXIT_FAILURE;
            }
        },
        None => detection.await,
    };

    let result = match outcome {
        Ok(result) => result,
        Err(e) => {
            error!("Detection failed: {}", e);
            return exit_code(&e);
        }
    };

    let formatter = OutputFormatter::new(args.format.into());
    match formatter.format(&result) {
        Ok(output) => emit(&output, args.output.as_deref(), quiet),
        Err(e) => {
            error!("Failed to format output: {:#}", e);
            EXIT_FAILURE
        }
    }
}

pub fn handle_platforms(args: &PlatformsArgs) -> i32 {
    let registry = PlatformRegistry::with_defaults();
    let summaries = PlatformSummary::from_registry(&registry);
    let format: OutputFormat = args.format.into();

    match OutputFormatter::new(format).format_platforms(&summaries) {
        Ok(output) => emit(&output, None, false),
        Err(e) => {
            error!("Failed to format output: {:#}", e);
            EXIT_FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::{CliArgs, Commands};
    use clap::Parser;
    use serial_test::serial;

    fn detect_args(argv: &[&str]) -> DetectArgs {
        match CliArgs::parse_from(argv).command {
            Commands::Detect(args) => args,
            _ => panic!("Expected Detect command"),
        }
    }

    #[test]
    #[serial]
    fn test_flags_override_environment() {
        env::set_var("STACKPROBE_MAX_DEPTH", "3");
        let args = detect_args(&["stackprobe", "detect", "--max-depth", "5", "-c", "0.5"]);
        let config = resolve_config(&args);
        env::remove_var("STACKPROBE_MAX_DEPTH");

        assert_eq!(config.max_depth, 5);
        assert_eq!(config.min_confidence, 0.5);
    }

    #[test]
    #[serial]
    fn test_environment_used_without_flags() {
        env::set_var("STACKPROBE_MAX_FILES", "123");
        let args = detect_args(&["stackprobe", "detect"]);
        let config = resolve_config(&args);
        env::remove_var("STACKPROBE_MAX_FILES");

        assert_eq!(config.max_files, 123);
    }

    #[tokio::test]
    async fn test_invalid_threshold_exit_code() {
        let args = detect_args(&["stackprobe", "detect", "/nonexistent", "-c", "1.5"]);
        assert_eq!(handle_detect(&args, true).await, EXIT_INVALID_THRESHOLD);
    }

    #[tokio::test]
    #[serial]
    async fn test_missing_tree_exit_code() {
        let args = detect_args(&["stackprobe", "detect", "/nonexistent/stackprobe/path"]);
        assert_eq!(handle_detect(&args, true).await, EXIT_FAILURE);
    }
}

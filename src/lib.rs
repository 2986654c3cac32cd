//! stackprobe - multi-signal platform detection for source trees
//!
//! Given a project tree, stackprobe decides which language platform (and
//! which framework and build tool) the project uses. Every registered
//! platform is scored from weighted evidence: marker manifests, secondary
//! files, directory layout, tool configuration, framework dependencies and
//! source-content patterns. The score maps to a reliability tier and the
//! candidates are ranked.
//!
//! # Example
//!
//! ```no_run
//! use stackprobe::{DetectionEngine, DirectoryTree};
//!
//! # fn example() -> Result<(), stackprobe::DetectionError> {
//! let engine = DetectionEngine::new();
//! let result = engine.detect(&DirectoryTree::new("/path/to/repo"), 0.45)?;
//!
//! if let Some(primary) = &result.primary {
//!     println!(
//!         "{} ({:?}) scored {:.2}",
//!         primary.platform, primary.framework, primary.confidence_score
//!     );
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Project Structure
//!
//! - [`fs`]: read-only tree abstraction over disk or memory
//! - [`platforms`]: per-platform rule tables and the registry
//! - [`detection`]: signal extraction, scoring, framework resolution and ranking
//! - [`config`]: environment-backed settings
//! - [`cli`]: the `stackprobe` command line

pub mod cli;
pub mod config;
pub mod detection;
pub mod fs;
pub mod platforms;
pub mod util;

pub use config::{ConfigError, StackprobeConfig};
pub use detection::{
    ConfidenceLevel, DetectionEngine, DetectionError, DetectionResult, PlatformCandidate, Signal,
    SignalCategory,
};
pub use fs::{DirectoryTree, FileTree, MemoryTree};
pub use platforms::PlatformRegistry;
pub use util::{init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_constant() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name_constant() {
        assert_eq!(NAME, "stackprobe");
    }
}

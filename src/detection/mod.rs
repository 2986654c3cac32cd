//! Multi-signal platform detection
//!
//! Each registered platform is checked by its own detector. Detectors collect
//! weighted signals from the tree, a scorer fuses them into a bounded score
//! and the aggregator ranks whatever clears the caller's threshold.

pub mod aggregator;
pub mod confidence;
pub mod dependencies;
pub mod detector;
pub mod engine;
pub mod error;
pub mod extractor;
pub mod framework;
pub mod index;
pub mod sampler;
pub mod scorer;
pub mod types;

pub use aggregator::{aggregate, validate_threshold};
pub use confidence::ConfidenceLevel;
pub use dependencies::{Dependency, DependencySet};
pub use detector::PlatformDetector;
pub use engine::DetectionEngine;
pub use error::DetectionError;
pub use extractor::SignalExtractor;
pub use framework::{FrameworkResolver, ResolvedFramework};
pub use index::TreeIndex;
pub use sampler::{ContentSampler, SampleLimits};
pub use scorer::{CategoryWeights, InvalidWeights, Scorer};
pub use types::{DetectionResult, PlatformCandidate, Signal, SignalCategory};

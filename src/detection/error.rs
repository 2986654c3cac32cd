use std::path::PathBuf;
use thiserror::Error;

/// Failures that reject a detection request
#[derive(Debug, Error)]
pub enum DetectionError {
    /// The confidence threshold is outside [0.0, 1.0]
    #[error("Invalid confidence threshold {0}: must be between 0.0 and 1.0")]
    InvalidThreshold(f64),

    /// The tree could not be listed at all
    #[error("File tree unavailable at {root:?}: {reason}")]
    TreeUnavailable { root: PathBuf, reason: String },
}

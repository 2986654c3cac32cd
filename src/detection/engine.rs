//! Detection engine orchestration
//!
//! `DetectionEngine` ties the pieces together for one request:
//! 1. Validates the confidence threshold (before the tree is touched)
//! 2. Lists the tree once into a shared `TreeIndex`
//! 3. Runs one `PlatformDetector` per registered platform
//! 4. Ranks and filters the candidates
//!
//! # Example
//!
//! ```no_run
//! use stackprobe::detection::DetectionEngine;
//! use stackprobe::fs::DirectoryTree;
//!
//! let engine = DetectionEngine::new();
//! let tree = DirectoryTree::new("/path/to/repo");
//! let result = engine.detect(&tree, 0.45)?;
//!
//! if let Some(primary) = &result.primary {
//!     println!("{} ({})", primary.platform, primary.confidence_level);
//! }
//! # Ok::<(), stackprobe::detection::DetectionError>(())
//! ```

use super::aggregator::{aggregate, validate_threshold};
use super::detector::PlatformDetector;
use super::error::DetectionError;
use super::index::TreeIndex;
use super::sampler::SampleLimits;
use super::scorer::Scorer;
use super::types::{DetectionResult, PlatformCandidate};
use crate::config::StackprobeConfig;
use crate::fs::FileTree;
use crate::platforms::PlatformRegistry;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Runs every registered platform detector against a file tree
#[derive(Debug, Clone)]
pub struct DetectionEngine {
    registry: PlatformRegistry,
    scorer: Scorer,
    limits: SampleLimits,
}

impl Default for DetectionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DetectionEngine {
    /// Engine with the built-in platforms, standard weights and default limits
    pub fn new() -> Self {
        Self::with_registry(PlatformRegistry::with_defaults())
    }

    pub fn with_registry(registry: PlatformRegistry) -> Self {
        Self {
            registry,
            scorer: Scorer::default(),
            limits: SampleLimits::default(),
        }
    }

    /// Engine whose sampling limits come from configuration
    pub fn from_config(config: &StackprobeConfig) -> Self {
        Self::new().with_limits(config.sample_limits())
    }

    pub fn with_scorer(mut self, scorer: Scorer) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn with_limits(mut self, limits: SampleLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn registry(&self) -> &PlatformRegistry {
        &self.registry
    }

    pub fn limits(&self) -> SampleLimits {
        self.limits
    }

    fn detectors(&self) -> impl Iterator<Item = PlatformDetector> + '_ {
        self.registry
            .platforms()
            .iter()
            .map(|rules| PlatformDetector::new(Arc::clone(rules), self.scorer, self.limits))
    }

    fn index(tree: &dyn FileTree) -> Result<TreeIndex, DetectionError> {
        let entries = tree
            .entries()
            .map_err(|e| DetectionError::TreeUnavailable {
                root: tree.root().to_path_buf(),
                reason: format!("{:#}", e),
            })?;
        Ok(TreeIndex::new(entries))
    }

    /// Detects platforms sequentially on the calling thread
    ///
    /// # Errors
    ///
    /// Returns `DetectionError::InvalidThreshold` if `min_confidence` is not
    /// within [0.0, 1.0], and `DetectionError::TreeUnavailable` if the tree
    /// cannot be listed.
    pub fn detect(
        &self,
        tree: &dyn FileTree,
        min_confidence: f64,
    ) -> Result<DetectionResult, DetectionError> {
        validate_threshold(min_confidence)?;
        let start = Instant::now();
        info!(root = %tree.root().display(), min_confidence, "Starting platform detection");

        let index = Self::index(tree)?;
        debug!(entries = index.len(), files = index.file_count(), "Indexed tree");

        let candidates: Vec<PlatformCandidate> = self
            .detectors()
            .filter_map(|detector| detector.detect(tree, &index))
            .collect();

        self.finish(candidates, min_confidence, start)
    }

    /// Detects platforms with one blocking task per detector
    ///
    /// Results are put back into registry order before ranking, so the
    /// outcome is identical to [`detect`](Self::detect).
    pub async fn detect_concurrent(
        &self,
        tree: Arc<dyn FileTree>,
        min_confidence: f64,
    ) -> Result<DetectionResult, DetectionError> {
        validate_threshold(min_confidence)?;
        let start = Instant::now();
        info!(root = %tree.root().display(), min_confidence, "Starting concurrent platform detection");

        let listing = {
            let tree = Arc::clone(&tree);
            tokio::task::spawn_blocking(move || Self::index(tree.as_ref())).await
        };
        let index = match listing {
            Ok(index) => Arc::new(index?),
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(e) => {
                return Err(DetectionError::TreeUnavailable {
                    root: tree.root().to_path_buf(),
                    reason: e.to_string(),
                })
            }
        };
        debug!(entries = index.len(), files = index.file_count(), "Indexed tree");

        let mut tasks = JoinSet::new();
        for (position, detector) in self.detectors().enumerate() {
            let tree = Arc::clone(&tree);
            let index = Arc::clone(&index);
            tasks.spawn_blocking(move || (position, detector.detect(tree.as_ref(), &index)));
        }

        let mut slots: Vec<Option<PlatformCandidate>> = vec![None; self.registry.len()];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((position, candidate)) => slots[position] = candidate,
                Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
                Err(e) => warn!(error = %e, "Detector task cancelled"),
            }
        }

        let candidates = slots.into_iter().flatten().collect();
        self.finish(candidates, min_confidence, start)
    }

    fn finish(
        &self,
        candidates: Vec<PlatformCandidate>,
        min_confidence: f64,
        start: Instant,
    ) -> Result<DetectionResult, DetectionError> {
        let found = candidates.len();
        let result = aggregate(candidates, min_confidence)?;

        info!(
            candidates = found,
            detections = result.detections.len(),
            primary = result.primary.as_ref().map(|p| p.platform.as_str()),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Platform detection complete"
        );
        Ok(result)
    }
}

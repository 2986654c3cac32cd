use super::dependencies::DependencySet;
use super::index::TreeIndex;
use super::sampler::ContentSampler;
use super::scorer::CategoryWeights;
use super::types::{Signal, SignalCategory};
use crate::platforms::{FrameworkRule, Indicator};
use tracing::trace;

/// Framework chosen for a candidate together with the evidence that earned it
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedFramework {
    pub name: String,
    pub signals: Vec<Signal>,
    /// Sum of the distinct category weights earned, in hundredths
    pub weight: u32,
}

/// Picks at most one framework per platform.
///
/// Every rule is evaluated on its own; the rule earning the largest combined
/// weight wins and earlier rules win ties. A rule matched only through source
/// patterns still names the framework, but adds `content_match` alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameworkResolver {
    weights: CategoryWeights,
}

impl FrameworkResolver {
    pub fn new(weights: CategoryWeights) -> Self {
        Self { weights }
    }

    pub fn resolve(
        &self,
        index: &TreeIndex,
        frameworks: &[FrameworkRule],
        dependencies: &DependencySet,
        sampler: &ContentSampler,
    ) -> Option<ResolvedFramework> {
        let mut best: Option<ResolvedFramework> = None;

        for rule in frameworks {
            let Some(resolved) = self.evaluate(index, rule, dependencies, sampler) else {
                continue;
            };
            trace!(framework = %resolved.name, weight = resolved.weight, "Framework rule matched");
            if best.as_ref().map_or(true, |b| resolved.weight > b.weight) {
                best = Some(resolved);
            }
        }

        best
    }

    fn evaluate(
        &self,
        index: &TreeIndex,
        rule: &FrameworkRule,
        dependencies: &DependencySet,
        sampler: &ContentSampler,
    ) -> Option<ResolvedFramework> {
        let mut signals: Vec<Signal> = Vec::new();

        for indicator in &rule.indicators {
            let category = match indicator {
                Indicator::Source(_) => SignalCategory::ContentMatch,
                _ => SignalCategory::FrameworkMatch,
            };
            // one piece of evidence per category is enough
            if signals.iter().any(|s| s.category == category) {
                continue;
            }

            let evidence = match indicator {
                Indicator::Package(name) => dependencies.find_exact(name),
                Indicator::PackageContaining(fragment) => dependencies.find_containing(fragment),
                Indicator::Path(pattern) => index.first_matching(pattern).map(|e| e.path.as_str()),
                Indicator::Source(content) => sampler.find_match(index, content),
            };

            if let Some(path) = evidence {
                signals.push(Signal::new(category, self.weights.fraction(category), path));
            }
        }

        if signals.is_empty() {
            return None;
        }

        let weight = signals
            .iter()
            .map(|s| self.weights.hundredths(s.category))
            .sum();
        Some(ResolvedFramework {
            name: rule.name.clone(),
            signals,
            weight,
        })
    }
}

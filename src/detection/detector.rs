use super::confidence::ConfidenceLevel;
use super::dependencies::DependencySet;
use super::extractor::SignalExtractor;
use super::framework::FrameworkResolver;
use super::index::TreeIndex;
use super::sampler::{ContentSampler, SampleLimits};
use super::scorer::Scorer;
use super::types::{PlatformCandidate, Signal};
use crate::fs::FileTree;
use crate::platforms::PlatformRules;
use std::sync::Arc;
use tracing::debug;

/// Runs one platform's rule table against an indexed tree
#[derive(Debug, Clone)]
pub struct PlatformDetector {
    rules: Arc<PlatformRules>,
    scorer: Scorer,
    limits: SampleLimits,
}

impl PlatformDetector {
    pub fn new(rules: Arc<PlatformRules>, scorer: Scorer, limits: SampleLimits) -> Self {
        Self {
            rules,
            scorer,
            limits,
        }
    }

    pub fn rules(&self) -> &PlatformRules {
        &self.rules
    }

    /// Candidate for this platform, or `None` when no signal fired
    pub fn detect(&self, tree: &dyn FileTree, index: &TreeIndex) -> Option<PlatformCandidate> {
        let rules = self.rules.as_ref();
        let weights = *self.scorer.weights();
        let sampler = ContentSampler::new(tree, self.limits);

        let mut signals = SignalExtractor::new(weights).extract(index, rules, &sampler);

        let framework = if rules.frameworks.is_empty() {
            None
        } else {
            let dependencies = DependencySet::collect(index, &rules.manifests, &sampler);
            FrameworkResolver::new(weights).resolve(index, &rules.frameworks, &dependencies, &sampler)
        };

        let framework_name = framework.map(|resolved| {
            signals.extend(resolved.signals);
            resolved.name
        });

        if signals.is_empty() {
            debug!(platform = %rules.id, "No signals");
            return None;
        }

        let confidence_score = self.scorer.score(&signals);
        let confidence_level = ConfidenceLevel::classify(confidence_score);
        let build_tool = self.resolve_build_tool(index);
        let commands = rules.commands_for(framework_name.as_deref(), build_tool.as_deref());
        let detected_files = detected_files(&signals, index);

        debug!(
            platform = %rules.name,
            framework = ?framework_name,
            build_tool = ?build_tool,
            score = confidence_score,
            level = %confidence_level,
            signals = signals.len(),
            "Platform candidate"
        );

        Some(PlatformCandidate {
            platform: rules.name.clone(),
            framework: framework_name,
            build_tool,
            build_required: commands.build_required,
            build_command: commands.build_command,
            install_command: commands.install_command,
            confidence_score,
            confidence_level,
            detected_files,
        })
    }

    /// First build-tool marker present wins, else the platform default
    fn resolve_build_tool(&self, index: &TreeIndex) -> Option<String> {
        self.rules
            .build_tools
            .iter()
            .find(|rule| index.files_matching(&rule.marker).next().is_some())
            .map(|rule| rule.tool.clone())
            .or_else(|| self.rules.default_build_tool.clone())
    }
}

fn detected_files(signals: &[Signal], index: &TreeIndex) -> Vec<String> {
    let mut files: Vec<String> = signals
        .iter()
        .map(|s| s.evidence.as_str())
        .filter(|path| index.contains(path))
        .map(String::from)
        .collect();
    files.sort();
    files.dedup();
    files
}

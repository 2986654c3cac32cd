use super::index::TreeIndex;
use super::sampler::ContentSampler;
use super::scorer::CategoryWeights;
use super::types::{Signal, SignalCategory};
use crate::platforms::{PathPattern, PlatformRules};
use tracing::trace;

/// Turns one platform's path and content rules into signals
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalExtractor {
    weights: CategoryWeights,
}

impl SignalExtractor {
    pub fn new(weights: CategoryWeights) -> Self {
        Self { weights }
    }

    pub fn extract(
        &self,
        index: &TreeIndex,
        rules: &PlatformRules,
        sampler: &ContentSampler,
    ) -> Vec<Signal> {
        let mut signals = Vec::new();

        self.match_files(index, &rules.primary_files, SignalCategory::PrimaryFile, &mut signals);
        self.match_files(index, &rules.secondary_files, SignalCategory::SecondaryFile, &mut signals);
        self.match_dirs(index, &rules.structure, &mut signals);
        self.match_files(index, &rules.config_files, SignalCategory::ConfigFile, &mut signals);

        // Binary category: the first rule that matches earns the full weight
        for rule in &rules.content {
            if let Some(path) = sampler.find_match(index, rule) {
                trace!(platform = %rules.id, path, pattern = %rule.pattern, "Content rule matched");
                signals.push(self.signal(SignalCategory::ContentMatch, path));
                break;
            }
        }

        signals
    }

    fn match_files(
        &self,
        index: &TreeIndex,
        patterns: &[PathPattern],
        category: SignalCategory,
        signals: &mut Vec<Signal>,
    ) {
        for pattern in patterns {
            for entry in index.files_matching(pattern) {
                signals.push(self.signal(category, &entry.path));
            }
        }
    }

    fn match_dirs(&self, index: &TreeIndex, patterns: &[PathPattern], signals: &mut Vec<Signal>) {
        for pattern in patterns {
            for entry in index.dirs_matching(pattern) {
                signals.push(self.signal(SignalCategory::Structure, &entry.path));
            }
        }
    }

    fn signal(&self, category: SignalCategory, evidence: &str) -> Signal {
        Signal::new(category, self.weights.fraction(category), evidence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::sampler::SampleLimits;
    use crate::fs::{FileTree, MemoryTree};
    use crate::platforms;

    fn extract(tree: &MemoryTree, rules: &PlatformRules) -> Vec<Signal> {
        let index = TreeIndex::new(tree.entries().unwrap());
        let sampler = ContentSampler::new(tree, SampleLimits::default());
        SignalExtractor::default().extract(&index, rules, &sampler)
    }

    fn categories(signals: &[Signal]) -> Vec<SignalCategory> {
        let mut categories: Vec<SignalCategory> = signals.iter().map(|s| s.category).collect();
        categories.sort();
        categories.dedup();
        categories
    }

    #[test]
    fn test_java_tree_signals() {
        let tree = MemoryTree::new()
            .with_file("pom.xml", "<project/>")
            .with_file("mvnw", "#!/bin/sh")
            .with_file("src/main/resources/application.yml", "server:\n  port: 8080\n")
            .with_file(
                "src/main/java/com/example/App.java",
                "class App {\n    public static void main(String[] args) {}\n}\n",
            );
        let signals = extract(&tree, &platforms::java());

        assert_eq!(
            categories(&signals),
            vec![
                SignalCategory::PrimaryFile,
                SignalCategory::SecondaryFile,
                SignalCategory::Structure,
                SignalCategory::ConfigFile,
                SignalCategory::ContentMatch,
            ]
        );
        let primary = signals
            .iter()
            .find(|s| s.category == SignalCategory::PrimaryFile)
            .unwrap();
        assert_eq!(primary.evidence, "pom.xml");
        assert_eq!(primary.weight_fraction, 0.35);
    }

    #[test]
    fn test_structure_requires_directory() {
        // a file named like a structure directory is not structure evidence
        let tree = MemoryTree::new().with_file("benches", "not a dir");
        let signals = extract(&tree, &platforms::rust());
        assert!(signals.is_empty());
    }

    #[test]
    fn test_content_match_recorded_once() {
        let tree = MemoryTree::new()
            .with_file("a.go", "package main")
            .with_file("b.go", "package main");
        let signals = extract(&tree, &platforms::go());

        let content: Vec<&Signal> = signals
            .iter()
            .filter(|s| s.category == SignalCategory::ContentMatch)
            .collect();
        assert_eq!(content.len(), 1);
        assert_eq!(content[0].evidence, "a.go");
    }

    #[test]
    fn test_every_primary_file_is_evidence() {
        let tree = MemoryTree::new()
            .with_file("Api/Api.csproj", "<Project/>")
            .with_file("Worker/Worker.csproj", "<Project/>");
        let signals = extract(&tree, &platforms::dotnet());

        let evidence: Vec<&str> = signals
            .iter()
            .filter(|s| s.category == SignalCategory::PrimaryFile)
            .map(|s| s.evidence.as_str())
            .collect();
        assert_eq!(evidence, vec!["Api/Api.csproj", "Worker/Worker.csproj"]);
    }

    #[test]
    fn test_unrelated_tree_has_no_signals() {
        let tree = MemoryTree::new().with_file("README.md", "# notes");
        assert!(extract(&tree, &platforms::php()).is_empty());
    }
}

use super::types::{Signal, SignalCategory};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Category weights must sum to 100 hundredths, got {0}")]
pub struct InvalidWeights(pub u32);

/// Per-category weights in hundredths of the total score.
///
/// Integer storage keeps sums exact, so a score that should land on a tier
/// boundary (0.45, 0.65, 0.80) never drifts just below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryWeights {
    primary_file: u32,
    secondary_file: u32,
    structure: u32,
    config_file: u32,
    framework_match: u32,
    content_match: u32,
}

impl CategoryWeights {
    pub const STANDARD: CategoryWeights = CategoryWeights {
        primary_file: 35,
        secondary_file: 10,
        structure: 15,
        config_file: 10,
        framework_match: 20,
        content_match: 10,
    };

    pub fn new(
        primary_file: u32,
        secondary_file: u32,
        structure: u32,
        config_file: u32,
        framework_match: u32,
        content_match: u32,
    ) -> Result<Self, InvalidWeights> {
        let weights = Self {
            primary_file,
            secondary_file,
            structure,
            config_file,
            framework_match,
            content_match,
        };
        let total: u32 = SignalCategory::ALL.iter().map(|c| weights.hundredths(*c)).sum();
        if total != 100 {
            return Err(InvalidWeights(total));
        }
        Ok(weights)
    }

    pub fn hundredths(&self, category: SignalCategory) -> u32 {
        match category {
            SignalCategory::PrimaryFile => self.primary_file,
            SignalCategory::SecondaryFile => self.secondary_file,
            SignalCategory::Structure => self.structure,
            SignalCategory::ConfigFile => self.config_file,
            SignalCategory::FrameworkMatch => self.framework_match,
            SignalCategory::ContentMatch => self.content_match,
        }
    }

    pub fn fraction(&self, category: SignalCategory) -> f64 {
        f64::from(self.hundredths(category)) / 100.0
    }
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Fuses signals into a bounded score; each category is credited at most once
#[derive(Debug, Clone, Copy, Default)]
pub struct Scorer {
    weights: CategoryWeights,
}

impl Scorer {
    pub fn new(weights: CategoryWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &CategoryWeights {
        &self.weights
    }

    /// Hundredths earned by the distinct categories present in `signals`
    pub fn hundredths(&self, signals: &[Signal]) -> u32 {
        SignalCategory::ALL
            .iter()
            .filter(|category| signals.iter().any(|s| s.category == **category))
            .map(|category| self.weights.hundredths(*category))
            .sum()
    }

    pub fn score(&self, signals: &[Signal]) -> f64 {
        (f64::from(self.hundredths(signals)) / 100.0).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::confidence::ConfidenceLevel;
    use yare::parameterized;

    fn signal(category: SignalCategory) -> Signal {
        Signal::new(category, CategoryWeights::STANDARD.fraction(category), "evidence")
    }

    #[test]
    fn test_standard_weights_sum_to_one() {
        let total: u32 = SignalCategory::ALL
            .iter()
            .map(|c| CategoryWeights::STANDARD.hundredths(*c))
            .sum();
        assert_eq!(total, 100);
        assert_eq!(CategoryWeights::STANDARD.fraction(SignalCategory::PrimaryFile), 0.35);
    }

    #[test]
    fn test_new_rejects_bad_totals() {
        assert_eq!(CategoryWeights::new(35, 10, 15, 10, 20, 5), Err(InvalidWeights(95)));
        assert_eq!(CategoryWeights::new(50, 10, 15, 10, 20, 10), Err(InvalidWeights(115)));
        assert!(CategoryWeights::new(50, 10, 10, 10, 10, 10).is_ok());
    }

    #[test]
    fn test_empty_signals_score_zero() {
        assert_eq!(Scorer::default().score(&[]), 0.0);
    }

    #[test]
    fn test_repeated_category_credited_once() {
        let scorer = Scorer::default();
        let signals = vec![
            signal(SignalCategory::PrimaryFile),
            signal(SignalCategory::PrimaryFile),
            signal(SignalCategory::PrimaryFile),
        ];
        assert_eq!(scorer.score(&signals), 0.35);
    }

    #[test]
    fn test_all_categories_score_one() {
        let signals: Vec<Signal> = SignalCategory::ALL.iter().map(|c| signal(*c)).collect();
        assert_eq!(Scorer::default().score(&signals), 1.0);
    }

    #[parameterized(
        primary_and_secondary = { &[SignalCategory::PrimaryFile, SignalCategory::SecondaryFile], 0.45, ConfidenceLevel::Moderate },
        primary_and_config = { &[SignalCategory::PrimaryFile, SignalCategory::ConfigFile], 0.45, ConfidenceLevel::Moderate },
        primary_and_framework = { &[SignalCategory::PrimaryFile, SignalCategory::FrameworkMatch], 0.55, ConfidenceLevel::Moderate },
        primary_structure_framework = { &[SignalCategory::PrimaryFile, SignalCategory::Structure, SignalCategory::FrameworkMatch], 0.70, ConfidenceLevel::High },
        no_primary = { &[SignalCategory::SecondaryFile, SignalCategory::Structure, SignalCategory::ConfigFile, SignalCategory::FrameworkMatch, SignalCategory::ContentMatch], 0.65, ConfidenceLevel::High },
        primary_framework_content_structure = { &[SignalCategory::PrimaryFile, SignalCategory::Structure, SignalCategory::FrameworkMatch, SignalCategory::ContentMatch], 0.80, ConfidenceLevel::VeryHigh },
    )]
    fn test_boundary_sums_are_exact(
        categories: &[SignalCategory],
        expected: f64,
        level: ConfidenceLevel,
    ) {
        let signals: Vec<Signal> = categories.iter().map(|c| signal(*c)).collect();
        let score = Scorer::default().score(&signals);
        assert_eq!(score, expected);
        assert_eq!(ConfidenceLevel::classify(score), level);
    }

    #[test]
    fn test_custom_weights_are_used() {
        let weights = CategoryWeights::new(50, 10, 10, 10, 10, 10).unwrap();
        let scorer = Scorer::new(weights);
        assert_eq!(scorer.score(&[signal(SignalCategory::PrimaryFile)]), 0.5);
    }
}

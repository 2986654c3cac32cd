use super::error::DetectionError;
use super::types::{DetectionResult, PlatformCandidate};
use std::cmp::Ordering;

/// Thresholds must lie in [0.0, 1.0]; NaN is rejected
pub fn validate_threshold(min_confidence: f64) -> Result<(), DetectionError> {
    if (0.0..=1.0).contains(&min_confidence) {
        Ok(())
    } else {
        Err(DetectionError::InvalidThreshold(min_confidence))
    }
}

/// Score desc, then evidence count desc, then platform name asc
pub fn rank(a: &PlatformCandidate, b: &PlatformCandidate) -> Ordering {
    b.confidence_score
        .total_cmp(&a.confidence_score)
        .then_with(|| b.detected_files.len().cmp(&a.detected_files.len()))
        .then_with(|| a.platform.cmp(&b.platform))
}

/// Filter candidates by threshold and rank them
pub fn aggregate(
    candidates: Vec<PlatformCandidate>,
    min_confidence: f64,
) -> Result<DetectionResult, DetectionError> {
    validate_threshold(min_confidence)?;

    let mut detections: Vec<PlatformCandidate> = candidates
        .into_iter()
        .filter(|c| c.confidence_score >= min_confidence)
        .collect();
    detections.sort_by(rank);

    Ok(DetectionResult {
        primary: detections.first().cloned(),
        detections,
        min_confidence_threshold: min_confidence,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::confidence::ConfidenceLevel;
    use yare::parameterized;

    fn candidate(platform: &str, score: f64, files: usize) -> PlatformCandidate {
        PlatformCandidate {
            platform: platform.to_string(),
            framework: None,
            build_tool: None,
            build_required: false,
            build_command: None,
            install_command: None,
            confidence_score: score,
            confidence_level: ConfidenceLevel::classify(score),
            detected_files: (0..files).map(|i| format!("file{}", i)).collect(),
        }
    }

    fn platforms(result: &DetectionResult) -> Vec<&str> {
        result.detections.iter().map(|c| c.platform.as_str()).collect()
    }

    #[parameterized(
        above_one = { 1.5 },
        negative = { -0.1 },
        nan = { f64::NAN },
        infinite = { f64::INFINITY },
    )]
    fn test_invalid_thresholds(threshold: f64) {
        let err = aggregate(vec![candidate("Go", 0.5, 1)], threshold).unwrap_err();
        assert!(matches!(err, DetectionError::InvalidThreshold(_)));
    }

    #[parameterized(
        zero = { 0.0 },
        one = { 1.0 },
        middle = { 0.45 },
    )]
    fn test_valid_thresholds(threshold: f64) {
        assert!(validate_threshold(threshold).is_ok());
    }

    #[test]
    fn test_ranking_order() {
        let result = aggregate(
            vec![
                candidate("Ruby", 0.45, 1),
                candidate("Java", 0.80, 2),
                candidate("Go", 0.45, 3),
                candidate("PHP", 0.45, 1),
            ],
            0.0,
        )
        .unwrap();

        assert_eq!(platforms(&result), vec!["Java", "Go", "PHP", "Ruby"]);
        assert_eq!(result.primary.unwrap().platform, "Java");
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let result = aggregate(
            vec![candidate("Node.js", 0.35, 1), candidate("Java", 0.45, 1)],
            0.45,
        )
        .unwrap();
        assert_eq!(platforms(&result), vec!["Java"]);
        assert_eq!(result.min_confidence_threshold, 0.45);
    }

    #[test]
    fn test_nothing_passes() {
        let result = aggregate(vec![candidate("Node.js", 0.35, 1)], 0.9).unwrap();
        assert!(result.detections.is_empty());
        assert!(result.primary.is_none());
    }

    #[test]
    fn test_empty_input() {
        let result = aggregate(Vec::new(), 0.0).unwrap();
        assert!(result.is_empty());
        assert!(result.primary.is_none());
    }
}

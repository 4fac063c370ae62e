//! Confidence stress test
//!
//! No automated review may leave a synthesis near certainty once several
//! contradictions accumulate, nor push it below the floor on its own.

use gadfly_domain::{round2, ConfidenceAssessment, Contradiction};

/// Confidence every synthesis starts from
pub const BASELINE_CONFIDENCE: f64 = 0.85;

/// Lowest confidence automated review can assign
pub const CONFIDENCE_FLOOR: f64 = 0.3;

/// Penalty per contradiction
pub const PENALTY_PER_CONTRADICTION: f64 = 0.12;

/// Warning when the penalty exceeds 0.3
pub const HIGH_UNCERTAINTY_WARNING: &str =
    "HIGH UNCERTAINTY: Multiple vault nodes contradict current synthesis.";

/// Warning when the penalty exceeds 0.1
pub const MODERATE_DRIFT_WARNING: &str =
    "MODERATE DRIFT: Minor contradictions detected in archive.";

/// Adjusted confidence after `count` contradictions, rounded to 2 decimals
pub fn adjusted_confidence(count: usize) -> f64 {
    let penalty = count as f64 * PENALTY_PER_CONTRADICTION;
    round2((BASELINE_CONFIDENCE - penalty).max(CONFIDENCE_FLOOR))
}

/// Turn a contradiction list into a confidence assessment
pub fn stress_test_confidence(contradictions: &[Contradiction]) -> ConfidenceAssessment {
    let penalty = contradictions.len() as f64 * PENALTY_PER_CONTRADICTION;

    let warning = if penalty > 0.3 {
        Some(HIGH_UNCERTAINTY_WARNING.to_string())
    } else if penalty > 0.1 {
        Some(MODERATE_DRIFT_WARNING.to_string())
    } else {
        None
    };

    ConfidenceAssessment {
        original_confidence: BASELINE_CONFIDENCE,
        adjusted_confidence: adjusted_confidence(contradictions.len()),
        warning,
    }
}

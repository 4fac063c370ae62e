//! Confidence adjustment after a scout finding

use crate::domain::DomainPolicy;
use crate::drift::DriftReport;
use crate::stress::CONFIDENCE_FLOOR;
use gadfly_domain::{clamp_unit, round2};

/// Largest penalty a single significant finding can apply
pub const MAX_DRIFT_PENALTY: f64 = 0.2;

/// Penalty per unit of novelty
pub const NOVELTY_PENALTY_RATE: f64 = 0.25;

/// Lower `current` by the drift penalty, then apply the domain cap
///
/// Insignificant drift leaves the confidence untouched (apart from the
/// cap). Significant drift subtracts `min(0.2, novelty * 0.25)`, floors at
/// 0.3 and rounds to two decimals.
pub fn adjust_confidence(current: f64, drift: &DriftReport, policy: &DomainPolicy) -> f64 {
    let next = if drift.significant {
        let penalty = (drift.novelty_score * NOVELTY_PENALTY_RATE).min(MAX_DRIFT_PENALTY);
        round2((current - penalty).max(CONFIDENCE_FLOOR))
    } else {
        current
    };
    clamp_unit(policy.cap(next))
}

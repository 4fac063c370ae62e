//! Auto-trigger policy: does a synthesis deserve a forced review?

use crate::signals::LanguageSignals;
use serde::{Deserialize, Serialize};

/// Inputs to the trigger decision
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TriggerMetrics {
    /// Stated confidence of the synthesis
    pub confidence: f64,
    /// Number of supporting sources
    pub evidence_count: usize,
    /// Number of claims made
    pub claim_count: usize,
    /// Absolutist and hedging vocabulary
    pub signals: LanguageSignals,
}

/// Which rule fired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerReason {
    /// More confident than its evidence supports
    ConfidenceExceedsEvidence,
    /// More than two absolutist words
    AbsolutistLanguage,
    /// Confident without hedging
    UnhedgedConfidence,
}

/// First rule that fires, checked in order
pub fn trigger_reason(metrics: &TriggerMetrics) -> Option<TriggerReason> {
    if metrics.confidence > 0.82 && metrics.evidence_count < metrics.claim_count {
        Some(TriggerReason::ConfidenceExceedsEvidence)
    } else if metrics.signals.absolutes > 2 {
        Some(TriggerReason::AbsolutistLanguage)
    } else if metrics.confidence - metrics.signals.hedging_score > 0.4 {
        Some(TriggerReason::UnhedgedConfidence)
    } else {
        None
    }
}

/// Whether a review must run
pub fn should_trigger(metrics: &TriggerMetrics) -> bool {
    trigger_reason(metrics).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::extract_language_signals;

    fn metrics(confidence: f64, evidence: usize, claims: usize, signals: LanguageSignals) -> TriggerMetrics {
        TriggerMetrics {
            confidence,
            evidence_count: evidence,
            claim_count: claims,
            signals,
        }
    }

    #[test]
    fn test_absolutist_text_triggers() {
        let signals = extract_language_signals("This clearly and obviously proves the point.");
        assert_eq!(signals.absolutes, 3);
        let m = metrics(0.9, 10, 1, signals);
        assert!(should_trigger(&m));
    }

    #[test]
    fn test_thin_evidence_triggers() {
        let m = metrics(0.85, 1, 3, LanguageSignals { absolutes: 0, hedging_score: 2.0 });
        assert_eq!(trigger_reason(&m), Some(TriggerReason::ConfidenceExceedsEvidence));
    }

    #[test]
    fn test_unhedged_confidence_triggers() {
        let m = metrics(0.6, 5, 1, LanguageSignals { absolutes: 0, hedging_score: 0.1 });
        assert_eq!(trigger_reason(&m), Some(TriggerReason::UnhedgedConfidence));
    }

    #[test]
    fn test_hedged_claim_passes() {
        let m = metrics(0.6, 5, 1, LanguageSignals { absolutes: 1, hedging_score: 0.5 });
        assert!(!should_trigger(&m));
    }
}

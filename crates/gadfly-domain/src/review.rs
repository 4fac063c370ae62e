//! Ephemeral artifacts produced during a single adversarial review

use crate::id::EntryId;
use serde::{Deserialize, Serialize};

/// An implicit claim pulled out of synthesis text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assumption {
    /// The claim text
    pub claim: String,
    /// Heuristic confidence in the claim
    pub confidence: f64,
}

/// A vault entry that appears to contradict an assumption
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contradiction {
    /// The assumption being contradicted
    pub assumption: String,
    /// Entry holding the conflicting evidence
    pub source_entry_id: EntryId,
    /// Why it was flagged
    pub reason: String,
    /// Contradiction strength in `[0, 1]`
    pub strength: f64,
}

/// The negated restatement of an assumption
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counterfactual {
    /// Claim as extracted
    pub original: String,
    /// Inverted hypothesis
    pub counter: String,
    /// Risk label
    pub risk: String,
}

/// Outcome of the confidence stress test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceAssessment {
    /// Fixed baseline the penalty is applied to
    pub original_confidence: f64,
    /// Baseline minus the contradiction penalty, floored and rounded
    pub adjusted_confidence: f64,
    /// User-facing warning when the penalty is material
    pub warning: Option<String>,
}

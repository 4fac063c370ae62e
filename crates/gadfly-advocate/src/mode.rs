//! Review modes and their rule-based metrics

use gadfly_domain::Contradiction;
use gadfly_heuristics::lexicon::SPECULATIVE_TERMS;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a synthesis is reviewed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewMode {
    /// Steel-man plus debate
    #[default]
    Standard,
    /// Steel-man plus debate, requested explicitly
    Steelman,
    /// Burden-of-proof metrics plus debate
    Legal,
    /// Peer-review metrics plus debate
    Academic,
}

impl ReviewMode {
    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewMode::Standard => "standard",
            ReviewMode::Steelman => "steelman",
            ReviewMode::Legal => "legal",
            ReviewMode::Academic => "academic",
        }
    }
}

impl fmt::Display for ReviewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReviewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(ReviewMode::Standard),
            "steelman" => Ok(ReviewMode::Steelman),
            "legal" => Ok(ReviewMode::Legal),
            "academic" => Ok(ReviewMode::Academic),
            other => Err(format!("Unknown review mode: {}", other)),
        }
    }
}

/// Whether the evidence survives scrutiny
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvidenceWeight {
    /// Three or fewer contradictions
    Admissible,
    /// More than three contradictions
    Compromised,
}

/// Burden-of-proof assessment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalMetrics {
    /// Occurrences of speculative language
    pub speculative_count: usize,
    /// No contradictions and fewer than five speculative terms
    pub burden_met: bool,
    /// Evidence weight label
    pub evidence_weight: EvidenceWeight,
    /// One-line verdict
    pub verdict: String,
}

/// Replication risk label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReplicationRisk {
    /// No contradictions
    Low,
    /// At least one contradiction
    High,
}

/// Academic confidence grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceGrade {
    /// At most one contradiction
    PeerVerified,
    /// More than one contradiction
    Provisional,
}

/// Peer-review style assessment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcademicMetrics {
    /// Long enough and free of first-person opinion
    pub peer_supported: bool,
    /// Replication risk
    pub replication_risk: ReplicationRisk,
    /// Fewer than four citation markers (`*`)
    pub missing_citations: bool,
    /// Grade
    pub confidence_grade: ConfidenceGrade,
}

/// Mode-specific metrics attached to a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ReviewMetrics {
    /// Legal mode
    Legal(LegalMetrics),
    /// Academic mode
    Academic(AcademicMetrics),
}

/// What a mode handler contributes to the report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModeOutcome {
    /// Steel-man counter-argument, for modes that request one
    pub steelman: Option<String>,
    /// Rule-based metrics, for modes that compute them
    pub metrics: Option<ReviewMetrics>,
}

fn count_speculative(text: &str) -> usize {
    let lower = text.to_lowercase();
    SPECULATIVE_TERMS
        .iter()
        .map(|term| lower.matches(term).count())
        .sum()
}

/// Legal-mode metrics
pub fn legal_review(synthesis: &str, contradictions: &[Contradiction]) -> LegalMetrics {
    let speculative_count = count_speculative(synthesis);
    let n = contradictions.len();

    LegalMetrics {
        speculative_count,
        burden_met: n == 0 && speculative_count < 5,
        evidence_weight: if n > 3 {
            EvidenceWeight::Compromised
        } else {
            EvidenceWeight::Admissible
        },
        verdict: if n > 2 {
            "Insufficient proof beyond reasonable doubt.".to_string()
        } else {
            "Provisional admissibility granted.".to_string()
        },
    }
}

/// Academic-mode metrics
pub fn academic_review(synthesis: &str, contradictions: &[Contradiction]) -> AcademicMetrics {
    let n = contradictions.len();

    AcademicMetrics {
        peer_supported: !synthesis.to_lowercase().contains("i think")
            && synthesis.chars().count() > 500,
        replication_risk: if n > 0 {
            ReplicationRisk::High
        } else {
            ReplicationRisk::Low
        },
        missing_citations: synthesis.matches('*').count() < 4,
        confidence_grade: if n > 1 {
            ConfidenceGrade::Provisional
        } else {
            ConfidenceGrade::PeerVerified
        },
    }
}

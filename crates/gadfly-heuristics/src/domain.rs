//! Domain classification and per-domain evidence policy

use crate::lexicon::{contains_any, LEGAL_KEYWORDS, MEDICAL_KEYWORDS, TECH_KEYWORDS};
use gadfly_domain::{EvidenceType, KnowledgeEntry, SourceResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Confidence cap for medical entries backed by a randomized trial
pub const MEDICAL_RCT_CAP: f64 = 0.95;

/// Confidence cap for medical entries without one
pub const MEDICAL_OBSERVATIONAL_CAP: f64 = 0.7;

/// Recheck interval for tech entries
pub const TECH_RECHECK_DAYS: u32 = 7;

const MEDICAL_WARNING: &str = "Clinical evidence relies on observational data. Confidence capped.";
const LEGAL_WARNING: &str = "Legal interpretations are jurisdiction-sensitive. Verify local statutes.";

/// Knowledge domain of an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    /// Health and clinical claims
    Medical,
    /// Statutes and case law
    Legal,
    /// Software and technology
    Tech,
    /// Everything else
    General,
}

/// How quickly knowledge in a domain goes out of date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Volatility {
    /// Stable for years
    Low,
    /// Changes occasionally
    Medium,
    /// Changes constantly
    High,
}

/// Domain-specific caps and warnings for an entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DomainPolicy {
    /// Warning to surface alongside findings
    pub warning: Option<String>,
    /// Upper bound on the entry's confidence
    pub confidence_cap: Option<f64>,
    /// Whether the domain demands a top evidence tier
    pub requires_evidence_tier: bool,
    /// Volatility label
    pub volatility: Option<Volatility>,
    /// Suggested recheck interval
    pub recheck_interval_days: Option<u32>,
}

impl DomainPolicy {
    /// Apply the cap (if any) to a confidence value
    pub fn cap(&self, confidence: f64) -> f64 {
        match self.confidence_cap {
            Some(cap) => confidence.min(cap),
            None => confidence,
        }
    }
}

impl Domain {
    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Medical => "medical",
            Domain::Legal => "legal",
            Domain::Tech => "tech",
            Domain::General => "general",
        }
    }

    /// Policy for `entry` given freshly found `sources`
    pub fn policy(&self, _entry: &KnowledgeEntry, sources: &[SourceResult]) -> DomainPolicy {
        match self {
            Domain::Medical => {
                let has_rct = sources
                    .iter()
                    .any(|s| s.evidence == Some(EvidenceType::Rct));
                DomainPolicy {
                    requires_evidence_tier: true,
                    confidence_cap: Some(if has_rct {
                        MEDICAL_RCT_CAP
                    } else {
                        MEDICAL_OBSERVATIONAL_CAP
                    }),
                    warning: (!has_rct).then(|| MEDICAL_WARNING.to_string()),
                    ..DomainPolicy::default()
                }
            }
            Domain::Legal => DomainPolicy {
                warning: Some(LEGAL_WARNING.to_string()),
                ..DomainPolicy::default()
            },
            Domain::Tech => DomainPolicy {
                volatility: Some(Volatility::High),
                recheck_interval_days: Some(TECH_RECHECK_DAYS),
                ..DomainPolicy::default()
            },
            Domain::General => DomainPolicy::default(),
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify an entry by tag, then by keywords in its summary and content
///
/// Checked in order medical, legal, tech; the first match wins.
pub fn infer_domain(entry: &KnowledgeEntry) -> Domain {
    let text = format!("{} {}", entry.summary, entry.content).to_lowercase();

    let rules = [
        (Domain::Medical, MEDICAL_KEYWORDS),
        (Domain::Legal, LEGAL_KEYWORDS),
        (Domain::Tech, TECH_KEYWORDS),
    ];
    rules
        .into_iter()
        .find(|(domain, keywords)| entry.has_tag(domain.as_str()) || contains_any(&text, keywords))
        .map(|(domain, _)| domain)
        .unwrap_or(Domain::General)
}

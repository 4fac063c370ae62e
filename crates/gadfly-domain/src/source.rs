//! Evidence references
//!
//! `SourceRef` is what an entry records about its own evidence base;
//! `SourceResult` is what a grounded search returns.

use serde::{Deserialize, Serialize};

/// A source recorded in an entry's metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    /// Location of the source
    pub uri: String,
    /// Human-readable title
    pub title: String,
}

impl SourceRef {
    /// Create a new source reference
    pub fn new(uri: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            title: title.into(),
        }
    }
}

/// Where a search result came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceOrigin {
    /// Open web grounding
    Web,
    /// The local vault
    Vault,
    /// Internal knowledge of the reasoning service
    Internal,
    /// News feeds
    News,
    /// Academic indexes
    Academic,
}

/// Evidence tier of a source, used by the domain policy table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceType {
    /// Randomized controlled trial
    Rct,
    /// Observational study
    Observational,
    /// Statute text
    Statute,
    /// Case law
    Case,
    /// Independent reporting
    Independent,
    /// Vendor-published material
    Vendor,
}

/// A grounded search result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceResult {
    /// Title of the result
    pub title: String,
    /// Location of the result
    pub uri: String,
    /// Short excerpt or relay note
    pub snippet: String,
    /// Which channel produced it
    pub origin: SourceOrigin,
    /// Relevance score, if the producer assigns one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// Evidence tier, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<EvidenceType>,
}

impl SourceResult {
    /// Create a web result with no score or evidence tier
    pub fn web(title: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            uri: uri.into(),
            snippet: String::new(),
            origin: SourceOrigin::Web,
            score: None,
            evidence: None,
        }
    }

    /// Set the evidence tier
    pub fn with_evidence(mut self, evidence: EvidenceType) -> Self {
        self.evidence = Some(evidence);
        self
    }

    /// Set the snippet
    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = snippet.into();
        self
    }

    /// Set the relevance score
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    /// Reduce to the reference form stored in entry metadata
    pub fn to_ref(&self) -> SourceRef {
        SourceRef::new(self.uri.clone(), self.title.clone())
    }
}

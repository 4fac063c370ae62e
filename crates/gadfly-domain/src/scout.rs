//! Red-team scout bookkeeping: memory, goals, threads and inbox updates

use crate::entry::current_timestamp;
use crate::id::{EntryId, UpdateId};
use crate::source::SourceResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Urgency of a goal or update
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Background interest
    Low,
    /// Worth a look
    Medium,
    /// Needs attention
    High,
}

/// A past high-impact finding the scout remembers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalError {
    /// Entry the finding was attached to
    pub synthesis_id: EntryId,
    /// The finding message
    pub hypothesis: String,
    /// Whether the finding counts as a confirmed correction
    pub confirmed: bool,
}

/// What the scout knows about the vault at the start of a cycle
///
/// Recomputed from the store each cycle; never persisted on its own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoutMemory {
    /// Most frequent tags, most frequent first
    pub interests: Vec<String>,
    /// Low-confidence investigation entries
    pub unresolved_threads: Vec<EntryId>,
    /// Past scout and adversarial findings
    pub historical_errors: Vec<HistoricalError>,
}

/// An investigation objective for one cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoutGoal {
    /// Search focus text
    pub focus: String,
    /// Goal urgency
    pub priority: Priority,
}

/// Lifecycle of a research thread
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreadStatus {
    /// Still being investigated
    Open,
    /// Closed by the user
    Resolved,
}

/// An investigation opened against a contested entry
///
/// Materialized in the store as a new entry tagged `investigation`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchThread {
    /// Id of the materialized entry
    pub id: EntryId,
    /// Short title
    pub title: String,
    /// Entry being questioned
    pub origin: EntryId,
    /// Thread status
    pub status: ThreadStatus,
    /// Creator name
    pub created_by: String,
    /// Hypothesis under investigation
    pub focus: String,
    /// Evidence gathered so far
    pub sources: Vec<SourceResult>,
    /// Starting confidence
    pub confidence: f64,
    /// Seconds since epoch
    pub created_at: u64,
}

/// What a scout update refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "id")]
pub enum UpdateTarget {
    /// A vault-wide goal rather than one entry
    Global,
    /// A specific entry
    Entry(EntryId),
}

impl fmt::Display for UpdateTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateTarget::Global => write!(f, "global"),
            UpdateTarget::Entry(id) => write!(f, "{}", id),
        }
    }
}

/// A notification pushed to the user's inbox
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoutUpdate {
    /// Unique identifier
    pub id: UpdateId,
    /// Entry (or global goal) this refers to
    pub synthesis_id: UpdateTarget,
    /// Headline
    pub title: String,
    /// Hypothesis or goal focus that produced it
    pub hypothesis: String,
    /// Narrative of what was found
    pub findings: String,
    /// Novelty of the findings in `[0, 1]`
    pub drift_score: f64,
    /// Seconds since epoch
    pub timestamp: u64,
    /// Urgency
    pub priority: Priority,
    /// Whether the user has seen it
    pub read: bool,
}

impl ScoutUpdate {
    /// Create an unread update stamped now
    pub fn new(
        synthesis_id: UpdateTarget,
        title: impl Into<String>,
        hypothesis: impl Into<String>,
        findings: impl Into<String>,
        drift_score: f64,
        priority: Priority,
    ) -> Self {
        Self {
            id: UpdateId::new(),
            synthesis_id,
            title: title.into(),
            hypothesis: hypothesis.into(),
            findings: findings.into(),
            drift_score: crate::clamp_unit(drift_score),
            timestamp: current_timestamp(),
            priority,
            read: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::High > Priority::Medium);
        assert!(Priority::Medium > Priority::Low);
    }

    #[test]
    fn test_update_target_display() {
        assert_eq!(UpdateTarget::Global.to_string(), "global");
        let id = EntryId::new();
        assert_eq!(UpdateTarget::Entry(id).to_string(), id.to_string());
    }

    #[test]
    fn test_update_is_unread() {
        let u = ScoutUpdate::new(UpdateTarget::Global, "t", "h", "f", 1.5, Priority::Low);
        assert!(!u.read);
        assert_eq!(u.drift_score, 1.0);
    }
}

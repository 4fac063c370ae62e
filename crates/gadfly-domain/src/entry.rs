//! Knowledge entries - the nodes of the vault

use crate::annotation::Annotation;
use crate::confidence::clamp_unit;
use crate::id::EntryId;
use crate::source::SourceRef;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Seconds in one day
pub const SECONDS_PER_DAY: u64 = 86_400;

/// Current timestamp in seconds since Unix epoch
pub fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// A typed edge from one entry to another
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryLink {
    /// Entry being pointed at
    pub target: EntryId,
    /// Relation label (e.g. "questions")
    pub relation: String,
}

/// Metadata carried by every entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryMetadata {
    /// Confidence in `[0, 1]`, if one has been assigned
    pub confidence: Option<f64>,
    /// Free-form tags
    #[serde(default)]
    pub tags: Vec<String>,
    /// Recorded evidence base
    #[serde(default)]
    pub sources: Vec<SourceRef>,
    /// Links to other entries
    #[serde(default)]
    pub links: Vec<EntryLink>,
}

/// A versioned vault entry
///
/// Entries are never edited in place: the store appends a new version for
/// every mutation and readers see the latest one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    /// Stable identifier shared by all versions
    pub id: EntryId,
    /// Version number, starting at 1
    pub version: u32,
    /// Full text
    pub content: String,
    /// One-line summary
    pub summary: String,
    /// Confidence, tags, sources, links
    pub metadata: EntryMetadata,
    /// Creation time (seconds since epoch)
    pub created_at: u64,
    /// Last update time (seconds since epoch)
    pub updated_at: u64,
    /// Attached objections and findings, in append order
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl KnowledgeEntry {
    /// Create a first-version entry stamped with the current time
    pub fn new(content: impl Into<String>, summary: impl Into<String>) -> Self {
        let now = current_timestamp();
        Self {
            id: EntryId::new(),
            version: 1,
            content: content.into(),
            summary: summary.into(),
            metadata: EntryMetadata::default(),
            created_at: now,
            updated_at: now,
            annotations: Vec::new(),
        }
    }

    /// Set the confidence (clamped to `[0, 1]`)
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.metadata.confidence = Some(clamp_unit(confidence));
        self
    }

    /// Add tags
    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.metadata.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Add recorded sources
    pub fn with_sources(mut self, sources: Vec<SourceRef>) -> Self {
        self.metadata.sources.extend(sources);
        self
    }

    /// Add a link to another entry
    pub fn with_link(mut self, target: EntryId, relation: impl Into<String>) -> Self {
        self.metadata.links.push(EntryLink {
            target,
            relation: relation.into(),
        });
        self
    }

    /// Backdate the update timestamp (used for staleness checks and tests)
    pub fn updated_at(mut self, timestamp: u64) -> Self {
        self.updated_at = timestamp;
        self
    }

    /// Whether the entry carries the given tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.metadata.tags.iter().any(|t| t == tag)
    }

    /// Whole days since the last update, relative to `now`
    pub fn age_days(&self, now: u64) -> f64 {
        now.saturating_sub(self.updated_at) as f64 / SECONDS_PER_DAY as f64
    }

    /// Derive the next version of this entry
    ///
    /// The returned value shares the id and bumps the version. `updated_at`
    /// is left alone: annotations and thread replies are recorded as new
    /// versions but do not revise the entry's content. Callers apply their
    /// change to it and hand it to the store.
    pub fn next_version(&self) -> Self {
        let mut next = self.clone();
        next.version = self.version + 1;
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_entry_defaults() {
        let entry = KnowledgeEntry::new("content", "summary");
        assert_eq!(entry.version, 1);
        assert!(entry.annotations.is_empty());
        assert_eq!(entry.created_at, entry.updated_at);
        assert_eq!(entry.metadata.confidence, None);
    }

    #[test]
    fn test_confidence_is_clamped() {
        let entry = KnowledgeEntry::new("c", "s").with_confidence(1.4);
        assert_eq!(entry.metadata.confidence, Some(1.0));
    }

    #[test]
    fn test_age_days() {
        let now = current_timestamp();
        let entry = KnowledgeEntry::new("c", "s").updated_at(now - 31 * SECONDS_PER_DAY);
        assert!(entry.age_days(now) > 30.0);
        assert!(entry.age_days(now) < 32.0);
    }

    #[test]
    fn test_next_version_keeps_id() {
        let entry = KnowledgeEntry::new("c", "s").with_tags(["tech"]);
        let next = entry.next_version();
        assert_eq!(next.id, entry.id);
        assert_eq!(next.version, 2);
        assert!(next.has_tag("tech"));
    }

    #[test]
    fn test_next_version_keeps_update_time() {
        let now = current_timestamp();
        let entry = KnowledgeEntry::new("c", "s").updated_at(now - 60 * SECONDS_PER_DAY);
        let next = entry.next_version();
        assert_eq!(next.updated_at, entry.updated_at);
        assert!(next.age_days(now) > 59.0);
    }
}

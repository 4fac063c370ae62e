//! Append-only, versioned in-memory knowledge store

use crate::StoreError;
use gadfly_domain::traits::KnowledgeStore;
use gadfly_domain::{Annotation, AnnotationId, ConversationMessage, EntryId, KnowledgeEntry};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use tracing::debug;

/// Versions of one entry, oldest first
type History = Arc<Mutex<Vec<KnowledgeEntry>>>;

/// In-memory `KnowledgeStore`
///
/// # Thread Safety
///
/// The outer map is only write-locked to register a new entry id. All
/// appends lock just the history of the entry they touch.
#[derive(Debug, Default)]
pub struct MemoryVault {
    entries: RwLock<HashMap<EntryId, History>>,
}

impl MemoryVault {
    /// Create an empty vault
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a vault pre-populated with entries
    pub fn with_entries(entries: impl IntoIterator<Item = KnowledgeEntry>) -> Result<Self, StoreError> {
        let vault = Self::new();
        for entry in entries {
            vault.create_entry(entry)?;
        }
        Ok(vault)
    }

    /// Number of distinct entries
    pub fn len(&self) -> usize {
        self.entries.read().map(|m| m.len()).unwrap_or(0)
    }

    /// Whether the vault has no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All versions of an entry, newest first
    pub fn history(&self, id: EntryId) -> Result<Vec<KnowledgeEntry>, StoreError> {
        let history = self.history_handle(id)?;
        let versions = history.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(versions.iter().rev().cloned().collect())
    }

    fn history_handle(&self, id: EntryId) -> Result<History, StoreError> {
        let map = self.entries.read().map_err(|_| StoreError::LockPoisoned)?;
        map.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    /// Apply `change` to the latest version of `id`, recording the result as
    /// a new version
    fn append_version<F>(&self, id: EntryId, change: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut KnowledgeEntry) -> Result<(), StoreError>,
    {
        let history = self.history_handle(id)?;
        let mut versions = history.lock().map_err(|_| StoreError::LockPoisoned)?;
        let latest = versions.last().ok_or(StoreError::NotFound(id))?;

        let mut next = latest.next_version();
        change(&mut next)?;
        debug!("Entry {} advanced to version {}", id, next.version);
        versions.push(next);
        Ok(())
    }
}

impl KnowledgeStore for MemoryVault {
    type Error = StoreError;

    fn list_entries(&self) -> Result<Vec<KnowledgeEntry>, Self::Error> {
        let handles: Vec<History> = {
            let map = self.entries.read().map_err(|_| StoreError::LockPoisoned)?;
            map.values().cloned().collect()
        };

        let mut latest = Vec::with_capacity(handles.len());
        for history in handles {
            let versions = history.lock().map_err(|_| StoreError::LockPoisoned)?;
            if let Some(entry) = versions.last() {
                latest.push(entry.clone());
            }
        }

        latest.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(b.id.cmp(&a.id)));
        Ok(latest)
    }

    fn get_entry(&self, id: EntryId) -> Result<Option<KnowledgeEntry>, Self::Error> {
        let history = match self.history_handle(id) {
            Ok(history) => history,
            Err(StoreError::NotFound(_)) => return Ok(None),
            Err(e) => return Err(e),
        };
        let versions = history.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(versions.last().cloned())
    }

    fn create_entry(&self, entry: KnowledgeEntry) -> Result<EntryId, Self::Error> {
        let id = entry.id;
        let history = {
            let mut map = self.entries.write().map_err(|_| StoreError::LockPoisoned)?;
            map.entry(id).or_default().clone()
        };

        let mut versions = history.lock().map_err(|_| StoreError::LockPoisoned)?;
        let mut entry = entry;
        if let Some(latest) = versions.last() {
            // Re-submitting an existing id records a new version
            entry.version = latest.version + 1;
        }
        debug!("Stored entry {} (version {})", id, entry.version);
        versions.push(entry);
        Ok(id)
    }

    fn append_annotation(
        &self,
        entry_id: EntryId,
        annotation: Annotation,
    ) -> Result<(), Self::Error> {
        self.append_version(entry_id, |entry| {
            entry.annotations.push(annotation);
            Ok(())
        })
    }

    fn append_thread_message(
        &self,
        entry_id: EntryId,
        annotation_id: AnnotationId,
        message: ConversationMessage,
    ) -> Result<(), Self::Error> {
        self.append_version(entry_id, |entry| {
            let annotation = entry
                .annotations
                .iter_mut()
                .find(|a| a.id == annotation_id)
                .ok_or(StoreError::AnnotationNotFound {
                    entry: entry_id,
                    annotation: annotation_id,
                })?;
            annotation.thread.push(message);
            Ok(())
        })
    }
}

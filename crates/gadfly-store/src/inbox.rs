//! In-memory scout inbox

use gadfly_domain::traits::ScoutInbox;
use gadfly_domain::{ScoutUpdate, UpdateId};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Collects scout updates in arrival order
#[derive(Debug, Default)]
pub struct MemoryInbox {
    updates: Mutex<Vec<ScoutUpdate>>,
}

impl MemoryInbox {
    /// Create an empty inbox
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> MutexGuard<'_, Vec<ScoutUpdate>> {
        // A push never leaves the vector half-written
        self.updates.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// All updates, oldest first
    pub fn updates(&self) -> Vec<ScoutUpdate> {
        self.guard().clone()
    }

    /// Updates the user has not seen yet
    pub fn unread(&self) -> Vec<ScoutUpdate> {
        self.guard().iter().filter(|u| !u.read).cloned().collect()
    }

    /// Mark one update as read; returns whether it was found
    pub fn mark_read(&self, id: UpdateId) -> bool {
        match self.guard().iter_mut().find(|u| u.id == id) {
            Some(update) => {
                update.read = true;
                true
            }
            None => false,
        }
    }

    /// Number of updates received
    pub fn len(&self) -> usize {
        self.guard().len()
    }

    /// Whether nothing has been received
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ScoutInbox for MemoryInbox {
    fn push(&self, update: ScoutUpdate) {
        debug!("Inbox received '{}' for {}", update.title, update.synthesis_id);
        self.guard().push(update);
    }
}

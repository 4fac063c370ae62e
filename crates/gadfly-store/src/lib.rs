//! Gadfly Storage Layer
//!
//! In-memory implementations of the `KnowledgeStore` and `ScoutInbox`
//! traits. Host applications with their own persistence implement the
//! traits directly; these implementations back tests and embedded use.
//!
//! # Architecture
//!
//! - Every entry owns its own version history behind its own lock, so
//!   appends to different entries never contend and appends to the same
//!   entry are serialized
//! - Mutations push a new version; earlier versions stay readable through
//!   [`MemoryVault::history`]
//!
//! # Examples
//!
//! ```
//! use gadfly_domain::traits::KnowledgeStore;
//! use gadfly_domain::KnowledgeEntry;
//! use gadfly_store::MemoryVault;
//!
//! let vault = MemoryVault::new();
//! let id = vault.create_entry(KnowledgeEntry::new("body", "summary")).unwrap();
//! assert!(vault.get_entry(id).unwrap().is_some());
//! ```

#![warn(missing_docs)]

mod inbox;
mod vault;

pub use inbox::MemoryInbox;
pub use vault::MemoryVault;

use gadfly_domain::{AnnotationId, EntryId};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Entry not found
    #[error("Entry not found: {0}")]
    NotFound(EntryId),

    /// Annotation not found on the given entry
    #[error("Annotation {annotation} not found on entry {entry}")]
    AnnotationNotFound {
        /// Entry that was searched
        entry: EntryId,
        /// Missing annotation
        annotation: AnnotationId,
    },

    /// A writer panicked while holding a lock
    #[error("Store lock poisoned")]
    LockPoisoned,
}

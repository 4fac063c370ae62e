//! Gadfly Domain Layer
//!
//! Core vocabulary of the adversarial review engine: knowledge entries and
//! their annotations, the ephemeral review artifacts (assumptions,
//! contradictions, counterfactuals), scout bookkeeping, and the trait seams
//! every other crate is written against.
//!
//! ## Key Concepts
//!
//! - **KnowledgeEntry**: a versioned vault node; mutations append, never overwrite
//! - **Annotation**: an objection or finding attached to exactly one entry,
//!   carrying its own ordered conversation thread
//! - **Severity / confidence**: always clamped to `[0, 1]`
//!
//! ## Architecture
//!
//! Infrastructure lives elsewhere:
//! - `KnowledgeStore` is implemented by `gadfly-store` (or the host application)
//! - `ReasoningService` is implemented by `gadfly-llm`
//! - `ScoutInbox` receives user-facing scout notifications

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod annotation;
pub mod confidence;
pub mod entry;
pub mod id;
pub mod review;
pub mod scout;
pub mod source;
pub mod traits;

// Re-exports for convenience
pub use annotation::{Annotation, AnnotationKind, ConversationMessage, Role};
pub use confidence::{clamp_unit, round2};
pub use entry::{current_timestamp, EntryLink, EntryMetadata, KnowledgeEntry, SECONDS_PER_DAY};
pub use id::{AnnotationId, EntryId, UpdateId};
pub use review::{Assumption, ConfidenceAssessment, Contradiction, Counterfactual};
pub use scout::{
    HistoricalError, Priority, ResearchThread, ScoutGoal, ScoutMemory, ScoutUpdate, ThreadStatus,
    UpdateTarget,
};
pub use source::{EvidenceType, SourceOrigin, SourceRef, SourceResult};

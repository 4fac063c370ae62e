//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the review engine and its
//! collaborators. Implementations live in other crates or in the host
//! application.

use crate::{
    Annotation, AnnotationId, ConversationMessage, EntryId, KnowledgeEntry, ScoutUpdate,
    SourceResult,
};
use async_trait::async_trait;

/// Trait for reading and appending to the knowledge store
///
/// Implemented by the infrastructure layer (gadfly-store). Every method takes
/// `&self`: the store is shared by handle between the scout, the watchdog
/// and interactive replies, so implementations must serialize writes to a
/// single entry internally.
pub trait KnowledgeStore: Send + Sync {
    /// Error type for store operations
    type Error: std::fmt::Display + Send + Sync + 'static;

    /// Latest version of every entry, most recently updated first
    fn list_entries(&self) -> Result<Vec<KnowledgeEntry>, Self::Error>;

    /// Latest version of one entry
    fn get_entry(&self, id: EntryId) -> Result<Option<KnowledgeEntry>, Self::Error>;

    /// Insert a new entry (or a new version of an existing one)
    fn create_entry(&self, entry: KnowledgeEntry) -> Result<EntryId, Self::Error>;

    /// Append an annotation to an entry
    fn append_annotation(&self, entry_id: EntryId, annotation: Annotation)
        -> Result<(), Self::Error>;

    /// Append a message to an annotation's thread
    fn append_thread_message(
        &self,
        entry_id: EntryId,
        annotation_id: AnnotationId,
        message: ConversationMessage,
    ) -> Result<(), Self::Error>;
}

/// Options for one generation request
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateOptions {
    /// Persona/system prompt
    pub system_instruction: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Output length cap, if any
    pub max_output_tokens: Option<u32>,
    /// Ask the service to ground the answer in search results
    pub grounding: bool,
}

impl GenerateOptions {
    /// Ungrounded request with no length cap
    pub fn new(system_instruction: impl Into<String>, temperature: f32) -> Self {
        Self {
            system_instruction: system_instruction.into(),
            temperature,
            max_output_tokens: None,
            grounding: false,
        }
    }

    /// Cap the output length
    pub fn with_max_output_tokens(mut self, tokens: u32) -> Self {
        self.max_output_tokens = Some(tokens);
        self
    }

    /// Request grounded sources
    pub fn grounded(mut self) -> Self {
        self.grounding = true;
        self
    }
}

/// Result of one generation request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Generation {
    /// Free text answer (may be empty)
    pub text: String,
    /// Grounded sources, when grounding was requested and supported
    pub grounding_sources: Vec<SourceResult>,
}

/// Trait for the generative reasoning backend
///
/// Implemented by the infrastructure layer (gadfly-llm)
#[async_trait]
pub trait ReasoningService: Send + Sync {
    /// Error type for generation failures
    type Error: std::error::Error + Send + Sync + 'static;

    /// Whether credentials/endpoint are present
    ///
    /// Callers substitute a fallback string instead of calling `generate`
    /// when this returns `false`.
    fn is_configured(&self) -> bool {
        true
    }

    /// Generate a completion
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerateOptions,
    ) -> Result<Generation, Self::Error>;
}

/// Sink for user-facing scout notifications
pub trait ScoutInbox: Send + Sync {
    /// Push an update to the inbox
    fn push(&self, update: ScoutUpdate);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_options_builder() {
        let opts = GenerateOptions::new("persona", 0.2)
            .with_max_output_tokens(150)
            .grounded();
        assert_eq!(opts.max_output_tokens, Some(150));
        assert!(opts.grounding);
        assert_eq!(opts.temperature, 0.2);
    }
}

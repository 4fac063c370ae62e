//! Annotations and their conversation threads

use crate::confidence::clamp_unit;
use crate::entry::current_timestamp;
use crate::id::AnnotationId;
use crate::source::SourceResult;
use serde::{Deserialize, Serialize};

/// What kind of objection or finding an annotation records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationKind {
    /// An agent objects to the entry's reasoning
    Objection,
    /// Another vault entry contradicts this one
    Contradiction,
    /// The entry has not been revisited for a long time
    StalenessWarning,
    /// Counter-evidence found by adversarial search
    AdversarialFinding,
    /// Drift found by the red-team scout
    ScoutFinding,
}

impl AnnotationKind {
    /// Stable string form
    pub fn as_str(&self) -> &'static str {
        match self {
            AnnotationKind::Objection => "objection",
            AnnotationKind::Contradiction => "contradiction",
            AnnotationKind::StalenessWarning => "staleness_warning",
            AnnotationKind::AdversarialFinding => "adversarial_finding",
            AnnotationKind::ScoutFinding => "scout_finding",
        }
    }
}

/// Author of a thread message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// The vault owner
    User,
    /// The agent that raised the annotation
    Agent,
}

impl Role {
    /// Upper-case label used when replaying a thread into a prompt
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Agent => "AGENT",
        }
    }
}

/// One message in an annotation thread
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessage {
    /// Who wrote it
    pub role: Role,
    /// Message text
    pub content: String,
    /// Seconds since epoch
    pub timestamp: u64,
}

impl ConversationMessage {
    /// A user message stamped now
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            timestamp: current_timestamp(),
        }
    }

    /// An agent message stamped now
    pub fn agent(content: impl Into<String>) -> Self {
        Self {
            role: Role::Agent,
            content: content.into(),
            timestamp: current_timestamp(),
        }
    }
}

/// An objection or finding attached to a knowledge entry
///
/// Annotations are appended and never removed by the engine. The thread
/// grows strictly in append order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Unique identifier
    pub id: AnnotationId,
    /// Kind of finding
    pub kind: AnnotationKind,
    /// Name of the originating agent
    pub agent: String,
    /// Human-readable message
    pub message: String,
    /// How damaging the finding is, in `[0, 1]`
    pub severity: f64,
    /// Seconds since epoch
    pub timestamp: u64,
    /// Evidence backing the finding
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<SourceResult>>,
    /// Conversation thread
    #[serde(default)]
    pub thread: Vec<ConversationMessage>,
}

impl Annotation {
    /// Create an annotation stamped now; severity is clamped to `[0, 1]`
    pub fn new(
        kind: AnnotationKind,
        agent: impl Into<String>,
        message: impl Into<String>,
        severity: f64,
    ) -> Self {
        Self {
            id: AnnotationId::new(),
            kind,
            agent: agent.into(),
            message: message.into(),
            severity: clamp_unit(severity),
            timestamp: current_timestamp(),
            sources: None,
            thread: Vec::new(),
        }
    }

    /// Attach evidence
    pub fn with_sources(mut self, sources: Vec<SourceResult>) -> Self {
        self.sources = Some(sources);
        self
    }

    /// Seed the conversation thread with a message
    pub fn with_message(mut self, message: ConversationMessage) -> Self {
        self.thread.push(message);
        self
    }

    /// Render the thread as `ROLE: content` lines
    pub fn thread_transcript(&self) -> String {
        self.thread
            .iter()
            .map(|m| format!("{}: {}", m.role.label(), m.content))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

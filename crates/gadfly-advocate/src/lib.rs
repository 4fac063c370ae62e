//! Gadfly Advocate
//!
//! Adversarial review of a synthesis: the Devil's Advocate pipeline and the
//! skeptic entry point that runs it over a knowledge store.
//!
//! # Pipeline
//!
//! 1. Extract assumptions from the synthesis
//! 2. Score them against vault entries for contradictions
//! 3. Generate counterfactuals
//! 4. Run the mode handler (steel-man, legal metrics or academic metrics)
//! 5. Ask for a Defender / Skeptic / Judge debate
//! 6. Stress-test the confidence
//! 7. Assemble the [`ReviewReport`]
//!
//! Reasoning-service problems never fail a review. An unconfigured, failing
//! or silent service yields fixed fallback text in the affected section.
//!
//! # Configuration
//!
//! ```toml
//! trigger_policy = "advisory"   # or "gate"
//! steelman_temperature = 0.15
//! debate_temperature = 0.2
//! steelman_excerpt_chars = 1500
//! debate_excerpt_chars = 1000
//! max_key_contradictions = 5
//! max_counterfactuals = 3
//! default_entry_confidence = 0.7
//! attach_annotation = true
//! ```

#![warn(missing_docs)]

mod advocate;
mod config;
mod error;
mod mode;
mod prompt;
mod report;
mod skeptic;

pub use advocate::{
    DevilsAdvocate, DEBATE_EMPTY, DEBATE_FAILED, DEBATE_OFFLINE, STEELMAN_EMPTY, STEELMAN_FAILED,
    STEELMAN_OFFLINE,
};
pub use config::{AdvocateConfig, TriggerPolicy, MAX_COUNTERFACTUALS, MAX_KEY_CONTRADICTIONS};
pub use error::AdvocateError;
pub use mode::{
    academic_review, legal_review, AcademicMetrics, ConfidenceGrade, EvidenceWeight,
    LegalMetrics, ModeOutcome, ReplicationRisk, ReviewMetrics, ReviewMode,
};
pub use prompt::{build_debate_prompt, build_steelman_prompt, DebateContext};
pub use report::{ReviewReport, NO_DRIFT_VERDICT, REPORT_HEADLINE};
pub use skeptic::{SkepticOutcome, SkepticReview, SkepticReviewer, SKEPTIC_AGENT};

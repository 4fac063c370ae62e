//! Gadfly Watchdog
//!
//! Background disagreement for confident syntheses, and the append-only
//! mutation surface for annotation threads.
//!
//! # Overview
//!
//! [`Watchdog::on_event`] returns immediately. When a synthesis arrives
//! with confidence above the spike threshold it schedules:
//! - a **red-team critique** (after 2s) that attaches an `Objection` when
//!   the critique names a serious flaw
//! - an **adversarial counter-search** (after 5s) that runs every
//!   falsification query concurrently and attaches an `AdversarialFinding`
//!   listing the sources it found
//!
//! Jobs are keyed by (entry, job kind). A newer event for the same key
//! replaces a job that is still waiting; a job that already started runs
//! to completion. Every event also checks the target for staleness.
//!
//! [`AnnotationManager::reply_to_agent`] appends the user's message
//! immediately and lets the annotation's agent answer a second later.
//!
//! # Configuration
//!
//! ```toml
//! confidence_spike_threshold = 0.88
//! critique_delay_ms = 2000
//! counter_search_delay_ms = 5000
//! reply_delay_ms = 1000
//! staleness_days = 14
//! reply_word_limit = 120
//! ```

#![warn(missing_docs)]

mod adversarial;
mod annotations;
mod config;
mod error;
mod monitor;
mod red_team;
mod scheduler;

pub use adversarial::{
    adversarial_search, build_counter_prompt, ADVERSARIAL_AGENT, COUNTER_SCORE,
    UNTITLED_COUNTER_SOURCE,
};
pub use annotations::{build_reply_prompt, AnnotationManager, EMPTY_REPLY};
pub use config::WatchdogConfig;
pub use error::WatchdogError;
pub use monitor::{EventKind, MonitorReport, SynthesisEvent, Watchdog, WATCHDOG_AGENT};
pub use red_team::{
    build_red_team_prompt, critique_severity, run_red_team, Critique, EMPTY_CRITIQUE,
    RED_TEAM_AGENT,
};
pub use scheduler::{JobKind, JobScheduler};

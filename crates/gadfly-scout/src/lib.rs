//! Gadfly Scout
//!
//! Autonomous red-team research partner that keeps re-examining the vault
//! long after a synthesis was accepted.
//!
//! # Overview
//!
//! Each scout cycle:
//! - **Remembers**: rebuilds [`ScoutMemory`](gadfly_domain::ScoutMemory)
//!   from tag density, low-confidence investigations and past findings
//! - **Pursues goals**: searches for each derived goal and notifies the
//!   inbox when a search turns up more than a handful of sources
//! - **Audits**: picks a watchlist (confident but thinly sourced, stale, or
//!   randomly rotated), asks for hypotheses on how each entry could be
//!   wrong, searches for support and measures drift against the entry's
//!   recorded sources
//! - **Expands**: significant drift annotates the entry, pushes an update
//!   and, when confidence falls far enough, opens a research thread
//!
//! # Usage
//!
//! ## One-time Cycle
//!
//! ```no_run
//! use gadfly_llm::MockProvider;
//! use gadfly_scout::RedTeamScout;
//! use gadfly_store::{MemoryInbox, MemoryVault};
//! use std::sync::Arc;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let mut scout = RedTeamScout::new(
//!     Arc::new(MemoryVault::new()),
//!     Arc::new(MockProvider::default()),
//!     Arc::new(MemoryInbox::new()),
//! );
//! scout.run_cycle().await?;
//! println!("{}", scout.metrics().summary());
//! # Ok(())
//! # }
//! ```
//!
//! ## Background Worker
//!
//! See [`ScoutWorker`]: `run` ticks until Ctrl+C, `run_cycles(n)` stops
//! after `n` cycles.
//!
//! # Configuration
//!
//! ```toml
//! cycle_interval_minutes = 60
//! max_goals = 3
//! goal_min_results = 3
//! stale_days = 30
//! rotation_rate = 0.2
//! high_confidence_threshold = 0.8
//! min_sources = 3
//! watch_default_confidence = 0.5
//! audit_default_confidence = 0.8
//! thread_confidence_threshold = 0.6
//! max_hypotheses = 3
//! hypothesis_temperature = 0.15
//! hypothesis_max_tokens = 150
//! search_temperature = 0.2
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod goals;
mod hypotheses;
mod memory;
mod metrics;
mod scout;
mod search;
mod threads;
mod watchlist;
mod worker;

pub use config::ScoutConfig;
pub use error::ScoutError;
pub use goals::derive_scout_goals;
pub use hypotheses::{build_hypothesis_prompt, generate_hypotheses, parse_hypotheses};
pub use memory::{load_scout_memory, INVESTIGATION_TAG, MAX_HISTORICAL_ERRORS, MAX_INTERESTS};
pub use metrics::ScoutMetrics;
pub use scout::{
    AuditFinding, RedTeamScout, ScoutCycleReport, GOAL_UPDATE_TITLE, THREAD_SOURCE_LIMIT,
};
pub use search::{build_search_prompt, scout_search, SEARCH_SCORE, UNTITLED_SOURCE};
pub use threads::{open_research_thread, SCOUT_AGENT};
pub use watchlist::{scout_watchlist, watch_reason, WatchReason};
pub use worker::ScoutWorker;

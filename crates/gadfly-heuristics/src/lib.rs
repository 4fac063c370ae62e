//! Gadfly Heuristics
//!
//! Pure, explainable scoring functions used by the advocate, the scout and
//! the watchdog. Nothing in this crate performs I/O.
//!
//! # Pipeline pieces
//!
//! | Function | Purpose |
//! |----------|---------|
//! | [`extract_assumptions`] | implicit claims introduced by trigger phrases |
//! | [`extract_language_signals`] | absolutist and hedging vocabulary |
//! | [`find_contradictions`] | overlap-with-asymmetric-negation scoring |
//! | [`generate_counterfactuals`] | negated restatement of each claim |
//! | [`stress_test_confidence`] | confidence penalty per contradiction |
//! | [`infer_domain`] / [`Domain::policy`] | domain caps and warnings |
//! | [`should_trigger`] | whether a review is mandatory |
//! | [`detect_drift`] | novelty of fresh evidence |
//! | [`adjust_confidence`] | confidence after a scout finding |
//!
//! Every phrase and keyword table lives in [`lexicon`].
//!
//! # Examples
//!
//! ```
//! use gadfly_heuristics::{extract_assumptions, find_contradictions, stress_test_confidence};
//! use gadfly_domain::KnowledgeEntry;
//!
//! let synthesis = "This suggests that rates will rise soon.";
//! let vault = vec![KnowledgeEntry::new("rates will not rise soon", "Central bank notes")];
//!
//! let assumptions = extract_assumptions(synthesis);
//! let contradictions = find_contradictions(&assumptions, &vault);
//! let assessment = stress_test_confidence(&contradictions);
//! assert_eq!(assessment.adjusted_confidence, 0.73);
//! ```

#![warn(missing_docs)]

mod adjust;
mod assumptions;
mod contradiction;
mod counterfactual;
mod domain;
mod drift;
pub mod lexicon;
mod signals;
mod stress;
mod trigger;

pub use adjust::{adjust_confidence, MAX_DRIFT_PENALTY};
pub use assumptions::{extract_assumptions, DEFAULT_ASSUMPTION_CONFIDENCE};
pub use contradiction::{contradiction_score, find_contradictions, CONTRADICTION_THRESHOLD};
pub use counterfactual::{generate_counterfactuals, invert_claim, COUNTERFACTUAL_RISK};
pub use domain::{infer_domain, Domain, DomainPolicy, Volatility};
pub use drift::{detect_drift, DriftReport};
pub use signals::{extract_language_signals, LanguageSignals};
pub use stress::{
    adjusted_confidence, stress_test_confidence, BASELINE_CONFIDENCE, CONFIDENCE_FLOOR,
    HIGH_UNCERTAINTY_WARNING, MODERATE_DRIFT_WARNING,
};
pub use trigger::{should_trigger, trigger_reason, TriggerMetrics, TriggerReason};

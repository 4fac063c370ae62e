//! The Devil's Advocate pipeline

use crate::mode::{academic_review, legal_review, ModeOutcome, ReviewMetrics, ReviewMode};
use crate::prompt::{
    build_debate_prompt, build_steelman_prompt, DebateContext, DEBATE_SYSTEM, STEELMAN_SYSTEM,
};
use crate::report::{ReviewReport, REPORT_HEADLINE};
use crate::AdvocateConfig;
use gadfly_domain::traits::{GenerateOptions, ReasoningService};
use gadfly_domain::{Contradiction, KnowledgeEntry};
use gadfly_heuristics::{
    extract_assumptions, find_contradictions, generate_counterfactuals, stress_test_confidence,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Steel-man text when the service has no credentials
pub const STEELMAN_OFFLINE: &str = "Steelman engine disconnected.";
/// Steel-man text when the service call failed
pub const STEELMAN_FAILED: &str = "Neural link failed during adversarial synthesis.";
/// Steel-man text when the service returned nothing
pub const STEELMAN_EMPTY: &str = "No counter-argument reached threshold.";
/// Debate text when the service has no credentials
pub const DEBATE_OFFLINE: &str = "Debate engine offline: Missing credentials.";
/// Debate text when the service call failed
pub const DEBATE_FAILED: &str = "Adversarial reasoning link interrupted.";
/// Debate text when the service returned nothing
pub const DEBATE_EMPTY: &str = "Debate logic yielded no significant fractures.";

/// Literal substitutes for one reasoning request
struct Fallbacks {
    offline: &'static str,
    failed: &'static str,
    empty: &'static str,
}

const STEELMAN_FALLBACKS: Fallbacks = Fallbacks {
    offline: STEELMAN_OFFLINE,
    failed: STEELMAN_FAILED,
    empty: STEELMAN_EMPTY,
};

const DEBATE_FALLBACKS: Fallbacks = Fallbacks {
    offline: DEBATE_OFFLINE,
    failed: DEBATE_FAILED,
    empty: DEBATE_EMPTY,
};

/// Pressure-tests a synthesis against the vault and a reasoning service
///
/// Stages run strictly in order: assumptions, contradictions,
/// counterfactuals, mode handler, debate, stress test. A service that is
/// unconfigured, failing or silent degrades to literal fallback text; it
/// never aborts the review.
///
/// # Examples
///
/// ```
/// use gadfly_advocate::{DevilsAdvocate, ReviewMode};
/// use gadfly_llm::MockProvider;
/// use std::sync::Arc;
///
/// # async fn demo() {
/// let advocate = DevilsAdvocate::new(Arc::new(MockProvider::new("The Judge: overconfident.")));
/// let report = advocate
///     .review("This suggests that the market is saturated.", &[], ReviewMode::Standard)
///     .await;
/// assert_eq!(report.debate_outcome, "The Judge: overconfident.");
/// # }
/// ```
pub struct DevilsAdvocate<R> {
    service: Arc<R>,
    config: AdvocateConfig,
}

impl<R: ReasoningService> DevilsAdvocate<R> {
    /// Create an advocate with default configuration
    pub fn new(service: Arc<R>) -> Self {
        Self::with_config(service, AdvocateConfig::default())
    }

    /// Create an advocate with the given configuration
    pub fn with_config(service: Arc<R>, config: AdvocateConfig) -> Self {
        Self { service, config }
    }

    /// Get the configuration
    pub fn config(&self) -> &AdvocateConfig {
        &self.config
    }

    /// Run a full review of `synthesis` against `entries`
    pub async fn review(
        &self,
        synthesis: &str,
        entries: &[KnowledgeEntry],
        mode: ReviewMode,
    ) -> ReviewReport {
        let assumptions = extract_assumptions(synthesis);
        let contradictions = find_contradictions(&assumptions, entries);
        let counterfactuals = generate_counterfactuals(&assumptions);
        debug!(
            "Review [{}]: {} assumptions, {} contradictions",
            mode,
            assumptions.len(),
            contradictions.len()
        );

        let outcome = self.handle_mode(mode, synthesis, &contradictions).await;

        let debate_prompt = build_debate_prompt(
            &DebateContext {
                synthesis,
                assumptions: &assumptions,
                contradictions: &contradictions,
                counterfactuals: &counterfactuals,
            },
            self.config.debate_excerpt_chars,
        );
        let debate_outcome = self
            .ask(
                &debate_prompt,
                GenerateOptions::new(DEBATE_SYSTEM, self.config.debate_temperature),
                &DEBATE_FALLBACKS,
            )
            .await;

        let confidence = stress_test_confidence(&contradictions);
        info!(
            "Review [{}] complete: confidence {} -> {}",
            mode, confidence.original_confidence, confidence.adjusted_confidence
        );

        ReviewReport {
            headline: REPORT_HEADLINE.to_string(),
            key_contradictions: contradictions
                .into_iter()
                .take(self.config.max_key_contradictions)
                .collect(),
            counterfactuals: counterfactuals
                .into_iter()
                .take(self.config.max_counterfactuals)
                .collect(),
            debate_outcome,
            confidence,
            steelman: outcome.steelman,
            metrics: outcome.metrics,
            mode,
        }
    }

    async fn handle_mode(
        &self,
        mode: ReviewMode,
        synthesis: &str,
        contradictions: &[Contradiction],
    ) -> ModeOutcome {
        match mode {
            ReviewMode::Standard | ReviewMode::Steelman => ModeOutcome {
                steelman: Some(self.steelman(synthesis).await),
                metrics: None,
            },
            ReviewMode::Legal => ModeOutcome {
                steelman: None,
                metrics: Some(ReviewMetrics::Legal(legal_review(synthesis, contradictions))),
            },
            ReviewMode::Academic => ModeOutcome {
                steelman: None,
                metrics: Some(ReviewMetrics::Academic(academic_review(
                    synthesis,
                    contradictions,
                ))),
            },
        }
    }

    async fn steelman(&self, synthesis: &str) -> String {
        let prompt = build_steelman_prompt(synthesis, self.config.steelman_excerpt_chars);
        self.ask(
            &prompt,
            GenerateOptions::new(STEELMAN_SYSTEM, self.config.steelman_temperature),
            &STEELMAN_FALLBACKS,
        )
        .await
    }

    async fn ask(&self, prompt: &str, options: GenerateOptions, fallbacks: &Fallbacks) -> String {
        if !self.service.is_configured() {
            return fallbacks.offline.to_string();
        }

        match self.service.generate(prompt, &options).await {
            Ok(generation) if generation.text.trim().is_empty() => fallbacks.empty.to_string(),
            Ok(generation) => generation.text,
            Err(e) => {
                warn!("Reasoning request failed: {}", e);
                fallbacks.failed.to_string()
            }
        }
    }
}

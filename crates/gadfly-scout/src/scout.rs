//! The red-team scout: goal pursuit followed by a vault audit

use crate::hypotheses::generate_hypotheses;
use crate::memory::load_scout_memory;
use crate::search::scout_search;
use crate::threads::{open_research_thread, SCOUT_AGENT};
use crate::watchlist::{scout_watchlist, WatchReason};
use crate::{derive_scout_goals, ScoutConfig, ScoutError, ScoutMetrics};
use gadfly_domain::traits::{KnowledgeStore, ReasoningService, ScoutInbox};
use gadfly_domain::{
    current_timestamp, Annotation, AnnotationId, AnnotationKind, EntryId, KnowledgeEntry,
    Priority, ResearchThread, ScoutGoal, ScoutUpdate, UpdateTarget,
};
use gadfly_heuristics::{adjust_confidence, detect_drift, infer_domain, Domain, DriftReport};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Title of goal pursuit updates
pub const GOAL_UPDATE_TITLE: &str = "Goal Pursuit Result";

/// Drift score reported by goal pursuit updates
pub const GOAL_DRIFT_SCORE: f64 = 0.5;

/// Novelty above which a finding is pushed as high priority
pub const HIGH_PRIORITY_NOVELTY: f64 = 0.7;

/// Search results carried into an opened research thread
pub const THREAD_SOURCE_LIMIT: usize = 5;

/// One significant drift finding from the audit
#[derive(Debug, Clone, PartialEq)]
pub struct AuditFinding {
    /// Audited entry
    pub entry_id: EntryId,
    /// Hypothesis that found new evidence
    pub hypothesis: String,
    /// Domain of the entry
    pub domain: Domain,
    /// Drift between the search results and the entry's sources
    pub drift: DriftReport,
    /// Confidence before the finding
    pub previous_confidence: f64,
    /// Confidence after drift penalty and domain cap
    pub adjusted_confidence: f64,
    /// `ScoutFinding` annotation attached to the entry
    pub annotation_id: AnnotationId,
    /// Research thread opened for it, if any
    pub thread_id: Option<EntryId>,
    /// Priority of the inbox update
    pub priority: Priority,
}

/// What one scout cycle did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoutCycleReport {
    /// Goals pursued
    pub goals_pursued: usize,
    /// Goals whose search produced an inbox update
    pub goal_updates: usize,
    /// Entries audited and why
    pub watchlist: Vec<(EntryId, WatchReason)>,
    /// Hypotheses searched
    pub hypotheses_tested: usize,
    /// Significant findings
    pub findings: Vec<AuditFinding>,
    /// Research threads opened
    pub threads: Vec<ResearchThread>,
}

impl ScoutCycleReport {
    /// Inbox updates pushed during the cycle
    pub fn updates_pushed(&self) -> usize {
        self.goal_updates + self.findings.len()
    }
}

/// Red-team scout over a knowledge store
///
/// Each cycle rebuilds [`ScoutMemory`](gadfly_domain::ScoutMemory) from the
/// vault, pursues the first goals derived from it, then audits every
/// watchlisted entry: hypotheses, grounded searches, drift detection,
/// confidence adjustment and, for significant drift, an annotation, an
/// inbox update and possibly a research thread.
///
/// # Examples
///
/// ```
/// use gadfly_llm::MockProvider;
/// use gadfly_scout::RedTeamScout;
/// use gadfly_store::{MemoryInbox, MemoryVault};
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use std::sync::Arc;
///
/// # async fn demo() -> Result<(), gadfly_scout::ScoutError> {
/// let mut scout = RedTeamScout::new(
///     Arc::new(MemoryVault::new()),
///     Arc::new(MockProvider::default()),
///     Arc::new(MemoryInbox::new()),
/// )
/// .with_rng(StdRng::seed_from_u64(7));
///
/// let report = scout.run_cycle().await?;
/// println!("{} findings", report.findings.len());
/// # Ok(())
/// # }
/// ```
pub struct RedTeamScout<S, R, I> {
    store: Arc<S>,
    service: Arc<R>,
    inbox: Arc<I>,
    config: ScoutConfig,
    metrics: ScoutMetrics,
    rng: Box<dyn RngCore + Send>,
}

impl<S, R, I> RedTeamScout<S, R, I>
where
    S: KnowledgeStore,
    R: ReasoningService,
    I: ScoutInbox,
{
    /// Create a scout with default configuration
    pub fn new(store: Arc<S>, service: Arc<R>, inbox: Arc<I>) -> Self {
        Self::with_config(store, service, inbox, ScoutConfig::default())
    }

    /// Create a scout with the given configuration
    pub fn with_config(store: Arc<S>, service: Arc<R>, inbox: Arc<I>, config: ScoutConfig) -> Self {
        Self {
            store,
            service,
            inbox,
            config,
            metrics: ScoutMetrics::new(),
            rng: Box::new(StdRng::from_entropy()),
        }
    }

    /// Replace the random source used by the watchlist rotation
    pub fn with_rng(mut self, rng: impl RngCore + Send + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    /// Get the configuration
    pub fn config(&self) -> &ScoutConfig {
        &self.config
    }

    /// Get a reference to the current metrics
    pub fn metrics(&self) -> &ScoutMetrics {
        &self.metrics
    }

    /// Reset metrics counters
    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    /// Run one full cycle
    ///
    /// Reasoning-service failures only shrink what the cycle finds; store
    /// failures abort it.
    pub async fn run_cycle(&mut self) -> Result<ScoutCycleReport, ScoutError> {
        let start = Instant::now();
        let entries = self
            .store
            .list_entries()
            .map_err(|e| ScoutError::Store(e.to_string()))?;
        let mut report = ScoutCycleReport::default();

        let memory = load_scout_memory(&entries);
        let goals = derive_scout_goals(&memory);
        for goal in goals.iter().take(self.config.max_goals) {
            report.goals_pursued += 1;
            if self.pursue_goal(goal).await {
                report.goal_updates += 1;
            }
        }

        let watchlist = scout_watchlist(&entries, &self.config, current_timestamp(), &mut self.rng);
        info!("Vault audit watchlist: {} of {} entries", watchlist.len(), entries.len());
        report.watchlist = watchlist.iter().map(|(e, reason)| (e.id, *reason)).collect();

        for (entry, _) in watchlist {
            self.audit_entry(entry, &mut report).await?;
        }

        self.metrics.record_cycle(&report);
        self.metrics.total_runtime_secs += start.elapsed().as_secs();
        Ok(report)
    }

    async fn pursue_goal(&self, goal: &ScoutGoal) -> bool {
        debug!("Pursuing goal: {}", goal.focus);
        let findings = scout_search(self.service.as_ref(), &goal.focus, &self.config).await;
        if findings.len() <= self.config.goal_min_results {
            return false;
        }

        self.inbox.push(ScoutUpdate::new(
            UpdateTarget::Global,
            GOAL_UPDATE_TITLE,
            goal.focus.clone(),
            format!(
                "Autonomous investigation for \"{}\" yielded {} new nodes.",
                goal.focus,
                findings.len()
            ),
            GOAL_DRIFT_SCORE,
            goal.priority,
        ));
        true
    }

    async fn audit_entry(
        &self,
        entry: &KnowledgeEntry,
        report: &mut ScoutCycleReport,
    ) -> Result<(), ScoutError> {
        let hypotheses = generate_hypotheses(self.service.as_ref(), entry, &self.config).await;
        let domain = infer_domain(entry);
        let previous = entry
            .metadata
            .confidence
            .unwrap_or(self.config.audit_default_confidence);

        for hypothesis in hypotheses {
            report.hypotheses_tested += 1;
            let results = scout_search(self.service.as_ref(), &hypothesis, &self.config).await;
            let drift = detect_drift(&results, &entry.metadata.sources);
            if !drift.significant {
                continue;
            }
            let policy = domain.policy(entry, &results);
            let adjusted = adjust_confidence(previous, &drift, &policy);

            let thread_id = if adjusted < self.config.thread_confidence_threshold {
                let sources = results.iter().take(THREAD_SOURCE_LIMIT).cloned().collect();
                let thread = open_research_thread(self.store.as_ref(), entry, &hypothesis, sources)?;
                let id = thread.id;
                report.threads.push(thread);
                Some(id)
            } else {
                None
            };

            let warning = policy
                .warning
                .as_deref()
                .map(|w| format!(" [{} WARNING: {}]", domain.as_str().to_uppercase(), w))
                .unwrap_or_default();
            let annotation = Annotation::new(
                AnnotationKind::ScoutFinding,
                SCOUT_AGENT,
                format!(
                    "Long-term monitoring update: \"{}\" has new contradictory evidence.{} Confidence adjusted.",
                    hypothesis, warning
                ),
                drift.novelty_score,
            )
            .with_sources(results);
            let annotation_id = annotation.id;
            self.store
                .append_annotation(entry.id, annotation)
                .map_err(|e| ScoutError::Store(e.to_string()))?;

            let priority = if drift.novelty_score > HIGH_PRIORITY_NOVELTY {
                Priority::High
            } else {
                Priority::Medium
            };
            self.inbox.push(ScoutUpdate::new(
                UpdateTarget::Entry(entry.id),
                entry.summary.clone(),
                hypothesis.clone(),
                format!(
                    "I've been keeping an eye on this. Something changed in the {} landscape. \
                     New evidence challenges previous assumptions.",
                    domain
                ),
                drift.novelty_score,
                priority,
            ));

            info!(
                "Drift on {} ({}): novelty {:.2}, confidence {} -> {}",
                entry.id, domain, drift.novelty_score, previous, adjusted
            );
            report.findings.push(AuditFinding {
                entry_id: entry.id,
                hypothesis,
                domain,
                drift,
                previous_confidence: previous,
                adjusted_confidence: adjusted,
                annotation_id,
                thread_id,
                priority,
            });
        }
        Ok(())
    }
}

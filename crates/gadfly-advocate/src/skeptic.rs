//! Skeptic review: the on-demand entry point over a whole store

use crate::config::TriggerPolicy;
use crate::{AdvocateError, DevilsAdvocate, ReviewMode, ReviewReport};
use gadfly_domain::traits::{KnowledgeStore, ReasoningService};
use gadfly_domain::{Annotation, AnnotationId, AnnotationKind, EntryId, KnowledgeEntry};
use gadfly_heuristics::{extract_language_signals, trigger_reason, TriggerMetrics, TriggerReason};
use std::sync::Arc;
use tracing::info;

/// Agent name on objections raised by the skeptic
pub const SKEPTIC_AGENT: &str = "Skeptic";

/// A finished skeptic review
#[derive(Debug, Clone, PartialEq)]
pub struct SkepticReview {
    /// Entry that was reviewed
    pub entry_id: EntryId,
    /// Full report
    pub report: ReviewReport,
    /// Advisory card title
    pub title: String,
    /// Advisory card body
    pub content: String,
    /// Trigger rule that fired, if any
    pub trigger: Option<TriggerReason>,
    /// Objection attached to the entry, if configured
    pub annotation_id: Option<AnnotationId>,
}

/// Result of [`SkepticReviewer::run`]
#[derive(Debug, Clone, PartialEq)]
pub enum SkepticOutcome {
    /// The review ran
    Reviewed(Box<SkepticReview>),
    /// The trigger gate declined to run it
    Skipped {
        /// Entry that would have been reviewed
        entry_id: EntryId,
        /// Metrics the decision was based on
        metrics: TriggerMetrics,
    },
}

/// Reviews the most recently updated entry of a store
///
/// # Examples
///
/// ```
/// use gadfly_advocate::{ReviewMode, SkepticOutcome, SkepticReviewer};
/// use gadfly_domain::traits::KnowledgeStore;
/// use gadfly_domain::KnowledgeEntry;
/// use gadfly_llm::MockProvider;
/// use gadfly_store::MemoryVault;
/// use std::sync::Arc;
///
/// # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
/// let vault = Arc::new(MemoryVault::new());
/// vault.create_entry(KnowledgeEntry::new("It clearly proves the fact.", "claim"))?;
///
/// let reviewer = SkepticReviewer::new(vault, Arc::new(MockProvider::default()));
/// if let SkepticOutcome::Reviewed(review) = reviewer.run(ReviewMode::Standard).await? {
///     println!("{}\n{}", review.title, review.content);
/// }
/// # Ok(())
/// # }
/// ```
pub struct SkepticReviewer<S, R> {
    store: Arc<S>,
    advocate: DevilsAdvocate<R>,
}

impl<S: KnowledgeStore, R: ReasoningService> SkepticReviewer<S, R> {
    /// Create a reviewer with default configuration
    pub fn new(store: Arc<S>, service: Arc<R>) -> Self {
        Self {
            store,
            advocate: DevilsAdvocate::new(service),
        }
    }

    /// Create a reviewer around a configured advocate
    pub fn with_advocate(store: Arc<S>, advocate: DevilsAdvocate<R>) -> Self {
        Self { store, advocate }
    }

    /// Trigger metrics for an entry
    ///
    /// Claims are estimated as one per two lines of content.
    pub fn trigger_metrics(&self, entry: &KnowledgeEntry) -> TriggerMetrics {
        let newlines = entry.content.matches('\n').count();
        TriggerMetrics {
            confidence: entry
                .metadata
                .confidence
                .unwrap_or(self.advocate.config().default_entry_confidence),
            evidence_count: entry.metadata.sources.len(),
            // evidence < newlines / 2 holds exactly when evidence < ceil(newlines / 2)
            claim_count: newlines.div_ceil(2),
            signals: extract_language_signals(&entry.content),
        }
    }

    /// Review the latest entry
    ///
    /// # Errors
    ///
    /// - [`AdvocateError::EmptyVault`] before any service call when the store
    ///   has no entries
    /// - [`AdvocateError::Store`] when reading or annotating fails
    pub async fn run(&self, mode: ReviewMode) -> Result<SkepticOutcome, AdvocateError> {
        let entries = self
            .store
            .list_entries()
            .map_err(|e| AdvocateError::Store(e.to_string()))?;
        let latest = entries.first().ok_or(AdvocateError::EmptyVault)?;

        let metrics = self.trigger_metrics(latest);
        let trigger = trigger_reason(&metrics);
        if trigger.is_none() && mode == ReviewMode::Standard {
            if self.advocate.config().trigger_policy == TriggerPolicy::Gate {
                info!("Synthesis metrics within bounds, skipping review of {}", latest.id);
                return Ok(SkepticOutcome::Skipped {
                    entry_id: latest.id,
                    metrics,
                });
            }
            info!("Synthesis metrics within bounds, reviewing {} on request", latest.id);
        }

        let report = self.advocate.review(&latest.content, &entries, mode).await;
        let title = report.title();
        let content = report.render();

        let annotation_id = if self.advocate.config().attach_annotation {
            let severity = 1.0 - report.confidence.adjusted_confidence;
            let annotation =
                Annotation::new(AnnotationKind::Objection, SKEPTIC_AGENT, content.clone(), severity);
            let id = annotation.id;
            self.store
                .append_annotation(latest.id, annotation)
                .map_err(|e| AdvocateError::Store(e.to_string()))?;
            Some(id)
        } else {
            None
        };

        Ok(SkepticOutcome::Reviewed(Box::new(SkepticReview {
            entry_id: latest.id,
            report,
            title,
            content,
            trigger,
            annotation_id,
        })))
    }
}

//! Watchdog reacting to synthesis events

use crate::adversarial::{adversarial_search, ADVERSARIAL_AGENT};
use crate::red_team::run_red_team;
use crate::{AnnotationManager, JobKind, JobScheduler, WatchdogConfig, WatchdogError};
use gadfly_domain::traits::{KnowledgeStore, ReasoningService};
use gadfly_domain::{
    current_timestamp, Annotation, AnnotationId, AnnotationKind, ConversationMessage, EntryId,
    KnowledgeEntry,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, info};

/// Agent name on staleness warnings
pub const WATCHDOG_AGENT: &str = "Watchdog";

/// What produced a monitored event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// A new synthesis was written for the target
    Synthesis,
    /// The target entry was edited
    EntryUpdate,
    /// Sources were ingested into the target; only staleness is checked
    SourceIngest,
}

/// An event the watchdog reacts to
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisEvent {
    /// What happened
    pub kind: EventKind,
    /// Entry the event concerns
    pub target: EntryId,
    /// Synthesis text to challenge
    pub synthesis_text: String,
    /// Heuristic confidence of the synthesis
    pub confidence: f64,
}

impl SynthesisEvent {
    /// A new synthesis for `target`
    pub fn synthesis(target: EntryId, text: impl Into<String>, confidence: f64) -> Self {
        Self {
            kind: EventKind::Synthesis,
            target,
            synthesis_text: text.into(),
            confidence,
        }
    }
}

/// What the watchdog did with one event
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonitorReport {
    /// Confidence crossed the spike threshold
    pub confidence_spike: bool,
    /// Jobs scheduled, in scheduling order
    pub scheduled: Vec<JobKind>,
    /// Pending jobs replaced by this event
    pub replaced: Vec<JobKind>,
    /// Staleness warning attached by this event
    pub staleness_warning: Option<AnnotationId>,
}

/// Background disagreement scheduler
///
/// Confident syntheses get a delayed red-team critique and a later
/// counter-search; both run as tokio tasks keyed by (entry, job kind).
pub struct Watchdog<S, R> {
    annotations: AnnotationManager<S, R>,
    scheduler: JobScheduler,
    config: WatchdogConfig,
    /// Entry id to the `updated_at` it was last warned at
    warned: Mutex<HashMap<EntryId, u64>>,
}

impl<S, R> Watchdog<S, R>
where
    S: KnowledgeStore + 'static,
    R: ReasoningService + 'static,
{
    /// Create a watchdog with default thresholds and delays
    pub fn new(store: Arc<S>, service: Arc<R>) -> Self {
        Self::with_config(store, service, WatchdogConfig::default())
    }

    /// Create a watchdog with custom configuration
    pub fn with_config(store: Arc<S>, service: Arc<R>, config: WatchdogConfig) -> Self {
        Self {
            annotations: AnnotationManager::with_config(store, service, config.clone()),
            scheduler: JobScheduler::new(),
            config,
            warned: Mutex::new(HashMap::new()),
        }
    }

    /// The annotation manager shared with scheduled jobs
    pub fn annotations(&self) -> &AnnotationManager<S, R> {
        &self.annotations
    }

    /// The job scheduler
    pub fn scheduler(&self) -> &JobScheduler {
        &self.scheduler
    }

    /// Get the configuration
    pub fn config(&self) -> &WatchdogConfig {
        &self.config
    }

    /// React to an event without waiting on any reasoning call
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if the staleness check cannot read or annotate
    /// the target entry.
    pub fn on_event(&self, event: SynthesisEvent) -> Result<MonitorReport, WatchdogError> {
        let mut report = MonitorReport {
            staleness_warning: self.check_staleness(event.target)?,
            ..MonitorReport::default()
        };

        if event.kind == EventKind::SourceIngest
            || event.confidence <= self.config.confidence_spike_threshold
        {
            return Ok(report);
        }

        report.confidence_spike = true;
        info!(
            "Confidence spike {:.2} on {} ({:?}), scheduling disagreement",
            event.confidence, event.target, event.kind
        );

        let critique = critique_job(
            self.annotations.clone(),
            self.config.clone(),
            event.target,
            event.synthesis_text.clone(),
        );
        if self.scheduler.schedule(
            event.target,
            JobKind::RedTeamCritique,
            self.config.critique_delay(),
            critique,
        ) {
            report.replaced.push(JobKind::RedTeamCritique);
        }
        report.scheduled.push(JobKind::RedTeamCritique);

        let claim: String = event
            .synthesis_text
            .chars()
            .take(self.config.claim_excerpt_chars)
            .collect();
        let counter = counter_search_job(
            self.annotations.clone(),
            self.config.clone(),
            event.target,
            claim,
        );
        if self.scheduler.schedule(
            event.target,
            JobKind::CounterSearch,
            self.config.counter_search_delay(),
            counter,
        ) {
            report.replaced.push(JobKind::CounterSearch);
        }
        report.scheduled.push(JobKind::CounterSearch);

        Ok(report)
    }

    /// Entries that currently carry a staleness warning from this watchdog
    pub fn warned_entries(&self) -> usize {
        self.warned().len()
    }

    fn warned(&self) -> MutexGuard<'_, HashMap<EntryId, u64>> {
        self.warned.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Attach a staleness warning once per content revision of an entry
    ///
    /// Annotations bump the version without touching `updated_at`, so the
    /// warning is keyed on the entry and the revision time it was raised for.
    fn check_staleness(&self, target: EntryId) -> Result<Option<AnnotationId>, WatchdogError> {
        let entry = self
            .annotations
            .store()
            .get_entry(target)
            .map_err(|e| WatchdogError::Store(e.to_string()))?;
        let Some(entry) = entry else {
            return Ok(None);
        };

        let age_days = entry.age_days(current_timestamp());
        if age_days <= self.config.staleness_days as f64 {
            return Ok(None);
        }

        let previous = self.warned().insert(entry.id, entry.updated_at);
        if previous == Some(entry.updated_at) {
            return Ok(None);
        }

        let annotation = staleness_warning(&entry, age_days, self.config.staleness_severity);
        match self.annotations.append_annotation(entry.id, annotation) {
            Ok(id) => Ok(Some(id)),
            Err(e) => {
                let mut warned = self.warned();
                match previous {
                    Some(at) => warned.insert(entry.id, at),
                    None => warned.remove(&entry.id),
                };
                Err(e)
            }
        }
    }
}

fn staleness_warning(entry: &KnowledgeEntry, age_days: f64, severity: f64) -> Annotation {
    Annotation::new(
        AnnotationKind::StalenessWarning,
        WATCHDOG_AGENT,
        format!(
            "\"{}\" has not been revisited in {} days. Re-verify it against current sources.",
            entry.summary,
            age_days.floor()
        ),
        severity,
    )
}

async fn critique_job<S, R>(
    manager: AnnotationManager<S, R>,
    config: WatchdogConfig,
    target: EntryId,
    synthesis: String,
) where
    S: KnowledgeStore + 'static,
    R: ReasoningService + 'static,
{
    let entries = match manager.store().list_entries() {
        Ok(entries) => entries,
        Err(e) => {
            error!("Red team could not read the vault: {}", e);
            return;
        }
    };

    let Some(critique) = run_red_team(manager.service().as_ref(), &synthesis, &entries, &config).await
    else {
        return;
    };
    if critique.severity <= config.critique_annotation_threshold {
        debug!("Red team critique for {} below threshold ({:.2})", target, critique.severity);
        return;
    }

    let annotation = Annotation::new(
        AnnotationKind::Objection,
        critique.agent,
        critique.critique,
        critique.severity,
    );
    match manager.append_annotation(target, annotation) {
        Ok(id) => info!("Red team objection {} attached to {}", id, target),
        Err(e) => error!("Failed to attach red team objection to {}: {}", target, e),
    }
}

async fn counter_search_job<S, R>(
    manager: AnnotationManager<S, R>,
    config: WatchdogConfig,
    target: EntryId,
    claim: String,
) where
    S: KnowledgeStore + 'static,
    R: ReasoningService + 'static,
{
    let sources = adversarial_search(manager.service(), &claim, &config).await;
    let Some(first) = sources.first() else {
        debug!("Counter-search for {} found nothing", target);
        return;
    };

    let message = format!(
        "Discovered evidence challenging this claim: {}. Sources suggest a different narrative.",
        first.title
    );
    let uris = sources.iter().map(|s| s.uri.as_str()).collect::<Vec<_>>().join(", ");
    let annotation = Annotation::new(
        AnnotationKind::AdversarialFinding,
        ADVERSARIAL_AGENT,
        message,
        config.counter_finding_severity,
    )
    .with_message(ConversationMessage::agent(format!(
        "Adversarial search triggered by high confidence. Sources: {}",
        uris
    )))
    .with_sources(sources);

    match manager.append_annotation(target, annotation) {
        Ok(id) => info!("Adversarial finding {} attached to {}", id, target),
        Err(e) => error!("Failed to attach adversarial finding to {}: {}", target, e),
    }
}

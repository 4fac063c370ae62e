//! Integration tests for the watchdog and annotation threads
//!
//! Time is paused in every async test; sleeping past a job's delay lets
//! the runtime drive all scheduled work to completion.

use gadfly_domain::traits::KnowledgeStore;
use gadfly_domain::{
    current_timestamp, Annotation, AnnotationId, AnnotationKind, KnowledgeEntry, Role,
    SourceResult, SECONDS_PER_DAY,
};
use gadfly_llm::MockProvider;
use gadfly_store::MemoryVault;
use gadfly_watchdog::{
    AnnotationManager, JobKind, SynthesisEvent, Watchdog, WatchdogError, ADVERSARIAL_AGENT,
    RED_TEAM_AGENT,
};
use std::sync::Arc;
use tokio::time::{sleep, Duration};

const CRITIQUE_NEEDLE: &str = "FALSIFY";
const COUNTER_NEEDLE: &str = "Seek evidence";
const SYNTHESIS: &str = "Four-day work weeks raise output in every industry.";

fn scripted_provider() -> MockProvider {
    let provider = MockProvider::default();
    provider.add_response(
        CRITIQUE_NEEDLE,
        "The synthesis commits a fallacy of composition: pilot firms self-selected.",
    );
    provider.add_grounded_response(
        COUNTER_NEEDLE,
        vec![
            SourceResult::web("Productivity review", "https://econ.org/review"),
            SourceResult::web("Sector data", "https://stats.gov/sectors"),
            SourceResult::web("Dropped", ""),
        ],
    );
    provider
}

fn setup(provider: &MockProvider) -> (Arc<MemoryVault>, Watchdog<MemoryVault, MockProvider>, KnowledgeEntry) {
    let entry = KnowledgeEntry::new(SYNTHESIS, "Four-day week");
    let vault = Arc::new(MemoryVault::with_entries(vec![entry.clone()]).unwrap());
    let watchdog = Watchdog::new(vault.clone(), Arc::new(provider.clone()));
    (vault, watchdog, entry)
}

fn annotations_of(vault: &MemoryVault, entry: &KnowledgeEntry, kind: AnnotationKind) -> Vec<Annotation> {
    vault
        .get_entry(entry.id)
        .unwrap()
        .unwrap()
        .annotations
        .into_iter()
        .filter(|a| a.kind == kind)
        .collect()
}

fn critique_calls(provider: &MockProvider) -> usize {
    provider
        .calls()
        .iter()
        .filter(|c| c.prompt.contains(CRITIQUE_NEEDLE))
        .count()
}

#[tokio::test(start_paused = true)]
async fn test_low_confidence_is_left_alone() {
    let provider = scripted_provider();
    let (vault, watchdog, entry) = setup(&provider);

    let report = watchdog
        .on_event(SynthesisEvent::synthesis(entry.id, SYNTHESIS, 0.6))
        .unwrap();
    sleep(Duration::from_secs(10)).await;

    assert!(!report.confidence_spike);
    assert_eq!(provider.call_count(), 0);
    assert_eq!(vault.get_entry(entry.id).unwrap().unwrap().version, 1);
}

#[tokio::test(start_paused = true)]
async fn test_spike_raises_objection_and_counter_finding() {
    let provider = scripted_provider();
    let (vault, watchdog, entry) = setup(&provider);

    watchdog
        .on_event(SynthesisEvent::synthesis(entry.id, SYNTHESIS, 0.93))
        .unwrap();

    sleep(Duration::from_millis(1500)).await;
    assert_eq!(provider.call_count(), 0);

    sleep(Duration::from_secs(1)).await;
    let objections = annotations_of(&vault, &entry, AnnotationKind::Objection);
    assert_eq!(objections.len(), 1);
    assert_eq!(objections[0].agent, RED_TEAM_AGENT);
    assert_eq!(objections[0].severity, 0.9);
    assert!(annotations_of(&vault, &entry, AnnotationKind::AdversarialFinding).is_empty());

    sleep(Duration::from_secs(3)).await;
    let findings = annotations_of(&vault, &entry, AnnotationKind::AdversarialFinding);
    assert_eq!(findings.len(), 1);
    let finding = &findings[0];
    assert_eq!(finding.agent, ADVERSARIAL_AGENT);
    assert_eq!(finding.severity, 0.85);
    assert_eq!(
        finding.message,
        "Discovered evidence challenging this claim: Productivity review. \
         Sources suggest a different narrative."
    );
    assert_eq!(finding.sources.as_ref().map(Vec::len), Some(2));
    assert_eq!(finding.thread.len(), 1);
    assert_eq!(finding.thread[0].role, Role::Agent);
    assert_eq!(
        finding.thread[0].content,
        "Adversarial search triggered by high confidence. \
         Sources: https://econ.org/review, https://stats.gov/sectors"
    );
    assert_eq!(provider.call_count(), 5);
}

#[tokio::test(start_paused = true)]
async fn test_reschedule_cancels_pending_jobs() {
    let provider = scripted_provider();
    let (vault, watchdog, entry) = setup(&provider);

    watchdog
        .on_event(SynthesisEvent::synthesis(entry.id, SYNTHESIS, 0.93))
        .unwrap();
    sleep(Duration::from_secs(1)).await;
    let report = watchdog
        .on_event(SynthesisEvent::synthesis(entry.id, SYNTHESIS, 0.97))
        .unwrap();

    assert_eq!(report.replaced, vec![JobKind::RedTeamCritique, JobKind::CounterSearch]);

    sleep(Duration::from_secs(10)).await;
    assert_eq!(critique_calls(&provider), 1);
    assert_eq!(provider.call_count(), 5);
    assert_eq!(annotations_of(&vault, &entry, AnnotationKind::Objection).len(), 1);
    assert_eq!(annotations_of(&vault, &entry, AnnotationKind::AdversarialFinding).len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_started_critique_is_not_cancelled() {
    let provider = scripted_provider().with_latency(Duration::from_secs(3));
    let (vault, watchdog, entry) = setup(&provider);

    watchdog
        .on_event(SynthesisEvent::synthesis(entry.id, SYNTHESIS, 0.93))
        .unwrap();
    // critique started at 2s and is waiting on the service
    sleep(Duration::from_secs(3)).await;
    let report = watchdog
        .on_event(SynthesisEvent::synthesis(entry.id, SYNTHESIS, 0.93))
        .unwrap();

    assert_eq!(report.replaced, vec![JobKind::CounterSearch]);

    sleep(Duration::from_secs(20)).await;
    assert_eq!(critique_calls(&provider), 2);
    assert_eq!(annotations_of(&vault, &entry, AnnotationKind::Objection).len(), 2);
    assert_eq!(annotations_of(&vault, &entry, AnnotationKind::AdversarialFinding).len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_weak_critique_is_not_attached() {
    let provider = MockProvider::new("Mostly consistent with the vault.");
    let (vault, watchdog, entry) = setup(&provider);

    watchdog
        .on_event(SynthesisEvent::synthesis(entry.id, SYNTHESIS, 0.99))
        .unwrap();
    sleep(Duration::from_secs(10)).await;

    assert_eq!(critique_calls(&provider), 1);
    assert!(annotations_of(&vault, &entry, AnnotationKind::Objection).is_empty());
    assert!(annotations_of(&vault, &entry, AnnotationKind::AdversarialFinding).is_empty());
}

#[tokio::test]
async fn test_staleness_warning_is_attached_once() {
    let entry = KnowledgeEntry::new("Tariffs are stable.", "Tariffs")
        .updated_at(current_timestamp() - 30 * SECONDS_PER_DAY);
    let vault = Arc::new(MemoryVault::with_entries(vec![entry.clone()]).unwrap());
    let watchdog = Watchdog::new(vault.clone(), Arc::new(MockProvider::default()));

    let first = watchdog
        .on_event(SynthesisEvent::synthesis(entry.id, "Tariffs are stable.", 0.5))
        .unwrap();
    let second = watchdog
        .on_event(SynthesisEvent::synthesis(entry.id, "Tariffs are stable.", 0.5))
        .unwrap();

    assert!(first.staleness_warning.is_some());
    assert!(second.staleness_warning.is_none());
    let warnings = annotations_of(&vault, &entry, AnnotationKind::StalenessWarning);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].severity, 0.3);
}

#[tokio::test(start_paused = true)]
async fn test_replies_keep_thread_order() {
    let entry = KnowledgeEntry::new(SYNTHESIS, "Four-day week");
    let vault = Arc::new(MemoryVault::with_entries(vec![entry.clone()]).unwrap());
    let provider = MockProvider::new("Self-selection still explains the gain.");
    let manager = AnnotationManager::new(vault.clone(), Arc::new(provider.clone()));

    let annotation = Annotation::new(AnnotationKind::Objection, RED_TEAM_AGENT, "Pilot firms self-selected.", 0.9);
    let annotation_id = manager.append_annotation(entry.id, annotation).unwrap();

    let first = manager
        .reply_to_agent(entry.id, annotation_id, "The trial was randomized.")
        .unwrap();
    let second = manager
        .reply_to_agent(entry.id, annotation_id, "Output was audited externally.")
        .unwrap();

    let stored = vault.get_entry(entry.id).unwrap().unwrap();
    let thread = &stored.annotations[0].thread;
    assert_eq!(thread.len(), 2);
    assert_eq!(thread[0].content, "The trial was randomized.");
    assert_eq!(thread[1].content, "Output was audited externally.");
    assert_eq!(provider.call_count(), 0);

    first.await.unwrap();
    second.await.unwrap();

    let stored = vault.get_entry(entry.id).unwrap().unwrap();
    let thread = &stored.annotations[0].thread;
    assert_eq!(thread.len(), 4);
    assert!(thread[..2].iter().all(|m| m.role == Role::User));
    assert!(thread[2..].iter().all(|m| m.role == Role::Agent));

    let calls = provider.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls.iter().all(|c| c
        .prompt
        .contains("USER: The trial was randomized.\nUSER: Output was audited externally.")));
    assert!(calls.iter().all(|c| c.prompt.contains("Response Limit: 120 words.")));
}

#[tokio::test(start_paused = true)]
async fn test_unconfigured_service_only_records_user_message() {
    let entry = KnowledgeEntry::new(SYNTHESIS, "Four-day week");
    let vault = Arc::new(MemoryVault::with_entries(vec![entry.clone()]).unwrap());
    let provider = MockProvider::unconfigured();
    let manager = AnnotationManager::new(vault.clone(), Arc::new(provider.clone()));

    let annotation = Annotation::new(AnnotationKind::Objection, RED_TEAM_AGENT, "Pilot firms self-selected.", 0.9);
    let annotation_id = manager.append_annotation(entry.id, annotation).unwrap();

    manager
        .reply_to_agent(entry.id, annotation_id, "The trial was randomized.")
        .unwrap()
        .await
        .unwrap();

    let stored = vault.get_entry(entry.id).unwrap().unwrap();
    assert_eq!(stored.annotations[0].thread.len(), 1);
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_reply_to_missing_annotation_fails() {
    let entry = KnowledgeEntry::new(SYNTHESIS, "Four-day week");
    let vault = Arc::new(MemoryVault::with_entries(vec![entry.clone()]).unwrap());
    let manager = AnnotationManager::new(vault, Arc::new(MockProvider::default()));

    let result = manager.reply_to_agent(entry.id, AnnotationId::new(), "hello");

    assert!(matches!(result, Err(WatchdogError::Store(_))));
}

//! Integration tests for scout cycles over a store
//!
//! Rotation is disabled in every test so the watchlist only holds entries
//! that qualify on confidence or staleness.

use gadfly_domain::traits::KnowledgeStore;
use gadfly_domain::{
    current_timestamp, AnnotationKind, KnowledgeEntry, Priority, SourceRef, SourceResult,
    UpdateTarget, SECONDS_PER_DAY,
};
use gadfly_heuristics::Domain;
use gadfly_llm::MockProvider;
use gadfly_scout::{
    RedTeamScout, ScoutConfig, ScoutWorker, WatchReason, INVESTIGATION_TAG, SCOUT_AGENT,
};
use gadfly_store::{MemoryInbox, MemoryVault};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

const HYPOTHESIS_NEEDLE: &str = "concise, specific hypotheses";
const SEARCH_NEEDLE: &str = "validate the following";

fn sources(n: usize) -> Vec<SourceResult> {
    (0..n)
        .map(|i| SourceResult::web(format!("Source {}", i), format!("https://site{}.org/report", i)))
        .collect()
}

fn no_rotation() -> ScoutConfig {
    ScoutConfig {
        rotation_rate: 0.0,
        ..ScoutConfig::default()
    }
}

fn scout(
    vault: Arc<MemoryVault>,
    provider: &MockProvider,
    inbox: Arc<MemoryInbox>,
) -> RedTeamScout<MemoryVault, MockProvider, MemoryInbox> {
    RedTeamScout::with_config(vault, Arc::new(provider.clone()), inbox, no_rotation())
        .with_rng(StdRng::seed_from_u64(11))
}

#[tokio::test]
async fn test_significant_drift_annotates_and_notifies() {
    let entry = KnowledgeEntry::new(
        "Remote teams ship features faster than colocated teams.",
        "Remote delivery",
    )
    .with_confidence(0.9);
    let entry_id = entry.id;
    let vault = Arc::new(MemoryVault::with_entries(vec![entry]).unwrap());
    let inbox = Arc::new(MemoryInbox::new());

    let provider = MockProvider::default();
    provider.add_response(
        HYPOTHESIS_NEEDLE,
        "1. Output metrics were self-reported by managers\n2. Only senior engineers went remote\nok",
    );
    provider.add_grounded_response(SEARCH_NEEDLE, sources(3));

    let mut scout = scout(vault.clone(), &provider, inbox.clone());
    let report = scout.run_cycle().await.unwrap();

    assert_eq!(report.watchlist, vec![(entry_id, WatchReason::ThinEvidence)]);
    assert_eq!(report.hypotheses_tested, 2);
    assert_eq!(report.findings.len(), 2);
    assert!(report.threads.is_empty());

    let finding = &report.findings[0];
    assert_eq!(finding.hypothesis, "Output metrics were self-reported by managers");
    assert_eq!(finding.domain, Domain::General);
    assert_eq!(finding.drift.novelty_score, 1.0);
    assert_eq!(finding.previous_confidence, 0.9);
    assert_eq!(finding.adjusted_confidence, 0.7);
    assert_eq!(finding.priority, Priority::High);

    let stored = vault.get_entry(entry_id).unwrap().unwrap();
    assert_eq!(stored.annotations.len(), 2);
    let annotation = &stored.annotations[0];
    assert_eq!(annotation.kind, AnnotationKind::ScoutFinding);
    assert_eq!(annotation.agent, SCOUT_AGENT);
    assert_eq!(annotation.severity, 1.0);
    assert_eq!(annotation.sources.as_ref().map(Vec::len), Some(3));
    assert_eq!(
        annotation.message,
        "Long-term monitoring update: \"Output metrics were self-reported by managers\" \
         has new contradictory evidence. Confidence adjusted."
    );

    let updates = inbox.updates();
    assert_eq!(updates.len(), 2);
    assert_eq!(updates[0].synthesis_id, UpdateTarget::Entry(entry_id));
    assert_eq!(updates[0].title, "Remote delivery");
    assert!(updates[0].findings.contains("general landscape"));
    assert_eq!(report.updates_pushed(), 2);
    assert_eq!(scout.metrics().total_findings(), 2);
}

#[tokio::test]
async fn test_low_confidence_opens_thread_and_becomes_goal() {
    let now = current_timestamp();
    let entry = KnowledgeEntry::new("The new treatment halves recovery time.", "Recovery")
        .with_confidence(0.65)
        .updated_at(now - 40 * SECONDS_PER_DAY);
    let entry_id = entry.id;
    let vault = Arc::new(MemoryVault::with_entries(vec![entry]).unwrap());
    let inbox = Arc::new(MemoryInbox::new());

    let provider = MockProvider::default();
    provider.add_response(HYPOTHESIS_NEEDLE, "Recovery time was measured differently across arms");
    provider.add_grounded_response(SEARCH_NEEDLE, sources(6));

    let mut scout = scout(vault.clone(), &provider, inbox.clone());
    let report = scout.run_cycle().await.unwrap();

    assert_eq!(report.watchlist, vec![(entry_id, WatchReason::Stale)]);
    assert_eq!(report.findings.len(), 1);
    let finding = &report.findings[0];
    assert_eq!(finding.domain, Domain::Medical);
    assert_eq!(finding.adjusted_confidence, 0.45);

    assert_eq!(report.threads.len(), 1);
    let thread = &report.threads[0];
    assert_eq!(finding.thread_id, Some(thread.id));
    assert_eq!(thread.sources.len(), 5);
    assert_eq!(vault.len(), 2);

    let thread_entry = vault.get_entry(thread.id).unwrap().unwrap();
    assert!(thread_entry.has_tag(INVESTIGATION_TAG));
    assert_eq!(thread_entry.metadata.links[0].target, entry_id);

    let stored = vault.get_entry(entry_id).unwrap().unwrap();
    assert!(stored.annotations[0].message.contains(
        "[MEDICAL WARNING: Clinical evidence relies on observational data. Confidence capped.]"
    ));
    assert!(inbox.updates()[0].findings.contains("medical landscape"));

    // The open thread drives the next cycle's first goal
    provider.reset_calls();
    let second = scout.run_cycle().await.unwrap();

    assert_eq!(second.goals_pursued, 3);
    let goal_prompt = format!("Resolve investigation for node {}", thread.id);
    assert!(provider.calls()[0].prompt.contains(&goal_prompt));
    let goal_update = inbox
        .updates()
        .into_iter()
        .find(|u| u.synthesis_id == UpdateTarget::Global && u.hypothesis == goal_prompt)
        .expect("goal update pushed");
    assert_eq!(goal_update.priority, Priority::High);
    assert_eq!(goal_update.title, "Goal Pursuit Result");
}

#[tokio::test]
async fn test_findings_do_not_reset_staleness() {
    let now = current_timestamp();
    let entry = KnowledgeEntry::new("Freight rates track fuel prices closely.", "Freight")
        .updated_at(now - 40 * SECONDS_PER_DAY);
    let entry_id = entry.id;
    let vault = Arc::new(MemoryVault::with_entries(vec![entry]).unwrap());

    let provider = MockProvider::default();
    provider.add_response(HYPOTHESIS_NEEDLE, "Port congestion drove the rates instead");
    provider.add_grounded_response(SEARCH_NEEDLE, sources(3));

    let mut scout = scout(vault.clone(), &provider, Arc::new(MemoryInbox::new()));
    let first = scout.run_cycle().await.unwrap();
    assert_eq!(first.findings.len(), 1);

    let annotated = vault.get_entry(entry_id).unwrap().unwrap();
    assert_eq!(annotated.annotations.len(), 1);
    assert!(annotated.age_days(current_timestamp()) > 30.0);

    let second = scout.run_cycle().await.unwrap();
    assert_eq!(second.watchlist, vec![(entry_id, WatchReason::Stale)]);
}

#[tokio::test]
async fn test_known_sources_are_not_drift() {
    let entry = KnowledgeEntry::new("Solar output peaks at noon.", "Solar")
        .with_confidence(0.9)
        .with_sources(vec![
            SourceRef::new("https://site0.org/report", "Source 0"),
            SourceRef::new("https://site1.org/report", "Source 1"),
        ]);
    let entry_id = entry.id;
    let vault = Arc::new(MemoryVault::with_entries(vec![entry]).unwrap());
    let inbox = Arc::new(MemoryInbox::new());

    let provider = MockProvider::default();
    provider.add_response(HYPOTHESIS_NEEDLE, "Cloud cover shifts the peak later in the day");
    provider.add_grounded_response(SEARCH_NEEDLE, sources(2));

    let report = scout(vault.clone(), &provider, inbox.clone()).run_cycle().await.unwrap();

    assert_eq!(report.hypotheses_tested, 1);
    assert!(report.findings.is_empty());
    assert!(inbox.is_empty());
    assert_eq!(vault.get_entry(entry_id).unwrap().unwrap().version, 1);
}

#[tokio::test]
async fn test_unconfigured_service_audits_nothing() {
    let now = current_timestamp();
    let entry = KnowledgeEntry::new("Old claim", "Old").updated_at(now - 90 * SECONDS_PER_DAY);
    let vault = Arc::new(MemoryVault::with_entries(vec![entry]).unwrap());
    let provider = MockProvider::unconfigured();

    let report = scout(vault.clone(), &provider, Arc::new(MemoryInbox::new()))
        .run_cycle()
        .await
        .unwrap();

    assert_eq!(report.watchlist.len(), 1);
    assert_eq!(report.hypotheses_tested, 0);
    assert_eq!(provider.call_count(), 0);
    assert_eq!(vault.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_worker_accumulates_metrics() {
    let entry = KnowledgeEntry::new("Remote teams ship features faster.", "Remote").with_confidence(0.95);
    let vault = Arc::new(MemoryVault::with_entries(vec![entry]).unwrap());
    let provider = MockProvider::default();
    provider.add_response(HYPOTHESIS_NEEDLE, "Velocity was measured in story points only");
    provider.add_grounded_response(SEARCH_NEEDLE, sources(3));

    let mut worker = ScoutWorker::new(scout(vault, &provider, Arc::new(MemoryInbox::new())));
    worker.run_cycles(2).await.unwrap();

    let metrics = worker.metrics();
    assert_eq!(metrics.cycle_count, 2);
    assert_eq!(metrics.entries_audited, 2);
    assert_eq!(metrics.total_findings(), 2);
    assert!(metrics.summary().contains("general: 2"));
}

//! Auto-opened research threads

use crate::memory::INVESTIGATION_TAG;
use crate::ScoutError;
use gadfly_domain::traits::KnowledgeStore;
use gadfly_domain::{KnowledgeEntry, ResearchThread, SourceResult, ThreadStatus};
use tracing::info;

/// Agent recorded as the creator of scout threads and findings
pub const SCOUT_AGENT: &str = "RedTeamScout";

/// Confidence of a freshly opened thread
pub const THREAD_CONFIDENCE: f64 = 0.5;

/// Relation from a thread entry to the entry it questions
pub const QUESTIONS_RELATION: &str = "questions";

const TITLE_FOCUS_CHARS: usize = 50;

/// Open an investigation into `hypothesis` as a new vault entry
///
/// The entry shares the thread's id, is tagged `auto-opened`, `red-team`
/// and `investigation`, and links back to `parent` with relation
/// `questions`.
pub fn open_research_thread<S: KnowledgeStore + ?Sized>(
    store: &S,
    parent: &KnowledgeEntry,
    hypothesis: &str,
    sources: Vec<SourceResult>,
) -> Result<ResearchThread, ScoutError> {
    let focus: String = hypothesis.chars().take(TITLE_FOCUS_CHARS).collect();
    let title = format!("Unresolved: {}...", focus);
    let content = format!(
        "AUTO-OPENED INVESTIGATION\nFocus: {}\n\nEvidence base: {} nodes.",
        hypothesis,
        sources.len()
    );

    let entry = KnowledgeEntry::new(content, title.clone())
        .with_tags(["auto-opened", "red-team", INVESTIGATION_TAG])
        .with_confidence(THREAD_CONFIDENCE)
        .with_sources(sources.iter().map(SourceResult::to_ref).collect())
        .with_link(parent.id, QUESTIONS_RELATION);
    let thread = ResearchThread {
        id: entry.id,
        title,
        origin: parent.id,
        status: ThreadStatus::Open,
        created_by: SCOUT_AGENT.to_string(),
        focus: hypothesis.to_string(),
        sources,
        confidence: THREAD_CONFIDENCE,
        created_at: entry.created_at,
    };

    store
        .create_entry(entry)
        .map_err(|e| ScoutError::Store(e.to_string()))?;
    info!("Opened research thread {} questioning {}", thread.id, parent.id);
    Ok(thread)
}

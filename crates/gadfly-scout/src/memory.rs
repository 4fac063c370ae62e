//! Scout memory: what the vault has been doubting

use gadfly_domain::{AnnotationKind, HistoricalError, KnowledgeEntry, ScoutMemory};
use std::collections::HashMap;

/// Interests kept in memory
pub const MAX_INTERESTS: usize = 5;

/// Historical errors kept in memory
pub const MAX_HISTORICAL_ERRORS: usize = 50;

/// Tag marking auto-opened investigation entries
pub const INVESTIGATION_TAG: &str = "investigation";

/// Investigations below this confidence are unresolved
pub const UNRESOLVED_CONFIDENCE: f64 = 0.7;

/// Findings above this severity count as confirmed corrections
pub const CONFIRMED_SEVERITY: f64 = 0.8;

/// Rebuild scout memory from the current vault
///
/// - Interests: the five most frequent tags, ties broken alphabetically
/// - Unresolved threads: investigation entries with a stated confidence
///   below 0.7
/// - Historical errors: scout and adversarial findings in entry order,
///   capped at 50
pub fn load_scout_memory(entries: &[KnowledgeEntry]) -> ScoutMemory {
    let mut tag_counts: HashMap<&str, usize> = HashMap::new();
    for tag in entries.iter().flat_map(|e| e.metadata.tags.iter()) {
        *tag_counts.entry(tag.as_str()).or_insert(0) += 1;
    }
    let mut ranked: Vec<(&str, usize)> = tag_counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    let interests = ranked
        .into_iter()
        .take(MAX_INTERESTS)
        .map(|(tag, _)| tag.to_string())
        .collect();

    let unresolved_threads = entries
        .iter()
        .filter(|e| e.has_tag(INVESTIGATION_TAG))
        .filter(|e| matches!(e.metadata.confidence, Some(c) if c < UNRESOLVED_CONFIDENCE))
        .map(|e| e.id)
        .collect();

    let historical_errors = entries
        .iter()
        .flat_map(|entry| {
            entry
                .annotations
                .iter()
                .filter(|a| {
                    matches!(
                        a.kind,
                        AnnotationKind::ScoutFinding | AnnotationKind::AdversarialFinding
                    )
                })
                .map(move |a| HistoricalError {
                    synthesis_id: entry.id,
                    hypothesis: a.message.clone(),
                    confirmed: a.severity > CONFIRMED_SEVERITY,
                })
        })
        .take(MAX_HISTORICAL_ERRORS)
        .collect();

    ScoutMemory {
        interests,
        unresolved_threads,
        historical_errors,
    }
}

//! Contradiction scoring
//!
//! The whole model is "high word overlap with asymmetric negation". It is
//! shallow on purpose: every score can be explained by pointing at the
//! shared words and the one-sided negation.

use crate::lexicon::{contains_any, NEGATION_TERMS};
use crate::signals::word_tokens;
use gadfly_domain::{clamp_unit, Assumption, Contradiction, KnowledgeEntry};
use std::cmp::Ordering;
use std::collections::HashSet;

/// Overlap above which a negation asymmetry counts
pub const OVERLAP_THRESHOLD: f64 = 0.4;

/// Bonus added to the overlap when the rule fires
pub const NEGATION_BONUS: f64 = 0.2;

/// Scores at or below this are not reported
pub const CONTRADICTION_THRESHOLD: f64 = 0.6;

/// Score how strongly `content` contradicts `claim`
///
/// Returns `overlap + 0.2` when the word overlap (shared words over the
/// smaller vocabulary) exceeds 0.4 and exactly one side contains a negation
/// term, otherwise `0.0`. The result can exceed 1.0.
pub fn contradiction_score(claim: &str, content: &str) -> f64 {
    let claim_lower = claim.to_lowercase();
    let content_lower = content.to_lowercase();

    let negated_claim = contains_any(&claim_lower, NEGATION_TERMS);
    let negated_content = contains_any(&content_lower, NEGATION_TERMS);

    let claim_words: HashSet<String> = word_tokens(claim).into_iter().collect();
    let content_words: HashSet<String> = word_tokens(content).into_iter().collect();

    let smaller = claim_words.len().min(content_words.len());
    if smaller == 0 {
        return 0.0;
    }
    let shared = claim_words.intersection(&content_words).count();
    let overlap = shared as f64 / smaller as f64;

    if overlap > OVERLAP_THRESHOLD && negated_claim != negated_content {
        overlap + NEGATION_BONUS
    } else {
        0.0
    }
}

/// Score every assumption against every entry and keep the strong pairs
///
/// Pairs scoring above 0.6 are kept, strongest first (ties keep scan
/// order). Reported strengths are clamped to `[0, 1]`.
pub fn find_contradictions(
    assumptions: &[Assumption],
    entries: &[KnowledgeEntry],
) -> Vec<Contradiction> {
    let mut found = Vec::new();

    for assumption in assumptions {
        for entry in entries {
            let score = contradiction_score(&assumption.claim, &entry.content);
            if score > CONTRADICTION_THRESHOLD {
                found.push(Contradiction {
                    assumption: assumption.claim.clone(),
                    source_entry_id: entry.id,
                    reason: format!(
                        "Vault entry \"{}\" contains potentially conflicting evidence.",
                        entry.summary
                    ),
                    strength: clamp_unit(score),
                });
            }
        }
    }

    found.sort_by(|a, b| b.strength.partial_cmp(&a.strength).unwrap_or(Ordering::Equal));
    found
}

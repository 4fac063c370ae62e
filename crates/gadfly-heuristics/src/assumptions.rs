//! Implicit-claim extraction

use crate::lexicon::ASSUMPTION_TRIGGERS;
use gadfly_domain::Assumption;
use std::collections::HashSet;

/// Confidence assigned to every extracted assumption
pub const DEFAULT_ASSUMPTION_CONFIDENCE: f64 = 0.7;

/// Continuations must be longer than this (in characters) to count
pub const MIN_CLAIM_CHARS: usize = 10;

/// Pull implicit claims out of a synthesis
///
/// Each trigger phrase is searched case-insensitively; the text after it, up
/// to the next `.` or line break (or the end of the text), is the claim.
/// Results are grouped by trigger in table order and deduplicated on the
/// trimmed claim text, keeping the first occurrence.
///
/// # Examples
///
/// ```
/// use gadfly_heuristics::extract_assumptions;
///
/// let found = extract_assumptions("The data indicates that sleep improves memory recall.");
/// assert_eq!(found[0].claim, "sleep improves memory recall");
/// ```
pub fn extract_assumptions(text: &str) -> Vec<Assumption> {
    // ASCII lowering keeps byte offsets aligned with `text`
    let lower = text.to_ascii_lowercase();
    let mut seen = HashSet::new();
    let mut assumptions = Vec::new();

    for trigger in ASSUMPTION_TRIGGERS {
        let mut from = 0;
        while let Some(pos) = lower[from..].find(trigger) {
            let start = from + pos + trigger.len();
            let end = text[start..]
                .find(['.', '\n'])
                .map(|i| start + i)
                .unwrap_or(text.len());

            let raw = &text[start..end];
            if raw.chars().count() > MIN_CLAIM_CHARS {
                let claim = raw.trim().to_string();
                if seen.insert(claim.clone()) {
                    assumptions.push(Assumption {
                        claim,
                        confidence: DEFAULT_ASSUMPTION_CONFIDENCE,
                    });
                }
            }

            // Resume after the terminator
            from = (end + 1).min(text.len());
            if from >= text.len() {
                break;
            }
        }
    }

    assumptions
}

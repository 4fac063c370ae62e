//! Watchlist selection
//!
//! Confident entries with thin evidence and stale entries are always
//! watched. Everything else enters a random rotation so no belief goes
//! unchallenged indefinitely.

use crate::ScoutConfig;
use gadfly_domain::KnowledgeEntry;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Why an entry was put on the watchlist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WatchReason {
    /// High confidence with fewer sources than required
    ThinEvidence,
    /// Not updated within the staleness window
    Stale,
    /// Picked by the random rotation
    Rotation,
}

/// Decide whether `entry` is watched this cycle
///
/// One draw is taken from `rng` for every entry, watched or not, so a
/// seeded generator yields the same selection for the same vault.
pub fn watch_reason<R: Rng + ?Sized>(
    entry: &KnowledgeEntry,
    config: &ScoutConfig,
    now: u64,
    rng: &mut R,
) -> Option<WatchReason> {
    let draw: f64 = rng.gen();

    let confidence = entry
        .metadata
        .confidence
        .unwrap_or(config.watch_default_confidence);
    if confidence > config.high_confidence_threshold
        && entry.metadata.sources.len() < config.min_sources
    {
        Some(WatchReason::ThinEvidence)
    } else if entry.age_days(now) > config.stale_days as f64 {
        Some(WatchReason::Stale)
    } else if draw < config.rotation_rate {
        Some(WatchReason::Rotation)
    } else {
        None
    }
}

/// Entries to audit this cycle, in vault order
pub fn scout_watchlist<'a, R: Rng + ?Sized>(
    entries: &'a [KnowledgeEntry],
    config: &ScoutConfig,
    now: u64,
    rng: &mut R,
) -> Vec<(&'a KnowledgeEntry, WatchReason)> {
    entries
        .iter()
        .filter_map(|entry| watch_reason(entry, config, now, rng).map(|reason| (entry, reason)))
        .collect()
}

//! Drift detection: is fresh evidence actually new?

use gadfly_domain::{SourceRef, SourceResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;
use url::Url;

/// Novelty above which drift is significant
pub const NOVELTY_THRESHOLD: f64 = 0.4;

/// Unseen results above which drift is significant regardless of ratio
pub const UNSEEN_THRESHOLD: usize = 2;

/// Outcome of comparing new results with an entry's recorded sources
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DriftReport {
    /// Share of results whose URI and host are both unseen
    pub novelty_score: f64,
    /// Count of such results
    pub unseen: usize,
    /// Whether the drift warrants action
    pub significant: bool,
}

fn hostname(uri: &str) -> Result<String, url::ParseError> {
    Url::parse(uri).map(|u| u.host_str().unwrap_or_default().to_string())
}

/// Compare `new_sources` against `old_sources`
///
/// A result is novel when neither its lowercase URI nor its hostname was
/// recorded before. Malformed recorded URIs contribute nothing to the
/// known-host set; malformed new URIs are never novel.
pub fn detect_drift(new_sources: &[SourceResult], old_sources: &[SourceRef]) -> DriftReport {
    if new_sources.is_empty() {
        return DriftReport::default();
    }

    let old_uris: HashSet<String> = old_sources.iter().map(|s| s.uri.to_lowercase()).collect();
    let old_hosts: HashSet<String> = old_sources
        .iter()
        .filter_map(|s| hostname(&s.uri).ok())
        .filter(|h| !h.is_empty())
        .collect();

    let unseen = new_sources
        .iter()
        .filter(|s| match hostname(&s.uri) {
            Ok(host) => !old_uris.contains(&s.uri.to_lowercase()) && !old_hosts.contains(&host),
            Err(e) => {
                debug!("Skipping malformed source URI '{}': {}", s.uri, e);
                false
            }
        })
        .count();

    let novelty_score = unseen as f64 / new_sources.len().max(1) as f64;
    DriftReport {
        novelty_score,
        unseen,
        significant: novelty_score > NOVELTY_THRESHOLD || unseen > UNSEEN_THRESHOLD,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn results(uris: &[&str]) -> Vec<SourceResult> {
        uris.iter().map(|u| SourceResult::web("t", *u)).collect()
    }

    #[test]
    fn test_empty_results() {
        let old = vec![SourceRef::new("https://a.example/1", "A")];
        assert_eq!(
            detect_drift(&[], &old),
            DriftReport { novelty_score: 0.0, unseen: 0, significant: false }
        );
    }

    #[test]
    fn test_known_host_is_not_novel() {
        let old = vec![SourceRef::new("https://journal.example/a", "A")];
        let report = detect_drift(&results(&["https://journal.example/b"]), &old);
        assert_eq!(report.unseen, 0);
        assert!(!report.significant);
    }

    #[test]
    fn test_known_uri_case_insensitive() {
        let old = vec![SourceRef::new("https://Journal.example/A", "A")];
        let report = detect_drift(&results(&["https://journal.example/a"]), &old);
        assert_eq!(report.unseen, 0);
    }

    #[test]
    fn test_all_new_is_significant() {
        let report = detect_drift(
            &results(&["https://one.example/x", "https://two.example/y"]),
            &[],
        );
        assert_eq!(report.novelty_score, 1.0);
        assert!(report.significant);
    }

    #[test]
    fn test_many_unseen_but_low_ratio() {
        let mut uris = vec!["https://old.example/1"; 7];
        uris.extend(["https://n1.example/", "https://n2.example/", "https://n3.example/"]);
        let old = vec![SourceRef::new("https://old.example/0", "Old")];
        let report = detect_drift(&results(&uris), &old);

        assert_eq!(report.unseen, 3);
        assert!((report.novelty_score - 0.3).abs() < 1e-9);
        assert!(report.significant);
    }

    #[test]
    fn test_malformed_uris_excluded() {
        let old = vec![SourceRef::new("not a url", "Broken")];
        let report = detect_drift(&results(&["also broken", "https://new.example/"]), &old);
        assert_eq!(report.unseen, 1);
        assert_eq!(report.novelty_score, 0.5);
    }
}

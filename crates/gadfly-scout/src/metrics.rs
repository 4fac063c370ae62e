//! Metrics collection for scout cycles

use crate::ScoutCycleReport;
use gadfly_heuristics::Domain;
use std::collections::HashMap;

/// Metrics accumulated across scout cycles
#[derive(Debug, Clone, Default)]
pub struct ScoutMetrics {
    /// Significant drift findings per domain
    pub findings: HashMap<Domain, usize>,

    /// Goals pursued
    pub goals_pursued: usize,

    /// Goal searches that produced an inbox update
    pub goal_updates: usize,

    /// Entries audited from the watchlist
    pub entries_audited: usize,

    /// Hypotheses searched
    pub hypotheses_tested: usize,

    /// Research threads opened
    pub threads_opened: usize,

    /// Completed cycles
    pub cycle_count: usize,

    /// Total runtime in seconds
    pub total_runtime_secs: u64,
}

impl ScoutMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a significant finding
    pub fn record_finding(&mut self, domain: Domain) {
        *self.findings.entry(domain).or_insert(0) += 1;
    }

    /// Record a completed cycle and everything it did
    pub fn record_cycle(&mut self, report: &ScoutCycleReport) {
        self.cycle_count += 1;
        self.goals_pursued += report.goals_pursued;
        self.goal_updates += report.goal_updates;
        self.entries_audited += report.watchlist.len();
        self.hypotheses_tested += report.hypotheses_tested;
        self.threads_opened += report.threads.len();
        for finding in &report.findings {
            self.record_finding(finding.domain);
        }
    }

    /// Get total findings across all domains
    pub fn total_findings(&self) -> usize {
        self.findings.values().sum()
    }

    /// Reset all metrics
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Scout Metrics Summary".to_string(),
            "=====================".to_string(),
            format!("Cycles: {}", self.cycle_count),
            format!("Total runtime: {}s", self.total_runtime_secs),
            format!("Goals pursued: {} ({} updates)", self.goals_pursued, self.goal_updates),
            format!("Entries audited: {}", self.entries_audited),
            format!("Hypotheses tested: {}", self.hypotheses_tested),
            format!("Threads opened: {}", self.threads_opened),
        ];

        if !self.findings.is_empty() {
            lines.push(String::new());
            lines.push("Findings by domain:".to_string());
            let mut domains: Vec<_> = self.findings.iter().collect();
            domains.sort_by_key(|(d, _)| d.as_str());
            for (domain, count) in domains {
                lines.push(format!("  {}: {}", domain, count));
            }
            lines.push(format!("  Total: {}", self.total_findings()));
        }

        lines.join("\n")
    }
}

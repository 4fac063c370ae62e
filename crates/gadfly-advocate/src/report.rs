//! Review reports and their advisory rendering

use crate::mode::{ReviewMetrics, ReviewMode};
use gadfly_domain::{ConfidenceAssessment, Contradiction, Counterfactual};
use serde::{Deserialize, Serialize};

/// Headline shared by every report
pub const REPORT_HEADLINE: &str = "Devil's Advocate Intelligence Review";

/// Verdict line when the stress test raised no warning
pub const NO_DRIFT_VERDICT: &str = "No significant drift detected.";

/// Result of one adversarial review
///
/// Reports are not stored; only their rendering is, as annotation text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewReport {
    /// Headline
    pub headline: String,
    /// Strongest contradictions (at most five by default)
    pub key_contradictions: Vec<Contradiction>,
    /// Leading counterfactuals (at most three by default)
    pub counterfactuals: Vec<Counterfactual>,
    /// Debate transcript or fallback text
    pub debate_outcome: String,
    /// Stress-tested confidence
    pub confidence: ConfidenceAssessment,
    /// Steel-man counter-argument, if the mode requested one
    pub steelman: Option<String>,
    /// Mode-specific metrics
    pub metrics: Option<ReviewMetrics>,
    /// Mode the review ran in
    pub mode: ReviewMode,
}

impl ReviewReport {
    /// Card title, e.g. `Devil's Advocate Intelligence Review [LEGAL]`
    pub fn title(&self) -> String {
        format!("{} [{}]", self.headline, self.mode.as_str().to_uppercase())
    }

    fn mode_block(&self) -> Option<String> {
        match &self.metrics {
            Some(ReviewMetrics::Legal(m)) => Some(format!(
                "LEGAL VERDICT: {}\nBurden Met: {}\nSpeculation Points: {}",
                m.verdict, m.burden_met, m.speculative_count
            )),
            Some(ReviewMetrics::Academic(m)) => Some(format!(
                "ACADEMIC GRADE: {:?}\nPeer Supported: {}\nReplication Risk: {:?}",
                m.confidence_grade, m.peer_supported, m.replication_risk
            )),
            None => None,
        }
    }

    /// Advisory text: verdict, mode block, steel-man, debate, counterfactuals
    pub fn render(&self) -> String {
        let mut sections = vec![format!(
            "VERDICT: {}",
            self.confidence.warning.as_deref().unwrap_or(NO_DRIFT_VERDICT)
        )];

        if let Some(block) = self.mode_block() {
            sections.push(block);
        }

        sections.push(format!(
            "STEEL-MAN OPPOSITION:\n{}",
            self.steelman.as_deref().unwrap_or("N/A")
        ));
        sections.push(format!("DEBATE OUTCOME:\n{}", self.debate_outcome));
        sections.push(format!(
            "COUNTERFACTUALS:\n{}",
            self.counterfactuals
                .iter()
                .map(|c| c.counter.as_str())
                .collect::<Vec<_>>()
                .join("\n")
        ));

        sections.join("\n\n")
    }
}

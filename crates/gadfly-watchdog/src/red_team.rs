//! Red-team critique of a fresh synthesis

use crate::WatchdogConfig;
use gadfly_domain::traits::{GenerateOptions, ReasoningService};
use gadfly_domain::{current_timestamp, KnowledgeEntry};
use gadfly_heuristics::lexicon::{contains_any, CRITICAL_FLAW_TERMS, MODERATE_FLAW_TERMS};
use tracing::{debug, error};

/// Agent name on red-team objections
pub const RED_TEAM_AGENT: &str = "RedTeam";

/// Persona for the critique
pub const RED_TEAM_SYSTEM: &str =
    "You are the Gadfly Red-Team Agent. You prioritize falsification over consensus.";

/// Critique recorded when the service returns no text
pub const EMPTY_CRITIQUE: &str = "No logical fractures detected in current resolution.";

/// Severity when the critique names a critical flaw
pub const CRITICAL_SEVERITY: f64 = 0.9;

/// Severity when the critique names a moderate flaw
pub const MODERATE_SEVERITY: f64 = 0.7;

/// Severity of any other critique
pub const MINOR_SEVERITY: f64 = 0.4;

/// Output of one red-team pass
#[derive(Debug, Clone, PartialEq)]
pub struct Critique {
    /// Agent that produced it
    pub agent: String,
    /// Critique text
    pub critique: String,
    /// How damaging the critique is
    pub severity: f64,
    /// Seconds since epoch
    pub timestamp: u64,
}

/// Score a critique by the flaws it names
pub fn critique_severity(critique: &str) -> f64 {
    let lower = critique.to_lowercase();
    if contains_any(&lower, CRITICAL_FLAW_TERMS) {
        CRITICAL_SEVERITY
    } else if contains_any(&lower, MODERATE_FLAW_TERMS) {
        MODERATE_SEVERITY
    } else {
        MINOR_SEVERITY
    }
}

/// Prompt asking the red team to falsify `synthesis` against sampled vault entries
pub fn build_red_team_prompt(
    synthesis: &str,
    entries: &[KnowledgeEntry],
    config: &WatchdogConfig,
) -> String {
    let excerpt: String = synthesis.chars().take(config.synthesis_excerpt_chars).collect();
    let samples = entries
        .iter()
        .take(config.vault_sample_count)
        .map(|e| {
            let content: String = e.content.chars().take(config.vault_sample_chars).collect();
            format!("• {}: {}", e.summary, content)
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are a Red-Team Analyst. Your job is to FALSIFY the synthesis below, not to agree with it.\n\n\
         [SYNTHESIS TO CHALLENGE]\n{}\n\n\
         [VAULT EVIDENCE (SAMPLES)]\n{}\n\n\
         TASK:\n\
         1. Name the weakest assumption the synthesis depends on.\n\
         2. Point out any logical fallacy or any claim with no evidence in the vault.\n\
         3. State the observation that would prove the synthesis wrong.\n\n\
         Tone: clinical and adversarial. No pleasantries.",
        excerpt, samples
    )
}

/// Run one red-team pass
///
/// Returns `None` when the service is unconfigured or fails.
pub async fn run_red_team<R: ReasoningService + ?Sized>(
    service: &R,
    synthesis: &str,
    entries: &[KnowledgeEntry],
    config: &WatchdogConfig,
) -> Option<Critique> {
    if !service.is_configured() {
        debug!("Red team skipped: reasoning service not configured");
        return None;
    }

    let options = GenerateOptions::new(RED_TEAM_SYSTEM, config.red_team_temperature)
        .with_max_output_tokens(config.red_team_max_tokens);
    let prompt = build_red_team_prompt(synthesis, entries, config);

    match service.generate(&prompt, &options).await {
        Ok(generation) => {
            let critique = if generation.text.trim().is_empty() {
                EMPTY_CRITIQUE.to_string()
            } else {
                generation.text
            };
            Some(Critique {
                agent: RED_TEAM_AGENT.to_string(),
                severity: critique_severity(&critique),
                critique,
                timestamp: current_timestamp(),
            })
        }
        Err(e) => {
            error!("Red team critique failed: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gadfly_llm::{LlmError, MockProvider};

    #[test]
    fn test_critique_severity() {
        assert_eq!(critique_severity("There is NO EVIDENCE for the second claim."), 0.9);
        assert_eq!(critique_severity("Classic fallacy of composition."), 0.9);
        assert_eq!(critique_severity("The growth figure is speculative."), 0.7);
        assert_eq!(critique_severity("Rests on a weak assumption about demand."), 0.7);
        assert_eq!(critique_severity("Looks mostly sound."), 0.4);
    }

    #[test]
    fn test_prompt_samples_vault() {
        let config = WatchdogConfig {
            vault_sample_count: 2,
            vault_sample_chars: 5,
            ..WatchdogConfig::default()
        };
        let entries = vec![
            KnowledgeEntry::new("abcdefghij", "First"),
            KnowledgeEntry::new("klmnopqrst", "Second"),
            KnowledgeEntry::new("uvwxyz", "Third"),
        ];

        let prompt = build_red_team_prompt("Rates will fall.", &entries, &config);

        assert!(prompt.contains("[SYNTHESIS TO CHALLENGE]\nRates will fall."));
        assert!(prompt.contains("• First: abcde\n• Second: klmno"));
        assert!(!prompt.contains("Third"));
    }

    #[test]
    fn test_prompt_truncates_synthesis() {
        let config = WatchdogConfig {
            synthesis_excerpt_chars: 4,
            ..WatchdogConfig::default()
        };
        let prompt = build_red_team_prompt("abcdefgh", &[], &config);
        assert!(prompt.contains("CHALLENGE]\nabcd\n"));
    }

    #[tokio::test]
    async fn test_run_red_team() {
        let provider = MockProvider::new("The conclusion rests on a speculative extrapolation.");
        let config = WatchdogConfig::default();

        let critique = run_red_team(&provider, "Rates will fall.", &[], &config).await.unwrap();

        assert_eq!(critique.agent, RED_TEAM_AGENT);
        assert_eq!(critique.severity, 0.7);
        let call = &provider.calls()[0];
        assert_eq!(call.options.temperature, 0.1);
        assert_eq!(call.options.max_output_tokens, Some(300));
        assert_eq!(call.options.system_instruction, RED_TEAM_SYSTEM);
    }

    #[tokio::test]
    async fn test_empty_text_uses_fallback() {
        let provider = MockProvider::new("  ");
        let critique = run_red_team(&provider, "x", &[], &WatchdogConfig::default()).await.unwrap();
        assert_eq!(critique.critique, EMPTY_CRITIQUE);
        assert_eq!(critique.severity, MINOR_SEVERITY);
    }

    #[tokio::test]
    async fn test_failures_yield_none() {
        let unconfigured = MockProvider::unconfigured();
        assert!(run_red_team(&unconfigured, "x", &[], &WatchdogConfig::default()).await.is_none());
        assert_eq!(unconfigured.call_count(), 0);

        let failing = MockProvider::default();
        failing.fail_next(LlmError::Communication("reset".to_string()));
        assert!(run_red_team(&failing, "x", &[], &WatchdogConfig::default()).await.is_none());
    }
}

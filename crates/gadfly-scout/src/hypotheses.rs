//! Red-team hypothesis generation

use crate::ScoutConfig;
use gadfly_domain::traits::{GenerateOptions, ReasoningService};
use gadfly_domain::KnowledgeEntry;
use tracing::warn;

/// Persona for hypothesis generation
pub const HYPOTHESIS_SYSTEM: &str = "You are the Gadfly Red-Team Scout. \
    Your goal is to identify points of failure in established beliefs.";

const CONTENT_EXCERPT_CHARS: usize = 1000;
const MIN_HYPOTHESIS_CHARS: usize = 10;

/// Prompt asking for `count` ways the entry could be wrong
pub fn build_hypothesis_prompt(entry: &KnowledgeEntry, count: usize) -> String {
    let excerpt: String = entry.content.chars().take(CONTENT_EXCERPT_CHARS).collect();
    format!(
        "You are a Red-Team Scout.\n\
         Generate {count} concise, specific hypotheses explaining how this conclusion \
         could be factually incorrect or logically flawed.\n\
         No explanations, just the hypotheses.\n\n\
         Conclusion Summary:\n\"{summary}\"\n\n\
         Conclusion Content:\n\"{excerpt}\"",
        count = count,
        summary = entry.summary,
        excerpt = excerpt,
    )
}

/// Strip a leading `12.` list marker and the whitespace after it
fn strip_numbering(line: &str) -> &str {
    let rest = line.trim_start_matches(|c: char| c.is_ascii_digit());
    match rest.strip_prefix('.') {
        Some(after) if rest.len() < line.len() => after.trim_start(),
        _ => line,
    }
}

/// One hypothesis per line longer than ten characters, numbering removed
pub fn parse_hypotheses(text: &str, max: usize) -> Vec<String> {
    text.lines()
        .filter(|line| line.trim().chars().count() > MIN_HYPOTHESIS_CHARS)
        .map(|line| strip_numbering(line).trim().to_string())
        .take(max)
        .collect()
}

/// Ask the reasoning service how `entry` could be wrong
///
/// Returns no hypotheses when the service is unconfigured or fails.
pub async fn generate_hypotheses<R: ReasoningService + ?Sized>(
    service: &R,
    entry: &KnowledgeEntry,
    config: &ScoutConfig,
) -> Vec<String> {
    if !service.is_configured() {
        return Vec::new();
    }

    let options = GenerateOptions::new(HYPOTHESIS_SYSTEM, config.hypothesis_temperature)
        .with_max_output_tokens(config.hypothesis_max_tokens);
    let prompt = build_hypothesis_prompt(entry, config.max_hypotheses);

    match service.generate(&prompt, &options).await {
        Ok(generation) => parse_hypotheses(&generation.text, config.max_hypotheses),
        Err(e) => {
            warn!("Hypothesis generation failed for {}: {}", entry.id, e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gadfly_llm::{LlmError, MockProvider};

    #[test]
    fn test_parse_strips_numbering_and_short_lines() {
        let text = "1. The sample was drawn from one region\n\
                    \n\
                    2.   Effect sizes shrink on replication\n\
                    short\n\
                    Confounding by seasonality was ignored";
        assert_eq!(
            parse_hypotheses(text, 3),
            vec![
                "The sample was drawn from one region",
                "Effect sizes shrink on replication",
                "Confounding by seasonality was ignored",
            ]
        );
    }

    #[test]
    fn test_parse_caps_count() {
        let text = "first long hypothesis\nsecond long hypothesis\nthird long hypothesis\nfourth long hypothesis";
        assert_eq!(parse_hypotheses(text, 3).len(), 3);
    }

    #[test]
    fn test_numbering_requires_dot() {
        assert_eq!(strip_numbering("2024 was a record year"), "2024 was a record year");
        assert_eq!(strip_numbering("10. ten"), "ten");
        assert_eq!(strip_numbering(". dot only"), ". dot only");
    }

    #[test]
    fn test_prompt_excerpts_content() {
        let entry = KnowledgeEntry::new("x".repeat(1500), "Summary line");
        let prompt = build_hypothesis_prompt(&entry, 3);
        assert!(prompt.contains("Generate 3 concise"));
        assert!(prompt.contains("\"Summary line\""));
        assert!(!prompt.contains(&"x".repeat(1001)));
    }

    #[tokio::test]
    async fn test_generate_uses_options() {
        let provider = MockProvider::new("1. Sample bias across cohorts\n2. Survivorship in the dataset");
        let entry = KnowledgeEntry::new("content", "summary");

        let hypotheses = generate_hypotheses(&provider, &entry, &ScoutConfig::default()).await;

        assert_eq!(hypotheses.len(), 2);
        let call = &provider.calls()[0];
        assert_eq!(call.options.temperature, 0.15);
        assert_eq!(call.options.max_output_tokens, Some(150));
    }

    #[tokio::test]
    async fn test_unconfigured_and_failing() {
        let entry = KnowledgeEntry::new("content", "summary");
        let config = ScoutConfig::default();

        let offline = MockProvider::unconfigured();
        assert!(generate_hypotheses(&offline, &entry, &config).await.is_empty());
        assert_eq!(offline.call_count(), 0);

        let failing = MockProvider::new("1. would have worked fine");
        failing.fail_next(LlmError::Communication("reset".into()));
        assert!(generate_hypotheses(&failing, &entry, &config).await.is_empty());
    }
}

//! Prompt templates for the steel-man and debate requests

use gadfly_domain::{Assumption, Contradiction, Counterfactual};

/// System instruction for the steel-man request
pub const STEELMAN_SYSTEM: &str = "You are the Gadfly intellectual integrity core. \
You provide the strongest possible opposing view to prevent groupthink.";

/// System instruction for the debate request
pub const DEBATE_SYSTEM: &str = "You are the Gadfly devil's advocate engine. \
You perform adversarial reasoning to ensure research integrity.";

/// First `max_chars` characters of `text`
pub(crate) fn excerpt(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Ask for the strongest honest argument against the synthesis
pub fn build_steelman_prompt(synthesis: &str, max_chars: usize) -> String {
    format!(
        r#"Steel-man the strongest possible argument AGAINST this conclusion.
Assume the opponent is highly intelligent, well-informed, and intellectually honest.
Do not weaken their position or use straw-man tactics.

Conclusion:
"{}"

TASK:
Produce a 200-word robust counter-thesis that addresses the core logical pillars of the synthesis."#,
        excerpt(synthesis, max_chars)
    )
}

/// Structured context handed to the debate personas
#[derive(Debug, Clone, Copy)]
pub struct DebateContext<'a> {
    /// Synthesis under review
    pub synthesis: &'a str,
    /// Extracted assumptions
    pub assumptions: &'a [Assumption],
    /// Contradictions found in the vault
    pub contradictions: &'a [Contradiction],
    /// Counterfactual scenarios
    pub counterfactuals: &'a [Counterfactual],
}

fn bullets<'a>(items: impl Iterator<Item = &'a str>) -> String {
    items.map(|s| format!("- {}", s)).collect::<Vec<_>>().join("\n")
}

/// Ask for a Defender / Skeptic / Judge debate over the synthesis
pub fn build_debate_prompt(ctx: &DebateContext<'_>, max_chars: usize) -> String {
    format!(
        r#"INTERNAL DEBATE ORCHESTRATOR
Goal: Pressure-test the current synthesis.

[CURRENT SYNTHESIS]
{synthesis}...

[ASSUMPTIONS EXTRACTED]
{assumptions}

[CONTRADICTIONS FOUND IN VAULT]
{contradictions}

[COUNTERFACTUAL SCENARIOS]
{counterfactuals}

TASK:
Conduct an internal debate between three personas:
1. The Defender: validates the synthesis based on current data.
2. The Skeptic: challenges the assumptions and highlights the vault contradictions.
3. The Judge: evaluates the exchange and names the epistemic blind spot.

Return exactly:
- The strongest argument for the Defender.
- The most damaging critique from the Skeptic.
- The Judge's final verdict on the synthesis confidence.

Tone: cold, sharp, academic."#,
        synthesis = excerpt(ctx.synthesis, max_chars),
        assumptions = bullets(ctx.assumptions.iter().map(|a| a.claim.as_str())),
        contradictions = bullets(ctx.contradictions.iter().map(|c| c.reason.as_str())),
        counterfactuals = bullets(ctx.counterfactuals.iter().map(|c| c.counter.as_str())),
    )
}

//! Counterfactual generation

use gadfly_domain::{Assumption, Counterfactual};

/// Risk label attached to every counterfactual
pub const COUNTERFACTUAL_RISK: &str = "Unexamined alternative logic or confirmation bias.";

/// Negate a claim by rewriting its first copula or modal
///
/// Tries `is ` → `is NOT `, then `will ` → `will NOT `, then `can ` →
/// `cannot `; only the first occurrence is rewritten. Claims with none of
/// these become `the inverse of "<claim>"`.
pub fn invert_claim(claim: &str) -> String {
    const REWRITES: [(&str, &str); 3] = [("is ", "is NOT "), ("will ", "will NOT "), ("can ", "cannot ")];

    for (from, to) in REWRITES {
        if claim.contains(from) {
            return claim.replacen(from, to, 1);
        }
    }
    format!("the inverse of \"{}\"", claim)
}

/// One counterfactual per assumption, in order
pub fn generate_counterfactuals(assumptions: &[Assumption]) -> Vec<Counterfactual> {
    assumptions
        .iter()
        .map(|a| Counterfactual {
            original: a.claim.clone(),
            counter: format!(
                "Hypothesis: What if the opposite is true, specifically that {}?",
                invert_claim(&a.claim)
            ),
            risk: COUNTERFACTUAL_RISK.to_string(),
        })
        .collect()
}

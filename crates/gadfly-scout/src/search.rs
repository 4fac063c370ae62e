//! Grounded adversarial search

use crate::ScoutConfig;
use gadfly_domain::traits::{GenerateOptions, ReasoningService};
use gadfly_domain::{SourceOrigin, SourceResult};
use tracing::{debug, error};

/// Persona for grounded searches
pub const SEARCH_SYSTEM: &str = "You are the Gadfly Red-Team Scout. \
    You look for counter-evidence to established claims.";

/// Title given to grounded sources that carry none
pub const UNTITLED_SOURCE: &str = "Counter Intelligence Node";

/// Snippet attached to every scout search result
pub const SEARCH_SNIPPET: &str = "Adversarial findings verified via scout grounding relay.";

/// Score attached to every scout search result
pub const SEARCH_SCORE: f64 = 0.85;

/// Prompt asking for sources that support an adversarial hypothesis
pub fn build_search_prompt(hypothesis: &str) -> String {
    format!(
        "Search for authoritative sources and data that validate the following adversarial \
         hypothesis: \"{}\". We are looking for counter-evidence to established claims.",
        hypothesis
    )
}

/// Search for sources supporting `hypothesis`
///
/// Sources without a URI are dropped. An unconfigured or failing service
/// yields no sources.
pub async fn scout_search<R: ReasoningService + ?Sized>(
    service: &R,
    hypothesis: &str,
    config: &ScoutConfig,
) -> Vec<SourceResult> {
    if !service.is_configured() {
        return Vec::new();
    }

    let options = GenerateOptions::new(SEARCH_SYSTEM, config.search_temperature).grounded();
    let generation = match service.generate(&build_search_prompt(hypothesis), &options).await {
        Ok(generation) => generation,
        Err(e) => {
            error!("Scout search relay failed: {}", e);
            return Vec::new();
        }
    };

    let results: Vec<SourceResult> = generation
        .grounding_sources
        .into_iter()
        .filter(|s| !s.uri.is_empty())
        .map(|s| SourceResult {
            title: if s.title.is_empty() {
                UNTITLED_SOURCE.to_string()
            } else {
                s.title
            },
            snippet: SEARCH_SNIPPET.to_string(),
            origin: SourceOrigin::Web,
            score: Some(SEARCH_SCORE),
            ..s
        })
        .collect();
    debug!("Scout search for \"{}\" returned {} sources", hypothesis, results.len());
    results
}

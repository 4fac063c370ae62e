//! Concurrent counter-evidence search

use crate::WatchdogConfig;
use gadfly_domain::traits::{GenerateOptions, ReasoningService};
use gadfly_domain::{SourceOrigin, SourceResult};
use gadfly_heuristics::lexicon::falsification_queries;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Agent name on counter-search findings
pub const ADVERSARIAL_AGENT: &str = "AdversarialScanner";

/// Persona for counter-searches
pub const COUNTER_SYSTEM: &str = "You are the Gadfly Adversarial Scanner. \
    You search for authoritative sources that contradict confident claims.";

/// Title given to counter-sources that carry none
pub const UNTITLED_COUNTER_SOURCE: &str = "Counter Intel Node";

/// Snippet attached to every counter-source
pub const COUNTER_SNIPPET: &str = "Counter-evidence surfaced by adversarial grounding.";

/// Score attached to every counter-source
pub const COUNTER_SCORE: f64 = 0.9;

/// Prompt for one falsification query against `claim`
pub fn build_counter_prompt(claim: &str, query: &str) -> String {
    format!(
        "Seek evidence that challenges the following claim: \"{}\". \
         Specifically look for \"{}\". Return authoritative counter-sources.",
        claim, query
    )
}

/// Search for sources contradicting `claim`
///
/// Every falsification query runs as its own task. Results keep query
/// order, lose sources without a URI and are deduplicated by URI with the
/// first occurrence kept. A failed query contributes nothing.
pub async fn adversarial_search<R>(
    service: &Arc<R>,
    claim: &str,
    config: &WatchdogConfig,
) -> Vec<SourceResult>
where
    R: ReasoningService + 'static,
{
    if !service.is_configured() {
        debug!("Counter-search skipped: reasoning service not configured");
        return Vec::new();
    }

    let options = GenerateOptions::new(COUNTER_SYSTEM, config.search_temperature).grounded();
    let handles: Vec<_> = falsification_queries(claim)
        .into_iter()
        .map(|query| {
            let service = Arc::clone(service);
            let options = options.clone();
            let prompt = build_counter_prompt(claim, &query);
            tokio::spawn(async move { service.generate(&prompt, &options).await })
        })
        .collect();

    let mut seen = HashSet::new();
    let mut results = Vec::new();
    for handle in handles {
        let generation = match handle.await {
            Ok(Ok(generation)) => generation,
            Ok(Err(e)) => {
                warn!("Counter-search query failed: {}", e);
                continue;
            }
            Err(e) => {
                error!("Counter-search task aborted: {}", e);
                continue;
            }
        };

        for source in generation.grounding_sources {
            if source.uri.is_empty() || !seen.insert(source.uri.clone()) {
                continue;
            }
            results.push(SourceResult {
                title: if source.title.is_empty() {
                    UNTITLED_COUNTER_SOURCE.to_string()
                } else {
                    source.title
                },
                snippet: COUNTER_SNIPPET.to_string(),
                origin: SourceOrigin::Web,
                score: Some(COUNTER_SCORE),
                ..source
            });
        }
    }

    debug!("Counter-search returned {} unique sources", results.len());
    results
}

//! Ollama Provider Implementation
//!
//! Provides integration with Ollama's local LLM API.
//!
//! # Features
//!
//! - Async HTTP communication with Ollama API
//! - System instruction, temperature and output cap per request
//! - Grounding emulated through Ollama's JSON mode: the model is asked to
//!   cite the sources it relied on, which are parsed into `SourceResult`s
//! - Retry logic with exponential backoff on transient failures
//!
//! # Examples
//!
//! ```no_run
//! use gadfly_llm::OllamaProvider;
//!
//! let provider = OllamaProvider::new("http://localhost:11434", "llama3");
//! ```

use crate::retry::{with_retry, RetryPolicy};
use crate::LlmError;
use async_trait::async_trait;
use gadfly_domain::traits::{GenerateOptions, Generation, ReasoningService};
use gadfly_domain::{SourceOrigin, SourceResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default Ollama API endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default timeout for LLM requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const GROUNDING_INSTRUCTIONS: &str = "\n\nRespond ONLY with a JSON object of the form \
{\"answer\": string, \"sources\": [{\"title\": string, \"uri\": string}]} \
listing the authoritative sources (with full URLs) your answer relies on.";

/// Ollama API provider for local LLM inference
pub struct OllamaProvider {
    endpoint: String,
    model: String,
    client: reqwest::Client,
    retry: RetryPolicy,
}

#[derive(Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    system: &'a str,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<&'static str>,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

#[derive(Deserialize)]
struct OllamaGenerateResponse {
    response: String,
    #[allow(dead_code)]
    done: bool,
}

#[derive(Deserialize)]
struct GroundedPayload {
    #[serde(default)]
    answer: String,
    #[serde(default)]
    sources: Vec<GroundedSource>,
}

#[derive(Deserialize)]
struct GroundedSource {
    #[serde(default)]
    title: String,
    #[serde(default)]
    uri: String,
}

impl OllamaProvider {
    /// Create a new Ollama provider
    ///
    /// # Parameters
    ///
    /// - `endpoint`: Ollama API endpoint (e.g., "http://localhost:11434")
    /// - `model`: Model to use (e.g., "llama3", "mistral")
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            endpoint: endpoint.into(),
            model: model.into(),
            client,
            retry: RetryPolicy::default(),
        }
    }

    /// Create a provider against `http://localhost:11434`
    pub fn default_endpoint(model: impl Into<String>) -> Self {
        Self::new(DEFAULT_ENDPOINT, model)
    }

    /// Set the retry policy
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    async fn generate_once(
        &self,
        prompt: &str,
        options: &GenerateOptions,
    ) -> Result<String, LlmError> {
        let url = format!("{}/api/generate", self.endpoint);

        let mut prompt = prompt.to_string();
        if options.grounding {
            prompt.push_str(GROUNDING_INSTRUCTIONS);
        }

        let body = OllamaGenerateRequest {
            model: &self.model,
            prompt,
            system: &options.system_instruction,
            stream: false,
            format: options.grounding.then_some("json"),
            options: OllamaOptions {
                temperature: options.temperature,
                num_predict: options.max_output_tokens,
            },
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            let parsed = response
                .json::<OllamaGenerateResponse>()
                .await
                .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;
            return Ok(parsed.response);
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(LlmError::ModelNotAvailable(self.model.clone()));
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmError::RateLimitExceeded);
        }

        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(LlmError::Server {
            status: status.as_u16(),
            message,
        })
    }
}

/// Split a JSON-mode answer into text and cited sources
///
/// Anything that does not parse is treated as plain text with no sources.
fn parse_grounded(raw: &str) -> Generation {
    match serde_json::from_str::<GroundedPayload>(raw) {
        Ok(payload) => Generation {
            text: payload.answer,
            grounding_sources: payload
                .sources
                .into_iter()
                .filter(|s| !s.uri.trim().is_empty())
                .map(|s| SourceResult {
                    title: s.title,
                    uri: s.uri,
                    snippet: String::new(),
                    origin: SourceOrigin::Web,
                    score: None,
                    evidence: None,
                })
                .collect(),
        },
        Err(e) => {
            debug!("Grounded response was not JSON ({}), using raw text", e);
            Generation {
                text: raw.to_string(),
                grounding_sources: Vec::new(),
            }
        }
    }
}

#[async_trait]
impl ReasoningService for OllamaProvider {
    type Error = LlmError;

    fn is_configured(&self) -> bool {
        !self.endpoint.trim().is_empty() && !self.model.trim().is_empty()
    }

    async fn generate(
        &self,
        prompt: &str,
        options: &GenerateOptions,
    ) -> Result<Generation, Self::Error> {
        if !self.is_configured() {
            return Err(LlmError::NotConfigured);
        }

        let raw = with_retry(&self.retry, || self.generate_once(prompt, options)).await?;

        if options.grounding {
            Ok(parse_grounded(&raw))
        } else {
            Ok(Generation {
                text: raw,
                grounding_sources: Vec::new(),
            })
        }
    }
}

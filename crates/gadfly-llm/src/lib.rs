//! Gadfly LLM Provider Layer
//!
//! Implementations of the `ReasoningService` trait from `gadfly-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: scripted, deterministic provider for tests
//! - `OllamaProvider`: local Ollama API integration
//! - `Retrying`: wraps either with exponential-backoff retries
//!
//! # Examples
//!
//! ```
//! use gadfly_llm::MockProvider;
//! use gadfly_domain::traits::{GenerateOptions, ReasoningService};
//!
//! # async fn demo() {
//! let provider = MockProvider::new("Hello from LLM!");
//! let out = provider
//!     .generate("test prompt", &GenerateOptions::new("system", 0.2))
//!     .await
//!     .unwrap();
//! assert_eq!(out.text, "Hello from LLM!");
//! # }
//! ```

#![warn(missing_docs)]

pub mod ollama;
pub mod retry;

use async_trait::async_trait;
use gadfly_domain::traits::{GenerateOptions, Generation, ReasoningService};
use gadfly_domain::SourceResult;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use thiserror::Error;

pub use ollama::OllamaProvider;
pub use retry::{with_retry, RetryPolicy, Retrying};

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Server-side failure with an HTTP status
    #[error("Server error {status}: {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Response body or reason
        message: String,
    },

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Provider has no endpoint or credentials
    #[error("Provider not configured")]
    NotConfigured,

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

impl LlmError {
    /// Whether a retry has a reasonable chance of succeeding
    ///
    /// 5xx responses, dropped connections, rate limiting and errors whose
    /// message reports an `INTERNAL`/`UNAVAILABLE` status are transient.
    pub fn is_transient(&self) -> bool {
        match self {
            LlmError::Server { status, .. } => *status >= 500,
            LlmError::Communication(_) | LlmError::RateLimitExceeded => true,
            LlmError::Other(message) => {
                message.contains("INTERNAL") || message.contains("UNAVAILABLE")
            }
            LlmError::InvalidResponse(_)
            | LlmError::ModelNotAvailable(_)
            | LlmError::NotConfigured => false,
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Clone)]
struct ScriptedResponse {
    needle: String,
    generation: Generation,
}

/// A request the mock has seen
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// Prompt text
    pub prompt: String,
    /// Options passed with it
    pub options: GenerateOptions,
}

/// Mock reasoning service for deterministic testing
///
/// Responses are matched by substring: the first scripted needle contained
/// in the prompt wins, otherwise the default response is returned. Clones
/// share state, so a test can keep a handle while the engine owns another.
///
/// # Examples
///
/// ```
/// use gadfly_llm::MockProvider;
///
/// let provider = MockProvider::new("fallback");
/// provider.add_response("Steel-man", "the strongest counter-thesis");
/// provider.add_response("debate", "Judge: confidence overstated");
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    responses: Arc<Mutex<Vec<ScriptedResponse>>>,
    failures: Arc<Mutex<VecDeque<LlmError>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    configured: bool,
    latency: Option<Duration>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(Vec::new())),
            failures: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            configured: true,
            latency: None,
        }
    }

    /// A provider that reports missing credentials
    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::new("")
        }
    }

    /// Delay every response (exercises async interleavings)
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Respond with `response` to any prompt containing `needle`
    pub fn add_response(&self, needle: impl Into<String>, response: impl Into<String>) {
        self.add_generation(
            needle,
            Generation {
                text: response.into(),
                grounding_sources: Vec::new(),
            },
        );
    }

    /// Respond with grounded sources to any prompt containing `needle`
    pub fn add_grounded_response(&self, needle: impl Into<String>, sources: Vec<SourceResult>) {
        self.add_generation(
            needle,
            Generation {
                text: String::new(),
                grounding_sources: sources,
            },
        );
    }

    /// Respond with a full generation to any prompt containing `needle`
    pub fn add_generation(&self, needle: impl Into<String>, generation: Generation) {
        lock(&self.responses).push(ScriptedResponse {
            needle: needle.into(),
            generation,
        });
    }

    /// Fail the next call with `error` (queued, first in first out)
    pub fn fail_next(&self, error: LlmError) {
        lock(&self.failures).push_back(error);
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Every request seen so far, in call order
    pub fn calls(&self) -> Vec<RecordedCall> {
        lock(&self.calls).clone()
    }

    /// Reset the recorded calls
    pub fn reset_calls(&self) {
        lock(&self.calls).clear();
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

#[async_trait]
impl ReasoningService for MockProvider {
    type Error = LlmError;

    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn generate(
        &self,
        prompt: &str,
        options: &GenerateOptions,
    ) -> Result<Generation, Self::Error> {
        lock(&self.calls).push(RecordedCall {
            prompt: prompt.to_string(),
            options: options.clone(),
        });

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        if !self.configured {
            return Err(LlmError::NotConfigured);
        }

        if let Some(error) = lock(&self.failures).pop_front() {
            return Err(error);
        }

        let scripted = lock(&self.responses)
            .iter()
            .find(|r| prompt.contains(&r.needle))
            .map(|r| r.generation.clone());

        Ok(scripted.unwrap_or_else(|| Generation {
            text: self.default_response.clone(),
            grounding_sources: Vec::new(),
        }))
    }
}

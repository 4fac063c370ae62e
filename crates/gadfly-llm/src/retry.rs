//! Retry with exponential backoff for transient reasoning-service failures

use crate::LlmError;
use async_trait::async_trait;
use gadfly_domain::traits::{GenerateOptions, Generation, ReasoningService};
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Default number of retries after the first attempt
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default delay before the first retry
pub const DEFAULT_INITIAL_BACKOFF: Duration = Duration::from_millis(1000);

/// How often and how patiently to retry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the initial attempt
    pub max_retries: u32,
    /// Delay before the first retry; doubles for each subsequent one
    pub initial_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            initial_backoff: DEFAULT_INITIAL_BACKOFF,
        }
    }
}

impl RetryPolicy {
    /// Policy that never retries
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            initial_backoff: Duration::ZERO,
        }
    }

    /// Delay before retry number `retry` (1-based): 1s, 2s, 4s, ...
    pub fn backoff(&self, retry: u32) -> Duration {
        let exponent = retry.saturating_sub(1).min(16);
        self.initial_backoff * 2u32.pow(exponent)
    }
}

/// Run `op`, retrying transient failures per `policy`
///
/// Non-transient errors are returned immediately. After the last retry the
/// final error is returned to the caller.
pub async fn with_retry<T, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<T, LlmError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, LlmError>>,
{
    let mut retries = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_transient() && retries < policy.max_retries => {
                retries += 1;
                let delay = policy.backoff(retries);
                warn!(
                    "Transient reasoning failure ({}), retry {}/{} in {:?}",
                    e, retries, policy.max_retries, delay
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Wraps any provider so every `generate` call goes through [`with_retry`]
#[derive(Debug, Clone)]
pub struct Retrying<P> {
    inner: P,
    policy: RetryPolicy,
}

impl<P> Retrying<P> {
    /// Wrap a provider with the default policy
    pub fn new(inner: P) -> Self {
        Self::with_policy(inner, RetryPolicy::default())
    }

    /// Wrap a provider with an explicit policy
    pub fn with_policy(inner: P, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    /// Access the wrapped provider
    pub fn inner(&self) -> &P {
        &self.inner
    }
}

#[async_trait]
impl<P> ReasoningService for Retrying<P>
where
    P: ReasoningService<Error = LlmError>,
{
    type Error = LlmError;

    fn is_configured(&self) -> bool {
        self.inner.is_configured()
    }

    async fn generate(
        &self,
        prompt: &str,
        options: &GenerateOptions,
    ) -> Result<Generation, Self::Error> {
        with_retry(&self.policy, || self.inner.generate(prompt, options)).await
    }
}

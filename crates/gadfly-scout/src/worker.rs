//! Background worker for continuous scout operation

use crate::{RedTeamScout, ScoutError, ScoutMetrics};
use gadfly_domain::traits::{KnowledgeStore, ReasoningService, ScoutInbox};
use tokio::time::{interval, Duration};

/// Background worker that runs scout cycles on a schedule
///
/// # Examples
///
/// ```no_run
/// use gadfly_llm::OllamaProvider;
/// use gadfly_scout::{RedTeamScout, ScoutWorker};
/// use gadfly_store::{MemoryInbox, MemoryVault};
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let scout = RedTeamScout::new(
///         Arc::new(MemoryVault::new()),
///         Arc::new(OllamaProvider::default_endpoint("llama3")),
///         Arc::new(MemoryInbox::new()),
///     );
///     let mut worker = ScoutWorker::new(scout);
///
///     // Run indefinitely (until Ctrl+C)
///     worker.run().await?;
///     Ok(())
/// }
/// ```
pub struct ScoutWorker<S, R, I> {
    scout: RedTeamScout<S, R, I>,
    interval: Duration,
}

impl<S, R, I> ScoutWorker<S, R, I>
where
    S: KnowledgeStore,
    R: ReasoningService,
    I: ScoutInbox,
{
    /// Create a worker ticking at the scout's configured interval
    pub fn new(scout: RedTeamScout<S, R, I>) -> Self {
        let interval = scout.config().cycle_interval();
        Self { scout, interval }
    }

    /// Run the worker until a shutdown signal (Ctrl+C) is received
    ///
    /// A failed cycle is logged and the worker keeps going.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub async fn run(&mut self) -> Result<(), ScoutError> {
        self.scout.config().validate()?;
        let mut ticker = interval(self.interval);

        tracing::info!("Scout worker started (interval: {:?})", self.interval);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    tracing::debug!("Starting scout cycle");

                    match self.scout.run_cycle().await {
                        Ok(report) => {
                            tracing::info!(
                                "Scout cycle completed: {} goals, {} audited, {} findings, {} threads",
                                report.goals_pursued,
                                report.watchlist.len(),
                                report.findings.len(),
                                report.threads.len()
                            );
                        }
                        Err(e) => {
                            tracing::error!("Scout cycle failed: {}", e);
                        }
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Shutdown signal received, stopping scout");
                    break;
                }
            }
        }

        tracing::info!("Scout stopped. Final metrics:\n{}", self.scout.metrics().summary());

        Ok(())
    }

    /// Run for a specific number of cycles
    ///
    /// # Errors
    ///
    /// Stops at and returns the first failed cycle.
    pub async fn run_cycles(&mut self, cycles: usize) -> Result<(), ScoutError> {
        self.scout.config().validate()?;
        let mut ticker = interval(self.interval);

        tracing::info!(
            "Scout worker started for {} cycles (interval: {:?})",
            cycles,
            self.interval
        );

        for cycle in 0..cycles {
            ticker.tick().await;

            tracing::debug!("Starting scout cycle {}/{}", cycle + 1, cycles);

            match self.scout.run_cycle().await {
                Ok(report) => {
                    tracing::info!(
                        "Scout cycle {}/{} completed: {} findings, {} updates",
                        cycle + 1,
                        cycles,
                        report.findings.len(),
                        report.updates_pushed()
                    );
                }
                Err(e) => {
                    tracing::error!("Scout cycle {}/{} failed: {}", cycle + 1, cycles, e);
                    return Err(e);
                }
            }
        }

        tracing::info!(
            "Scout finished {} cycles. Final metrics:\n{}",
            cycles,
            self.scout.metrics().summary()
        );

        Ok(())
    }

    /// Get a reference to the scout's current metrics
    pub fn metrics(&self) -> &ScoutMetrics {
        self.scout.metrics()
    }

    /// Reset the scout's metrics counters
    pub fn reset_metrics(&mut self) {
        self.scout.reset_metrics();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScoutConfig;
    use gadfly_domain::traits::KnowledgeStore;
    use gadfly_domain::{
        Annotation, AnnotationId, ConversationMessage, EntryId, KnowledgeEntry,
    };
    use gadfly_llm::MockProvider;
    use gadfly_store::{MemoryInbox, MemoryVault};
    use std::sync::Arc;

    fn worker(config: ScoutConfig) -> ScoutWorker<MemoryVault, MockProvider, MemoryInbox> {
        ScoutWorker::new(RedTeamScout::with_config(
            Arc::new(MemoryVault::new()),
            Arc::new(MockProvider::default()),
            Arc::new(MemoryInbox::new()),
            config,
        ))
    }

    #[tokio::test]
    async fn test_worker_creation() {
        let worker = worker(ScoutConfig::default());
        assert_eq!(worker.metrics().cycle_count, 0);
        assert_eq!(worker.interval, Duration::from_secs(3600));
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_cycles() {
        let mut worker = worker(ScoutConfig::default());
        worker.run_cycles(3).await.unwrap();
        assert_eq!(worker.metrics().cycle_count, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_metrics() {
        let mut worker = worker(ScoutConfig::default());
        worker.run_cycles(1).await.unwrap();
        assert_eq!(worker.metrics().cycle_count, 1);

        worker.reset_metrics();
        assert_eq!(worker.metrics().cycle_count, 0);
    }

    #[tokio::test]
    async fn test_invalid_config_rejected() {
        let mut worker = worker(ScoutConfig {
            rotation_rate: 2.0,
            ..ScoutConfig::default()
        });
        assert!(matches!(worker.run_cycles(1).await, Err(ScoutError::Config(_))));
    }

    struct BrokenStore;

    impl KnowledgeStore for BrokenStore {
        type Error = String;

        fn list_entries(&self) -> Result<Vec<KnowledgeEntry>, Self::Error> {
            Err("unavailable".to_string())
        }

        fn get_entry(&self, _id: EntryId) -> Result<Option<KnowledgeEntry>, Self::Error> {
            Err("unavailable".to_string())
        }

        fn create_entry(&self, _entry: KnowledgeEntry) -> Result<EntryId, Self::Error> {
            Err("unavailable".to_string())
        }

        fn append_annotation(&self, _id: EntryId, _a: Annotation) -> Result<(), Self::Error> {
            Err("unavailable".to_string())
        }

        fn append_thread_message(
            &self,
            _id: EntryId,
            _annotation: AnnotationId,
            _message: ConversationMessage,
        ) -> Result<(), Self::Error> {
            Err("unavailable".to_string())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_cycle_stops_run_cycles() {
        let mut worker = ScoutWorker::new(RedTeamScout::new(
            Arc::new(BrokenStore),
            Arc::new(MockProvider::default()),
            Arc::new(MemoryInbox::new()),
        ));

        let result = worker.run_cycles(2).await;

        assert!(matches!(result, Err(ScoutError::Store(_))));
        assert_eq!(worker.metrics().cycle_count, 0);
    }
}

//! Delayed one-shot jobs keyed by entry and kind
//!
//! Scheduling a job for a key that already has one waiting aborts the
//! waiting job. A job that has finished its delay is never aborted.
//!
//! Each job carries a `started` flag that is claimed exactly once: by the
//! task when its delay elapses, or by a canceller. Whoever loses the claim
//! backs off, so a job either runs to completion or never begins.

use gadfly_domain::EntryId;
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

/// Kinds of background job the watchdog runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobKind {
    /// Red-team critique of a synthesis
    RedTeamCritique,
    /// Adversarial counter-search
    CounterSearch,
}

struct ScheduledJob {
    handle: JoinHandle<()>,
    started: Arc<AtomicBool>,
}

impl ScheduledJob {
    fn is_waiting(&self) -> bool {
        !self.started.load(Ordering::SeqCst) && !self.handle.is_finished()
    }

    /// Claim the job before it starts and abort it
    ///
    /// Returns `false` when the job already claimed itself.
    fn cancel(&self) -> bool {
        if claim(&self.started) {
            self.handle.abort();
            true
        } else {
            false
        }
    }
}

fn claim(started: &AtomicBool) -> bool {
    started
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_ok()
}

/// Scheduler for delayed watchdog jobs
///
/// Must be used from within a tokio runtime. Clones share the job table.
#[derive(Clone, Default)]
pub struct JobScheduler {
    jobs: Arc<Mutex<HashMap<(EntryId, JobKind), ScheduledJob>>>,
}

impl JobScheduler {
    /// Create an empty scheduler
    pub fn new() -> Self {
        Self::default()
    }

    fn jobs(&self) -> MutexGuard<'_, HashMap<(EntryId, JobKind), ScheduledJob>> {
        self.jobs.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `job` after `delay`, replacing any job still waiting for the same key
    ///
    /// Returns `true` when a waiting job was replaced.
    pub fn schedule<F>(&self, entry: EntryId, kind: JobKind, delay: Duration, job: F) -> bool
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let started = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&started);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if claim(&flag) {
                job.await;
            }
        });

        let mut jobs = self.jobs();
        jobs.retain(|_, job| !job.handle.is_finished());
        match jobs.insert((entry, kind), ScheduledJob { handle, started }) {
            Some(previous) if previous.cancel() => {
                debug!("Replaced pending {:?} job for {}", kind, entry);
                true
            }
            _ => false,
        }
    }

    /// Whether a job for the key is still waiting out its delay
    pub fn is_pending(&self, entry: EntryId, kind: JobKind) -> bool {
        self.jobs()
            .get(&(entry, kind))
            .is_some_and(ScheduledJob::is_waiting)
    }

    /// Number of jobs still waiting out their delay
    pub fn pending(&self) -> usize {
        self.jobs().values().filter(|j| j.is_waiting()).count()
    }

    /// Cancel the waiting job for a key
    ///
    /// Returns `false` when nothing was waiting.
    pub fn cancel(&self, entry: EntryId, kind: JobKind) -> bool {
        let mut jobs = self.jobs();
        match jobs.get(&(entry, kind)) {
            Some(job) if job.cancel() => {
                jobs.remove(&(entry, kind));
                true
            }
            _ => false,
        }
    }

    /// Cancel every waiting job
    pub fn cancel_all(&self) {
        let mut jobs = self.jobs();
        for job in jobs.values() {
            job.cancel();
        }
        jobs.clear();
    }
}

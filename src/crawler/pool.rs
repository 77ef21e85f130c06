//! Bounded worker pool with per-batch barriers
//!
//! This module handles:
//! - Global concurrency limiting via a semaphore
//! - Running a batch of work units and waiting for all of them (the barrier)
//! - Merging unit outputs back into submission order
//! - Draining or aborting outstanding units at shutdown

use crate::ConfigError;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// A pool of at most `width` concurrently running work units
///
/// Units are spawned onto the tokio runtime and each one holds a semaphore
/// permit while it runs. `scatter` returns only after every unit of the batch
/// has finished, so consecutive batches never overlap.
pub struct WorkerPool<T> {
    /// Global semaphore limiting concurrently running units
    permits: Arc<Semaphore>,

    /// Pool width
    width: usize,

    /// Units spawned but not yet joined, tagged with their submission index
    tasks: JoinSet<Option<(usize, T)>>,
}

impl<T: Send + 'static> WorkerPool<T> {
    /// Creates a pool running at most `width` units at once
    ///
    /// # Returns
    ///
    /// * `Ok(WorkerPool)` - The pool, with no units running
    /// * `Err(ConfigError::Validation)` - `width` is zero
    pub fn new(width: usize) -> Result<Self, ConfigError> {
        if width == 0 {
            return Err(ConfigError::Validation(
                "worker pool width must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            permits: Arc::new(Semaphore::new(width)),
            width,
            tasks: JoinSet::new(),
        })
    }

    /// Number of units spawned and not yet joined
    pub fn outstanding(&self) -> usize {
        self.tasks.len()
    }

    /// Runs `job` once per input and waits for every unit to finish
    ///
    /// The returned vector has one slot per input, in input order, whatever
    /// order the units completed in. A slot is `None` when its unit panicked,
    /// was aborted, or never started because the pool was closed.
    pub async fn scatter<I, F, Fut>(&mut self, inputs: I, job: F) -> Vec<Option<T>>
    where
        I: IntoIterator,
        F: Fn(I::Item) -> Fut,
        Fut: Future<Output = T> + Send + 'static,
    {
        let mut slots = Vec::new();

        for (index, input) in inputs.into_iter().enumerate() {
            slots.push(None);
            let unit = job(input);
            let permits = Arc::clone(&self.permits);

            self.tasks.spawn(async move {
                // A closed semaphore means the pool is shutting down
                let _permit = permits.acquire_owned().await.ok()?;
                Some((index, unit.await))
            });
        }

        tracing::debug!(
            "Submitted {} work units to a pool of width {}",
            slots.len(),
            self.width
        );

        while let Some(joined) = self.tasks.join_next().await {
            match joined {
                Ok(Some((index, output))) => slots[index] = Some(output),
                Ok(None) => tracing::debug!("Work unit skipped: pool closed"),
                Err(e) => tracing::warn!("Work unit did not complete: {}", e),
            }
        }

        slots
    }

    /// Stops accepting work and waits up to `grace` for outstanding units
    ///
    /// Units still running after `grace` are aborted and their outputs
    /// discarded. Returns the number of aborted units.
    pub async fn shutdown(&mut self, grace: Duration) -> usize {
        self.permits.close();

        if self.tasks.is_empty() {
            return 0;
        }

        let tasks = &mut self.tasks;
        let drained = tokio::time::timeout(grace, async {
            while tasks.join_next().await.is_some() {}
        })
        .await
        .is_ok();

        if drained {
            tracing::debug!("Worker pool drained");
            return 0;
        }

        let remaining = self.tasks.len();
        tracing::warn!(
            "Worker pool did not drain within {:?}; cancelling {} work units",
            grace,
            remaining
        );
        self.abort();
        remaining
    }

    /// Cancels every outstanding unit immediately
    pub fn abort(&mut self) {
        self.permits.close();
        self.tasks.abort_all();
    }
}

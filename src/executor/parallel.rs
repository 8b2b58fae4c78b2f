//! Parallel suite coordination
//!
//! Dispatches test-run requests onto a bounded worker pool and collects
//! outcomes as they complete. One misbehaving suite never prevents the
//! others from completing or reporting.

use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::executor::SuiteExecutor;
use crate::models::{RunOutcome, TestRunRequest};

/// Bounded-parallelism dispatcher for suite run requests.
pub struct Coordinator {
    executor: Arc<SuiteExecutor>,
    shutdown: CancellationToken,
}

impl Coordinator {
    pub fn new(executor: SuiteExecutor, shutdown: CancellationToken) -> Self {
        Self {
            executor: Arc::new(executor),
            shutdown,
        }
    }

    /// Run every request on a pool of `min(max_workers, len)` workers and
    /// collect outcomes in completion order.
    ///
    /// Once shutdown is requested, no further request starts; requests that
    /// never started are absent from the result. In-flight suites observe
    /// the same token inside the executor and wind down on their own.
    pub async fn run_all(
        &self,
        requests: Vec<TestRunRequest>,
        max_workers: usize,
    ) -> Vec<RunOutcome> {
        if requests.is_empty() {
            return Vec::new();
        }

        let workers = max_workers.max(1).min(requests.len());
        info!("🚀 starting parallel suite execution with {workers} worker(s)...");
        let semaphore = Arc::new(Semaphore::new(workers));

        let mut tasks = FuturesUnordered::new();
        for request in requests {
            let semaphore = Arc::clone(&semaphore);
            let executor = Arc::clone(&self.executor);
            let shutdown = self.shutdown.clone();
            let handle = tokio::spawn({
                let request = request.clone();
                async move {
                    let Ok(_permit) = semaphore.acquire_owned().await else {
                        return None;
                    };
                    // A request that has not started when shutdown arrives
                    // produces no outcome at all.
                    if shutdown.is_cancelled() {
                        debug!("skipping {} - shutdown already requested", request.kind.name());
                        return None;
                    }
                    Some(executor.run(&request).await)
                }
            });
            tasks.push(async move { (request, handle.await) });
        }

        let mut outcomes = Vec::new();
        while let Some((request, joined)) = tasks.next().await {
            match joined {
                Ok(Some(outcome)) => {
                    if outcome.succeeded {
                        info!("✅ {} completed successfully", outcome.request.kind.name());
                    } else {
                        info!("❌ {} failed", outcome.request.kind.name());
                    }
                    outcomes.push(outcome);
                }
                Ok(None) => {}
                Err(e) => {
                    // A fault in the orchestration layer itself is folded
                    // into a failed outcome instead of aborting the batch.
                    error!("unexpected fault while running {}: {e}", request.kind.name());
                    outcomes.push(RunOutcome::failed(
                        request,
                        format!("unexpected orchestration fault: {e}"),
                    ));
                }
            }
        }

        outcomes
    }
}

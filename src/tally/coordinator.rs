// src/tally/coordinator.rs
// =============================================================================
// The coordinator drives one run from start to finish.
//
// Phases:
// 1. Submitting: parse every argument. Valid URLs go to the job queue,
//    invalid ones become Failure outcomes right away. The queue is then
//    closed.
// 2. PoolRunning: start the worker pool on the closed queue.
// 3. Draining: receive exactly one outcome per argument, in whatever order
//    the workers finish, and hand each one to the caller.
// 4. Done: wait for the workers to exit and return the report.
//
// Both channels are sized to the number of arguments, so no send ever
// blocks. The drain is bounded by the outcome count alone. Worker exit is
// awaited separately through the pool's JoinSet.
// =============================================================================

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::job::{Job, JobReceiver, JobSender};
use super::outcome::{Outcome, Report};
use super::pool::{WorkerPool, WorkerShared};
use crate::config::Config;
use crate::error::TallyError;
use crate::fetch::Fetcher;
use crate::matcher::WordMatcher;

pub struct Coordinator {
    config: Config,
    shared: Arc<WorkerShared>,
}

impl Coordinator {
    /// Validates the config and compiles the matcher.
    ///
    /// Fails with `TallyError::InvalidInput` before any work starts.
    pub fn new(config: Config, fetcher: Arc<dyn Fetcher>) -> Result<Self, TallyError> {
        config.validate()?;
        let matcher = WordMatcher::new(&config.word)?;

        let shared = Arc::new(WorkerShared {
            matcher,
            fetcher,
            timeout: config.timeout,
        });

        Ok(Self { config, shared })
    }

    /// Runs every target through the pool.
    ///
    /// `on_outcome` is called once per drained outcome, in drain order.
    pub async fn run<F>(&self, mut on_outcome: F) -> Result<Report, TallyError>
    where
        F: FnMut(&Outcome),
    {
        let expected = self.config.targets.len();
        let capacity = expected.max(1);

        let (job_tx, job_rx): (JobSender, JobReceiver) = async_channel::bounded(capacity);
        let (outcome_tx, mut outcome_rx) = mpsc::channel(capacity);

        // Submitting: valid URLs become jobs, everything else an immediate failure
        let mut queued = 0;
        for raw in &self.config.targets {
            match Job::parse(raw) {
                Ok(job) => {
                    job_tx.send(job).await.map_err(|_| TallyError::QueueClosed)?;
                    queued += 1;
                }
                Err(cause) => {
                    warn!(input = %raw, %cause, "argument rejected");
                    outcome_tx
                        .send(Outcome::failure(raw.as_str(), cause))
                        .await
                        .map_err(|_| TallyError::OutcomesLost {
                            drained: 0,
                            expected,
                        })?;
                }
            }
        }
        // Closed queue: workers exit once it is empty.
        drop(job_tx);
        debug!(queued, rejected = expected - queued, "submission finished");

        let pool = WorkerPool::spawn(
            self.config.workers,
            job_rx,
            outcome_tx,
            Arc::clone(&self.shared),
        );

        // The report collects every outcome and keeps the running sum
        let mut report = Report::default();

        // One outcome per argument, valid or not. This count alone decides
        // when draining stops; it never depends on how many jobs reached a worker.
        let mut remaining = expected;
        while remaining > 0 {
            // recv() waits for the next outcome from any worker (or from the
            // rejected arguments queued above), in whatever order they finish
            match outcome_rx.recv().await {
                Some(outcome) => {
                    debug!(source = outcome.source(), success = outcome.is_success(), "outcome drained");
                    // Let the caller print it before it moves into the report
                    on_outcome(&outcome);
                    report.record(outcome);
                    remaining -= 1;
                }
                None => {
                    // Every sender is gone (all workers died) but outcomes are
                    // still missing. Waiting longer would hang forever.
                    let stats = pool.join().await;
                    warn!(?stats, remaining, "all workers stopped before the drain finished");
                    return Err(TallyError::OutcomesLost {
                        drained: expected - remaining,
                        expected,
                    });
                }
            }
        }

        // All outcomes are in. The queue is closed, so every worker is on its
        // way out; wait for them through the pool's own JoinSet.
        let stats = pool.join().await;
        info!(
            successes = report.successes().count(),
            failures = report.failures().count(),
            sum = report.sum,
            workers = stats.workers,
            jobs_processed = stats.jobs_processed,
            panicked = stats.panicked,
            "run complete"
        );

        Ok(report)
    }
}

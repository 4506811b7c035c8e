// src/tally/pool.rs
// =============================================================================
// A fixed-size pool of workers that turn jobs into outcomes.
//
// Each worker loops:
// 1. Take one job from the shared queue (exit once it is closed and empty)
// 2. Fetch the URL and count the word, bounded by the timeout
// 3. Send exactly one Outcome to the coordinator
// 4. Go back to 1, also after a failed fetch
//
// Worker exit is tracked by the JoinSet, one entry per worker. This is
// independent of the coordinator's per-outcome drain count.
//
// Rust concepts:
// - tokio::task::JoinSet: owns the spawned tasks and collects their results
// - Arc: the matcher and fetcher are shared read-only by all workers
// =============================================================================

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, warn};
use url::Url;

use super::job::{Job, JobReceiver};
use super::outcome::Outcome;
use crate::error::{FetchError, TallyError};
use crate::fetch::Fetcher;
use crate::matcher::WordMatcher;

/// Read-only state shared by every worker.
pub struct WorkerShared {
    pub matcher: WordMatcher,
    pub fetcher: Arc<dyn Fetcher>,
    pub timeout: Duration,
}

/// Summary returned once every worker has exited.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PoolStats {
    pub workers: usize,
    pub jobs_processed: usize,
    pub panicked: usize,
}

pub struct WorkerPool {
    size: usize,
    workers: JoinSet<usize>,
}

impl WorkerPool {
    /// Starts `size` workers on the shared queue.
    ///
    /// The pool keeps one clone of `jobs` and `outcomes` per worker. The
    /// handles passed in are dropped on return, so the outcome channel closes
    /// once the last worker exits.
    pub fn spawn(
        size: usize,
        jobs: JobReceiver,
        outcomes: mpsc::Sender<Outcome>,
        shared: Arc<WorkerShared>,
    ) -> Self {
        let mut workers = JoinSet::new();
        for id in 0..size {
            let worker = Worker {
                id,
                jobs: jobs.clone(),
                outcomes: outcomes.clone(),
                shared: Arc::clone(&shared),
            };
            workers.spawn(worker.run());
        }
        debug!(workers = size, "worker pool started");

        Self { size, workers }
    }

    /// Waits until every worker has exited.
    ///
    /// Workers exit when the job queue is closed and empty, so the caller
    /// must have dropped its job sender first.
    pub async fn join(mut self) -> PoolStats {
        let mut stats = PoolStats {
            workers: self.size,
            ..PoolStats::default()
        };

        while let Some(result) = self.workers.join_next().await {
            match result {
                Ok(processed) => stats.jobs_processed += processed,
                Err(e) => {
                    warn!(error = %e, "worker task failed");
                    stats.panicked += 1;
                }
            }
        }

        debug!(?stats, "worker pool stopped");
        stats
    }
}

struct Worker {
    id: usize,
    jobs: JobReceiver,
    outcomes: mpsc::Sender<Outcome>,
    shared: Arc<WorkerShared>,
}

impl Worker {
    // Returns the number of jobs this worker handled.
    async fn run(self) -> usize {
        let mut processed = 0;

        // recv() returns Err only once the queue is closed AND empty,
        // which is this worker's signal to stop
        while let Ok(job) = self.jobs.recv().await {
            debug!(worker = self.id, url = %job.url, "job started");

            // process() never fails: errors come back as a Failure outcome,
            // so a bad URL cannot take the worker down with it
            let outcome = self.process(job).await;
            processed += 1;

            // Exactly one outcome per job goes back to the coordinator
            if self.outcomes.send(outcome).await.is_err() {
                warn!(worker = self.id, "outcome channel closed, worker stopping");
                break;
            }
        }

        debug!(worker = self.id, processed, "job queue drained, worker exiting");
        processed
    }

    async fn process(&self, job: Job) -> Outcome {
        let Job { source, url } = job;
        let timeout = self.shared.timeout;

        // tokio::time::timeout wraps the whole fetch-and-count. If the timer
        // fires first, the inner future (and the body it holds) is dropped.
        let result = match tokio::time::timeout(timeout, self.fetch_and_count(&url)).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout(timeout)),
        };

        match result {
            Ok(occurrences) => {
                debug!(worker = self.id, %url, occurrences, "job finished");
                Outcome::success(source, occurrences)
            }
            Err(error) => {
                warn!(worker = self.id, %url, %error, "fetch failed");
                let cause = TallyError::Fetch {
                    url: source.clone(),
                    source: error,
                };
                Outcome::failure(source, cause)
            }
        }
    }

    async fn fetch_and_count(&self, url: &Url) -> Result<usize, FetchError> {
        // The body is dropped, and the connection released, on every return path.
        let mut body = self.shared.fetcher.get(url).await?;

        // Feed the body through the scanner chunk by chunk; the whole page
        // is never held in memory
        let mut scanner = self.shared.matcher.scanner();
        while let Some(chunk) = body.chunk().await? {
            scanner.feed(&chunk);
        }
        Ok(scanner.finish())
    }
}

// src/tally/mod.rs
// =============================================================================
// The concurrency core: jobs in, outcomes out.
//
//   Coordinator -> job queue -> WorkerPool -> outcome channel -> Coordinator
//
// Submodules:
// - job: validated URL jobs and the job queue types
// - outcome: per-job outcomes and the accumulated report
// - pool: the fixed-size worker pool
// - coordinator: submission, drain and shutdown
// =============================================================================

mod coordinator;
mod job;
mod outcome;
mod pool;

#[cfg(test)]
mod testing;

pub use coordinator::Coordinator;
pub use outcome::{Outcome, Report};

// src/config.rs
// =============================================================================
// Run configuration, built once from the parsed command line.
//
// The Config value is handed to the Coordinator, which shares it with the
// worker pool. Nothing is kept in global variables.
// =============================================================================

use std::time::Duration;

use crate::cli::Cli;
use crate::error::TallyError;

pub const DEFAULT_WORKERS: usize = 4;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Validated settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Word to count, matched literally as a whole word.
    pub word: String,
    /// Size of the worker pool. Fixed for the whole run.
    pub workers: usize,
    /// Upper bound for fetching and scanning one URL.
    pub timeout: Duration,
    /// Raw URL arguments, in the order given.
    pub targets: Vec<String>,
}

impl Config {
    /// Creates a config with default worker count and timeout.
    pub fn new(word: impl Into<String>, targets: Vec<String>) -> Self {
        Self {
            word: word.into(),
            workers: DEFAULT_WORKERS,
            timeout: DEFAULT_TIMEOUT,
            targets,
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds and validates the config from command-line arguments.
    pub fn from_cli(cli: &Cli) -> Result<Self, TallyError> {
        let config = Config::new(cli.find.clone(), cli.urls.clone())
            .with_workers(cli.numpar)
            .with_timeout(Duration::from_secs(cli.timeout));
        config.validate()?;
        Ok(config)
    }

    /// Checks the settings that must hold before any work starts.
    pub fn validate(&self) -> Result<(), TallyError> {
        if self.word.is_empty() || self.targets.is_empty() {
            return Err(TallyError::InvalidInput(
                "please add a word to find (--find) and at least one URL".to_string(),
            ));
        }
        if self.workers == 0 {
            return Err(TallyError::InvalidInput(
                "the number of concurrent requests must be at least 1".to_string(),
            ));
        }
        if self.timeout.is_zero() {
            return Err(TallyError::InvalidInput(
                "the timeout must be at least 1 second".to_string(),
            ));
        }
        Ok(())
    }
}

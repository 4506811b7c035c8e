// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap (legacy -numpar/-find accepted)
// 2. Validate them into a Config; bad input exits before any work starts
// 3. Run the coordinator, printing each outcome as it is drained
// 4. Print the sum (or the whole report as JSON) and exit
//
// Exit codes: 0 = run completed (even if some URLs failed), 2 = bad input
// or an internal error.
// =============================================================================

mod cli;      // src/cli.rs - command-line parsing
mod config;   // src/config.rs - validated run settings
mod error;    // src/error.rs - error types
mod fetch;    // src/fetch/ - HTTP fetching behind a trait
mod logging;  // src/logging.rs - tracing setup
mod matcher;  // src/matcher/ - whole-word counting
mod tally;    // src/tally/ - worker pool and coordinator

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use cli::Cli;
use config::Config;
use fetch::HttpFetcher;
use tally::{Coordinator, Outcome, Report};

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse_from(cli::normalize_args(std::env::args_os()));
    logging::init(cli.verbose);

    // Fast-fail path: nothing has been started yet.
    let config = match Config::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return Ok(2);
        }
    };

    let fetcher = HttpFetcher::new(config.timeout).context("failed to set up the HTTP client")?;
    let coordinator = Coordinator::new(config, Arc::new(fetcher))?;

    // Failures always reach stderr; in --json mode successes only appear
    // in the final report on stdout
    let json = cli.json;
    let report = coordinator
        .run(|outcome| print_outcome(outcome, json))
        .await?;

    print_report(&report, json)?;
    Ok(0)
}

#[derive(Debug, PartialEq, Eq)]
enum Stream {
    Stdout,
    Stderr,
}

// Successes go to stdout as "<url>\t\t<count>", failures to stderr.
// With --json the successes are left to the final report.
fn stream_for(outcome: &Outcome, json: bool) -> Option<Stream> {
    match outcome {
        Outcome::Success { .. } if json => None,
        Outcome::Success { .. } => Some(Stream::Stdout),
        Outcome::Failure { .. } => Some(Stream::Stderr),
    }
}

fn print_outcome(outcome: &Outcome, json: bool) {
    match stream_for(outcome, json) {
        Some(Stream::Stdout) => println!("{}", outcome),
        Some(Stream::Stderr) => eprintln!("{}", outcome),
        None => {}
    }
}

fn print_report(report: &Report, json: bool) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(report)?;
        println!("{}", json_output);
    } else {
        println!("{}", report.sum_line());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TallyError;

    fn failure() -> Outcome {
        Outcome::failure(
            "example.com",
            TallyError::MissingScheme {
                input: "example.com".to_string(),
            },
        )
    }

    #[test]
    fn test_plain_mode_streams() {
        let success = Outcome::success("https://a.example", 2);
        assert_eq!(stream_for(&success, false), Some(Stream::Stdout));
        assert_eq!(stream_for(&failure(), false), Some(Stream::Stderr));
    }

    #[test]
    fn test_json_mode_still_reports_failures_on_stderr() {
        let success = Outcome::success("https://a.example", 2);
        assert_eq!(stream_for(&success, true), None);
        assert_eq!(stream_for(&failure(), true), Some(Stream::Stderr));
    }
}

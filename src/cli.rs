// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Interface:
//   word-tally --numpar 8 --find rust https://www.rust-lang.org https://...
//
// The historical single-dash spellings (-numpar 8 -find rust) are still
// accepted: normalize_args rewrites them before clap sees them.
//
// Rust concepts:
// - Derive macros: #[derive(Parser)] generates the parsing code
// - Iterators: normalize_args maps over the raw OsString arguments
// =============================================================================

use clap::{ArgAction, Parser};
use std::ffi::OsString;

// Flags that used to be written with a single dash.
const LEGACY_FLAGS: [&str; 2] = ["numpar", "find"];

#[derive(Parser, Debug)]
#[command(
    name = "word-tally",
    version = "0.1.0",
    about = "Fetch URLs concurrently and count whole-word occurrences of a word",
    long_about = "word-tally downloads every URL with a fixed pool of workers, counts how \
                  often the word appears as a whole word in each response, and prints the \
                  per-URL counts followed by the sum."
)]
pub struct Cli {
    /// Number of concurrent requests (worker count)
    #[arg(short = 'n', long = "numpar", default_value_t = 4)]
    pub numpar: usize,

    /// Word to find (matched as a whole word, literally)
    #[arg(short = 'f', long = "find", default_value = "")]
    pub find: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,

    /// Output the final report as JSON instead of tab-separated lines
    #[arg(long)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Absolute URLs to fetch (scheme required, e.g. https://example.com)
    pub urls: Vec<String>,
}

/// Rewrites `-numpar`/`-find` (and their `=value` forms) to the double-dash
/// spelling. Everything after a bare `--` is left untouched.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut positional_only = false;

    args.into_iter()
        .map(|arg| {
            if positional_only {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            if text == "--" {
                positional_only = true;
                return arg;
            }

            let legacy = text
                .strip_prefix('-')
                .filter(|rest| !rest.starts_with('-'))
                .filter(|rest| {
                    let name = rest.split('=').next().unwrap_or_default();
                    LEGACY_FLAGS.contains(&name)
                });

            match legacy {
                Some(rest) => OsString::from(format!("--{}", rest)),
                None => arg,
            }
        })
        .collect()
}

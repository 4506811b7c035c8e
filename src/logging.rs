// src/logging.rs
// =============================================================================
// Diagnostic logging with tracing.
//
// Logs always go to stderr; stdout carries only results.
//
// Level selection:
// - RUST_LOG, when set, wins (e.g. RUST_LOG=word_tally=debug)
// - otherwise -v / -vv on the command line
// - otherwise only errors, since failed URLs are already printed as results
// =============================================================================

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Maps the number of -v flags to a log level.
pub fn level_for(verbose: u8) -> Level {
    match verbose {
        0 => Level::ERROR,
        1 => Level::INFO,
        _ => Level::DEBUG,
    }
}

/// Installs the global subscriber. Calling it twice is harmless.
pub fn init(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = level_for(verbose).to_string().to_lowercase();
        EnvFilter::new(format!("word_tally={}", level))
    });

    let layer = fmt::layer()
        .compact()
        .with_target(false)
        .with_writer(std::io::stderr);

    // Already initialised (e.g. in tests) is fine.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init();
}

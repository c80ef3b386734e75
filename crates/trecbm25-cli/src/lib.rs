//! Shared plumbing for the search engine's command-line binaries.

pub mod ui;
pub mod validate;

use tracing_subscriber::EnvFilter;

/// Initializes the process-wide tracing subscriber.
///
/// Mirrors the teacher's CLI: `-v/--verbose` drops the filter to `debug`,
/// otherwise `warn`; both crates are filtered at the same level.
pub fn init_tracing(verbose: bool) {
    let log_level = if verbose { "debug" } else { "warn" };
    let filter = format!("trecbm25_core={log_level},trecbm25_cli={log_level}");
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();
}

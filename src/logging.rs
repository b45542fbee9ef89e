//! Tracing subscriber setup
//!
//! Diagnostics go to stderr so stdout stays clean for NDJSON and rendered
//! output. `RUST_LOG` wins when set. Otherwise the configured verbosity sets
//! the level, and `-v` flags can only raise it.

use is_terminal::IsTerminal;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Verbosity;

/// Map CLI `-v` count and configured verbosity to a level
pub fn level_for(verbose: u8, configured: Verbosity) -> LevelFilter {
    let from_config = match configured {
        Verbosity::Quiet => LevelFilter::ERROR,
        Verbosity::Normal => LevelFilter::WARN,
        Verbosity::Verbose => LevelFilter::INFO,
        Verbosity::Debug => LevelFilter::DEBUG,
    };
    let from_flags = match verbose {
        0 => return from_config,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    // LevelFilter orders OFF < ERROR < ... < TRACE
    from_flags.max(from_config)
}

/// Install the global subscriber. Returns false if one was already set.
pub fn init(level: LevelFilter) -> bool {
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time();

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(filter)
        .try_init()
        .is_ok()
}

// src/logging.rs

//! Diagnostics for `taskplan` via `tracing`.
//!
//! Command results (listings, orders, start times) are the only thing on
//! stdout, so they can be piped or diffed. Everything else, such as record
//! loads, repository mutations, elimination steps and cycle warnings, goes
//! to stderr. Quiet by default: only warnings (a detected cycle) show up
//! unless a level is chosen with `--log-level` or `TASKPLAN_LOG`.

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::fmt;

use crate::cli::LogLevel;

/// Environment variable consulted when `--log-level` is absent.
pub const LOG_ENV: &str = "TASKPLAN_LOG";

/// Install the stderr subscriber. Call once, before the command runs.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env_level = std::env::var(LOG_ENV).ok();
    let level = resolve_level(cli_level, env_level.as_deref());

    fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

/// Flag beats environment beats `WARN`. An unreadable environment value is
/// ignored rather than treated as an error.
fn resolve_level(cli_level: Option<LogLevel>, env_level: Option<&str>) -> Level {
    if let Some(lvl) = cli_level {
        return match lvl {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        };
    }

    match env_level.map(|s| s.trim().to_lowercase()).as_deref() {
        Some("warning") => Level::WARN,
        Some(s) => s.parse().unwrap_or(Level::WARN),
        None => Level::WARN,
    }
}

// src/lib.rs

pub mod cli;
pub mod commands;
pub mod config;
pub mod dag;
pub mod errors;
pub mod fs;
pub mod logging;
pub mod persist;
pub mod tasks;
pub mod types;

use std::io;

use anyhow::Result;
use tracing::debug;

use crate::cli::CliArgs;
use crate::commands::{Settings, execute};
use crate::fs::RealFileSystem;

/// High-level entry point used by `main.rs`.
///
/// Resolves settings from the config file and flags, then runs the requested
/// command against the real filesystem with results on stdout.
pub fn run(args: CliArgs) -> Result<()> {
    let settings = Settings::from_args(&args)?;
    debug!(command = ?args.command, "running command");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(&args.command, &settings, &RealFileSystem, &mut out)?;
    Ok(())
}

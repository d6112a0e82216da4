// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, Subcommand, ValueEnum};

use crate::types::TieBreak;

/// Command-line arguments for `taskplan`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "taskplan",
    version,
    about = "Manage project tasks and compute their execution order and earliest start times.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Taskplan.toml` in the current working directory. A missing
    /// default config is not an error; built-in defaults are used.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Task record file to operate on (overrides `[files].tasks`).
    #[arg(long, value_name = "PATH")]
    pub tasks: Option<String>,

    /// Tie-break rule among simultaneously ready tasks: `insertion` or
    /// `lexical` (overrides `[schedule].tie_break`).
    #[arg(long, value_name = "RULE")]
    pub tie_break: Option<TieBreak>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `TASKPLAN_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

/// One action per invocation; mutating actions write the record file back.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Add a new task.
    Add {
        /// Unique task id.
        id: String,
        /// Execution time (integer >= 0).
        #[arg(allow_hyphen_values = true)]
        duration: String,
        /// Prerequisite task ids, comma separated. They may be added later.
        #[arg(long, value_delimiter = ',', value_name = "IDS")]
        after: Vec<String>,
    },
    /// Remove a task and every reference to it.
    Remove {
        id: String,
    },
    /// Change the execution time of a task.
    Edit {
        id: String,
        #[arg(allow_hyphen_values = true)]
        duration: String,
    },
    /// Replace the prerequisites of a task.
    Depends {
        id: String,
        #[arg(long, value_delimiter = ',', value_name = "IDS")]
        after: Vec<String>,
    },
    /// Print every task in record form.
    List,
    /// Drop dangling prerequisites and rewrite the record file.
    Save,
    /// Print an execution order that respects all prerequisites.
    Sequence,
    /// Print the earliest start time of every task.
    Earliest,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

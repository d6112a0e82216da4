// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

use crate::dag::CycleDetected;
use crate::types::TaskId;

#[derive(Error, Debug)]
pub enum TaskplanError {
    #[error("Task already exists: {0}")]
    DuplicateId(TaskId),

    #[error("Task not found: {0}")]
    TaskNotFound(TaskId),

    #[error("Invalid task id: {0:?} (ids must be non-blank, trimmed and free of commas and line breaks)")]
    InvalidTaskId(String),

    #[error("Invalid duration: {0:?} (expected an integer >= 0)")]
    InvalidDuration(String),

    #[error(transparent)]
    Cycle(#[from] CycleDetected),

    #[error("Task record error on line {line}: {message}")]
    RecordParse { line: usize, message: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, TaskplanError>;

// src/config/model.rs

use serde::Deserialize;

use crate::types::TieBreak;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [files]
/// tasks = "tasks.txt"
/// sequence = "Sequence.txt"
/// earliest_times = "EarliestTimes.txt"
///
/// [schedule]
/// tie_break = "insertion"
/// write_reports = true
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    /// File locations from `[files]`.
    #[serde(default)]
    pub files: FilesSection,

    /// Scheduling behaviour from `[schedule]`.
    #[serde(default)]
    pub schedule: ScheduleSection,
}

/// Validated configuration.
///
/// Only constructible through `TryFrom<RawConfigFile>` (see `validate.rs`)
/// or [`ConfigFile::default`].
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    pub files: FilesSection,
    pub schedule: ScheduleSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(files: FilesSection, schedule: ScheduleSection) -> Self {
        Self { files, schedule }
    }
}

/// `[files]` section. Relative paths resolve against the config file's
/// directory.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilesSection {
    /// Task record file (`id, duration, prereq, ...` per line).
    #[serde(default = "default_tasks_file")]
    pub tasks: String,

    /// Where `sequence` writes the order report.
    #[serde(default = "default_sequence_file")]
    pub sequence: String,

    /// Where `earliest` writes the earliest-times report.
    #[serde(default = "default_earliest_times_file")]
    pub earliest_times: String,
}

fn default_tasks_file() -> String {
    "tasks.txt".to_string()
}

fn default_sequence_file() -> String {
    "Sequence.txt".to_string()
}

fn default_earliest_times_file() -> String {
    "EarliestTimes.txt".to_string()
}

impl Default for FilesSection {
    fn default() -> Self {
        Self {
            tasks: default_tasks_file(),
            sequence: default_sequence_file(),
            earliest_times: default_earliest_times_file(),
        }
    }
}

/// `[schedule]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScheduleSection {
    /// `"insertion"` (default) or `"lexical"`.
    #[serde(default)]
    pub tie_break: TieBreak,

    /// Whether `sequence` / `earliest` also write their report files.
    #[serde(default = "default_write_reports")]
    pub write_reports: bool,
}

fn default_write_reports() -> bool {
    true
}

impl Default for ScheduleSection {
    fn default() -> Self {
        Self {
            tie_break: TieBreak::default(),
            write_reports: default_write_reports(),
        }
    }
}

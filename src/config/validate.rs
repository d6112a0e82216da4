// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, TaskplanError};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::TaskplanError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.files, raw.schedule))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_file_names(cfg)?;
    validate_distinct_files(cfg)?;
    Ok(())
}

fn validate_file_names(cfg: &RawConfigFile) -> Result<()> {
    let files = &cfg.files;
    for (key, value) in [
        ("tasks", &files.tasks),
        ("sequence", &files.sequence),
        ("earliest_times", &files.earliest_times),
    ] {
        if value.trim().is_empty() {
            return Err(TaskplanError::ConfigError(format!(
                "[files].{key} must not be empty"
            )));
        }
    }
    Ok(())
}

fn validate_distinct_files(cfg: &RawConfigFile) -> Result<()> {
    let files = &cfg.files;
    let pairs = [
        ("tasks", &files.tasks, "sequence", &files.sequence),
        ("tasks", &files.tasks, "earliest_times", &files.earliest_times),
        ("sequence", &files.sequence, "earliest_times", &files.earliest_times),
    ];
    for (a, a_path, b, b_path) in pairs {
        if a_path.trim() == b_path.trim() {
            return Err(TaskplanError::ConfigError(format!(
                "[files].{a} and [files].{b} point at the same file '{}'",
                a_path.trim()
            )));
        }
    }
    Ok(())
}

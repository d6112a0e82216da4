// src/persist/records.rs

//! Task record file: one task per line, `id, duration[, prereq, ...]`.
//!
//! Reading stops at the first blank line. [`save_repository`] sanitizes the
//! repository first; [`write_repository`] keeps forward references so they
//! survive between invocations.

use std::path::Path;

use tracing::{debug, info};

use crate::errors::{Result, TaskplanError};
use crate::fs::FileSystem;
use crate::tasks::{Task, TaskRepository, parse_duration};

/// Parse record text into a repository, preserving line order.
pub fn parse_records(text: &str) -> Result<TaskRepository> {
    let mut repo = TaskRepository::new();

    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;
        if line.trim().is_empty() {
            debug!(line = line_no, "blank line; stopping record parse");
            break;
        }

        let mut fields = line.split(',').map(str::trim);
        let id = fields.next().unwrap_or_default();
        if id.is_empty() {
            return Err(TaskplanError::RecordParse {
                line: line_no,
                message: "missing task id".to_string(),
            });
        }

        let duration = match fields.next() {
            Some(raw) => parse_duration(raw).map_err(|err| TaskplanError::RecordParse {
                line: line_no,
                message: err.to_string(),
            })?,
            None => {
                return Err(TaskplanError::RecordParse {
                    line: line_no,
                    message: format!("task '{id}' has no duration"),
                });
            }
        };

        let prerequisites: Vec<&str> = fields.filter(|p| !p.is_empty()).collect();
        repo.add(id, duration, prerequisites)
            .map_err(|err| TaskplanError::RecordParse {
                line: line_no,
                message: err.to_string(),
            })?;
    }

    Ok(repo)
}

/// Render one task in record form.
pub fn format_record(task: &Task) -> String {
    let mut line = format!("{}, {}", task.id(), task.duration());
    for prerequisite in task.prerequisites() {
        line.push_str(", ");
        line.push_str(prerequisite);
    }
    line
}

/// Render every task, one line each, in repository order.
pub fn format_records(repo: &TaskRepository) -> String {
    let mut out = String::new();
    for task in repo {
        out.push_str(&format_record(task));
        out.push('\n');
    }
    out
}

/// Read a record file.
pub fn load_repository(fs: &dyn FileSystem, path: &Path) -> Result<TaskRepository> {
    let text = fs.read_to_string(path)?;
    let repo = parse_records(&text)?;
    info!(path = %path.display(), tasks = repo.len(), "loaded task records");
    Ok(repo)
}

/// Write `repo` to `path` as is, forward references included.
pub fn write_repository(fs: &dyn FileSystem, path: &Path, repo: &TaskRepository) -> Result<()> {
    fs.write(path, format_records(repo).as_bytes())?;
    debug!(path = %path.display(), tasks = repo.len(), "wrote task records");
    Ok(())
}

/// Sanitize `repo` and write it to `path`.
pub fn save_repository(fs: &dyn FileSystem, path: &Path, repo: &mut TaskRepository) -> Result<()> {
    let dropped = repo.sanitize();
    write_repository(fs, path, repo)?;
    info!(
        path = %path.display(),
        tasks = repo.len(),
        dropped_prerequisites = dropped,
        "saved task records"
    );
    Ok(())
}

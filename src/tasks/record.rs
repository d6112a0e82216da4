// src/tasks/record.rs

//! A single task: identity, execution time and prerequisite names.

use crate::errors::{Result, TaskplanError};
use crate::types::TaskId;

/// A task as held by the [`TaskRepository`](super::TaskRepository).
///
/// The id is fixed at construction. Duration and prerequisites can only be
/// changed through the repository, which keeps cross-task references
/// consistent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    duration: u64,
    /// Ordered set: insertion order is kept for display, duplicates are
    /// collapsed. Entries may name tasks that do not exist (yet).
    prerequisites: Vec<TaskId>,
}

impl Task {
    pub fn new<I, S>(id: impl Into<TaskId>, duration: u64, prerequisites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<TaskId>,
    {
        Self {
            id: id.into(),
            duration,
            prerequisites: normalize_prerequisites(prerequisites),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn duration(&self) -> u64 {
        self.duration
    }

    pub fn prerequisites(&self) -> &[TaskId] {
        &self.prerequisites
    }

    /// Whether `id` is listed as a direct prerequisite of this task.
    pub fn depends_on(&self, id: &str) -> bool {
        self.prerequisites.iter().any(|p| p == id)
    }

    pub(crate) fn set_duration(&mut self, duration: u64) {
        self.duration = duration;
    }

    pub(crate) fn set_prerequisites<I, S>(&mut self, prerequisites: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<TaskId>,
    {
        self.prerequisites = normalize_prerequisites(prerequisites);
    }

    /// Drop every prerequisite for which `keep` returns false.
    ///
    /// Returns the number of entries removed.
    pub(crate) fn retain_prerequisites(&mut self, mut keep: impl FnMut(&str) -> bool) -> usize {
        let before = self.prerequisites.len();
        self.prerequisites.retain(|p| keep(p));
        before - self.prerequisites.len()
    }
}

fn normalize_prerequisites<I, S>(prerequisites: I) -> Vec<TaskId>
where
    I: IntoIterator<Item = S>,
    S: Into<TaskId>,
{
    let mut out: Vec<TaskId> = Vec::new();
    for p in prerequisites {
        let p = p.into();
        if p.trim().is_empty() || out.contains(&p) {
            continue;
        }
        out.push(p);
    }
    out
}

/// Check that `id` survives a round trip through the record file.
///
/// The record format splits on commas and lines and trims every field, so an
/// id must be non-blank, already trimmed, and free of `,`, `\n` and `\r`.
pub fn validate_task_id(id: &str) -> Result<()> {
    let representable = !id.trim().is_empty()
        && id.trim() == id
        && !id.contains([',', '\n', '\r']);
    if representable {
        Ok(())
    } else {
        Err(TaskplanError::InvalidTaskId(id.to_string()))
    }
}

/// Parse a user- or file-supplied execution time.
///
/// Accepts surrounding whitespace; rejects negatives and anything that is
/// not a base-10 integer.
pub fn parse_duration(input: &str) -> Result<u64> {
    input
        .trim()
        .parse::<u64>()
        .map_err(|_| TaskplanError::InvalidDuration(input.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prerequisites_keep_order_and_collapse_duplicates() {
        let task = Task::new("T4", 2, ["T2", "T1", "T2", "", "  ", "T3"]);
        assert_eq!(task.prerequisites(), ["T2", "T1", "T3"]);
        assert!(task.depends_on("T1"));
        assert!(!task.depends_on("T4"));
    }

    #[test]
    fn self_reference_is_kept_as_given() {
        // Cycle detection reports it; the record itself does not hide it.
        let task = Task::new("A", 1, ["A"]);
        assert!(task.depends_on("A"));
    }

    #[test]
    fn retain_reports_removed_count() {
        let mut task = Task::new("T", 0, ["A", "B", "C"]);
        let removed = task.retain_prerequisites(|p| p != "B");
        assert_eq!(removed, 1);
        assert_eq!(task.prerequisites(), ["A", "C"]);
    }

    #[test]
    fn task_ids_must_fit_the_record_format() {
        for good in ["A", "T1", "build docs", "ü-step"] {
            assert!(validate_task_id(good).is_ok(), "{good:?} should be accepted");
        }
        for bad in ["", "   ", "A,B", "A\nB", "A\r", " A", "A "] {
            match validate_task_id(bad) {
                Err(TaskplanError::InvalidTaskId(id)) => assert_eq!(id, bad),
                other => panic!("expected InvalidTaskId for {bad:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn parse_duration_accepts_non_negative_integers() {
        assert_eq!(parse_duration("0").unwrap(), 0);
        assert_eq!(parse_duration(" 42 ").unwrap(), 42);
    }

    #[test]
    fn parse_duration_rejects_negative_and_garbage() {
        for bad in ["-1", "", "3.5", "ten"] {
            match parse_duration(bad) {
                Err(TaskplanError::InvalidDuration(_)) => {}
                other => panic!("expected InvalidDuration for {bad:?}, got {other:?}"),
            }
        }
    }
}

// src/persist/reports.rs

//! Report files written by `sequence` and `earliest`.

use std::path::Path;

use tracing::info;

use crate::dag::EarliestTimes;
use crate::errors::Result;
use crate::fs::FileSystem;
use crate::types::TaskId;

/// `A, B, C` on a single line.
pub fn format_sequence(order: &[TaskId]) -> String {
    format!("{}\n", order.join(", "))
}

/// One `id, start` line per task.
pub fn format_earliest_times(times: &EarliestTimes) -> String {
    times
        .iter()
        .map(|(id, start)| format!("{id}, {start}\n"))
        .collect()
}

pub fn write_sequence_report(fs: &dyn FileSystem, path: &Path, order: &[TaskId]) -> Result<()> {
    fs.write(path, format_sequence(order).as_bytes())?;
    info!(path = %path.display(), tasks = order.len(), "wrote sequence report");
    Ok(())
}

pub fn write_earliest_times_report(
    fs: &dyn FileSystem,
    path: &Path,
    times: &EarliestTimes,
) -> Result<()> {
    fs.write(path, format_earliest_times(times).as_bytes())?;
    info!(path = %path.display(), tasks = times.len(), "wrote earliest times report");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dag::compute_earliest_times;
    use crate::fs::mock::MockFileSystem;
    use crate::tasks::TaskRepository;
    use crate::types::TieBreak;

    #[test]
    fn sequence_is_comma_joined() {
        let order = vec!["T1".to_string(), "T2".to_string(), "T3".to_string()];
        assert_eq!(format_sequence(&order), "T1, T2, T3\n");
        assert_eq!(format_sequence(&[]), "\n");
    }

    #[test]
    fn earliest_times_report_lists_every_task() {
        let mut repo = TaskRepository::new();
        repo.add("A", 3, Vec::<TaskId>::new()).unwrap();
        repo.add("B", 2, ["A"]).unwrap();
        let times = compute_earliest_times(&mut repo, TieBreak::Insertion).unwrap();

        let fs = MockFileSystem::new();
        let path = Path::new("out/EarliestTimes.txt");
        write_earliest_times_report(&fs, path, &times).unwrap();

        assert_eq!(fs.contents(path).unwrap(), "A, 0\nB, 3\n");
    }
}

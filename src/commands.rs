// src/commands.rs

//! One function per CLI action. Each loads the record file, applies the
//! action and writes the file back when the repository changed.
//!
//! Mutations are written verbatim so prerequisites on tasks that are added
//! later survive; only `save` drops dangling references.

use std::io::Write;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, info};

use crate::cli::{CliArgs, Command};
use crate::config::{ConfigFile, config_root_dir, load_or_default};
use crate::dag::{compute_earliest_times, compute_order};
use crate::errors::{Result, TaskplanError};
use crate::fs::FileSystem;
use crate::persist::{
    format_record, load_repository, save_repository, write_earliest_times_report,
    write_repository, write_sequence_report,
};
use crate::tasks::{TaskRepository, parse_duration};
use crate::types::{TaskId, TieBreak};

/// Effective settings for one invocation: config file plus CLI overrides.
#[derive(Debug, Clone)]
pub struct Settings {
    pub tasks_path: PathBuf,
    pub sequence_path: PathBuf,
    pub earliest_times_path: PathBuf,
    pub tie_break: TieBreak,
    pub write_reports: bool,
}

impl Settings {
    /// Load the config named by `args` (or the default) and apply overrides.
    pub fn from_args(args: &CliArgs) -> Result<Self> {
        let explicit = args.config.as_deref().map(Path::new);
        let cfg = load_or_default(explicit)?;
        let root = explicit.map(config_root_dir).unwrap_or_default();

        let mut settings = Self::from_config(&cfg, &root);
        if let Some(tasks) = &args.tasks {
            settings.tasks_path = PathBuf::from(tasks);
        }
        if let Some(rule) = args.tie_break {
            settings.tie_break = rule;
        }
        settings.check_distinct_paths()?;
        debug!(?settings, "resolved settings");
        Ok(settings)
    }

    /// Reject settings where a report would overwrite another file.
    ///
    /// The config file is checked on load, but `--tasks` can still point at
    /// a report path.
    pub fn check_distinct_paths(&self) -> Result<()> {
        let files = [
            ("tasks", &self.tasks_path),
            ("sequence", &self.sequence_path),
            ("earliest_times", &self.earliest_times_path),
        ];
        for (i, (a, a_path)) in files.iter().enumerate() {
            for (b, b_path) in &files[i + 1..] {
                if normalized(a_path) == normalized(b_path) {
                    return Err(TaskplanError::ConfigError(format!(
                        "{a} and {b} files are both '{}'",
                        a_path.display()
                    )));
                }
            }
        }
        Ok(())
    }

    /// Resolve file names in `cfg` against `root`.
    pub fn from_config(cfg: &ConfigFile, root: &Path) -> Self {
        Self {
            tasks_path: resolve(root, &cfg.files.tasks),
            sequence_path: resolve(root, &cfg.files.sequence),
            earliest_times_path: resolve(root, &cfg.files.earliest_times),
            tie_break: cfg.schedule.tie_break,
            write_reports: cfg.schedule.write_reports,
        }
    }
}

fn resolve(root: &Path, file: &str) -> PathBuf {
    let path = Path::new(file.trim());
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

fn normalized(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Run `command`, writing user-facing output to `out`.
pub fn execute(
    command: &Command,
    settings: &Settings,
    fs: &dyn FileSystem,
    out: &mut dyn Write,
) -> Result<()> {
    let mut repo = open_repository(fs, &settings.tasks_path)?;

    match command {
        Command::Add { id, duration, after } => {
            let duration = parse_duration(duration)?;
            repo.add(id.trim(), duration, trimmed(after))?;
            write_repository(fs, &settings.tasks_path, &repo)?;
            writeln!(out, "{} has been added", id.trim())?;
        }
        Command::Remove { id } => {
            let removed = repo.remove(id.trim())?;
            write_repository(fs, &settings.tasks_path, &repo)?;
            writeln!(out, "{} has been removed", removed.id())?;
        }
        Command::Edit { id, duration } => {
            let duration = parse_duration(duration)?;
            repo.edit_duration(id.trim(), duration)?;
            write_repository(fs, &settings.tasks_path, &repo)?;
            writeln!(out, "execution time of {} set to {duration}", id.trim())?;
        }
        Command::Depends { id, after } => {
            repo.edit_prerequisites(id.trim(), trimmed(after))?;
            write_repository(fs, &settings.tasks_path, &repo)?;
            writeln!(out, "prerequisites of {} updated", id.trim())?;
        }
        Command::List => {
            for task in &repo {
                writeln!(out, "{}", format_record(task))?;
            }
        }
        Command::Save => {
            save_repository(fs, &settings.tasks_path, &mut repo)?;
            writeln!(
                out,
                "saved {} tasks to {}",
                repo.len(),
                settings.tasks_path.display()
            )?;
        }
        Command::Sequence => {
            let order = compute_order(&mut repo, settings.tie_break)?;
            writeln!(out, "{}", order.join(", "))?;
            if settings.write_reports {
                write_sequence_report(fs, &settings.sequence_path, &order)?;
            }
        }
        Command::Earliest => {
            let times = compute_earliest_times(&mut repo, settings.tie_break)?;
            for (id, start) in times.iter() {
                writeln!(out, "{id}, {start}")?;
            }
            writeln!(out, "project length: {}", times.project_length())?;
            if settings.write_reports {
                write_earliest_times_report(fs, &settings.earliest_times_path, &times)?;
            }
        }
    }

    Ok(())
}

/// Load the record file, or start empty if it does not exist yet.
fn open_repository(fs: &dyn FileSystem, path: &Path) -> Result<TaskRepository> {
    if fs.exists(path) {
        load_repository(fs, path)
    } else {
        info!(path = %path.display(), "task record file not found; starting empty");
        Ok(TaskRepository::new())
    }
}

fn trimmed(ids: &[String]) -> Vec<TaskId> {
    ids.iter().map(|s| s.trim().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFileSystem;

    fn settings() -> Settings {
        Settings::from_config(&ConfigFile::default(), Path::new("project"))
    }

    fn run(fs: &MockFileSystem, command: Command) -> Result<String> {
        let mut out = Vec::new();
        execute(&command, &settings(), fs, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn paths_resolve_against_config_root() {
        let s = settings();
        assert_eq!(s.tasks_path, PathBuf::from("project/tasks.txt"));
        assert_eq!(s.sequence_path, PathBuf::from("project/Sequence.txt"));
        assert_eq!(s.tie_break, TieBreak::Insertion);
    }

    #[test]
    fn dot_prefixed_paths_still_clash() {
        let mut s = settings();
        s.tasks_path = PathBuf::from("./project/Sequence.txt");

        match s.check_distinct_paths() {
            Err(TaskplanError::ConfigError(msg)) => {
                assert!(msg.contains("tasks"));
                assert!(msg.contains("sequence"));
            }
            other => panic!("expected ConfigError, got {other:?}"),
        }
        assert!(settings().check_distinct_paths().is_ok());
    }

    #[test]
    fn add_creates_record_file() {
        let fs = MockFileSystem::new();
        let out = run(
            &fs,
            Command::Add {
                id: "B".into(),
                duration: "2".into(),
                after: vec![" A".into()],
            },
        )
        .unwrap();

        assert_eq!(out, "B has been added\n");
        assert_eq!(fs.contents("project/tasks.txt").unwrap(), "B, 2, A\n");
    }

    #[test]
    fn sequence_prints_and_writes_report() {
        let fs = MockFileSystem::new();
        fs.add_file("project/tasks.txt", "B, 2, A\nA, 3\n");

        let out = run(&fs, Command::Sequence).unwrap();

        assert_eq!(out, "A, B\n");
        assert_eq!(fs.contents("project/Sequence.txt").unwrap(), "A, B\n");
    }

    #[test]
    fn earliest_prints_times_and_project_length() {
        let fs = MockFileSystem::new();
        fs.add_file("project/tasks.txt", "A, 5\nB, 1, A\nC, 1, A\n");

        let out = run(&fs, Command::Earliest).unwrap();

        assert_eq!(out, "A, 0\nB, 5\nC, 5\nproject length: 6\n");
        assert_eq!(
            fs.contents("project/EarliestTimes.txt").unwrap(),
            "A, 0\nB, 5\nC, 5\n"
        );
    }

    #[test]
    fn cycle_is_reported_and_nothing_written() {
        let fs = MockFileSystem::new();
        fs.add_file("project/tasks.txt", "A, 1, B\nB, 1, A\n");

        assert!(matches!(
            run(&fs, Command::Sequence),
            Err(TaskplanError::Cycle(_))
        ));
        assert!(fs.contents("project/Sequence.txt").is_none());
    }

    #[test]
    fn save_command_sanitizes_record_file() {
        let fs = MockFileSystem::new();
        fs.add_file("project/tasks.txt", "B, 2, A\n");

        let out = run(&fs, Command::Save).unwrap();

        assert_eq!(out, "saved 1 tasks to project/tasks.txt\n");
        assert_eq!(fs.contents("project/tasks.txt").unwrap(), "B, 2\n");
    }

    #[test]
    fn remove_unknown_task_is_not_found() {
        let fs = MockFileSystem::new();
        fs.add_file("project/tasks.txt", "A, 1\n");

        assert!(matches!(
            run(&fs, Command::Remove { id: "Z".into() }),
            Err(TaskplanError::TaskNotFound(_))
        ));
        assert_eq!(fs.contents("project/tasks.txt").unwrap(), "A, 1\n");
    }
}

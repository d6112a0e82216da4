#![allow(dead_code)]

use taskplan::config::{ConfigFile, RawConfigFile};
use taskplan::dag::DependencyGraph;
use taskplan::tasks::TaskRepository;
use taskplan::types::{TaskId, TieBreak};

/// Builder for `TaskRepository` to simplify test setup.
///
/// Tasks are added in call order, which is also the insertion tie-break order.
#[derive(Default)]
pub struct RepositoryBuilder {
    tasks: Vec<TaskSpec>,
}

impl RepositoryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_task(mut self, task: TaskSpec) -> Self {
        self.tasks.push(task);
        self
    }

    /// Shorthand for a task with no prerequisites.
    pub fn root(self, id: &str, duration: u64) -> Self {
        self.with_task(TaskBuilder::new(id, duration).build())
    }

    pub fn build(self) -> TaskRepository {
        let mut repo = TaskRepository::new();
        for task in self.tasks {
            repo.add(task.id, task.duration, task.after)
                .expect("Failed to build repository from builder");
        }
        repo
    }

    pub fn build_graph(self) -> DependencyGraph {
        DependencyGraph::from_repository(&self.build())
    }
}

/// Plain data for one task before it goes into a repository.
#[derive(Debug, Clone)]
pub struct TaskSpec {
    pub id: TaskId,
    pub duration: u64,
    pub after: Vec<TaskId>,
}

/// Builder for `TaskSpec`.
pub struct TaskBuilder {
    task: TaskSpec,
}

impl TaskBuilder {
    pub fn new(id: &str, duration: u64) -> Self {
        Self {
            task: TaskSpec {
                id: id.to_string(),
                duration,
                after: vec![],
            },
        }
    }

    pub fn after(mut self, dep: &str) -> Self {
        self.task.after.push(dep.to_string());
        self
    }

    pub fn build(self) -> TaskSpec {
        self.task
    }
}

/// Builder for `ConfigFile`.
#[derive(Default)]
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks_file(mut self, name: &str) -> Self {
        self.config.files.tasks = name.to_string();
        self
    }

    pub fn sequence_file(mut self, name: &str) -> Self {
        self.config.files.sequence = name.to_string();
        self
    }

    pub fn earliest_times_file(mut self, name: &str) -> Self {
        self.config.files.earliest_times = name.to_string();
        self
    }

    pub fn tie_break(mut self, rule: TieBreak) -> Self {
        self.config.schedule.tie_break = rule;
        self
    }

    pub fn write_reports(mut self, val: bool) -> Self {
        self.config.schedule.write_reports = val;
        self
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

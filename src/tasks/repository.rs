// src/tasks/repository.rs

//! Owner of all task records.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::errors::{Result, TaskplanError};
use crate::tasks::record::{Task, validate_task_id};
use crate::types::TaskId;

/// The set of tasks in one session, in insertion order.
///
/// Ids are unique. Prerequisites may point at ids that are not (or no
/// longer) present between mutations; [`TaskRepository::sanitize`] removes
/// those references and must run before any graph algorithm.
#[derive(Debug, Clone, Default)]
pub struct TaskRepository {
    tasks: Vec<Task>,
}

impl TaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new task.
    ///
    /// Prerequisites are stored as given, including ids that have not been
    /// added yet.
    pub fn add<I, S>(&mut self, id: impl Into<TaskId>, duration: u64, prerequisites: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<TaskId>,
    {
        let id = id.into();
        validate_task_id(&id)?;
        if self.contains(&id) {
            return Err(TaskplanError::DuplicateId(id));
        }
        let prerequisites = checked_prerequisites(prerequisites)?;

        let task = Task::new(id, duration, prerequisites);
        info!(
            task = %task.id(),
            duration = task.duration(),
            prerequisites = ?task.prerequisites(),
            "task added"
        );
        self.tasks.push(task);
        Ok(())
    }

    /// Remove a task and strip its id from every other task's prerequisites.
    pub fn remove(&mut self, id: &str) -> Result<Task> {
        let index = self
            .position(id)
            .ok_or_else(|| TaskplanError::TaskNotFound(id.to_string()))?;
        let removed = self.tasks.remove(index);

        let mut detached = 0;
        for task in self.tasks.iter_mut() {
            detached += task.retain_prerequisites(|p| p != id);
        }

        info!(task = %id, detached, "task removed");
        Ok(removed)
    }

    pub fn edit_duration(&mut self, id: &str, duration: u64) -> Result<()> {
        let task = self.find_mut(id)?;
        let previous = task.duration();
        task.set_duration(duration);
        info!(task = %id, previous, duration, "task duration edited");
        Ok(())
    }

    /// Replace the prerequisite set of a task.
    pub fn edit_prerequisites<I, S>(&mut self, id: &str, prerequisites: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<TaskId>,
    {
        let prerequisites = checked_prerequisites(prerequisites)?;
        let task = self.find_mut(id)?;
        task.set_prerequisites(prerequisites);
        info!(task = %id, prerequisites = ?task.prerequisites(), "task prerequisites edited");
        Ok(())
    }

    /// Look a task up by id. A miss is not an error here.
    pub fn find_by_id(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Drop prerequisite references to tasks that are not in the repository.
    ///
    /// Idempotent. Returns the number of references removed.
    pub fn sanitize(&mut self) -> usize {
        let known: HashSet<TaskId> = self.tasks.iter().map(|t| t.id().to_string()).collect();

        let mut dropped = 0;
        for task in self.tasks.iter_mut() {
            let id = task.id().to_string();
            dropped += task.retain_prerequisites(|p| {
                let keep = known.contains(p);
                if !keep {
                    debug!(task = %id, prerequisite = %p, "dropping dangling prerequisite");
                }
                keep
            });
        }

        if dropped > 0 {
            debug!(dropped, "sanitize removed dangling prerequisites");
        }
        dropped
    }

    /// Tasks in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.tasks.iter().position(|t| t.id() == id)
    }

    fn find_mut(&mut self, id: &str) -> Result<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| t.id() == id)
            .ok_or_else(|| TaskplanError::TaskNotFound(id.to_string()))
    }
}

/// Collect prerequisite names, rejecting any the record file cannot hold.
/// Blank entries pass through; [`Task`] drops them.
fn checked_prerequisites<I, S>(prerequisites: I) -> Result<Vec<TaskId>>
where
    I: IntoIterator<Item = S>,
    S: Into<TaskId>,
{
    prerequisites
        .into_iter()
        .map(Into::into)
        .map(|p: TaskId| -> Result<TaskId> {
            if !p.trim().is_empty() {
                validate_task_id(&p)?;
            }
            Ok(p)
        })
        .collect()
}

impl<'a> IntoIterator for &'a TaskRepository {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_prereqs() -> Vec<TaskId> {
        Vec::new()
    }

    #[test]
    fn add_rejects_duplicate_id() {
        let mut repo = TaskRepository::new();
        repo.add("A", 3, no_prereqs()).unwrap();

        match repo.add("A", 5, no_prereqs()) {
            Err(TaskplanError::DuplicateId(id)) => assert_eq!(id, "A"),
            other => panic!("expected DuplicateId, got {other:?}"),
        }
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.find_by_id("A").unwrap().duration(), 3);
    }

    #[test]
    fn ids_are_case_sensitive() {
        let mut repo = TaskRepository::new();
        repo.add("a", 1, no_prereqs()).unwrap();
        repo.add("A", 1, no_prereqs()).unwrap();
        assert_eq!(repo.len(), 2);
    }

    #[test]
    fn add_rejects_blank_id() {
        let mut repo = TaskRepository::new();
        assert!(matches!(
            repo.add("  ", 1, no_prereqs()),
            Err(TaskplanError::InvalidTaskId(_))
        ));
        assert!(repo.is_empty());
    }

    #[test]
    fn add_rejects_ids_the_record_file_cannot_hold() {
        let mut repo = TaskRepository::new();
        assert!(matches!(
            repo.add("A,B", 1, no_prereqs()),
            Err(TaskplanError::InvalidTaskId(id)) if id == "A,B"
        ));
        assert!(matches!(
            repo.add("C", 1, ["ok", "bad\nline"]),
            Err(TaskplanError::InvalidTaskId(id)) if id == "bad\nline"
        ));
        assert!(repo.is_empty());

        repo.add("C", 1, ["ok"]).unwrap();
        assert!(matches!(
            repo.edit_prerequisites("C", ["x,y"]),
            Err(TaskplanError::InvalidTaskId(_))
        ));
        assert_eq!(repo.find_by_id("C").unwrap().prerequisites(), ["ok"]);
    }

    #[test]
    fn add_keeps_forward_references() {
        let mut repo = TaskRepository::new();
        repo.add("B", 2, ["A"]).unwrap();
        assert_eq!(repo.find_by_id("B").unwrap().prerequisites(), ["A"]);
    }

    #[test]
    fn remove_cascades_to_dependents() {
        let mut repo = TaskRepository::new();
        repo.add("A", 1, no_prereqs()).unwrap();
        repo.add("B", 1, ["A"]).unwrap();
        repo.add("C", 1, ["B", "A"]).unwrap();

        let removed = repo.remove("A").unwrap();
        assert_eq!(removed.id(), "A");
        assert!(repo.find_by_id("B").unwrap().prerequisites().is_empty());
        assert_eq!(repo.find_by_id("C").unwrap().prerequisites(), ["B"]);
        assert!(repo.iter().all(|t| !t.depends_on("A")));
    }

    #[test]
    fn remove_missing_is_not_found() {
        let mut repo = TaskRepository::new();
        assert!(matches!(
            repo.remove("ghost"),
            Err(TaskplanError::TaskNotFound(id)) if id == "ghost"
        ));
    }

    #[test]
    fn edit_duration_updates_in_place() {
        let mut repo = TaskRepository::new();
        repo.add("A", 1, no_prereqs()).unwrap();
        repo.edit_duration("A", 9).unwrap();
        assert_eq!(repo.find_by_id("A").unwrap().duration(), 9);

        assert!(matches!(
            repo.edit_duration("B", 2),
            Err(TaskplanError::TaskNotFound(_))
        ));
    }

    #[test]
    fn edit_prerequisites_replaces_set() {
        let mut repo = TaskRepository::new();
        repo.add("A", 1, no_prereqs()).unwrap();
        repo.add("B", 1, ["A"]).unwrap();
        repo.edit_prerequisites("A", ["B"]).unwrap();
        repo.edit_prerequisites("B", no_prereqs()).unwrap();
        assert_eq!(repo.find_by_id("A").unwrap().prerequisites(), ["B"]);
        assert!(repo.find_by_id("B").unwrap().prerequisites().is_empty());
    }

    #[test]
    fn sanitize_drops_only_dangling_and_is_idempotent() {
        let mut repo = TaskRepository::new();
        repo.add("A", 1, ["X"]).unwrap();
        repo.add("B", 1, ["A", "Y", "Z"]).unwrap();

        assert_eq!(repo.sanitize(), 3);
        assert!(repo.find_by_id("A").unwrap().prerequisites().is_empty());
        assert_eq!(repo.find_by_id("B").unwrap().prerequisites(), ["A"]);

        let snapshot: Vec<Task> = repo.iter().cloned().collect();
        assert_eq!(repo.sanitize(), 0);
        assert_eq!(repo.iter().cloned().collect::<Vec<_>>(), snapshot);
    }

    #[test]
    fn sanitize_keeps_self_reference() {
        let mut repo = TaskRepository::new();
        repo.add("A", 1, ["A"]).unwrap();
        assert_eq!(repo.sanitize(), 0);
        assert!(repo.find_by_id("A").unwrap().depends_on("A"));
    }

    #[test]
    fn iteration_follows_insertion_order() {
        let mut repo = TaskRepository::new();
        for id in ["T3", "T1", "T2"] {
            repo.add(id, 0, no_prereqs()).unwrap();
        }
        let ids: Vec<&str> = repo.iter().map(|t| t.id()).collect();
        assert_eq!(ids, ["T3", "T1", "T2"]);
    }
}

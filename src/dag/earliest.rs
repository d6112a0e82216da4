// src/dag/earliest.rs

//! Earliest start times (critical path) for every task.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::dag::elimination::{CycleDetected, Eliminator};
use crate::dag::graph::DependencyGraph;
use crate::tasks::TaskRepository;
use crate::types::{TaskId, TieBreak};

/// Earliest start time per task, in repository order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EarliestTimes {
    entries: Vec<(TaskId, u64)>,
    project_length: u64,
}

impl EarliestTimes {
    pub fn get(&self, id: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|(task, _)| task == id)
            .map(|(_, start)| *start)
    }

    /// `(id, earliest start)` pairs in repository order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(id, start)| (id.as_str(), *start))
    }

    /// Time at which the last task finishes when every task starts as early
    /// as possible.
    pub fn project_length(&self) -> u64 {
        self.project_length
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_map(&self) -> BTreeMap<TaskId, u64> {
        self.entries.iter().cloned().collect()
    }
}

/// Compute the earliest start time of every task in `graph`.
///
/// Tasks without prerequisites start at 0. Every other task starts at the
/// latest finish time (`start + duration`) among its prerequisites. Uses the
/// same elimination as [`topological_order`](super::topological_order);
/// the numbers do not depend on `tie_break`.
pub fn earliest_times(
    graph: &DependencyGraph,
    tie_break: TieBreak,
) -> Result<EarliestTimes, CycleDetected> {
    let mut tentative: HashMap<&str, u64> = graph.tasks().map(|id| (id, 0)).collect();

    Eliminator::new(graph, tie_break).run(|id| {
        let start = tentative.get(id).copied().unwrap_or(0);
        let finish = start.saturating_add(graph.duration_of(id));
        debug!(task = %id, start, finish, "task start fixed");

        for dependent in graph.dependents_of(id) {
            if let Some(current) = tentative.get_mut(dependent.as_str()) {
                if finish > *current {
                    *current = finish;
                }
            }
        }
    })?;

    let entries: Vec<(TaskId, u64)> = graph
        .tasks()
        .map(|id| (id.to_string(), tentative.get(id).copied().unwrap_or(0)))
        .collect();
    let project_length = entries
        .iter()
        .map(|(id, start)| start.saturating_add(graph.duration_of(id)))
        .max()
        .unwrap_or(0);

    Ok(EarliestTimes {
        entries,
        project_length,
    })
}

/// Sanitize the repository, build its graph and compute earliest start times.
///
/// Dangling prerequisites are removed from `repo` as a side effect.
pub fn compute_earliest_times(
    repo: &mut TaskRepository,
    tie_break: TieBreak,
) -> Result<EarliestTimes, CycleDetected> {
    repo.sanitize();
    let graph = DependencyGraph::from_repository(repo);
    earliest_times(&graph, tie_break)
}

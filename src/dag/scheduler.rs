// src/dag/scheduler.rs

//! Topological ordering of tasks.

use tracing::debug;

use crate::dag::elimination::{CycleDetected, Eliminator};
use crate::dag::graph::DependencyGraph;
use crate::tasks::TaskRepository;
use crate::types::{TaskId, TieBreak};

/// Order every task so that it appears after all of its prerequisites.
///
/// Among tasks that are ready at the same time, `tie_break` decides which
/// goes first. Fails with [`CycleDetected`] if any task can never become
/// ready; the order emitted up to that point is discarded.
pub fn topological_order(
    graph: &DependencyGraph,
    tie_break: TieBreak,
) -> Result<Vec<TaskId>, CycleDetected> {
    let mut order = Vec::with_capacity(graph.len());
    Eliminator::new(graph, tie_break).run(|id| order.push(id.to_string()))?;
    Ok(order)
}

/// Sanitize the repository, build its graph and order it.
///
/// Dangling prerequisites are removed from `repo` as a side effect.
pub fn compute_order(
    repo: &mut TaskRepository,
    tie_break: TieBreak,
) -> Result<Vec<TaskId>, CycleDetected> {
    repo.sanitize();
    let graph = DependencyGraph::from_repository(repo);
    let order = topological_order(&graph, tie_break)?;
    debug!(?order, %tie_break, "computed task order");
    Ok(order)
}

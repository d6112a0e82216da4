// src/dag/elimination.rs

//! Kahn-style elimination shared by ordering and earliest-time computation.
//!
//! Every node moves `Pending → Ready → Resolved`. A node becomes `Ready`
//! once its outstanding prerequisite count reaches zero and `Resolved` when
//! it is eliminated. If nodes remain but none is `Ready`, every remaining
//! node is marked `Cyclic` and the elimination fails with [`CycleDetected`].

use std::collections::HashMap;

use petgraph::algo::tarjan_scc;
use petgraph::graphmap::DiGraphMap;
use thiserror::Error;
use tracing::{debug, warn};

use crate::dag::graph::DependencyGraph;
use crate::types::{TaskId, TieBreak};

/// Per-node state during one elimination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    /// Still waiting on at least one prerequisite.
    Pending,
    /// All prerequisites resolved; eligible for elimination.
    Ready,
    /// Eliminated; its position in the order is fixed.
    Resolved,
    /// Could not be resolved because it sits on or behind a cycle.
    Cyclic,
}

/// The graph could not be fully ordered.
///
/// No partial result accompanies this error; the fields are diagnostics only.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Cycle detected in task dependencies; unresolved tasks: {}", .unresolved.join(", "))]
pub struct CycleDetected {
    /// Every task that could not be resolved, in graph order. This includes
    /// tasks that merely depend on a cycle.
    pub unresolved: Vec<TaskId>,
    /// The actual cycles among the unresolved tasks (strongly connected
    /// components with more than one task, or a task listing itself).
    pub cycles: Vec<Vec<TaskId>>,
}

/// Result of a single elimination step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EliminationStep<'g> {
    /// This node was eliminated.
    Resolved(&'g str),
    /// Every node has been resolved.
    Finished,
    /// Nodes remain but none is ready.
    Stuck,
}

/// Stepwise elimination over a [`DependencyGraph`].
#[derive(Debug)]
pub struct Eliminator<'g> {
    graph: &'g DependencyGraph,
    /// Nodes in the order they are scanned for readiness.
    scan_order: Vec<&'g str>,
    outstanding: HashMap<&'g str, usize>,
    states: HashMap<&'g str, NodeState>,
    remaining: usize,
}

impl<'g> Eliminator<'g> {
    pub fn new(graph: &'g DependencyGraph, tie_break: TieBreak) -> Self {
        let mut scan_order: Vec<&'g str> = graph.tasks().collect();
        if tie_break == TieBreak::Lexical {
            scan_order.sort_unstable();
        }

        let mut outstanding = HashMap::new();
        let mut states = HashMap::new();
        for &id in &scan_order {
            let count = graph.prerequisites_of(id).len();
            outstanding.insert(id, count);
            let state = if count == 0 {
                NodeState::Ready
            } else {
                NodeState::Pending
            };
            states.insert(id, state);
        }

        Self {
            graph,
            remaining: scan_order.len(),
            scan_order,
            outstanding,
            states,
        }
    }

    pub fn state_of(&self, id: &str) -> Option<NodeState> {
        self.states.get(id).copied()
    }

    /// Eliminate the first ready node in scan order.
    pub fn step(&mut self) -> EliminationStep<'g> {
        if self.remaining == 0 {
            return EliminationStep::Finished;
        }

        let ready = self
            .scan_order
            .iter()
            .copied()
            .find(|id| self.states.get(id) == Some(&NodeState::Ready));
        let Some(next) = ready else {
            for state in self.states.values_mut() {
                if *state == NodeState::Pending {
                    *state = NodeState::Cyclic;
                }
            }
            return EliminationStep::Stuck;
        };

        self.states.insert(next, NodeState::Resolved);
        self.remaining -= 1;
        debug!(task = %next, remaining = self.remaining, "eliminated task");

        let graph = self.graph;
        for dependent in graph.dependents_of(next) {
            let dependent = dependent.as_str();
            let Some(count) = self.outstanding.get_mut(dependent) else {
                continue;
            };
            *count = count.saturating_sub(1);
            if *count == 0 && self.states.get(dependent) == Some(&NodeState::Pending) {
                self.states.insert(dependent, NodeState::Ready);
            }
        }

        EliminationStep::Resolved(next)
    }

    /// Eliminate every node, calling `on_resolved` for each in order.
    pub fn run(mut self, mut on_resolved: impl FnMut(&'g str)) -> Result<(), CycleDetected> {
        loop {
            match self.step() {
                EliminationStep::Resolved(id) => on_resolved(id),
                EliminationStep::Finished => return Ok(()),
                EliminationStep::Stuck => {
                    let err = self.cycle_report();
                    warn!(
                        unresolved = ?err.unresolved,
                        cycles = ?err.cycles,
                        "cycle detected; no complete schedule exists"
                    );
                    return Err(err);
                }
            }
        }
    }

    fn cycle_report(&self) -> CycleDetected {
        let unresolved: Vec<&'g str> = self
            .graph
            .tasks()
            .filter(|id| self.states.get(id) == Some(&NodeState::Cyclic))
            .collect();

        // Edge direction: prerequisite -> task, restricted to unresolved nodes.
        let mut sub: DiGraphMap<&str, ()> = DiGraphMap::new();
        for &id in &unresolved {
            sub.add_node(id);
        }
        for &id in &unresolved {
            for prerequisite in self.graph.prerequisites_of(id) {
                if sub.contains_node(prerequisite.as_str()) {
                    sub.add_edge(prerequisite.as_str(), id, ());
                }
            }
        }

        let mut cycles: Vec<Vec<TaskId>> = tarjan_scc(&sub)
            .into_iter()
            .filter(|scc| scc.len() > 1 || sub.contains_edge(scc[0], scc[0]))
            .map(|mut scc| {
                scc.sort_by_key(|id| self.graph.index_of(id));
                scc.into_iter().map(str::to_string).collect()
            })
            .collect();
        cycles.sort_by_key(|scc| self.graph.index_of(&scc[0]));

        CycleDetected {
            unresolved: unresolved.into_iter().map(str::to_string).collect(),
            cycles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(entries: &[(&str, u64, &[&str])]) -> DependencyGraph {
        DependencyGraph::from_entries(entries.iter().map(|(id, d, pre)| {
            (
                id.to_string(),
                *d,
                pre.iter().map(|p| p.to_string()).collect(),
            )
        }))
    }

    #[test]
    fn states_progress_pending_ready_resolved() {
        let g = graph(&[("A", 1, &[]), ("B", 1, &["A"])]);
        let mut el = Eliminator::new(&g, TieBreak::Insertion);

        assert_eq!(el.state_of("A"), Some(NodeState::Ready));
        assert_eq!(el.state_of("B"), Some(NodeState::Pending));

        assert_eq!(el.step(), EliminationStep::Resolved("A"));
        assert_eq!(el.state_of("A"), Some(NodeState::Resolved));
        assert_eq!(el.state_of("B"), Some(NodeState::Ready));

        assert_eq!(el.step(), EliminationStep::Resolved("B"));
        assert_eq!(el.step(), EliminationStep::Finished);
    }

    #[test]
    fn stuck_marks_remaining_cyclic() {
        let g = graph(&[("A", 1, &[]), ("B", 1, &["C"]), ("C", 1, &["B"])]);
        let mut el = Eliminator::new(&g, TieBreak::Insertion);

        assert_eq!(el.step(), EliminationStep::Resolved("A"));
        assert_eq!(el.step(), EliminationStep::Stuck);
        assert_eq!(el.state_of("A"), Some(NodeState::Resolved));
        assert_eq!(el.state_of("B"), Some(NodeState::Cyclic));
        assert_eq!(el.state_of("C"), Some(NodeState::Cyclic));
    }

    #[test]
    fn cycle_report_separates_cycle_from_downstream() {
        // D depends on the B<->C cycle but is not part of it.
        let g = graph(&[
            ("A", 1, &[]),
            ("B", 1, &["C", "A"]),
            ("C", 1, &["B"]),
            ("D", 1, &["C"]),
        ]);
        let err = Eliminator::new(&g, TieBreak::Insertion).run(|_| {}).unwrap_err();

        assert_eq!(err.unresolved, ["B", "C", "D"]);
        assert_eq!(err.cycles, vec![vec!["B".to_string(), "C".to_string()]]);
    }

    #[test]
    fn self_loop_is_reported_as_cycle() {
        let g = graph(&[("A", 1, &["A"])]);
        let err = Eliminator::new(&g, TieBreak::Insertion).run(|_| {}).unwrap_err();
        assert_eq!(err.unresolved, ["A"]);
        assert_eq!(err.cycles, vec![vec!["A".to_string()]]);
        assert!(err.to_string().contains("unresolved tasks: A"));
    }

    #[test]
    fn missing_prerequisite_node_stays_unresolved_without_cycle() {
        let g = graph(&[("A", 1, &["X"])]);
        let err = Eliminator::new(&g, TieBreak::Insertion).run(|_| {}).unwrap_err();
        assert_eq!(err.unresolved, ["A"]);
        assert!(err.cycles.is_empty());
    }

    #[test]
    fn lexical_tie_break_scans_by_id() {
        let g = graph(&[("b", 1, &[]), ("a", 1, &[]), ("c", 1, &[])]);
        let mut seen = Vec::new();
        Eliminator::new(&g, TieBreak::Lexical)
            .run(|id| seen.push(id))
            .unwrap();
        assert_eq!(seen, ["a", "b", "c"]);
    }
}

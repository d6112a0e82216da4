// src/dag/graph.rs

use std::collections::{HashMap, HashSet};

use tracing::warn;

use crate::tasks::TaskRepository;
use crate::types::TaskId;

/// Internal node structure: stores duration, immediate prerequisites and dependents.
#[derive(Debug, Clone)]
struct DagNode {
    duration: u64,
    /// Direct prerequisites: tasks that must finish before this one starts.
    prerequisites: Vec<TaskId>,
    /// Direct dependents: tasks that list this one as a prerequisite.
    dependents: Vec<TaskId>,
}

/// Dependency graph projected from a task repository, keyed by task id.
///
/// There is one node per task, including tasks without prerequisites, and
/// [`DependencyGraph::tasks`] yields ids in repository insertion order.
///
/// The graph is built fresh for every scheduling request and assumes the
/// repository has been sanitized. A prerequisite that names no node is kept
/// as-is; such a node can never become ready and ends up reported as
/// unresolved by the elimination.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    order: Vec<TaskId>,
    nodes: HashMap<TaskId, DagNode>,
}

impl DependencyGraph {
    /// Build a graph from the current repository state.
    pub fn from_repository(repo: &TaskRepository) -> Self {
        Self::from_entries(repo.iter().map(|task| {
            (
                task.id().to_string(),
                task.duration(),
                task.prerequisites().to_vec(),
            )
        }))
    }

    /// Build a graph from `(id, duration, prerequisites)` entries.
    ///
    /// Entry order becomes the graph's iteration order. If an id repeats,
    /// the first entry wins.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (TaskId, u64, Vec<TaskId>)>,
    {
        let mut order = Vec::new();
        let mut nodes: HashMap<TaskId, DagNode> = HashMap::new();

        // First pass: create nodes with their prerequisite lists.
        for (id, duration, mut prerequisites) in entries {
            if nodes.contains_key(&id) {
                warn!(task = %id, "duplicate task id while building graph; keeping first");
                continue;
            }
            let mut seen = HashSet::new();
            prerequisites.retain(|p| seen.insert(p.clone()));

            order.push(id.clone());
            nodes.insert(
                id,
                DagNode {
                    duration,
                    prerequisites,
                    dependents: Vec::new(),
                },
            );
        }

        // Second pass: populate dependents, following insertion order so
        // that dependents lists are deterministic.
        for id in &order {
            let prerequisites = nodes
                .get(id)
                .map(|n| n.prerequisites.clone())
                .unwrap_or_default();

            for prerequisite in prerequisites {
                if let Some(node) = nodes.get_mut(&prerequisite) {
                    if !node.dependents.contains(id) {
                        node.dependents.push(id.clone());
                    }
                }
            }
        }

        Self { order, nodes }
    }

    /// All task ids, in insertion order.
    pub fn tasks(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|s| s.as_str())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Immediate prerequisites of a task.
    pub fn prerequisites_of(&self, id: &str) -> &[TaskId] {
        self.nodes
            .get(id)
            .map(|n| n.prerequisites.as_slice())
            .unwrap_or(&[])
    }

    /// Immediate dependents of a task (tasks that list it as a prerequisite).
    pub fn dependents_of(&self, id: &str) -> &[TaskId] {
        self.nodes
            .get(id)
            .map(|n| n.dependents.as_slice())
            .unwrap_or(&[])
    }

    /// Execution time of a task; `0` for unknown ids.
    pub fn duration_of(&self, id: &str) -> u64 {
        self.nodes.get(id).map(|n| n.duration).unwrap_or(0)
    }

    /// Position of a task in insertion order.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.order.iter().position(|t| t == id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

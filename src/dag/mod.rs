// src/dag/mod.rs

//! Dependency graph and the scheduling algorithms that run over it.
//!
//! - [`graph`] projects a task repository into a [`DependencyGraph`].
//! - [`elimination`] is the per-request state machine that repeatedly
//!   removes the first ready task; both algorithms below share it.
//! - [`scheduler`] produces a topological order.
//! - [`earliest`] computes earliest start times.

pub mod earliest;
pub mod elimination;
pub mod graph;
pub mod scheduler;

pub use earliest::{EarliestTimes, compute_earliest_times, earliest_times};
pub use elimination::{CycleDetected, EliminationStep, Eliminator, NodeState};
pub use graph::DependencyGraph;
pub use scheduler::{compute_order, topological_order};

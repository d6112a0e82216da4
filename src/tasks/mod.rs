// src/tasks/mod.rs

//! Task records and the repository that owns them.
//!
//! - [`record`] holds a single [`Task`] and duration parsing.
//! - [`repository`] holds the [`TaskRepository`]: add/remove/edit, lookup
//!   and the sanitation pass that drops dangling prerequisites.

pub mod record;
pub mod repository;

pub use record::{Task, parse_duration, validate_task_id};
pub use repository::TaskRepository;

#![allow(dead_code)]

pub use taskplan_test_utils::builders::{ConfigFileBuilder, RepositoryBuilder, TaskBuilder};
pub use taskplan_test_utils::init_tracing;

/// Index of `id` in `order`, panicking if absent.
pub fn position(order: &[String], id: &str) -> usize {
    order
        .iter()
        .position(|t| t == id)
        .unwrap_or_else(|| panic!("{id} missing from order {order:?}"))
}

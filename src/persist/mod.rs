// src/persist/mod.rs

//! Text persistence around the scheduling core.
//!
//! - [`records`] reads and writes the task record file.
//! - [`reports`] writes the sequence and earliest-times reports.

pub mod records;
pub mod reports;

pub use records::{
    format_record, format_records, load_repository, parse_records, save_repository, write_repository,
};
pub use reports::{
    format_earliest_times, format_sequence, write_earliest_times_report, write_sequence_report,
};

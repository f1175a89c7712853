//! Formatted terminal output for the statement table.

pub mod format;

pub use format::{format_run_summary, format_table, header_label};

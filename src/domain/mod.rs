//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - fetched income-statement records (`IncomeRecord`)
//! - the filter-criteria store (`FilterCriteria`, `YearRange`, `AmountRange`)
//! - sort state (`SortKey`, `SortSpec`)
//! - table column metadata (`ColumnKey`)

pub mod types;

pub use types::*;

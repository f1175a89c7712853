//! Remote record source.

pub mod fmp;

pub use fmp::{FmpClient, StatementSnapshot};

//! Derived-view engines.
//!
//! Filtering and sorting are pure functions over the raw record slice:
//! they take their inputs by reference, return new vectors, and keep no
//! memory between calls. Every upstream change (new records, new
//! criteria, new sort spec) recomputes the derived view in full.

pub mod filter;
pub mod sort;

pub use filter::filter_records;
pub use sort::sort_records;

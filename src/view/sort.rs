//! Ordering of the filtered view.

use std::cmp::Ordering;

use crate::domain::{IncomeRecord, SortDirection, SortKey, SortSpec};

/// Produce a new ordered sequence; the input is never mutated.
///
/// Dates compare lexicographically (ISO-like strings order correctly),
/// monetary columns numerically. Equal keys compare as ties, so the
/// underlying stable sort preserves their incoming order.
pub fn sort_records(records: &[IncomeRecord], spec: SortSpec) -> Vec<IncomeRecord> {
    let mut out = records.to_vec();
    out.sort_by(|a, b| {
        let natural = compare(a, b, spec.key);
        match spec.direction {
            SortDirection::Ascending => natural,
            SortDirection::Descending => natural.reverse(),
        }
    });
    out
}

fn compare(a: &IncomeRecord, b: &IncomeRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::Date => a.date.cmp(&b.date),
        SortKey::Revenue => a.revenue.partial_cmp(&b.revenue).unwrap_or(Ordering::Equal),
        SortKey::NetIncome => a
            .net_income
            .partial_cmp(&b.net_income)
            .unwrap_or(Ordering::Equal),
    }
}

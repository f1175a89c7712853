//! Shared view pipeline used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! raw records -> filtered view -> sorted view
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use crate::domain::{FilterCriteria, IncomeRecord, SortSpec};
use crate::view::{filter_records, sort_records};

/// Derive the visible rows: filter, then sort.
///
/// Recomputed in full after every record, criteria, or sort change; the
/// pipeline keeps no intermediate results between calls.
pub fn derive_rows(
    records: &[IncomeRecord],
    criteria: &FilterCriteria,
    sort: SortSpec,
) -> Vec<IncomeRecord> {
    let filtered = filter_records(records, criteria);
    sort_records(&filtered, sort)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SortDirection, SortKey};

    fn record(date: &str, revenue: f64) -> IncomeRecord {
        IncomeRecord {
            date: date.to_string(),
            revenue,
            net_income: 0.0,
            gross_profit: 0.0,
            eps: 0.0,
            operating_income: 0.0,
        }
    }

    #[test]
    fn derive_filters_then_sorts() {
        let records = vec![
            record("2021-09-30", 100.0),
            record("2022-09-30", 50.0),
            record("2023-09-30", 80.0),
        ];
        let mut criteria = FilterCriteria::default();
        criteria.set_revenue_range(60.0, 200.0);
        let sort = SortSpec {
            key: SortKey::Revenue,
            direction: SortDirection::Descending,
        };

        let rows = derive_rows(&records, &criteria, sort);
        let dates: Vec<&str> = rows.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, ["2021-09-30", "2023-09-30"]);
    }
}

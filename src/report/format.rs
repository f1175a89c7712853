//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the filtering/sorting code stays clean and testable
//! - output changes are localized (important for future snapshot tests)
//! - the CLI table and the TUI table render the same cell text

use crate::data::StatementSnapshot;
use crate::domain::{ColumnKey, FilterCriteria, IncomeRecord, SortDirection, SortSpec};
use crate::form::numeric::group_thousands;

const COLUMN_WIDTHS: [usize; 6] = [12, 20, 20, 20, 10, 18];

/// Format the run header (symbol, as-of date, row counts, filter, sort).
pub fn format_run_summary(
    snapshot: &StatementSnapshot,
    criteria: &FilterCriteria,
    sort: SortSpec,
    shown: usize,
) -> String {
    let mut out = String::new();

    out.push_str("=== fin - Income Statements ===\n");
    out.push_str(&format!(
        "Symbol: {} ({})\n",
        snapshot.symbol,
        snapshot.period.as_str()
    ));
    out.push_str(&format!("As-of: {}\n", snapshot.as_of));
    out.push_str(&format!(
        "Rows: {} fetched | {} shown | {} skipped\n",
        snapshot.records.len(),
        shown,
        snapshot.rows_skipped
    ));
    out.push_str(&format!("Filter: {}\n", criteria.describe()));
    out.push_str(&format!("Sort: {}\n", sort_label(sort)));
    out.push('\n');

    out
}

/// Format the visible rows as a fixed-width table.
pub fn format_table(records: &[IncomeRecord], sort: SortSpec) -> String {
    let mut out = String::new();

    for (column, width) in ColumnKey::ALL.iter().zip(COLUMN_WIDTHS) {
        out.push_str(&format!("{:<width$}", header_label(*column, sort)));
        out.push_str("  ");
    }
    out.push('\n');

    for record in records {
        for (column, width) in ColumnKey::ALL.iter().zip(COLUMN_WIDTHS) {
            out.push_str(&format!("{:<width$}", cell(record, *column)));
            out.push_str("  ");
        }
        out.push('\n');
    }

    out
}

/// Header text for one column, with a direction marker on the active
/// sort column. Shared by the CLI table and the TUI table widget.
pub fn header_label(column: ColumnKey, sort: SortSpec) -> String {
    let active = column.sort_key() == Some(sort.key);
    if !active {
        return column.label().to_string();
    }
    let marker = match sort.direction {
        SortDirection::Ascending => "▲",
        SortDirection::Descending => "▼",
    };
    format!("{} {marker}", column.label())
}

/// Cell text for one record attribute. Monetary columns get
/// thousands-separator grouping; EPS keeps two decimals.
pub fn cell(record: &IncomeRecord, column: ColumnKey) -> String {
    match column {
        ColumnKey::Date => record.date.clone(),
        ColumnKey::Revenue => group_thousands(record.revenue),
        ColumnKey::NetIncome => group_thousands(record.net_income),
        ColumnKey::GrossProfit => group_thousands(record.gross_profit),
        ColumnKey::Eps => format!("{:.2}", record.eps),
        ColumnKey::OperatingIncome => group_thousands(record.operating_income),
    }
}

fn sort_label(sort: SortSpec) -> String {
    let key = match sort.key {
        crate::domain::SortKey::Date => "date",
        crate::domain::SortKey::Revenue => "revenue",
        crate::domain::SortKey::NetIncome => "net income",
    };
    let direction = match sort.direction {
        SortDirection::Ascending => "asc",
        SortDirection::Descending => "desc",
    };
    format!("{key} {direction}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SortDirection, SortKey};

    fn record() -> IncomeRecord {
        IncomeRecord {
            date: "2021-09-25".to_string(),
            revenue: 365_817_000_000.0,
            net_income: 94_680_000_000.0,
            gross_profit: 152_836_000_000.0,
            eps: 5.67,
            operating_income: 108_949_000_000.0,
        }
    }

    #[test]
    fn table_groups_money_and_marks_sort_column() {
        let sort = SortSpec {
            key: SortKey::Revenue,
            direction: SortDirection::Descending,
        };
        let out = format_table(&[record()], sort);

        assert!(out.contains("365,817,000,000"));
        assert!(out.contains("Revenue ▼"));
        assert!(out.contains("5.67"));
        assert!(out.contains("2021-09-25"));
    }

    #[test]
    fn inactive_headers_carry_no_marker() {
        let sort = SortSpec::default();
        assert_eq!(header_label(ColumnKey::Revenue, sort), "Revenue");
        assert_eq!(header_label(ColumnKey::Date, sort), "Date ▲");
        assert_eq!(header_label(ColumnKey::Eps, sort), "EPS");
    }

    #[test]
    fn empty_view_renders_header_only() {
        let out = format_table(&[], SortSpec::default());
        assert_eq!(out.lines().count(), 1);
        assert!(out.contains("Operating Income"));
    }
}

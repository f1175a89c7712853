//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory by the filtering/sorting engines
//! - rendered by both the CLI report and the TUI
//! - exercised directly in unit tests

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Reporting period requested from the statement API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Annual,
    Quarter,
}

impl Period {
    /// Query-string value expected by the API.
    pub fn as_str(self) -> &'static str {
        match self {
            Period::Annual => "annual",
            Period::Quarter => "quarter",
        }
    }
}

/// One fiscal period's income-statement observation.
///
/// Immutable once fetched; uniquely identified by `date` within one
/// company's series. The fiscal year is the leading 4 characters of
/// `date` (e.g. `"2021-09-30"` -> 2021).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeRecord {
    pub date: String,
    pub revenue: f64,
    pub net_income: f64,
    pub gross_profit: f64,
    pub eps: f64,
    pub operating_income: f64,
}

impl IncomeRecord {
    /// Fiscal year extracted from the leading 4 characters of `date`.
    ///
    /// Returns `None` when the prefix is not a 4-digit number; callers
    /// treat that as failing every date-range test.
    pub fn year(&self) -> Option<i32> {
        let prefix = self.date.get(..4)?;
        prefix.parse::<i32>().ok()
    }
}

/// Inclusive year bounds on the record date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    /// Unrestricted default (the full range the UI offers).
    pub const UNRESTRICTED: YearRange = YearRange {
        start: 2020,
        end: 2025,
    };

    pub fn contains(&self, year: i32) -> bool {
        self.start <= year && year <= self.end
    }
}

/// Inclusive min/max bounds on one monetary record attribute.
///
/// `min <= max` is expected but not enforced; an inverted range matches
/// no record, which is allowed behavior, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmountRange {
    pub min: f64,
    pub max: f64,
}

impl AmountRange {
    /// Unrestricted default: 0 to +infinity.
    pub const UNRESTRICTED: AmountRange = AmountRange {
        min: 0.0,
        max: f64::INFINITY,
    };

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Which filter category is currently active, if any.
///
/// The store always resets the other two ranges when a setter runs, so
/// this tag makes the single-active-category behavior explicit instead
/// of leaving it implied by the range values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActiveFilter {
    #[default]
    None,
    Date,
    Revenue,
    NetIncome,
}

/// The three range predicates governing record visibility.
///
/// Exactly one category is expected to be active at a time: each setter
/// overwrites its own range and resets the other two to unrestricted
/// defaults. No setter validates numeric ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub date: YearRange,
    pub revenue: AmountRange,
    pub net_income: AmountRange,
    pub active: ActiveFilter,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            date: YearRange::UNRESTRICTED,
            revenue: AmountRange::UNRESTRICTED,
            net_income: AmountRange::UNRESTRICTED,
            active: ActiveFilter::None,
        }
    }
}

impl FilterCriteria {
    pub fn set_date_range(&mut self, start: i32, end: i32) {
        self.date = YearRange { start, end };
        self.revenue = AmountRange::UNRESTRICTED;
        self.net_income = AmountRange::UNRESTRICTED;
        self.active = ActiveFilter::Date;
    }

    pub fn set_revenue_range(&mut self, min: f64, max: f64) {
        self.revenue = AmountRange { min, max };
        self.date = YearRange::UNRESTRICTED;
        self.net_income = AmountRange::UNRESTRICTED;
        self.active = ActiveFilter::Revenue;
    }

    pub fn set_net_income_range(&mut self, min: f64, max: f64) {
        self.net_income = AmountRange { min, max };
        self.date = YearRange::UNRESTRICTED;
        self.revenue = AmountRange::UNRESTRICTED;
        self.active = ActiveFilter::NetIncome;
    }

    /// Restore all three ranges to unrestricted defaults and clear the
    /// active-category tag.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Short human-readable description for status lines and summaries.
    pub fn describe(&self) -> String {
        match self.active {
            ActiveFilter::None => "none".to_string(),
            ActiveFilter::Date => format!("date {}..{}", self.date.start, self.date.end),
            ActiveFilter::Revenue => format!(
                "revenue {}..{}",
                fmt_bound(self.revenue.min),
                fmt_bound(self.revenue.max)
            ),
            ActiveFilter::NetIncome => format!(
                "net income {}..{}",
                fmt_bound(self.net_income.min),
                fmt_bound(self.net_income.max)
            ),
        }
    }
}

fn fmt_bound(v: f64) -> String {
    if v == f64::INFINITY {
        "inf".to_string()
    } else {
        format!("{v:.0}")
    }
}

/// Sortable column identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Date,
    Revenue,
    NetIncome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// The active sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            key: SortKey::Date,
            direction: SortDirection::Ascending,
        }
    }
}

impl SortSpec {
    /// Re-selecting the active key flips direction; selecting a
    /// different key starts over ascending.
    pub fn toggle(&mut self, key: SortKey) {
        if self.key == key {
            self.direction = self.direction.flipped();
        } else {
            self.key = key;
            self.direction = SortDirection::Ascending;
        }
    }

    /// Column-level selection: non-sortable columns are a no-op.
    pub fn select(&mut self, column: ColumnKey) {
        if let Some(key) = column.sort_key() {
            self.toggle(key);
        }
    }
}

/// The six table columns, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnKey {
    Date,
    Revenue,
    NetIncome,
    GrossProfit,
    Eps,
    OperatingIncome,
}

impl ColumnKey {
    /// Fixed column order exposed to every view.
    pub const ALL: [ColumnKey; 6] = [
        ColumnKey::Date,
        ColumnKey::Revenue,
        ColumnKey::NetIncome,
        ColumnKey::GrossProfit,
        ColumnKey::Eps,
        ColumnKey::OperatingIncome,
    ];

    /// Header label for terminal output.
    pub fn label(self) -> &'static str {
        match self {
            ColumnKey::Date => "Date",
            ColumnKey::Revenue => "Revenue",
            ColumnKey::NetIncome => "Net Income",
            ColumnKey::GrossProfit => "Gross Profit",
            ColumnKey::Eps => "EPS",
            ColumnKey::OperatingIncome => "Operating Income",
        }
    }

    /// The sort key this column maps to, for the three sortable columns.
    pub fn sort_key(self) -> Option<SortKey> {
        match self {
            ColumnKey::Date => Some(SortKey::Date),
            ColumnKey::Revenue => Some(SortKey::Revenue),
            ColumnKey::NetIncome => Some(SortKey::NetIncome),
            ColumnKey::GrossProfit | ColumnKey::Eps | ColumnKey::OperatingIncome => None,
        }
    }

    pub fn is_sortable(self) -> bool {
        self.sort_key().is_some()
    }
}

/// Fetch parameters resolved from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct ViewConfig {
    pub symbol: String,
    pub period: Period,
    pub limit: usize,
}

//! Filter form state and reconciliation into the criteria store.
//!
//! The modal UI owns *when* the form opens and closes; this module owns
//! the form's data:
//!
//! - `FilterForm`: the category selector plus one text buffer per field
//! - `SubmittedFieldSet`: the normalized field values produced by one
//!   submission (created on submit, consumed once, discarded)
//! - `apply_submission`: maps a field-set onto exactly one criteria
//!   setter, by field presence

use crate::domain::{ActiveFilter, FilterCriteria};

pub mod numeric;

/// Filter categories offered by the modal, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterCategory {
    #[default]
    Date,
    NetIncome,
    Revenue,
}

impl FilterCategory {
    pub fn label(self) -> &'static str {
        match self {
            FilterCategory::Date => "Date",
            FilterCategory::NetIncome => "Net Income",
            FilterCategory::Revenue => "Revenue",
        }
    }

    pub fn next(self) -> Self {
        match self {
            FilterCategory::Date => FilterCategory::NetIncome,
            FilterCategory::NetIncome => FilterCategory::Revenue,
            FilterCategory::Revenue => FilterCategory::Date,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FilterCategory::Date => FilterCategory::Revenue,
            FilterCategory::NetIncome => FilterCategory::Date,
            FilterCategory::Revenue => FilterCategory::NetIncome,
        }
    }
}

/// Which of the two visible inputs has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldSlot {
    #[default]
    Lower,
    Upper,
}

impl FieldSlot {
    pub fn toggled(self) -> Self {
        match self {
            FieldSlot::Lower => FieldSlot::Upper,
            FieldSlot::Upper => FieldSlot::Lower,
        }
    }
}

/// Transient form state for one open session of the filter modal.
///
/// All six buffers live for the whole session: switching category does
/// not clear text typed under another category, so a submission can
/// carry fields from several categories at once. `apply_submission`
/// resolves that ambiguity with a fixed precedence.
#[derive(Debug, Clone, Default)]
pub struct FilterForm {
    pub category: FilterCategory,
    pub focus: FieldSlot,
    pub starting_year: String,
    pub ending_year: String,
    pub net_income_min: String,
    pub net_income_max: String,
    pub revenue_min: String,
    pub revenue_max: String,
}

impl FilterForm {
    /// Labels for the two inputs visible under the current category.
    pub fn field_labels(&self) -> (&'static str, &'static str) {
        match self.category {
            FilterCategory::Date => ("Starting year", "Ending year"),
            FilterCategory::NetIncome => ("Minimum net income", "Maximum net income"),
            FilterCategory::Revenue => ("Minimum revenue", "Maximum revenue"),
        }
    }

    /// The two buffers visible under the current category.
    pub fn visible_fields(&self) -> (&str, &str) {
        match self.category {
            FilterCategory::Date => (&self.starting_year, &self.ending_year),
            FilterCategory::NetIncome => (&self.net_income_min, &self.net_income_max),
            FilterCategory::Revenue => (&self.revenue_min, &self.revenue_max),
        }
    }

    /// Mutable access to the buffer currently holding focus.
    pub fn focused_field_mut(&mut self) -> &mut String {
        match (self.category, self.focus) {
            (FilterCategory::Date, FieldSlot::Lower) => &mut self.starting_year,
            (FilterCategory::Date, FieldSlot::Upper) => &mut self.ending_year,
            (FilterCategory::NetIncome, FieldSlot::Lower) => &mut self.net_income_min,
            (FilterCategory::NetIncome, FieldSlot::Upper) => &mut self.net_income_max,
            (FilterCategory::Revenue, FieldSlot::Lower) => &mut self.revenue_min,
            (FilterCategory::Revenue, FieldSlot::Upper) => &mut self.revenue_max,
        }
    }

    /// Normalize every non-empty buffer into the submitted field-set.
    ///
    /// Buffers that fail numeric validation after separator stripping
    /// are left unset rather than stored, so reconciliation simply does
    /// not see that category's pair.
    pub fn submitted_fields(&self) -> SubmittedFieldSet {
        SubmittedFieldSet {
            starting_year: numeric::normalize(&self.starting_year),
            ending_year: numeric::normalize(&self.ending_year),
            net_income_min: numeric::normalize(&self.net_income_min),
            net_income_max: numeric::normalize(&self.net_income_max),
            revenue_min: numeric::normalize(&self.revenue_min),
            revenue_max: numeric::normalize(&self.revenue_max),
        }
    }
}

/// Raw numeric strings produced by one form submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmittedFieldSet {
    pub starting_year: Option<String>,
    pub ending_year: Option<String>,
    pub net_income_min: Option<String>,
    pub net_income_max: Option<String>,
    pub revenue_min: Option<String>,
    pub revenue_max: Option<String>,
}

/// Reconcile one submission into the criteria store.
///
/// Field presence decides which setter runs, with date taking priority
/// over net income, which takes priority over revenue. A field-set with
/// no complete pair changes nothing and returns `None`.
pub fn apply_submission(
    criteria: &mut FilterCriteria,
    submitted: &SubmittedFieldSet,
) -> Option<ActiveFilter> {
    if let (Some(start), Some(end)) = (
        parse_year(&submitted.starting_year),
        parse_year(&submitted.ending_year),
    ) {
        criteria.set_date_range(start, end);
        return Some(ActiveFilter::Date);
    }

    if let (Some(min), Some(max)) = (
        parse_amount(&submitted.net_income_min),
        parse_amount(&submitted.net_income_max),
    ) {
        criteria.set_net_income_range(min, max);
        return Some(ActiveFilter::NetIncome);
    }

    if let (Some(min), Some(max)) = (
        parse_amount(&submitted.revenue_min),
        parse_amount(&submitted.revenue_max),
    ) {
        criteria.set_revenue_range(min, max);
        return Some(ActiveFilter::Revenue);
    }

    None
}

fn parse_amount(field: &Option<String>) -> Option<f64> {
    field.as_deref().and_then(numeric::parse_amount)
}

fn parse_year(field: &Option<String>) -> Option<i32> {
    parse_amount(field).map(|v| v as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AmountRange, YearRange};

    #[test]
    fn submit_normalizes_and_drops_invalid_fields() {
        let form = FilterForm {
            revenue_min: "1,000,000".to_string(),
            revenue_max: "5e9".to_string(),
            net_income_min: "12a".to_string(),
            ..FilterForm::default()
        };
        let submitted = form.submitted_fields();

        assert_eq!(submitted.revenue_min.as_deref(), Some("1000000"));
        assert_eq!(submitted.revenue_max.as_deref(), Some("5e9"));
        assert_eq!(submitted.net_income_min, None);
        assert_eq!(submitted.starting_year, None);
    }

    #[test]
    fn date_fields_take_priority_over_revenue() {
        let mut criteria = FilterCriteria::default();
        let submitted = SubmittedFieldSet {
            starting_year: Some("2021".to_string()),
            ending_year: Some("2023".to_string()),
            revenue_min: Some("100".to_string()),
            revenue_max: Some("200".to_string()),
            ..SubmittedFieldSet::default()
        };

        let applied = apply_submission(&mut criteria, &submitted);

        assert_eq!(applied, Some(ActiveFilter::Date));
        assert_eq!(criteria.date, YearRange { start: 2021, end: 2023 });
        assert_eq!(criteria.revenue, AmountRange::UNRESTRICTED);
    }

    #[test]
    fn net_income_takes_priority_over_revenue() {
        let mut criteria = FilterCriteria::default();
        let submitted = SubmittedFieldSet {
            net_income_min: Some("10".to_string()),
            net_income_max: Some("20".to_string()),
            revenue_min: Some("100".to_string()),
            revenue_max: Some("200".to_string()),
            ..SubmittedFieldSet::default()
        };

        let applied = apply_submission(&mut criteria, &submitted);

        assert_eq!(applied, Some(ActiveFilter::NetIncome));
        assert_eq!(criteria.net_income, AmountRange { min: 10.0, max: 20.0 });
        assert_eq!(criteria.revenue, AmountRange::UNRESTRICTED);
    }

    #[test]
    fn net_income_submission_resets_other_ranges() {
        let mut criteria = FilterCriteria::default();
        criteria.set_date_range(2021, 2022);

        let submitted = SubmittedFieldSet {
            net_income_min: Some("1000000".to_string()),
            net_income_max: Some("5000000".to_string()),
            ..SubmittedFieldSet::default()
        };
        apply_submission(&mut criteria, &submitted);

        assert_eq!(
            criteria.net_income,
            AmountRange { min: 1_000_000.0, max: 5_000_000.0 }
        );
        assert_eq!(criteria.date, YearRange::UNRESTRICTED);
        assert_eq!(criteria.revenue, AmountRange::UNRESTRICTED);
    }

    #[test]
    fn incomplete_pair_changes_nothing() {
        let mut criteria = FilterCriteria::default();
        let before = criteria.clone();
        let submitted = SubmittedFieldSet {
            revenue_min: Some("100".to_string()),
            ..SubmittedFieldSet::default()
        };

        assert_eq!(apply_submission(&mut criteria, &submitted), None);
        assert_eq!(criteria, before);
    }

    #[test]
    fn incomplete_date_pair_falls_through_to_complete_category() {
        let mut criteria = FilterCriteria::default();
        let submitted = SubmittedFieldSet {
            starting_year: Some("2021".to_string()),
            revenue_min: Some("100".to_string()),
            revenue_max: Some("200".to_string()),
            ..SubmittedFieldSet::default()
        };

        let applied = apply_submission(&mut criteria, &submitted);
        assert_eq!(applied, Some(ActiveFilter::Revenue));
        assert_eq!(criteria.revenue, AmountRange { min: 100.0, max: 200.0 });
    }

    #[test]
    fn focused_field_follows_category_and_slot() {
        let mut form = FilterForm::default();
        form.focused_field_mut().push_str("2020");
        form.focus = FieldSlot::Upper;
        form.focused_field_mut().push_str("2024");
        form.category = FilterCategory::Revenue;
        form.focus = FieldSlot::Lower;
        form.focused_field_mut().push_str("500");

        assert_eq!(form.starting_year, "2020");
        assert_eq!(form.ending_year, "2024");
        assert_eq!(form.revenue_min, "500");
    }
}

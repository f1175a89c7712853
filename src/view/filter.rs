//! Range filtering over the raw record set.

use crate::domain::{FilterCriteria, IncomeRecord};

/// Apply all three range predicates conjunctively.
///
/// A record passes iff its fiscal year lies in the date range, its
/// revenue in the revenue range, and its net income in the net-income
/// range. A record whose date has no parseable 4-digit year fails the
/// date test (the predicate stays total; nothing panics).
pub fn filter_records(records: &[IncomeRecord], criteria: &FilterCriteria) -> Vec<IncomeRecord> {
    records
        .iter()
        .filter(|r| passes(r, criteria))
        .cloned()
        .collect()
}

fn passes(record: &IncomeRecord, criteria: &FilterCriteria) -> bool {
    let within_date = match record.year() {
        Some(year) => criteria.date.contains(year),
        None => false,
    };

    within_date
        && criteria.revenue.contains(record.revenue)
        && criteria.net_income.contains(record.net_income)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AmountRange;

    fn record(date: &str, revenue: f64, net_income: f64) -> IncomeRecord {
        IncomeRecord {
            date: date.to_string(),
            revenue,
            net_income,
            gross_profit: 0.0,
            eps: 0.0,
            operating_income: 0.0,
        }
    }

    #[test]
    fn unrestricted_criteria_pass_everything() {
        let records = vec![
            record("2020-09-30", 10.0, 5.0),
            record("2025-09-30", 1e12, 1e11),
        ];
        let out = filter_records(&records, &FilterCriteria::default());
        assert_eq!(out, records);
    }

    #[test]
    fn each_dimension_fails_independently() {
        let criteria = FilterCriteria::default();
        let r = record("2019-09-30", 10.0, 5.0);
        assert!(filter_records(&[r], &criteria).is_empty(), "year below range");

        let mut criteria = FilterCriteria::default();
        criteria.set_revenue_range(100.0, 200.0);
        let r = record("2021-09-30", 99.0, 5.0);
        assert!(filter_records(&[r], &criteria).is_empty(), "revenue below min");

        let mut criteria = FilterCriteria::default();
        criteria.set_net_income_range(100.0, 200.0);
        let r = record("2021-09-30", 150.0, 201.0);
        assert!(filter_records(&[r], &criteria).is_empty(), "net income above max");
    }

    #[test]
    fn revenue_band_selects_only_matching_record() {
        // Only the 2021 record has revenue within 60..200.
        let records = vec![
            record("2021-09-30", 100.0, 0.0),
            record("2022-09-30", 50.0, 0.0),
        ];
        let mut criteria = FilterCriteria::default();
        criteria.set_revenue_range(60.0, 200.0);

        let out = filter_records(&records, &criteria);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].date, "2021-09-30");
    }

    #[test]
    fn bounds_are_inclusive() {
        let mut criteria = FilterCriteria::default();
        criteria.set_revenue_range(100.0, 200.0);

        let out = filter_records(
            &[record("2021-01-01", 100.0, 0.0), record("2022-01-01", 200.0, 0.0)],
            &criteria,
        );
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn unparseable_year_fails_the_date_test() {
        let records = vec![record("n/a", 10.0, 5.0), record("2021-09-30", 10.0, 5.0)];
        let out = filter_records(&records, &FilterCriteria::default());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].date, "2021-09-30");
    }

    #[test]
    fn inverted_range_yields_empty_view() {
        let mut criteria = FilterCriteria::default();
        criteria.revenue = AmountRange { min: 200.0, max: 100.0 };
        let out = filter_records(&[record("2021-09-30", 150.0, 0.0)], &criteria);
        assert!(out.is_empty());
    }

    #[test]
    fn filtering_is_idempotent_given_same_inputs() {
        let records = vec![
            record("2021-09-30", 100.0, 0.0),
            record("2022-09-30", 50.0, 0.0),
        ];
        let mut criteria = FilterCriteria::default();
        criteria.set_revenue_range(60.0, 200.0);

        let once = filter_records(&records, &criteria);
        let twice = filter_records(&records, &criteria);
        assert_eq!(once, twice);
    }
}

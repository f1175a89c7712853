//! Financial Modeling Prep API integration for income statements.
//!
//! One outbound read-only request per fetch: the full statement series
//! for a single symbol. No retry, no concurrent requests; callers decide
//! whether a failure is fatal (CLI) or a status-line diagnostic (TUI).

use chrono::NaiveDate;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::domain::{IncomeRecord, Period};
use crate::error::AppError;

const BASE_URL: &str = "https://financialmodelingprep.com/api/v3/income-statement";

/// A fetched statement series plus fetch metadata.
#[derive(Debug, Clone)]
pub struct StatementSnapshot {
    pub symbol: String,
    pub period: Period,
    /// Local date the fetch completed (shown in report headers).
    pub as_of: NaiveDate,
    pub records: Vec<IncomeRecord>,
    /// API rows dropped during normalization (missing or non-finite numbers).
    pub rows_skipped: usize,
}

pub struct FmpClient {
    client: Client,
    api_key: String,
}

impl FmpClient {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let api_key = std::env::var("FMP_API_KEY")
            .map_err(|_| AppError::new(2, "Missing FMP_API_KEY in environment (.env)."))?;
        Ok(Self {
            client: Client::new(),
            api_key,
        })
    }

    /// Fetch the income-statement series for one symbol.
    pub fn fetch_income_statements(
        &self,
        symbol: &str,
        period: Period,
        limit: usize,
    ) -> Result<StatementSnapshot, AppError> {
        let url = format!("{BASE_URL}/{symbol}");
        let resp = self
            .client
            .get(&url)
            .query(&[
                ("period", period.as_str()),
                ("limit", &limit.to_string()),
                ("apikey", &self.api_key),
            ])
            .send()
            .map_err(|e| AppError::new(4, format!("FMP request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::new(
                4,
                format!("FMP request failed with status {}.", resp.status()),
            ));
        }

        let body: Vec<RawStatement> = resp
            .json()
            .map_err(|e| AppError::new(4, format!("Failed to parse FMP response: {e}")))?;

        let (records, rows_skipped) = normalize_rows(body);

        Ok(StatementSnapshot {
            symbol: symbol.to_uppercase(),
            period,
            as_of: chrono::Local::now().date_naive(),
            records,
            rows_skipped,
        })
    }
}

/// One raw API row. The endpoint returns many more fields than we use;
/// serde ignores the rest. Numbers are optional so that a single sparse
/// row skips cleanly instead of failing the whole payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawStatement {
    date: Option<String>,
    revenue: Option<f64>,
    net_income: Option<f64>,
    gross_profit: Option<f64>,
    eps: Option<f64>,
    operating_income: Option<f64>,
}

/// Keep rows with a date and a full, finite set of numeric fields;
/// count the rest.
fn normalize_rows(raw: Vec<RawStatement>) -> (Vec<IncomeRecord>, usize) {
    let mut records = Vec::with_capacity(raw.len());
    let mut skipped = 0usize;

    for row in raw {
        let parsed = (|| {
            Some(IncomeRecord {
                date: row.date?,
                revenue: finite(row.revenue)?,
                net_income: finite(row.net_income)?,
                gross_profit: finite(row.gross_profit)?,
                eps: finite(row.eps)?,
                operating_income: finite(row.operating_income)?,
            })
        })();

        match parsed {
            Some(record) => records.push(record),
            None => skipped += 1,
        }
    }

    (records, skipped)
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_payload_deserializes_and_normalizes() {
        // Trimmed from a real response; the endpoint carries dozens of
        // extra fields which must be ignored.
        let payload = r#"[
            {
                "date": "2024-09-28",
                "symbol": "AAPL",
                "reportedCurrency": "USD",
                "fillingDate": "2024-11-01",
                "revenue": 391035000000,
                "costOfRevenue": 210352000000,
                "grossProfit": 180683000000,
                "operatingIncome": 123216000000,
                "netIncome": 93736000000,
                "eps": 6.11
            },
            {
                "date": "2023-09-30",
                "revenue": 383285000000,
                "grossProfit": 169148000000,
                "operatingIncome": 114301000000,
                "netIncome": 96995000000,
                "eps": 6.16
            }
        ]"#;

        let raw: Vec<RawStatement> = serde_json::from_str(payload).unwrap();
        let (records, skipped) = normalize_rows(raw);

        assert_eq!(skipped, 0);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].date, "2024-09-28");
        assert_eq!(records[0].revenue, 391_035_000_000.0);
        assert_eq!(records[1].net_income, 96_995_000_000.0);
        assert_eq!(records[1].eps, 6.16);
    }

    #[test]
    fn sparse_rows_are_skipped_and_counted() {
        let payload = r#"[
            { "date": "2024-09-28", "revenue": 1.0, "grossProfit": 1.0,
              "operatingIncome": 1.0, "netIncome": 1.0, "eps": 1.0 },
            { "date": "2023-09-30", "revenue": 2.0 },
            { "revenue": 3.0, "grossProfit": 3.0, "operatingIncome": 3.0,
              "netIncome": 3.0, "eps": 3.0 }
        ]"#;

        let raw: Vec<RawStatement> = serde_json::from_str(payload).unwrap();
        let (records, skipped) = normalize_rows(raw);

        assert_eq!(records.len(), 1);
        assert_eq!(skipped, 2);
    }
}

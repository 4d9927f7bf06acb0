//! CSV → `YieldCurveTable`.
//!
//! Expected layout (Treasury daily par yield curve):
//!
//! ```text
//! Date,1 Mo,2 Mo,3 Mo,...,30 Yr
//! 12/30/2022,4.12,4.41,4.42,...,3.97
//! ```
//!
//! One `Date` column (any case, any position); every other column is a
//! tenor. Blank cells and `N/A` are missing values. The archive file writes
//! two-digit years (`12/30/22`), the per-year files four.

use chrono::{Datelike, NaiveDate};

use crate::config::TreasuryConfig;
use crate::error::{Result, TreasuryError};
use crate::table::{CurveRow, YieldCurveTable};

pub fn parse_curve_csv(text: &str, config: &TreasuryConfig) -> Result<YieldCurveTable> {
    let text = text.trim_start_matches('\u{feff}');
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| TreasuryError::Parse(format!("unreadable header: {e}")))?
        .clone();
    if headers.is_empty() || headers.iter().all(str::is_empty) {
        return Err(TreasuryError::Parse("empty CSV".into()));
    }

    let date_idx = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case("date"))
        .ok_or_else(|| TreasuryError::Parse("missing Date column".into()))?;

    let columns: Vec<String> = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != date_idx)
        .map(|(_, h)| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for (n, record) in reader.records().enumerate() {
        // header is line 1
        let line = n + 2;
        let record = record.map_err(|e| TreasuryError::Parse(format!("line {line}: {e}")))?;

        let raw_date = record.get(date_idx).unwrap_or_default();
        let date = parse_date(raw_date, &config.csv_date_formats).ok_or_else(|| {
            TreasuryError::Parse(format!("line {line}: invalid date '{raw_date}'"))
        })?;
        // a four-digit format happily reads `22` as year 22
        if date.year() < config.baseline_year - 100 {
            return Err(TreasuryError::Parse(format!(
                "line {line}: implausible year in date '{raw_date}'"
            )));
        }

        let values = record
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != date_idx)
            .map(|(_, cell)| parse_value(cell, line))
            .collect::<Result<Vec<_>>>()?;

        rows.push(CurveRow { date, values });
    }

    tracing::debug!(rows = rows.len(), columns = columns.len(), "parsed curve CSV");
    Ok(YieldCurveTable::from_rows(columns, rows))
}

/// Parse a date with the first matching format.
pub fn parse_date(raw: &str, formats: &[String]) -> Option<NaiveDate> {
    formats
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

fn parse_value(cell: &str, line: usize) -> Result<Option<f64>> {
    if cell.is_empty() || cell.eq_ignore_ascii_case("n/a") {
        return Ok(None);
    }
    match cell.parse::<f64>() {
        Ok(y) if y.is_finite() => Ok(Some(y)),
        _ => Err(TreasuryError::Parse(format!(
            "line {line}: invalid yield '{cell}'"
        ))),
    }
}

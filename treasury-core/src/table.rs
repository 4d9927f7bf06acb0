//! Date-indexed yield curve table.
//!
//! Each row is one observation date; each column is a named tenor
//! (e.g. `"10 Yr"`) holding a yield in percent, or nothing when the
//! source left the cell blank. Dates are unique within a table. Row order
//! follows the source and carries no meaning.

use chrono::NaiveDate;
use std::collections::HashSet;

/// A single observation: the yields for every table column on one date.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveRow {
    pub date: NaiveDate,
    /// Aligned with [`YieldCurveTable::columns`].
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct YieldCurveTable {
    columns: Vec<String>,
    rows: Vec<CurveRow>,
}

impl YieldCurveTable {
    /// Build a table, keeping the first row seen for any repeated date.
    ///
    /// Rows shorter than `columns` are padded with missing values; longer
    /// rows are truncated.
    pub fn from_rows(columns: Vec<String>, rows: Vec<CurveRow>) -> Self {
        let width = columns.len();
        let mut seen = HashSet::with_capacity(rows.len());
        let mut kept = Vec::with_capacity(rows.len());
        let mut dropped = 0usize;

        for mut row in rows {
            if !seen.insert(row.date) {
                dropped += 1;
                continue;
            }
            row.values.resize(width, None);
            kept.push(row);
        }

        if dropped > 0 {
            tracing::warn!(dropped, "dropped rows with duplicate dates");
        }

        Self {
            columns,
            rows: kept,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[CurveRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Yield for `tenor` in `row`, if the column exists and the cell is filled.
    pub fn value(&self, row: &CurveRow, tenor: &str) -> Option<f64> {
        self.column_index(tenor)
            .and_then(|i| row.values.get(i).copied().flatten())
    }

    /// True when every listed tenor has a value in `row`.
    ///
    /// A tenor the table has no column for counts as missing.
    pub fn is_complete(&self, row: &CurveRow, tenors: &[String]) -> bool {
        tenors.iter().all(|t| self.value(row, t).is_some())
    }

    /// Append `other` below `self`.
    ///
    /// The column set is the union of both tables (ours first, then any new
    /// columns of `other` in their order). Cells a table had no column for
    /// become missing. On a repeated date the row from `self` wins.
    pub fn concat(self, other: YieldCurveTable) -> YieldCurveTable {
        let mut columns = self.columns;
        for c in &other.columns {
            if !columns.contains(c) {
                columns.push(c.clone());
            }
        }

        let remap: Vec<usize> = other
            .columns
            .iter()
            .map(|c| columns.iter().position(|x| x == c).unwrap_or_default())
            .collect();

        let mut rows = self.rows;
        rows.reserve(other.rows.len());
        for row in other.rows {
            let mut values = vec![None; columns.len()];
            for (src, &dst) in remap.iter().enumerate() {
                values[dst] = row.values.get(src).copied().flatten();
            }
            rows.push(CurveRow {
                date: row.date,
                values,
            });
        }

        Self::from_rows(columns, rows)
    }

    /// Earliest and latest observation dates.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.rows.iter().map(|r| r.date).min()?;
        let max = self.rows.iter().map(|r| r.date).max()?;
        Some((min, max))
    }
}

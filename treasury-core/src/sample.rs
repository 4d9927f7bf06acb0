//! Bucketed samples: one representative observation per year or month.

use chrono::{Datelike, NaiveDate};
use std::fmt;

/// Grouping key for sampled rows.
pub trait BucketKey: Copy + Ord + fmt::Debug + fmt::Display {
    /// Column header used when the key is exported.
    const LABEL: &'static str;

    /// Bucket a date falls into.
    fn of(date: NaiveDate) -> Self;
}

/// Calendar year buckets.
impl BucketKey for i32 {
    const LABEL: &'static str = "Year";

    fn of(date: NaiveDate) -> Self {
        date.year()
    }
}

/// Calendar month (1 = January). Displays as a three-letter abbreviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthOfYear(u32);

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

impl MonthOfYear {
    /// `None` unless `month` is in `1..=12`.
    pub fn new(month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self(month))
    }

    pub fn number(self) -> u32 {
        self.0
    }

    pub fn abbreviation(self) -> &'static str {
        MONTH_ABBREVIATIONS[(self.0 - 1) as usize]
    }
}

impl fmt::Display for MonthOfYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

impl BucketKey for MonthOfYear {
    const LABEL: &'static str = "Month";

    fn of(date: NaiveDate) -> Self {
        Self(date.month())
    }
}

/// A sampled observation together with its bucket key.
#[derive(Debug, Clone, PartialEq)]
pub struct SampledRow<K> {
    pub key: K,
    /// Date of the observation picked for this bucket.
    pub date: NaiveDate,
    /// Aligned with [`Sample::columns`].
    pub values: Vec<Option<f64>>,
}

/// One row per bucket key, keys unique.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample<K> {
    pub columns: Vec<String>,
    pub rows: Vec<SampledRow<K>>,
}

impl<K: BucketKey> Sample<K> {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn keys(&self) -> Vec<K> {
        self.rows.iter().map(|r| r.key).collect()
    }

    /// Smallest and largest key present.
    pub fn key_range(&self) -> Option<(K, K)> {
        let min = self.rows.iter().map(|r| r.key).min()?;
        let max = self.rows.iter().map(|r| r.key).max()?;
        Some((min, max))
    }

    /// Most recent observation date among the sampled rows.
    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.rows.iter().map(|r| r.date).max()
    }

    pub fn value(&self, row: &SampledRow<K>, tenor: &str) -> Option<f64> {
        self.columns
            .iter()
            .position(|c| c == tenor)
            .and_then(|i| row.values.get(i).copied().flatten())
    }
}

//! One analysis run: pick the mode, fetch, sample, filter.
//!
//! Mode selection:
//! - `start == end` (both given) → month mode: fetch that single year and
//!   keep one observation per month. No range filtering is applied.
//! - otherwise → year mode: fetch the full history, keep one observation
//!   per year near the anchor date's anniversary, then range-filter.

use chrono::NaiveDate;
use treasury_core::data::{CsvFetcher, TreasurySource};
use treasury_core::{
    filter_sample, sample_by_month, sample_by_year, BucketKey, FilterBounds, MonthOfYear, Result,
    Sample, SeedSource, TreasuryConfig,
};

/// Caller choices for a run (mirrors the CLI flags).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    /// Anchor date for year sampling. Defaults to `today`.
    pub date: Option<NaiveDate>,
    /// Keep rows with missing tenors.
    pub allow_missing: bool,
    pub start: Option<i32>,
    pub end: Option<i32>,
    pub num_years: i64,
}

impl Default for AnalysisRequest {
    fn default() -> Self {
        Self {
            date: None,
            allow_missing: false,
            start: None,
            end: None,
            num_years: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Yearly,
    Monthly { year: i32 },
}

impl AnalysisRequest {
    pub fn mode(&self) -> Mode {
        match (self.start, self.end) {
            (Some(start), Some(end)) if start == end => Mode::Monthly { year: start },
            _ => Mode::Yearly,
        }
    }
}

/// Full sample plus the subset selected by the range filter.
#[derive(Debug, Clone, PartialEq)]
pub struct Curves<K> {
    pub sample: Sample<K>,
    pub filtered: Sample<K>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Analysis {
    Yearly(Curves<i32>),
    Monthly(Curves<MonthOfYear>),
}

/// Run the pipeline for `request` as of `today`.
///
/// `seeds` drives the per-bucket random pick.
pub fn run_analysis<F: CsvFetcher + ?Sized>(
    fetcher: &F,
    config: &TreasuryConfig,
    request: &AnalysisRequest,
    today: NaiveDate,
    seeds: &SeedSource,
) -> Result<Analysis> {
    let source = TreasurySource::new(fetcher, config);
    let anchor = request.date.unwrap_or(today);

    match request.mode() {
        Mode::Yearly => {
            let table = source.fetch_all(today)?;
            let mut rng = seeds.rng_for("year", anchor);
            let sample = sample_by_year(&table, anchor, request.allow_missing, config, &mut rng);
            let bounds = FilterBounds::new(request.num_years, request.start, request.end);
            let filtered = filter_sample(&sample, &bounds, config.max_years)?.into_owned();
            log_curves("year", &filtered);
            Ok(Analysis::Yearly(Curves { sample, filtered }))
        }
        Mode::Monthly { year } => {
            let table = source.fetch_year(year)?;
            let mut rng = seeds.rng_for("month", anchor);
            let sample = sample_by_month(&table, request.allow_missing, config, &mut rng);
            // equal year bounds mean "this year's months", never a key range
            let filtered = sample.clone();
            log_curves("month", &filtered);
            Ok(Analysis::Monthly(Curves { sample, filtered }))
        }
    }
}

fn log_curves<K: BucketKey>(mode: &str, curves: &Sample<K>) {
    match curves.key_range() {
        Some((first, last)) => {
            tracing::info!(mode, %first, %last, rows = curves.len(), "selected yield curves")
        }
        None => tracing::warn!(mode, "no yield curves matched the request"),
    }
}

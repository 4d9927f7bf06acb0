//! home.treasury.gov par yield curve source.
//!
//! History is split across two CSVs: a multi-decade archive ending the
//! year before the current one, and a per-year daily file. Both are
//! fetched sequentially and stacked into one table.

use chrono::{Datelike, NaiveDate};

use super::parse::parse_curve_csv;
use super::provider::CsvFetcher;
use crate::config::TreasuryConfig;
use crate::error::Result;
use crate::table::YieldCurveTable;

pub struct TreasurySource<'a, F: CsvFetcher + ?Sized> {
    fetcher: &'a F,
    config: &'a TreasuryConfig,
}

impl<'a, F: CsvFetcher + ?Sized> TreasurySource<'a, F> {
    pub fn new(fetcher: &'a F, config: &'a TreasuryConfig) -> Self {
        Self { fetcher, config }
    }

    /// Archive CSV covering `baseline_year` through the year before `today`.
    pub fn archive_url(&self, today: NaiveDate) -> String {
        self.config
            .archive_url
            .replace("{first}", &self.config.baseline_year.to_string())
            .replace("{last}", &(today.year() - 1).to_string())
    }

    /// Daily CSV for a single calendar year.
    pub fn year_url(&self, year: i32) -> String {
        self.config.year_url.replace("{year}", &year.to_string())
    }

    /// Everything available as of `today`: the archive plus the current year.
    ///
    /// Current-year rows come first; callers must not rely on row order.
    pub fn fetch_all(&self, today: NaiveDate) -> Result<YieldCurveTable> {
        let archive = self.fetch_table(&self.archive_url(today))?;
        let current = self.fetch_table(&self.year_url(today.year()))?;
        let all = current.concat(archive);
        tracing::info!(rows = all.len(), "loaded yield curve history");
        Ok(all)
    }

    pub fn fetch_year(&self, year: i32) -> Result<YieldCurveTable> {
        let table = self.fetch_table(&self.year_url(year))?;
        tracing::info!(year, rows = table.len(), "loaded yield curves for year");
        Ok(table)
    }

    fn fetch_table(&self, url: &str) -> Result<YieldCurveTable> {
        let body = self.fetcher.get(url)?;
        parse_curve_csv(&body, self.config)
    }
}

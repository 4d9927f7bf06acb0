//! Runtime configuration shared by every component.
//!
//! Loaded from an optional TOML file. Any key left out falls back to the
//! built-in default, so an empty file is a valid configuration.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::error::TreasuryError;

/// Tenors the sampler requires and the chart draws.
pub const DEFAULT_TENORS: [&str; 6] = ["1 Yr", "2 Yr", "5 Yr", "10 Yr", "20 Yr", "30 Yr"];

/// Upper bound on `window_years`.
pub const MAX_WINDOW_YEARS: u32 = 200;

const ARCHIVE_URL: &str =
    "https://home.treasury.gov/system/files/276/yield-curve-rates-{first}-{last}.csv";

const YEAR_URL: &str = "https://home.treasury.gov/resource-center/data-chart-center/\
interest-rates/daily-treasury-rates.csv/{year}/all?\
type=daily_treasury_yield_curve&field_tdr_date_value={year}&page&_format=csv";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreasuryConfig {
    /// chrono format of the anchor date (`--date`).
    pub date_format: String,
    /// chrono formats tried, in order, for the CSV `Date` column.
    pub csv_date_formats: Vec<String>,
    /// Duration columns a row must carry to be sampled without `--allowna`.
    pub tenors: Vec<String>,
    /// First year covered by the archive CSV.
    pub baseline_year: i32,
    /// Archive CSV template with `{first}` and `{last}` year placeholders.
    pub archive_url: String,
    /// Single-year CSV template with `{year}` placeholders.
    pub year_url: String,
    /// Number of annual steps in the sampling window.
    pub window_years: u32,
    /// Days before each anchor point that also fall in the window.
    pub window_slack_days: u32,
    /// Upper clamp for the number of buckets the range filter keeps.
    pub max_years: u32,
    /// Export directory. Unset means `exports/` next to the executable.
    pub export_dir: Option<PathBuf>,
    pub user_agent: String,
}

impl Default for TreasuryConfig {
    fn default() -> Self {
        Self {
            date_format: "%Y-%m-%d".into(),
            csv_date_formats: vec!["%m/%d/%y".into(), "%m/%d/%Y".into(), "%Y-%m-%d".into()],
            tenors: DEFAULT_TENORS.iter().map(|t| t.to_string()).collect(),
            baseline_year: 1990,
            archive_url: ARCHIVE_URL.into(),
            year_url: YEAR_URL.into(),
            window_years: 50,
            window_slack_days: 3,
            max_years: 10,
            export_dir: None,
            user_agent: concat!("treasury-curves/", env!("CARGO_PKG_VERSION")).into(),
        }
    }
}

impl TreasuryConfig {
    /// Load and validate a configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tenors.is_empty() {
            return Err(ConfigError::Invalid("tenors must not be empty".into()));
        }
        if self.csv_date_formats.is_empty() {
            return Err(ConfigError::Invalid(
                "csv_date_formats must not be empty".into(),
            ));
        }
        if self.window_years == 0 || self.window_years > MAX_WINDOW_YEARS {
            return Err(ConfigError::Invalid(format!(
                "window_years must be between 1 and {MAX_WINDOW_YEARS}"
            )));
        }
        if self.max_years == 0 {
            return Err(ConfigError::Invalid("max_years must be at least 1".into()));
        }
        Ok(())
    }

    /// Parse an anchor date given on the command line.
    pub fn parse_anchor(&self, raw: &str) -> Result<NaiveDate, TreasuryError> {
        NaiveDate::parse_from_str(raw, &self.date_format).map_err(|_| {
            TreasuryError::InvalidDate {
                value: raw.to_string(),
                format: self.date_format.clone(),
            }
        })
    }

    /// Resolve the export directory, defaulting to `exports/` beside the binary.
    pub fn resolve_export_dir(&self) -> std::io::Result<PathBuf> {
        if let Some(dir) = &self.export_dir {
            return Ok(dir.clone());
        }
        let exe = std::env::current_exe()?;
        let base = exe.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(base.join("exports"))
    }
}

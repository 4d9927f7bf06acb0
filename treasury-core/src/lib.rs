//! Treasury Core: yield curve tables, data source, sampling and filtering.
//!
//! This crate contains the analysis pipeline up to presentation:
//! - Date-indexed yield curve tables with tenor columns
//! - The home.treasury.gov CSV source (archive + single year)
//! - Year and month bucket sampling with an injectable RNG
//! - Range filtering with clamped row counts
//! - Configuration shared by every stage

pub mod config;
pub mod data;
pub mod error;
pub mod filter;
pub mod rng;
pub mod sample;
pub mod sampler;
pub mod table;

pub use config::{ConfigError, TreasuryConfig, DEFAULT_TENORS};
pub use error::{Result, TreasuryError};
pub use filter::{filter_sample, FilterBounds};
pub use rng::SeedSource;
pub use sample::{BucketKey, MonthOfYear, Sample, SampledRow};
pub use sampler::{anniversary_window, sample_by_month, sample_by_year};
pub use table::{CurveRow, YieldCurveTable};

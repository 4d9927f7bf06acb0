//! Data source adapter: fetch Treasury CSVs and parse them into tables.

pub mod parse;
pub mod provider;
pub mod treasury;

pub use parse::{parse_curve_csv, parse_date};
pub use provider::{CsvFetcher, HttpFetcher};
pub use treasury::TreasurySource;

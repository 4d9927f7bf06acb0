//! Structured error types shared by every stage of the pipeline.
//!
//! Nothing in the library catches or retries these. They surface to the
//! caller unchanged and the CLI turns them into a non-zero exit status.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TreasuryError {
    /// Network failure or a non-success HTTP status.
    #[error("request failed for {url}: {reason}")]
    Request { url: String, reason: String },

    /// The response body is not a usable yield curve CSV.
    #[error("failed to parse CSV: {0}")]
    Parse(String),

    /// Filter bounds with `start > end`.
    #[error("start ({start}) must not be later than end ({end})")]
    Range { start: String, end: String },

    #[error("unsupported export format '{0}', use csv or xlsx")]
    UnsupportedFormat(String),

    #[error("invalid date '{value}', expected format {format}")]
    InvalidDate { value: String, format: String },

    #[error("export failed: {0}")]
    Export(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TreasuryError>;

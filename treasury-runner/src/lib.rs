//! Treasury Runner: analysis orchestration and file export.
//!
//! This crate builds on `treasury-core` to provide:
//! - Mode selection (year vs. month sampling) and the fetch → sample → filter run
//! - CSV and XLSX export of sampled curves

pub mod analysis;
pub mod export;

pub use analysis::{run_analysis, Analysis, AnalysisRequest, Curves, Mode};
pub use export::{export, export_csv, export_file_name, ExportFormat};

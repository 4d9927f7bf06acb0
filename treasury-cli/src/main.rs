//! Treasury CLI: query, plot and export US Treasury par yield curves.
//!
//! Default mode samples one curve per year near `--date` (today if unset)
//! and keeps the latest `--years` of them, bounded by `--start`/`--end`.
//! Passing the same year to `--start` and `--end` samples one curve per
//! month of that year instead.
//!
//! Output:
//! - `--plot`: line chart of the selected curves in the terminal
//! - `--output csv|xlsx`: write the full sample to `exports/`
//! - neither: print the selected curves as a table

mod chart;
mod theme;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use treasury_core::data::HttpFetcher;
use treasury_core::{BucketKey, Sample, SeedSource, TreasuryConfig};
use treasury_runner::{export, run_analysis, Analysis, AnalysisRequest, Curves, ExportFormat};

#[derive(Parser)]
#[command(
    name = "treasury",
    version,
    about = "treasury - query and analyze US Treasury yield data"
)]
struct Cli {
    /// Allow missing values in the required tenors.
    #[arg(short = 'a', long)]
    allowna: bool,

    /// Year to start analysis.
    #[arg(short, long)]
    start: Option<i32>,

    /// Year to end analysis.
    #[arg(short, long)]
    end: Option<i32>,

    /// Date in YYYY-MM-DD to analyze. Defaults to today.
    #[arg(short, long)]
    date: Option<String>,

    /// Number of years before end to analyze (clamped to 1..=10).
    #[arg(short, long, default_value_t = 10, allow_negative_numbers = true)]
    years: i64,

    /// Plot yield curves.
    #[arg(short, long)]
    plot: bool,

    /// File extension to save data (csv or xlsx), leave empty to avoid saving a file.
    #[arg(short, long)]
    output: Option<String>,

    /// Seed for the per-year/per-month random pick. Random if unset.
    #[arg(long)]
    seed: Option<u64>,

    /// Path to a TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => TreasuryConfig::from_file(path)?,
        None => TreasuryConfig::default(),
    };

    // fail on a bad extension before any network traffic
    let output = output_format(cli.output.as_deref())?;

    let today = chrono::Local::now().date_naive();
    let request = AnalysisRequest {
        date: cli
            .date
            .as_deref()
            .map(|raw| config.parse_anchor(raw))
            .transpose()?,
        allow_missing: cli.allowna,
        start: cli.start,
        end: cli.end,
        num_years: cli.years,
    };

    let seeds = cli
        .seed
        .map(SeedSource::new)
        .unwrap_or_else(SeedSource::from_entropy);
    info!(seed = seeds.master_seed(), "sampling seed (pass --seed to replay)");

    let fetcher = HttpFetcher::new(&config.user_agent)?;
    let analysis = run_analysis(&fetcher, &config, &request, today, &seeds)?;

    let present = Presentation {
        plot: cli.plot,
        output,
        config: &config,
        today,
    };
    match analysis {
        Analysis::Yearly(curves) => present.run(&curves),
        Analysis::Monthly(curves) => present.run(&curves),
    }
}

fn output_format(raw: Option<&str>) -> Result<Option<ExportFormat>> {
    Ok(raw.map(str::parse::<ExportFormat>).transpose()?)
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

struct Presentation<'a> {
    plot: bool,
    output: Option<ExportFormat>,
    config: &'a TreasuryConfig,
    today: chrono::NaiveDate,
}

impl Presentation<'_> {
    fn run<K: BucketKey>(&self, curves: &Curves<K>) -> Result<()> {
        if self.plot {
            chart::show(&curves.filtered, &self.config.tenors)?;
        }

        if let Some(format) = self.output {
            let dir = self
                .config
                .resolve_export_dir()
                .context("failed to locate export directory")?;
            let path = export(&curves.sample, format.extension(), &dir, self.today)?;
            println!("Exported to: {}", path.display());
        }

        if !self.plot && self.output.is_none() {
            print_curves(&curves.filtered, &self.config.tenors);
        }
        Ok(())
    }
}

fn print_curves<K: BucketKey>(sample: &Sample<K>, tenors: &[String]) {
    if sample.is_empty() {
        println!("No yield curves matched the request.");
        return;
    }

    print!("{:<6} {:<10}", K::LABEL, "Date");
    for t in tenors {
        print!(" {t:>7}");
    }
    println!();
    println!("{}", "-".repeat(17 + 8 * tenors.len()));

    for row in &sample.rows {
        print!("{:<6} {:<10}", row.key.to_string(), row.date.to_string());
        for t in tenors {
            match sample.value(row, t) {
                Some(y) => print!(" {y:>7.2}"),
                None => print!(" {:>7}", "-"),
            }
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use treasury_core::TreasuryError;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn short_flags_match_long_ones() {
        let cli = Cli::parse_from([
            "treasury", "-a", "-s", "2000", "-e", "2010", "-d", "2010-06-30", "-y", "5", "-p",
            "-o", "xlsx",
        ]);
        assert!(cli.allowna);
        assert_eq!(cli.start, Some(2000));
        assert_eq!(cli.end, Some(2010));
        assert_eq!(cli.date.as_deref(), Some("2010-06-30"));
        assert_eq!(cli.years, 5);
        assert!(cli.plot);
        assert_eq!(cli.output.as_deref(), Some("xlsx"));
    }

    #[test]
    fn defaults() {
        let cli = Cli::parse_from(["treasury"]);
        assert!(!cli.allowna);
        assert!(!cli.plot);
        assert_eq!(cli.years, 10);
        assert!(cli.start.is_none() && cli.end.is_none() && cli.output.is_none());
    }

    #[test]
    fn output_format_is_checked_up_front() {
        assert_eq!(output_format(None).unwrap(), None);
        assert_eq!(output_format(Some("csv")).unwrap(), Some(ExportFormat::Csv));
        assert_eq!(output_format(Some("xlsx")).unwrap(), Some(ExportFormat::Xlsx));

        let err = output_format(Some("json")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TreasuryError>(),
            Some(TreasuryError::UnsupportedFormat(f)) if f == "json"
        ));
        assert!(output_format(Some("CSV")).is_err());
    }

    #[test]
    fn negative_years_are_accepted() {
        let cli = Cli::parse_from(["treasury", "--years", "-3"]);
        assert_eq!(cli.years, -3);
    }
}

//! Export of sampled curves to CSV or XLSX.
//!
//! Files land in a single export directory, named after the day the export
//! ran (not the data's date): `yield_curve_<YYYYMMDD>.<ext>`. A second
//! export on the same day overwrites the first.
//!
//! Layout: key column (`Year` / `Month`), `Date`, then one column per tenor.
//! Missing yields are left blank.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveDate;
use rust_xlsxwriter::Workbook;
use treasury_core::{BucketKey, Result, Sample, TreasuryError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = TreasuryError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "csv" => Ok(ExportFormat::Csv),
            "xlsx" => Ok(ExportFormat::Xlsx),
            other => Err(TreasuryError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

pub fn export_file_name(format: ExportFormat, today: NaiveDate) -> String {
    format!("yield_curve_{}.{}", today.format("%Y%m%d"), format.extension())
}

/// Write `sample` to `dir` in the named format and return the file path.
///
/// The format is checked before anything touches the filesystem, so an
/// unsupported extension leaves no directory or file behind.
pub fn export<K: BucketKey>(
    sample: &Sample<K>,
    format: &str,
    dir: &Path,
    today: NaiveDate,
) -> Result<PathBuf> {
    let format: ExportFormat = format.parse()?;

    std::fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(format, today));

    match format {
        ExportFormat::Csv => std::fs::write(&path, export_csv(sample)?)?,
        ExportFormat::Xlsx => write_xlsx(sample, &path)?,
    }

    tracing::info!(path = %path.display(), rows = sample.len(), "exported yield curves");
    Ok(path)
}

/// Render a sample as CSV text.
pub fn export_csv<K: BucketKey>(sample: &Sample<K>) -> Result<String> {
    let csv_error = |e: csv::Error| TreasuryError::Export(e.to_string());
    let mut wtr = csv::Writer::from_writer(vec![]);

    let mut header = vec![K::LABEL, "Date"];
    header.extend(sample.columns.iter().map(String::as_str));
    wtr.write_record(&header).map_err(csv_error)?;

    for row in &sample.rows {
        let mut record = vec![row.key.to_string(), row.date.to_string()];
        record.extend(
            row.values
                .iter()
                .map(|v| v.map(|y| y.to_string()).unwrap_or_default()),
        );
        wtr.write_record(&record).map_err(csv_error)?;
    }

    let data = wtr
        .into_inner()
        .map_err(|e| TreasuryError::Export(format!("failed to flush CSV writer: {e}")))?;
    String::from_utf8(data).map_err(|e| TreasuryError::Export(e.to_string()))
}

fn write_xlsx<K: BucketKey>(sample: &Sample<K>, path: &Path) -> Result<()> {
    let xlsx_error = |e: rust_xlsxwriter::XlsxError| TreasuryError::Export(e.to_string());
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Yield Curves").map_err(xlsx_error)?;

    sheet.write_string(0, 0, K::LABEL).map_err(xlsx_error)?;
    sheet.write_string(0, 1, "Date").map_err(xlsx_error)?;
    for (col, name) in (2u16..).zip(&sample.columns) {
        sheet.write_string(0, col, name).map_err(xlsx_error)?;
    }

    for (row_idx, row) in (1u32..).zip(&sample.rows) {
        sheet
            .write_string(row_idx, 0, row.key.to_string())
            .map_err(xlsx_error)?;
        sheet
            .write_string(row_idx, 1, row.date.to_string())
            .map_err(xlsx_error)?;
        for (col, value) in (2u16..).zip(&row.values) {
            if let Some(y) = value {
                sheet.write_number(row_idx, col, *y).map_err(xlsx_error)?;
            }
        }
    }

    workbook.save(path).map_err(xlsx_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use treasury_core::{MonthOfYear, SampledRow};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn yearly() -> Sample<i32> {
        Sample {
            columns: vec!["1 Yr".into(), "10 Yr".into()],
            rows: vec![
                SampledRow { key: 2019, date: d(2019, 2, 15), values: vec![Some(2.5), Some(2.66)] },
                SampledRow { key: 2020, date: d(2020, 2, 14), values: vec![None, Some(1.59)] },
            ],
        }
    }

    #[test]
    fn parses_supported_formats() {
        assert_eq!("csv".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("xlsx".parse::<ExportFormat>().unwrap(), ExportFormat::Xlsx);
    }

    #[test]
    fn rejects_other_formats() {
        for bad in ["json", "CSV", "", "xls"] {
            let err = bad.parse::<ExportFormat>().unwrap_err();
            assert!(matches!(err, TreasuryError::UnsupportedFormat(_)), "{bad}");
        }
    }

    #[test]
    fn file_name_uses_export_day() {
        assert_eq!(
            export_file_name(ExportFormat::Xlsx, d(2024, 3, 7)),
            "yield_curve_20240307.xlsx"
        );
    }

    #[test]
    fn csv_layout() {
        let csv = export_csv(&yearly()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Year,Date,1 Yr,10 Yr");
        assert_eq!(lines[1], "2019,2019-02-15,2.5,2.66");
        assert_eq!(lines[2], "2020,2020-02-14,,1.59");
    }

    #[test]
    fn month_csv_uses_abbreviations() {
        let sample = Sample {
            columns: vec!["2 Yr".into()],
            rows: vec![SampledRow {
                key: MonthOfYear::new(4).unwrap(),
                date: d(2021, 4, 9),
                values: vec![Some(0.16)],
            }],
        };
        let csv = export_csv(&sample).unwrap();
        assert_eq!(csv, "Month,Date,2 Yr\nApr,2021-04-09,0.16\n");
    }
}

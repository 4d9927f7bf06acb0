//! Export writes files under the export directory and nowhere else.

use chrono::NaiveDate;
use treasury_core::{Sample, SampledRow, TreasuryError};
use treasury_runner::export;

fn sample() -> Sample<i32> {
    Sample {
        columns: vec!["2 Yr".into(), "10 Yr".into()],
        rows: (2015..=2020)
            .map(|y| SampledRow {
                key: y,
                date: NaiveDate::from_ymd_opt(y, 11, 2).unwrap(),
                values: vec![Some(1.0), if y == 2017 { None } else { Some(2.0) }],
            })
            .collect(),
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 9).unwrap()
}

#[test]
fn csv_export_creates_directory_and_file() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("exports");

    let path = export(&sample(), "csv", &dir, today()).unwrap();

    assert_eq!(path, dir.join("yield_curve_20240109.csv"));
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("Year,Date,2 Yr,10 Yr\n"));
    assert!(content.contains("2017,2017-11-02,1,\n"));
    assert_eq!(content.lines().count(), 7);
}

#[test]
fn xlsx_export_writes_workbook() {
    let tmp = tempfile::tempdir().unwrap();

    let path = export(&sample(), "xlsx", tmp.path(), today()).unwrap();

    assert_eq!(path.file_name().unwrap(), "yield_curve_20240109.xlsx");
    let bytes = std::fs::read(&path).unwrap();
    // xlsx is a zip archive
    assert_eq!(&bytes[..2], b"PK");
}

#[test]
fn unsupported_format_writes_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("exports");

    let err = export(&sample(), "json", &dir, today()).unwrap_err();

    assert!(matches!(err, TreasuryError::UnsupportedFormat(ref f) if f == "json"));
    assert!(!dir.exists());
}

#[test]
fn same_day_export_overwrites() {
    let tmp = tempfile::tempdir().unwrap();
    let first = export(&sample(), "csv", tmp.path(), today()).unwrap();
    let mut smaller = sample();
    smaller.rows.truncate(1);
    let second = export(&smaller, "csv", tmp.path(), today()).unwrap();

    assert_eq!(first, second);
    assert_eq!(std::fs::read_to_string(&second).unwrap().lines().count(), 2);
}

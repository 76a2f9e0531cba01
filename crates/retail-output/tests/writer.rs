//! Integration tests for CSV persistence.

use polars::prelude::*;
use retail_output::{write_csv, write_csv_to};

fn cleaned_df() -> DataFrame {
    let dates = Series::new(
        "InvoiceDate".into(),
        vec![1_291_191_960_000i64, 1_291_194_060_000],
    )
    .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))
    .unwrap();
    DataFrame::new(vec![
        dates.into_column(),
        Series::new("Quantity".into(), vec![6i32, 3]).into_column(),
        Series::new("Country_United Kingdom".into(), vec![true, false]).into_column(),
    ])
    .unwrap()
}

#[test]
fn test_csv_layout() {
    let mut df = cleaned_df();
    let mut buffer = Vec::new();

    write_csv_to(&mut df, &mut buffer).unwrap();

    let csv = String::from_utf8(buffer).unwrap();
    insta::assert_snapshot!(csv, @r"
    InvoiceDate,Quantity,Country_United Kingdom
    2010-12-01 08:26:00,6,true
    2010-12-01 09:01:00,3,false
    ");
}

#[test]
fn test_write_csv_creates_parents_and_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join("Processed_OnlineRetail.csv");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "stale contents that are much longer than the new file\n").unwrap();

    let mut df = cleaned_df();
    write_csv(&mut df, &path).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("InvoiceDate,Quantity,Country_United Kingdom\n"));
    assert!(!written.contains("stale"));
    assert_eq!(written.lines().count(), 3);
}

#[test]
fn test_write_csv_creates_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("deeper").join("out.csv");

    let mut df = cleaned_df();
    write_csv(&mut df, &path).unwrap();

    assert!(path.is_file());
}

#[test]
fn test_write_csv_reports_unwritable_path() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "").unwrap();

    let mut df = cleaned_df();
    let err = write_csv(&mut df, &blocker.join("out.csv")).unwrap_err();

    assert!(matches!(err, retail_output::OutputError::Io { .. }));
}

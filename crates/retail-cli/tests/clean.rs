//! End-to-end tests for the `clean` command.

use std::fs;

use retail_cli::commands::{CleanJob, run_clean};
use retail_model::{CleaningOptions, CleaningReport, SourceEncoding};

const RETAIL: &str = "\
InvoiceNo,StockCode,Description,Quantity,InvoiceDate,UnitPrice,CustomerID,Country
536365,85123A,WHITE HANGING HEART T-LIGHT HOLDER,6,12/1/2010 8:26,2.55,17850,United Kingdom
536365,85123A,WHITE HANGING HEART T-LIGHT HOLDER,6,12/1/2010 8:26,2.55,17850,United Kingdom
536366,22633,HAND WARMER UNION JACK,6,12/1/2010 8:28,1.85,17850,United Kingdom
536367,84879,ASSORTED COLOUR BIRD ORNAMENT,32,12/1/2010 8:34,1.69,13047,France
536368,22960,JAM MAKING SET WITH JARS,6,not a date,4.25,13047,France
536369,21756,BATH BUILDING BLOCK WORD,3,12/1/2010 8:35,,13047,United Kingdom
536370,22728,ALARM CLOCK BAKELIKE PINK,24,12/1/2010 8:45,3.75,12583,France
536371,22086,PAPER CHAIN KIT 50'S CHRISTMAS ,80,12/1/2010 9:00,2.55,13748,NA
";

fn job(dir: &tempfile::TempDir, source: &str) -> CleanJob {
    let input = dir.path().join("OnlineRetail.csv");
    fs::write(&input, source).unwrap();
    CleanJob {
        input,
        output: dir.path().join("out").join("Processed_OnlineRetail.csv"),
        options: CleaningOptions::default(),
        report_json: None,
    }
}

#[test]
fn test_clean_writes_processed_csv() {
    let dir = tempfile::tempdir().unwrap();
    let job = job(&dir, RETAIL);

    let report = run_clean(&job).unwrap();

    assert_eq!(report.load.rows, 8);
    assert_eq!(report.load.columns, 8);
    assert_eq!(report.load.missing_cells, 2);
    assert_eq!(report.imputation.missing_after, 0);
    assert_eq!(report.dates.as_ref().unwrap().rows_dropped, 1);
    assert_eq!(report.duplicates_removed, 1);
    assert_eq!(report.final_rows, 6);

    let written = fs::read_to_string(&job.output).unwrap();
    let mut lines = written.lines();
    let header = lines.next().unwrap();
    assert!(header.contains("InvoiceDate"));
    assert!(header.contains("Country_United Kingdom"));
    assert!(!header.split(',').any(|name| name == "Country"));
    assert_eq!(lines.count(), report.final_rows);
    assert!(written.contains("2010-12-01 08:26:00"));
    assert!(!written.contains("not a date"));
}

#[test]
fn test_clean_missing_source_fails() {
    let dir = tempfile::tempdir().unwrap();
    let job = CleanJob {
        input: dir.path().join("absent.csv"),
        output: dir.path().join("out.csv"),
        options: CleaningOptions::default(),
        report_json: None,
    };

    let err = run_clean(&job).unwrap_err();

    assert!(format!("{err:#}").contains("not found"));
    assert!(!job.output.exists());
}

#[test]
fn test_clean_overwrites_previous_output() {
    let dir = tempfile::tempdir().unwrap();
    let job = job(&dir, RETAIL);
    fs::create_dir_all(job.output.parent().unwrap()).unwrap();
    fs::write(&job.output, "old,output\n1,2\n").unwrap();

    run_clean(&job).unwrap();

    let written = fs::read_to_string(&job.output).unwrap();
    assert!(!written.starts_with("old,output"));
}

#[test]
fn test_clean_writes_json_report() {
    let dir = tempfile::tempdir().unwrap();
    let mut job = job(&dir, RETAIL);
    let report_path = dir.path().join("report.json");
    job.report_json = Some(report_path.clone());

    let report = run_clean(&job).unwrap();

    let json = fs::read_to_string(&report_path).unwrap();
    let parsed: CleaningReport = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, report);
}

#[test]
fn test_clean_without_date_column_warns() {
    let dir = tempfile::tempdir().unwrap();
    let source = "Quantity,Country\n6,UK\n8,France\n8,France\n";
    let job = job(&dir, source);

    let report = run_clean(&job).unwrap();

    assert!(report.dates.is_none());
    assert!(report.has_warnings());
    assert_eq!(report.duplicates_removed, 1);
    assert_eq!(report.final_rows, 2);
}

#[test]
fn test_clean_small_chunks_match_single_chunk() {
    let dir = tempfile::tempdir().unwrap();
    let single = run_clean(&job(&dir, RETAIL)).unwrap();

    let chunked_dir = tempfile::tempdir().unwrap();
    let mut chunked_job = job(&chunked_dir, RETAIL);
    chunked_job.options = CleaningOptions::default()
        .with_chunk_size(3)
        .with_encoding(SourceEncoding::Utf8);
    let chunked = run_clean(&chunked_job).unwrap();

    assert_eq!(chunked.load.chunks, 3);
    assert_eq!(single.load.chunks, 1);
    assert_eq!(chunked.final_rows, single.final_rows);
    assert_eq!(chunked.final_columns, single.final_columns);
}

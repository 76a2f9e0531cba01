//! Tests for segmented CSV loading.

use std::fs;
use std::path::PathBuf;

use polars::prelude::DataType;
use tempfile::TempDir;

use retail_ingest::{ChunkedCsvReader, IngestError, load_table};
use retail_model::{CleaningOptions, ColumnKind, SourceEncoding};

fn write_source(dir: &TempDir, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write source");
    path
}

const RETAIL: &str = "InvoiceNo,StockCode,Quantity,InvoiceDate,UnitPrice,CustomerID,Country\n\
536365,85123A,6,12/1/2010 8:26,2.55,17850,United Kingdom\n\
536365,71053,6,12/1/2010 8:26,3.39,17850,United Kingdom\n\
536366,22633,6,12/1/2010 8:28,1.85,,United Kingdom\n\
C536379,D,-1,12/1/2010 9:41,27.5,14527,France\n\
536380,22961,24,12/1/2010 9:41,0.85,17809,NA\n";

#[test]
fn missing_source_is_reported() {
    let dir = TempDir::new().expect("temp dir");
    let missing = dir.path().join("OnlineRetail.csv");

    let error = load_table(&missing, &CleaningOptions::default()).expect_err("should fail");

    assert!(matches!(error, IngestError::SourceNotFound { ref path } if *path == missing));
    assert!(error.to_string().contains("source file not found"));
}

#[test]
fn segments_are_reassembled_in_order() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_source(&dir, "retail.csv", RETAIL.as_bytes());
    let options = CleaningOptions::default().with_chunk_size(2);

    let loaded = load_table(&path, &options).expect("load");

    assert_eq!(loaded.report.rows, 5);
    assert_eq!(loaded.report.columns, 7);
    assert_eq!(loaded.report.chunks, 3);
    let invoices: Vec<Option<&str>> = loaded
        .data
        .column("InvoiceNo")
        .expect("InvoiceNo")
        .str()
        .expect("string column")
        .into_iter()
        .collect();
    assert_eq!(
        invoices,
        vec![
            Some("536365"),
            Some("536365"),
            Some("536366"),
            Some("C536379"),
            Some("536380"),
        ]
    );
}

#[test]
fn column_types_are_inferred() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_source(&dir, "retail.csv", RETAIL.as_bytes());

    let loaded = load_table(&path, &CleaningOptions::default()).expect("load");

    assert_eq!(loaded.kinds["Quantity"], ColumnKind::Integer);
    assert_eq!(loaded.kinds["UnitPrice"], ColumnKind::Float);
    assert_eq!(loaded.kinds["CustomerID"], ColumnKind::Float);
    assert_eq!(loaded.kinds["InvoiceNo"], ColumnKind::Categorical);
    assert_eq!(loaded.kinds["InvoiceDate"], ColumnKind::Categorical);
    assert_eq!(
        loaded.data.column("Quantity").expect("Quantity").dtype(),
        &DataType::Int64
    );
    assert_eq!(
        loaded.data.column("UnitPrice").expect("UnitPrice").dtype(),
        &DataType::Float64
    );
}

#[test]
fn missing_tokens_are_counted() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_source(&dir, "retail.csv", RETAIL.as_bytes());

    let loaded = load_table(&path, &CleaningOptions::default()).expect("load");

    // One blank CustomerID and one "NA" country.
    assert_eq!(loaded.report.missing_cells, 2);
    assert_eq!(
        loaded
            .data
            .column("Country")
            .expect("Country")
            .null_count(),
        1
    );
}

#[test]
fn latin1_source_is_decoded() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_source(
        &dir,
        "latin1.csv",
        b"Description,UnitPrice\nCaf\xe9 mug,1.5\n\xa3 sign,2\n",
    );

    let loaded = load_table(&path, &CleaningOptions::default()).expect("load");

    let descriptions: Vec<Option<&str>> = loaded
        .data
        .column("Description")
        .expect("Description")
        .str()
        .expect("string column")
        .into_iter()
        .collect();
    assert_eq!(descriptions, vec![Some("Café mug"), Some("£ sign")]);
}

#[test]
fn utf8_source_is_decoded() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_source(&dir, "utf8.csv", "Country\nCôte d'Ivoire\n".as_bytes());
    let options = CleaningOptions::default().with_encoding(SourceEncoding::Utf8);

    let loaded = load_table(&path, &options).expect("load");

    let country = loaded
        .data
        .column("Country")
        .expect("Country")
        .str()
        .expect("string column")
        .get(0);
    assert_eq!(country, Some("Côte d'Ivoire"));
}

#[test]
fn header_only_source_loads_empty_table() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_source(&dir, "empty.csv", b"A,B\n");

    let loaded = load_table(&path, &CleaningOptions::default()).expect("load");

    assert_eq!(loaded.report.rows, 0);
    assert_eq!(loaded.report.columns, 2);
    assert_eq!(loaded.report.chunks, 0);
}

#[test]
fn short_records_are_padded_with_missing() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_source(&dir, "ragged.csv", b"A,B,C\n1,2,3\n4\n");

    let loaded = load_table(&path, &CleaningOptions::default()).expect("load");

    assert_eq!(loaded.report.rows, 2);
    assert_eq!(loaded.report.missing_cells, 2);
}

#[test]
fn reader_visits_every_segment() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_source(&dir, "retail.csv", RETAIL.as_bytes());
    let options = CleaningOptions::default().with_chunk_size(4);
    let reader = ChunkedCsvReader::new(&path, &options).expect("reader");

    let mut heights = Vec::new();
    let headers = reader
        .read_chunks(|chunk| {
            heights.push(chunk.height());
            Ok(())
        })
        .expect("read chunks");

    assert_eq!(heights, vec![4, 1]);
    assert_eq!(headers.len(), 7);
}

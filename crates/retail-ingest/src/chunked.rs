//! Segmented CSV loading.
//!
//! The source is decoded `chunk_size` records at a time. Each segment is
//! turned into a string-typed polars frame and stacked onto the frame
//! accumulated so far, so only one segment of raw records is buffered at
//! once. Column types are inferred after the table is reassembled.
//!
//! # Usage
//!
//! ```ignore
//! use retail_ingest::load_table;
//! use retail_model::CleaningOptions;
//!
//! let loaded = load_table("OnlineRetail.csv", &CleaningOptions::default())?;
//! println!("{} rows in {} chunks", loaded.report.rows, loaded.report.chunks);
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use csv::{ByteRecord, ReaderBuilder};
use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};
use tracing::debug;

use retail_model::{CleaningOptions, ColumnKind, LoadReport, SourceEncoding};

use crate::decode::{decode_field, decode_header, normalize_cell, unique_headers};
use crate::error::IngestError;
use crate::inference::infer_column_types;

/// A reassembled, typed source table.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub data: DataFrame,
    /// Semantic kind of every column, keyed by column name.
    pub kinds: BTreeMap<String, ColumnKind>,
    pub report: LoadReport,
}

/// Reader that decodes a delimited file in bounded segments.
#[derive(Debug, Clone)]
pub struct ChunkedCsvReader {
    path: PathBuf,
    chunk_size: usize,
    encoding: SourceEncoding,
    delimiter: u8,
}

impl ChunkedCsvReader {
    /// Create a reader; fails with `SourceNotFound` when the path is absent.
    pub fn new(path: impl AsRef<Path>, options: &CleaningOptions) -> Result<Self, IngestError> {
        let path = path.as_ref().to_path_buf();
        if !path.is_file() {
            return Err(IngestError::SourceNotFound { path });
        }
        Ok(Self {
            path,
            chunk_size: options.chunk_size.max(1),
            encoding: options.encoding,
            delimiter: options.delimiter,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Decode the file segment by segment, handing each string-typed frame
    /// to `on_chunk`. Returns the header names.
    pub fn read_chunks<F>(&self, mut on_chunk: F) -> Result<Vec<String>, IngestError>
    where
        F: FnMut(DataFrame) -> Result<(), IngestError>,
    {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .delimiter(self.delimiter)
            .from_path(&self.path)
            .map_err(|error| IngestError::csv(&self.path, error))?;
        let raw_headers: Vec<String> = reader
            .byte_headers()
            .map_err(|error| IngestError::csv(&self.path, error))?
            .iter()
            .map(|bytes| decode_header(bytes, self.encoding))
            .collect();
        let headers = unique_headers(raw_headers);

        let mut buffers: Vec<Vec<Option<String>>> = headers
            .iter()
            .map(|_| Vec::with_capacity(self.chunk_size))
            .collect();
        let mut buffered = 0usize;
        let mut record = ByteRecord::new();
        loop {
            let more = reader
                .read_byte_record(&mut record)
                .map_err(|error| IngestError::csv(&self.path, error))?;
            if !more {
                break;
            }
            for (idx, buffer) in buffers.iter_mut().enumerate() {
                let value = record
                    .get(idx)
                    .and_then(|bytes| normalize_cell(&decode_field(bytes, self.encoding)));
                buffer.push(value);
            }
            buffered += 1;
            if buffered == self.chunk_size {
                on_chunk(segment_frame(&headers, &mut buffers)?)?;
                buffered = 0;
            }
        }
        if buffered > 0 {
            on_chunk(segment_frame(&headers, &mut buffers)?)?;
        }
        Ok(headers)
    }

    /// Read every segment and stack them into one untyped frame.
    pub fn read_all(&self) -> Result<(DataFrame, usize), IngestError> {
        let mut combined: Option<DataFrame> = None;
        let mut chunks = 0usize;
        let headers = self.read_chunks(|chunk| {
            chunks += 1;
            debug!(chunk = chunks, rows = chunk.height(), "decoded segment");
            match combined.as_mut() {
                Some(frame) => {
                    frame.vstack_mut(&chunk)?;
                }
                None => combined = Some(chunk),
            }
            Ok(())
        })?;
        let frame = match combined {
            Some(frame) => frame,
            None => segment_frame(&headers, &mut vec![Vec::new(); headers.len()])?,
        };
        Ok((frame, chunks))
    }
}

/// Drain the column buffers into a frame of string columns.
fn segment_frame(
    headers: &[String],
    buffers: &mut [Vec<Option<String>>],
) -> Result<DataFrame, IngestError> {
    let columns: Vec<Column> = headers
        .iter()
        .zip(buffers.iter_mut())
        .map(|(name, buffer)| Series::new(name.as_str().into(), std::mem::take(buffer)).into_column())
        .collect();
    Ok(DataFrame::new(columns)?)
}

/// Load, reassemble and type the source table.
pub fn load_table(
    path: impl AsRef<Path>,
    options: &CleaningOptions,
) -> Result<LoadedTable, IngestError> {
    let reader = ChunkedCsvReader::new(path, options)?;
    let (raw, chunks) = reader.read_all()?;
    let (data, kinds) = infer_column_types(raw)?;
    let missing_cells = data
        .get_columns()
        .iter()
        .map(|column| column.null_count())
        .sum();
    let report = LoadReport {
        rows: data.height(),
        columns: data.width(),
        chunks,
        missing_cells,
    };
    debug!(
        path = %reader.path().display(),
        rows = report.rows,
        columns = report.columns,
        chunks,
        "source loaded"
    );
    Ok(LoadedTable {
        data,
        kinds,
        report,
    })
}

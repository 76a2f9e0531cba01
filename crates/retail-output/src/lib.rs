//! Persistence of cleaned tables.
//!
//! Output is CSV with a header row and no index column. An existing file
//! at the target path is replaced.

mod error;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use polars::prelude::{CsvWriter, DataFrame, SerWriter};
use tracing::debug;

pub use error::OutputError;

/// Layout of timestamp cells in the written CSV.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Write `df` as CSV to `writer`.
pub fn write_csv_to<W: Write>(df: &mut DataFrame, writer: W) -> Result<(), OutputError> {
    CsvWriter::new(writer)
        .include_header(true)
        .with_datetime_format(Some(DATETIME_FORMAT.to_string()))
        .finish(df)?;
    Ok(())
}

/// Write `df` as CSV to `path`, creating parent directories and replacing
/// any previous file.
pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| OutputError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let file = File::create(path).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    write_csv_to(df, &mut writer)?;
    writer.flush().map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "wrote csv"
    );
    Ok(())
}

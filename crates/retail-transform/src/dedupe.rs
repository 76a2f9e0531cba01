use std::collections::BTreeSet;

use polars::prelude::PolarsResult;

use crate::data_utils::column_value_string;
use crate::frame::CleanFrame;

const FIELD_SEPARATOR: char = '\u{1f}';
const NULL_MARKER: &str = "\u{0}";

/// Remove rows identical to an earlier row across every column, keeping
/// the first occurrence. Returns the number of rows removed.
pub fn drop_duplicate_rows(frame: &mut CleanFrame) -> PolarsResult<usize> {
    if frame.height() == 0 || frame.width() == 0 {
        return Ok(0);
    }
    let df = frame.data();
    let columns = frame.column_names();
    let mut seen = BTreeSet::new();
    let mut keep = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let mut composite = String::new();
        for (pos, name) in columns.iter().enumerate() {
            if pos > 0 {
                composite.push(FIELD_SEPARATOR);
            }
            let is_null = df
                .column(name)
                .map(|column| column.get(idx).is_ok_and(|value| value.is_null()))
                .unwrap_or(false);
            if is_null {
                composite.push_str(NULL_MARKER);
            } else {
                composite.push_str(&column_value_string(df, name, idx));
            }
        }
        keep.push(seen.insert(composite));
    }
    frame.retain_rows(&keep)
}

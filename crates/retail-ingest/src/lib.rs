pub mod chunked;
pub mod decode;
pub mod error;
pub mod inference;
pub mod polars_utils;

pub use chunked::{ChunkedCsvReader, LoadedTable, load_table};
pub use decode::{MISSING_TOKENS, decode_field, is_missing_token, normalize_cell};
pub use error::IngestError;
pub use inference::{infer_column_kind, infer_column_types};
pub use polars_utils::{any_to_string, format_numeric, parse_f64, parse_i64};

//! Cleaning stages for retail transaction tables.
//!
//! This crate provides the transformation stages of the cleaning pipeline:
//!
//! - **frame**: [`CleanFrame`], a polars frame paired with column kinds
//! - **types**: lossless numeric narrowing and categorical marking
//! - **impute**: mean/mode fill, forward/backward fill, interpolation, drops
//! - **outliers**: z-score row removal and percentile winsorization
//! - **log_transform**: non-positive replacement and `ln(1 + x)`
//! - **datetime**: timestamp parsing and date standardization
//! - **encoding**: indicator columns for low-cardinality categoricals
//! - **dedupe**: exact duplicate row removal
//! - **pipeline**: the stages wired together in order

pub mod data_utils;
pub mod datetime;
pub mod dedupe;
pub mod encoding;
pub mod error;
pub mod frame;
pub mod impute;
pub mod log_transform;
pub mod outliers;
pub mod pipeline;
pub mod stats;
pub mod types;

pub use datetime::{parse_timestamp, standardize_dates};
pub use dedupe::drop_duplicate_rows;
pub use encoding::{encode_categoricals, indicator_name};
pub use error::TransformError;
pub use frame::{CleanFrame, kind_for_dtype};
pub use impute::impute_missing;
pub use log_transform::{log_transform, replace_non_positive};
pub use outliers::{remove_outliers, winsorize, zscore_flags};
pub use pipeline::CleaningPipeline;
pub use types::optimize_types;

//! Shared types for the retail transactions cleaning pipeline.
//!
//! - **kind**: semantic column kinds tracked alongside the polars frame
//! - **options**: tunable constants of the cleaning stages
//! - **report**: per-stage diagnostic counts collected during a run
//! - **stage**: the ordered list of pipeline stages

pub mod kind;
pub mod options;
pub mod report;
pub mod stage;

pub use kind::ColumnKind;
pub use options::{CleaningOptions, SourceEncoding};
pub use report::{
    CleaningReport, DateReport, EncodedColumn, EncodingReport, ImputationReport, LoadReport,
    LogTransformReport, TypeOptimizationReport,
};
pub use stage::PipelineStage;

use polars::prelude::PolarsError;

#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    /// A stage's optional input column is absent; the stage is skipped.
    #[error("column '{column}' not found")]
    MissingOptionalColumn { column: String },

    #[error("frame operation failed: {0}")]
    Frame(#[from] PolarsError),
}

impl TransformError {
    /// Whether the error should stop the run.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::MissingOptionalColumn { .. })
    }
}

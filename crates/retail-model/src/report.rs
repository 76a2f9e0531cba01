//! Diagnostic counts collected while cleaning.
//!
//! None of these values feed back into control flow; they exist for the
//! console summary and the optional JSON report.

use serde::{Deserialize, Serialize};

/// Counts from the load stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    pub rows: usize,
    pub columns: usize,
    /// Number of segments the source was read in.
    pub chunks: usize,
    /// Missing cells in the reassembled table.
    pub missing_cells: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeOptimizationReport {
    /// Columns stored in a narrower numeric type afterwards.
    pub narrowed_columns: Vec<String>,
    /// Text columns marked categorical.
    pub categorical_columns: Vec<String>,
    pub estimated_bytes_before: usize,
    pub estimated_bytes_after: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImputationReport {
    pub missing_before: usize,
    pub mean_filled: usize,
    pub mode_filled: usize,
    pub forward_backward_filled: usize,
    pub interpolated: usize,
    pub rows_dropped: usize,
    pub columns_dropped: Vec<String>,
    pub missing_after: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogTransformReport {
    pub columns: Vec<String>,
    /// Non-positive cells replaced by the column's smallest positive value.
    pub replaced_non_positive: usize,
    /// Columns left untouched because they hold no positive value.
    pub skipped_columns: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateReport {
    pub column: String,
    pub parsed: usize,
    pub rows_dropped: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedColumn {
    pub column: String,
    /// Category left out of the indicators.
    pub reference: Option<String>,
    pub indicators: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodingReport {
    pub encoded: Vec<EncodedColumn>,
    /// Categorical columns above the cardinality cap.
    pub skipped_high_cardinality: Vec<String>,
}

/// Everything a single cleaning run reports.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CleaningReport {
    pub load: LoadReport,
    pub types: TypeOptimizationReport,
    pub imputation: ImputationReport,
    pub outlier_rows_removed: usize,
    pub winsorized_cells: usize,
    pub log_transform: LogTransformReport,
    /// `None` when the date column was absent.
    pub dates: Option<DateReport>,
    pub encoding: EncodingReport,
    pub duplicates_removed: usize,
    pub final_rows: usize,
    pub final_columns: usize,
    pub warnings: Vec<String>,
}

impl CleaningReport {
    /// Rows removed by every stage combined.
    pub fn rows_removed(&self) -> usize {
        self.imputation.rows_dropped
            + self.outlier_rows_removed
            + self.dates.as_ref().map_or(0, |dates| dates.rows_dropped)
            + self.duplicates_removed
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }
}

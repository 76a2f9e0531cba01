//! The cleaning stages wired together in their required order.

use std::time::Instant;

use tracing::{info, info_span, warn};

use retail_model::{CleaningOptions, CleaningReport};

use crate::datetime::standardize_dates;
use crate::dedupe::drop_duplicate_rows;
use crate::encoding::encode_categoricals;
use crate::error::TransformError;
use crate::frame::CleanFrame;
use crate::impute::impute_missing;
use crate::log_transform::log_transform;
use crate::outliers::{remove_outliers, winsorize};
use crate::types::optimize_types;

/// Runs type optimization through deduplication over a loaded table.
#[derive(Debug, Clone, Default)]
pub struct CleaningPipeline {
    options: CleaningOptions,
}

impl CleaningPipeline {
    pub fn new(options: CleaningOptions) -> Self {
        Self { options }
    }

    /// Clean `frame`, recording counts in `report`.
    ///
    /// A missing date column is recorded as a warning; only frame errors
    /// are returned.
    pub fn run(
        &self,
        mut frame: CleanFrame,
        report: &mut CleaningReport,
    ) -> Result<CleanFrame, TransformError> {
        // =====================================================================
        // Type optimization
        // =====================================================================
        info_span!("optimize_types").in_scope(|| -> Result<(), TransformError> {
            let start = Instant::now();
            report.types = optimize_types(&mut frame)?;
            info!(
                narrowed = report.types.narrowed_columns.len(),
                categorical = report.types.categorical_columns.len(),
                bytes_before = report.types.estimated_bytes_before,
                bytes_after = report.types.estimated_bytes_after,
                duration_ms = start.elapsed().as_millis(),
                "type optimization complete"
            );
            Ok(())
        })?;

        // =====================================================================
        // Missing-value imputation
        // =====================================================================
        info_span!("impute").in_scope(|| -> Result<(), TransformError> {
            let start = Instant::now();
            let imputation = impute_missing(&mut frame)?;
            info!(
                missing_before = imputation.missing_before,
                mean_filled = imputation.mean_filled,
                mode_filled = imputation.mode_filled,
                forward_backward_filled = imputation.forward_backward_filled,
                interpolated = imputation.interpolated,
                rows_dropped = imputation.rows_dropped,
                columns_dropped = imputation.columns_dropped.len(),
                missing_after = imputation.missing_after,
                duration_ms = start.elapsed().as_millis(),
                "imputation complete"
            );
            report.imputation = imputation;
            Ok(())
        })?;

        // =====================================================================
        // Outlier removal and winsorization
        // =====================================================================
        info_span!("outliers").in_scope(|| -> Result<(), TransformError> {
            let start = Instant::now();
            report.outlier_rows_removed = remove_outliers(&mut frame, self.options.z_threshold)?;
            info!(
                threshold = self.options.z_threshold,
                rows_removed = report.outlier_rows_removed,
                duration_ms = start.elapsed().as_millis(),
                "outlier removal complete"
            );
            Ok(())
        })?;

        info_span!("winsorize").in_scope(|| -> Result<(), TransformError> {
            let start = Instant::now();
            report.winsorized_cells = winsorize(
                &mut frame,
                self.options.lower_percentile,
                self.options.upper_percentile,
            )?;
            info!(
                lower = self.options.lower_percentile,
                upper = self.options.upper_percentile,
                cells_clipped = report.winsorized_cells,
                duration_ms = start.elapsed().as_millis(),
                "winsorization complete"
            );
            Ok(())
        })?;

        // =====================================================================
        // Log transform
        // =====================================================================
        info_span!("log_transform").in_scope(|| -> Result<(), TransformError> {
            let start = Instant::now();
            let transformed = log_transform(&mut frame)?;
            for column in &transformed.skipped_columns {
                report.warn(format!(
                    "column '{column}' has no positive values; log transform skipped"
                ));
            }
            info!(
                columns = transformed.columns.len(),
                replaced_non_positive = transformed.replaced_non_positive,
                skipped = transformed.skipped_columns.len(),
                duration_ms = start.elapsed().as_millis(),
                "log transform complete"
            );
            report.log_transform = transformed;
            Ok(())
        })?;

        // =====================================================================
        // Date standardization
        // =====================================================================
        info_span!("dates", column = %self.options.date_column).in_scope(
            || -> Result<(), TransformError> {
                let start = Instant::now();
                match standardize_dates(&mut frame, &self.options.date_column) {
                    Ok(dates) => {
                        info!(
                            parsed = dates.parsed,
                            rows_dropped = dates.rows_dropped,
                            duration_ms = start.elapsed().as_millis(),
                            "date standardization complete"
                        );
                        report.dates = Some(dates);
                    }
                    Err(error) if !error.is_fatal() => {
                        warn!(%error, "date standardization skipped");
                        report.warn(format!("date standardization skipped: {error}"));
                        report.dates = None;
                    }
                    Err(error) => return Err(error),
                }
                Ok(())
            },
        )?;

        // =====================================================================
        // Categorical encoding
        // =====================================================================
        info_span!("encode").in_scope(|| -> Result<(), TransformError> {
            let start = Instant::now();
            let encoding = encode_categoricals(&mut frame, self.options.max_categories)?;
            info!(
                encoded = encoding.encoded.len(),
                indicators = encoding
                    .encoded
                    .iter()
                    .map(|column| column.indicators.len())
                    .sum::<usize>(),
                skipped = encoding.skipped_high_cardinality.len(),
                duration_ms = start.elapsed().as_millis(),
                "categorical encoding complete"
            );
            report.encoding = encoding;
            Ok(())
        })?;

        // =====================================================================
        // Deduplication
        // =====================================================================
        info_span!("dedupe").in_scope(|| -> Result<(), TransformError> {
            let start = Instant::now();
            report.duplicates_removed = drop_duplicate_rows(&mut frame)?;
            info!(
                rows_removed = report.duplicates_removed,
                duration_ms = start.elapsed().as_millis(),
                "deduplication complete"
            );
            Ok(())
        })?;

        report.final_rows = frame.height();
        report.final_columns = frame.width();
        Ok(frame)
    }
}

//! Outlier handling for numeric columns: z-score row removal and
//! percentile winsorization.

use polars::prelude::{
    ChunkAgg, ChunkQuantile, ChunkVar, DataType, Float64Chunked, NamedFrom, PolarsResult, QuantileMethod,
};
use tracing::debug;

use retail_model::ColumnKind;

use crate::data_utils::{float_column, numeric_values};
use crate::frame::CleanFrame;

/// Flag values whose absolute z-score exceeds `threshold`.
///
/// Uses the population standard deviation of the present values. A column
/// with zero or undefined deviation flags nothing, and missing values are
/// never flagged.
pub fn zscore_flags(values: &[Option<f64>], threshold: f64) -> Vec<bool> {
    let column = Float64Chunked::new("zscore".into(), values);
    let (Some(mean), Some(std)) = (column.mean(), column.std(0)) else {
        return vec![false; values.len()];
    };
    if !std.is_finite() || std == 0.0 {
        return vec![false; values.len()];
    }
    values
        .iter()
        .map(|value| value.is_some_and(|value| ((value - mean) / std).abs() > threshold))
        .collect()
}

/// Drop every row flagged in at least one numeric column; returns rows removed.
///
/// Statistics for all columns come from the same, pre-removal table.
pub fn remove_outliers(frame: &mut CleanFrame, threshold: f64) -> PolarsResult<usize> {
    let mut keep = vec![true; frame.height()];
    for name in frame.numeric_columns() {
        let values = numeric_values(frame.data(), &name)?;
        let flags = zscore_flags(&values, threshold);
        let flagged = flags.iter().filter(|flag| **flag).count();
        if flagged > 0 {
            debug!(column = %name, flagged, "z-score outliers");
        }
        for (slot, flag) in keep.iter_mut().zip(flags) {
            *slot &= !flag;
        }
    }
    frame.retain_rows(&keep)
}

/// Clamp each numeric column to its `[lower, upper]` quantiles.
///
/// Returns the number of cells that changed. Every numeric column is
/// stored as `Float64` afterwards.
pub fn winsorize(frame: &mut CleanFrame, lower: f64, upper: f64) -> PolarsResult<usize> {
    let mut changed = 0;
    for name in frame.numeric_columns() {
        let column = frame.data().column(&name)?.cast(&DataType::Float64)?;
        let column = column.f64()?;
        let (Some(low), Some(high)) = (
            column.quantile(lower, QuantileMethod::Linear)?,
            column.quantile(upper, QuantileMethod::Linear)?,
        ) else {
            continue;
        };
        if low.is_nan() || high.is_nan() || low > high {
            continue;
        }
        let mut values = numeric_values(frame.data(), &name)?;
        let mut clipped = 0;
        for value in values.iter_mut().flatten() {
            let bounded = value.clamp(low, high);
            if bounded != *value {
                *value = bounded;
                clipped += 1;
            }
        }
        frame.set_column(
            float_column(&name, values, &DataType::Float64)?,
            ColumnKind::Float,
        )?;
        debug!(column = %name, low, high, clipped, "winsorized column");
        changed += clipped;
    }
    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_column_never_flags() {
        let values = vec![Some(5.0); 10];
        assert!(zscore_flags(&values, 3.0).iter().all(|flag| !flag));
    }

    #[test]
    fn extreme_value_flags_in_large_sample() {
        let mut values: Vec<Option<f64>> = (0..20).map(|i| Some(f64::from(i % 5))).collect();
        values.push(Some(1_000.0));
        let flags = zscore_flags(&values, 3.0);
        assert_eq!(flags.iter().filter(|flag| **flag).count(), 1);
        assert!(flags[20]);
    }

    #[test]
    fn missing_values_are_not_flagged() {
        let values = vec![None, Some(1.0), Some(2.0)];
        assert_eq!(zscore_flags(&values, 0.1), vec![false, true, true]);
    }
}

//! Missing-value imputation.
//!
//! Steps run in order and each only touches columns that still have gaps:
//! mean fill for numeric columns, mode fill for every other column, forward then
//! backward fill for anything left, linear interpolation for numeric
//! columns, and finally dropping rows and then columns that still have a
//! gap. The table has no missing values afterwards.

use polars::prelude::{FillNullStrategy, IdxCa, IdxSize, IntoColumn, PolarsResult};
use tracing::debug;

use retail_model::{ColumnKind, ImputationReport};

use crate::data_utils::{float_column, numeric_values, string_values};
use crate::frame::CleanFrame;
use crate::stats;

pub fn impute_missing(frame: &mut CleanFrame) -> PolarsResult<ImputationReport> {
    let mut report = ImputationReport {
        missing_before: frame.missing_count(),
        ..ImputationReport::default()
    };

    if frame.missing_count() > 0 {
        report.mean_filled = fill_numeric_with_mean(frame)?;
    }
    if frame.missing_count() > 0 {
        report.mode_filled = fill_with_mode(frame)?;
    }
    if frame.missing_count() > 0 {
        report.forward_backward_filled = fill_forward_backward(frame)?;
    }
    if frame.missing_count() > 0 {
        report.interpolated = interpolate_numeric(frame)?;
    }
    if frame.missing_count() > 0 {
        report.rows_dropped = drop_incomplete_rows(frame)?;
        report.columns_dropped = drop_incomplete_columns(frame)?;
    }

    report.missing_after = frame.missing_count();
    Ok(report)
}

fn columns_with_gaps(frame: &CleanFrame, names: Vec<String>) -> Vec<String> {
    names
        .into_iter()
        .filter(|name| frame.column_missing(name) > 0)
        .collect()
}

/// Integer columns that receive a fractional mean become float columns.
fn fill_numeric_with_mean(frame: &mut CleanFrame) -> PolarsResult<usize> {
    let mut filled = 0;
    for name in columns_with_gaps(frame, frame.numeric_columns()) {
        let Some(mean) = frame.data().column(&name)?.as_materialized_series().mean() else {
            continue;
        };
        let mut values = numeric_values(frame.data(), &name)?;
        for slot in values.iter_mut().filter(|slot| slot.is_none()) {
            *slot = Some(mean);
            filled += 1;
        }
        let dtype = frame.data().column(&name)?.dtype().clone();
        frame.set_column(float_column(&name, values, &dtype)?, ColumnKind::Float)?;
        debug!(column = %name, "filled gaps with column mean");
    }
    Ok(filled)
}

/// Fill gaps in non-numeric columns with the most frequent value.
///
/// Values are compared by their text form; the fill is gathered from the
/// mode's first row so the column keeps its dtype.
fn fill_with_mode(frame: &mut CleanFrame) -> PolarsResult<usize> {
    let mut filled = 0;
    let non_numeric = frame.columns_where(|kind| !kind.is_numeric());
    for name in columns_with_gaps(frame, non_numeric) {
        let Some(kind) = frame.kind(&name) else {
            continue;
        };
        let values = string_values(frame.data(), &name)?;
        let Some(mode_row) = stats::mode_position(values.iter().map(Option::as_deref)) else {
            continue;
        };
        let indices: Vec<IdxSize> = values
            .iter()
            .enumerate()
            .map(|(row, value)| {
                if value.is_some() {
                    row as IdxSize
                } else {
                    filled += 1;
                    mode_row as IdxSize
                }
            })
            .collect();
        let gathered = frame
            .data()
            .column(&name)?
            .as_materialized_series()
            .take(&IdxCa::from_vec("rows".into(), indices))?;
        frame.set_column(gathered.into_column(), kind)?;
        debug!(column = %name, "filled gaps with column mode");
    }
    Ok(filled)
}

fn fill_forward_backward(frame: &mut CleanFrame) -> PolarsResult<usize> {
    let mut filled = 0;
    for name in columns_with_gaps(frame, frame.column_names()) {
        let Some(kind) = frame.kind(&name) else {
            continue;
        };
        let before = frame.column_missing(&name);
        let series = frame.data().column(&name)?.as_materialized_series().clone();
        let series = series
            .fill_null(FillNullStrategy::Forward(None))?
            .fill_null(FillNullStrategy::Backward(None))?;
        let after = series.null_count();
        frame.set_column(series.into_column(), kind)?;
        filled += before - after;
    }
    Ok(filled)
}

fn interpolate_numeric(frame: &mut CleanFrame) -> PolarsResult<usize> {
    let mut filled = 0;
    for name in columns_with_gaps(frame, frame.numeric_columns()) {
        let mut values = numeric_values(frame.data(), &name)?;
        let count = stats::interpolate_linear(&mut values);
        if count == 0 {
            continue;
        }
        let dtype = frame.data().column(&name)?.dtype().clone();
        frame.set_column(float_column(&name, values, &dtype)?, ColumnKind::Float)?;
        filled += count;
    }
    Ok(filled)
}

fn drop_incomplete_rows(frame: &mut CleanFrame) -> PolarsResult<usize> {
    let mut keep = vec![true; frame.height()];
    for column in frame.data().get_columns() {
        if column.null_count() == 0 {
            continue;
        }
        let nulls = column.as_materialized_series().is_null();
        for (flag, is_null) in keep.iter_mut().zip(nulls.into_iter()) {
            if is_null == Some(true) {
                *flag = false;
            }
        }
    }
    let removed = frame.retain_rows(&keep)?;
    if removed > 0 {
        debug!(rows = removed, "dropped rows with remaining gaps");
    }
    Ok(removed)
}

fn drop_incomplete_columns(frame: &mut CleanFrame) -> PolarsResult<Vec<String>> {
    let dropped = columns_with_gaps(frame, frame.column_names());
    for name in &dropped {
        frame.drop_column(name)?;
        debug!(column = %name, "dropped column with remaining gaps");
    }
    Ok(dropped)
}

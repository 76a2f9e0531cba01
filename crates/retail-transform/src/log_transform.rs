//! `ln(1 + x)` transform of numeric columns.

use polars::prelude::{DataType, PolarsResult};
use tracing::{debug, warn};

use retail_model::{ColumnKind, LogTransformReport};

use crate::data_utils::{float_column, numeric_values};
use crate::frame::CleanFrame;

/// Replace values `<= 0` with the smallest strictly positive value.
///
/// Returns the number of replaced cells, or `None` when no positive value
/// exists (the values are left as they were).
pub fn replace_non_positive(values: &mut [Option<f64>]) -> Option<usize> {
    let min_positive = values
        .iter()
        .flatten()
        .copied()
        .filter(|value| *value > 0.0)
        .min_by(f64::total_cmp)?;
    let mut replaced = 0;
    for value in values.iter_mut().flatten() {
        if *value <= 0.0 {
            *value = min_positive;
            replaced += 1;
        }
    }
    Some(replaced)
}

pub fn log_transform(frame: &mut CleanFrame) -> PolarsResult<LogTransformReport> {
    let mut report = LogTransformReport::default();
    for name in frame.numeric_columns() {
        let mut values = numeric_values(frame.data(), &name)?;
        if values.iter().all(Option::is_none) {
            continue;
        }
        let Some(replaced) = replace_non_positive(&mut values) else {
            warn!(column = %name, "no positive values, log transform skipped");
            report.skipped_columns.push(name);
            continue;
        };
        for value in values.iter_mut().flatten() {
            *value = value.ln_1p();
        }
        frame.set_column(
            float_column(&name, values, &DataType::Float64)?,
            ColumnKind::Float,
        )?;
        if replaced > 0 {
            debug!(column = %name, replaced, "replaced non-positive values");
        }
        report.replaced_non_positive += replaced;
        report.columns.push(name);
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_positive_values_take_smallest_positive() {
        let mut values = vec![Some(-3.0), Some(0.0), Some(2.5), Some(0.5), None];
        assert_eq!(replace_non_positive(&mut values), Some(2));
        assert_eq!(values, vec![Some(0.5), Some(0.5), Some(2.5), Some(0.5), None]);
    }

    #[test]
    fn no_positive_value_leaves_column() {
        let mut values = vec![Some(-1.0), Some(0.0)];
        assert_eq!(replace_non_positive(&mut values), None);
        assert_eq!(values, vec![Some(-1.0), Some(0.0)]);
    }
}

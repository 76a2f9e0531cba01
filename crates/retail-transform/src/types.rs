//! Lossless storage narrowing.

use polars::prelude::{DataType, PolarsResult};
use tracing::debug;

use retail_model::{ColumnKind, TypeOptimizationReport};

use crate::data_utils::numeric_values;
use crate::frame::CleanFrame;

/// Narrow numeric columns whose values all fit a smaller type and mark
/// text columns categorical. No value changes.
pub fn optimize_types(frame: &mut CleanFrame) -> PolarsResult<TypeOptimizationReport> {
    let mut report = TypeOptimizationReport {
        estimated_bytes_before: frame.estimated_size(),
        ..TypeOptimizationReport::default()
    };

    for name in frame.column_names() {
        let dtype = frame.data().column(&name)?.dtype().clone();
        let target = match dtype {
            DataType::Int64 if fits_i32(&numeric_values(frame.data(), &name)?) => {
                Some((DataType::Int32, ColumnKind::Integer))
            }
            DataType::Float64 if fits_f32(&numeric_values(frame.data(), &name)?) => {
                Some((DataType::Float32, ColumnKind::Float))
            }
            DataType::String => {
                frame.set_kind(&name, ColumnKind::Categorical);
                report.categorical_columns.push(name.clone());
                None
            }
            _ => None,
        };
        if let Some((narrow, kind)) = target {
            let column = frame.data().column(&name)?.cast(&narrow)?;
            frame.set_column(column, kind)?;
            debug!(column = %name, from = %dtype, to = %narrow, "narrowed column");
            report.narrowed_columns.push(name);
        }
    }

    report.estimated_bytes_after = frame.estimated_size();
    Ok(report)
}

fn fits_i32(values: &[Option<f64>]) -> bool {
    values
        .iter()
        .flatten()
        .all(|value| *value >= f64::from(i32::MIN) && *value <= f64::from(i32::MAX))
}

fn fits_f32(values: &[Option<f64>]) -> bool {
    values
        .iter()
        .flatten()
        .all(|value| f64::from(*value as f32) == *value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn i32_range_is_checked() {
        assert!(fits_i32(&[Some(1.0), None, Some(-2_147_483_648.0)]));
        assert!(!fits_i32(&[Some(2_147_483_648.0)]));
    }

    #[test]
    fn f32_needs_exact_round_trip() {
        assert!(fits_f32(&[Some(0.5), Some(2.25), None]));
        assert!(!fits_f32(&[Some(0.1)]));
    }
}

//! Column type inference for freshly decoded string columns.

use std::collections::BTreeMap;

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, PolarsResult, Series};

use retail_model::ColumnKind;

use crate::polars_utils::{parse_f64, parse_i64};

/// Decide the kind of a column from its decoded string values.
///
/// - `Integer` when every value parses as `i64` and none are missing
/// - `Float` when every present value parses as a finite `f64`
///   (an integer column with gaps is a float column)
/// - `Categorical` otherwise, including columns with no values at all
pub fn infer_column_kind<'a, I>(values: I) -> ColumnKind
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut present = 0usize;
    let mut missing = false;
    let mut all_int = true;
    for value in values {
        let Some(value) = value else {
            missing = true;
            continue;
        };
        present += 1;
        if all_int && parse_i64(value).is_some() {
            continue;
        }
        all_int = false;
        if !parse_f64(value).is_some_and(f64::is_finite) {
            return ColumnKind::Categorical;
        }
    }
    if present == 0 {
        ColumnKind::Categorical
    } else if all_int && !missing {
        ColumnKind::Integer
    } else {
        ColumnKind::Float
    }
}

/// Convert string columns to `Int64`/`Float64` where the values allow it.
pub fn infer_column_types(df: DataFrame) -> PolarsResult<(DataFrame, BTreeMap<String, ColumnKind>)> {
    let mut kinds = BTreeMap::new();
    let mut columns: Vec<Column> = Vec::with_capacity(df.width());
    for column in df.get_columns() {
        let name = column.name().clone();
        let values = column.str()?;
        let kind = infer_column_kind(values.into_iter());
        let typed = match kind {
            ColumnKind::Integer => {
                let parsed: Vec<Option<i64>> = values
                    .into_iter()
                    .map(|value| value.and_then(parse_i64))
                    .collect();
                Series::new(name.clone(), parsed).into_column()
            }
            ColumnKind::Float => {
                let parsed: Vec<Option<f64>> = values
                    .into_iter()
                    .map(|value| value.and_then(parse_f64))
                    .collect();
                Series::new(name.clone(), parsed).into_column()
            }
            _ => column.clone(),
        };
        kinds.insert(name.to_string(), kind);
        columns.push(typed);
    }
    Ok((DataFrame::new(columns)?, kinds))
}

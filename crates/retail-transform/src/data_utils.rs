//! DataFrame value extraction helpers shared by the stages.

use polars::prelude::{
    AnyValue, Column, DataFrame, DataType, IntoColumn, NamedFrom, PolarsResult, Series,
};
use retail_ingest::any_to_string;

/// Values of a numeric column as `f64`, nulls kept in place.
pub fn numeric_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<f64>>> {
    let column = df.column(name)?.cast(&DataType::Float64)?;
    Ok(column.f64()?.into_iter().collect())
}

/// Values of a column as owned strings, nulls kept in place.
pub fn string_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<String>>> {
    let column = df.column(name)?;
    let column = if column.dtype() == &DataType::String {
        column.clone()
    } else {
        column.cast(&DataType::String)?
    };
    Ok(column
        .str()?
        .into_iter()
        .map(|value| value.map(str::to_string))
        .collect())
}

/// Get a string value from a DataFrame column at the given row index.
pub fn column_value_string(df: &DataFrame, name: &str, idx: usize) -> String {
    match df.column(name) {
        Ok(column) => any_to_string(column.get(idx).unwrap_or(AnyValue::Null)),
        Err(_) => String::new(),
    }
}

/// Build a float column, keeping `Float32` storage when the source had it.
pub fn float_column(name: &str, values: Vec<Option<f64>>, dtype: &DataType) -> PolarsResult<Column> {
    let series = Series::new(name.into(), values);
    let series = if dtype == &DataType::Float32 {
        series.cast(&DataType::Float32)?
    } else {
        series
    };
    Ok(series.into_column())
}

//! Indicator encoding of low-cardinality categorical columns.

use std::collections::BTreeSet;

use polars::prelude::{BooleanChunked, Column, DataType, IntoColumn, NewChunkedArray, PolarsResult};
use tracing::debug;

use retail_model::{ColumnKind, EncodedColumn, EncodingReport};

use crate::data_utils::string_values;
use crate::frame::CleanFrame;

/// Name of the indicator column for `value` of `column`.
pub fn indicator_name(column: &str, value: &str) -> String {
    format!("{column}_{value}")
}

/// Replace each categorical column with at most `max_categories` distinct
/// values by one boolean column per category, except the lexicographically
/// smallest, which serves as the reference.
///
/// Indicators are appended after the remaining columns, grouped by source
/// column in frame order. Columns above the cap are left untouched.
pub fn encode_categoricals(
    frame: &mut CleanFrame,
    max_categories: usize,
) -> PolarsResult<EncodingReport> {
    let mut report = EncodingReport::default();
    let mut indicators: Vec<Column> = Vec::new();
    let mut taken: BTreeSet<String> = frame.column_names().into_iter().collect();

    for name in frame.categorical_columns() {
        if frame.data().column(&name)?.dtype() != &DataType::String {
            continue;
        }
        let values = string_values(frame.data(), &name)?;
        let categories: BTreeSet<&str> = values.iter().flatten().map(String::as_str).collect();
        if categories.len() > max_categories {
            debug!(column = %name, distinct = categories.len(), "too many categories to encode");
            report.skipped_high_cardinality.push(name);
            continue;
        }

        let mut categories = categories.into_iter();
        let reference = categories.next().map(str::to_string);
        let mut encoded = EncodedColumn {
            column: name.clone(),
            reference,
            indicators: Vec::new(),
        };
        for category in categories {
            let indicator = unique_name(&mut taken, indicator_name(&name, category));
            let flags: Vec<bool> = values
                .iter()
                .map(|value| value.as_deref() == Some(category))
                .collect();
            indicators.push(BooleanChunked::from_slice(indicator.as_str().into(), &flags).into_column());
            encoded.indicators.push(indicator);
        }
        debug!(column = %name, indicators = encoded.indicators.len(), "encoded column");
        report.encoded.push(encoded);
    }

    for encoded in &report.encoded {
        frame.drop_column(&encoded.column)?;
    }
    for column in indicators {
        frame.set_column(column, ColumnKind::Boolean)?;
    }
    Ok(report)
}

fn unique_name(taken: &mut BTreeSet<String>, candidate: String) -> String {
    let mut name = candidate.clone();
    let mut suffix = 1;
    while taken.contains(&name) {
        name = format!("{candidate}_{suffix}");
        suffix += 1;
    }
    taken.insert(name.clone());
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clashing_indicator_names_get_suffix() {
        let mut taken: BTreeSet<String> = ["Country_France".to_string()].into_iter().collect();
        assert_eq!(
            unique_name(&mut taken, "Country_France".to_string()),
            "Country_France_1"
        );
        assert_eq!(unique_name(&mut taken, "Country_Spain".to_string()), "Country_Spain");
    }
}

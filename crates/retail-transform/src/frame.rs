//! Table representation threaded through the cleaning stages.
//!
//! [`CleanFrame`] wraps a polars `DataFrame` together with the semantic
//! [`ColumnKind`] of each column. Stages mutate the table only through
//! this type so the kinds stay in step with the frame's columns.

use std::collections::BTreeMap;

use polars::prelude::{BooleanChunked, Column, DataFrame, DataType, NewChunkedArray, PolarsResult};

use retail_ingest::LoadedTable;
use retail_model::ColumnKind;

/// Kind a column gets when nothing more specific is known.
pub fn kind_for_dtype(dtype: &DataType) -> ColumnKind {
    match dtype {
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64 => ColumnKind::Integer,
        DataType::Float32 | DataType::Float64 => ColumnKind::Float,
        DataType::Boolean => ColumnKind::Boolean,
        DataType::Date | DataType::Datetime(_, _) => ColumnKind::DateTime,
        _ => ColumnKind::Categorical,
    }
}

/// A table being cleaned.
#[derive(Debug, Clone)]
pub struct CleanFrame {
    data: DataFrame,
    kinds: BTreeMap<String, ColumnKind>,
}

impl CleanFrame {
    /// Pair a frame with known kinds; columns without an entry get the
    /// kind implied by their dtype, entries without a column are dropped.
    pub fn new(data: DataFrame, mut kinds: BTreeMap<String, ColumnKind>) -> Self {
        let mut resolved = BTreeMap::new();
        for column in data.get_columns() {
            let name = column.name().to_string();
            let kind = kinds
                .remove(&name)
                .unwrap_or_else(|| kind_for_dtype(column.dtype()));
            resolved.insert(name, kind);
        }
        Self {
            data,
            kinds: resolved,
        }
    }

    /// Build a frame whose kinds all come from the dtypes.
    pub fn from_data(data: DataFrame) -> Self {
        Self::new(data, BTreeMap::new())
    }

    pub fn data(&self) -> &DataFrame {
        &self.data
    }

    pub fn into_data(self) -> DataFrame {
        self.data
    }

    pub fn kinds(&self) -> &BTreeMap<String, ColumnKind> {
        &self.kinds
    }

    pub fn kind(&self, name: &str) -> Option<ColumnKind> {
        self.kinds.get(name).copied()
    }

    pub fn height(&self) -> usize {
        self.data.height()
    }

    pub fn width(&self) -> usize {
        self.data.width()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.kinds.contains_key(name)
    }

    /// Column names in frame order.
    pub fn column_names(&self) -> Vec<String> {
        self.data
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect()
    }

    /// Names of the columns whose kind satisfies `predicate`, in frame order.
    pub fn columns_where<F>(&self, predicate: F) -> Vec<String>
    where
        F: Fn(ColumnKind) -> bool,
    {
        self.column_names()
            .into_iter()
            .filter(|name| self.kind(name).is_some_and(&predicate))
            .collect()
    }

    pub fn numeric_columns(&self) -> Vec<String> {
        self.columns_where(ColumnKind::is_numeric)
    }

    pub fn categorical_columns(&self) -> Vec<String> {
        self.columns_where(|kind| kind == ColumnKind::Categorical)
    }

    pub fn missing_count(&self) -> usize {
        self.data
            .get_columns()
            .iter()
            .map(|column| column.null_count())
            .sum()
    }

    pub fn column_missing(&self, name: &str) -> usize {
        self.data
            .column(name)
            .map(|column| column.null_count())
            .unwrap_or(0)
    }

    /// Replace a column of the same name, or append it when new.
    pub fn set_column(&mut self, column: Column, kind: ColumnKind) -> PolarsResult<()> {
        let name = column.name().to_string();
        self.data.with_column(column)?;
        self.kinds.insert(name, kind);
        Ok(())
    }

    pub fn set_kind(&mut self, name: &str, kind: ColumnKind) {
        if let Some(entry) = self.kinds.get_mut(name) {
            *entry = kind;
        }
    }

    pub fn drop_column(&mut self, name: &str) -> PolarsResult<()> {
        self.data = self.data.drop(name)?;
        self.kinds.remove(name);
        Ok(())
    }

    /// Keep the rows whose flag is true; returns how many were removed.
    pub fn retain_rows(&mut self, keep: &[bool]) -> PolarsResult<usize> {
        let before = self.data.height();
        if keep.iter().all(|flag| *flag) {
            return Ok(0);
        }
        let mask = BooleanChunked::from_slice("keep".into(), keep);
        self.data = self.data.filter(&mask)?;
        Ok(before - self.data.height())
    }

    pub fn estimated_size(&self) -> usize {
        self.data.estimated_size()
    }
}

impl From<LoadedTable> for CleanFrame {
    fn from(table: LoadedTable) -> Self {
        Self::new(table.data, table.kinds)
    }
}

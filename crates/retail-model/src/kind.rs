use serde::{Deserialize, Serialize};

/// Semantic kind of a column.
///
/// The polars dtype says how values are stored; the kind says how the
/// cleaning stages treat the column. Textual columns are `Categorical`
/// even though they are stored as strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Integer,
    Float,
    Categorical,
    DateTime,
    /// Indicator column produced by categorical encoding.
    Boolean,
}

impl ColumnKind {
    /// Integer and float columns take part in the numeric stages.
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Categorical => "categorical",
            Self::DateTime => "datetime",
            Self::Boolean => "boolean",
        }
    }
}

impl std::fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

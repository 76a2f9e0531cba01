use serde::{Deserialize, Serialize};

/// The cleaning stages, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Load,
    TypeOptimization,
    Imputation,
    OutlierRemoval,
    Winsorization,
    LogTransform,
    DateStandardization,
    CategoricalEncoding,
    Deduplication,
    Persist,
}

impl PipelineStage {
    pub const ALL: [PipelineStage; 10] = [
        Self::Load,
        Self::TypeOptimization,
        Self::Imputation,
        Self::OutlierRemoval,
        Self::Winsorization,
        Self::LogTransform,
        Self::DateStandardization,
        Self::CategoricalEncoding,
        Self::Deduplication,
        Self::Persist,
    ];

    /// Short identifier used in log spans.
    pub fn name(self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::TypeOptimization => "type_optimization",
            Self::Imputation => "imputation",
            Self::OutlierRemoval => "outlier_removal",
            Self::Winsorization => "winsorization",
            Self::LogTransform => "log_transform",
            Self::DateStandardization => "date_standardization",
            Self::CategoricalEncoding => "categorical_encoding",
            Self::Deduplication => "deduplication",
            Self::Persist => "persist",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Load => "Read the CSV source in bounded segments and infer column types",
            Self::TypeOptimization => {
                "Narrow numeric columns losslessly and mark text columns categorical"
            }
            Self::Imputation => {
                "Fill gaps with mean/mode, forward/backward fill, interpolate, then drop leftovers"
            }
            Self::OutlierRemoval => "Drop rows whose z-score exceeds the threshold in any numeric column",
            Self::Winsorization => "Clamp numeric columns to the configured percentile range",
            Self::LogTransform => "Replace non-positive values and apply ln(1 + x)",
            Self::DateStandardization => "Parse the timestamp column and drop unparsable rows",
            Self::CategoricalEncoding => "Expand low-cardinality categorical columns into indicators",
            Self::Deduplication => "Remove rows identical to an earlier row",
            Self::Persist => "Write the cleaned table as CSV, overwriting prior output",
        }
    }

    /// One-based position in the pipeline.
    pub fn ordinal(self) -> usize {
        Self::ALL
            .iter()
            .position(|stage| *stage == self)
            .map_or(0, |idx| idx + 1)
    }
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

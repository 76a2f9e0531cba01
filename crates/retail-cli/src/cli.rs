//! CLI argument definitions for the retail cleaner.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use retail_model::options::{DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH};
use retail_model::{CleaningOptions, SourceEncoding};

#[derive(Parser)]
#[command(
    name = "retail-clean",
    version,
    about = "Clean a retail transactions CSV for analysis",
    long_about = "Clean a retail transactions CSV for analysis.\n\n\
                  Loads the source in segments, imputes gaps, removes and clamps outliers,\n\
                  log-transforms numeric columns, standardizes timestamps, encodes\n\
                  low-cardinality categories and removes duplicate rows."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the full cleaning pipeline and write the cleaned CSV.
    Clean(CleanArgs),

    /// List the pipeline stages in the order they run.
    Stages,
}

#[derive(Parser)]
pub struct CleanArgs {
    /// Source CSV file.
    #[arg(value_name = "INPUT", default_value = DEFAULT_INPUT_PATH)]
    pub input: PathBuf,

    /// Destination for the cleaned CSV (overwritten if present).
    #[arg(long = "output", short = 'o', value_name = "PATH", default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    /// Records decoded per load segment.
    #[arg(long = "chunk-size", value_name = "N", default_value_t = CleaningOptions::default().chunk_size)]
    pub chunk_size: usize,

    /// Absolute z-score above which a row is dropped.
    #[arg(long = "z-threshold", value_name = "F", default_value_t = CleaningOptions::default().z_threshold)]
    pub z_threshold: f64,

    /// Lower winsorization quantile.
    #[arg(long = "lower-percentile", value_name = "F", default_value_t = CleaningOptions::default().lower_percentile)]
    pub lower_percentile: f64,

    /// Upper winsorization quantile.
    #[arg(long = "upper-percentile", value_name = "F", default_value_t = CleaningOptions::default().upper_percentile)]
    pub upper_percentile: f64,

    /// Largest distinct-value count a column may have and still be encoded.
    #[arg(long = "max-categories", value_name = "N", default_value_t = CleaningOptions::default().max_categories)]
    pub max_categories: usize,

    /// Column holding transaction timestamps.
    #[arg(long = "date-column", value_name = "NAME", default_value_t = CleaningOptions::default().date_column)]
    pub date_column: String,

    /// Character encoding of the source file.
    #[arg(long = "encoding", value_enum, default_value = "latin1")]
    pub encoding: EncodingArg,

    /// Also write the cleaning report as JSON.
    #[arg(long = "report-json", value_name = "PATH")]
    pub report_json: Option<PathBuf>,
}

impl CleanArgs {
    pub fn options(&self) -> CleaningOptions {
        CleaningOptions::new()
            .with_chunk_size(self.chunk_size)
            .with_encoding(self.encoding.into())
            .with_z_threshold(self.z_threshold)
            .with_percentiles(self.lower_percentile, self.upper_percentile)
            .with_max_categories(self.max_categories)
            .with_date_column(self.date_column.clone())
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum EncodingArg {
    Latin1,
    Utf8,
}

impl From<EncodingArg> for SourceEncoding {
    fn from(value: EncodingArg) -> Self {
        match value {
            EncodingArg::Latin1 => SourceEncoding::Latin1,
            EncodingArg::Utf8 => SourceEncoding::Utf8,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use retail_ingest::load_table;
use retail_model::{CleaningOptions, CleaningReport};
use retail_output::write_csv;
use retail_transform::{CleanFrame, CleaningPipeline};

/// Everything a `clean` run needs.
#[derive(Debug, Clone)]
pub struct CleanJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub options: CleaningOptions,
    /// Also write the report as JSON here.
    pub report_json: Option<PathBuf>,
}

pub fn run_clean(job: &CleanJob) -> Result<CleaningReport> {
    let run_span = info_span!("clean", input = %job.input.display());
    let _run_guard = run_span.enter();
    let mut report = CleaningReport::default();

    // =========================================================================
    // Stage 1: Load - chunked read, decoding, type inference
    // =========================================================================
    let load_start = Instant::now();
    let table = info_span!("load", chunk_size = job.options.chunk_size)
        .in_scope(|| load_table(&job.input, &job.options))
        .with_context(|| format!("load {}", job.input.display()))?;
    info!(
        rows = table.report.rows,
        columns = table.report.columns,
        chunks = table.report.chunks,
        missing_cells = table.report.missing_cells,
        duration_ms = load_start.elapsed().as_millis(),
        "load complete"
    );
    report.load = table.report.clone();

    // =========================================================================
    // Stages 2-9: Types, imputation, outliers, transforms, encoding, dedupe
    // =========================================================================
    let pipeline = CleaningPipeline::new(job.options.clone());
    let frame = pipeline
        .run(CleanFrame::from(table), &mut report)
        .context("clean table")?;

    // =========================================================================
    // Stage 10: Persist
    // =========================================================================
    let persist_start = Instant::now();
    let mut data = frame.into_data();
    info_span!("persist", output = %job.output.display())
        .in_scope(|| write_csv(&mut data, &job.output))
        .with_context(|| format!("write {}", job.output.display()))?;
    info!(
        rows = data.height(),
        columns = data.width(),
        duration_ms = persist_start.elapsed().as_millis(),
        "persist complete"
    );

    if let Some(path) = &job.report_json {
        write_report_json(&report, path)?;
    }
    Ok(report)
}

/// Write `report` as pretty-printed JSON.
pub fn write_report_json(report: &CleaningReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("serialize report")?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

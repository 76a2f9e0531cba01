use std::path::Path;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use retail_model::{CleaningReport, PipelineStage};

pub fn print_summary(report: &CleaningReport, output: &Path) {
    println!("Output: {}", output.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Stage"),
        header_cell("Rows removed"),
        header_cell("Cells changed"),
        header_cell("Details"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);

    let imputation = &report.imputation;
    let filled = imputation.mean_filled
        + imputation.mode_filled
        + imputation.forward_backward_filled
        + imputation.interpolated;
    let encoded_indicators: usize = report
        .encoding
        .encoded
        .iter()
        .map(|column| column.indicators.len())
        .sum();

    table.add_row(vec![
        stage_cell(PipelineStage::Load),
        dim_cell("-"),
        dim_cell("-"),
        Cell::new(format!(
            "{} rows, {} columns in {} segment(s); {} missing cells",
            report.load.rows, report.load.columns, report.load.chunks, report.load.missing_cells
        )),
    ]);
    table.add_row(vec![
        stage_cell(PipelineStage::TypeOptimization),
        dim_cell("-"),
        dim_cell("-"),
        Cell::new(format!(
            "{} narrowed, {} categorical; ~{} -> ~{} bytes",
            report.types.narrowed_columns.len(),
            report.types.categorical_columns.len(),
            report.types.estimated_bytes_before,
            report.types.estimated_bytes_after
        )),
    ]);
    table.add_row(vec![
        stage_cell(PipelineStage::Imputation),
        count_cell(imputation.rows_dropped, Color::Yellow),
        count_cell(filled, Color::Green),
        Cell::new(format!(
            "missing {} -> {}; mean {}, mode {}, fill {}, interpolated {}{}",
            imputation.missing_before,
            imputation.missing_after,
            imputation.mean_filled,
            imputation.mode_filled,
            imputation.forward_backward_filled,
            imputation.interpolated,
            dropped_columns(&imputation.columns_dropped)
        )),
    ]);
    table.add_row(vec![
        stage_cell(PipelineStage::OutlierRemoval),
        count_cell(report.outlier_rows_removed, Color::Yellow),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    table.add_row(vec![
        stage_cell(PipelineStage::Winsorization),
        dim_cell("-"),
        count_cell(report.winsorized_cells, Color::Green),
        dim_cell("-"),
    ]);
    table.add_row(vec![
        stage_cell(PipelineStage::LogTransform),
        dim_cell("-"),
        count_cell(report.log_transform.replaced_non_positive, Color::Green),
        Cell::new(format!(
            "{} column(s) transformed, {} skipped",
            report.log_transform.columns.len(),
            report.log_transform.skipped_columns.len()
        )),
    ]);
    match &report.dates {
        Some(dates) => table.add_row(vec![
            stage_cell(PipelineStage::DateStandardization),
            count_cell(dates.rows_dropped, Color::Yellow),
            dim_cell("-"),
            Cell::new(format!("{}: {} parsed", dates.column, dates.parsed)),
        ]),
        None => table.add_row(vec![
            stage_cell(PipelineStage::DateStandardization),
            dim_cell("-"),
            dim_cell("-"),
            Cell::new("skipped").fg(Color::Yellow),
        ]),
    };
    table.add_row(vec![
        stage_cell(PipelineStage::CategoricalEncoding),
        dim_cell("-"),
        dim_cell("-"),
        Cell::new(format!(
            "{} column(s) -> {} indicator(s); {} over the cap",
            report.encoding.encoded.len(),
            encoded_indicators,
            report.encoding.skipped_high_cardinality.len()
        )),
    ]);
    table.add_row(vec![
        stage_cell(PipelineStage::Deduplication),
        count_cell(report.duplicates_removed, Color::Yellow),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(report.rows_removed()).add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(format!(
            "{} rows, {} columns written",
            report.final_rows, report.final_columns
        ))
        .add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    if report.has_warnings() {
        eprintln!("Warnings:");
        for warning in &report.warnings {
            eprintln!("- {warning}");
        }
    }
}

pub fn print_stages() {
    let mut table = Table::new();
    table.set_header(vec![header_cell("#"), header_cell("Stage"), header_cell("Description")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for stage in PipelineStage::ALL {
        table.add_row(vec![
            Cell::new(stage.ordinal()),
            stage_cell(stage),
            Cell::new(stage.description()),
        ]);
    }
    println!("{table}");
}

fn dropped_columns(columns: &[String]) -> String {
    if columns.is_empty() {
        String::new()
    } else {
        format!("; dropped {}", columns.join(", "))
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn stage_cell(stage: PipelineStage) -> Cell {
    Cell::new(stage.name())
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

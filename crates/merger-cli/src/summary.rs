use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use merger_core::{Discovery, FileOutcome, FileStatus, RunReport};

use crate::commands::RunOutcome;

pub fn print_run_summary(outcome: &RunOutcome) {
    let report = &outcome.report;
    println!("Input: {}", outcome.config.input_dir.display());
    println!("Output: {}", outcome.config.output_dir.display());
    let mapping_label = if outcome.config.reuses_mapping() {
        "reused"
    } else {
        "saved"
    };
    println!(
        "Field mapping ({mapping_label}): {}",
        outcome.config.field_mapping_file.display()
    );
    println!("Schema: {}", report.schema().join(", "));

    println!("{}", files_table(&report.discovery.files));
    println!("{}", chunks_table(report));

    if !report.unmapped_fields.is_empty() {
        eprintln!("Unmapped fields (dropped):");
        for field in &report.unmapped_fields {
            eprintln!("- {field}");
        }
    }
}

pub fn print_fields(discovery: &Discovery) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("#"), header_cell("Raw field")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (index, field) in discovery.fields.iter().enumerate() {
        table.add_row(vec![Cell::new(index + 1), Cell::new(field)]);
    }
    println!("{table}");
    println!(
        "{} fields in {} files ({} skipped)",
        discovery.fields.len(),
        discovery.files_read(),
        discovery.files_skipped()
    );
}

fn files_table(files: &[FileOutcome]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Input"),
        header_cell("Records"),
        header_cell("Status"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for outcome in files {
        let name = outcome
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| outcome.path.display().to_string());
        let row = match &outcome.status {
            FileStatus::Read { records } => vec![
                Cell::new(name),
                Cell::new(records),
                Cell::new("read").fg(Color::Green),
            ],
            FileStatus::Skipped { reason } => vec![
                Cell::new(name).fg(Color::DarkGrey),
                dim_cell("-"),
                Cell::new(reason).fg(Color::Yellow),
            ],
        };
        table.add_row(row);
    }
    table
}

fn chunks_table(report: &RunReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Chunk"),
        header_cell("Rows"),
        header_cell("File"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 1, CellAlignment::Right);
    for chunk in &report.transform.chunks {
        let location = chunk
            .location
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            Cell::new(chunk.sequence),
            Cell::new(chunk.rows),
            Cell::new(location),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(report.transform.records).add_attribute(Attribute::Bold),
        dim_cell(format!("{} files", report.transform.chunks.len())),
    ]);
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
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

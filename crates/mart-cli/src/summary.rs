//! Run summary tables.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::commands::{RunResult, table_schemas};

pub fn print_run_summary(result: &RunResult) {
    println!("Date: {}", result.date.format("%Y-%m-%d"));
    if result.dry_run {
        println!("Mode: dry run (nothing written)");
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Rows"),
        header_cell("Output"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for outcome in &result.tables {
        let output = match &outcome.path {
            Some(path) => Cell::new(path.display().to_string()),
            None => dim_cell("-"),
        };
        table.add_row(vec![
            Cell::new(&outcome.table)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(outcome.rows),
            output,
        ]);
    }
    println!("{table}");

    println!(
        "Raw records: {}  duplicates removed: {}  rows dropped: {}",
        result.raw_records, result.duplicates_removed, result.rows_dropped
    );
}

pub fn print_schemas() {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Table"), header_cell("Columns")]);
    apply_table_style(&mut table);
    for (name, columns) in table_schemas() {
        table.add_row(vec![
            Cell::new(name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(columns.join(", ")),
        ]);
    }
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
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

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use predial_model::{FolderInventory, FolderValidation};

use crate::types::{DiffOutcome, ReportOutcome};

pub fn print_folder_validation(validation: &FolderValidation) {
    println!("{}", folder_table(validation));
    print_name_list(
        "Missing in previous vintage",
        &validation.missing_in_previous,
    );
    print_name_list("Missing in current vintage", &validation.missing_in_current);
}

pub fn print_report_summary(outcome: &ReportOutcome) {
    println!("Report: {}", outcome.report_path.display());
    println!("{}", folder_table(&outcome.validation));
    println!("{}", municipality_table(outcome));
}

pub fn print_diff(outcome: &DiffOutcome) {
    println!("Previous codes: {}", outcome.previous_count);
    println!("Current codes: {}", outcome.current_count);
    println!("New codes: {}", outcome.new_codes.len());
    for code in &outcome.new_codes {
        println!("- {code}");
    }
}

pub fn folder_table(validation: &FolderValidation) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Vintage"),
        header_cell("Folder"),
        header_cell("Files"),
        header_cell("Valid"),
        header_cell("Invalid"),
        header_cell("Missing"),
    ]);
    apply_table_style(&mut table);
    for column in 2..6 {
        align_column(&mut table, column, CellAlignment::Right);
    }
    table.add_row(inventory_row(
        "previous",
        &validation.previous,
        validation.missing_in_previous.len(),
    ));
    table.add_row(inventory_row(
        "current",
        &validation.current,
        validation.missing_in_current.len(),
    ));
    table
}

fn municipality_table(outcome: &ReportOutcome) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Municipality"),
        header_cell("File"),
        header_cell("Ownerless"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for municipality in &outcome.report.municipalities {
        table.add_row(vec![
            Cell::new(&municipality.municipality_code)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&municipality.file_name),
            count_cell(municipality.result.count, Color::Yellow),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        count_cell(outcome.report.total_count(), Color::Yellow).add_attribute(Attribute::Bold),
    ]);
    table
}

fn inventory_row(label: &str, inventory: &FolderInventory, missing: usize) -> Vec<Cell> {
    vec![
        Cell::new(label)
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold),
        Cell::new(inventory.folder.display()),
        Cell::new(inventory.all_files.len()),
        Cell::new(inventory.valid_files.len()),
        count_cell(inventory.invalid_files.len(), Color::Yellow),
        count_cell(missing, Color::Red),
    ]
}

fn print_name_list(title: &str, names: &[String]) {
    if names.is_empty() {
        println!("{title}: none");
        return;
    }
    println!("{title}:");
    for name in names {
        println!("- {name}");
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
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

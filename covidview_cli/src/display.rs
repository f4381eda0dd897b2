use std::path::PathBuf;

use comfy_table::{presets::NOTHING, *};
use covidview::chart::ChartKind;
use covidview::summary::{DatasetInfo, LatestStats};

fn plain_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_style(comfy_table::TableComponent::BottomBorder, '─')
        .set_style(comfy_table::TableComponent::MiddleHeaderIntersections, '─')
        .set_style(comfy_table::TableComponent::HeaderLines, '─')
        .set_style(comfy_table::TableComponent::BottomBorderIntersections, '─')
        .set_style(comfy_table::TableComponent::TopBorder, '─')
        .set_style(comfy_table::TableComponent::TopBorderIntersections, '─');
    table
}

fn right_align(table: &mut Table, column: usize) {
    if let Some(column) = table.column_mut(column) {
        column.set_cell_alignment(CellAlignment::Right);
    }
}

/// Human readable byte count, e.g. `12.3 KB`
pub fn format_bytes(bytes: usize) -> String {
    const UNITS: [&str; 4] = ["bytes", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} {}", UNITS[0])
    } else {
        format!("{size:.1} {}", UNITS[unit])
    }
}

pub fn display_charts(country: &str, charts: &[(ChartKind, PathBuf)]) {
    let mut table = plain_table();
    table.set_header(vec![
        Cell::new("Chart").add_attribute(Attribute::Bold),
        Cell::new("File").add_attribute(Attribute::Bold),
    ]);
    for (kind, path) in charts {
        table.add_row(vec![kind.title(country), path.display().to_string()]);
    }
    println!("\n{}", table);
}

pub fn display_dataset_info(info: &DatasetInfo) {
    println!("\n--- Dataset Info ---");
    println!("{} entries, {} columns", info.rows, info.columns.len());
    let mut table = plain_table();
    table.set_header(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Column").add_attribute(Attribute::Bold),
        Cell::new("Non-Null Count").add_attribute(Attribute::Bold),
        Cell::new("Dtype").add_attribute(Attribute::Bold),
    ]);
    for (idx, column) in info.columns.iter().enumerate() {
        table.add_row(vec![
            idx.to_string(),
            column.name.clone(),
            format!("{} non-null", column.non_null),
            column.dtype.clone(),
        ]);
    }
    right_align(&mut table, 2);
    println!("{}", table);
    println!("memory usage: {}", format_bytes(info.estimated_size));
}

pub fn display_null_counts(null_counts: &[(String, usize)]) {
    println!("\n--- Null Values ---");
    let mut table = plain_table();
    for (name, count) in null_counts {
        table.add_row(vec![name.clone(), count.to_string()]);
    }
    right_align(&mut table, 1);
    println!("{}", table);
}

pub fn display_columns(columns: &[String]) {
    println!("\n--- Columns ---");
    println!("{columns:?}");
}

pub fn display_latest(country: &str, latest: &LatestStats) {
    println!("\n--- Latest Stats for {country} ---");
    print!("{latest}");
}

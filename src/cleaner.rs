use tracing::debug;

use crate::settings::ReplacementMap;
use crate::table::Table;

const SUMMARY_LABELS: &[&str] = &["net", "total"];

pub fn clean(table: &Table, replacements: &ReplacementMap) -> Table {
    let mut out = table.clone();
    drop_empty_rows(&mut out);
    drop_summary_row(&mut out);
    trim_cells(&mut out);
    apply_replacements(&mut out, replacements);
    out
}

fn drop_empty_rows(table: &mut Table) {
    let before = table.rows.len();
    table
        .rows
        .retain(|row| row.iter().any(|cell| !cell.trim().is_empty()));
    debug!(dropped = before - table.rows.len(), "dropped empty rows");
}

/// Only the last row is a candidate; a Net/Total line elsewhere stays.
fn drop_summary_row(table: &mut Table) {
    let is_summary = table
        .rows
        .last()
        .and_then(|row| row.get(1))
        .map(|cell| SUMMARY_LABELS.contains(&cell.trim().to_lowercase().as_str()))
        .unwrap_or(false);
    if is_summary {
        table.rows.pop();
        debug!("dropped trailing summary row");
    }
}

fn trim_cells(table: &mut Table) {
    for cell in table.header.iter_mut().chain(table.rows.iter_mut().flatten()) {
        let trimmed = cell.trim();
        if trimmed.len() != cell.len() {
            *cell = trimmed.to_string();
        }
    }
}

fn apply_replacements(table: &mut Table, replacements: &ReplacementMap) {
    if replacements.is_empty() {
        return;
    }
    // Header labels are column names, not values.
    for cell in table.rows.iter_mut().flatten() {
        if let Some(new) = replacements.get(cell) {
            *cell = new.to_string();
        }
    }
}

use comfy_table::{Cell, Table};

use crate::validator::Violation;

pub const DIVIDER_WIDTH: usize = 50;

pub fn divider() -> String {
    "-".repeat(DIVIDER_WIDTH)
}

/// Spreadsheet line of a data row: the header is line 1.
pub fn line_number(row: usize) -> usize {
    row + 2
}

/// Render violations of one check as a table: a line column followed by the
/// fields of the first violation.
pub fn violation_table(violations: &[&Violation]) -> Table {
    let mut table = Table::new();
    let Some(first) = violations.first() else {
        return table;
    };
    let mut header = vec!["Line".to_string()];
    header.extend(first.fields.iter().map(|(name, _)| name.clone()));
    table.set_header(header);
    for v in violations {
        let mut row = vec![Cell::new(line_number(v.row))];
        row.extend(v.fields.iter().map(|(_, value)| Cell::new(value)));
        table.add_row(row);
    }
    table
}

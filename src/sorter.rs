use chrono::NaiveDate;
use tracing::debug;

use crate::dates::{format_date, parse_date};
use crate::error::{Result, TidyError};
use crate::grid::DATE_HEADER;
use crate::table::Table;

/// Order rows by ascending date and rewrite parseable dates as MM/DD/YYYY.
///
/// The sort is stable. Rows whose date does not parse keep their original
/// text and go after all dated rows, in their original relative order.
pub fn sort_by_date(table: &Table) -> Result<Table> {
    let col = table
        .column_index(DATE_HEADER)
        .ok_or_else(|| TidyError::ColumnNotFound(DATE_HEADER.to_string()))?;

    let mut keyed: Vec<(Option<NaiveDate>, &Vec<String>)> = table
        .rows
        .iter()
        .map(|row| (row.get(col).and_then(|c| parse_date(c)), row))
        .collect();
    keyed.sort_by_key(|(date, _)| (date.is_none(), *date));

    let undated = keyed.iter().filter(|(d, _)| d.is_none()).count();
    if undated > 0 {
        debug!(undated, "rows without a parseable date moved to the end");
    }

    let rows = keyed
        .into_iter()
        .map(|(date, row)| {
            let mut row = row.clone();
            if let Some(d) = date {
                row[col] = format_date(d);
            }
            row
        })
        .collect();

    Ok(Table {
        header: table.header.clone(),
        rows,
    })
}

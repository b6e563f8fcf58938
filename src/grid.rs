use std::path::Path;

use tracing::debug;

use crate::error::Result;

/// Label that anchors the real table inside an exported report.
pub const DATE_HEADER: &str = "Date";

/// Cell B16 in the usual export template, checked before scanning.
pub const FAST_PATH_CELL: (usize, usize) = (15, 1);

/// Raw spreadsheet contents with no header assumed. Rows may be ragged;
/// cells past the end of a row read as empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderLocation {
    Found { row: usize, col: usize },
    NotFound,
}

impl Grid {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);
        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        Ok(Self::new(rows))
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Length of the longest row.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Row `row` from column `from` to the grid width, padded with empty cells.
    pub fn row_slice(&self, row: usize, from: usize) -> Vec<String> {
        (from..self.width())
            .map(|col| self.cell(row, col).to_string())
            .collect()
    }

    /// Find the first cell whose trimmed value equals `label`.
    ///
    /// The template cell B16 is probed first; otherwise rows are scanned top to
    /// bottom and each row left to right.
    pub fn locate(&self, label: &str) -> HeaderLocation {
        let (fr, fc) = FAST_PATH_CELL;
        if self.height() > fr && self.width() > fc && self.cell(fr, fc).trim() == label {
            debug!(row = fr, col = fc, "header found at template cell");
            return HeaderLocation::Found { row: fr, col: fc };
        }

        for (r, row) in self.rows.iter().enumerate() {
            if let Some(c) = row.iter().position(|cell| cell.trim() == label) {
                debug!(row = r, col = c, "header found by scan");
                return HeaderLocation::Found { row: r, col: c };
            }
        }
        HeaderLocation::NotFound
    }
}

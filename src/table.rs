use std::path::Path;

use crate::error::Result;
use crate::grid::Grid;

/// A header row plus data rows of the same width.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Cut the grid down to the rectangle whose top-left corner is the header
    /// cell at (`row`, `col`). Everything above or to the left is dropped.
    pub fn reshape(grid: &Grid, row: usize, col: usize) -> Self {
        let header = grid.row_slice(row, col);
        let rows = (row + 1..grid.height())
            .map(|r| grid.row_slice(r, col))
            .collect();
        Self { header, rows }
    }

    /// Read a CSV whose first record is the header.
    pub fn from_path(path: &Path) -> Result<Self> {
        let grid = Grid::from_path(path)?;
        Ok(Self::reshape(&grid, 0, 0))
    }

    pub fn width(&self) -> usize {
        self.header.len()
    }

    /// Index of the first column named `name`. Duplicate labels resolve to the
    /// leftmost one.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }

    pub fn to_csv_bytes(&self) -> Result<Vec<u8>> {
        let mut wtr = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(Vec::new());
        wtr.write_record(&self.header)?;
        for row in &self.rows {
            wtr.write_record(row)?;
        }
        Ok(wtr.into_inner().map_err(|e| e.into_error())?)
    }

    /// Serialize fully before touching the file so a failed encode leaves the
    /// source intact.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let bytes = self.to_csv_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

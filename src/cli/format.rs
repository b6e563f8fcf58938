use std::path::Path;

use tracing::debug;

use crate::cleaner::clean;
use crate::cli::run_batch;
use crate::error::{Result, TidyError};
use crate::files::collect_csv_files;
use crate::grid::{Grid, HeaderLocation, DATE_HEADER};
use crate::settings::{config_dir, ReplacementMap, REPLACEMENT_MAP_FILE};
use crate::table::Table;

pub fn run(path: &Path, config: Option<&Path>) -> Result<bool> {
    let files = collect_csv_files(path)?;
    let replacements = ReplacementMap::load(&config_dir(config).join(REPLACEMENT_MAP_FILE))?;

    let failed = run_batch(&files, |file| {
        format_file(file, &replacements)?;
        println!("{} reformatted successfully.", file.display());
        Ok(())
    });
    Ok(failed == 0)
}

/// Reshape the file around its 'Date' header, clean it and overwrite it.
pub fn format_file(file: &Path, replacements: &ReplacementMap) -> Result<()> {
    let grid = Grid::from_path(file)?;
    let HeaderLocation::Found { row, col } = grid.locate(DATE_HEADER) else {
        return Err(TidyError::HeaderNotFound(DATE_HEADER.to_string()));
    };
    let table = clean(&Table::reshape(&grid, row, col), replacements);
    debug!(rows = table.rows.len(), cols = table.width(), "formatted");
    table.write_to(file)
}

use std::path::Path;

use crate::cli::run_batch;
use crate::error::Result;
use crate::files::collect_csv_files;
use crate::sorter::sort_by_date;
use crate::table::Table;

pub fn run(path: &Path) -> Result<bool> {
    let files = collect_csv_files(path)?;
    let failed = run_batch(&files, |file| {
        sort_file(file)?;
        println!("{} sorted by date successfully.", file.display());
        Ok(())
    });
    Ok(failed == 0)
}

/// Sort an already formatted report (header on the first line) in place.
pub fn sort_file(file: &Path) -> Result<()> {
    let table = Table::from_path(file)?;
    sort_by_date(&table)?.write_to(file)
}

use std::path::{Path, PathBuf};

use glob::glob;
use tracing::warn;

use crate::error::{Result, TidyError};

fn is_csv(path: &Path) -> bool {
    path.extension()
        .map_or(false, |e| e.eq_ignore_ascii_case("csv"))
}

/// Expand a CLI path argument into the CSV files to process: the file itself,
/// or every `*.csv` below a directory in sorted order.
pub fn collect_csv_files(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.exists() {
        return Err(TidyError::PathNotFound(path.to_path_buf()));
    }
    if path.is_file() {
        if !is_csv(path) {
            return Err(TidyError::NotCsv(path.to_path_buf()));
        }
        return Ok(vec![path.to_path_buf()]);
    }

    let pattern = format!("{}/**/*", glob::Pattern::escape(&path.to_string_lossy()));
    let mut files = Vec::new();
    let entries = glob(&pattern)
        .map_err(|e| TidyError::Config(format!("Bad search pattern {pattern}: {e}")))?;
    for entry in entries {
        match entry {
            Ok(p) if p.is_file() && is_csv(&p) => files.push(p),
            Ok(_) => {}
            Err(e) => warn!("skipping unreadable entry: {e}"),
        }
    }
    files.sort();
    Ok(files)
}

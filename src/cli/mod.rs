pub mod format;
pub mod sort;
pub mod validate;

use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use crate::error::Result;

#[derive(Parser)]
#[command(
    name = "expense-tidy",
    version,
    about = "Normalize, sort and validate expense-report CSV exports."
)]
pub struct Cli {
    /// Directory holding replacement_map.json and the validation rule files
    /// (default: ./config, then ~/.config/expense-tidy)
    #[arg(long = "config-dir", global = true)]
    pub config_dir: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Move the 'Date' header to A1, drop junk rows, trim and replace values.
    Format {
        /// CSV file or directory (searched recursively)
        path: PathBuf,
    },
    /// Sort report rows by Date and rewrite dates as MM/DD/YYYY.
    Sort {
        /// CSV file or directory (searched recursively)
        path: PathBuf,
    },
    /// Check reports against required columns, categories and payment methods.
    Validate {
        /// CSV file or directory (searched recursively)
        path: PathBuf,
    },
}

/// Apply `op` to every file, reporting failures without stopping the batch.
/// Returns the number of files that failed.
pub(crate) fn run_batch<F>(files: &[PathBuf], mut op: F) -> usize
where
    F: FnMut(&Path) -> Result<()>,
{
    let mut failed = 0usize;
    for file in files {
        info!(file = %file.display(), "processing");
        if let Err(e) = op(file) {
            eprintln!("{}", format!("Error: {}: {e}", file.display()).red());
            failed += 1;
        }
    }
    failed
}

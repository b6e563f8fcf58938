use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TidyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Path {} does not exist.", .0.display())]
    PathNotFound(PathBuf),

    #[error("{} is not a .csv file.", .0.display())]
    NotCsv(PathBuf),

    #[error("'{0}' header not found in CSV.")]
    HeaderNotFound(String),

    #[error("'{0}' column not found in CSV.")]
    ColumnNotFound(String),

    #[error("{0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, TidyError>;

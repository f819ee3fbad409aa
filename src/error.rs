use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors that abort an import run.
///
/// Cell-level parse failures are never reported here: the normalizer turns them
/// into [`CellValue::Absent`](crate::data::model::CellValue::Absent) and only counts them.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("failed to read spreadsheet {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("unsupported input extension: .{0}")]
    UnsupportedFormat(String),

    #[error("spreadsheet {0} has no header row")]
    EmptySheet(PathBuf),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot write output {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("required column '{0}' is not present after mapping")]
    MissingColumn(String),

    #[error("invalid column mapping: {0}")]
    InvalidMapping(String),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ImportError>;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Invalid file type for '{}': expected a CSV file", .0.display())]
    InvalidFileType(PathBuf),

    #[error("Failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("Line {line}, column '{column}': {message}")]
    InvalidField {
        line: u64,
        column: &'static str,
        message: String,
    },

    #[error("Uploaded records were rejected: {0}")]
    Rejected(#[from] store::StoreError),
}

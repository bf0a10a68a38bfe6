use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("File not found: {0:?}")]
    MissingFile(PathBuf),

    #[error("Malformed row at line {line}: {reason}")]
    MalformedRow { line: usize, reason: String },

    #[error("Column schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("No records found in: {0}")]
    Empty(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ParseError>;

//! Error types for the data-loader crate.
//!
//! Loading a catalog can fail because the file is missing, the CSV is
//! malformed, or a required column is absent. Missing genre data is NOT
//! an error: it simply produces an empty feature string.

use thiserror::Error;

/// Errors that can occur while loading a movie catalog
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The CSV reader rejected a record
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Row in the catalog couldn't be parsed
    ///
    /// `line` is the 1-based line in the source file (header is line 1)
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: u64,
        reason: String,
    },

    /// The header row lacks a column the catalog needs
    #[error("Missing required column '{column}' in {file}")]
    MissingColumn { file: String, column: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;

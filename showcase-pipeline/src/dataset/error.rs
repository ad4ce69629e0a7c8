//! Dataset error types.

use thiserror::Error;

/// Errors that can occur while reading or writing the repository dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The upstream dataset has not been produced yet.
    #[error("Input file not found: {path}; {hint}")]
    MissingInput { path: String, hint: String },

    /// The dataset lacks a column the stage needs.
    #[error("Column '{column}' missing from {path}; {hint}")]
    MissingColumn {
        path: String,
        column: String,
        hint: String,
    },

    /// Failed to create the dataset directory.
    #[error("Failed to prepare '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read or write CSV content.
    #[error("CSV error in '{path}': {source}")]
    CsvError {
        path: String,
        #[source]
        source: csv::Error,
    },
}

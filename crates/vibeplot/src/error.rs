//! Error types for the VibePlot library.

use std::path::PathBuf;
use thiserror::Error;

use crate::transform::ExpressionError;

/// Main error type for VibePlot operations.
#[derive(Debug, Error)]
pub enum VibeplotError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Empty file or no data to plot.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// A requested column does not exist in the file.
    #[error("Column '{column}' not found in '{file}'")]
    ColumnNotFound { file: String, column: String },

    /// A value in a numeric column could not be parsed.
    #[error("Non-numeric value '{value}' in column '{column}' at row {row}")]
    NonNumeric {
        column: String,
        row: usize,
        value: String,
    },

    /// A transform was applied outside its mathematical domain.
    #[error("Domain error: {0}")]
    Domain(String),

    /// Unknown transform name.
    #[error("Unknown transform: {0}")]
    UnknownTransform(String),

    /// Custom expression failed to parse or evaluate.
    #[error("Expression error: {0}")]
    Expression(#[from] ExpressionError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for VibePlot operations.
pub type Result<T> = std::result::Result<T, VibeplotError>;

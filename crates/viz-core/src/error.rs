use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// All errors produced by the page-view visualizer.
#[derive(Error, Debug)]
pub enum VizError {
    /// The source data file does not exist.
    #[error("Data file not found: {0}")]
    MissingFile(PathBuf),

    /// A file exists but could not be opened or read.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A row could not be turned into a record, or the file shape is wrong.
    #[error("Malformed input in {path} at line {line}: {reason}")]
    MalformedInput {
        path: PathBuf,
        line: u64,
        reason: String,
    },

    /// The same calendar date appears on more than one row; `line` is the
    /// second occurrence.
    #[error("Duplicate date {date} in {path} at line {line}")]
    DuplicateDate {
        path: PathBuf,
        line: u64,
        date: NaiveDate,
    },

    /// The output directory or an image file could not be written.
    #[error("Failed to write {path}: {reason}")]
    OutputWrite { path: PathBuf, reason: String },

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The summary document could not be serialised.
    #[error("Failed to serialise summary: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout the visualizer crates.
pub type Result<T> = std::result::Result<T, VizError>;

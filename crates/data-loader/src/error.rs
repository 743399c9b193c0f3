//! Error types for the data-loader crate.
//!
//! Snapshot loading is the only fallible part of the workspace: the search
//! and pipeline logic built on top of `DataIndex` is total.

use thiserror::Error;

/// Errors that can occur while loading and validating a marketplace snapshot
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A snapshot file is not valid JSON for the expected record shape
    #[error("Parse error in {file}: {reason}")]
    ParseError { file: String, reason: String },

    /// A label did not match any known variant (e.g. an availability status)
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Two records of the same kind share an id
    #[error("Duplicate {entity} id: {id}")]
    DuplicateId { entity: String, id: String },

    /// Referenced entity doesn't exist (e.g. pipeline entry for an unknown job)
    #[error("Missing reference: {entity} with id {id}")]
    MissingReference { entity: String, id: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;

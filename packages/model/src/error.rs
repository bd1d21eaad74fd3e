//! Error types for the dataset model

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Dataset root must be an object, found {0}")]
    NotAnObject(&'static str),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure reading a dataset file
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    #[error("File is empty: {0}")]
    Empty(PathBuf),

    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ReadError {
    /// Missing, empty and unparseable files can be replaced by a fresh dataset
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ReadError::NotFound(_) | ReadError::Empty(_) | ReadError::Parse { .. }
        )
    }
}

/// Failure encoding a dataset for storage
#[derive(Error, Debug)]
pub enum WriteError {
    #[error("Failed to serialize dataset: {0}")]
    Serialize(#[from] serde_json::Error),
}

//! Error types for the workspace

use lipd_editor::{DocumentId, EditorError};
use lipd_model::ReadError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorkspaceError {
    #[error("Failed to open {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: ReadError,
    },

    #[error("Failed to write {path}: {message}")]
    Write { path: PathBuf, message: String },

    #[error("Unknown document: {0}")]
    UnknownDocument(DocumentId),

    #[error("No active document")]
    NoActiveDocument,

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Command {0} requires a destination path")]
    MissingDestination(String),

    #[error("Invalid config {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("Invalid message: {0}")]
    Protocol(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Editor(#[from] EditorError),
}

pub type WorkspaceResult<T> = Result<T, WorkspaceError>;

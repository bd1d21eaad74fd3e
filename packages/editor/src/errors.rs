//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Mutation error: {0}")]
    Mutation(#[from] crate::path::MutationError),

    #[error("Model error: {0}")]
    Model(#[from] lipd_model::ModelError),
}

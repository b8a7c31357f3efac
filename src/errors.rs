// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlurmflowError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Dependency error: {0}")]
    Dependency(String),

    #[error("Duplicate job name: {0}")]
    DuplicateJob(String),

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("Submission error: {0}")]
    Submission(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, SlurmflowError>;

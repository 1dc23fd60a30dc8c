//! Error types shared across burnin crates.
//!
//! The overlay compiler itself is total and never produces these; they
//! cover the surfaces around it (job documents and configuration).

use std::path::PathBuf;

/// Top-level error type for burnin operations.
#[derive(Debug, thiserror::Error)]
pub enum BurninError {
    #[error("Job error: {message}")]
    Job { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type alias using BurninError.
pub type BurninResult<T> = Result<T, BurninError>;

impl BurninError {
    pub fn job(msg: impl Into<String>) -> Self {
        Self::Job {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }
}

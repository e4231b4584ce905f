//! Error types shared across Handsign crates.

use std::path::PathBuf;

/// Top-level error type for Handsign operations.
#[derive(Debug, thiserror::Error)]
pub enum HandsignError {
    /// A hand or frame that cannot be classified. Scoped to a single frame.
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Frame log error: {message}")]
    FrameLog { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using HandsignError.
pub type HandsignResult<T> = Result<T, HandsignError>;

impl HandsignError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn frame_log(msg: impl Into<String>) -> Self {
        Self::FrameLog {
            message: msg.into(),
        }
    }

    /// Whether this error only invalidates the current frame.
    ///
    /// Frame-scoped errors are skipped by replay loops; everything else
    /// aborts the run.
    pub fn is_frame_scoped(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}

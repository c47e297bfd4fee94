use std::path::PathBuf;

use thiserror::Error;

/// All errors produced by quietcut-core.
#[derive(Debug, Error)]
pub enum SliceError {
    #[error("invalid config: {field}: {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: String,
    },

    #[error("invalid sample buffer: {0}")]
    InvalidBuffer(String),

    #[error("failed to decode '{path}': {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    #[error("a batch run is already active")]
    AlreadyRunning,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SliceError {
    pub(crate) fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SliceError>;

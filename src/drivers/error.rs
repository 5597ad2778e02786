use thiserror::Error;

use crate::types::SeriesId;

#[derive(Debug, Error)]
pub enum EmgError {
    #[error("channel count mismatch: expected {expected}, got {actual}")]
    InvalidInput { expected: usize, actual: usize },
    #[error("{0} is not tracked by the z-order")]
    InvalidState(SeriesId),
    #[error("channel index {0} is out of range")]
    InvalidChannel(usize),
    #[error("session is not running; batch dropped")]
    SessionClosed,
    #[error("device source has shut down")]
    SourceClosed,
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
}

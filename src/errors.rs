use thiserror::Error;

pub type Result<T> = std::result::Result<T, FolioError>;

/// Everything here is recoverable: errors surface as a status message at the
/// action boundary and the user simply retries.
#[derive(Error, Debug)]
pub enum FolioError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("HTTP error! status: {0}")]
    HttpStatus(u16),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("no projects loaded yet, run `load` first")]
    Unloaded,
    #[error("no project at index {index} ({len} loaded)")]
    OutOfBounds { index: usize, len: usize },
}

impl From<std::io::Error> for FolioError {
    fn from(error: std::io::Error) -> Self {
        Self::Transport(error.to_string())
    }
}

impl From<serde_json::Error> for FolioError {
    fn from(error: serde_json::Error) -> Self {
        Self::Transport(error.to_string())
    }
}

impl From<awc::error::SendRequestError> for FolioError {
    fn from(error: awc::error::SendRequestError) -> Self {
        Self::Transport(error.to_string())
    }
}

impl From<awc::error::PayloadError> for FolioError {
    fn from(error: awc::error::PayloadError) -> Self {
        Self::Transport(error.to_string())
    }
}

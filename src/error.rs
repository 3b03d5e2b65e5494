/// Error types shared across the application
///
/// - `SelectionError` - a file was rejected by the image selector
/// - `ClassifyError` - the classification request failed
/// - `ConfigError` - the config file could not be read or written

use thiserror::Error;

/// Why a chosen file was not accepted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("Please select an image file")]
    NotAnImage,

    #[error("Please select an image smaller than 10MB")]
    TooLarge,

    #[error("Could not read the selected file: {0}")]
    Unreadable(String),
}

/// A failed classification request
///
/// Payloads are plain strings so the error can travel inside iced messages,
/// which must be `Clone`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    /// The service answered with a non-success status
    #[error("HTTP error! status: {0}")]
    Status(u16),

    /// Connection, DNS or body transfer failure
    #[error("{0}")]
    Network(String),

    /// The body was not valid JSON of the expected shape
    #[error("{0}")]
    Parse(String),

    /// The body parsed but broke the response invariants
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for ClassifyError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => ClassifyError::Status(status.as_u16()),
            None => ClassifyError::Network(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for ClassifyError {
    fn from(err: serde_json::Error) -> Self {
        ClassifyError::Parse(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("config file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

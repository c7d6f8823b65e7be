//! Error types for DevScope core.

use std::{error::Error, fmt, io};

/// Error type for DevScope core operations.
#[derive(Debug)]
pub enum DevScopeError {
    /// An underlying I/O error.
    Io(io::Error),
    /// A JSON artifact could not be encoded or decoded.
    Json(serde_json::Error),
    /// A catch-all error with a message.
    Other(String),
}

impl fmt::Display for DevScopeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io error: {err}"),
            Self::Json(err) => write!(f, "json error: {err}"),
            Self::Other(message) => write!(f, "{message}"),
        }
    }
}

impl Error for DevScopeError {}

impl From<io::Error> for DevScopeError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for DevScopeError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Convenience result type for DevScope core.
pub type Result<T> = std::result::Result<T, DevScopeError>;

use thiserror::Error;

pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Errors raised while serializing a snapshot
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// The real-type prop of a style marker is neither a tag name nor a
    /// named component
    #[error("Invalid element type on <{node}>: expected a tag name or a named component, found {found}")]
    InvalidElementType { node: String, found: String },

    #[error("Printer error: {message}")]
    Print { message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Snapshot error: {0}")]
    Generic(String),
}

impl SnapshotError {
    pub fn print(message: impl Into<String>) -> Self {
        SnapshotError::Print {
            message: message.into(),
        }
    }
}

impl From<String> for SnapshotError {
    fn from(s: String) -> Self {
        SnapshotError::Generic(s)
    }
}

impl From<&str> for SnapshotError {
    fn from(s: &str) -> Self {
        SnapshotError::Generic(s.to_string())
    }
}

//! Error types for the tabular agent crate

use thiserror::Error;

/// Main error type for the tabular agent crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("action count mismatch: expected {expected} action-values, got {got}")]
    ActionCountMismatch { expected: usize, got: usize },

    #[error("action {action} is out of range (must be below {num_actions})")]
    ActionOutOfRange { action: usize, num_actions: usize },

    #[error("environment error: {message}")]
    Environment { message: String },

    #[error("failed to parse transition on line {line}")]
    TransitionParse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to {operation}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}

impl Error {
    pub(crate) fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        Error::Io {
            operation: operation.into(),
            source,
        }
    }
}

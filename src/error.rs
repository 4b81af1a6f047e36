//! Error types for the task core
//!
//! Domain failures come in two kinds:
//! - `InvalidInput`: a field or task id failed validation
//! - `NotFound`: a well-formed task id has no record in the store
//!
//! The remaining variants cover configuration loading.

use serde::Serialize;
use serde_json::json;
use thiserror::Error;

/// Coarse classification of an [`Error`], stable for callers to branch on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidInput,
    NotFound,
    Config,
    Io,
}

/// Main error type for task operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Task with ID {0} does not exist")]
    NotFound(u64),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl Error {
    /// Shorthand for building an `InvalidInput` error
    pub fn invalid(message: impl Into<String>) -> Self {
        Error::InvalidInput(message.into())
    }

    /// Get the kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidInput(_) => ErrorKind::InvalidInput,
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::InvalidConfig(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::TomlSerialize(_) => ErrorKind::Config,
            Error::Io(_) => ErrorKind::Io,
        }
    }

    /// Structured details for the error, when it carries any
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::InvalidInput(message) | Error::InvalidConfig(message) => {
                Some(json!({ "message": message }))
            }
            Error::NotFound(task_id) => Some(json!({ "task_id": task_id })),
            _ => None,
        }
    }
}

/// Result type alias for task operations
pub type Result<T> = std::result::Result<T, Error>;

/// Wrapper for displaying errors in JSON format
#[derive(Debug, Serialize)]
pub struct JsonError {
    pub error: String,
    pub kind: ErrorKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&Error> for JsonError {
    fn from(err: &Error) -> Self {
        JsonError {
            error: err.to_string(),
            kind: err.kind(),
            details: err.details(),
        }
    }
}

use std::io;

use thiserror::Error;

/// Result type used across the tickline core crate.
pub type Result<T> = std::result::Result<T, TicklineError>;

/// Canonical error representation shared by the library and the CLI.
#[derive(Debug, Error)]
pub enum TicklineError {
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    #[error("serialization error: {0}")]
    SerializationError(String),

    #[error("time error: {0}")]
    TimeError(String),

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("{0}")]
    GeneralError(String),
}

impl From<serde_json::Error> for TicklineError {
    fn from(err: serde_json::Error) -> Self {
        TicklineError::SerializationError(err.to_string())
    }
}

impl From<anyhow::Error> for TicklineError {
    fn from(err: anyhow::Error) -> Self {
        TicklineError::GeneralError(err.to_string())
    }
}

/// Dedicated configuration error used by the configuration module.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("environment variable {key} is not valid unicode")]
    NotUnicode { key: String },
}

impl From<ConfigError> for TicklineError {
    fn from(value: ConfigError) -> Self {
        TicklineError::ConfigError(value.to_string())
    }
}

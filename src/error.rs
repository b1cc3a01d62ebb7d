//! Application error types.

use thiserror::Error;

/// A configuration value rejected at construction time.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Invalid configuration for `{field}`: {reason}")]
pub struct InvalidConfig {
    /// Name of the offending field.
    pub field: &'static str,
    /// Why the value was rejected.
    pub reason: String,
}

impl InvalidConfig {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Application-level errors for Code Weaver.
///
/// Layout computation itself never fails; these cover the surfaces around it.
#[derive(Error, Debug)]
pub enum AppError {
    // Config errors
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error(transparent)]
    InvalidConfig(#[from] InvalidConfig),

    #[error("Unknown layout algorithm: {0}")]
    UnknownAlgorithm(String),

    // Input/output errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not decode graph snapshot: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Result alias used across the library.
pub type Result<T, E = AppError> = std::result::Result<T, E>;

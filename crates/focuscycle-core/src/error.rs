//! Core error types for focuscycle-core.
//!
//! Setup-time failures (aborted prompts, unreachable log targets) propagate
//! and prevent the session from starting. In-session host failures are
//! handled at the call site as best-effort and never reach this level.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for focuscycle-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// The user cancelled a setup prompt. No phase has run yet.
    #[error("session setup aborted")]
    SetupAborted,

    /// A host capability call failed.
    #[error("host call '{op}' failed: {message}")]
    Host { op: &'static str, message: String },

    /// A prompt returned a value that does not match any offered option.
    #[error("invalid selection for '{field}': {value}")]
    InvalidSelection { field: &'static str, value: String },

    /// Configuration-related errors
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Convenience constructor for host implementations.
    pub fn host(op: &'static str, message: impl Into<String>) -> Self {
        CoreError::Host {
            op,
            message: message.into(),
        }
    }
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// No config directory available on this platform
    #[error("no configuration directory available")]
    NoConfigDir,
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

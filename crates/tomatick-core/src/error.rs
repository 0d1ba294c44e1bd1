//! Core error types for tomatick-core.
//!
//! Every failure in the library degrades to a typed error the caller can
//! turn into a no-op plus an optional user-facing message. Nothing here is
//! fatal to a running session.

use std::path::PathBuf;
use thiserror::Error;

use crate::timer::StepId;

/// Core error type for tomatick-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Step list edits that were rejected
    #[error("Step list error: {0}")]
    StepList(#[from] StepListError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Key does not exist in the configuration tree
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Home/config directory could not be determined or created
    #[error("Config directory unavailable: {0}")]
    DirectoryUnavailable(String),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Empty collection
    #[error("Empty collection: {0}")]
    EmptyCollection(String),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Rejected step list edits.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StepListError {
    /// Removing the only remaining step would leave nothing to run.
    #[error("cannot remove the last remaining step")]
    LastStep,

    #[error("no step with id {0}")]
    UnknownStep(StepId),

    /// The supplied ordering is not a permutation of the current ids.
    #[error("new ordering does not match the current steps")]
    InvalidOrder,

    #[error("step duration must be at least one second")]
    ZeroDuration,
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

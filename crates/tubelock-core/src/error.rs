//! Core error types for tubelock-core.
//!
//! All policy evaluation is infallible by design; errors only arise at
//! the edges (settings persistence, overlay mounting). Failures at those
//! edges are absorbed locally and logged, so most of this hierarchy is
//! consumed inside the crate rather than surfaced to callers.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for tubelock-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Settings-related errors
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

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

/// Settings-store-specific errors.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Failed to load settings
    #[error("Failed to load settings from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save settings
    #[error("Failed to save settings to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to parse the settings file
    #[error("Failed to parse settings: {0}")]
    ParseFailed(String),

    /// Unknown settings key
    #[error("Unknown settings key: {0}")]
    UnknownKey(String),

    /// Invalid value for a settings key
    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// No usable config directory on this platform
    #[error("Could not determine a config directory")]
    NoConfigDir,
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

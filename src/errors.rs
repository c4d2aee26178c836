use thiserror::Error;

/// Operational error type for the tailwind-classkit crate.
///
/// Problems found *inside* class strings (unknown variants, bad arbitrary
/// values, conflicts) are never errors; they are reported through
/// [`crate::ValidationResult`] and [`crate::Conflict`]. This type only covers
/// loading configuration or class universes and CLI plumbing.
#[derive(Debug, Error)]
pub enum ClassKitError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Failed to load class universe from {path}: {message}")]
    UniverseError { path: String, message: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, ClassKitError>;

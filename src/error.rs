use thiserror::Error;

/// Unified error type for next-tag operations
#[derive(Error, Debug)]
pub enum NextTagError {
    #[error("Version can't be found in string: '{0}'")]
    NoVersionFound(String),

    #[error("Bump value must be one of: major, minor, patch or build. Instead '{0}' was given")]
    InvalidBumpKind(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid configuration file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to encode outputs: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in next-tag
pub type Result<T> = std::result::Result<T, NextTagError>;

impl NextTagError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        NextTagError::Config(msg.into())
    }

    /// Create a manifest error with context
    pub fn manifest(msg: impl Into<String>) -> Self {
        NextTagError::Manifest(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        NextTagError::Remote(msg.into())
    }
}

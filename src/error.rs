//! Error types
//!
//! Asset failures are fatal: they surface to the platform and are never retried.

use thiserror::Error;

/// Sprite frame loading failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    /// No image registered under this name.
    #[error("image not found: {name}")]
    NotFound { name: String },

    /// The image exists but cannot be used.
    #[error("image {name} is corrupt: {reason}")]
    Corrupt { name: String, reason: String },
}

/// Settings loading and validation failures
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Top-level error
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;

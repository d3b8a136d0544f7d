// Rust guideline compliant 2026-02-06

//! Error types for the boardtrace core library.
//!
//! Replay itself never fails; only configuration loading and decoding of
//! raw issue documents produce errors.

use thiserror::Error;

/// Result type alias for boardtrace operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for boardtrace operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration file is not valid TOML or has the wrong shape.
    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration values failed validation.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

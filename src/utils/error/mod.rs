//! Error handling for the quota engine
//!
//! Display-path functions (price resolution, quota rendering, breakdowns)
//! never fail: they degrade to `"0"`/neutral defaults so partially
//! populated records always render. Errors are reserved for the paths
//! where silent failure would be destructive: configuration loading and
//! administrative price synchronization.

use thiserror::Error;

/// Result type alias for the quota engine
pub type Result<T> = std::result::Result<T, QuotaError>;

/// Main error type for the quota engine
#[derive(Error, Debug)]
pub enum QuotaError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Malformed price-sync payload (admin path, must fail loudly)
    #[error("Invalid price payload: {0}")]
    InvalidPayload(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl QuotaError {
    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    /// Create an invalid-payload error
    pub fn invalid_payload<S: Into<String>>(message: S) -> Self {
        Self::InvalidPayload(message.into())
    }
}

//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid bind address: {0}")]
    InvalidHost(String),

    #[error("Geolocation base URL must start with http:// or https://")]
    InvalidGeolocationUrl,

    #[error("Geolocation timeout must be between 1 and 60 seconds")]
    InvalidGeolocationTimeout,

    #[error("Maximum message length must be greater than zero")]
    InvalidMessageLength,

    #[error("Idle sweep interval must be greater than zero")]
    InvalidSweepInterval,

    #[error("Idle timeout must be greater than zero")]
    InvalidIdleTimeout,

    #[error("Idle timeout exceeds maximum allowed ({0}s)")]
    IdleTimeoutTooLarge(u64),
}

//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `CHAT_MATCHMAKER` prefix and nested values use double underscores as separators.
//! Every setting has a default, so the service starts with an empty environment.
//!
//! # Example
//!
//! ```no_run
//! use chat_matchmaker::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr().unwrap());
//! ```

mod chat;
mod error;
mod geolocation;
mod server;

pub use chat::{ChatConfig, MAX_IDLE_TIMEOUT_SECS};
pub use error::{ConfigError, ValidationError};
pub use geolocation::GeolocationConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (bind address, logging, CORS, static assets)
    #[serde(default)]
    pub server: ServerConfig,

    /// IP geolocation lookups
    #[serde(default)]
    pub geolocation: GeolocationConfig,

    /// Chat limits and idle eviction
    #[serde(default)]
    pub chat: ChatConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `CHAT_MATCHMAKER` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `CHAT_MATCHMAKER__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `CHAT_MATCHMAKER__CHAT__IDLE_TIMEOUT_SECS=300` -> `chat.idle_timeout_secs = 300`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CHAT_MATCHMAKER")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.geolocation.validate()?;
        self.chat.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

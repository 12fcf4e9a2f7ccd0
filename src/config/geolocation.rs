//! IP geolocation configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// IP geolocation configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GeolocationConfig {
    /// When false, every user is recorded with an unknown location
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Lookup service base URL; requests go to `{base_url}/{ip}/json`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-lookup timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl GeolocationConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate geolocation configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidGeolocationUrl);
        }
        if self.timeout_secs == 0 || self.timeout_secs > 60 {
            return Err(ValidationError::InvalidGeolocationTimeout);
        }
        Ok(())
    }
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_base_url() -> String {
    "http://ipinfo.io".to_string()
}

fn default_timeout() -> u64 {
    3
}

//! Chat behavior configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::application::IdleReaperConfig;

/// Longest accepted idle timeout (30 days).
pub const MAX_IDLE_TIMEOUT_SECS: u64 = 30 * 24 * 60 * 60;

/// Chat behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    /// Longest accepted message, in characters. Unset means unbounded.
    pub max_message_length: Option<usize>,

    /// Users idle longer than this are disconnected. Unset disables eviction.
    pub idle_timeout_secs: Option<u64>,

    /// How often the idle sweep runs
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,
}

impl ChatConfig {
    /// Idle eviction settings, or `None` when eviction is disabled
    pub fn idle_reaper_config(&self) -> Option<IdleReaperConfig> {
        self.idle_timeout_secs.map(|secs| {
            IdleReaperConfig::default()
                .with_sweep_interval(Duration::from_secs(self.sweep_interval_secs))
                .with_max_idle(Duration::from_secs(secs))
        })
    }

    /// Validate chat configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_message_length == Some(0) {
            return Err(ValidationError::InvalidMessageLength);
        }
        match self.idle_timeout_secs {
            Some(0) => return Err(ValidationError::InvalidIdleTimeout),
            Some(secs) if secs > MAX_IDLE_TIMEOUT_SECS => {
                return Err(ValidationError::IdleTimeoutTooLarge(MAX_IDLE_TIMEOUT_SECS));
            }
            _ => {}
        }
        if self.sweep_interval_secs == 0 {
            return Err(ValidationError::InvalidSweepInterval);
        }
        Ok(())
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            max_message_length: None,
            idle_timeout_secs: None,
            sweep_interval_secs: default_sweep_interval(),
        }
    }
}

fn default_sweep_interval() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_disable_limits() {
        let config = ChatConfig::default();
        assert!(config.max_message_length.is_none());
        assert!(config.idle_reaper_config().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_idle_reaper_config_uses_both_settings() {
        let config = ChatConfig {
            idle_timeout_secs: Some(120),
            sweep_interval_secs: 10,
            ..Default::default()
        };

        let reaper = config.idle_reaper_config().unwrap();
        assert_eq!(reaper.max_idle, Duration::from_secs(120));
        assert_eq!(reaper.sweep_interval, Duration::from_secs(10));
    }

    #[test]
    fn test_rejects_zero_values() {
        let config = ChatConfig {
            max_message_length: Some(0),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidMessageLength));

        let config = ChatConfig {
            idle_timeout_secs: Some(0),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidIdleTimeout));

        let config = ChatConfig {
            sweep_interval_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidSweepInterval));
    }

    #[test]
    fn test_rejects_oversized_idle_timeout() {
        for secs in [MAX_IDLE_TIMEOUT_SECS + 1, 10_000_000_000_000_000, u64::MAX] {
            let config = ChatConfig {
                idle_timeout_secs: Some(secs),
                ..Default::default()
            };
            assert_eq!(
                config.validate(),
                Err(ValidationError::IdleTimeoutTooLarge(MAX_IDLE_TIMEOUT_SECS))
            );
        }

        let config = ChatConfig {
            idle_timeout_secs: Some(MAX_IDLE_TIMEOUT_SECS),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}

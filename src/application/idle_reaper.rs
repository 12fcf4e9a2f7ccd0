//! IdleReaper - Optional background eviction of inactive users.
//!
//! Users who stop polling (closed tab, lost network) would otherwise stay
//! connected, and possibly waiting, forever. When enabled, the reaper
//! periodically disconnects anyone whose last connect, send or poll is
//! older than `max_idle`, with the same partner notice as a normal
//! disconnect.
//!
//! ## Configuration
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `sweep_interval` | 30s | How often to look for idle users |
//! | `max_idle` | 300s | Inactivity after which a user is evicted |
//!
//! The service is not started unless `chat.idle_timeout_secs` is set.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time;

use crate::domain::foundation::UserId;

use super::coordinator::MatchmakingCoordinator;

/// Configuration for the IdleReaper service.
#[derive(Debug, Clone)]
pub struct IdleReaperConfig {
    /// How often to sweep.
    pub sweep_interval: Duration,

    /// Inactivity threshold.
    pub max_idle: Duration,
}

impl Default for IdleReaperConfig {
    fn default() -> Self {
        Self {
            sweep_interval: Duration::from_secs(30),
            max_idle: Duration::from_secs(300),
        }
    }
}

impl IdleReaperConfig {
    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }

    pub fn with_max_idle(mut self, max_idle: Duration) -> Self {
        self.max_idle = max_idle;
        self
    }
}

/// Background service that evicts idle users.
pub struct IdleReaper {
    coordinator: Arc<MatchmakingCoordinator>,
    config: IdleReaperConfig,
}

impl IdleReaper {
    pub fn new(coordinator: Arc<MatchmakingCoordinator>, config: IdleReaperConfig) -> Self {
        Self {
            coordinator,
            config,
        }
    }

    /// Run the sweep loop until shutdown signal is received.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut interval = time::interval(self.config.sweep_interval);
        interval.set_missed_tick_behavior(time::MissedTickBehavior::Delay);

        tracing::info!(
            "Idle eviction enabled: max idle {}s, sweep every {}s",
            self.config.max_idle.as_secs(),
            self.config.sweep_interval.as_secs()
        );

        loop {
            tokio::select! {
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        tracing::debug!("Idle reaper stopping");
                        return;
                    }
                }

                _ = interval.tick() => {
                    self.sweep_once().await;
                }
            }
        }
    }

    /// Runs a single sweep. Returns the evicted ids.
    pub async fn sweep_once(&self) -> Vec<UserId> {
        let evicted = self.coordinator.evict_idle(self.config.max_idle).await;
        if !evicted.is_empty() {
            tracing::info!("Idle sweep evicted {} user(s)", evicted.len());
        }
        evicted
    }
}

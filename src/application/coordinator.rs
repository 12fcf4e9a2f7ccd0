//! MatchmakingCoordinator - Serialized entry point for the four chat operations.
//!
//! All shared state lives in one [`MatchmakingState`] behind a single async
//! mutex, so each operation is atomic with respect to the waiting pool,
//! partner links, registry and queues. The only I/O on any path, the
//! geolocation lookup during connect, runs before the lock is taken.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::matchmaking::{
    ClientMetadata, ConnectOutcome, DisconnectOutcome, GeoLocation, MatchmakingError,
    MatchmakingState, PollSnapshot, PresenceStatus, TagSet, UserRecord,
};
use crate::ports::GeoResolver;

/// Command to join the chat and look for a partner.
#[derive(Debug, Clone)]
pub struct ConnectCommand {
    pub user_id: UserId,
    /// Raw tags as sent by the client, before filtering.
    pub tags: Vec<String>,
    pub client: ClientMetadata,
}

/// Command to relay text to the sender's partner.
#[derive(Debug, Clone)]
pub struct SendMessageCommand {
    pub sender: UserId,
    pub message: String,
}

pub struct MatchmakingCoordinator {
    state: Mutex<MatchmakingState>,
    geo_resolver: Arc<dyn GeoResolver>,
}

impl MatchmakingCoordinator {
    pub fn new(geo_resolver: Arc<dyn GeoResolver>) -> Self {
        Self {
            state: Mutex::new(MatchmakingState::new()),
            geo_resolver,
        }
    }

    /// Registers the user and pairs them or puts them in the waiting pool.
    ///
    /// Connecting an id that already has a session is a no-op reported as
    /// [`ConnectOutcome::AlreadyConnected`].
    pub async fn connect(&self, cmd: ConnectCommand) -> ConnectOutcome {
        if self.state.lock().await.is_connected(cmd.user_id) {
            tracing::debug!("User {} is already connected", cmd.user_id);
            return ConnectOutcome::AlreadyConnected;
        }

        let location = self.resolve_location(cmd.client.address.as_deref()).await;
        let record = UserRecord::new(
            cmd.user_id,
            TagSet::from_requested(cmd.tags),
            cmd.client,
            location,
            Timestamp::now(),
        );
        let summary = format!(
            "IP: {}, Location: {}, Browser: {}",
            record.address(),
            record.location(),
            record.client()
        );

        let outcome = self.state.lock().await.connect(record);

        match &outcome {
            ConnectOutcome::AlreadyConnected => {
                tracing::debug!("User {} connected concurrently; keeping first session", cmd.user_id);
            }
            ConnectOutcome::Waiting => {
                tracing::info!("User {} connected. {}", cmd.user_id, summary);
                tracing::info!("User {} is waiting for a partner", cmd.user_id);
            }
            ConnectOutcome::Connected {
                partner_id,
                common_tags,
            } => {
                tracing::info!("User {} connected. {}", cmd.user_id, summary);
                tracing::info!(
                    "User {} paired with {}. Common tags: {:?}",
                    cmd.user_id,
                    partner_id,
                    common_tags.iter().collect::<Vec<_>>()
                );
            }
        }

        outcome
    }

    /// Queues a message for the sender's partner.
    pub async fn send_message(&self, cmd: SendMessageCommand) -> Result<UserId, MatchmakingError> {
        let length = cmd.message.chars().count();
        let recipient = {
            let mut state = self.state.lock().await;
            state.send_message(cmd.sender, cmd.message.as_str(), Timestamp::now())
        };

        match &recipient {
            Ok(to) => {
                tracing::info!("Message from {} to {} ({} chars)", cmd.sender, to, length);
                tracing::debug!("Message body from {}: {}", cmd.sender, cmd.message);
            }
            Err(e) => tracing::debug!("Message from {} rejected: {}", cmd.sender, e),
        }
        recipient
    }

    /// Returns the user's session snapshot and empties their queue.
    pub async fn poll(&self, user_id: UserId) -> Result<PollSnapshot, MatchmakingError> {
        self.state.lock().await.poll(user_id, Timestamp::now())
    }

    /// Ends the user's session and notifies their partner.
    pub async fn disconnect(&self, user_id: UserId) -> DisconnectOutcome {
        let outcome = self.state.lock().await.disconnect(user_id);

        if let DisconnectOutcome::Disconnected { notified_partner } = &outcome {
            if let Some(partner) = notified_partner {
                tracing::info!("Notified {} that partner {} left", partner, user_id);
            }
            tracing::info!("User {} disconnected.", user_id);
        }
        outcome
    }

    /// Disconnects every user inactive for longer than `max_idle`.
    ///
    /// Returns the evicted ids in ascending order. A `max_idle` reaching
    /// past the representable time range evicts nobody.
    pub async fn evict_idle(&self, max_idle: Duration) -> Vec<UserId> {
        let Some(cutoff) = Timestamp::now().checked_minus(max_idle) else {
            tracing::debug!("Idle timeout {:?} exceeds time range; nobody is idle", max_idle);
            return Vec::new();
        };
        let evicted = {
            let mut state = self.state.lock().await;
            let idle = state.idle_users(cutoff);
            for id in &idle {
                state.disconnect(*id);
            }
            idle
        };

        for id in &evicted {
            tracing::info!("User {} evicted after {}s idle", id, max_idle.as_secs());
        }
        evicted
    }

    pub async fn online_count(&self) -> usize {
        self.state.lock().await.online_count()
    }

    pub async fn presence(&self, user_id: UserId) -> Option<PresenceStatus> {
        self.state.lock().await.presence(user_id)
    }

    /// Copy of the user's record.
    pub async fn user(&self, user_id: UserId) -> Result<UserRecord, MatchmakingError> {
        self.state.lock().await.user(user_id).cloned()
    }

    async fn resolve_location(&self, address: Option<&str>) -> GeoLocation {
        let Some(address) = address else {
            return GeoLocation::unknown();
        };
        match self.geo_resolver.resolve(address).await {
            Ok(location) => location,
            Err(e) => {
                tracing::warn!("Error fetching geolocation for IP {}: {}", address, e);
                GeoLocation::unknown()
            }
        }
    }
}

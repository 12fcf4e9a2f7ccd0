//! Results returned by the matchmaking operations.

use std::fmt;

use crate::domain::foundation::UserId;

use super::router::Envelope;
use super::tags::TagSet;

/// Where a connected user currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenceStatus {
    /// In the waiting pool.
    Waiting,
    /// Linked to a partner.
    Connected,
    /// Connected to the server but neither waiting nor paired, typically
    /// because the partner left.
    Disconnected,
}

impl PresenceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PresenceStatus::Waiting => "waiting",
            PresenceStatus::Connected => "connected",
            PresenceStatus::Disconnected => "disconnected",
        }
    }
}

impl fmt::Display for PresenceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a connect call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectOutcome {
    /// The id was already connected; nothing changed.
    AlreadyConnected,
    /// Paired immediately. `common_tags` is informational and may be empty
    /// when either side connected without tags.
    Connected {
        partner_id: UserId,
        common_tags: TagSet,
    },
    /// No compatible partner yet; the user was added to the waiting pool.
    Waiting,
}

impl ConnectOutcome {
    pub fn status(&self) -> &'static str {
        match self {
            ConnectOutcome::AlreadyConnected => "already_connected",
            ConnectOutcome::Connected { .. } => "connected",
            ConnectOutcome::Waiting => "waiting",
        }
    }
}

/// Everything a poll returns. Producing it drains the user's queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollSnapshot {
    /// Connected users system-wide, including the poller.
    pub online_count: usize,
    pub messages: Vec<Envelope>,
    pub status: PresenceStatus,
    pub partner_id: Option<UserId>,
}

/// Result of a disconnect call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisconnectOutcome {
    /// The session was torn down. `notified_partner` is the partner that
    /// received a disconnect notice, if there was one.
    Disconnected { notified_partner: Option<UserId> },
    /// The id had no session; nothing changed.
    NotConnected,
}

impl DisconnectOutcome {
    pub fn status(&self) -> &'static str {
        match self {
            DisconnectOutcome::Disconnected { .. } => "disconnected",
            DisconnectOutcome::NotConnected => "not_connected",
        }
    }
}

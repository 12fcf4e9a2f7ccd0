//! The matchmaking aggregate: registry, waiting pool and queues together.
//!
//! Every method is a complete state transition. Callers that share one
//! `MatchmakingState` between tasks must serialize calls (the coordinator
//! holds it behind a single mutex), which is what keeps two concurrent
//! connects from claiming the same waiting entry.
//!
//! Per user id the reachable states are:
//!
//! ```text
//! absent ──connect──▶ waiting ──matched──▶ partnered
//!    ▲                   │                    │
//!    └─────disconnect────┴────disconnect──────┘
//! ```
//!
//! When a partnered user disconnects, the partner stays connected but
//! unpaired (polls as `disconnected`) and is not put back in the pool.

use crate::domain::foundation::{Timestamp, UserId};

use super::errors::MatchmakingError;
use super::matcher::{MatchOutcome, WaitingEntry, WaitingPool};
use super::outcomes::{ConnectOutcome, DisconnectOutcome, PollSnapshot, PresenceStatus};
use super::registry::SessionRegistry;
use super::router::{Envelope, MessageRouter};
use super::user::UserRecord;

#[derive(Debug, Clone, Default)]
pub struct MatchmakingState {
    registry: SessionRegistry,
    pool: WaitingPool,
    router: MessageRouter,
}

impl MatchmakingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_connected(&self, id: UserId) -> bool {
        self.registry.is_connected(id)
    }

    pub fn user(&self, id: UserId) -> Result<&UserRecord, MatchmakingError> {
        self.registry.get(id)
    }

    pub fn online_count(&self) -> usize {
        self.registry.len()
    }

    pub fn waiting_count(&self) -> usize {
        self.pool.len()
    }

    pub fn partner_of(&self, id: UserId) -> Option<UserId> {
        self.registry.partner_of(id)
    }

    /// Current status of a connected user, `None` if absent.
    pub fn presence(&self, id: UserId) -> Option<PresenceStatus> {
        if !self.registry.is_connected(id) {
            return None;
        }
        if self.pool.contains(id) {
            Some(PresenceStatus::Waiting)
        } else if self.registry.partner_of(id).is_some() {
            Some(PresenceStatus::Connected)
        } else {
            Some(PresenceStatus::Disconnected)
        }
    }

    /// Registers the user, then pairs them or adds them to the waiting pool.
    ///
    /// An id that is already connected yields
    /// [`ConnectOutcome::AlreadyConnected`] and leaves the state untouched.
    pub fn connect(&mut self, record: UserRecord) -> ConnectOutcome {
        let id = record.id();
        let tags = record.tags().clone();
        let since = *record.connected_at();

        if self.registry.register(record).is_err() {
            return ConnectOutcome::AlreadyConnected;
        }
        self.router.open(id);

        loop {
            match self.pool.match_or_enqueue(WaitingEntry::new(id, tags.clone(), since)) {
                MatchOutcome::Queued => return ConnectOutcome::Waiting,
                MatchOutcome::Matched(candidate) => {
                    let partner_id = candidate.user_id;
                    if self.registry.link(id, partner_id).is_err() {
                        // Stale entry; it is already out of the pool, try the next one.
                        continue;
                    }
                    let partner_tags = self
                        .registry
                        .get(partner_id)
                        .map(|partner| partner.tags().clone())
                        .unwrap_or(candidate.tags);
                    return ConnectOutcome::Connected {
                        partner_id,
                        common_tags: tags.intersection(&partner_tags),
                    };
                }
            }
        }
    }

    /// Queues `text` for the sender's partner. Returns the recipient.
    pub fn send_message(
        &mut self,
        sender: UserId,
        text: impl Into<String>,
        now: Timestamp,
    ) -> Result<UserId, MatchmakingError> {
        self.registry.get_mut(sender)?.touch(now);

        let recipient = self
            .registry
            .partner_of(sender)
            .filter(|partner| self.registry.is_connected(*partner))
            .ok_or(MatchmakingError::NoPartner(sender))?;

        self.router
            .enqueue(recipient, Envelope::text(sender, text))
            .map_err(|_| MatchmakingError::NoPartner(sender))?;
        Ok(recipient)
    }

    /// Snapshot of the user's session. Drains their message queue.
    pub fn poll(&mut self, id: UserId, now: Timestamp) -> Result<PollSnapshot, MatchmakingError> {
        self.registry.get_mut(id)?.touch(now);

        let status = self.presence(id).ok_or(MatchmakingError::NotConnected(id))?;
        let messages = self.router.drain(id)?;

        Ok(PollSnapshot {
            online_count: self.registry.len(),
            messages,
            status,
            partner_id: self.registry.partner_of(id),
        })
    }

    /// Tears down the user's session and notifies their partner, if any.
    pub fn disconnect(&mut self, id: UserId) -> DisconnectOutcome {
        let Ok((_, former_partner)) = self.registry.unregister(id) else {
            return DisconnectOutcome::NotConnected;
        };
        self.pool.remove(id);
        self.router.close(id);

        let notified_partner = former_partner.filter(|partner| {
            self.router
                .enqueue(*partner, Envelope::partner_disconnected())
                .is_ok()
        });

        DisconnectOutcome::Disconnected { notified_partner }
    }

    /// Connected users whose last activity is strictly before `cutoff`,
    /// in ascending id order.
    pub fn idle_users(&self, cutoff: Timestamp) -> Vec<UserId> {
        let mut idle: Vec<UserId> = self
            .registry
            .records()
            .filter(|record| record.last_seen().is_before(&cutoff))
            .map(UserRecord::id)
            .collect();
        idle.sort();
        idle
    }

    /// Checks the cross-component invariants:
    ///
    /// - each id is absent, waiting or partnered, never both of the latter
    /// - every waiting entry and every partner belongs to a connected user
    /// - partner links are symmetric and never reflexive
    /// - a queue exists exactly for each connected user
    pub fn verify_invariants(&self) -> Result<(), String> {
        for entry in self.pool.iter() {
            let id = entry.user_id;
            if !self.registry.is_connected(id) {
                return Err(format!("waiting user {} is not connected", id));
            }
            if self.registry.partner_of(id).is_some() {
                return Err(format!("waiting user {} also has a partner", id));
            }
        }

        for (user, partner) in self.registry.partner_links() {
            if user == partner {
                return Err(format!("user {} is its own partner", user));
            }
            if !self.registry.is_connected(user) || !self.registry.is_connected(partner) {
                return Err(format!("link {} -> {} touches a gone user", user, partner));
            }
            if self.registry.partner_of(partner) != Some(user) {
                return Err(format!("link {} -> {} is not symmetric", user, partner));
            }
        }

        for record in self.registry.records() {
            if !self.router.is_open(record.id()) {
                return Err(format!("connected user {} has no queue", record.id()));
            }
        }
        if let Some(owner) = self.router.owners().find(|id| !self.registry.is_connected(*id)) {
            return Err(format!("queue of {} outlived its session", owner));
        }

        Ok(())
    }
}

//! Per-user inbound message queues with drain-on-read semantics.
//!
//! A queue exists exactly while its owner is connected. Reading a queue
//! empties it: there is no acknowledgment and no redelivery, so anything
//! not returned by one drain is never seen again.

use std::collections::HashMap;

use crate::domain::foundation::UserId;

use super::errors::MatchmakingError;

/// Kinds of system notices delivered alongside chat text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// The recipient's partner left the conversation.
    PartnerDisconnected,
}

impl NoticeKind {
    /// Wire name of the notice type.
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeKind::PartnerDisconnected => "disconnected",
        }
    }

    /// Human-readable text shipped with the notice.
    pub fn default_message(&self) -> &'static str {
        match self {
            NoticeKind::PartnerDisconnected => "Partner disconnected.",
        }
    }
}

/// One entry in a user's inbound queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Envelope {
    /// Chat text relayed from the partner.
    Text { from: UserId, message: String },
    /// Notice generated by the server.
    Notice { kind: NoticeKind, message: String },
}

impl Envelope {
    pub fn text(from: UserId, message: impl Into<String>) -> Self {
        Envelope::Text {
            from,
            message: message.into(),
        }
    }

    pub fn partner_disconnected() -> Self {
        let kind = NoticeKind::PartnerDisconnected;
        Envelope::Notice {
            kind,
            message: kind.default_message().to_string(),
        }
    }
}

/// Inbound FIFO queue per connected user.
#[derive(Debug, Clone, Default)]
pub struct MessageRouter {
    queues: HashMap<UserId, Vec<Envelope>>,
}

impl MessageRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty queue for `owner`, discarding any previous one.
    pub fn open(&mut self, owner: UserId) {
        self.queues.insert(owner, Vec::new());
    }

    /// Destroys the queue of `owner`, returning whatever was still pending.
    pub fn close(&mut self, owner: UserId) -> Option<Vec<Envelope>> {
        self.queues.remove(&owner)
    }

    pub fn is_open(&self, owner: UserId) -> bool {
        self.queues.contains_key(&owner)
    }

    /// Appends to the back of the recipient's queue.
    pub fn enqueue(&mut self, recipient: UserId, envelope: Envelope) -> Result<(), MatchmakingError> {
        self.queues
            .get_mut(&recipient)
            .ok_or(MatchmakingError::NotConnected(recipient))?
            .push(envelope);
        Ok(())
    }

    /// Returns every pending envelope in arrival order and leaves the queue
    /// empty.
    pub fn drain(&mut self, owner: UserId) -> Result<Vec<Envelope>, MatchmakingError> {
        let queue = self
            .queues
            .get_mut(&owner)
            .ok_or(MatchmakingError::NotConnected(owner))?;
        Ok(std::mem::take(queue))
    }

    pub fn owners(&self) -> impl Iterator<Item = UserId> + '_ {
        self.queues.keys().copied()
    }
}

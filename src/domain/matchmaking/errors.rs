//! Matchmaking-specific error types.

use thiserror::Error;

use crate::domain::foundation::{ErrorCode, UserId};

/// Per-call failures of the matchmaking operations.
///
/// None of these are fatal; each is reported back to the caller of the
/// single operation that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchmakingError {
    /// The id already has an active session.
    #[error("User {0} is already connected")]
    AlreadyConnected(UserId),

    /// The id has no active session.
    #[error("User {0} is not connected")]
    NotConnected(UserId),

    /// The sender has no live partner to deliver to.
    #[error("User {0} has no partner connected")]
    NoPartner(UserId),

    /// A pairing was attempted that would violate the partner relation.
    #[error("User {0} cannot be paired: {1}")]
    InvalidPairing(UserId, &'static str),
}

impl MatchmakingError {
    pub fn code(&self) -> ErrorCode {
        match self {
            MatchmakingError::AlreadyConnected(_) => ErrorCode::UserAlreadyConnected,
            MatchmakingError::NotConnected(_) => ErrorCode::UserNotConnected,
            MatchmakingError::NoPartner(_) => ErrorCode::NoPartner,
            MatchmakingError::InvalidPairing(..) => ErrorCode::InvalidStateTransition,
        }
    }

    /// The id the failing call was about.
    pub fn user_id(&self) -> UserId {
        match self {
            MatchmakingError::AlreadyConnected(id)
            | MatchmakingError::NotConnected(id)
            | MatchmakingError::NoPartner(id)
            | MatchmakingError::InvalidPairing(id, _) => *id,
        }
    }
}

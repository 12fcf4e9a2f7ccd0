//! Matchmaking domain - pairing anonymous users by shared interest tags.
//!
//! # Components
//!
//! - [`tags`] - Interest tag sets and the compatibility rule
//! - [`matcher`] - Waiting pool and first-match partner selection
//! - [`registry`] - Connected users and the symmetric partner relation
//! - [`router`] - Per-user inbound queues, drained on read
//! - [`state`] - The aggregate combining the above into atomic transitions

pub mod errors;
pub mod matcher;
pub mod outcomes;
pub mod registry;
pub mod router;
pub mod state;
pub mod tags;
pub mod user;

pub use errors::MatchmakingError;
pub use matcher::{find_partner, MatchOutcome, WaitingEntry, WaitingPool};
pub use outcomes::{ConnectOutcome, DisconnectOutcome, PollSnapshot, PresenceStatus};
pub use registry::SessionRegistry;
pub use router::{Envelope, MessageRouter, NoticeKind};
pub use state::MatchmakingState;
pub use tags::{TagSet, UNTRUSTED_EVENT_TAG};
pub use user::{ClientMetadata, GeoLocation, UserRecord, UNKNOWN};

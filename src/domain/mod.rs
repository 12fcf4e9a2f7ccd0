//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (ids, timestamps, error codes)
//! - `matchmaking` - Waiting pool, pairing policy, partner links and message queues

pub mod foundation;
pub mod matchmaking;

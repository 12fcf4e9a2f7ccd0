//! Foundation module - Shared domain primitives.
//!
//! Contains the identifiers, time values and error vocabulary shared by the
//! matchmaking domain.

mod errors;
mod ids;
mod timestamp;

pub use errors::{ErrorCode, ValidationError};
pub use ids::UserId;
pub use timestamp::Timestamp;

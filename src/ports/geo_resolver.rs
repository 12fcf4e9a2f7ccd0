//! GeoResolver port - Best-effort location lookup for client addresses.
//!
//! Resolution happens on the connect path, so implementations must bound
//! their own latency (timeouts) and report failures as [`GeoLookupError`]
//! rather than panicking. The coordinator treats every error as "location
//! unknown" and carries on.

use async_trait::async_trait;

use crate::domain::matchmaking::GeoLocation;

/// Errors that can occur while resolving an address.
#[derive(Debug, thiserror::Error)]
pub enum GeoLookupError {
    /// The lookup service could not be reached.
    #[error("Geolocation transport error: {0}")]
    Transport(String),

    /// The lookup service answered with a non-success status.
    #[error("Geolocation service returned status {0}")]
    Status(u16),

    /// The response body could not be understood.
    #[error("Geolocation response could not be decoded: {0}")]
    Decode(String),

    /// The address is not something the service can look up.
    #[error("Address cannot be resolved: {0}")]
    Unresolvable(String),
}

/// Port for resolving an origin address to a coarse location.
#[async_trait]
pub trait GeoResolver: Send + Sync {
    /// Resolves `address` (an IP address in textual form).
    ///
    /// Fields the service does not know should be filled with
    /// [`crate::domain::matchmaking::UNKNOWN`] rather than failing.
    async fn resolve(&self, address: &str) -> Result<GeoLocation, GeoLookupError>;
}

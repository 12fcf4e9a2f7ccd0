//! Resolver used when geolocation lookups are disabled.

use async_trait::async_trait;

use crate::domain::matchmaking::GeoLocation;
use crate::ports::{GeoLookupError, GeoResolver};

/// Answers every lookup with an all-"Unknown" location, without I/O.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnknownGeoResolver;

#[async_trait]
impl GeoResolver for UnknownGeoResolver {
    async fn resolve(&self, _address: &str) -> Result<GeoLocation, GeoLookupError> {
        Ok(GeoLocation::unknown())
    }
}

//! Geolocation adapters - Implementations of the `GeoResolver` port.

mod ipinfo;
mod unknown;

pub use ipinfo::{IpInfoConfig, IpInfoResolver};
pub use unknown::UnknownGeoResolver;

//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `geolocation` - IP geolocation lookups (ipinfo.io, disabled fallback)
//! - `http` - REST API served with axum

pub mod geolocation;
pub mod http;

pub use geolocation::{IpInfoConfig, IpInfoResolver, UnknownGeoResolver};
pub use http::{build_router, ChatHandlers};

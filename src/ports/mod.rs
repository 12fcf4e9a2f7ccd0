//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `GeoResolver` - Best-effort location lookup used while connecting

mod geo_resolver;

pub use geo_resolver::{GeoLookupError, GeoResolver};

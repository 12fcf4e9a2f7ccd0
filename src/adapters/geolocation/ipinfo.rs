//! ipinfo.io adapter for the `GeoResolver` port.
//!
//! Looks up `{base_url}/{ip}/json` and maps the `city`, `region` and
//! `country` fields. Any field the service omits becomes "Unknown".
//! Loopback, private and unspecified addresses are never sent upstream.

use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::matchmaking::{GeoLocation, UNKNOWN};
use crate::ports::{GeoLookupError, GeoResolver};

/// Configuration for the ipinfo adapter.
#[derive(Debug, Clone)]
pub struct IpInfoConfig {
    /// Service root, e.g. "http://ipinfo.io".
    pub base_url: String,

    /// Upper bound on a single lookup.
    pub timeout: Duration,
}

impl IpInfoConfig {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            timeout,
        }
    }

    fn lookup_url(&self, ip: &IpAddr) -> String {
        format!("{}/{}/json", self.base_url.trim_end_matches('/'), ip)
    }
}

/// Response body of the lookup endpoint. Only the fields we use.
#[derive(Debug, Default, Deserialize)]
struct IpInfoResponse {
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    region: Option<String>,
    #[serde(default)]
    country: Option<String>,
}

impl From<IpInfoResponse> for GeoLocation {
    fn from(body: IpInfoResponse) -> Self {
        let or_unknown = |field: Option<String>| {
            field
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN.to_string())
        };
        GeoLocation::new(
            or_unknown(body.city),
            or_unknown(body.region),
            or_unknown(body.country),
        )
    }
}

pub struct IpInfoResolver {
    config: IpInfoConfig,
    http_client: reqwest::Client,
}

impl IpInfoResolver {
    pub fn new(config: IpInfoConfig) -> Result<Self, GeoLookupError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GeoLookupError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }
}

/// Whether an address could have a public location at all.
fn is_routable(ip: &IpAddr) -> bool {
    if ip.is_loopback() || ip.is_unspecified() || ip.is_multicast() {
        return false;
    }
    match ip {
        IpAddr::V4(v4) => !(v4.is_private() || v4.is_link_local() || v4.is_broadcast()),
        IpAddr::V6(_) => true,
    }
}

#[async_trait]
impl GeoResolver for IpInfoResolver {
    async fn resolve(&self, address: &str) -> Result<GeoLocation, GeoLookupError> {
        let ip: IpAddr = address
            .trim()
            .parse()
            .map_err(|_| GeoLookupError::Unresolvable(address.to_string()))?;
        if !is_routable(&ip) {
            return Err(GeoLookupError::Unresolvable(address.to_string()));
        }

        let url = self.config.lookup_url(&ip);
        tracing::debug!("Fetching geolocation from {}", url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| GeoLookupError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GeoLookupError::Status(response.status().as_u16()));
        }

        let body: IpInfoResponse = response
            .json()
            .await
            .map_err(|e| GeoLookupError::Decode(e.to_string()))?;

        Ok(body.into())
    }
}

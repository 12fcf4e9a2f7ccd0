//! Caller metadata extraction for chat requests.
//!
//! The origin address is taken from, in order:
//! 1. The first entry of `X-Forwarded-For` (reverse proxy setups)
//! 2. `X-Real-IP`
//! 3. The socket peer address from `ConnectInfo`
//!
//! The client descriptor is the `User-Agent` header.

use std::net::SocketAddr;

use axum::extract::ConnectInfo;
use axum::http::{header, HeaderMap};

use crate::domain::matchmaking::ClientMetadata;

/// Builds the metadata the coordinator records for a connecting user.
pub fn client_metadata(
    headers: &HeaderMap,
    connect_info: Option<&ConnectInfo<SocketAddr>>,
) -> ClientMetadata {
    ClientMetadata::new(
        extract_client_ip(headers, connect_info),
        header_value(headers, header::USER_AGENT.as_str()),
    )
}

fn extract_client_ip(
    headers: &HeaderMap,
    connect_info: Option<&ConnectInfo<SocketAddr>>,
) -> Option<String> {
    // Take the first IP (client IP, before any proxies)
    if let Some(forwarded) = header_value(headers, "X-Forwarded-For") {
        if let Some(first_ip) = forwarded.split(',').map(str::trim).find(|ip| !ip.is_empty()) {
            return Some(first_ip.to_string());
        }
    }

    if let Some(real_ip) = header_value(headers, "X-Real-IP") {
        return Some(real_ip);
    }

    connect_info.map(|ci| ci.0.ip().to_string())
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

//! Connected-user records and the metadata attached to them.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, UserId};

use super::tags::TagSet;

/// Placeholder for any metadata field that could not be determined.
pub const UNKNOWN: &str = "Unknown";

/// Best-effort location of a client address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub city: String,
    pub region: String,
    pub country: String,
}

impl GeoLocation {
    pub fn new(
        city: impl Into<String>,
        region: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            city: city.into(),
            region: region.into(),
            country: country.into(),
        }
    }

    /// Location with every field set to [`UNKNOWN`].
    pub fn unknown() -> Self {
        Self::new(UNKNOWN, UNKNOWN, UNKNOWN)
    }

    pub fn is_unknown(&self) -> bool {
        self.city == UNKNOWN && self.region == UNKNOWN && self.country == UNKNOWN
    }
}

impl Default for GeoLocation {
    fn default() -> Self {
        Self::unknown()
    }
}

impl std::fmt::Display for GeoLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}, {}", self.city, self.region, self.country)
    }
}

/// What the transport layer knows about the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientMetadata {
    /// Origin address, if the transport could determine one.
    pub address: Option<String>,
    /// Client descriptor, e.g. a browser user agent.
    pub user_agent: Option<String>,
}

impl ClientMetadata {
    pub fn new(address: Option<String>, user_agent: Option<String>) -> Self {
        Self {
            address,
            user_agent,
        }
    }
}

/// A connected user. Owned by the session registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    id: UserId,
    tags: TagSet,
    address: String,
    location: GeoLocation,
    client: String,
    connected_at: Timestamp,
    last_seen: Timestamp,
}

impl UserRecord {
    /// Creates a record from resolved metadata; missing fields become
    /// [`UNKNOWN`].
    pub fn new(
        id: UserId,
        tags: TagSet,
        client: ClientMetadata,
        location: GeoLocation,
        connected_at: Timestamp,
    ) -> Self {
        Self {
            id,
            tags,
            address: client.address.unwrap_or_else(|| UNKNOWN.to_string()),
            location,
            client: client.user_agent.unwrap_or_else(|| UNKNOWN.to_string()),
            connected_at,
            last_seen: connected_at,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn location(&self) -> &GeoLocation {
        &self.location
    }

    pub fn client(&self) -> &str {
        &self.client
    }

    pub fn connected_at(&self) -> &Timestamp {
        &self.connected_at
    }

    /// Time of the user's most recent connect, send or poll.
    pub fn last_seen(&self) -> &Timestamp {
        &self.last_seen
    }

    /// Records activity. Never moves `last_seen` backwards.
    pub fn touch(&mut self, now: Timestamp) {
        if self.last_seen.is_before(&now) {
            self.last_seen = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_metadata_degrades_to_unknown() {
        let record = UserRecord::new(
            UserId::new(1),
            TagSet::new(),
            ClientMetadata::default(),
            GeoLocation::unknown(),
            Timestamp::from_unix_secs(100),
        );

        assert_eq!(record.address(), "Unknown");
        assert_eq!(record.client(), "Unknown");
        assert!(record.location().is_unknown());
    }

    #[test]
    fn touch_only_moves_forward() {
        let mut record = UserRecord::new(
            UserId::new(1),
            TagSet::new(),
            ClientMetadata::new(Some("10.0.0.1".into()), Some("curl/8".into())),
            GeoLocation::new("Oslo", "Oslo", "NO"),
            Timestamp::from_unix_secs(100),
        );

        record.touch(Timestamp::from_unix_secs(150));
        record.touch(Timestamp::from_unix_secs(120));

        assert_eq!(record.last_seen().as_unix_secs(), 150);
        assert_eq!(record.connected_at().as_unix_secs(), 100);
    }

    #[test]
    fn geo_location_displays_all_fields() {
        let geo = GeoLocation::new("Lyon", "ARA", "FR");
        assert_eq!(geo.to_string(), "Lyon, ARA, FR");
    }
}

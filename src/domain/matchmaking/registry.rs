//! Connected-user records and the symmetric partner relation.

use std::collections::HashMap;

use crate::domain::foundation::UserId;

use super::errors::MatchmakingError;
use super::user::UserRecord;

/// Holds every connected user and who they are paired with.
///
/// The partner relation is kept symmetric: `link` writes both directions
/// and `unlink` clears both, so a user never points at a partner that no
/// longer points back.
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    users: HashMap<UserId, UserRecord>,
    partners: HashMap<UserId, UserId>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record. Fails if the id is already connected.
    pub fn register(&mut self, record: UserRecord) -> Result<(), MatchmakingError> {
        let id = record.id();
        if self.users.contains_key(&id) {
            return Err(MatchmakingError::AlreadyConnected(id));
        }
        self.users.insert(id, record);
        Ok(())
    }

    /// Removes a record along with any partner link touching it.
    ///
    /// Returns the removed record and the id it was paired with, if any.
    pub fn unregister(
        &mut self,
        id: UserId,
    ) -> Result<(UserRecord, Option<UserId>), MatchmakingError> {
        let record = self
            .users
            .remove(&id)
            .ok_or(MatchmakingError::NotConnected(id))?;
        let former_partner = self.unlink(id);
        Ok((record, former_partner))
    }

    pub fn is_connected(&self, id: UserId) -> bool {
        self.users.contains_key(&id)
    }

    pub fn get(&self, id: UserId) -> Result<&UserRecord, MatchmakingError> {
        self.users.get(&id).ok_or(MatchmakingError::NotConnected(id))
    }

    pub fn get_mut(&mut self, id: UserId) -> Result<&mut UserRecord, MatchmakingError> {
        self.users
            .get_mut(&id)
            .ok_or(MatchmakingError::NotConnected(id))
    }

    /// Number of connected users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &UserRecord> {
        self.users.values()
    }

    pub fn partner_of(&self, id: UserId) -> Option<UserId> {
        self.partners.get(&id).copied()
    }

    /// Pairs two connected, currently unpaired users.
    pub fn link(&mut self, a: UserId, b: UserId) -> Result<(), MatchmakingError> {
        if a == b {
            return Err(MatchmakingError::InvalidPairing(a, "cannot partner with itself"));
        }
        for id in [a, b] {
            if !self.is_connected(id) {
                return Err(MatchmakingError::NotConnected(id));
            }
            if self.partners.contains_key(&id) {
                return Err(MatchmakingError::InvalidPairing(id, "already has a partner"));
            }
        }
        self.partners.insert(a, b);
        self.partners.insert(b, a);
        Ok(())
    }

    /// Clears the partner link of `id` in both directions.
    ///
    /// Returns the former partner, if any.
    pub fn unlink(&mut self, id: UserId) -> Option<UserId> {
        let partner = self.partners.remove(&id)?;
        if self.partners.get(&partner) == Some(&id) {
            self.partners.remove(&partner);
        }
        Some(partner)
    }

    /// Every (user, partner) entry. Each pair appears twice, once per side.
    pub fn partner_links(&self) -> impl Iterator<Item = (UserId, UserId)> + '_ {
        self.partners.iter().map(|(a, b)| (*a, *b))
    }
}

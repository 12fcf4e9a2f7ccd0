//! Waiting pool and the tag-intersection pairing policy.
//!
//! The policy is first-match, not best-match: the pool is scanned oldest
//! first and the first compatible entry wins, even if a later entry shares
//! more tags with the requester.

use std::collections::VecDeque;

use crate::domain::foundation::{Timestamp, UserId};

use super::tags::TagSet;

/// A user seeking a partner, with the tags they connected with.
///
/// The tag set is a snapshot taken at connect time and is never updated
/// while the entry is pending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitingEntry {
    pub user_id: UserId,
    pub tags: TagSet,
    pub enqueued_at: Timestamp,
}

impl WaitingEntry {
    pub fn new(user_id: UserId, tags: TagSet, enqueued_at: Timestamp) -> Self {
        Self {
            user_id,
            tags,
            enqueued_at,
        }
    }
}

/// Selects the partner for a requester from candidates in arrival order.
///
/// Returns the first candidate whose tags are compatible with
/// `requester_tags` (see [`TagSet::is_compatible_with`]), or `None`.
pub fn find_partner<'a, I>(requester_tags: &TagSet, candidates: I) -> Option<&'a WaitingEntry>
where
    I: IntoIterator<Item = &'a WaitingEntry>,
{
    candidates
        .into_iter()
        .find(|entry| requester_tags.is_compatible_with(&entry.tags))
}

/// Result of offering a requester to the pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// A waiting entry was selected and removed from the pool.
    Matched(WaitingEntry),
    /// Nothing matched; the requester now waits at the back of the pool.
    Queued,
}

/// Ordered set of users awaiting a partner, oldest first.
///
/// A user id appears at most once.
#[derive(Debug, Clone, Default)]
pub struct WaitingPool {
    entries: VecDeque<WaitingEntry>,
}

impl WaitingPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, user_id: UserId) -> bool {
        self.entries.iter().any(|e| e.user_id == user_id)
    }

    /// Entries in arrival order.
    pub fn iter(&self) -> impl Iterator<Item = &WaitingEntry> {
        self.entries.iter()
    }

    /// Appends an entry. Returns `false` without changes if the id is
    /// already waiting.
    pub fn enqueue(&mut self, entry: WaitingEntry) -> bool {
        if self.contains(entry.user_id) {
            return false;
        }
        self.entries.push_back(entry);
        true
    }

    /// Removes the entry for `user_id`, if present.
    pub fn remove(&mut self, user_id: UserId) -> Option<WaitingEntry> {
        let position = self.entries.iter().position(|e| e.user_id == user_id)?;
        self.entries.remove(position)
    }

    /// Pairs `requester` with the first compatible waiting entry, or queues
    /// it.
    ///
    /// The requester's own entry, if it is somehow already waiting, is never
    /// a candidate.
    pub fn match_or_enqueue(&mut self, requester: WaitingEntry) -> MatchOutcome {
        let selected = find_partner(
            &requester.tags,
            self.entries.iter().filter(|e| e.user_id != requester.user_id),
        )
        .map(|entry| entry.user_id);

        match selected.and_then(|partner| self.remove(partner)) {
            Some(entry) => MatchOutcome::Matched(entry),
            None => {
                self.enqueue(requester);
                MatchOutcome::Queued
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: u64, tags: &[&str]) -> WaitingEntry {
        WaitingEntry::new(
            UserId::new(id),
            tags.iter().copied().collect(),
            Timestamp::from_unix_secs(1_700_000_000 + id),
        )
    }

    fn pool(entries: Vec<WaitingEntry>) -> WaitingPool {
        let mut pool = WaitingPool::new();
        for e in entries {
            assert!(pool.enqueue(e));
        }
        pool
    }

    #[test]
    fn find_partner_on_empty_pool_is_none() {
        let tags: TagSet = ["a"].into_iter().collect();
        let candidates: Vec<WaitingEntry> = Vec::new();
        assert!(find_partner(&tags, &candidates).is_none());
    }

    #[test]
    fn empty_requester_takes_oldest_regardless_of_tags() {
        let candidates = vec![entry(1, &["x"]), entry(2, &[])];
        let found = find_partner(&TagSet::new(), &candidates).unwrap();
        assert_eq!(found.user_id, UserId::new(1));
    }

    #[test]
    fn tagged_requester_matches_empty_candidate() {
        let candidates = vec![entry(1, &["x"]), entry(2, &[])];
        let tags: TagSet = ["y"].into_iter().collect();
        let found = find_partner(&tags, &candidates).unwrap();
        assert_eq!(found.user_id, UserId::new(2));
    }

    #[test]
    fn intersection_beats_arrival_order() {
        let candidates = vec![entry(1, &["a"]), entry(2, &["a", "b"])];
        let tags: TagSet = ["b"].into_iter().collect();
        let found = find_partner(&tags, &candidates).unwrap();
        assert_eq!(found.user_id, UserId::new(2));
    }

    #[test]
    fn first_match_not_best_match() {
        let candidates = vec![entry(1, &["a"]), entry(2, &["a", "b", "c"])];
        let tags: TagSet = ["a", "b", "c"].into_iter().collect();
        let found = find_partner(&tags, &candidates).unwrap();
        assert_eq!(found.user_id, UserId::new(1));
    }

    #[test]
    fn no_compatible_candidate_is_none() {
        let candidates = vec![entry(1, &["a"]), entry(2, &["b"])];
        let tags: TagSet = ["c"].into_iter().collect();
        assert!(find_partner(&tags, &candidates).is_none());
    }

    #[test]
    fn enqueue_rejects_duplicate_id() {
        let mut pool = pool(vec![entry(1, &["a"])]);
        assert!(!pool.enqueue(entry(1, &["b"])));
        assert_eq!(pool.len(), 1);
        assert!(pool.iter().next().unwrap().tags.contains("a"));
    }

    #[test]
    fn remove_preserves_order_of_others() {
        let mut pool = pool(vec![entry(1, &[]), entry(2, &[]), entry(3, &[])]);
        assert!(pool.remove(UserId::new(2)).is_some());
        assert!(pool.remove(UserId::new(2)).is_none());

        let ids: Vec<u64> = pool.iter().map(|e| e.user_id.as_u64()).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn match_or_enqueue_removes_matched_entry() {
        let mut pool = pool(vec![entry(1, &["a"]), entry(2, &["a", "b"])]);

        let outcome = pool.match_or_enqueue(entry(3, &["b"]));

        assert_eq!(outcome, MatchOutcome::Matched(entry(2, &["a", "b"])));
        assert!(!pool.contains(UserId::new(2)));
        assert!(!pool.contains(UserId::new(3)));
        assert!(pool.contains(UserId::new(1)));
    }

    #[test]
    fn match_or_enqueue_queues_at_back_when_nothing_fits() {
        let mut pool = pool(vec![entry(1, &["a"])]);

        let outcome = pool.match_or_enqueue(entry(2, &["z"]));

        assert_eq!(outcome, MatchOutcome::Queued);
        let ids: Vec<u64> = pool.iter().map(|e| e.user_id.as_u64()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn match_or_enqueue_never_pairs_requester_with_itself() {
        let mut pool = pool(vec![entry(1, &[])]);

        let outcome = pool.match_or_enqueue(entry(1, &[]));

        assert_eq!(outcome, MatchOutcome::Queued);
        assert_eq!(pool.len(), 1);
    }
}

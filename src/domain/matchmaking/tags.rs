//! Interest tags used for affinity matching.

use std::collections::BTreeSet;

use serde::Serialize;

/// Tag value some browser clients leak into the tag list by serializing a
/// DOM event object. Never a real interest, always dropped.
pub const UNTRUSTED_EVENT_TAG: &str = "isTrusted";

/// Unordered set of interest tags.
///
/// Order of insertion is irrelevant to matching; iteration is sorted so that
/// anything derived from a set (like the common tags returned on pairing) is
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TagSet(BTreeSet<String>);

impl TagSet {
    /// Creates an empty tag set, which matches anyone.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a tag set from client-supplied tags, dropping
    /// [`UNTRUSTED_EVENT_TAG`] and duplicates.
    pub fn from_requested<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(
            tags.into_iter()
                .map(Into::into)
                .filter(|tag| tag != UNTRUSTED_EVENT_TAG)
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Tags present in both sets.
    pub fn intersection(&self, other: &TagSet) -> TagSet {
        Self(self.0.intersection(&other.0).cloned().collect())
    }

    /// Whether two users holding these sets may be paired.
    ///
    /// An empty set is a wildcard on either side; otherwise the sets must
    /// share at least one tag.
    pub fn is_compatible_with(&self, other: &TagSet) -> bool {
        self.is_empty() || other.is_empty() || !self.0.is_disjoint(&other.0)
    }

    /// Consumes the set, returning its tags in sorted order.
    pub fn into_sorted_vec(self) -> Vec<String> {
        self.0.into_iter().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_requested(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_requested_drops_untrusted_event_tag() {
        let tags = TagSet::from_requested(["music", "isTrusted", "games"]);
        assert_eq!(tags.len(), 2);
        assert!(!tags.contains("isTrusted"));
    }

    #[test]
    fn from_requested_collapses_duplicates() {
        let tags = TagSet::from_requested(["a", "a", "b"]);
        assert_eq!(tags.into_sorted_vec(), vec!["a", "b"]);
    }

    #[test]
    fn only_sentinel_yields_empty_set() {
        assert!(TagSet::from_requested(["isTrusted"]).is_empty());
    }

    #[test]
    fn empty_set_is_compatible_with_anything() {
        let empty = TagSet::new();
        let some: TagSet = ["x"].into_iter().collect();

        assert!(empty.is_compatible_with(&some));
        assert!(some.is_compatible_with(&empty));
        assert!(empty.is_compatible_with(&empty));
    }

    #[test]
    fn disjoint_sets_are_incompatible() {
        let a: TagSet = ["a"].into_iter().collect();
        let b: TagSet = ["b"].into_iter().collect();
        assert!(!a.is_compatible_with(&b));
    }

    #[test]
    fn overlapping_sets_are_compatible_regardless_of_order() {
        let a: TagSet = ["b", "a"].into_iter().collect();
        let b: TagSet = ["c", "a"].into_iter().collect();
        assert!(a.is_compatible_with(&b));
        assert_eq!(a.intersection(&b).into_sorted_vec(), vec!["a"]);
    }

    #[test]
    fn intersection_with_empty_is_empty() {
        let a: TagSet = ["a"].into_iter().collect();
        assert!(a.intersection(&TagSet::new()).is_empty());
    }

    #[test]
    fn serializes_as_sorted_array() {
        let tags: TagSet = ["z", "a"].into_iter().collect();
        assert_eq!(serde_json::to_string(&tags).unwrap(), r#"["a","z"]"#);
    }
}

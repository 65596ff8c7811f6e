// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::HashMap;

use purview_core::{ReleaseTag, Target};

/// All release tags gathered for one object, keyed by target.
///
/// Logically a multiset per target: insertion de-duplicates by strict value
/// equality over all tag fields and nothing else. Two tags sharing a target
/// and timestamp but asserted by different actors, or reached through
/// different branches of the collection graph with different dispositions,
/// are both kept.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TagSet {
    tags: HashMap<Target, Vec<ReleaseTag>>,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a tag, de-duplicating by strict value equality. Returns `true`
    /// if the tag was not present yet.
    pub fn insert(&mut self, tag: ReleaseTag) -> bool {
        let tags = self.tags.entry(tag.target.clone()).or_default();
        if tags.contains(&tag) {
            return false;
        }

        tags.push(tag);
        true
    }

    /// Tags gathered for one target, in insertion order.
    pub fn get(&self, target: &Target) -> &[ReleaseTag] {
        self.tags.get(target).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Target, &[ReleaseTag])> {
        self.tags
            .iter()
            .map(|(target, tags)| (target, tags.as_slice()))
    }

    /// Number of targets with at least one tag.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use purview_core::{ReleaseTag, TagScope, Target};

    use super::TagSet;

    fn tag(asserted_by: &str, release: bool) -> ReleaseTag {
        ReleaseTag::new(
            Target::from("Searchworks"),
            TagScope::Collection,
            Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            asserted_by,
            release,
        )
    }

    #[test]
    fn exact_duplicates_collapse() {
        let mut set = TagSet::new();

        assert!(set.insert(tag("petucket", true)));
        assert!(!set.insert(tag("petucket", true)));

        assert_eq!(set.get(&Target::from("Searchworks")).len(), 1);
    }

    #[test]
    fn same_instant_different_actors_both_kept() {
        let mut set = TagSet::new();

        assert!(set.insert(tag("petucket", true)));
        assert!(set.insert(tag("jcoyne", false)));

        assert_eq!(set.get(&Target::from("Searchworks")).len(), 2);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn unknown_target_yields_empty_slice() {
        let set = TagSet::new();
        assert!(set.get(&Target::from("Earthworks")).is_empty());
    }
}

// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::HashSet;

use purview_core::ReleaseTag;

use crate::decision::ReleaseDecision;
use crate::tag_set::TagSet;

/// Reduce an aggregated tag set to one authoritative decision per target.
///
/// Per target:
///
/// - Any self tag beats every collection tag, regardless of recency: a self
///   assertion is the object's own explicit intent. Among self tags the
///   newest wins, ties broken by `asserted_by`, then insertion order.
/// - With no self tags, collection tags are consulted newest-first, skipping
///   tags whose administrative-tag qualifier the object does not carry. The
///   first applicable tag decides.
/// - A target whose tags are all inapplicable is omitted from the decision,
///   not recorded as withheld.
///
/// `admin_tags` is the administrative tag set of the object being resolved;
/// qualifiers are only ever evaluated against the leaf object, never against
/// the collection that contributed the tag.
pub fn resolve(tag_set: &TagSet, admin_tags: &HashSet<String>) -> ReleaseDecision {
    let mut decision = ReleaseDecision::new();

    for (target, tags) in tag_set.iter() {
        let mut self_tags = Vec::new();
        let mut collection_tags = Vec::new();
        for tag in tags {
            if tag.scope.is_object() {
                self_tags.push(tag);
            } else {
                collection_tags.push(tag);
            }
        }

        if let Some(authoritative) = newest(&self_tags) {
            decision.insert(target.clone(), authoritative.release);
            continue;
        }

        // Sorted pop loop: ascending order, consume from the back. Each step
        // removes exactly one candidate, so the reduction is bounded by the
        // pool size.
        collection_tags.sort_by(|a, b| {
            (a.timestamp, &a.asserted_by).cmp(&(b.timestamp, &b.asserted_by))
        });
        while let Some(candidate) = collection_tags.pop() {
            if candidate.applies_to(admin_tags) {
                decision.insert(target.clone(), candidate.release);
                break;
            }
            // Inapplicable; fall through to the next most recent.
        }
    }

    decision
}

/// The most recent tag, ties broken by `asserted_by` and then by insertion
/// order (the later entry wins).
fn newest<'a>(tags: &[&'a ReleaseTag]) -> Option<&'a ReleaseTag> {
    let mut best: Option<&ReleaseTag> = None;

    for &tag in tags {
        let replace = match best {
            None => true,
            Some(current) => {
                (tag.timestamp, &tag.asserted_by) >= (current.timestamp, &current.asserted_by)
            }
        };
        if replace {
            best = Some(tag);
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::{DateTime, TimeZone, Utc};
    use purview_core::{AdminTag, ReleaseTag, TagScope, Target};

    use super::resolve;
    use crate::tag_set::TagSet;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap()
    }

    fn tag(scope: TagScope, hour: u32, asserted_by: &str, release: bool) -> ReleaseTag {
        ReleaseTag::new(Target::from("Searchworks"), scope, at(hour), asserted_by, release)
    }

    fn set_of(tags: impl IntoIterator<Item = ReleaseTag>) -> TagSet {
        let mut set = TagSet::new();
        for tag in tags {
            set.insert(tag);
        }
        set
    }

    #[test]
    fn empty_set_resolves_to_empty_decision() {
        let decision = resolve(&TagSet::new(), &HashSet::new());
        assert!(decision.is_empty());
    }

    #[test]
    fn self_tag_dominates_newer_collection_tag() {
        let set = set_of([
            tag(TagScope::Object, 9, "petucket", false),
            tag(TagScope::Collection, 17, "lmcrae", true),
        ]);

        let decision = resolve(&set, &HashSet::new());
        assert_eq!(decision.released(&Target::from("Searchworks")), Some(false));
    }

    #[test]
    fn newest_self_tag_wins() {
        let set = set_of([
            tag(TagScope::Object, 9, "petucket", true),
            tag(TagScope::Object, 17, "petucket", false),
        ]);

        let decision = resolve(&set, &HashSet::new());
        assert_eq!(decision.released(&Target::from("Searchworks")), Some(false));
    }

    #[test]
    fn self_tag_timestamp_tie_breaks_by_actor() {
        let set = set_of([
            tag(TagScope::Object, 9, "aaa", true),
            tag(TagScope::Object, 9, "zzz", false),
        ]);

        let decision = resolve(&set, &HashSet::new());
        // Deterministic: the greater asserted_by wins the tie.
        assert_eq!(decision.released(&Target::from("Searchworks")), Some(false));
    }

    #[test]
    fn newest_collection_tag_wins_without_self_tags() {
        let set = set_of([
            tag(TagScope::Collection, 9, "petucket", true),
            tag(TagScope::Collection, 17, "lmcrae", false),
        ]);

        let decision = resolve(&set, &HashSet::new());
        assert_eq!(decision.released(&Target::from("Searchworks")), Some(false));
    }

    #[test]
    fn inapplicable_qualifier_falls_through_to_older_tag() {
        let qualified = tag(TagScope::Collection, 17, "lmcrae", false)
            .with_admin_tag_scope(AdminTag::parse("Project : Batch1").unwrap());
        let set = set_of([tag(TagScope::Collection, 9, "petucket", true), qualified]);

        let decision = resolve(&set, &HashSet::new());
        assert_eq!(decision.released(&Target::from("Searchworks")), Some(true));
    }

    #[test]
    fn matching_qualifier_applies() {
        let qualified = tag(TagScope::Collection, 17, "lmcrae", false)
            .with_admin_tag_scope(AdminTag::parse("Project : Batch1").unwrap());
        let set = set_of([tag(TagScope::Collection, 9, "petucket", true), qualified]);

        let admin_tags = HashSet::from(["Project : Batch1".to_string()]);
        let decision = resolve(&set, &admin_tags);
        assert_eq!(decision.released(&Target::from("Searchworks")), Some(false));
    }

    #[test]
    fn target_omitted_when_no_tag_applies() {
        let qualified = tag(TagScope::Collection, 17, "lmcrae", true)
            .with_admin_tag_scope(AdminTag::parse("Project : Batch1").unwrap());
        let set = set_of([qualified]);

        let decision = resolve(&set, &HashSet::new());
        assert!(decision.is_empty());
    }

    #[test]
    fn targets_resolve_independently() {
        let mut set = set_of([tag(TagScope::Object, 9, "petucket", true)]);
        set.insert(ReleaseTag::new(
            Target::from("Earthworks"),
            TagScope::Collection,
            at(10),
            "lmcrae",
            false,
        ));

        let decision = resolve(&set, &HashSet::new());
        assert_eq!(decision.released(&Target::from("Searchworks")), Some(true));
        assert_eq!(decision.released(&Target::from("Earthworks")), Some(false));
    }
}

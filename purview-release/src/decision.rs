// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::BTreeMap;

use purview_core::Target;
use serde::{Deserialize, Serialize};

/// The resolved release disposition per target.
///
/// One entry per target that had any applicable tag; a target with no
/// applicable tag is absent, not recorded as `false`. Iteration order is
/// stable (sorted by target). Decisions are computed fresh on every
/// resolution call and never cached by the engine.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReleaseDecision(BTreeMap<Target, bool>);

impl ReleaseDecision {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, target: Target, release: bool) {
        self.0.insert(target, release);
    }

    /// The resolved disposition for one target, `None` if the target had no
    /// applicable tag.
    pub fn released(&self, target: &Target) -> Option<bool> {
        self.0.get(target).copied()
    }

    pub fn contains(&self, target: &Target) -> bool {
        self.0.contains_key(target)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Target, bool)> {
        self.0.iter().map(|(target, release)| (target, *release))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Target, bool)> for ReleaseDecision {
    fn from_iter<I: IntoIterator<Item = (Target, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for ReleaseDecision {
    type Item = (Target, bool);
    type IntoIter = std::collections::btree_map::IntoIter<Target, bool>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use purview_core::Target;

    use super::ReleaseDecision;

    #[test]
    fn absent_targets_are_not_false() {
        let decision =
            ReleaseDecision::from_iter([(Target::from("Searchworks"), false)]);

        assert_eq!(decision.released(&Target::from("Searchworks")), Some(false));
        assert_eq!(decision.released(&Target::from("Earthworks")), None);
    }

    #[test]
    fn iterates_sorted_by_target() {
        let decision = ReleaseDecision::from_iter([
            (Target::from("Searchworks"), true),
            (Target::from("Earthworks"), false),
        ]);

        let targets: Vec<_> = decision.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(targets, vec!["Earthworks", "Searchworks"]);
    }
}

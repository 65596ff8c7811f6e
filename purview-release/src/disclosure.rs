// SPDX-License-Identifier: MIT OR Apache-2.0

use purview_core::Target;
use serde::{Deserialize, Serialize};

use crate::decision::ReleaseDecision;

/// One entry of a disclosure document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseEntry {
    pub to: Target,
    pub release: bool,
}

/// A serializable disclosure document: the ordered list of
/// `(target, release)` pairs a resolution produced.
///
/// Entries are sorted by target, which satisfies the "stable for a given
/// input" contract and gives callers deterministic output for free.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disclosure {
    pub releases: Vec<ReleaseEntry>,
}

impl Disclosure {
    /// Render the document as JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Read back a previously rendered document.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

impl From<&ReleaseDecision> for Disclosure {
    fn from(decision: &ReleaseDecision) -> Self {
        Self {
            releases: decision
                .iter()
                .map(|(target, release)| ReleaseEntry {
                    to: target.clone(),
                    release,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use purview_core::Target;

    use super::Disclosure;
    use crate::decision::ReleaseDecision;

    #[test]
    fn entries_are_sorted_by_target() {
        let decision = ReleaseDecision::from_iter([
            (Target::from("Searchworks"), true),
            (Target::from("Earthworks"), false),
        ]);

        let disclosure = Disclosure::from(&decision);
        let targets: Vec<_> = disclosure
            .releases
            .iter()
            .map(|entry| entry.to.as_str())
            .collect();

        assert_eq!(targets, vec!["Earthworks", "Searchworks"]);
    }

    #[test]
    fn renders_and_reads_back() {
        let decision = ReleaseDecision::from_iter([(Target::from("Searchworks"), true)]);
        let disclosure = Disclosure::from(&decision);

        let raw = disclosure.to_json().unwrap();
        assert_eq!(
            raw,
            r#"{"releases":[{"to":"Searchworks","release":true}]}"#
        );
        assert_eq!(Disclosure::from_json(&raw).unwrap(), disclosure);
    }
}

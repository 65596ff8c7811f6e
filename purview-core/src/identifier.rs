// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a repository object or collection.
///
/// Objects and collections share one identifier namespace; whether an id
/// refers to a collection is a property of the repository graph, not of the
/// identifier itself.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ObjectId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ObjectId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A named external distribution target (an index, feed or partner) to which
/// an object may or may not be authorized for release.
///
/// Target names are case-sensitive. By convention they are capitalized
/// ("Searchworks", "Earthworks") but no normalization is applied here.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Target(String);

impl Target {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Target {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Target {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{ObjectId, Target};

    #[test]
    fn targets_are_case_sensitive() {
        assert_ne!(Target::from("Searchworks"), Target::from("searchworks"));
    }

    #[test]
    fn identifiers_order_by_name() {
        let mut ids = vec![ObjectId::from("pv:croquet"), ObjectId::from("pv:archery")];
        ids.sort();
        assert_eq!(ids[0], ObjectId::from("pv:archery"));
    }
}

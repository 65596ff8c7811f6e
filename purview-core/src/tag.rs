// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::identifier::Target;

/// Whether a tag applies to the tagged object itself or propagates to the
/// members of a tagged collection.
///
/// The raw form spells the first variant `"self"`; it is named `Object` on
/// the Rust side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagScope {
    #[serde(rename = "self")]
    Object,
    Collection,
}

impl TagScope {
    /// Scope is the tagged object itself.
    pub fn is_object(&self) -> bool {
        matches!(self, TagScope::Object)
    }

    /// Scope propagates to collection members.
    pub fn is_collection(&self) -> bool {
        matches!(self, TagScope::Collection)
    }
}

impl fmt::Display for TagScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TagScope::Object => "self",
            TagScope::Collection => "collection",
        };

        write!(f, "{}", s)
    }
}

impl FromStr for TagScope {
    type Err = MalformedTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "self" => Ok(TagScope::Object),
            "collection" => Ok(TagScope::Collection),
            other => Err(MalformedTagError::UnknownScope(other.to_string())),
        }
    }
}

/// An administrative tag used to qualify a collection-scoped release tag.
///
/// Administrative tags are segmented with colons ("Project : Batch1"). A
/// qualifier requires at least two segments and no empty segment; the value
/// is stored verbatim, whitespace included, and compared by exact string
/// equality against an object's administrative tag set.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdminTag(String);

impl AdminTag {
    /// Parse an administrative tag, rejecting values with fewer than two
    /// non-empty colon-separated segments.
    pub fn parse(value: &str) -> Result<Self, MalformedTagError> {
        let segments: Vec<&str> = value.split(':').collect();
        if segments.len() < 2 || segments.iter().any(|segment| segment.trim().is_empty()) {
            return Err(MalformedTagError::InvalidAdminTag(value.to_string()));
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AdminTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An untyped release-tag record as persisted by the metadata store.
///
/// Records are attribute maps with the conventional attribute names `to`
/// (target), `what` (scope), `when` (timestamp), `who` (asserting actor),
/// `release` (disposition) and optionally `tag` (administrative-tag
/// qualifier). Nothing about the shape is guaranteed until the record has
/// been parsed into a [`ReleaseTag`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawTagRecord(serde_json::Map<String, Value>);

impl RawTagRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute, replacing any previous value. Builder-style, mainly
    /// useful for authoring and tests.
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.0.insert(name.to_string(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }
}

impl From<serde_json::Map<String, Value>> for RawTagRecord {
    fn from(attributes: serde_json::Map<String, Value>) -> Self {
        Self(attributes)
    }
}

/// A stored tag record failed to parse.
///
/// Raised while normalizing records the metadata store hands back during
/// resolution; a malformed stored tag indicates a data-integrity problem
/// upstream and is never silently dropped.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MalformedTagError {
    #[error("tag record is missing attribute `{0}`")]
    MissingAttribute(&'static str),

    #[error("tag attribute `{0}` must be a string")]
    ExpectedString(&'static str),

    #[error("tag attribute `{0}` must not be empty")]
    EmptyAttribute(&'static str),

    #[error("unknown tag scope `{0}`, expected `self` or `collection`")]
    UnknownScope(String),

    #[error("tag timestamp `{0}` is not an ISO 8601 UTC instant")]
    InvalidTimestamp(String),

    #[error("tag attribute `release` must be a strict boolean")]
    ExpectedBoolean,

    #[error("administrative tag `{0}` needs at least two non-empty colon-separated segments")]
    InvalidAdminTag(String),
}

/// A normalized release assertion, immutable once parsed.
///
/// Equality and hashing cover all six fields; the aggregator relies on this
/// strict value equality when de-duplicating tags reached through different
/// branches of the collection graph.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReleaseTag {
    /// The distribution target the assertion is addressed to.
    pub target: Target,

    /// Whether the tag covers the tagged object or the members of a tagged
    /// collection.
    pub scope: TagScope,

    /// When the tag was asserted.
    pub timestamp: DateTime<Utc>,

    /// The actor who created the tag.
    pub asserted_by: String,

    /// The asserted disposition: `true` releases, `false` withholds.
    pub release: bool,

    /// Optional administrative-tag qualifier. When present the tag only
    /// applies to objects whose own administrative tag set contains this
    /// exact value; qualifiers are never inherited from a collection.
    pub admin_tag_scope: Option<AdminTag>,
}

impl ReleaseTag {
    pub fn new(
        target: Target,
        scope: TagScope,
        timestamp: DateTime<Utc>,
        asserted_by: impl Into<String>,
        release: bool,
    ) -> Self {
        Self {
            target,
            scope,
            timestamp,
            asserted_by: asserted_by.into(),
            release,
            admin_tag_scope: None,
        }
    }

    /// Attach an administrative-tag qualifier.
    pub fn with_admin_tag_scope(mut self, admin_tag: AdminTag) -> Self {
        self.admin_tag_scope = Some(admin_tag);
        self
    }

    /// Parse an untyped stored record into a normalized tag.
    ///
    /// Attributes are checked in the order `to`, `what`, `when`, `who`,
    /// `release`, `tag`; the error names the first violated constraint.
    pub fn parse(record: &RawTagRecord) -> Result<Self, MalformedTagError> {
        let target = required_string(record, "to")?;
        let scope = TagScope::from_str(required_string(record, "what")?)?;
        let timestamp = parse_timestamp(required_string(record, "when")?)?;
        let asserted_by = required_string(record, "who")?;

        let release = record
            .get("release")
            .ok_or(MalformedTagError::MissingAttribute("release"))?
            .as_bool()
            .ok_or(MalformedTagError::ExpectedBoolean)?;

        let admin_tag_scope = match record.get("tag") {
            Some(value) => {
                let raw = value
                    .as_str()
                    .ok_or(MalformedTagError::ExpectedString("tag"))?;
                Some(AdminTag::parse(raw)?)
            }
            None => None,
        };

        Ok(Self {
            target: Target::from(target),
            scope,
            timestamp,
            asserted_by: asserted_by.to_string(),
            release,
            admin_tag_scope,
        })
    }

    /// Whether this tag applies to an object carrying the given
    /// administrative tags.
    ///
    /// An unqualified tag applies unconditionally; a qualified one only when
    /// the object's own administrative tag set contains the qualifier.
    pub fn applies_to(&self, admin_tags: &HashSet<String>) -> bool {
        match &self.admin_tag_scope {
            None => true,
            Some(qualifier) => admin_tags.contains(qualifier.as_str()),
        }
    }
}

fn required_string<'a>(
    record: &'a RawTagRecord,
    name: &'static str,
) -> Result<&'a str, MalformedTagError> {
    let value = record
        .get(name)
        .ok_or(MalformedTagError::MissingAttribute(name))?;
    let s = value
        .as_str()
        .ok_or(MalformedTagError::ExpectedString(name))?;

    if s.is_empty() {
        return Err(MalformedTagError::EmptyAttribute(name));
    }

    Ok(s)
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, MalformedTagError> {
    let parsed = DateTime::parse_from_rfc3339(raw)
        .map_err(|_| MalformedTagError::InvalidTimestamp(raw.to_string()))?;

    // The instant must be asserted in UTC, not merely convertible to it.
    if parsed.offset().local_minus_utc() != 0 {
        return Err(MalformedTagError::InvalidTimestamp(raw.to_string()));
    }

    Ok(parsed.with_timezone(&Utc))
}

// SPDX-License-Identifier: MIT OR Apache-2.0

use thiserror::Error;

use crate::tag::{MalformedTagError, RawTagRecord, ReleaseTag};

/// A proposed tag was rejected by the authoring-side validator.
///
/// Carries the first violated constraint. Only ever raised while authoring;
/// the resolution path surfaces the same constraint violations as
/// [`MalformedTagError`] instead.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("proposed tag rejected: {0}")]
pub struct InvalidTagError(#[from] MalformedTagError);

impl InvalidTagError {
    /// The violated tag-format constraint.
    pub fn constraint(&self) -> &MalformedTagError {
        &self.0
    }
}

/// Check a proposed tag record against the tag-format contract.
///
/// A record is acceptable exactly when it parses as a [`ReleaseTag`]; parser
/// and validator share one contract so nothing the authoring path accepts
/// can later fail resolution. No partial tag is ever persisted: the
/// validator holds no store handle and has no side effects.
pub fn validate_tag(record: &RawTagRecord) -> Result<(), InvalidTagError> {
    ReleaseTag::parse(record)?;
    Ok(())
}

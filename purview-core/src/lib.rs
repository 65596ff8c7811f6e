// SPDX-License-Identifier: MIT OR Apache-2.0

//! Data types and the tag-format contract for the purview release-tag
//! resolution engine.
//!
//! A "release tag" is an assertion that a repository object should (or should
//! not) be released to a named external distribution target. Tags are
//! persisted by a metadata store as untyped attribute records; this crate
//! owns the normalized [`ReleaseTag`] value type, the parser which turns a
//! [`RawTagRecord`] into one, and the authoring-side [`validate_tag`] check
//! which shares the same format contract.
//!
//! The resolution engine itself lives in `purview-release`, the collaborator
//! interfaces it consumes in `purview-store`.

mod identifier;
mod tag;
mod validate;

pub use identifier::{ObjectId, Target};
pub use tag::{AdminTag, MalformedTagError, RawTagRecord, ReleaseTag, TagScope};
pub use validate::{InvalidTagError, validate_tag};

// SPDX-License-Identifier: MIT OR Apache-2.0

//! Release-tag resolution engine.
//!
//! Decides, for every external distribution target, whether a repository
//! object is currently authorized to be released to that target. Four stages
//! compose the answer:
//!
//! 1. **Parsing** (in `purview-core`) normalizes the raw tag records the
//!    metadata store hands back.
//! 2. **Aggregation** ([`aggregate`]) collects the object's own tags plus
//!    the collection-scoped tags of every collection it is transitively a
//!    member of, tolerating cycles in the membership graph.
//! 3. **Resolution** ([`resolve`]) reduces the aggregated tag set to one
//!    decision per target: self tags dominate collection tags outright, the
//!    newest tag wins within a scope, and administrative-tag qualifiers
//!    restrict which collection tags apply.
//! 4. **Reconciliation** ([`reconcile`]) folds in previously published
//!    state, so a target that dropped out of scope is explicitly revoked
//!    instead of silently retained.
//!
//! [`ReleaseEngine`] wires the stages to the collaborator stores and exposes
//! `released_for` as the primary entry point. Resolution is read-only and
//! computed fresh on every call; nothing is cached across calls.

mod aggregate;
mod decision;
mod disclosure;
mod engine;
mod error;
mod reconcile;
mod resolve;
mod tag_set;

pub use aggregate::aggregate;
pub use decision::ReleaseDecision;
pub use disclosure::{Disclosure, ReleaseEntry};
pub use engine::ReleaseEngine;
pub use error::{Collaborator, ResolutionError};
pub use reconcile::reconcile;
pub use resolve::resolve;
pub use tag_set::TagSet;

pub use tokio_util::sync::CancellationToken;

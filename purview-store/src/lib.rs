// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator interfaces consumed by the purview release-tag resolution
//! engine, plus an in-memory reference implementation.
//!
//! The engine is read-only over three external stores: the metadata store
//! (raw tag records and administrative tags), the repository graph (direct
//! collection memberships) and the publication store (previously published
//! disclosure state). Each interface is a small async trait with an
//! associated error type; concrete deployments back them with whatever
//! network or database layer they use, while [`MemoryStore`] backs them with
//! plain maps for tests and embedded use.

mod memory;
mod traits;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;

pub use memory::MemoryStore;
pub use traits::{MetadataStore, PublicationStore, RepositoryGraph};

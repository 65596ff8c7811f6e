// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::HashSet;
use std::error::Error;

use purview_core::{ObjectId, RawTagRecord, Target};

/// Interface for reading an object's persisted tag metadata.
///
/// The engine never writes through this interface; tag records are created
/// by an external authoring action and are read-only inputs here.
pub trait MetadataStore {
    type Error: Error + Send + Sync + 'static;

    /// Raw release-tag records attached to the object itself.
    ///
    /// Returns `None` when the object is unknown to the store, which the
    /// engine tolerates as "contributes no tags" (a stale membership edge
    /// must not abort resolution).
    fn own_tags(
        &self,
        id: &ObjectId,
    ) -> impl Future<Output = Result<Option<Vec<RawTagRecord>>, Self::Error>>;

    /// The object's administrative tags, e.g. `"Project : Batch1"`.
    ///
    /// Unknown objects yield the empty set.
    fn admin_tags(
        &self,
        id: &ObjectId,
    ) -> impl Future<Output = Result<HashSet<String>, Self::Error>>;
}

/// Interface for walking the collection membership graph.
///
/// The graph is directed (object → collection) and may contain cycles; the
/// store reports edges as recorded, cycle tolerance is the engine's job.
pub trait RepositoryGraph {
    type Error: Error + Send + Sync + 'static;

    /// Collections the object is a direct member of.
    fn direct_collections(
        &self,
        id: &ObjectId,
    ) -> impl Future<Output = Result<Vec<ObjectId>, Self::Error>>;
}

/// Interface for reading previously published disclosure state.
pub trait PublicationStore {
    type Error: Error + Send + Sync + 'static;

    /// Targets the object is currently known to be published to.
    fn published_targets(
        &self,
        id: &ObjectId,
    ) -> impl Future<Output = Result<HashSet<Target>, Self::Error>>;

    /// The release value last published for one target, if any.
    ///
    /// Lets callers distinguish an explicitly revoked target from one that
    /// was never published; the engine itself only needs
    /// [`published_targets`](PublicationStore::published_targets).
    fn previous_release_value(
        &self,
        id: &ObjectId,
        target: &Target,
    ) -> impl Future<Output = Result<Option<bool>, Self::Error>>;
}

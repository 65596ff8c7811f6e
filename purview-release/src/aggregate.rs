// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::{HashSet, VecDeque};

use purview_core::{ObjectId, ReleaseTag};
use purview_store::{MetadataStore, RepositoryGraph};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::{ResolutionError, ensure_active};
use crate::tag_set::TagSet;

/// Gather every release tag that can speak for an object: its own tags plus
/// the collection-scoped tags of every collection it is transitively a
/// member of.
///
/// The membership graph is walked with an explicit worklist and visited set.
/// Each collection id enters the visited set before its memberships are
/// followed, so the walk terminates even when the graph contains cycles
/// (including an object that is transitively a member of itself); such
/// self-references are skipped, not errors. The visited set also serves as
/// the request-scoped memoization: no collection is fetched twice within one
/// call, however many paths reach it. Nothing is cached across calls.
///
/// A collection referenced by a membership edge but unknown to the metadata
/// store contributes no tags; the walk logs a warning and continues without
/// descending through it. A malformed stored tag aborts aggregation.
pub async fn aggregate<M, R>(
    metadata: &M,
    graph: &R,
    object: &ObjectId,
    cancel: &CancellationToken,
) -> Result<TagSet, ResolutionError>
where
    M: MetadataStore,
    R: RepositoryGraph,
{
    let mut visited: HashSet<ObjectId> = HashSet::from([object.clone()]);
    let mut result = TagSet::new();

    ensure_active(cancel)?;
    match metadata
        .own_tags(object)
        .await
        .map_err(ResolutionError::metadata)?
    {
        Some(records) => {
            // The object's own record is taken verbatim, whatever scope each
            // tag carries.
            for record in &records {
                let tag = ReleaseTag::parse(record).map_err(|source| {
                    ResolutionError::MalformedTag {
                        object: object.clone(),
                        source,
                    }
                })?;
                result.insert(tag);
            }
        }
        None => warn!(%object, "object unknown to metadata store, resolving without own tags"),
    }

    ensure_active(cancel)?;
    let mut worklist: VecDeque<ObjectId> = graph
        .direct_collections(object)
        .await
        .map_err(ResolutionError::repository_graph)?
        .into();

    while let Some(collection) = worklist.pop_front() {
        if !visited.insert(collection.clone()) {
            // Cycle or diamond; this collection already contributed.
            continue;
        }

        ensure_active(cancel)?;
        let Some(records) = metadata
            .own_tags(&collection)
            .await
            .map_err(ResolutionError::metadata)?
        else {
            warn!(%collection, "stale membership edge, collection unknown to metadata store");
            continue;
        };

        // Only collection-scoped tags propagate to members; a collection's
        // self tags speak for the collection object alone.
        for record in &records {
            let tag =
                ReleaseTag::parse(record).map_err(|source| ResolutionError::MalformedTag {
                    object: collection.clone(),
                    source,
                })?;
            if tag.scope.is_collection() {
                result.insert(tag);
            }
        }

        ensure_active(cancel)?;
        worklist.extend(
            graph
                .direct_collections(&collection)
                .await
                .map_err(ResolutionError::repository_graph)?,
        );
    }

    debug!(%object, targets = result.len(), "aggregated release tags");
    Ok(result)
}

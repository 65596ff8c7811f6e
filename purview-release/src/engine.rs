// SPDX-License-Identifier: MIT OR Apache-2.0

use purview_core::ObjectId;
use purview_store::{MetadataStore, PublicationStore, RepositoryGraph};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::aggregate::aggregate;
use crate::decision::ReleaseDecision;
use crate::disclosure::Disclosure;
use crate::error::{ResolutionError, ensure_active};
use crate::reconcile::reconcile;
use crate::resolve::resolve;

/// The release-tag resolution engine, wired to its three collaborators.
///
/// Resolution is read-only over all three stores and keeps no state between
/// calls, so one engine can serve concurrent resolutions for different
/// objects without coordination.
#[derive(Clone, Debug)]
pub struct ReleaseEngine<M, R, P> {
    metadata: M,
    graph: R,
    publication: P,
}

impl<M, R, P> ReleaseEngine<M, R, P>
where
    M: MetadataStore,
    R: RepositoryGraph,
    P: PublicationStore,
{
    pub fn new(metadata: M, graph: R, publication: P) -> Self {
        Self {
            metadata,
            graph,
            publication,
        }
    }

    /// Compute the authoritative release decision for an object, one entry
    /// per target with any applicable tag, plus explicit revocations for
    /// previously published targets that no longer resolve.
    ///
    /// Either returns the complete decision or fails; it never silently
    /// omits a target that should have been resolvable.
    pub async fn released_for(
        &self,
        object: &ObjectId,
    ) -> Result<ReleaseDecision, ResolutionError> {
        self.released_for_cancellable(object, &CancellationToken::new())
            .await
    }

    /// [`released_for`](ReleaseEngine::released_for), honoring a caller
    /// supplied cancellation token at every collaborator call.
    pub async fn released_for_cancellable(
        &self,
        object: &ObjectId,
        cancel: &CancellationToken,
    ) -> Result<ReleaseDecision, ResolutionError> {
        let tag_set = aggregate(&self.metadata, &self.graph, object, cancel).await?;

        ensure_active(cancel)?;
        let admin_tags = self
            .metadata
            .admin_tags(object)
            .await
            .map_err(ResolutionError::metadata)?;

        let decision = resolve(&tag_set, &admin_tags);

        ensure_active(cancel)?;
        let previously_published = self
            .publication
            .published_targets(object)
            .await
            .map_err(ResolutionError::publication)?;

        let decision = reconcile(decision, &previously_published);
        debug!(%object, targets = decision.len(), "resolved release decision");

        Ok(decision)
    }

    /// Resolve and render the disclosure document for an object.
    pub async fn disclosure_for(&self, object: &ObjectId) -> Result<Disclosure, ResolutionError> {
        let decision = self.released_for(object).await?;
        Ok(Disclosure::from(&decision))
    }
}

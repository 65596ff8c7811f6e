// SPDX-License-Identifier: MIT OR Apache-2.0

use std::error::Error as StdError;
use std::fmt;

use purview_core::{MalformedTagError, ObjectId};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// The collaborator role a failed call belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Collaborator {
    Metadata,
    RepositoryGraph,
    Publication,
}

impl fmt::Display for Collaborator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Collaborator::Metadata => "metadata store",
            Collaborator::RepositoryGraph => "repository graph",
            Collaborator::Publication => "publication store",
        };

        write!(f, "{}", s)
    }
}

/// Failure modes of a resolution call.
///
/// `released_for` either returns a complete decision or one of these; it
/// never returns a partial decision with a target silently missing.
#[derive(Debug, Error)]
pub enum ResolutionError {
    /// A stored tag failed to parse. Surfaced rather than dropped: a
    /// malformed stored tag is a data-integrity problem upstream.
    #[error("malformed release tag on {object}")]
    MalformedTag {
        object: ObjectId,
        #[source]
        source: MalformedTagError,
    },

    /// A collaborator call failed. The engine performs no retries; retry
    /// policy belongs to the collaborator implementations.
    #[error("{role} unavailable")]
    Collaborator {
        role: Collaborator,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    /// The caller cancelled resolution before it completed.
    #[error("resolution cancelled by caller")]
    Cancelled,
}

impl ResolutionError {
    pub(crate) fn metadata(source: impl StdError + Send + Sync + 'static) -> Self {
        Self::Collaborator {
            role: Collaborator::Metadata,
            source: Box::new(source),
        }
    }

    pub(crate) fn repository_graph(source: impl StdError + Send + Sync + 'static) -> Self {
        Self::Collaborator {
            role: Collaborator::RepositoryGraph,
            source: Box::new(source),
        }
    }

    pub(crate) fn publication(source: impl StdError + Send + Sync + 'static) -> Self {
        Self::Collaborator {
            role: Collaborator::Publication,
            source: Box::new(source),
        }
    }
}

/// Bail out of a resolution in progress once the caller gave up on it.
/// Checked before every collaborator call.
pub(crate) fn ensure_active(cancel: &CancellationToken) -> Result<(), ResolutionError> {
    if cancel.is_cancelled() {
        Err(ResolutionError::Cancelled)
    } else {
        Ok(())
    }
}

//! Error types for populator-sync.

use thiserror::Error;

use populator_client::ClientError;
use populator_core::{EntityKind, NameId};

pub type SyncResult<T> = Result<T, SyncError>;

/// All errors that can arise while populating one row or one kind.
#[derive(Debug, Error)]
pub enum SyncError {
    /// A remote call failed; displays the server-reported message.
    #[error("remote call failed: {0}")]
    Remote(#[from] ClientError),

    /// The entity exists but exposes no community to assign roles on.
    #[error("{kind} `{name_id}` has no community")]
    MissingCommunity { kind: EntityKind, name_id: NameId },

    /// The entity exists but exposes no collaboration for callouts or relations.
    #[error("{kind} `{name_id}` has no collaboration")]
    MissingCollaboration { kind: EntityKind, name_id: NameId },

    /// The entity exists but exposes no profile to update.
    #[error("{kind} `{name_id}` has no profile")]
    MissingProfile { kind: EntityKind, name_id: NameId },

    /// A referenced parent entity does not exist remotely.
    #[error("parent `{parent}` of {kind} `{key}` does not exist")]
    MissingParent {
        kind: EntityKind,
        key: String,
        parent: NameId,
    },

    #[error("{kind} `{key}` does not exist")]
    NotFound { kind: EntityKind, key: String },

    /// A populator was used before its kind-level setup ran.
    #[error("{kind} populator used before setup")]
    NotInitialized { kind: EntityKind },

    /// Kind-level setup failed; the whole kind is skipped.
    #[error("{kind} setup failed: {reason}")]
    Setup { kind: EntityKind, reason: String },
}

/// Convenience constructor for [`SyncError::Setup`].
pub(crate) fn setup_err(kind: EntityKind, reason: impl Into<String>) -> SyncError {
    SyncError::Setup {
        kind,
        reason: reason.into(),
    }
}

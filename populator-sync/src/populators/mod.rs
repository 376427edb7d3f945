//! One populator per entity kind.
//!
//! Every kind implements [`Populator`]; the pipeline drives them all through
//! the same sequence: precondition, resolve, create or update, visuals, roles.

mod callout;
mod challenge;
mod group;
mod journey;
mod opportunity;
mod organization;
mod post;
mod relation;
mod space;
mod space_roles;
mod user;
mod user_roles;

pub use callout::CalloutPopulator;
pub use challenge::ChallengePopulator;
pub use group::GroupPopulator;
pub use opportunity::OpportunityPopulator;
pub use organization::OrganizationPopulator;
pub use post::PostPopulator;
pub use relation::RelationPopulator;
pub use space::SpacePopulator;
pub use space_roles::SpaceRolesPopulator;
pub use user::UserPopulator;
pub use user_roles::UserRolesPopulator;

use async_trait::async_trait;
use tracing::{debug, info};

use populator_client::{EntitySnapshot, RemoteStore, RoleCategory, VisualSlot};
use populator_core::{DataSource, EntityKind, NameId, SourceRow};

use crate::error::{SyncError, SyncResult};
use crate::membership::contributors_to_add;

/// Create-or-update logic for one entity kind.
#[async_trait]
pub trait Populator: Send + Sync {
    type Row: SourceRow + Send + Sync;

    const KIND: EntityKind;

    /// Whether a row that resolves to nothing is created. Kinds that only
    /// attach data to existing entities skip such rows instead.
    const CREATES_MISSING: bool = true;

    /// Rows this kind reads from the data source, in sheet order.
    fn rows(&self, source: &dyn DataSource) -> Vec<Self::Row>;

    /// Reason the row must be skipped, if any. Skips are not failures.
    fn precondition(&self, _row: &Self::Row) -> Option<&'static str> {
        None
    }

    /// Kind-level setup, run once before the first row.
    async fn prepare(&mut self) -> SyncResult<()> {
        Ok(())
    }

    /// Look up the remote entity the row describes.
    async fn resolve(&self, row: &Self::Row) -> SyncResult<Option<EntitySnapshot>>;

    async fn create(&self, row: &Self::Row) -> SyncResult<EntitySnapshot>;

    /// Re-send mutable fields. Never re-sends the `nameID`.
    async fn update(&self, existing: &EntitySnapshot, row: &Self::Row)
        -> SyncResult<EntitySnapshot>;

    async fn reconcile_visuals(&self, _entity: &EntitySnapshot, _row: &Self::Row) -> SyncResult<()> {
        Ok(())
    }

    async fn reconcile_roles(&self, _entity: &EntitySnapshot, _row: &Self::Row) -> SyncResult<()> {
        Ok(())
    }
}

/// Update each visual slot the row supplies a URI for.
///
/// Slots the entity does not expose are skipped, as are slots already
/// pointing at the same URI.
pub(crate) async fn update_visuals(
    store: &dyn RemoteStore,
    entity: &EntitySnapshot,
    wanted: &[(VisualSlot, &str)],
) -> SyncResult<()> {
    for (slot, uri) in wanted {
        let uri = uri.trim();
        if uri.is_empty() {
            continue;
        }
        match entity.visual(*slot) {
            Some(visual) if visual.uri == uri => {}
            Some(visual) => {
                store.update_visual(&visual.id, uri).await?;
                debug!(name_id = %entity.name_id, %slot, "visual updated");
            }
            None => debug!(name_id = %entity.name_id, %slot, "no such visual slot; skipped"),
        }
    }
    Ok(())
}

/// Assign every desired contributor the entity's community does not hold yet.
///
/// Returns the number of assignments made. A missing community is only an
/// error when there is something to assign.
pub(crate) async fn assign_roles(
    store: &dyn RemoteStore,
    kind: EntityKind,
    entity: &EntitySnapshot,
    desired: &[(RoleCategory, &[NameId])],
) -> SyncResult<usize> {
    if desired.iter().all(|(_, wanted)| wanted.is_empty()) {
        return Ok(0);
    }
    let community = entity
        .community
        .as_ref()
        .ok_or_else(|| SyncError::MissingCommunity {
            kind,
            name_id: entity.name_id.clone(),
        })?;

    let mut assigned = 0;
    for (role, wanted) in desired {
        for contributor in contributors_to_add(community.holders(*role), wanted) {
            store.assign_role(&community.id, *role, &contributor).await?;
            info!(%kind, name_id = %entity.name_id, %role, contributor = %contributor, "role assigned");
            assigned += 1;
        }
    }
    Ok(assigned)
}

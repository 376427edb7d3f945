//! Lead users of the space, assigned once the users exist.

use async_trait::async_trait;

use populator_client::{EntitySnapshot, RemoteStore, RoleCategory};
use populator_core::{DataSource, EntityKind, SpaceRow};

use super::{assign_roles, Populator};
use crate::error::{SyncError, SyncResult};

pub struct SpaceRolesPopulator<'a> {
    store: &'a dyn RemoteStore,
}

impl<'a> SpaceRolesPopulator<'a> {
    pub fn new(store: &'a dyn RemoteStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Populator for SpaceRolesPopulator<'_> {
    type Row = SpaceRow;

    const KIND: EntityKind = EntityKind::SpaceRoles;
    const CREATES_MISSING: bool = false;

    fn rows(&self, source: &dyn DataSource) -> Vec<SpaceRow> {
        source.spaces()
    }

    async fn resolve(&self, row: &SpaceRow) -> SyncResult<Option<EntitySnapshot>> {
        Ok(self.store.space(&row.name_id).await?)
    }

    async fn create(&self, row: &SpaceRow) -> SyncResult<EntitySnapshot> {
        Err(SyncError::NotFound {
            kind: Self::KIND,
            key: row.name_id.to_string(),
        })
    }

    async fn update(&self, existing: &EntitySnapshot, _row: &SpaceRow) -> SyncResult<EntitySnapshot> {
        Ok(existing.clone())
    }

    async fn reconcile_roles(&self, entity: &EntitySnapshot, row: &SpaceRow) -> SyncResult<()> {
        assign_roles(
            self.store,
            Self::KIND,
            entity,
            &[(RoleCategory::LeadUser, row.lead_users.as_slice())],
        )
        .await
        .map(drop)
    }
}

//! Attaches existing users to their organization and groups.
//!
//! Runs after groups and organizations exist. Users are never created here.

use async_trait::async_trait;
use tracing::{info, warn};

use populator_client::{EntitySnapshot, RemoteStore};
use populator_core::{DataSource, EntityKind, NameId, UserRow};

use super::Populator;
use crate::error::{SyncError, SyncResult};
use crate::membership::contributors_to_add;
use crate::pipeline::PopulateContext;

pub struct UserRolesPopulator<'a> {
    store: &'a dyn RemoteStore,
    context: &'a PopulateContext,
}

impl<'a> UserRolesPopulator<'a> {
    pub fn new(store: &'a dyn RemoteStore, context: &'a PopulateContext) -> Self {
        Self { store, context }
    }

    async fn join_organization(&self, user: &NameId, organization: &NameId) -> SyncResult<()> {
        let Some(target) = self.store.organization(organization).await? else {
            warn!(user = %user, organization = %organization, "organization not found; skipped");
            return Ok(());
        };
        if contributors_to_add(Some(&target.members), std::slice::from_ref(user)).is_empty() {
            return Ok(());
        }
        self.store.add_user_to_organization(user, organization).await?;
        info!(user = %user, organization = %organization, "user added to organization");
        Ok(())
    }

    async fn join_group(&self, user: &NameId, group: &str) -> SyncResult<()> {
        let Some(target) = self.store.group(&self.context.space, group).await? else {
            warn!(user = %user, group, "group not found; skipped");
            return Ok(());
        };
        if contributors_to_add(Some(&target.members), std::slice::from_ref(user)).is_empty() {
            return Ok(());
        }
        self.store.add_user_to_group(user, &target.id).await?;
        info!(user = %user, group, "user added to group");
        Ok(())
    }
}

#[async_trait]
impl Populator for UserRolesPopulator<'_> {
    type Row = UserRow;

    const KIND: EntityKind = EntityKind::UserRoles;
    const CREATES_MISSING: bool = false;

    fn rows(&self, source: &dyn DataSource) -> Vec<UserRow> {
        source.users()
    }

    async fn resolve(&self, row: &UserRow) -> SyncResult<Option<EntitySnapshot>> {
        Ok(self.store.user(&row.name_id).await?)
    }

    async fn create(&self, row: &UserRow) -> SyncResult<EntitySnapshot> {
        // Missing users are skipped by the pipeline before this is reached.
        Err(SyncError::NotFound {
            kind: Self::KIND,
            key: row.name_id.to_string(),
        })
    }

    async fn update(&self, existing: &EntitySnapshot, _row: &UserRow) -> SyncResult<EntitySnapshot> {
        Ok(existing.clone())
    }

    async fn reconcile_roles(&self, entity: &EntitySnapshot, row: &UserRow) -> SyncResult<()> {
        if !row.organization.is_empty() {
            self.join_organization(&entity.name_id, &row.organization).await?;
        }
        for group in &row.groups {
            self.join_group(&entity.name_id, group).await?;
        }
        Ok(())
    }
}

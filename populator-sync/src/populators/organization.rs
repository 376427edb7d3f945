use async_trait::async_trait;
use tracing::info;

use populator_client::input::{
    CreateOrganizationInput, LocationInput, ProfileInput, TagsetInput, UpdateOrganizationInput,
};
use populator_client::{EntitySnapshot, RemoteStore, VisualSlot};
use populator_core::{DataSource, EntityKind, OrganizationRow};

use super::{update_visuals, Populator};
use crate::error::SyncResult;

pub struct OrganizationPopulator<'a> {
    store: &'a dyn RemoteStore,
}

impl<'a> OrganizationPopulator<'a> {
    pub fn new(store: &'a dyn RemoteStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Populator for OrganizationPopulator<'_> {
    type Row = OrganizationRow;

    const KIND: EntityKind = EntityKind::Organization;

    fn rows(&self, source: &dyn DataSource) -> Vec<OrganizationRow> {
        source.organizations()
    }

    async fn resolve(&self, row: &OrganizationRow) -> SyncResult<Option<EntitySnapshot>> {
        Ok(self.store.organization(&row.name_id).await?)
    }

    async fn create(&self, row: &OrganizationRow) -> SyncResult<EntitySnapshot> {
        let input = CreateOrganizationInput {
            name_id: row.name_id.clone(),
            display_name: row.display_name.clone(),
            profile_data: ProfileInput {
                description: row.description.clone(),
                references: Vec::new(),
                tagsets: vec![TagsetInput {
                    name: "keywords".to_string(),
                    tags: row.keywords.clone(),
                }],
                location: Some(LocationInput::new(&row.country, &row.city)),
            },
        };
        let created = self.store.create_organization(&input).await?;
        info!(name_id = %row.name_id, "organization created");
        Ok(created)
    }

    async fn update(
        &self,
        existing: &EntitySnapshot,
        row: &OrganizationRow,
    ) -> SyncResult<EntitySnapshot> {
        let input = UpdateOrganizationInput {
            id: existing.id.clone(),
            display_name: row.display_name.clone(),
            description: row.description.clone(),
            location: LocationInput::new(&row.country, &row.city),
        };
        let updated = self.store.update_organization(&input).await?;
        info!(name_id = %row.name_id, "organization updated");
        Ok(updated)
    }

    async fn reconcile_visuals(
        &self,
        entity: &EntitySnapshot,
        row: &OrganizationRow,
    ) -> SyncResult<()> {
        update_visuals(self.store, entity, &[(VisualSlot::Avatar, row.avatar.as_str())]).await
    }
}

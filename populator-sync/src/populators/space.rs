//! The target space itself. Its hosting organization must exist already;
//! lead users are attached later by [`SpaceRolesPopulator`](super::SpaceRolesPopulator).

use async_trait::async_trait;
use tracing::info;

use populator_client::input::{ContextInput, CreateSpaceInput, LocationInput, UpdateSpaceInput};
use populator_client::{EntitySnapshot, RemoteStore, VisualSlot};
use populator_core::{DataSource, EntityKind, SpaceRow};

use super::{update_visuals, Populator};
use crate::error::SyncResult;
use crate::references::ReferenceAssembler;

pub struct SpacePopulator<'a> {
    store: &'a dyn RemoteStore,
}

impl<'a> SpacePopulator<'a> {
    pub fn new(store: &'a dyn RemoteStore) -> Self {
        Self { store }
    }
}

fn context(row: &SpaceRow, with_references: bool) -> ContextInput {
    let references = with_references.then(|| {
        ReferenceAssembler::new()
            .add("website", &row.ref_website, "The space website")
            .add("repo", &row.ref_repo, "The space repository")
            .build()
    });
    ContextInput {
        tagline: row.tagline.clone(),
        background: row.background.clone(),
        vision: row.vision.clone(),
        impact: row.impact.clone(),
        who: row.who.clone(),
        location: LocationInput::default(),
        references,
    }
}

#[async_trait]
impl Populator for SpacePopulator<'_> {
    type Row = SpaceRow;

    const KIND: EntityKind = EntityKind::Space;

    fn rows(&self, source: &dyn DataSource) -> Vec<SpaceRow> {
        source.spaces()
    }

    async fn resolve(&self, row: &SpaceRow) -> SyncResult<Option<EntitySnapshot>> {
        Ok(self.store.space(&row.name_id).await?)
    }

    async fn create(&self, row: &SpaceRow) -> SyncResult<EntitySnapshot> {
        let input = CreateSpaceInput {
            name_id: row.name_id.clone(),
            display_name: row.display_name.clone(),
            host_id: row.host.clone(),
            anonymous_read_access: row.anonymous_read_access,
            context: context(row, true),
            tags: row.tags.clone(),
        };
        let created = self.store.create_space(&input).await?;
        info!(name_id = %row.name_id, host = %row.host, "space created");
        Ok(created)
    }

    async fn update(&self, existing: &EntitySnapshot, row: &SpaceRow) -> SyncResult<EntitySnapshot> {
        let input = UpdateSpaceInput {
            id: existing.id.clone(),
            display_name: row.display_name.clone(),
            anonymous_read_access: row.anonymous_read_access,
            context: context(row, false),
            tags: row.tags.clone(),
        };
        let updated = self.store.update_space(&input).await?;
        info!(name_id = %row.name_id, "space updated");
        Ok(updated)
    }

    async fn reconcile_visuals(&self, entity: &EntitySnapshot, row: &SpaceRow) -> SyncResult<()> {
        let wanted = [
            (VisualSlot::Banner, row.visual_banner.as_str()),
            (VisualSlot::Background, row.visual_background.as_str()),
            (VisualSlot::Avatar, row.visual_avatar.as_str()),
        ];
        update_visuals(self.store, entity, &wanted).await
    }
}

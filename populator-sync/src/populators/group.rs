use async_trait::async_trait;
use tracing::{debug, info};

use populator_client::input::{CreateGroupInput, ProfileInput, TagsetInput, UpdateGroupInput};
use populator_client::{EntitySnapshot, RemoteStore, VisualSlot};
use populator_core::{DataSource, EntityKind, GroupRow};

use super::{update_visuals, Populator};
use crate::error::{setup_err, SyncError, SyncResult};
use crate::pipeline::PopulateContext;

pub struct GroupPopulator<'a> {
    store: &'a dyn RemoteStore,
    context: &'a PopulateContext,
    /// Community of the target space, resolved in `prepare`.
    community_id: Option<String>,
}

impl<'a> GroupPopulator<'a> {
    pub fn new(store: &'a dyn RemoteStore, context: &'a PopulateContext) -> Self {
        Self {
            store,
            context,
            community_id: None,
        }
    }
}

#[async_trait]
impl Populator for GroupPopulator<'_> {
    type Row = GroupRow;

    const KIND: EntityKind = EntityKind::Group;

    fn rows(&self, source: &dyn DataSource) -> Vec<GroupRow> {
        source.groups()
    }

    async fn prepare(&mut self) -> SyncResult<()> {
        let space = self.store.space(&self.context.space).await?.ok_or_else(|| {
            setup_err(Self::KIND, format!("space `{}` not found", self.context.space))
        })?;
        let community = space.community.ok_or_else(|| {
            setup_err(Self::KIND, format!("space `{}` has no community", self.context.space))
        })?;
        debug!(community = %community.id, "groups go on the space community");
        self.community_id = Some(community.id);
        Ok(())
    }

    async fn resolve(&self, row: &GroupRow) -> SyncResult<Option<EntitySnapshot>> {
        Ok(self.store.group(&self.context.space, &row.name).await?)
    }

    async fn create(&self, row: &GroupRow) -> SyncResult<EntitySnapshot> {
        let community_id = self
            .community_id
            .clone()
            .ok_or(SyncError::NotInitialized { kind: Self::KIND })?;
        let input = CreateGroupInput {
            parent_id: community_id,
            name: row.name.clone(),
            profile_data: ProfileInput {
                description: row.description.clone(),
                tagsets: vec![TagsetInput {
                    name: "keywords".to_string(),
                    tags: row.keywords.clone(),
                }],
                ..ProfileInput::default()
            },
        };
        let created = self.store.create_group(&input).await?;
        info!(group = %row.name, "group created");
        Ok(created)
    }

    async fn update(&self, existing: &EntitySnapshot, row: &GroupRow) -> SyncResult<EntitySnapshot> {
        let input = UpdateGroupInput {
            id: existing.id.clone(),
            name: row.name.clone(),
            description: row.description.clone(),
        };
        let updated = self.store.update_group(&input).await?;
        info!(group = %row.name, "group updated");
        Ok(updated)
    }

    async fn reconcile_visuals(&self, entity: &EntitySnapshot, row: &GroupRow) -> SyncResult<()> {
        update_visuals(self.store, entity, &[(VisualSlot::Avatar, row.avatar.as_str())]).await
    }
}

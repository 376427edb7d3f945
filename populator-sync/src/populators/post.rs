use async_trait::async_trait;
use tracing::{debug, info};

use populator_client::input::{CreatePostInput, PostProfileInput};
use populator_client::{CalloutSnapshot, EntitySnapshot, RemoteStore, VisualSlot};
use populator_core::{DataSource, EntityKind, PostRow};

use super::callout::challenge_collaboration;
use super::{update_visuals, Populator};
use crate::error::{SyncError, SyncResult};
use crate::pipeline::PopulateContext;

pub struct PostPopulator<'a> {
    store: &'a dyn RemoteStore,
    context: &'a PopulateContext,
}

impl<'a> PostPopulator<'a> {
    pub fn new(store: &'a dyn RemoteStore, context: &'a PopulateContext) -> Self {
        Self { store, context }
    }

    async fn callout(&self, row: &PostRow) -> SyncResult<CalloutSnapshot> {
        let collaboration = challenge_collaboration(
            self.store,
            self.context,
            EntityKind::Post,
            &row.name_id,
            &row.challenge,
        )
        .await?;
        collaboration
            .callout(&row.callout)
            .cloned()
            .ok_or_else(|| SyncError::MissingParent {
                kind: EntityKind::Post,
                key: row.name_id.to_string(),
                parent: row.callout.clone(),
            })
    }
}

#[async_trait]
impl Populator for PostPopulator<'_> {
    type Row = PostRow;

    const KIND: EntityKind = EntityKind::Post;

    fn rows(&self, source: &dyn DataSource) -> Vec<PostRow> {
        source.posts()
    }

    fn precondition(&self, row: &PostRow) -> Option<&'static str> {
        if row.challenge.is_empty() {
            Some("no challenge")
        } else if row.callout.is_empty() {
            Some("no callout")
        } else {
            None
        }
    }

    async fn resolve(&self, row: &PostRow) -> SyncResult<Option<EntitySnapshot>> {
        Ok(self.callout(row).await?.post(&row.name_id).cloned())
    }

    async fn create(&self, row: &PostRow) -> SyncResult<EntitySnapshot> {
        let callout = self.callout(row).await?;
        let input = CreatePostInput {
            callout_id: callout.id,
            name_id: row.name_id.clone(),
            post_type: row.post_type.clone(),
            profile_data: PostProfileInput {
                display_name: row.display_name.clone(),
                description: row.description.clone(),
            },
            tags: row.tags.clone(),
        };
        let created = self.store.create_post(&input).await?;
        info!(name_id = %row.name_id, callout = %row.callout, "post created");
        Ok(created)
    }

    /// Posts are contributions; an existing one keeps its content.
    async fn update(&self, existing: &EntitySnapshot, row: &PostRow) -> SyncResult<EntitySnapshot> {
        debug!(name_id = %row.name_id, callout = %row.callout, "post present");
        Ok(existing.clone())
    }

    async fn reconcile_visuals(&self, entity: &EntitySnapshot, row: &PostRow) -> SyncResult<()> {
        update_visuals(
            self.store,
            entity,
            &[
                (VisualSlot::Banner, row.visual_banner.as_str()),
                (VisualSlot::BannerNarrow, row.visual_banner_narrow.as_str()),
            ],
        )
        .await
    }
}

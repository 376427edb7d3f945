use async_trait::async_trait;
use tracing::info;

use populator_client::input::{CreateOpportunityInput, UpdateJourneyInput};
use populator_client::{EntitySnapshot, RemoteStore};
use populator_core::{DataSource, EntityKind, OpportunityRow};

use super::journey::Journey;
use super::{assign_roles, update_visuals, Populator};
use crate::error::{SyncError, SyncResult};
use crate::pipeline::PopulateContext;

pub struct OpportunityPopulator<'a> {
    store: &'a dyn RemoteStore,
    context: &'a PopulateContext,
}

impl<'a> OpportunityPopulator<'a> {
    pub fn new(store: &'a dyn RemoteStore, context: &'a PopulateContext) -> Self {
        Self { store, context }
    }
}

#[async_trait]
impl Populator for OpportunityPopulator<'_> {
    type Row = OpportunityRow;

    const KIND: EntityKind = EntityKind::Opportunity;

    fn rows(&self, source: &dyn DataSource) -> Vec<OpportunityRow> {
        source.opportunities()
    }

    fn precondition(&self, row: &OpportunityRow) -> Option<&'static str> {
        row.challenge
            .is_empty()
            .then_some("no parent challenge")
    }

    async fn resolve(&self, row: &OpportunityRow) -> SyncResult<Option<EntitySnapshot>> {
        Ok(self.store.opportunity(&self.context.space, &row.name_id).await?)
    }

    async fn create(&self, row: &OpportunityRow) -> SyncResult<EntitySnapshot> {
        let parent = self
            .store
            .challenge(&self.context.space, &row.challenge)
            .await?
            .ok_or_else(|| SyncError::MissingParent {
                kind: Self::KIND,
                key: row.name_id.to_string(),
                parent: row.challenge.clone(),
            })?;
        let input = CreateOpportunityInput {
            challenge_id: parent.id,
            name_id: row.name_id.clone(),
            display_name: row.display_name.clone(),
            context: Journey::from(row).context(true),
            tags: row.tags.clone(),
        };
        let created = self.store.create_opportunity(&input).await?;
        info!(name_id = %row.name_id, challenge = %row.challenge, "opportunity created");
        Ok(created)
    }

    async fn update(
        &self,
        existing: &EntitySnapshot,
        row: &OpportunityRow,
    ) -> SyncResult<EntitySnapshot> {
        let input = UpdateJourneyInput {
            id: existing.id.clone(),
            display_name: row.display_name.clone(),
            context: Journey::from(row).context(false),
            tags: row.tags.clone(),
        };
        let updated = self.store.update_opportunity(&input).await?;
        info!(name_id = %row.name_id, "opportunity updated");
        Ok(updated)
    }

    async fn reconcile_visuals(
        &self,
        entity: &EntitySnapshot,
        row: &OpportunityRow,
    ) -> SyncResult<()> {
        update_visuals(self.store, entity, &Journey::from(row).visuals()).await
    }

    async fn reconcile_roles(
        &self,
        entity: &EntitySnapshot,
        row: &OpportunityRow,
    ) -> SyncResult<()> {
        assign_roles(self.store, Self::KIND, entity, &Journey::from(row).roles())
            .await
            .map(drop)
    }
}

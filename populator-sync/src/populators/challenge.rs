use async_trait::async_trait;
use tracing::{debug, info};

use populator_client::input::{
    CalloutState, CalloutType, CalloutVisibility, CreateCalloutInput, CreateChallengeInput,
    UpdateJourneyInput,
};
use populator_client::{EntitySnapshot, RemoteStore};
use populator_core::{ChallengeRow, DataSource, EntityKind, NameId};

use super::journey::Journey;
use super::{assign_roles, update_visuals, Populator};
use crate::error::{setup_err, SyncError, SyncResult};
use crate::pipeline::PopulateContext;

pub struct ChallengePopulator<'a> {
    store: &'a dyn RemoteStore,
    context: &'a PopulateContext,
    /// Innovation-flow template id, resolved in `prepare`.
    flow_template: Option<String>,
}

impl<'a> ChallengePopulator<'a> {
    pub fn new(store: &'a dyn RemoteStore, context: &'a PopulateContext) -> Self {
        Self {
            store,
            context,
            flow_template: None,
        }
    }

    /// Create the `cards-<nameID>` callout unless the collaboration has it.
    async fn ensure_card_callout(&self, entity: &EntitySnapshot) -> SyncResult<()> {
        let collaboration =
            entity
                .collaboration
                .as_ref()
                .ok_or_else(|| SyncError::MissingCollaboration {
                    kind: Self::KIND,
                    name_id: entity.name_id.clone(),
                })?;
        let name_id = card_callout_name(&entity.name_id);
        if collaboration.has_callout(&name_id) {
            debug!(name_id = %entity.name_id, callout = %name_id, "card callout present");
            return Ok(());
        }
        let input = CreateCalloutInput {
            collaboration_id: collaboration.id.clone(),
            name_id,
            display_name: "Cards callout".to_string(),
            description: "Cards Callout".to_string(),
            callout_type: CalloutType::Card,
            state: CalloutState::Open,
            visibility: CalloutVisibility::Published,
        };
        let callout = self.store.create_callout(&input).await?;
        info!(name_id = %entity.name_id, callout = %callout.name_id, "card callout created");
        Ok(())
    }
}

pub(crate) fn card_callout_name(challenge: &NameId) -> NameId {
    NameId(format!("cards-{challenge}"))
}

#[async_trait]
impl Populator for ChallengePopulator<'_> {
    type Row = ChallengeRow;

    const KIND: EntityKind = EntityKind::Challenge;

    fn rows(&self, source: &dyn DataSource) -> Vec<ChallengeRow> {
        source.challenges()
    }

    async fn prepare(&mut self) -> SyncResult<()> {
        let template = self
            .store
            .challenge_flow_template(&self.context.space)
            .await?
            .ok_or_else(|| {
                setup_err(
                    Self::KIND,
                    format!("space `{}` has no challenge innovation flow template", self.context.space),
                )
            })?;
        debug!(template = %template, "using challenge innovation flow template");
        self.flow_template = Some(template);
        Ok(())
    }

    async fn resolve(&self, row: &ChallengeRow) -> SyncResult<Option<EntitySnapshot>> {
        Ok(self.store.challenge(&self.context.space, &row.name_id).await?)
    }

    async fn create(&self, row: &ChallengeRow) -> SyncResult<EntitySnapshot> {
        let template = self
            .flow_template
            .clone()
            .ok_or(SyncError::NotInitialized { kind: Self::KIND })?;
        let journey = Journey::from(row);
        let input = CreateChallengeInput {
            space_id: self.context.space.clone(),
            name_id: row.name_id.clone(),
            display_name: row.display_name.clone(),
            context: journey.context(true),
            tags: row.tags.clone(),
            innovation_flow_template_id: template,
        };
        let created = self.store.create_challenge(&input).await?;
        info!(name_id = %row.name_id, "challenge created");
        self.ensure_card_callout(&created).await?;
        Ok(created)
    }

    async fn update(
        &self,
        existing: &EntitySnapshot,
        row: &ChallengeRow,
    ) -> SyncResult<EntitySnapshot> {
        let input = UpdateJourneyInput {
            id: existing.id.clone(),
            display_name: row.display_name.clone(),
            context: Journey::from(row).context(false),
            tags: row.tags.clone(),
        };
        let updated = self.store.update_challenge(&input).await?;
        info!(name_id = %row.name_id, "challenge updated");
        self.ensure_card_callout(existing).await?;
        Ok(updated)
    }

    async fn reconcile_visuals(&self, entity: &EntitySnapshot, row: &ChallengeRow) -> SyncResult<()> {
        update_visuals(self.store, entity, &Journey::from(row).visuals()).await
    }

    async fn reconcile_roles(&self, entity: &EntitySnapshot, row: &ChallengeRow) -> SyncResult<()> {
        assign_roles(self.store, Self::KIND, entity, &Journey::from(row).roles())
            .await
            .map(drop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_callout_is_named_after_challenge() {
        assert_eq!(card_callout_name(&NameId::from("grid")).as_str(), "cards-grid");
    }
}

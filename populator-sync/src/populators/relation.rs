//! Actor relations on an opportunity's collaboration.
//!
//! A relation is identified by its `(type, actorName)` pair within the
//! opportunity. Existing relations are left as they are.

use async_trait::async_trait;
use tracing::{debug, info};

use populator_client::input::CreateRelationInput;
use populator_client::{EntitySnapshot, RemoteStore};
use populator_core::{DataSource, EntityKind, NameId, RelationRow};

use super::Populator;
use crate::error::{SyncError, SyncResult};
use crate::pipeline::PopulateContext;

pub struct RelationPopulator<'a> {
    store: &'a dyn RemoteStore,
    context: &'a PopulateContext,
}

impl<'a> RelationPopulator<'a> {
    pub fn new(store: &'a dyn RemoteStore, context: &'a PopulateContext) -> Self {
        Self { store, context }
    }

    /// The parent opportunity and its collaboration id.
    async fn parent(&self, row: &RelationRow) -> SyncResult<(EntitySnapshot, String)> {
        let opportunity = self
            .store
            .opportunity(&self.context.space, &row.opportunity)
            .await?
            .ok_or_else(|| SyncError::MissingParent {
                kind: Self::KIND,
                key: row.actor_name.clone(),
                parent: row.opportunity.clone(),
            })?;
        let collaboration_id = opportunity
            .collaboration
            .as_ref()
            .map(|c| c.id.clone())
            .ok_or_else(|| SyncError::MissingCollaboration {
                kind: EntityKind::Opportunity,
                name_id: opportunity.name_id.clone(),
            })?;
        Ok((opportunity, collaboration_id))
    }
}

#[async_trait]
impl Populator for RelationPopulator<'_> {
    type Row = RelationRow;

    const KIND: EntityKind = EntityKind::Relation;

    fn rows(&self, source: &dyn DataSource) -> Vec<RelationRow> {
        source.relations()
    }

    fn precondition(&self, row: &RelationRow) -> Option<&'static str> {
        row.opportunity.is_empty().then_some("no opportunity")
    }

    async fn resolve(&self, row: &RelationRow) -> SyncResult<Option<EntitySnapshot>> {
        let (opportunity, _) = self.parent(row).await?;
        let existing = opportunity
            .collaboration
            .as_ref()
            .and_then(|collaboration| collaboration.relation(&row.relation_type, &row.actor_name))
            .map(|r| EntitySnapshot::new(r.id.clone(), r.actor_name.as_str(), r.actor_name.clone()));
        Ok(existing)
    }

    async fn create(&self, row: &RelationRow) -> SyncResult<EntitySnapshot> {
        let (_, collaboration_id) = self.parent(row).await?;
        let input = CreateRelationInput {
            parent_id: collaboration_id,
            relation_type: row.relation_type.clone(),
            actor_name: row.actor_name.clone(),
            actor_role: row.actor_role.clone(),
            actor_type: row.actor_type.clone(),
            description: row.description.clone(),
        };
        let relation = self.store.create_relation(&input).await?;
        info!(
            opportunity = %row.opportunity,
            relation_type = %row.relation_type,
            actor = %row.actor_name,
            "relation created"
        );
        Ok(EntitySnapshot::new(
            relation.id,
            NameId(relation.actor_name.clone()),
            relation.actor_name,
        ))
    }

    async fn update(&self, existing: &EntitySnapshot, row: &RelationRow) -> SyncResult<EntitySnapshot> {
        debug!(opportunity = %row.opportunity, actor = %row.actor_name, "relation already present");
        Ok(existing.clone())
    }
}

//! Callouts on a challenge's collaboration.
//!
//! Callouts are created when absent and otherwise left alone; the server
//! offers no update for the fields a workbook carries.

use async_trait::async_trait;
use tracing::{debug, info};

use populator_client::input::{CalloutState, CalloutType, CalloutVisibility, CreateCalloutInput};
use populator_client::{CollaborationSnapshot, EntitySnapshot, RemoteStore};
use populator_core::{CalloutRow, DataSource, EntityKind, NameId};

use super::Populator;
use crate::error::{SyncError, SyncResult};
use crate::pipeline::PopulateContext;

pub struct CalloutPopulator<'a> {
    store: &'a dyn RemoteStore,
    context: &'a PopulateContext,
}

impl<'a> CalloutPopulator<'a> {
    pub fn new(store: &'a dyn RemoteStore, context: &'a PopulateContext) -> Self {
        Self { store, context }
    }
}

/// Collaboration of challenge `challenge`, on behalf of the `kind` row `key`.
pub(super) async fn challenge_collaboration(
    store: &dyn RemoteStore,
    context: &PopulateContext,
    kind: EntityKind,
    key: &NameId,
    challenge: &NameId,
) -> SyncResult<CollaborationSnapshot> {
    let parent = store
        .challenge(&context.space, challenge)
        .await?
        .ok_or_else(|| SyncError::MissingParent {
            kind,
            key: key.to_string(),
            parent: challenge.clone(),
        })?;
    parent
        .collaboration
        .ok_or_else(|| SyncError::MissingCollaboration {
            kind: EntityKind::Challenge,
            name_id: parent.name_id,
        })
}

#[async_trait]
impl Populator for CalloutPopulator<'_> {
    type Row = CalloutRow;

    const KIND: EntityKind = EntityKind::Callout;

    fn rows(&self, source: &dyn DataSource) -> Vec<CalloutRow> {
        source.callouts()
    }

    fn precondition(&self, row: &CalloutRow) -> Option<&'static str> {
        row.challenge.is_empty().then_some("no challenge")
    }

    async fn resolve(&self, row: &CalloutRow) -> SyncResult<Option<EntitySnapshot>> {
        let collaboration = challenge_collaboration(
            self.store,
            self.context,
            Self::KIND,
            &row.name_id,
            &row.challenge,
        )
        .await?;
        Ok(collaboration.callout(&row.name_id).map(|callout| {
            EntitySnapshot::new(
                callout.id.clone(),
                callout.name_id.as_str(),
                row.display_name.clone(),
            )
        }))
    }

    async fn create(&self, row: &CalloutRow) -> SyncResult<EntitySnapshot> {
        let collaboration = challenge_collaboration(
            self.store,
            self.context,
            Self::KIND,
            &row.name_id,
            &row.challenge,
        )
        .await?;
        let input = CreateCalloutInput {
            collaboration_id: collaboration.id,
            name_id: row.name_id.clone(),
            display_name: row.display_name.clone(),
            description: row.description.clone(),
            callout_type: CalloutType::Card,
            state: CalloutState::Open,
            visibility: CalloutVisibility::Published,
        };
        let callout = self.store.create_callout(&input).await?;
        info!(name_id = %row.name_id, challenge = %row.challenge, "callout created");
        Ok(EntitySnapshot::new(
            callout.id,
            callout.name_id.as_str(),
            row.display_name.clone(),
        ))
    }

    async fn update(&self, existing: &EntitySnapshot, row: &CalloutRow) -> SyncResult<EntitySnapshot> {
        debug!(name_id = %row.name_id, challenge = %row.challenge, "callout present");
        Ok(existing.clone())
    }
}

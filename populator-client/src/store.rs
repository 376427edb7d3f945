//! The [`RemoteStore`] trait, every call the reconciliation engine makes.

use async_trait::async_trait;

use populator_core::NameId;

use crate::error::ClientResult;
use crate::input::{
    CreateCalloutInput, CreateChallengeInput, CreateGroupInput, CreateOpportunityInput,
    CreateOrganizationInput, CreatePostInput, CreateRelationInput, CreateSpaceInput,
    CreateUserInput, LocationInput, UpdateGroupInput, UpdateJourneyInput,
    UpdateOrganizationInput, UpdateSpaceInput,
};
use crate::model::{CalloutSnapshot, EntitySnapshot, RelationSnapshot, RoleCategory};

/// Remote graph store, one lookup/create/update family per entity kind.
///
/// Lookups return `Ok(None)` for entities that do not exist; errors are
/// reserved for failed calls.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    // -----------------------------------------------------------------------
    // Spaces
    // -----------------------------------------------------------------------

    async fn space(&self, name_id: &NameId) -> ClientResult<Option<EntitySnapshot>>;
    async fn create_space(&self, input: &CreateSpaceInput) -> ClientResult<EntitySnapshot>;
    async fn update_space(&self, input: &UpdateSpaceInput) -> ClientResult<EntitySnapshot>;

    // -----------------------------------------------------------------------
    // Organizations
    // -----------------------------------------------------------------------

    async fn organization(&self, name_id: &NameId) -> ClientResult<Option<EntitySnapshot>>;
    async fn create_organization(
        &self,
        input: &CreateOrganizationInput,
    ) -> ClientResult<EntitySnapshot>;
    async fn update_organization(
        &self,
        input: &UpdateOrganizationInput,
    ) -> ClientResult<EntitySnapshot>;

    // -----------------------------------------------------------------------
    // Users
    // -----------------------------------------------------------------------

    async fn user(&self, name_id: &NameId) -> ClientResult<Option<EntitySnapshot>>;
    async fn create_user(&self, input: &CreateUserInput) -> ClientResult<EntitySnapshot>;
    async fn update_user_profile(
        &self,
        profile_id: &str,
        location: &LocationInput,
    ) -> ClientResult<()>;
    async fn add_user_to_space(&self, space: &NameId, user: &NameId) -> ClientResult<()>;
    async fn add_user_to_organization(
        &self,
        user: &NameId,
        organization: &NameId,
    ) -> ClientResult<()>;

    // -----------------------------------------------------------------------
    // Groups
    // -----------------------------------------------------------------------

    async fn group(&self, space: &NameId, name: &str) -> ClientResult<Option<EntitySnapshot>>;
    async fn create_group(&self, input: &CreateGroupInput) -> ClientResult<EntitySnapshot>;
    async fn update_group(&self, input: &UpdateGroupInput) -> ClientResult<EntitySnapshot>;
    async fn add_user_to_group(&self, user: &NameId, group_id: &str) -> ClientResult<()>;

    // -----------------------------------------------------------------------
    // Challenges and opportunities
    // -----------------------------------------------------------------------

    async fn challenge(
        &self,
        space: &NameId,
        name_id: &NameId,
    ) -> ClientResult<Option<EntitySnapshot>>;
    /// Id of the space's challenge innovation-flow template, if it has one.
    async fn challenge_flow_template(&self, space: &NameId) -> ClientResult<Option<String>>;
    async fn create_challenge(&self, input: &CreateChallengeInput)
        -> ClientResult<EntitySnapshot>;
    async fn update_challenge(&self, input: &UpdateJourneyInput) -> ClientResult<EntitySnapshot>;

    async fn opportunity(
        &self,
        space: &NameId,
        name_id: &NameId,
    ) -> ClientResult<Option<EntitySnapshot>>;
    async fn create_opportunity(
        &self,
        input: &CreateOpportunityInput,
    ) -> ClientResult<EntitySnapshot>;
    async fn update_opportunity(&self, input: &UpdateJourneyInput)
        -> ClientResult<EntitySnapshot>;

    // -----------------------------------------------------------------------
    // Sub-resources
    // -----------------------------------------------------------------------

    async fn create_callout(&self, input: &CreateCalloutInput) -> ClientResult<CalloutSnapshot>;
    async fn create_post(&self, input: &CreatePostInput) -> ClientResult<EntitySnapshot>;
    async fn create_relation(&self, input: &CreateRelationInput)
        -> ClientResult<RelationSnapshot>;
    async fn update_visual(&self, visual_id: &str, uri: &str) -> ClientResult<()>;

    // -----------------------------------------------------------------------
    // Community roles
    // -----------------------------------------------------------------------

    async fn assign_role(
        &self,
        community_id: &str,
        role: RoleCategory,
        contributor: &NameId,
    ) -> ClientResult<()>;
}

//! [`RemoteStore`] over GraphQL-over-HTTP with a bearer session token.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, info};

use populator_core::NameId;

use crate::auth;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::input::{
    CreateCalloutInput, CreateChallengeInput, CreateGroupInput, CreateOpportunityInput,
    CreateOrganizationInput, CreatePostInput, CreateRelationInput, CreateSpaceInput,
    CreateUserInput, LocationInput, UpdateGroupInput, UpdateJourneyInput,
    UpdateOrganizationInput, UpdateSpaceInput,
};
use crate::model::{CalloutSnapshot, EntitySnapshot, RelationSnapshot, RoleCategory};
use crate::queries;
use crate::store::RemoteStore;
use crate::wire::{Envelope, WireCallout, WireEntity, WireRelation, WireTemplate};

/// Template type the server uses for challenge innovation flows.
const CHALLENGE_TEMPLATE_TYPE: &str = "CHALLENGE";

#[derive(Debug, Clone)]
pub struct GraphqlStore {
    endpoint: String,
    http: Client,
    token: Option<String>,
}

impl GraphqlStore {
    /// Log in through the identity provider and return an authenticated store.
    pub async fn connect(config: &ClientConfig) -> ClientResult<Self> {
        let http = build_http(config)?;
        let token = auth::login(&http, &config.kratos_public_url, &config.credentials).await?;
        info!(
            endpoint = %config.graphql_endpoint,
            user = %config.credentials.email,
            "authenticated"
        );
        Ok(Self {
            endpoint: config.graphql_endpoint.clone(),
            http,
            token: Some(token),
        })
    }

    /// A store that skips the login flow and sends `token` as-is.
    pub fn with_token(endpoint: impl Into<String>, token: Option<String>) -> ClientResult<Self> {
        let http = Client::builder().build()?;
        Ok(Self {
            endpoint: endpoint.into(),
            http,
            token,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST one document and return its `data` object.
    async fn execute(&self, query: &str, variables: Value) -> ClientResult<Value> {
        let mut request = self
            .http
            .post(&self.endpoint)
            .json(&json!({ "query": query, "variables": variables }));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        // GraphQL servers report resolver errors with 200 and validation
        // errors with 400; both carry an `errors` array worth surfacing.
        let envelope: Envelope = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(err) if status.is_success() => return Err(ClientError::Json(err)),
            Err(_) => {
                return Err(ClientError::Status {
                    status: status.as_u16(),
                    url: self.endpoint.clone(),
                    body,
                })
            }
        };
        if !envelope.errors.is_empty() {
            let codes = envelope
                .errors
                .iter()
                .filter_map(|e| e.extensions.as_ref().and_then(|x| x.code.clone()))
                .collect();
            let messages = envelope.errors.into_iter().map(|e| e.message).collect();
            return Err(ClientError::GraphQl { messages, codes });
        }
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                url: self.endpoint.clone(),
                body,
            });
        }
        envelope
            .data
            .ok_or_else(|| ClientError::MissingData("data".to_string()))
    }

    /// Run a lookup; a not-found error or a null result is `None`.
    async fn lookup(
        &self,
        query: &str,
        variables: Value,
        pointer: &str,
    ) -> ClientResult<Option<EntitySnapshot>> {
        let data = match self.execute(query, variables).await {
            Ok(data) => data,
            Err(err) if err.is_not_found() => {
                debug!(pointer, "lookup found nothing");
                return Ok(None);
            }
            Err(err) => return Err(err),
        };
        Ok(decode_at::<WireEntity>(&data, pointer)?.map(EntitySnapshot::from))
    }

    /// Run a mutation whose result is an entity selection.
    async fn mutate_entity(
        &self,
        query: &str,
        variables: Value,
        pointer: &str,
    ) -> ClientResult<EntitySnapshot> {
        let data = self.execute(query, variables).await?;
        decode_required::<WireEntity>(&data, pointer).map(EntitySnapshot::from)
    }

    /// Run a mutation whose result is not needed.
    async fn mutate(&self, query: &str, variables: Value) -> ClientResult<()> {
        self.execute(query, variables).await.map(drop)
    }
}

fn build_http(config: &ClientConfig) -> ClientResult<Client> {
    if config.graphql_endpoint.trim().is_empty() {
        return Err(ClientError::InvalidConfig("GraphQL endpoint is empty".to_string()));
    }
    Ok(Client::builder().timeout(config.timeout).build()?)
}

fn decode_at<T: DeserializeOwned>(data: &Value, pointer: &str) -> ClientResult<Option<T>> {
    match data.pointer(pointer) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
    }
}

fn decode_required<T: DeserializeOwned>(data: &Value, pointer: &str) -> ClientResult<T> {
    decode_at(data, pointer)?
        .ok_or_else(|| ClientError::MissingData(pointer.trim_start_matches('/').replace('/', ".")))
}

fn role_mutation(role: RoleCategory) -> (&'static str, &'static str, &'static str) {
    match role {
        RoleCategory::LeadOrganization => {
            (queries::ASSIGN_LEAD_ORGANIZATION, "leadershipData", "organizationID")
        }
        RoleCategory::MemberOrganization => {
            (queries::ASSIGN_MEMBER_ORGANIZATION, "membershipData", "organizationID")
        }
        RoleCategory::LeadUser => (queries::ASSIGN_LEAD_USER, "leadershipData", "userID"),
        RoleCategory::MemberUser => (queries::ASSIGN_MEMBER_USER, "membershipData", "userID"),
    }
}

#[async_trait]
impl RemoteStore for GraphqlStore {
    async fn space(&self, name_id: &NameId) -> ClientResult<Option<EntitySnapshot>> {
        self.lookup(queries::SPACE, json!({ "ID": name_id }), "/space").await
    }

    async fn create_space(&self, input: &CreateSpaceInput) -> ClientResult<EntitySnapshot> {
        self.mutate_entity(queries::CREATE_SPACE, json!({ "spaceData": input }), "/createSpace")
            .await
    }

    async fn update_space(&self, input: &UpdateSpaceInput) -> ClientResult<EntitySnapshot> {
        self.mutate_entity(queries::UPDATE_SPACE, json!({ "spaceData": input }), "/updateSpace")
            .await
    }

    async fn organization(&self, name_id: &NameId) -> ClientResult<Option<EntitySnapshot>> {
        self.lookup(queries::ORGANIZATION, json!({ "ID": name_id }), "/organization")
            .await
    }

    async fn create_organization(
        &self,
        input: &CreateOrganizationInput,
    ) -> ClientResult<EntitySnapshot> {
        self.mutate_entity(
            queries::CREATE_ORGANIZATION,
            json!({ "organizationData": input }),
            "/createOrganization",
        )
        .await
    }

    async fn update_organization(
        &self,
        input: &UpdateOrganizationInput,
    ) -> ClientResult<EntitySnapshot> {
        self.mutate_entity(
            queries::UPDATE_ORGANIZATION,
            json!({ "organizationData": input }),
            "/updateOrganization",
        )
        .await
    }

    async fn user(&self, name_id: &NameId) -> ClientResult<Option<EntitySnapshot>> {
        self.lookup(queries::USER, json!({ "ID": name_id }), "/user").await
    }

    async fn create_user(&self, input: &CreateUserInput) -> ClientResult<EntitySnapshot> {
        self.mutate_entity(queries::CREATE_USER, json!({ "userData": input }), "/createUser")
            .await
    }

    async fn update_user_profile(
        &self,
        profile_id: &str,
        location: &LocationInput,
    ) -> ClientResult<()> {
        self.mutate(
            queries::UPDATE_PROFILE,
            json!({ "profileData": { "ID": profile_id, "location": location } }),
        )
        .await
    }

    async fn add_user_to_space(&self, space: &NameId, user: &NameId) -> ClientResult<()> {
        self.mutate(
            queries::ADD_USER_TO_SPACE,
            json!({ "membershipData": { "spaceID": space, "userID": user } }),
        )
        .await
    }

    async fn add_user_to_organization(
        &self,
        user: &NameId,
        organization: &NameId,
    ) -> ClientResult<()> {
        self.mutate(
            queries::ADD_USER_TO_ORGANIZATION,
            json!({ "membershipData": { "userID": user, "organizationID": organization } }),
        )
        .await
    }

    async fn group(&self, space: &NameId, name: &str) -> ClientResult<Option<EntitySnapshot>> {
        let variables = json!({ "spaceID": space, "name": name });
        let data = match self.execute(queries::GROUPS_BY_NAME, variables).await {
            Ok(data) => data,
            Err(err) if err.is_not_found() => return Ok(None),
            Err(err) => return Err(err),
        };
        let groups: Vec<WireEntity> =
            decode_at(&data, "/space/community/groups")?.unwrap_or_default();
        Ok(groups
            .into_iter()
            .find(|g| g.name.as_deref() == Some(name))
            .map(EntitySnapshot::from))
    }

    async fn create_group(&self, input: &CreateGroupInput) -> ClientResult<EntitySnapshot> {
        self.mutate_entity(
            queries::CREATE_GROUP,
            json!({ "groupData": input }),
            "/createGroupOnCommunity",
        )
        .await
    }

    async fn update_group(&self, input: &UpdateGroupInput) -> ClientResult<EntitySnapshot> {
        self.mutate_entity(
            queries::UPDATE_GROUP,
            json!({ "userGroupData": input }),
            "/updateUserGroup",
        )
        .await
    }

    async fn add_user_to_group(&self, user: &NameId, group_id: &str) -> ClientResult<()> {
        self.mutate(
            queries::ADD_USER_TO_GROUP,
            json!({ "membershipData": { "userID": user, "groupID": group_id } }),
        )
        .await
    }

    async fn challenge(
        &self,
        space: &NameId,
        name_id: &NameId,
    ) -> ClientResult<Option<EntitySnapshot>> {
        self.lookup(
            queries::CHALLENGE,
            json!({ "spaceID": space, "nameID": name_id }),
            "/space/challenge",
        )
        .await
    }

    async fn challenge_flow_template(&self, space: &NameId) -> ClientResult<Option<String>> {
        let data = self
            .execute(queries::FLOW_TEMPLATES, json!({ "spaceID": space }))
            .await?;
        let templates: Vec<WireTemplate> =
            decode_at(&data, "/space/templates/innovationFlowTemplates")?.unwrap_or_default();
        Ok(templates
            .into_iter()
            .find(|t| t.template_type == CHALLENGE_TEMPLATE_TYPE)
            .map(|t| t.id))
    }

    async fn create_challenge(
        &self,
        input: &CreateChallengeInput,
    ) -> ClientResult<EntitySnapshot> {
        self.mutate_entity(
            queries::CREATE_CHALLENGE,
            json!({ "challengeData": input }),
            "/createChallenge",
        )
        .await
    }

    async fn update_challenge(&self, input: &UpdateJourneyInput) -> ClientResult<EntitySnapshot> {
        self.mutate_entity(
            queries::UPDATE_CHALLENGE,
            json!({ "challengeData": input }),
            "/updateChallenge",
        )
        .await
    }

    async fn opportunity(
        &self,
        space: &NameId,
        name_id: &NameId,
    ) -> ClientResult<Option<EntitySnapshot>> {
        self.lookup(
            queries::OPPORTUNITY,
            json!({ "spaceID": space, "nameID": name_id }),
            "/space/opportunity",
        )
        .await
    }

    async fn create_opportunity(
        &self,
        input: &CreateOpportunityInput,
    ) -> ClientResult<EntitySnapshot> {
        self.mutate_entity(
            queries::CREATE_OPPORTUNITY,
            json!({ "opportunityData": input }),
            "/createOpportunity",
        )
        .await
    }

    async fn update_opportunity(
        &self,
        input: &UpdateJourneyInput,
    ) -> ClientResult<EntitySnapshot> {
        self.mutate_entity(
            queries::UPDATE_OPPORTUNITY,
            json!({ "opportunityData": input }),
            "/updateOpportunity",
        )
        .await
    }

    async fn create_callout(&self, input: &CreateCalloutInput) -> ClientResult<CalloutSnapshot> {
        let data = self
            .execute(queries::CREATE_CALLOUT, json!({ "calloutData": input }))
            .await?;
        decode_required::<WireCallout>(&data, "/createCalloutOnCollaboration")
            .map(CalloutSnapshot::from)
    }

    async fn create_post(&self, input: &CreatePostInput) -> ClientResult<EntitySnapshot> {
        self.mutate_entity(queries::CREATE_POST, json!({ "postData": input }), "/createPostOnCallout")
            .await
    }

    async fn create_relation(
        &self,
        input: &CreateRelationInput,
    ) -> ClientResult<RelationSnapshot> {
        let data = self
            .execute(queries::CREATE_RELATION, json!({ "relationData": input }))
            .await?;
        decode_required::<WireRelation>(&data, "/createRelationOnCollaboration")
            .map(RelationSnapshot::from)
    }

    async fn update_visual(&self, visual_id: &str, uri: &str) -> ClientResult<()> {
        self.mutate(
            queries::UPDATE_VISUAL,
            json!({ "updateData": { "visualID": visual_id, "uri": uri } }),
        )
        .await
    }

    async fn assign_role(
        &self,
        community_id: &str,
        role: RoleCategory,
        contributor: &NameId,
    ) -> ClientResult<()> {
        let (query, argument, contributor_field) = role_mutation(role);
        let mut payload = serde_json::Map::new();
        payload.insert("communityID".to_string(), json!(community_id));
        payload.insert(contributor_field.to_string(), json!(contributor));
        self.mutate(query, json!({ argument: payload })).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(RoleCategory::LeadOrganization, "leadershipData", "organizationID")]
    #[case(RoleCategory::MemberOrganization, "membershipData", "organizationID")]
    #[case(RoleCategory::LeadUser, "leadershipData", "userID")]
    #[case(RoleCategory::MemberUser, "membershipData", "userID")]
    fn role_mutations_use_matching_argument(
        #[case] role: RoleCategory,
        #[case] argument: &str,
        #[case] field: &str,
    ) {
        let (query, arg, contributor) = role_mutation(role);
        assert_eq!(arg, argument);
        assert_eq!(contributor, field);
        assert!(query.contains(&format!("${argument}")));
    }

    #[test]
    fn null_pointer_target_decodes_to_none() {
        let data = json!({ "space": { "challenge": null } });
        let decoded: Option<WireEntity> = decode_at(&data, "/space/challenge").expect("decode");
        assert!(decoded.is_none());
    }

    #[test]
    fn missing_mutation_result_names_the_path() {
        let data = json!({});
        let err = decode_required::<WireEntity>(&data, "/space/challenge").unwrap_err();
        assert_eq!(err.to_string(), "missing `space.challenge` in response");
    }
}

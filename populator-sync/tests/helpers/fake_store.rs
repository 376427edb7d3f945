//! In-memory `RemoteStore` that records every write.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

use async_trait::async_trait;

use populator_client::input::{
    CreateCalloutInput, CreateChallengeInput, CreateGroupInput, CreateOpportunityInput,
    CreateOrganizationInput, CreatePostInput, CreateRelationInput, CreateSpaceInput,
    CreateUserInput,
    LocationInput, UpdateGroupInput, UpdateJourneyInput, UpdateOrganizationInput,
    UpdateSpaceInput,
};
use populator_client::{
    CalloutSnapshot, ClientError, ClientResult, CollaborationSnapshot, CommunitySnapshot,
    EntitySnapshot, RelationSnapshot, RemoteStore, RoleCategory, VisualSlot, VisualSnapshot,
};
use populator_core::NameId;

/// One recorded write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Create { kind: &'static str, key: String },
    Update { kind: &'static str, key: String },
    Assign { community: String, role: RoleCategory, contributor: String },
    AddToSpace { user: String },
    AddToOrganization { user: String, organization: String },
    AddToGroup { user: String, group: String },
    Callout { name_id: String },
    Post { name_id: String },
    Relation { actor: String },
    Visual { id: String, uri: String },
    Profile { id: String },
}

#[derive(Default)]
struct State {
    next_id: usize,
    spaces: BTreeMap<String, EntitySnapshot>,
    organizations: BTreeMap<String, EntitySnapshot>,
    users: BTreeMap<String, EntitySnapshot>,
    groups: BTreeMap<String, EntitySnapshot>,
    challenges: BTreeMap<String, EntitySnapshot>,
    opportunities: BTreeMap<String, EntitySnapshot>,
    flow_template: Option<String>,
    /// Entities created from now on expose no community.
    no_communities: bool,
    /// Entities created from now on expose no visual slots.
    no_visuals: bool,
    failing: BTreeSet<String>,
    calls: Vec<Call>,
}

impl State {
    fn id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{}", self.next_id)
    }

    fn entity(&mut self, prefix: &str, name_id: &str, display_name: &str) -> EntitySnapshot {
        let id = self.id(prefix);
        let mut entity = EntitySnapshot::new(id.clone(), name_id, display_name);
        entity.profile_id = Some(format!("{id}-profile"));
        if self.no_visuals {
            return entity;
        }
        entity.visuals = VisualSlot::all()
            .iter()
            .map(|slot| VisualSnapshot {
                id: format!("{id}-{slot}"),
                name: slot.name().to_string(),
                uri: String::new(),
            })
            .collect();
        entity
    }

    fn journey(&mut self, prefix: &str, name_id: &str, display_name: &str) -> EntitySnapshot {
        let mut entity = self.entity(prefix, name_id, display_name);
        entity.community = (!self.no_communities).then(|| CommunitySnapshot {
            id: format!("{}-community", entity.id),
            lead_organizations: Some(Vec::new()),
            member_organizations: Some(Vec::new()),
            lead_users: Some(Vec::new()),
            member_users: Some(Vec::new()),
        });
        entity.collaboration = Some(CollaborationSnapshot {
            id: format!("{}-collaboration", entity.id),
            callouts: Some(Vec::new()),
            relations: Vec::new(),
        });
        entity
    }

    fn check(&self, key: &str) -> ClientResult<()> {
        if self.failing.contains(key) {
            return Err(ClientError::GraphQl {
                messages: vec![format!("simulated failure for {key}")],
                codes: vec!["INTERNAL".to_string()],
            });
        }
        Ok(())
    }

    fn all_entities_mut(&mut self) -> impl Iterator<Item = &mut EntitySnapshot> {
        self.spaces
            .values_mut()
            .chain(self.organizations.values_mut())
            .chain(self.groups.values_mut())
            .chain(self.challenges.values_mut())
            .chain(self.opportunities.values_mut())
    }

    fn callout_mut(&mut self, callout_id: &str) -> Option<&mut CalloutSnapshot> {
        self.all_entities_mut()
            .filter_map(|e| e.collaboration.as_mut())
            .filter_map(|c| c.callouts.as_mut())
            .flatten()
            .find(|c| c.id == callout_id)
    }

    fn set_visual_uri(&mut self, visual_id: &str, uri: &str) {
        let entities = self
            .users
            .values_mut()
            .chain(self.spaces.values_mut())
            .chain(self.organizations.values_mut())
            .chain(self.groups.values_mut())
            .chain(self.challenges.values_mut())
            .chain(self.opportunities.values_mut());
        for visual in entities.flat_map(|e| e.visuals.iter_mut()) {
            if visual.id == visual_id {
                visual.uri = uri.to_string();
            }
        }
        let posts = self
            .challenges
            .values_mut()
            .filter_map(|e| e.collaboration.as_mut())
            .filter_map(|c| c.callouts.as_mut())
            .flatten()
            .filter_map(|c| c.posts.as_mut())
            .flatten();
        for visual in posts.flat_map(|p| p.visuals.iter_mut()) {
            if visual.id == visual_id {
                visual.uri = uri.to_string();
            }
        }
    }

    fn unknown(what: &str, key: &str) -> ClientError {
        ClientError::GraphQl {
            messages: vec![format!("unable to find {what} with nameID: {key}")],
            codes: vec!["ENTITY_NOT_FOUND".to_string()],
        }
    }
}

#[derive(Default)]
pub struct FakeStore {
    state: Mutex<State>,
}

impl FakeStore {
    /// An empty server that still offers a challenge innovation-flow template.
    pub fn new() -> Self {
        let store = Self::default();
        store.state.lock().unwrap().flow_template = Some("template-challenge".to_string());
        store
    }

    /// A store holding the target space (with a community) and a challenge
    /// innovation-flow template.
    pub fn with_space(space: &str) -> Self {
        let store = Self::new();
        {
            let mut state = store.state.lock().unwrap();
            let entity = state.journey("space", space, space);
            state.spaces.insert(space.to_string(), entity);
        }
        store
    }

    /// Every write touching `key` (a nameID or group name) fails.
    pub fn fail_on(&self, key: &str) {
        self.state.lock().unwrap().failing.insert(key.to_string());
    }

    pub fn without_flow_template(self) -> Self {
        self.state.lock().unwrap().flow_template = None;
        self
    }

    /// Journeys created after this call have no community.
    pub fn without_communities(self) -> Self {
        self.state.lock().unwrap().no_communities = true;
        self
    }

    /// Entities created after this call expose no visual slots.
    pub fn without_visuals(self) -> Self {
        self.state.lock().unwrap().no_visuals = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    pub fn creates(&self) -> Vec<(&'static str, String)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Create { kind, key } => Some((kind, key)),
                _ => None,
            })
            .collect()
    }

    pub fn assigns(&self) -> Vec<(RoleCategory, String)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Assign { role, contributor, .. } => Some((role, contributor)),
                _ => None,
            })
            .collect()
    }

    pub fn challenge(&self, name_id: &str) -> Option<EntitySnapshot> {
        self.state.lock().unwrap().challenges.get(name_id).cloned()
    }

    /// `nameID`s of the posts on `callout` of challenge `challenge`.
    pub fn posts(&self, challenge: &str, callout: &str) -> Vec<String> {
        self.challenge(challenge)
            .and_then(|c| c.collaboration)
            .and_then(|c| c.callout(&NameId::from(callout)).cloned())
            .and_then(|c| c.posts)
            .unwrap_or_default()
            .into_iter()
            .map(|p| p.name_id.to_string())
            .collect()
    }

    pub fn insert_organization(&self, name_id: &str) {
        let mut state = self.state.lock().unwrap();
        let entity = state.entity("org", name_id, name_id);
        state.organizations.insert(name_id.to_string(), entity);
    }

    pub fn insert_user(&self, name_id: &str) {
        let mut state = self.state.lock().unwrap();
        let entity = state.entity("user", name_id, name_id);
        state.users.insert(name_id.to_string(), entity);
    }
}

fn push(list: &mut Option<Vec<NameId>>, contributor: &NameId) {
    let list = list.get_or_insert_with(Vec::new);
    if !list.contains(contributor) {
        list.push(contributor.clone());
    }
}

#[async_trait]
impl RemoteStore for FakeStore {
    async fn space(&self, name_id: &NameId) -> ClientResult<Option<EntitySnapshot>> {
        Ok(self.state.lock().unwrap().spaces.get(name_id.as_str()).cloned())
    }

    async fn create_space(&self, input: &CreateSpaceInput) -> ClientResult<EntitySnapshot> {
        let mut state = self.state.lock().unwrap();
        state.check(input.name_id.as_str())?;
        if !input.host_id.is_empty() && !state.organizations.contains_key(input.host_id.as_str()) {
            return Err(State::unknown("organization", input.host_id.as_str()));
        }
        let entity = state.journey("space", input.name_id.as_str(), &input.display_name);
        state.spaces.insert(input.name_id.to_string(), entity.clone());
        state.calls.push(Call::Create { kind: "space", key: input.name_id.to_string() });
        Ok(entity)
    }

    async fn update_space(&self, input: &UpdateSpaceInput) -> ClientResult<EntitySnapshot> {
        let mut state = self.state.lock().unwrap();
        let entity = state
            .spaces
            .values_mut()
            .find(|e| e.id == input.id)
            .map(|e| {
                e.display_name = input.display_name.clone();
                e.clone()
            })
            .ok_or_else(|| ClientError::MissingData("updateSpace".into()))?;
        state.check(entity.name_id.as_str())?;
        state.calls.push(Call::Update { kind: "space", key: entity.name_id.to_string() });
        Ok(entity)
    }

    async fn organization(&self, name_id: &NameId) -> ClientResult<Option<EntitySnapshot>> {
        Ok(self.state.lock().unwrap().organizations.get(name_id.as_str()).cloned())
    }

    async fn create_organization(
        &self,
        input: &CreateOrganizationInput,
    ) -> ClientResult<EntitySnapshot> {
        let mut state = self.state.lock().unwrap();
        state.check(input.name_id.as_str())?;
        let entity = state.entity("org", input.name_id.as_str(), &input.display_name);
        state.organizations.insert(input.name_id.to_string(), entity.clone());
        state.calls.push(Call::Create { kind: "organization", key: input.name_id.to_string() });
        Ok(entity)
    }

    async fn update_organization(
        &self,
        input: &UpdateOrganizationInput,
    ) -> ClientResult<EntitySnapshot> {
        let mut state = self.state.lock().unwrap();
        let entity = state
            .organizations
            .values()
            .find(|e| e.id == input.id)
            .cloned()
            .ok_or_else(|| ClientError::MissingData("updateOrganization".into()))?;
        state.check(entity.name_id.as_str())?;
        state.calls.push(Call::Update { kind: "organization", key: entity.name_id.to_string() });
        Ok(entity)
    }

    async fn user(&self, name_id: &NameId) -> ClientResult<Option<EntitySnapshot>> {
        Ok(self.state.lock().unwrap().users.get(name_id.as_str()).cloned())
    }

    async fn create_user(&self, input: &CreateUserInput) -> ClientResult<EntitySnapshot> {
        let mut state = self.state.lock().unwrap();
        state.check(input.name_id.as_str())?;
        let entity = state.entity("user", input.name_id.as_str(), &input.display_name);
        state.users.insert(input.name_id.to_string(), entity.clone());
        state.calls.push(Call::Create { kind: "user", key: input.name_id.to_string() });
        Ok(entity)
    }

    async fn update_user_profile(
        &self,
        profile_id: &str,
        _location: &LocationInput,
    ) -> ClientResult<()> {
        let mut state = self.state.lock().unwrap();
        let owner = state
            .users
            .values()
            .find(|u| u.profile_id.as_deref() == Some(profile_id))
            .map(|u| u.name_id.to_string())
            .unwrap_or_default();
        state.check(&owner)?;
        state.calls.push(Call::Profile { id: profile_id.to_string() });
        Ok(())
    }

    async fn add_user_to_space(&self, space: &NameId, user: &NameId) -> ClientResult<()> {
        let mut state = self.state.lock().unwrap();
        if let Some(community) = state
            .spaces
            .get_mut(space.as_str())
            .and_then(|s| s.community.as_mut())
        {
            push(&mut community.member_users, user);
        }
        state.calls.push(Call::AddToSpace { user: user.to_string() });
        Ok(())
    }

    async fn add_user_to_organization(
        &self,
        user: &NameId,
        organization: &NameId,
    ) -> ClientResult<()> {
        let mut state = self.state.lock().unwrap();
        if let Some(org) = state.organizations.get_mut(organization.as_str()) {
            if !org.members.contains(user) {
                org.members.push(user.clone());
            }
        }
        state.calls.push(Call::AddToOrganization {
            user: user.to_string(),
            organization: organization.to_string(),
        });
        Ok(())
    }

    async fn group(&self, _space: &NameId, name: &str) -> ClientResult<Option<EntitySnapshot>> {
        Ok(self.state.lock().unwrap().groups.get(name).cloned())
    }

    async fn create_group(&self, input: &CreateGroupInput) -> ClientResult<EntitySnapshot> {
        let mut state = self.state.lock().unwrap();
        state.check(&input.name)?;
        let entity = state.entity("group", &input.name, &input.name);
        state.groups.insert(input.name.clone(), entity.clone());
        state.calls.push(Call::Create { kind: "group", key: input.name.clone() });
        Ok(entity)
    }

    async fn update_group(&self, input: &UpdateGroupInput) -> ClientResult<EntitySnapshot> {
        let mut state = self.state.lock().unwrap();
        state.check(&input.name)?;
        let entity = state
            .groups
            .get(&input.name)
            .cloned()
            .ok_or_else(|| ClientError::MissingData("updateUserGroup".into()))?;
        state.calls.push(Call::Update { kind: "group", key: input.name.clone() });
        Ok(entity)
    }

    async fn add_user_to_group(&self, user: &NameId, group_id: &str) -> ClientResult<()> {
        let mut state = self.state.lock().unwrap();
        let mut group_name = String::new();
        if let Some(group) = state.groups.values_mut().find(|g| g.id == group_id) {
            if !group.members.contains(user) {
                group.members.push(user.clone());
            }
            group_name = group.name_id.to_string();
        }
        state.calls.push(Call::AddToGroup { user: user.to_string(), group: group_name });
        Ok(())
    }

    async fn challenge(
        &self,
        _space: &NameId,
        name_id: &NameId,
    ) -> ClientResult<Option<EntitySnapshot>> {
        Ok(self.state.lock().unwrap().challenges.get(name_id.as_str()).cloned())
    }

    async fn challenge_flow_template(&self, _space: &NameId) -> ClientResult<Option<String>> {
        Ok(self.state.lock().unwrap().flow_template.clone())
    }

    async fn create_challenge(
        &self,
        input: &CreateChallengeInput,
    ) -> ClientResult<EntitySnapshot> {
        let mut state = self.state.lock().unwrap();
        state.check(input.name_id.as_str())?;
        let entity = state.journey("challenge", input.name_id.as_str(), &input.display_name);
        state.challenges.insert(input.name_id.to_string(), entity.clone());
        state.calls.push(Call::Create { kind: "challenge", key: input.name_id.to_string() });
        Ok(entity)
    }

    async fn update_challenge(&self, input: &UpdateJourneyInput) -> ClientResult<EntitySnapshot> {
        let mut state = self.state.lock().unwrap();
        let entity = state
            .challenges
            .values()
            .find(|e| e.id == input.id)
            .cloned()
            .ok_or_else(|| ClientError::MissingData("updateChallenge".into()))?;
        state.check(entity.name_id.as_str())?;
        state.calls.push(Call::Update { kind: "challenge", key: entity.name_id.to_string() });
        Ok(entity)
    }

    async fn opportunity(
        &self,
        _space: &NameId,
        name_id: &NameId,
    ) -> ClientResult<Option<EntitySnapshot>> {
        Ok(self.state.lock().unwrap().opportunities.get(name_id.as_str()).cloned())
    }

    async fn create_opportunity(
        &self,
        input: &CreateOpportunityInput,
    ) -> ClientResult<EntitySnapshot> {
        let mut state = self.state.lock().unwrap();
        state.check(input.name_id.as_str())?;
        let entity = state.journey("opportunity", input.name_id.as_str(), &input.display_name);
        state.opportunities.insert(input.name_id.to_string(), entity.clone());
        state.calls.push(Call::Create { kind: "opportunity", key: input.name_id.to_string() });
        Ok(entity)
    }

    async fn update_opportunity(
        &self,
        input: &UpdateJourneyInput,
    ) -> ClientResult<EntitySnapshot> {
        let mut state = self.state.lock().unwrap();
        let entity = state
            .opportunities
            .values()
            .find(|e| e.id == input.id)
            .cloned()
            .ok_or_else(|| ClientError::MissingData("updateOpportunity".into()))?;
        state.check(entity.name_id.as_str())?;
        state.calls.push(Call::Update { kind: "opportunity", key: entity.name_id.to_string() });
        Ok(entity)
    }

    async fn create_callout(&self, input: &CreateCalloutInput) -> ClientResult<CalloutSnapshot> {
        let mut state = self.state.lock().unwrap();
        let id = state.id("callout");
        let callout = CalloutSnapshot {
            id,
            name_id: input.name_id.clone(),
            posts: Some(Vec::new()),
        };
        if let Some(collaboration) = state
            .all_entities_mut()
            .filter_map(|e| e.collaboration.as_mut())
            .find(|c| c.id == input.collaboration_id)
        {
            collaboration.callouts.get_or_insert_with(Vec::new).push(callout.clone());
        }
        state.calls.push(Call::Callout { name_id: input.name_id.to_string() });
        Ok(callout)
    }

    async fn create_post(&self, input: &CreatePostInput) -> ClientResult<EntitySnapshot> {
        let mut state = self.state.lock().unwrap();
        state.check(input.name_id.as_str())?;
        let post = state.entity("post", input.name_id.as_str(), &input.profile_data.display_name);
        let callout = state
            .callout_mut(&input.callout_id)
            .ok_or_else(|| State::unknown("callout", &input.callout_id))?;
        callout.posts.get_or_insert_with(Vec::new).push(post.clone());
        state.calls.push(Call::Post { name_id: input.name_id.to_string() });
        Ok(post)
    }

    async fn create_relation(
        &self,
        input: &CreateRelationInput,
    ) -> ClientResult<RelationSnapshot> {
        let mut state = self.state.lock().unwrap();
        state.check(&input.actor_name)?;
        let id = state.id("relation");
        let relation = RelationSnapshot {
            id,
            relation_type: input.relation_type.clone(),
            actor_name: input.actor_name.clone(),
        };
        if let Some(collaboration) = state
            .all_entities_mut()
            .filter_map(|e| e.collaboration.as_mut())
            .find(|c| c.id == input.parent_id)
        {
            collaboration.relations.push(relation.clone());
        }
        state.calls.push(Call::Relation { actor: input.actor_name.clone() });
        Ok(relation)
    }

    async fn update_visual(&self, visual_id: &str, uri: &str) -> ClientResult<()> {
        let mut state = self.state.lock().unwrap();
        state.set_visual_uri(visual_id, uri);
        state.calls.push(Call::Visual { id: visual_id.to_string(), uri: uri.to_string() });
        Ok(())
    }

    async fn assign_role(
        &self,
        community_id: &str,
        role: RoleCategory,
        contributor: &NameId,
    ) -> ClientResult<()> {
        let mut state = self.state.lock().unwrap();
        state.check(contributor.as_str())?;
        let known = match role {
            RoleCategory::LeadOrganization | RoleCategory::MemberOrganization => {
                state.organizations.contains_key(contributor.as_str())
            }
            RoleCategory::LeadUser | RoleCategory::MemberUser => {
                state.users.contains_key(contributor.as_str())
            }
        };
        if !known {
            return Err(State::unknown("contributor", contributor.as_str()));
        }
        if let Some(community) = state
            .all_entities_mut()
            .filter_map(|e| e.community.as_mut())
            .find(|c| c.id == community_id)
        {
            let list = match role {
                RoleCategory::LeadOrganization => &mut community.lead_organizations,
                RoleCategory::MemberOrganization => &mut community.member_organizations,
                RoleCategory::LeadUser => &mut community.lead_users,
                RoleCategory::MemberUser => &mut community.member_users,
            };
            push(list, contributor);
        }
        state.calls.push(Call::Assign {
            community: community_id.to_string(),
            role,
            contributor: contributor.to_string(),
        });
        Ok(())
    }
}

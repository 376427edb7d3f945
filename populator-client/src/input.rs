//! Payloads sent to the remote store.
//!
//! Field names serialize to the server's GraphQL input names (`nameID`,
//! `ID`, camelCase elsewhere). Update payloads never carry a `nameID`.

use serde::Serialize;

use populator_core::NameId;

// ---------------------------------------------------------------------------
// Shared parts
// ---------------------------------------------------------------------------

/// A named link attached to a profile or context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceInput {
    pub name: String,
    pub uri: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct LocationInput {
    pub country: String,
    pub city: String,
}

impl LocationInput {
    pub fn new(country: &str, city: &str) -> Self {
        Self {
            country: country.to_owned(),
            city: city.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagsetInput {
    pub name: String,
    pub tags: Vec<String>,
}

/// Descriptive context of spaces, challenges and opportunities.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ContextInput {
    pub tagline: String,
    pub background: String,
    pub vision: String,
    pub impact: String,
    pub who: String,
    pub location: LocationInput,
    /// Only sent on create; updates leave existing references untouched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub references: Option<Vec<ReferenceInput>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileInput {
    pub description: String,
    pub references: Vec<ReferenceInput>,
    pub tagsets: Vec<TagsetInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationInput>,
}

// ---------------------------------------------------------------------------
// Spaces
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSpaceInput {
    #[serde(rename = "nameID")]
    pub name_id: NameId,
    pub display_name: String,
    #[serde(rename = "hostID")]
    pub host_id: NameId,
    pub anonymous_read_access: bool,
    pub context: ContextInput,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSpaceInput {
    #[serde(rename = "ID")]
    pub id: String,
    pub display_name: String,
    pub anonymous_read_access: bool,
    pub context: ContextInput,
    pub tags: Vec<String>,
}

// ---------------------------------------------------------------------------
// Organizations and users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrganizationInput {
    #[serde(rename = "nameID")]
    pub name_id: NameId,
    pub display_name: String,
    pub profile_data: ProfileInput,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrganizationInput {
    #[serde(rename = "ID")]
    pub id: String,
    pub display_name: String,
    pub description: String,
    pub location: LocationInput,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserInput {
    #[serde(rename = "nameID")]
    pub name_id: NameId,
    pub display_name: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub email: String,
    pub phone: String,
    pub city: String,
    pub country: String,
    pub profile_data: ProfileInput,
}

// ---------------------------------------------------------------------------
// Groups
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupInput {
    /// Community the group is created on.
    #[serde(rename = "parentID")]
    pub parent_id: String,
    pub name: String,
    pub profile_data: ProfileInput,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGroupInput {
    #[serde(rename = "ID")]
    pub id: String,
    pub name: String,
    pub description: String,
}

// ---------------------------------------------------------------------------
// Challenges and opportunities
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChallengeInput {
    #[serde(rename = "spaceID")]
    pub space_id: NameId,
    #[serde(rename = "nameID")]
    pub name_id: NameId,
    pub display_name: String,
    pub context: ContextInput,
    pub tags: Vec<String>,
    #[serde(rename = "innovationFlowTemplateID")]
    pub innovation_flow_template_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOpportunityInput {
    #[serde(rename = "challengeID")]
    pub challenge_id: String,
    #[serde(rename = "nameID")]
    pub name_id: NameId,
    pub display_name: String,
    pub context: ContextInput,
    pub tags: Vec<String>,
}

/// Update payload shared by challenges and opportunities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateJourneyInput {
    #[serde(rename = "ID")]
    pub id: String,
    pub display_name: String,
    pub context: ContextInput,
    pub tags: Vec<String>,
}

// ---------------------------------------------------------------------------
// Collaboration contents
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CalloutType {
    Card,
    Discussion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CalloutState {
    Open,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CalloutVisibility {
    Draft,
    Published,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCalloutInput {
    #[serde(rename = "collaborationID")]
    pub collaboration_id: String,
    #[serde(rename = "nameID")]
    pub name_id: NameId,
    pub display_name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub callout_type: CalloutType,
    pub state: CalloutState,
    pub visibility: CalloutVisibility,
}

/// Display fields of a post's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostProfileInput {
    pub display_name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostInput {
    #[serde(rename = "calloutID")]
    pub callout_id: String,
    #[serde(rename = "nameID")]
    pub name_id: NameId,
    #[serde(rename = "type")]
    pub post_type: String,
    pub profile_data: PostProfileInput,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRelationInput {
    #[serde(rename = "parentID")]
    pub parent_id: String,
    #[serde(rename = "type")]
    pub relation_type: String,
    pub actor_name: String,
    pub actor_role: String,
    pub actor_type: String,
    pub description: String,
}

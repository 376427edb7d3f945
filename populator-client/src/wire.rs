//! Response shapes as the server returns them, converted into snapshots.

use serde::Deserialize;

use populator_core::NameId;

use crate::model::{
    CalloutSnapshot, CollaborationSnapshot, CommunitySnapshot, EntitySnapshot, RelationSnapshot,
    VisualSnapshot,
};

#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub errors: Vec<WireError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireError {
    pub message: String,
    #[serde(default)]
    pub extensions: Option<WireExtensions>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireExtensions {
    #[serde(default)]
    pub code: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireNamed {
    #[serde(rename = "nameID")]
    pub name_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireVisual {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub uri: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireProfile {
    pub id: String,
    #[serde(default)]
    pub visuals: Option<Vec<WireVisual>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireCommunity {
    pub id: String,
    pub lead_organizations: Option<Vec<WireNamed>>,
    pub member_organizations: Option<Vec<WireNamed>>,
    pub lead_users: Option<Vec<WireNamed>>,
    pub member_users: Option<Vec<WireNamed>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireCallout {
    pub id: String,
    #[serde(rename = "nameID")]
    pub name_id: String,
    #[serde(default)]
    pub posts: Option<Vec<WireEntity>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireRelation {
    pub id: String,
    #[serde(rename = "type")]
    pub relation_type: String,
    pub actor_name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireCollaboration {
    pub id: String,
    pub callouts: Option<Vec<WireCallout>>,
    pub relations: Option<Vec<WireRelation>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireTemplate {
    pub id: String,
    #[serde(rename = "type")]
    pub template_type: String,
}

/// Any entity selection. Fields a document did not select stay `None`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireEntity {
    pub id: String,
    #[serde(rename = "nameID")]
    pub name_id: Option<String>,
    pub display_name: Option<String>,
    pub name: Option<String>,
    pub profile: Option<WireProfile>,
    pub community: Option<WireCommunity>,
    pub collaboration: Option<WireCollaboration>,
    pub members: Option<Vec<WireNamed>>,
}

fn name_ids(list: Option<Vec<WireNamed>>) -> Option<Vec<NameId>> {
    list.map(|items| items.into_iter().map(|n| NameId(n.name_id)).collect())
}

impl From<WireCommunity> for CommunitySnapshot {
    fn from(wire: WireCommunity) -> Self {
        Self {
            id: wire.id,
            lead_organizations: name_ids(wire.lead_organizations),
            member_organizations: name_ids(wire.member_organizations),
            lead_users: name_ids(wire.lead_users),
            member_users: name_ids(wire.member_users),
        }
    }
}

impl From<WireCollaboration> for CollaborationSnapshot {
    fn from(wire: WireCollaboration) -> Self {
        Self {
            id: wire.id,
            callouts: wire.callouts.map(|callouts| {
                callouts.into_iter().map(CalloutSnapshot::from).collect()
            }),
            relations: wire
                .relations
                .unwrap_or_default()
                .into_iter()
                .map(RelationSnapshot::from)
                .collect(),
        }
    }
}

impl From<WireCallout> for CalloutSnapshot {
    fn from(wire: WireCallout) -> Self {
        Self {
            id: wire.id,
            name_id: NameId(wire.name_id),
            posts: wire
                .posts
                .map(|posts| posts.into_iter().map(EntitySnapshot::from).collect()),
        }
    }
}

impl From<WireRelation> for RelationSnapshot {
    fn from(wire: WireRelation) -> Self {
        Self {
            id: wire.id,
            relation_type: wire.relation_type,
            actor_name: wire.actor_name,
        }
    }
}

impl From<WireEntity> for EntitySnapshot {
    fn from(wire: WireEntity) -> Self {
        // Groups only carry a name.
        let name_id = wire.name_id.or_else(|| wire.name.clone()).unwrap_or_default();
        let display_name = wire.display_name.or(wire.name).unwrap_or_default();
        let (profile_id, visuals) = match wire.profile {
            Some(profile) => {
                let visuals = profile
                    .visuals
                    .unwrap_or_default()
                    .into_iter()
                    .map(|v| VisualSnapshot {
                        id: v.id,
                        name: v.name,
                        uri: v.uri.unwrap_or_default(),
                    })
                    .collect();
                (Some(profile.id), visuals)
            }
            None => (None, Vec::new()),
        };
        Self {
            id: wire.id,
            name_id: NameId(name_id),
            display_name,
            profile_id,
            visuals,
            community: wire.community.map(CommunitySnapshot::from),
            collaboration: wire.collaboration.map(CollaborationSnapshot::from),
            members: name_ids(wire.members).unwrap_or_default(),
        }
    }
}

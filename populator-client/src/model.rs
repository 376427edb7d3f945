//! Immutable snapshots returned by remote store calls.
//!
//! Every snapshot owns its data. A populator holds a snapshot for the span
//! of one row and re-fetches when it needs fresher state; nothing is shared
//! or mutated across calls.

use std::fmt;

use populator_core::NameId;

/// A visual slot an entity profile may expose. Journeys carry banner,
/// background and avatar; posts carry banner and narrow banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisualSlot {
    Avatar,
    Background,
    Banner,
    BannerNarrow,
}

impl VisualSlot {
    pub fn all() -> &'static [VisualSlot] {
        &[
            VisualSlot::Banner,
            VisualSlot::Background,
            VisualSlot::Avatar,
            VisualSlot::BannerNarrow,
        ]
    }

    /// Slot name as reported by the server.
    pub fn name(self) -> &'static str {
        match self {
            VisualSlot::Avatar => "avatar",
            VisualSlot::Background => "background",
            VisualSlot::Banner => "banner",
            VisualSlot::BannerNarrow => "bannerNarrow",
        }
    }
}

impl fmt::Display for VisualSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A community role a contributor can be assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleCategory {
    LeadOrganization,
    MemberOrganization,
    LeadUser,
    MemberUser,
}

impl fmt::Display for RoleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RoleCategory::LeadOrganization => "lead organization",
            RoleCategory::MemberOrganization => "member organization",
            RoleCategory::LeadUser => "lead user",
            RoleCategory::MemberUser => "member user",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VisualSnapshot {
    pub id: String,
    /// Slot name (`avatar`, `background`, `banner`).
    pub name: String,
    pub uri: String,
}

/// Current role holders of an entity's community.
///
/// `None` means the server did not report the list, which the differ treats
/// the same as an empty list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommunitySnapshot {
    pub id: String,
    pub lead_organizations: Option<Vec<NameId>>,
    pub member_organizations: Option<Vec<NameId>>,
    pub lead_users: Option<Vec<NameId>>,
    pub member_users: Option<Vec<NameId>>,
}

impl CommunitySnapshot {
    /// Holders of `role`, if reported.
    pub fn holders(&self, role: RoleCategory) -> Option<&[NameId]> {
        let list = match role {
            RoleCategory::LeadOrganization => &self.lead_organizations,
            RoleCategory::MemberOrganization => &self.member_organizations,
            RoleCategory::LeadUser => &self.lead_users,
            RoleCategory::MemberUser => &self.member_users,
        };
        list.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CalloutSnapshot {
    pub id: String,
    pub name_id: NameId,
    /// Posts on the callout, if the server reported them.
    pub posts: Option<Vec<EntitySnapshot>>,
}

impl CalloutSnapshot {
    pub fn post(&self, name_id: &NameId) -> Option<&EntitySnapshot> {
        self.posts
            .as_deref()
            .unwrap_or_default()
            .iter()
            .find(|p| &p.name_id == name_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RelationSnapshot {
    pub id: String,
    pub relation_type: String,
    pub actor_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CollaborationSnapshot {
    pub id: String,
    pub callouts: Option<Vec<CalloutSnapshot>>,
    pub relations: Vec<RelationSnapshot>,
}

impl CollaborationSnapshot {
    pub fn callout(&self, name_id: &NameId) -> Option<&CalloutSnapshot> {
        self.callouts
            .as_deref()
            .unwrap_or_default()
            .iter()
            .find(|c| &c.name_id == name_id)
    }

    pub fn has_callout(&self, name_id: &NameId) -> bool {
        self.callout(name_id).is_some()
    }

    /// The relation with this `(type, actorName)` pair, if present.
    pub fn relation(&self, relation_type: &str, actor_name: &str) -> Option<&RelationSnapshot> {
        self.relations
            .iter()
            .find(|r| r.relation_type == relation_type && r.actor_name == actor_name)
    }
}

/// A remote entity as last read from the store.
///
/// Groups have no `nameID`; their name fills both `name_id` and
/// `display_name`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntitySnapshot {
    pub id: String,
    pub name_id: NameId,
    pub display_name: String,
    pub profile_id: Option<String>,
    pub visuals: Vec<VisualSnapshot>,
    pub community: Option<CommunitySnapshot>,
    pub collaboration: Option<CollaborationSnapshot>,
    /// Direct user members (organizations and groups).
    pub members: Vec<NameId>,
}

impl EntitySnapshot {
    pub fn new(
        id: impl Into<String>,
        name_id: impl Into<NameId>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name_id: name_id.into(),
            display_name: display_name.into(),
            ..Self::default()
        }
    }

    pub fn visual(&self, slot: VisualSlot) -> Option<&VisualSnapshot> {
        self.visuals.iter().find(|v| v.name == slot.name())
    }
}

//! Typed rows, one struct per workbook sheet.
//!
//! All text fields are owned `String`s; an absent cell is the empty string.
//! Relationship fields hold the `nameID`s of other entities, never the
//! entities themselves.

use crate::types::NameId;

/// Identity accessors shared by every row type.
pub trait SourceRow {
    /// Label whose emptiness marks the end of valid rows in a sheet.
    fn label(&self) -> &str;

    /// Identifier used in log lines and failure reports.
    fn key(&self) -> &str;
}

/// A top-level space (the hub every other entity hangs off).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpaceRow {
    pub name_id: NameId,
    pub display_name: String,
    pub anonymous_read_access: bool,
    pub background: String,
    pub vision: String,
    pub impact: String,
    pub tagline: String,
    pub who: String,
    /// `nameID` of the hosting organization.
    pub host: NameId,
    pub visual_avatar: String,
    pub visual_background: String,
    pub visual_banner: String,
    pub ref_website: String,
    pub ref_repo: String,
    pub tags: Vec<String>,
    pub lead_users: Vec<NameId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrganizationRow {
    pub name_id: NameId,
    pub display_name: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub avatar: String,
    pub country: String,
    pub city: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserRow {
    pub name_id: NameId,
    pub display_name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub city: String,
    pub country: String,
    pub gender: String,
    pub avatar: String,
    pub bio: String,
    pub job_title: String,
    pub keywords: Vec<String>,
    pub linkedin: String,
    pub twitter: String,
    /// `nameID` of the organization the user is affiliated with.
    pub organization: NameId,
    pub skills: Vec<String>,
    /// Group names within the target space.
    pub groups: Vec<String>,
}

/// A user group on the target space's community. Groups are keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupRow {
    pub name: String,
    pub description: String,
    pub avatar: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChallengeRow {
    pub name_id: NameId,
    pub display_name: String,
    pub background: String,
    pub impact: String,
    pub tagline: String,
    pub who: String,
    pub vision: String,
    pub country: String,
    pub city: String,
    pub visual_avatar: String,
    pub visual_background: String,
    pub visual_banner: String,
    pub ref_video: String,
    pub ref_jitsi: String,
    pub ref1_name: String,
    pub ref1_value: String,
    pub ref1_description: String,
    pub lead_organizations: Vec<NameId>,
    pub member_organizations: Vec<NameId>,
    pub lead_users: Vec<NameId>,
    pub member_users: Vec<NameId>,
    pub tags: Vec<String>,
}

/// A callout on a challenge's collaboration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalloutRow {
    pub name_id: NameId,
    pub display_name: String,
    pub description: String,
    /// `nameID` of the challenge whose collaboration holds the callout; required.
    pub challenge: NameId,
}

/// A post contributed to a callout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostRow {
    pub name_id: NameId,
    pub display_name: String,
    /// Free-form post type, e.g. `knowledge` or `related_initiative`.
    pub post_type: String,
    pub description: String,
    /// `nameID` of the callout; required.
    pub callout: NameId,
    /// `nameID` of the challenge holding the callout; required.
    pub challenge: NameId,
    pub tags: Vec<String>,
    pub visual_banner: String,
    pub visual_banner_narrow: String,
}

/// An opportunity: the challenge shape plus its parent challenge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpportunityRow {
    pub name_id: NameId,
    pub display_name: String,
    /// `nameID` of the parent challenge; required.
    pub challenge: NameId,
    pub background: String,
    pub impact: String,
    pub tagline: String,
    pub who: String,
    pub vision: String,
    pub country: String,
    pub city: String,
    pub visual_avatar: String,
    pub visual_background: String,
    pub visual_banner: String,
    pub ref_video: String,
    pub ref_jitsi: String,
    pub ref1_name: String,
    pub ref1_value: String,
    pub ref1_description: String,
    pub lead_organizations: Vec<NameId>,
    pub member_organizations: Vec<NameId>,
    pub lead_users: Vec<NameId>,
    pub member_users: Vec<NameId>,
    pub tags: Vec<String>,
}

/// An actor relation attached to an opportunity's collaboration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationRow {
    pub relation_type: String,
    pub actor_name: String,
    pub actor_role: String,
    pub actor_type: String,
    pub description: String,
    /// `nameID` of the opportunity; required.
    pub opportunity: NameId,
}

macro_rules! display_named_row {
    ($($row:ty),* $(,)?) => {
        $(
            impl SourceRow for $row {
                fn label(&self) -> &str {
                    &self.display_name
                }

                fn key(&self) -> &str {
                    self.name_id.as_str()
                }
            }
        )*
    };
}

display_named_row!(
    SpaceRow,
    OrganizationRow,
    UserRow,
    ChallengeRow,
    CalloutRow,
    PostRow,
    OpportunityRow,
);

impl SourceRow for GroupRow {
    fn label(&self) -> &str {
        &self.name
    }

    fn key(&self) -> &str {
        &self.name
    }
}

impl SourceRow for RelationRow {
    fn label(&self) -> &str {
        &self.actor_name
    }

    fn key(&self) -> &str {
        &self.actor_name
    }
}

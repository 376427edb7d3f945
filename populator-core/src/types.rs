//! Shared domain types.
//!
//! Entities are keyed by a human-chosen [`NameId`], unique within a kind.
//! List-valued cells arrive as one delimited string and are split with
//! [`parse_list`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::rows::SourceRow;

/// Delimiter for list-valued cells (`TAGS`, `LEAD_ORGS`, `GROUPS`, ...).
pub const LIST_DELIMITER: char = ',';

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// The stable, externally chosen identifier of an entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct NameId(pub String);

impl NameId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for NameId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for NameId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl AsRef<str> for NameId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Entity kinds
// ---------------------------------------------------------------------------

/// One step of a populate run.
///
/// `UserRoles` and `SpaceRoles` read the users and space sheets a second
/// time, once the users they reference exist, to attach memberships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityKind {
    Space,
    SpaceRoles,
    Organization,
    Group,
    User,
    UserRoles,
    Challenge,
    Callout,
    Post,
    Opportunity,
    Relation,
}

impl EntityKind {
    /// Every kind, in declaration order.
    pub fn all() -> &'static [EntityKind] {
        &[
            EntityKind::Space,
            EntityKind::SpaceRoles,
            EntityKind::Organization,
            EntityKind::Group,
            EntityKind::User,
            EntityKind::UserRoles,
            EntityKind::Challenge,
            EntityKind::Callout,
            EntityKind::Post,
            EntityKind::Opportunity,
            EntityKind::Relation,
        ]
    }

    /// Workbook sheet the kind reads its rows from.
    pub fn sheet(self) -> &'static str {
        match self {
            EntityKind::Space | EntityKind::SpaceRoles => "Space",
            EntityKind::Organization => "Organizations",
            EntityKind::Group => "Groups",
            EntityKind::User | EntityKind::UserRoles => "Users",
            EntityKind::Challenge => "Challenges",
            EntityKind::Callout => "Callouts",
            EntityKind::Post => "Posts",
            EntityKind::Opportunity => "Opportunities",
            EntityKind::Relation => "Relations",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntityKind::Space => "space",
            EntityKind::SpaceRoles => "space-roles",
            EntityKind::Organization => "organization",
            EntityKind::Group => "group",
            EntityKind::User => "user",
            EntityKind::UserRoles => "user-roles",
            EntityKind::Challenge => "challenge",
            EntityKind::Callout => "callout",
            EntityKind::Post => "post",
            EntityKind::Opportunity => "opportunity",
            EntityKind::Relation => "relation",
        };
        f.write_str(label)
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "space" | "spaces" => Ok(EntityKind::Space),
            "space-roles" | "space_roles" => Ok(EntityKind::SpaceRoles),
            "organization" | "organizations" => Ok(EntityKind::Organization),
            "group" | "groups" => Ok(EntityKind::Group),
            "user" | "users" => Ok(EntityKind::User),
            "user-roles" | "user_roles" => Ok(EntityKind::UserRoles),
            "challenge" | "challenges" => Ok(EntityKind::Challenge),
            "callout" | "callouts" => Ok(EntityKind::Callout),
            "post" | "posts" => Ok(EntityKind::Post),
            "opportunity" | "opportunities" => Ok(EntityKind::Opportunity),
            "relation" | "relations" => Ok(EntityKind::Relation),
            other => Err(format!(
                "unknown entity kind '{other}'; expected one of: space, space-roles, \
                 organization, group, user, user-roles, challenge, callout, post, \
                 opportunity, relation"
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Cell parsing
// ---------------------------------------------------------------------------

/// Split a delimited cell into trimmed, non-empty tokens, preserving order.
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split(LIST_DELIMITER)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Boolean cell: only a literal `false` (any case) is false.
pub fn parse_flag(raw: &str) -> bool {
    !raw.trim().eq_ignore_ascii_case("false")
}

/// Index of the first row whose label is empty, if any.
///
/// Rows from that index on are trailing blanks and must not be processed.
pub fn sentinel_position<R: SourceRow>(rows: &[R]) -> Option<usize> {
    rows.iter().position(|row| row.label().trim().is_empty())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

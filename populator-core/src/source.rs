//! The data source boundary.

use crate::rows::{
    CalloutRow, ChallengeRow, GroupRow, OpportunityRow, OrganizationRow, PostRow, RelationRow,
    SpaceRow, UserRow,
};

/// Immutable, ordered row collections, one accessor per entity kind.
///
/// Accessors return owned rows in sheet order; a missing sheet is an empty
/// `Vec`, never an error.
pub trait DataSource: Send + Sync {
    fn spaces(&self) -> Vec<SpaceRow>;
    fn organizations(&self) -> Vec<OrganizationRow>;
    fn users(&self) -> Vec<UserRow>;
    fn groups(&self) -> Vec<GroupRow>;
    fn challenges(&self) -> Vec<ChallengeRow>;
    fn callouts(&self) -> Vec<CalloutRow>;
    fn posts(&self) -> Vec<PostRow>;
    fn opportunities(&self) -> Vec<OpportunityRow>;
    fn relations(&self) -> Vec<RelationRow>;
}

/// Rows held directly in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    pub spaces: Vec<SpaceRow>,
    pub organizations: Vec<OrganizationRow>,
    pub users: Vec<UserRow>,
    pub groups: Vec<GroupRow>,
    pub challenges: Vec<ChallengeRow>,
    pub callouts: Vec<CalloutRow>,
    pub posts: Vec<PostRow>,
    pub opportunities: Vec<OpportunityRow>,
    pub relations: Vec<RelationRow>,
}

impl DataSource for InMemorySource {
    fn spaces(&self) -> Vec<SpaceRow> {
        self.spaces.clone()
    }

    fn organizations(&self) -> Vec<OrganizationRow> {
        self.organizations.clone()
    }

    fn users(&self) -> Vec<UserRow> {
        self.users.clone()
    }

    fn groups(&self) -> Vec<GroupRow> {
        self.groups.clone()
    }

    fn challenges(&self) -> Vec<ChallengeRow> {
        self.challenges.clone()
    }

    fn callouts(&self) -> Vec<CalloutRow> {
        self.callouts.clone()
    }

    fn posts(&self) -> Vec<PostRow> {
        self.posts.clone()
    }

    fn opportunities(&self) -> Vec<OpportunityRow> {
        self.opportunities.clone()
    }

    fn relations(&self) -> Vec<RelationRow> {
        self.relations.clone()
    }
}

//! GraphQL documents sent by [`GraphqlStore`](crate::GraphqlStore).
//!
//! Selections are shared through macros so `concat!` can splice them into
//! each document at compile time.

macro_rules! profile_fields {
    () => {
        "profile { id visuals { id name uri } }"
    };
}

macro_rules! community_fields {
    () => {
        "community { id \
           leadOrganizations { nameID } memberOrganizations { nameID } \
           leadUsers { nameID } memberUsers { nameID } }"
    };
}

macro_rules! collaboration_fields {
    () => {
        concat!(
            "collaboration { id callouts { id nameID posts { id nameID ",
            profile_fields!(),
            " } } relations { id type actorName } }"
        )
    };
}

macro_rules! journey_fields {
    () => {
        concat!(
            "id nameID displayName ",
            profile_fields!(),
            " ",
            community_fields!(),
            " ",
            collaboration_fields!()
        )
    };
}

macro_rules! organization_fields {
    () => {
        concat!("id nameID displayName ", profile_fields!(), " members: associates { nameID }")
    };
}

macro_rules! group_fields {
    () => {
        concat!("id name ", profile_fields!(), " members { nameID }")
    };
}

// ---------------------------------------------------------------------------
// Spaces
// ---------------------------------------------------------------------------

pub(crate) const SPACE: &str = concat!(
    "query space($ID: UUID_NAMEID!) { space(ID: $ID) { id nameID displayName ",
    profile_fields!(),
    " ",
    community_fields!(),
    " } }"
);

pub(crate) const CREATE_SPACE: &str = concat!(
    "mutation createSpace($spaceData: CreateSpaceInput!) { createSpace(spaceData: $spaceData) { \
     id nameID displayName ",
    profile_fields!(),
    " ",
    community_fields!(),
    " } }"
);

pub(crate) const UPDATE_SPACE: &str = concat!(
    "mutation updateSpace($spaceData: UpdateSpaceInput!) { updateSpace(spaceData: $spaceData) { \
     id nameID displayName ",
    profile_fields!(),
    " ",
    community_fields!(),
    " } }"
);

pub(crate) const ADD_USER_TO_SPACE: &str = "mutation assignUserToSpace($membershipData: \
     AssignSpaceMemberUserInput!) { assignUserToSpace(membershipData: $membershipData) { id } }";

// ---------------------------------------------------------------------------
// Organizations
// ---------------------------------------------------------------------------

pub(crate) const ORGANIZATION: &str = concat!(
    "query organization($ID: UUID_NAMEID!) { organization(ID: $ID) { ",
    organization_fields!(),
    " } }"
);

pub(crate) const CREATE_ORGANIZATION: &str = concat!(
    "mutation createOrganization($organizationData: CreateOrganizationInput!) { \
     createOrganization(organizationData: $organizationData) { ",
    organization_fields!(),
    " } }"
);

pub(crate) const UPDATE_ORGANIZATION: &str = concat!(
    "mutation updateOrganization($organizationData: UpdateOrganizationInput!) { \
     updateOrganization(organizationData: $organizationData) { ",
    organization_fields!(),
    " } }"
);

pub(crate) const ADD_USER_TO_ORGANIZATION: &str = "mutation assignUserToOrganization(\
     $membershipData: AssignOrganizationMemberInput!) { \
     assignUserToOrganization(membershipData: $membershipData) { id } }";

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

pub(crate) const USER: &str = concat!(
    "query user($ID: UUID_NAMEID_EMAIL!) { user(ID: $ID) { id nameID displayName ",
    profile_fields!(),
    " } }"
);

pub(crate) const CREATE_USER: &str = concat!(
    "mutation createUser($userData: CreateUserInput!) { createUser(userData: $userData) { \
     id nameID displayName ",
    profile_fields!(),
    " } }"
);

pub(crate) const UPDATE_PROFILE: &str = "mutation updateProfile($profileData: \
     UpdateProfileInput!) { updateProfile(profileData: $profileData) { id } }";

// ---------------------------------------------------------------------------
// Groups
// ---------------------------------------------------------------------------

pub(crate) const GROUPS_BY_NAME: &str = concat!(
    "query groups($spaceID: UUID_NAMEID!, $name: String!) { space(ID: $spaceID) { \
     community { groups(name: $name) { ",
    group_fields!(),
    " } } } }"
);

pub(crate) const CREATE_GROUP: &str = concat!(
    "mutation createGroupOnCommunity($groupData: CreateUserGroupInput!) { \
     createGroupOnCommunity(groupData: $groupData) { ",
    group_fields!(),
    " } }"
);

pub(crate) const UPDATE_GROUP: &str = concat!(
    "mutation updateUserGroup($userGroupData: UpdateUserGroupInput!) { \
     updateUserGroup(userGroupData: $userGroupData) { ",
    group_fields!(),
    " } }"
);

pub(crate) const ADD_USER_TO_GROUP: &str = "mutation assignUserToGroup($membershipData: \
     AssignUserGroupMemberInput!) { assignUserToGroup(membershipData: $membershipData) { id } }";

// ---------------------------------------------------------------------------
// Challenges and opportunities
// ---------------------------------------------------------------------------

pub(crate) const CHALLENGE: &str = concat!(
    "query challenge($spaceID: UUID_NAMEID!, $nameID: UUID_NAMEID!) { space(ID: $spaceID) { \
     challenge(ID: $nameID) { ",
    journey_fields!(),
    " } } }"
);

pub(crate) const FLOW_TEMPLATES: &str = "query innovationFlowTemplates($spaceID: UUID_NAMEID!) { \
     space(ID: $spaceID) { templates { innovationFlowTemplates { id type } } } }";

pub(crate) const CREATE_CHALLENGE: &str = concat!(
    "mutation createChallenge($challengeData: CreateChallengeOnSpaceInput!) { \
     createChallenge(challengeData: $challengeData) { ",
    journey_fields!(),
    " } }"
);

pub(crate) const UPDATE_CHALLENGE: &str = concat!(
    "mutation updateChallenge($challengeData: UpdateChallengeInput!) { \
     updateChallenge(challengeData: $challengeData) { ",
    journey_fields!(),
    " } }"
);

pub(crate) const OPPORTUNITY: &str = concat!(
    "query opportunity($spaceID: UUID_NAMEID!, $nameID: UUID_NAMEID!) { space(ID: $spaceID) { \
     opportunity(ID: $nameID) { ",
    journey_fields!(),
    " } } }"
);

pub(crate) const CREATE_OPPORTUNITY: &str = concat!(
    "mutation createOpportunity($opportunityData: CreateOpportunityInput!) { \
     createOpportunity(opportunityData: $opportunityData) { ",
    journey_fields!(),
    " } }"
);

pub(crate) const UPDATE_OPPORTUNITY: &str = concat!(
    "mutation updateOpportunity($opportunityData: UpdateOpportunityInput!) { \
     updateOpportunity(opportunityData: $opportunityData) { ",
    journey_fields!(),
    " } }"
);

// ---------------------------------------------------------------------------
// Sub-resources
// ---------------------------------------------------------------------------

pub(crate) const CREATE_CALLOUT: &str = "mutation createCalloutOnCollaboration($calloutData: \
     CreateCalloutOnCollaborationInput!) { \
     createCalloutOnCollaboration(calloutData: $calloutData) { id nameID } }";

pub(crate) const CREATE_POST: &str = concat!(
    "mutation createPostOnCallout($postData: CreatePostOnCalloutInput!) { \
     createPostOnCallout(postData: $postData) { id nameID ",
    profile_fields!(),
    " } }"
);

pub(crate) const CREATE_RELATION: &str = "mutation createRelationOnCollaboration($relationData: \
     CreateRelationOnCollaborationInput!) { \
     createRelationOnCollaboration(relationData: $relationData) { id type actorName } }";

pub(crate) const UPDATE_VISUAL: &str = "mutation updateVisual($updateData: UpdateVisualInput!) { \
     updateVisual(updateData: $updateData) { id } }";

// ---------------------------------------------------------------------------
// Community roles
// ---------------------------------------------------------------------------

pub(crate) const ASSIGN_LEAD_ORGANIZATION: &str = "mutation assignOrganizationAsCommunityLead(\
     $leadershipData: AssignCommunityLeadOrganizationInput!) { \
     assignOrganizationAsCommunityLead(leadershipData: $leadershipData) { id } }";

pub(crate) const ASSIGN_MEMBER_ORGANIZATION: &str = "mutation \
     assignOrganizationAsCommunityMember($membershipData: \
     AssignCommunityMemberOrganizationInput!) { \
     assignOrganizationAsCommunityMember(membershipData: $membershipData) { id } }";

pub(crate) const ASSIGN_LEAD_USER: &str = "mutation assignUserAsCommunityLead($leadershipData: \
     AssignCommunityLeadUserInput!) { \
     assignUserAsCommunityLead(leadershipData: $leadershipData) { id } }";

pub(crate) const ASSIGN_MEMBER_USER: &str = "mutation assignUserAsCommunityMember(\
     $membershipData: AssignCommunityMemberUserInput!) { \
     assignUserAsCommunityMember(membershipData: $membershipData) { id } }";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn journey_documents_select_roles_and_callouts() {
        for doc in [CHALLENGE, OPPORTUNITY, CREATE_CHALLENGE, UPDATE_OPPORTUNITY] {
            assert!(doc.contains("leadOrganizations { nameID }"), "{doc}");
            assert!(doc.contains("callouts { id nameID posts { id nameID"), "{doc}");
            assert!(doc.contains("visuals { id name uri }"), "{doc}");
        }
    }

    #[test]
    fn documents_have_balanced_braces() {
        for doc in [
            SPACE,
            ORGANIZATION,
            GROUPS_BY_NAME,
            CHALLENGE,
            CREATE_CALLOUT,
            CREATE_POST,
            ASSIGN_MEMBER_USER,
        ] {
            let open = doc.matches('{').count();
            let close = doc.matches('}').count();
            assert_eq!(open, close, "{doc}");
        }
    }
}

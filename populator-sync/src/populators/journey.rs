//! Fields shared by challenges and opportunities.

use populator_client::input::{ContextInput, LocationInput};
use populator_client::{RoleCategory, VisualSlot};
use populator_core::{ChallengeRow, EntityKind, NameId, OpportunityRow};

use crate::references::ReferenceAssembler;

/// Borrowed view over a challenge or opportunity row.
pub(crate) struct Journey<'r> {
    pub kind: EntityKind,
    pub name_id: &'r NameId,
    pub display_name: &'r str,
    pub background: &'r str,
    pub impact: &'r str,
    pub tagline: &'r str,
    pub who: &'r str,
    pub vision: &'r str,
    pub country: &'r str,
    pub city: &'r str,
    pub visual_avatar: &'r str,
    pub visual_background: &'r str,
    pub visual_banner: &'r str,
    pub ref_video: &'r str,
    pub ref_jitsi: &'r str,
    pub ref1_name: &'r str,
    pub ref1_value: &'r str,
    pub ref1_description: &'r str,
    pub lead_organizations: &'r [NameId],
    pub member_organizations: &'r [NameId],
    pub lead_users: &'r [NameId],
    pub member_users: &'r [NameId],
    pub tags: &'r [String],
}

macro_rules! journey_view {
    ($kind:expr, $row:expr) => {
        Journey {
            kind: $kind,
            name_id: &$row.name_id,
            display_name: &$row.display_name,
            background: &$row.background,
            impact: &$row.impact,
            tagline: &$row.tagline,
            who: &$row.who,
            vision: &$row.vision,
            country: &$row.country,
            city: &$row.city,
            visual_avatar: &$row.visual_avatar,
            visual_background: &$row.visual_background,
            visual_banner: &$row.visual_banner,
            ref_video: &$row.ref_video,
            ref_jitsi: &$row.ref_jitsi,
            ref1_name: &$row.ref1_name,
            ref1_value: &$row.ref1_value,
            ref1_description: &$row.ref1_description,
            lead_organizations: &$row.lead_organizations,
            member_organizations: &$row.member_organizations,
            lead_users: &$row.lead_users,
            member_users: &$row.member_users,
            tags: &$row.tags,
        }
    };
}

impl<'r> From<&'r ChallengeRow> for Journey<'r> {
    fn from(row: &'r ChallengeRow) -> Self {
        journey_view!(EntityKind::Challenge, row)
    }
}

impl<'r> From<&'r OpportunityRow> for Journey<'r> {
    fn from(row: &'r OpportunityRow) -> Self {
        journey_view!(EntityKind::Opportunity, row)
    }
}

impl Journey<'_> {
    /// Context payload. References are only included on create.
    pub fn context(&self, with_references: bool) -> ContextInput {
        let references = with_references.then(|| {
            ReferenceAssembler::new()
                .add("video", self.ref_video, format!("Video explainer for the {}", self.kind))
                .add("jitsi", self.ref_jitsi, format!("Jitsi meeting space for the {}", self.kind))
                .add(self.ref1_name, self.ref1_value, self.ref1_description)
                .build()
        });
        ContextInput {
            tagline: self.tagline.to_owned(),
            background: self.background.to_owned(),
            vision: self.vision.to_owned(),
            impact: self.impact.to_owned(),
            who: self.who.to_owned(),
            location: LocationInput::new(self.country, self.city),
            references,
        }
    }

    pub fn visuals(&self) -> [(VisualSlot, &str); 3] {
        [
            (VisualSlot::Banner, self.visual_banner),
            (VisualSlot::Background, self.visual_background),
            (VisualSlot::Avatar, self.visual_avatar),
        ]
    }

    pub fn roles(&self) -> [(RoleCategory, &[NameId]); 4] {
        [
            (RoleCategory::LeadOrganization, self.lead_organizations),
            (RoleCategory::MemberOrganization, self.member_organizations),
            (RoleCategory::LeadUser, self.lead_users),
            (RoleCategory::MemberUser, self.member_users),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_context_assembles_non_empty_references() {
        let row = ChallengeRow {
            name_id: NameId::from("grid"),
            display_name: "Grid".into(),
            ref_video: "https://video.example/grid".into(),
            ref1_name: "Docs".into(),
            ref1_value: "https://docs.example/grid".into(),
            ref1_description: "Background reading".into(),
            country: "NL".into(),
            ..ChallengeRow::default()
        };
        let context = Journey::from(&row).context(true);
        let references = context.references.expect("references on create");
        let names: Vec<&str> = references.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["video", "Docs"]);
        assert_eq!(references[0].description, "Video explainer for the challenge");
        assert_eq!(context.location.country, "NL");
    }

    #[test]
    fn update_context_leaves_references_out() {
        let row = OpportunityRow {
            ref_video: "https://video.example/x".into(),
            ..OpportunityRow::default()
        };
        assert!(Journey::from(&row).context(false).references.is_none());
    }
}

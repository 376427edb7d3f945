use async_trait::async_trait;
use tracing::info;

use populator_client::input::{CreateUserInput, LocationInput, ProfileInput, TagsetInput};
use populator_client::{EntitySnapshot, RemoteStore, VisualSlot};
use populator_core::{DataSource, EntityKind, UserRow};

use super::{update_visuals, Populator};
use crate::error::{SyncError, SyncResult};
use crate::pipeline::PopulateContext;
use crate::references::ReferenceAssembler;

pub struct UserPopulator<'a> {
    store: &'a dyn RemoteStore,
    context: &'a PopulateContext,
}

impl<'a> UserPopulator<'a> {
    pub fn new(store: &'a dyn RemoteStore, context: &'a PopulateContext) -> Self {
        Self { store, context }
    }
}

fn profile(row: &UserRow) -> ProfileInput {
    let references = ReferenceAssembler::new()
        .add("LinkedIn", &row.linkedin, "LinkedIn profile")
        .add("Twitter", &row.twitter, "Twitter profile")
        .build();
    let mut tagsets = vec![
        TagsetInput {
            name: "skills".to_string(),
            tags: row.skills.clone(),
        },
        TagsetInput {
            name: "keywords".to_string(),
            tags: row.keywords.clone(),
        },
    ];
    if !row.job_title.trim().is_empty() {
        tagsets.push(TagsetInput {
            name: "organization roles".to_string(),
            tags: vec![row.job_title.trim().to_owned()],
        });
    }
    ProfileInput {
        description: row.bio.clone(),
        references,
        tagsets,
        location: Some(LocationInput::new(&row.country, &row.city)),
    }
}

#[async_trait]
impl Populator for UserPopulator<'_> {
    type Row = UserRow;

    const KIND: EntityKind = EntityKind::User;

    fn rows(&self, source: &dyn DataSource) -> Vec<UserRow> {
        source.users()
    }

    async fn resolve(&self, row: &UserRow) -> SyncResult<Option<EntitySnapshot>> {
        Ok(self.store.user(&row.name_id).await?)
    }

    async fn create(&self, row: &UserRow) -> SyncResult<EntitySnapshot> {
        let input = CreateUserInput {
            name_id: row.name_id.clone(),
            display_name: row.display_name.clone(),
            first_name: row.first_name.clone(),
            last_name: row.last_name.clone(),
            gender: row.gender.clone(),
            email: row.email.clone(),
            phone: row.phone.clone(),
            city: row.city.clone(),
            country: row.country.clone(),
            profile_data: profile(row),
        };
        let created = self.store.create_user(&input).await?;
        info!(name_id = %row.name_id, "user created");

        self.store
            .add_user_to_space(&self.context.space, &row.name_id)
            .await?;
        info!(name_id = %row.name_id, space = %self.context.space, "user added to space");
        Ok(created)
    }

    /// Existing users only get their location re-sent.
    async fn update(&self, existing: &EntitySnapshot, row: &UserRow) -> SyncResult<EntitySnapshot> {
        let profile_id = existing
            .profile_id
            .as_deref()
            .ok_or_else(|| SyncError::MissingProfile {
                kind: Self::KIND,
                name_id: row.name_id.clone(),
            })?;
        self.store
            .update_user_profile(profile_id, &LocationInput::new(&row.country, &row.city))
            .await?;
        info!(name_id = %row.name_id, "user profile updated");
        Ok(existing.clone())
    }

    async fn reconcile_visuals(&self, entity: &EntitySnapshot, row: &UserRow) -> SyncResult<()> {
        update_visuals(self.store, entity, &[(VisualSlot::Avatar, row.avatar.as_str())]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_carries_social_references_and_job_title() {
        let row = UserRow {
            bio: "Builds grids".into(),
            linkedin: "https://linkedin.example/jdoe".into(),
            job_title: "Engineer".into(),
            skills: vec!["rust".into()],
            ..UserRow::default()
        };
        let profile = profile(&row);
        assert_eq!(profile.references.len(), 1);
        assert_eq!(profile.references[0].name, "LinkedIn");
        let names: Vec<&str> = profile.tagsets.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["skills", "keywords", "organization roles"]);
        assert_eq!(profile.tagsets[2].tags, vec!["Engineer".to_string()]);
    }

    #[test]
    fn empty_job_title_adds_no_roles_tagset() {
        let profile = profile(&UserRow::default());
        assert_eq!(profile.tagsets.len(), 2);
        assert!(profile.references.is_empty());
    }
}

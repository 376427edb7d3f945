//! Workbook loader.
//!
//! # Document layout
//!
//! ```text
//! Organizations:
//!   - NAME_ID: acme
//!     DISPLAY_NAME: Acme Corp
//!     KEYWORDS: energy, water
//! Users:
//!   - NAME_ID: jdoe
//!     ...
//! ```
//!
//! Top-level keys are sheet names (see [`EntityKind::sheet`]); each sheet is
//! a list of rows mapping column names to scalar cells. JSON documents load
//! through the same path since JSON is valid YAML.
//!
//! [`EntityKind::sheet`]: crate::types::EntityKind::sheet

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_yaml::Value;

use crate::error::{io_err, SourceError};
use crate::rows::{
    CalloutRow, ChallengeRow, GroupRow, OpportunityRow, OrganizationRow, PostRow, RelationRow,
    SpaceRow, UserRow,
};
use crate::source::DataSource;
use crate::types::{parse_flag, parse_list, EntityKind, NameId};

type Cells = BTreeMap<String, Value>;

/// A parsed workbook: sheet name → rows of raw cells.
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    path: Option<PathBuf>,
    sheets: BTreeMap<String, Vec<Cells>>,
}

impl Workbook {
    /// Load and parse the workbook at `path`.
    ///
    /// Returns `SourceError::Io` if unreadable, `SourceError::Parse` (with
    /// path + line context) if malformed.
    pub fn load(path: &Path) -> Result<Self, SourceError> {
        let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
        let sheets = parse_sheets(&contents).map_err(|source| SourceError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: Some(path.to_path_buf()),
            sheets,
        })
    }

    /// Parse a workbook held in memory.
    pub fn parse(contents: &str) -> Result<Self, SourceError> {
        Ok(Self {
            path: None,
            sheets: parse_sheets(contents)?,
        })
    }

    /// File the workbook was loaded from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Names of the sheets present in the document, sorted.
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.keys().map(String::as_str).collect()
    }

    fn rows(&self, kind: EntityKind) -> impl Iterator<Item = RowCells<'_>> {
        self.sheets
            .get(kind.sheet())
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(RowCells)
    }
}

fn parse_sheets(contents: &str) -> Result<BTreeMap<String, Vec<Cells>>, serde_yaml::Error> {
    if contents.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    let raw: BTreeMap<String, Option<Vec<Cells>>> = serde_yaml::from_str(contents)?;
    Ok(raw
        .into_iter()
        .map(|(name, rows)| (name, rows.unwrap_or_default()))
        .collect())
}

// ---------------------------------------------------------------------------
// Cell access
// ---------------------------------------------------------------------------

struct RowCells<'a>(&'a Cells);

impl RowCells<'_> {
    fn text(&self, column: &str) -> String {
        self.0.get(column).map(cell_to_string).unwrap_or_default()
    }

    fn name_id(&self, column: &str) -> NameId {
        NameId::from(self.text(column))
    }

    fn list(&self, column: &str) -> Vec<String> {
        parse_list(&self.text(column))
    }

    fn name_ids(&self, column: &str) -> Vec<NameId> {
        self.list(column).into_iter().map(NameId::from).collect()
    }

    fn flag(&self, column: &str) -> bool {
        parse_flag(&self.text(column))
    }
}

fn cell_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_owned(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        // A YAML list in a list column reads the same as a delimited string.
        Value::Sequence(items) => items
            .iter()
            .map(cell_to_string)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Value::Tagged(tagged) => cell_to_string(&tagged.value),
        Value::Mapping(_) => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Sheet mapping
// ---------------------------------------------------------------------------

impl DataSource for Workbook {
    fn spaces(&self) -> Vec<SpaceRow> {
        self.rows(EntityKind::Space)
            .map(|c| SpaceRow {
                name_id: c.name_id("NAME_ID"),
                display_name: c.text("DISPLAY_NAME"),
                anonymous_read_access: c.flag("ANONYMOUS_READ_ACCESS"),
                background: c.text("BACKGROUND"),
                vision: c.text("VISION"),
                impact: c.text("IMPACT"),
                tagline: c.text("TAGLINE"),
                who: c.text("WHO"),
                host: c.name_id("HOST"),
                visual_avatar: c.text("VISUAL_AVATAR"),
                visual_background: c.text("VISUAL_BACKGROUND"),
                visual_banner: c.text("VISUAL_BANNER"),
                ref_website: c.text("REF_WEBSITE"),
                ref_repo: c.text("REF_REPO"),
                tags: c.list("TAGS"),
                lead_users: c.name_ids("LEAD_USERS"),
            })
            .collect()
    }

    fn organizations(&self) -> Vec<OrganizationRow> {
        self.rows(EntityKind::Organization)
            .map(|c| OrganizationRow {
                name_id: c.name_id("NAME_ID"),
                display_name: c.text("DISPLAY_NAME"),
                description: c.text("DESCRIPTION"),
                keywords: c.list("KEYWORDS"),
                avatar: c.text("AVATAR"),
                country: c.text("COUNTRY"),
                city: c.text("CITY"),
            })
            .collect()
    }

    fn users(&self) -> Vec<UserRow> {
        self.rows(EntityKind::User)
            .map(|c| UserRow {
                name_id: c.name_id("NAME_ID"),
                display_name: c.text("DISPLAY_NAME"),
                first_name: c.text("FIRST_NAME"),
                last_name: c.text("LAST_NAME"),
                email: c.text("EMAIL"),
                phone: c.text("PHONE"),
                city: c.text("CITY"),
                country: c.text("COUNTRY"),
                gender: c.text("GENDER"),
                avatar: c.text("AVATAR"),
                bio: c.text("BIO"),
                job_title: c.text("JOB_TITLE"),
                keywords: c.list("KEYWORDS"),
                linkedin: c.text("LINKEDIN"),
                twitter: c.text("TWITTER"),
                organization: c.name_id("ORGANIZATION"),
                skills: c.list("SKILLS"),
                groups: c.list("GROUPS"),
            })
            .collect()
    }

    fn groups(&self) -> Vec<GroupRow> {
        self.rows(EntityKind::Group)
            .map(|c| GroupRow {
                name: c.text("NAME"),
                description: c.text("DESCRIPTION"),
                avatar: c.text("AVATAR"),
                keywords: c.list("KEYWORDS"),
            })
            .collect()
    }

    fn challenges(&self) -> Vec<ChallengeRow> {
        self.rows(EntityKind::Challenge)
            .map(|c| ChallengeRow {
                name_id: c.name_id("NAME_ID"),
                display_name: c.text("DISPLAY_NAME"),
                background: c.text("BACKGROUND"),
                impact: c.text("IMPACT"),
                tagline: c.text("TAGLINE"),
                who: c.text("WHO"),
                vision: c.text("VISION"),
                country: c.text("COUNTRY"),
                city: c.text("CITY"),
                visual_avatar: c.text("VISUAL_AVATAR"),
                visual_background: c.text("VISUAL_BACKGROUND"),
                visual_banner: c.text("VISUAL_BANNER"),
                ref_video: c.text("REF_VIDEO"),
                ref_jitsi: c.text("REF_JITSI"),
                ref1_name: c.text("REF_1_NAME"),
                ref1_value: c.text("REF_1_VALUE"),
                ref1_description: c.text("REF_1_DESCRIPTION"),
                lead_organizations: c.name_ids("LEAD_ORGS"),
                member_organizations: c.name_ids("MEMBER_ORGS"),
                lead_users: c.name_ids("LEAD_USERS"),
                member_users: c.name_ids("MEMBER_USERS"),
                tags: c.list("TAGS"),
            })
            .collect()
    }

    fn callouts(&self) -> Vec<CalloutRow> {
        self.rows(EntityKind::Callout)
            .map(|c| CalloutRow {
                name_id: c.name_id("NAME_ID"),
                display_name: c.text("DISPLAY_NAME"),
                description: c.text("DESCRIPTION"),
                challenge: c.name_id("CHALLENGE"),
            })
            .collect()
    }

    fn posts(&self) -> Vec<PostRow> {
        self.rows(EntityKind::Post)
            .map(|c| PostRow {
                name_id: c.name_id("NAME_ID"),
                display_name: c.text("DISPLAY_NAME"),
                post_type: c.text("TYPE"),
                description: c.text("DESCRIPTION"),
                callout: c.name_id("CALLOUT"),
                challenge: c.name_id("CHALLENGE"),
                tags: c.list("TAGS"),
                visual_banner: c.text("VISUAL_BANNER"),
                visual_banner_narrow: c.text("VISUAL_BANNER_NARROW"),
            })
            .collect()
    }

    fn opportunities(&self) -> Vec<OpportunityRow> {
        self.rows(EntityKind::Opportunity)
            .map(|c| OpportunityRow {
                name_id: c.name_id("NAME_ID"),
                display_name: c.text("DISPLAY_NAME"),
                challenge: c.name_id("CHALLENGE"),
                background: c.text("BACKGROUND"),
                impact: c.text("IMPACT"),
                tagline: c.text("TAGLINE"),
                who: c.text("WHO"),
                vision: c.text("VISION"),
                country: c.text("COUNTRY"),
                city: c.text("CITY"),
                visual_avatar: c.text("VISUAL_AVATAR"),
                visual_background: c.text("VISUAL_BACKGROUND"),
                visual_banner: c.text("VISUAL_BANNER"),
                ref_video: c.text("REF_VIDEO"),
                ref_jitsi: c.text("REF_JITSI"),
                ref1_name: c.text("REF_1_NAME"),
                ref1_value: c.text("REF_1_VALUE"),
                ref1_description: c.text("REF_1_DESCRIPTION"),
                lead_organizations: c.name_ids("LEAD_ORGS"),
                member_organizations: c.name_ids("MEMBER_ORGS"),
                lead_users: c.name_ids("LEAD_USERS"),
                member_users: c.name_ids("MEMBER_USERS"),
                tags: c.list("TAGS"),
            })
            .collect()
    }

    fn relations(&self) -> Vec<RelationRow> {
        self.rows(EntityKind::Relation)
            .map(|c| RelationRow {
                relation_type: c.text("TYPE"),
                actor_name: c.text("ACTOR_NAME"),
                actor_role: c.text("ACTOR_ROLE"),
                actor_type: c.text("ACTOR_TYPE"),
                description: c.text("DESCRIPTION"),
                opportunity: c.name_id("OPPORTUNITY"),
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

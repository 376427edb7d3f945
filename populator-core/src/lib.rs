//! Populator core library — row types, the data source boundary, workbook loading.
//!
//! Public API surface:
//! - [`types`] — newtypes, [`EntityKind`], list-field parsing
//! - [`rows`] — one typed row per entity kind
//! - [`source`] — the [`DataSource`] trait and [`InMemorySource`]
//! - [`workbook`] — YAML/JSON workbook loader
//! - [`error`] — [`SourceError`]

pub mod error;
pub mod rows;
pub mod source;
pub mod types;
pub mod workbook;

pub use error::SourceError;
pub use rows::{
    CalloutRow, ChallengeRow, GroupRow, OpportunityRow, OrganizationRow, PostRow, RelationRow,
    SourceRow, SpaceRow, UserRow,
};
pub use source::{DataSource, InMemorySource};
pub use types::{parse_flag, parse_list, sentinel_position, EntityKind, NameId};
pub use workbook::Workbook;

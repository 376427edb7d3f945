//! # populator-client
//!
//! The remote store boundary: the [`RemoteStore`] trait the reconciliation
//! engine talks to, the immutable snapshots it returns, the payloads it
//! accepts, and [`GraphqlStore`], the GraphQL-over-HTTP implementation.

pub mod auth;
pub mod config;
pub mod error;
pub mod graphql;
pub mod input;
pub mod model;
mod queries;
pub mod store;
mod wire;

pub use config::{ClientConfig, Credentials};
pub use error::{ClientError, ClientResult};
pub use graphql::GraphqlStore;
pub use model::{
    CalloutSnapshot, CollaborationSnapshot, CommunitySnapshot, EntitySnapshot, RelationSnapshot,
    RoleCategory, VisualSlot, VisualSnapshot,
};
pub use store::RemoteStore;

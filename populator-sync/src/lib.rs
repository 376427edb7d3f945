//! # populator-sync
//!
//! The reconciliation engine: decides per row whether to create or update a
//! remote entity, then reconciles its visuals and community roles.
//!
//! Build an [`Orchestrator`] over a [`RemoteStore`](populator_client::RemoteStore)
//! and a [`DataSource`](populator_core::DataSource), then call
//! [`Orchestrator::populate`].

pub mod error;
pub mod membership;
pub mod pipeline;
pub mod populators;
pub mod profiler;
pub mod references;

pub use error::{SyncError, SyncResult};
pub use membership::contributors_to_add;
pub use pipeline::{KindReport, Orchestrator, PopulateContext, RunReport, DEFAULT_SEQUENCE};
pub use profiler::{ProfileSink, Profiler, TracingSink};
pub use references::ReferenceAssembler;

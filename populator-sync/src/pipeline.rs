//! Orchestration of a populate run.
//!
//! Kinds run one after another in [`DEFAULT_SEQUENCE`] order (or a filtered
//! subset of it); rows within a kind run one after another. Every remote call
//! is awaited before the next one starts.
//!
//! Failure policy:
//! - a row that fails is logged and counted, and the next row runs;
//! - a kind whose setup fails is marked aborted, and the next kind runs;
//! - a blank row label ends the kind's rows (sentinel, not an error);
//! - a row with no identifier, or failing its precondition, is skipped, not failed.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info, warn};

use populator_client::RemoteStore;
use populator_core::{sentinel_position, DataSource, EntityKind, NameId, SourceRow};

use crate::error::SyncResult;
use crate::populators::{
    CalloutPopulator, ChallengePopulator, GroupPopulator, OpportunityPopulator,
    OrganizationPopulator, Populator, PostPopulator, RelationPopulator, SpacePopulator,
    SpaceRolesPopulator, UserPopulator, UserRolesPopulator,
};
use crate::profiler::{ProfileSink, Profiler};

/// Dependency order of a full run.
///
/// The space is hosted by an organization, so organizations come first.
/// Groups live on the space community and users are added to the space, so
/// both follow it. Space lead users are assigned once users exist.
pub const DEFAULT_SEQUENCE: [EntityKind; 11] = [
    EntityKind::Organization,
    EntityKind::Space,
    EntityKind::Group,
    EntityKind::User,
    EntityKind::UserRoles,
    EntityKind::SpaceRoles,
    EntityKind::Challenge,
    EntityKind::Callout,
    EntityKind::Post,
    EntityKind::Opportunity,
    EntityKind::Relation,
];

/// Resolved run context handed to every populator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopulateContext {
    /// `nameID` of the target top-level space.
    pub space: NameId,
}

impl PopulateContext {
    pub fn new(space: impl Into<NameId>) -> Self {
        Self {
            space: space.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

/// Counters for one kind. `processed` counts rows before the sentinel and
/// always equals `created + updated + skipped + failed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KindReport {
    pub kind: EntityKind,
    pub processed: usize,
    pub created: usize,
    /// Existing entities that were reconciled.
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
    /// Kind-level setup failed; no row was processed.
    pub aborted: bool,
    /// A blank row ended the sheet before its last row.
    pub stopped_at_sentinel: bool,
}

impl KindReport {
    fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            processed: 0,
            created: 0,
            updated: 0,
            skipped: 0,
            failed: 0,
            aborted: false,
            stopped_at_sentinel: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub space: NameId,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub kinds: Vec<KindReport>,
}

impl RunReport {
    pub fn kind(&self, kind: EntityKind) -> Option<&KindReport> {
        self.kinds.iter().find(|k| k.kind == kind)
    }

    pub fn total_failed(&self) -> usize {
        self.kinds.iter().map(|k| k.failed).sum()
    }

    pub fn total_created(&self) -> usize {
        self.kinds.iter().map(|k| k.created).sum()
    }

    pub fn any_aborted(&self) -> bool {
        self.kinds.iter().any(|k| k.aborted)
    }
}

enum RowOutcome {
    Created,
    Updated,
    Skipped,
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

pub struct Orchestrator<'a> {
    store: &'a dyn RemoteStore,
    source: &'a dyn DataSource,
    context: PopulateContext,
    sequence: Vec<EntityKind>,
    profiler: Profiler,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        store: &'a dyn RemoteStore,
        source: &'a dyn DataSource,
        context: PopulateContext,
    ) -> Self {
        Self {
            store,
            source,
            context,
            sequence: DEFAULT_SEQUENCE.to_vec(),
            profiler: Profiler::default(),
        }
    }

    /// Replace the kind sequence outright.
    pub fn with_sequence(mut self, sequence: Vec<EntityKind>) -> Self {
        self.sequence = sequence;
        self
    }

    /// Restrict the run to `only`, keeping dependency order. An empty filter
    /// keeps every kind.
    pub fn with_only(mut self, only: &[EntityKind]) -> Self {
        if !only.is_empty() {
            self.sequence.retain(|kind| only.contains(kind));
        }
        self
    }

    pub fn with_profile_sink(mut self, sink: Arc<dyn ProfileSink>) -> Self {
        self.profiler = Profiler::new(sink);
        self
    }

    pub fn sequence(&self) -> &[EntityKind] {
        &self.sequence
    }

    /// Run every kind in sequence. Never fails: per-row and per-kind
    /// failures are logged and counted in the report.
    pub async fn populate(&self) -> RunReport {
        let started_at = Utc::now();
        info!(space = %self.context.space, kinds = self.sequence.len(), "populate started");

        let mut kinds = Vec::with_capacity(self.sequence.len());
        for kind in &self.sequence {
            kinds.push(self.populate_kind(*kind).await);
        }

        let report = RunReport {
            space: self.context.space.clone(),
            started_at,
            finished_at: Utc::now(),
            kinds,
        };
        info!(
            space = %report.space,
            created = report.total_created(),
            failed = report.total_failed(),
            "populate finished"
        );
        report
    }

    async fn populate_kind(&self, kind: EntityKind) -> KindReport {
        let store = self.store;
        let context = &self.context;
        match kind {
            EntityKind::Organization => self.run(OrganizationPopulator::new(store)).await,
            EntityKind::Space => self.run(SpacePopulator::new(store)).await,
            EntityKind::Group => self.run(GroupPopulator::new(store, context)).await,
            EntityKind::User => self.run(UserPopulator::new(store, context)).await,
            EntityKind::UserRoles => self.run(UserRolesPopulator::new(store, context)).await,
            EntityKind::SpaceRoles => self.run(SpaceRolesPopulator::new(store)).await,
            EntityKind::Challenge => self.run(ChallengePopulator::new(store, context)).await,
            EntityKind::Callout => self.run(CalloutPopulator::new(store, context)).await,
            EntityKind::Post => self.run(PostPopulator::new(store, context)).await,
            EntityKind::Opportunity => self.run(OpportunityPopulator::new(store, context)).await,
            EntityKind::Relation => self.run(RelationPopulator::new(store, context)).await,
        }
    }

    async fn run<P: Populator>(&self, mut populator: P) -> KindReport {
        let kind = P::KIND;
        let mut report = KindReport::new(kind);
        let mut rows = populator.rows(self.source);

        if let Some(end) = sentinel_position(&rows) {
            warn!(
                %kind,
                row = end + 1,
                ignored = rows.len() - end,
                "blank row; rest of sheet ignored"
            );
            report.stopped_at_sentinel = true;
            rows.truncate(end);
        }
        if rows.is_empty() {
            warn!(%kind, "no {kind} rows to import");
            return report;
        }

        if let Err(err) = populator.prepare().await {
            error!(%kind, error = %err, "setup failed; kind aborted");
            report.aborted = true;
            return report;
        }

        info!(%kind, rows = rows.len(), "processing");
        for (index, row) in rows.iter().enumerate() {
            report.processed += 1;
            let label = format!("{kind}:{}", row.key());
            let outcome = self.profiler.time(&label, process_row(&populator, row)).await;
            match outcome {
                Ok(RowOutcome::Created) => report.created += 1,
                Ok(RowOutcome::Updated) => report.updated += 1,
                Ok(RowOutcome::Skipped) => report.skipped += 1,
                Err(err) => {
                    error!(%kind, row = index + 1, key = row.key(), error = %err, "row failed");
                    report.failed += 1;
                }
            }
        }
        info!(
            %kind,
            created = report.created,
            updated = report.updated,
            skipped = report.skipped,
            failed = report.failed,
            "done"
        );
        report
    }
}

/// Drive one row through resolve, create or update, visuals and roles.
async fn process_row<P: Populator>(populator: &P, row: &P::Row) -> SyncResult<RowOutcome> {
    let kind = P::KIND;
    if row.key().trim().is_empty() {
        warn!(%kind, label = row.label(), "row has no identifier; skipped");
        return Ok(RowOutcome::Skipped);
    }
    if let Some(reason) = populator.precondition(row) {
        warn!(%kind, key = row.key(), reason, "row skipped");
        return Ok(RowOutcome::Skipped);
    }

    let (entity, outcome) = match populator.resolve(row).await? {
        Some(existing) => (populator.update(&existing, row).await?, RowOutcome::Updated),
        None if P::CREATES_MISSING => (populator.create(row).await?, RowOutcome::Created),
        None => {
            warn!(%kind, key = row.key(), "not found; skipped");
            return Ok(RowOutcome::Skipped);
        }
    };

    populator.reconcile_visuals(&entity, row).await?;
    populator.reconcile_roles(&entity, row).await?;
    Ok(outcome)
}

//! `populator inspect`: offline workbook summary.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use populator_core::{sentinel_position, DataSource, EntityKind, SourceRow, Workbook};
use populator_sync::DEFAULT_SEQUENCE;

use super::WorkbookArg;

/// Arguments for `populator inspect`.
#[derive(Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub workbook: WorkbookArg,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl InspectArgs {
    pub fn run(self) -> Result<()> {
        let workbook = self.workbook.load()?;
        let summaries = summarize(&workbook);
        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&summaries).context("failed to serialize summary")?
            );
        } else {
            let path = workbook.path().unwrap_or(self.workbook.workbook.as_path());
            print_table(&path.display().to_string(), summaries);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Tabled)]
struct KindSummary {
    #[tabled(rename = "kind")]
    kind: EntityKind,
    #[tabled(rename = "sheet")]
    sheet: &'static str,
    /// Rows before the first blank label.
    #[tabled(rename = "rows")]
    rows: usize,
    /// Rows after the first blank label, never processed.
    #[tabled(rename = "ignored")]
    ignored: usize,
    /// Rows that will be skipped for a missing parent reference.
    #[tabled(rename = "missing parent")]
    missing_parent: usize,
}

fn summarize(workbook: &Workbook) -> Vec<KindSummary> {
    DEFAULT_SEQUENCE
        .iter()
        .map(|kind| match kind {
            EntityKind::Space | EntityKind::SpaceRoles => {
                count(*kind, &workbook.spaces(), |_| false)
            }
            EntityKind::Organization => count(*kind, &workbook.organizations(), |_| false),
            EntityKind::Group => count(*kind, &workbook.groups(), |_| false),
            EntityKind::User | EntityKind::UserRoles => count(*kind, &workbook.users(), |_| false),
            EntityKind::Challenge => count(*kind, &workbook.challenges(), |_| false),
            EntityKind::Callout => {
                count(*kind, &workbook.callouts(), |row| row.challenge.is_empty())
            }
            EntityKind::Post => count(*kind, &workbook.posts(), |row| {
                row.challenge.is_empty() || row.callout.is_empty()
            }),
            EntityKind::Opportunity => {
                count(*kind, &workbook.opportunities(), |row| row.challenge.is_empty())
            }
            EntityKind::Relation => {
                count(*kind, &workbook.relations(), |row| row.opportunity.is_empty())
            }
        })
        .collect()
}

fn count<R: SourceRow>(kind: EntityKind, rows: &[R], missing_parent: impl Fn(&R) -> bool) -> KindSummary {
    let usable = sentinel_position(rows).unwrap_or(rows.len());
    KindSummary {
        kind,
        sheet: kind.sheet(),
        rows: usable,
        ignored: rows.len() - usable,
        missing_parent: rows[..usable].iter().filter(|row| missing_parent(row)).count(),
    }
}

fn print_table(path: &str, summaries: Vec<KindSummary>) {
    println!("Workbook {path}");
    let mut table = Table::new(summaries);
    table.with(Style::rounded());
    println!("{table}");
}

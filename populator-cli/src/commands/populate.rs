//! `populator populate`: run the reconciliation engine against the server.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};
use tracing::info;

use populator_client::config::{DEFAULT_GRAPHQL_ENDPOINT, DEFAULT_KRATOS_PUBLIC_URL};
use populator_client::{ClientConfig, Credentials, GraphqlStore};
use populator_core::EntityKind;
use populator_sync::{Orchestrator, PopulateContext, RunReport};

use super::WorkbookArg;

/// Server and identity settings.
#[derive(Args, Debug)]
pub struct ConnectionArgs {
    /// GraphQL endpoint of the server.
    #[arg(long, env = "API_ENDPOINT_PRIVATE_GRAPHQL", default_value = DEFAULT_GRAPHQL_ENDPOINT)]
    pub graphql_endpoint: String,

    /// Public base URL of the Ory Kratos identity service.
    #[arg(long, env = "AUTH_ORY_KRATOS_PUBLIC_BASE_URL", default_value = DEFAULT_KRATOS_PUBLIC_URL)]
    pub kratos_url: String,

    #[arg(long, env = "AUTH_ADMIN_EMAIL", default_value = "admin@alkem.io")]
    pub admin_email: String,

    #[arg(long, env = "AUTH_ADMIN_PASSWORD", default_value = "test", hide_env_values = true)]
    pub admin_password: String,

    /// nameID of the space to populate.
    #[arg(long, env = "SPACE_NAME_ID")]
    pub space: String,
}

impl ConnectionArgs {
    fn client_config(&self) -> ClientConfig {
        ClientConfig::new(
            self.graphql_endpoint.clone(),
            Credentials {
                email: self.admin_email.clone(),
                password: self.admin_password.clone(),
            },
        )
        .with_kratos_public_url(self.kratos_url.clone())
    }
}

/// Arguments for `populator populate`.
#[derive(Args, Debug)]
pub struct PopulateArgs {
    #[command(flatten)]
    pub workbook: WorkbookArg,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Only populate these kinds (comma separated), still in dependency order.
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<EntityKind>,

    /// Print the run report as JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

impl PopulateArgs {
    pub fn run(self) -> Result<()> {
        let workbook = self.workbook.load()?;
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .context("failed to start async runtime")?;
        let report = runtime.block_on(self.populate(&workbook))?;

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&report).context("failed to serialize run report")?
            );
        } else {
            print_table(&report);
        }
        Ok(())
    }

    async fn populate(&self, workbook: &populator_core::Workbook) -> Result<RunReport> {
        let config = self.connection.client_config();
        let store = GraphqlStore::connect(&config)
            .await
            .with_context(|| format!("login to {} failed", config.kratos_public_url))?;
        info!(workbook = %self.workbook.workbook.display(), "workbook loaded");

        let context = PopulateContext::new(self.connection.space.as_str());
        let report = Orchestrator::new(&store, workbook, context)
            .with_only(&self.only)
            .populate()
            .await;
        Ok(report)
    }
}

#[derive(Tabled)]
struct KindTableRow {
    #[tabled(rename = "kind")]
    kind: String,
    #[tabled(rename = "rows")]
    processed: usize,
    #[tabled(rename = "created")]
    created: usize,
    #[tabled(rename = "updated")]
    updated: usize,
    #[tabled(rename = "skipped")]
    skipped: usize,
    #[tabled(rename = "failed")]
    failed: usize,
    #[tabled(rename = "note")]
    note: String,
}

fn print_table(report: &RunReport) {
    println!(
        "Populator v{} | space {} | {} created | {} failed",
        env!("CARGO_PKG_VERSION"),
        report.space,
        report.total_created(),
        report.total_failed(),
    );
    let rows: Vec<KindTableRow> = report
        .kinds
        .iter()
        .map(|k| KindTableRow {
            kind: k.kind.to_string(),
            processed: k.processed,
            created: k.created,
            updated: k.updated,
            skipped: k.skipped,
            failed: k.failed,
            note: if k.aborted {
                "aborted".red().to_string()
            } else if k.stopped_at_sentinel {
                "stopped at blank row".yellow().to_string()
            } else {
                String::new()
            },
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");

    if report.total_failed() > 0 || report.any_aborted() {
        println!("{}", "Some rows failed; see the log for details.".yellow());
    }
}

//! Populator: load a workbook of entities into a remote space.
//!
//! # Usage
//!
//! ```text
//! populator populate [WORKBOOK] [--only kind,...] [--json]
//! populator inspect  [WORKBOOK] [--json]
//! ```
//!
//! Connection settings come from flags or the environment (a `.env` file in
//! the working directory is loaded first): `API_ENDPOINT_PRIVATE_GRAPHQL`,
//! `AUTH_ORY_KRATOS_PUBLIC_BASE_URL`, `AUTH_ADMIN_EMAIL`,
//! `AUTH_ADMIN_PASSWORD`, `SPACE_NAME_ID`, `POPULATOR_WORKBOOK`.

mod commands;
mod logging;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{inspect::InspectArgs, populate::PopulateArgs};
use logging::LogArgs;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "populator",
    version,
    about = "Create and reconcile spaces, organizations, users and challenges from a workbook",
    long_about = None,
)]
struct Cli {
    #[command(flatten)]
    log: LogArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create missing entities and reconcile existing ones.
    Populate(PopulateArgs),

    /// Summarise a workbook offline, without contacting the server.
    Inspect(InspectArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    // A missing .env is fine; the environment may already be set.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    logging::init(&cli.log);
    match cli.command {
        Commands::Populate(args) => args.run(),
        Commands::Inspect(args) => args.run(),
    }
}

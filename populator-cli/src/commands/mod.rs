pub mod inspect;
pub mod populate;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use populator_core::Workbook;

/// Workbook location shared by every subcommand.
#[derive(Args, Debug)]
pub struct WorkbookArg {
    /// Workbook file (YAML or JSON).
    #[arg(env = "POPULATOR_WORKBOOK", default_value = "alkemio-populator.yaml")]
    pub workbook: PathBuf,
}

impl WorkbookArg {
    pub fn load(&self) -> Result<Workbook> {
        load_workbook(&self.workbook)
    }
}

fn load_workbook(path: &Path) -> Result<Workbook> {
    Workbook::load(path).with_context(|| format!("failed to load workbook {}", path.display()))
}

//! `shipyard rename <id> <new-name>` — rename across all three stores.

use anyhow::{Context, Result};
use clap::Args;

use shipyard_core::types::AppId;

use super::super::WorkspaceArgs;

/// Arguments for `shipyard rename`.
#[derive(Args, Debug)]
pub struct RenameArgs {
    /// Catalog id of the application (see `shipyard list`).
    pub id: i64,

    /// New application name.
    pub new_name: String,

    #[command(flatten)]
    pub workspace: WorkspaceArgs,
}

impl RenameArgs {
    pub fn run(self) -> Result<()> {
        let manager = self.workspace.bootstrap()?;
        let record = manager
            .rename(AppId(self.id), &self.new_name)
            .with_context(|| format!("failed to rename application {}", self.id))?;

        println!("✓ Renamed application {} to '{}'", record.id, record.app_name);
        Ok(())
    }
}

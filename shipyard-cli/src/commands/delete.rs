//! `shipyard delete <id>` — remove an application from all three stores.

use anyhow::{Context, Result};
use clap::Args;

use shipyard_core::types::AppId;

use super::super::WorkspaceArgs;

/// Arguments for `shipyard delete`.
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Catalog id of the application (see `shipyard list`).
    pub id: i64,

    #[command(flatten)]
    pub workspace: WorkspaceArgs,
}

impl DeleteArgs {
    pub fn run(self) -> Result<()> {
        let manager = self.workspace.bootstrap()?;
        let record = manager
            .delete(AppId(self.id))
            .with_context(|| format!("failed to delete application {}", self.id))?;

        println!("✓ Deleted '{}'", record.app_name);
        Ok(())
    }
}

//! `shipyard create <name>` — register an application and scaffold its chart.

use anyhow::{Context, Result};
use clap::Args;

use super::super::WorkspaceArgs;

/// Arguments for `shipyard create`.
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Application name (also used as the repository name).
    pub name: String,

    #[command(flatten)]
    pub workspace: WorkspaceArgs,
}

impl CreateArgs {
    pub fn run(self) -> Result<()> {
        let manager = self.workspace.bootstrap()?;
        let record = manager
            .create(&self.name)
            .with_context(|| format!("failed to create application '{}'", self.name))?;

        println!("✓ Created '{}' (id {})", record.app_name, record.id);
        println!(
            "  Chart: {}",
            shipyard_assets::tree::chart_dir(&manager.workspace().apps_dir, record.app_name.as_str())
                .display()
        );
        Ok(())
    }
}

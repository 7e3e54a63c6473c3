//! `shipyard list` — show registered applications, newest first.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use shipyard_core::types::AppRecord;

use super::super::WorkspaceArgs;

/// Arguments for `shipyard list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub workspace: WorkspaceArgs,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Tabled)]
struct ListTableRow {
    #[tabled(rename = "id")]
    id: i64,
    #[tabled(rename = "application")]
    application: String,
    #[tabled(rename = "repository")]
    repository: String,
    #[tabled(rename = "created")]
    created: String,
}

impl ListArgs {
    pub fn run(self) -> Result<()> {
        let manager = self.workspace.bootstrap()?;
        let records = manager.list().context("failed to list applications")?;

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&records).context("failed to serialize list JSON")?
            );
            return Ok(());
        }

        println!(
            "Shipyard v{} | {} application(s)",
            env!("CARGO_PKG_VERSION"),
            records.len()
        );
        if records.is_empty() {
            println!("No applications registered.");
            println!("Run: shipyard create <name>");
            return Ok(());
        }

        let rows: Vec<ListTableRow> = records.iter().map(row).collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");
        Ok(())
    }
}

fn row(record: &AppRecord) -> ListTableRow {
    ListTableRow {
        id: record.id.0,
        application: record.app_name.to_string().bold().to_string(),
        repository: record.repo_name.clone(),
        created: record.created_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    }
}

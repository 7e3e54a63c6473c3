//! Shipyard — GitOps application catalog CLI.
//!
//! # Usage
//!
//! ```text
//! shipyard list [--json] [--root <dir>]
//! shipyard create <name> [--root <dir>] [--image-namespace <ns>]
//! shipyard rename <id> <new-name> [--root <dir>]
//! shipyard delete <id> [--root <dir>]
//! ```
//!
//! Every invocation bootstraps the workspace: the catalog is rebuilt from
//! scratch and reconciled against the manifest + asset tree before the
//! command runs.

mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use commands::{create::CreateArgs, delete::DeleteArgs, list::ListArgs, rename::RenameArgs};
use shipyard_sync::{workspace, Manager, Workspace};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "shipyard",
    version,
    about = "Keep the application catalog, generator manifest, and chart directories in sync",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List registered applications, newest first.
    List(ListArgs),

    /// Register a new application and scaffold its chart from the template.
    Create(CreateArgs),

    /// Rename an application across all three stores.
    Rename(RenameArgs),

    /// Remove an application from all three stores.
    Delete(DeleteArgs),
}

// ---------------------------------------------------------------------------
// Shared workspace flags — map one-to-one onto `Workspace` fields
// ---------------------------------------------------------------------------

#[derive(Args, Debug)]
pub struct WorkspaceArgs {
    /// Workspace root containing apps/ and applicationsets/.
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Generator manifest file. Defaults to <root>/applicationsets/uat-apps.yaml.
    #[arg(long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Apps directory. Defaults to <root>/apps.
    #[arg(long, value_name = "DIR")]
    pub apps_dir: Option<PathBuf>,

    /// Template application used as the copy source for new applications.
    #[arg(long, default_value = workspace::DEFAULT_TEMPLATE_APP)]
    pub template_app: String,

    /// Image registry namespace written into values.yaml.
    #[arg(long, default_value = workspace::DEFAULT_IMAGE_NAMESPACE)]
    pub image_namespace: String,
}

impl WorkspaceArgs {
    fn to_workspace(&self) -> Workspace {
        let mut ws = Workspace::new(&self.root);
        if let Some(manifest) = &self.manifest {
            ws.manifest_path = manifest.clone();
        }
        if let Some(apps_dir) = &self.apps_dir {
            ws.apps_dir = apps_dir.clone();
        }
        ws.template_app = self.template_app.clone();
        ws.image_namespace = self.image_namespace.clone();
        ws
    }

    /// Fresh catalog + reconciliation, then hand back the manager.
    pub fn bootstrap(&self) -> Result<Manager> {
        let ws = self.to_workspace();
        Manager::bootstrap(ws)
            .with_context(|| format!("failed to bootstrap workspace at '{}'", self.root.display()))
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::List(args) => args.run(),
        Commands::Create(args) => args.run(),
        Commands::Rename(args) => args.run(),
        Commands::Delete(args) => args.run(),
    }
}

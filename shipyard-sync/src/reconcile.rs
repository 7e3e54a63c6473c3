//! Startup reconciliation: re-derive catalog entries from the manifest and
//! the asset tree.
//!
//! The catalog is rebuilt empty before this runs. An element earns a catalog
//! record only when it is not the template application and its asset
//! directory actually exists; elements without a directory are stale
//! manifest entries, skipped rather than treated as errors.

use shipyard_assets::tree;
use shipyard_core::Catalog;
use shipyard_manifest::store;

use crate::error::SyncError;
use crate::workspace::Workspace;

/// Populate `catalog` from the manifest element list. Returns how many
/// records were inserted.
///
/// Errors are returned to the bootstrap boundary, where they are logged and
/// reconciliation is abandoned for the run; see [`crate::Manager::bootstrap`].
pub fn reconcile(catalog: &Catalog, workspace: &Workspace) -> Result<usize, SyncError> {
    let manifest = store::load(&workspace.manifest_path)?;
    let mut inserted = 0;
    for element in manifest.elements()? {
        if element.app == workspace.template_app {
            continue;
        }
        if catalog.find_by_name(&element.app)?.is_some() {
            continue;
        }
        if !tree::exists(&workspace.apps_dir, &element.app) {
            tracing::debug!(app = %element.app, "stale manifest element; no asset directory");
            continue;
        }
        catalog.insert(&element.app, &element.repo)?;
        tracing::info!(app = %element.app, "reconciled application into catalog");
        inserted += 1;
    }
    Ok(inserted)
}

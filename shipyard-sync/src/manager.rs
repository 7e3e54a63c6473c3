//! Mutation coordinator for the three application stores.
//!
//! Every operation applies its steps in a fixed order — catalog, manifest,
//! filesystem for create; manifest, filesystem, catalog for rename and
//! delete — and unwinds already-completed steps best-effort when a later
//! step fails. Unwind failures are logged, never masked: the caller always
//! sees the first failing step's error.
//!
//! Steps stay individually idempotent (skip-on-add, filter-on-remove,
//! overwrite-on-scaffold), so retrying a reported failure is safe.

use shipyard_assets::tree;
use shipyard_core::error::CatalogError;
use shipyard_core::types::{AppId, AppRecord};
use shipyard_core::Catalog;
use shipyard_manifest::{store, ManifestError};

use crate::error::SyncError;
use crate::reconcile;
use crate::workspace::Workspace;

/// Coordinator over catalog, manifest, and asset tree.
///
/// Single-writer: operations are synchronous, blocking, and expected to run
/// one at a time. Nothing here locks across the three stores.
pub struct Manager {
    catalog: Catalog,
    workspace: Workspace,
}

impl Manager {
    /// Open a fresh catalog (prior records discarded) and reconcile it from
    /// the manifest + asset tree.
    ///
    /// Reconciliation failure is non-fatal: it is logged, the catalog stays
    /// empty, and the manager still comes up — mutation operations will then
    /// surface the underlying problem themselves.
    pub fn bootstrap(workspace: Workspace) -> Result<Self, SyncError> {
        let catalog = Catalog::open(&workspace.catalog_path())?;
        Ok(Self::reconciled(catalog, workspace))
    }

    /// [`Manager::bootstrap`] against an in-memory catalog; for callers that
    /// never need the database file (tests, one-shot queries).
    pub fn bootstrap_in_memory(workspace: Workspace) -> Result<Self, SyncError> {
        let catalog = Catalog::open_in_memory()?;
        Ok(Self::reconciled(catalog, workspace))
    }

    fn reconciled(catalog: Catalog, workspace: Workspace) -> Self {
        let manager = Manager { catalog, workspace };
        match reconcile::reconcile(&manager.catalog, &manager.workspace) {
            Ok(count) => tracing::info!(applications = count, "catalog reconciled"),
            Err(err) => {
                tracing::warn!(error = %err, "reconciliation abandoned; catalog left empty");
            }
        }
        manager
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// All catalog records, newest-created first.
    pub fn list(&self) -> Result<Vec<AppRecord>, SyncError> {
        Ok(self.catalog.list()?)
    }

    // -----------------------------------------------------------------------
    // create
    // -----------------------------------------------------------------------

    /// Register a new application across all three stores.
    ///
    /// Steps: catalog insert (uniqueness gate — a duplicate fails here and
    /// mutates nothing else), manifest element + save, asset tree scaffold.
    pub fn create(&self, app_name: &str) -> Result<AppRecord, SyncError> {
        let name = self.validated_name(app_name)?;
        let record = self.catalog.insert(name, name).map_err(|e| match e {
            CatalogError::Duplicate { name } => SyncError::Duplicate { name },
            other => SyncError::Catalog(other),
        })?;

        if let Err(err) = self.create_manifest_and_assets(name) {
            if let Err(unwind) = self.catalog.delete(record.id) {
                tracing::warn!(app = %name, error = %unwind, "failed to unwind catalog record");
            }
            return Err(err);
        }

        tracing::info!(app = %name, id = %record.id, "application created");
        Ok(record)
    }

    fn create_manifest_and_assets(&self, name: &str) -> Result<(), SyncError> {
        let mut manifest = store::load(&self.workspace.manifest_path)?;
        let added = manifest.add_element(name, name)?;
        store::save(&manifest, &self.workspace.manifest_path)?;

        let dir_existed = tree::exists(&self.workspace.apps_dir, name);
        if let Err(err) = tree::scaffold(
            &self.workspace.apps_dir,
            &self.workspace.template_app,
            name,
            &self.workspace.image_namespace,
        ) {
            if added {
                self.unwind_remove_element(name);
            }
            // Only clear the target directory when this operation created it;
            // a pre-existing tree is someone else's data.
            if !dir_existed {
                if let Err(unwind) = tree::remove(&self.workspace.apps_dir, name) {
                    tracing::warn!(app = %name, error = %unwind, "failed to unwind asset directory");
                }
            }
            return Err(err.into());
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // rename
    // -----------------------------------------------------------------------

    /// Rename an application. The manifest models this as remove-old +
    /// add-new (saved once); the asset directory moves only when the name
    /// actually changed, but the chart name field is rewritten either way.
    ///
    /// Order: manifest, then filesystem, then catalog.
    pub fn rename(&self, id: AppId, new_app_name: &str) -> Result<AppRecord, SyncError> {
        let new_name = self.validated_name(new_app_name)?;
        let old = self.catalog.get(id)?.ok_or(SyncError::NotFound { id })?;
        let old_name = old.app_name.as_str();

        // Uniqueness gate up front, before any store is touched.
        if new_name != old_name && self.catalog.find_by_name(new_name)?.is_some() {
            return Err(SyncError::Duplicate {
                name: new_name.to_string(),
            });
        }

        let mut manifest = store::load(&self.workspace.manifest_path)?;
        let removed = manifest.remove_element(old_name)?;
        let added = manifest.add_element(new_name, new_name)?;
        store::save(&manifest, &self.workspace.manifest_path)?;

        let mut moved = false;
        let fs_result = (|| -> Result<(), SyncError> {
            if old_name != new_name {
                tree::rename(&self.workspace.apps_dir, old_name, new_name)?;
                moved = true;
            }
            tree::set_chart_name(&self.workspace.apps_dir, new_name)?;
            Ok(())
        })();
        if let Err(err) = fs_result {
            self.unwind_rename(&old, new_name, removed, added, moved);
            return Err(err);
        }

        if let Err(err) = self.catalog.update_name(id, new_name) {
            self.unwind_rename(&old, new_name, removed, added, moved);
            return Err(err.into());
        }

        tracing::info!(id = %id, old = %old_name, new = %new_name, "application renamed");
        self.catalog
            .get(id)?
            .ok_or(SyncError::NotFound { id })
    }

    fn unwind_rename(
        &self,
        old: &AppRecord,
        new_name: &str,
        removed: bool,
        added: bool,
        moved: bool,
    ) {
        if moved {
            if let Err(err) = tree::rename(&self.workspace.apps_dir, new_name, old.app_name.as_str())
            {
                tracing::warn!(error = %err, "failed to move asset directory back");
            } else if let Err(err) = tree::set_chart_name(&self.workspace.apps_dir, old.app_name.as_str()) {
                tracing::warn!(error = %err, "failed to restore chart name");
            }
        }
        let result: Result<(), ManifestError> = (|| {
            let mut manifest = store::load(&self.workspace.manifest_path)?;
            if added {
                manifest.remove_element(new_name)?;
            }
            if removed {
                manifest.add_element(old.app_name.as_str(), &old.repo_name)?;
            }
            store::save(&manifest, &self.workspace.manifest_path)
        })();
        if let Err(err) = result {
            tracing::warn!(error = %err, "failed to restore manifest after aborted rename");
        }
    }

    // -----------------------------------------------------------------------
    // delete
    // -----------------------------------------------------------------------

    /// Remove an application from all three stores.
    ///
    /// Order: manifest, then filesystem, then catalog. A catalog failure
    /// after the directory is gone gets no compensation; the catalog is
    /// rebuilt from the other two stores at next bootstrap anyway.
    pub fn delete(&self, id: AppId) -> Result<AppRecord, SyncError> {
        let record = self.catalog.get(id)?.ok_or(SyncError::NotFound { id })?;
        let name = record.app_name.as_str();

        let mut manifest = store::load(&self.workspace.manifest_path)?;
        let removed = manifest.remove_element(name)?;
        store::save(&manifest, &self.workspace.manifest_path)?;

        if let Err(err) = tree::remove(&self.workspace.apps_dir, name) {
            if removed {
                self.unwind_restore_element(&record);
            }
            return Err(err.into());
        }

        self.catalog.delete(id)?;
        tracing::info!(app = %name, id = %id, "application deleted");
        Ok(record)
    }

    // -----------------------------------------------------------------------
    // Unwind helpers (best-effort, log on failure)
    // -----------------------------------------------------------------------

    fn unwind_remove_element(&self, name: &str) {
        let result: Result<(), ManifestError> = (|| {
            let mut manifest = store::load(&self.workspace.manifest_path)?;
            manifest.remove_element(name)?;
            store::save(&manifest, &self.workspace.manifest_path)
        })();
        if let Err(err) = result {
            tracing::warn!(app = %name, error = %err, "failed to unwind manifest element");
        }
    }

    fn unwind_restore_element(&self, record: &AppRecord) {
        let result: Result<(), ManifestError> = (|| {
            let mut manifest = store::load(&self.workspace.manifest_path)?;
            manifest.add_element(record.app_name.as_str(), &record.repo_name)?;
            store::save(&manifest, &self.workspace.manifest_path)
        })();
        if let Err(err) = result {
            tracing::warn!(app = %record.app_name, error = %err, "failed to restore manifest element");
        }
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    /// `app_name` doubles as a directory name and a manifest key, so it must
    /// be a plain path component; the template application's name is
    /// reserved (scaffolding it onto itself would destroy the copy source).
    fn validated_name<'a>(&self, app_name: &'a str) -> Result<&'a str, SyncError> {
        let name = app_name.trim();
        if name.is_empty() {
            return Err(SyncError::InvalidName {
                name: name.to_string(),
                reason: "must not be empty",
            });
        }
        if name.contains(['/', '\\']) || name.starts_with('.') {
            return Err(SyncError::InvalidName {
                name: name.to_string(),
                reason: "must be a plain directory name",
            });
        }
        if name == self.workspace.template_app {
            return Err(SyncError::InvalidName {
                name: name.to_string(),
                reason: "reserved for the template application",
            });
        }
        Ok(name)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

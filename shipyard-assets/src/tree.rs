//! Asset tree layout and lifecycle: scaffold, rename, remove.
//!
//! Layout per application:
//!
//! ```text
//! <apps_dir>/
//!   <app>/
//!     uat/
//!       Chart.yaml        (name + description rewritten)
//!       values.yaml       (image.repository rewritten)
//!       templates/
//!         namespace.yaml  (copied byte-for-byte)
//!         service.yaml
//!         deployment.yaml
//! ```

use std::path::{Path, PathBuf};

use crate::chart::{self, ChartMeta, Values};
use crate::error::{io_err, AssetError};

/// Environment subdirectory every chart lives under.
pub const ENVIRONMENT: &str = "uat";

/// The template files cloned unchanged into every new application.
/// This set is a contract with the template application, not discovered.
pub const TEMPLATE_FILES: &[&str] = &["namespace.yaml", "service.yaml", "deployment.yaml"];

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

/// `<apps_dir>/<app>/`
pub fn app_dir(apps_dir: &Path, app: &str) -> PathBuf {
    apps_dir.join(app)
}

/// `<apps_dir>/<app>/uat/`
pub fn chart_dir(apps_dir: &Path, app: &str) -> PathBuf {
    apps_dir.join(app).join(ENVIRONMENT)
}

fn chart_meta_path(apps_dir: &Path, app: &str) -> PathBuf {
    chart_dir(apps_dir, app).join("Chart.yaml")
}

fn values_path(apps_dir: &Path, app: &str) -> PathBuf {
    chart_dir(apps_dir, app).join("values.yaml")
}

/// Whether an application directory exists under the apps tree.
pub fn exists(apps_dir: &Path, app: &str) -> bool {
    app_dir(apps_dir, app).exists()
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// Clone the template application into a directory for `app`.
///
/// Chart name/description and the image repository are rewritten; the
/// template files are copied unchanged. Re-scaffolding an existing directory
/// overwrites the managed files in place.
pub fn scaffold(
    apps_dir: &Path,
    template_app: &str,
    app: &str,
    image_namespace: &str,
) -> Result<(), AssetError> {
    let source = chart_dir(apps_dir, template_app);
    let target = chart_dir(apps_dir, app);
    let target_templates = target.join("templates");
    std::fs::create_dir_all(&target_templates).map_err(|e| io_err(&target_templates, e))?;

    let mut meta: ChartMeta = chart::read(&source.join("Chart.yaml"))?;
    meta.name = app.to_string();
    meta.description = Some(format!("A Helm chart for {app}"));
    chart::write(&meta, &chart_meta_path(apps_dir, app))?;

    let mut values: Values = chart::read(&source.join("values.yaml"))?;
    values.image.repository = format!("{image_namespace}/{app}");
    chart::write(&values, &values_path(apps_dir, app))?;

    for file in TEMPLATE_FILES {
        let from = source.join("templates").join(file);
        let to = target_templates.join(file);
        std::fs::copy(&from, &to).map_err(|e| io_err(&from, e))?;
    }
    Ok(())
}

/// Move an application directory to a new name.
///
/// Skipped silently when the old directory does not exist; the asset tree is
/// best-effort and may lag the catalog. The chart name is not touched here;
/// use [`set_chart_name`].
pub fn rename(apps_dir: &Path, old_app: &str, new_app: &str) -> Result<(), AssetError> {
    let old_dir = app_dir(apps_dir, old_app);
    if !old_dir.exists() {
        return Ok(());
    }
    let new_dir = app_dir(apps_dir, new_app);
    std::fs::rename(&old_dir, &new_dir).map_err(|e| io_err(&old_dir, e))
}

/// Rewrite the chart metadata `name` field in place.
///
/// No-op when the application has no chart metadata file.
pub fn set_chart_name(apps_dir: &Path, app: &str) -> Result<(), AssetError> {
    let path = chart_meta_path(apps_dir, app);
    if !path.exists() {
        return Ok(());
    }
    let mut meta: ChartMeta = chart::read(&path)?;
    meta.name = app.to_string();
    chart::write(&meta, &path)
}

/// Remove an application directory recursively. Returns whether a directory
/// was actually removed.
pub fn remove(apps_dir: &Path, app: &str) -> Result<bool, AssetError> {
    let dir = app_dir(apps_dir, app);
    if !dir.exists() {
        return Ok(false);
    }
    std::fs::remove_dir_all(&dir).map_err(|e| io_err(&dir, e))?;
    Ok(true)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

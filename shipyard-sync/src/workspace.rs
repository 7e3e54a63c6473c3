//! Workspace layout — where the three stores live on disk.
//!
//! ```text
//! <root>/
//!   applicationsets/uat-apps.yaml   (generator manifest)
//!   apps/<app>/uat/...              (asset tree, one dir per application)
//!   apps/<template-app>/uat/...     (template application, copy source)
//!   .shipyard/catalog.db            (catalog; rebuilt at every bootstrap)
//! ```

use std::path::PathBuf;

/// Resolved paths and settings for one workspace root.
///
/// All fields are public: callers construct via [`Workspace::new`] and
/// override individual fields (CLI flags map onto them one-to-one).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    pub root: PathBuf,
    /// The generator manifest file.
    pub manifest_path: PathBuf,
    /// Directory holding one subdirectory per application.
    pub apps_dir: PathBuf,
    /// Name of the template application; excluded from reconciliation and
    /// used as the copy source for every create.
    pub template_app: String,
    /// Image registry namespace; `image.repository` becomes
    /// `<image_namespace>/<app>`.
    pub image_namespace: String,
}

pub const DEFAULT_TEMPLATE_APP: &str = "example-app";
pub const DEFAULT_IMAGE_NAMESPACE: &str = "library";

impl Workspace {
    /// Conventional layout under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Workspace {
            manifest_path: root.join("applicationsets").join("uat-apps.yaml"),
            apps_dir: root.join("apps"),
            template_app: DEFAULT_TEMPLATE_APP.to_string(),
            image_namespace: DEFAULT_IMAGE_NAMESPACE.to_string(),
            root,
        }
    }

    /// `<root>/.shipyard/catalog.db`
    pub fn catalog_path(&self) -> PathBuf {
        self.root.join(".shipyard").join("catalog.db")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conventional_layout() {
        let ws = Workspace::new("/srv/deploy");
        assert_eq!(
            ws.manifest_path,
            PathBuf::from("/srv/deploy/applicationsets/uat-apps.yaml")
        );
        assert_eq!(ws.apps_dir, PathBuf::from("/srv/deploy/apps"));
        assert_eq!(
            ws.catalog_path(),
            PathBuf::from("/srv/deploy/.shipyard/catalog.db")
        );
        assert_eq!(ws.template_app, "example-app");
    }
}

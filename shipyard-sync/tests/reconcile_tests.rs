//! Startup reconciliation: the catalog is a projection rebuilt from the
//! manifest element list intersected with the asset tree.

use assert_fs::prelude::*;
use predicates::prelude::predicate;

use shipyard_sync::{Manager, Workspace};

const MANIFEST: &str = r#"
apiVersion: argoproj.io/v1alpha1
kind: ApplicationSet
metadata:
  name: uat-apps
spec:
  generators:
    - matrix:
        generators:
          - list:
              elements:
                - app: example-app
                  repo: example-app
                - app: svc-a
                  repo: svc-a
                - app: svc-b
                  repo: svc-b
          - pullRequest:
              github:
                owner: shipyard-demo
                repo: '{{ .repo }}'
"#;

/// Manifest with svc-a and svc-b elements, but an asset directory only for
/// svc-a (and the template application).
fn seed(root: &assert_fs::TempDir) -> Workspace {
    let ws = Workspace::new(root.path());
    root.child("applicationsets/uat-apps.yaml")
        .write_str(MANIFEST)
        .expect("manifest");
    root.child("apps/example-app/uat/Chart.yaml")
        .write_str("apiVersion: v2\nname: example-app\n")
        .expect("template chart");
    root.child("apps/svc-a/uat/Chart.yaml")
        .write_str("apiVersion: v2\nname: svc-a\n")
        .expect("svc-a chart");
    ws
}

#[test]
fn reconcile_skips_elements_without_a_directory() {
    let root = assert_fs::TempDir::new().expect("tempdir");
    let ws = seed(&root);
    let manager = Manager::bootstrap(ws).expect("bootstrap");

    let names: Vec<String> = manager
        .list()
        .expect("list")
        .into_iter()
        .map(|r| r.app_name.0)
        .collect();
    assert_eq!(names, vec!["svc-a"], "svc-b has no directory, template is excluded");
}

#[test]
fn reconcile_excludes_the_template_application() {
    let root = assert_fs::TempDir::new().expect("tempdir");
    let ws = seed(&root);
    // The template has a directory and a manifest element; it still must not
    // become a catalog record.
    let manager = Manager::bootstrap(ws).expect("bootstrap");
    assert!(manager
        .list()
        .expect("list")
        .iter()
        .all(|r| r.app_name.as_str() != "example-app"));
}

#[test]
fn missing_manifest_is_nonfatal_and_yields_an_empty_catalog() {
    let root = assert_fs::TempDir::new().expect("tempdir");
    let ws = Workspace::new(root.path());
    let manager = Manager::bootstrap(ws).expect("bootstrap must survive a missing manifest");
    assert!(manager.list().expect("list").is_empty());
}

#[test]
fn malformed_manifest_is_nonfatal_and_yields_an_empty_catalog() {
    let root = assert_fs::TempDir::new().expect("tempdir");
    root.child("applicationsets/uat-apps.yaml")
        .write_str(": : broken : [yaml")
        .expect("manifest");
    let manager = Manager::bootstrap(Workspace::new(root.path())).expect("bootstrap");
    assert!(manager.list().expect("list").is_empty());
}

#[test]
fn reconciled_ids_drive_delete_end_to_end() {
    let root = assert_fs::TempDir::new().expect("tempdir");
    let ws = seed(&root);
    let manager = Manager::bootstrap(ws.clone()).expect("bootstrap");

    let record = manager
        .list()
        .expect("list")
        .into_iter()
        .find(|r| r.app_name.as_str() == "svc-a")
        .expect("svc-a reconciled");
    manager.delete(record.id).expect("delete");

    root.child("apps/svc-a").assert(predicate::path::missing());
    let manifest = shipyard_manifest::store::load(&ws.manifest_path).expect("load");
    assert!(!manifest.has_element("svc-a").expect("has"));
    assert!(manifest.has_element("svc-b").expect("has"), "other elements untouched");
}

#[test]
fn catalog_is_rebuilt_from_scratch_at_every_bootstrap() {
    let root = assert_fs::TempDir::new().expect("tempdir");
    let ws = seed(&root);

    {
        let manager = Manager::bootstrap(ws.clone()).expect("first bootstrap");
        assert_eq!(manager.list().expect("list").len(), 1);
    }

    // Someone edits the stores out from under us: svc-a's directory is gone.
    std::fs::remove_dir_all(root.path().join("apps/svc-a")).expect("remove dir");

    let manager = Manager::bootstrap(ws).expect("second bootstrap");
    assert!(
        manager.list().expect("list").is_empty(),
        "stale records must not survive a bootstrap"
    );
}

//! CLI lifecycle tests. Every invocation is a fresh process, so these also
//! exercise the bootstrap path: catalog rebuilt and reconciled from the
//! manifest + asset tree on each command.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

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
          - pullRequest:
              github:
                owner: shipyard-demo
                repo: '{{ .repo }}'
"#;

fn seed_workspace(root: &Path) {
    std::fs::create_dir_all(root.join("applicationsets")).unwrap();
    std::fs::write(root.join("applicationsets/uat-apps.yaml"), MANIFEST).unwrap();

    let template = root.join("apps/example-app/uat");
    std::fs::create_dir_all(template.join("templates")).unwrap();
    std::fs::write(
        template.join("Chart.yaml"),
        "apiVersion: v2\nname: example-app\nversion: 0.1.0\n",
    )
    .unwrap();
    std::fs::write(
        template.join("values.yaml"),
        "image:\n  repository: shipyard-demo/example-app\n  tag: latest\n",
    )
    .unwrap();
    for file in ["namespace.yaml", "service.yaml", "deployment.yaml"] {
        std::fs::write(template.join("templates").join(file), format!("# {file}\n")).unwrap();
    }
}

fn shipyard(root: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("shipyard").expect("binary");
    cmd.args(args).arg("--root").arg(root);
    cmd
}

#[test]
fn create_then_list_across_processes() {
    let root = tempfile::tempdir().unwrap();
    seed_workspace(root.path());

    shipyard(root.path(), &["create", "orders"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Created 'orders'"));

    // Separate process: the catalog is rebuilt, orders comes back via
    // reconciliation.
    shipyard(root.path(), &["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("orders"));
}

#[test]
fn duplicate_create_fails_with_message() {
    let root = tempfile::tempdir().unwrap();
    seed_workspace(root.path());

    shipyard(root.path(), &["create", "orders"]).assert().success();
    shipyard(root.path(), &["create", "orders"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn json_list_drives_rename_and_delete() {
    let root = tempfile::tempdir().unwrap();
    seed_workspace(root.path());

    shipyard(root.path(), &["create", "orders"]).assert().success();

    let output = shipyard(root.path(), &["list", "--json"]).output().unwrap();
    assert!(output.status.success());
    let records: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["app_name"], "orders");
    let id = records[0]["id"].as_i64().unwrap().to_string();

    shipyard(root.path(), &["rename", &id, "orders-v2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("orders-v2"));
    assert!(root.path().join("apps/orders-v2/uat/Chart.yaml").exists());
    assert!(!root.path().join("apps/orders").exists());

    let output = shipyard(root.path(), &["list", "--json"]).output().unwrap();
    let records: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    let id = records[0]["id"].as_i64().unwrap().to_string();

    shipyard(root.path(), &["delete", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Deleted 'orders-v2'"));
    assert!(!root.path().join("apps/orders-v2").exists());

    shipyard(root.path(), &["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No applications registered."));
}

#[test]
fn delete_unknown_id_fails() {
    let root = tempfile::tempdir().unwrap();
    seed_workspace(root.path());

    shipyard(root.path(), &["delete", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no application with id 99"));
}

#[test]
fn create_without_a_manifest_fails() {
    let root = tempfile::tempdir().unwrap();
    // No seed: empty workspace. Listing still works (empty catalog), but a
    // mutation needs the manifest.
    shipyard(root.path(), &["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No applications registered."));

    shipyard(root.path(), &["create", "orders"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("manifest"));
}

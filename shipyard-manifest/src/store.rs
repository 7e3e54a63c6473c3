//! Manifest file I/O.
//!
//! Loads fail fast on a missing file, malformed YAML, or a document that
//! does not carry the managed generator spine. Saves serialize the whole
//! document and replace the file atomically (`.tmp` sibling + rename), so a
//! crash mid-write never leaves a truncated manifest behind.

use std::path::Path;

use crate::error::{io_err, ManifestError};
use crate::schema::Manifest;

/// Load and shape-check the manifest at `path`.
pub fn load(path: &Path) -> Result<Manifest, ManifestError> {
    if !path.exists() {
        return Err(ManifestError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    let manifest: Manifest = serde_yaml::from_str(&contents).map_err(|e| ManifestError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;
    manifest.validate()?;
    Ok(manifest)
}

/// Atomically save `manifest` to `path`, overwriting it entirely.
///
/// The `.tmp` sibling lives in the same directory as the target so the
/// rename never crosses filesystems.
pub fn save(manifest: &Manifest, path: &Path) -> Result<(), ManifestError> {
    let yaml = serde_yaml::to_string(manifest)?;
    let tmp = tmp_path(path);
    std::fs::write(&tmp, yaml).map_err(|e| io_err(&tmp, e))?;
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(io_err(path, e));
    }
    Ok(())
}

fn tmp_path(path: &Path) -> std::path::PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "manifest.yaml".to_string());
    name.push_str(".tmp");
    path.with_file_name(name)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Typed chart metadata and parameter documents.
//!
//! Only the fields this system rewrites are named; everything else rides in
//! a flattened passthrough map. Writes go through a `.tmp` sibling + rename.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_yaml::Value;

use crate::error::{io_err, AssetError};

/// `Chart.yaml` — chart metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartMeta {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub rest: BTreeMap<String, Value>,
}

/// `values.yaml` — chart parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Values {
    pub image: Image,
    #[serde(flatten)]
    pub rest: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub repository: String,
    #[serde(flatten)]
    pub rest: BTreeMap<String, Value>,
}

/// Read and parse a chart document.
pub fn read<T: DeserializeOwned>(path: &Path) -> Result<T, AssetError> {
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    serde_yaml::from_str(&contents).map_err(|e| AssetError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Serialize and atomically write a chart document.
pub fn write<T: Serialize>(doc: &T, path: &Path) -> Result<(), AssetError> {
    let yaml = serde_yaml::to_string(doc)?;
    let tmp = path.with_extension("yaml.tmp");
    std::fs::write(&tmp, yaml).map_err(|e| io_err(&tmp, e))?;
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(io_err(path, e));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Error types for shipyard-assets.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from asset tree operations.
#[derive(Debug, Error)]
pub enum AssetError {
    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error on a chart or values file.
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// YAML serialization error (write path).
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Convenience constructor for [`AssetError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> AssetError {
    AssetError::Io {
        path: path.into(),
        source,
    }
}

//! Error types for shipyard-manifest.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from manifest operations.
///
/// `NotFound`, `Parse`, and `Shape` together are the "manifest unreadable"
/// family: the document cannot be trusted and no mutation may proceed.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The manifest file did not exist at the expected path.
    #[error("manifest not found at {path}")]
    NotFound { path: PathBuf },

    /// YAML parse error on load, with file path context.
    #[error("failed to parse manifest at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The document parsed but does not match the expected generator shape.
    #[error("manifest does not match the expected generator shape: {reason}")]
    Shape { reason: String },

    /// YAML serialization error (save path).
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`ManifestError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ManifestError {
    ManifestError::Io {
        path: path.into(),
        source,
    }
}

/// Convenience constructor for [`ManifestError::Shape`].
pub(crate) fn shape_err(reason: impl Into<String>) -> ManifestError {
    ManifestError::Shape {
        reason: reason.into(),
    }
}

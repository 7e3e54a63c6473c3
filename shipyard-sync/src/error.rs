//! Error types for shipyard-sync.

use thiserror::Error;

use shipyard_assets::AssetError;
use shipyard_core::error::CatalogError;
use shipyard_core::types::AppId;
use shipyard_manifest::ManifestError;

/// All errors that can arise from mutation operations.
///
/// The first four variants are the operation-boundary kinds callers are
/// expected to branch on; the rest wrap store failures as-is.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The application name is unusable as a shared key.
    #[error("invalid application name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    /// Create on a name the catalog already holds.
    #[error("application '{name}' already exists")]
    Duplicate { name: String },

    /// Rename or delete on an unknown id.
    #[error("no application with id {id}")]
    NotFound { id: AppId },

    /// An error from the catalog.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// An error from the manifest document.
    #[error("manifest error: {0}")]
    Manifest(#[from] ManifestError),

    /// An error from the asset tree.
    #[error("asset tree error: {0}")]
    Assets(#[from] AssetError),
}

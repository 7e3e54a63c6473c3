//! Error types for shipyard-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Underlying SQLite failure.
    #[error("catalog database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Uniqueness violation on `app_name`.
    #[error("application '{name}' already exists")]
    Duplicate { name: String },

    /// Could not remove or create the database file at open time.
    #[error("cannot reset catalog at {path}: {source}")]
    Reset {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A stored `created_at` value did not parse back as RFC 3339.
    #[error("invalid timestamp in catalog row: {0}")]
    Timestamp(#[from] chrono::ParseError),
}

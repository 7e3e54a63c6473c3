//! # shipyard-sync
//!
//! Three-way synchronization between the application catalog, the generator
//! manifest, and the per-application asset tree.
//!
//! Call [`Manager::bootstrap`] once at process start — it rebuilds the
//! catalog from scratch and reconciles it against the manifest + asset tree
//! (the durable pair; the catalog is a cache). The returned [`Manager`]
//! exposes the mutation operations: `list`, `create`, `rename`, `delete`.

pub mod error;
pub mod manager;
pub mod reconcile;
pub mod workspace;

pub use error::SyncError;
pub use manager::Manager;
pub use workspace::Workspace;

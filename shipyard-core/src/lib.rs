//! Shipyard core library — domain types, application catalog, errors.
//!
//! Public API surface:
//! - [`types`] — newtypes and the application record
//! - [`error`] — [`CatalogError`]
//! - [`catalog`] — the SQLite-backed [`Catalog`]

pub mod catalog;
pub mod error;
pub mod types;

pub use catalog::Catalog;
pub use error::CatalogError;
pub use types::{AppId, AppName, AppRecord};

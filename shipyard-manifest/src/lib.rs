//! # shipyard-manifest
//!
//! Typed accessor for the generator manifest consumed by the downstream
//! GitOps controller. The manifest is an ApplicationSet-style document: a
//! matrix generator whose inner generators are a list generator (one element
//! per application) and a pull-request generator sibling.
//!
//! Only the element list and the pull-request repository reference are
//! managed here; every other field rides through load/save untouched.

pub mod error;
pub mod schema;
pub mod store;

pub use error::ManifestError;
pub use schema::{Element, Manifest, REPO_PLACEHOLDER};

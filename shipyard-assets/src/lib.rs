//! # shipyard-assets
//!
//! The per-application asset tree: one directory per application holding a
//! templated chart (`<app>/uat/Chart.yaml`, `values.yaml`, and a fixed set
//! of template files), cloned from the template application's directory.

pub mod chart;
pub mod error;
pub mod tree;

pub use chart::{ChartMeta, Values};
pub use error::AssetError;
pub use tree::{ENVIRONMENT, TEMPLATE_FILES};

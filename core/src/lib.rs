//! # Glint Core
//!
//! CPU-side data for the Glint demo engine: the mesh representation and
//! the model-file loaders.

pub mod mesh;
pub mod model;

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

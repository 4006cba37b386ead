//! Mesh data structures.
//!
//! This module provides [`Mesh`], the plain in-memory representation of
//! vertex, index, and normal streams produced by the loaders in
//! [`crate::model`] and consumed by GPU upload code.

mod data;

pub use data::Mesh;

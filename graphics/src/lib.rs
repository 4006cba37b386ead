//! # Glint Graphics
//!
//! GPU resource wrappers for the Glint demo engine, built around an
//! abstract render backend consumed through opaque handles.
//!
//! ## Overview
//!
//! This crate provides:
//! - [`Context`] - Explicit graphics context, passed by reference into
//!   every resource constructor
//! - [`RenderBackend`] - Trait for backend implementations, with
//!   [`DummyBackend`] for testing and headless development
//! - [`Bindable`] / [`BindGuard`] - The save-previous / restore-on-exit
//!   protocol for resources occupying a global binding slot
//! - [`VertexArray`] - A set of GPU buffers uploaded from mesh data
//! - [`ShaderProgram`] - Compiled and linked shader stages with guarded
//!   uniform upload
//!
//! ## Example
//!
//! ```
//! use glint_graphics::{BindGuard, Context, UsageHint, VertexArray};
//!
//! let ctx = Context::headless();
//! let mut triangle = VertexArray::new(&ctx).unwrap();
//! triangle.load(0, UsageHint::Immutable, &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
//! triangle.load_indices(UsageHint::Immutable, &[0, 1, 2]);
//!
//! let _bound = BindGuard::new(&triangle);
//! triangle.draw();
//! ```

pub mod backend;
pub mod bind;
pub mod context;
pub mod error;
pub mod shader;
pub mod vertex_array;

// Re-export main types for convenience
pub use backend::{
    AttribConfig, AttribFormat, BufferTarget, DummyBackend, Handle, RenderBackend, ShaderStage,
    UsageHint, NULL_HANDLE,
};
pub use bind::{BindGuard, Bindable};
pub use context::Context;
pub use error::GraphicsError;
pub use shader::{ShaderProgram, UniformValue};
pub use vertex_array::VertexArray;

/// Graphics library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the graphics subsystem.
pub fn init() {
    log::info!("Glint Graphics v{} initialized", VERSION);
}

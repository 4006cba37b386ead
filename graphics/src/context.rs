//! Graphics context.
//!
//! The [`Context`] owns the backend connection and is passed by
//! reference into every resource constructor. There is no global
//! "current context" state: creating the context once and lending it out
//! is what keeps the at-most-one-active-context invariant.

use std::sync::Arc;

use crate::backend::{DummyBackend, RenderBackend};

/// The graphics context: the single owner of a backend connection.
pub struct Context {
    backend: Arc<dyn RenderBackend>,
}

impl Context {
    /// Create a context over an existing backend.
    pub fn new(backend: Arc<dyn RenderBackend>) -> Self {
        log::info!("graphics context created over {} backend", backend.name());
        Self { backend }
    }

    /// Create a context over the recording [`DummyBackend`].
    ///
    /// No GPU work is performed; useful for tests and headless runs.
    pub fn headless() -> Self {
        Self::new(Arc::new(DummyBackend::new()))
    }

    /// The backend connection.
    pub fn backend(&self) -> &Arc<dyn RenderBackend> {
        &self.backend
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("backend", &self.backend.name())
            .finish()
    }
}

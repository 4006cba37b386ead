//! Vertex array resource.
//!
//! A [`VertexArray`] groups per-attribute GPU buffers and an index
//! buffer under one native handle, uploaded from mesh data and bound as
//! a unit for draw calls.

use std::fmt;
use std::sync::Arc;

use glint_core::mesh::Mesh;

use crate::backend::{AttribFormat, BufferTarget, Handle, RenderBackend, UsageHint, NULL_HANDLE};
use crate::bind::{BindGuard, Bindable};
use crate::context::Context;
use crate::error::GraphicsError;

/// Attribute slot that receives vertex positions.
pub const POSITION_SLOT: u32 = 0;
/// Attribute slot that receives vertex normals.
pub const NORMAL_SLOT: u32 = 1;

/// A set of GPU buffers grouped under one vertex-array handle.
///
/// The array owns every buffer it allocates through
/// [`load`](Self::load) and [`load_indices`](Self::load_indices);
/// dropping it deletes the buffers along with the array handle.
///
/// As a [`Bindable`], a vertex array occupies the "currently active
/// vertex array" slot.
pub struct VertexArray {
    backend: Arc<dyn RenderBackend>,
    handle: Handle,
    buffers: Vec<Handle>,
    index_count: u32,
}

impl VertexArray {
    /// Allocate a vertex array on the context's backend.
    ///
    /// # Errors
    ///
    /// [`GraphicsError::ResourceCreationFailed`] if the backend returns
    /// the null handle.
    pub fn new(ctx: &Context) -> Result<Self, GraphicsError> {
        let backend = Arc::clone(ctx.backend());
        let handle = backend.create_vertex_array();
        if handle == NULL_HANDLE {
            return Err(GraphicsError::ResourceCreationFailed(
                "vertex array allocation returned a null handle".into(),
            ));
        }
        Ok(Self {
            backend,
            handle,
            buffers: Vec::new(),
            index_count: 0,
        })
    }

    /// Native handle of the vertex array.
    pub fn handle(&self) -> Handle {
        self.handle
    }

    /// Number of indices uploaded by [`load_indices`](Self::load_indices).
    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    /// Upload `data` into a fresh buffer feeding `slot` as tightly
    /// packed 3-component float records, and enable the slot.
    ///
    /// Runs under a bind guard over the array; the previously bound
    /// array buffer is restored before returning.
    pub fn load(&mut self, slot: u32, usage: UsageHint, data: &[f32]) {
        let buffer;
        {
            let _bound = BindGuard::new(&*self);

            buffer = self.backend.create_buffer();
            let previous = self.backend.buffer_binding(BufferTarget::Array);
            self.backend.bind_buffer(BufferTarget::Array, buffer);
            self.backend
                .buffer_data(BufferTarget::Array, bytemuck::cast_slice(data), usage);
            self.backend
                .vertex_attrib_pointer(slot, AttribFormat::Float3, AttribFormat::Float3.size());
            self.backend.enable_vertex_attrib(slot);
            self.backend.bind_buffer(BufferTarget::Array, previous);
        }
        self.buffers.push(buffer);
    }

    /// Upload triangle indices into a fresh element buffer.
    ///
    /// Runs under a bind guard over the array; the previously bound
    /// element buffer is restored before returning.
    pub fn load_indices(&mut self, usage: UsageHint, indices: &[u32]) {
        let buffer;
        {
            let _bound = BindGuard::new(&*self);

            buffer = self.backend.create_buffer();
            let previous = self.backend.buffer_binding(BufferTarget::ElementArray);
            self.backend.bind_buffer(BufferTarget::ElementArray, buffer);
            self.backend.buffer_data(
                BufferTarget::ElementArray,
                bytemuck::cast_slice(indices),
                usage,
            );
            self.backend.bind_buffer(BufferTarget::ElementArray, previous);
        }
        self.buffers.push(buffer);
        self.index_count = indices.len() as u32;
    }

    /// Upload a whole mesh: positions to [`POSITION_SLOT`], normals
    /// (when present) to [`NORMAL_SLOT`], then the index stream.
    pub fn upload_mesh(&mut self, usage: UsageHint, mesh: &Mesh) {
        self.load(POSITION_SLOT, usage, &mesh.vertices);
        if !mesh.normals.is_empty() {
            self.load(NORMAL_SLOT, usage, &mesh.normals);
        }
        self.load_indices(usage, &mesh.vertex_indices);
    }

    /// Issue an indexed draw of the uploaded index stream against the
    /// current bindings.
    ///
    /// The caller is expected to hold bind guards over the program and
    /// this array for the duration of the call.
    pub fn draw(&self) {
        self.backend.draw_indexed(self.index_count);
    }
}

impl Bindable for VertexArray {
    type Snapshot = Handle;

    fn bind(&self) -> Handle {
        let previous = self.backend.vertex_array_binding();
        self.backend.bind_vertex_array(self.handle);
        previous
    }

    fn unbind(&self, snapshot: Handle) {
        self.backend.bind_vertex_array(snapshot);
    }
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        for buffer in self.buffers.drain(..) {
            self.backend.delete_buffer(buffer);
        }
        self.backend.delete_vertex_array(self.handle);
    }
}

impl fmt::Debug for VertexArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VertexArray")
            .field("handle", &self.handle)
            .field("buffers", &self.buffers.len())
            .field("index_count", &self.index_count)
            .finish()
    }
}

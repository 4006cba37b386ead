//! Render backend abstraction.
//!
//! The graphics API is an external collaborator consumed through opaque
//! handle operations: create/delete/bind/upload/draw calls against
//! [`Handle`] values, plus queries for the global binding slots that the
//! bind-guard discipline in [`crate::bind`] saves and restores.
//!
//! # Available Backends
//!
//! - [`DummyBackend`] - Records operations without touching a GPU, for
//!   testing and headless development
//!
//! A real windowed backend implements the same trait in the application
//! layer, against whatever context the windowing collaborator provides.

pub mod dummy;

pub use dummy::DummyBackend;

/// Opaque native handle to a backend object.
pub type Handle = u32;

/// The reserved "invalid/unallocated" handle value.
pub const NULL_HANDLE: Handle = 0;

/// Buffer binding targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferTarget {
    /// Vertex attribute data.
    Array,
    /// Triangle index data.
    ElementArray,
}

/// How a buffer's contents will be written, as a hint to the backend.
///
/// A hint only; never a correctness constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UsageHint {
    /// Written once, drawn many times.
    #[default]
    Immutable,
    /// Rewritten occasionally.
    Dynamic,
    /// Rewritten every frame.
    Stream,
}

/// Component layout of a vertex attribute record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttribFormat {
    /// One f32 component.
    Float,
    /// Two f32 components.
    Float2,
    /// Three f32 components.
    Float3,
    /// Four f32 components.
    Float4,
}

impl AttribFormat {
    /// Number of f32 components per record.
    pub fn components(&self) -> u32 {
        match self {
            Self::Float => 1,
            Self::Float2 => 2,
            Self::Float3 => 3,
            Self::Float4 => 4,
        }
    }

    /// Size in bytes of one record.
    pub fn size(&self) -> u32 {
        self.components() * std::mem::size_of::<f32>() as u32
    }
}

/// Shader pipeline stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Per-vertex stage.
    Vertex,
    /// Per-fragment stage.
    Fragment,
}

/// Recorded configuration of one vertex attribute slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttribConfig {
    /// Component layout the slot reads.
    pub format: AttribFormat,
    /// Byte stride between consecutive records.
    pub stride: u32,
    /// Whether the slot is enabled for drawing.
    pub enabled: bool,
}

/// Trait for render backend implementations.
///
/// Handles are plain unsigned integers with [`NULL_HANDLE`] reserved for
/// allocation failure. Binding slots (`*_binding` / `current_program`)
/// are global per backend: exactly one vertex array, one buffer per
/// target, and one program are active at a time, mirroring the
/// single-current-binding model of the underlying graphics API.
///
/// Attribute pointer state (`vertex_attrib_pointer`,
/// `enable_vertex_attrib`, `attrib_config`) is owned by the currently
/// bound vertex array; records always read f32 components from byte
/// offset zero within their stride.
pub trait RenderBackend: Send + Sync + 'static {
    /// Get the backend name.
    fn name(&self) -> &'static str;

    // -- Vertex arrays --

    /// Allocate a vertex array object.
    fn create_vertex_array(&self) -> Handle;

    /// Delete a vertex array object.
    fn delete_vertex_array(&self, handle: Handle);

    /// Make `handle` the active vertex array.
    fn bind_vertex_array(&self, handle: Handle);

    /// The currently active vertex array.
    fn vertex_array_binding(&self) -> Handle;

    // -- Buffers --

    /// Allocate a buffer object.
    fn create_buffer(&self) -> Handle;

    /// Delete a buffer object.
    fn delete_buffer(&self, handle: Handle);

    /// Bind `handle` at `target`.
    fn bind_buffer(&self, target: BufferTarget, handle: Handle);

    /// The buffer currently bound at `target`.
    fn buffer_binding(&self, target: BufferTarget) -> Handle;

    /// Upload `data` to the buffer bound at `target`.
    fn buffer_data(&self, target: BufferTarget, data: &[u8], usage: UsageHint);

    // -- Vertex attributes (state of the bound vertex array) --

    /// Configure `slot` to read `format` records with the given byte
    /// stride from the buffer bound at [`BufferTarget::Array`].
    fn vertex_attrib_pointer(&self, slot: u32, format: AttribFormat, stride: u32);

    /// Enable `slot` for drawing.
    fn enable_vertex_attrib(&self, slot: u32);

    /// Query the recorded configuration of `slot` on the bound vertex
    /// array, if any pointer has been set.
    fn attrib_config(&self, slot: u32) -> Option<AttribConfig>;

    // -- Programs and shaders --

    /// Allocate a program object.
    fn create_program(&self) -> Handle;

    /// Delete a program object.
    fn delete_program(&self, handle: Handle);

    /// Make `handle` the current program.
    fn use_program(&self, handle: Handle);

    /// The currently active program.
    fn current_program(&self) -> Handle;

    /// Allocate a shader object for `stage`.
    fn create_shader(&self, stage: ShaderStage) -> Handle;

    /// Delete a shader object.
    fn delete_shader(&self, handle: Handle);

    /// Compile `source` into the shader object; `false` on failure.
    fn compile_shader(&self, handle: Handle, source: &str) -> bool;

    /// Diagnostic log of the last compile of the shader object.
    fn shader_info_log(&self, handle: Handle) -> String;

    /// Attach a compiled shader object to a program.
    fn attach_shader(&self, program: Handle, shader: Handle);

    /// Link the program's attached stages; `false` on failure.
    fn link_program(&self, program: Handle) -> bool;

    // -- Uniform uploads (against the current program) --

    /// Write a scalar float uniform.
    fn uniform_f32(&self, location: i32, value: f32);

    /// Write a 3-component vector uniform.
    fn uniform_vec3(&self, location: i32, value: [f32; 3]);

    /// Write a 4-component vector uniform.
    fn uniform_vec4(&self, location: i32, value: [f32; 4]);

    /// Write a column-major 4x4 matrix uniform.
    fn uniform_mat4(&self, location: i32, value: [f32; 16]);

    // -- Draws --

    /// Draw `index_count` indices from the bound element buffer with the
    /// current program and vertex array.
    fn draw_indexed(&self, index_count: u32);
}

//! Dummy render backend for testing and development.
//!
//! This backend performs no GPU work but keeps a full record of handles,
//! binding slots, attribute configuration, buffer uploads, and uniform
//! writes, so tests can observe the call sequence a real backend would
//! have received.

use std::collections::{HashMap, HashSet};

use parking_lot::Mutex;

use super::{
    AttribConfig, AttribFormat, BufferTarget, Handle, RenderBackend, ShaderStage, UsageHint,
    NULL_HANDLE,
};

/// A recorded uniform upload.
#[derive(Debug, Clone, PartialEq)]
pub enum UniformWrite {
    /// Scalar float.
    Float(f32),
    /// 3-component vector.
    Vec3([f32; 3]),
    /// 4-component vector.
    Vec4([f32; 4]),
    /// Column-major 4x4 matrix.
    Mat4([f32; 16]),
}

#[derive(Debug, Default)]
struct VertexArrayRecord {
    pointers: HashMap<u32, (AttribFormat, u32)>,
    enabled: HashSet<u32>,
}

#[derive(Debug, Default)]
struct BufferRecord {
    len: usize,
    usage: UsageHint,
}

#[derive(Debug)]
struct ShaderRecord {
    stage: ShaderStage,
    log: String,
}

#[derive(Debug, Default)]
struct ProgramRecord {
    attached: Vec<Handle>,
    linked: bool,
    uniforms: HashMap<i32, UniformWrite>,
}

#[derive(Debug)]
struct DrawRecord {
    program: Handle,
    vertex_array: Handle,
    index_count: u32,
}

#[derive(Debug, Default)]
struct DummyState {
    next_handle: Handle,
    vertex_arrays: HashMap<Handle, VertexArrayRecord>,
    buffers: HashMap<Handle, BufferRecord>,
    shaders: HashMap<Handle, ShaderRecord>,
    programs: HashMap<Handle, ProgramRecord>,
    bound_vertex_array: Handle,
    bound_array_buffer: Handle,
    bound_element_buffer: Handle,
    current_program: Handle,
    draws: Vec<DrawRecord>,
}

impl DummyState {
    fn alloc(&mut self) -> Handle {
        self.next_handle += 1;
        self.next_handle
    }
}

/// Dummy render backend.
#[derive(Debug, Default)]
pub struct DummyBackend {
    state: Mutex<DummyState>,
}

impl DummyBackend {
    /// Create a new dummy backend with no live objects.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live buffer objects.
    pub fn live_buffers(&self) -> usize {
        self.state.lock().buffers.len()
    }

    /// Number of live vertex array objects.
    pub fn live_vertex_arrays(&self) -> usize {
        self.state.lock().vertex_arrays.len()
    }

    /// Number of live shader objects.
    pub fn live_shaders(&self) -> usize {
        self.state.lock().shaders.len()
    }

    /// Number of live program objects.
    pub fn live_programs(&self) -> usize {
        self.state.lock().programs.len()
    }

    /// Recorded byte length and usage of a live buffer object.
    pub fn buffer_contents(&self, handle: Handle) -> Option<(usize, UsageHint)> {
        self.state
            .lock()
            .buffers
            .get(&handle)
            .map(|record| (record.len, record.usage))
    }

    /// Recorded uniform write at `location` on a live program object.
    pub fn uniform_write(&self, program: Handle, location: i32) -> Option<UniformWrite> {
        self.state
            .lock()
            .programs
            .get(&program)
            .and_then(|record| record.uniforms.get(&location).cloned())
    }

    /// Number of draw calls issued.
    pub fn draw_count(&self) -> usize {
        self.state.lock().draws.len()
    }

    /// The `(program, vertex_array, index_count)` triple of the last
    /// draw call.
    pub fn last_draw(&self) -> Option<(Handle, Handle, u32)> {
        self.state
            .lock()
            .draws
            .last()
            .map(|draw| (draw.program, draw.vertex_array, draw.index_count))
    }
}

impl RenderBackend for DummyBackend {
    fn name(&self) -> &'static str {
        "Dummy"
    }

    fn create_vertex_array(&self) -> Handle {
        let mut state = self.state.lock();
        let handle = state.alloc();
        state.vertex_arrays.insert(handle, VertexArrayRecord::default());
        log::trace!("DummyBackend: created vertex array {handle}");
        handle
    }

    fn delete_vertex_array(&self, handle: Handle) {
        let mut state = self.state.lock();
        state.vertex_arrays.remove(&handle);
        if state.bound_vertex_array == handle {
            state.bound_vertex_array = NULL_HANDLE;
        }
        log::trace!("DummyBackend: deleted vertex array {handle}");
    }

    fn bind_vertex_array(&self, handle: Handle) {
        self.state.lock().bound_vertex_array = handle;
    }

    fn vertex_array_binding(&self) -> Handle {
        self.state.lock().bound_vertex_array
    }

    fn create_buffer(&self) -> Handle {
        let mut state = self.state.lock();
        let handle = state.alloc();
        state.buffers.insert(handle, BufferRecord::default());
        log::trace!("DummyBackend: created buffer {handle}");
        handle
    }

    fn delete_buffer(&self, handle: Handle) {
        let mut state = self.state.lock();
        state.buffers.remove(&handle);
        if state.bound_array_buffer == handle {
            state.bound_array_buffer = NULL_HANDLE;
        }
        if state.bound_element_buffer == handle {
            state.bound_element_buffer = NULL_HANDLE;
        }
        log::trace!("DummyBackend: deleted buffer {handle}");
    }

    fn bind_buffer(&self, target: BufferTarget, handle: Handle) {
        let mut state = self.state.lock();
        match target {
            BufferTarget::Array => state.bound_array_buffer = handle,
            BufferTarget::ElementArray => state.bound_element_buffer = handle,
        }
    }

    fn buffer_binding(&self, target: BufferTarget) -> Handle {
        let state = self.state.lock();
        match target {
            BufferTarget::Array => state.bound_array_buffer,
            BufferTarget::ElementArray => state.bound_element_buffer,
        }
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8], usage: UsageHint) {
        let mut state = self.state.lock();
        let bound = match target {
            BufferTarget::Array => state.bound_array_buffer,
            BufferTarget::ElementArray => state.bound_element_buffer,
        };
        let Some(record) = state.buffers.get_mut(&bound) else {
            log::warn!("DummyBackend: buffer_data with no buffer bound at {target:?}");
            return;
        };
        record.len = data.len();
        record.usage = usage;
        log::trace!(
            "DummyBackend: uploaded {} bytes to buffer {bound} ({usage:?})",
            data.len()
        );
    }

    fn vertex_attrib_pointer(&self, slot: u32, format: AttribFormat, stride: u32) {
        let mut state = self.state.lock();
        let bound = state.bound_vertex_array;
        let Some(record) = state.vertex_arrays.get_mut(&bound) else {
            log::warn!("DummyBackend: vertex_attrib_pointer with no vertex array bound");
            return;
        };
        record.pointers.insert(slot, (format, stride));
    }

    fn enable_vertex_attrib(&self, slot: u32) {
        let mut state = self.state.lock();
        let bound = state.bound_vertex_array;
        let Some(record) = state.vertex_arrays.get_mut(&bound) else {
            log::warn!("DummyBackend: enable_vertex_attrib with no vertex array bound");
            return;
        };
        record.enabled.insert(slot);
    }

    fn attrib_config(&self, slot: u32) -> Option<AttribConfig> {
        let state = self.state.lock();
        let record = state.vertex_arrays.get(&state.bound_vertex_array)?;
        let (format, stride) = record.pointers.get(&slot).copied()?;
        Some(AttribConfig {
            format,
            stride,
            enabled: record.enabled.contains(&slot),
        })
    }

    fn create_program(&self) -> Handle {
        let mut state = self.state.lock();
        let handle = state.alloc();
        state.programs.insert(handle, ProgramRecord::default());
        log::trace!("DummyBackend: created program {handle}");
        handle
    }

    fn delete_program(&self, handle: Handle) {
        let mut state = self.state.lock();
        state.programs.remove(&handle);
        log::trace!("DummyBackend: deleted program {handle}");
    }

    fn use_program(&self, handle: Handle) {
        self.state.lock().current_program = handle;
    }

    fn current_program(&self) -> Handle {
        self.state.lock().current_program
    }

    fn create_shader(&self, stage: ShaderStage) -> Handle {
        let mut state = self.state.lock();
        let handle = state.alloc();
        state.shaders.insert(
            handle,
            ShaderRecord {
                stage,
                log: String::new(),
            },
        );
        log::trace!("DummyBackend: created {stage:?} shader {handle}");
        handle
    }

    fn delete_shader(&self, handle: Handle) {
        self.state.lock().shaders.remove(&handle);
        log::trace!("DummyBackend: deleted shader {handle}");
    }

    fn compile_shader(&self, handle: Handle, source: &str) -> bool {
        let mut state = self.state.lock();
        let Some(record) = state.shaders.get_mut(&handle) else {
            log::warn!("DummyBackend: compile_shader on unknown shader {handle}");
            return false;
        };
        // The dummy compiler accepts everything except an empty source.
        if source.trim().is_empty() {
            record.log = format!("{:?} shader: empty source", record.stage);
            return false;
        }
        record.log.clear();
        true
    }

    fn shader_info_log(&self, handle: Handle) -> String {
        self.state
            .lock()
            .shaders
            .get(&handle)
            .map(|record| record.log.clone())
            .unwrap_or_default()
    }

    fn attach_shader(&self, program: Handle, shader: Handle) {
        let mut state = self.state.lock();
        let Some(record) = state.programs.get_mut(&program) else {
            log::warn!("DummyBackend: attach_shader on unknown program {program}");
            return;
        };
        record.attached.push(shader);
    }

    fn link_program(&self, program: Handle) -> bool {
        let mut state = self.state.lock();
        let Some(record) = state.programs.get_mut(&program) else {
            log::warn!("DummyBackend: link_program on unknown program {program}");
            return false;
        };
        record.linked = !record.attached.is_empty();
        log::trace!(
            "DummyBackend: linked program {program} ({} stages)",
            record.attached.len()
        );
        record.linked
    }

    fn uniform_f32(&self, location: i32, value: f32) {
        self.record_uniform(location, UniformWrite::Float(value));
    }

    fn uniform_vec3(&self, location: i32, value: [f32; 3]) {
        self.record_uniform(location, UniformWrite::Vec3(value));
    }

    fn uniform_vec4(&self, location: i32, value: [f32; 4]) {
        self.record_uniform(location, UniformWrite::Vec4(value));
    }

    fn uniform_mat4(&self, location: i32, value: [f32; 16]) {
        self.record_uniform(location, UniformWrite::Mat4(value));
    }

    fn draw_indexed(&self, index_count: u32) {
        let mut state = self.state.lock();
        let draw = DrawRecord {
            program: state.current_program,
            vertex_array: state.bound_vertex_array,
            index_count,
        };
        log::trace!(
            "DummyBackend: draw {} indices (program {}, vertex array {})",
            draw.index_count,
            draw.program,
            draw.vertex_array
        );
        state.draws.push(draw);
    }
}

impl DummyBackend {
    fn record_uniform(&self, location: i32, value: UniformWrite) {
        let mut state = self.state.lock();
        let current = state.current_program;
        let Some(record) = state.programs.get_mut(&current) else {
            log::warn!("DummyBackend: uniform write with no program current");
            return;
        };
        record.uniforms.insert(location, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_are_nonzero_and_distinct() {
        let backend = DummyBackend::new();
        let a = backend.create_buffer();
        let b = backend.create_vertex_array();
        let c = backend.create_program();
        assert_ne!(a, NULL_HANDLE);
        assert_ne!(b, NULL_HANDLE);
        assert_ne!(c, NULL_HANDLE);
        assert!(a != b && b != c);
    }

    #[test]
    fn test_buffer_upload_records_bound_buffer() {
        let backend = DummyBackend::new();
        let buffer = backend.create_buffer();
        backend.bind_buffer(BufferTarget::Array, buffer);
        backend.buffer_data(BufferTarget::Array, &[0u8; 24], UsageHint::Dynamic);

        assert_eq!(
            backend.buffer_contents(buffer),
            Some((24, UsageHint::Dynamic))
        );
    }

    #[test]
    fn test_attrib_state_follows_bound_vertex_array() {
        let backend = DummyBackend::new();
        let a = backend.create_vertex_array();
        let b = backend.create_vertex_array();

        backend.bind_vertex_array(a);
        backend.vertex_attrib_pointer(0, AttribFormat::Float3, 12);
        backend.enable_vertex_attrib(0);

        backend.bind_vertex_array(b);
        assert_eq!(backend.attrib_config(0), None);

        backend.bind_vertex_array(a);
        assert_eq!(
            backend.attrib_config(0),
            Some(AttribConfig {
                format: AttribFormat::Float3,
                stride: 12,
                enabled: true,
            })
        );
    }

    #[test]
    fn test_deleting_bound_objects_clears_bindings() {
        let backend = DummyBackend::new();
        let vao = backend.create_vertex_array();
        backend.bind_vertex_array(vao);
        backend.delete_vertex_array(vao);
        assert_eq!(backend.vertex_array_binding(), NULL_HANDLE);

        let buffer = backend.create_buffer();
        backend.bind_buffer(BufferTarget::ElementArray, buffer);
        backend.delete_buffer(buffer);
        assert_eq!(backend.buffer_binding(BufferTarget::ElementArray), NULL_HANDLE);
    }

    #[test]
    fn test_compile_rejects_empty_source() {
        let backend = DummyBackend::new();
        let shader = backend.create_shader(ShaderStage::Vertex);
        assert!(!backend.compile_shader(shader, "   \n"));
        assert!(backend.shader_info_log(shader).contains("empty source"));

        assert!(backend.compile_shader(shader, "void main() {}"));
        assert!(backend.shader_info_log(shader).is_empty());
    }

    #[test]
    fn test_link_requires_attached_stage() {
        let backend = DummyBackend::new();
        let program = backend.create_program();
        assert!(!backend.link_program(program));

        let shader = backend.create_shader(ShaderStage::Fragment);
        backend.compile_shader(shader, "void main() {}");
        backend.attach_shader(program, shader);
        assert!(backend.link_program(program));
    }
}

//! Shader program resource.
//!
//! A [`ShaderProgram`] compiles shader-stage source text, links the
//! stages into an executable program, and uploads uniform values under
//! the bind-guard discipline.

use std::fmt;
use std::sync::Arc;

use nalgebra::{Matrix4, Vector3, Vector4};

use crate::backend::{Handle, RenderBackend, ShaderStage, NULL_HANDLE};
use crate::bind::{BindGuard, Bindable};
use crate::context::Context;
use crate::error::GraphicsError;

/// Upper bound on the compiler log embedded in a compile error.
const INFO_LOG_CAP: usize = 1024;

/// A GPU shader program.
///
/// Uniform locations are caller-supplied integers; the caller and the
/// shader source agree on a fixed location scheme out-of-band (explicit
/// layout annotations in the source).
///
/// As a [`Bindable`], a program occupies the "currently active program"
/// slot.
pub struct ShaderProgram {
    backend: Arc<dyn RenderBackend>,
    handle: Handle,
}

impl ShaderProgram {
    /// Allocate a program on the context's backend.
    ///
    /// # Errors
    ///
    /// [`GraphicsError::ResourceCreationFailed`] if the backend returns
    /// the null handle.
    pub fn new(ctx: &Context) -> Result<Self, GraphicsError> {
        let backend = Arc::clone(ctx.backend());
        let handle = backend.create_program();
        if handle == NULL_HANDLE {
            return Err(GraphicsError::ResourceCreationFailed(
                "shader program allocation returned a null handle".into(),
            ));
        }
        Ok(Self { backend, handle })
    }

    /// Native handle of the program.
    pub fn handle(&self) -> Handle {
        self.handle
    }

    /// Compile `src` for `stage` and attach it to the program.
    ///
    /// The intermediate shader object is released whether or not the
    /// attach happens.
    ///
    /// # Errors
    ///
    /// [`GraphicsError::ResourceCreationFailed`] if the backend cannot
    /// allocate a shader object; [`GraphicsError::ShaderCompileFailed`]
    /// with the compiler log on compile failure.
    pub fn attach_from_src(&mut self, stage: ShaderStage, src: &str) -> Result<(), GraphicsError> {
        let shader = self.backend.create_shader(stage);
        if shader == NULL_HANDLE {
            return Err(GraphicsError::ResourceCreationFailed(
                "shader stage allocation returned a null handle".into(),
            ));
        }

        if !self.backend.compile_shader(shader, src) {
            let mut log = self.backend.shader_info_log(shader);
            truncate_log(&mut log);
            self.backend.delete_shader(shader);
            return Err(GraphicsError::ShaderCompileFailed(log));
        }

        self.backend.attach_shader(self.handle, shader);
        self.backend.delete_shader(shader);
        Ok(())
    }

    /// Link the attached stages.
    ///
    /// Link failure is an ordinary `false`; the caller decides whether
    /// it is fatal.
    pub fn link(&mut self) -> bool {
        self.backend.link_program(self.handle)
    }

    /// Upload a uniform value to `location`.
    ///
    /// The program is made current only for the duration of the single
    /// upload; whatever program was active before is restored
    /// immediately after.
    pub fn uniform<V: UniformValue>(&self, location: i32, value: V) {
        let _bound = BindGuard::new(self);
        value.upload(self.backend.as_ref(), location);
    }
}

impl Bindable for ShaderProgram {
    type Snapshot = Handle;

    fn bind(&self) -> Handle {
        let previous = self.backend.current_program();
        self.backend.use_program(self.handle);
        previous
    }

    fn unbind(&self, snapshot: Handle) {
        self.backend.use_program(snapshot);
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        self.backend.delete_program(self.handle);
    }
}

impl fmt::Debug for ShaderProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShaderProgram")
            .field("handle", &self.handle)
            .finish()
    }
}

/// Clamp a compiler log to [`INFO_LOG_CAP`] bytes on a char boundary.
fn truncate_log(log: &mut String) {
    if log.len() > INFO_LOG_CAP {
        let mut end = INFO_LOG_CAP;
        while !log.is_char_boundary(end) {
            end -= 1;
        }
        log.truncate(end);
    }
}

/// A value uploadable to a shader uniform location.
pub trait UniformValue {
    /// Write the value to `location` on the current program.
    fn upload(&self, backend: &dyn RenderBackend, location: i32);
}

impl UniformValue for f32 {
    fn upload(&self, backend: &dyn RenderBackend, location: i32) {
        backend.uniform_f32(location, *self);
    }
}

impl UniformValue for Vector3<f32> {
    fn upload(&self, backend: &dyn RenderBackend, location: i32) {
        backend.uniform_vec3(location, [self.x, self.y, self.z]);
    }
}

impl UniformValue for Vector4<f32> {
    fn upload(&self, backend: &dyn RenderBackend, location: i32) {
        backend.uniform_vec4(location, [self.x, self.y, self.z, self.w]);
    }
}

impl UniformValue for Matrix4<f32> {
    fn upload(&self, backend: &dyn RenderBackend, location: i32) {
        let mut data = [0.0f32; 16];
        data.copy_from_slice(self.as_slice());
        backend.uniform_mat4(location, data);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::dummy::{DummyBackend, UniformWrite};

    fn recording_context() -> (Arc<DummyBackend>, Context) {
        let backend = Arc::new(DummyBackend::new());
        (Arc::clone(&backend), Context::new(backend))
    }

    #[test]
    fn test_attach_and_link() {
        let (_, ctx) = recording_context();
        let mut program = ShaderProgram::new(&ctx).unwrap();
        program
            .attach_from_src(ShaderStage::Vertex, "void main() {}")
            .unwrap();
        program
            .attach_from_src(ShaderStage::Fragment, "void main() {}")
            .unwrap();
        assert!(program.link());
    }

    #[test]
    fn test_link_without_stages_is_recoverable() {
        let (_, ctx) = recording_context();
        let mut program = ShaderProgram::new(&ctx).unwrap();
        assert!(!program.link());
    }

    #[test]
    fn test_compile_failure_carries_log() {
        let (backend, ctx) = recording_context();
        let mut program = ShaderProgram::new(&ctx).unwrap();

        let err = program
            .attach_from_src(ShaderStage::Fragment, "")
            .unwrap_err();
        match err {
            GraphicsError::ShaderCompileFailed(log) => assert!(log.contains("empty source")),
            other => panic!("unexpected error: {other}"),
        }

        // The intermediate shader object is released on the failure path.
        assert_eq!(backend.live_shaders(), 0);
    }

    #[test]
    fn test_intermediate_shader_released_on_success() {
        let (backend, ctx) = recording_context();
        let mut program = ShaderProgram::new(&ctx).unwrap();
        program
            .attach_from_src(ShaderStage::Vertex, "void main() {}")
            .unwrap();
        assert_eq!(backend.live_shaders(), 0);
    }

    #[test]
    fn test_uniform_restores_previous_program() {
        let (backend, ctx) = recording_context();
        let active = ShaderProgram::new(&ctx).unwrap();
        let other = ShaderProgram::new(&ctx).unwrap();

        backend.use_program(active.handle());
        other.uniform(3, 1.25f32);

        assert_eq!(backend.current_program(), active.handle());
        assert_eq!(
            backend.uniform_write(other.handle(), 3),
            Some(UniformWrite::Float(1.25))
        );
    }

    #[test]
    fn test_uniform_value_kinds() {
        let (backend, ctx) = recording_context();
        let program = ShaderProgram::new(&ctx).unwrap();

        program.uniform(0, Vector3::new(1.0, 2.0, 3.0));
        program.uniform(1, Vector4::new(1.0, 2.0, 3.0, 4.0));
        program.uniform(2, Matrix4::<f32>::identity());

        assert_eq!(
            backend.uniform_write(program.handle(), 0),
            Some(UniformWrite::Vec3([1.0, 2.0, 3.0]))
        );
        assert_eq!(
            backend.uniform_write(program.handle(), 1),
            Some(UniformWrite::Vec4([1.0, 2.0, 3.0, 4.0]))
        );
        let Some(UniformWrite::Mat4(mat)) = backend.uniform_write(program.handle(), 2) else {
            panic!("expected a matrix write");
        };
        assert_eq!(mat[0], 1.0);
        assert_eq!(mat[5], 1.0);
        assert_eq!(mat[1], 0.0);
    }

    #[test]
    fn test_drop_deletes_program() {
        let (backend, ctx) = recording_context();
        {
            let _program = ShaderProgram::new(&ctx).unwrap();
            assert_eq!(backend.live_programs(), 1);
        }
        assert_eq!(backend.live_programs(), 0);
    }

    #[test]
    fn test_log_truncation() {
        let mut log = "x".repeat(INFO_LOG_CAP + 100);
        truncate_log(&mut log);
        assert_eq!(log.len(), INFO_LOG_CAP);

        let mut short = String::from("fine");
        truncate_log(&mut short);
        assert_eq!(short, "fine");
    }
}

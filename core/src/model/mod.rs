//! Model-file loading.
//!
//! [`load`] converts a named model file of a declared [`ModelFormat`] into
//! a [`Mesh`]. Load failures are expected and recoverable (missing file,
//! malformed record, unsupported index width), so they never cross this
//! boundary as errors: the loader logs the reason at debug level and
//! returns `None`.
//!
//! The format is always supplied by the caller; file extensions are never
//! inspected.

mod error;
#[cfg(feature = "gltf")]
mod gltf;
mod obj;
#[cfg(test)]
mod tests;

use std::path::Path;

use crate::mesh::Mesh;

use error::LoadError;

/// Supported on-disk model formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelFormat {
    /// Line-oriented text format (`v`/`vn`/`f` records).
    Obj,
    /// Binary chunked scene format.
    #[cfg(feature = "gltf")]
    Gltf,
}

/// Load a model file into a [`Mesh`].
///
/// Reads the whole file into memory, then parses it according to
/// `format`. Returns `None` on any failure: missing or unreadable file,
/// malformed container, unsupported index component width, or index data
/// exceeding the backing buffer. The reason is logged at debug level.
pub fn load(format: ModelFormat, path: impl AsRef<Path>) -> Option<Mesh> {
    let path = path.as_ref();

    let data = match std::fs::read(path) {
        Ok(data) => data,
        Err(err) => {
            log::debug!("failed to read model file {}: {err}", path.display());
            return None;
        }
    };

    let result: Result<Mesh, LoadError> = match format {
        ModelFormat::Obj => Ok(obj::parse(&String::from_utf8_lossy(&data))),
        #[cfg(feature = "gltf")]
        ModelFormat::Gltf => gltf::parse(&data),
    };

    match result {
        Ok(mesh) => Some(mesh),
        Err(err) => {
            log::debug!("failed to load model {}: {err}", path.display());
            None
        }
    }
}

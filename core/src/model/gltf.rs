//! Binary chunked scene format (glTF).
//!
//! The container is parsed by the `gltf` crate; this module consumes the
//! accessor / buffer-view / buffer indirection for the first primitive of
//! the first mesh: the `POSITION` accessor (required), the `NORMAL`
//! accessor (optional), and the index accessor (optional, 16- or 32-bit
//! unsigned components only). Additional meshes and primitives in the
//! container are ignored.

use crate::mesh::Mesh;

use super::error::LoadError;

/// Parse a binary scene container into a mesh.
pub(super) fn parse(data: &[u8]) -> Result<Mesh, LoadError> {
    let gltf = gltf_dep::Gltf::from_slice(data)?;
    let blob = gltf.blob.clone();
    let buffers = resolve_buffers(&gltf.document, blob)?;

    let scene_mesh = gltf.document.meshes().next().ok_or(LoadError::NoGeometry)?;
    let primitive = scene_mesh
        .primitives()
        .next()
        .ok_or(LoadError::NoGeometry)?;

    let position = primitive
        .get(&gltf_dep::Semantic::Positions)
        .ok_or(LoadError::MissingPositions)?;

    let mut mesh = Mesh::new();
    mesh.vertices = read_vec3_accessor(&position, &buffers)?;

    if let Some(normal) = primitive.get(&gltf_dep::Semantic::Normals) {
        mesh.normals = read_vec3_accessor(&normal, &buffers)?;
    }

    if let Some(indices) = primitive.indices() {
        mesh.vertex_indices = read_index_accessor(&indices, &buffers)?;
    }

    Ok(mesh)
}

/// Resolve all buffer data from the parsed document.
///
/// Only the embedded binary blob is supported; external URI buffers are a
/// load failure.
fn resolve_buffers(
    document: &gltf_dep::Document,
    blob: Option<Vec<u8>>,
) -> Result<Vec<Vec<u8>>, LoadError> {
    let mut buffers = Vec::new();

    for buffer in document.buffers() {
        match buffer.source() {
            gltf_dep::buffer::Source::Bin => {
                let data = blob.as_ref().ok_or_else(|| {
                    LoadError::Buffer("binary buffer referenced but no blob present".into())
                })?;
                buffers.push(data.clone());
            }
            gltf_dep::buffer::Source::Uri(uri) => {
                return Err(LoadError::Buffer(format!(
                    "external buffer URIs not supported: {uri}"
                )));
            }
        }
    }

    Ok(buffers)
}

/// Locate an accessor's byte data and effective stride.
fn accessor_bytes<'a>(
    accessor: &gltf_dep::Accessor,
    buffers: &'a [Vec<u8>],
) -> Result<(&'a [u8], usize), LoadError> {
    let view = accessor.view().ok_or_else(|| {
        LoadError::Accessor(format!("accessor {} has no buffer view", accessor.index()))
    })?;
    let buffer_index = view.buffer().index();
    let buffer = buffers.get(buffer_index).ok_or_else(|| {
        LoadError::Buffer(format!("buffer index {buffer_index} out of range"))
    })?;

    let element_size = accessor.data_type().size() * accessor.dimensions().multiplicity();
    let stride = view.stride().unwrap_or(element_size);
    let start = view.offset() + accessor.offset();
    if start > buffer.len() {
        return Err(LoadError::Accessor(format!(
            "accessor {} starts past the end of its buffer",
            accessor.index()
        )));
    }

    Ok((&buffer[start..], stride))
}

/// Read an accessor as `count * 3` little-endian f32 values.
fn read_vec3_accessor(
    accessor: &gltf_dep::Accessor,
    buffers: &[Vec<u8>],
) -> Result<Vec<f32>, LoadError> {
    let (data, stride) = accessor_bytes(accessor, buffers)?;
    let count = accessor.count();

    let mut result = Vec::with_capacity(count * 3);
    for i in 0..count {
        let element = i * stride;
        for c in 0..3 {
            let offset = element + c * 4;
            if offset + 4 > data.len() {
                return Err(LoadError::Accessor(format!(
                    "accessor {} data ends short of element {i}",
                    accessor.index()
                )));
            }
            let bytes = [
                data[offset],
                data[offset + 1],
                data[offset + 2],
                data[offset + 3],
            ];
            result.push(f32::from_le_bytes(bytes));
        }
    }

    Ok(result)
}

/// Read the index accessor into a 32-bit index stream, widening 16-bit
/// components.
///
/// Only 16- and 32-bit unsigned components are supported, and the
/// declared `count * width` must fit in the backing buffer past the
/// view's byte offset.
fn read_index_accessor(
    accessor: &gltf_dep::Accessor,
    buffers: &[Vec<u8>],
) -> Result<Vec<u32>, LoadError> {
    use gltf_dep::accessor::DataType;

    let element_size = match accessor.data_type() {
        DataType::U16 => 2,
        DataType::U32 => 4,
        other => return Err(LoadError::UnsupportedIndexType(format!("{other:?}"))),
    };

    let view = accessor.view().ok_or_else(|| {
        LoadError::Accessor(format!("accessor {} has no buffer view", accessor.index()))
    })?;
    let buffer_index = view.buffer().index();
    let buffer = buffers.get(buffer_index).ok_or_else(|| {
        LoadError::Buffer(format!("buffer index {buffer_index} out of range"))
    })?;

    let count = accessor.count();
    let required = count * element_size;
    let available = buffer.len().saturating_sub(view.offset());
    if required > available {
        return Err(LoadError::IndexDataOutOfBounds {
            required,
            available,
        });
    }

    let stride = view.stride().unwrap_or(element_size);
    let start = view.offset() + accessor.offset();

    let mut indices = Vec::with_capacity(count);
    for i in 0..count {
        let offset = start + i * stride;
        if offset + element_size > buffer.len() {
            return Err(LoadError::IndexDataOutOfBounds {
                required,
                available,
            });
        }
        let value = match element_size {
            2 => u32::from(u16::from_le_bytes([buffer[offset], buffer[offset + 1]])),
            _ => u32::from_le_bytes([
                buffer[offset],
                buffer[offset + 1],
                buffer[offset + 2],
                buffer[offset + 3],
            ]),
        };
        indices.push(value);
    }

    Ok(indices)
}

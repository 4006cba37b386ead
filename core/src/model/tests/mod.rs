//! Loader tests over in-memory fixtures and scratch files.


use std::path::PathBuf;

/// A scratch file path in the system temp directory, unique per process.
fn temp_path(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("glint-{}-{}", name, std::process::id()));
    path
}

/// Assemble a binary glTF container from a JSON chunk and a BIN chunk.
///
/// Chunk layout: 12-byte header, then length/type-prefixed chunks, the
/// JSON chunk padded with spaces and the BIN chunk with zeros to 4-byte
/// alignment.
#[cfg(feature = "gltf")]
fn build_glb(json: &str, bin: &[u8]) -> Vec<u8> {
    let mut json_bytes = json.as_bytes().to_vec();
    while json_bytes.len() % 4 != 0 {
        json_bytes.push(b' ');
    }
    let mut bin_bytes = bin.to_vec();
    while bin_bytes.len() % 4 != 0 {
        bin_bytes.push(0);
    }

    let total = 12 + 8 + json_bytes.len() + 8 + bin_bytes.len();

    let mut glb = Vec::with_capacity(total);
    glb.extend_from_slice(&0x46546C67u32.to_le_bytes()); // magic "glTF"
    glb.extend_from_slice(&2u32.to_le_bytes());
    glb.extend_from_slice(&(total as u32).to_le_bytes());

    glb.extend_from_slice(&(json_bytes.len() as u32).to_le_bytes());
    glb.extend_from_slice(&0x4E4F534Au32.to_le_bytes()); // "JSON"
    glb.extend_from_slice(&json_bytes);

    glb.extend_from_slice(&(bin_bytes.len() as u32).to_le_bytes());
    glb.extend_from_slice(&0x004E4942u32.to_le_bytes()); // "BIN"
    glb.extend_from_slice(&bin_bytes);

    glb
}

/// JSON for a single-triangle document: positions at view 0, normals at
/// view 1, and optionally an index accessor at view 2 described by
/// `(component_type, view_len)`.
#[cfg(feature = "gltf")]
fn triangle_json(index: Option<(u32, usize)>, buffer_len: usize) -> String {
    let (index_view, index_accessor, index_ref) = match index {
        Some((component_type, view_len)) => (
            format!(r#",{{"buffer":0,"byteOffset":72,"byteLength":{view_len}}}"#),
            format!(
                r#",{{"bufferView":2,"componentType":{component_type},"count":3,"type":"SCALAR"}}"#
            ),
            r#","indices":2"#.to_string(),
        ),
        None => (String::new(), String::new(), String::new()),
    };

    format!(
        r#"{{"asset":{{"version":"2.0"}},"buffers":[{{"byteLength":{buffer_len}}}],"bufferViews":[{{"buffer":0,"byteOffset":0,"byteLength":36}},{{"buffer":0,"byteOffset":36,"byteLength":36}}{index_view}],"accessors":[{{"bufferView":0,"componentType":5126,"count":3,"type":"VEC3","min":[0.0,0.0,0.0],"max":[1.0,1.0,0.0]}},{{"bufferView":1,"componentType":5126,"count":3,"type":"VEC3"}}{index_accessor}],"meshes":[{{"primitives":[{{"attributes":{{"POSITION":0,"NORMAL":1}}{index_ref}}}]}}],"nodes":[{{"mesh":0}}],"scenes":[{{"nodes":[0]}}],"scene":0}}"#
    )
}

/// Position and normal bytes for the triangle fixtures: three vertices
/// at 0, three +Z normals at 36.
#[cfg(feature = "gltf")]
fn triangle_bin() -> Vec<u8> {
    let positions: [f32; 9] = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
    let normals: [f32; 9] = [0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0];

    let mut bin = Vec::with_capacity(72);
    for value in positions.iter().chain(normals.iter()) {
        bin.extend_from_slice(&value.to_le_bytes());
    }
    bin
}

/// A complete triangle GLB with 16-bit indices.
#[cfg(feature = "gltf")]
fn triangle_glb_u16() -> Vec<u8> {
    let mut bin = triangle_bin();
    for index in [0u16, 1, 2] {
        bin.extend_from_slice(&index.to_le_bytes());
    }
    build_glb(&triangle_json(Some((5123, 6)), 78), &bin)
}

/// A complete triangle GLB with 32-bit indices.
#[cfg(feature = "gltf")]
fn triangle_glb_u32() -> Vec<u8> {
    let mut bin = triangle_bin();
    for index in [0u32, 1, 2] {
        bin.extend_from_slice(&index.to_le_bytes());
    }
    build_glb(&triangle_json(Some((5125, 12)), 84), &bin)
}

/// A triangle GLB declaring 8-bit indices (unsupported width).
#[cfg(feature = "gltf")]
fn triangle_glb_u8() -> Vec<u8> {
    let mut bin = triangle_bin();
    bin.extend_from_slice(&[0u8, 1, 2]);
    build_glb(&triangle_json(Some((5121, 3)), 75), &bin)
}

/// A triangle GLB without an index accessor.
#[cfg(feature = "gltf")]
fn triangle_glb_non_indexed() -> Vec<u8> {
    build_glb(&triangle_json(None, 72), &triangle_bin())
}

/// A triangle GLB whose BIN chunk ends before the declared index data.
#[cfg(feature = "gltf")]
fn triangle_glb_truncated_indices() -> Vec<u8> {
    build_glb(&triangle_json(Some((5123, 6)), 78), &triangle_bin())
}

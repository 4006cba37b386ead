//! CPU-side mesh data.

/// A CPU-side triangle mesh held as four flat streams.
///
/// `vertices` stores three coordinates per vertex and `normals` three
/// coordinates per normal. `vertex_indices` holds 0-based triangle corner
/// indices into `vertices`; `normal_indices`, when non-empty, runs parallel
/// to `vertex_indices` and selects one normal per face corner.
///
/// A mesh is constructed empty, populated once by a loader, and then
/// consumed read-only by upload code. Loaders guarantee that every vertex
/// index is `< vertices.len() / 3` and every normal index is
/// `< normals.len() / 3`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex coordinates, 3 per vertex.
    pub vertices: Vec<f32>,
    /// Triangle corner indices into `vertices`.
    pub vertex_indices: Vec<u32>,
    /// Normal coordinates, 3 per normal.
    pub normals: Vec<f32>,
    /// Per-corner indices into `normals`, parallel to `vertex_indices`.
    pub normal_indices: Vec<u32>,
}

impl Mesh {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of vertices (coordinate triples).
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Number of normals (coordinate triples).
    pub fn normal_count(&self) -> usize {
        self.normals.len() / 3
    }

    /// Check if this mesh carries an index stream.
    pub fn is_indexed(&self) -> bool {
        !self.vertex_indices.is_empty()
    }

    /// Byte length of the vertex coordinate stream.
    pub fn vertices_bytelen(&self) -> usize {
        self.vertices.len() * std::mem::size_of::<f32>()
    }

    /// Byte length of the vertex index stream.
    pub fn indices_bytelen(&self) -> usize {
        self.vertex_indices.len() * std::mem::size_of::<u32>()
    }

    /// Vertex coordinate stream as raw bytes, for buffer upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Vertex index stream as raw bytes, for buffer upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertex_indices)
    }
}

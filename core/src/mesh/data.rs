//! Triangle mesh data structures.
//!
//! [`TriMesh`] is the exporter's immutable view of a host mesh: a vertex
//! position table, triangle faces carrying per-face attributes, optional
//! host-precomputed vertex normals, and up to two UV channels. UV data is
//! indexed independently of positions (a UV channel has its own vertex
//! table and its own per-face index triples), matching how DCC hosts
//! store mapping channels.

/// One triangle face with its per-face attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriFace {
    /// Indices into the mesh position table.
    pub vertices: [u32; 3],
    /// Material slot referenced by this face. May exceed the material's
    /// declared sub-material count; the exporter bounds it by modulo.
    pub material_id: u16,
    /// Smoothing group bitmask. Faces with equal masks share normals at
    /// common vertices; zero means the face smooths only with other
    /// zero-mask faces.
    pub smoothing_mask: u32,
}

impl TriFace {
    /// Create a face with material slot 0 and an empty smoothing mask.
    pub fn new(a: u32, b: u32, c: u32) -> Self {
        Self {
            vertices: [a, b, c],
            material_id: 0,
            smoothing_mask: 0,
        }
    }

    /// Set the material slot.
    #[must_use]
    pub fn with_material_id(mut self, material_id: u16) -> Self {
        self.material_id = material_id;
        self
    }

    /// Set the smoothing group bitmask.
    #[must_use]
    pub fn with_smoothing_mask(mut self, mask: u32) -> Self {
        self.smoothing_mask = mask;
        self
    }
}

/// A UV mapping channel: its own vertex table plus per-face index triples.
#[derive(Debug, Clone, Default)]
pub struct UvChannel {
    coords: Vec<[f32; 2]>,
    face_uvs: Vec<[u32; 3]>,
}

impl UvChannel {
    /// Create a channel from a UV vertex table and per-face index triples.
    ///
    /// `face_uvs` must have one triple per mesh face, in face order.
    pub fn new(coords: Vec<[f32; 2]>, face_uvs: Vec<[u32; 3]>) -> Self {
        Self { coords, face_uvs }
    }

    /// Get the UV vertex table.
    pub fn coords(&self) -> &[[f32; 2]] {
        &self.coords
    }

    /// Get the per-face UV index triples.
    pub fn face_uvs(&self) -> &[[u32; 3]] {
        &self.face_uvs
    }

    /// Resolve the UV coordinate for one face corner.
    pub fn corner_uv(&self, face: usize, corner: usize) -> [f32; 2] {
        self.coords[self.face_uvs[face][corner] as usize]
    }
}

/// An immutable triangulated mesh view.
///
/// Built by the host-integration layer and borrowed by
/// [`export_mesh`](crate::export::export_mesh) for one export call.
#[derive(Clone, Default)]
pub struct TriMesh {
    positions: Vec<[f32; 3]>,
    faces: Vec<TriFace>,
    vertex_normals: Option<Vec<[f32; 3]>>,
    uv0: Option<UvChannel>,
    uv1: Option<UvChannel>,
    label: Option<String>,
}

impl TriMesh {
    /// Create a mesh from its position table.
    pub fn new(positions: Vec<[f32; 3]>) -> Self {
        Self {
            positions,
            ..Self::default()
        }
    }

    /// Set the triangle faces.
    #[must_use]
    pub fn with_faces(mut self, faces: Vec<TriFace>) -> Self {
        self.faces = faces;
        self
    }

    /// Set host-precomputed per-vertex normals (one per position).
    #[must_use]
    pub fn with_vertex_normals(mut self, normals: Vec<[f32; 3]>) -> Self {
        self.vertex_normals = Some(normals);
        self
    }

    /// Set the first UV channel.
    #[must_use]
    pub fn with_uv0(mut self, channel: UvChannel) -> Self {
        self.uv0 = Some(channel);
        self
    }

    /// Set the second UV channel.
    #[must_use]
    pub fn with_uv1(mut self, channel: UvChannel) -> Self {
        self.uv1 = Some(channel);
        self
    }

    /// Set a debug label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Number of vertices in the position table.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangle faces.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Get the position table.
    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    /// Get one vertex position.
    pub fn position(&self, index: u32) -> [f32; 3] {
        self.positions[index as usize]
    }

    /// Get the face list.
    pub fn faces(&self) -> &[TriFace] {
        &self.faces
    }

    /// Get the host-precomputed vertex normals, if supplied.
    pub fn vertex_normals(&self) -> Option<&[[f32; 3]]> {
        self.vertex_normals.as_deref()
    }

    /// Get the first UV channel, if present.
    pub fn uv0(&self) -> Option<&UvChannel> {
        self.uv0.as_ref()
    }

    /// Get the second UV channel, if present.
    pub fn uv1(&self) -> Option<&UvChannel> {
        self.uv1.as_ref()
    }

    /// Whether the mesh carries a first UV channel.
    pub fn has_uv(&self) -> bool {
        self.uv0.is_some()
    }

    /// Whether the mesh carries a second UV channel.
    pub fn has_uv2(&self) -> bool {
        self.uv1.is_some()
    }

    /// Get the debug label.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

impl std::fmt::Debug for TriMesh {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TriMesh")
            .field("label", &self.label)
            .field("vertex_count", &self.positions.len())
            .field("face_count", &self.faces.len())
            .field("has_normals", &self.vertex_normals.is_some())
            .field("has_uv", &self.uv0.is_some())
            .field("has_uv2", &self.uv1.is_some())
            .finish()
    }
}

//! Face-corner extraction and vertex welding.
//!
//! Every face contributes three corner records. A corner is the unit of
//! deduplication: its source vertex id plus the full attribute tuple
//! (position, normal, UVs). The welder merges corners that are
//! attribute-identical under *strict bitwise* equality — no epsilon —
//! so welding can reduce buffer size but can never change shading.
//! Corners from different source vertices are never merged even when
//! geometrically identical.

use crate::cancel::CancellationToken;
use crate::math::{switched_vec3, Vec3};
use crate::mesh::TriMesh;

use super::error::ExportError;
use super::normals::NormalSource;

/// One face corner with its full attribute tuple.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct VertexCorner {
    /// Source vertex id the corner references.
    pub base_index: u32,
    /// Vertex position, host axes.
    pub position: [f32; 3],
    /// Resolved corner normal, host axes.
    pub normal: [f32; 3],
    /// First UV channel coordinate, when the mesh has one.
    pub uv: Option<[f32; 2]>,
    /// Second UV channel coordinate, when the mesh has one.
    pub uv2: Option<[f32; 2]>,
}

impl VertexCorner {
    /// Strict equality over the full attribute tuple.
    ///
    /// Floats compare by bit pattern: two corners are the same vertex
    /// only when every attribute is exactly the value already emitted.
    fn same_attributes(&self, other: &Self) -> bool {
        self.base_index == other.base_index
            && bits3(self.position) == bits3(other.position)
            && bits3(self.normal) == bits3(other.normal)
            && self.uv.map(bits2) == other.uv.map(bits2)
            && self.uv2.map(bits2) == other.uv2.map(bits2)
    }
}

fn bits3(v: [f32; 3]) -> [u32; 3] {
    [v[0].to_bits(), v[1].to_bits(), v[2].to_bits()]
}

fn bits2(v: [f32; 2]) -> [u32; 2] {
    [v[0].to_bits(), v[1].to_bits()]
}

/// A corner accepted into the output vertex buffer.
#[derive(Debug, Clone)]
pub(crate) struct GlobalVertex {
    /// The accepted corner attributes.
    pub corner: VertexCorner,
    /// Index assigned in the output vertex buffer.
    pub current_index: u32,
}

/// Deduplicating vertex-buffer builder.
///
/// In optimization mode, previously emitted vertices are tracked per
/// source vertex id: an arena of [`GlobalVertex`] records plus, for each
/// `base_index`, a small list of arena indices. A new corner only ever
/// scans the list of its own source vertex, so the search is bounded by
/// per-vertex valence rather than output size. Without optimization the
/// builder appends unconditionally.
pub(crate) struct VertexWelder {
    vertices: Vec<GlobalVertex>,
    candidates: Option<Vec<Vec<u32>>>,
}

impl VertexWelder {
    /// Create a welder. `source_vertex_count` sizes the candidate table
    /// in optimization mode.
    pub fn new(source_vertex_count: usize, optimize: bool) -> Self {
        Self {
            vertices: Vec::new(),
            candidates: optimize.then(|| vec![Vec::new(); source_vertex_count]),
        }
    }

    /// Accept a corner, returning its output vertex-buffer index.
    ///
    /// Reuses an existing vertex only on a strict attribute match
    /// against corners sharing the same `base_index`.
    pub fn add(&mut self, corner: VertexCorner) -> u32 {
        if let Some(candidates) = &mut self.candidates {
            let list = &mut candidates[corner.base_index as usize];
            for &arena_index in list.iter() {
                let existing = &self.vertices[arena_index as usize];
                if existing.corner.same_attributes(&corner) {
                    return existing.current_index;
                }
            }
            let index = self.vertices.len() as u32;
            list.push(index);
            self.vertices.push(GlobalVertex {
                corner,
                current_index: index,
            });
            index
        } else {
            let index = self.vertices.len() as u32;
            self.vertices.push(GlobalVertex {
                corner,
                current_index: index,
            });
            index
        }
    }

    /// Number of vertices accepted so far.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn into_vertices(self) -> Vec<GlobalVertex> {
        self.vertices
    }
}

/// Flat vertex streams in runtime axes, ready for the payload.
pub(crate) struct VertexBuffers {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub uvs: Option<Vec<f32>>,
    pub uvs2: Option<Vec<f32>>,
}

/// Geometry produced by one extraction pass: the welded vertex buffer,
/// the per-corner index stream in face order, and the bounded material
/// slot of every face.
pub(crate) struct GeometryBuffers {
    pub vertices: Vec<GlobalVertex>,
    pub indices: Vec<u32>,
    pub face_materials: Vec<u32>,
}

impl GeometryBuffers {
    /// Number of vertices in the output buffer.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Flatten the vertex buffer into runtime-axis streams.
    ///
    /// Positions and normals swap Y/Z into the runtime system; UVs pass
    /// through untouched.
    pub fn vertex_buffers(&self, has_uv: bool, has_uv2: bool) -> VertexBuffers {
        let count = self.vertices.len();
        let mut positions = Vec::with_capacity(count * 3);
        let mut normals = Vec::with_capacity(count * 3);
        let mut uvs = has_uv.then(|| Vec::with_capacity(count * 2));
        let mut uvs2 = has_uv2.then(|| Vec::with_capacity(count * 2));

        for vertex in &self.vertices {
            positions.extend_from_slice(&switched_vec3(Vec3::from(vertex.corner.position)));
            normals.extend_from_slice(&switched_vec3(Vec3::from(vertex.corner.normal)));
            if let Some(buf) = &mut uvs {
                buf.extend_from_slice(&vertex.corner.uv.unwrap_or_default());
            }
            if let Some(buf) = &mut uvs2 {
                buf.extend_from_slice(&vertex.corner.uv2.unwrap_or_default());
            }
        }

        VertexBuffers {
            positions,
            normals,
            uvs,
            uvs2,
        }
    }
}

/// Walk every face in index order and build the geometry buffers.
///
/// `parity` reverses the corner order to `(2, 1, 0)` so outward winding
/// survives a mirrored node transform. Face material slots are bounded
/// into `[0, max(sub_material_count, 1))` by modulo. Cancellation is
/// polled once per face.
pub(crate) fn build_geometry(
    mesh: &TriMesh,
    normals: &NormalSource,
    parity: bool,
    sub_material_count: u32,
    optimize: bool,
    token: &CancellationToken,
) -> Result<GeometryBuffers, ExportError> {
    let corner_order: [usize; 3] = if parity { [2, 1, 0] } else { [0, 1, 2] };
    let slots = sub_material_count.max(1);

    let mut welder = VertexWelder::new(mesh.vertex_count(), optimize);
    let mut indices = Vec::with_capacity(mesh.face_count() * 3);
    let mut face_materials = Vec::with_capacity(mesh.face_count());

    for (face_index, face) in mesh.faces().iter().enumerate() {
        if token.is_cancelled() {
            return Err(ExportError::Cancelled);
        }
        for &corner in &corner_order {
            indices.push(welder.add(make_corner(mesh, normals, face_index, corner)));
        }
        face_materials.push(face.material_id as u32 % slots);
    }

    Ok(GeometryBuffers {
        vertices: welder.into_vertices(),
        indices,
        face_materials,
    })
}

fn make_corner(
    mesh: &TriMesh,
    normals: &NormalSource,
    face_index: usize,
    corner: usize,
) -> VertexCorner {
    let face = &mesh.faces()[face_index];
    let base_index = face.vertices[corner];
    VertexCorner {
        base_index,
        position: mesh.position(base_index),
        normal: normals.corner_normal(base_index, face.smoothing_mask),
        uv: mesh.uv0().map(|channel| channel.corner_uv(face_index, corner)),
        uv2: mesh.uv1().map(|channel| channel.corner_uv(face_index, corner)),
    }
}

//! Per-corner normal resolution.
//!
//! Two mutually exclusive strategies, picked once per export:
//!
//! - **Per-vertex** (vertex optimization off): one normal per source
//!   vertex, so corners sharing a vertex always shade identically. This
//!   deliberately disables smoothing-group faceting and is what makes
//!   the non-welding path safe.
//! - **Smoothing groups** (vertex optimization on): a resolved-normal
//!   table keyed by `(vertex, smoothing mask)`, built once per mesh.
//!   Faces with different masks at a shared vertex receive different
//!   normals there, which is why welding keys on the full attribute
//!   tuple rather than the vertex id alone.
//!
//! Both strategies always return a value; there is no failure mode.

use crate::math::Vec3;
use crate::mesh::{TriFace, TriMesh};

/// Normal used for degenerate faces and misses, host axes (Z-up).
const FALLBACK_NORMAL: [f32; 3] = [0.0, 0.0, 1.0];

/// Per-corner normal provider for one export call.
pub(crate) enum NormalSource {
    /// One normal per source vertex.
    PerVertex(Vec<[f32; 3]>),
    /// Normals keyed by `(vertex, smoothing mask)`.
    Smoothing(SmoothingTable),
}

impl NormalSource {
    /// Build the provider for `mesh`.
    ///
    /// With optimization off, the host's precomputed table is used when
    /// present and otherwise derived by area-weighted averaging over all
    /// adjacent faces.
    pub fn build(mesh: &TriMesh, optimize: bool) -> Self {
        if optimize {
            Self::Smoothing(SmoothingTable::build(mesh))
        } else {
            let table = match mesh.vertex_normals() {
                Some(normals) => normals.to_vec(),
                None => averaged_vertex_normals(mesh),
            };
            Self::PerVertex(table)
        }
    }

    /// Resolve the normal for a face corner.
    pub fn corner_normal(&self, vertex: u32, smoothing_mask: u32) -> [f32; 3] {
        match self {
            Self::PerVertex(table) => table
                .get(vertex as usize)
                .copied()
                .unwrap_or(FALLBACK_NORMAL),
            Self::Smoothing(table) => table.lookup(vertex, smoothing_mask),
        }
    }
}

/// Resolved-normal table keyed by `(vertex, smoothing mask)`.
///
/// Per vertex, a short list of `(mask, normal)` entries: each face's
/// area-weighted normal is accumulated into the entry with the exact
/// same mask at each of the face's vertices, then the sums are
/// normalized. Lists stay tiny (one entry per distinct mask meeting at
/// the vertex), so lookups are linear scans.
pub(crate) struct SmoothingTable {
    entries: Vec<Vec<(u32, [f32; 3])>>,
}

impl SmoothingTable {
    fn build(mesh: &TriMesh) -> Self {
        let mut entries: Vec<Vec<(u32, [f32; 3])>> = vec![Vec::new(); mesh.vertex_count()];

        for face in mesh.faces() {
            let n = face_normal(mesh, face);
            for &v in &face.vertices {
                let list = &mut entries[v as usize];
                match list.iter_mut().find(|(mask, _)| *mask == face.smoothing_mask) {
                    Some((_, acc)) => {
                        acc[0] += n.x;
                        acc[1] += n.y;
                        acc[2] += n.z;
                    }
                    None => list.push((face.smoothing_mask, [n.x, n.y, n.z])),
                }
            }
        }

        for list in &mut entries {
            for (_, acc) in list.iter_mut() {
                *acc = normalize_or_fallback(*acc);
            }
        }

        Self { entries }
    }

    fn lookup(&self, vertex: u32, smoothing_mask: u32) -> [f32; 3] {
        self.entries
            .get(vertex as usize)
            .and_then(|list| list.iter().find(|(mask, _)| *mask == smoothing_mask))
            .map(|(_, normal)| *normal)
            .unwrap_or(FALLBACK_NORMAL)
    }
}

/// Derive a per-vertex table by area-weighted accumulation over all
/// adjacent faces, ignoring smoothing masks.
fn averaged_vertex_normals(mesh: &TriMesh) -> Vec<[f32; 3]> {
    let mut table = vec![[0.0f32; 3]; mesh.vertex_count()];

    for face in mesh.faces() {
        let n = face_normal(mesh, face);
        for &v in &face.vertices {
            let acc = &mut table[v as usize];
            acc[0] += n.x;
            acc[1] += n.y;
            acc[2] += n.z;
        }
    }

    for acc in &mut table {
        *acc = normalize_or_fallback(*acc);
    }

    table
}

/// Area-weighted face normal (unnormalized cross product).
fn face_normal(mesh: &TriMesh, face: &TriFace) -> Vec3 {
    let p0 = Vec3::from(mesh.position(face.vertices[0]));
    let p1 = Vec3::from(mesh.position(face.vertices[1]));
    let p2 = Vec3::from(mesh.position(face.vertices[2]));
    (p1 - p0).cross(&(p2 - p0))
}

fn normalize_or_fallback(v: [f32; 3]) -> [f32; 3] {
    let vec = Vec3::from(v);
    let len = vec.norm();
    if len > 1e-6 {
        let n = vec / len;
        [n.x, n.y, n.z]
    } else {
        FALLBACK_NORMAL
    }
}

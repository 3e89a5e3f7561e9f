//! Mesh generators for common shapes.
//!
//! These generators produce [`TriMesh`] values for tests and benchmarks.
//! They intentionally build meshes the way a DCC host would hand them
//! over: an indexed position table, per-face attributes, and (for the
//! sphere) a UV channel indexed per face corner.

use std::f32::consts::PI;

use super::data::{TriFace, TriMesh, UvChannel};

/// Generate an axis-aligned cube.
///
/// 8 vertices and 12 triangles with outward winding, all faces on
/// material slot 0 with an empty smoothing mask.
pub fn generate_cube(half_extent: f32) -> TriMesh {
    let h = half_extent;
    let positions = vec![
        [-h, -h, -h],
        [h, -h, -h],
        [h, h, -h],
        [-h, h, -h],
        [-h, -h, h],
        [h, -h, h],
        [h, h, h],
        [-h, h, h],
    ];

    const QUAD_TRIS: [[u32; 3]; 12] = [
        [0, 2, 1],
        [0, 3, 2],
        [4, 5, 6],
        [4, 6, 7],
        [0, 1, 5],
        [0, 5, 4],
        [3, 6, 2],
        [3, 7, 6],
        [0, 4, 7],
        [0, 7, 3],
        [1, 6, 5],
        [1, 2, 6],
    ];

    let faces = QUAD_TRIS
        .iter()
        .map(|&[a, b, c]| TriFace::new(a, b, c))
        .collect();

    TriMesh::new(positions).with_faces(faces).with_label("cube")
}

/// Generate a flat grid on the XY plane.
///
/// `(segments_x + 1) * (segments_y + 1)` vertices and
/// `2 * segments_x * segments_y` triangles, all in smoothing group 1 on
/// material slot 0. Useful for building meshes with exact vertex counts.
pub fn generate_grid(segments_x: u32, segments_y: u32, spacing: f32) -> TriMesh {
    let mut positions = Vec::with_capacity(((segments_x + 1) * (segments_y + 1)) as usize);
    for y in 0..=segments_y {
        for x in 0..=segments_x {
            positions.push([x as f32 * spacing, y as f32 * spacing, 0.0]);
        }
    }

    let stride = segments_x + 1;
    let mut faces = Vec::with_capacity((segments_x * segments_y * 2) as usize);
    for y in 0..segments_y {
        for x in 0..segments_x {
            let v0 = y * stride + x;
            let v1 = v0 + 1;
            let v2 = v0 + stride;
            let v3 = v2 + 1;
            faces.push(TriFace::new(v0, v1, v2).with_smoothing_mask(1));
            faces.push(TriFace::new(v1, v3, v2).with_smoothing_mask(1));
        }
    }

    TriMesh::new(positions).with_faces(faces).with_label("grid")
}

/// Generate a UV sphere.
///
/// `(rings + 1) * (segments + 1)` vertices and `2 * rings * segments`
/// triangles, all in smoothing group 1, with a per-vertex UV channel.
///
/// # Arguments
///
/// * `radius` - Sphere radius
/// * `segments` - Number of longitudinal segments (around the equator)
/// * `rings` - Number of latitudinal rings (from pole to pole)
pub fn generate_sphere(radius: f32, segments: u32, rings: u32) -> TriMesh {
    let mut positions = Vec::new();
    let mut uvs = Vec::new();

    for ring in 0..=rings {
        let theta = ring as f32 * PI / rings as f32;
        let sin_theta = theta.sin();
        let cos_theta = theta.cos();

        for segment in 0..=segments {
            let phi = segment as f32 * 2.0 * PI / segments as f32;
            let x = sin_theta * phi.cos();
            let y = cos_theta;
            let z = sin_theta * phi.sin();

            positions.push([x * radius, y * radius, z * radius]);
            uvs.push([segment as f32 / segments as f32, ring as f32 / rings as f32]);
        }
    }

    let mut faces = Vec::new();
    let mut face_uvs = Vec::new();
    for ring in 0..rings {
        for segment in 0..segments {
            let current = ring * (segments + 1) + segment;
            let next = current + segments + 1;

            faces.push(TriFace::new(current, next, current + 1).with_smoothing_mask(1));
            face_uvs.push([current, next, current + 1]);

            faces.push(TriFace::new(current + 1, next, next + 1).with_smoothing_mask(1));
            face_uvs.push([current + 1, next, next + 1]);
        }
    }

    TriMesh::new(positions)
        .with_faces(faces)
        .with_uv0(UvChannel::new(uvs, face_uvs))
        .with_label("sphere")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_cube() {
        let mesh = generate_cube(0.5);
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.face_count(), 12);
        assert!(!mesh.has_uv());
    }

    #[test]
    fn test_generate_grid_counts() {
        let mesh = generate_grid(4, 3, 1.0);
        // (4+1) * (3+1) = 20 vertices, 2 * 4 * 3 = 24 faces
        assert_eq!(mesh.vertex_count(), 20);
        assert_eq!(mesh.face_count(), 24);
    }

    #[test]
    fn test_generate_sphere_counts() {
        let mesh = generate_sphere(1.0, 8, 4);
        // (4+1) * (8+1) = 45 vertices, 2 * 4 * 8 = 64 faces
        assert_eq!(mesh.vertex_count(), 45);
        assert_eq!(mesh.face_count(), 64);
        assert!(mesh.has_uv());
        assert_eq!(mesh.uv0().unwrap().face_uvs().len(), 64);
    }

    #[test]
    fn test_grid_face_indices_in_range() {
        let mesh = generate_grid(2, 2, 1.0);
        let max = mesh.vertex_count() as u32;
        for face in mesh.faces() {
            assert!(face.vertices.iter().all(|&v| v < max));
        }
    }
}

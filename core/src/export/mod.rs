//! Mesh export pipeline.
//!
//! Converts one host mesh node into a renderer-ready [`MeshPayload`]:
//! a welded vertex buffer, an index buffer regrouped into per-material
//! submesh ranges, and the node's animation curves.
//!
//! # Pipeline
//!
//! 1. Read node metadata, evaluate the frame-0 transform, and detect
//!    mirror parity (drives winding correction).
//! 2. Resolve per-corner normals — a precomputed per-vertex table, or a
//!    smoothing-group-keyed table when vertex optimization is on.
//! 3. Walk faces, emitting three corners each, and weld them into the
//!    output vertex buffer under strict attribute equality.
//! 4. Partition the index buffer by material slot into submesh ranges.
//! 5. Export the four animation channels, translating native controller
//!    keys directly or densely sampling the node transform.
//!
//! # Degraded output
//!
//! Geometry problems (no faces, too few vertices, the 65536-vertex
//! index ceiling) are reported as [`ExportWarning`]s in the payload and
//! logged; the mesh is still emitted. Only cancellation aborts.
//!
//! # Example
//!
//! ```ignore
//! use meshport_core::cancel::CancellationToken;
//! use meshport_core::export::export_mesh;
//! use meshport_core::scene::FrameRange;
//!
//! let token = CancellationToken::new();
//! let payload = export_mesh(&node, &mesh, FrameRange::new(0, 100), &token)?
//!     .expect("node opted out of export");
//! println!("{} vertices, {} submeshes", payload.vertex_count(), payload.submeshes.len());
//! ```

mod animation;
mod error;
mod geometry;
mod normals;
mod submesh;
#[cfg(test)]
mod tests;
pub mod types;

pub use error::{ExportError, ExportWarning};
pub use types::*;

use crate::cancel::CancellationToken;
use crate::math::{self, Vec3};
use crate::mesh::TriMesh;
use crate::scene::{props, FrameRange, HostNode};

use normals::NormalSource;

/// Vertex counts at or above this no longer fit a 16-bit index buffer.
const VERTEX_CEILING: usize = 65536;

/// Export one mesh node.
///
/// Returns `Ok(None)` when the node opts out via the
/// [`props::NO_EXPORT`] property, and `Err(ExportError::Cancelled)`
/// when `token` fires mid-pipeline — in that case any partial output is
/// discarded. Every other outcome produces a payload; degraded meshes
/// carry their problems in [`MeshPayload::warnings`].
///
/// # Arguments
///
/// * `node` - Host node being exported; supplies transforms, custom
///   properties, material info, and animation controllers.
/// * `mesh` - Triangulated mesh view for the node.
/// * `range` - The scene's active time range, used by the dense
///   animation-sampling fallback.
/// * `token` - Cooperative cancellation flag, polled at iteration
///   boundaries.
pub fn export_mesh(
    node: &dyn HostNode,
    mesh: &TriMesh,
    range: FrameRange,
    token: &CancellationToken,
) -> Result<Option<MeshPayload>, ExportError> {
    if node.bool_prop(props::NO_EXPORT) {
        return Ok(None);
    }
    if token.is_cancelled() {
        return Err(ExportError::Cancelled);
    }

    let mut warnings = Vec::new();

    // Frame-0 transform: static TRS for the payload, parity for winding.
    let wm = node.node_transform(0, node.has_parent());
    let parts = math::decompose_affine(&wm);

    // Degraded-geometry checks: warn and keep going.
    if mesh.face_count() == 0 {
        push_warning(node, &mut warnings, ExportWarning::EmptyMesh);
    }
    if mesh.vertex_count() < 3 {
        push_warning(
            node,
            &mut warnings,
            ExportWarning::InsufficientVertices {
                count: mesh.vertex_count(),
            },
        );
    }
    if mesh.vertex_count() >= VERTEX_CEILING {
        push_warning(
            node,
            &mut warnings,
            ExportWarning::VertexCeilingExceeded {
                count: mesh.vertex_count(),
                after_weld: false,
                hint_optimize: false,
            },
        );
    }

    let optimize = node.bool_prop(props::OPTIMIZE_VERTICES);
    let normals = NormalSource::build(mesh, optimize);
    let geometry = geometry::build_geometry(
        mesh,
        &normals,
        parts.parity,
        node.sub_material_count(),
        optimize,
        token,
    )?;

    if geometry.vertex_count() >= VERTEX_CEILING {
        push_warning(
            node,
            &mut warnings,
            ExportWarning::VertexCeilingExceeded {
                count: geometry.vertex_count(),
                after_weld: true,
                hint_optimize: !optimize,
            },
        );
    }

    log::info!(
        "exported {}: {} vertices, {} faces",
        node.name(),
        geometry.vertex_count(),
        mesh.face_count()
    );

    let (indices, submeshes) = submesh::partition_submeshes(
        &geometry.indices,
        &geometry.face_materials,
        node.sub_material_count(),
        token,
    )?;

    let animations = animation::export_animations(node, range, token)?;

    let buffers = geometry.vertex_buffers(mesh.has_uv(), mesh.has_uv2());
    let index_format = IndexFormat::for_vertex_count(geometry.vertex_count());

    let offset = node.object_offset();
    let pivot = math::mat4_from_scale_rotation_translation(
        Vec3::from(offset.scale),
        math::quat_from_xyzw(
            offset.rotation[0],
            offset.rotation[1],
            offset.rotation[2],
            offset.rotation[3],
        ),
        Vec3::from(offset.position),
    );

    let auto_animate = node.bool_prop(props::AUTO_ANIMATE).then(|| AutoAnimate {
        from: node.float_prop(props::AUTO_ANIMATE_FROM) as i32,
        to: node.float_prop(props::AUTO_ANIMATE_TO) as i32,
        looping: node.bool_prop(props::AUTO_ANIMATE_LOOP),
    });

    let flags = NodeFlags {
        visible: node.renderable(),
        pickable: node.bool_prop(props::PICKABLE),
        receive_shadows: node.receives_shadows(),
        show_bounding_box: node.bool_prop(props::SHOW_BOUNDING_BOX),
        show_submeshes_bounding_box: node.bool_prop(props::SHOW_SUBMESHES_BOUNDING_BOX),
        check_collisions: node.bool_prop(props::CHECK_COLLISIONS),
    };

    Ok(Some(MeshPayload {
        name: node.name().to_string(),
        id: node.id(),
        parent_id: node.parent_id(),
        material_id: node.material_id(),
        position: math::switched_vec3(parts.translation),
        rotation_quaternion: math::switched_quat(parts.rotation),
        scaling: math::switched_vec3(parts.scale),
        pivot_matrix: math::mat4_to_array(&pivot),
        visibility: node.visibility(0),
        flags,
        positions: buffers.positions,
        normals: buffers.normals,
        uvs: buffers.uvs,
        uvs2: buffers.uvs2,
        indices,
        index_format,
        submeshes,
        animations,
        auto_animate,
        warnings,
    }))
}

fn push_warning(node: &dyn HostNode, warnings: &mut Vec<ExportWarning>, warning: ExportWarning) {
    log::warn!("{}: {}", node.name(), warning);
    warnings.push(warning);
}

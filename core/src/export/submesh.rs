//! Material-slot partitioning of the index buffer.
//!
//! Rebuilds the flat index stream grouped by material slot so each slot
//! renders as one contiguous index range. Slot order is ascending, face
//! order is preserved inside a slot (downstream output must stay
//! deterministic), and slots with no triangles are omitted.

use crate::cancel::CancellationToken;

use super::error::ExportError;
use super::types::Submesh;

/// Partition `indices` (three per face, face order) by each face's
/// bounded material slot.
///
/// Returns the regrouped index buffer and one [`Submesh`] per non-empty
/// slot in `[0, max(sub_material_count, 1))`. The per-submesh vertex
/// bounds are the inclusive min/max vertex index referenced by the
/// slot's triangles. Cancellation is polled once per slot.
pub(crate) fn partition_submeshes(
    indices: &[u32],
    face_materials: &[u32],
    sub_material_count: u32,
    token: &CancellationToken,
) -> Result<(Vec<u32>, Vec<Submesh>), ExportError> {
    let slots = sub_material_count.max(1);

    let mut sorted_indices = Vec::with_capacity(indices.len());
    let mut submeshes = Vec::new();
    let mut index_start = 0u32;

    for slot in 0..slots {
        if token.is_cancelled() {
            return Err(ExportError::Cancelled);
        }

        let mut index_count = 0u32;
        let mut min_vertex = u32::MAX;
        let mut max_vertex = 0u32;

        for (face, &material) in face_materials.iter().enumerate() {
            if material != slot {
                continue;
            }
            let tri = &indices[face * 3..face * 3 + 3];
            sorted_indices.extend_from_slice(tri);
            index_count += 3;
            for &index in tri {
                min_vertex = min_vertex.min(index);
                max_vertex = max_vertex.max(index);
            }
        }

        if index_count != 0 {
            submeshes.push(Submesh {
                material_index: slot,
                index_start,
                index_count,
                vertices_start: min_vertex,
                vertices_count: max_vertex - min_vertex + 1,
            });
            index_start += index_count;
        }
    }

    Ok((sorted_indices, submeshes))
}

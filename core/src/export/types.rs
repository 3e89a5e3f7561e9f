//! Renderer-ready payload types produced by the export pipeline.
//!
//! All buffers use plain `Vec<f32>` / `Vec<u32>` with runtime-axis
//! values; serialization and GPU layout are the caller's concern.

use super::error::ExportWarning;

/// Index width the payload's index buffer fits into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IndexFormat {
    /// 16-bit indices (vertex count below 65536).
    #[default]
    Uint16,
    /// 32-bit indices.
    Uint32,
}

impl IndexFormat {
    /// Size in bytes of one index.
    pub fn size(&self) -> usize {
        match self {
            Self::Uint16 => 2,
            Self::Uint32 => 4,
        }
    }

    /// Pick the narrowest format able to address `vertex_count` vertices.
    pub fn for_vertex_count(vertex_count: usize) -> Self {
        if vertex_count > u16::MAX as usize {
            Self::Uint32
        } else {
            Self::Uint16
        }
    }
}

/// Animated node property a curve targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationProperty {
    /// Node translation, 3 components per key.
    Position,
    /// Node rotation quaternion, 4 components per key.
    RotationQuaternion,
    /// Node scale, 3 components per key.
    Scaling,
    /// Node visibility scalar, 1 component per key.
    Visibility,
}

impl AnimationProperty {
    /// Number of f32 components per key for this property.
    pub fn component_count(&self) -> usize {
        match self {
            Self::Position | Self::Scaling => 3,
            Self::RotationQuaternion => 4,
            Self::Visibility => 1,
        }
    }
}

/// One animation key: a frame and its value components.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationKey {
    /// Frame the key sits on.
    pub frame: i32,
    /// Value components in runtime axes; length matches the curve
    /// property's [`AnimationProperty::component_count`].
    pub values: Vec<f32>,
}

impl AnimationKey {
    /// Create a key.
    pub fn new(frame: i32, values: Vec<f32>) -> Self {
        Self { frame, values }
    }
}

/// A keyed curve targeting one node property.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationCurve {
    /// Targeted property.
    pub property: AnimationProperty,
    /// Keys in ascending frame order.
    pub keys: Vec<AnimationKey>,
}

impl AnimationCurve {
    /// Create a curve.
    pub fn new(property: AnimationProperty, keys: Vec<AnimationKey>) -> Self {
        Self { property, keys }
    }
}

/// A contiguous index-buffer range rendered with one material slot.
///
/// `vertices_start` / `vertices_count` bound the inclusive interval of
/// vertex indices the range references (min and max referenced index),
/// not a distinct-vertex count; indices inside the interval may go
/// unused by this submesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submesh {
    /// Material slot this range is rendered with.
    pub material_index: u32,
    /// First index of the range in the payload index buffer.
    pub index_start: u32,
    /// Number of indices in the range (a multiple of 3).
    pub index_count: u32,
    /// Smallest vertex index referenced by the range.
    pub vertices_start: u32,
    /// Width of the referenced vertex-index interval
    /// (`max - min + 1`).
    pub vertices_count: u32,
}

/// Runtime behavior flags carried over from the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NodeFlags {
    /// Node is renderable.
    pub visible: bool,
    /// Mesh can be picked at runtime.
    pub pickable: bool,
    /// Mesh receives shadows.
    pub receive_shadows: bool,
    /// Show the mesh bounding box.
    pub show_bounding_box: bool,
    /// Show per-submesh bounding boxes.
    pub show_submeshes_bounding_box: bool,
    /// Run collision checks against the mesh.
    pub check_collisions: bool,
}

/// Auto-played animation range configured on the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoAnimate {
    /// First frame of the auto-played range.
    pub from: i32,
    /// Last frame of the auto-played range.
    pub to: i32,
    /// Whether playback loops.
    pub looping: bool,
}

/// The renderer-ready result of exporting one mesh node.
///
/// Built fresh per export call; nothing in it aliases host data.
#[derive(Debug, Clone, Default)]
pub struct MeshPayload {
    /// Node display name.
    pub name: String,
    /// Stable node id.
    pub id: String,
    /// Id of the parent node, if any.
    pub parent_id: Option<String>,
    /// Id of the assigned material, if any. The caller keeps the
    /// process-wide registry of referenced materials.
    pub material_id: Option<String>,

    /// Node translation at frame 0, runtime axes.
    pub position: [f32; 3],
    /// Node rotation quaternion at frame 0, runtime axes. Not
    /// guaranteed unit length when the node transform carries shear or
    /// non-uniform scale.
    pub rotation_quaternion: [f32; 4],
    /// Node scale at frame 0, runtime axes.
    pub scaling: [f32; 3],
    /// Pivot matrix composed from the node's object offset,
    /// column-major.
    pub pivot_matrix: [f32; 16],
    /// Visibility scalar at frame 0.
    pub visibility: f32,
    /// Runtime behavior flags.
    pub flags: NodeFlags,

    /// Vertex positions, 3 f32 per vertex.
    pub positions: Vec<f32>,
    /// Vertex normals, 3 f32 per vertex.
    pub normals: Vec<f32>,
    /// First UV channel, 2 f32 per vertex, when the source had one.
    pub uvs: Option<Vec<f32>>,
    /// Second UV channel, 2 f32 per vertex, when the source had one.
    pub uvs2: Option<Vec<f32>>,
    /// Triangle indices, grouped per submesh.
    pub indices: Vec<u32>,
    /// Narrowest index width the buffer fits into.
    pub index_format: IndexFormat,
    /// Per-material index ranges, in slot order, empty slots omitted.
    pub submeshes: Vec<Submesh>,

    /// Exported animation curves.
    pub animations: Vec<AnimationCurve>,
    /// Auto-play configuration, when enabled on the node.
    pub auto_animate: Option<AutoAnimate>,

    /// Non-fatal problems found during export.
    pub warnings: Vec<ExportWarning>,
}

impl MeshPayload {
    /// Number of vertices in the payload buffers.
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Number of triangles in the index buffer.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Narrow the index buffer to u16, when every index fits.
    pub fn indices_u16(&self) -> Option<Vec<u16>> {
        if self.index_format != IndexFormat::Uint16 {
            return None;
        }
        self.indices
            .iter()
            .map(|&i| u16::try_from(i).ok())
            .collect()
    }

    /// Raw little-endian bytes of the index buffer at its chosen width.
    pub fn index_bytes(&self) -> Vec<u8> {
        match self.indices_u16() {
            Some(narrow) => bytemuck::cast_slice(&narrow).to_vec(),
            None => bytemuck::cast_slice(&self.indices).to_vec(),
        }
    }

    /// Raw bytes of the position buffer.
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }
}

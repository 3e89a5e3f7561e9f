//! Host node trait and the input types it hands to the exporter.

use crate::math::Mat4;

/// Well-known custom property names read off exported nodes.
///
/// The host UI exposes these as per-node toggles; the exporter reads
/// them verbatim through [`HostNode::bool_prop`] / [`HostNode::float_prop`].
pub mod props {
    /// Skip the node entirely.
    pub const NO_EXPORT: &str = "meshport_no_export";
    /// Weld attribute-identical face corners into shared vertices.
    pub const OPTIMIZE_VERTICES: &str = "meshport_optimize_vertices";
    /// Mark the mesh pickable at runtime.
    pub const PICKABLE: &str = "meshport_pickable";
    /// Show the mesh bounding box at runtime.
    pub const SHOW_BOUNDING_BOX: &str = "meshport_show_bounding_box";
    /// Show per-submesh bounding boxes at runtime.
    pub const SHOW_SUBMESHES_BOUNDING_BOX: &str = "meshport_show_submeshes_bounding_box";
    /// Enable collision checks against the mesh at runtime.
    pub const CHECK_COLLISIONS: &str = "meshport_check_collisions";
    /// Start playing the node's animations on scene load.
    pub const AUTO_ANIMATE: &str = "meshport_auto_animate";
    /// First frame of the auto-played range.
    pub const AUTO_ANIMATE_FROM: &str = "meshport_auto_animate_from";
    /// Last frame of the auto-played range.
    pub const AUTO_ANIMATE_TO: &str = "meshport_auto_animate_to";
    /// Loop the auto-played range.
    pub const AUTO_ANIMATE_LOOP: &str = "meshport_auto_animate_loop";
}

/// The scene's active time range, in frames, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRange {
    /// First frame.
    pub start: i32,
    /// Last frame (inclusive).
    pub end: i32,
}

impl FrameRange {
    /// Create a range covering `start..=end`.
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    /// Iterate every frame in the range.
    pub fn frames(&self) -> impl Iterator<Item = i32> {
        self.start..=self.end
    }

    /// Number of frames in the range.
    pub fn frame_count(&self) -> usize {
        if self.end < self.start {
            0
        } else {
            (self.end - self.start + 1) as usize
        }
    }
}

/// One native keyframe extracted from a host animation controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe<T> {
    /// Frame the key sits on.
    pub frame: i32,
    /// Key value, in host axes.
    pub value: T,
}

impl<T> Keyframe<T> {
    /// Create a keyframe.
    pub fn new(frame: i32, value: T) -> Self {
        Self { frame, value }
    }
}

/// Result of introspecting a host animation controller.
///
/// A controller of a directly-translatable kind (linear or TCB keyframe
/// controllers) yields its native keys verbatim; anything else —
/// procedural controllers, scripted controllers, or no controller at
/// all — reports [`ControllerKeys::NotTranslatable`] and the exporter
/// falls back to dense per-frame sampling.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ControllerKeys {
    /// Native vector keys (position or scale controllers).
    Vector3Keys(Vec<Keyframe<[f32; 3]>>),
    /// Native quaternion keys (rotation controllers).
    QuaternionKeys(Vec<Keyframe<[f32; 4]>>),
    /// Native scalar keys (visibility controllers).
    FloatKeys(Vec<Keyframe<f32>>),
    /// The controller cannot be translated key-for-key.
    #[default]
    NotTranslatable,
}

/// A node's object-offset (pivot) components, in host axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectOffset {
    /// Offset translation.
    pub position: [f32; 3],
    /// Offset rotation quaternion `[x, y, z, w]`.
    pub rotation: [f32; 4],
    /// Offset scale.
    pub scale: [f32; 3],
}

impl ObjectOffset {
    /// No offset: the pivot coincides with the node transform.
    pub const IDENTITY: Self = Self {
        position: [0.0, 0.0, 0.0],
        rotation: [0.0, 0.0, 0.0, 1.0],
        scale: [1.0, 1.0, 1.0],
    };
}

impl Default for ObjectOffset {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Read-only view of one host scene node.
///
/// Implemented by the host-integration layer; everything the export
/// pipeline knows about a node flows through this trait. All transform
/// and visibility queries are frame-dependent because the fallback
/// animation path samples them densely.
pub trait HostNode {
    /// Node display name.
    fn name(&self) -> &str;

    /// Stable unique id of the node (serialized into the payload).
    fn id(&self) -> String;

    /// Id of the parent node, if the node has one.
    fn parent_id(&self) -> Option<String> {
        None
    }

    /// Whether the node has a parent. Affects transform evaluation: a
    /// parented node is exported in parent-relative space.
    fn has_parent(&self) -> bool {
        false
    }

    /// Evaluate the node transform at `frame`. With `parent_relative`
    /// set the result is relative to the parent node, otherwise world
    /// space.
    fn node_transform(&self, frame: i32, parent_relative: bool) -> Mat4;

    /// Sample the node's visibility scalar at `frame`.
    fn visibility(&self, _frame: i32) -> f32 {
        1.0
    }

    /// Whether the node is renderable.
    fn renderable(&self) -> bool {
        true
    }

    /// Whether the node receives shadows.
    fn receives_shadows(&self) -> bool {
        false
    }

    /// Read a custom boolean property; absent properties read as false.
    fn bool_prop(&self, _name: &str) -> bool {
        false
    }

    /// Read a custom float property; absent properties read as 0.0.
    fn float_prop(&self, _name: &str) -> f32 {
        0.0
    }

    /// Stable id of the node's material, if one is assigned.
    fn material_id(&self) -> Option<String> {
        None
    }

    /// Number of sub-materials declared by the node's material.
    /// Zero when no material or a single-slot material is assigned.
    fn sub_material_count(&self) -> u32 {
        0
    }

    /// The node's pivot offset components.
    fn object_offset(&self) -> ObjectOffset {
        ObjectOffset::IDENTITY
    }

    /// Introspect the native position controller.
    fn position_controller(&self) -> ControllerKeys {
        ControllerKeys::NotTranslatable
    }

    /// Introspect the native rotation controller.
    fn rotation_controller(&self) -> ControllerKeys {
        ControllerKeys::NotTranslatable
    }

    /// Introspect the native scale controller.
    fn scale_controller(&self) -> ControllerKeys {
        ControllerKeys::NotTranslatable
    }

    /// Introspect the native visibility controller.
    fn visibility_controller(&self) -> ControllerKeys {
        ControllerKeys::NotTranslatable
    }
}

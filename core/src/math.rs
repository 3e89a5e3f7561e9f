//! Math type aliases and transform helpers.
//!
//! All exporter math runs on f32 `nalgebra` types. The helpers cover the
//! two transform jobs the exporter needs: composing/decomposing affine
//! TRS matrices (including mirror detection) and converting values from
//! the host's Z-up, right-handed axes into the runtime's Y-up,
//! left-handed axes.

pub use nalgebra;

/// 3D vector (f32).
pub type Vec3 = nalgebra::Vector3<f32>;

/// 4x4 matrix (f32).
pub type Mat4 = nalgebra::Matrix4<f32>;

/// Quaternion (f32). Stored as `[x, y, z, w]` in memory.
/// Use [`quat_from_xyzw`] or `Quaternion::new(w, x, y, z)` to construct.
pub type Quat = nalgebra::Quaternion<f32>;

/// Affine transform split into its TRS components.
///
/// `parity` is set when the source matrix mirrors (negative determinant
/// of the upper 3x3 block); a mirrored transform flips triangle winding
/// and the exporter reverses corner order to compensate.
#[derive(Debug, Clone, Copy)]
pub struct AffineParts {
    /// Translation component.
    pub translation: Vec3,
    /// Rotation component. Not renormalized: for matrices carrying shear
    /// or extreme non-uniform scale the quaternion may not be unit length.
    pub rotation: Quat,
    /// Per-axis scale. The X component carries the mirror sign.
    pub scale: Vec3,
    /// True when the transform mirrors (negative determinant).
    pub parity: bool,
}

/// Build a 4x4 TRS matrix from scale, rotation (quaternion), and translation.
pub fn mat4_from_scale_rotation_translation(
    scale: Vec3,
    rotation: Quat,
    translation: Vec3,
) -> Mat4 {
    let r = nalgebra::UnitQuaternion::new_unchecked(rotation).to_rotation_matrix();
    let mut m = Mat4::identity();
    for col in 0..3 {
        let s = scale[col];
        for row in 0..3 {
            m[(row, col)] = r[(row, col)] * s;
        }
    }
    m[(0, 3)] = translation.x;
    m[(1, 3)] = translation.y;
    m[(2, 3)] = translation.z;
    m
}

/// Decompose an affine 4x4 matrix into translation, rotation, scale, and
/// mirror parity.
///
/// The mirror sign is folded into the X scale component so the extracted
/// rotation stays proper (determinant +1). The rotation quaternion is
/// emitted as-is, without renormalization.
pub fn decompose_affine(m: &Mat4) -> AffineParts {
    let translation = Vec3::new(m[(0, 3)], m[(1, 3)], m[(2, 3)]);
    let col0 = Vec3::new(m[(0, 0)], m[(1, 0)], m[(2, 0)]);
    let col1 = Vec3::new(m[(0, 1)], m[(1, 1)], m[(2, 1)]);
    let col2 = Vec3::new(m[(0, 2)], m[(1, 2)], m[(2, 2)]);

    let det = col0.cross(&col1).dot(&col2);
    let parity = det < 0.0;

    let mut sx = col0.norm();
    if parity {
        sx = -sx;
    }
    let sy = col1.norm();
    let sz = col2.norm();

    let rot_mat = nalgebra::Matrix3::from_columns(&[col0 / sx, col1 / sy, col2 / sz]);
    let rotation = nalgebra::UnitQuaternion::from_rotation_matrix(
        &nalgebra::Rotation3::from_matrix_unchecked(rot_mat),
    )
    .into_inner();

    AffineParts {
        translation,
        rotation,
        scale: Vec3::new(sx, sy, sz),
        parity,
    }
}

/// Convert a host-space vector (Z-up, right-handed) to runtime axes
/// (Y-up, left-handed) by swapping the Y and Z components.
pub fn switched_vec3(v: Vec3) -> [f32; 3] {
    [v.x, v.z, v.y]
}

/// Convert a host-space quaternion to runtime axes.
///
/// The vector part follows the Y/Z swap of [`switched_vec3`]; the scalar
/// part is negated to account for the handedness flip.
pub fn switched_quat(q: Quat) -> [f32; 4] {
    [q.coords.x, q.coords.z, q.coords.y, -q.coords.w]
}

/// Convert a 4x4 matrix to a column-major `[f32; 16]` array.
pub fn mat4_to_array(m: &Mat4) -> [f32; 16] {
    let mut out = [0.0f32; 16];
    out.copy_from_slice(m.as_slice());
    out
}

/// Create a quaternion from x, y, z, w components.
pub fn quat_from_xyzw(x: f32, y: f32, z: f32, w: f32) -> Quat {
    nalgebra::Quaternion::new(w, x, y, z)
}

/// Convert a quaternion to a `[x, y, z, w]` array.
pub fn quat_to_array(q: Quat) -> [f32; 4] {
    [q.coords.x, q.coords.y, q.coords.z, q.coords.w]
}

/// Create a quaternion from rotation around the Y axis.
pub fn quat_from_rotation_y(angle: f32) -> Quat {
    nalgebra::UnitQuaternion::from_axis_angle(&nalgebra::Vector3::y_axis(), angle).into_inner()
}

/// Create a quaternion from rotation around the Z axis.
pub fn quat_from_rotation_z(angle: f32) -> Quat {
    nalgebra::UnitQuaternion::from_axis_angle(&nalgebra::Vector3::z_axis(), angle).into_inner()
}

/// Rotate a vector by a quaternion.
pub fn quat_rotate_vec3(q: Quat, v: Vec3) -> Vec3 {
    nalgebra::UnitQuaternion::new_unchecked(q) * v
}

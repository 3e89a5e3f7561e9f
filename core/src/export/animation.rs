//! Animation curve extraction.
//!
//! Each of the four node channels (position, rotation quaternion,
//! scaling, visibility) is exported through one of two paths:
//!
//! 1. **Direct controller translation** — when the host controller is of
//!    a directly-translatable kind, its native keys are emitted as-is
//!    (frame + value, converted to runtime axes) with no resampling, so
//!    sparse keyframing survives the export.
//! 2. **Dense sampling fallback** — otherwise the effective node
//!    transform is evaluated at every frame of the scene's active range
//!    and decomposed. Correct for any controller type, but one
//!    evaluation + decomposition per frame, and native easing/tangent
//!    data is lost.
//!
//! Quaternions from the fallback decomposition are not renormalized;
//! nodes with shear or non-uniform scale may produce non-unit values.

use crate::cancel::CancellationToken;
use crate::math::{decompose_affine, quat_from_xyzw, switched_quat, switched_vec3, Vec3};
use crate::scene::{ControllerKeys, FrameRange, HostNode};

use super::error::ExportError;
use super::types::{AnimationCurve, AnimationKey, AnimationProperty};

/// Export all four channels of `node` over `range`.
///
/// Cancellation is polled once per channel.
pub(crate) fn export_animations(
    node: &dyn HostNode,
    range: FrameRange,
    token: &CancellationToken,
) -> Result<Vec<AnimationCurve>, ExportError> {
    let parent_relative = node.has_parent();
    let mut animations = Vec::with_capacity(4);

    for property in [
        AnimationProperty::Position,
        AnimationProperty::RotationQuaternion,
        AnimationProperty::Scaling,
        AnimationProperty::Visibility,
    ] {
        if token.is_cancelled() {
            return Err(ExportError::Cancelled);
        }
        animations.push(export_channel(node, range, parent_relative, property));
    }

    Ok(animations)
}

fn export_channel(
    node: &dyn HostNode,
    range: FrameRange,
    parent_relative: bool,
    property: AnimationProperty,
) -> AnimationCurve {
    if let Some(curve) = translate_controller(node, property) {
        return curve;
    }
    sample_channel(node, range, parent_relative, property)
}

/// Try the direct path: native controller keys, converted to runtime
/// axes but not resampled.
///
/// A controller reporting the wrong key kind for its channel, or one
/// with no keys at all, falls through to dense sampling.
fn translate_controller(node: &dyn HostNode, property: AnimationProperty) -> Option<AnimationCurve> {
    let keys = match property {
        AnimationProperty::Position => node.position_controller(),
        AnimationProperty::RotationQuaternion => node.rotation_controller(),
        AnimationProperty::Scaling => node.scale_controller(),
        AnimationProperty::Visibility => node.visibility_controller(),
    };

    let translated = match (property, keys) {
        (
            AnimationProperty::Position | AnimationProperty::Scaling,
            ControllerKeys::Vector3Keys(keys),
        ) if !keys.is_empty() => keys
            .iter()
            .map(|key| {
                AnimationKey::new(key.frame, switched_vec3(Vec3::from(key.value)).to_vec())
            })
            .collect(),
        (AnimationProperty::RotationQuaternion, ControllerKeys::QuaternionKeys(keys))
            if !keys.is_empty() =>
        {
            keys.iter()
                .map(|key| {
                    let [x, y, z, w] = key.value;
                    AnimationKey::new(key.frame, switched_quat(quat_from_xyzw(x, y, z, w)).to_vec())
                })
                .collect()
        }
        (AnimationProperty::Visibility, ControllerKeys::FloatKeys(keys)) if !keys.is_empty() => {
            keys.iter()
                .map(|key| AnimationKey::new(key.frame, vec![key.value]))
                .collect()
        }
        _ => return None,
    };

    Some(AnimationCurve::new(property, translated))
}

/// Dense fallback: one key per frame from the evaluated node transform.
fn sample_channel(
    node: &dyn HostNode,
    range: FrameRange,
    parent_relative: bool,
    property: AnimationProperty,
) -> AnimationCurve {
    let keys = range
        .frames()
        .map(|frame| {
            let values = match property {
                AnimationProperty::Position => {
                    let m = node.node_transform(frame, parent_relative);
                    let translation = Vec3::new(m[(0, 3)], m[(1, 3)], m[(2, 3)]);
                    switched_vec3(translation).to_vec()
                }
                AnimationProperty::RotationQuaternion => {
                    let m = node.node_transform(frame, parent_relative);
                    switched_quat(decompose_affine(&m).rotation).to_vec()
                }
                AnimationProperty::Scaling => {
                    let m = node.node_transform(frame, parent_relative);
                    switched_vec3(decompose_affine(&m).scale).to_vec()
                }
                AnimationProperty::Visibility => vec![node.visibility(frame)],
            };
            AnimationKey::new(frame, values)
        })
        .collect();

    AnimationCurve::new(property, keys)
}

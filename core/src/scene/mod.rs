//! Host scene-graph abstraction.
//!
//! The exporter never talks to a DCC SDK directly; the integration layer
//! implements [`HostNode`] over the host's node type and the core stays
//! host-agnostic. The trait surface covers exactly what the export
//! pipeline consumes:
//!
//! - [`HostNode`] — transform evaluation, visibility, custom properties,
//!   native animation-controller introspection
//! - [`FrameRange`] — the scene's active time range
//! - [`ControllerKeys`] / [`Keyframe`] — native keyframes, when a
//!   controller is directly translatable
//! - [`ObjectOffset`] — the node's pivot offset components
//! - [`props`] — well-known custom property names

mod types;

pub use types::{props, ControllerKeys, FrameRange, HostNode, Keyframe, ObjectOffset};

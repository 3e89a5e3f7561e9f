//! Export pipeline scenario tests.
//!
//! Shared fixtures live here; focused suites sit in the submodules.

use std::collections::{HashMap, HashSet};

use crate::math::Mat4;
use crate::scene::{ControllerKeys, HostNode, ObjectOffset};

mod pipeline_test;

/// Install the test logger so `log::warn!` output surfaces under
/// `cargo test -- --nocapture`.
fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Configurable stand-in for a host scene node.
pub(super) struct TestNode {
    name: String,
    parent: Option<String>,
    transform: Box<dyn Fn(i32) -> Mat4>,
    visibility: Box<dyn Fn(i32) -> f32>,
    bool_props: HashSet<String>,
    float_props: HashMap<String, f32>,
    material: Option<String>,
    sub_materials: u32,
    offset: ObjectOffset,
    renderable: bool,
    receive_shadows: bool,
    position_keys: ControllerKeys,
    rotation_keys: ControllerKeys,
    scale_keys: ControllerKeys,
    visibility_keys: ControllerKeys,
}

impl TestNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            transform: Box::new(|_| Mat4::identity()),
            visibility: Box::new(|_| 1.0),
            bool_props: HashSet::new(),
            float_props: HashMap::new(),
            material: None,
            sub_materials: 0,
            offset: ObjectOffset::IDENTITY,
            renderable: true,
            receive_shadows: false,
            position_keys: ControllerKeys::NotTranslatable,
            rotation_keys: ControllerKeys::NotTranslatable,
            scale_keys: ControllerKeys::NotTranslatable,
            visibility_keys: ControllerKeys::NotTranslatable,
        }
    }

    pub fn with_static_transform(self, transform: Mat4) -> Self {
        self.with_transform_fn(move |_| transform)
    }

    pub fn with_transform_fn(mut self, transform: impl Fn(i32) -> Mat4 + 'static) -> Self {
        self.transform = Box::new(transform);
        self
    }

    pub fn with_visibility_fn(mut self, visibility: impl Fn(i32) -> f32 + 'static) -> Self {
        self.visibility = Box::new(visibility);
        self
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_bool_prop(mut self, name: &str) -> Self {
        self.bool_props.insert(name.to_string());
        self
    }

    pub fn with_float_prop(mut self, name: &str, value: f32) -> Self {
        self.float_props.insert(name.to_string(), value);
        self
    }

    pub fn with_material(mut self, id: &str, sub_materials: u32) -> Self {
        self.material = Some(id.to_string());
        self.sub_materials = sub_materials;
        self
    }

    pub fn with_object_offset(mut self, offset: ObjectOffset) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_renderable(mut self, renderable: bool) -> Self {
        self.renderable = renderable;
        self
    }

    pub fn with_receive_shadows(mut self, receive: bool) -> Self {
        self.receive_shadows = receive;
        self
    }

    pub fn with_position_keys(mut self, keys: ControllerKeys) -> Self {
        self.position_keys = keys;
        self
    }

    pub fn with_rotation_keys(mut self, keys: ControllerKeys) -> Self {
        self.rotation_keys = keys;
        self
    }

    pub fn with_scale_keys(mut self, keys: ControllerKeys) -> Self {
        self.scale_keys = keys;
        self
    }

    pub fn with_visibility_keys(mut self, keys: ControllerKeys) -> Self {
        self.visibility_keys = keys;
        self
    }
}

impl HostNode for TestNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> String {
        format!("{}#id", self.name)
    }

    fn parent_id(&self) -> Option<String> {
        self.parent.clone()
    }

    fn has_parent(&self) -> bool {
        self.parent.is_some()
    }

    fn node_transform(&self, frame: i32, _parent_relative: bool) -> Mat4 {
        (self.transform)(frame)
    }

    fn visibility(&self, frame: i32) -> f32 {
        (self.visibility)(frame)
    }

    fn renderable(&self) -> bool {
        self.renderable
    }

    fn receives_shadows(&self) -> bool {
        self.receive_shadows
    }

    fn bool_prop(&self, name: &str) -> bool {
        self.bool_props.contains(name)
    }

    fn float_prop(&self, name: &str) -> f32 {
        self.float_props.get(name).copied().unwrap_or(0.0)
    }

    fn material_id(&self) -> Option<String> {
        self.material.clone()
    }

    fn sub_material_count(&self) -> u32 {
        self.sub_materials
    }

    fn object_offset(&self) -> ObjectOffset {
        self.offset
    }

    fn position_controller(&self) -> ControllerKeys {
        self.position_keys.clone()
    }

    fn rotation_controller(&self) -> ControllerKeys {
        self.rotation_keys.clone()
    }

    fn scale_controller(&self) -> ControllerKeys {
        self.scale_keys.clone()
    }

    fn visibility_controller(&self) -> ControllerKeys {
        self.visibility_keys.clone()
    }
}

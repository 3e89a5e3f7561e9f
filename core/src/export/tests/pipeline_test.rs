//! Geometry pipeline scenarios: welding, winding, submeshes, warnings.

use rstest::rstest;

use crate::cancel::CancellationToken;
use crate::export::{export_mesh, ExportError, ExportWarning, IndexFormat, MeshPayload};
use crate::math::{mat4_from_scale_rotation_translation, Quat, Vec3};
use crate::mesh::generators::{generate_cube, generate_grid, generate_sphere};
use crate::mesh::{TriFace, TriMesh};
use crate::scene::{props, FrameRange, ObjectOffset};

use super::{init_logs, TestNode};

fn export(node: &TestNode, mesh: &TriMesh) -> MeshPayload {
    export_mesh(node, mesh, FrameRange::new(0, 0), &CancellationToken::new())
        .expect("export failed")
        .expect("node unexpectedly skipped")
}

fn optimizing_node(name: &str) -> TestNode {
    TestNode::new(name).with_bool_prop(props::OPTIMIZE_VERTICES)
}

#[test]
fn cube_scenario_welds_to_eight_vertices() {
    init_logs();
    let node = optimizing_node("cube").with_material("mat-cube", 1);
    let payload = export(&node, &generate_cube(0.5));

    assert_eq!(payload.vertex_count(), 8);
    assert_eq!(payload.indices.len(), 36);
    assert_eq!(payload.index_format, IndexFormat::Uint16);
    assert!(payload.warnings.is_empty());

    assert_eq!(payload.submeshes.len(), 1);
    let sub = payload.submeshes[0];
    assert_eq!(sub.material_index, 0);
    assert_eq!(sub.index_start, 0);
    assert_eq!(sub.index_count, 36);
    assert_eq!(sub.vertices_start, 0);
    assert_eq!(sub.vertices_count, 8);
}

#[test]
fn cube_without_optimization_keeps_every_corner() {
    let node = TestNode::new("cube");
    let payload = export(&node, &generate_cube(0.5));

    // One output vertex per corner, indices in emission order.
    assert_eq!(payload.vertex_count(), 36);
    assert_eq!(payload.indices, (0u32..36).collect::<Vec<_>>());
}

#[test]
fn winding_reverses_under_mirrored_transform() {
    let mesh = TriMesh::new(vec![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]])
        .with_faces(vec![TriFace::new(0, 1, 2)]);

    let plain = export(&TestNode::new("tri"), &mesh);
    let mirrored_node = TestNode::new("tri-mirrored").with_static_transform(
        mat4_from_scale_rotation_translation(
            Vec3::new(-1.0, 1.0, 1.0),
            Quat::identity(),
            Vec3::zeros(),
        ),
    );
    let mirrored = export(&mirrored_node, &mesh);

    // Corner order flips to (2, 1, 0): the mirrored vertex stream is the
    // plain stream reversed, while indices stay in emission order.
    assert_eq!(plain.positions, [1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0]);
    assert_eq!(
        mirrored.positions,
        [0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0]
    );
    assert_eq!(mirrored.indices, [0, 1, 2]);
}

#[test]
fn material_ids_bounded_by_submaterial_count() {
    let mesh = TriMesh::new(vec![
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [1.0, 1.0, 0.0],
    ])
    .with_faces(vec![
        TriFace::new(0, 1, 2).with_material_id(0),
        TriFace::new(1, 3, 2).with_material_id(5),
    ]);
    let node = TestNode::new("quad").with_material("mat-quad", 2);
    let payload = export(&node, &mesh);

    // Slot 5 wraps to 5 % 2 == 1.
    let slots: Vec<u32> = payload.submeshes.iter().map(|s| s.material_index).collect();
    assert_eq!(slots, [0, 1]);
}

#[test]
fn submesh_coverage_is_disjoint_and_complete() {
    let sphere = generate_sphere(1.0, 12, 6);
    let faces: Vec<TriFace> = sphere
        .faces()
        .iter()
        .enumerate()
        .map(|(i, f)| f.with_material_id((i % 2) as u16))
        .collect();
    let mesh = TriMesh::new(sphere.positions().to_vec()).with_faces(faces);

    let node = optimizing_node("sphere").with_material("mat-sphere", 2);
    let payload = export(&node, &mesh);

    // Ranges tile the index buffer in slot order with no gaps.
    let total: u32 = payload.submeshes.iter().map(|s| s.index_count).sum();
    assert_eq!(total as usize, payload.indices.len());
    let mut offset = 0;
    for sub in &payload.submeshes {
        assert_eq!(sub.index_start, offset);
        offset += sub.index_count;
    }

    // Every index addresses a real vertex.
    let vertex_count = payload.vertex_count() as u32;
    assert!(payload.indices.iter().all(|&i| i < vertex_count));
}

#[rstest]
#[case(255, 255, true)]
#[case(254, 256, false)]
fn vertex_ceiling_detection(#[case] sx: u32, #[case] sy: u32, #[case] expect_warning: bool) {
    init_logs();
    let node = optimizing_node("grid");
    let payload = export(&node, &generate_grid(sx, sy, 1.0));

    if expect_warning {
        assert_eq!(payload.vertex_count(), 65536);
        assert!(payload.warnings.contains(&ExportWarning::VertexCeilingExceeded {
            count: 65536,
            after_weld: false,
            hint_optimize: false,
        }));
        assert!(payload.warnings.contains(&ExportWarning::VertexCeilingExceeded {
            count: 65536,
            after_weld: true,
            hint_optimize: false,
        }));
        assert_eq!(payload.index_format, IndexFormat::Uint32);
    } else {
        assert_eq!(payload.vertex_count(), 65535);
        assert!(payload.warnings.is_empty());
        assert_eq!(payload.index_format, IndexFormat::Uint16);
    }
}

#[test]
fn ceiling_hint_suggests_enabling_optimization() {
    // Raw vertex count is fine, but without welding every corner lands
    // in the output buffer and blows the ceiling.
    let node = TestNode::new("grid");
    let mesh = generate_grid(105, 105, 1.0);
    let payload = export(&node, &mesh);

    let corner_count = mesh.face_count() * 3;
    assert_eq!(
        payload.warnings,
        vec![ExportWarning::VertexCeilingExceeded {
            count: corner_count,
            after_weld: true,
            hint_optimize: true,
        }]
    );
}

#[test]
fn degenerate_meshes_warn_but_still_export() {
    init_logs();
    let node = TestNode::new("empty");
    let payload = export(&node, &TriMesh::new(vec![[0.0, 0.0, 0.0]]));

    assert!(payload.warnings.contains(&ExportWarning::EmptyMesh));
    assert!(payload
        .warnings
        .contains(&ExportWarning::InsufficientVertices { count: 1 }));
    assert!(payload.positions.is_empty());
    assert!(payload.indices.is_empty());
    assert!(payload.submeshes.is_empty());
}

#[test]
fn no_export_property_skips_node() {
    let node = TestNode::new("hidden").with_bool_prop(props::NO_EXPORT);
    let result = export_mesh(
        &node,
        &generate_cube(0.5),
        FrameRange::new(0, 0),
        &CancellationToken::new(),
    );
    assert!(matches!(result, Ok(None)));
}

#[test]
fn cancellation_aborts_without_payload() {
    let token = CancellationToken::new();
    token.cancel();
    let result = export_mesh(
        &TestNode::new("cube"),
        &generate_cube(0.5),
        FrameRange::new(0, 0),
        &token,
    );
    assert_eq!(result.unwrap_err(), ExportError::Cancelled);
}

#[test]
fn smoothing_masks_keep_corners_distinct() {
    let positions = vec![
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [2.0, 0.0, 1.0],
    ];

    let split = TriMesh::new(positions.clone()).with_faces(vec![
        TriFace::new(0, 1, 2).with_smoothing_mask(1),
        TriFace::new(1, 3, 2).with_smoothing_mask(2),
    ]);
    let payload = export(&optimizing_node("split"), &split);
    // The shared edge (1, 2) carries two normals, one per mask.
    assert_eq!(payload.vertex_count(), 6);

    let smooth = TriMesh::new(positions).with_faces(vec![
        TriFace::new(0, 1, 2).with_smoothing_mask(1),
        TriFace::new(1, 3, 2).with_smoothing_mask(1),
    ]);
    let payload = export(&optimizing_node("smooth"), &smooth);
    assert_eq!(payload.vertex_count(), 4);
}

#[test]
fn uv_channel_flows_into_payload() {
    let node = optimizing_node("sphere");
    let payload = export(&node, &generate_sphere(1.0, 8, 4));

    let uvs = payload.uvs.as_ref().expect("sphere has a UV channel");
    assert_eq!(uvs.len(), payload.vertex_count() * 2);
    assert!(payload.uvs2.is_none());
}

#[test]
fn metadata_passes_through() {
    let node = TestNode::new("lamp")
        .with_parent("room#id")
        .with_material("mat-lamp", 0)
        .with_renderable(false)
        .with_receive_shadows(true)
        .with_visibility_fn(|_| 0.25)
        .with_bool_prop(props::PICKABLE)
        .with_bool_prop(props::SHOW_BOUNDING_BOX)
        .with_bool_prop(props::SHOW_SUBMESHES_BOUNDING_BOX)
        .with_bool_prop(props::CHECK_COLLISIONS);
    let payload = export(&node, &generate_cube(0.5));

    assert_eq!(payload.name, "lamp");
    assert_eq!(payload.id, "lamp#id");
    assert_eq!(payload.parent_id.as_deref(), Some("room#id"));
    assert_eq!(payload.material_id.as_deref(), Some("mat-lamp"));
    assert_eq!(payload.visibility, 0.25);

    assert!(!payload.flags.visible);
    assert!(payload.flags.pickable);
    assert!(payload.flags.receive_shadows);
    assert!(payload.flags.show_bounding_box);
    assert!(payload.flags.show_submeshes_bounding_box);
    assert!(payload.flags.check_collisions);
}

#[test]
fn auto_animate_block_reads_node_props() {
    let node = TestNode::new("door")
        .with_bool_prop(props::AUTO_ANIMATE)
        .with_bool_prop(props::AUTO_ANIMATE_LOOP)
        .with_float_prop(props::AUTO_ANIMATE_FROM, 2.0)
        .with_float_prop(props::AUTO_ANIMATE_TO, 10.0);
    let payload = export(&node, &generate_cube(0.5));

    let auto = payload.auto_animate.expect("auto-animate enabled");
    assert_eq!(auto.from, 2);
    assert_eq!(auto.to, 10);
    assert!(auto.looping);

    let plain = export(&TestNode::new("static"), &generate_cube(0.5));
    assert!(plain.auto_animate.is_none());
}

#[test]
fn pivot_matrix_carries_object_offset() {
    let node = TestNode::new("offset").with_object_offset(ObjectOffset {
        position: [1.0, 2.0, 3.0],
        ..ObjectOffset::IDENTITY
    });
    let payload = export(&node, &generate_cube(0.5));

    // Column-major: translation sits in the last column.
    assert_eq!(&payload.pivot_matrix[12..15], &[1.0, 2.0, 3.0]);
    assert_eq!(payload.pivot_matrix[0], 1.0);
    assert_eq!(payload.pivot_matrix[5], 1.0);
    assert_eq!(payload.pivot_matrix[10], 1.0);
}

#[test]
fn static_transform_lands_in_runtime_axes() {
    let node = TestNode::new("placed").with_static_transform(
        mat4_from_scale_rotation_translation(
            Vec3::new(2.0, 3.0, 4.0),
            Quat::identity(),
            Vec3::new(1.0, 2.0, 3.0),
        ),
    );
    let payload = export(&node, &generate_cube(0.5));

    // Host Y/Z swap into the runtime system.
    assert_eq!(payload.position, [1.0, 3.0, 2.0]);
    assert_eq!(payload.scaling, [2.0, 4.0, 3.0]);
    let expected = [0.0, 0.0, 0.0, -1.0];
    for (got, want) in payload.rotation_quaternion.iter().zip(expected) {
        assert!((got - want).abs() < 1e-6, "quaternion was {:?}", payload.rotation_quaternion);
    }
}

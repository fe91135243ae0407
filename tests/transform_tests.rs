//! Transform and TransformSystem tests
//!
//! Tests for:
//! - Transform TRS operations and dirty checking
//! - Euler angle round-trip conversions
//! - look_at orientation
//! - apply_local_matrix decomposition
//! - Hierarchical matrix propagation

use glam::{Affine3A, Mat4, Quat, Vec3};
use myth_xr::scene::{NodeHandle, Scene, Transform};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

// ============================================================================
// Helper
// ============================================================================

const EPSILON: f32 = 1e-5;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
}

fn cached_world_position(scene: &Scene, handle: NodeHandle) -> Vec3 {
    scene.get_node(handle).unwrap().world_matrix().translation.into()
}

// ============================================================================
// Transform Unit Tests
// ============================================================================

#[test]
fn transform_default_is_identity() {
    let t = Transform::new();
    assert_eq!(t.position, Vec3::ZERO);
    assert_eq!(t.rotation, Quat::IDENTITY);
    assert_eq!(t.scale, Vec3::ONE);
}

#[test]
fn transform_update_local_matrix_dirty_check() {
    let mut t = Transform::new();

    // First call always rebuilds
    assert!(t.update_local_matrix());
    assert!(!t.update_local_matrix());

    t.position = Vec3::new(1.0, 2.0, 3.0);
    assert!(t.update_local_matrix());
    assert!(!t.update_local_matrix());

    t.rotation = Quat::from_rotation_y(FRAC_PI_2);
    assert!(t.update_local_matrix());

    t.scale = Vec3::splat(2.0);
    assert!(t.update_local_matrix());
    assert!(!t.update_local_matrix());
}

#[test]
fn transform_local_matrix_reflects_trs() {
    let mut t = Transform::from_position(Vec3::new(10.0, 20.0, 30.0));
    t.scale = Vec3::splat(2.0);
    t.update_local_matrix();

    let mat = Mat4::from(*t.local_matrix());
    assert!(vec3_approx(mat.w_axis.truncate(), Vec3::new(10.0, 20.0, 30.0)));
}

#[test]
fn transform_euler_roundtrip() {
    let mut t = Transform::new();
    let (x, y, z) = (0.3, 0.7, 1.2);
    t.set_rotation_euler(x, y, z);

    let euler = t.rotation_euler();
    assert!(approx_eq(euler.x, x));
    assert!(approx_eq(euler.y, y));
    assert!(approx_eq(euler.z, z));
}

#[test]
fn transform_look_at_basic() {
    let mut t = Transform::new();
    t.look_at(Vec3::new(0.0, 0.0, -10.0), Vec3::Y);

    t.update_local_matrix();
    let mat = Mat4::from(*t.local_matrix());
    let forward = -mat.z_axis.truncate().normalize();
    assert!(vec3_approx(forward, Vec3::NEG_Z));
}

#[test]
fn transform_look_at_collinear_up_noop() {
    let mut t = Transform::new();
    t.look_at(Vec3::new(0.0, 10.0, 0.0), Vec3::Y);
    assert_eq!(t.rotation, Quat::IDENTITY);
}

#[test]
fn transform_apply_local_matrix_decomposition() {
    let original_pos = Vec3::new(5.0, -3.0, 7.0);
    let original_rot = Quat::from_rotation_y(FRAC_PI_4);
    let original_scale = Vec3::new(2.0, 3.0, 1.5);

    let mat = Affine3A::from_scale_rotation_translation(original_scale, original_rot, original_pos);

    let mut t = Transform::new();
    t.apply_local_matrix(mat);

    assert!(vec3_approx(t.position, original_pos));
    assert!(vec3_approx(t.scale, original_scale));
    // Quaternion may differ in sign, but represent the same rotation
    assert!(t.rotation.angle_between(original_rot) < 1e-4);
}

#[test]
fn transform_mark_dirty_forces_update() {
    let mut t = Transform::new();
    t.update_local_matrix();
    assert!(!t.update_local_matrix());

    t.mark_dirty();
    assert!(t.update_local_matrix());
}

// ============================================================================
// Hierarchy Setup Helpers
// ============================================================================

/// Chain of `length` nodes, each translating +1 in X from its parent.
fn create_chain(length: usize) -> (Scene, Vec<NodeHandle>) {
    let mut scene = Scene::default();
    let mut handles: Vec<NodeHandle> = Vec::new();
    for _ in 0..length {
        let handle = scene.create_node();
        scene.node(handle).set_position(1.0, 0.0, 0.0);
        if let Some(&parent) = handles.last() {
            scene.attach(handle, parent).unwrap();
        }
        handles.push(handle);
    }
    (scene, handles)
}

// ============================================================================
// TransformSystem Hierarchy Tests
// ============================================================================

#[test]
fn hierarchy_chain_world_positions() {
    let (mut scene, handles) = create_chain(5);

    scene.update_matrix_world();

    for (i, &handle) in handles.iter().enumerate() {
        let world_pos = cached_world_position(&scene, handle);
        let expected_x = (i + 1) as f32;
        assert!(
            approx_eq(world_pos.x, expected_x),
            "Node {i}: expected x={expected_x}, got x={}",
            world_pos.x
        );
    }
}

#[test]
fn hierarchy_cache_matches_on_demand_world_matrix() {
    let (mut scene, handles) = create_chain(4);
    scene
        .node(handles[1])
        .set_rotation(Quat::from_rotation_z(0.4))
        .set_scale(1.5);

    scene.update_matrix_world();

    for &handle in &handles {
        let on_demand: Vec3 = scene.world_matrix(handle).unwrap().translation.into();
        assert!(vec3_approx(cached_world_position(&scene, handle), on_demand));
    }
}

#[test]
fn hierarchy_with_rotation_and_scale() {
    let mut scene = Scene::default();

    // Parent: translate (5,0,0), rotate 90° around Y, scale 2x
    let parent = scene.create_node();
    scene
        .node(parent)
        .set_position(5.0, 0.0, 0.0)
        .set_rotation(Quat::from_rotation_y(FRAC_PI_2))
        .set_scale(2.0);

    let child = scene.create_node();
    scene.node(child).set_position(1.0, 0.0, 0.0);
    scene.attach(child, parent).unwrap();

    scene.update_matrix_world();

    // (1,0,0) -> rotate -> (0,0,-1) -> scale -> (0,0,-2) -> translate -> (5,0,-2)
    let child_world = cached_world_position(&scene, child);
    assert!(approx_eq(child_world.x, 5.0), "child world x: got {}", child_world.x);
    assert!(approx_eq(child_world.z, -2.0), "child world z: got {}", child_world.z);
}

#[test]
fn reparent_marks_world_for_rebuild() {
    let (mut scene, handles) = create_chain(3);
    scene.update_matrix_world();

    scene.detach(handles[2]).unwrap();
    scene.update_matrix_world();

    // Now a root: only its own +1
    assert!(approx_eq(cached_world_position(&scene, handles[2]).x, 1.0));
}

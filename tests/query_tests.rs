//! Spatial Query Tests
//!
//! Tests for:
//! - AABB containment gate
//! - Six-ray nearest-surface selection
//! - Tie-breaking by candidate order
//! - World transforms on candidates and their ancestors
//! - Stale and mesh-less candidates

use glam::{Quat, Vec3};

use myth_xr::interaction::{query, query_hit, RAY_DIRECTIONS};
use myth_xr::resources::primitives::{create_box, create_box_from_bounds};
use myth_xr::resources::Material;
use myth_xr::scene::{NodeHandle, Scene};

const EPSILON: f32 = 1e-4;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn add_box(scene: &mut Scene, name: &str, min: Vec3, max: Vec3) -> NodeHandle {
    scene
        .add_mesh_node(name, create_box_from_bounds(min, max), Material::default(), None)
        .unwrap()
}

// ============================================================================
// Containment Gate
// ============================================================================

#[test]
fn picks_only_candidate_containing_origin() {
    init_logger();
    let mut scene = Scene::default();
    let mesh_a = add_box(&mut scene, "meshA", Vec3::ZERO, Vec3::ONE);
    let mesh_b = add_box(&mut scene, "meshB", Vec3::splat(5.0), Vec3::splat(6.0));

    assert_eq!(query(&scene, Vec3::splat(0.5), [mesh_a, mesh_b]), Some(mesh_a));
    assert_eq!(query(&scene, Vec3::splat(10.0), [mesh_a, mesh_b]), None);
}

#[test]
fn empty_candidate_set_returns_none() {
    let scene = Scene::default();
    assert_eq!(query(&scene, Vec3::ZERO, []), None);
}

#[test]
fn origin_on_box_face_counts_as_inside() {
    let mut scene = Scene::default();
    let mesh = add_box(&mut scene, "box", Vec3::ZERO, Vec3::ONE);

    let hit = query_hit(&scene, Vec3::new(1.0, 0.5, 0.5), [mesh]).unwrap();
    assert_eq!(hit.node, mesh);
    assert!(hit.distance.abs() < EPSILON);
}

#[test]
fn containment_uses_world_transform() {
    let mut scene = Scene::default();
    let mesh = scene
        .add_mesh_node("moved", create_box(1.0, 1.0, 1.0), Material::default(), None)
        .unwrap();
    scene.node(mesh).set_position(0.0, 3.0, 0.0);

    assert_eq!(query(&scene, Vec3::ZERO, [mesh]), None);
    assert_eq!(query(&scene, Vec3::new(0.0, 3.2, 0.0), [mesh]), Some(mesh));
}

#[test]
fn containment_includes_mesh_descendants() {
    let mut scene = Scene::default();
    let body = add_box(&mut scene, "body", Vec3::splat(-0.5), Vec3::splat(0.5));
    let arm = scene
        .add_mesh_node("arm", create_box(1.0, 1.0, 1.0), Material::default(), Some(body))
        .unwrap();
    scene.node(arm).set_position(3.0, 0.0, 0.0);

    // Inside the subtree bounds but outside the body's own box: the gate
    // passes, the body's triangles are hit along -X.
    let hit = query_hit(&scene, Vec3::new(1.5, 0.0, 0.0), [body]).unwrap();
    assert_eq!(hit.node, body);
    assert!((hit.distance - 1.0).abs() < EPSILON);
}

// ============================================================================
// Nearest Surface
// ============================================================================

#[test]
fn nearest_surface_wins_across_candidates() {
    let mut scene = Scene::default();
    // Both contain the origin; the inner wall of `near` is 0.2 away
    let far = add_box(&mut scene, "far", Vec3::splat(-2.0), Vec3::splat(2.0));
    let near = add_box(&mut scene, "near", Vec3::new(-0.2, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));

    let hit = query_hit(&scene, Vec3::ZERO, [far, near]).unwrap();
    assert_eq!(hit.node, near);
    assert!((hit.distance - 0.2).abs() < EPSILON);
    assert!((hit.point - Vec3::new(-0.2, 0.0, 0.0)).length() < EPSILON);
}

#[test]
fn equal_distance_keeps_first_candidate() {
    let mut scene = Scene::default();
    let first = add_box(&mut scene, "first", Vec3::splat(-1.0), Vec3::splat(1.0));
    let second = add_box(&mut scene, "second", Vec3::splat(-1.0), Vec3::splat(1.0));

    assert_eq!(query(&scene, Vec3::ZERO, [first, second]), Some(first));
    assert_eq!(query(&scene, Vec3::ZERO, [second, first]), Some(second));
}

#[test]
fn rotated_candidate_is_hit_through_its_local_frame() {
    let mut scene = Scene::default();
    let slab = scene
        .add_mesh_node("slab", create_box(4.0, 0.5, 4.0), Material::default(), None)
        .unwrap();
    scene
        .node(slab)
        .set_rotation(Quat::from_rotation_z(std::f32::consts::FRAC_PI_2));

    // Thin axis now along X
    let hit = query_hit(&scene, Vec3::new(0.0, 0.3, 0.1), [slab]).unwrap();
    assert!((hit.distance - 0.25).abs() < EPSILON);
}

// ============================================================================
// Robustness
// ============================================================================

#[test]
fn stale_and_meshless_candidates_are_skipped() {
    init_logger();
    let mut scene = Scene::default();
    let group = scene.create_node();
    let removed = add_box(&mut scene, "removed", Vec3::splat(-1.0), Vec3::splat(1.0));
    scene.remove_node(removed);
    let live = add_box(&mut scene, "live", Vec3::splat(-1.0), Vec3::splat(1.0));

    assert_eq!(query(&scene, Vec3::ZERO, [group, removed, live]), Some(live));
}

#[test]
fn probe_directions_cover_both_senses_of_each_axis() {
    let sum: Vec3 = RAY_DIRECTIONS.iter().copied().sum();
    assert_eq!(sum, Vec3::ZERO);
    assert!(RAY_DIRECTIONS.iter().all(|d| (d.length() - 1.0).abs() < EPSILON));
    assert_eq!(RAY_DIRECTIONS[0], Vec3::X);
}

//! Spatial query: which candidate mesh is closest to a point inside it.
//!
//! A candidate qualifies only if its world AABB contains the query point.
//! Six axis-aligned rays are then cast from the point against the
//! candidate's triangles; the smallest hit distance across all candidates
//! and rays wins. Distances are compared with strict `<`, so on a tie the
//! candidate iterated first keeps the win.

use glam::Vec3;

use crate::resources::Ray;
use crate::scene::{NodeHandle, Scene};

/// Probe directions, in cast order.
pub const RAY_DIRECTIONS: [Vec3; 6] = [
    Vec3::X,
    Vec3::NEG_X,
    Vec3::Y,
    Vec3::NEG_Y,
    Vec3::Z,
    Vec3::NEG_Z,
];

/// Winning candidate of a spatial query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub node: NodeHandle,
    /// World-space distance from the query point to the nearest surface.
    pub distance: f32,
    /// World-space surface point.
    pub point: Vec3,
}

/// Returns the candidate whose surface is nearest to `origin` along any of
/// the six probe rays, or `None` when nothing qualifies.
///
/// Candidates that are stale or carry no mesh are skipped.
pub fn query(scene: &Scene, origin: Vec3, candidates: impl IntoIterator<Item = NodeHandle>) -> Option<NodeHandle> {
    query_hit(scene, origin, candidates).map(|hit| hit.node)
}

/// Like [`query`], also reporting the hit distance and point.
pub fn query_hit(
    scene: &Scene,
    origin: Vec3,
    candidates: impl IntoIterator<Item = NodeHandle>,
) -> Option<PickHit> {
    let mut closest: Option<PickHit> = None;

    for node in candidates {
        let Some(mesh) = scene.get_mesh(node) else {
            log::trace!("Skipping candidate {node:?}: no mesh");
            continue;
        };
        let Some(world) = scene.world_matrix(node) else {
            continue;
        };
        if !scene.world_bounding_box(node).contains_point(origin) {
            continue;
        }
        let Some(geometry) = scene.assets.geometries.get(mesh.geometry) else {
            log::warn!("Candidate {node:?} references a missing geometry");
            continue;
        };

        for direction in RAY_DIRECTIONS {
            let ray = Ray::new(origin, direction);
            if let Some(hit) = geometry.raycast(&ray, &world)
                && closest.is_none_or(|c| hit.distance < c.distance)
            {
                closest = Some(PickHit {
                    node,
                    distance: hit.distance,
                    point: hit.point,
                });
            }
        }
    }

    if let Some(hit) = &closest {
        log::debug!("Query at {origin} picked {:?} at distance {}", hit.node, hit.distance);
    }
    closest
}

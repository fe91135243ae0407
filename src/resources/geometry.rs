use glam::{Affine3A, Vec3};
use uuid::Uuid;

use crate::errors::{Result, XrError};
use crate::resources::ray::{Ray, RayHit};

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    /// An inverted box that contains nothing; the identity for [`union`](Self::union).
    pub const EMPTY: Self = Self {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    #[must_use]
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Smallest box enclosing every point. Returns [`EMPTY`](Self::EMPTY)
    /// for an empty iterator.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        points
            .into_iter()
            .fold(Self::EMPTY, |bb, p| Self { min: bb.min.min(p), max: bb.max.max(p) })
    }

    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.max.x < self.min.x || self.max.y < self.min.y || self.max.z < self.min.z
    }

    #[must_use]
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Inclusive containment test; points on a face count as inside.
    #[must_use]
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Transforms the 8 corners and returns their enclosing box.
    #[must_use]
    pub fn transform(&self, matrix: &Affine3A) -> Self {
        if self.is_empty() {
            return *self;
        }

        let corners = [
            Vec3::new(self.min.x, self.min.y, self.min.z),
            Vec3::new(self.min.x, self.min.y, self.max.z),
            Vec3::new(self.min.x, self.max.y, self.min.z),
            Vec3::new(self.min.x, self.max.y, self.max.z),
            Vec3::new(self.max.x, self.min.y, self.min.z),
            Vec3::new(self.max.x, self.min.y, self.max.z),
            Vec3::new(self.max.x, self.max.y, self.min.z),
            Vec3::new(self.max.x, self.max.y, self.max.z),
        ];

        Self::from_points(corners.into_iter().map(|p| matrix.transform_point3(p)))
    }

    /// Slab test. Returns the entry distance, or the exit distance when the
    /// ray starts inside the box.
    #[must_use]
    pub fn ray_intersection(&self, ray: &Ray) -> Option<f32> {
        if self.is_empty() {
            return None;
        }

        let inv_dir = ray.direction.recip();

        let t1 = (self.min - ray.origin) * inv_dir;
        let t2 = (self.max - ray.origin) * inv_dir;

        let tmin = t1.min(t2).max_element();
        let tmax = t1.max(t2).min_element();

        // Box entirely behind the origin
        if tmax < 0.0 {
            return None;
        }

        if tmin > tmax {
            return None;
        }

        Some(if tmin < 0.0 { tmax } else { tmin })
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// CPU-side triangle geometry.
///
/// Positions are stored in the node's local space. The bounding box is
/// computed once on construction, so a `Geometry` is immutable after it is
/// built; rebuild it to change vertex data.
#[derive(Debug, Clone)]
pub struct Geometry {
    uuid: Uuid,
    positions: Vec<Vec3>,
    indices: Option<Vec<u32>>,
    bounding_box: BoundingBox,
}

impl Geometry {
    /// Non-indexed triangle list: every three positions form a triangle.
    pub fn from_positions(positions: Vec<Vec3>) -> Result<Self> {
        if positions.len() % 3 != 0 {
            return Err(XrError::IncompleteTriangle(positions.len()));
        }
        Ok(Self::build(positions, None))
    }

    /// Indexed triangle list.
    pub fn from_indexed(positions: Vec<Vec3>, indices: Vec<u32>) -> Result<Self> {
        if indices.len() % 3 != 0 {
            return Err(XrError::IncompleteTriangle(indices.len()));
        }
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= positions.len()) {
            return Err(XrError::IndexOutOfRange {
                index,
                vertex_count: positions.len(),
            });
        }
        Ok(Self::build(positions, Some(indices)))
    }

    pub(crate) fn build(positions: Vec<Vec3>, indices: Option<Vec<u32>>) -> Self {
        let bounding_box = BoundingBox::from_points(positions.iter().copied());
        Self {
            uuid: Uuid::new_v4(),
            positions,
            indices,
            bounding_box,
        }
    }

    #[inline]
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    #[inline]
    #[must_use]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    #[inline]
    #[must_use]
    pub fn indices(&self) -> Option<&[u32]> {
        self.indices.as_deref()
    }

    #[inline]
    #[must_use]
    pub fn bounding_box(&self) -> BoundingBox {
        self.bounding_box
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        match &self.indices {
            Some(indices) => indices.len() / 3,
            None => self.positions.len() / 3,
        }
    }

    /// Iterates triangles as vertex triples in local space.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        (0..self.triangle_count()).map(move |i| {
            let base = i * 3;
            match &self.indices {
                Some(idx) => [
                    self.positions[idx[base] as usize],
                    self.positions[idx[base + 1] as usize],
                    self.positions[idx[base + 2] as usize],
                ],
                None => [
                    self.positions[base],
                    self.positions[base + 1],
                    self.positions[base + 2],
                ],
            }
        })
    }

    /// Nearest intersection of a world-space ray with this geometry placed
    /// at `world_matrix`.
    ///
    /// The ray is moved into local space for the triangle tests; the
    /// reported distance and point are in world space, so non-uniform scale
    /// on any ancestor is accounted for. Triangles are hit from both sides.
    #[must_use]
    pub fn raycast(&self, ray: &Ray, world_matrix: &Affine3A) -> Option<RayHit> {
        if world_matrix.matrix3.determinant().abs() <= f32::EPSILON * f32::EPSILON {
            return None;
        }

        let inverse = world_matrix.inverse();
        let local_ray = ray.transformed(&inverse);

        self.bounding_box.ray_intersection(&local_ray)?;

        let mut nearest: Option<RayHit> = None;
        for (triangle, [a, b, c]) in self.triangles().enumerate() {
            let Some(t) = local_ray.intersect_triangle(a, b, c) else {
                continue;
            };
            let point = world_matrix.transform_point3(local_ray.at(t));
            let distance = ray.origin.distance(point);
            if nearest.is_none_or(|n| distance < n.distance) {
                nearest = Some(RayHit {
                    distance,
                    point,
                    triangle,
                });
            }
        }
        nearest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_indexed_rejects_out_of_range_index() {
        let err = Geometry::from_indexed(vec![Vec3::ZERO, Vec3::X, Vec3::Y], vec![0, 1, 3]);
        assert!(matches!(
            err,
            Err(XrError::IndexOutOfRange { index: 3, vertex_count: 3 })
        ));
    }

    #[test]
    fn from_positions_rejects_partial_triangle() {
        let err = Geometry::from_positions(vec![Vec3::ZERO, Vec3::X]);
        assert!(matches!(err, Err(XrError::IncompleteTriangle(2))));
    }

    #[test]
    fn empty_box_contains_nothing() {
        assert!(!BoundingBox::EMPTY.contains_point(Vec3::ZERO));
        assert!(BoundingBox::EMPTY.is_empty());
    }
}

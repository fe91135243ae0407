//! Core resource definitions, independent of any GPU backend:
//! - Geometry: triangle data and bounding boxes
//! - Ray: ray/triangle intersection
//! - Material: surface description
//! - Mesh: renderable payload with the highlight overlay

pub mod geometry;
pub mod material;
pub mod mesh;
pub mod primitives;
pub mod ray;

pub use geometry::{BoundingBox, Geometry};
pub use material::{Material, Side};
pub use mesh::{MaterialSlot, Mesh};
pub use ray::{Ray, RayHit};

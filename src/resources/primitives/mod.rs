pub mod box_shape;
pub mod sphere;

pub use box_shape::{create_box, create_box_from_bounds};
pub use sphere::{create_sphere, SphereOptions};

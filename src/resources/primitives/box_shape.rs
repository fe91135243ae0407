use glam::Vec3;

use crate::resources::geometry::Geometry;

/// Axis-aligned box centred on the origin.
#[must_use]
pub fn create_box(width: f32, height: f32, depth: f32) -> Geometry {
    let w = width / 2.0;
    let h = height / 2.0;
    let d = depth / 2.0;

    // Picking only needs positions, so corners are shared between faces.
    let positions = vec![
        Vec3::new(-w, -h, d),
        Vec3::new(w, -h, d),
        Vec3::new(w, h, d),
        Vec3::new(-w, h, d),
        Vec3::new(-w, -h, -d),
        Vec3::new(w, -h, -d),
        Vec3::new(w, h, -d),
        Vec3::new(-w, h, -d),
    ];

    // 2 triangles per face, CCW seen from outside
    let indices = vec![
        0, 1, 2, 0, 2, 3, // front (+Z)
        5, 4, 7, 5, 7, 6, // back (-Z)
        3, 2, 6, 3, 6, 7, // top (+Y)
        4, 5, 1, 4, 1, 0, // bottom (-Y)
        1, 5, 6, 1, 6, 2, // right (+X)
        4, 0, 3, 4, 3, 7, // left (-X)
    ];

    Geometry::build(positions, Some(indices))
}

/// Box spanning `min`..`max`, not centred on the origin.
#[must_use]
pub fn create_box_from_bounds(min: Vec3, max: Vec3) -> Geometry {
    let size = max - min;
    let centre = (min + max) * 0.5;
    let centred = create_box(size.x, size.y, size.z);
    let positions = centred.positions().iter().map(|p| *p + centre).collect();
    Geometry::build(positions, centred.indices().map(<[u32]>::to_vec))
}

use slotmap::new_key_type;
use std::sync::Arc;

use crate::assets::storage::AssetStorage;
use crate::resources::geometry::Geometry;
use crate::resources::material::Material;

// Strongly-typed handles
new_key_type! {
    pub struct GeometryHandle;
    pub struct MaterialHandle;
}

/// Shared registry of geometries and materials.
///
/// Cheap to clone; every clone points at the same storages.
#[derive(Clone)]
pub struct AssetServer {
    pub geometries: Arc<AssetStorage<GeometryHandle, Geometry>>,
    pub materials: Arc<AssetStorage<MaterialHandle, Material>>,
}

impl Default for AssetServer {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetServer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            geometries: Arc::new(AssetStorage::new()),
            materials: Arc::new(AssetStorage::new()),
        }
    }

    /// Registers a geometry, deduplicated by its UUID.
    pub fn add_geometry(&self, geometry: Geometry) -> GeometryHandle {
        self.geometries.add_with_uuid(geometry.uuid(), geometry)
    }

    /// Registers a material, deduplicated by its UUID.
    pub fn add_material(&self, material: Material) -> MaterialHandle {
        self.materials.add_with_uuid(material.uuid, material)
    }
}

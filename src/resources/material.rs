use glam::Vec4;
use uuid::Uuid;

/// Which triangle faces a material renders.
///
/// Rendering only; picking always tests both faces.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
pub enum Side {
    #[default]
    Front,
    Back,
    Double,
}

/// Surface description for a mesh.
///
/// Only the properties the interaction layer cares about are modelled here;
/// renderers resolve the rest through the material's `uuid`.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub uuid: Uuid,
    pub name: String,
    /// Linear RGBA base colour.
    pub color: Vec4,
    pub opacity: f32,
    pub transparent: bool,
    pub side: Side,
}

impl Material {
    #[must_use]
    pub fn new(color: Vec4) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: String::new(),
            color,
            opacity: 1.0,
            transparent: false,
            side: Side::Front,
        }
    }

    /// Unlit translucent material used to mark selected meshes.
    #[must_use]
    pub fn highlight(color: Vec4, opacity: f32) -> Self {
        Self {
            name: "Highlight".to_string(),
            opacity,
            transparent: opacity < 1.0,
            ..Self::new(color)
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new(Vec4::ONE)
    }
}

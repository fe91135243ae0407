use crate::assets::{GeometryHandle, MaterialHandle};

/// Material currently in effect on a mesh.
///
/// The highlight overlay keeps the original handle alongside the highlight
/// one, so restoring is exact and applying twice cannot lose the original.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialSlot {
    Original(MaterialHandle),
    Highlighted {
        original: MaterialHandle,
        highlight: MaterialHandle,
    },
}

impl MaterialSlot {
    /// Handle the renderer should draw with.
    #[inline]
    #[must_use]
    pub fn active(&self) -> MaterialHandle {
        match *self {
            Self::Original(material) => material,
            Self::Highlighted { highlight, .. } => highlight,
        }
    }

    /// Handle the mesh was created with, regardless of overlay.
    #[inline]
    #[must_use]
    pub fn original(&self) -> MaterialHandle {
        match *self {
            Self::Original(material) | Self::Highlighted { original: material, .. } => material,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_highlighted(&self) -> bool {
        matches!(self, Self::Highlighted { .. })
    }

    /// Applies the overlay. Returns `false` when it was already applied.
    pub(crate) fn apply_highlight(&mut self, highlight: MaterialHandle) -> bool {
        match *self {
            Self::Original(original) => {
                *self = Self::Highlighted { original, highlight };
                true
            }
            Self::Highlighted { .. } => false,
        }
    }

    /// Drops the overlay. Returns `false` when there was none.
    pub(crate) fn restore(&mut self) -> bool {
        match *self {
            Self::Highlighted { original, .. } => {
                *self = Self::Original(original);
                true
            }
            Self::Original(_) => false,
        }
    }
}

/// Renderable payload attached to a scene node.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub name: String,
    pub geometry: GeometryHandle,
    material: MaterialSlot,
    pub visible: bool,
}

impl Mesh {
    #[must_use]
    pub fn new(geometry: GeometryHandle, material: MaterialHandle) -> Self {
        Self {
            name: "Mesh".to_string(),
            geometry,
            material: MaterialSlot::Original(material),
            visible: true,
        }
    }

    /// Handle the renderer should draw with (the highlight while selected).
    #[inline]
    #[must_use]
    pub fn material(&self) -> MaterialHandle {
        self.material.active()
    }

    #[inline]
    #[must_use]
    pub fn material_slot(&self) -> &MaterialSlot {
        &self.material
    }

    #[inline]
    pub(crate) fn material_slot_mut(&mut self) -> &mut MaterialSlot {
        &mut self.material
    }
}

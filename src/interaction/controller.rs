use std::fmt;

use glam::{Quat, Vec3, Vec4};

use crate::errors::Result;
use crate::interaction::settings::InteractionSettings;
use crate::resources::primitives::{create_sphere, SphereOptions};
use crate::resources::Material;
use crate::scene::{NodeHandle, Scene};

/// Index of a tracked input device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeviceId(pub usize);

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "device {}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XrEventKind {
    SelectStart,
    SelectEnd,
    SqueezeStart,
    SqueezeEnd,
}

/// Discrete input event from one device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XrEvent {
    pub device: DeviceId,
    pub kind: XrEventKind,
}

impl XrEvent {
    #[must_use]
    pub fn new(device: usize, kind: XrEventKind) -> Self {
        Self {
            device: DeviceId(device),
            kind,
        }
    }

    #[must_use]
    pub fn select_start(device: usize) -> Self {
        Self::new(device, XrEventKind::SelectStart)
    }

    #[must_use]
    pub fn select_end(device: usize) -> Self {
        Self::new(device, XrEventKind::SelectEnd)
    }

    #[must_use]
    pub fn squeeze_start(device: usize) -> Self {
        Self::new(device, XrEventKind::SqueezeStart)
    }

    #[must_use]
    pub fn squeeze_end(device: usize) -> Self {
        Self::new(device, XrEventKind::SqueezeEnd)
    }
}

/// Scene nodes tracking one device.
///
/// The target-ray node follows the pointing pose and the grip node follows
/// the hand. The selection sphere is a small mesh parented to the grip; its
/// world-space centre is the spatial query origin, and grabbed nodes are
/// re-parented under the grip.
#[derive(Debug, Clone, Copy)]
pub struct XrController {
    pub id: DeviceId,
    pub target_ray: NodeHandle,
    pub grip: NodeHandle,
    pub selection_sphere: NodeHandle,
}

impl XrController {
    /// Creates the controller nodes as direct children of the scene.
    pub fn spawn(scene: &mut Scene, id: DeviceId, settings: &InteractionSettings) -> Result<Self> {
        let index = id.0;
        let target_ray = scene.create_node_with_name(&format!("controller-{index}"));
        let grip = scene.create_node_with_name(&format!("controller-grip-{index}"));

        let sphere = create_sphere(&SphereOptions {
            radius: settings.selection_sphere_radius,
            ..SphereOptions::default()
        });
        let material = Material::new(Vec4::new(1.0, 1.0, 1.0, 1.0)).with_name("SelectionSphere");
        let selection_sphere =
            scene.add_mesh_node(&format!("selection-sphere-{index}"), sphere, material, Some(grip))?;
        scene.node(selection_sphere).set_position_vec(settings.selection_sphere_offset);

        log::debug!("Spawned controller rig for {id}");

        Ok(Self {
            id,
            target_ray,
            grip,
            selection_sphere,
        })
    }

    /// Updates the grip pose from tracking data.
    pub fn set_grip_pose(&self, scene: &mut Scene, position: Vec3, rotation: Quat) {
        scene.node(self.grip).set_position_vec(position).set_rotation(rotation);
    }

    /// Updates the target-ray pose from tracking data.
    pub fn set_target_ray_pose(&self, scene: &mut Scene, position: Vec3, rotation: Quat) {
        scene.node(self.target_ray).set_position_vec(position).set_rotation(rotation);
    }

    /// World-space centre of the selection sphere.
    #[must_use]
    pub fn selection_origin(&self, scene: &Scene) -> Option<Vec3> {
        scene
            .world_matrix(self.selection_sphere)
            .map(|m| Vec3::from(m.translation))
    }
}

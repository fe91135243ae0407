//! Interaction Context
//!
//! Owns the per-device interaction state and routes input events to the
//! selection, highlight and grab operations.
//!
//! # Event handling
//!
//! - **SelectStart**: query at the device's selection sphere, advance the
//!   device's selection, move the highlight. Ignored while the device holds
//!   a node, so a device has a selection or a grab, never both.
//! - **SelectEnd**: nothing.
//! - **SqueezeStart**: grab the device's current selection.
//! - **SqueezeEnd**: release whatever the device holds.
//!
//! Devices are independent, with three cross-device rules: nodes under any
//! grip are never picked, a node held by one device cannot be grabbed by
//! another, and a highlight change never clears another device's selection
//! highlight.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut scene = Scene::default();
//! let mut ctx = InteractionContext::new(&mut scene, InteractionSettings::default())?;
//!
//! let loader = ctx.model_sender();
//! std::thread::spawn(move || loader.deliver(load_prefab("models/robot.glb")));
//!
//! loop {
//!     ctx.poll_loaded(&mut scene);
//!     ctx.controller(DeviceId(0)).unwrap().set_grip_pose(&mut scene, pos, rot);
//!     for event in pending_events() {
//!         ctx.handle_event(&mut scene, event)?;
//!     }
//!     scene.update_matrix_world();
//! }
//! ```

use smallvec::SmallVec;

use crate::assets::{MaterialHandle, ModelDelivery, ModelQueue, ModelSender};
use crate::errors::{Result, XrError};
use crate::interaction::candidates::CandidateSet;
use crate::interaction::controller::{DeviceId, XrController, XrEvent, XrEventKind};
use crate::interaction::grab::{self, GrabState};
use crate::interaction::highlight::set_highlight;
use crate::interaction::query::query_hit;
use crate::interaction::selection::advance;
use crate::interaction::settings::InteractionSettings;
use crate::resources::Material;
use crate::scene::{NodeHandle, NodeHierarchy, Scene};

/// What an event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionOutcome {
    Selected(NodeHandle),
    /// The query found nothing and the previous selection was dropped.
    Deselected(NodeHandle),
    Grabbed(NodeHandle),
    Released(NodeHandle),
    Ignored,
}

#[derive(Debug, Default, Clone, Copy)]
struct DeviceState {
    selection: Option<NodeHandle>,
    grab: GrabState,
}

pub struct InteractionContext {
    settings: InteractionSettings,
    controllers: Vec<XrController>,
    devices: Vec<DeviceState>,
    candidates: CandidateSet,
    highlight_material: MaterialHandle,
    models: ModelQueue,
}

impl InteractionContext {
    /// Validates `settings`, registers the highlight material and spawns one
    /// controller rig per device.
    pub fn new(scene: &mut Scene, settings: InteractionSettings) -> Result<Self> {
        settings.validate()?;

        let highlight_material = scene
            .assets
            .add_material(Material::highlight(settings.highlight_color, settings.highlight_opacity));

        let controllers = (0..settings.device_count)
            .map(|i| XrController::spawn(scene, DeviceId(i), &settings))
            .collect::<Result<Vec<_>>>()?;
        let devices = vec![DeviceState::default(); controllers.len()];

        log::info!("Interaction context ready: {} devices", controllers.len());

        Ok(Self {
            settings,
            controllers,
            devices,
            candidates: CandidateSet::new(),
            highlight_material,
            models: ModelQueue::new(),
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[must_use]
    pub fn settings(&self) -> &InteractionSettings {
        &self.settings
    }

    #[must_use]
    pub fn controllers(&self) -> &[XrController] {
        &self.controllers
    }

    #[must_use]
    pub fn controller(&self, device: DeviceId) -> Option<&XrController> {
        self.controllers.get(device.0)
    }

    #[must_use]
    pub fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    #[must_use]
    pub fn highlight_material(&self) -> MaterialHandle {
        self.highlight_material
    }

    /// Current selection of `device`; `None` for unknown devices.
    #[must_use]
    pub fn selection(&self, device: DeviceId) -> Option<NodeHandle> {
        self.devices.get(device.0).and_then(|d| d.selection)
    }

    /// Node held by `device`; `None` for unknown devices.
    #[must_use]
    pub fn grabbed(&self, device: DeviceId) -> Option<NodeHandle> {
        self.devices.get(device.0).and_then(|d| d.grab.held())
    }

    // ========================================================================
    // Candidates & Model Loading
    // ========================================================================

    /// Registers a pickable mesh node. Returns `false` if already present.
    pub fn add_candidate(&mut self, node: NodeHandle) -> bool {
        self.candidates.push(node)
    }

    pub fn add_candidates(&mut self, nodes: impl IntoIterator<Item = NodeHandle>) -> usize {
        self.candidates.extend(nodes)
    }

    /// Sender for external loaders. Deliveries are applied by
    /// [`poll_loaded`](Self::poll_loaded).
    #[must_use]
    pub fn model_sender(&self) -> ModelSender {
        self.models.sender()
    }

    /// Instantiates every model delivered since the last call and registers
    /// its meshes as candidates. Failed loads are logged and dropped.
    ///
    /// Returns the number of models added to the scene.
    pub fn poll_loaded(&mut self, scene: &mut Scene) -> usize {
        let deliveries: Vec<ModelDelivery> = self.models.drain().collect();
        let mut loaded = 0;

        for delivery in deliveries {
            match delivery {
                ModelDelivery::Loaded(prefab) => match scene.instantiate(&prefab) {
                    Ok(instance) => {
                        let added = self.candidates.extend(instance.meshes);
                        log::info!("Model '{}' loaded: {added} pickable meshes", prefab.name);
                        loaded += 1;
                    }
                    Err(e) => log::error!("Failed to instantiate model '{}': {e}", prefab.name),
                },
                ModelDelivery::Failed { uri, reason } => {
                    log::error!("An error occurred while loading '{uri}': {reason}");
                }
            }
        }
        loaded
    }

    // ========================================================================
    // Event Handling
    // ========================================================================

    pub fn handle_event(&mut self, scene: &mut Scene, event: XrEvent) -> Result<InteractionOutcome> {
        match event.kind {
            XrEventKind::SelectStart => self.select_start(scene, event.device),
            XrEventKind::SelectEnd => {
                self.device_index(event.device)?;
                Ok(InteractionOutcome::Ignored)
            }
            XrEventKind::SqueezeStart => self.squeeze_start(scene, event.device),
            XrEventKind::SqueezeEnd => self.squeeze_end(scene, event.device),
        }
    }

    pub fn select_start(&mut self, scene: &mut Scene, device: DeviceId) -> Result<InteractionOutcome> {
        let index = self.device_index(device)?;
        if let Some(held) = self.devices[index].grab.held() {
            log::debug!("{device} is holding {held:?}; select ignored");
            return Ok(InteractionOutcome::Ignored);
        }
        let Some(origin) = self.controllers[index].selection_origin(scene) else {
            log::warn!("Selection sphere of {device} is missing from the scene");
            return Ok(InteractionOutcome::Ignored);
        };

        let grips: SmallVec<[NodeHandle; 2]> = self.controllers.iter().map(|c| c.grip).collect();
        let hit = {
            let view: &Scene = scene;
            let pickable = self
                .candidates
                .iter()
                .filter(|&node| !grips.iter().any(|&g| view.is_ancestor_or_self(g, node)));
            query_hit(view, origin, pickable)
        };

        let previous = self.devices[index].selection;
        let Some(hit) = hit else {
            self.devices[index].selection = None;
            return Ok(match previous {
                Some(prev) => {
                    set_highlight(scene, prev, false, self.highlight_material);
                    self.refresh_highlights(scene);
                    log::info!("{device} deselected {prev:?}");
                    InteractionOutcome::Deselected(prev)
                }
                None => {
                    log::debug!("{device} selected nothing at {origin}");
                    InteractionOutcome::Ignored
                }
            });
        };

        let next = advance(scene, hit.node, previous);
        if let Some(prev) = previous
            && prev != next
        {
            set_highlight(scene, prev, false, self.highlight_material);
        }
        set_highlight(scene, next, true, self.highlight_material);
        self.devices[index].selection = Some(next);
        self.refresh_highlights(scene);

        log::info!(
            "{device} selected {} ({next:?})",
            scene.get_name(next).unwrap_or("<unnamed>")
        );
        Ok(InteractionOutcome::Selected(next))
    }

    pub fn squeeze_start(&mut self, scene: &mut Scene, device: DeviceId) -> Result<InteractionOutcome> {
        let index = self.device_index(device)?;
        if self.devices[index].grab.is_holding() {
            log::debug!("{device} is already holding a node");
            return Ok(InteractionOutcome::Ignored);
        }
        let Some(node) = self.devices[index].selection else {
            log::debug!("{device} squeezed with nothing selected");
            return Ok(InteractionOutcome::Ignored);
        };
        if self.devices.iter().any(|d| d.grab.held() == Some(node)) {
            log::debug!("{node:?} is held by another device");
            return Ok(InteractionOutcome::Ignored);
        }

        let grip = self.controllers[index].grip;
        grab::grab(scene, &mut self.devices[index].grab, node, grip)?;

        set_highlight(scene, node, false, self.highlight_material);
        self.devices[index].selection = None;
        for other in &mut self.devices {
            if let Some(selected) = other.selection
                && scene.is_ancestor_or_self(node, selected)
            {
                other.selection = None;
            }
        }
        self.refresh_highlights(scene);

        log::info!("{device} grabbed {node:?}");
        Ok(InteractionOutcome::Grabbed(node))
    }

    pub fn squeeze_end(&mut self, scene: &mut Scene, device: DeviceId) -> Result<InteractionOutcome> {
        let index = self.device_index(device)?;
        let Some(node) = grab::release(scene, &mut self.devices[index].grab)? else {
            return Ok(InteractionOutcome::Ignored);
        };

        log::info!("{device} released {node:?}");
        Ok(InteractionOutcome::Released(node))
    }

    fn device_index(&self, device: DeviceId) -> Result<usize> {
        if device.0 < self.devices.len() {
            Ok(device.0)
        } else {
            Err(XrError::UnknownDevice(device.0))
        }
    }

    /// Re-applies every device's selection highlight, so clearing one
    /// device's highlight cannot strip an overlapping one.
    fn refresh_highlights(&self, scene: &mut Scene) {
        for selected in self.devices.iter().filter_map(|d| d.selection) {
            set_highlight(scene, selected, true, self.highlight_material);
        }
    }
}

//! Grabbing: re-parenting a node under a controller grip so it follows the
//! hand, without the node visibly jumping.

use crate::errors::Result;
use crate::scene::{NodeHandle, Scene};

/// What a single device is holding.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GrabState {
    held: Option<NodeHandle>,
}

impl GrabState {
    #[must_use]
    pub fn held(&self) -> Option<NodeHandle> {
        self.held
    }

    #[must_use]
    pub fn is_holding(&self) -> bool {
        self.held.is_some()
    }
}

/// Moves `node` under `grip`, keeping its world transform.
///
/// Returns `Ok(false)` and changes nothing when `state` already holds a
/// node. On error the state is left untouched.
pub fn grab(scene: &mut Scene, state: &mut GrabState, node: NodeHandle, grip: NodeHandle) -> Result<bool> {
    if state.is_holding() {
        return Ok(false);
    }
    scene.attach_preserving_world(node, Some(grip))?;
    state.held = Some(node);
    Ok(true)
}

/// Moves the held node back to the scene root, keeping its world transform,
/// and clears `state`.
///
/// Returns the released node, or `None` when nothing was held. A held node
/// that has since been removed from the scene is dropped from the state and
/// reported as `None`.
pub fn release(scene: &mut Scene, state: &mut GrabState) -> Result<Option<NodeHandle>> {
    let Some(node) = state.held.take() else {
        return Ok(None);
    };
    if scene.get_node(node).is_none() {
        log::warn!("Released node {node:?} no longer exists");
        return Ok(None);
    }
    scene.attach_preserving_world(node, None)?;
    Ok(Some(node))
}

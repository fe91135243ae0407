//! Highlight overlay.
//!
//! Highlighting swaps the active material of every mesh in a subtree for
//! one shared highlight material, remembering each mesh's own material in
//! its [`MaterialSlot`](crate::resources::MaterialSlot). Clearing restores
//! exactly what was there before. Both directions are idempotent.

use crate::assets::MaterialHandle;
use crate::scene::{NodeHandle, Scene};

/// Applies (`enabled == true`) or clears the highlight on every mesh in the
/// subtree rooted at `node`. Returns how many meshes changed.
///
/// A stale `node` changes nothing.
pub fn set_highlight(scene: &mut Scene, node: NodeHandle, enabled: bool, highlight: MaterialHandle) -> usize {
    let mut changed = 0;
    for handle in scene.traverse(node) {
        let Some(mesh) = scene.get_mesh_mut(handle) else {
            continue;
        };
        let slot = mesh.material_slot_mut();
        let did_change = if enabled { slot.apply_highlight(highlight) } else { slot.restore() };
        if did_change {
            changed += 1;
        }
    }
    log::trace!("set_highlight({node:?}, {enabled}): {changed} meshes changed");
    changed
}

/// Number of highlighted meshes in the subtree rooted at `node`.
#[must_use]
pub fn highlighted_count(scene: &Scene, node: NodeHandle) -> usize {
    scene
        .traverse(node)
        .into_iter()
        .filter_map(|h| scene.get_mesh(h))
        .filter(|m| m.material_slot().is_highlighted())
        .count()
}

//! Hierarchical selection cycling.
//!
//! Repeated selection on the same spot walks down the hierarchy: the first
//! press selects the whole model, each following press selects the next
//! node on the path towards the mesh that was hit, and a press on the mesh
//! itself wraps back to the model root.

use crate::scene::{NodeHandle, NodeHierarchy};

/// Next selection given the mesh `hit` by the query and the `previous`
/// selection of the same device.
///
/// | previous                           | result                                 |
/// |------------------------------------|----------------------------------------|
/// | `None`                             | model root of `hit`                    |
/// | not on the path to `hit`           | model root of `hit`                    |
/// | `hit` itself                       | model root of `hit`                    |
/// | ancestor of `hit`                  | child of `previous` towards `hit`      |
///
/// # Panics
///
/// If the parent chain of `hit` is cyclic or dangling.
pub fn advance<H: NodeHierarchy>(hierarchy: &H, hit: NodeHandle, previous: Option<NodeHandle>) -> NodeHandle {
    let path = hierarchy.ancestor_path(hit);
    let root = path.first().copied().unwrap_or(hit);

    let Some(previous) = previous else {
        return root;
    };
    if previous == hit {
        return root;
    }

    path.iter()
        .position(|&n| n == previous)
        .and_then(|i| path.get(i + 1).copied())
        .unwrap_or(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Scene;

    #[test]
    fn single_node_model_always_selects_itself() {
        let mut scene = Scene::default();
        let only = scene.create_node();

        assert_eq!(advance(&scene, only, None), only);
        assert_eq!(advance(&scene, only, Some(only)), only);
    }

    #[test]
    fn unrelated_previous_resets_to_root() {
        let mut scene = Scene::default();
        let a = scene.create_node();
        let a_leaf = scene.create_node();
        scene.attach(a_leaf, a).unwrap();
        let b = scene.create_node();

        assert_eq!(advance(&scene, a_leaf, Some(b)), a);
    }
}

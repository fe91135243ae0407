use crate::errors::{Result, XrError};
use crate::resources::geometry::Geometry;
use crate::resources::material::Material;
use crate::scene::transform::Transform;

/// Mesh data carried by a prefab node; registered with the asset server on
/// instantiation.
#[derive(Debug, Clone)]
pub struct PrefabMesh {
    pub geometry: Geometry,
    pub material: Material,
}

/// Prefab node: plain data, children referenced by index.
#[derive(Debug, Clone, Default)]
pub struct PrefabNode {
    pub name: Option<String>,
    pub transform: Transform,
    /// Indices of the children in `Prefab::nodes`
    pub children_indices: Vec<usize>,
    pub mesh: Option<PrefabMesh>,
}

impl PrefabNode {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Self::default()
        }
    }
}

/// A loaded model as produced by an asset loader.
///
/// Prefabs hold no `NodeHandle` or scene references and are `Send`, so a
/// loader thread can build one and hand it to the host thread.
/// `Scene::instantiate` turns it into scene nodes.
#[derive(Debug, Clone, Default)]
pub struct Prefab {
    /// Name given to the model-root group created on instantiation.
    pub name: String,
    /// Flattened node storage
    pub nodes: Vec<PrefabNode>,
    /// Indices of the top-level nodes in `nodes`
    pub root_indices: Vec<usize>,
}

impl Prefab {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// Pushes a node and returns its index.
    pub fn add_node(&mut self, node: PrefabNode) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Pushes a node and records it as a top-level node.
    pub fn add_root(&mut self, node: PrefabNode) -> usize {
        let index = self.add_node(node);
        self.root_indices.push(index);
        index
    }

    /// Pushes a node as a child of `parent`.
    pub fn add_child(&mut self, parent: usize, node: PrefabNode) -> Result<usize> {
        if parent >= self.nodes.len() {
            return Err(XrError::InvalidPrefab(format!(
                "parent index {parent} out of range"
            )));
        }
        let index = self.add_node(node);
        self.nodes[parent].children_indices.push(index);
        Ok(index)
    }

    /// Checks that every index is in range and that every node is reached
    /// exactly once from the roots.
    pub fn validate(&self) -> Result<()> {
        let mut seen = vec![false; self.nodes.len()];
        let mut stack: Vec<usize> = self.root_indices.iter().rev().copied().collect();

        while let Some(index) = stack.pop() {
            let Some(node) = self.nodes.get(index) else {
                return Err(XrError::InvalidPrefab(format!(
                    "node index {index} out of range"
                )));
            };
            if std::mem::replace(&mut seen[index], true) {
                return Err(XrError::InvalidPrefab(format!(
                    "node {index} is reachable more than once"
                )));
            }
            stack.extend(node.children_indices.iter().rev().copied());
        }

        if let Some(orphan) = seen.iter().position(|&s| !s) {
            return Err(XrError::InvalidPrefab(format!(
                "node {orphan} is not reachable from any root"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_shared_child() {
        let mut prefab = Prefab::new("Broken");
        let a = prefab.add_root(PrefabNode::named("a"));
        let b = prefab.add_child(a, PrefabNode::named("b")).unwrap();
        prefab.root_indices.push(b);

        assert!(matches!(prefab.validate(), Err(XrError::InvalidPrefab(_))));
    }

    #[test]
    fn validate_rejects_orphan() {
        let mut prefab = Prefab::new("Orphan");
        prefab.add_root(PrefabNode::named("root"));
        prefab.add_node(PrefabNode::named("lost"));

        assert!(matches!(prefab.validate(), Err(XrError::InvalidPrefab(_))));
    }

    #[test]
    fn validate_accepts_tree() {
        let mut prefab = Prefab::new("Tree");
        let root = prefab.add_root(PrefabNode::named("root"));
        let arm = prefab.add_child(root, PrefabNode::named("arm")).unwrap();
        prefab.add_child(arm, PrefabNode::named("hand")).unwrap();

        assert!(prefab.validate().is_ok());
    }
}

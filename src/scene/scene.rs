use glam::Affine3A;
use slotmap::{SecondaryMap, SlotMap, SparseSecondaryMap};

use crate::assets::{AssetServer, Prefab};
use crate::errors::{Result, XrError};
use crate::resources::geometry::{BoundingBox, Geometry};
use crate::resources::material::Material;
use crate::resources::mesh::Mesh;
use crate::scene::hierarchy::NodeHierarchy;
use crate::scene::node::Node;
use crate::scene::transform_system;
use crate::scene::wrapper::SceneNode;
use crate::scene::NodeHandle;

/// Nodes created by [`Scene::instantiate`].
#[derive(Debug, Clone)]
pub struct ModelInstance {
    /// Group node wrapping the prefab roots; a direct child of the scene.
    pub root: NodeHandle,
    /// Mesh nodes in pre-order.
    pub meshes: Vec<NodeHandle>,
}

/// Scene graph.
///
/// The scene itself is the implicit root: nodes without a parent are its
/// direct children and are listed in `root_nodes`. Names and meshes are
/// stored as components keyed by node handle.
pub struct Scene {
    pub assets: AssetServer,

    pub(crate) nodes: SlotMap<NodeHandle, Node>,
    pub root_nodes: Vec<NodeHandle>,

    names: SecondaryMap<NodeHandle, String>,
    meshes: SparseSecondaryMap<NodeHandle, Mesh>,
}

impl Scene {
    #[must_use]
    pub fn new(assets: AssetServer) -> Self {
        Self {
            assets,
            nodes: SlotMap::with_key(),
            root_nodes: Vec::new(),
            names: SecondaryMap::new(),
            meshes: SparseSecondaryMap::new(),
        }
    }

    // ========================================================================
    // Node Creation & Removal
    // ========================================================================

    /// Creates an empty node as a direct child of the scene.
    pub fn create_node(&mut self) -> NodeHandle {
        self.add_node(Node::new())
    }

    pub fn create_node_with_name(&mut self, name: &str) -> NodeHandle {
        let handle = self.create_node();
        self.set_name(handle, name);
        handle
    }

    /// Adds a node as a direct child of the scene. Any hierarchy links the
    /// node carries are discarded.
    pub fn add_node(&mut self, mut node: Node) -> NodeHandle {
        node.parent = None;
        node.children.clear();
        node.transform.mark_dirty();
        let handle = self.nodes.insert(node);
        self.root_nodes.push(handle);
        handle
    }

    /// Adds a node under `parent`.
    pub fn add_to_parent(&mut self, node: Node, parent: NodeHandle) -> Result<NodeHandle> {
        if !self.nodes.contains_key(parent) {
            return Err(XrError::NodeNotFound(parent));
        }
        let handle = self.add_node(node);
        self.attach(handle, parent)?;
        Ok(handle)
    }

    /// Creates a named mesh node, registering its geometry and material.
    pub fn add_mesh_node(
        &mut self,
        name: &str,
        geometry: Geometry,
        material: Material,
        parent: Option<NodeHandle>,
    ) -> Result<NodeHandle> {
        let handle = match parent {
            Some(p) => self.add_to_parent(Node::new(), p)?,
            None => self.create_node(),
        };
        self.set_name(handle, name);

        let mut mesh = Mesh::new(self.assets.add_geometry(geometry), self.assets.add_material(material));
        mesh.name = name.to_string();
        self.meshes.insert(handle, mesh);
        Ok(handle)
    }

    /// Removes a node and its whole subtree, with their components.
    pub fn remove_node(&mut self, handle: NodeHandle) {
        let subtree = self.traverse(handle);
        if subtree.is_empty() {
            return;
        }

        self.unlink(handle);

        for node in subtree {
            self.nodes.remove(node);
            self.names.remove(node);
            self.meshes.remove(node);
        }
    }

    // ========================================================================
    // Hierarchy
    // ========================================================================

    /// Re-parents `child` under `parent`, keeping its local transform.
    ///
    /// The child is removed from its old parent's children (or from
    /// `root_nodes`) before it is appended to the new parent's.
    pub fn attach(&mut self, child: NodeHandle, parent: NodeHandle) -> Result<()> {
        if !self.nodes.contains_key(child) {
            return Err(XrError::NodeNotFound(child));
        }
        if !self.nodes.contains_key(parent) {
            return Err(XrError::NodeNotFound(parent));
        }
        if child == parent {
            log::warn!("Cannot attach node to itself!");
            return Err(XrError::SelfAttach(child));
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(XrError::CycleDetected { child, parent });
        }

        self.unlink(child);

        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = Some(parent);
            c.transform.mark_dirty();
        }
        Ok(())
    }

    /// Makes `child` a direct child of the scene, keeping its local transform.
    pub fn detach(&mut self, child: NodeHandle) -> Result<()> {
        if !self.nodes.contains_key(child) {
            return Err(XrError::NodeNotFound(child));
        }
        self.unlink(child);
        self.root_nodes.push(child);
        if let Some(c) = self.nodes.get_mut(child) {
            c.transform.mark_dirty();
        }
        Ok(())
    }

    /// Re-parents `child` under `parent` (the scene when `None`) so that its
    /// world transform is unchanged.
    ///
    /// The new local transform is `parent_world⁻¹ · child_world`, decomposed
    /// back into position, rotation and scale.
    pub fn attach_preserving_world(&mut self, child: NodeHandle, parent: Option<NodeHandle>) -> Result<()> {
        let child_world = self.world_matrix(child).ok_or(XrError::NodeNotFound(child))?;

        let local = match parent {
            Some(p) => {
                let parent_world = self.world_matrix(p).ok_or(XrError::NodeNotFound(p))?;
                self.attach(child, p)?;
                parent_world.inverse() * child_world
            }
            None => {
                self.detach(child)?;
                child_world
            }
        };

        if let Some(node) = self.nodes.get_mut(child) {
            node.transform.apply_local_matrix(local);
        }
        Ok(())
    }

    /// Removes `handle` from its parent's children or from `root_nodes`.
    fn unlink(&mut self, handle: NodeHandle) {
        let old_parent = self.nodes.get_mut(handle).and_then(|n| n.parent.take());
        match old_parent {
            Some(p) => {
                if let Some(parent) = self.nodes.get_mut(p)
                    && let Some(i) = parent.children.iter().position(|&x| x == handle)
                {
                    parent.children.remove(i);
                }
            }
            None => {
                if let Some(i) = self.root_nodes.iter().position(|&x| x == handle) {
                    self.root_nodes.remove(i);
                }
            }
        }
    }

    /// Pre-order list of `handle` and its descendants; empty for a stale handle.
    #[must_use]
    pub fn traverse(&self, handle: NodeHandle) -> Vec<NodeHandle> {
        let mut out = Vec::new();
        let mut stack = vec![handle];
        while let Some(current) = stack.pop() {
            let Some(node) = self.nodes.get(current) else {
                continue;
            };
            out.push(current);
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    // ========================================================================
    // Node & Component Access
    // ========================================================================

    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    /// Chainable editing wrapper for `handle`.
    pub fn node(&mut self, handle: NodeHandle) -> SceneNode<'_> {
        SceneNode::new(self, handle)
    }

    #[must_use]
    pub fn get_name(&self, handle: NodeHandle) -> Option<&str> {
        self.names.get(handle).map(String::as_str)
    }

    pub fn set_name(&mut self, handle: NodeHandle, name: &str) {
        if self.nodes.contains_key(handle) {
            self.names.insert(handle, name.to_string());
        }
    }

    /// First node with the given name, in storage order.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<NodeHandle> {
        self.names.iter().find(|(_, n)| n.as_str() == name).map(|(h, _)| h)
    }

    #[must_use]
    pub fn get_mesh(&self, handle: NodeHandle) -> Option<&Mesh> {
        self.meshes.get(handle)
    }

    pub(crate) fn get_mesh_mut(&mut self, handle: NodeHandle) -> Option<&mut Mesh> {
        self.meshes.get_mut(handle)
    }

    /// Attaches a mesh payload to an existing node.
    pub fn set_mesh(&mut self, handle: NodeHandle, mesh: Mesh) -> Result<()> {
        if !self.nodes.contains_key(handle) {
            return Err(XrError::NodeNotFound(handle));
        }
        self.meshes.insert(handle, mesh);
        Ok(())
    }

    // ========================================================================
    // Spatial Queries
    // ========================================================================

    /// World matrix composed from the current TRS values of `handle` and its
    /// ancestors. Does not read or write the cached matrices.
    #[must_use]
    pub fn world_matrix(&self, handle: NodeHandle) -> Option<Affine3A> {
        if !self.nodes.contains_key(handle) {
            return None;
        }
        let world = self
            .ancestors(handle)
            .filter_map(|h| self.nodes.get(h))
            .fold(Affine3A::IDENTITY, |acc, node| node.transform.compute_local_matrix() * acc);
        Some(world)
    }

    /// World-space AABB enclosing every mesh in the subtree rooted at
    /// `handle`. Each geometry's local box is transformed by its node's
    /// world matrix. Returns [`BoundingBox::EMPTY`] when there is no mesh.
    #[must_use]
    pub fn world_bounding_box(&self, handle: NodeHandle) -> BoundingBox {
        let Some(world) = self.world_matrix(handle) else {
            return BoundingBox::EMPTY;
        };

        let mut bounds = BoundingBox::EMPTY;
        let mut stack = vec![(handle, world)];
        while let Some((current, matrix)) = stack.pop() {
            if let Some(mesh) = self.meshes.get(current)
                && let Some(geometry) = self.assets.geometries.get(mesh.geometry)
            {
                bounds = bounds.union(&geometry.bounding_box().transform(&matrix));
            }
            if let Some(node) = self.nodes.get(current) {
                for &child in &node.children {
                    if let Some(c) = self.nodes.get(child) {
                        stack.push((child, matrix * c.transform.compute_local_matrix()));
                    }
                }
            }
        }
        bounds
    }

    /// Refreshes the cached local/world matrices of every node.
    pub fn update_matrix_world(&mut self) {
        transform_system::update_hierarchy(&mut self.nodes, &self.root_nodes);
    }

    // ========================================================================
    // Prefab Instantiation
    // ========================================================================

    /// Creates scene nodes for a loaded model.
    ///
    /// All prefab roots are grouped under one new node named after the
    /// prefab, which becomes the model root for selection. Geometries and
    /// materials are registered with the asset server.
    pub fn instantiate(&mut self, prefab: &Prefab) -> Result<ModelInstance> {
        prefab.validate()?;

        let root = self.create_node_with_name(&prefab.name);
        let mut meshes = Vec::new();

        // Pre-order, parents before children
        let mut stack: Vec<(usize, NodeHandle)> =
            prefab.root_indices.iter().rev().map(|&i| (i, root)).collect();

        while let Some((index, parent)) = stack.pop() {
            let source = &prefab.nodes[index];
            let handle = self.add_to_parent(Node::with_transform(source.transform.clone()), parent)?;

            if let Some(name) = &source.name {
                self.set_name(handle, name);
            }
            if let Some(prefab_mesh) = &source.mesh {
                let mut mesh = Mesh::new(
                    self.assets.add_geometry(prefab_mesh.geometry.clone()),
                    self.assets.add_material(prefab_mesh.material.clone()),
                );
                if let Some(name) = &source.name {
                    mesh.name.clone_from(name);
                }
                self.meshes.insert(handle, mesh);
                meshes.push(handle);
            }

            stack.extend(source.children_indices.iter().rev().map(|&c| (c, handle)));
        }

        log::debug!(
            "Instantiated prefab '{}': {} nodes, {} meshes",
            prefab.name,
            prefab.nodes.len(),
            meshes.len()
        );

        Ok(ModelInstance { root, meshes })
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(AssetServer::new())
    }
}

impl NodeHierarchy for Scene {
    fn contains_node(&self, node: NodeHandle) -> bool {
        self.nodes.contains_key(node)
    }

    fn parent_of(&self, node: NodeHandle) -> Option<NodeHandle> {
        self.nodes.get(node).and_then(Node::parent)
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

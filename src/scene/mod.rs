//! Scene Graph
//!
//! Hierarchy and spatial data the picking layer runs on:
//! - Node: scene node (parent/child links and a transform)
//! - Transform: TRS component with cached matrices
//! - Scene: node storage, names, mesh components, hierarchy edits
//! - NodeHierarchy: ancestor walks (model root, root-to-leaf paths)
//! - SceneNode: chainable wrapper for transform edits
//! - transform_system: world matrix propagation

pub mod hierarchy;
pub mod node;
pub mod scene;
pub mod transform;
pub mod transform_system;
pub mod wrapper;

pub use hierarchy::{AncestorPath, NodeHierarchy};
pub use node::Node;
pub use scene::{ModelInstance, Scene};
pub use transform::Transform;
pub use wrapper::SceneNode;

use slotmap::new_key_type;

new_key_type! {
    /// Handle of a node stored in a [`Scene`].
    pub struct NodeHandle;
}

use glam::Affine3A;

use crate::scene::NodeHandle;
use crate::scene::transform::Transform;

/// A minimal scene node containing only hierarchy and spatial data.
///
/// Names and mesh payloads live in the [`Scene`](crate::scene::Scene)
/// component maps, keyed by the node's handle.
///
/// # Hierarchy
///
/// - `parent`: non-owning back-reference (None for direct children of the scene)
/// - `children`: ordered list of owned child handles
///
/// The parent link is only ever read for ancestor walks; it never decides
/// node lifetime.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) parent: Option<NodeHandle>,
    pub(crate) children: Vec<NodeHandle>,

    pub transform: Transform,

    pub visible: bool,
}

impl Node {
    /// Creates a new node with default transform and visibility.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            transform: Transform::new(),
            visible: true,
        }
    }

    /// Creates a node with the given local transform.
    #[must_use]
    pub fn with_transform(transform: Transform) -> Self {
        Self {
            transform,
            ..Self::new()
        }
    }

    /// Returns the parent node handle, if any.
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    /// Returns a read-only slice of child node handles.
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }

    /// Returns the cached world matrix written by the transform system.
    ///
    /// Picking does not read this cache; it recomputes world matrices from
    /// the current TRS values so it never sees a stale pose.
    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Affine3A {
        &self.transform.world_matrix
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}

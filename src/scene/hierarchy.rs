//! Ancestor walks over a parented node graph.
//!
//! A walk climbs parent links until it reaches a node without a parent: a
//! direct child of the scene, called the *model root*. The walk is bounded by
//! the number of live nodes; exceeding the bound means the graph contains a
//! cycle, and meeting a parent handle that does not resolve means a dangling
//! link. Both are scene-graph corruption and panic.

use smallvec::SmallVec;

use crate::scene::NodeHandle;

/// Root-to-node path, model root first.
pub type AncestorPath = SmallVec<[NodeHandle; 8]>;

/// Read access to parent links.
///
/// Implemented by [`Scene`](crate::scene::Scene); the provided methods are
/// what the selection state machine is written against.
pub trait NodeHierarchy {
    /// Whether `node` refers to a live node.
    fn contains_node(&self, node: NodeHandle) -> bool;

    /// Parent of `node`; `None` for model roots and stale handles.
    fn parent_of(&self, node: NodeHandle) -> Option<NodeHandle>;

    /// Number of live nodes, used as the walk bound.
    fn node_count(&self) -> usize;

    /// Iterates `node`, its parent, and so on up to the model root.
    fn ancestors(&self, node: NodeHandle) -> Ancestors<'_, Self>
    where
        Self: Sized,
    {
        Ancestors {
            hierarchy: self,
            next: Some(node),
            remaining: self.node_count().max(1),
        }
    }

    /// Top-most ancestor of `node` below the scene.
    fn model_root(&self, node: NodeHandle) -> NodeHandle
    where
        Self: Sized,
    {
        self.ancestors(node).last().unwrap_or(node)
    }

    /// Path from the model root down to `node`, both inclusive.
    fn ancestor_path(&self, node: NodeHandle) -> AncestorPath
    where
        Self: Sized,
    {
        let mut path: AncestorPath = self.ancestors(node).collect();
        path.reverse();
        path
    }

    /// Whether `ancestor` is `node` or lies on its parent chain.
    fn is_ancestor_or_self(&self, ancestor: NodeHandle, node: NodeHandle) -> bool
    where
        Self: Sized,
    {
        self.ancestors(node).any(|n| n == ancestor)
    }
}

/// Iterator returned by [`NodeHierarchy::ancestors`].
pub struct Ancestors<'a, H: NodeHierarchy> {
    hierarchy: &'a H,
    next: Option<NodeHandle>,
    remaining: usize,
}

impl<H: NodeHierarchy> Iterator for Ancestors<'_, H> {
    type Item = NodeHandle;

    fn next(&mut self) -> Option<NodeHandle> {
        let current = self.next?;

        assert!(
            self.remaining > 0,
            "scene graph corrupted: parent chain above {current:?} does not terminate (cycle)"
        );
        self.remaining -= 1;

        self.next = self.hierarchy.parent_of(current).inspect(|&parent| {
            assert!(
                self.hierarchy.contains_node(parent),
                "scene graph corrupted: {current:?} points at missing parent {parent:?}"
            );
        });

        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::{SecondaryMap, SlotMap};

    /// Bare parent table, so corrupt graphs can be built directly.
    #[derive(Default)]
    struct ParentTable {
        nodes: SlotMap<NodeHandle, ()>,
        parents: SecondaryMap<NodeHandle, NodeHandle>,
    }

    impl ParentTable {
        fn add(&mut self, parent: Option<NodeHandle>) -> NodeHandle {
            let node = self.nodes.insert(());
            if let Some(p) = parent {
                self.parents.insert(node, p);
            }
            node
        }
    }

    impl NodeHierarchy for ParentTable {
        fn contains_node(&self, node: NodeHandle) -> bool {
            self.nodes.contains_key(node)
        }

        fn parent_of(&self, node: NodeHandle) -> Option<NodeHandle> {
            self.parents.get(node).copied()
        }

        fn node_count(&self) -> usize {
            self.nodes.len()
        }
    }

    #[test]
    fn path_runs_from_model_root_to_node() {
        let mut t = ParentTable::default();
        let root = t.add(None);
        let mid = t.add(Some(root));
        let leaf = t.add(Some(mid));

        assert_eq!(t.ancestor_path(leaf).as_slice(), &[root, mid, leaf]);
        assert_eq!(t.model_root(leaf), root);
        assert_eq!(t.model_root(root), root);
        assert!(t.is_ancestor_or_self(mid, leaf));
        assert!(t.is_ancestor_or_self(leaf, leaf));
        assert!(!t.is_ancestor_or_self(leaf, mid));
    }

    #[test]
    #[should_panic(expected = "does not terminate")]
    fn cycle_is_fatal() {
        let mut t = ParentTable::default();
        let a = t.add(None);
        let b = t.add(Some(a));
        t.parents.insert(a, b);

        let _ = t.model_root(b);
    }

    #[test]
    #[should_panic(expected = "missing parent")]
    fn dangling_parent_is_fatal() {
        let mut t = ParentTable::default();
        let ghost = t.add(None);
        let child = t.add(Some(ghost));
        t.nodes.remove(ghost);

        let _ = t.ancestor_path(child);
    }
}

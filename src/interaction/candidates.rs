use rustc_hash::FxHashSet;

use crate::scene::NodeHandle;

/// Pool of mesh nodes eligible for picking.
///
/// Append-only: entries are never removed during a session. Iteration is in
/// insertion order, which decides ties in the spatial query.
#[derive(Debug, Default, Clone)]
pub struct CandidateSet {
    order: Vec<NodeHandle>,
    members: FxHashSet<NodeHandle>,
}

impl CandidateSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `node`; returns `false` if it was already present.
    pub fn push(&mut self, node: NodeHandle) -> bool {
        if self.members.insert(node) {
            self.order.push(node);
            true
        } else {
            false
        }
    }

    /// Appends every node not yet present; returns how many were added.
    pub fn extend(&mut self, nodes: impl IntoIterator<Item = NodeHandle>) -> usize {
        nodes.into_iter().filter(|&n| self.push(n)).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeHandle> + '_ {
        self.order.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl Extend<NodeHandle> for CandidateSet {
    fn extend<I: IntoIterator<Item = NodeHandle>>(&mut self, iter: I) {
        CandidateSet::extend(self, iter);
    }
}

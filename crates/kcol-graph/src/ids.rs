use std::fmt;

/// Stable handle of a node inside a [`Graph`](crate::Graph) arena.
///
/// Handles are only minted by the graph that owns the node; they stay valid
/// when the traversal order is re-sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeRef(usize);

impl NodeRef {
    /// Returns the arena slot backing this handle.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Creates a [`NodeRef`] from an arena index.
pub(crate) fn make_node(index: usize) -> NodeRef {
    NodeRef(index)
}

/// Orders an endpoint pair so each undirected edge has a single key.
pub(crate) fn edge_key(a: NodeRef, b: NodeRef) -> (NodeRef, NodeRef) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

use kcol_graph::{Graph, NodeRef};

/// Returns true when no edge joins two nodes of the same positive color.
///
/// Uncolored endpoints never conflict. Each edge is inspected from both
/// sides, which is harmless because the check is symmetric.
pub fn verify(graph: &Graph) -> bool {
    find_conflict(graph).is_none()
}

/// First edge whose endpoints share a positive color, in traversal order.
pub fn find_conflict(graph: &Graph) -> Option<(NodeRef, NodeRef)> {
    for (handle, node) in graph.nodes() {
        if !node.is_colored() {
            continue;
        }
        for neighbour in node.connections() {
            if graph.color(*neighbour) == node.color() {
                return Some((handle, *neighbour));
            }
        }
    }
    None
}

/// Returns true when every node carries a positive color.
pub fn is_fully_colored(graph: &Graph) -> bool {
    graph.colored_count() == graph.len()
}

use std::collections::{BTreeSet, VecDeque};
use std::fmt;
use std::ops::Index;

use kcol_core::errors::{ErrorInfo, KcolError};
use kcol_core::{Color, NodeId, UNCOLORED};

use crate::ids::{edge_key, make_node, NodeRef};

/// Raw node payload used when restoring a graph from a snapshot.
#[derive(Debug, Clone)]
pub(crate) struct NodeRecord {
    pub(crate) id: NodeId,
    pub(crate) color: Color,
    pub(crate) partition: Option<usize>,
    pub(crate) connections: Vec<NodeRef>,
}

/// A vertex of an undirected [`Graph`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    id: NodeId,
    color: Color,
    partition: Option<usize>,
    connections: Vec<NodeRef>,
}

impl Node {
    fn new(id: NodeId, partition: Option<usize>) -> Self {
        Self {
            id,
            color: UNCOLORED,
            partition,
            connections: Vec::new(),
        }
    }

    /// Caller-assigned identifier.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Current color, [`UNCOLORED`] until a coloring run reaches the node.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns true once a positive color has been assigned.
    pub fn is_colored(&self) -> bool {
        self.color != UNCOLORED
    }

    /// Number of distinct neighbours.
    pub fn degree(&self) -> usize {
        self.connections.len()
    }

    /// Planted color class, if the node was created by a partitioning generator.
    pub fn partition(&self) -> Option<usize> {
        self.partition
    }

    /// Neighbours in insertion order.
    pub fn connections(&self) -> &[NodeRef] {
        &self.connections
    }
}

/// Undirected simple graph stored as an arena of [`Node`] records.
///
/// The arena never moves nodes, so a [`NodeRef`] stays valid for the lifetime
/// of the graph. The separate traversal order is what coloring policies consume
/// and is rearranged by [`Graph::sort_by_degree_desc`].
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    order: Vec<NodeRef>,
    edges: BTreeSet<(NodeRef, NodeRef)>,
}

impl Graph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty graph with room for `nodes` vertices.
    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(nodes),
            order: Vec::with_capacity(nodes),
            edges: BTreeSet::new(),
        }
    }

    /// Appends a node without a planted partition. Ids are not checked for uniqueness.
    pub fn add_node(&mut self, id: NodeId) -> NodeRef {
        self.push_node(Node::new(id, None))
    }

    /// Appends a node tagged with its planted color class.
    pub fn add_partitioned_node(&mut self, id: NodeId, partition: usize) -> NodeRef {
        self.push_node(Node::new(id, Some(partition)))
    }

    fn push_node(&mut self, node: Node) -> NodeRef {
        let handle = make_node(self.nodes.len());
        self.nodes.push(node);
        self.order.push(handle);
        handle
    }

    /// Inserts the undirected edge `a - b`.
    ///
    /// Returns `Ok(false)` without touching the graph when the edge already
    /// exists. Self loops and foreign handles are rejected.
    pub fn add_edge(&mut self, a: NodeRef, b: NodeRef) -> Result<bool, KcolError> {
        self.try_node(a)?;
        self.try_node(b)?;
        if a == b {
            return Err(KcolError::Graph(
                ErrorInfo::new("self-loop", "edges must join two distinct nodes")
                    .with_context("node", self.nodes[a.index()].id),
            ));
        }
        if !self.edges.insert(edge_key(a, b)) {
            return Ok(false);
        }
        self.nodes[a.index()].connections.push(b);
        self.nodes[b.index()].connections.push(a);
        Ok(true)
    }

    /// Returns true if `a` and `b` are adjacent.
    pub fn exists_edge(&self, a: NodeRef, b: NodeRef) -> bool {
        self.edges.contains(&edge_key(a, b))
    }

    /// Looks up a node, failing for handles that do not belong to this graph.
    pub fn try_node(&self, node: NodeRef) -> Result<&Node, KcolError> {
        self.nodes.get(node.index()).ok_or_else(|| {
            KcolError::Graph(
                ErrorInfo::new("unknown-node", "node does not exist")
                    .with_context("node", node.index()),
            )
        })
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Current traversal order.
    pub fn order(&self) -> &[NodeRef] {
        &self.order
    }

    /// Iterates nodes in traversal order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeRef, &Node)> + '_ {
        self.order.iter().map(move |handle| (*handle, &self.nodes[handle.index()]))
    }

    /// Iterates each undirected edge once, as `(lower arena slot, higher arena slot)`.
    pub fn edges(&self) -> impl Iterator<Item = (NodeRef, NodeRef)> + '_ {
        self.edges.iter().copied()
    }

    /// Degree of `node`.
    pub fn degree(&self, node: NodeRef) -> usize {
        self[node].degree()
    }

    /// Largest degree in the graph, `0` for an empty graph.
    pub fn max_degree(&self) -> usize {
        self.nodes.iter().map(Node::degree).max().unwrap_or(0)
    }

    /// Smallest degree in the graph, `0` for an empty graph.
    pub fn min_degree(&self) -> usize {
        self.nodes.iter().map(Node::degree).min().unwrap_or(0)
    }

    /// Edge count, half the degree sum.
    pub fn num_edges(&self) -> usize {
        self.nodes.iter().map(Node::degree).sum::<usize>() / 2
    }

    /// Current color of `node`.
    pub fn color(&self, node: NodeRef) -> Color {
        self[node].color
    }

    /// Overwrites the color of `node`.
    pub fn set_color(&mut self, node: NodeRef, color: Color) {
        self.nodes[node.index()].color = color;
    }

    /// Clears every color back to [`UNCOLORED`]. Required between coloring runs.
    pub fn reset(&mut self) {
        for node in &mut self.nodes {
            node.color = UNCOLORED;
        }
    }

    /// Number of nodes that currently carry a color.
    pub fn colored_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_colored()).count()
    }

    /// Stable sort of the traversal order by descending degree.
    pub fn sort_by_degree_desc(&mut self) {
        let nodes = &self.nodes;
        self.order
            .sort_by(|a, b| nodes[b.index()].degree().cmp(&nodes[a.index()].degree()));
    }

    /// Rebuilds a graph from raw records, checking every structural invariant.
    pub(crate) fn from_records(
        records: Vec<NodeRecord>,
        order: Vec<NodeRef>,
    ) -> Result<Self, KcolError> {
        let count = records.len();
        let mut graph = Graph::with_capacity(count);
        for record in records {
            let handle = graph.push_node(Node::new(record.id, record.partition));
            let node = &mut graph.nodes[handle.index()];
            node.color = record.color;
            node.connections = record.connections;
        }
        for (idx, node) in graph.nodes.iter().enumerate() {
            let this = make_node(idx);
            for &neighbour in &node.connections {
                let symmetric = neighbour.index() < count
                    && neighbour != this
                    && graph.nodes[neighbour.index()].connections.contains(&this);
                if !symmetric {
                    return Err(KcolError::Graph(
                        ErrorInfo::new("invalid-adjacency", "adjacency is not a symmetric simple graph")
                            .with_context("node", idx)
                            .with_context("neighbour", neighbour.index()),
                    ));
                }
                graph.edges.insert(edge_key(this, neighbour));
            }
        }
        let degree_sum: usize = graph.nodes.iter().map(Node::degree).sum();
        if degree_sum != 2 * graph.edges.len() {
            return Err(KcolError::Graph(ErrorInfo::new(
                "invalid-adjacency",
                "adjacency lists contain duplicate neighbours",
            )));
        }

        let mut seen = vec![false; count];
        for handle in &order {
            match seen.get_mut(handle.index()) {
                Some(flag) if !*flag => *flag = true,
                _ => {
                    return Err(KcolError::Graph(
                        ErrorInfo::new("invalid-order", "order is not a permutation of the nodes")
                            .with_context("node", handle.index()),
                    ))
                }
            }
        }
        if order.len() != count {
            return Err(KcolError::Graph(
                ErrorInfo::new("invalid-order", "order is not a permutation of the nodes")
                    .with_context("expected", count)
                    .with_context("actual", order.len()),
            ));
        }
        graph.order = order;
        Ok(graph)
    }

    /// Breadth-first reachability check. The empty graph counts as connected.
    pub fn is_connected(&self) -> bool {
        let Some(start) = self.order.first().copied() else {
            return true;
        };
        let mut visited = vec![false; self.nodes.len()];
        let mut queue = VecDeque::from([start]);
        visited[start.index()] = true;
        let mut reached = 1;
        while let Some(current) = queue.pop_front() {
            for neighbour in &self.nodes[current.index()].connections {
                if !visited[neighbour.index()] {
                    visited[neighbour.index()] = true;
                    reached += 1;
                    queue.push_back(*neighbour);
                }
            }
        }
        reached == self.nodes.len()
    }
}

impl Index<NodeRef> for Graph {
    type Output = Node;

    fn index(&self, node: NodeRef) -> &Node {
        &self.nodes[node.index()]
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Graph:")?;
        for (_, node) in self.nodes() {
            write!(f, "\n\t[id:{}, color:{}, to:", node.id, node.color)?;
            for (idx, neighbour) in node.connections.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", self[*neighbour].id)?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}

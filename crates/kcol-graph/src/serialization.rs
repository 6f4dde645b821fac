use kcol_core::errors::{ErrorInfo, KcolError};
use kcol_core::{Color, NodeId};
use serde::{Deserialize, Serialize};

use crate::graph::{Graph, NodeRecord};
use crate::ids::{make_node, NodeRef};

/// Serializes the graph, including colors and traversal order, to a JSON string.
pub fn graph_to_json(graph: &Graph) -> Result<String, KcolError> {
    let serializable = SerializableGraph::from_graph(graph);
    serde_json::to_string_pretty(&serializable)
        .map_err(|err| KcolError::Serde(ErrorInfo::new("serialize-json", err.to_string())))
}

/// Restores a graph from a JSON string produced by [`graph_to_json`].
pub fn graph_from_json(json: &str) -> Result<Graph, KcolError> {
    let serializable: SerializableGraph = serde_json::from_str(json)
        .map_err(|err| KcolError::Serde(ErrorInfo::new("deserialize-json", err.to_string())))?;
    serializable.into_graph()
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializableGraph {
    nodes: Vec<SerializableNode>,
    order: Vec<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializableNode {
    id: u64,
    color: Color,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    partition: Option<usize>,
    connections: Vec<usize>,
}

impl SerializableGraph {
    fn from_graph(graph: &Graph) -> Self {
        let mut nodes: Vec<(NodeRef, SerializableNode)> = graph
            .nodes()
            .map(|(handle, node)| {
                (
                    handle,
                    SerializableNode {
                        id: node.id().as_raw(),
                        color: node.color(),
                        partition: node.partition(),
                        connections: node.connections().iter().map(NodeRef::index).collect(),
                    },
                )
            })
            .collect();
        nodes.sort_by_key(|(handle, _)| *handle);
        Self {
            nodes: nodes.into_iter().map(|(_, node)| node).collect(),
            order: graph.order().iter().map(NodeRef::index).collect(),
        }
    }

    fn into_graph(self) -> Result<Graph, KcolError> {
        let records = self
            .nodes
            .into_iter()
            .map(|node| NodeRecord {
                id: NodeId::from_raw(node.id),
                color: node.color,
                partition: node.partition,
                connections: node.connections.into_iter().map(make_node).collect(),
            })
            .collect();
        Graph::from_records(records, self.order.into_iter().map(make_node).collect())
    }
}

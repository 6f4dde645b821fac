use kcol_core::errors::KcolError;
use kcol_core::{NodeId, UNCOLORED};
use kcol_graph::Graph;

fn path_graph(len: u64) -> (Graph, Vec<kcol_graph::NodeRef>) {
    let mut graph = Graph::new();
    let nodes: Vec<_> = (0..len).map(|id| graph.add_node(NodeId::from_raw(id))).collect();
    for pair in nodes.windows(2) {
        graph.add_edge(pair[0], pair[1]).unwrap();
    }
    (graph, nodes)
}

#[test]
fn edges_are_symmetric_and_deduplicated() {
    let mut graph = Graph::new();
    let a = graph.add_node(NodeId::from_raw(0));
    let b = graph.add_node(NodeId::from_raw(1));

    assert!(graph.add_edge(a, b).unwrap());
    assert!(!graph.add_edge(b, a).unwrap());
    assert!(!graph.add_edge(a, b).unwrap());

    assert!(graph.exists_edge(a, b));
    assert!(graph.exists_edge(b, a));
    assert_eq!(graph[a].connections(), &[b]);
    assert_eq!(graph[b].connections(), &[a]);
    assert_eq!(graph.degree(a), 1);
    assert_eq!(graph.num_edges(), 1);
}

#[test]
fn self_loops_are_rejected() {
    let mut graph = Graph::new();
    let a = graph.add_node(NodeId::from_raw(7));
    match graph.add_edge(a, a).unwrap_err() {
        KcolError::Graph(info) => {
            assert_eq!(info.code, "self-loop");
            assert_eq!(info.context.get("node"), Some(&"7".to_string()));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(graph.num_edges(), 0);
}

#[test]
fn foreign_handles_are_rejected() {
    let (big, nodes) = path_graph(5);
    let mut small = Graph::new();
    let only = small.add_node(NodeId::from_raw(0));
    let err = small.add_edge(only, nodes[4]).unwrap_err();
    assert_eq!(err.info().code, "unknown-node");
    assert_eq!(big.len(), 5);
}

#[test]
fn degree_statistics() {
    let (mut graph, nodes) = path_graph(4);
    assert_eq!(graph.max_degree(), 2);
    assert_eq!(graph.min_degree(), 1);
    assert_eq!(graph.num_edges(), 3);

    graph.add_edge(nodes[0], nodes[3]).unwrap();
    assert_eq!(graph.min_degree(), 2);
    assert_eq!(graph.num_edges(), 4);
    for (handle, node) in graph.nodes() {
        assert_eq!(graph.degree(handle), node.connections().len());
    }

    let empty = Graph::new();
    assert_eq!(empty.max_degree(), 0);
    assert_eq!(empty.min_degree(), 0);
    assert!(empty.is_connected());
}

#[test]
fn reset_clears_every_color() {
    let (mut graph, nodes) = path_graph(3);
    for (idx, node) in nodes.iter().enumerate() {
        graph.set_color(*node, idx as u32 + 1);
    }
    assert_eq!(graph.colored_count(), 3);
    graph.reset();
    assert_eq!(graph.colored_count(), 0);
    assert!(nodes.iter().all(|node| graph.color(*node) == UNCOLORED));
}

#[test]
fn connectivity_check() {
    let (mut graph, _) = path_graph(4);
    assert!(graph.is_connected());
    graph.add_node(NodeId::from_raw(99));
    assert!(!graph.is_connected());
}

#[test]
fn degree_sort_is_stable_and_keeps_handles() {
    let mut graph = Graph::new();
    let nodes: Vec<_> = (0..5).map(|id| graph.add_node(NodeId::from_raw(id))).collect();
    graph.add_edge(nodes[4], nodes[1]).unwrap();
    graph.add_edge(nodes[4], nodes[2]).unwrap();
    graph.add_edge(nodes[3], nodes[0]).unwrap();

    graph.sort_by_degree_desc();
    let ids: Vec<u64> = graph.nodes().map(|(_, node)| node.id().as_raw()).collect();
    assert_eq!(ids, vec![4, 0, 1, 2, 3]);
    assert_eq!(graph[nodes[4]].id(), NodeId::from_raw(4));
}

#[test]
fn display_lists_neighbour_ids() {
    let (graph, _) = path_graph(2);
    assert_eq!(
        graph.to_string(),
        "Graph:\n\t[id:0, color:0, to:1]\n\t[id:1, color:0, to:0]"
    );
}

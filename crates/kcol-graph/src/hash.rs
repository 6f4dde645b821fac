use sha2::{Digest, Sha256};

use crate::graph::Graph;

/// Computes the canonical structural hash of `graph`.
///
/// The digest covers node ids, planted partitions and the edge set keyed by
/// node id. It ignores colors and the traversal order, so a graph hashes the
/// same before and after a coloring run.
pub fn canonical_hash(graph: &Graph) -> String {
    let mut hasher = Sha256::new();

    let mut nodes: Vec<(u64, Option<usize>)> = graph
        .nodes()
        .map(|(_, node)| (node.id().as_raw(), node.partition()))
        .collect();
    nodes.sort_unstable();
    hasher.update((nodes.len() as u64).to_le_bytes());
    for (id, partition) in nodes {
        hasher.update(id.to_le_bytes());
        encode_partition(partition, &mut hasher);
    }

    let mut edges: Vec<(u64, u64)> = graph
        .edges()
        .map(|(a, b)| {
            let (a, b) = (graph[a].id().as_raw(), graph[b].id().as_raw());
            (a.min(b), a.max(b))
        })
        .collect();
    edges.sort_unstable();
    hasher.update((edges.len() as u64).to_le_bytes());
    for (a, b) in edges {
        hasher.update(a.to_le_bytes());
        hasher.update(b.to_le_bytes());
    }

    format!("{:x}", hasher.finalize())
}

fn encode_partition(partition: Option<usize>, hasher: &mut Sha256) {
    match partition {
        Some(value) => {
            hasher.update(b"partition:some");
            hasher.update((value as u64).to_le_bytes());
        }
        None => hasher.update(b"partition:none"),
    }
}

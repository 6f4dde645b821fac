use kcol_core::errors::KcolError;
use kcol_core::rng::RngHandle;
use kcol_core::NodeId;
use log::{debug, warn};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::graph::Graph;
use crate::ids::NodeRef;
use crate::params::{GeneratorKind, GeneratorParams};

/// Builds a graph with a planted coloring according to `params.kind`.
///
/// Inputs are validated before any node is created, so a failure never
/// leaves a partial graph behind. The returned traversal order is sorted by
/// descending degree.
pub fn generate(params: &GeneratorParams, rng: &mut RngHandle) -> Result<Graph, KcolError> {
    params.validate()?;
    let mut graph = match params.kind {
        GeneratorKind::Partitioned => build_partitioned(params, rng)?,
        GeneratorKind::ConnectedModK => build_mod_k(params, Seeding::RandomTree, rng)?,
        GeneratorKind::LineModK => build_mod_k(params, Seeding::Line, rng)?,
        GeneratorKind::UnconnectedModK => build_mod_k(params, Seeding::None, rng)?,
        GeneratorKind::Triangles => build_triangles(params.num_nodes, rng)?,
    };
    graph.sort_by_degree_desc();
    debug!(
        "generated {} graph: nodes={} edges={} max_degree={}",
        params.kind.name(),
        graph.len(),
        graph.num_edges(),
        graph.max_degree()
    );
    Ok(graph)
}

/// Maximum edge count of a graph with `num_nodes` nodes split into `k` classes by `id mod k`.
pub fn max_edges_mod_k(num_nodes: usize, k: usize) -> u64 {
    if k == 0 {
        return 0;
    }
    let n = num_nodes as u64;
    let k = k as u64;
    let modulo = n % k;
    if modulo == 0 {
        return n * n * (k - 1) / (2 * k);
    }
    let floor = n / k;
    let ceil = floor + 1;
    let rest = k - modulo;
    ceil * ceil * pairs(modulo) + floor * floor * pairs(rest) + ceil * floor * modulo * rest
}

fn pairs(x: u64) -> u64 {
    x * x.saturating_sub(1) / 2
}

fn build_partitioned(params: &GeneratorParams, rng: &mut RngHandle) -> Result<Graph, KcolError> {
    let sizes = params.resolved_set_sizes();
    let total: usize = sizes.iter().sum();
    if total != params.num_nodes {
        debug!(
            "set sizes sum to {total} while num_nodes is {}; building {total} nodes",
            params.num_nodes
        );
    }

    let mut graph = Graph::with_capacity(total);
    let mut created: Vec<NodeRef> = Vec::with_capacity(total);
    let mut detached = 0usize;
    let columns = sizes.iter().copied().max().unwrap_or(0);
    for column in 0..columns {
        for (partition, size) in sizes.iter().enumerate() {
            if column >= *size {
                continue;
            }
            let id = NodeId::from_raw(created.len() as u64);
            let node = graph.add_partitioned_node(id, partition);
            if !created.is_empty() && !attach_backwards(&mut graph, &created, node, params)? {
                detached += 1;
            }
            created.push(node);
        }
    }
    if detached > 0 {
        warn!("{detached} node(s) found no earlier partner under the degree cap; graph is not connected");
    }

    for (idx, &a) in created.iter().enumerate() {
        for &b in &created[idx + 1..] {
            if !params.below_cap(graph.degree(a)) {
                break;
            }
            if graph[a].partition() == graph[b].partition()
                || !params.below_cap(graph.degree(b))
                || graph.exists_edge(a, b)
            {
                continue;
            }
            if rng.gen_bool(params.density) {
                graph.add_edge(a, b)?;
            }
        }
    }
    Ok(graph)
}

/// Joins `node` to the most recent earlier node of another class that still has room.
fn attach_backwards(
    graph: &mut Graph,
    created: &[NodeRef],
    node: NodeRef,
    params: &GeneratorParams,
) -> Result<bool, KcolError> {
    let partition = graph[node].partition();
    let partner = created
        .iter()
        .rev()
        .copied()
        .find(|earlier| {
            graph[*earlier].partition() != partition && params.below_cap(graph.degree(*earlier))
        });
    match partner {
        Some(earlier) => graph.add_edge(node, earlier),
        None => Ok(false),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Seeding {
    RandomTree,
    Line,
    None,
}

fn build_mod_k(
    params: &GeneratorParams,
    seeding: Seeding,
    rng: &mut RngHandle,
) -> Result<Graph, KcolError> {
    let n = params.num_nodes;
    let k = params.k;
    let mut graph = Graph::with_capacity(n);
    let nodes: Vec<NodeRef> = (0..n)
        .map(|id| graph.add_partitioned_node(NodeId::from_raw(id as u64), id % k))
        .collect();

    match seeding {
        Seeding::RandomTree => {
            for id in 1..n {
                let candidates: Vec<usize> = (0..id)
                    .filter(|prev| prev % k != id % k && params.below_cap(graph.degree(nodes[*prev])))
                    .collect();
                if let Some(prev) = candidates.choose(rng) {
                    graph.add_edge(nodes[id], nodes[*prev])?;
                }
            }
        }
        Seeding::Line => {
            for id in 1..n {
                if params.below_cap(graph.degree(nodes[id - 1])) {
                    graph.add_edge(nodes[id - 1], nodes[id])?;
                }
            }
        }
        Seeding::None => {}
    }

    add_random_valid_edges(&mut graph, &nodes, params, rng)?;
    Ok(graph)
}

/// Draws `floor(max_edges * density)` random cross-class pairs.
///
/// Duplicate draws still count towards the target. Draws rejected for
/// landing in one class or on a saturated node are bounded by
/// `max_failed_draws`; once exceeded the pass stops early.
fn add_random_valid_edges(
    graph: &mut Graph,
    nodes: &[NodeRef],
    params: &GeneratorParams,
    rng: &mut RngHandle,
) -> Result<(), KcolError> {
    let n = nodes.len();
    if n < 2 {
        return Ok(());
    }
    let k = params.k;
    let max_edges = max_edges_mod_k(n, k);
    let target = (max_edges as f64 * params.density).floor() as u64;
    let guard = params.max_failed_draws.unwrap_or(64 * n + 1024);
    debug!(
        "numNodes={n} maxNumEdges={max_edges} density={} numEdges={target}",
        params.density
    );

    let mut drawn = 0u64;
    let mut failed = 0usize;
    while drawn < target {
        let start = rng.gen_range(0..n);
        let dest = rng.gen_range(0..n);
        let valid = start % k != dest % k
            && params.below_cap(graph.degree(nodes[start]))
            && params.below_cap(graph.degree(nodes[dest]));
        if !valid {
            failed += 1;
            if failed > guard {
                warn!(
                    "stopped after {failed} rejected draws with {drawn}/{target} edges placed; max_degree too restrictive"
                );
                break;
            }
            continue;
        }
        graph.add_edge(nodes[start], nodes[dest])?;
        drawn += 1;
    }
    Ok(())
}

fn build_triangles(num_nodes: usize, rng: &mut RngHandle) -> Result<Graph, KcolError> {
    let n = num_nodes - num_nodes % 3;
    let per_class = n / 3;
    let mut graph = Graph::with_capacity(n);
    let mut classes: [Vec<NodeRef>; 3] = [
        Vec::with_capacity(per_class),
        Vec::with_capacity(per_class),
        Vec::with_capacity(per_class),
    ];
    for base in (0..n).step_by(3) {
        let triple: Vec<NodeRef> = (0..3)
            .map(|offset| graph.add_partitioned_node(NodeId::from_raw((base + offset) as u64), offset))
            .collect();
        graph.add_edge(triple[0], triple[1])?;
        graph.add_edge(triple[0], triple[2])?;
        graph.add_edge(triple[1], triple[2])?;
        for (class, node) in triple.into_iter().enumerate() {
            classes[class].push(node);
        }
    }

    let max_per_pair = per_class * per_class;
    if max_per_pair == 0 {
        return Ok(graph);
    }
    for (x, y) in [(0, 1), (0, 2), (1, 2)] {
        let count = rng.gen_range(0..max_per_pair);
        for _ in 0..count {
            let a = classes[x][rng.gen_range(0..per_class)];
            let b = classes[y][rng.gen_range(0..per_class)];
            graph.add_edge(a, b)?;
        }
    }
    Ok(graph)
}

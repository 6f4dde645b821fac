use std::cmp::Reverse;
use std::time::Instant;

use kcol_core::errors::{ErrorInfo, KcolError};
use kcol_core::Color;
use kcol_graph::{Graph, NodeRef};
use log::debug;

use crate::policy::{Policy, PolicyEntry};
use crate::stats::StatTracker;
use crate::verify::find_conflict;

/// Colors every node of `graph` in place following `policy`.
///
/// The graph must be freshly reset; a graph that still carries colors from a
/// previous run is rejected with code `stale-colors`. The returned tracker
/// times the coloring pass only. An improper or incomplete result is a
/// defect and surfaces as [`KcolError::ColoringInvariantViolated`].
pub fn color_graph(graph: &mut Graph, policy: Policy) -> Result<StatTracker, KcolError> {
    let stale = graph.colored_count();
    if stale > 0 {
        return Err(KcolError::InvalidParameter(
            ErrorInfo::new("stale-colors", "graph still carries colors from a previous run")
                .with_context("colored", stale)
                .with_context("policy", policy)
                .with_hint("call Graph::reset before reusing a graph"),
        ));
    }

    let start = Instant::now();
    let colors_used = run_entry(graph, policy.entry());
    let duration = start.elapsed();

    if let Some((a, b)) = find_conflict(graph) {
        return Err(KcolError::ColoringInvariantViolated(
            ErrorInfo::new("improper-coloring", "adjacent nodes share a color")
                .with_context("policy", policy)
                .with_context("node", graph[a].id())
                .with_context("neighbour", graph[b].id())
                .with_context("color", graph.color(a)),
        ));
    }
    let colored = graph.colored_count();
    if colored != graph.len() {
        return Err(KcolError::ColoringInvariantViolated(
            ErrorInfo::new("uncolored-node", "run finished with uncolored nodes")
                .with_context("policy", policy)
                .with_context("colored", colored)
                .with_context("nodes", graph.len()),
        ));
    }

    debug!(
        "{policy}: {} nodes, {colors_used} colors, {} ns",
        graph.len(),
        duration.as_nanos()
    );
    Ok(StatTracker::new(duration, colors_used, true))
}

/// Runs each policy in turn on the same graph, resetting colors before every run.
///
/// The graph is left colored by the last policy.
pub fn run_policies(
    graph: &mut Graph,
    policies: &[Policy],
) -> Result<Vec<(Policy, StatTracker)>, KcolError> {
    let mut results = Vec::with_capacity(policies.len());
    for &policy in policies {
        graph.reset();
        let tracker = color_graph(graph, policy)?;
        results.push((policy, tracker));
    }
    Ok(results)
}

fn run_entry(graph: &mut Graph, entry: &PolicyEntry) -> Color {
    let mut unvisited = (entry.initial_order)(graph);
    let mut first_fit = FirstFit::new(graph.len());
    let mut colors_used: Color = 0;

    while let Some(current) = unvisited.pop_front() {
        if !graph[current].is_colored() {
            colors_used = colors_used.max(first_fit.assign(graph, current));
        }
        if entry.colors_neighbors {
            for idx in 0..graph.degree(current) {
                let neighbour = graph[current].connections()[idx];
                if !graph[neighbour].is_colored() {
                    colors_used = colors_used.max(first_fit.assign(graph, neighbour));
                }
            }
        }
        if let Some(priority) = entry.reorder {
            let snapshot: &Graph = graph;
            unvisited
                .make_contiguous()
                .sort_by_cached_key(|node| Reverse(priority(snapshot, *node)));
        }
    }
    colors_used
}

/// Smallest-free-color picker with a reusable marker buffer.
struct FirstFit {
    taken: Vec<bool>,
    touched: Vec<usize>,
}

impl FirstFit {
    fn new(nodes: usize) -> Self {
        Self {
            taken: vec![false; nodes + 1],
            touched: Vec::new(),
        }
    }

    fn assign(&mut self, graph: &mut Graph, node: NodeRef) -> Color {
        for neighbour in graph[node].connections() {
            let color = graph.color(*neighbour);
            if color == 0 {
                continue;
            }
            let slot = color as usize - 1;
            if let Some(flag) = self.taken.get_mut(slot) {
                if !*flag {
                    *flag = true;
                    self.touched.push(slot);
                }
            }
        }
        // A node with d neighbours always finds a free color among the first d + 1.
        let limit = (graph.degree(node) + 1).min(self.taken.len());
        let slot = self.taken[..limit]
            .iter()
            .position(|taken| !taken)
            .unwrap_or(limit);
        for touched in self.touched.drain(..) {
            self.taken[touched] = false;
        }
        let color = (slot + 1) as Color;
        graph.set_color(node, color);
        color
    }
}

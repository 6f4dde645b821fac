use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use kcol_core::errors::KcolError;
use kcol_core::Color;
use kcol_graph::{Graph, NodeRef};
use serde::{Deserialize, Serialize};

/// Traversal and reordering policy of a greedy coloring run.
///
/// All policies share the first-fit rule; they differ only in the order in
/// which nodes are visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Policy {
    /// Degree-descending, one node at a time.
    StrictDecreasing,
    /// Degree-descending, coloring each visited node's uncolored neighbours right away.
    DecreasingNeighbors,
    /// Degree-ascending, one node at a time.
    StrictIncreasing,
    /// Degree-ascending, coloring each visited node's uncolored neighbours right away.
    IncreasingNeighbors,
    /// Re-sorts the queue after every step by the number of colored neighbours.
    NumColoredDynamic,
    /// Re-sorts the queue after every step by the highest neighbour color.
    HighColorDynamic,
}

impl Policy {
    /// Every policy, in report order.
    pub const ALL: [Policy; 6] = [
        Policy::StrictDecreasing,
        Policy::DecreasingNeighbors,
        Policy::StrictIncreasing,
        Policy::IncreasingNeighbors,
        Policy::NumColoredDynamic,
        Policy::HighColorDynamic,
    ];

    /// Name used in reports and on the command line.
    pub fn name(&self) -> &'static str {
        self.entry().name
    }

    pub(crate) fn entry(&self) -> &'static PolicyEntry {
        &POLICY_TABLE[*self as usize]
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Policy {
    type Err = KcolError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Policy::ALL
            .into_iter()
            .find(|policy| policy.name().eq_ignore_ascii_case(value))
            .ok_or_else(|| KcolError::invalid_parameter("policy", value, "unknown coloring policy"))
    }
}

/// Builds the initial visiting queue from the graph's degree-sorted order.
pub(crate) type OrderFn = fn(&Graph) -> VecDeque<NodeRef>;

/// Priority recomputed from live colors; higher values are visited first.
pub(crate) type PriorityFn = fn(&Graph, NodeRef) -> u32;

pub(crate) struct PolicyEntry {
    pub(crate) name: &'static str,
    pub(crate) initial_order: OrderFn,
    pub(crate) colors_neighbors: bool,
    pub(crate) reorder: Option<PriorityFn>,
}

// Indexed by `Policy as usize`; keep in declaration order.
static POLICY_TABLE: [PolicyEntry; 6] = [
    PolicyEntry {
        name: "StrictDecreasing",
        initial_order: descending,
        colors_neighbors: false,
        reorder: None,
    },
    PolicyEntry {
        name: "DecreasingNeighbors",
        initial_order: descending,
        colors_neighbors: true,
        reorder: None,
    },
    PolicyEntry {
        name: "StrictIncreasing",
        initial_order: ascending,
        colors_neighbors: false,
        reorder: None,
    },
    PolicyEntry {
        name: "IncreasingNeighbors",
        initial_order: ascending,
        colors_neighbors: true,
        reorder: None,
    },
    PolicyEntry {
        name: "NumColoredDynamic",
        initial_order: descending,
        colors_neighbors: false,
        reorder: Some(colored_neighbours),
    },
    PolicyEntry {
        name: "HighColorDynamic",
        initial_order: descending,
        colors_neighbors: false,
        reorder: Some(highest_neighbour_color),
    },
];

fn descending(graph: &Graph) -> VecDeque<NodeRef> {
    graph.order().iter().copied().collect()
}

fn ascending(graph: &Graph) -> VecDeque<NodeRef> {
    graph.order().iter().rev().copied().collect()
}

fn colored_neighbours(graph: &Graph, node: NodeRef) -> u32 {
    graph[node]
        .connections()
        .iter()
        .filter(|neighbour| graph[**neighbour].is_colored())
        .count() as u32
}

fn highest_neighbour_color(graph: &Graph, node: NodeRef) -> Color {
    graph[node]
        .connections()
        .iter()
        .map(|neighbour| graph.color(*neighbour))
        .max()
        .unwrap_or(0)
}

#![deny(missing_docs)]

//! Greedy first-fit coloring under six visitation policies.
//!
//! Every policy shares the same coloring rule and differs only in the order
//! nodes are visited. Colors are written into the [`Graph`](kcol_graph::Graph)
//! in place; callers reset the graph between runs.

mod engine;
mod policy;
mod stats;
mod verify;

pub use engine::{color_graph, run_policies};
pub use policy::Policy;
pub use stats::{StatTracker, StatsCollector};
pub use verify::{find_conflict, is_fully_colored, verify};

#![deny(missing_docs)]
#![doc = "Core error, identifier and RNG types shared by the k-coloring benchmark crates."]

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod errors;
pub mod rng;

pub use errors::{ErrorInfo, KcolError};
pub use rng::{derive_substream_seed, RngHandle};

/// Caller-assigned identifier of a node, stable for the lifetime of a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(u64);

impl NodeId {
    /// Creates a new identifier from its raw integer representation.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer representation of the identifier.
    pub fn as_raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Color assigned to a node. `0` is the uncolored sentinel, real colors start at `1`.
pub type Color = u32;

/// Sentinel meaning "not yet colored".
pub const UNCOLORED: Color = 0;

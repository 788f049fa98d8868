//! Network edges.

use serde::{Deserialize, Serialize};

use super::NodeId;

/// Position of an edge in the edge slice a [`Graph`](super::Graph) was built from.
pub type EdgeId = usize;

/// An undirected connection between two nodes.
///
/// Both directions are traversable. Parallel edges (e.g. a road and a rail
/// link between the same cities) are allowed. Weights are expected to be
/// non-negative; the engine does not check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// One endpoint
    pub from: NodeId,
    /// The other endpoint
    pub to: NodeId,
    /// Length in kilometres
    pub distance_km: f64,
    /// Estimated travel time in hours
    pub time_hours: f64,
}

impl Edge {
    /// Creates a new edge.
    pub fn new(from: NodeId, to: NodeId, distance_km: f64, time_hours: f64) -> Self {
        Self {
            from,
            to,
            distance_km,
            time_hours,
        }
    }

    /// Returns true if `node` is one of the endpoints.
    pub fn touches(&self, node: NodeId) -> bool {
        self.from == node || self.to == node
    }

    /// Returns the endpoint opposite `node`, or `None` if `node` is not an endpoint.
    pub fn opposite(&self, node: NodeId) -> Option<NodeId> {
        if self.from == node {
            Some(self.to)
        } else if self.to == node {
            Some(self.from)
        } else {
            None
        }
    }

    /// Returns true if both endpoints are the same node.
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

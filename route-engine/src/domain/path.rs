//! Path types.
//!
//! A `Path` is the result of one successful search: the node sequence from
//! source to destination plus aggregate metrics summed over the edges the
//! search actually used.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::{Edge, Metric, NodeId, RateTable};

/// Aggregate metrics of a route.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RouteMetrics {
    /// Total kilometres
    pub distance_km: f64,
    /// Total hours
    pub time_hours: f64,
    /// Total money, summed over priced hops only
    pub cost: f64,
    /// Number of edges
    pub hops: usize,
    /// Hops whose entered node has no rate (they add nothing to `cost`)
    pub unpriced_hops: usize,
}

impl RouteMetrics {
    /// Metrics of a fully priced route.
    pub fn new(distance_km: f64, time_hours: f64, cost: f64, hops: usize) -> Self {
        Self {
            distance_km,
            time_hours,
            cost,
            hops,
            unpriced_hops: 0,
        }
    }

    /// Value of one metric.
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Distance => self.distance_km,
            Metric::Time => self.time_hours,
            Metric::Cost => self.cost,
            Metric::Hops => self.hops as f64,
        }
    }

    /// Total time as a duration, rounded to the millisecond.
    pub fn duration(&self) -> Duration {
        Duration::milliseconds((self.time_hours * 3_600_000.0).round() as i64)
    }

    /// Returns true if every hop was priced.
    pub fn fully_priced(&self) -> bool {
        self.unpriced_hops == 0
    }

    /// Add one traversed edge, arriving at `entering`.
    pub(crate) fn add_edge(&mut self, edge: &Edge, entering: NodeId, rates: Option<&RateTable>) {
        self.distance_km += edge.distance_km;
        self.time_hours += edge.time_hours;
        self.hops += 1;
        match rates.and_then(|r| r.get(entering)) {
            Some(rate) => self.cost += rate * edge.distance_km,
            None => self.unpriced_hops += 1,
        }
    }
}

/// A route from source to destination.
///
/// # Invariants
///
/// - At least one node (source == destination gives a single-node path)
/// - Consecutive nodes are joined by an edge of the searched graph
/// - No node appears twice
///
/// Paths are immutable once built. Deserialization rejects empty and
/// repeating node sequences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPath")]
pub struct Path {
    nodes: Vec<NodeId>,
    metrics: RouteMetrics,
    metric: Metric,
    total: f64,
}

/// Error returned when a deserialized path breaks a [`Path`] invariant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid path: {reason}")]
pub struct InvalidPath {
    reason: &'static str,
}

#[derive(Deserialize)]
struct RawPath {
    nodes: Vec<NodeId>,
    metrics: RouteMetrics,
    metric: Metric,
    total: f64,
}

impl TryFrom<RawPath> for Path {
    type Error = InvalidPath;

    fn try_from(raw: RawPath) -> Result<Self, Self::Error> {
        if raw.nodes.is_empty() {
            return Err(InvalidPath {
                reason: "a path needs at least one node",
            });
        }
        let path = Path::new(raw.nodes, raw.metrics, raw.metric, raw.total);
        if !path.is_simple() {
            return Err(InvalidPath {
                reason: "nodes must not repeat",
            });
        }
        Ok(path)
    }
}

impl Path {
    pub(crate) fn new(nodes: Vec<NodeId>, metrics: RouteMetrics, metric: Metric, total: f64) -> Self {
        debug_assert!(!nodes.is_empty(), "path must contain at least one node");
        Self {
            nodes,
            metrics,
            metric,
            total,
        }
    }

    /// Node sequence, source first.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// First node.
    pub fn source(&self) -> NodeId {
        self.nodes[0]
    }

    /// Last node.
    pub fn destination(&self) -> NodeId {
        self.nodes[self.nodes.len() - 1]
    }

    /// Aggregate metrics.
    pub fn metrics(&self) -> &RouteMetrics {
        &self.metrics
    }

    /// The metric the producing search minimized.
    pub fn metric(&self) -> Metric {
        self.metric
    }

    /// The minimized value: the sum of the search's edge weights along the path.
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Number of edges.
    pub fn hop_count(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Returns true if the path passes through `node`.
    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains(&node)
    }

    /// Returns true if no node repeats.
    pub fn is_simple(&self) -> bool {
        let mut seen = std::collections::HashSet::with_capacity(self.nodes.len());
        self.nodes.iter().all(|n| seen.insert(*n))
    }

    /// Returns true if both paths visit the same nodes in the same order.
    pub fn same_route(&self, other: &Path) -> bool {
        self.nodes == other.nodes
    }
}

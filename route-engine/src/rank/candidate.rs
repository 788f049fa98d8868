//! Paths as seen by the ranking module.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::{Metric, NodeId, Path, RouteMetrics};

/// A route offered for ranking.
///
/// Built from a search result or handed over by an external enumerator
/// that only knows node sequences and their metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathCandidate {
    pub nodes: Vec<NodeId>,
    pub metrics: RouteMetrics,
}

impl PathCandidate {
    pub fn new(nodes: Vec<NodeId>, metrics: RouteMetrics) -> Self {
        Self { nodes, metrics }
    }

    /// Value of one metric.
    pub fn value(&self, metric: Metric) -> f64 {
        self.metrics.value(metric)
    }

    /// Returns true if the route passes through any of `nodes`.
    pub fn visits_any(&self, nodes: &HashSet<NodeId>) -> bool {
        self.nodes.iter().any(|n| nodes.contains(n))
    }
}

impl From<&Path> for PathCandidate {
    fn from(path: &Path) -> Self {
        Self::new(path.nodes().to_vec(), *path.metrics())
    }
}

impl From<Path> for PathCandidate {
    fn from(path: Path) -> Self {
        Self::from(&path)
    }
}

/// A candidate after ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedPath {
    /// 1-based position
    pub rank: usize,
    /// Score it was ranked by; lower is better
    pub score: f64,
    pub candidate: PathCandidate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Graph, Metric};
    use crate::search::dijkstra;
    use crate::test_support::{diamond_edges, node, nodes};

    #[test]
    fn from_search_result() {
        let edges = diamond_edges();
        let graph = Graph::new(&edges);
        let path = dijkstra(&graph, node(1), node(4), Metric::Distance).path.unwrap();

        let candidate = PathCandidate::from(&path);
        assert_eq!(candidate.nodes, nodes(&[1, 2, 3, 4]));
        assert_eq!(candidate.value(Metric::Distance), 25.0);
        assert_eq!(candidate.value(Metric::Hops), 3.0);
    }

    #[test]
    fn visits_any() {
        let candidate = PathCandidate::new(nodes(&[1, 5, 9]), RouteMetrics::default());
        assert!(candidate.visits_any(&HashSet::from([node(5)])));
        assert!(!candidate.visits_any(&HashSet::from([node(2), node(3)])));
        assert!(!candidate.visits_any(&HashSet::new()));
    }
}

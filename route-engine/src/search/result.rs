//! Search outcomes.

use serde::Serialize;

use crate::domain::{NodeId, Path};

/// Expansion counters gathered by one search call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Nodes settled in total
    pub expanded: usize,
    /// Nodes settled by the forward frontier (bidirectional only)
    pub forward_expanded: usize,
    /// Nodes settled by the backward frontier (bidirectional only)
    pub backward_expanded: usize,
    /// Where the two frontiers met (bidirectional only)
    pub meeting_node: Option<NodeId>,
}

/// Result of a single-pair search.
///
/// An unreachable destination is an ordinary outcome: `path` is `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    /// The optimal path, if the destination is reachable.
    pub path: Option<Path>,

    /// Work done to find it.
    pub stats: SearchStats,
}

impl SearchResult {
    /// A result with no path and no work done.
    pub fn empty() -> Self {
        Self {
            path: None,
            stats: SearchStats::default(),
        }
    }

    /// Returns true if a path was found.
    pub fn found(&self) -> bool {
        self.path.is_some()
    }

    /// The minimized total, if a path was found.
    pub fn total(&self) -> Option<f64> {
        self.path.as_ref().map(Path::total)
    }

    /// Take the path out of the result.
    pub fn into_path(self) -> Option<Path> {
        self.path
    }
}

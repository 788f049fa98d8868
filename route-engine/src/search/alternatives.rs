//! Alternative routes by node blocking.
//!
//! For position `i = 1, 2, ...` of the best route, drop every edge touching
//! the `i`-th node and search again. Each hit is the cheapest route that
//! avoids that one node. This is a cheap way to get a handful of
//! structurally different routes; it is not a k-shortest-paths algorithm,
//! and the second route found need not be the second cheapest overall. Use
//! [`yen_k_shortest`](super::yen_k_shortest) for that.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{Graph, Metric, Path};
use crate::error::RouteError;

use super::config::{SearchConfig, validate_heuristic_weight};
use super::heuristic::GeoHeuristic;
use super::weighted::{dijkstra, label_setting};

/// Search rerun on each reduced graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlternativeStrategy {
    /// Dijkstra
    #[default]
    Weighted,
    /// A* with the metric's geographic estimate
    Heuristic,
}

/// Up to `k - 1` routes that differ from `best` by avoiding one of its nodes.
///
/// Interior nodes of `best` are blocked in order, starting at position 1.
/// Generation stops when the interior is used up or as soon as a reduced
/// graph has no route at all. A route equal to one already produced is
/// skipped. The search reuses `best.metric()`.
///
/// # Errors
///
/// Returns [`RouteError::InvalidPathCount`] if `k` is 0, and
/// [`RouteError::InvalidHeuristicWeight`] if the heuristic strategy is asked
/// for with an unusable `config.heuristic_weight`.
pub fn node_blocking_alternatives(
    graph: &Graph<'_>,
    best: &Path,
    k: usize,
    strategy: AlternativeStrategy,
    config: &SearchConfig,
) -> Result<Vec<Path>, RouteError> {
    if k == 0 {
        return Err(RouteError::InvalidPathCount(k));
    }
    if strategy == AlternativeStrategy::Heuristic {
        validate_heuristic_weight(config.heuristic_weight)?;
    }

    let source = best.source();
    let destination = best.destination();
    let metric = best.metric();
    let mut alternatives: Vec<Path> = Vec::new();

    for position in 1..k {
        if position >= best.nodes().len().saturating_sub(1) {
            break;
        }
        let blocked = best.nodes()[position];

        let reduced = graph.without_node(blocked);
        let view = graph.reindexed(&reduced);

        let result = match strategy {
            AlternativeStrategy::Weighted => dijkstra(&view, source, destination, metric),
            AlternativeStrategy::Heuristic => {
                let heuristic = GeoHeuristic::for_metric(&view, metric, config);
                let weight = view.metric_weight(metric);
                label_setting(
                    &view,
                    source,
                    destination,
                    metric,
                    &weight,
                    &heuristic,
                    config.heuristic_weight,
                )
            }
        };

        let Some(path) = result.path else {
            debug!(%blocked, position, "no route around blocked node");
            break;
        };

        if path.same_route(best) || alternatives.iter().any(|p| p.same_route(&path)) {
            debug!(%blocked, position, "duplicate alternative skipped");
            continue;
        }

        debug!(%blocked, position, total = path.total(), "alternative found");
        alternatives.push(path);
    }

    Ok(alternatives)
}

/// Spread of one metric across a set of routes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AlternativeSummary {
    /// Metric summarised
    pub metric: Metric,
    /// Number of routes
    pub count: usize,
    /// Lowest value
    pub min: f64,
    /// Highest value
    pub max: f64,
    /// Arithmetic mean
    pub mean: f64,
}

impl AlternativeSummary {
    /// Summarise `metric` over `paths`. Returns `None` for an empty set.
    pub fn of(paths: &[Path], metric: Metric) -> Option<Self> {
        if paths.is_empty() {
            return None;
        }

        let values = paths.iter().map(|p| p.metrics().value(metric));
        let min = values.clone().fold(f64::INFINITY, f64::min);
        let max = values.clone().fold(f64::NEG_INFINITY, f64::max);
        let mean = values.sum::<f64>() / paths.len() as f64;

        Some(Self {
            metric,
            count: paths.len(),
            min,
            max,
            mean,
        })
    }
}

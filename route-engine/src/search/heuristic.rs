//! Heuristic-guided search.
//!
//! Estimates are great-circle distances scaled into the metric being
//! searched:
//!
//! | metric   | estimate                                   |
//! |----------|--------------------------------------------|
//! | distance | haversine km                               |
//! | time     | haversine km / max speed                   |
//! | cost     | haversine km × cheapest rate (or fallback) |
//! | hops     | 0                                          |
//!
//! Each is a lower bound on the true remaining cost. A node without
//! coordinates estimates 0. That keeps the bound, but when only some nodes
//! have coordinates the estimate is no longer consistent: it can drop by
//! more than an edge's weight across a single edge. Settled nodes are never
//! reopened, so the guided searches are then not guaranteed optimal. Give
//! every node coordinates, or none, when optimality matters.

use crate::domain::{Coordinates, Graph, Metric, NodeId, RateTable};
use crate::error::RouteError;

use super::config::{SearchConfig, validate_heuristic_weight};
use super::result::SearchResult;
use super::weighted::label_setting;

/// Lower-bound estimate of the remaining cost between two nodes.
pub trait Heuristic {
    /// Estimated cost from `node` to `target`. Must never exceed the true
    /// cost for the search to stay optimal.
    fn estimate(&self, node: NodeId, target: NodeId) -> f64;
}

/// Always estimates 0. Turns heuristic search into Dijkstra.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroHeuristic;

impl Heuristic for ZeroHeuristic {
    fn estimate(&self, _node: NodeId, _target: NodeId) -> f64 {
        0.0
    }
}

/// Great-circle distance scaled by a per-km factor.
///
/// Consistent only when every node, or no node, has coordinates. With
/// partial coordinates [`astar`] and the bidirectional heuristic mode may
/// return a costlier route than [`dijkstra`](super::dijkstra).
#[derive(Debug, Clone, Copy)]
pub struct GeoHeuristic<'a> {
    coordinates: Option<&'a Coordinates>,
    per_km: f64,
}

impl<'a> GeoHeuristic<'a> {
    /// Straight-line kilometres. Admissible for [`Metric::Distance`].
    pub fn distance(coordinates: Option<&'a Coordinates>) -> Self {
        Self {
            coordinates,
            per_km: 1.0,
        }
    }

    /// Straight-line hours at `max_speed_kmh`. Admissible for
    /// [`Metric::Time`] as long as no edge averages faster.
    pub fn time(coordinates: Option<&'a Coordinates>, max_speed_kmh: f64) -> Self {
        Self {
            coordinates,
            per_km: 1.0 / max_speed_kmh,
        }
    }

    /// Straight-line kilometres at the cheapest known rate.
    ///
    /// Falls back to `fallback_rate_per_km` when no rates are known.
    pub fn cost(
        coordinates: Option<&'a Coordinates>,
        rates: Option<&RateTable>,
        fallback_rate_per_km: f64,
    ) -> Self {
        let per_km = rates
            .and_then(RateTable::min_rate)
            .unwrap_or(fallback_rate_per_km);
        Self {
            coordinates,
            per_km,
        }
    }

    /// The estimate matching `metric`, using the graph's lookups.
    pub fn for_metric(graph: &Graph<'a>, metric: Metric, config: &SearchConfig) -> Self {
        let coordinates = graph.coordinates();
        match metric {
            Metric::Distance => Self::distance(coordinates),
            Metric::Time => Self::time(coordinates, config.max_speed_kmh),
            Metric::Cost => Self::cost(coordinates, graph.rates(), config.fallback_rate_per_km),
            Metric::Hops => Self {
                coordinates,
                per_km: 0.0,
            },
        }
    }

    /// Metric units per straight-line kilometre.
    pub fn per_km(&self) -> f64 {
        self.per_km
    }
}

impl Heuristic for GeoHeuristic<'_> {
    fn estimate(&self, node: NodeId, target: NodeId) -> f64 {
        self.coordinates
            .and_then(|c| c.distance_km(node, target))
            .map_or(0.0, |km| km * self.per_km)
    }
}

/// A* search with an unscaled heuristic.
///
/// Returns the same total as [`dijkstra`](super::dijkstra) whenever
/// `heuristic` is consistent for `metric`.
pub fn astar<H>(
    graph: &Graph<'_>,
    source: NodeId,
    destination: NodeId,
    metric: Metric,
    heuristic: &H,
) -> SearchResult
where
    H: Heuristic + ?Sized,
{
    let weight = graph.metric_weight(metric);
    label_setting(graph, source, destination, metric, &weight, heuristic, 1.0)
}

/// Weighted A*: frontier priority is `g + heuristic_weight * h`.
///
/// Weights above 1.0 usually settle fewer nodes but may return a path up to
/// `heuristic_weight` times costlier than optimal.
///
/// # Errors
///
/// Returns [`RouteError::InvalidHeuristicWeight`] if the weight is not
/// finite or is below 1.0.
pub fn weighted_astar<H>(
    graph: &Graph<'_>,
    source: NodeId,
    destination: NodeId,
    metric: Metric,
    heuristic: &H,
    heuristic_weight: f64,
) -> Result<SearchResult, RouteError>
where
    H: Heuristic + ?Sized,
{
    validate_heuristic_weight(heuristic_weight)?;
    let weight = graph.metric_weight(metric);
    Ok(label_setting(
        graph,
        source,
        destination,
        metric,
        &weight,
        heuristic,
        heuristic_weight,
    ))
}

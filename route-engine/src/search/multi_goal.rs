//! Visiting several goals in one trip.
//!
//! A greedy tour: from the current position, head for the goal that is
//! nearest as the crow flies, search a leg there, and repeat. Cheap, and
//! not an optimal tour.

use serde::Serialize;
use tracing::debug;

use crate::domain::{Graph, Metric, NodeId, Path, RouteMetrics};
use crate::error::RouteError;

use super::config::SearchConfig;
use super::heuristic::{GeoHeuristic, Heuristic};
use super::weighted::label_setting;

/// Legs of a multi-goal trip, in visiting order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultiGoalRoute {
    /// One optimal path per goal reached
    pub legs: Vec<Path>,
    /// Goals left unvisited because the next one was unreachable
    pub unreached: Vec<NodeId>,
}

impl MultiGoalRoute {
    /// Returns true if every goal was reached.
    pub fn complete(&self) -> bool {
        self.unreached.is_empty()
    }

    /// Goals in the order they were reached.
    pub fn visit_order(&self) -> Vec<NodeId> {
        self.legs.iter().map(Path::destination).collect()
    }

    /// The whole trip as one node sequence. Goals may be revisited.
    pub fn nodes(&self) -> Vec<NodeId> {
        let mut nodes: Vec<NodeId> = Vec::new();
        for leg in &self.legs {
            let skip = usize::from(!nodes.is_empty());
            nodes.extend_from_slice(&leg.nodes()[skip..]);
        }
        nodes
    }

    /// Metrics summed over every leg.
    pub fn metrics(&self) -> RouteMetrics {
        self.legs.iter().fold(RouteMetrics::default(), |mut acc, leg| {
            let m = leg.metrics();
            acc.distance_km += m.distance_km;
            acc.time_hours += m.time_hours;
            acc.cost += m.cost;
            acc.hops += m.hops;
            acc.unpriced_hops += m.unpriced_hops;
            acc
        })
    }

    /// Sum of the legs' minimized totals.
    pub fn total(&self) -> f64 {
        self.legs.iter().map(Path::total).sum()
    }
}

/// Visit every goal from `source`, nearest first.
///
/// Each leg is a heuristic search under `metric`. A goal equal to the
/// current position is visited for free. The tour stops at the first goal
/// that cannot be reached; it and every goal after it are reported in
/// [`MultiGoalRoute::unreached`].
///
/// # Errors
///
/// Returns [`RouteError::EmptyGoalSet`] if `goals` is empty.
pub fn multi_goal(
    graph: &Graph<'_>,
    source: NodeId,
    goals: &[NodeId],
    metric: Metric,
    config: &SearchConfig,
) -> Result<MultiGoalRoute, RouteError> {
    if goals.is_empty() {
        return Err(RouteError::EmptyGoalSet);
    }
    config.validate()?;

    let mut remaining: Vec<NodeId> = Vec::with_capacity(goals.len());
    for &goal in goals {
        if !remaining.contains(&goal) {
            remaining.push(goal);
        }
    }

    let nearness = GeoHeuristic::distance(graph.coordinates());
    let heuristic = GeoHeuristic::for_metric(graph, metric, config);
    let weight = graph.metric_weight(metric);

    let mut legs = Vec::new();
    let mut current = source;

    while let Some(index) = nearest(&remaining, current, &nearness) {
        let goal = remaining[index];
        if goal == current {
            remaining.remove(index);
            continue;
        }

        let result = label_setting(
            graph,
            current,
            goal,
            metric,
            &weight,
            &heuristic,
            config.heuristic_weight,
        );

        let Some(leg) = result.path else {
            debug!(from = %current, %goal, "goal unreachable, stopping tour");
            break;
        };

        legs.push(leg);
        remaining.remove(index);
        current = goal;
    }

    debug!(
        %source,
        goals = goals.len(),
        legs = legs.len(),
        unreached = remaining.len(),
        "multi-goal tour complete"
    );

    Ok(MultiGoalRoute {
        legs,
        unreached: remaining,
    })
}

fn nearest(remaining: &[NodeId], from: NodeId, nearness: &GeoHeuristic<'_>) -> Option<usize> {
    remaining
        .iter()
        .enumerate()
        .min_by(|a, b| {
            nearness
                .estimate(from, *a.1)
                .total_cmp(&nearness.estimate(from, *b.1))
        })
        .map(|(index, _)| index)
}

//! Route planner facade.

use serde::Serialize;
use tracing::debug;

use crate::domain::{Graph, Metric, NodeId, Path};
use crate::error::RouteError;
use crate::rank::{
    CriteriaWeights, PathCandidate, RankConstraints, RankMode, RankedPath, deduplicate,
    rank_paths, rank_with_constraints,
};

use super::alternatives::{AlternativeStrategy, AlternativeSummary, node_blocking_alternatives};
use super::bidirectional::{
    BidirectionalComparison, BidirectionalMode, bidirectional, compare_with_unidirectional,
    paths_from_many, paths_to_many,
};
use super::config::{SearchConfig, validate_heuristic_weight};
use super::heuristic::GeoHeuristic;
use super::multi_goal::{MultiGoalRoute, multi_goal};
use super::result::SearchResult;
use super::weighted::{dijkstra, label_setting};
use super::yen::yen_k_shortest;

/// Heuristic searches for one pair, one per geographic estimate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeuristicComparison {
    pub distance: SearchResult,
    pub time: SearchResult,
    pub cost: SearchResult,
    /// The metric whose search found a route while settling fewest nodes
    pub fewest_expansions: Option<Metric>,
}

impl HeuristicComparison {
    /// Result for one metric. `Hops` has no geographic estimate.
    pub fn result(&self, metric: Metric) -> Option<&SearchResult> {
        match metric {
            Metric::Distance => Some(&self.distance),
            Metric::Time => Some(&self.time),
            Metric::Cost => Some(&self.cost),
            Metric::Hops => None,
        }
    }
}

/// Route planner over one graph snapshot.
///
/// Holds only shared references, so a planner (or many) can serve
/// concurrent queries against the same graph.
#[derive(Debug, Clone, Copy)]
pub struct Planner<'a> {
    graph: &'a Graph<'a>,
    config: &'a SearchConfig,
}

impl<'a> Planner<'a> {
    /// Create a planner. The configuration is validated once here.
    pub fn new(graph: &'a Graph<'a>, config: &'a SearchConfig) -> Result<Self, RouteError> {
        config.validate()?;
        Ok(Self { graph, config })
    }

    pub fn graph(&self) -> &'a Graph<'a> {
        self.graph
    }

    pub fn config(&self) -> &'a SearchConfig {
        self.config
    }

    /// Optimal route by `metric`, unguided.
    pub fn shortest(&self, source: NodeId, destination: NodeId, metric: Metric) -> SearchResult {
        dijkstra(self.graph, source, destination, metric)
    }

    /// Route guided by the metric's geographic estimate, scaled by the
    /// configured heuristic weight.
    ///
    /// With weight 1.0 the route is optimal when every node has coordinates,
    /// or none does. Partial coordinates can yield a costlier route; see
    /// [`GeoHeuristic`].
    pub fn guided(&self, source: NodeId, destination: NodeId, metric: Metric) -> SearchResult {
        self.guided_with(source, destination, metric, self.config.heuristic_weight)
    }

    /// Like [`guided`](Self::guided) with an explicit heuristic weight.
    pub fn guided_weighted(
        &self,
        source: NodeId,
        destination: NodeId,
        metric: Metric,
        heuristic_weight: f64,
    ) -> Result<SearchResult, RouteError> {
        validate_heuristic_weight(heuristic_weight)?;
        Ok(self.guided_with(source, destination, metric, heuristic_weight))
    }

    fn guided_with(
        &self,
        source: NodeId,
        destination: NodeId,
        metric: Metric,
        heuristic_weight: f64,
    ) -> SearchResult {
        let heuristic = GeoHeuristic::for_metric(self.graph, metric, self.config);
        let weight = self.graph.metric_weight(metric);
        label_setting(
            self.graph,
            source,
            destination,
            metric,
            &weight,
            &heuristic,
            heuristic_weight,
        )
    }

    /// Route found by two frontiers meeting in the middle.
    pub fn bidirectional(
        &self,
        source: NodeId,
        destination: NodeId,
        metric: Metric,
        mode: BidirectionalMode,
    ) -> SearchResult {
        bidirectional(self.graph, source, destination, metric, mode, self.config)
    }

    /// The best route followed by up to `alternative_count - 1` node-blocking
    /// alternatives. Empty if the destination is unreachable.
    pub fn alternatives(
        &self,
        source: NodeId,
        destination: NodeId,
        metric: Metric,
        strategy: AlternativeStrategy,
    ) -> Result<Vec<Path>, RouteError> {
        let best = match strategy {
            AlternativeStrategy::Weighted => self.shortest(source, destination, metric),
            AlternativeStrategy::Heuristic => self.guided(source, destination, metric),
        };
        let Some(best) = best.into_path() else {
            return Ok(Vec::new());
        };

        let others = node_blocking_alternatives(
            self.graph,
            &best,
            self.config.alternative_count,
            strategy,
            self.config,
        )?;

        let mut paths = Vec::with_capacity(others.len() + 1);
        paths.push(best);
        paths.extend(others);
        Ok(paths)
    }

    /// Spread of `metric` across [`alternatives`](Self::alternatives).
    pub fn alternative_summary(
        &self,
        source: NodeId,
        destination: NodeId,
        metric: Metric,
    ) -> Result<Option<AlternativeSummary>, RouteError> {
        let paths = self.alternatives(source, destination, metric, AlternativeStrategy::Weighted)?;
        Ok(AlternativeSummary::of(&paths, metric))
    }

    /// The `k` cheapest simple routes (Yen).
    pub fn k_shortest(
        &self,
        source: NodeId,
        destination: NodeId,
        metric: Metric,
        k: usize,
    ) -> Result<Vec<Path>, RouteError> {
        yen_k_shortest(self.graph, source, destination, metric, k)
    }

    /// Greedy nearest-first tour through `goals`.
    pub fn multi_goal(
        &self,
        source: NodeId,
        goals: &[NodeId],
        metric: Metric,
    ) -> Result<MultiGoalRoute, RouteError> {
        multi_goal(self.graph, source, goals, metric, self.config)
    }

    /// Run the distance, time and cost heuristic searches for one pair.
    pub fn compare_heuristics(&self, source: NodeId, destination: NodeId) -> HeuristicComparison {
        let distance = self.guided(source, destination, Metric::Distance);
        let time = self.guided(source, destination, Metric::Time);
        let cost = self.guided(source, destination, Metric::Cost);

        let fewest_expansions = [
            (Metric::Distance, &distance),
            (Metric::Time, &time),
            (Metric::Cost, &cost),
        ]
        .into_iter()
        .filter(|(_, r)| r.found())
        .min_by_key(|(_, r)| r.stats.expanded)
        .map(|(metric, _)| metric);

        debug!(
            %source,
            %destination,
            distance = distance.stats.expanded,
            time = time.stats.expanded,
            cost = cost.stats.expanded,
            "heuristics compared"
        );

        HeuristicComparison {
            distance,
            time,
            cost,
            fewest_expansions,
        }
    }

    /// Effort of bidirectional against plain Dijkstra for one pair.
    pub fn compare_bidirectional(
        &self,
        source: NodeId,
        destination: NodeId,
        metric: Metric,
    ) -> BidirectionalComparison {
        compare_with_unidirectional(self.graph, source, destination, metric)
    }

    /// Of the shortest, fastest and cheapest routes, the one with the best
    /// composite score under `weights`.
    pub fn balanced(
        &self,
        source: NodeId,
        destination: NodeId,
        weights: &CriteriaWeights,
    ) -> Result<Option<RankedPath>, RouteError> {
        weights.validate()?;

        let candidates: Vec<PathCandidate> = Metric::WEIGHTED
            .into_iter()
            .filter_map(|metric| self.shortest(source, destination, metric).into_path())
            .map(PathCandidate::from)
            .collect();

        let ranked = rank_paths(deduplicate(candidates), &RankMode::MultiCriteria(*weights), 1)?;
        Ok(ranked.into_iter().next())
    }

    /// Rank candidates, keeping the configured `top_n`.
    pub fn rank(
        &self,
        candidates: Vec<PathCandidate>,
        mode: &RankMode,
    ) -> Result<Vec<RankedPath>, RouteError> {
        rank_paths(candidates, mode, self.config.top_n)
    }

    /// Rank candidates within `constraints`, keeping the configured `top_n`.
    pub fn rank_constrained(
        &self,
        candidates: Vec<PathCandidate>,
        mode: &RankMode,
        constraints: &RankConstraints,
    ) -> Result<Vec<RankedPath>, RouteError> {
        rank_with_constraints(candidates, mode, constraints, self.config.top_n)
    }

    /// Optimal routes from `source` to every reachable destination.
    pub fn paths_to_many(&self, source: NodeId, destinations: &[NodeId], metric: Metric) -> Vec<Path> {
        paths_to_many(self.graph, source, destinations, metric)
    }

    /// Optimal routes to `destination` from every source that reaches it.
    pub fn paths_from_many(&self, sources: &[NodeId], destination: NodeId, metric: Metric) -> Vec<Path> {
        paths_from_many(self.graph, sources, destination, metric)
    }
}

//! Path ranking.
//!
//! Ranks a candidate set by one metric or by a weighted blend of
//! distance, time and cost. For the blend, each metric is divided by its
//! largest value across the set, so every term lands in `[0, 1]` and the
//! weights compare like with like. A metric whose largest value is zero
//! contributes nothing.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{Metric, NodeId};
use crate::error::RouteError;

use super::candidate::{PathCandidate, RankedPath};
use super::criteria::{CriteriaWeights, RankMode};

/// Per-metric maxima of a candidate set.
#[derive(Debug, Clone, Copy)]
struct Normalizer {
    distance: f64,
    time: f64,
    cost: f64,
}

impl Normalizer {
    fn of(candidates: &[PathCandidate]) -> Self {
        let max = |metric: Metric| {
            candidates
                .iter()
                .map(|c| c.value(metric))
                .fold(0.0_f64, f64::max)
        };
        Self {
            distance: max(Metric::Distance),
            time: max(Metric::Time),
            cost: max(Metric::Cost),
        }
    }

    fn normalize(value: f64, max: f64) -> f64 {
        if max <= 0.0 { 0.0 } else { value / max }
    }

    fn score(&self, candidate: &PathCandidate, weights: &CriteriaWeights) -> f64 {
        let m = &candidate.metrics;
        weights.distance * Self::normalize(m.distance_km, self.distance)
            + weights.time * Self::normalize(m.time_hours, self.time)
            + weights.cost * Self::normalize(m.cost, self.cost)
    }
}

/// Composite score of every candidate, in input order.
pub fn composite_scores(candidates: &[PathCandidate], weights: &CriteriaWeights) -> Vec<f64> {
    let normalizer = Normalizer::of(candidates);
    candidates
        .iter()
        .map(|c| normalizer.score(c, weights))
        .collect()
}

fn scores(candidates: &[PathCandidate], mode: &RankMode) -> Vec<f64> {
    match mode {
        RankMode::Single(metric) => candidates.iter().map(|c| c.value(*metric)).collect(),
        RankMode::MultiCriteria(weights) => composite_scores(candidates, weights),
    }
}

/// Rank `candidates` and keep the best `top_n`.
///
/// Sorting is stable: candidates with equal scores keep their input order.
///
/// # Errors
///
/// Returns [`RouteError::InvalidCriteriaWeights`] for unusable blend
/// weights and [`RouteError::InvalidPathCount`] if `top_n` is 0.
pub fn rank_paths(
    candidates: Vec<PathCandidate>,
    mode: &RankMode,
    top_n: usize,
) -> Result<Vec<RankedPath>, RouteError> {
    mode.validate()?;
    if top_n == 0 {
        return Err(RouteError::InvalidPathCount(top_n));
    }

    let scores = scores(&candidates, mode);
    let mut scored: Vec<(f64, PathCandidate)> = scores.into_iter().zip(candidates).collect();
    scored.sort_by(|a, b| a.0.total_cmp(&b.0));
    scored.truncate(top_n);

    Ok(scored
        .into_iter()
        .enumerate()
        .map(|(i, (score, candidate))| RankedPath {
            rank: i + 1,
            score,
            candidate,
        })
        .collect())
}

/// Limits a candidate must respect to be ranked at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankConstraints {
    pub max_distance_km: Option<f64>,
    pub max_time_hours: Option<f64>,
    pub max_cost: Option<f64>,
    pub max_hops: Option<usize>,
    /// Candidates through any of these nodes are dropped
    #[serde(default)]
    pub excluded: HashSet<NodeId>,
}

impl RankConstraints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_distance_km(mut self, km: f64) -> Self {
        self.max_distance_km = Some(km);
        self
    }

    pub fn max_time_hours(mut self, hours: f64) -> Self {
        self.max_time_hours = Some(hours);
        self
    }

    pub fn max_cost(mut self, cost: f64) -> Self {
        self.max_cost = Some(cost);
        self
    }

    pub fn max_hops(mut self, hops: usize) -> Self {
        self.max_hops = Some(hops);
        self
    }

    pub fn exclude(mut self, node: NodeId) -> Self {
        self.excluded.insert(node);
        self
    }

    /// Returns true if `candidate` is within every bound.
    pub fn admits(&self, candidate: &PathCandidate) -> bool {
        let m = &candidate.metrics;
        self.max_distance_km.is_none_or(|max| m.distance_km <= max)
            && self.max_time_hours.is_none_or(|max| m.time_hours <= max)
            && self.max_cost.is_none_or(|max| m.cost <= max)
            && self.max_hops.is_none_or(|max| m.hops <= max)
            && !candidate.visits_any(&self.excluded)
    }
}

/// Drop candidates outside `constraints`, then [`rank_paths`] the rest.
///
/// Normalization sees only the admitted candidates.
pub fn rank_with_constraints(
    candidates: Vec<PathCandidate>,
    mode: &RankMode,
    constraints: &RankConstraints,
    top_n: usize,
) -> Result<Vec<RankedPath>, RouteError> {
    let before = candidates.len();
    let admitted: Vec<PathCandidate> = candidates
        .into_iter()
        .filter(|c| constraints.admits(c))
        .collect();

    debug!(
        candidates = before,
        admitted = admitted.len(),
        "constraints applied"
    );

    rank_paths(admitted, mode, top_n)
}

/// Returns true if `a` is no worse than `b` on distance, time and cost and
/// strictly better on at least one.
fn dominates(a: &PathCandidate, b: &PathCandidate) -> bool {
    let (a, b) = (&a.metrics, &b.metrics);
    a.distance_km <= b.distance_km
        && a.time_hours <= b.time_hours
        && a.cost <= b.cost
        && (a.distance_km < b.distance_km || a.time_hours < b.time_hours || a.cost < b.cost)
}

/// Keep only candidates no other candidate dominates.
///
/// Input order is preserved among the survivors.
pub fn remove_dominated(candidates: Vec<PathCandidate>) -> Vec<PathCandidate> {
    if candidates.len() <= 1 {
        return candidates;
    }

    let mut result: Vec<PathCandidate> = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        if result.iter().any(|existing| dominates(existing, &candidate)) {
            continue;
        }
        result.retain(|existing| !dominates(&candidate, existing));
        result.push(candidate);
    }

    result
}

/// Drop candidates whose node sequence already appeared, keeping the first.
pub fn deduplicate(candidates: Vec<PathCandidate>) -> Vec<PathCandidate> {
    let mut seen: HashSet<Vec<NodeId>> = HashSet::new();
    candidates
        .into_iter()
        .filter(|c| seen.insert(c.nodes.clone()))
        .collect()
}

/// How much the runner-up differs from the winner on one metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricDelta {
    pub first: f64,
    pub second: f64,
    /// `second - first`
    pub difference: f64,
    /// `difference` as a percentage of `first`; 0 when `first` is 0
    pub percent: f64,
}

impl MetricDelta {
    fn between(first: f64, second: f64) -> Self {
        let difference = second - first;
        let percent = if first == 0.0 {
            0.0
        } else {
            difference / first * 100.0
        };
        Self {
            first,
            second,
            difference,
            percent,
        }
    }
}

/// Differences between the first and second ranked routes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TopComparison {
    pub distance: MetricDelta,
    pub time: MetricDelta,
    pub cost: MetricDelta,
}

/// Compare the top two entries of a ranking. `None` with fewer than two.
pub fn compare_top(ranked: &[RankedPath]) -> Option<TopComparison> {
    let [first, second, ..] = ranked else {
        return None;
    };
    let delta = |metric: Metric| {
        MetricDelta::between(first.candidate.value(metric), second.candidate.value(metric))
    };

    Some(TopComparison {
        distance: delta(Metric::Distance),
        time: delta(Metric::Time),
        cost: delta(Metric::Cost),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RouteMetrics;
    use crate::rank::Preference;
    use crate::test_support::{node, nodes};

    fn candidate(ids: &[u32], distance: f64, time: f64, cost: f64) -> PathCandidate {
        PathCandidate::new(
            nodes(ids),
            RouteMetrics::new(distance, time, cost, ids.len().saturating_sub(1)),
        )
    }

    fn sample() -> Vec<PathCandidate> {
        vec![
            candidate(&[1, 2, 4], 100.0, 2.0, 500.0),
            candidate(&[1, 3, 4], 80.0, 3.0, 400.0),
            candidate(&[1, 5, 6, 4], 120.0, 1.5, 900.0),
            candidate(&[1, 4], 150.0, 4.0, 300.0),
        ]
    }

    #[test]
    fn single_metric_ranking() {
        let ranked = rank_paths(sample(), &RankMode::Single(Metric::Distance), 3).unwrap();

        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[0].score, 80.0);
        assert_eq!(ranked[0].candidate.nodes, nodes(&[1, 3, 4]));
        assert_eq!(ranked[1].score, 100.0);
        assert_eq!(ranked[2].rank, 3);
        assert_eq!(ranked[2].score, 120.0);
    }

    #[test]
    fn hops_ranking() {
        let ranked = rank_paths(sample(), &Preference::FewestHops.mode(), 1).unwrap();
        assert_eq!(ranked[0].candidate.nodes, nodes(&[1, 4]));
        assert_eq!(ranked[0].score, 1.0);
    }

    #[test]
    fn composite_scores_normalize_by_max() {
        let scores = composite_scores(&sample(), &CriteriaWeights::new(1.0, 0.0, 0.0));
        assert_eq!(scores, vec![100.0 / 150.0, 80.0 / 150.0, 120.0 / 150.0, 1.0]);

        let w = CriteriaWeights::default();
        let scores = composite_scores(&sample(), &w);
        let expected = 0.3 * (80.0 / 150.0) + 0.3 * (3.0 / 4.0) + 0.4 * (400.0 / 900.0);
        assert!((scores[1] - expected).abs() < 1e-12);
    }

    #[test]
    fn zero_maximum_contributes_nothing() {
        let candidates = vec![candidate(&[1, 2], 10.0, 1.0, 0.0), candidate(&[1, 3], 20.0, 1.0, 0.0)];
        let scores = composite_scores(&candidates, &CriteriaWeights::default());

        assert!(scores.iter().all(|s| s.is_finite()));
        assert!((scores[0] - (0.3 * 0.5 + 0.3)).abs() < 1e-12);
        assert!((scores[1] - (0.3 + 0.3)).abs() < 1e-12);
    }

    #[test]
    fn ties_keep_input_order() {
        let candidates = vec![
            candidate(&[1, 2], 10.0, 1.0, 1.0),
            candidate(&[1, 3], 10.0, 2.0, 1.0),
        ];
        let ranked = rank_paths(candidates, &RankMode::Single(Metric::Distance), 3).unwrap();
        assert_eq!(ranked[0].candidate.nodes, nodes(&[1, 2]));
        assert_eq!(ranked[1].candidate.nodes, nodes(&[1, 3]));
    }

    #[test]
    fn empty_input() {
        let ranked = rank_paths(Vec::new(), &RankMode::default(), 3).unwrap();
        assert!(ranked.is_empty());
        assert!(compare_top(&ranked).is_none());
    }

    #[test]
    fn invalid_parameters() {
        let bad = RankMode::MultiCriteria(CriteriaWeights::new(-1.0, 1.0, 1.0));
        assert!(matches!(
            rank_paths(sample(), &bad, 3),
            Err(RouteError::InvalidCriteriaWeights(_))
        ));
        assert_eq!(
            rank_paths(sample(), &RankMode::default(), 0),
            Err(RouteError::InvalidPathCount(0))
        );
    }

    #[test]
    fn constraints_filter_before_ranking() {
        let constraints = RankConstraints::new().max_time_hours(3.0).exclude(node(3));
        let ranked = rank_with_constraints(
            sample(),
            &RankMode::Single(Metric::Cost),
            &constraints,
            3,
        )
        .unwrap();

        let routes: Vec<Vec<NodeId>> = ranked.into_iter().map(|r| r.candidate.nodes).collect();
        assert_eq!(routes, vec![nodes(&[1, 2, 4]), nodes(&[1, 5, 6, 4])]);
    }

    #[test]
    fn every_bound_is_checked() {
        let c = candidate(&[1, 2, 3], 100.0, 2.0, 50.0);

        assert!(RankConstraints::new().admits(&c));
        assert!(RankConstraints::new().max_distance_km(100.0).admits(&c));
        assert!(!RankConstraints::new().max_distance_km(99.9).admits(&c));
        assert!(!RankConstraints::new().max_time_hours(1.0).admits(&c));
        assert!(!RankConstraints::new().max_cost(49.0).admits(&c));
        assert!(RankConstraints::new().max_hops(2).admits(&c));
        assert!(!RankConstraints::new().max_hops(1).admits(&c));
        assert!(!RankConstraints::new().exclude(node(2)).admits(&c));
    }

    #[test]
    fn constraints_from_json() {
        let constraints: RankConstraints =
            serde_json::from_str(r#"{"max_distance_km": 90.0, "max_time_hours": null, "max_cost": null, "max_hops": null}"#)
                .unwrap();
        assert_eq!(constraints.max_distance_km, Some(90.0));
        assert!(constraints.excluded.is_empty());
    }

    #[test]
    fn top_two_compared() {
        let ranked = rank_paths(sample(), &RankMode::Single(Metric::Distance), 3).unwrap();
        let cmp = compare_top(&ranked).unwrap();

        assert_eq!(cmp.distance.first, 80.0);
        assert_eq!(cmp.distance.second, 100.0);
        assert_eq!(cmp.distance.difference, 20.0);
        assert_eq!(cmp.distance.percent, 25.0);
        assert_eq!(cmp.time.difference, -1.0);
        assert_eq!(cmp.cost.difference, 100.0);
    }

    #[test]
    fn percent_is_zero_for_zero_base() {
        let candidates = vec![candidate(&[1, 2], 10.0, 1.0, 0.0), candidate(&[1, 3], 20.0, 1.0, 5.0)];
        let ranked = rank_paths(candidates, &RankMode::Single(Metric::Cost), 2).unwrap();
        let cmp = compare_top(&ranked).unwrap();
        assert_eq!(cmp.cost.difference, 5.0);
        assert_eq!(cmp.cost.percent, 0.0);
    }

    #[test]
    fn remove_dominated_keeps_trade_offs() {
        let mut candidates = sample();
        // Worse than [1, 2, 4] on every metric.
        candidates.push(candidate(&[1, 7, 4], 110.0, 2.5, 600.0));

        let front = remove_dominated(candidates);
        assert_eq!(front.len(), 4);
        assert!(front.iter().all(|c| c.nodes != nodes(&[1, 7, 4])));
    }

    #[test]
    fn deduplicate_by_node_sequence() {
        let candidates = vec![
            candidate(&[1, 2, 4], 100.0, 2.0, 500.0),
            candidate(&[1, 2, 4], 90.0, 2.0, 500.0),
            candidate(&[1, 3, 4], 80.0, 3.0, 400.0),
        ];
        let unique = deduplicate(candidates);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].metrics.distance_km, 100.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::RouteMetrics;
    use crate::test_support::nodes;
    use proptest::prelude::*;

    fn candidate_strategy() -> impl Strategy<Value = PathCandidate> {
        (
            prop::collection::vec(1u32..20, 2..6),
            0.0..1000.0f64,
            0.0..20.0f64,
            0.0..5000.0f64,
        )
            .prop_map(|(ids, distance, time, cost)| {
                let hops = ids.len() - 1;
                PathCandidate::new(nodes(&ids), RouteMetrics::new(distance, time, cost, hops))
            })
    }

    fn candidates_strategy() -> impl Strategy<Value = Vec<PathCandidate>> {
        prop::collection::vec(candidate_strategy(), 0..12)
    }

    fn weights_strategy() -> impl Strategy<Value = CriteriaWeights> {
        (0.0..1.0f64, 0.0..1.0f64, 0.01..1.0f64)
            .prop_map(|(d, t, c)| CriteriaWeights::new(d, t, c))
    }

    proptest! {
        #[test]
        fn ranked_scores_are_non_decreasing(
            candidates in candidates_strategy(),
            weights in weights_strategy(),
            top_n in 1usize..10,
        ) {
            let ranked = rank_paths(candidates, &RankMode::MultiCriteria(weights), top_n).unwrap();

            for window in ranked.windows(2) {
                prop_assert!(
                    window[0].score <= window[1].score,
                    "Not sorted: {} before {}",
                    window[0].score,
                    window[1].score
                );
            }
        }

        #[test]
        fn ranks_are_one_based_and_dense(
            candidates in candidates_strategy(),
            top_n in 1usize..10,
        ) {
            let len = candidates.len();
            let ranked = rank_paths(candidates, &RankMode::Single(Metric::Time), top_n).unwrap();

            prop_assert_eq!(ranked.len(), len.min(top_n));
            for (i, r) in ranked.iter().enumerate() {
                prop_assert_eq!(r.rank, i + 1);
            }
        }

        #[test]
        fn composite_scores_are_bounded(
            candidates in candidates_strategy(),
            weights in weights_strategy(),
        ) {
            let bound = weights.distance + weights.time + weights.cost;
            for score in composite_scores(&candidates, &weights) {
                prop_assert!(score.is_finite());
                prop_assert!(score >= 0.0);
                prop_assert!(score <= bound + 1e-9);
            }
        }

        #[test]
        fn winner_beats_every_candidate(
            candidates in prop::collection::vec(candidate_strategy(), 1..12),
        ) {
            let best = candidates
                .iter()
                .map(|c| c.metrics.cost)
                .fold(f64::INFINITY, f64::min);
            let ranked = rank_paths(candidates, &RankMode::Single(Metric::Cost), 1).unwrap();
            prop_assert_eq!(ranked[0].score, best);
        }

        #[test]
        fn constrained_results_respect_bounds(
            candidates in candidates_strategy(),
            max_distance in 0.0..1000.0f64,
            excluded in 1u32..20,
        ) {
            let constraints = RankConstraints::new()
                .max_distance_km(max_distance)
                .exclude(NodeId(excluded));
            let ranked = rank_with_constraints(
                candidates,
                &RankMode::default(),
                &constraints,
                5,
            )
            .unwrap();

            for r in &ranked {
                prop_assert!(r.candidate.metrics.distance_km <= max_distance);
                prop_assert!(!r.candidate.nodes.contains(&NodeId(excluded)));
            }
        }

        #[test]
        fn remove_dominated_no_internal_domination(candidates in candidates_strategy()) {
            let result = remove_dominated(candidates);

            for (i, a) in result.iter().enumerate() {
                for (j, b) in result.iter().enumerate() {
                    if i != j {
                        prop_assert!(!dominates(a, b), "{} dominates {} in result", i, j);
                    }
                }
            }
        }
    }

    #[test]
    fn remove_dominated_distribution() {
        use proptest::test_runner::{Config, TestRunner};
        use std::cell::Cell;

        let mut runner = TestRunner::new(Config::with_cases(300));
        let removed = Cell::new(0u32);
        let total = Cell::new(0u32);

        let _ = runner.run(&candidates_strategy(), |candidates| {
            let before = candidates.len();
            if remove_dominated(candidates).len() < before {
                removed.set(removed.get() + 1);
            }
            total.set(total.get() + 1);
            Ok(())
        });

        assert!(
            removed.get() > 0 || total.get() < 10,
            "Never removed a dominated candidate in {} cases",
            total.get()
        );
    }
}

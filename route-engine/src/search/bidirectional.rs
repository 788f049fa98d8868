//! Bidirectional search.
//!
//! Two frontiers grow toward each other, one from the source and one from
//! the destination. The side whose smallest key is lower expands next
//! (forward on ties). Every relaxation that reaches a node labelled by the
//! other side proposes a connecting route; the cheapest proposal is kept.
//!
//! Weighted mode stops once `top(forward) + top(backward) >= best`, after
//! which no unexplored route can be cheaper. Heuristic mode runs the same
//! loop on keys shifted by the average potential
//! `p(v) = (h(v, destination) - h(v, source)) / 2` (negated for the backward
//! side). The shift keeps every reduced edge weight non-negative for a
//! consistent heuristic, so the same stopping rule stays exact.
//!
//! Unweighted mode is breadth-first: whole layers are expanded at a time
//! and the first contact between the two sides is a fewest-hops route.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::domain::{EdgeId, EdgeWeight, Graph, Metric, NodeId, Path};

use super::config::SearchConfig;
use super::frontier::Frontier;
use super::heuristic::{GeoHeuristic, Heuristic};
use super::result::{SearchResult, SearchStats};
use super::weighted::{Label, dijkstra, unwind};

/// Which flavour of bidirectional search to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BidirectionalMode {
    /// Meet-in-the-middle Dijkstra on the chosen metric
    Weighted,
    /// Breadth-first on hop count; the metric is ignored
    Unweighted,
    /// Meet-in-the-middle A* with the metric's geographic estimate.
    /// Optimal only if every node has coordinates, or none does.
    Heuristic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Forward,
    Backward,
}

impl Side {
    /// Node whose rate prices an edge crossed from `current` to `next`.
    ///
    /// The backward side walks edges against the route's direction.
    fn entering(self, current: NodeId, next: NodeId) -> NodeId {
        match self {
            Side::Forward => next,
            Side::Backward => current,
        }
    }

    fn sign(self) -> f64 {
        match self {
            Side::Forward => 1.0,
            Side::Backward => -1.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Meeting {
    cost: f64,
    node: NodeId,
}

/// One side of a weighted bidirectional search.
struct Direction {
    side: Side,
    labels: HashMap<NodeId, Label>,
    frontier: Frontier,
    expanded: usize,
}

impl Direction {
    fn seeded(side: Side, root: NodeId, potential: f64) -> Self {
        let mut frontier = Frontier::new();
        frontier.push(root, potential);
        Self {
            side,
            labels: HashMap::from([(root, Label::root(potential))]),
            frontier,
            expanded: 0,
        }
    }

    /// Smallest live key, after dropping entries for settled nodes.
    fn top(&mut self) -> Option<f64> {
        let labels = &self.labels;
        self.frontier
            .discard_while(|n| labels.get(&n).is_none_or(|l| l.settled));
        self.frontier.peek_priority()
    }

    fn pred(&self, node: NodeId) -> Option<(NodeId, EdgeId)> {
        self.labels.get(&node).and_then(|l| l.pred)
    }

    /// Settle the top node and relax its edges.
    fn expand<W, P>(
        &mut self,
        graph: &Graph<'_>,
        weight: &W,
        potential: &P,
        opposite: &Direction,
        meeting: &mut Option<Meeting>,
    ) where
        W: EdgeWeight + ?Sized,
        P: Fn(NodeId) -> f64,
    {
        let Some((node, key)) = self.frontier.pop() else {
            return;
        };
        let g = match self.labels.get_mut(&node) {
            Some(label) if !label.settled => {
                label.settled = true;
                label.g
            }
            _ => return,
        };
        self.expanded += 1;

        trace!(side = ?self.side, %node, g, key, "expanding");

        for &(neighbor, id) in graph.neighbors(node) {
            let entering = self.side.entering(node, neighbor);
            let Some(w) = weight.weight(id, graph.edge(id), entering) else {
                continue;
            };
            let tentative = g + w;

            if let Some(other) = opposite.labels.get(&neighbor) {
                let cost = tentative + other.g;
                if meeting.is_none_or(|m| cost < m.cost) {
                    *meeting = Some(Meeting {
                        cost,
                        node: neighbor,
                    });
                }
            }

            match self.labels.entry(neighbor) {
                Entry::Occupied(mut entry) => {
                    let label = entry.get_mut();
                    if label.settled || tentative >= label.g {
                        continue;
                    }
                    label.g = tentative;
                    label.pred = Some((node, id));
                    self.frontier.push(neighbor, tentative + label.h);
                }
                Entry::Vacant(entry) => {
                    let p = self.side.sign() * potential(neighbor);
                    entry.insert(Label {
                        g: tentative,
                        h: p,
                        pred: Some((node, id)),
                        settled: false,
                    });
                    self.frontier.push(neighbor, tentative + p);
                }
            }
        }
    }
}

/// Join the forward chain (source → meeting) to the backward chain
/// (meeting → destination), dropping any loop the two chains form.
fn stitch(
    forward: impl Fn(NodeId) -> Option<(NodeId, EdgeId)>,
    backward: impl Fn(NodeId) -> Option<(NodeId, EdgeId)>,
    meeting: NodeId,
) -> (Vec<NodeId>, Vec<EdgeId>) {
    let (mut nodes, mut edges) = unwind(forward, meeting);

    let mut current = meeting;
    while let Some((next, edge)) = backward(current) {
        nodes.push(next);
        edges.push(edge);
        current = next;
    }

    remove_cycles(nodes, edges)
}

/// Cut out every closed loop so no node appears twice.
fn remove_cycles(nodes: Vec<NodeId>, edges: Vec<EdgeId>) -> (Vec<NodeId>, Vec<EdgeId>) {
    let mut kept_nodes: Vec<NodeId> = Vec::with_capacity(nodes.len());
    let mut kept_edges: Vec<EdgeId> = Vec::with_capacity(edges.len());
    let mut position: HashMap<NodeId, usize> = HashMap::new();

    for (i, node) in nodes.into_iter().enumerate() {
        if let Some(&at) = position.get(&node) {
            for dropped in kept_nodes.drain(at + 1..) {
                position.remove(&dropped);
            }
            kept_edges.truncate(at);
        } else {
            if i > 0 {
                kept_edges.push(edges[i - 1]);
            }
            position.insert(node, kept_nodes.len());
            kept_nodes.push(node);
        }
    }

    (kept_nodes, kept_edges)
}

/// The trivial result for a search whose endpoints are missing or equal.
fn trivial<W>(
    graph: &Graph<'_>,
    source: NodeId,
    destination: NodeId,
    metric: Metric,
    weight: &W,
) -> Option<SearchResult>
where
    W: EdgeWeight + ?Sized,
{
    if graph.is_empty() || !graph.contains(source) || !graph.contains(destination) {
        debug!(%source, %destination, "endpoint not in graph");
        return Some(SearchResult::empty());
    }
    if source == destination {
        return Some(SearchResult {
            path: Some(graph.path_from_edges(vec![source], &[], metric, weight)),
            stats: SearchStats {
                meeting_node: Some(source),
                ..SearchStats::default()
            },
        });
    }
    None
}

fn meet_in_the_middle<W, P>(
    graph: &Graph<'_>,
    source: NodeId,
    destination: NodeId,
    metric: Metric,
    weight: &W,
    potential: P,
) -> SearchResult
where
    W: EdgeWeight + ?Sized,
    P: Fn(NodeId) -> f64,
{
    if let Some(result) = trivial(graph, source, destination, metric, weight) {
        return result;
    }

    let mut forward = Direction::seeded(Side::Forward, source, potential(source));
    let mut backward = Direction::seeded(Side::Backward, destination, -potential(destination));
    let mut meeting: Option<Meeting> = None;

    loop {
        let (Some(f_top), Some(b_top)) = (forward.top(), backward.top()) else {
            // One side is exhausted: every route it could offer is already proposed.
            break;
        };
        if meeting.is_some_and(|m| f_top + b_top >= m.cost) {
            break;
        }
        if f_top <= b_top {
            forward.expand(graph, weight, &potential, &backward, &mut meeting);
        } else {
            backward.expand(graph, weight, &potential, &forward, &mut meeting);
        }
    }

    let path = meeting.map(|m| {
        let (nodes, edges) = stitch(|n| forward.pred(n), |n| backward.pred(n), m.node);
        graph.path_from_edges(nodes, &edges, metric, weight)
    });

    let stats = SearchStats {
        expanded: forward.expanded + backward.expanded,
        forward_expanded: forward.expanded,
        backward_expanded: backward.expanded,
        meeting_node: meeting.map(|m| m.node),
    };

    debug!(
        %source,
        %destination,
        %metric,
        expanded = stats.expanded,
        forward = stats.forward_expanded,
        backward = stats.backward_expanded,
        found = path.is_some(),
        "bidirectional search complete"
    );

    SearchResult { path, stats }
}

/// Meet-in-the-middle Dijkstra. Same total as [`dijkstra`].
pub fn bidirectional_dijkstra(
    graph: &Graph<'_>,
    source: NodeId,
    destination: NodeId,
    metric: Metric,
) -> SearchResult {
    let weight = graph.metric_weight(metric);
    meet_in_the_middle(graph, source, destination, metric, &weight, |_| 0.0)
}

/// Meet-in-the-middle A*.
///
/// `heuristic` must estimate toward either endpoint. The total equals
/// [`dijkstra`]'s whenever the heuristic is consistent for `metric`.
pub fn bidirectional_astar<H>(
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
    let potential =
        |v: NodeId| (heuristic.estimate(v, destination) - heuristic.estimate(v, source)) / 2.0;
    meet_in_the_middle(graph, source, destination, metric, &weight, potential)
}

/// One side of a breadth-first bidirectional search.
struct Layered {
    /// Node → predecessor link; roots map to `None`.
    visited: HashMap<NodeId, Option<(NodeId, EdgeId)>>,
    layer: Vec<NodeId>,
    depth: usize,
    expanded: usize,
}

impl Layered {
    fn seeded(root: NodeId) -> Self {
        Self {
            visited: HashMap::from([(root, None)]),
            layer: vec![root],
            depth: 0,
            expanded: 0,
        }
    }

    /// Expand the whole current layer. Returns the first node found that
    /// `opposite` has already visited.
    fn advance(
        &mut self,
        graph: &Graph<'_>,
        opposite: &HashMap<NodeId, Option<(NodeId, EdgeId)>>,
    ) -> Option<NodeId> {
        let layer = std::mem::take(&mut self.layer);
        let mut next = Vec::new();

        for node in layer {
            self.expanded += 1;
            for &(neighbor, id) in graph.neighbors(node) {
                if self.visited.contains_key(&neighbor) {
                    continue;
                }
                self.visited.insert(neighbor, Some((node, id)));
                if opposite.contains_key(&neighbor) {
                    return Some(neighbor);
                }
                next.push(neighbor);
            }
        }

        self.layer = next;
        self.depth += 1;
        None
    }

    fn pred(&self, node: NodeId) -> Option<(NodeId, EdgeId)> {
        self.visited.get(&node).copied().flatten()
    }
}

/// Breadth-first bidirectional search for a fewest-hops route.
///
/// The returned path is labelled [`Metric::Hops`].
pub fn bidirectional_bfs(graph: &Graph<'_>, source: NodeId, destination: NodeId) -> SearchResult {
    let weight = graph.metric_weight(Metric::Hops);
    if let Some(result) = trivial(graph, source, destination, Metric::Hops, &weight) {
        return result;
    }

    let mut forward = Layered::seeded(source);
    let mut backward = Layered::seeded(destination);
    let mut meeting = None;

    while meeting.is_none() && !forward.layer.is_empty() && !backward.layer.is_empty() {
        meeting = if forward.depth <= backward.depth {
            forward.advance(graph, &backward.visited)
        } else {
            backward.advance(graph, &forward.visited)
        };
        trace!(
            forward_depth = forward.depth,
            backward_depth = backward.depth,
            "layer expanded"
        );
    }

    let path = meeting.map(|m| {
        let (nodes, edges) = stitch(|n| forward.pred(n), |n| backward.pred(n), m);
        graph.path_from_edges(nodes, &edges, Metric::Hops, &weight)
    });

    let stats = SearchStats {
        expanded: forward.expanded + backward.expanded,
        forward_expanded: forward.expanded,
        backward_expanded: backward.expanded,
        meeting_node: meeting,
    };

    debug!(
        %source,
        %destination,
        expanded = stats.expanded,
        found = path.is_some(),
        "bidirectional BFS complete"
    );

    SearchResult { path, stats }
}

/// Run the bidirectional search selected by `mode`.
pub fn bidirectional(
    graph: &Graph<'_>,
    source: NodeId,
    destination: NodeId,
    metric: Metric,
    mode: BidirectionalMode,
    config: &SearchConfig,
) -> SearchResult {
    match mode {
        BidirectionalMode::Weighted => bidirectional_dijkstra(graph, source, destination, metric),
        BidirectionalMode::Unweighted => bidirectional_bfs(graph, source, destination),
        BidirectionalMode::Heuristic => {
            let heuristic = GeoHeuristic::for_metric(graph, metric, config);
            bidirectional_astar(graph, source, destination, metric, &heuristic)
        }
    }
}

/// Optimal paths from `source` to each reachable destination, in input order.
pub fn paths_to_many(
    graph: &Graph<'_>,
    source: NodeId,
    destinations: &[NodeId],
    metric: Metric,
) -> Vec<Path> {
    destinations
        .iter()
        .filter_map(|&destination| {
            bidirectional_dijkstra(graph, source, destination, metric).into_path()
        })
        .collect()
}

/// Optimal paths from each source that can reach `destination`, in input order.
pub fn paths_from_many(
    graph: &Graph<'_>,
    sources: &[NodeId],
    destination: NodeId,
    metric: Metric,
) -> Vec<Path> {
    sources
        .iter()
        .filter_map(|&source| bidirectional_dijkstra(graph, source, destination, metric).into_path())
        .collect()
}

/// Work done by a bidirectional search next to its one-directional twin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BidirectionalComparison {
    /// The bidirectional result
    pub bidirectional: SearchResult,
    /// Nodes settled by plain Dijkstra on the same query
    pub unidirectional_expanded: usize,
    /// `unidirectional_expanded / bidirectional.stats.expanded`
    pub speedup: f64,
}

/// Run both [`bidirectional_dijkstra`] and [`dijkstra`] and compare effort.
pub fn compare_with_unidirectional(
    graph: &Graph<'_>,
    source: NodeId,
    destination: NodeId,
    metric: Metric,
) -> BidirectionalComparison {
    let bidirectional = bidirectional_dijkstra(graph, source, destination, metric);
    let unidirectional_expanded = dijkstra(graph, source, destination, metric).stats.expanded;

    let speedup = match bidirectional.stats.expanded {
        0 => 1.0,
        n => unidirectional_expanded as f64 / n as f64,
    };

    BidirectionalComparison {
        bidirectional,
        unidirectional_expanded,
        speedup,
    }
}

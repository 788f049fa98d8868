//! Label-setting search.
//!
//! One routine serves every single-direction search in the crate: plain
//! Dijkstra is this search with [`ZeroHeuristic`], A* is this search with a
//! geographic estimate. The metric is abstracted behind [`EdgeWeight`], so
//! distance, time, cost and hop searches share the same code.
//!
//! All scratch state (labels and frontier) is created per call and dropped
//! on return.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::{debug, trace};

use crate::domain::{EdgeId, EdgeWeight, Graph, Metric, NodeId, Path};

use super::frontier::Frontier;
use super::heuristic::{Heuristic, ZeroHeuristic};
use super::result::{SearchResult, SearchStats};

/// Per-node search record.
#[derive(Debug, Clone, Copy)]
pub(super) struct Label {
    /// Best known cost from the root of this search.
    pub(super) g: f64,
    /// Priority offset added to `g` when queueing this node.
    pub(super) h: f64,
    /// Node and edge this label was reached through.
    pub(super) pred: Option<(NodeId, EdgeId)>,
    /// Final once set.
    pub(super) settled: bool,
}

impl Label {
    pub(super) fn root(h: f64) -> Self {
        Self {
            g: 0.0,
            h,
            pred: None,
            settled: false,
        }
    }
}

/// Follow predecessor links back from `to` to the search root.
///
/// Returns the nodes root-first and the edges joining them.
pub(super) fn unwind(
    pred: impl Fn(NodeId) -> Option<(NodeId, EdgeId)>,
    to: NodeId,
) -> (Vec<NodeId>, Vec<EdgeId>) {
    let mut nodes = vec![to];
    let mut edges = Vec::new();
    let mut current = to;

    while let Some((prev, edge)) = pred(current) {
        nodes.push(prev);
        edges.push(edge);
        current = prev;
    }

    nodes.reverse();
    edges.reverse();
    (nodes, edges)
}

/// Run one label-setting search from `source` to `destination`.
///
/// Frontier priority is `g + heuristic_weight * h`. Nodes leave the frontier
/// at most once; later, cheaper labels for a settled node are discarded.
pub(crate) fn label_setting<W, H>(
    graph: &Graph<'_>,
    source: NodeId,
    destination: NodeId,
    metric: Metric,
    weight: &W,
    heuristic: &H,
    heuristic_weight: f64,
) -> SearchResult
where
    W: EdgeWeight + ?Sized,
    H: Heuristic + ?Sized,
{
    if graph.is_empty() || !graph.contains(source) || !graph.contains(destination) {
        debug!(%source, %destination, "endpoint not in graph");
        return SearchResult::empty();
    }

    let mut labels: HashMap<NodeId, Label> = HashMap::new();
    let mut frontier = Frontier::new();
    let mut expanded = 0;

    let h = heuristic.estimate(source, destination);
    labels.insert(source, Label::root(h));
    frontier.push(source, heuristic_weight * h);

    let mut reached = false;

    while let Some((node, priority)) = frontier.pop() {
        let g = match labels.get_mut(&node) {
            Some(label) if !label.settled => {
                label.settled = true;
                label.g
            }
            // Stale entry for a node already settled.
            _ => continue,
        };
        expanded += 1;

        trace!(%node, g, priority, "expanding");

        if node == destination {
            reached = true;
            break;
        }

        for &(neighbor, id) in graph.neighbors(node) {
            let Some(w) = weight.weight(id, graph.edge(id), neighbor) else {
                continue;
            };
            let tentative = g + w;

            match labels.entry(neighbor) {
                Entry::Occupied(mut entry) => {
                    let label = entry.get_mut();
                    if label.settled || tentative >= label.g {
                        continue;
                    }
                    label.g = tentative;
                    label.pred = Some((node, id));
                    frontier.push(neighbor, tentative + heuristic_weight * label.h);
                }
                Entry::Vacant(entry) => {
                    let h = heuristic.estimate(neighbor, destination);
                    entry.insert(Label {
                        g: tentative,
                        h,
                        pred: Some((node, id)),
                        settled: false,
                    });
                    frontier.push(neighbor, tentative + heuristic_weight * h);
                }
            }
        }
    }

    let path = reached.then(|| {
        let (nodes, edges) = unwind(|n| labels.get(&n).and_then(|l| l.pred), destination);
        graph.path_from_edges(nodes, &edges, metric, weight)
    });

    debug!(
        %source,
        %destination,
        %metric,
        expanded,
        found = path.is_some(),
        "label-setting search complete"
    );

    SearchResult {
        path,
        stats: SearchStats {
            expanded,
            ..SearchStats::default()
        },
    }
}

/// Minimum-`metric` path from `source` to `destination`.
///
/// Returns a result with no path if the destination is unreachable. Under
/// [`Metric::Cost`], edges entering a node without a rate are unusable.
pub fn dijkstra(graph: &Graph<'_>, source: NodeId, destination: NodeId, metric: Metric) -> SearchResult {
    let weight = graph.metric_weight(metric);
    label_setting(graph, source, destination, metric, &weight, &ZeroHeuristic, 1.0)
}

/// Like [`dijkstra`] but with a caller-supplied edge weighting.
///
/// `metric` only labels the returned path; `total` is the sum of `weight`.
/// Returning `None` from `weight` blocks an edge.
pub fn dijkstra_by<W>(
    graph: &Graph<'_>,
    source: NodeId,
    destination: NodeId,
    metric: Metric,
    weight: &W,
) -> SearchResult
where
    W: EdgeWeight + ?Sized,
{
    label_setting(graph, source, destination, metric, weight, &ZeroHeuristic, 1.0)
}

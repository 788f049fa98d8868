//! Yen's k shortest simple paths.
//!
//! Unlike node blocking, this is exact: the i-th route returned is the i-th
//! cheapest simple route by node sequence. Each round deviates from the
//! last accepted route at every node in turn (the spur), forbidding the
//! root prefix and every next hop already taken by an accepted route with
//! the same prefix, and keeps the cheapest deviation not yet seen.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::domain::{Edge, EdgeId, EdgeWeight, Graph, Metric, NodeId, Path};
use crate::error::RouteError;

use super::weighted::{dijkstra, dijkstra_by};

/// The `k` cheapest simple routes under `metric`, cheapest first.
///
/// Returns fewer than `k` routes if the graph has fewer, and none if the
/// destination is unreachable. Routes are distinct as node sequences;
/// parallel edges between the same nodes do not make a route distinct.
///
/// # Errors
///
/// Returns [`RouteError::InvalidPathCount`] if `k` is 0.
pub fn yen_k_shortest(
    graph: &Graph<'_>,
    source: NodeId,
    destination: NodeId,
    metric: Metric,
    k: usize,
) -> Result<Vec<Path>, RouteError> {
    if k == 0 {
        return Err(RouteError::InvalidPathCount(k));
    }

    let Some(first) = dijkstra(graph, source, destination, metric).into_path() else {
        return Ok(Vec::new());
    };

    let base = graph.metric_weight(metric);
    let mut accepted: Vec<Path> = vec![first];
    let mut candidates: Vec<Path> = Vec::new();

    while accepted.len() < k {
        let last = accepted[accepted.len() - 1].nodes().to_vec();

        for i in 0..last.len().saturating_sub(1) {
            let spur = last[i];
            let root = &last[..=i];
            let root_set: HashSet<NodeId> = root[..i].iter().copied().collect();

            let taken: HashSet<NodeId> = accepted
                .iter()
                .filter(|p| p.nodes().len() > i + 1 && p.nodes()[..=i] == *root)
                .map(|p| p.nodes()[i + 1])
                .collect();

            let weight = |id: EdgeId, edge: &Edge, entering: NodeId| {
                if root_set.contains(&entering) {
                    return None;
                }
                if edge.opposite(entering) == Some(spur) && taken.contains(&entering) {
                    return None;
                }
                base.weight(id, edge, entering)
            };

            let Some(spur_path) = dijkstra_by(graph, spur, destination, metric, &weight).into_path()
            else {
                continue;
            };

            let mut nodes = root[..i].to_vec();
            nodes.extend_from_slice(spur_path.nodes());

            let seen = |p: &Path| p.nodes() == nodes.as_slice();
            if accepted.iter().any(seen) || candidates.iter().any(seen) {
                continue;
            }

            if let Some(candidate) = graph.trace(&nodes, metric) {
                trace!(%spur, total = candidate.total(), "spur candidate");
                candidates.push(candidate);
            }
        }

        let Some(best) = candidates
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.total().total_cmp(&b.1.total()))
            .map(|(index, _)| index)
        else {
            break;
        };
        accepted.push(candidates.remove(best));
    }

    debug!(
        %source,
        %destination,
        %metric,
        requested = k,
        found = accepted.len(),
        "k shortest paths complete"
    );

    Ok(accepted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{diamond_edges, intercity, node, nodes};

    #[test]
    fn diamond_routes_in_cost_order() {
        let edges = diamond_edges();
        let graph = Graph::new(&edges);

        let routes = yen_k_shortest(&graph, node(1), node(4), Metric::Distance, 5).unwrap();

        // Only two simple routes exist.
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].nodes(), nodes(&[1, 2, 3, 4]).as_slice());
        assert_eq!(routes[0].total(), 25.0);
        assert_eq!(routes[1].nodes(), nodes(&[1, 3, 4]).as_slice());
        assert_eq!(routes[1].total(), 35.0);
    }

    #[test]
    fn zero_k_rejected() {
        let edges = diamond_edges();
        let graph = Graph::new(&edges);
        assert_eq!(
            yen_k_shortest(&graph, node(1), node(4), Metric::Distance, 0),
            Err(RouteError::InvalidPathCount(0))
        );
    }

    #[test]
    fn unreachable_gives_nothing() {
        let edges = diamond_edges();
        let graph = Graph::new(&edges);
        assert!(
            yen_k_shortest(&graph, node(1), node(9), Metric::Distance, 3)
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn k_of_one_is_the_best_route() {
        let (edges, _, _) = intercity();
        let graph = Graph::new(&edges);

        let routes = yen_k_shortest(&graph, node(1), node(7), Metric::Time, 1).unwrap();
        let best = dijkstra(&graph, node(1), node(7), Metric::Time).path.unwrap();
        assert_eq!(routes, vec![best]);
    }

    #[test]
    fn intercity_routes_are_distinct_and_sorted() {
        let (edges, _, _) = intercity();
        let graph = Graph::new(&edges);

        let routes = yen_k_shortest(&graph, node(1), node(8), Metric::Distance, 6).unwrap();
        assert_eq!(routes.len(), 6);

        for pair in routes.windows(2) {
            assert!(pair[0].total() <= pair[1].total() + 1e-9);
            assert!(!pair[0].same_route(&pair[1]));
        }
        for route in &routes {
            assert!(route.is_simple());
            assert_eq!(route.source(), node(1));
            assert_eq!(route.destination(), node(8));
        }
    }
}

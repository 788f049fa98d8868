//! Shared fixtures for unit tests.

use std::collections::HashMap;

use crate::domain::{Coordinates, Edge, GeoPoint, NodeId, RateTable};

pub(crate) fn node(id: u32) -> NodeId {
    NodeId(id)
}

pub(crate) fn nodes(ids: &[u32]) -> Vec<NodeId> {
    ids.iter().copied().map(NodeId).collect()
}

/// Surface `tracing` output in test runs when `RUST_LOG` is set.
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Four nodes: 1-2 (10 km), 2-3 (10 km), 1-3 (30 km), 3-4 (5 km).
///
/// Shortest by distance is 1-2-3-4 (25 km); fastest is 1-3-4 (0.35 h).
pub(crate) fn diamond_edges() -> Vec<Edge> {
    vec![
        Edge::new(node(1), node(2), 10.0, 0.2),
        Edge::new(node(2), node(3), 10.0, 0.2),
        Edge::new(node(1), node(3), 30.0, 0.25),
        Edge::new(node(3), node(4), 5.0, 0.1),
    ]
}

/// Intercity network as the graph builder would hand it over, in JSON.
///
/// Road distances are never shorter than the great-circle distance between
/// the endpoints and no edge averages more than 100 km/h, so all three
/// geographic heuristics are admissible and consistent on it.
pub(crate) const INTERCITY_JSON: &str = r#"{
    "cities": {
        "1": {"lat": 24.8607, "lon": 67.0011},
        "2": {"lat": 25.3960, "lon": 68.3578},
        "3": {"lat": 27.7052, "lon": 68.8574},
        "4": {"lat": 30.1575, "lon": 71.5249},
        "5": {"lat": 31.4504, "lon": 73.1350},
        "6": {"lat": 31.5204, "lon": 74.3587},
        "7": {"lat": 33.6844, "lon": 73.0479},
        "8": {"lat": 34.0151, "lon": 71.5249},
        "9": {"lat": 30.1798, "lon": 66.9750}
    },
    "rates": {
        "1": 12.0, "2": 10.0, "3": 9.0, "4": 11.0, "5": 8.0,
        "6": 14.0, "7": 15.0, "8": 10.0, "9": 9.5
    },
    "edges": [
        {"from": 1, "to": 2, "distance_km": 165.0, "time_hours": 2.0},
        {"from": 2, "to": 3, "distance_km": 330.0, "time_hours": 4.0},
        {"from": 3, "to": 4, "distance_km": 460.0, "time_hours": 5.5},
        {"from": 4, "to": 5, "distance_km": 240.0, "time_hours": 3.0},
        {"from": 5, "to": 6, "distance_km": 185.0, "time_hours": 2.2},
        {"from": 4, "to": 6, "distance_km": 340.0, "time_hours": 3.6},
        {"from": 6, "to": 7, "distance_km": 375.0, "time_hours": 4.0},
        {"from": 5, "to": 7, "distance_km": 300.0, "time_hours": 3.5},
        {"from": 7, "to": 8, "distance_km": 185.0, "time_hours": 2.0},
        {"from": 3, "to": 9, "distance_km": 390.0, "time_hours": 6.0},
        {"from": 1, "to": 9, "distance_km": 690.0, "time_hours": 11.0},
        {"from": 4, "to": 9, "distance_km": 600.0, "time_hours": 8.0},
        {"from": 1, "to": 3, "distance_km": 480.0, "time_hours": 5.0},
        {"from": 4, "to": 6, "distance_km": 360.0, "time_hours": 4.2}
    ]
}"#;

#[derive(serde::Deserialize)]
struct IntercityFixture {
    cities: HashMap<NodeId, GeoPoint>,
    rates: HashMap<NodeId, f64>,
    edges: Vec<Edge>,
}

/// Edges, coordinates and rates of the intercity network.
pub(crate) fn intercity() -> (Vec<Edge>, Coordinates, RateTable) {
    let fixture: IntercityFixture =
        serde_json::from_str(INTERCITY_JSON).expect("fixture must parse");
    let coordinates = fixture.cities.into_iter().collect();
    let rates = RateTable::from_rates(fixture.rates).expect("fixture rates are valid");
    (fixture.edges, coordinates, rates)
}

/// Every simple path from `source` to `destination`, as node sequences.
///
/// Exponential; only for brute-force checks on graphs of a handful of nodes.
pub(crate) fn all_simple_paths(edges: &[Edge], source: NodeId, destination: NodeId) -> Vec<Vec<NodeId>> {
    fn walk(
        edges: &[Edge],
        current: NodeId,
        destination: NodeId,
        trail: &mut Vec<NodeId>,
        out: &mut Vec<Vec<NodeId>>,
    ) {
        if current == destination {
            out.push(trail.clone());
            return;
        }
        let mut next: Vec<NodeId> = edges.iter().filter_map(|e| e.opposite(current)).collect();
        next.sort();
        next.dedup();
        for n in next {
            if trail.contains(&n) {
                continue;
            }
            trail.push(n);
            walk(edges, n, destination, trail, out);
            trail.pop();
        }
    }

    let mut out = Vec::new();
    let mut trail = vec![source];
    walk(edges, source, destination, &mut trail, &mut out);
    out
}

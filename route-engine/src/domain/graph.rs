//! Read-only graph view over a caller-supplied edge set.
//!
//! The graph-construction collaborator owns the edges, coordinates and
//! rates. `Graph` borrows them and adds an adjacency index so searches do
//! not rescan the whole edge list on every expansion. Nothing here is ever
//! mutated after construction; perturbed graphs (a node removed) are built
//! as new views over a new edge list.

use std::collections::HashMap;

use super::{
    Coordinates, Edge, EdgeId, EdgeWeight, Metric, MetricWeight, NodeId, Path, RateTable,
    RouteMetrics,
};

/// An undirected multigraph snapshot.
#[derive(Debug, Clone)]
pub struct Graph<'a> {
    edges: &'a [Edge],
    /// Node → (neighbor, edge) pairs, both directions stored.
    adjacency: HashMap<NodeId, Vec<(NodeId, EdgeId)>>,
    coordinates: Option<&'a Coordinates>,
    rates: Option<&'a RateTable>,
}

impl<'a> Graph<'a> {
    /// Index an edge set. Every endpoint of every edge becomes a node.
    pub fn new(edges: &'a [Edge]) -> Self {
        let mut adjacency: HashMap<NodeId, Vec<(NodeId, EdgeId)>> = HashMap::new();

        for (id, edge) in edges.iter().enumerate() {
            adjacency.entry(edge.from).or_default().push((edge.to, id));
            if !edge.is_self_loop() {
                adjacency.entry(edge.to).or_default().push((edge.from, id));
            }
        }

        Self {
            edges,
            adjacency,
            coordinates: None,
            rates: None,
        }
    }

    /// Attach a coordinate lookup for heuristic estimates.
    pub fn with_coordinates(mut self, coordinates: &'a Coordinates) -> Self {
        self.coordinates = Some(coordinates);
        self
    }

    /// Attach a rate table for the cost metric.
    pub fn with_rates(mut self, rates: &'a RateTable) -> Self {
        self.rates = Some(rates);
        self
    }

    /// The underlying edge slice.
    pub fn edges(&self) -> &'a [Edge] {
        self.edges
    }

    /// Edge by id.
    ///
    /// # Panics
    ///
    /// Panics if `id` did not come from this graph.
    pub fn edge(&self, id: EdgeId) -> &'a Edge {
        &self.edges[id]
    }

    /// Attached coordinate lookup, if any.
    pub fn coordinates(&self) -> Option<&'a Coordinates> {
        self.coordinates
    }

    /// Attached rate table, if any.
    pub fn rates(&self) -> Option<&'a RateTable> {
        self.rates
    }

    /// Returns true if `node` is an endpoint of some edge.
    pub fn contains(&self, node: NodeId) -> bool {
        self.adjacency.contains_key(&node)
    }

    /// All nodes, in no particular order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacency.keys().copied()
    }

    /// Neighbors of `node` with the connecting edge. Empty for unknown nodes.
    pub fn neighbors(&self, node: NodeId) -> &[(NodeId, EdgeId)] {
        self.adjacency
            .get(&node)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of distinct nodes.
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns true if there are no edges.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Edge weighting by `metric`, using this graph's rate table.
    pub fn metric_weight(&self, metric: Metric) -> MetricWeight<'a> {
        MetricWeight::new(metric, self.rates)
    }

    /// Copy of the edge set with every edge touching `node` removed.
    pub fn without_node(&self, node: NodeId) -> Vec<Edge> {
        self.edges
            .iter()
            .filter(|edge| !edge.touches(node))
            .copied()
            .collect()
    }

    /// A view over a different edge set sharing this graph's lookups.
    pub fn reindexed<'b>(&self, edges: &'b [Edge]) -> Graph<'b>
    where
        'a: 'b,
    {
        let mut graph = Graph::new(edges);
        graph.coordinates = self.coordinates;
        graph.rates = self.rates;
        graph
    }

    /// Rebuild a [`Path`] from a node sequence.
    ///
    /// Each hop uses the cheapest parallel edge under `metric`. Returns
    /// `None` if the sequence is empty, a node is unknown, or some hop has
    /// no usable edge.
    pub fn trace(&self, nodes: &[NodeId], metric: Metric) -> Option<Path> {
        let first = *nodes.first()?;
        if !self.contains(first) {
            return None;
        }

        let weight = self.metric_weight(metric);
        let mut edge_ids = Vec::with_capacity(nodes.len().saturating_sub(1));

        for pair in nodes.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            let best = self
                .neighbors(from)
                .iter()
                .filter(|(neighbor, _)| *neighbor == to)
                .filter_map(|&(_, id)| weight.weight(id, &self.edges[id], to).map(|w| (id, w)))
                .min_by(|a, b| a.1.total_cmp(&b.1))?;
            edge_ids.push(best.0);
        }

        Some(self.path_from_edges(nodes.to_vec(), &edge_ids, metric, &weight))
    }

    /// Build a path from its nodes and the edges joining them.
    ///
    /// `edge_ids[i]` joins `nodes[i]` and `nodes[i + 1]`. Metrics are
    /// re-summed from the edges; `total` is the sum of `weight` along them.
    pub(crate) fn path_from_edges<W>(
        &self,
        nodes: Vec<NodeId>,
        edge_ids: &[EdgeId],
        metric: Metric,
        weight: &W,
    ) -> Path
    where
        W: EdgeWeight + ?Sized,
    {
        debug_assert_eq!(nodes.len(), edge_ids.len() + 1);

        let mut metrics = RouteMetrics::default();
        let mut total = 0.0;

        for (hop, &id) in edge_ids.iter().enumerate() {
            let edge = &self.edges[id];
            let entering = nodes[hop + 1];
            metrics.add_edge(edge, entering, self.rates);
            total += weight.weight(id, edge, entering).unwrap_or(0.0);
        }

        Path::new(nodes, metrics, metric, total)
    }
}

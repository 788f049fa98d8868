//! Cost metrics and the edge-weight interface shared by every search.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Edge, EdgeId, NodeId, RateTable};

/// The quantity a search minimizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Kilometres travelled
    Distance,
    /// Hours travelled
    Time,
    /// Money spent, priced per kilometre by the node entered
    Cost,
    /// Number of edges, every edge weighing 1
    Hops,
}

impl Metric {
    /// The three metrics an edge can be priced in, excluding hop count.
    pub const WEIGHTED: [Metric; 3] = [Metric::Distance, Metric::Time, Metric::Cost];

    /// Returns a lowercase name for display.
    pub fn as_str(self) -> &'static str {
        match self {
            Metric::Distance => "distance",
            Metric::Time => "time",
            Metric::Cost => "cost",
            Metric::Hops => "hops",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cost-extraction interface used by every search.
///
/// Implemented for [`MetricWeight`] and for any closure with the same
/// signature, so callers can block edges or blend metrics without a new
/// search routine.
pub trait EdgeWeight {
    /// Weight of traversing `edge` when arriving at `entering`.
    ///
    /// Returns `None` if the edge cannot be used under this weighting.
    fn weight(&self, id: EdgeId, edge: &Edge, entering: NodeId) -> Option<f64>;
}

impl<F> EdgeWeight for F
where
    F: Fn(EdgeId, &Edge, NodeId) -> Option<f64>,
{
    fn weight(&self, id: EdgeId, edge: &Edge, entering: NodeId) -> Option<f64> {
        self(id, edge, entering)
    }
}

/// Edge weighting by one [`Metric`].
#[derive(Debug, Clone, Copy)]
pub struct MetricWeight<'a> {
    metric: Metric,
    rates: Option<&'a RateTable>,
}

impl<'a> MetricWeight<'a> {
    /// Create a weighting. `rates` is only consulted for [`Metric::Cost`].
    pub fn new(metric: Metric, rates: Option<&'a RateTable>) -> Self {
        Self { metric, rates }
    }

    /// The metric being weighed.
    pub fn metric(&self) -> Metric {
        self.metric
    }
}

impl EdgeWeight for MetricWeight<'_> {
    fn weight(&self, _id: EdgeId, edge: &Edge, entering: NodeId) -> Option<f64> {
        match self.metric {
            Metric::Distance => Some(edge.distance_km),
            Metric::Time => Some(edge.time_hours),
            Metric::Cost => self
                .rates
                .and_then(|rates| rates.get(entering))
                .map(|rate| rate * edge.distance_km),
            Metric::Hops => Some(1.0),
        }
    }
}

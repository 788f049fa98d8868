//! Domain types for the route engine.
//!
//! This module contains the value types the searches consume and produce:
//! node identifiers, coordinates, rate tables, edges, the read-only graph
//! view and the resulting paths. Types that carry invariants check them at
//! construction time, so the search code can trust what it receives.

mod edge;
mod geo;
mod graph;
mod metric;
mod node;
mod path;
mod rate;

pub use edge::{Edge, EdgeId};
pub use geo::{Coordinates, EARTH_RADIUS_KM, GeoPoint, InvalidCoordinate};
pub use graph::Graph;
pub use metric::{EdgeWeight, Metric, MetricWeight};
pub use node::NodeId;
pub use path::{InvalidPath, Path, RouteMetrics};
pub use rate::{InvalidRate, RateTable};

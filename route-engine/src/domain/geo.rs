//! Geographic coordinates and great-circle distance.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::NodeId;

/// Mean Earth radius used for great-circle distances.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Error returned when constructing an out-of-range coordinate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid coordinate: {reason}")]
pub struct InvalidCoordinate {
    reason: &'static str,
}

/// A latitude/longitude pair in decimal degrees.
///
/// Latitude is within [-90, 90] and longitude within [-180, 180]; both are
/// finite. Deserialization goes through the same check.
///
/// # Examples
///
/// ```
/// use route_engine::domain::GeoPoint;
///
/// let lahore = GeoPoint::new(31.5204, 74.3587).unwrap();
/// assert_eq!(lahore.lat(), 31.5204);
///
/// assert!(GeoPoint::new(91.0, 0.0).is_err());
/// assert!(GeoPoint::new(0.0, f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeoPoint")]
pub struct GeoPoint {
    lat: f64,
    lon: f64,
}

#[derive(Deserialize)]
struct RawGeoPoint {
    lat: f64,
    lon: f64,
}

impl TryFrom<RawGeoPoint> for GeoPoint {
    type Error = InvalidCoordinate;

    fn try_from(raw: RawGeoPoint) -> Result<Self, Self::Error> {
        GeoPoint::new(raw.lat, raw.lon)
    }
}

impl GeoPoint {
    /// Create a point, validating both components.
    pub fn new(lat: f64, lon: f64) -> Result<Self, InvalidCoordinate> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(InvalidCoordinate {
                reason: "components must be finite",
            });
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(InvalidCoordinate {
                reason: "latitude must be within [-90, 90]",
            });
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(InvalidCoordinate {
                reason: "longitude must be within [-180, 180]",
            });
        }
        Ok(Self { lat, lon })
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Great-circle (haversine) distance to `other` in kilometres.
    pub fn haversine_km(&self, other: &GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let a = (d_lat / 2.0).sin().powi(2)
            + self.lat.to_radians().cos() * other.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_KM * c
    }
}

/// Read-only node → coordinate lookup supplied by the graph builder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Coordinates {
    points: HashMap<NodeId, GeoPoint>,
}

impl Coordinates {
    /// Create an empty lookup.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the coordinate of a node, replacing any previous one.
    pub fn insert(&mut self, node: NodeId, point: GeoPoint) {
        self.points.insert(node, point);
    }

    /// Coordinate of a node, if known.
    pub fn get(&self, node: NodeId) -> Option<GeoPoint> {
        self.points.get(&node).copied()
    }

    /// Great-circle distance between two nodes.
    ///
    /// Returns `None` when either node has no coordinate.
    pub fn distance_km(&self, a: NodeId, b: NodeId) -> Option<f64> {
        let a = self.points.get(&a)?;
        let b = self.points.get(&b)?;
        Some(a.haversine_km(b))
    }

    /// Number of nodes with a coordinate.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if no coordinates are known.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl FromIterator<(NodeId, GeoPoint)> for Coordinates {
    fn from_iter<I: IntoIterator<Item = (NodeId, GeoPoint)>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_point() -> impl Strategy<Value = GeoPoint> {
        (-89.0f64..89.0, -179.0f64..179.0).prop_map(|(lat, lon)| GeoPoint::new(lat, lon).unwrap())
    }

    proptest! {
        /// Distance is symmetric
        #[test]
        fn symmetric(a in arb_point(), b in arb_point()) {
            let ab = a.haversine_km(&b);
            let ba = b.haversine_km(&a);
            prop_assert!((ab - ba).abs() < 1e-6);
        }

        /// Triangle inequality holds, which is what makes the estimate admissible
        #[test]
        fn triangle_inequality(a in arb_point(), b in arb_point(), c in arb_point()) {
            let direct = a.haversine_km(&c);
            let via = a.haversine_km(&b) + b.haversine_km(&c);
            prop_assert!(direct <= via + 1e-6);
        }

        /// Never more than half the circumference
        #[test]
        fn bounded(a in arb_point(), b in arb_point()) {
            let d = a.haversine_km(&b);
            prop_assert!(d >= 0.0);
            prop_assert!(d <= EARTH_RADIUS_KM * std::f64::consts::PI + 1e-6);
        }
    }
}

//! Per-node monetary rates.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::NodeId;

/// Error returned when inserting a rate that cannot price a journey.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid rate for node {node}: {reason}")]
pub struct InvalidRate {
    node: NodeId,
    reason: &'static str,
}

/// Rate per kilometre charged for entering a node.
///
/// The cost of an edge entered at node `n` is `rate(n) × distance`. A node
/// without a rate cannot be entered under the cost metric; that is a
/// reduction in connectivity, not an error. Deserialization goes through
/// the same checks as [`insert`](Self::insert).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "RawRateTable")]
pub struct RateTable {
    rates: HashMap<NodeId, f64>,
}

#[derive(Deserialize)]
struct RawRateTable {
    rates: HashMap<NodeId, f64>,
}

impl TryFrom<RawRateTable> for RateTable {
    type Error = InvalidRate;

    fn try_from(raw: RawRateTable) -> Result<Self, Self::Error> {
        RateTable::from_rates(raw.rates)
    }
}

impl RateTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(node, rate)` pairs, rejecting invalid rates.
    pub fn from_rates<I>(rates: I) -> Result<Self, InvalidRate>
    where
        I: IntoIterator<Item = (NodeId, f64)>,
    {
        let mut table = Self::new();
        for (node, rate) in rates {
            table.insert(node, rate)?;
        }
        Ok(table)
    }

    /// Set the rate of a node.
    ///
    /// Rates must be finite and non-negative.
    pub fn insert(&mut self, node: NodeId, rate_per_km: f64) -> Result<(), InvalidRate> {
        if !rate_per_km.is_finite() {
            return Err(InvalidRate {
                node,
                reason: "rate must be finite",
            });
        }
        if rate_per_km < 0.0 {
            return Err(InvalidRate {
                node,
                reason: "rate must not be negative",
            });
        }
        self.rates.insert(node, rate_per_km);
        Ok(())
    }

    /// Rate of a node, if priced.
    pub fn get(&self, node: NodeId) -> Option<f64> {
        self.rates.get(&node).copied()
    }

    /// Cheapest rate in the table.
    pub fn min_rate(&self) -> Option<f64> {
        self.rates.values().copied().min_by(f64::total_cmp)
    }

    /// Number of priced nodes.
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Returns true if no node is priced.
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

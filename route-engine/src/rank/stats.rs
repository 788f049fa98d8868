//! Dispersion statistics over a set of routes.
//!
//! Percentiles use the nearest-rank method: the p-th percentile of `n`
//! sorted values is the value at index `ceil(p * n) - 1`, clamped to the
//! valid range. The 0th percentile is therefore the minimum and the 100th
//! the maximum. Standard deviation is the population one.

use serde::{Deserialize, Serialize};

use crate::domain::Metric;

use super::candidate::PathCandidate;

/// Nearest-rank percentile of already sorted values. `p` is in `[0, 1]`.
///
/// Returns `None` for an empty slice.
pub fn percentile(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let rank = (p * sorted.len() as f64).ceil() as i64 - 1;
    let index = rank.clamp(0, sorted.len() as i64 - 1) as usize;
    Some(sorted[index])
}

/// Five-number summary plus mean and standard deviation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSummary {
    pub min: f64,
    pub p25: f64,
    pub median: f64,
    pub p75: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl MetricSummary {
    /// Summarise `values` in any order. Returns `None` if empty.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let n = sorted.len() as f64;
        let mean = sorted.iter().sum::<f64>() / n;
        let variance = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

        Some(Self {
            min: percentile(&sorted, 0.0)?,
            p25: percentile(&sorted, 0.25)?,
            median: percentile(&sorted, 0.5)?,
            p75: percentile(&sorted, 0.75)?,
            max: percentile(&sorted, 1.0)?,
            mean,
            std_dev: variance.sqrt(),
        })
    }

    /// `max - min`.
    pub fn range(&self) -> f64 {
        self.max - self.min
    }
}

/// Per-metric summaries of a route set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathStatistics {
    pub count: usize,
    pub distance: MetricSummary,
    pub time: MetricSummary,
    pub cost: MetricSummary,
    pub hops: MetricSummary,
}

impl PathStatistics {
    /// Summary for one metric.
    pub fn summary(&self, metric: Metric) -> &MetricSummary {
        match metric {
            Metric::Distance => &self.distance,
            Metric::Time => &self.time,
            Metric::Cost => &self.cost,
            Metric::Hops => &self.hops,
        }
    }
}

/// Statistics over `candidates`. Returns `None` for an empty set.
pub fn path_statistics(candidates: &[PathCandidate]) -> Option<PathStatistics> {
    let summarise = |metric: Metric| {
        let values: Vec<f64> = candidates.iter().map(|c| c.value(metric)).collect();
        MetricSummary::from_values(&values)
    };

    Some(PathStatistics {
        count: candidates.len(),
        distance: summarise(Metric::Distance)?,
        time: summarise(Metric::Time)?,
        cost: summarise(Metric::Cost)?,
        hops: summarise(Metric::Hops)?,
    })
}

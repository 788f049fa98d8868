//! Ranking criteria.

use serde::{Deserialize, Serialize};

use crate::domain::Metric;
use crate::error::RouteError;

/// Relative importance of distance, time and cost in a composite score.
///
/// Weights need not sum to 1; only their ratios matter for the ordering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CriteriaWeights {
    pub distance: f64,
    pub time: f64,
    pub cost: f64,
}

impl CriteriaWeights {
    /// Create a new set of weights. Call [`validate`](Self::validate) before use.
    pub fn new(distance: f64, time: f64, cost: f64) -> Self {
        Self {
            distance,
            time,
            cost,
        }
    }

    /// Check weights are finite, non-negative and not all zero.
    pub fn validate(&self) -> Result<(), RouteError> {
        let all = [self.distance, self.time, self.cost];
        if all.iter().any(|w| !w.is_finite()) {
            return Err(RouteError::InvalidCriteriaWeights("weights must be finite"));
        }
        if all.iter().any(|w| *w < 0.0) {
            return Err(RouteError::InvalidCriteriaWeights(
                "weights must be non-negative",
            ));
        }
        if all.iter().all(|w| *w == 0.0) {
            return Err(RouteError::InvalidCriteriaWeights(
                "at least one weight must be positive",
            ));
        }
        Ok(())
    }

    /// Weight applied to `metric`. Hops are never weighted.
    pub fn weight(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Distance => self.distance,
            Metric::Time => self.time,
            Metric::Cost => self.cost,
            Metric::Hops => 0.0,
        }
    }
}

impl Default for CriteriaWeights {
    fn default() -> Self {
        Self::new(0.3, 0.3, 0.4)
    }
}

/// How candidates are scored. Lower scores rank first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankMode {
    /// Raw value of one metric
    Single(Metric),
    /// Weighted sum of max-normalized distance, time and cost
    MultiCriteria(CriteriaWeights),
}

impl RankMode {
    /// Check the mode's parameters.
    pub fn validate(&self) -> Result<(), RouteError> {
        match self {
            RankMode::Single(_) => Ok(()),
            RankMode::MultiCriteria(weights) => weights.validate(),
        }
    }
}

impl Default for RankMode {
    fn default() -> Self {
        RankMode::MultiCriteria(CriteriaWeights::default())
    }
}

/// Named ranking presets offered to travellers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preference {
    Shortest,
    Fastest,
    Cheapest,
    FewestHops,
    /// 0.3 / 0.3 / 0.4
    BalancedEconomy,
    /// 0.2 / 0.5 / 0.3
    BalancedSpeed,
    /// 0.6 / 0.2 / 0.2
    DistancePriority,
    /// 0.2 / 0.6 / 0.2
    TimePriority,
    /// 0.2 / 0.2 / 0.6
    CostPriority,
}

impl Preference {
    /// Every preset.
    pub const ALL: [Preference; 9] = [
        Preference::Shortest,
        Preference::Fastest,
        Preference::Cheapest,
        Preference::FewestHops,
        Preference::BalancedEconomy,
        Preference::BalancedSpeed,
        Preference::DistancePriority,
        Preference::TimePriority,
        Preference::CostPriority,
    ];

    /// The ranking mode this preset stands for.
    pub fn mode(self) -> RankMode {
        match self {
            Preference::Shortest => RankMode::Single(Metric::Distance),
            Preference::Fastest => RankMode::Single(Metric::Time),
            Preference::Cheapest => RankMode::Single(Metric::Cost),
            Preference::FewestHops => RankMode::Single(Metric::Hops),
            Preference::BalancedEconomy => {
                RankMode::MultiCriteria(CriteriaWeights::new(0.3, 0.3, 0.4))
            }
            Preference::BalancedSpeed => {
                RankMode::MultiCriteria(CriteriaWeights::new(0.2, 0.5, 0.3))
            }
            Preference::DistancePriority => {
                RankMode::MultiCriteria(CriteriaWeights::new(0.6, 0.2, 0.2))
            }
            Preference::TimePriority => {
                RankMode::MultiCriteria(CriteriaWeights::new(0.2, 0.6, 0.2))
            }
            Preference::CostPriority => {
                RankMode::MultiCriteria(CriteriaWeights::new(0.2, 0.2, 0.6))
            }
        }
    }
}

impl From<Preference> for RankMode {
    fn from(preference: Preference) -> Self {
        preference.mode()
    }
}

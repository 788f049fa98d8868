//! Search configuration for the route engine.

use crate::error::RouteError;
use crate::rank::CriteriaWeights;

/// Configuration parameters for route search and ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Multiplier on heuristic estimates.
    /// 1.0 keeps heuristic search optimal; larger values expand fewer nodes
    /// but may return a costlier path.
    pub heuristic_weight: f64,

    /// Fastest average speed any route can achieve (km/h).
    /// Bounds the time heuristic.
    pub max_speed_kmh: f64,

    /// Rate per km assumed by the cost heuristic when no rates are known.
    pub fallback_rate_per_km: f64,

    /// Number of paths (best included) alternative generation aims for.
    pub alternative_count: usize,

    /// Number of ranked paths returned.
    pub top_n: usize,

    /// Default weights for multi-criteria ranking.
    pub criteria: CriteriaWeights,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        heuristic_weight: f64,
        max_speed_kmh: f64,
        fallback_rate_per_km: f64,
        alternative_count: usize,
        top_n: usize,
        criteria: CriteriaWeights,
    ) -> Self {
        Self {
            heuristic_weight,
            max_speed_kmh,
            fallback_rate_per_km,
            alternative_count,
            top_n,
            criteria,
        }
    }

    /// Check every parameter is usable.
    pub fn validate(&self) -> Result<(), RouteError> {
        validate_heuristic_weight(self.heuristic_weight)?;

        if !self.max_speed_kmh.is_finite() || self.max_speed_kmh <= 0.0 {
            return Err(RouteError::InvalidConfig(format!(
                "max speed must be positive, got {}",
                self.max_speed_kmh
            )));
        }

        if !self.fallback_rate_per_km.is_finite() || self.fallback_rate_per_km < 0.0 {
            return Err(RouteError::InvalidConfig(format!(
                "fallback rate must be non-negative, got {}",
                self.fallback_rate_per_km
            )));
        }

        if self.alternative_count == 0 {
            return Err(RouteError::InvalidPathCount(0));
        }

        if self.top_n == 0 {
            return Err(RouteError::InvalidConfig(
                "top_n must be at least 1".to_string(),
            ));
        }

        self.criteria.validate()
    }

    /// Lower bound on hours needed to cover `distance_km`.
    pub fn min_hours(&self, distance_km: f64) -> f64 {
        distance_km / self.max_speed_kmh
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            heuristic_weight: 1.0,
            max_speed_kmh: 120.0,
            fallback_rate_per_km: 10.0,
            alternative_count: 3,
            top_n: 3,
            criteria: CriteriaWeights::default(),
        }
    }
}

/// Heuristic weights below 1.0 would under-use the estimate for no gain.
pub(crate) fn validate_heuristic_weight(weight: f64) -> Result<(), RouteError> {
    if weight.is_finite() && weight >= 1.0 {
        Ok(())
    } else {
        Err(RouteError::InvalidHeuristicWeight(weight))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = SearchConfig::default();

        assert_eq!(config.heuristic_weight, 1.0);
        assert_eq!(config.max_speed_kmh, 120.0);
        assert_eq!(config.fallback_rate_per_km, 10.0);
        assert_eq!(config.alternative_count, 3);
        assert_eq!(config.top_n, 3);
        assert_eq!(config.criteria, CriteriaWeights::new(0.3, 0.3, 0.4));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn custom_config() {
        let config = SearchConfig::new(1.5, 300.0, 4.0, 5, 10, CriteriaWeights::new(1.0, 0.0, 0.0));

        assert_eq!(config.heuristic_weight, 1.5);
        assert_eq!(config.max_speed_kmh, 300.0);
        assert_eq!(config.fallback_rate_per_km, 4.0);
        assert_eq!(config.alternative_count, 5);
        assert_eq!(config.top_n, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn min_hours() {
        let config = SearchConfig::default();
        assert_eq!(config.min_hours(240.0), 2.0);
    }

    #[test]
    fn rejects_bad_parameters() {
        let config = SearchConfig {
            heuristic_weight: 0.5,
            ..SearchConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(RouteError::InvalidHeuristicWeight(0.5))
        );

        let config = SearchConfig {
            max_speed_kmh: 0.0,
            ..SearchConfig::default()
        };
        assert!(matches!(config.validate(), Err(RouteError::InvalidConfig(_))));

        let config = SearchConfig {
            fallback_rate_per_km: -1.0,
            ..SearchConfig::default()
        };
        assert!(matches!(config.validate(), Err(RouteError::InvalidConfig(_))));

        let config = SearchConfig {
            alternative_count: 0,
            ..SearchConfig::default()
        };
        assert_eq!(config.validate(), Err(RouteError::InvalidPathCount(0)));

        let config = SearchConfig {
            top_n: 0,
            ..SearchConfig::default()
        };
        assert!(matches!(config.validate(), Err(RouteError::InvalidConfig(_))));

        let config = SearchConfig {
            criteria: CriteriaWeights::new(-0.1, 0.5, 0.5),
            ..SearchConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(RouteError::InvalidCriteriaWeights(_))
        ));
    }

    #[test]
    fn heuristic_weight_bounds() {
        assert!(validate_heuristic_weight(1.0).is_ok());
        assert!(validate_heuristic_weight(3.0).is_ok());
        assert!(validate_heuristic_weight(0.99).is_err());
        assert!(validate_heuristic_weight(f64::NAN).is_err());
        assert!(validate_heuristic_weight(f64::INFINITY).is_err());
    }
}

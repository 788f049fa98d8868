//! API boundary errors.
//!
//! Searches never fail for ordinary unreachability; that outcome is an
//! absent path. These errors only describe parameters a caller should
//! never have passed in the first place.

/// Invalid parameters rejected before any search work is done.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RouteError {
    /// Heuristic weight must be finite and at least 1.0
    #[error("invalid heuristic weight {0}: must be finite and >= 1.0")]
    InvalidHeuristicWeight(f64),

    /// Alternative or k-shortest count must be positive
    #[error("invalid path count {0}: must be at least 1")]
    InvalidPathCount(usize),

    /// Multi-criteria weights must be finite, non-negative and not all zero
    #[error("invalid criteria weights: {0}")]
    InvalidCriteriaWeights(&'static str),

    /// Search configuration is inconsistent
    #[error("invalid search configuration: {0}")]
    InvalidConfig(String),

    /// Multi-goal routing needs at least one goal
    #[error("goal set is empty")]
    EmptyGoalSet,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = RouteError::InvalidHeuristicWeight(0.5);
        assert_eq!(
            err.to_string(),
            "invalid heuristic weight 0.5: must be finite and >= 1.0"
        );

        let err = RouteError::InvalidPathCount(0);
        assert_eq!(err.to_string(), "invalid path count 0: must be at least 1");

        let err = RouteError::InvalidCriteriaWeights("all weights are zero");
        assert_eq!(
            err.to_string(),
            "invalid criteria weights: all weights are zero"
        );

        let err = RouteError::InvalidConfig("max speed must be positive".into());
        assert_eq!(
            err.to_string(),
            "invalid search configuration: max speed must be positive"
        );

        assert_eq!(RouteError::EmptyGoalSet.to_string(), "goal set is empty");
    }
}

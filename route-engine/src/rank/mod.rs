//! Path ranking and statistics.
//!
//! Works on candidate sets that already exist, whether produced by the
//! searches in this crate or by an external enumerator: ranks them by one
//! metric or a weighted blend, filters them by hard limits, and summarises
//! how far they spread.

mod candidate;
mod criteria;
mod ranking;
mod stats;

pub use candidate::{PathCandidate, RankedPath};
pub use criteria::{CriteriaWeights, Preference, RankMode};
pub use ranking::{
    MetricDelta, RankConstraints, TopComparison, compare_top, composite_scores, deduplicate,
    rank_paths, rank_with_constraints, remove_dominated,
};
pub use stats::{MetricSummary, PathStatistics, path_statistics, percentile};

//! Route search.
//!
//! Every search here is a label-setting search over a [`Graph`](crate::domain::Graph)
//! snapshot, parameterised by the metric being minimized:
//!
//! - [`dijkstra`]: plain weighted search
//! - [`astar`] / [`weighted_astar`]: guided by a lower-bound [`Heuristic`]
//! - [`bidirectional`]: two frontiers meeting in the middle
//! - [`node_blocking_alternatives`] and [`yen_k_shortest`]: more than one route
//! - [`multi_goal`]: a greedy tour through several goals
//!
//! [`Planner`] bundles them behind a validated [`SearchConfig`].

mod alternatives;
mod bidirectional;
mod config;
mod frontier;
mod heuristic;
mod multi_goal;
mod planner;
mod result;
mod weighted;
mod yen;


pub use alternatives::{AlternativeStrategy, AlternativeSummary, node_blocking_alternatives};
pub use bidirectional::{
    BidirectionalComparison, BidirectionalMode, bidirectional, bidirectional_astar,
    bidirectional_bfs, bidirectional_dijkstra, compare_with_unidirectional, paths_from_many,
    paths_to_many,
};
pub use config::SearchConfig;
pub use heuristic::{GeoHeuristic, Heuristic, ZeroHeuristic, astar, weighted_astar};
pub use multi_goal::{MultiGoalRoute, multi_goal};
pub use planner::{HeuristicComparison, Planner};
pub use result::{SearchResult, SearchStats};
pub use weighted::{dijkstra, dijkstra_by};
pub use yen::yen_k_shortest;

//! Multi-criteria route search over a multi-modal transport network.
//!
//! Answers: "what is the best way from A to B by distance, time or money,
//! and what are the sensible alternatives?"
//!
//! The engine works on an in-memory graph snapshot handed over by the
//! caller. Every search is a pure function of its inputs: scratch state
//! (frontiers, labels, predecessors) lives on the stack of a single call,
//! so one [`Graph`](domain::Graph) can be searched from many threads at once.

pub mod domain;
pub mod error;
pub mod rank;
pub mod search;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::RouteError;

//! Min-priority frontier.
//!
//! A binary heap of `(priority, node)` entries popped smallest first. Decrease
//! key is done lazily: callers push the node again with its new priority and
//! skip stale entries when they surface. Equal priorities pop in insertion
//! order.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::domain::NodeId;

#[derive(Debug, Clone, Copy)]
struct Entry {
    priority: f64,
    seq: u64,
    node: NodeId,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap.
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Nodes awaiting expansion, ordered by ascending priority.
#[derive(Debug, Default)]
pub(crate) struct Frontier {
    heap: BinaryHeap<Entry>,
    next_seq: u64,
}

impl Frontier {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, node: NodeId, priority: f64) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry {
            priority,
            seq,
            node,
        });
    }

    /// Remove and return the entry with the smallest priority.
    pub(crate) fn pop(&mut self) -> Option<(NodeId, f64)> {
        self.heap.pop().map(|e| (e.node, e.priority))
    }

    /// Smallest priority without removing it.
    pub(crate) fn peek_priority(&self) -> Option<f64> {
        self.heap.peek().map(|e| e.priority)
    }

    /// Drop entries from the top while `stale` says they are outdated.
    pub(crate) fn discard_while(&mut self, mut stale: impl FnMut(NodeId) -> bool) {
        while let Some(top) = self.heap.peek() {
            if !stale(top.node) {
                break;
            }
            self.heap.pop();
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

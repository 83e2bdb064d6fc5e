//! Greedy prefix-tree construction from a frequency table.

use crate::freq::FrequencyTable;
use huffpack_core::{HuffPackError, Result};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// A node of the prefix tree.
///
/// Ownership is strictly tree-shaped: each internal node exclusively owns
/// its two children. Weights are only needed while merging and live in the
/// builder's heap entries, not in the finished tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffNode {
    /// Terminal node carrying a symbol (a literal byte or the sentinel).
    Leaf {
        /// Symbol value, 0..=256.
        symbol: u16,
    },
    /// Two-child interior node.
    Internal {
        /// Subtree reached on a `0` bit.
        left: Box<HuffNode>,
        /// Subtree reached on a `1` bit.
        right: Box<HuffNode>,
    },
}

impl HuffNode {
    /// Whether this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffNode::Leaf { .. })
    }

    /// Number of leaves in this subtree.
    pub fn leaf_count(&self) -> usize {
        match self {
            HuffNode::Leaf { .. } => 1,
            HuffNode::Internal { left, right } => left.leaf_count() + right.leaf_count(),
        }
    }
}

/// Pending subtree in the merge queue.
///
/// Ordered by `(weight, kind, tie)`: lighter first, leaves before internal
/// nodes of equal weight, equal-weight leaves by ascending symbol, and
/// equal-weight internal nodes by creation order. The order is total, so
/// two runs over the same input build the same tree bit for bit.
#[derive(Debug)]
struct HeapEntry {
    weight: u64,
    kind: u8,
    tie: u32,
    node: HuffNode,
}

impl HeapEntry {
    fn key(&self) -> (u64, u8, u32) {
        (self.weight, self.kind, self.tie)
    }
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

fn pop_min(heap: &mut BinaryHeap<Reverse<HeapEntry>>) -> Result<HeapEntry> {
    match heap.pop() {
        Some(Reverse(entry)) => Ok(entry),
        None => Err(HuffPackError::invariant(
            "merge queue drained before a root was formed",
        )),
    }
}

/// Build the prefix tree for a frequency snapshot.
///
/// Seeds a min-priority queue with one leaf per nonzero-count symbol, then
/// greedily merges the two lowest-weight entries until a single root
/// remains. The sentinel guarantees the queue is never empty; an empty
/// source leaves only the sentinel leaf, which gets paired with a
/// zero-weight leaf for symbol 0 so the root is always an internal node and
/// every code has length at least 1.
pub fn build_tree(freqs: &FrequencyTable) -> Result<HuffNode> {
    let mut heap: BinaryHeap<Reverse<HeapEntry>> = freqs
        .nonzero()
        .map(|(symbol, weight)| {
            Reverse(HeapEntry {
                weight,
                kind: 0,
                tie: symbol as u32,
                node: HuffNode::Leaf { symbol },
            })
        })
        .collect();

    if heap.len() == 1 {
        // Empty source: only the sentinel survived counting.
        heap.push(Reverse(HeapEntry {
            weight: 0,
            kind: 0,
            tie: 0,
            node: HuffNode::Leaf { symbol: 0 },
        }));
    }

    let mut seq = 0u32;
    while heap.len() > 1 {
        let left = pop_min(&mut heap)?;
        let right = pop_min(&mut heap)?;

        heap.push(Reverse(HeapEntry {
            weight: left.weight + right.weight,
            kind: 1,
            tie: seq,
            node: HuffNode::Internal {
                left: Box::new(left.node),
                right: Box::new(right.node),
            },
        }));
        seq += 1;
    }

    pop_min(&mut heap).map(|entry| entry.node)
}

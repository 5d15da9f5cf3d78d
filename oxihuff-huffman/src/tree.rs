//! Huffman tree construction.
//!
//! The tree is rebuilt from the same frequency table on both sides of the
//! wire, so construction must be fully deterministic. Entries in the
//! priority queue are ordered by `(priority, order)`:
//!
//! - a leaf's `order` is its symbol index (bytes 0-255, end-of-stream 256),
//! - an internal node's `order` is `257 + n` where `n` counts previous merges.
//!
//! Equal-priority leaves therefore leave the queue in ascending symbol
//! order, and equal-priority internal nodes in creation order, after any
//! leaf of the same priority. The first entry extracted in a merge becomes
//! the left (`0`) child. Changing any of this changes the file format.

use crate::frequency::FrequencyTable;
use crate::symbol::{SYMBOL_COUNT, Symbol};
use oxihuff_core::error::{OxiHuffError, Result};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use tracing::debug;

/// A node of a Huffman tree.
///
/// Internal nodes own both children; dropping the root frees the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode {
    /// A symbol.
    Leaf(Symbol),
    /// Left (bit 0) and right (bit 1) subtrees.
    Internal(Box<HuffmanNode>, Box<HuffmanNode>),
}

impl HuffmanNode {
    /// Whether this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    /// The symbol of a leaf.
    pub fn symbol(&self) -> Option<Symbol> {
        match self {
            Self::Leaf(symbol) => Some(*symbol),
            Self::Internal(..) => None,
        }
    }

    /// The child selected by `bit` (0 = left, 1 = right).
    ///
    /// `None` for a leaf or a bit value other than 0 or 1.
    pub fn child(&self, bit: u8) -> Option<&HuffmanNode> {
        match (self, bit) {
            (Self::Internal(left, _), 0) => Some(left),
            (Self::Internal(_, right), 1) => Some(right),
            _ => None,
        }
    }

    fn leaf_count(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Internal(left, right) => left.leaf_count() + right.leaf_count(),
        }
    }

    fn depth(&self) -> usize {
        match self {
            Self::Leaf(_) => 0,
            Self::Internal(left, right) => 1 + left.depth().max(right.depth()),
        }
    }
}

/// Priority queue entry: a subtree and the sum of its leaf counts.
#[derive(Debug)]
struct QueueEntry {
    priority: u64,
    order: u32,
    node: HuffmanNode,
}

impl QueueEntry {
    fn key(&self) -> (u64, u32) {
        (self.priority, self.order)
    }
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for QueueEntry {}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap, we need the minimum first.
        other.key().cmp(&self.key())
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A Huffman prefix-code tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: HuffmanNode,
}

impl HuffmanTree {
    /// Build the tree for `frequencies` by repeated minimum-priority merges.
    ///
    /// A table holding only the end-of-stream symbol yields a single leaf.
    /// Fails if the combined counts overflow `u64`.
    pub fn build(frequencies: &FrequencyTable) -> Result<Self> {
        let mut heap = BinaryHeap::with_capacity(frequencies.symbol_count());
        for (symbol, count) in frequencies.iter() {
            heap.push(QueueEntry {
                priority: count,
                order: symbol.index() as u32,
                node: HuffmanNode::Leaf(symbol),
            });
        }

        let mut next_order = SYMBOL_COUNT as u32;
        loop {
            let first = heap
                .pop()
                .ok_or_else(|| OxiHuffError::invalid_tree("no symbols to build from"))?;
            let Some(second) = heap.pop() else {
                let tree = Self { root: first.node };
                debug!(
                    leaves = tree.leaf_count(),
                    depth = tree.depth(),
                    "huffman tree built"
                );
                return Ok(tree);
            };

            let priority = first.priority.checked_add(second.priority).ok_or_else(|| {
                OxiHuffError::invalid_tree("combined symbol counts overflow 64 bits")
            })?;
            heap.push(QueueEntry {
                priority,
                order: next_order,
                node: HuffmanNode::Internal(Box::new(first.node), Box::new(second.node)),
            });
            next_order += 1;
        }
    }

    /// The root node.
    pub fn root(&self) -> &HuffmanNode {
        &self.root
    }

    /// Number of leaves (distinct symbols).
    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    /// Length of the longest root-to-leaf path (0 for a single leaf).
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Code length of every leaf, in ascending symbol order.
    pub fn code_lengths(&self) -> Vec<(Symbol, usize)> {
        let mut lengths = Vec::with_capacity(self.leaf_count());
        let mut pending = vec![(&self.root, 0usize)];
        while let Some((node, depth)) = pending.pop() {
            match node {
                HuffmanNode::Leaf(symbol) => lengths.push((*symbol, depth)),
                HuffmanNode::Internal(left, right) => {
                    pending.push((&**left, depth + 1));
                    pending.push((&**right, depth + 1));
                }
            }
        }
        lengths.sort_unstable();
        lengths
    }
}

//! Per-symbol bit codes derived from a Huffman tree.

use crate::frequency::FrequencyTable;
use crate::symbol::{SYMBOL_COUNT, Symbol};
use crate::tree::{HuffmanNode, HuffmanTree};
use tracing::trace;

/// Maps each symbol present in a tree to its root-to-leaf bit path.
///
/// Descending left appends 0, descending right appends 1. The only leaf of
/// a single-leaf tree gets the empty code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: Vec<Option<Vec<u8>>>,
}

impl CodeTable {
    /// Walk `tree` and record every leaf's path.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = vec![None; SYMBOL_COUNT];
        let mut pending: Vec<(&HuffmanNode, Vec<u8>)> = vec![(tree.root(), Vec::new())];

        while let Some((node, path)) = pending.pop() {
            match node {
                HuffmanNode::Leaf(symbol) => {
                    trace!(%symbol, code = %format_code(&path), "assigned code");
                    codes[symbol.index()] = Some(path);
                }
                HuffmanNode::Internal(left, right) => {
                    let mut right_path = path.clone();
                    right_path.push(1);
                    let mut left_path = path;
                    left_path.push(0);
                    pending.push((right, right_path));
                    pending.push((left, left_path));
                }
            }
        }

        Self { codes }
    }

    /// The code for `symbol`, or `None` if it is not in the tree.
    pub fn get(&self, symbol: Symbol) -> Option<&[u8]> {
        self.codes[symbol.index()].as_deref()
    }

    /// All assigned codes in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &[u8])> + '_ {
        self.codes.iter().enumerate().filter_map(|(index, code)| {
            let code = code.as_deref()?;
            Symbol::from_index(index).map(|symbol| (symbol, code))
        })
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.iter().filter(|c| c.is_some()).count()
    }

    /// Whether no symbol has a code.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Length of the longest code.
    pub fn max_length(&self) -> usize {
        self.iter().map(|(_, code)| code.len()).max().unwrap_or(0)
    }

    /// Total encoded size in bits: sum of `count * code length`.
    ///
    /// Symbols missing from the table contribute nothing. Saturates on
    /// overflow.
    pub fn weighted_length(&self, frequencies: &FrequencyTable) -> u64 {
        frequencies.iter().fold(0u64, |acc, (symbol, count)| {
            let len = self.get(symbol).map_or(0, |code| code.len() as u64);
            acc.saturating_add(count.saturating_mul(len))
        })
    }
}

/// Render a code as a string of `0`/`1` characters.
pub fn format_code(code: &[u8]) -> String {
    code.iter().map(|&bit| if bit == 0 { '0' } else { '1' }).collect()
}

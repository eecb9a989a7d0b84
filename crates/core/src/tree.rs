//! Code tree construction and codeword derivation.
//!
//! The tree is stored as an arena: nodes live in a `Vec` and children are
//! referenced by index. Leaves are pushed first (ascending byte order), then
//! every merge appends one internal node, so the root is always the last node.
//!
//! # Tie-breaking
//!
//! The min-heap is keyed on `(weight, node index)`. Among equal weights the
//! node created first is extracted first, which makes the tree shape a pure
//! function of the frequency table. Any other order would also give a valid
//! prefix code; only this one reproduces the same codewords across runs.

use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;
use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};
use tracing::debug;

/// A single node of the code tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    /// Terminal node carrying one symbol
    Leaf { symbol: u8, weight: u64 },
    /// Merge of two subtrees; `left` is reached by '0', `right` by '1'
    Internal { weight: u64, left: usize, right: usize },
}

impl Node {
    pub fn weight(&self) -> u64 {
        match *self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}

/// Binary code tree whose root-to-leaf paths are the codewords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTree {
    nodes: Vec<Node>,
    root: usize,
}

impl CodeTree {
    /// Build the optimal prefix-code tree for `table`.
    ///
    /// Entries with a zero count are ignored.
    ///
    /// # Errors
    /// `Error::EmptyAlphabet` if no entry has a positive count.
    pub fn build(table: &FrequencyTable) -> Result<Self> {
        let mut nodes: Vec<Node> = table
            .positive()
            .map(|(symbol, weight)| Node::Leaf { symbol, weight })
            .collect();

        if nodes.is_empty() {
            return Err(Error::EmptyAlphabet);
        }

        let mut heap: BinaryHeap<Reverse<(u64, usize)>> = nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| Reverse((node.weight(), idx)))
            .collect();

        // A lone leaf is never merged: it becomes the root directly.
        while heap.len() > 1 {
            let (Some(Reverse((lw, left))), Some(Reverse((rw, right)))) = (heap.pop(), heap.pop())
            else {
                break;
            };

            // Crafted artifacts may carry counts near u64::MAX.
            let weight = lw.saturating_add(rw);
            nodes.push(Node::Internal {
                weight,
                left,
                right,
            });
            heap.push(Reverse((weight, nodes.len() - 1)));
        }

        let root = nodes.len() - 1;
        let tree = Self { nodes, root };

        debug!(
            symbols = tree.leaf_count(),
            nodes = tree.nodes.len(),
            weight = tree.weight(),
            "built code tree"
        );

        Ok(tree)
    }

    /// Index of the root node.
    pub fn root(&self) -> usize {
        self.root
    }

    /// Node at `index`, if it exists.
    pub fn node(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    /// Total weight (sum of all leaf counts).
    pub fn weight(&self) -> u64 {
        self.nodes[self.root].weight()
    }

    /// Number of symbols in the tree.
    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// True when the alphabet has exactly one symbol.
    pub fn is_single_leaf(&self) -> bool {
        self.nodes[self.root].is_leaf()
    }

    /// Derive the symbol → codeword table by depth-first traversal.
    ///
    /// A single-leaf tree gets the one-bit codeword `"0"`.
    pub fn code_table(&self) -> CodeTable {
        let mut codes = BTreeMap::new();
        let mut stack = vec![(self.root, String::new())];

        while let Some((idx, prefix)) = stack.pop() {
            match self.nodes[idx] {
                Node::Leaf { symbol, .. } => {
                    let code = if prefix.is_empty() {
                        "0".to_string()
                    } else {
                        prefix
                    };
                    codes.insert(symbol, code);
                }
                Node::Internal { left, right, .. } => {
                    let mut right_prefix = prefix.clone();
                    right_prefix.push('1');
                    stack.push((right, right_prefix));

                    let mut left_prefix = prefix;
                    left_prefix.push('0');
                    stack.push((left, left_prefix));
                }
            }
        }

        CodeTable { codes }
    }

    /// Decode a bit string against this tree.
    ///
    /// See [`crate::codec::decode_text`].
    pub fn decode(&self, bits: &str) -> Result<Vec<u8>> {
        crate::codec::decode_text(bits, Some(self))
    }
}

/// Mapping from symbol to its codeword of '0'/'1' characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<u8, String>,
}

impl CodeTable {
    /// Codeword for `symbol`.
    pub fn get(&self, symbol: u8) -> Option<&str> {
        self.codes.get(&symbol).map(String::as_str)
    }

    /// Iterate `(symbol, codeword)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &str)> + '_ {
        self.codes.iter().map(|(&s, c)| (s, c.as_str()))
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Length of the longest codeword.
    pub fn max_len(&self) -> usize {
        self.codes.values().map(String::len).max().unwrap_or(0)
    }

    /// Number of bits needed to encode text with the given frequencies.
    pub fn encoded_len(&self, table: &FrequencyTable) -> u64 {
        table
            .positive()
            .map(|(s, c)| c * self.get(s).map_or(0, str::len) as u64)
            .sum()
    }

    /// Check that no codeword is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        // In sorted order, a prefix always sorts immediately before some
        // word it prefixes, so adjacent pairs suffice.
        let mut words: Vec<&str> = self.codes.values().map(String::as_str).collect();
        words.sort_unstable();
        words.windows(2).all(|w| !w[1].starts_with(w[0]))
    }
}

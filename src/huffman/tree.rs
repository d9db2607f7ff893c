// src/huffman/tree.rs

//! Arena-backed Huffman tree.
//!
//! Nodes live in a flat `Vec` and refer to their children by index, so the
//! whole tree is released at once when the arena is dropped. Parents own
//! children only; there are no back references.

use crate::huffman::code::{Code, symbol_label};
use crate::utils::error::{HuffError, Result};
use bitvec::prelude::*;
use std::fmt;

/// Index of a node inside a [`NodeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A tree node. Only leaves carry a symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf {
        symbol: u8,
        frequency: u64,
    },
    Internal {
        left: Option<NodeId>,
        right: Option<NodeId>,
        frequency: u64,
    },
}

impl Node {
    pub fn frequency(&self) -> u64 {
        match self {
            Node::Leaf { frequency, .. } | Node::Internal { frequency, .. } => *frequency,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// The child reached by `bit` (`false` = left, `true` = right).
    pub fn child(&self, bit: bool) -> Option<NodeId> {
        match self {
            Node::Leaf { .. } => None,
            Node::Internal { left, right, .. } => {
                if bit {
                    *right
                } else {
                    *left
                }
            }
        }
    }
}

/// Flat storage for the nodes of one tree.
#[derive(Debug, Clone, Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    fn push(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// Creates a childless node for `symbol`.
    pub fn make_leaf(&mut self, frequency: u64, symbol: u8) -> NodeId {
        self.push(Node::Leaf { symbol, frequency })
    }

    /// Joins two subtrees under a new node whose frequency is their sum.
    pub fn make_internal(&mut self, left: NodeId, right: NodeId) -> NodeId {
        let frequency = self[left].frequency() + self[right].frequency();
        self.push(Node::Internal {
            left: Some(left),
            right: Some(right),
            frequency,
        })
    }

    /// Creates an internal node with a single left child.
    pub(crate) fn make_unary(&mut self, left: NodeId) -> NodeId {
        let frequency = self[left].frequency();
        self.push(Node::Internal {
            left: Some(left),
            right: None,
            frequency,
        })
    }

    /// Creates an empty internal node to be filled during reconstruction.
    pub fn make_placeholder(&mut self) -> NodeId {
        self.push(Node::Internal {
            left: None,
            right: None,
            frequency: 0,
        })
    }

    fn set_child(&mut self, parent: NodeId, bit: bool, child: NodeId) {
        if let Node::Internal { left, right, .. } = &mut self.nodes[parent.0] {
            if bit {
                *right = Some(child);
            } else {
                *left = Some(child);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl std::ops::Index<NodeId> for NodeArena {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }
}

/// A Huffman tree: an arena plus the index of its root.
#[derive(Debug, Clone)]
pub struct HuffmanTree {
    arena: NodeArena,
    root: NodeId,
}

impl HuffmanTree {
    pub(crate) fn from_parts(arena: NodeArena, root: NodeId) -> Self {
        Self { arena, root }
    }

    /// Rebuilds a tree from `(symbol, code)` pairs read out of a header.
    ///
    /// Each code is inserted as a root-to-leaf path, creating internal nodes
    /// where none exist yet. Insertion order does not matter. Codes that
    /// collide with, or run through, an earlier code are rejected.
    pub fn from_codes<'a, I>(codes: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u8, &'a BitSlice<u8, Msb0>)>,
    {
        let mut arena = NodeArena::new();
        let root = arena.make_placeholder();
        let mut tree = Self { arena, root };
        for (symbol, code) in codes {
            tree.insert_code(symbol, code)?;
        }
        Ok(tree)
    }

    fn insert_code(&mut self, symbol: u8, code: &BitSlice<u8, Msb0>) -> Result<()> {
        if code.is_empty() {
            return Err(HuffError::MalformedHeader(format!(
                "symbol {} has an empty code",
                symbol
            )));
        }

        let mut at = self.root;
        let last = code.len() - 1;
        for (depth, bit) in code.iter().by_vals().enumerate() {
            if let Node::Leaf { symbol: other, .. } = self.arena[at] {
                return Err(HuffError::MalformedHeader(format!(
                    "code for symbol {} runs through the code of symbol {}",
                    symbol, other
                )));
            }

            let existing = self.arena[at].child(bit);
            if depth == last {
                if existing.is_some() {
                    return Err(HuffError::MalformedHeader(format!(
                        "code for symbol {} is already taken or is a prefix of another code",
                        symbol
                    )));
                }
                let leaf = self.arena.make_leaf(0, symbol);
                self.arena.set_child(at, bit, leaf);
            } else {
                at = match existing {
                    Some(next) => next,
                    None => {
                        let next = self.arena.make_placeholder();
                        self.arena.set_child(at, bit, next);
                        next
                    }
                };
            }
        }
        Ok(())
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.arena[id]
    }

    pub fn child(&self, id: NodeId, bit: bool) -> Option<NodeId> {
        self.arena[id].child(bit)
    }

    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Visits every leaf left to right with its root-to-leaf path.
    ///
    /// Uses an explicit stack, so skewed trees cannot exhaust the call stack.
    pub fn for_each_leaf<F>(&self, mut visit: F) -> Result<()>
    where
        F: FnMut(u8, &BitSlice<u8, Msb0>, u64) -> Result<()>,
    {
        let mut path = Code::new();
        // (node, depth of node, bit taken from the parent)
        let mut stack = vec![(self.root, 0usize, false)];
        while let Some((id, depth, bit)) = stack.pop() {
            if depth > 0 {
                path.truncate(depth - 1);
                path.push(bit);
            }
            match &self.arena[id] {
                Node::Leaf { symbol, frequency } => visit(*symbol, path.as_bitslice(), *frequency)?,
                Node::Internal { left, right, .. } => {
                    if let Some(right) = right {
                        stack.push((*right, depth + 1, true));
                    }
                    if let Some(left) = left {
                        stack.push((*left, depth + 1, false));
                    }
                }
            }
        }
        Ok(())
    }

    /// Renders every leaf with its depth and code, for debugging.
    pub fn dump(&self) -> TreeDump<'_> {
        TreeDump { tree: self }
    }
}

/// Display adapter returned by [`HuffmanTree::dump`].
pub struct TreeDump<'a> {
    tree: &'a HuffmanTree,
}

impl fmt::Display for TreeDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines = Vec::new();
        // The visitor never fails.
        let _ = self.tree.for_each_leaf(|symbol, code, _| {
            let bits: String = code.iter().by_vals().map(|b| if b { '1' } else { '0' }).collect();
            lines.push(format!(
                "Leaf {} at Depth {} Code {}",
                symbol_label(symbol),
                code.len(),
                bits
            ));
            Ok(())
        });
        for line in lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(bits: &str) -> Code {
        bits.chars().map(|c| c == '1').collect()
    }

    fn leaves(tree: &HuffmanTree) -> Vec<(u8, String)> {
        let mut out = Vec::new();
        tree.for_each_leaf(|symbol, path, _| {
            let bits = path.iter().by_vals().map(|b| if b { '1' } else { '0' }).collect();
            out.push((symbol, bits));
            Ok(())
        })
        .unwrap();
        out
    }

    #[test]
    fn test_make_internal_sums_frequencies() {
        let mut arena = NodeArena::new();
        let a = arena.make_leaf(3, b'a');
        let b = arena.make_leaf(4, b'b');
        let parent = arena.make_internal(a, b);
        assert_eq!(arena[parent].frequency(), 7);
        assert_eq!(arena[parent].child(false), Some(a));
        assert_eq!(arena[parent].child(true), Some(b));
        assert!(arena[a].is_leaf());
        assert_eq!(arena[a].child(false), None);
    }

    #[test]
    fn test_reconstruct_in_any_order() {
        let a = code("0");
        let b = code("11");
        let c = code("10");
        let tree = HuffmanTree::from_codes([
            (b'c', c.as_bitslice()),
            (b'a', a.as_bitslice()),
            (b'b', b.as_bitslice()),
        ])
        .unwrap();
        assert_eq!(
            leaves(&tree),
            vec![
                (b'a', "0".to_string()),
                (b'c', "10".to_string()),
                (b'b', "11".to_string())
            ]
        );
        assert_eq!(tree.node_count(), 5);
    }

    #[test]
    fn test_reconstruct_rejects_duplicate_code() {
        let a = code("01");
        let err = HuffmanTree::from_codes([(1, a.as_bitslice()), (2, a.as_bitslice())]).unwrap_err();
        assert!(matches!(err, HuffError::MalformedHeader(_)));
    }

    #[test]
    fn test_reconstruct_rejects_prefix_codes() {
        let short = code("0");
        let long = code("01");
        // Short code first: the long one runs through a leaf.
        assert!(matches!(
            HuffmanTree::from_codes([(1, short.as_bitslice()), (2, long.as_bitslice())]),
            Err(HuffError::MalformedHeader(_))
        ));
        // Long code first: the short one lands on an internal node.
        assert!(matches!(
            HuffmanTree::from_codes([(2, long.as_bitslice()), (1, short.as_bitslice())]),
            Err(HuffError::MalformedHeader(_))
        ));
    }

    #[test]
    fn test_reconstruct_rejects_empty_code() {
        let empty = Code::new();
        assert!(matches!(
            HuffmanTree::from_codes([(9, empty.as_bitslice())]),
            Err(HuffError::MalformedHeader(_))
        ));
    }

    #[test]
    fn test_deep_tree_walk_is_iterative() {
        // A 255-deep comb: symbol i has code 1^i 0, the last one 1^255.
        let mut codes = Vec::new();
        for i in 0..255u8 {
            let mut c: Code = std::iter::repeat_n(true, i as usize).collect();
            c.push(false);
            codes.push((i, c));
        }
        codes.push((255, std::iter::repeat_n(true, 255).collect()));

        let tree = HuffmanTree::from_codes(codes.iter().map(|(s, c)| (*s, c.as_bitslice()))).unwrap();
        let mut max_depth = 0;
        let mut count = 0;
        tree.for_each_leaf(|_, path, _| {
            max_depth = max_depth.max(path.len());
            count += 1;
            Ok(())
        })
        .unwrap();
        assert_eq!(count, 256);
        assert_eq!(max_depth, 255);
    }

    #[test]
    fn test_dump() {
        let a = code("0");
        let b = code("1");
        let tree = HuffmanTree::from_codes([(b'a', a.as_bitslice()), (b'\n', b.as_bitslice())]).unwrap();
        assert_eq!(
            tree.dump().to_string(),
            "Leaf a at Depth 1 Code 0\nLeaf =10 at Depth 1 Code 1\n"
        );
    }
}

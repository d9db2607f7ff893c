// src/huffman/builder.rs

//! Huffman tree construction and code assignment.
//!
//! ## Ordering
//!
//! The priority queue is sorted by frequency. Equal frequencies fall back to
//! the smallest symbol reachable by always going left from each root, and
//! fully equal keys keep their insertion order. The tree shape, and so the
//! header, depends only on the frequency table.

use crate::huffman::code::{CodeEntry, CodeTable};
use crate::huffman::frequency::{ALPHABET_SIZE, FrequencyTable};
use crate::huffman::tree::{HuffmanTree, NodeArena, NodeId};
use crate::utils::error::{HuffError, Result};
use log::{debug, trace};
use std::collections::VecDeque;

/// Longest code the one-byte length field of the header can describe.
pub const MAX_CODE_LENGTH: usize = u8::MAX as usize;

/// A subtree waiting in the queue with its ordering key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueEntry {
    pub node: NodeId,
    pub frequency: u64,
    /// Leftmost symbol of the subtree. Combined nodes inherit it from their
    /// left child.
    pub tie_break: u8,
}

impl QueueEntry {
    fn key(&self) -> (u64, u8) {
        (self.frequency, self.tie_break)
    }
}

/// Subtree roots in ascending priority order.
#[derive(Debug, Clone, Default)]
pub struct PriorityQueue {
    entries: VecDeque<QueueEntry>,
}

impl PriorityQueue {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(ALPHABET_SIZE),
        }
    }

    /// Inserts before the first entry with a strictly greater key, so equal
    /// keys stay in insertion order.
    pub fn insert(&mut self, entry: QueueEntry) {
        let key = entry.key();
        let position = self.entries.partition_point(|e| e.key() <= key);
        self.entries.insert(position, entry);
    }

    /// Removes the lowest-priority entry.
    pub fn pop(&mut self) -> Option<QueueEntry> {
        self.entries.pop_front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &QueueEntry> {
        self.entries.iter()
    }
}

/// Creates one leaf per present symbol and queues it.
pub fn seed_queue(arena: &mut NodeArena, frequencies: &FrequencyTable) -> PriorityQueue {
    let mut queue = PriorityQueue::new();
    for (symbol, frequency) in frequencies.iter() {
        let node = arena.make_leaf(frequency, symbol);
        queue.insert(QueueEntry {
            node,
            frequency,
            tie_break: symbol,
        });
    }
    queue
}

/// Reduces the queue to a single tree and returns its root.
///
/// The first entry popped becomes the left child and the second the right.
/// A queue holding one symbol gets an extra root above it, so that symbol is
/// coded as the single bit `0` instead of an empty code.
pub fn build_tree(arena: &mut NodeArena, mut queue: PriorityQueue) -> Result<NodeId> {
    if queue.len() == 1 {
        let only = queue.pop().ok_or(HuffError::EmptyInput)?;
        debug!(
            "single distinct symbol {:#04x}, coding it with one bit",
            only.tie_break
        );
        return Ok(arena.make_unary(only.node));
    }

    while queue.len() > 1 {
        let (Some(left), Some(right)) = (queue.pop(), queue.pop()) else {
            break;
        };
        let node = arena.make_internal(left.node, right.node);
        trace!(
            "merged {}+{} (tie-break {:#04x})",
            left.frequency, right.frequency, left.tie_break
        );
        queue.insert(QueueEntry {
            node,
            frequency: left.frequency + right.frequency,
            tie_break: left.tie_break,
        });
    }

    queue.pop().map(|root| root.node).ok_or(HuffError::EmptyInput)
}

/// Walks the tree and records each leaf's path as its code.
///
/// Fails with `CodeTooLong` if a path does not fit the header's length byte.
/// Huffman depth is below the number of distinct symbols, so this cannot
/// trigger for a byte alphabet.
pub fn fill_codes(tree: &HuffmanTree) -> Result<CodeTable> {
    let mut table = CodeTable::new();
    tree.for_each_leaf(|symbol, path, frequency| {
        if path.len() > MAX_CODE_LENGTH {
            return Err(HuffError::CodeTooLong(path.len()));
        }
        table.insert(
            symbol,
            CodeEntry {
                code: path.to_bitvec(),
                frequency,
            },
        );
        Ok(())
    })?;
    Ok(table)
}

impl HuffmanTree {
    /// Builds the Huffman tree for a frequency table.
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Result<Self> {
        if frequencies.is_empty() {
            return Err(HuffError::EmptyInput);
        }
        let distinct = frequencies.distinct_symbols();
        let mut arena = NodeArena::with_capacity(2 * distinct);
        let queue = seed_queue(&mut arena, frequencies);
        let root = build_tree(&mut arena, queue)?;
        debug!(
            "built tree: {} symbols, {} nodes, {} total",
            distinct,
            arena.len(),
            frequencies.total()
        );
        Ok(HuffmanTree::from_parts(arena, root))
    }

    /// Codes for every leaf of this tree.
    pub fn code_table(&self) -> Result<CodeTable> {
        fill_codes(self)
    }
}

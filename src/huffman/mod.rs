// src/huffman/mod.rs

//! Static Huffman coding over the byte alphabet.
//!
//! ## Module Map
//!
//! - `frequency` - Per-byte occurrence counts
//! - `tree` - Node arena, tree reconstruction from codes
//! - `builder` - Priority queue, Huffman's greedy merge, code assignment
//! - `code` - Code table and its printable report

pub mod builder;
pub mod code;
pub mod frequency;
pub mod tree;

pub use builder::{MAX_CODE_LENGTH, PriorityQueue, QueueEntry, build_tree, fill_codes};
pub use code::{Code, CodeEntry, CodeReport, CodeTable};
pub use frequency::{ALPHABET_SIZE, FrequencyTable};
pub use tree::{HuffmanTree, Node, NodeArena, NodeId, TreeDump};

//! A static Huffman compressor for byte streams.
//!
//! This crate counts byte frequencies, builds a Huffman tree with a
//! deterministic tie-break, writes the code table as a compact header, and
//! bit-packs the input behind it. Decoding rebuilds the tree from the header
//! and walks it bit by bit.
//!
//! # Quick Start
//!
//! ```
//! use huffpack::{compress, decompress};
//!
//! let packed = compress(b"aaabbc")?;
//! assert_eq!(decompress(&packed)?, b"aaabbc");
//! # Ok::<(), huffpack::HuffError>(())
//! ```
//!
//! Files and other seekable streams go through [`Encoder`] and [`Decoder`]:
//!
//! ```ignore
//! use huffpack::{Decoder, Encoder};
//! use std::fs::File;
//!
//! let mut input = File::open("input.txt")?;
//! let summary = Encoder::default().encode(&mut input, File::create("input.huf")?)?;
//! println!("{}", summary.code_table.report());
//!
//! Decoder::default().decode(File::open("input.huf")?, File::create("output.txt")?)?;
//! ```
//!
//! # Format
//!
//! - **Symbol count**: one byte, 0 standing for 256
//! - **Code table**: symbol, code length, MSB-first code bytes per symbol
//! - **Total**: little-endian `u64` symbol count
//! - **Body**: codes packed MSB-first, zero-padded to a byte boundary

// Core modules
pub mod codec;
pub mod format;
pub mod huffman;
pub mod stream;
pub mod utils;

// Public codec API
pub use codec::{
    CodecParams, DecodeSummary, Decoder, EncodeSummary, Encoder, compress, decompress,
};

// Tree and table types (for custom workflows)
pub use huffman::{CodeEntry, CodeTable, FrequencyTable, HuffmanTree};

// Error types
pub use utils::error::{HuffError, Result};

// Constants
pub const HUFFPACK_VERSION: &str = "0.1.0";

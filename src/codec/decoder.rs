// src/codec/decoder.rs

//! Single-pass decoder: read header, rebuild tree, walk bits.

use crate::codec::params::CodecParams;
use crate::format::header::read_header;
use crate::huffman::tree::{HuffmanTree, Node, NodeId};
use crate::stream::{BitReader, WriteStream};
use crate::utils::error::{HuffError, Result};
use log::debug;
use std::io::{BufReader, BufWriter, Read, Write};

/// What one decode run produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeSummary {
    /// Symbols written to the output.
    pub total_symbols: u64,
    /// Entries in the header's code table.
    pub distinct_symbols: usize,
}

/// Position of the tree walk between input bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WalkState {
    AtRoot,
    Descending(NodeId),
}

/// Static Huffman decoder.
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    params: CodecParams,
}

impl Decoder {
    pub fn new(params: CodecParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &CodecParams {
        &self.params
    }

    /// Decompresses one stream produced by [`Encoder`](crate::Encoder).
    pub fn decode<R: Read, W: Write>(&self, input: R, output: W) -> Result<DecodeSummary> {
        let mut input = BufReader::with_capacity(self.params.buffer_size, input);
        let header = read_header(&mut input)?;
        let tree = HuffmanTree::from_codes(
            header
                .code_table
                .iter()
                .map(|(symbol, entry)| (symbol, entry.code.as_bitslice())),
        )?;
        if self.params.log_code_table {
            debug!("decoding tree:\n{}", tree.dump());
        }

        let mut output = BufWriter::with_capacity(self.params.buffer_size, output);
        unpack_body(&mut input, &mut output, &tree, header.total_symbols)?;
        output.flush().map_err(HuffError::OutputUnwritable)?;

        debug!("decoded {} symbols", header.total_symbols);
        Ok(DecodeSummary {
            total_symbols: header.total_symbols,
            distinct_symbols: header.code_table.len(),
        })
    }
}

/// Walks `tree` one input bit at a time, writing a symbol at every leaf,
/// until `total_symbols` symbols are out.
///
/// Padding after the last code is never read.
pub fn unpack_body<R: Read, W: Write>(
    reader: R,
    writer: &mut W,
    tree: &HuffmanTree,
    total_symbols: u64,
) -> Result<()> {
    let mut bits = BitReader::new(reader);
    let mut remaining = total_symbols;
    let mut state = WalkState::AtRoot;

    while remaining > 0 {
        let Some(bit) = bits.read_bit()? else {
            return Err(HuffError::TruncatedBody {
                expected: total_symbols,
                decoded: total_symbols - remaining,
            });
        };

        let at = match state {
            WalkState::AtRoot => tree.root(),
            WalkState::Descending(id) => id,
        };
        let next = tree.child(at, bit).ok_or_else(|| {
            HuffError::CorruptTree(format!(
                "no {} branch after {} of {} symbols",
                if bit { "right" } else { "left" },
                total_symbols - remaining,
                total_symbols
            ))
        })?;

        match tree.node(next) {
            Node::Leaf { symbol, .. } => {
                writer.write_byte(*symbol)?;
                remaining -= 1;
                state = WalkState::AtRoot;
            }
            Node::Internal { .. } => state = WalkState::Descending(next),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const AAABBC: [u8; 20] = [
        3, b'a', 1, 0x00, b'b', 2, 0xC0, b'c', 2, 0x80, 6, 0, 0, 0, 0, 0, 0, 0, 0x1F, 0x00,
    ];

    #[test]
    fn test_decode_aaabbc() {
        let mut out = Vec::new();
        let summary = Decoder::default().decode(Cursor::new(AAABBC), &mut out).unwrap();
        assert_eq!(out, b"aaabbc");
        assert_eq!(summary.total_symbols, 6);
        assert_eq!(summary.distinct_symbols, 3);
    }

    #[test]
    fn test_padding_is_not_decoded() {
        // The trailing byte 0x00 holds one real bit and seven pad bits that
        // would each decode to 'a' if they were read.
        let mut out = Vec::new();
        Decoder::default().decode(Cursor::new(AAABBC), &mut out).unwrap();
        assert_eq!(out.len(), 6);
    }

    #[test]
    fn test_truncated_body() {
        let mut out = Vec::new();
        let err = Decoder::default()
            .decode(Cursor::new(&AAABBC[..19]), &mut out)
            .unwrap_err();
        match err {
            HuffError::TruncatedBody { expected, decoded } => {
                assert_eq!(expected, 6);
                assert_eq!(decoded, 5);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_branch_is_corrupt_tree() {
        // One symbol coded as `0`; a `1` bit in the body has nowhere to go.
        let bytes = [1, b'z', 1, 0x00, 2, 0, 0, 0, 0, 0, 0, 0, 0b0100_0000];
        let err = Decoder::default()
            .decode(Cursor::new(bytes), Vec::new())
            .unwrap_err();
        assert!(matches!(err, HuffError::CorruptTree(_)));
    }

    #[test]
    fn test_zero_total_decodes_nothing() {
        let bytes = [1, b'z', 1, 0x00, 0, 0, 0, 0, 0, 0, 0, 0];
        let mut out = Vec::new();
        let summary = Decoder::default().decode(Cursor::new(bytes), &mut out).unwrap();
        assert!(out.is_empty());
        assert_eq!(summary.total_symbols, 0);
    }

    #[test]
    fn test_state_machine_resets_at_leaves() {
        let tree = HuffmanTree::from_codes([
            (b'x', crate::huffman::Code::from_iter([false]).as_bitslice()),
            (b'y', crate::huffman::Code::from_iter([true, false]).as_bitslice()),
            (b'z', crate::huffman::Code::from_iter([true, true]).as_bitslice()),
        ])
        .unwrap();
        // z y x x z -> 11 10 0 0 11 -> 1110 0011
        let mut out = Vec::new();
        unpack_body(Cursor::new([0b1110_0011u8]), &mut out, &tree, 5).unwrap();
        assert_eq!(out, b"zyxxz");
    }
}

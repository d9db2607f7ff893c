// src/codec/encoder.rs

//! Two-pass encoder: count, build codes, write header, rewind, pack.

use crate::codec::params::CodecParams;
use crate::format::header::write_header;
use crate::huffman::code::CodeTable;
use crate::huffman::frequency::FrequencyTable;
use crate::huffman::tree::HuffmanTree;
use crate::stream::{BitWriter, CountingWriter};
use crate::utils::error::{HuffError, Result};
use log::debug;
use std::io::{BufReader, BufWriter, ErrorKind, Read, Seek, SeekFrom, Write};

/// What one encode run produced.
#[derive(Debug, Clone)]
pub struct EncodeSummary {
    /// Codes and frequencies used for the run. Call
    /// [`CodeTable::report`] for the printable listing.
    pub code_table: CodeTable,
    /// Length of the original stream.
    pub total_symbols: u64,
    /// Header plus packed body.
    pub bytes_written: u64,
}

/// Static Huffman encoder.
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    params: CodecParams,
}

impl Encoder {
    pub fn new(params: CodecParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &CodecParams {
        &self.params
    }

    /// Compresses `input` from its current position to its end into `output`.
    ///
    /// The input is read twice: once to count symbols, then again after
    /// seeking back to where it started. An empty input fails with
    /// `EmptyInput` and writes nothing.
    pub fn encode<R, W>(&self, input: &mut R, output: W) -> Result<EncodeSummary>
    where
        R: Read + Seek,
        W: Write,
    {
        let start = input.stream_position().map_err(HuffError::InputUnreadable)?;
        let frequencies = FrequencyTable::count(&mut *input)?;
        if frequencies.is_empty() {
            return Err(HuffError::EmptyInput);
        }

        let tree = HuffmanTree::from_frequencies(&frequencies)?;
        let code_table = tree.code_table()?;
        if self.params.log_code_table {
            debug!("code table:\n{}", code_table.report());
        }

        let mut output = CountingWriter::new(BufWriter::with_capacity(self.params.buffer_size, output));
        write_header(&mut output, &code_table, frequencies.total())?;

        input
            .seek(SeekFrom::Start(start))
            .map_err(HuffError::InputUnreadable)?;
        let reader = BufReader::with_capacity(self.params.buffer_size, &mut *input);
        let packed = pack_body(reader, &mut output, &code_table)?;
        if packed != frequencies.total() {
            return Err(HuffError::InputUnreadable(std::io::Error::new(
                ErrorKind::InvalidData,
                format!(
                    "input changed between passes: counted {} symbols, packed {}",
                    frequencies.total(),
                    packed
                ),
            )));
        }

        let bytes_written = output.bytes_written();
        debug!(
            "encoded {} symbols into {} bytes",
            frequencies.total(),
            bytes_written
        );
        Ok(EncodeSummary {
            code_table,
            total_symbols: frequencies.total(),
            bytes_written,
        })
    }
}

/// Appends the code of every byte of `reader` to `writer`, MSB-first, and
/// zero-pads the final byte. Returns the number of symbols packed.
pub fn pack_body<R: Read, W: Write>(mut reader: R, writer: W, table: &CodeTable) -> Result<u64> {
    let mut bits = BitWriter::new(writer);
    let mut buffer = [0u8; 4096];
    let mut packed = 0u64;
    loop {
        let n = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(HuffError::InputUnreadable(e)),
        };
        for &symbol in &buffer[..n] {
            let entry = table
                .get(symbol)
                .ok_or(HuffError::SymbolNotInTable(symbol))?;
            bits.write_bits(&entry.code)?;
        }
        packed += n as u64;
    }
    debug!("packed {} symbols into {} bits", packed, bits.bits_written());
    bits.finish()?;
    Ok(packed)
}

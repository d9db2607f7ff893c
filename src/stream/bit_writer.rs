// src/stream/bit_writer.rs

//! MSB-first bit packing on top of any `Write`.

use crate::utils::error::{HuffError, Result};
use bitvec::prelude::*;
use std::io::Write;

/// A bit-level writer that fills each output byte from its high bit down.
pub struct BitWriter<W: Write> {
    writer: W,
    current_byte: u8,
    bits_in_current: u8,
    bits_written: u64,
}

impl<W: Write> BitWriter<W> {
    /// Creates a new BitWriter.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            current_byte: 0,
            bits_in_current: 0,
            bits_written: 0,
        }
    }

    /// Writes a single bit.
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        if bit {
            self.current_byte |= 1 << (7 - self.bits_in_current);
        }
        self.bits_in_current += 1;
        self.bits_written += 1;

        if self.bits_in_current == 8 {
            self.emit()?;
        }
        Ok(())
    }

    /// Writes every bit of `bits` in order.
    pub fn write_bits(&mut self, bits: &BitSlice<u8, Msb0>) -> Result<()> {
        for bit in bits.iter().by_vals() {
            self.write_bit(bit)?;
        }
        Ok(())
    }

    /// Total number of bits accepted so far, padding excluded.
    pub fn bits_written(&self) -> u64 {
        self.bits_written
    }

    /// Pads a partial final byte with zeros, flushes, and returns the writer.
    pub fn finish(mut self) -> Result<W> {
        if self.bits_in_current > 0 {
            self.emit()?;
        }
        self.writer.flush().map_err(HuffError::OutputUnwritable)?;
        Ok(self.writer)
    }

    fn emit(&mut self) -> Result<()> {
        self.writer
            .write_all(&[self.current_byte])
            .map_err(HuffError::OutputUnwritable)?;
        self.current_byte = 0;
        self.bits_in_current = 0;
        Ok(())
    }
}

/// Packs `bits` MSB-first into `ceil(len / 8)` bytes, zero-padding the tail.
pub fn pack_bits(bits: &BitSlice<u8, Msb0>) -> Vec<u8> {
    let mut packed = vec![0u8; bits.len().div_ceil(8)];
    for index in bits.iter_ones() {
        packed[index / 8] |= 0x80 >> (index % 8);
    }
    packed
}

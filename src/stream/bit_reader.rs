// src/stream/bit_reader.rs

//! MSB-first bit extraction on top of any `Read`.

use crate::stream::byte_stream::ReadStream;
use crate::utils::error::Result;
use std::io::Read;

/// A bit-level reader for reading packed data.
///
/// Bytes are pulled lazily, so a caller that stops asking for bits never
/// touches the rest of the stream.
pub struct BitReader<R: Read> {
    reader: R,
    current_byte: u8,
    bits_remaining: u8,
}

impl<R: Read> BitReader<R> {
    /// Creates a new BitReader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            current_byte: 0,
            bits_remaining: 0,
        }
    }

    /// Reads a single bit, or `None` once the underlying stream is exhausted.
    pub fn read_bit(&mut self) -> Result<Option<bool>> {
        if self.bits_remaining == 0 {
            match self.reader.next_byte()? {
                Some(byte) => {
                    self.current_byte = byte;
                    self.bits_remaining = 8;
                }
                None => return Ok(None),
            }
        }

        self.bits_remaining -= 1;
        Ok(Some((self.current_byte >> self.bits_remaining) & 1 == 1))
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

// src/stream/byte_stream.rs

//! Byte-level field access for the compressed container.
//!
//! Multi-byte fields are little-endian. Reads report failures as
//! `InputUnreadable` and writes as `OutputUnwritable`, so callers can tell
//! which side of the pipeline broke.

use crate::utils::error::{HuffError, Result};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Write};

/// Reading helpers for the decoder side.
pub trait ReadStream: Read {
    fn read_byte(&mut self) -> Result<u8> {
        ReadBytesExt::read_u8(self).map_err(HuffError::InputUnreadable)
    }

    fn read_u64_le(&mut self) -> Result<u64> {
        ReadBytesExt::read_u64::<LittleEndian>(self).map_err(HuffError::InputUnreadable)
    }

    /// Reads a single byte, returning `None` at a clean end of stream.
    fn next_byte(&mut self) -> Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(HuffError::InputUnreadable(e)),
            }
        }
    }
}

impl<T: Read + ?Sized> ReadStream for T {}

/// Writing helpers for the encoder side.
pub trait WriteStream: Write {
    fn write_byte(&mut self, value: u8) -> Result<()> {
        WriteBytesExt::write_u8(self, value).map_err(HuffError::OutputUnwritable)
    }

    fn write_u64_le(&mut self, value: u64) -> Result<()> {
        WriteBytesExt::write_u64::<LittleEndian>(self, value).map_err(HuffError::OutputUnwritable)
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.write_all(bytes).map_err(HuffError::OutputUnwritable)
    }
}

impl<T: Write + ?Sized> WriteStream for T {}

/// A `Write` adapter that counts the bytes passing through it.
pub struct CountingWriter<W: Write> {
    inner: W,
    written: u64,
}

impl<W: Write> CountingWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, written: 0 }
    }

    pub fn bytes_written(&self) -> u64 {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

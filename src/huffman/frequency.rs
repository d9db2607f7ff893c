// src/huffman/frequency.rs

//! Per-byte occurrence counts for one input stream.

use crate::utils::error::{HuffError, Result};
use std::io::{ErrorKind, Read};

/// Number of distinct byte values.
pub const ALPHABET_SIZE: usize = 256;

const READ_CHUNK: usize = 8 * 1024;

/// Occurrence counts indexed by byte value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; ALPHABET_SIZE],
    total: u64,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self {
            counts: [0; ALPHABET_SIZE],
            total: 0,
        }
    }

    /// Counts every byte of `data`.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = Self::new();
        table.add_bytes(data);
        table
    }

    /// Consumes `reader` to its end and counts every byte.
    ///
    /// The reader is left at end of stream; a caller that needs a second pass
    /// has to rewind it.
    pub fn count<R: Read>(reader: &mut R) -> Result<Self> {
        let mut table = Self::new();
        let mut buffer = vec![0u8; READ_CHUNK];
        loop {
            let n = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(HuffError::InputUnreadable(e)),
            };
            table.add_bytes(&buffer[..n]);
        }
        Ok(table)
    }

    fn add_bytes(&mut self, data: &[u8]) {
        for &byte in data {
            self.counts[byte as usize] += 1;
        }
        self.total += data.len() as u64;
    }

    pub fn get(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Sum of all counts, i.e. the length of the counted stream.
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Number of byte values that occur at least once.
    pub fn distinct_symbols(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Present symbols with their counts, in ascending byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(symbol, &count)| (symbol as u8, count))
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}
